use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Flat copy of everything the UI needs to draw one player's pane.
///
/// The grid is row-major and already has the hovering piece merged in, so
/// the renderer never touches live session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub cells: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub next_kind: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.next_kind = PieceKind::I;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.game_over = false;
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            next_kind: PieceKind::I,
            score: 0,
            level: 1,
            lines: 0,
            game_over: false,
        };
        s.clear();
        s
    }
}
