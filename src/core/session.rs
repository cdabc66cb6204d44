//! Session state machine - runs one scripted player's game
//!
//! This module ties together the board, the shape catalog, the piece stream,
//! and the move search. Each call to `advance` performs exactly one step: an
//! idle session spawns the queued piece, a session holding a piece resolves
//! it (search, hard drop, lock, line clears, scoring). The session never
//! reads the clock; the caller decides when a step happens.

use crate::ai::{find_best_move, Strategy, SEARCH_START_ROW};
use crate::core::pieces::{shapes, SPAWN_POSITION};
use crate::core::{Board, PieceStream};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, LINES_PER_LEVEL, LINE_SCORES};

/// Piece waiting at the spawn location for its resolve step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }
}

/// Complete state for one player's game
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Option<ActivePiece>,
    next_kind: PieceKind,
    stream: PieceStream,
    strategy: &'static Strategy,
    seed: u32,
    score: u32,
    level: u32,
    lines: u32,
    game_over: bool,
}

impl GameSession {
    /// Create a fresh session for the given strategy and RNG seed
    pub fn new(strategy: &'static Strategy, seed: u32) -> Self {
        let mut stream = PieceStream::new(seed);
        let next_kind = stream.draw();

        Self {
            board: Board::new(),
            active: None,
            next_kind,
            stream,
            strategy,
            seed,
            score: 0,
            level: 1,
            lines: 0,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    pub fn strategy(&self) -> &'static Strategy {
        self.strategy
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Copy the visible state into a snapshot, merging the hovering piece
    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::SessionSnapshot) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                out.cells[y][x] = self.board.get(x as i8, y as i8).flatten();
            }
        }

        if let Some(piece) = self.active {
            let shape = &shapes(piece.kind)[piece.rotation];
            for (dx, dy) in shape.cells() {
                let x = piece.x + dx;
                let y = piece.y + dy;
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    out.cells[y as usize][x as usize] = Some(piece.kind);
                }
            }
        }

        out.next_kind = self.next_kind;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> crate::core::snapshot::SessionSnapshot {
        let mut s = crate::core::snapshot::SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Perform one step: spawn when idle, otherwise resolve the held piece
    pub fn advance(&mut self) {
        if self.game_over {
            return;
        }

        match self.active {
            None => self.spawn_piece(),
            Some(piece) => self.resolve_piece(piece),
        }
    }

    /// Restart from an empty board, replaying the same piece sequence
    pub fn reset(&mut self) {
        *self = Self::new(self.strategy, self.seed);
    }

    /// Put the queued piece into play at the spawn position
    ///
    /// A blocked spawn ends the game and leaves the queue untouched, so the
    /// kind shown in the preview is the one that failed to appear.
    fn spawn_piece(&mut self) {
        let kind = self.next_kind;
        let piece = ActivePiece::new(kind);

        if !self.board.can_place(&shapes(kind)[0], piece.x, piece.y) {
            self.game_over = true;
            return;
        }

        self.next_kind = self.stream.draw();
        self.active = Some(piece);
    }

    /// Search for the best placement, hard drop, lock, and score line clears
    fn resolve_piece(&mut self, piece: ActivePiece) {
        let Some(best) = find_best_move(&self.board, piece.kind, &self.strategy.weights) else {
            self.game_over = true;
            self.active = None;
            return;
        };

        let shape = &shapes(piece.kind)[best.rotation];
        let rest_y = self.board.drop_row(shape, best.x, SEARCH_START_ROW);
        self.board.lock_shape(shape, best.x, rest_y, piece.kind);

        let cleared = self.board.clear_full_rows().len() as u32;
        if cleared > 0 {
            self.lines += cleared;
            self.level = 1 + self.lines / LINES_PER_LEVEL;
            self.score += LINE_SCORES[cleared as usize] * self.level;
        }

        self.active = None;
    }
}
