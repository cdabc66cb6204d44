//! Pieces module - the tetromino shape catalog
//!
//! Every rotation state is a tight occupancy matrix: top row first, 1 means
//! occupied, and both the leftmost occupied column and the topmost occupied
//! row sit at index 0. State counts differ per kind (O has one state, I/S/Z
//! two, T/J/L four); rotation indices follow catalog order.

use std::ops::RangeInclusive;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BOARD_WIDTH};

/// One rotation state of a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: &'static [&'static [u8]],
}

impl Shape {
    /// Matrix width in cells
    pub fn width(&self) -> i8 {
        self.rows[0].len() as i8
    }

    /// Matrix height in cells
    pub fn height(&self) -> i8 {
        self.rows.len() as i8
    }

    /// Whether the matrix cell at (dx, dy) is occupied
    pub fn filled(&self, dx: i8, dy: i8) -> bool {
        self.rows[dy as usize][dx as usize] != 0
    }

    /// Occupied offsets relative to the anchor (top-left corner), row-major
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut cells = ArrayVec::new();
        for (dy, row) in self.rows.iter().enumerate() {
            for (dx, &flag) in row.iter().enumerate() {
                if flag != 0 {
                    cells.push((dx as i8, dy as i8));
                }
            }
        }
        cells
    }

    /// Anchor columns that keep every occupied cell horizontally on the
    /// board, derived from the occupied-cell bounds of this matrix
    pub fn column_range(&self) -> RangeInclusive<i8> {
        let mut min_dx = i8::MAX;
        let mut max_dx = i8::MIN;
        for (dx, _) in self.cells() {
            min_dx = min_dx.min(dx);
            max_dx = max_dx.max(dx);
        }
        -min_dx..=(BOARD_WIDTH as i8 - 1 - max_dx)
    }
}

/// Rotation states for a piece kind, in catalog order
pub fn shapes(kind: PieceKind) -> &'static [Shape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

static I_STATES: [Shape; 2] = [
    Shape {
        rows: &[&[1, 1, 1, 1]],
    },
    Shape {
        rows: &[&[1], &[1], &[1], &[1]],
    },
];

static O_STATES: [Shape; 1] = [Shape {
    rows: &[&[1, 1], &[1, 1]],
}];

static T_STATES: [Shape; 4] = [
    Shape {
        rows: &[&[0, 1, 0], &[1, 1, 1]],
    },
    Shape {
        rows: &[&[1, 0], &[1, 1], &[1, 0]],
    },
    Shape {
        rows: &[&[1, 1, 1], &[0, 1, 0]],
    },
    Shape {
        rows: &[&[0, 1], &[1, 1], &[0, 1]],
    },
];

static S_STATES: [Shape; 2] = [
    Shape {
        rows: &[&[0, 1, 1], &[1, 1, 0]],
    },
    Shape {
        rows: &[&[1, 0], &[1, 1], &[0, 1]],
    },
];

static Z_STATES: [Shape; 2] = [
    Shape {
        rows: &[&[1, 1, 0], &[0, 1, 1]],
    },
    Shape {
        rows: &[&[0, 1], &[1, 1], &[1, 0]],
    },
];

static J_STATES: [Shape; 4] = [
    Shape {
        rows: &[&[1, 0, 0], &[1, 1, 1]],
    },
    Shape {
        rows: &[&[1, 1], &[1, 0], &[1, 0]],
    },
    Shape {
        rows: &[&[1, 1, 1], &[0, 0, 1]],
    },
    Shape {
        rows: &[&[0, 1], &[0, 1], &[1, 1]],
    },
];

static L_STATES: [Shape; 4] = [
    Shape {
        rows: &[&[0, 0, 1], &[1, 1, 1]],
    },
    Shape {
        rows: &[&[1, 0], &[1, 0], &[1, 1]],
    },
    Shape {
        rows: &[&[1, 1, 1], &[1, 0, 0]],
    },
    Shape {
        rows: &[&[1, 1], &[0, 1], &[0, 1]],
    },
];

/// Spawn anchor for new pieces (x, y), centered on the top row
pub const SPAWN_POSITION: (i8, i8) = (BOARD_WIDTH as i8 / 2 - 1, 0);
