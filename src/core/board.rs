//! Board module - the playing field grid
//!
//! A 10x20 grid where each cell is empty or tagged with the kind of the piece
//! that filled it. Flat array storage for cache locality and zero allocation.
//! Coordinates are signed: x ranges 0..9 left to right, y ranges 0..19 top to
//! bottom, and probes above the top row (negative y) are expressible so the
//! validator can tolerate pieces overhanging the grid edge while they drop in.

use arrayvec::ArrayVec;

use crate::core::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The playing field - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Placement validator - the single source of truth for legality.
    ///
    /// A placement is legal when every occupied cell of the shape lands inside
    /// the horizontal bounds and above the floor, and every cell already on
    /// the grid is empty. Rows above the top (y < 0) are tolerated; occupancy
    /// is only consulted for rows 0..HEIGHT.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        for (dx, dy) in shape.cells() {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
                return false;
            }
            if by >= 0 && self.is_occupied(bx, by) {
                return false;
            }
        }
        true
    }

    /// Lowest legal resting row for the shape anchored at column x, starting
    /// from a row already known to validate (hard-drop semantics)
    pub fn drop_row(&self, shape: &Shape, x: i8, from_y: i8) -> i8 {
        debug_assert!(self.can_place(shape, x, from_y));
        let mut y = from_y;
        while self.can_place(shape, x, y + 1) {
            y += 1;
        }
        y
    }

    /// Write the piece's kind tag into every occupied cell of the shape.
    /// Cells whose target falls outside the grid are dropped silently; a
    /// validated placement only produces those above the top row.
    pub fn lock_shape(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in shape.cells() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row, shift the rows above down, and refill the
    /// vacated top rows with empty cells. Returns the cleared row indices
    /// in ascending order; surviving rows keep their relative order.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Two-pointer compaction from the bottom up
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // The rows left above the write cursor are the vacated ones
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pieces::shapes;

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_set_out_of_bounds_is_a_no_op() {
        let mut board = Board::new();
        assert!(!board.set(-1, 0, Some(PieceKind::T)));
        assert!(!board.set(0, -1, Some(PieceKind::T)));
        assert!(!board.set(BOARD_WIDTH as i8, 0, Some(PieceKind::T)));
        assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_can_place_on_empty_board() {
        let board = Board::new();
        let flat_i = &shapes(PieceKind::I)[0];

        assert!(board.can_place(flat_i, 0, 0));
        assert!(board.can_place(flat_i, 6, 19));
        // Rightmost cell would land at x = 10
        assert!(!board.can_place(flat_i, 7, 0));
        assert!(!board.can_place(flat_i, -1, 0));
        // Below the floor
        assert!(!board.can_place(flat_i, 0, 20));
    }

    #[test]
    fn test_can_place_tolerates_rows_above_the_top() {
        let board = Board::new();
        let tall_i = &shapes(PieceKind::I)[1];

        // Anchor above the grid; cells at y = -2..=1 overlap only rows 0 and 1
        assert!(board.can_place(tall_i, 0, -2));

        let mut blocked = Board::new();
        blocked.set(0, 1, Some(PieceKind::O));
        assert!(!blocked.can_place(tall_i, 0, -2));
    }

    #[test]
    fn test_can_place_rejects_collisions() {
        let mut board = Board::new();
        board.set(5, 10, Some(PieceKind::Z));
        let o = &shapes(PieceKind::O)[0];

        assert!(!board.can_place(o, 5, 10));
        assert!(!board.can_place(o, 4, 9));
        assert!(board.can_place(o, 6, 10));
    }

    #[test]
    fn test_drop_row_reaches_the_floor() {
        let board = Board::new();
        assert_eq!(board.drop_row(&shapes(PieceKind::I)[0], 0, -2), 19);
        assert_eq!(board.drop_row(&shapes(PieceKind::I)[1], 0, -2), 16);
        assert_eq!(board.drop_row(&shapes(PieceKind::T)[0], 4, 0), 18);
    }

    #[test]
    fn test_drop_row_rests_on_stack() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::J);
        let o = &shapes(PieceKind::O)[0];
        // O is 2 tall; its lowest cells come to rest on row 18
        assert_eq!(board.drop_row(o, 3, 0), 17);
    }

    #[test]
    fn test_lock_shape_writes_kind_tags() {
        let mut board = Board::new();
        let t = &shapes(PieceKind::T)[0];
        board.lock_shape(t, 3, 10, PieceKind::T);

        assert_eq!(board.get(4, 10), Some(Some(PieceKind::T)));
        assert_eq!(board.get(3, 11), Some(Some(PieceKind::T)));
        assert_eq!(board.get(4, 11), Some(Some(PieceKind::T)));
        assert_eq!(board.get(5, 11), Some(Some(PieceKind::T)));
        // Matrix zeros stay empty
        assert_eq!(board.get(3, 10), Some(None));
        assert_eq!(board.get(5, 10), Some(None));
    }

    #[test]
    fn test_lock_shape_drops_rows_above_the_top() {
        let mut board = Board::new();
        let tall_i = &shapes(PieceKind::I)[1];
        board.lock_shape(tall_i, 0, -2, PieceKind::I);

        // Only the two in-grid cells were written
        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::I)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_clear_full_rows_single() {
        let mut board = Board::new();
        board.set(2, 18, Some(PieceKind::S));
        fill_row(&mut board, 19, PieceKind::I);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19]);
        // The survivor shifted down one row
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::S)));
        assert_eq!(board.get(2, 18), Some(None));
    }

    #[test]
    fn test_clear_full_rows_counts_up_to_four() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row(&mut board, y, PieceKind::I);
        }
        let cleared = board.clear_full_rows();
        assert_eq!(cleared.len(), 4);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_full_rows_preserves_survivor_order() {
        let mut board = Board::new();
        board.set(0, 15, Some(PieceKind::J));
        fill_row(&mut board, 16, PieceKind::I);
        board.set(1, 17, Some(PieceKind::L));
        fill_row(&mut board, 18, PieceKind::I);
        board.set(2, 19, Some(PieceKind::T));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[16, 18]);

        // Survivors keep their order, compacted onto the floor
        assert_eq!(board.get(0, 17), Some(Some(PieceKind::J)));
        assert_eq!(board.get(1, 18), Some(Some(PieceKind::L)));
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 3);
    }

    #[test]
    fn test_clear_full_rows_empty_board() {
        let mut board = Board::new();
        assert!(board.clear_full_rows().is_empty());
    }
}
