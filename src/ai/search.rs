//! Move search - exhaustive one-piece placement enumeration
//!
//! For every rotation state of the kind, and every anchor column the state's
//! occupied cells allow, the search hard-drops the piece on a scratch copy of
//! the board and scores the locked result with the strategy's weights. The
//! best candidate is tracked with strict greater-than, so ties keep the first
//! candidate found in enumeration order (lowest rotation index, then leftmost
//! column). No candidate at all means the piece cannot appear: game over.

use crate::ai::evaluate::board_stats;
use crate::ai::strategy::Weights;
use crate::core::board::Board;
use crate::core::pieces::shapes;
use crate::types::PieceKind;

/// Row candidates are probed at before dropping; two rows above the grid so
/// states taller than the remaining headroom still count as placeable
pub const SEARCH_START_ROW: i8 = -2;

/// A chosen placement: rotation state index, anchor column, and its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub rotation: usize,
    pub x: i8,
    pub score: f32,
}

/// Best-scoring placement for the kind under the given weights, or None when
/// no candidate validates at the search start row
pub fn find_best_move(board: &Board, kind: PieceKind, weights: &Weights) -> Option<Move> {
    let mut best: Option<Move> = None;
    let mut best_score = f32::MIN;

    for (rotation, shape) in shapes(kind).iter().enumerate() {
        for x in shape.column_range() {
            if !board.can_place(shape, x, SEARCH_START_ROW) {
                continue;
            }
            let y = board.drop_row(shape, x, SEARCH_START_ROW);

            // Score the locked result on a scratch copy; full rows are left
            // in place so the complete-lines statistic can count them
            let mut scratch = board.clone();
            scratch.lock_shape(shape, x, y, kind);
            let score = board_stats(&scratch).weighted(weights);

            if score > best_score {
                best_score = score;
                best = Some(Move { rotation, x, score });
            }
        }
    }

    best
}
