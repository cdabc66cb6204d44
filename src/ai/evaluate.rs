//! Board evaluator - the four statistics driving placement choice
//!
//! Statistics are computed on a settled board (no active piece). Full rows
//! still on the board count toward every statistic; Move Search evaluates the
//! locked grid before any clearing so the lines weight has something to see.

use crate::ai::strategy::Weights;
use crate::core::board::Board;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Aggregate statistics of a settled board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStats {
    /// Sum of per-column heights (height = distance from the column's
    /// topmost occupied cell to the floor)
    pub aggregate_height: u32,
    /// Rows with every cell occupied
    pub complete_lines: u32,
    /// Empty cells with an occupied cell above them in the same column
    pub holes: u32,
    /// Sum of absolute height differences between adjacent columns
    pub bumpiness: u32,
}

impl BoardStats {
    /// Weighted linear sum used to rank candidate placements
    pub fn weighted(&self, weights: &Weights) -> f32 {
        weights.height * self.aggregate_height as f32
            + weights.lines * self.complete_lines as f32
            + weights.holes * self.holes as f32
            + weights.bumpiness * self.bumpiness as f32
    }
}

/// Compute the statistics in one top-down scan per column
pub fn board_stats(board: &Board) -> BoardStats {
    let mut heights = [0u32; BOARD_WIDTH as usize];
    let mut holes = 0u32;

    for x in 0..BOARD_WIDTH as i8 {
        let mut block_seen = false;
        for y in 0..BOARD_HEIGHT as i8 {
            if board.is_occupied(x, y) {
                if !block_seen {
                    heights[x as usize] = (BOARD_HEIGHT as i8 - y) as u32;
                    block_seen = true;
                }
            } else if block_seen {
                holes += 1;
            }
        }
    }

    let mut complete_lines = 0u32;
    for y in 0..BOARD_HEIGHT as usize {
        if board.is_row_full(y) {
            complete_lines += 1;
        }
    }

    let aggregate_height = heights.iter().sum();
    let bumpiness = heights
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum();

    BoardStats {
        aggregate_height,
        complete_lines,
        holes,
        bumpiness,
    }
}
