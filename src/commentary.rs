//! Match commentary - the observer voice at the bottom of the screen
//!
//! The driver refreshes the commentary line on a fixed period while the match
//! runs. `Commentator` is the seam for the text source; the bundled generator
//! works offline from a seeded RNG, keeping whole matches reproducible. When a
//! refresh fails the driver shows [`COMMENTARY_FALLBACK`] instead.

use std::time::Duration;

use anyhow::Result;

use crate::core::SimpleRng;

/// How often the commentary line is refreshed during play
pub const COMMENTARY_PERIOD: Duration = Duration::from_secs(12);

/// Shown when a commentary refresh fails
pub const COMMENTARY_FALLBACK: &str = "System Signal Lost. Reconnecting...";

/// Everything a commentator gets to see about the running match
#[derive(Debug, Clone, Copy)]
pub struct MatchUpdate<'a> {
    pub left_name: &'a str,
    pub left_score: u32,
    pub right_name: &'a str,
    pub right_score: u32,
    pub elapsed_secs: u64,
}

/// Source of one-sentence observations on the match state
pub trait Commentator {
    fn comment(&mut self, update: &MatchUpdate) -> Result<String>;
}

/// Score gap at or below which the match counts as balanced
const SYMMETRY_MARGIN: u32 = 100;

/// Score gap at or above which one program is clearly ahead
const SUPERIORITY_MARGIN: u32 = 1000;

const DRIFT_LINES: &[&str] = &[
    "The data stacking proceeds. Outcomes were decided before the first block fell.",
    "Efficiency is a form of obedience. Both programs obey.",
    "An anomaly forms in the lower strata. The system will correct it.",
    "Every alignment narrows the space of permitted futures.",
    "The simulation hums along its predetermined groove.",
    "Neither process suspects it is being watched.",
];

const SYMMETRY_LINES: &[&str] = &[
    "A curious symmetry. Two processes converging on the same inevitability.",
    "The scores mirror one another. Balance, too, is an anomaly.",
    "Parity persists. The system finds this improbable.",
    "Two algorithms, one outcome, delayed by symmetry.",
];

/// `{subject}` is replaced with the leading program's name
const SUPERIORITY_LINES: &[&str] = &[
    "{subject} demonstrates the superiority of its algorithm with every alignment.",
    "{subject} accumulates an advantage the rival cannot calculate away.",
    "The gap widens. {subject} was always going to win this exchange.",
    "{subject} stacks data as the system intended. The other merely survives.",
];

/// Offline commentary generator with a fixed register
#[derive(Debug, Clone)]
pub struct CannedCommentator {
    rng: SimpleRng,
}

impl CannedCommentator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    fn pick(&mut self, lines: &[&'static str]) -> &'static str {
        lines[self.rng.next_range(lines.len() as u32) as usize]
    }
}

impl Commentator for CannedCommentator {
    fn comment(&mut self, update: &MatchUpdate) -> Result<String> {
        let gap = update.left_score.abs_diff(update.right_score);

        let line = if gap >= SUPERIORITY_MARGIN {
            let leader = if update.left_score > update.right_score {
                update.left_name
            } else {
                update.right_name
            };
            self.pick(SUPERIORITY_LINES).replace("{subject}", leader)
        } else if gap <= SYMMETRY_MARGIN {
            self.pick(SYMMETRY_LINES).to_string()
        } else {
            self.pick(DRIFT_LINES).to_string()
        };

        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update<'a>(left: u32, right: u32) -> MatchUpdate<'a> {
        MatchUpdate {
            left_name: "The Architect",
            left_score: left,
            right_name: "Agent Smith",
            right_score: right,
            elapsed_secs: 30,
        }
    }

    #[test]
    fn test_commentary_period_is_twelve_seconds() {
        assert_eq!(COMMENTARY_PERIOD, Duration::from_secs(12));
    }

    #[test]
    fn test_balanced_match_gets_a_symmetry_line() {
        let mut commentator = CannedCommentator::new(7);
        let line = commentator.comment(&update(400, 440)).unwrap();
        assert!(SYMMETRY_LINES.contains(&line.as_str()));
    }

    #[test]
    fn test_one_sided_match_names_the_leader() {
        let mut commentator = CannedCommentator::new(7);

        let line = commentator.comment(&update(5000, 120)).unwrap();
        assert!(line.contains("The Architect"));
        assert!(!line.contains("{subject}"));

        let line = commentator.comment(&update(120, 5000)).unwrap();
        assert!(line.contains("Agent Smith"));
    }

    #[test]
    fn test_middling_gap_drifts() {
        let mut commentator = CannedCommentator::new(7);
        let line = commentator.comment(&update(600, 200)).unwrap();
        assert!(DRIFT_LINES.contains(&line.as_str()));
    }

    #[test]
    fn test_same_seed_replays_the_same_lines() {
        let mut a = CannedCommentator::new(99);
        let mut b = CannedCommentator::new(99);

        for (left, right) in [(0, 0), (2500, 40), (300, 900)] {
            let u = update(left, right);
            assert_eq!(a.comment(&u).unwrap(), b.comment(&u).unwrap());
        }
    }
}
