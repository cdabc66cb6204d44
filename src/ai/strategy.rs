//! Strategy catalog - the scripted player personalities
//!
//! A strategy is a named weighting of the four board statistics plus the
//! cadence its session is advanced at. The catalog is fixed; a session picks
//! its strategy before the match starts and keeps it for the whole run.

use std::time::Duration;

/// Per-statistic weights for scoring a candidate placement.
/// Negative weights punish a statistic, positive weights reward it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub height: f32,
    pub lines: f32,
    pub holes: f32,
    pub bumpiness: f32,
}

/// A named player: evaluator weights plus a thinking cadence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strategy {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cadence: Duration,
    pub weights: Weights,
}

/// The built-in players, in selection order
pub static STRATEGIES: [Strategy; 4] = [
    Strategy {
        id: "architect",
        name: "The Architect",
        description: "Balanced. Prioritizes a clean board structure.",
        cadence: Duration::from_millis(300),
        weights: Weights {
            height: -0.5,
            lines: 0.76,
            holes: -0.36,
            bumpiness: -0.18,
        },
    },
    Strategy {
        id: "smith",
        name: "Agent Smith",
        description: "Aggressive. Extremely fast, hates holes, ignores height.",
        cadence: Duration::from_millis(100),
        weights: Weights {
            height: -0.1,
            lines: 0.5,
            holes: -0.9,
            bumpiness: -0.3,
        },
    },
    Strategy {
        id: "neo",
        name: "The One",
        description: "High Risk. Stacks high to get multi-line clears.",
        cadence: Duration::from_millis(400),
        weights: Weights {
            height: -0.2,
            lines: 1.5,
            holes: -0.4,
            bumpiness: -0.1,
        },
    },
    Strategy {
        id: "oracle",
        name: "The Oracle",
        description: "Predictive. Calculates optimal bumpiness.",
        cadence: Duration::from_millis(200),
        weights: Weights {
            height: -0.5,
            lines: 0.8,
            holes: -0.5,
            bumpiness: -0.8,
        },
    },
];

/// Look up a strategy by its identifier
pub fn strategy_by_id(id: &str) -> Option<&'static Strategy> {
    STRATEGIES.iter().find(|s| s.id == id)
}

/// The strategy after `current` in catalog order, wrapping around
pub fn next_strategy(current: &Strategy) -> &'static Strategy {
    let pos = STRATEGIES
        .iter()
        .position(|s| s.id == current.id)
        .unwrap_or(0);
    &STRATEGIES[(pos + 1) % STRATEGIES.len()]
}
