//! Terminal battle runner (default binary).
//!
//! Two AI-driven sessions play side by side until both top out.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).
//!
//! Engine picks and the RNG seed come from the environment:
//! `TETRIS_DUEL_LEFT`, `TETRIS_DUEL_RIGHT` (engine ids) and
//! `TETRIS_DUEL_SEED` (u32, defaults to the wall clock).

use std::env;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tetris_duel::ai::{next_strategy, strategy_by_id, Strategy, STRATEGIES};
use tetris_duel::commentary::{
    CannedCommentator, Commentator, MatchUpdate, COMMENTARY_FALLBACK, COMMENTARY_PERIOD,
};
use tetris_duel::core::{GameSession, SessionSnapshot};
use tetris_duel::term::{
    BattleScene, BattleView, FrameBuffer, MatchPhase, PlayerScene, TerminalRenderer, VIEW_HEIGHT,
    VIEW_WIDTH,
};

/// Upper bound on the input poll so the clock display stays fresh.
const POLL_CAP: Duration = Duration::from_millis(150);

/// Offset between the two piece streams when only one seed is given.
const RIGHT_SEED_OFFSET: u32 = 0x9e37_79b9;

const BOOT_LINE: &str = "Initializing simulation parameters...";
const REBOOT_LINE: &str = "Rebooting simulation...";
const READY_LINE: &str = "System ready.";
const TERMINATED_LINE: &str = "Simulation Terminated. Both subjects failed.";

fn main() -> Result<()> {
    let config = BattleConfig::from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: BattleConfig) -> Result<()> {
    let mut battle = Battle::new(&config);

    let view = BattleView::default();
    let mut fb = FrameBuffer::new(VIEW_WIDTH, VIEW_HEIGHT);
    let mut left_snap = SessionSnapshot::default();
    let mut right_snap = SessionSnapshot::default();

    loop {
        let now = Instant::now();
        battle.tick(now);

        // Render.
        battle.left.snapshot_into(&mut left_snap);
        battle.right.snapshot_into(&mut right_snap);
        let scene = BattleScene {
            left: PlayerScene {
                snapshot: &left_snap,
                strategy: battle.left.strategy(),
            },
            right: PlayerScene {
                snapshot: &right_snap,
                strategy: battle.right.strategy(),
            },
            phase: battle.phase(),
            elapsed_secs: battle.elapsed_secs(now),
            commentary: &battle.commentary,
        };
        view.render_into(&mut fb, &scene);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next due step.
        let timeout = battle
            .next_deadline()
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(POLL_CAP)
            .min(POLL_CAP);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        if let Some(action) = handle_key_event(key) {
                            battle.apply(action, Instant::now());
                        }
                    }
                    KeyEventKind::Repeat | KeyEventKind::Release => {
                        // Auto-repeat and releases do not drive the match.
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
    }
}

/// Match-level controls available from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchAction {
    ToggleRun,
    Reset,
    CycleLeft,
    CycleRight,
}

/// Map keyboard input to match actions.
fn handle_key_event(key: KeyEvent) -> Option<MatchAction> {
    match key.code {
        KeyCode::Char(' ') => Some(MatchAction::ToggleRun),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MatchAction::Reset),
        KeyCode::Char('1') => Some(MatchAction::CycleLeft),
        KeyCode::Char('2') => Some(MatchAction::CycleRight),
        _ => None,
    }
}

/// Check if key should quit the simulation.
fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Match setup resolved from the environment.
#[derive(Debug, Clone, Copy)]
struct BattleConfig {
    left: &'static Strategy,
    right: &'static Strategy,
    seed: u32,
}

impl BattleConfig {
    fn from_env() -> Result<Self> {
        let left = strategy_from_env("TETRIS_DUEL_LEFT", &STRATEGIES[0])?;
        let right = strategy_from_env("TETRIS_DUEL_RIGHT", &STRATEGIES[1])?;
        let seed = seed_from_env("TETRIS_DUEL_SEED")?;
        Ok(Self { left, right, seed })
    }
}

fn strategy_from_env(var: &str, default: &'static Strategy) -> Result<&'static Strategy> {
    match env::var(var) {
        Ok(raw) => pick_strategy(raw.trim()).with_context(|| format!("bad {var}")),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(anyhow!("{var}: {err}")),
    }
}

/// Look up an engine id, listing the catalog on failure.
fn pick_strategy(id: &str) -> Result<&'static Strategy> {
    strategy_by_id(id).ok_or_else(|| {
        let known: Vec<&str> = STRATEGIES.iter().map(|s| s.id).collect();
        anyhow!("unknown engine {id:?} (available: {})", known.join(", "))
    })
}

fn seed_from_env(var: &str) -> Result<u32> {
    match env::var(var) {
        Ok(raw) => parse_seed(raw.trim()),
        Err(env::VarError::NotPresent) => Ok(clock_seed()),
        Err(err) => Err(anyhow!("{var}: {err}")),
    }
}

fn parse_seed(raw: &str) -> Result<u32> {
    raw.parse()
        .map_err(|_| anyhow!("seed must be a u32, got {raw:?}"))
}

/// Seed for unseeded runs, taken from the wall clock.
fn clock_seed() -> u32 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.subsec_nanos() ^ elapsed.as_secs() as u32,
        Err(_) => 1,
    }
}

/// Everything the event loop mutates: the two sessions, the narrator,
/// and the match clock with its step deadlines.
struct Battle {
    left: GameSession,
    right: GameSession,
    commentator: Box<dyn Commentator>,
    commentary: String,
    /// True once the current match has been set running at least once.
    /// Engine picks are locked from then until the next reset.
    started: bool,
    running: bool,
    /// Play time accumulated across pauses, excluding the current stint.
    elapsed: Duration,
    resumed_at: Instant,
    left_due: Instant,
    right_due: Instant,
    commentary_due: Instant,
}

impl Battle {
    fn new(config: &BattleConfig) -> Self {
        let now = Instant::now();
        Self {
            left: GameSession::new(config.left, config.seed),
            right: GameSession::new(config.right, config.seed.wrapping_add(RIGHT_SEED_OFFSET)),
            commentator: Box::new(CannedCommentator::new(config.seed)),
            commentary: BOOT_LINE.to_string(),
            started: false,
            running: false,
            elapsed: Duration::ZERO,
            resumed_at: now,
            left_due: now,
            right_due: now,
            commentary_due: now,
        }
    }

    fn apply(&mut self, action: MatchAction, now: Instant) {
        match action {
            MatchAction::ToggleRun => self.toggle_run(now),
            MatchAction::Reset => self.abort(),
            MatchAction::CycleLeft => self.cycle_left(),
            MatchAction::CycleRight => self.cycle_right(),
        }
    }

    /// Start, pause or resume. A press with a topped-out subject reboots
    /// the match first.
    fn toggle_run(&mut self, now: Instant) {
        if self.left.game_over() || self.right.game_over() {
            self.left.reset();
            self.right.reset();
            self.elapsed = Duration::ZERO;
            self.started = false;
            self.commentary = REBOOT_LINE.to_string();
        }

        if self.running {
            self.elapsed += now.duration_since(self.resumed_at);
            self.running = false;
        } else {
            self.running = true;
            self.started = true;
            self.resumed_at = now;
            self.arm(now);
        }
    }

    /// Stop the match and return both subjects to standby.
    fn abort(&mut self) {
        self.running = false;
        self.started = false;
        self.left.reset();
        self.right.reset();
        self.elapsed = Duration::ZERO;
        self.commentary = READY_LINE.to_string();
    }

    fn cycle_left(&mut self) {
        if self.started {
            return;
        }
        let strategy = next_strategy(self.left.strategy());
        self.left = GameSession::new(strategy, self.left.seed());
    }

    fn cycle_right(&mut self) {
        if self.started {
            return;
        }
        let strategy = next_strategy(self.right.strategy());
        self.right = GameSession::new(strategy, self.right.seed());
    }

    fn arm(&mut self, now: Instant) {
        self.left_due = now + self.left.strategy().cadence;
        self.right_due = now + self.right.strategy().cadence;
        // The first remark lands shortly after boot, later ones on the period.
        self.commentary_due = now
            + if self.elapsed.is_zero() {
                Duration::from_secs(1)
            } else {
                COMMENTARY_PERIOD
            };
    }

    /// Run every step whose deadline has passed.
    fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }

        if now >= self.left_due {
            self.left.advance();
            self.left_due = now + self.left.strategy().cadence;
        }
        if now >= self.right_due {
            self.right.advance();
            self.right_due = now + self.right.strategy().cadence;
        }
        if now >= self.commentary_due {
            self.refresh_commentary(now);
            self.commentary_due = now + COMMENTARY_PERIOD;
        }
    }

    fn refresh_commentary(&mut self, now: Instant) {
        if self.left.game_over() && self.right.game_over() {
            self.commentary = TERMINATED_LINE.to_string();
            return;
        }

        let update = MatchUpdate {
            left_name: self.left.strategy().name,
            left_score: self.left.score(),
            right_name: self.right.strategy().name,
            right_score: self.right.score(),
            elapsed_secs: self.elapsed_secs(now),
        };
        self.commentary = self
            .commentator
            .comment(&update)
            .unwrap_or_else(|_| COMMENTARY_FALLBACK.to_string());
    }

    fn next_deadline(&self) -> Option<Instant> {
        if !self.running {
            return None;
        }
        Some(self.left_due.min(self.right_due).min(self.commentary_due))
    }

    fn elapsed_secs(&self, now: Instant) -> u64 {
        let mut total = self.elapsed;
        if self.running {
            total += now.duration_since(self.resumed_at);
        }
        total.as_secs()
    }

    fn phase(&self) -> MatchPhase {
        if self.left.game_over() && self.right.game_over() {
            MatchPhase::Terminated
        } else if self.running {
            MatchPhase::Running
        } else if self.started {
            MatchPhase::Paused
        } else {
            MatchPhase::Standby
        }
    }
}
