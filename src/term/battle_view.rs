//! BattleView: maps two session snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The canvas is a fixed 80x26 layout: a header with the match clock and
//! phase, one framed board plus stats panel per player, the commentary line,
//! and the key help line.

use crate::ai::Strategy;
use crate::core::SessionSnapshot;
use crate::term::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Fixed canvas size the layout is designed for.
pub const VIEW_WIDTH: u16 = 80;
pub const VIEW_HEIGHT: u16 = 26;

const MATRIX_BRIGHT: Rgb = Rgb::new(0, 255, 65);
const MATRIX_LIGHT: Rgb = Rgb::new(0, 143, 17);
const BOARD_BG: Rgb = Rgb::new(0, 26, 0);
const GRID_DOT: Rgb = Rgb::new(0, 77, 0);
const ALERT: Rgb = Rgb::new(255, 0, 0);
const ALERT_SOFT: Rgb = Rgb::new(248, 113, 113);
const BLACK: Rgb = Rgb::new(0, 0, 0);

const LEFT_FRAME_X: u16 = 0;
const RIGHT_FRAME_X: u16 = 40;
const FRAME_Y: u16 = 2;
const PANEL_GAP: u16 = 2;
const COMMENTARY_Y: u16 = 24;
const HELP_Y: u16 = 25;

const TITLE: &str = "NEURAL TETRIS // AI BATTLE SIMULATION v2.6";
const HELP: &str = "SPACE pause/resume · R reset · 1/2 cycle engines · Q quit";

/// What the match as a whole is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Standby,
    Running,
    Paused,
    Terminated,
}

/// One player's half of the scene.
#[derive(Debug, Clone, Copy)]
pub struct PlayerScene<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub strategy: &'static Strategy,
}

/// Everything the view needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct BattleScene<'a> {
    pub left: PlayerScene<'a>,
    pub right: PlayerScene<'a>,
    pub phase: MatchPhase,
    pub elapsed_secs: u64,
    pub commentary: &'a str,
}

/// Renders a [`BattleScene`] onto a framebuffer.
pub struct BattleView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BattleView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl BattleView {
    /// Render the scene into the framebuffer, overwriting its contents.
    pub fn render_into(&self, fb: &mut FrameBuffer, scene: &BattleScene) {
        let base = Style::default();
        fb.clear(Glyph { ch: ' ', style: base });

        self.draw_header(fb, scene);
        self.draw_pane(fb, LEFT_FRAME_X, "SUBJECT 01", &scene.left);
        self.draw_pane(fb, RIGHT_FRAME_X, "SUBJECT 02", &scene.right);
        self.draw_commentary(fb, scene.commentary);

        let help = Style {
            fg: MATRIX_LIGHT,
            bg: BLACK,
            bold: false,
            dim: true,
        };
        fb.put_str(1, HELP_Y, HELP, help);
    }

    fn draw_header(&self, fb: &mut FrameBuffer, scene: &BattleScene) {
        let title = Style {
            fg: MATRIX_BRIGHT,
            bg: BLACK,
            bold: true,
            dim: false,
        };
        fb.put_str(1, 0, TITLE, title);

        let status = match scene.phase {
            MatchPhase::Standby => "STANDBY".to_string(),
            MatchPhase::Running => "RUNNING".to_string(),
            MatchPhase::Paused => "PAUSED".to_string(),
            MatchPhase::Terminated => verdict(scene),
        };
        let slot = format!("{}  {}", format_clock(scene.elapsed_secs), status);
        let x = VIEW_WIDTH.saturating_sub(1 + slot.chars().count() as u16);
        fb.put_str(x, 0, &slot, title);
    }

    fn draw_pane(&self, fb: &mut FrameBuffer, x0: u16, subject: &str, player: &PlayerScene) {
        let name = Style {
            fg: MATRIX_BRIGHT,
            bg: BLACK,
            bold: true,
            dim: false,
        };
        let frame = Style {
            fg: MATRIX_LIGHT,
            bg: BLACK,
            bold: false,
            dim: false,
        };

        let banner = format!("{} // {}", subject, player.strategy.name.to_uppercase());
        fb.put_str(x0 + 1, 1, &banner, name);

        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        self.draw_border(fb, x0, FRAME_Y, frame_w, frame_h, frame);
        self.draw_board(fb, x0, player.snapshot);

        if player.snapshot.game_over {
            self.draw_fail_overlay(fb, x0, frame_w);
        }

        self.draw_panel(fb, x0 + frame_w + PANEL_GAP, player);
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x0: u16, snapshot: &SessionSnapshot) {
        let dead = snapshot.game_over;

        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                let px = x0 + 1 + x as u16 * self.cell_w;
                let py = FRAME_Y + 1 + y as u16 * self.cell_h;
                let (ch, style) = match snapshot.cells[y][x] {
                    Some(kind) => (
                        '█',
                        Style {
                            fg: piece_color(kind),
                            bg: BOARD_BG,
                            bold: !dead,
                            dim: dead,
                        },
                    ),
                    None => (
                        '·',
                        Style {
                            fg: GRID_DOT,
                            bg: BOARD_BG,
                            bold: false,
                            dim: true,
                        },
                    ),
                };
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }
    }

    fn draw_fail_overlay(&self, fb: &mut FrameBuffer, x0: u16, frame_w: u16) {
        let band = Style {
            fg: ALERT,
            bg: BLACK,
            bold: false,
            dim: false,
        };
        let fail = Style { bold: true, ..band };
        let halted = Style {
            fg: ALERT_SOFT,
            ..band
        };

        fb.fill_rect(x0 + 1, 11, frame_w - 2, 5, ' ', band);
        let fail_x = x0 + (frame_w - 4) / 2;
        fb.put_str(fail_x, 12, "FAIL", fail);
        let halted_x = x0 + (frame_w - 13) / 2;
        fb.put_str(halted_x, 14, "SYSTEM HALTED", halted);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, panel_x: u16, player: &PlayerScene) {
        let label = Style {
            fg: MATRIX_LIGHT,
            bg: BLACK,
            bold: false,
            dim: false,
        };
        let value = Style {
            fg: MATRIX_BRIGHT,
            bg: BLACK,
            bold: true,
            dim: false,
        };
        let faint = Style { dim: true, ..label };

        let snapshot = player.snapshot;
        let mut y = FRAME_Y + 1;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_str(panel_x, y, &format!("{}", snapshot.score), value);
        y += 2;

        fb.put_str(panel_x, y, "LEVEL", label);
        y += 1;
        fb.put_str(panel_x, y, &format!("{}", snapshot.level), value);
        y += 2;

        fb.put_str(panel_x, y, "LINES", label);
        y += 1;
        fb.put_str(panel_x, y, &format!("{}", snapshot.lines), value);
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let next = Style {
            fg: piece_color(snapshot.next_kind),
            bg: BLACK,
            bold: true,
            dim: false,
        };
        fb.put_str(panel_x, y, "██", next);
        fb.put_char(panel_x + 3, y, snapshot.next_kind.as_char(), value);
        y += 2;

        fb.put_str(panel_x, y, "SPEED", label);
        y += 1;
        let cadence = format!("{}MS", player.strategy.cadence.as_millis());
        fb.put_str(panel_x, y, &cadence, value);
        y += 2;

        for line in wrap_words(player.strategy.description, 16).iter().take(4) {
            fb.put_str(panel_x, y, line, faint);
            y += 1;
        }
    }

    fn draw_commentary(&self, fb: &mut FrameBuffer, commentary: &str) {
        let prefix = Style {
            fg: MATRIX_LIGHT,
            bg: BLACK,
            bold: false,
            dim: false,
        };
        let text = Style {
            fg: MATRIX_BRIGHT,
            bg: BLACK,
            bold: false,
            dim: false,
        };

        fb.put_str(1, COMMENTARY_Y, "[ORACLE_LOG]:", prefix);
        fb.put_str(15, COMMENTARY_Y, commentary, text);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }
}

/// Pick the state slot text once both programs are down.
fn verdict(scene: &BattleScene) -> String {
    let left = scene.left.snapshot.score;
    let right = scene.right.snapshot.score;
    if left > right {
        format!("WINNER: {}", scene.left.strategy.name.to_uppercase())
    } else if right > left {
        format!("WINNER: {}", scene.right.strategy.name.to_uppercase())
    } else {
        "STALEMATE".to_string()
    }
}

fn format_clock(elapsed_secs: u64) -> String {
    format!("{:02}:{:02}", elapsed_secs / 60, elapsed_secs % 60)
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(255, 0, 255),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::Z => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 127, 0),
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
}
