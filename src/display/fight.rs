/// Fighting-game frame: arena, fighters, projectiles, HUD and banners.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use arcade_brawl::entities::{Action, Facing, Fighter, Projectile, Ruleset, Side};
use arcade_brawl::physics::{ARENA_HEIGHT, ARENA_WIDTH, GROUND_Y};
use arcade_brawl::round::{FightState, Outcome, RoundPhase};

use super::{centred, draw_banner, draw_border, draw_hint, finish, put, Viewport};

const C_GROUND: Color = Color::DarkGreen;
const C_PLAYER: Color = Color::Cyan;
const C_OPPONENT: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_PROJECTILE: Color = Color::White;
const C_TIMER: Color = Color::Yellow;
const C_BAR_EMPTY: Color = Color::DarkGrey;

const BAR_WIDTH: usize = 20;

pub fn render<W: Write>(out: &mut W, state: &FightState, width: u16, height: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let view = Viewport::new(width, height, ARENA_WIDTH, ARENA_HEIGHT);

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;
    draw_ground(out, &view)?;

    let boss = state.ruleset == Ruleset::Extended && state.is_final_stage();
    draw_fighter(out, &view, &state.player, C_PLAYER)?;
    draw_fighter(out, &view, &state.opponent, if boss { C_BOSS } else { C_OPPONENT })?;
    for p in &state.projectiles {
        draw_projectile(out, &view, p)?;
    }

    draw_hint(out, height, controls_hint(state.ruleset))?;
    draw_phase(out, state, width, height)?;

    finish(out, height)
}

fn controls_hint(ruleset: Ruleset) -> &'static str {
    match ruleset {
        Ruleset::Classic => "←→ Move  ↑ Jump  Z/↓ Punch  X Kick  SPACE Slide  Q Quit",
        Ruleset::Extended => "←→ Move  ↑ Jump  Z Punch  X Kick  SPACE Slide  ↓ Guard  ↓→+Z Shot  Q Quit",
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn health_bar(fighter: &Fighter) -> (String, String) {
    let filled = ((fighter.health_ratio() * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    ("█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn draw_hud<W: Write>(out: &mut W, state: &FightState, width: u16) -> std::io::Result<()> {
    // Player bar fills from the left
    let (full, empty) = health_bar(&state.player);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print(&full))?;
    out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
    out.queue(Print(&empty))?;

    // Opponent bar fills from the right
    let (full, empty) = health_bar(&state.opponent);
    out.queue(cursor::MoveTo(width.saturating_sub(BAR_WIDTH as u16 + 1), 0))?;
    out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
    out.queue(Print(&empty))?;
    out.queue(style::SetForegroundColor(C_OPPONENT))?;
    out.queue(Print(&full))?;

    let centre = format!(
        "{:>2}  STAGE {}/{}",
        state.round_time, state.stage, state.stage_count
    );
    centred(out, width, 0, &centre, C_TIMER)
}

// ── Arena ─────────────────────────────────────────────────────────────────────

fn draw_ground<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let row = view.row(GROUND_Y);
    let line = "▀".repeat(view.width.saturating_sub(2) as usize);
    put(out, view, 1, row, &line, C_GROUND)
}

/// Three rows tall, feet on the row just above the ground line:
///
/// ```text
///    O       O      O
///   /|--    /|\    /|]
///   / \     /  --  / \     ___O
/// ```
fn draw_fighter<W: Write>(
    out: &mut W,
    view: &Viewport,
    fighter: &Fighter,
    color: Color,
) -> std::io::Result<()> {
    if fighter.damage_flash > 0 && fighter.damage_flash % 4 < 2 {
        return Ok(());
    }

    let col = view.col(fighter.x);
    let feet = view.row(fighter.y) - 1;
    let right = fighter.facing == Facing::Right;

    if let Action::Sliding(_) = fighter.action {
        let body = if right { "___O" } else { "O___" };
        return put(out, view, col - 2, feet, body, color);
    }

    let (head, torso, legs) = match fighter.action {
        Action::Punching(_) => (" O ", if right { "/|--" } else { "--|\\" }, "/ \\"),
        Action::Kicking(_) => (" O ", "/|\\", if right { "/  --" } else { "--  \\" }),
        Action::Guarding => (" O ", if right { "/|]" } else { "[|\\" }, "/ \\"),
        Action::Shooting(_) => (" O ", if right { "/|=>" } else { "<=|\\" }, "/ \\"),
        _ if fighter.airborne => (" O ", "\\|/", "/ \\"),
        _ => (" O ", "/|\\", "/ \\"),
    };
    // Wide poses extend toward the facing side
    let anchor = |part: &str| {
        let len = part.chars().count() as i32;
        if right || len <= 3 {
            col - 1
        } else {
            col + 2 - len
        }
    };
    let (torso_col, legs_col) = (anchor(torso), anchor(legs));

    put(out, view, col - 1, feet - 2, head, color)?;
    put(out, view, torso_col, feet - 1, torso, color)?;
    put(out, view, legs_col, feet, legs, color)?;
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, view: &Viewport, p: &Projectile) -> std::io::Result<()> {
    let color = match p.owner {
        Side::Player => C_PLAYER,
        Side::Opponent => C_PROJECTILE,
    };
    put(out, view, view.col(p.x), view.row(p.y), "◉", color)
}

// ── Banners ───────────────────────────────────────────────────────────────────

fn draw_phase<W: Write>(out: &mut W, state: &FightState, width: u16, height: u16) -> std::io::Result<()> {
    match state.phase {
        RoundPhase::PreRound(_) => {
            let mut lines = Vec::new();
            if state.ruleset == Ruleset::Extended && state.is_final_stage() {
                lines.push(("- FINAL BOSS -".to_string(), Color::Red));
            }
            draw_banner(out, width, height, &format!("STAGE {}", state.stage), Color::White, &lines)
        }
        RoundPhase::Active => Ok(()),
        RoundPhase::Resolved { outcome: Outcome::PlayerWin, .. } if state.cleared => draw_banner(
            out,
            width,
            height,
            "ALL STAGES CLEARED!",
            Color::Yellow,
            &[
                ("Congratulations!".to_string(), Color::White),
                ("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White),
            ],
        ),
        RoundPhase::Resolved { outcome: Outcome::PlayerWin, .. } => {
            draw_banner(out, width, height, "YOU WIN", Color::Cyan, &[])
        }
        RoundPhase::Resolved { outcome, .. } => {
            let title = if outcome == Outcome::Draw { "DRAW" } else { "GAME  OVER" };
            draw_banner(
                out,
                width,
                height,
                title,
                Color::Red,
                &[
                    (format!("Reached Stage: {}", state.stage), Color::Yellow),
                    ("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White),
                ],
            )
        }
    }
}
