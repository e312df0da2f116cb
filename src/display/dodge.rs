/// Dodge-game frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use arcade_brawl::dodge::{DodgeState, DodgeStatus, ARENA_HEIGHT, ARENA_WIDTH};
use arcade_brawl::entities::{Hazard, HazardKind, Pickup};
use arcade_brawl::sprite::CharacterSprite;

use super::{draw_banner, draw_border, draw_hint, finish, put, Viewport};

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_HAZARD: Color = Color::Red;
const C_CHASER: Color = Color::Magenta;
const C_PICKUP: Color = Color::Yellow;

pub fn render<W: Write>(
    out: &mut W,
    state: &DodgeState,
    sprite: &CharacterSprite,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let view = Viewport::new(width, height, ARENA_WIDTH, ARENA_HEIGHT);

    draw_border(out, width, height)?;
    draw_hud(out, state)?;

    if state.status != DodgeStatus::Title {
        for p in &state.pickups {
            draw_pickup(out, &view, p, state.frame)?;
        }
        for h in &state.hazards {
            draw_hazard(out, &view, h)?;
        }
    }
    draw_player(out, &view, state, sprite)?;
    draw_hint(out, height, "Arrows: Move  SPACE: Start  Paste a file path: new sprite  Q: Quit")?;

    match state.status {
        DodgeStatus::Title => draw_banner(
            out,
            width,
            height,
            "ULTIMATE DODGE!",
            Color::Cyan,
            &[
                ("Press SPACE to Start".to_string(), Color::White),
                (format!("Best Score: {}", state.high_score), Color::Yellow),
            ],
        )?,
        DodgeStatus::GameOver => {
            let best = if state.score >= state.high_score && state.score > 0 {
                (format!("★ NEW BEST: {:>6} ★", state.score), Color::Yellow)
            } else {
                (format!("Best Score:  {:>6}", state.high_score), Color::DarkGrey)
            };
            draw_banner(
                out,
                width,
                height,
                "GAME  OVER",
                Color::Red,
                &[
                    (format!("Final Score: {:>6}", state.score), Color::Yellow),
                    best,
                    ("SPACE - Retry  M - Menu  Q - Quit".to_string(), Color::White),
                ],
            )?
        }
        DodgeStatus::Playing => {}
    }

    finish(out, height)
}

fn draw_hud<W: Write>(out: &mut W, state: &DodgeState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}", state.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("  Level: {}", state.level)))?;
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &DodgeState,
    sprite: &CharacterSprite,
) -> std::io::Result<()> {
    let col = view.col(state.player.x);
    let row = view.row(state.player.y);
    for (i, line) in sprite.rows().iter().enumerate() {
        put(out, view, col, row + i as i32, line, C_PLAYER)?;
    }
    Ok(())
}

fn draw_hazard<W: Write>(out: &mut W, view: &Viewport, hazard: &Hazard) -> std::io::Result<()> {
    let (glyph, color) = match hazard.kind {
        // Blink during the last second before expiring
        HazardKind::Chasing { life } if life < 60 && (life / 5) % 2 == 0 => return Ok(()),
        HazardKind::Chasing { .. } => ("@", C_CHASER),
        HazardKind::Normal => ("●", C_HAZARD),
    };
    let left = view.col(hazard.rect.left());
    let right = view.col(hazard.rect.right()).max(left + 1);
    let top = view.row(hazard.rect.top());
    let bottom = view.row(hazard.rect.bottom()).max(top + 1);
    let line = glyph.repeat((right - left) as usize);
    for row in top..bottom {
        put(out, view, left, row, &line, color)?;
    }
    Ok(())
}

fn draw_pickup<W: Write>(out: &mut W, view: &Viewport, pickup: &Pickup, frame: u64) -> std::io::Result<()> {
    let glyph = if frame / 8 % 2 == 0 { "$" } else { "★" };
    let (cx, cy) = pickup.rect.center();
    put(out, view, view.col(cx), view.row(cy), glyph, C_PICKUP)
}
