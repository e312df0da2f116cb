/// Terminal rendering for both games.
///
/// Renderers take a writer, a read-only view of the state and the terminal
/// size.  They queue crossterm commands and flush once per frame.

mod dodge;
mod fight;

pub use dodge::render as render_dodge;
pub use fight::render as render_fight;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

const C_BORDER: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps world coordinates onto the play area inside the border
/// (columns `1..width-1`, rows `2..height-2`).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub world_w: f32,
    pub world_h: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, world_w: f32, world_h: f32) -> Self {
        Viewport { width, height, world_w, world_h }
    }

    fn inner_cols(&self) -> f32 {
        self.width.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.height.saturating_sub(4).max(1) as f32
    }

    pub fn col(&self, x: f32) -> i32 {
        1 + (x / self.world_w * self.inner_cols()).floor() as i32
    }

    pub fn row(&self, y: f32) -> i32 {
        2 + (y / self.world_h * self.inner_rows()).floor() as i32
    }

    /// Whether `(col, row)` lies inside the border.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 1
            && row >= 2
            && col < self.width as i32 - 1
            && row < self.height as i32 - 2
    }
}

// ── Shared drawing helpers ────────────────────────────────────────────────────

/// Print `text` at a cell, clipped to the play area.
fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    col: i32,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let visible: String = text
        .chars()
        .enumerate()
        .filter(|(i, _)| view.contains(col + *i as i32, row))
        .map(|(_, c)| c)
        .collect();
    if visible.is_empty() {
        return Ok(());
    }
    let start = col.max(1) as u16;
    out.queue(cursor::MoveTo(start, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn centred<W: Write>(out: &mut W, width: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, height: u16, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

/// A boxed banner in the middle of the screen followed by plain lines.
fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    title: &str,
    title_color: Color,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let inner = title.chars().count().max(18) + 2;
    let pad = inner - title.chars().count();
    let boxed = [
        format!("╔{}╗", "═".repeat(inner)),
        format!("║{}{}{}║", " ".repeat(pad / 2), title, " ".repeat(pad - pad / 2)),
        format!("╚{}╝", "═".repeat(inner)),
    ];

    let total_rows = boxed.len() + lines.len();
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, line) in boxed.iter().enumerate() {
        centred(out, width, start_row + i as u16, line, title_color)?;
    }
    for (i, (line, color)) in lines.iter().enumerate() {
        centred(out, width, start_row + (boxed.len() + i) as u16, line, *color)?;
    }
    Ok(())
}

fn finish<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
