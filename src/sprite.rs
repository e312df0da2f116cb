/// Text-art character sprites for the dodge game.
///
/// A sprite is purely cosmetic except for its size, which sets the player's
/// rectangle: each cell covers `CELL_W` x `CELL_H` world units.

use std::path::Path;

use crate::error::SpriteError;

pub const CELL_W: f32 = 10.0;
pub const CELL_H: f32 = 20.0;
pub const MAX_COLS: usize = 8;
pub const MAX_ROWS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterSprite {
    rows: Vec<String>,
}

impl Default for CharacterSprite {
    fn default() -> Self {
        CharacterSprite {
            rows: vec!["(^^)".to_string(), "/||\\".to_string()],
        }
    }
}

impl CharacterSprite {
    pub fn parse(text: &str) -> Result<Self, SpriteError> {
        let mut rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while rows.last().map_or(false, |r| r.trim().is_empty()) {
            rows.pop();
        }
        while rows.first().map_or(false, |r| r.trim().is_empty()) {
            rows.remove(0);
        }
        if rows.is_empty() {
            return Err(SpriteError::Empty);
        }

        let sprite = CharacterSprite { rows };
        let (width, height) = (sprite.cols(), sprite.rows.len());
        if width > MAX_COLS || height > MAX_ROWS {
            return Err(SpriteError::TooLarge {
                width,
                height,
                max_width: MAX_COLS,
                max_height: MAX_ROWS,
            });
        }
        Ok(sprite)
    }

    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let text = std::fs::read_to_string(path)?;
        CharacterSprite::parse(&text)
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn cols(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    /// World-space `(width, height)` of the player wearing this sprite.
    pub fn world_size(&self) -> (f32, f32) {
        (self.cols() as f32 * CELL_W, self.rows.len() as f32 * CELL_H)
    }
}
