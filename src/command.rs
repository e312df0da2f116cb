/// Command-input buffer for the down → forward special move.

use std::collections::VecDeque;

use crate::entities::Facing;
use crate::input::{MASK_DOWN, MASK_LEFT, MASK_RIGHT};

/// Only inputs younger than this count toward a command.
pub const COMMAND_WINDOW_MS: u64 = 500;
pub const MAX_ENTRIES: usize = 20;
/// An unchanged mask is re-recorded once it has been held this many frames.
pub const REPEAT_FRAMES: u32 = 5;

#[derive(Clone, Debug, Default)]
pub struct InputBuffer {
    entries: VecDeque<(u64, u8)>,
    since_push: u32,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record this frame's direction mask at `now_ms`.
    pub fn record(&mut self, now_ms: u64, mask: u8) {
        self.since_push += 1;
        let changed = self.entries.back().map_or(true, |&(_, last)| last != mask);
        if changed || self.since_push > REPEAT_FRAMES {
            self.entries.push_back((now_ms, mask));
            if self.len() > MAX_ENTRIES {
                self.entries.pop_front();
            }
            self.since_push = 0;
        }
    }

    /// True when, within the window, a down input was seen and forward was
    /// seen at or after it.  The two need not be adjacent.
    pub fn special_ready(&self, now_ms: u64, facing: Facing) -> bool {
        let recent: Vec<u8> = self
            .entries
            .iter()
            .filter(|(t, _)| now_ms.saturating_sub(*t) < COMMAND_WINDOW_MS)
            .map(|&(_, mask)| mask)
            .collect();
        if recent.len() < 2 {
            return false;
        }

        let forward = match facing {
            Facing::Right => MASK_RIGHT,
            Facing::Left => MASK_LEFT,
        };
        let mut seen_down = false;
        for mask in recent {
            if mask & MASK_DOWN != 0 {
                seen_down = true;
            }
            if seen_down && mask & forward != 0 {
                return true;
            }
        }
        false
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.since_push = 0;
    }
}
