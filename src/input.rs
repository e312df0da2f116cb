/// Logical per-frame controls.  The front-end fills this in from whatever
/// device it reads; the simulation never sees raw key events.

pub const MASK_UP: u8 = 1;
pub const MASK_DOWN: u8 = 2;
pub const MASK_LEFT: u8 = 4;
pub const MASK_RIGHT: u8 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub punch: bool,
    pub kick: bool,
    pub slide: bool,
    pub guard: bool,
    /// Dedicated ranged-attack button, an alternative to the command input.
    pub special: bool,
}

impl Controls {
    /// -1 for left, +1 for right, 0 for neither.  Left wins when both are held.
    pub fn horizontal(&self) -> i8 {
        if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        }
    }

    /// Per-axis screen direction for eight-way movement, `(0, 0)` when idle.
    /// Diagonals are not normalised.
    pub fn vector(&self) -> (f32, f32) {
        let dx = self.right as i8 - self.left as i8;
        let dy = self.down as i8 - self.up as i8;
        (dx as f32, dy as f32)
    }

    /// Direction bits recorded in the command buffer.
    pub fn direction_mask(&self) -> u8 {
        let mut mask = 0;
        if self.up {
            mask |= MASK_UP;
        }
        if self.down {
            mask |= MASK_DOWN;
        }
        if self.left {
            mask |= MASK_LEFT;
        }
        if self.right {
            mask |= MASK_RIGHT;
        }
        mask
    }
}
