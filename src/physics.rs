/// Kinematic integration for fighters.

use crate::entities::{Action, Fighter};

// ── Arena ────────────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 1200.0;
pub const ARENA_HEIGHT: f32 = 600.0;
pub const GROUND_Y: f32 = 480.0;
/// Fighters keep this far from either wall.
pub const WALL_MARGIN: f32 = 50.0;

// ── Motion ───────────────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 0.6;
/// Per-frame horizontal velocity decay while walking or standing.
pub const FRICTION: f32 = 0.8;
/// Per-frame horizontal velocity decay while sliding.
pub const SLIDE_FRICTION: f32 = 0.95;
/// Below this speed horizontal motion snaps to zero.
pub const STOP_SPEED: f32 = 0.1;

impl Fighter {
    /// Advance position and velocity by one frame.
    pub fn integrate(&mut self) {
        self.vy += GRAVITY;
        self.y += self.vy;
        if self.y >= GROUND_Y {
            self.y = GROUND_Y;
            self.vy = 0.0;
            self.airborne = false;
        }

        self.x += self.vx;
        self.vx *= if matches!(self.action, Action::Sliding(_)) {
            SLIDE_FRICTION
        } else {
            FRICTION
        };
        if self.vx.abs() < STOP_SPEED {
            self.vx = 0.0;
        }

        self.x = self.x.clamp(WALL_MARGIN, ARENA_WIDTH - WALL_MARGIN);
    }
}
