/// Ranged shots: firing, movement, expiry and single-hit collision.

use crate::combat::hurt_rect;
use crate::entities::{Facing, Fighter, Projectile, Side};
use crate::geometry::Rect;
use crate::physics::ARENA_WIDTH;

pub const SPEED: f32 = 10.0;
pub const LIFETIME: u32 = 100;
pub const RADIUS: f32 = 15.0;
/// Spawn point relative to the shooter's feet.
pub const MUZZLE_X: f32 = 40.0;
pub const MUZZLE_Y: f32 = -60.0;
/// How far past either arena edge a shot may travel before it is dropped.
pub const BOUNDS_MARGIN: f32 = 50.0;
pub const DAMAGE: f32 = 15.0;

/// Build a projectile leaving a fighter standing at `(x, y)`.
pub fn fire(x: f32, y: f32, facing: Facing, owner: Side) -> Projectile {
    Projectile {
        x: x + facing.sign() * MUZZLE_X,
        y: y + MUZZLE_Y,
        vx: facing.sign() * SPEED,
        life: LIFETIME,
        owner,
        active: true,
    }
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::around(self.x, self.y, RADIUS)
    }

    pub fn target(&self) -> Side {
        match self.owner {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    fn advance(&mut self) {
        self.x += self.vx;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 || self.x < -BOUNDS_MARGIN || self.x > ARENA_WIDTH + BOUNDS_MARGIN {
            self.active = false;
        }
    }
}

/// Move every projectile one frame and drop the ones that are spent.
pub fn update_all(projectiles: &mut Vec<Projectile>) {
    for p in projectiles.iter_mut() {
        p.advance();
    }
    projectiles.retain(|p| p.active);
}

/// Collide active projectiles with the fighter they were fired at.
/// A projectile that touches its target is spent even when the hit is
/// absorbed by the target's grace period.  Returns the number of damaging hits.
pub fn resolve_hits(
    projectiles: &mut [Projectile],
    player: &mut Fighter,
    opponent: &mut Fighter,
) -> u32 {
    let mut landed = 0;
    for p in projectiles.iter_mut().filter(|p| p.active) {
        let (shooter_power, target) = match p.owner {
            Side::Player => (player.stats.power, &mut *opponent),
            Side::Opponent => (opponent.stats.power, &mut *player),
        };
        if p.rect().intersects(&hurt_rect(target)) {
            if target.take_hit(DAMAGE * shooter_power, p.x) {
                landed += 1;
            }
            p.active = false;
        }
    }
    landed
}
