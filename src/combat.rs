/// Hitbox / hurtbox geometry and damage resolution.
///
/// Each timed attack has an active window strictly inside its countdown:
/// the attack rectangle only exists while `after < timer <= through`.
/// Frames above the window are windup, frames below it are recovery.

use crate::entities::{Action, Facing, Fighter};
use crate::geometry::Rect;

// ── Damage tuning ────────────────────────────────────────────────────────────

pub const PUNCH_DAMAGE: f32 = 10.0;
pub const KICK_DAMAGE: f32 = 15.0;
pub const SLIDE_DAMAGE: f32 = 12.0;

/// Share of the damage that gets through a raised guard.
pub const GUARD_DAMAGE_FACTOR: f32 = 0.2;
pub const HIT_COOLDOWN: u32 = 40;
pub const GUARD_HIT_COOLDOWN: u32 = 20;
pub const DAMAGE_FLASH: u32 = 10;
pub const KNOCKBACK: f32 = 10.0;
pub const GUARD_KNOCKBACK: f32 = 5.0;
/// Upward velocity applied on every landed hit.
pub const HIT_LIFT: f32 = -5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveWindow {
    pub after: u32,
    pub through: u32,
}

impl ActiveWindow {
    pub fn contains(&self, timer: u32) -> bool {
        self.after < timer && timer <= self.through
    }
}

pub fn active_window(action: &Action) -> Option<ActiveWindow> {
    match action {
        Action::Punching(_) => Some(ActiveWindow { after: 5, through: 15 }),
        Action::Kicking(_) => Some(ActiveWindow { after: 5, through: 25 }),
        Action::Sliding(_) => Some(ActiveWindow { after: 10, through: 35 }),
        _ => None,
    }
}

/// Offensive rectangle in front of the fighter, if the current action is
/// inside its active window.
pub fn attack_rect(fighter: &Fighter) -> Option<Rect> {
    let timer = fighter.action.timer()?;
    let window = active_window(&fighter.action)?;
    if !window.contains(timer) {
        return None;
    }

    // (reach offset when facing right, offset when facing left, y offset, w, h)
    let (right, left, dy, w, h) = match fighter.action {
        Action::Punching(_) => (20.0, -70.0, -70.0, 50.0, 30.0),
        Action::Kicking(_) => (20.0, -90.0, -50.0, 70.0, 40.0),
        Action::Sliding(_) => (10.0, -90.0, -30.0, 80.0, 30.0),
        _ => return None,
    };
    let dx = match fighter.facing {
        Facing::Right => right,
        Facing::Left => left,
    };
    Some(Rect::new(fighter.x + dx, fighter.y + dy, w, h))
}

/// Vulnerable rectangle; a sliding fighter is half as tall.
pub fn hurt_rect(fighter: &Fighter) -> Rect {
    if matches!(fighter.action, Action::Sliding(_)) {
        Rect::new(fighter.x - 25.0, fighter.y - 50.0, 50.0, 50.0)
    } else {
        Rect::new(fighter.x - 25.0, fighter.y - 100.0, 50.0, 100.0)
    }
}

/// Damage the attacker's current melee move would deal, power included.
pub fn melee_damage(attacker: &Fighter) -> Option<f32> {
    let base = match attacker.action {
        Action::Punching(_) => PUNCH_DAMAGE,
        Action::Kicking(_) => KICK_DAMAGE,
        Action::Sliding(_) => SLIDE_DAMAGE,
        _ => return None,
    };
    Some(attacker.stats.melee_damage.unwrap_or(base) * attacker.stats.power)
}

impl Fighter {
    /// Apply a hit of `amount` coming from horizontal position `source_x`.
    /// Returns `false` when the hit is swallowed by the post-hit grace period.
    pub fn take_hit(&mut self, amount: f32, source_x: f32) -> bool {
        if self.hit_cooldown > 0 {
            return false;
        }

        let guarded = self.action == Action::Guarding;
        let amount = if guarded {
            self.hit_cooldown = GUARD_HIT_COOLDOWN;
            (amount * GUARD_DAMAGE_FACTOR).trunc()
        } else {
            self.hit_cooldown = HIT_COOLDOWN;
            amount
        };
        self.health = (self.health - amount).clamp(0.0, self.stats.max_health);
        self.damage_flash = DAMAGE_FLASH;

        let away = if source_x > self.x {
            -1.0
        } else if source_x < self.x {
            1.0
        } else {
            -self.facing.sign()
        };
        self.vx = away * if guarded { GUARD_KNOCKBACK } else { KNOCKBACK };
        self.vy = HIT_LIFT;

        self.interrupt();
        true
    }
}

/// Test the attacker's active rectangle against the defender and apply the
/// hit.  Returns whether damage landed.
pub fn resolve_melee(attacker: &Fighter, defender: &mut Fighter) -> bool {
    let Some(hitbox) = attack_rect(attacker) else {
        return false;
    };
    if !hitbox.intersects(&hurt_rect(defender)) {
        return false;
    }
    match melee_damage(attacker) {
        Some(amount) => defender.take_hit(amount, attacker.x),
        None => false,
    }
}
