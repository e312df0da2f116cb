/// Fighter construction and the action state machine.
///
/// Every request (`move_dir`, `jump`, `punch`, ...) is a silent no-op when
/// it conflicts with the action already in progress.  The player's input and
/// the opponent AI go through exactly these calls.

use crate::entities::{
    Action, Archetype, Capabilities, Facing, Fighter, FighterStats, Projectile, Ruleset, Side,
};
use crate::physics::GROUND_Y;
use crate::projectile;

// ── Action timings (frames) ──────────────────────────────────────────────────

pub const PUNCH_FRAMES: u32 = 20;
pub const KICK_FRAMES: u32 = 30;
pub const SLIDE_FRAMES: u32 = 40;
pub const SHOOT_FRAMES: u32 = 30;
/// Frames between two shots, counted from the moment of firing.
pub const SHOOT_COOLDOWN: u32 = 60;

// ── Stat tables ──────────────────────────────────────────────────────────────

pub fn archetype_stats(archetype: Archetype) -> FighterStats {
    let (max_health, move_speed, power, jump_power) = match archetype {
        Archetype::Balance => (100.0, 6.0, 1.0, -15.0),
        Archetype::Power => (140.0, 4.0, 1.5, -12.0),
        Archetype::Speed => (80.0, 9.0, 0.8, -18.0),
    };
    FighterStats {
        max_health,
        move_speed,
        jump_power,
        power,
        melee_damage: None,
    }
}

/// Opponent stats for `stage` (1-based).  The Extended ruleset turns the
/// final stage into a boss.
pub fn opponent_stats(ruleset: Ruleset, stage: u32, stage_count: u32) -> FighterStats {
    let base = archetype_stats(Archetype::Balance);
    let melee = 10.0 + stage as f32 * 2.0;
    if ruleset == Ruleset::Extended && stage == stage_count {
        FighterStats {
            max_health: 200.0,
            move_speed: 7.0,
            power: 1.5,
            melee_damage: Some(melee),
            ..base
        }
    } else {
        FighterStats {
            max_health: 100.0 + stage.saturating_sub(1) as f32 * 20.0,
            melee_damage: Some(melee),
            ..base
        }
    }
}

pub fn capabilities(ruleset: Ruleset) -> Capabilities {
    match ruleset {
        Ruleset::Classic => Capabilities { guard: false, shoot: false },
        Ruleset::Extended => Capabilities { guard: true, shoot: true },
    }
}

impl Action {
    /// Frames remaining for timed actions.
    pub fn timer(&self) -> Option<u32> {
        match *self {
            Action::Punching(t) | Action::Kicking(t) | Action::Sliding(t) | Action::Shooting(t) => {
                Some(t)
            }
            Action::Idle | Action::Guarding => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Action::Idle
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Punching(_) => "punch",
            Action::Kicking(_) => "kick",
            Action::Sliding(_) => "slide",
            Action::Guarding => "guard",
            Action::Shooting(_) => "shoot",
        }
    }
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

impl Fighter {
    pub fn new(side: Side, x: f32, stats: FighterStats, capabilities: Capabilities) -> Self {
        Fighter {
            side,
            x,
            y: GROUND_Y,
            vx: 0.0,
            vy: 0.0,
            facing: match side {
                Side::Player => Facing::Right,
                Side::Opponent => Facing::Left,
            },
            airborne: false,
            health: stats.max_health,
            stats,
            capabilities,
            action: Action::Idle,
            hit_cooldown: 0,
            damage_flash: 0,
            shoot_cooldown: 0,
        }
    }

    pub fn health_ratio(&self) -> f32 {
        if self.stats.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.stats.max_health).clamp(0.0, 1.0)
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    // ── Requests ─────────────────────────────────────────────────────────────

    /// Walk in `direction` (-1, 0 or +1).  Zero stops the fighter.
    pub fn move_dir(&mut self, direction: i8) {
        if self.action.is_idle() {
            self.vx = direction.signum() as f32 * self.stats.move_speed;
        }
    }

    /// Jumping may overlap a punch or kick but not a slide, guard or shot.
    pub fn jump(&mut self) {
        if self.airborne {
            return;
        }
        if matches!(
            self.action,
            Action::Sliding(_) | Action::Guarding | Action::Shooting(_)
        ) {
            return;
        }
        self.vy = self.stats.jump_power;
        self.airborne = true;
    }

    pub fn punch(&mut self) {
        if self.action.is_idle() {
            self.action = Action::Punching(PUNCH_FRAMES);
            self.vx = 0.0;
        }
    }

    pub fn kick(&mut self) {
        if self.action.is_idle() {
            self.action = Action::Kicking(KICK_FRAMES);
            self.vx = 0.0;
        }
    }

    /// Ground-only dash at twice the walking speed.
    pub fn slide(&mut self) {
        if self.action.is_idle() && !self.airborne {
            self.action = Action::Sliding(SLIDE_FRAMES);
            self.vx = self.facing.sign() * self.stats.move_speed * 2.0;
        }
    }

    /// Level-triggered: `true` raises the guard if allowed, `false` drops it.
    pub fn guard(&mut self, active: bool) {
        if !self.capabilities.guard {
            return;
        }
        if active {
            if self.action.is_idle() && !self.airborne {
                self.action = Action::Guarding;
                self.vx = 0.0;
            }
        } else if self.action == Action::Guarding {
            self.action = Action::Idle;
        }
    }

    /// Fire a projectile into `projectiles`.  Returns whether a shot was made.
    pub fn shoot(&mut self, projectiles: &mut Vec<Projectile>) -> bool {
        if !self.capabilities.shoot || self.shoot_cooldown > 0 || !self.action.is_idle() {
            return false;
        }
        self.action = Action::Shooting(SHOOT_FRAMES);
        self.vx = 0.0;
        self.shoot_cooldown = SHOOT_COOLDOWN;
        projectiles.push(projectile::fire(self.x, self.y, self.facing, self.side));
        true
    }

    // ── Per-frame bookkeeping ────────────────────────────────────────────────

    /// Turn toward the opponent.  A slide keeps its direction.
    pub fn face_towards(&mut self, other_x: f32) {
        if matches!(self.action, Action::Sliding(_)) {
            return;
        }
        self.facing = if other_x > self.x {
            Facing::Right
        } else {
            Facing::Left
        };
    }

    /// Count down the action and the cooldown timers by one frame.
    pub fn tick_timers(&mut self) {
        self.action = match self.action {
            Action::Punching(t) if t > 1 => Action::Punching(t - 1),
            Action::Kicking(t) if t > 1 => Action::Kicking(t - 1),
            Action::Sliding(t) if t > 1 => Action::Sliding(t - 1),
            Action::Shooting(t) if t > 1 => Action::Shooting(t - 1),
            Action::Guarding => Action::Guarding,
            _ => Action::Idle,
        };
        self.hit_cooldown = self.hit_cooldown.saturating_sub(1);
        self.damage_flash = self.damage_flash.saturating_sub(1);
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Cancel any attack, slide or shot.  A raised guard stays up.
    pub fn interrupt(&mut self) {
        if self.action != Action::Guarding {
            self.action = Action::Idle;
        }
    }
}
