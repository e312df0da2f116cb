/// Game entity types: plain data shared by the fight and dodge modules.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

// ── Fighter presets ───────────────────────────────────────────────────────────

/// Selectable stat preset for the player's fighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    /// Standard fighter.
    Balance,
    /// High health and attack, slow.
    Power,
    /// Fast with a high jump, low health.
    Speed,
}

/// Which fighting-game variant is being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruleset {
    /// Punch / kick / slide only, fixed Balance player.
    Classic,
    /// Adds guard, projectiles, the special-move command and character select.
    Extended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FighterStats {
    pub max_health: f32,
    pub move_speed: f32,
    /// Negative: screen y grows downward.
    pub jump_power: f32,
    /// Multiplier on every damage amount this fighter deals.
    pub power: f32,
    /// Flat melee damage used instead of the per-move table.
    /// Opponents hit for the same amount regardless of the move.
    pub melee_damage: Option<f32>,
}

// ── Fighter ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// The one action a fighter is committed to.  Timed variants carry the
/// number of frames remaining.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Idle,
    Punching(u32),
    Kicking(u32),
    Sliding(u32),
    Guarding,
    Shooting(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub guard: bool,
    pub shoot: bool,
}

#[derive(Clone, Debug)]
pub struct Fighter {
    pub side: Side,
    pub x: f32,
    /// Feet position; equals the ground line when standing.
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    pub airborne: bool,
    pub health: f32,
    pub stats: FighterStats,
    pub capabilities: Capabilities,
    pub action: Action,
    /// Frames of post-hit invulnerability left.
    pub hit_cooldown: u32,
    /// Visual only.
    pub damage_flash: u32,
    pub shoot_cooldown: u32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// Signed by the firing direction.
    pub vx: f32,
    /// Frames until the projectile fizzles.
    pub life: u32,
    pub owner: Side,
    pub active: bool,
}

// ── Dodge game ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum HazardKind {
    /// Flies in a straight line until it leaves the arena.
    Normal,
    /// Homes in on the player until `life` frames run out.
    Chasing { life: u32 },
}

#[derive(Clone, Debug)]
pub struct Hazard {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    /// Homing speed; straight-line hazards use `vx`/`vy`.
    pub speed: f32,
    pub kind: HazardKind,
}

#[derive(Clone, Debug)]
pub struct Pickup {
    pub rect: Rect,
    /// Frames left before it disappears.
    pub timer: u32,
}
