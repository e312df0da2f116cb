/// Dodge game logic: spawning, sweeping and scoring.
///
/// Every public function takes an immutable reference to the current
/// `DodgeState` (and, where needed, an RNG handle) and returns a brand-new
/// `DodgeState`.  Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::info;

use crate::entities::{Hazard, HazardKind, Pickup};
use crate::geometry::Rect;
use crate::input::Controls;

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Total shrink applied to the player's rectangle for collision tests.
pub const HITBOX_SHRINK: f32 = 15.0;

pub const CHASE_LIFE: u32 = 180;
pub const CHASE_SPEED_FACTOR: f32 = 0.4;
/// Chasing hazards may wander this far outside the arena before removal.
pub const CHASE_MARGIN: f32 = 100.0;

pub const PICKUP_SIZE: f32 = 20.0;
pub const PICKUP_LIFE: u32 = 300;
pub const PICKUP_INTERVAL: u32 = 300;

pub const SCORE_OFF_SCREEN: u32 = 10;
pub const SCORE_EXPIRED: u32 = 5;
pub const SCORE_PICKUP: u32 = 500;
pub const SCORE_PER_TICK: u32 = 1;

#[derive(Clone, Debug, PartialEq)]
pub enum DodgeStatus {
    Title,
    Playing,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct DodgeState {
    pub player: Rect,
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,
    pub score: u32,
    /// The highest score seen so far (updated when a run ends).
    pub high_score: u32,
    pub level: u32,
    pub status: DodgeStatus,
    pub frame: u64,
    pub hazard_timer: u32,
    pub pickup_timer: u32,
}

// ── Difficulty tables ────────────────────────────────────────────────────────

pub fn level_for_score(score: u32) -> u32 {
    1 + score / 1000
}

/// Frames between hazard spawns.
pub fn spawn_interval(level: u32) -> u32 {
    40u32.saturating_sub(level * 2).max(10)
}

pub fn speed_multiplier(level: u32) -> f32 {
    1.0 + level as f32 * 0.1
}

/// Probability that a new hazard is a chasing one.
pub fn chase_chance(level: u32) -> f64 {
    if level >= 3 {
        0.2
    } else {
        0.0
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn centred_player(size: (f32, f32)) -> Rect {
    Rect::new(
        (ARENA_WIDTH - size.0) / 2.0,
        (ARENA_HEIGHT - size.1) / 2.0,
        size.0,
        size.1,
    )
}

/// Title-screen state for a player sprite of `size` world units.
pub fn init_state(size: (f32, f32), high_score: u32) -> DodgeState {
    DodgeState {
        player: centred_player(size),
        hazards: Vec::new(),
        pickups: Vec::new(),
        score: 0,
        high_score,
        level: 1,
        status: DodgeStatus::Title,
        frame: 0,
        hazard_timer: 0,
        pickup_timer: 0,
    }
}

/// Begin a fresh run from the title or game-over screen.
pub fn start(state: &DodgeState) -> DodgeState {
    let size = (state.player.w, state.player.h);
    DodgeState {
        status: DodgeStatus::Playing,
        ..init_state(size, state.high_score)
    }
}

/// Swap in a player of a new size (a new sprite), re-centred.
pub fn resize_player(state: &DodgeState, size: (f32, f32)) -> DodgeState {
    DodgeState {
        player: centred_player(size),
        ..state.clone()
    }
}

// ── Input-driven transitions (pure) ──────────────────────────────────────────

pub fn move_player(state: &DodgeState, controls: &Controls) -> DodgeState {
    let (dx, dy) = controls.vector();
    let p = state.player;
    let x = (p.x + dx * PLAYER_SPEED).clamp(0.0, (ARENA_WIDTH - p.w).max(0.0));
    let y = (p.y + dy * PLAYER_SPEED).clamp(0.0, (ARENA_HEIGHT - p.h).max(0.0));
    DodgeState {
        player: Rect { x, y, ..p },
        ..state.clone()
    }
}

pub fn player_hitbox(player: &Rect) -> Rect {
    player.inflate(-HITBOX_SHRINK, -HITBOX_SHRINK)
}

// ── Hazards & pickups ────────────────────────────────────────────────────────

/// A hazard entering from a random edge, scaled to `level`.
pub fn spawn_hazard(level: u32, rng: &mut impl Rng) -> Hazard {
    let size = rng.gen_range(20..=40) as f32;
    let mut speed = rng.gen_range(3..=7) as f32 * speed_multiplier(level);
    let drift = rng.gen_range(-2..=2) as f32;

    let (x, y, vx, vy) = match rng.gen_range(0..4) {
        0 => (rng.gen_range(0.0..=ARENA_WIDTH - size), -size, drift, speed),
        1 => (rng.gen_range(0.0..=ARENA_WIDTH - size), ARENA_HEIGHT, drift, -speed),
        2 => (-size, rng.gen_range(0.0..=ARENA_HEIGHT - size), speed, drift),
        _ => (ARENA_WIDTH, rng.gen_range(0.0..=ARENA_HEIGHT - size), -speed, drift),
    };

    let kind = if rng.gen_bool(chase_chance(level)) {
        speed *= CHASE_SPEED_FACTOR;
        HazardKind::Chasing { life: CHASE_LIFE }
    } else {
        HazardKind::Normal
    };

    Hazard {
        rect: Rect::new(x, y, size, size),
        vx,
        vy,
        speed,
        kind,
    }
}

pub fn spawn_pickup(rng: &mut impl Rng) -> Pickup {
    Pickup {
        rect: Rect::new(
            rng.gen_range(50.0..=ARENA_WIDTH - 50.0),
            rng.gen_range(50.0..=ARENA_HEIGHT - 50.0),
            PICKUP_SIZE,
            PICKUP_SIZE,
        ),
        timer: PICKUP_LIFE,
    }
}

impl Hazard {
    /// Straight-line hazards drift; chasing ones home in on `target` and age.
    pub fn advance(&mut self, target: &Rect) {
        match &mut self.kind {
            HazardKind::Normal => {
                self.rect.x += self.vx;
                self.rect.y += self.vy;
            }
            HazardKind::Chasing { life } => {
                let (tx, ty) = target.center();
                let (cx, cy) = self.rect.center();
                let (dx, dy) = (tx - cx, ty - cy);
                let dist = dx.hypot(dy);
                if dist != 0.0 {
                    self.rect.x += dx / dist * self.speed;
                    self.rect.y += dy / dist * self.speed;
                }
                *life = life.saturating_sub(1);
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.kind, HazardKind::Chasing { life: 0 })
    }

    pub fn is_off_screen(&self) -> bool {
        let margin = match self.kind {
            HazardKind::Chasing { .. } => CHASE_MARGIN,
            HazardKind::Normal => 0.0,
        };
        self.rect.right() < -margin
            || self.rect.left() > ARENA_WIDTH + margin
            || self.rect.bottom() < -margin
            || self.rect.top() > ARENA_HEIGHT + margin
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the run by one frame.  Outside of `Playing` this is a no-op.
pub fn tick(state: &DodgeState, controls: &Controls, rng: &mut impl Rng) -> DodgeState {
    if state.status != DodgeStatus::Playing {
        return state.clone();
    }

    let level = level_for_score(state.score);
    let mut next = DodgeState {
        level,
        frame: state.frame + 1,
        ..move_player(state, controls)
    };

    // ── 1. Spawning ──────────────────────────────────────────────────────────
    next.hazard_timer += 1;
    if next.hazard_timer > spawn_interval(level) {
        next.hazards.push(spawn_hazard(level, rng));
        next.hazard_timer = 0;
    }

    next.pickup_timer += 1;
    if next.pickup_timer > PICKUP_INTERVAL {
        if rng.gen_bool(0.5) {
            next.pickups.push(spawn_pickup(rng));
        }
        next.pickup_timer = 0;
    }

    // ── 2. Hazard sweep ──────────────────────────────────────────────────────
    let hitbox = player_hitbox(&next.player);
    let player = next.player;
    let mut gained = 0;
    let mut hit = false;
    next.hazards.retain_mut(|h| {
        h.advance(&player);
        if h.is_off_screen() {
            gained += SCORE_OFF_SCREEN;
            false
        } else if h.is_expired() {
            gained += SCORE_EXPIRED;
            false
        } else {
            if hitbox.intersects(&h.rect) {
                hit = true;
            }
            true
        }
    });

    // ── 3. Pickups ───────────────────────────────────────────────────────────
    next.pickups.retain_mut(|p| {
        p.timer = p.timer.saturating_sub(1);
        if p.timer == 0 {
            false
        } else if hitbox.intersects(&p.rect) {
            gained += SCORE_PICKUP;
            false
        } else {
            true
        }
    });

    next.score += gained + SCORE_PER_TICK;

    if hit {
        next.status = DodgeStatus::GameOver;
        next.high_score = next.high_score.max(next.score);
        info!(score = next.score, level = next.level, "dodge run over");
    }
    next
}
