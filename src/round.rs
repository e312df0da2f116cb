/// Fighting-game match: round phases, stage progression and the per-frame
/// tick.
///
/// Like the dodge game, `tick` takes the current state by reference and
/// returns the next one; randomness only comes through the injected RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::actions::{archetype_stats, capabilities, opponent_stats};
use crate::ai::OpponentAi;
use crate::combat::resolve_melee;
use crate::command::InputBuffer;
use crate::config::GameConfig;
use crate::entities::{Archetype, Fighter, Projectile, Ruleset, Side};
use crate::input::Controls;
use crate::projectile;

pub const PLAYER_START_X: f32 = 200.0;
pub const OPPONENT_START_X: f32 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    PlayerWin,
    OpponentWin,
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// Frozen countdown before the fight; frames remaining.
    PreRound(u32),
    Active,
    /// `advance_in` counts down to the next stage after a won, non-final round.
    Resolved { outcome: Outcome, advance_in: Option<u32> },
}

#[derive(Clone, Debug)]
pub struct FightState {
    pub ruleset: Ruleset,
    pub archetype: Archetype,
    /// 1-based.
    pub stage: u32,
    pub stage_count: u32,
    pub player: Fighter,
    pub opponent: Fighter,
    pub ai: OpponentAi,
    pub projectiles: Vec<Projectile>,
    pub commands: InputBuffer,
    /// Seconds left on the round clock.
    pub round_time: u32,
    /// Frames since the round clock last ticked.
    pub clock_frames: u32,
    /// Frames simulated since the match began; drives the command buffer clock.
    pub frame: u64,
    pub phase: RoundPhase,
    /// Final stage won.
    pub cleared: bool,
    pub fps: u32,
    pub round_seconds: u32,
    pub pre_round_frames: u32,
    pub stage_advance_frames: u32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Start a match at stage 1.  The Classic ruleset always fields a Balance
/// fighter.
pub fn init_fight(config: &GameConfig) -> FightState {
    let archetype = match config.ruleset {
        Ruleset::Classic => Archetype::Balance,
        Ruleset::Extended => config.archetype,
    };
    let mut state = FightState {
        ruleset: config.ruleset,
        archetype,
        stage: 1,
        stage_count: config.stage_count.max(1),
        player: player_fighter(config.ruleset, archetype),
        opponent: opponent_fighter(config.ruleset, 1, config.stage_count.max(1)),
        ai: OpponentAi::new(1, config.ruleset),
        projectiles: Vec::new(),
        commands: InputBuffer::new(),
        round_time: config.round_seconds,
        clock_frames: 0,
        frame: 0,
        phase: opening_phase(config.pre_round_frames),
        cleared: false,
        fps: config.fps.max(1),
        round_seconds: config.round_seconds.max(1),
        pre_round_frames: config.pre_round_frames,
        stage_advance_frames: config.stage_advance_frames,
    };
    reset_round(&mut state);
    state
}

fn player_fighter(ruleset: Ruleset, archetype: Archetype) -> Fighter {
    Fighter::new(
        Side::Player,
        PLAYER_START_X,
        archetype_stats(archetype),
        capabilities(ruleset),
    )
}

fn opponent_fighter(ruleset: Ruleset, stage: u32, stage_count: u32) -> Fighter {
    Fighter::new(
        Side::Opponent,
        OPPONENT_START_X,
        opponent_stats(ruleset, stage, stage_count),
        capabilities(ruleset),
    )
}

/// A zero-length freeze starts the fight straight away.
fn opening_phase(pre_round_frames: u32) -> RoundPhase {
    match pre_round_frames {
        0 => RoundPhase::Active,
        frames => RoundPhase::PreRound(frames),
    }
}

/// Fresh fighters, AI and clock for the current stage.
fn reset_round(state: &mut FightState) {
    state.player = player_fighter(state.ruleset, state.archetype);
    state.opponent = opponent_fighter(state.ruleset, state.stage, state.stage_count);
    state.ai = OpponentAi::new(state.stage, state.ruleset);
    state.projectiles.clear();
    state.commands.clear();
    state.round_time = state.round_seconds;
    state.clock_frames = 0;
    state.phase = opening_phase(state.pre_round_frames);
    info!(stage = state.stage, ruleset = ?state.ruleset, "round starting");
}

/// Back to stage 1 after a game over or a clear, keeping the ruleset.
/// A new archetype may be picked for the Extended ruleset.
pub fn restart(state: &FightState, archetype: Archetype) -> FightState {
    let mut next = state.clone();
    next.archetype = match state.ruleset {
        Ruleset::Classic => Archetype::Balance,
        Ruleset::Extended => archetype,
    };
    next.stage = 1;
    next.cleared = false;
    next.frame = 0;
    reset_round(&mut next);
    next
}

// ── Queries ──────────────────────────────────────────────────────────────────

impl FightState {
    pub fn is_final_stage(&self) -> bool {
        self.stage >= self.stage_count
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            RoundPhase::Resolved { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// The match is over and needs an external restart.
    pub fn is_game_over(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::Resolved { outcome: Outcome::OpponentWin | Outcome::Draw, .. }
        )
    }

    /// Nothing left to play: lost, drawn or cleared.
    pub fn is_finished(&self) -> bool {
        self.cleared || self.is_game_over()
    }

    /// A restart goes back through character select; Classic always fields
    /// Balance so it has nothing to pick.
    pub fn restart_picks_fighter(&self) -> bool {
        self.ruleset == Ruleset::Extended
    }

    fn now_ms(&self) -> u64 {
        self.frame * 1000 / self.fps as u64
    }
}

/// Higher health wins; equal health is a draw.
pub fn decide_outcome(player: &Fighter, opponent: &Fighter) -> Outcome {
    if player.health > opponent.health {
        Outcome::PlayerWin
    } else if opponent.health > player.health {
        Outcome::OpponentWin
    } else {
        Outcome::Draw
    }
}

// ── Player input ─────────────────────────────────────────────────────────────

/// Feed one frame of controls into the player's fighter.
fn apply_controls(state: &mut FightState, controls: &Controls) {
    let now = state.now_ms();
    state.commands.record(now, controls.direction_mask());

    let player = &mut state.player;
    // Letting go of guard frees the fighter for this frame's attack.
    if !controls.guard {
        player.guard(false);
    }
    player.move_dir(controls.horizontal());
    if controls.up {
        player.jump();
    }
    // A recognised command turns the punch into a shot, even if the shot
    // is still on cooldown.
    let command = controls.punch && state.commands.special_ready(now, player.facing);
    if player.capabilities.shoot && (controls.special || command) {
        player.shoot(&mut state.projectiles);
    } else if controls.punch {
        player.punch();
    }
    if controls.kick {
        player.kick();
    }
    if controls.slide {
        player.slide();
    }
    if controls.guard {
        player.guard(true);
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the match by one frame.
pub fn tick(state: &FightState, controls: &Controls, rng: &mut impl Rng) -> FightState {
    let mut next = state.clone();
    let phase = next.phase;
    match phase {
        RoundPhase::PreRound(frames) => {
            next.phase = if frames > 1 {
                RoundPhase::PreRound(frames - 1)
            } else {
                RoundPhase::Active
            };
        }
        RoundPhase::Active => step_active(&mut next, controls, rng),
        RoundPhase::Resolved { outcome, advance_in: Some(frames) } => {
            if frames > 1 {
                next.phase = RoundPhase::Resolved {
                    outcome,
                    advance_in: Some(frames - 1),
                };
            } else {
                next.stage += 1;
                info!(stage = next.stage, "advancing to next stage");
                reset_round(&mut next);
            }
        }
        RoundPhase::Resolved { advance_in: None, .. } => {}
    }
    next
}

fn step_active(state: &mut FightState, controls: &Controls, rng: &mut impl Rng) {
    state.frame += 1;

    apply_controls(state, controls);
    state
        .ai
        .update(&mut state.opponent, &state.player, &mut state.projectiles, rng);

    let (player_x, opponent_x) = (state.player.x, state.opponent.x);
    for (fighter, other_x) in [
        (&mut state.player, opponent_x),
        (&mut state.opponent, player_x),
    ] {
        fighter.face_towards(other_x);
        fighter.integrate();
        fighter.tick_timers();
    }

    projectile::update_all(&mut state.projectiles);

    if resolve_melee(&state.player, &mut state.opponent) {
        debug!(action = state.player.action.label(), health = state.opponent.health, "player landed a hit");
    }
    if resolve_melee(&state.opponent, &mut state.player) {
        debug!(action = state.opponent.action.label(), health = state.player.health, "opponent landed a hit");
    }
    projectile::resolve_hits(&mut state.projectiles, &mut state.player, &mut state.opponent);

    state.clock_frames += 1;
    if state.clock_frames >= state.fps {
        state.clock_frames = 0;
        state.round_time = state.round_time.saturating_sub(1);
    }

    if state.round_time == 0 || state.player.is_defeated() || state.opponent.is_defeated() {
        end_round(state);
    }
}

/// Decide the round.  Only called from the active phase, so each round is
/// resolved once.
fn end_round(state: &mut FightState) {
    let outcome = decide_outcome(&state.player, &state.opponent);
    let advance_in = match outcome {
        Outcome::PlayerWin if state.is_final_stage() => {
            state.cleared = true;
            info!(stage = state.stage, "all stages cleared");
            None
        }
        Outcome::PlayerWin => Some(state.stage_advance_frames.max(1)),
        Outcome::OpponentWin | Outcome::Draw => {
            info!(stage = state.stage, ?outcome, "match over");
            None
        }
    };
    info!(
        stage = state.stage,
        ?outcome,
        player_health = state.player.health,
        opponent_health = state.opponent.health,
        "round resolved"
    );
    state.phase = RoundPhase::Resolved { outcome, advance_in };
}
