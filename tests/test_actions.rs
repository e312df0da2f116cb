use arcade_brawl::actions::*;
use arcade_brawl::entities::*;

fn fighter(ruleset: Ruleset) -> Fighter {
    Fighter::new(
        Side::Player,
        300.0,
        archetype_stats(Archetype::Balance),
        capabilities(ruleset),
    )
}

// ── Stat tables ───────────────────────────────────────────────────────────────

#[test]
fn archetype_presets() {
    let b = archetype_stats(Archetype::Balance);
    assert_eq!((b.max_health, b.move_speed, b.power, b.jump_power), (100.0, 6.0, 1.0, -15.0));
    let p = archetype_stats(Archetype::Power);
    assert_eq!((p.max_health, p.move_speed, p.power, p.jump_power), (140.0, 4.0, 1.5, -12.0));
    let s = archetype_stats(Archetype::Speed);
    assert_eq!((s.max_health, s.move_speed, s.power, s.jump_power), (80.0, 9.0, 0.8, -18.0));
    assert_eq!(b.melee_damage, None);
}

#[test]
fn opponent_scales_with_stage() {
    let s1 = opponent_stats(Ruleset::Classic, 1, 5);
    assert_eq!(s1.max_health, 100.0);
    assert_eq!(s1.melee_damage, Some(12.0));

    let s3 = opponent_stats(Ruleset::Classic, 3, 5);
    assert_eq!(s3.max_health, 140.0);
    assert_eq!(s3.melee_damage, Some(16.0));

    // No boss in Classic
    let s5 = opponent_stats(Ruleset::Classic, 5, 5);
    assert_eq!(s5.max_health, 180.0);
    assert_eq!(s5.power, 1.0);
}

#[test]
fn extended_final_stage_is_a_boss() {
    let boss = opponent_stats(Ruleset::Extended, 5, 5);
    assert_eq!(boss.max_health, 200.0);
    assert_eq!(boss.move_speed, 7.0);
    assert_eq!(boss.power, 1.5);
    assert_eq!(boss.melee_damage, Some(20.0));

    let not_yet = opponent_stats(Ruleset::Extended, 4, 5);
    assert_eq!(not_yet.max_health, 160.0);
}

#[test]
fn capabilities_per_ruleset() {
    assert_eq!(capabilities(Ruleset::Classic), Capabilities { guard: false, shoot: false });
    assert_eq!(capabilities(Ruleset::Extended), Capabilities { guard: true, shoot: true });
}

// ── Mutual exclusion ──────────────────────────────────────────────────────────

#[test]
fn attack_in_progress_blocks_other_attacks() {
    let mut f = fighter(Ruleset::Extended);
    f.punch();
    assert_eq!(f.action, Action::Punching(PUNCH_FRAMES));

    f.kick();
    f.slide();
    f.guard(true);
    let mut shots = Vec::new();
    assert!(!f.shoot(&mut shots));
    assert!(shots.is_empty());
    assert_eq!(f.action, Action::Punching(PUNCH_FRAMES));
}

#[test]
fn attacks_stop_the_fighter() {
    let mut f = fighter(Ruleset::Classic);
    f.move_dir(1);
    assert_eq!(f.vx, 6.0);
    f.kick();
    assert_eq!(f.vx, 0.0);
    // Movement is ignored while kicking
    f.move_dir(-1);
    assert_eq!(f.vx, 0.0);
}

#[test]
fn jump_may_overlap_punch_but_not_slide() {
    let mut f = fighter(Ruleset::Classic);
    f.punch();
    f.jump();
    assert!(f.airborne);
    assert_eq!(f.action, Action::Punching(PUNCH_FRAMES));

    let mut g = fighter(Ruleset::Classic);
    g.slide();
    g.jump();
    assert!(!g.airborne);
}

#[test]
fn no_slide_in_the_air() {
    let mut f = fighter(Ruleset::Classic);
    f.jump();
    f.slide();
    assert_eq!(f.action, Action::Idle);
    // But kicks are fine
    f.kick();
    assert_eq!(f.action, Action::Kicking(KICK_FRAMES));
}

#[test]
fn slide_dashes_in_facing_direction() {
    let mut f = fighter(Ruleset::Classic);
    f.facing = Facing::Left;
    f.slide();
    assert_eq!(f.vx, -12.0);
}

// ── Guard ─────────────────────────────────────────────────────────────────────

#[test]
fn guard_needs_capability() {
    let mut f = fighter(Ruleset::Classic);
    f.guard(true);
    assert_eq!(f.action, Action::Idle);
}

#[test]
fn guard_is_level_triggered() {
    let mut f = fighter(Ruleset::Extended);
    f.move_dir(1);
    f.guard(true);
    assert_eq!(f.action, Action::Guarding);
    assert_eq!(f.vx, 0.0);

    f.guard(true);
    assert_eq!(f.action, Action::Guarding);
    f.guard(false);
    assert_eq!(f.action, Action::Idle);
}

#[test]
fn guard_false_leaves_attacks_alone() {
    let mut f = fighter(Ruleset::Extended);
    f.kick();
    f.guard(false);
    assert_eq!(f.action, Action::Kicking(KICK_FRAMES));
}

#[test]
fn guard_blocks_jump() {
    let mut f = fighter(Ruleset::Extended);
    f.guard(true);
    f.jump();
    assert!(!f.airborne);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shoot_spawns_projectile_and_starts_cooldown() {
    let mut f = fighter(Ruleset::Extended);
    let mut shots = Vec::new();
    assert!(f.shoot(&mut shots));
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].owner, Side::Player);
    assert_eq!(f.action, Action::Shooting(SHOOT_FRAMES));
    assert_eq!(f.shoot_cooldown, SHOOT_COOLDOWN);
}

#[test]
fn shoot_cooldown_outlasts_the_animation() {
    let mut f = fighter(Ruleset::Extended);
    let mut shots = Vec::new();
    f.shoot(&mut shots);
    for _ in 0..SHOOT_FRAMES {
        f.tick_timers();
    }
    assert_eq!(f.action, Action::Idle);
    assert!(!f.shoot(&mut shots));

    for _ in SHOOT_FRAMES..SHOOT_COOLDOWN {
        f.tick_timers();
    }
    assert!(f.shoot(&mut shots));
    assert_eq!(shots.len(), 2);
}

#[test]
fn classic_fighter_cannot_shoot() {
    let mut f = fighter(Ruleset::Classic);
    let mut shots = Vec::new();
    assert!(!f.shoot(&mut shots));
    assert!(shots.is_empty());
}

// ── Timers & facing ───────────────────────────────────────────────────────────

#[test]
fn punch_returns_to_idle_after_its_frames() {
    let mut f = fighter(Ruleset::Classic);
    f.punch();
    for _ in 0..PUNCH_FRAMES - 1 {
        f.tick_timers();
        assert!(matches!(f.action, Action::Punching(_)));
    }
    f.tick_timers();
    assert_eq!(f.action, Action::Idle);
}

#[test]
fn guard_survives_timer_ticks() {
    let mut f = fighter(Ruleset::Extended);
    f.guard(true);
    for _ in 0..100 {
        f.tick_timers();
    }
    assert_eq!(f.action, Action::Guarding);
}

#[test]
fn face_towards_turns_unless_sliding() {
    let mut f = fighter(Ruleset::Classic);
    f.face_towards(100.0);
    assert_eq!(f.facing, Facing::Left);
    f.face_towards(900.0);
    assert_eq!(f.facing, Facing::Right);

    f.slide();
    f.face_towards(100.0);
    assert_eq!(f.facing, Facing::Right);
}

#[test]
fn interrupt_cancels_attacks_but_not_guard() {
    let mut f = fighter(Ruleset::Extended);
    f.slide();
    f.interrupt();
    assert_eq!(f.action, Action::Idle);

    f.guard(true);
    f.interrupt();
    assert_eq!(f.action, Action::Guarding);
}
