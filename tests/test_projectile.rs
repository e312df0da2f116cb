use arcade_brawl::actions::{archetype_stats, capabilities};
use arcade_brawl::entities::*;
use arcade_brawl::physics::GROUND_Y;
use arcade_brawl::projectile::*;

fn fighter(side: Side, x: f32, archetype: Archetype) -> Fighter {
    Fighter::new(side, x, archetype_stats(archetype), capabilities(Ruleset::Extended))
}

// ── fire / update_all ─────────────────────────────────────────────────────────

#[test]
fn fire_spawns_at_the_muzzle() {
    let p = fire(200.0, GROUND_Y, Facing::Right, Side::Player);
    assert_eq!(p.x, 240.0);
    assert_eq!(p.y, GROUND_Y - 60.0);
    assert_eq!(p.vx, SPEED);
    assert_eq!(p.life, LIFETIME);
    assert!(p.active);

    let q = fire(200.0, GROUND_Y, Facing::Left, Side::Opponent);
    assert_eq!(q.x, 160.0);
    assert_eq!(q.vx, -SPEED);
    assert_eq!(q.target(), Side::Player);
}

#[test]
fn projectile_travels_each_frame() {
    let mut shots = vec![fire(100.0, GROUND_Y, Facing::Right, Side::Player)];
    update_all(&mut shots);
    update_all(&mut shots);
    assert_eq!(shots[0].x, 160.0);
    assert_eq!(shots[0].life, LIFETIME - 2);
}

#[test]
fn projectile_fizzles_after_its_lifetime() {
    let mut shots = vec![fire(100.0, GROUND_Y, Facing::Right, Side::Player)];
    for _ in 0..LIFETIME - 1 {
        update_all(&mut shots);
    }
    assert_eq!(shots.len(), 1);
    update_all(&mut shots);
    assert!(shots.is_empty());
}

#[test]
fn projectile_dropped_past_the_arena_edge() {
    let mut shots = vec![fire(100.0, GROUND_Y, Facing::Left, Side::Opponent)];
    // 60 → -50 takes 11 frames, the 12th crosses the margin
    for _ in 0..11 {
        update_all(&mut shots);
    }
    assert_eq!(shots.len(), 1);
    update_all(&mut shots);
    assert!(shots.is_empty());
}

// ── resolve_hits ──────────────────────────────────────────────────────────────

#[test]
fn projectile_hits_exactly_once() {
    let mut player = fighter(Side::Player, 100.0, Archetype::Balance);
    let mut opponent = fighter(Side::Opponent, 500.0, Archetype::Balance);
    let mut shots = vec![fire(460.0, GROUND_Y, Facing::Right, Side::Player)];

    assert_eq!(resolve_hits(&mut shots, &mut player, &mut opponent), 1);
    assert_eq!(opponent.health, 100.0 - DAMAGE);
    assert!(!shots[0].active);

    // Even with the grace period over, a spent shot never hits again
    opponent.hit_cooldown = 0;
    assert_eq!(resolve_hits(&mut shots, &mut player, &mut opponent), 0);
    assert_eq!(opponent.health, 100.0 - DAMAGE);

    update_all(&mut shots);
    assert!(shots.is_empty());
}

#[test]
fn projectile_ignores_its_owner() {
    let mut player = fighter(Side::Player, 500.0, Archetype::Balance);
    let mut opponent = fighter(Side::Opponent, 1000.0, Archetype::Balance);
    let mut shots = vec![fire(460.0, GROUND_Y, Facing::Right, Side::Player)];

    assert_eq!(resolve_hits(&mut shots, &mut player, &mut opponent), 0);
    assert_eq!(player.health, 100.0);
    assert!(shots[0].active);
}

#[test]
fn absorbed_hit_still_spends_the_shot() {
    let mut player = fighter(Side::Player, 100.0, Archetype::Balance);
    let mut opponent = fighter(Side::Opponent, 500.0, Archetype::Balance);
    opponent.hit_cooldown = 10;
    let mut shots = vec![fire(460.0, GROUND_Y, Facing::Right, Side::Player)];

    assert_eq!(resolve_hits(&mut shots, &mut player, &mut opponent), 0);
    assert_eq!(opponent.health, 100.0);
    assert!(!shots[0].active);
}

#[test]
fn shot_damage_scales_with_shooter_power() {
    let mut player = fighter(Side::Player, 100.0, Archetype::Power);
    let mut opponent = fighter(Side::Opponent, 500.0, Archetype::Balance);
    let mut shots = vec![fire(460.0, GROUND_Y, Facing::Right, Side::Player)];

    resolve_hits(&mut shots, &mut player, &mut opponent);
    assert_eq!(opponent.health, 100.0 - DAMAGE * 1.5);
}

#[test]
fn one_shot_per_target_per_frame() {
    let mut player = fighter(Side::Player, 100.0, Archetype::Balance);
    let mut opponent = fighter(Side::Opponent, 500.0, Archetype::Balance);
    let mut shots = vec![
        fire(460.0, GROUND_Y, Facing::Right, Side::Player),
        fire(465.0, GROUND_Y, Facing::Right, Side::Player),
    ];

    // The second shot is absorbed by the grace period but still spent
    assert_eq!(resolve_hits(&mut shots, &mut player, &mut opponent), 1);
    assert_eq!(opponent.health, 100.0 - DAMAGE);
    assert!(shots.iter().all(|p| !p.active));
}

#[test]
fn guarded_shot_is_reduced() {
    let mut player = fighter(Side::Player, 100.0, Archetype::Balance);
    let mut opponent = fighter(Side::Opponent, 500.0, Archetype::Balance);
    opponent.guard(true);
    let mut shots = vec![fire(460.0, GROUND_Y, Facing::Right, Side::Player)];

    resolve_hits(&mut shots, &mut player, &mut opponent);
    assert_eq!(opponent.health, 97.0);
}
