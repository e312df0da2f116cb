use arcade_brawl::actions::{archetype_stats, capabilities};
use arcade_brawl::entities::*;
use arcade_brawl::geometry::Rect;
use arcade_brawl::physics::GROUND_Y;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq, so equality comparisons must work
    assert_eq!(Archetype::Power, Archetype::Power);
    assert_ne!(Archetype::Power, Archetype::Speed);
    assert_eq!(Ruleset::Classic, Ruleset::Classic);
    assert_ne!(Ruleset::Classic, Ruleset::Extended);
    assert_eq!(Side::Player, Side::Player);
    assert_ne!(Side::Player, Side::Opponent);
    assert_eq!(Action::Punching(3), Action::Punching(3));
    assert_ne!(Action::Punching(3), Action::Punching(4));
    assert_ne!(Action::Punching(3), Action::Kicking(3));

    // Clone must produce an equal value
    let kind = HazardKind::Chasing { life: 7 };
    assert_eq!(kind.clone(), HazardKind::Chasing { life: 7 });
}

#[test]
fn new_fighter_stands_on_ground_facing_inward() {
    let stats = archetype_stats(Archetype::Balance);
    let p = Fighter::new(Side::Player, 200.0, stats, capabilities(Ruleset::Extended));
    let o = Fighter::new(Side::Opponent, 1000.0, stats, capabilities(Ruleset::Extended));

    assert_eq!(p.y, GROUND_Y);
    assert!(!p.airborne);
    assert_eq!(p.health, stats.max_health);
    assert_eq!(p.action, Action::Idle);
    assert_eq!(p.facing, Facing::Right);
    assert_eq!(o.facing, Facing::Left);
}

#[test]
fn fighter_clone_is_independent() {
    let original = Fighter::new(
        Side::Player,
        200.0,
        archetype_stats(Archetype::Speed),
        capabilities(Ruleset::Classic),
    );
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.x = 999.0;
    cloned.health = 1.0;
    cloned.action = Action::Kicking(10);

    assert_eq!(original.x, 200.0);
    assert_eq!(original.health, 80.0);
    assert_eq!(original.action, Action::Idle);
}

#[test]
fn action_timer_only_for_timed_variants() {
    assert_eq!(Action::Idle.timer(), None);
    assert_eq!(Action::Guarding.timer(), None);
    assert_eq!(Action::Sliding(12).timer(), Some(12));
    assert_eq!(Action::Shooting(1).timer(), Some(1));
    assert!(Action::Idle.is_idle());
    assert!(!Action::Guarding.is_idle());
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center(), (25.0, 40.0));
}

#[test]
fn rect_touching_edges_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&b));
    assert!(a.intersects(&Rect::new(9.0, 0.0, 10.0, 10.0)));
}

#[test]
fn rect_inflate_keeps_center() {
    let r = Rect::new(0.0, 0.0, 40.0, 40.0);
    let shrunk = r.inflate(-15.0, -15.0);
    assert_eq!(shrunk.w, 25.0);
    assert_eq!(shrunk.h, 25.0);
    assert_eq!(shrunk.center(), r.center());
    // Never negative
    assert_eq!(r.inflate(-100.0, -100.0).w, 0.0);
}

#[test]
fn rect_around_is_square() {
    let r = Rect::around(100.0, 50.0, 15.0);
    assert_eq!(r, Rect::new(85.0, 35.0, 30.0, 30.0));
}
