/// Opponent AI.
///
/// Decisions come from a `DecisionTable`: for each distance bucket an
/// ordered list of rules, each rolled independently, plus a weighted
/// fallback.  An intent, once chosen, is held until its timer runs out.
/// Execution only uses the public `Fighter` requests.

use rand::Rng;

use crate::entities::{Action, Fighter, Projectile, Ruleset};

pub const NEAR_RANGE: f32 = 100.0;
pub const CLASSIC_MID_RANGE: f32 = 300.0;
pub const EXTENDED_MID_RANGE: f32 = 400.0;
/// Cooldown after firing, in frames.
pub const SHOOT_COOLDOWN: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Wait,
    Chase,
    Retreat,
    Jump,
    Slide,
    Shoot,
    Guard,
    Attack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceBucket {
    Near,
    Mid,
    Far,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Chance {
    Fixed(f32),
    /// `base + per_level * level`
    LevelScaled { base: f32, per_level: f32 },
}

impl Chance {
    pub fn at(&self, level: u32) -> f32 {
        match *self {
            Chance::Fixed(p) => p,
            Chance::LevelScaled { base, per_level } => base + per_level * level as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub intent: Intent,
    /// Frames the intent is held once chosen.
    pub hold: u32,
    pub chance: Chance,
    pub min_level: u32,
    /// Only eligible while the attack cooldown is zero.
    pub needs_cooldown: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub rules: Vec<Rule>,
    /// Weighted pick used when no rule fires.
    pub fallback: Vec<(Intent, u32)>,
    pub fallback_hold: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTable {
    pub mid_range: f32,
    pub near: Bucket,
    pub mid: Bucket,
    pub far: Bucket,
}

const fn rule(
    intent: Intent,
    hold: u32,
    chance: Chance,
    min_level: u32,
    needs_cooldown: bool,
) -> Rule {
    Rule {
        intent,
        hold,
        chance,
        min_level,
        needs_cooldown,
    }
}

impl DecisionTable {
    pub fn for_ruleset(ruleset: Ruleset) -> Self {
        let extended = ruleset == Ruleset::Extended;
        let attack = rule(
            Intent::Attack,
            30,
            Chance::LevelScaled { base: 0.3, per_level: 0.1 },
            0,
            true,
        );

        let mut near_rules = vec![attack, rule(Intent::Jump, 20, Chance::Fixed(0.3), 3, false)];
        let mut mid_rules = Vec::new();
        let mut far_rules = Vec::new();
        if extended {
            near_rules.push(rule(Intent::Guard, 30, Chance::Fixed(0.3), 2, false));
            mid_rules.push(rule(Intent::Shoot, 40, Chance::Fixed(0.1), 3, true));
            far_rules.push(rule(Intent::Shoot, 40, Chance::Fixed(0.2), 3, true));
        }
        mid_rules.push(rule(Intent::Slide, 40, Chance::Fixed(0.3), 4, false));

        DecisionTable {
            mid_range: if extended { EXTENDED_MID_RANGE } else { CLASSIC_MID_RANGE },
            near: Bucket {
                rules: near_rules,
                fallback: vec![(Intent::Retreat, 1), (Intent::Wait, 1)],
                fallback_hold: 20,
            },
            mid: Bucket {
                rules: mid_rules,
                fallback: vec![(Intent::Chase, 1)],
                fallback_hold: 30,
            },
            far: Bucket {
                rules: far_rules,
                fallback: vec![(Intent::Chase, 1)],
                fallback_hold: 40,
            },
        }
    }

    pub fn bucket_for(&self, distance: f32) -> DistanceBucket {
        if distance < NEAR_RANGE {
            DistanceBucket::Near
        } else if distance < self.mid_range {
            DistanceBucket::Mid
        } else {
            DistanceBucket::Far
        }
    }

    pub fn bucket(&self, bucket: DistanceBucket) -> &Bucket {
        match bucket {
            DistanceBucket::Near => &self.near,
            DistanceBucket::Mid => &self.mid,
            DistanceBucket::Far => &self.far,
        }
    }

    /// Pick an intent and how long to hold it.
    pub fn decide(
        &self,
        distance: f32,
        level: u32,
        cooldown_ready: bool,
        rng: &mut impl Rng,
    ) -> (Intent, u32) {
        let bucket = self.bucket(self.bucket_for(distance));
        for r in &bucket.rules {
            if level < r.min_level || (r.needs_cooldown && !cooldown_ready) {
                continue;
            }
            if rng.gen::<f32>() < r.chance.at(level) {
                return (r.intent, r.hold);
            }
        }
        (weighted(&bucket.fallback, rng).unwrap_or(Intent::Wait), bucket.fallback_hold)
    }
}

fn weighted<T: Copy>(options: &[(T, u32)], rng: &mut impl Rng) -> Option<T> {
    let total: u32 = options.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.gen_range(0..total);
    for &(item, weight) in options {
        if roll < weight {
            return Some(item);
        }
        roll -= weight;
    }
    None
}

// ── Attack selection ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackMove {
    Punch,
    Kick,
    Slide,
}

/// Punch 40%, kick 30%, slide 30% (a kick until slides unlock at level 2).
pub fn attack_table(level: u32) -> [(AttackMove, u32); 3] {
    let third = if level >= 2 { AttackMove::Slide } else { AttackMove::Kick };
    [(AttackMove::Punch, 40), (AttackMove::Kick, 30), (third, 30)]
}

pub fn attack_cooldown(level: u32) -> u32 {
    80u32.saturating_sub(level * 10).max(20)
}

// ── Controller ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct OpponentAi {
    pub level: u32,
    pub intent: Intent,
    /// Frames until the next decision.
    pub timer: u32,
    pub attack_cooldown: u32,
    pub table: DecisionTable,
}

impl OpponentAi {
    pub fn new(level: u32, ruleset: Ruleset) -> Self {
        OpponentAi {
            level,
            intent: Intent::Wait,
            timer: 0,
            attack_cooldown: 0,
            table: DecisionTable::for_ruleset(ruleset),
        }
    }

    /// One frame of thinking and acting for `me` against `target`.
    pub fn update(
        &mut self,
        me: &mut Fighter,
        target: &Fighter,
        projectiles: &mut Vec<Projectile>,
        rng: &mut impl Rng,
    ) {
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.timer = self.timer.saturating_sub(1);

        if self.timer == 0 {
            let distance = (target.x - me.x).abs();
            let ready = self.attack_cooldown == 0;
            let (intent, hold) = self.table.decide(distance, self.level, ready, rng);
            self.intent = intent;
            self.timer = hold;
        }

        self.execute(me, target, projectiles, rng);
    }

    fn execute(
        &mut self,
        me: &mut Fighter,
        target: &Fighter,
        projectiles: &mut Vec<Projectile>,
        rng: &mut impl Rng,
    ) {
        if self.intent != Intent::Guard {
            me.guard(false);
        }
        let toward: i8 = if target.x > me.x { 1 } else { -1 };

        match self.intent {
            Intent::Chase => me.move_dir(toward),
            Intent::Retreat => me.move_dir(-toward),
            Intent::Jump => {
                me.jump();
                self.intent = Intent::Wait;
            }
            Intent::Slide => {
                me.slide();
                self.intent = Intent::Wait;
            }
            Intent::Guard => me.guard(true),
            Intent::Shoot => {
                me.shoot(projectiles);
                self.attack_cooldown = SHOOT_COOLDOWN;
                self.intent = Intent::Wait;
            }
            Intent::Attack => {
                if !matches!(me.action, Action::Punching(_) | Action::Kicking(_)) {
                    match weighted(&attack_table(self.level), rng) {
                        Some(AttackMove::Punch) => me.punch(),
                        Some(AttackMove::Kick) | None => me.kick(),
                        Some(AttackMove::Slide) => me.slide(),
                    }
                    self.attack_cooldown = attack_cooldown(self.level);
                    self.intent = Intent::Wait;
                }
            }
            Intent::Wait => me.move_dir(0),
        }
    }
}
