//! Power-up spawning, collection and effects

use glam::Vec2;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use super::paddle::{Paddle, PaddleEffect, Paddles};
use super::puck::Puck;
use super::rink::{Rink, Side};
use crate::consts::*;
use crate::settings::PowerUpFrequency;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Collector may cross the midline; puck hits harder
    Speed,
    /// Collector's radius x1.5
    Size,
    /// Opponent frozen
    Freeze,
    /// Collector grows two side bodies
    MultiPuck,
    /// Collector's own goal narrows
    GoalShrink,
    /// Puck pulled toward the opponent's goal
    Repulsor,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Size,
        PowerUpKind::Freeze,
        PowerUpKind::MultiPuck,
        PowerUpKind::GoalShrink,
        PowerUpKind::Repulsor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Size => "size",
            PowerUpKind::Freeze => "freeze",
            PowerUpKind::MultiPuck => "multi_puck",
            PowerUpKind::GoalShrink => "goal_shrink",
            PowerUpKind::Repulsor => "repulsor",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A power-up waiting on the rink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Seconds until it disappears
    pub lifetime: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWER_UP_RADIUS,
            lifetime: POWER_UP_LIFETIME,
        }
    }

    /// Count down; returns true once the lifetime is used up
    pub fn update(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        self.lifetime <= 0.0
    }

    /// Only the main body collects
    pub fn touches(&self, paddle: &Paddle) -> bool {
        circles_overlap(self.pos, self.radius, paddle.pos, paddle.radius)
    }
}

/// What happened to power-ups during one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerUpOutcome {
    Spawned { id: u32, kind: PowerUpKind, pos: Vec2 },
    Collected { id: u32, kind: PowerUpKind, by: Side },
    Expired { id: u32, kind: PowerUpKind },
}

/// Spawns, ages and resolves power-ups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpManager {
    /// Seconds since the last spawn
    spawn_timer: f32,
    live: Vec<PowerUp>,
    next_id: u32,
}

impl PowerUpManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every power-up and restart the spawn clock
    pub fn clear(&mut self) {
        self.live.clear();
        self.spawn_timer = 0.0;
    }

    pub fn live(&self) -> &[PowerUp] {
        &self.live
    }

    /// Place a power-up directly; returns its id
    pub fn spawn(&mut self, kind: PowerUpKind, pos: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.live.push(PowerUp::new(id, kind, pos));
        id
    }

    /// One step: age each power-up and check collection, then maybe spawn
    ///
    /// A power-up whose lifetime runs out this step is removed before it can
    /// be collected. The player's paddle is checked before the AI's.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        frequency: PowerUpFrequency,
        rink: &Rink,
        paddles: &mut Paddles,
        puck: &mut Puck,
        rng: &mut R,
    ) -> Vec<PowerUpOutcome> {
        let mut outcomes = Vec::new();

        let mut index = 0;
        while index < self.live.len() {
            let power_up = &mut self.live[index];
            let (id, kind) = (power_up.id, power_up.kind);

            if power_up.update(dt) {
                self.live.remove(index);
                debug!("Power-up {} expired: {}", id, kind.as_str());
                outcomes.push(PowerUpOutcome::Expired { id, kind });
                continue;
            }

            let collector = Side::ALL
                .into_iter()
                .find(|&side| power_up.touches(paddles.get(side)));
            if let Some(by) = collector {
                self.live.remove(index);
                apply_power_up(kind, by, paddles, puck, rink);
                debug!("Power-up {} collected by {}: {}", id, by.as_str(), kind.as_str());
                outcomes.push(PowerUpOutcome::Collected { id, kind, by });
                continue;
            }

            index += 1;
        }

        // The clock keeps running at the cap, so a freed slot refills at once
        self.spawn_timer += dt;
        if self.spawn_timer >= frequency.spawn_interval() && self.live.len() < frequency.max_live() {
            let margin = POWER_UP_RADIUS + POWER_UP_SPAWN_MARGIN;
            let pos = Vec2::new(rng.random_range(margin..=rink.width - margin), rink.midline());
            let kind = PowerUpKind::random(rng);
            let id = self.spawn(kind, pos);
            self.spawn_timer = 0.0;
            debug!("Power-up {} spawned: {} at ({:.0}, {:.0})", id, kind.as_str(), pos.x, pos.y);
            outcomes.push(PowerUpOutcome::Spawned { id, kind, pos });
        }

        outcomes
    }
}

/// Grant `kind` to `collector`
///
/// Every collection also opens the collector's `Powered` window.
pub fn apply_power_up(
    kind: PowerUpKind,
    collector: Side,
    paddles: &mut Paddles,
    puck: &mut Puck,
    rink: &Rink,
) {
    let (own, opponent) = paddles.pair_mut(collector);

    match kind {
        PowerUpKind::Speed => {
            own.start_effect(PaddleEffect::MidlineCross, EFFECT_DURATION, rink);
            puck.effects.speed_boost = true;
        }
        PowerUpKind::Size => own.start_effect(PaddleEffect::SizeBoost, EFFECT_DURATION, rink),
        PowerUpKind::Freeze => {
            opponent.start_effect(PaddleEffect::Frozen, FREEZE_DURATION, rink);
            puck.effects.freeze_emitter = true;
        }
        PowerUpKind::MultiPuck => own.start_effect(PaddleEffect::MultiBody, EFFECT_DURATION, rink),
        PowerUpKind::GoalShrink => own.start_effect(PaddleEffect::GoalShrink, EFFECT_DURATION, rink),
        PowerUpKind::Repulsor => puck.start_attraction(collector, EFFECT_DURATION),
    }

    own.start_effect(PaddleEffect::Powered, EFFECT_DURATION, rink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        rink: Rink,
        paddles: Paddles,
        puck: Puck,
        rng: Pcg32,
        manager: PowerUpManager,
    }

    fn fixture() -> Fixture {
        let rink = Rink::default();
        Fixture {
            rink,
            paddles: Paddles::new(&rink),
            puck: Puck::new(rink.center(), Vec2::ZERO),
            rng: Pcg32::seed_from_u64(42),
            manager: PowerUpManager::new(),
        }
    }

    impl Fixture {
        fn step(&mut self, dt: f32, frequency: PowerUpFrequency) -> Vec<PowerUpOutcome> {
            self.manager.update(
                dt,
                frequency,
                &self.rink,
                &mut self.paddles,
                &mut self.puck,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn test_spawns_on_midline_after_interval() {
        let mut f = fixture();
        assert!(f.step(9.0, PowerUpFrequency::Medium).is_empty());
        let outcomes = f.step(1.0, PowerUpFrequency::Medium);
        assert_eq!(outcomes.len(), 1);

        let power_up = &f.manager.live()[0];
        assert_eq!(power_up.pos.y, f.rink.midline());
        let margin = POWER_UP_RADIUS + POWER_UP_SPAWN_MARGIN;
        assert!(power_up.pos.x >= margin && power_up.pos.x <= f.rink.width - margin);
    }

    #[test]
    fn test_live_cap_respected() {
        let mut f = fixture();
        for x in [50.0, 100.0, 150.0] {
            f.manager.spawn(PowerUpKind::Speed, Vec2::new(x, 340.0));
        }
        // Interval elapsed but the rink is full
        assert!(f.step(6.0, PowerUpFrequency::High).is_empty());
        assert_eq!(f.manager.live().len(), 3);

        // All three expire, and the overdue spawn happens straight away
        let outcomes = f.step(5.0, PowerUpFrequency::High);
        assert_eq!(outcomes.len(), 4);
        assert!(matches!(outcomes.last(), Some(PowerUpOutcome::Spawned { .. })));
        assert_eq!(f.manager.live().len(), 1);
    }

    #[test]
    fn test_lifetime_decreases_and_expires_once() {
        let mut f = fixture();
        // Away from both paddles
        let id = f.manager.spawn(PowerUpKind::Size, Vec2::new(50.0, 340.0));
        let mut last = POWER_UP_LIFETIME;
        let mut expired = 0;
        for _ in 0..12 {
            for outcome in f.step(1.0, PowerUpFrequency::Low) {
                if let PowerUpOutcome::Expired { id: gone, .. } = outcome {
                    assert_eq!(gone, id);
                    expired += 1;
                }
            }
            if let Some(p) = f.manager.live().iter().find(|p| p.id == id) {
                assert!(p.lifetime < last);
                last = p.lifetime;
            }
        }
        assert_eq!(expired, 1);
    }

    #[test]
    fn test_collection_removes_and_applies() {
        let mut f = fixture();
        let at_player = f.paddles.player.pos;
        let id = f.manager.spawn(PowerUpKind::Size, at_player);

        let outcomes = f.step(0.016, PowerUpFrequency::Low);
        assert_eq!(
            outcomes,
            vec![PowerUpOutcome::Collected {
                id,
                kind: PowerUpKind::Size,
                by: Side::Player
            }]
        );
        assert!(f.manager.live().is_empty());
        assert_eq!(f.paddles.player.radius, PADDLE_RADIUS * SIZE_BOOST_FACTOR);
        assert!(f.paddles.player.is_powered());

        // Gone for good
        assert!(f.step(0.016, PowerUpFrequency::Low).is_empty());
    }

    #[test]
    fn test_expiry_beats_collection() {
        let mut f = fixture();
        let at_ai = f.paddles.ai.pos;
        f.manager.spawn(PowerUpKind::Freeze, at_ai);
        let outcomes = f.step(POWER_UP_LIFETIME, PowerUpFrequency::Low);
        assert!(matches!(outcomes.as_slice(), [PowerUpOutcome::Expired { .. }]));
        assert!(!f.paddles.player.is_frozen());
    }

    #[test]
    fn test_freeze_targets_opponent() {
        let mut f = fixture();
        apply_power_up(PowerUpKind::Freeze, Side::Ai, &mut f.paddles, &mut f.puck, &f.rink);
        assert!(f.paddles.player.is_frozen());
        assert_eq!(f.paddles.player.effects.frozen.remaining, FREEZE_DURATION);
        assert!(!f.paddles.ai.is_frozen());
        assert!(f.paddles.ai.is_powered());
        assert!(f.puck.effects.freeze_emitter);
    }

    #[test]
    fn test_speed_grants_midline_and_puck_boost() {
        let mut f = fixture();
        apply_power_up(PowerUpKind::Speed, Side::Player, &mut f.paddles, &mut f.puck, &f.rink);
        assert!(f.paddles.player.has_speed_boost());
        assert!(f.puck.effects.speed_boost);
    }

    #[test]
    fn test_goal_shrink_narrows_own_goal() {
        let mut f = fixture();
        apply_power_up(PowerUpKind::GoalShrink, Side::Ai, &mut f.paddles, &mut f.puck, &f.rink);
        assert!(f.paddles.ai.effects.goal_shrink.active);
        assert!(!f.paddles.player.effects.goal_shrink.active);
    }

    #[test]
    fn test_repulsor_owned_by_collector() {
        let mut f = fixture();
        apply_power_up(PowerUpKind::Repulsor, Side::Player, &mut f.paddles, &mut f.puck, &f.rink);
        assert!(f.puck.effects.attract.active);
        assert_eq!(f.puck.effects.attract_owner, Some(Side::Player));
    }

    #[test]
    fn test_multi_puck_adds_bodies() {
        let mut f = fixture();
        apply_power_up(PowerUpKind::MultiPuck, Side::Ai, &mut f.paddles, &mut f.puck, &f.rink);
        assert_eq!(f.paddles.ai.bodies().len(), 3);
    }
}
