//! Paddles and their timed effects

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::{self, AiDecision};
use super::puck::Puck;
use super::rink::{Half, Rink, Side};
use super::state::EffectTimer;
use crate::consts::*;
use crate::settings::Difficulty;

/// Timed effects a paddle can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddleEffect {
    /// Ignores input and AI
    Frozen,
    /// Radius x1.5
    SizeBoost,
    /// May roam the whole rink; paired with the puck speed boost
    MidlineCross,
    /// Two extra hitting bodies beside the main one
    MultiBody,
    /// The goal this paddle defends is narrowed
    GoalShrink,
    /// Any power-up was collected recently
    Powered,
}

impl PaddleEffect {
    pub const ALL: [PaddleEffect; 6] = [
        PaddleEffect::Frozen,
        PaddleEffect::SizeBoost,
        PaddleEffect::MidlineCross,
        PaddleEffect::MultiBody,
        PaddleEffect::GoalShrink,
        PaddleEffect::Powered,
    ];
}

/// Every paddle effect, always present, off by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaddleEffects {
    pub frozen: EffectTimer,
    pub size_boost: EffectTimer,
    pub midline_cross: EffectTimer,
    pub multi_body: EffectTimer,
    pub goal_shrink: EffectTimer,
    pub powered: EffectTimer,
}

impl PaddleEffects {
    pub fn timer(&self, effect: PaddleEffect) -> &EffectTimer {
        match effect {
            PaddleEffect::Frozen => &self.frozen,
            PaddleEffect::SizeBoost => &self.size_boost,
            PaddleEffect::MidlineCross => &self.midline_cross,
            PaddleEffect::MultiBody => &self.multi_body,
            PaddleEffect::GoalShrink => &self.goal_shrink,
            PaddleEffect::Powered => &self.powered,
        }
    }

    pub fn timer_mut(&mut self, effect: PaddleEffect) -> &mut EffectTimer {
        match effect {
            PaddleEffect::Frozen => &mut self.frozen,
            PaddleEffect::SizeBoost => &mut self.size_boost,
            PaddleEffect::MidlineCross => &mut self.midline_cross,
            PaddleEffect::MultiBody => &mut self.multi_body,
            PaddleEffect::GoalShrink => &mut self.goal_shrink,
            PaddleEffect::Powered => &mut self.powered,
        }
    }

    pub fn is_active(&self, effect: PaddleEffect) -> bool {
        self.timer(effect).active
    }
}

/// Which body of a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Main,
    Left,
    Right,
}

/// A hitting circle belonging to a paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// A paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    /// Displacement over the last step
    pub vel: Vec2,
    pub radius: f32,
    pub effects: PaddleEffects,
}

impl Paddle {
    pub fn new(side: Side, rink: &Rink) -> Self {
        Self {
            side,
            pos: Self::home_position(side, rink),
            vel: Vec2::ZERO,
            radius: PADDLE_RADIUS,
            effects: PaddleEffects::default(),
        }
    }

    /// Centre of the paddle's own half
    pub fn home_position(side: Side, rink: &Rink) -> Vec2 {
        let y = match side {
            Side::Player => rink.height * 0.25,
            Side::Ai => rink.height * 0.75,
        };
        Vec2::new(rink.width / 2.0, y)
    }

    /// Region the paddle is currently confined to
    pub fn half(&self) -> Half {
        if self.effects.midline_cross.active {
            Half::Full
        } else {
            self.side.home_half()
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.effects.frozen.active
    }

    pub fn has_speed_boost(&self) -> bool {
        self.effects.midline_cross.active
    }

    pub fn is_powered(&self) -> bool {
        self.effects.powered.active
    }

    /// Hitting bodies, main first, then left and right under multi-body
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies = vec![Body {
            kind: BodyKind::Main,
            pos: self.pos,
            radius: self.radius,
        }];
        if self.effects.multi_body.active {
            let offset = Vec2::new(self.radius * SIDE_BODY_OFFSET, 0.0);
            let radius = self.radius * SIDE_BODY_SCALE;
            bodies.push(Body {
                kind: BodyKind::Left,
                pos: self.pos - offset,
                radius,
            });
            bodies.push(Body {
                kind: BodyKind::Right,
                pos: self.pos + offset,
                radius,
            });
        }
        bodies
    }

    fn constrain(&mut self, rink: &Rink) {
        self.pos = rink.constrain(self.pos, self.radius, self.half());
    }

    /// Snap to the pointer, then constrain. Frozen paddles ignore input.
    pub fn update_player_input(&mut self, target: Vec2, rink: &Rink) {
        if self.is_frozen() {
            self.vel = Vec2::ZERO;
            return;
        }
        let old = self.pos;
        self.pos = rink.constrain(target, self.radius, self.half());
        self.vel = self.pos - old;
    }

    /// Let the AI controller drive this paddle for one step
    pub fn update_ai(&mut self, puck: &Puck, difficulty: Difficulty, rink: &Rink) -> AiDecision {
        let decision = ai::decide(puck, self, difficulty, rink);
        match decision {
            AiDecision::Hold => self.hold(),
            AiDecision::Move { target, speed, .. } => self.move_toward(target, speed, rink),
        }
        decision
    }

    /// Step toward `target` at `speed` units per step
    pub fn move_toward(&mut self, target: Vec2, speed: f32, rink: &Rink) {
        let delta = target - self.pos;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            self.vel = Vec2::ZERO;
            return;
        }
        self.vel = delta / distance * speed;
        self.pos += self.vel;
        self.constrain(rink);
    }

    pub fn hold(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Start (or refresh) an effect
    pub fn start_effect(&mut self, effect: PaddleEffect, duration: f32, rink: &Rink) {
        self.effects.timer_mut(effect).start(duration);
        match effect {
            PaddleEffect::SizeBoost => {
                self.radius = PADDLE_RADIUS * SIZE_BOOST_FACTOR;
                self.constrain(rink);
            }
            PaddleEffect::Frozen => self.vel = Vec2::ZERO,
            _ => {}
        }
    }

    /// Advance effect timers; returns the effects that ran out this step
    pub fn on_tick(&mut self, dt: f32, rink: &Rink) -> Vec<PaddleEffect> {
        let expired: Vec<PaddleEffect> = PaddleEffect::ALL
            .into_iter()
            .filter(|&effect| self.effects.timer_mut(effect).tick(dt))
            .collect();

        for &effect in &expired {
            self.revert(effect);
        }
        if !expired.is_empty() {
            self.constrain(rink);
        }
        expired
    }

    fn revert(&mut self, effect: PaddleEffect) {
        if effect == PaddleEffect::SizeBoost {
            self.radius = PADDLE_RADIUS;
        }
    }

    /// Drop every effect and restore baseline properties
    pub fn clear_effects(&mut self, rink: &Rink) {
        self.effects = PaddleEffects::default();
        self.radius = PADDLE_RADIUS;
        self.constrain(rink);
    }
}

/// Both paddles, addressed by [`Side`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddles {
    pub player: Paddle,
    pub ai: Paddle,
}

impl Paddles {
    pub fn new(rink: &Rink) -> Self {
        Self {
            player: Paddle::new(Side::Player, rink),
            ai: Paddle::new(Side::Ai, rink),
        }
    }

    pub fn get(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    /// `(side's paddle, opponent's paddle)`
    pub fn pair_mut(&mut self, side: Side) -> (&mut Paddle, &mut Paddle) {
        match side {
            Side::Player => (&mut self.player, &mut self.ai),
            Side::Ai => (&mut self.ai, &mut self.player),
        }
    }

    /// Fixed order: player first
    pub fn iter(&self) -> impl Iterator<Item = &Paddle> {
        [&self.player, &self.ai].into_iter()
    }
}
