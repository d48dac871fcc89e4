//! AI paddle controller
//!
//! A pure function of the puck, the paddle and the difficulty tier. Rules are
//! evaluated in priority order every step:
//!
//! 1. Frozen: hold still.
//! 2. Puck in a corner on our side: go and dig it out, fast.
//! 3. Pursuit: sit on the defense line, slide to where an incoming puck will
//!    cross it, and attack the puck directly once it is in our half.
//!
//! Everything is expressed relative to the paddle's own goal, so the same
//! controller drives the human paddle in autopilot.

use glam::Vec2;

use super::paddle::Paddle;
use super::puck::Puck;
use super::rink::{Rink, Side};
use crate::consts::*;
use crate::settings::Difficulty;

/// Which rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    CornerRetrieval,
    /// Waiting on the defensive anchor
    Defend,
    /// Sliding to the predicted crossing point
    Intercept,
    /// Going for the puck
    Attack,
}

/// What the paddle should do this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiDecision {
    Hold,
    Move { target: Vec2, speed: f32, mode: AiMode },
}

/// How far `y` lies toward `side`'s goal, 0 at the far goal line and 1 at its own
pub fn depth(y: f32, side: Side, rink: &Rink) -> f32 {
    let t = y / rink.height;
    match side {
        Side::Player => 1.0 - t,
        Side::Ai => t,
    }
}

/// y of the defensive anchor for `side`
pub fn defense_line(side: Side, rink: &Rink) -> f32 {
    match side {
        Side::Player => rink.height * (1.0 - AI_DEFENSE_POSITION),
        Side::Ai => rink.height * AI_DEFENSE_POSITION,
    }
}

fn puck_in_own_corner(puck: &Puck, side: Side, rink: &Rink) -> bool {
    let near_side_wall =
        puck.pos.x < PADDLE_RADIUS * 2.0 || puck.pos.x > rink.width - PADDLE_RADIUS * 2.0;
    near_side_wall && depth(puck.pos.y, side, rink) > 0.5
}

/// Decide where the paddle goes this step
pub fn decide(puck: &Puck, paddle: &Paddle, difficulty: Difficulty, rink: &Rink) -> AiDecision {
    if paddle.is_frozen() {
        return AiDecision::Hold;
    }

    let side = paddle.side;
    let attack = side.attack_direction();
    let base_speed = difficulty.base_speed();

    if puck_in_own_corner(puck, side, rink) {
        // Approach from the centre side so the hit sends it back out
        let offset = (paddle.radius + puck.radius + 5.0) * 0.5;
        let x = if puck.pos.x < rink.width / 2.0 {
            puck.pos.x + offset
        } else {
            puck.pos.x - offset
        };
        return AiDecision::Move {
            target: Vec2::new(x, puck.pos.y + attack * 5.0),
            speed: base_speed * AI_CORNER_SPEED_MULTIPLIER,
            mode: AiMode::CornerRetrieval,
        };
    }

    let defense_y = defense_line(side, rink);
    let mut target = Vec2::new(rink.width / 2.0, defense_y);
    let mut mode = AiMode::Defend;

    let incoming = puck.vel.y * side.goal_direction() > 0.0;
    if incoming && puck.vel.y.abs() > 1.0 {
        let steps = (defense_y - puck.pos.y) / puck.vel.y;
        target.x = (puck.pos.x + puck.vel.x * steps).clamp(paddle.radius, rink.width - paddle.radius);
        mode = AiMode::Intercept;
    }

    if depth(puck.pos.y, side, rink) > 0.5 || paddle.has_speed_boost() {
        mode = AiMode::Attack;
        target = if depth(puck.pos.y, side, rink) > AI_DEFENSE_POSITION {
            puck.pos + puck.vel * AI_AGGRESSION
        } else {
            Vec2::new(puck.pos.x, puck.pos.y + attack * paddle.radius)
        };
    }

    let boost = if paddle.has_speed_boost() && puck.effects.speed_boost {
        AI_BOOST_MULTIPLIER
    } else {
        1.0
    };

    AiDecision::Move {
        target,
        speed: base_speed * boost,
        mode,
    }
}
