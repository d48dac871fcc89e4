//! Collision response shared by the puck and paddles
//!
//! Boundary contacts are reported as [`CollisionResult`]s by the puck itself;
//! this module holds the circle-circle response between a paddle (including
//! its side bodies) and the puck.

use glam::Vec2;

use super::paddle::{BodyKind, Paddle};
use super::puck::Puck;
use crate::consts::*;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the surface (if hit)
    pub point: Vec2,
    /// Surface normal at contact, pointing back into the rink
    pub normal: Vec2,
    /// How far past the surface the puck had travelled
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// A resolved paddle hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    /// Which body of the paddle struck the puck
    pub body: BodyKind,
    /// Contact point on the puck's rim
    pub point: Vec2,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Resolve at most one hit between `paddle` and the puck
///
/// Bodies are tested main, left, right; the first overlap wins. The puck is
/// pushed out to touching distance and relaunched along the contact normal
/// with at least `MIN_HIT_SPEED`, plus part of the paddle's own motion.
pub fn resolve_paddle_puck(paddle: &Paddle, puck: &mut Puck) -> Option<PaddleHit> {
    let body = paddle
        .bodies()
        .into_iter()
        .find(|b| circles_overlap(b.pos, b.radius, puck.pos, puck.radius))?;

    let offset = puck.pos - body.pos;
    let dist = offset.length();
    let normal = if dist > 0.0 {
        offset / dist
    } else {
        // Concentric: push toward the opponent's goal
        Vec2::new(0.0, paddle.side.attack_direction())
    };
    puck.pos = body.pos + normal * (body.radius + puck.radius);

    let mut speed = puck.speed().max(MIN_HIT_SPEED);
    let transfer = if paddle.has_speed_boost() && puck.effects.speed_boost {
        speed *= BOOSTED_HIT_MULTIPLIER;
        BOOSTED_MOMENTUM_TRANSFER
    } else {
        MOMENTUM_TRANSFER
    };
    puck.vel = normal * speed * HIT_RESTITUTION + paddle.vel * transfer;

    Some(PaddleHit {
        body: body.kind,
        point: puck.pos - normal * puck.radius,
    })
}
