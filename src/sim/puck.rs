//! Puck kinematics, boundary response and goal detection

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionResult, reflect_velocity};
use super::rink::{GoalMouths, Rink, Side};
use super::state::EffectTimer;
use crate::consts::*;

/// Status effects carried by the puck
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PuckEffects {
    /// Set while a paddle holds the speed power-up
    pub speed_boost: bool,
    /// Set while a freeze power-up holds a paddle frozen
    pub freeze_emitter: bool,
    /// Repulsor pull toward a goal
    pub attract: EffectTimer,
    /// Side that collected the repulsor; the puck is pulled toward its opponent's goal
    pub attract_owner: Option<Side>,
}

/// The puck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puck {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub effects: PuckEffects,
    /// Position at the previous stuck check
    last_pos: Vec2,
    /// Seconds the puck has barely moved
    stuck_timer: f32,
}

impl Puck {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: PUCK_RADIUS,
            effects: PuckEffects::default(),
            last_pos: pos,
            stuck_timer: 0.0,
        }
    }

    /// A puck at rink centre with a random serve velocity
    pub fn served<R: Rng + ?Sized>(rink: &Rink, rng: &mut R) -> Self {
        let mut puck = Self::new(rink.center(), Vec2::ZERO);
        puck.reset(rink, rng);
        puck
    }

    /// Re-centre with a random velocity in [-2, 2] on each axis
    ///
    /// Only kinematics are reset; effects run out on their own timers.
    pub fn reset<R: Rng + ?Sized>(&mut self, rink: &Rink, rng: &mut R) {
        self.pos = rink.center();
        self.vel = Vec2::new(
            rng.random_range(-PUCK_SERVE_SPEED..=PUCK_SERVE_SPEED),
            rng.random_range(-PUCK_SERVE_SPEED..=PUCK_SERVE_SPEED),
        );
        self.last_pos = self.pos;
        self.stuck_timer = 0.0;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one fixed step: integrate, decay, attract, clamp
    ///
    /// Velocities are in units per step, so there is no `dt` parameter; the
    /// host is expected to call this once per rendered frame.
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= FRICTION;

        if self.effects.attract.active {
            if let Some(owner) = self.effects.attract_owner {
                self.vel.y += owner.attack_direction() * ATTRACT_STRENGTH;
            }
        }

        let speed = self.vel.length();
        if speed < PUCK_STOP_SPEED {
            self.vel = Vec2::ZERO;
        } else if speed > PUCK_MAX_SPEED {
            self.vel *= PUCK_MAX_SPEED / speed;
        }
    }

    /// Advance the puck's own effect timers
    pub fn on_tick(&mut self, dt: f32) {
        if self.effects.attract.tick(dt) {
            self.effects.attract_owner = None;
        }
    }

    /// Start a repulsor pull owned by `owner`
    pub fn start_attraction(&mut self, owner: Side, duration: f32) {
        self.effects.attract.start(duration);
        self.effects.attract_owner = Some(owner);
    }

    /// Bounce off the rounded boundary
    ///
    /// A puck whose centre is in a corner region is handled against that
    /// corner's arc only; otherwise each straight edge is checked. Crossing a
    /// goal line inside the mouth is not a bounce.
    pub fn handle_boundary_collision(&mut self, rink: &Rink, mouths: &GoalMouths) -> CollisionResult {
        if let Some(corner) = rink.corner_at(self.pos) {
            let center = rink.corner_center(corner);
            let limit = rink.corner_radius - self.radius;
            let dist = self.pos.distance(center);
            if dist <= limit {
                return CollisionResult::miss();
            }

            let normal = rink.corner_normal(corner, self.pos);
            self.pos = center + normal * limit;
            // Resting or already heading back in: put back on the arc, no bounce
            let outward = self.vel.dot(normal) > 0.0;
            if outward {
                self.vel = reflect_velocity(self.vel, normal) * WALL_BOUNCE_DAMPING;
            }
            return CollisionResult {
                hit: outward,
                point: center + normal * rink.corner_radius,
                normal: -normal,
                penetration: dist - limit,
            };
        }

        let mut result = CollisionResult::miss();
        let r = self.radius;

        if self.pos.x - r < 0.0 {
            result = wall_hit(Vec2::new(0.0, self.pos.y), Vec2::X, r - self.pos.x);
            self.pos.x = r;
            self.vel.x = self.vel.x.abs() * WALL_BOUNCE_DAMPING;
        } else if self.pos.x + r > rink.width {
            result = wall_hit(Vec2::new(rink.width, self.pos.y), -Vec2::X, self.pos.x + r - rink.width);
            self.pos.x = rink.width - r;
            self.vel.x = -self.vel.x.abs() * WALL_BOUNCE_DAMPING;
        }

        if self.pos.y - r < 0.0 {
            if !rink.in_goal_span(self.pos.x, Side::Player, mouths) {
                result = wall_hit(Vec2::new(self.pos.x, 0.0), Vec2::Y, r - self.pos.y);
                self.pos.y = r;
                self.vel.y = self.vel.y.abs() * WALL_BOUNCE_DAMPING;
            }
        } else if self.pos.y + r > rink.height && !rink.in_goal_span(self.pos.x, Side::Ai, mouths) {
            result = wall_hit(Vec2::new(self.pos.x, rink.height), -Vec2::Y, self.pos.y + r - rink.height);
            self.pos.y = rink.height - r;
            self.vel.y = -self.vel.y.abs() * WALL_BOUNCE_DAMPING;
        }

        result
    }

    /// Side that scored, once the puck has fully crossed a goal line inside the mouth
    pub fn is_in_goal(&self, rink: &Rink, mouths: &GoalMouths) -> Option<Side> {
        if self.pos.y + self.radius <= rink.goal_line(Side::Player)
            && rink.in_goal_span(self.pos.x, Side::Player, mouths)
        {
            Some(Side::Ai)
        } else if self.pos.y - self.radius >= rink.goal_line(Side::Ai)
            && rink.in_goal_span(self.pos.x, Side::Ai, mouths)
        {
            Some(Side::Player)
        } else {
            None
        }
    }

    /// After a bounce: push a slow puck in a corner quadrant toward centre
    pub fn nudge_out_of_corner(&mut self, rink: &Rink) -> bool {
        let near_corner = (self.pos.x < rink.width * 0.25 || self.pos.x > rink.width * 0.75)
            && (self.pos.y < rink.height * 0.25 || self.pos.y > rink.height * 0.75);
        let slow = self.vel.x.abs() < 2.0 && self.vel.y.abs() < 2.0;
        if !(near_corner && slow) {
            return false;
        }
        self.vel += (rink.center() - self.pos).normalize_or_zero() * CORNER_ESCAPE_PUSH;
        true
    }

    /// Relaunch a puck crawling along a side wall toward centre
    pub fn escape_edge(&mut self, rink: &Rink) -> bool {
        let margin = self.radius + STUCK_DISTANCE;
        let hugging = self.pos.x <= margin || self.pos.x >= rink.width - margin;
        let crawling = self.vel.x.abs() < 1.0 && self.vel.y.abs() < 1.0;
        if !(hugging && crawling) {
            return false;
        }
        let to_center = (rink.center() - self.pos).normalize_or_zero();
        if to_center == Vec2::ZERO {
            return false;
        }
        self.vel = to_center * EDGE_ESCAPE_SPEED;
        true
    }

    /// Kick the puck if it has barely moved for too long
    pub fn check_stuck<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        let moved = self.pos.distance(self.last_pos);
        self.last_pos = self.pos;

        if moved >= STUCK_DISTANCE {
            self.stuck_timer = 0.0;
            return false;
        }

        self.stuck_timer += dt;
        if self.stuck_timer <= STUCK_TIME {
            return false;
        }
        self.vel += Vec2::new(
            rng.random_range(-STUCK_KICK..=STUCK_KICK),
            rng.random_range(-STUCK_KICK..=STUCK_KICK),
        );
        self.stuck_timer = 0.0;
        true
    }
}

fn wall_hit(point: Vec2, normal: Vec2, penetration: f32) -> CollisionResult {
    CollisionResult {
        hit: true,
        point,
        normal,
        penetration,
    }
}
