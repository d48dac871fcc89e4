//! Rink Hockey - physics and rules core for a two-paddle air hockey game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (rink geometry, puck, paddles, AI, power-ups)
//! - `settings`: Host-supplied match configuration
//!
//! Rendering, audio, menus and input plumbing live in the host. The core only
//! consumes a pointer position and a frame delta, and reports what happened
//! through [`sim::GameEvent`]s.

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, GameMode, PowerUpFrequency, Settings, SettingsError};

/// Game tuning constants
///
/// Velocities are in rink units per simulation step. The physics is tuned for
/// one step per rendered frame and is deliberately not scaled by `dt`.
pub mod consts {
    /// Rink dimensions
    pub const RINK_WIDTH: f32 = 450.0;
    pub const RINK_HEIGHT: f32 = 680.0;
    pub const CORNER_RADIUS: f32 = 70.0;

    /// Goal mouth on each short edge
    pub const GOAL_WIDTH: f32 = 170.0;
    pub const GOAL_HEIGHT: f32 = 10.0;
    /// Goal width multiplier while a goal-shrink effect is active
    pub const GOAL_SHRINK_FACTOR: f32 = 0.5;

    /// Puck
    pub const PUCK_RADIUS: f32 = 20.0;
    pub const PUCK_MAX_SPEED: f32 = 20.0;
    /// Below this speed the puck comes to rest
    pub const PUCK_STOP_SPEED: f32 = 0.1;
    /// Per-step velocity decay
    pub const FRICTION: f32 = 0.99;
    /// Speed retained after a wall or corner bounce
    pub const WALL_BOUNCE_DAMPING: f32 = 0.8;
    /// Serve velocity range on each axis
    pub const PUCK_SERVE_SPEED: f32 = 2.0;
    /// Pull toward a goal while a repulsor effect is active
    pub const ATTRACT_STRENGTH: f32 = 0.3;

    /// Paddle
    pub const PADDLE_RADIUS: f32 = 30.0;
    pub const SIZE_BOOST_FACTOR: f32 = 1.5;
    /// Multi-body side paddles: lateral offset and radius, relative to the main body
    pub const SIDE_BODY_OFFSET: f32 = 1.8;
    pub const SIDE_BODY_SCALE: f32 = 0.6;

    /// Paddle hits
    pub const MIN_HIT_SPEED: f32 = 5.0;
    pub const HIT_RESTITUTION: f32 = 1.2;
    pub const MOMENTUM_TRANSFER: f32 = 0.5;
    pub const BOOSTED_MOMENTUM_TRANSFER: f32 = 0.8;
    pub const BOOSTED_HIT_MULTIPLIER: f32 = 1.5;

    /// AI
    pub const AI_SPEED_LOW: f32 = 5.0;
    pub const AI_SPEED_MEDIUM: f32 = 8.0;
    pub const AI_SPEED_HIGH: f32 = 10.0;
    pub const AI_AGGRESSION: f32 = 0.7;
    /// Defensive anchor depth as a fraction of the rink height
    pub const AI_DEFENSE_POSITION: f32 = 0.75;
    pub const AI_CORNER_SPEED_MULTIPLIER: f32 = 1.5;
    pub const AI_BOOST_MULTIPLIER: f32 = 1.5;

    /// Power-ups
    pub const POWER_UP_RADIUS: f32 = 15.0;
    pub const POWER_UP_LIFETIME: f32 = 10.0;
    /// Margin kept between a spawned power-up and the side walls
    pub const POWER_UP_SPAWN_MARGIN: f32 = 20.0;
    pub const EFFECT_DURATION: f32 = 5.0;
    pub const FREEZE_DURATION: f32 = 3.0;

    /// Anti-stuck
    pub const STUCK_DISTANCE: f32 = 5.0;
    pub const STUCK_TIME: f32 = 2.0;
    pub const STUCK_KICK: f32 = 3.0;
    pub const CORNER_ESCAPE_PUSH: f32 = 3.0;
    pub const EDGE_ESCAPE_SPEED: f32 = 5.0;
}
