//! Match simulation
//!
//! All gameplay logic lives here. This module is pure:
//! - One step per rendered frame; velocities are per step
//! - Seeded RNG only
//! - Fixed processing order (player before AI, live power-ups in spawn order)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod paddle;
pub mod powerup;
pub mod puck;
pub mod rink;
pub mod state;
pub mod tick;

pub use ai::{AiDecision, AiMode};
pub use collision::{CollisionResult, PaddleHit, reflect_velocity, resolve_paddle_puck};
pub use paddle::{Body, BodyKind, Paddle, PaddleEffect, PaddleEffects, Paddles};
pub use powerup::{PowerUp, PowerUpKind, PowerUpManager, PowerUpOutcome, apply_power_up};
pub use puck::{Puck, PuckEffects};
pub use rink::{Corner, GoalMouths, Half, PointClass, Rink, Side};
pub use state::{EffectTimer, GameEvent, GamePhase, GameState, Score, SoundCue, Tint, Winner};
pub use tick::{TickInput, tick};
