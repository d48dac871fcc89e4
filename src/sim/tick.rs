//! Per-frame match step
//!
//! Core game loop. The host calls [`tick`] once per rendered frame; the order
//! of work inside a frame is fixed:
//!
//! 1. effect timers
//! 2. player input (pointer, autopilot or hold)
//! 3. AI paddle
//! 4. puck motion
//! 5. puck vs boundary, then anti-stuck checks
//! 6. paddle hits, player first
//! 7. goals and the time limit
//! 8. power-ups

use glam::Vec2;
use log::{debug, info};

use super::collision::resolve_paddle_puck;
use super::powerup::PowerUpOutcome;
use super::rink::Side;
use super::state::{GameEvent, GamePhase, GameState, SoundCue, Tint, Winner};
use crate::settings::GameMode;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position in rink coordinates, if the pointer is over the rink
    pub pointer: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI drives the player paddle when there is no pointer
    pub autopilot: bool,
}

/// Advance the match by one frame of `dt` seconds
///
/// `state.events` is replaced with what happened during this frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                debug!("Paused at {:.1}s", state.elapsed);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                debug!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    advance_effects(state, dt);
    move_paddles(state, input);
    state.puck.update();
    resolve_boundary(state, dt);
    resolve_paddle_hits(state);

    if check_goal(state) || check_time_limit(state) {
        return;
    }

    if state.settings.power_ups_enabled {
        advance_power_ups(state, dt);
    }
}

fn advance_effects(state: &mut GameState, dt: f32) {
    let rink = state.rink;
    for side in Side::ALL {
        for effect in state.paddles.get_mut(side).on_tick(dt, &rink) {
            debug!("{} paddle effect expired: {:?}", side.as_str(), effect);
        }
    }
    state.puck.on_tick(dt);

    // Puck flags last exactly as long as the paddle effects behind them
    state.puck.effects.speed_boost = state.paddles.iter().any(|p| p.has_speed_boost());
    state.puck.effects.freeze_emitter = state.paddles.iter().any(|p| p.is_frozen());
}

fn move_paddles(state: &mut GameState, input: &TickInput) {
    let rink = state.rink;
    let difficulty = state.settings.ai_difficulty;

    match input.pointer {
        Some(pointer) => state.paddles.player.update_player_input(pointer, &rink),
        None if input.autopilot => {
            state.paddles.player.update_ai(&state.puck, difficulty, &rink);
        }
        None => state.paddles.player.hold(),
    }

    state.paddles.ai.update_ai(&state.puck, difficulty, &rink);
}

fn resolve_boundary(state: &mut GameState, dt: f32) {
    let rink = state.rink;
    let mouths = state.goal_mouths();

    let result = state.puck.handle_boundary_collision(&rink, &mouths);
    if result.hit {
        state.emit(GameEvent::Collision {
            point: result.point,
            tint: Tint::White,
        });
        state.emit(GameEvent::Sound(SoundCue::WallHit));

        if state.puck.nudge_out_of_corner(&rink) {
            debug!("Corner nudge at ({:.0}, {:.0})", state.puck.pos.x, state.puck.pos.y);
            emit_kick(state);
        }
    }

    if state.puck.escape_edge(&rink) {
        debug!("Edge escape at ({:.0}, {:.0})", state.puck.pos.x, state.puck.pos.y);
        emit_kick(state);
    }

    if state.puck.check_stuck(dt, &mut state.rng) {
        debug!("Stuck puck kicked at ({:.0}, {:.0})", state.puck.pos.x, state.puck.pos.y);
        emit_kick(state);
    }
}

fn emit_kick(state: &mut GameState) {
    let point = state.puck.pos;
    state.emit(GameEvent::Collision {
        point,
        tint: Tint::Yellow,
    });
}

fn resolve_paddle_hits(state: &mut GameState) {
    for side in Side::ALL {
        if let Some(hit) = resolve_paddle_puck(state.paddles.get(side), &mut state.puck) {
            state.emit(GameEvent::Collision {
                point: hit.point,
                tint: Tint::White,
            });
            state.emit(GameEvent::Sound(SoundCue::PaddleHit));
        }
    }
}

/// Score a goal if there is one; returns true when the match ended
fn check_goal(state: &mut GameState) -> bool {
    let mouths = state.goal_mouths();
    let Some(scorer) = state.puck.is_in_goal(&state.rink, &mouths) else {
        return false;
    };

    state.score.increment(scorer);
    info!(
        "Goal: {} ({} - {})",
        scorer.as_str(),
        state.score.player,
        state.score.ai
    );
    state.emit(GameEvent::GoalScored { by: scorer });
    state.emit(GameEvent::Sound(SoundCue::Goal));

    let rink = state.rink;
    state.puck.reset(&rink, &mut state.rng);

    if state.settings.game_mode == GameMode::Score {
        if let Some(winner) = state.score.reached(state.settings.max_score) {
            state.finish(Winner::from(winner));
            return true;
        }
    }
    false
}

/// End a timed match once the clock runs out; returns true when it ended
fn check_time_limit(state: &mut GameState) -> bool {
    if state.settings.game_mode != GameMode::Time || state.elapsed < state.settings.time_limit_secs() {
        return false;
    }
    let winner = state.score.leader();
    state.finish(winner);
    true
}

fn advance_power_ups(state: &mut GameState, dt: f32) {
    let frequency = state.settings.power_up_frequency;
    let outcomes = state.power_ups.update(
        dt,
        frequency,
        &state.rink,
        &mut state.paddles,
        &mut state.puck,
        &mut state.rng,
    );

    for outcome in outcomes {
        match outcome {
            PowerUpOutcome::Spawned { id, kind, pos } => {
                state.emit(GameEvent::PowerUpSpawned { id, kind, pos });
            }
            PowerUpOutcome::Collected { id, kind, by } => {
                let point = state.paddles.get(by).pos;
                state.emit(GameEvent::PowerUpCollected { id, kind, by });
                state.emit(GameEvent::Collision {
                    point,
                    tint: Tint::PowerUp(kind),
                });
                state.emit(GameEvent::Sound(SoundCue::PowerUp));
            }
            PowerUpOutcome::Expired { id, kind } => {
                state.emit(GameEvent::PowerUpExpired { id, kind });
            }
        }
    }
}
