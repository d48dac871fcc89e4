//! Match state and the events reported to the host
//!
//! `GameState` exclusively owns both paddles, the puck and the power-ups.
//! Cross references (opponent paddle, attraction owner) are expressed with
//! [`Side`] and resolved through this struct.

use glam::Vec2;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::paddle::Paddles;
use super::powerup::{PowerUpKind, PowerUpManager};
use super::puck::Puck;
use super::rink::{GoalMouths, Rink, Side};
use crate::settings::{GameMode, Settings};

/// Remaining time below this counts as elapsed (absorbs f32 drift from summed dt)
const TIMER_EPSILON: f32 = 1e-4;

/// A countdown attached to a paddle or puck effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTimer {
    pub active: bool,
    /// Seconds left while active
    pub remaining: f32,
}

impl EffectTimer {
    /// Activate (or refresh) for `duration` seconds
    pub fn start(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }

    /// Advance by `dt`; returns true only on the tick the effect runs out
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= TIMER_EPSILON {
            self.clear();
            return true;
        }
        false
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Terminal; only `restart` leaves it
    GameOver,
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Ai,
    Tie,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Ai => Winner::Ai,
        }
    }
}

/// Named sound cues; the host decides what they sound like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    WallHit,
    PaddleHit,
    Goal,
    PowerUp,
    /// Menu navigation; raised by the host UI, never by the simulation
    MenuSelect,
}

/// Particle colour hint for collision effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Wall, corner and paddle hits
    White,
    /// Anti-stuck kicks
    Yellow,
    PowerUp(PowerUpKind),
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Collision { point: Vec2, tint: Tint },
    Sound(SoundCue),
    GoalScored { by: Side },
    MatchOver { winner: Winner },
    PowerUpSpawned { id: u32, kind: PowerUpKind, pos: Vec2 },
    PowerUpCollected { id: u32, kind: PowerUpKind, by: Side },
    PowerUpExpired { id: u32, kind: PowerUpKind },
}

/// Goals scored by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Ai => self.ai += 1,
        }
    }

    /// Side that reached `max_score`, if any
    pub fn reached(&self, max_score: u32) -> Option<Side> {
        if self.player >= max_score {
            Some(Side::Player)
        } else if self.ai >= max_score {
            Some(Side::Ai)
        } else {
            None
        }
    }

    /// Current leader, or a tie
    pub fn leader(&self) -> Winner {
        match self.player.cmp(&self.ai) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Ai,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the match RNG was created from
    pub seed: u64,
    pub settings: Settings,
    pub rink: Rink,
    pub puck: Puck,
    pub paddles: Paddles,
    pub power_ups: PowerUpManager,
    pub score: Score,
    /// Seconds of play (paused time excluded)
    pub elapsed: f32,
    /// Simulation steps taken while playing
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub winner: Option<Winner>,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a match. `settings` must already be validated by the host.
    pub fn new(seed: u64, settings: Settings) -> Self {
        let rink = Rink::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let puck = Puck::served(&rink, &mut rng);

        info!(
            "Match start: seed={} difficulty={} mode={:?} power_ups={}",
            seed,
            settings.ai_difficulty.as_str(),
            settings.game_mode,
            settings.power_ups_enabled
        );

        Self {
            seed,
            settings,
            rink,
            puck,
            paddles: Paddles::new(&rink),
            power_ups: PowerUpManager::new(),
            score: Score::default(),
            elapsed: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            winner: None,
            events: Vec::new(),
            rng,
        }
    }

    /// Reset scores, clock, effects and power-ups, and serve a fresh puck
    pub fn restart(&mut self) {
        self.puck = Puck::served(&self.rink, &mut self.rng);
        self.paddles = Paddles::new(&self.rink);
        self.power_ups.clear();
        self.score = Score::default();
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.winner = None;
        self.events.clear();
        info!("Match restarted");
    }

    /// Goal mouths after goal-shrink effects
    pub fn goal_mouths(&self) -> GoalMouths {
        GoalMouths::with_shrink(
            self.paddles.player.effects.goal_shrink.active,
            self.paddles.ai.effects.goal_shrink.active,
        )
    }

    /// Seconds left in a timed match
    pub fn time_remaining(&self) -> Option<f32> {
        match self.settings.game_mode {
            GameMode::Time => Some((self.settings.time_limit_secs() - self.elapsed).max(0.0)),
            GameMode::Score => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn finish(&mut self, winner: Winner) {
        self.phase = GamePhase::GameOver;
        self.winner = Some(winner);
        info!(
            "Match over: {:?} ({} - {}) after {:.1}s",
            winner, self.score.player, self.score.ai, self.elapsed
        );
        self.emit(GameEvent::MatchOver { winner });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_timer_expires_once() {
        let mut timer = EffectTimer::default();
        timer.start(0.5);
        assert!(!timer.tick(0.25));
        assert!(timer.active);
        assert!(timer.tick(0.25));
        assert!(!timer.active);
        assert_eq!(timer.remaining, 0.0);
        // Further ticks are no-ops
        assert!(!timer.tick(0.25));
        assert!(!timer.active);
    }

    #[test]
    fn test_effect_timer_absorbs_summed_dt() {
        let mut timer = EffectTimer::default();
        timer.start(3.0);
        let mut expired_at = None;
        for i in 0..200 {
            if timer.tick(1.0 / 60.0) {
                expired_at = Some(i + 1);
                break;
            }
        }
        assert_eq!(expired_at, Some(180));
    }

    #[test]
    fn test_score_reached_and_leader() {
        let mut score = Score::default();
        assert_eq!(score.leader(), Winner::Tie);
        score.increment(Side::Ai);
        assert_eq!(score.leader(), Winner::Ai);
        assert_eq!(score.reached(1), Some(Side::Ai));
        assert_eq!(score.reached(2), None);
        score.increment(Side::Player);
        score.increment(Side::Player);
        assert_eq!(score.get(Side::Player), 2);
        assert_eq!(score.leader(), Winner::Player);
    }

    #[test]
    fn test_new_match_defaults() {
        let state = GameState::new(7, Settings::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.puck.pos, state.rink.center());
        assert!(state.time_remaining().is_none());
        assert_eq!(state.goal_mouths(), GoalMouths::default());
    }

    #[test]
    fn test_restart_clears_match() {
        let mut state = GameState::new(7, Settings::default());
        state.score.increment(Side::Player);
        state.elapsed = 42.0;
        state.paddles.ai.effects.goal_shrink.start(5.0);
        state.finish(Winner::Player);
        assert!(state.is_over());

        state.restart();
        assert!(!state.is_over());
        assert_eq!(state.score, Score::default());
        assert_eq!(state.elapsed, 0.0);
        assert!(state.winner.is_none());
        assert_eq!(state.goal_mouths(), GoalMouths::default());
    }
}
