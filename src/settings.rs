//! Match settings supplied by the host
//!
//! The host owns menus and persistence; it hands a validated `Settings` to the
//! simulation. Tier indices coming from a menu are checked here, so the core
//! never sees an out-of-range difficulty or frequency.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid AI difficulty tier: {0} (expected 0-2)")]
    InvalidDifficulty(u8),

    #[error("Invalid power-up frequency tier: {0} (expected 0-2)")]
    InvalidFrequency(u8),

    #[error("Invalid game mode: {0} (expected 0 or 1)")]
    InvalidGameMode(u8),

    #[error("Max score must be at least 1")]
    ZeroMaxScore,

    #[error("Time limit must be at least 1 minute")]
    ZeroTimeLimit,

    #[error("Malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Low,
    #[default]
    Medium,
    High,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::High => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "low" => Some(Difficulty::Low),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" | "high" => Some(Difficulty::High),
            _ => None,
        }
    }

    pub fn from_index(index: u8) -> Result<Self, SettingsError> {
        match index {
            0 => Ok(Difficulty::Low),
            1 => Ok(Difficulty::Medium),
            2 => Ok(Difficulty::High),
            other => Err(SettingsError::InvalidDifficulty(other)),
        }
    }

    /// AI paddle speed in units per step
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Low => AI_SPEED_LOW,
            Difficulty::Medium => AI_SPEED_MEDIUM,
            Difficulty::High => AI_SPEED_HIGH,
        }
    }
}

/// How often power-ups appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerUpFrequency {
    Low,
    #[default]
    Medium,
    High,
}

impl PowerUpFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpFrequency::Low => "Low",
            PowerUpFrequency::Medium => "Medium",
            PowerUpFrequency::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(PowerUpFrequency::Low),
            "medium" | "med" => Some(PowerUpFrequency::Medium),
            "high" => Some(PowerUpFrequency::High),
            _ => None,
        }
    }

    pub fn from_index(index: u8) -> Result<Self, SettingsError> {
        match index {
            0 => Ok(PowerUpFrequency::Low),
            1 => Ok(PowerUpFrequency::Medium),
            2 => Ok(PowerUpFrequency::High),
            other => Err(SettingsError::InvalidFrequency(other)),
        }
    }

    /// Seconds between spawns
    pub fn spawn_interval(&self) -> f32 {
        match self {
            PowerUpFrequency::Low => 15.0,
            PowerUpFrequency::Medium => 10.0,
            PowerUpFrequency::High => 6.0,
        }
    }

    /// Maximum power-ups on the rink at once
    pub fn max_live(&self) -> usize {
        match self {
            PowerUpFrequency::Low => 1,
            PowerUpFrequency::Medium => 2,
            PowerUpFrequency::High => 3,
        }
    }
}

/// How a match ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// First to `max_score`
    #[default]
    Score,
    /// Highest score when `time_limit_minutes` runs out
    Time,
}

impl GameMode {
    pub fn from_index(index: u8) -> Result<Self, SettingsError> {
        match index {
            0 => Ok(GameMode::Score),
            1 => Ok(GameMode::Time),
            other => Err(SettingsError::InvalidGameMode(other)),
        }
    }
}

/// Match settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ai_difficulty: Difficulty,

    // === Match rules ===
    pub max_score: u32,
    pub game_mode: GameMode,
    pub time_limit_minutes: u32,

    // === Power-ups ===
    pub power_ups_enabled: bool,
    pub power_up_frequency: PowerUpFrequency,

    // === Cosmetic (ignored by the simulation) ===
    pub player_color: String,
    pub ai_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai_difficulty: Difficulty::Medium,

            max_score: 7,
            game_mode: GameMode::Score,
            time_limit_minutes: 3,

            power_ups_enabled: true,
            power_up_frequency: PowerUpFrequency::Medium,

            player_color: "Blue".to_string(),
            ai_color: "Red".to_string(),
        }
    }
}

impl Settings {
    /// Check rule values the type system can't rule out
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_score == 0 {
            return Err(SettingsError::ZeroMaxScore);
        }
        if self.time_limit_minutes == 0 {
            return Err(SettingsError::ZeroTimeLimit);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Time limit in seconds
    pub fn time_limit_secs(&self) -> f32 {
        self.time_limit_minutes as f32 * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.ai_difficulty, Difficulty::Medium);
        assert_eq!(settings.time_limit_secs(), 180.0);
    }

    #[test]
    fn test_tier_indices() {
        assert_eq!(Difficulty::from_index(0).unwrap(), Difficulty::Low);
        assert_eq!(Difficulty::from_index(2).unwrap(), Difficulty::High);
        assert!(matches!(
            Difficulty::from_index(3),
            Err(SettingsError::InvalidDifficulty(3))
        ));
        assert!(matches!(
            PowerUpFrequency::from_index(7),
            Err(SettingsError::InvalidFrequency(7))
        ));
        assert_eq!(GameMode::from_index(1).unwrap(), GameMode::Time);
    }

    #[test]
    fn test_difficulty_speeds_increase() {
        assert!(Difficulty::Low.base_speed() < Difficulty::Medium.base_speed());
        assert!(Difficulty::Medium.base_speed() < Difficulty::High.base_speed());
    }

    #[test]
    fn test_frequency_table() {
        assert!(PowerUpFrequency::High.spawn_interval() < PowerUpFrequency::Low.spawn_interval());
        assert!(PowerUpFrequency::High.max_live() > PowerUpFrequency::Low.max_live());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::High));
        assert_eq!(PowerUpFrequency::from_str("med"), Some(PowerUpFrequency::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let settings = Settings::from_json(r#"{ "max_score": 10, "game_mode": "Time" }"#).unwrap();
        assert_eq!(settings.max_score, 10);
        assert_eq!(settings.game_mode, GameMode::Time);
        assert!(settings.power_ups_enabled);
    }

    #[test]
    fn test_json_rejects_zero_limits() {
        assert!(matches!(
            Settings::from_json(r#"{ "max_score": 0 }"#),
            Err(SettingsError::ZeroMaxScore)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "time_limit_minutes": 0 }"#),
            Err(SettingsError::ZeroTimeLimit)
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_colors() {
        let mut settings = Settings::default();
        settings.player_color = "Cyan".to_string();
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.player_color, "Cyan");
    }
}
