//! Rink Hockey headless demo
//!
//! Plays one autopilot match (AI against AI) and prints what happened.
//!
//! Usage: `rink-hockey [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rink_hockey::Settings;
    use rink_hockey::sim::{GameEvent, GameState, TickInput, tick};

    const DT: f32 = 1.0 / 60.0;
    // Ten minutes of play
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Rink Hockey (native demo) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => load_settings(&path),
        None => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed ({}), using 0", e);
            0
        }
        None => 0,
    };

    let mut state = GameState::new(seed, settings);
    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    while !state.is_over() && state.time_ticks < MAX_FRAMES {
        tick(&mut state, &input, DT);
        for event in &state.events {
            match event {
                GameEvent::GoalScored { by } => println!(
                    "[{:6.1}s] Goal by {} ({} - {})",
                    state.elapsed,
                    by.as_str(),
                    state.score.player,
                    state.score.ai
                ),
                GameEvent::PowerUpCollected { kind, by, .. } => println!(
                    "[{:6.1}s] {} picked up {}",
                    state.elapsed,
                    by.as_str(),
                    kind.as_str()
                ),
                _ => {}
            }
        }
    }

    match state.winner {
        Some(winner) => println!(
            "Final: {:?} wins {} - {} after {:.1}s",
            winner, state.score.player, state.score.ai, state.elapsed
        ),
        None => println!(
            "No result after {:.1}s ({} - {})",
            state.elapsed, state.score.player, state.score.ai
        ),
    }
}

/// Read settings from a JSON file, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> rink_hockey::Settings {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| rink_hockey::Settings::from_json(&json).map_err(|e| e.to_string()));

    match loaded {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path);
            settings
        }
        Err(e) => {
            log::warn!("Failed to load settings from {}: {}, using defaults", path, e);
            rink_hockey::Settings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host; there is no standalone web entry point
}
