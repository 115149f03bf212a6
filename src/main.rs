//! Sky Command headless runner
//!
//! Plays matches at a fixed baseline frame rate, driven by the autopilot or
//! by idle input, and prints the final status as JSON.
//!
//! Usage: `sky-command [settings.json] [--quality low|medium|high]`

use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use sky_command::consts::BASE_FRAME_MS;
use sky_command::demo::autopilot;
use sky_command::sim::{GameState, TickInput, WaveEvent, frame_dt, tick};
use sky_command::{QualityPreset, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Command (headless) starting...");

    let result = load_settings()
        .map_err(Into::into)
        .and_then(|settings| run(&settings));
    if let Err(e) = result {
        log::error!("Run failed: {}", e);
        std::process::exit(1);
    }
}

/// Settings file (optional) plus command-line overrides
fn load_settings() -> Result<Settings, String> {
    let mut path = None;
    let mut quality = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--quality" => {
                let value = args.next().ok_or("--quality needs a value")?;
                let preset = QualityPreset::parse(&value)
                    .ok_or_else(|| format!("unknown quality preset: {}", value))?;
                quality = Some(preset);
            }
            _ => path = Some(arg),
        }
    }

    let mut settings = match (path, quality) {
        (Some(path), _) => Settings::load_or_default(path),
        (None, Some(preset)) => Settings::from_preset(preset),
        (None, None) => Settings::default(),
    };
    if let Some(preset) = quality {
        settings.quality = preset;
    }
    Ok(settings)
}

/// Seed from the wall clock when none is configured
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
    log::info!(
        "Quality {} ({} particles max)",
        settings.quality.as_str(),
        settings.max_particles()
    );
    log::debug!("Settings: {}", settings.to_json()?);

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::with_config(seed, &settings.match_config());
    let dt = frame_dt(BASE_FRAME_MS);
    let mut matches = 1u32;
    let mut waves_cleared = 0u32;
    let mut best_score = 0u64;

    for frame in 0..settings.frames {
        let input = if settings.autopilot {
            autopilot(&state)
        } else {
            TickInput::default()
        };
        if let Some(WaveEvent::Cleared { .. }) = tick(&mut state, &input, dt) {
            waves_cleared += 1;
        }

        if frame % 600 == 0 {
            let status = state.status();
            log::debug!(
                "frame {}: wave {} score {} health {:.0} bots {}",
                frame,
                status.wave,
                status.score,
                status.health,
                state.bots.len()
            );
        }

        if state.game_over {
            best_score = best_score.max(state.score);
            state.reset();
            matches += 1;
        }
    }

    best_score = best_score.max(state.score);
    log::info!(
        "Ran {} frames over {} match(es): {} wave(s) cleared, best score {}",
        settings.frames,
        matches,
        waves_cleared,
        best_score
    );
    println!("{}", serde_json::to_string_pretty(&state.status())?);
    Ok(())
}
