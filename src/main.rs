//! Bounce headless runner
//!
//! Usage: `bounce [settings.json] [ticks]`
//!
//! Builds an arena from the settings file (defaults when omitted), runs it
//! for a fixed number of ticks, and prints a one-line summary.

#[cfg(not(target_arch = "wasm32"))]
use bounce::{ArenaSettings, ConfigError};

/// Ten simulated seconds at the default tick rate
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 1000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bounce (native) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("bounce: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> bounce::Result<()> {
    use bounce::sim::{Arena, TickInput, tick};

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => ArenaSettings::load(path)?,
        None => ArenaSettings::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidSetting {
            field: "ticks",
            reason: format!("{raw:?}: {e}"),
        })?,
        None => DEFAULT_TICKS,
    };

    let mut arena = Arena::new(&settings)?;
    let dt = settings.dt();
    let input = TickInput::default();
    let per_second = u64::from(settings.tick_rate);

    for _ in 0..ticks {
        tick(&mut arena, &input, dt);
        if arena.time_ticks % per_second == 0 {
            log::info!(
                "t={}s collisions={} speed={:.1}",
                arena.time_ticks / per_second,
                arena.collision_count(),
                arena.total_speed()
            );
        }
    }

    println!(
        "{} ticks, {} bodies, {} collisions, total circle speed {:.1}",
        arena.time_ticks,
        arena.body_count(),
        arena.collision_count(),
        arena.total_speed()
    );
    Ok(())
}
