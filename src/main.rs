//! Pumpkin Drop entry point
//!
//! Native builds run a headless demo: drop a handful of pumpkins, tick until
//! they settle and print the final snapshot as JSON. An optional first argument
//! names a JSON settings file.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use pumpkin_drop::sim::SimEvent;
    use pumpkin_drop::{Settings, SettingsError, SimState, Ticker};

    /// Demo clicks as fractions of the viewport width
    const CLICKS: [f32; 6] = [0.15, 0.5, 0.52, 0.3, 0.85, 0.5];
    /// Frames between clicks
    const FRAMES_PER_CLICK: u32 = 20;
    /// Give up after this many frames
    const MAX_FRAMES: u32 = 2_000;

    pub fn run() -> Result<(), SettingsError> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(Path::new(&path))?,
            None => Settings::default(),
        };

        log::info!("Pumpkin Drop (native) starting...");
        log::info!(
            "Viewport {}x{}, seed {}, {} integration",
            settings.viewport_width,
            settings.viewport_height,
            settings.seed,
            settings.integration.as_str()
        );

        let mut state = SimState::try_new(settings)?;
        let mut ticker = Ticker::from_settings(state.settings());
        let frame_time = ticker.interval();
        let width = state.settings().viewport_width;
        let mut clicks = CLICKS.iter();

        for frame in 0..MAX_FRAMES {
            if frame % FRAMES_PER_CLICK == 0
                && let Some(fraction) = clicks.next()
            {
                let pumpkin = state.spawn(fraction * width, 0.0);
                log::info!("Dropped pumpkin {} at x={:.1}", pumpkin.id, pumpkin.pos.x);
            }

            ticker.advance_with(&mut state, frame_time, |report| {
                for event in &report.events {
                    log_event(report.tick, event);
                }
            });

            if clicks.len() == 0 && state.is_settled() {
                log::info!(
                    "All {} pumpkins settled after {} ticks",
                    state.len(),
                    state.time_ticks
                );
                break;
            }
        }

        if !state.is_settled() {
            log::warn!("Stopped after {} ticks with pumpkins still moving", state.time_ticks);
        }

        match state.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
        Ok(())
    }

    fn log_event(tick: u64, event: &SimEvent) {
        match event {
            SimEvent::LandedOnTarget { id } => {
                log::info!("tick {tick}: pumpkin {id} landed on the target")
            }
            SimEvent::SlidOffTarget { id, side } => {
                log::info!("tick {tick}: pumpkin {id} slid off the {side:?} side")
            }
            SimEvent::Grounded { id } => log::info!("tick {tick}: pumpkin {id} hit the ground"),
            SimEvent::Stacked { id, on } => {
                log::info!("tick {tick}: pumpkin {id} stacked on pumpkin {on}")
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match native::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is pumpkin_drop::web::start, this is just to satisfy the compiler
}
