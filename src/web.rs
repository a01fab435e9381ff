//! Browser bindings
//!
//! The page owns the DOM, the click listener and `requestAnimationFrame`. It
//! forwards clicks and frame times here and draws whatever `snapshot_json`
//! returns.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::scheduler::Ticker;
use crate::settings::Settings;
use crate::sim::SimState;

/// Longest frame time accepted from the page before the ticker's own clamp
const MAX_FRAME_MS: f64 = 1000.0;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialised on hot reload
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pumpkin Drop starting...");
}

/// One game instance bound to a viewport
#[wasm_bindgen]
pub struct PumpkinGame {
    state: SimState,
    ticker: Ticker,
}

#[wasm_bindgen]
impl PumpkinGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: u64) -> Result<PumpkinGame, JsError> {
        let settings = Settings {
            seed,
            ..Settings::for_viewport(width, height)
        };
        let state = SimState::try_new(settings)?;
        let ticker = Ticker::from_settings(state.settings());
        log::info!("Game initialized {}x{} with seed: {}", width, height, seed);
        Ok(Self { state, ticker })
    }

    /// Drop a pumpkin at the click position; returns its id
    pub fn click(&mut self, x: f32, y: f32) -> u64 {
        self.state.spawn(x, y).id
    }

    /// Advance by one animation frame; returns how many ticks ran
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        let elapsed = Duration::from_secs_f64(elapsed_ms.min(MAX_FRAME_MS) / 1000.0);
        self.ticker.advance(&mut self.state, elapsed)
    }

    pub fn active(&self) -> bool {
        self.state.active
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// `{ active, tick, pumpkins: [{ id, x, y, rotation }] }`
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(self.state.snapshot().to_json()?)
    }
}
