//! Pumpkin Drop - click to drop pumpkins onto a target and watch them pile up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawn, gravity, collisions, entity store)
//! - `scheduler`: Fixed-rate tick driver that sits outside the simulation
//! - `snapshot`: Read-only view handed to whatever draws the pumpkins
//! - `settings`: Viewport and tuning configuration
//! - `web`: Browser bindings (wasm32 only)

pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scheduler::Ticker;
pub use settings::{Integration, Settings, SettingsError};
pub use sim::{Pumpkin, SimState, StepReport, TargetRegion};
pub use snapshot::{PumpkinView, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Nominal tick interval in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the ticker will try to catch up on (milliseconds)
    pub const MAX_FRAME_MS: u64 = 100;

    /// Side of a pumpkin's square bounding box (pixels)
    pub const PUMPKIN_SIZE: f32 = 60.0;
    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Rotation added every tick (degrees)
    pub const SPIN_PER_TICK: f32 = 5.0;

    /// Vertical nudge given to a freshly spawned pumpkin (pixels/tick)
    pub const SPAWN_VY: f32 = 2.0;
    /// Horizontal jitter range at spawn: vx in [-SPAWN_VX_SPREAD, SPAWN_VX_SPREAD)
    pub const SPAWN_VX_SPREAD: f32 = 1.5;

    /// Target region (the character) dimensions and placement
    pub const TARGET_WIDTH: f32 = 240.0;
    pub const TARGET_HEIGHT: f32 = 180.0;
    /// Distance from the viewport bottom to the target's top edge
    pub const TARGET_TOP_OFFSET: f32 = 280.0;

    /// Horizontal speed kept after landing on top of the target
    pub const TARGET_FRICTION: f32 = 0.3;
    /// Outward speed when sliding off a side of the target
    pub const SLIDE_VX: f32 = 2.0;
    /// Fall speed cap while sliding off a side of the target
    pub const SLIDE_MAX_VY: f32 = 3.0;
}
