//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `step` is one tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No clock, rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Contact, Side, ground_contact, stack_contact, target_contact};
pub use state::{Pumpkin, SimState, TargetRegion};
pub use tick::{SimEvent, StepReport};
