//! Entity store and core simulation types
//!
//! The store owns every live pumpkin in spawn order. Spawn appends, the tick
//! replaces the whole vector, the renderer only ever reads a snapshot.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tick::{self, StepReport};
use crate::consts::*;
use crate::settings::{Integration, Settings, SettingsError};
use crate::snapshot::Snapshot;

/// A falling pumpkin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pumpkin {
    /// Unique id, assigned at spawn (render diff key only)
    pub id: u64,
    /// Top-left of the bounding box, screen pixels, y grows downward
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Degrees, cosmetic
    pub rotation: f32,
}

impl Pumpkin {
    pub fn new(id: u64, pos: Vec2, vel: Vec2, rotation: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            rotation,
        }
    }

    /// Both velocity components are zero
    pub fn is_resting(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// Static axis-aligned obstacle pumpkins land on or slide off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetRegion {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Midpoint used to decide which side an impact came from
    pub fn mid(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict interior test (points on the edge are outside)
    pub fn contains(&self, point: Vec2) -> bool {
        self.contains_x(point.x) && point.y > self.y && point.y < self.bottom()
    }

    /// Strictly within the horizontal span
    pub fn contains_x(&self, x: f32) -> bool {
        x > self.x && x < self.right()
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Live pumpkins in spawn order
    pub pumpkins: Vec<Pumpkin>,
    /// Whether ticks advance the world (set by the first spawn)
    pub active: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    settings: Settings,
    region: TargetRegion,
    ground_y: f32,
    rng: Pcg32,
    /// Next entity ID
    next_id: u64,
}

impl SimState {
    /// Create an empty, inactive world from already-validated settings
    pub fn new(settings: Settings) -> Self {
        let region = settings.target_region();
        let ground_y = settings.ground_y();
        log::debug!(
            "World {}x{}: ground_y={}, target={:?}",
            settings.viewport_width,
            settings.viewport_height,
            ground_y,
            region
        );

        Self {
            pumpkins: Vec::new(),
            active: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            region,
            ground_y,
            next_id: 1,
        }
    }

    /// Validate the settings, then create the world
    pub fn try_new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::new(settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn region(&self) -> TargetRegion {
        self.region
    }

    /// Resting y of a pumpkin on the ground
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn pumpkin_size(&self) -> f32 {
        self.settings.pumpkin_size
    }

    pub fn integration(&self) -> Integration {
        self.settings.integration
    }

    pub fn len(&self) -> usize {
        self.pumpkins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pumpkins.is_empty()
    }

    /// Every pumpkin has come to rest
    pub fn is_settled(&self) -> bool {
        self.pumpkins.iter().all(Pumpkin::is_resting)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop a pumpkin centered on `click_x` at the top of the viewport.
    ///
    /// Activates ticking on first use. `_click_y` is accepted for symmetry with
    /// the input event; pumpkins always start at the top edge.
    pub fn spawn(&mut self, click_x: f32, _click_y: f32) -> Pumpkin {
        let click_x = if click_x.is_finite() {
            click_x
        } else {
            log::warn!("Ignoring non-finite click x {click_x}, dropping at viewport center");
            self.settings.viewport_width / 2.0
        };

        self.make_room();

        let id = self.next_entity_id();
        let vx = self.rng.random_range(-SPAWN_VX_SPREAD..SPAWN_VX_SPREAD);
        let rotation = self.rng.random_range(0.0..360.0);
        let pumpkin = Pumpkin::new(
            id,
            Vec2::new(click_x - self.settings.pumpkin_size / 2.0, 0.0),
            Vec2::new(vx, SPAWN_VY),
            rotation,
        );
        self.pumpkins.push(pumpkin.clone());

        if !self.active {
            self.active = true;
            log::info!("First pumpkin dropped, simulation active");
        }
        log::debug!("Spawned pumpkin {} at x={:.1}", id, pumpkin.pos.x);

        pumpkin
    }

    /// Advance the world by one tick (no-op while inactive)
    pub fn step(&mut self) -> StepReport {
        tick::step(self)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    /// Evict until there is room for one more pumpkin under the configured cap.
    /// Oldest resting pumpkin goes first, otherwise the oldest overall.
    fn make_room(&mut self) {
        let Some(cap) = self.settings.max_pumpkins else {
            return;
        };
        while !self.pumpkins.is_empty() && self.pumpkins.len() >= cap {
            let index = self
                .pumpkins
                .iter()
                .position(Pumpkin::is_resting)
                .unwrap_or(0);
            let evicted = self.pumpkins.remove(index);
            log::debug!("Evicted pumpkin {} (cap {})", evicted.id, cap);
        }
    }
}
