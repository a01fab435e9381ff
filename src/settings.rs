//! Simulation settings
//!
//! Everything the simulation needs to know about its surroundings is passed in
//! here once, at construction. Nothing is read from ambient window state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::TargetRegion;

/// How a tick turns velocity into displacement on the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Integration {
    /// Position advances by the velocity *after* gravity is applied
    #[default]
    SemiImplicit,
    /// Position advances by the velocity *before* gravity is applied
    Explicit,
}

impl Integration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Integration::SemiImplicit => "semi_implicit",
            Integration::Explicit => "explicit",
        }
    }
}

/// Errors produced while loading or validating [`Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("pumpkin size must be finite and positive, got {0}")]
    InvalidPumpkinSize(f32),
    #[error("ground height must be finite and non-negative, got {0}")]
    InvalidGroundHeight(f32),
    #[error("viewport height {height} leaves no room for the ground and a pumpkin ({needed} needed)")]
    ViewportTooShort { height: f32, needed: f32 },
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
    #[error("max_pumpkins must be at least 1 when set")]
    ZeroPumpkinCap,
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport (read once) ===
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
    /// Height of the ground strip at the bottom of the viewport
    pub ground_height: f32,

    // === Pumpkins ===
    /// Side of the square pumpkin bounding box
    pub pumpkin_size: f32,
    /// Upper bound on live pumpkins (None = never evict)
    pub max_pumpkins: Option<usize>,

    // === Simulation ===
    /// Seed for spawn jitter and initial rotation
    pub seed: u64,
    /// Nominal interval between ticks (milliseconds)
    pub tick_ms: u64,
    /// Vertical integration scheme
    pub integration: Integration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            ground_height: GROUND_HEIGHT,

            pumpkin_size: PUMPKIN_SIZE,
            max_pumpkins: None,

            seed: 0,
            tick_ms: TICK_MS,
            integration: Integration::SemiImplicit,
        }
    }
}

impl Settings {
    /// Default settings for a given viewport size
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Self::default()
        }
    }

    /// Parse settings from JSON (missing fields take their defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a JSON settings file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the settings describe a usable world
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (w, h) = (self.viewport_width, self.viewport_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(SettingsError::InvalidViewport { width: w, height: h });
        }
        if !(self.pumpkin_size.is_finite() && self.pumpkin_size > 0.0) {
            return Err(SettingsError::InvalidPumpkinSize(self.pumpkin_size));
        }
        if !(self.ground_height.is_finite() && self.ground_height >= 0.0) {
            return Err(SettingsError::InvalidGroundHeight(self.ground_height));
        }
        let needed = self.ground_height + self.pumpkin_size;
        if self.viewport_height < needed {
            return Err(SettingsError::ViewportTooShort {
                height: self.viewport_height,
                needed,
            });
        }
        if self.tick_ms == 0 {
            return Err(SettingsError::ZeroTickInterval);
        }
        if self.max_pumpkins == Some(0) {
            return Err(SettingsError::ZeroPumpkinCap);
        }
        Ok(())
    }

    /// Resting y of a pumpkin sitting on the ground
    pub fn ground_y(&self) -> f32 {
        self.viewport_height - self.ground_height - self.pumpkin_size
    }

    /// The character box pumpkins land on, centered horizontally near the bottom
    pub fn target_region(&self) -> TargetRegion {
        TargetRegion {
            x: self.viewport_width / 2.0 - TARGET_WIDTH / 2.0,
            y: self.viewport_height - TARGET_TOP_OFFSET,
            width: TARGET_WIDTH,
            height: TARGET_HEIGHT,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let settings = Settings::default();
        assert_eq!(settings.ground_y(), 440.0);

        let region = settings.target_region();
        assert_eq!(region.x, 280.0);
        assert_eq!(region.y, 420.0);
        assert_eq!(region.width, 240.0);
        assert_eq!(region.height, 180.0);
    }

    #[test]
    fn test_target_follows_viewport() {
        let settings = Settings::for_viewport(1280.0, 720.0);
        let region = settings.target_region();
        assert_eq!(region.x, 520.0);
        assert_eq!(region.y, 440.0);
        assert_eq!(settings.ground_y(), 560.0);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "viewport_width": 1024, "seed": 7 }"#).unwrap();
        assert_eq!(settings.viewport_width, 1024.0);
        assert_eq!(settings.viewport_height, 600.0);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.max_pumpkins, None);
        assert_eq!(settings.integration, Integration::SemiImplicit);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            max_pumpkins: Some(50),
            integration: Integration::Explicit,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"explicit\""));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_viewport = Settings::for_viewport(f32::NAN, 600.0);
        assert!(matches!(
            bad_viewport.validate(),
            Err(SettingsError::InvalidViewport { .. })
        ));

        let bad_size = Settings {
            pumpkin_size: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            bad_size.validate(),
            Err(SettingsError::InvalidPumpkinSize(_))
        ));

        let bad_ground = Settings {
            ground_height: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            bad_ground.validate(),
            Err(SettingsError::InvalidGroundHeight(_))
        ));

        let too_short = Settings::for_viewport(800.0, 150.0);
        assert!(matches!(
            too_short.validate(),
            Err(SettingsError::ViewportTooShort { height, needed })
                if height == 150.0 && needed == 160.0
        ));
        // Exactly enough room puts the ground at the top edge
        let snug = Settings::for_viewport(800.0, 160.0);
        assert!(snug.validate().is_ok());
        assert_eq!(snug.ground_y(), 0.0);

        let bad_tick = Settings {
            tick_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(bad_tick.validate(), Err(SettingsError::ZeroTickInterval)));

        let bad_cap = Settings {
            max_pumpkins: Some(0),
            ..Settings::default()
        };
        assert!(matches!(bad_cap.validate(), Err(SettingsError::ZeroPumpkinCap)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
        assert!(err.to_string().starts_with("malformed settings JSON"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
