//! Read-only render view
//!
//! The renderer never touches `SimState`; it gets one of these per frame.

use serde::{Deserialize, Serialize};

use crate::sim::SimState;

/// What a renderer needs to draw one pumpkin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpkinView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    /// Degrees
    pub rotation: f32,
}

/// Whole-world view after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Whether the host should keep ticking
    pub active: bool,
    pub tick: u64,
    /// Spawn order
    pub pumpkins: Vec<PumpkinView>,
}

impl From<&SimState> for Snapshot {
    fn from(state: &SimState) -> Self {
        Self {
            active: state.active,
            tick: state.time_ticks,
            pumpkins: state
                .pumpkins
                .iter()
                .map(|p| PumpkinView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    rotation: p.rotation,
                })
                .collect(),
        }
    }
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = SimState::new(Settings::default());
        let empty = state.snapshot();
        assert!(!empty.active);
        assert!(empty.pumpkins.is_empty());

        let a = state.spawn(200.0, 0.0);
        let b = state.spawn(600.0, 0.0);
        state.step();

        let snapshot = state.snapshot();
        assert!(snapshot.active);
        assert_eq!(snapshot.tick, 1);
        assert_eq!(
            snapshot.pumpkins.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![a.id, b.id]
        );
        let first = &snapshot.pumpkins[0];
        assert_eq!(first.x, state.pumpkins[0].pos.x);
        assert_eq!(first.y, 2.5);
        assert_eq!(first.rotation, a.rotation + 5.0);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = SimState::new(Settings::default());
        state.spawn(400.0, 0.0);

        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["active"], true);
        assert_eq!(value["tick"], 0);
        assert_eq!(value["pumpkins"][0]["id"], 1);
        assert_eq!(value["pumpkins"][0]["x"], 370.0);
        assert_eq!(value["pumpkins"][0]["y"], 0.0);
    }
}
