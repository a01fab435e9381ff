//! Fixed timestep simulation tick
//!
//! One call advances every pumpkin by one tick, in spawn order. Cross-pumpkin
//! checks read the frame-start snapshot only, so the result never depends on
//! which pumpkins have already been updated this tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    Contact, Side, ground_contact, resolve_target, stack_contact, supported_by_target,
    target_contact,
};
use super::state::{Pumpkin, SimState, TargetRegion};
use crate::consts::*;
use crate::settings::Integration;

/// Contact transitions observed during a tick.
///
/// Fired when a pumpkin reaches a contact it did not start the tick in; a
/// pumpkin re-seated where it already sat produces nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Came down on top of the target
    LandedOnTarget { id: u64 },
    /// Pushed out of the lower half of the target
    SlidOffTarget { id: u64, side: Side },
    /// Stopped on the ground
    Grounded { id: u64 },
    /// Stopped on top of another pumpkin
    Stacked { id: u64, on: u64 },
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Tick counter after this step (unchanged when inactive)
    pub tick: u64,
    pub events: Vec<SimEvent>,
    /// Pumpkins with non-zero velocity after the step
    pub moving: usize,
}

/// Static geometry shared by every pumpkin in a tick
#[derive(Debug, Clone, Copy)]
struct Frame {
    region: TargetRegion,
    ground_y: f32,
    size: f32,
    integration: Integration,
}

/// Advance the world by one fixed timestep
pub fn step(state: &mut SimState) -> StepReport {
    if !state.active {
        return StepReport {
            tick: state.time_ticks,
            ..Default::default()
        };
    }

    state.time_ticks += 1;

    let frame = Frame {
        region: state.region(),
        ground_y: state.ground_y(),
        size: state.pumpkin_size(),
        integration: state.integration(),
    };

    let mut events = Vec::new();
    let next: Vec<Pumpkin> = (0..state.pumpkins.len())
        .map(|index| advance(index, &state.pumpkins, &frame, &mut events))
        .collect();
    state.pumpkins = next;

    for event in &events {
        log::trace!("tick {}: {:?}", state.time_ticks, event);
    }

    StepReport {
        tick: state.time_ticks,
        events,
        moving: state.pumpkins.iter().filter(|p| !p.is_resting()).count(),
    }
}

/// Compute the next state of `snapshot[index]` from the frame-start snapshot
fn advance(
    index: usize,
    snapshot: &[Pumpkin],
    frame: &Frame,
    events: &mut Vec<SimEvent>,
) -> Pumpkin {
    let pre = &snapshot[index];

    // Gravity, then integrate
    let mut vel = Vec2::new(pre.vel.x, pre.vel.y + GRAVITY);
    let dy = match frame.integration {
        Integration::SemiImplicit => vel.y,
        Integration::Explicit => pre.vel.y,
    };
    let mut pos = Vec2::new(pre.pos.x + pre.vel.x, pre.pos.y + dy);
    let rotation = pre.rotation + SPIN_PER_TICK;

    // Target region (single check, not iterated). The flag marks a pumpkin
    // already sitting on the target that is only re-seated.
    let contact = match target_contact(pos, frame.size, &frame.region) {
        Some(contact) => Some((contact, false)),
        None => supported_by_target(pre, pos, frame.size, &frame.region)
            .then_some((Contact::Top, true)),
    };
    if let Some((contact, reseated)) = contact {
        (pos, vel) = resolve_target(contact, pos, vel, frame.size, &frame.region);
        match contact {
            Contact::Top if reseated => {}
            Contact::Top => events.push(SimEvent::LandedOnTarget { id: pre.id }),
            Contact::Side(side) => events.push(SimEvent::SlidOffTarget { id: pre.id, side }),
        }
    }

    // Ground stops everything, horizontal motion included
    if ground_contact(pos.y, frame.ground_y) {
        pos.y = frame.ground_y;
        vel = Vec2::ZERO;
        if pre.pos.y < frame.ground_y {
            events.push(SimEvent::Grounded { id: pre.id });
        }
    }

    // Stacking on other pumpkins (frame-start positions)
    if let Some(other) = stack_contact(index, pos, snapshot, frame.size) {
        pos.y = other.pos.y - frame.size;
        vel = Vec2::ZERO;
        if pre.pos.y != pos.y {
            events.push(SimEvent::Stacked {
                id: pre.id,
                on: other.id,
            });
        }
    }

    Pumpkin {
        id: pre.id,
        pos,
        vel,
        rotation,
    }
}
