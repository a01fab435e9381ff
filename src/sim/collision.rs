//! Collision detection and response
//!
//! Three kinds of contact, all checked against a pumpkin's freshly integrated
//! position: the target region (center-point test), the ground plane, and other
//! pumpkins (a coarse corner-to-corner distance test, not box overlap).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Pumpkin, TargetRegion};
use crate::consts::*;

/// Which side of the target a pumpkin slid off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// How a pumpkin met the target region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Came down on the upper half: land and stop falling
    Top,
    /// Came in on the lower half: get pushed out and keep falling
    Side(Side),
}

/// Classify a pumpkin whose top-left is at `pos` against the target region.
///
/// Returns `None` unless the pumpkin's center is strictly inside the region.
/// The side is picked by comparing the center to the region's midlines.
pub fn target_contact(pos: Vec2, size: f32, region: &TargetRegion) -> Option<Contact> {
    let center = pos + Vec2::splat(size / 2.0);
    if !region.contains(center) {
        return None;
    }

    let mid = region.mid();
    let from_top = center.y < mid.y;
    let from_left = center.x < mid.x;

    Some(if from_top {
        Contact::Top
    } else if from_left {
        Contact::Side(Side::Left)
    } else {
        Contact::Side(Side::Right)
    })
}

/// A pumpkin sitting still on top of the target whose center will still be over it.
///
/// `pre` is the pumpkin at the start of the tick, `new_pos` its integrated
/// position. Such a pumpkin gets the same response as a fresh top landing.
pub fn supported_by_target(pre: &Pumpkin, new_pos: Vec2, size: f32, region: &TargetRegion) -> bool {
    pre.vel.y == 0.0
        && pre.pos.y == region.y - size
        && region.contains_x(new_pos.x + size / 2.0)
}

/// Apply the target response to an integrated position and velocity
pub fn resolve_target(
    contact: Contact,
    pos: Vec2,
    vel: Vec2,
    size: f32,
    region: &TargetRegion,
) -> (Vec2, Vec2) {
    match contact {
        Contact::Top => (
            Vec2::new(pos.x, region.y - size),
            Vec2::new(vel.x * TARGET_FRICTION, 0.0),
        ),
        Contact::Side(Side::Left) => (
            Vec2::new(region.x - size, pos.y),
            Vec2::new(-SLIDE_VX, vel.y.min(SLIDE_MAX_VY)),
        ),
        Contact::Side(Side::Right) => (
            Vec2::new(region.right(), pos.y),
            Vec2::new(SLIDE_VX, vel.y.min(SLIDE_MAX_VY)),
        ),
    }
}

/// Ground is an impenetrable floor at `ground_y`
#[inline]
pub fn ground_contact(y: f32, ground_y: f32) -> bool {
    y >= ground_y
}

/// Find the pumpkin this one should come to rest on, if any.
///
/// Every other pumpkin in the frame-start `snapshot` is tested (skipping
/// `index`, which is this pumpkin). A match needs the distance between the
/// other's top-left and `new_pos` to be under `size`, and this pumpkin to have
/// started the tick above the other. The last match in spawn order wins.
pub fn stack_contact<'a>(
    index: usize,
    new_pos: Vec2,
    snapshot: &'a [Pumpkin],
    size: f32,
) -> Option<&'a Pumpkin> {
    let pre_y = snapshot[index].pos.y;
    snapshot
        .iter()
        .enumerate()
        .rev()
        .find(|&(i, other)| {
            i != index && new_pos.distance(other.pos) < size && pre_y < other.pos.y
        })
        .map(|(_, other)| other)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> TargetRegion {
        TargetRegion {
            x: 280.0,
            y: 420.0,
            width: 240.0,
            height: 180.0,
        }
    }

    fn pumpkin(id: u64, x: f32, y: f32) -> Pumpkin {
        Pumpkin::new(id, Vec2::new(x, y), Vec2::ZERO, 0.0)
    }

    #[test]
    fn test_target_contact_miss() {
        // Center at (400, 400), above the region
        assert_eq!(target_contact(Vec2::new(370.0, 370.0), 60.0, &region()), None);
        // Center exactly on the left edge is outside
        assert_eq!(target_contact(Vec2::new(250.0, 450.0), 60.0, &region()), None);
    }

    #[test]
    fn test_target_contact_top() {
        // Center at (400, 440): inside, above the midline (510)
        assert_eq!(
            target_contact(Vec2::new(370.0, 410.0), 60.0, &region()),
            Some(Contact::Top)
        );
    }

    #[test]
    fn test_target_contact_sides() {
        // Center at (300, 550): lower half, left of the midline (400)
        assert_eq!(
            target_contact(Vec2::new(270.0, 520.0), 60.0, &region()),
            Some(Contact::Side(Side::Left))
        );
        // Center at (500, 550): lower half, right of the midline
        assert_eq!(
            target_contact(Vec2::new(470.0, 520.0), 60.0, &region()),
            Some(Contact::Side(Side::Right))
        );
    }

    #[test]
    fn test_resolve_top_lands_with_friction() {
        let (pos, vel) = resolve_target(
            Contact::Top,
            Vec2::new(370.0, 410.0),
            Vec2::new(1.0, 9.0),
            60.0,
            &region(),
        );
        assert_eq!(pos, Vec2::new(370.0, 360.0));
        assert_eq!(vel.y, 0.0);
        assert!((vel.x - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_resolve_sides_push_out() {
        let (pos, vel) = resolve_target(
            Contact::Side(Side::Left),
            Vec2::new(270.0, 520.0),
            Vec2::new(1.0, 9.0),
            60.0,
            &region(),
        );
        assert_eq!(pos, Vec2::new(220.0, 520.0));
        assert_eq!(vel, Vec2::new(-2.0, 3.0));

        let (pos, vel) = resolve_target(
            Contact::Side(Side::Right),
            Vec2::new(470.0, 520.0),
            Vec2::new(-1.0, 1.5),
            60.0,
            &region(),
        );
        assert_eq!(pos, Vec2::new(520.0, 520.0));
        // Slower than the cap keeps its fall speed
        assert_eq!(vel, Vec2::new(2.0, 1.5));
    }

    #[test]
    fn test_supported_by_target() {
        let resting = pumpkin(1, 370.0, 360.0);
        assert!(supported_by_target(&resting, Vec2::new(370.0, 360.5), 60.0, &region()));

        // Drifted past the edge
        assert!(!supported_by_target(&resting, Vec2::new(500.0, 360.5), 60.0, &region()));

        // Still falling
        let mut falling = resting.clone();
        falling.vel.y = 1.0;
        assert!(!supported_by_target(&falling, Vec2::new(370.0, 361.0), 60.0, &region()));
    }

    #[test]
    fn test_ground_contact() {
        assert!(!ground_contact(439.9, 440.0));
        assert!(ground_contact(440.0, 440.0));
        assert!(ground_contact(452.0, 440.0));
    }

    #[test]
    fn test_stack_contact_requires_being_above() {
        let snapshot = vec![pumpkin(1, 100.0, 300.0), pumpkin(2, 100.0, 380.0)];

        // First pumpkin (above) moves close to the second
        let hit = stack_contact(0, Vec2::new(100.0, 330.0), &snapshot, 60.0);
        assert_eq!(hit.map(|p| p.id), Some(2));

        // Second pumpkin (below) near the first does not stack
        let hit = stack_contact(1, Vec2::new(100.0, 350.0), &snapshot, 60.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_stack_contact_skips_self_and_far_pumpkins() {
        let snapshot = vec![pumpkin(1, 100.0, 300.0), pumpkin(2, 300.0, 380.0)];
        assert!(stack_contact(0, Vec2::new(100.0, 310.0), &snapshot, 60.0).is_none());
    }

    #[test]
    fn test_stack_contact_last_match_wins() {
        let snapshot = vec![
            pumpkin(1, 100.0, 300.0),
            pumpkin(2, 90.0, 340.0),
            pumpkin(3, 110.0, 345.0),
        ];
        let hit = stack_contact(0, Vec2::new(100.0, 320.0), &snapshot, 60.0);
        assert_eq!(hit.map(|p| p.id), Some(3));
    }
}
