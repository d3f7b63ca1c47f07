//! Tower settle animation
//!
//! Each tick every piece covers a fixed fraction of the distance to its slot,
//! so the tower eases down after the head is knocked off.

use super::tower::Tower;
use crate::consts::SNAP_EPSILON;

/// Resting Y for the piece at `index` (0 = head)
#[inline]
pub fn slot_target(base_offset: f32, index: usize, spacing: f32) -> f32 {
    base_offset + index as f32 * spacing
}

/// One easing step from `current` toward `target`
#[inline]
pub fn settle_step(current: f32, target: f32, factor: f32) -> f32 {
    let next = current + (target - current) * factor;
    if (target - next).abs() < SNAP_EPSILON {
        target
    } else {
        next
    }
}

/// Move every piece one step toward its slot. Returns true while anything is
/// still moving.
pub fn settle_tower(tower: &mut Tower, factor: f32) -> bool {
    let targets: Vec<f32> = (0..tower.len()).map(|i| tower.slot_target(i)).collect();
    let mut moving = false;
    for (piece, target) in tower.iter_mut().zip(targets) {
        piece.pos.y = settle_step(piece.pos.y, target, factor);
        moving |= piece.pos.y != target;
    }
    moving
}
