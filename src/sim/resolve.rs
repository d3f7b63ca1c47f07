//! Punch resolution
//!
//! A punch from `side` is fatal when the head piece's chopsticks point at
//! that side.

use serde::{Deserialize, Serialize};

use super::state::{Orientation, Side};

/// Outcome of a punch against the head piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Head knocked off, game continues
    Safe,
    /// Player hit by chopsticks
    Fatal,
}

pub fn resolve(choice: Side, head: Orientation) -> Resolution {
    if head.is_lethal_for(choice) {
        Resolution::Fatal
    } else {
        Resolution::Safe
    }
}

/// The side that is safe to punch from, if only one is
pub fn safe_side(head: Orientation) -> Option<Side> {
    match head {
        Orientation::Left => Some(Side::Right),
        Orientation::Right => Some(Side::Left),
        Orientation::Neutral => None,
    }
}
