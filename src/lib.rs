//! Sushi Neko - tap-to-punch sushi tower arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay core (tower, phases, resolution, scrolling)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, touch capture and animation playback belong to the host engine.
//! The host drives the core through the entry points in [`sim::tick`] and
//! drains [`sim::GameEvent`]s to update its scene.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame step used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Base (sentinel) piece position
    pub const BASE_PIECE_X: f32 = 160.0;
    pub const BASE_PIECE_Y: f32 = 166.0;

    /// Vertical distance between stacked pieces
    pub const PIECE_SPACING: f32 = 55.0;

    /// Fraction of the remaining distance covered per scroll tick
    pub const SCROLL_FACTOR: f32 = 0.5;
    /// Below this distance a settling piece snaps onto its slot
    pub const SNAP_EPSILON: f32 = 0.01;

    /// Random pieces generated when the scene is set up
    pub const PREFILL_COUNT: usize = 10;

    /// Orientation weights, out of their sum
    pub const LEFT_WEIGHT: u32 = 45;
    pub const RIGHT_WEIGHT: u32 = 45;
    pub const NEUTRAL_WEIGHT: u32 = 10;

    /// Health meter (1.0 = full)
    pub const MAX_HEALTH: f32 = 1.0;
    /// 0.01 per frame at 60 Hz
    pub const HEALTH_DRAIN_PER_SECOND: f32 = 0.6;
    pub const HEALTH_GAIN_PER_HIT: f32 = 0.1;
}
