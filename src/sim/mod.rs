//! Deterministic gameplay module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Single-threaded, one host call at a time
//! - No rendering or platform dependencies

pub mod resolve;
pub mod scroll;
pub mod state;
pub mod tick;
pub mod tower;

pub use resolve::{Resolution, resolve, safe_side};
pub use scroll::{settle_step, settle_tower, slot_target};
pub use state::{GameEvent, GamePhase, GameState, Orientation, Piece, PieceId, Side};
pub use tick::{
    on_restart_requested, on_scene_ready, on_side_tapped, on_start_pressed, on_tap, on_tick,
};
pub use tower::{OrientationWeights, Tower};
