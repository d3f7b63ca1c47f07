//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall back
//! to the values in [`crate::consts`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Position of the sentinel piece under the tower
    pub base_position: Vec2,
    /// Vertical distance between stacked pieces
    pub piece_spacing: f32,
    /// Fraction of remaining distance covered per scroll tick, in (0, 1]
    pub scroll_factor: f32,
    /// Random pieces generated on scene setup
    pub prefill_count: usize,
    pub left_weight: u32,
    pub right_weight: u32,
    pub neutral_weight: u32,
    /// Health lost per second while playing
    pub health_drain_per_second: f32,
    /// Health restored by each successful punch
    pub health_gain_per_hit: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_position: Vec2::new(BASE_PIECE_X, BASE_PIECE_Y),
            piece_spacing: PIECE_SPACING,
            scroll_factor: SCROLL_FACTOR,
            prefill_count: PREFILL_COUNT,
            left_weight: LEFT_WEIGHT,
            right_weight: RIGHT_WEIGHT,
            neutral_weight: NEUTRAL_WEIGHT,
            health_drain_per_second: HEALTH_DRAIN_PER_SECOND,
            health_gain_per_hit: HEALTH_GAIN_PER_HIT,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the head slot (one spacing above the base piece)
    #[inline]
    pub fn base_offset(&self) -> f32 {
        self.base_position.y + self.piece_spacing
    }

    /// Sum of all orientation weights, `None` if it overflows `u32`
    pub fn total_weight(&self) -> Option<u32> {
        self.left_weight
            .checked_add(self.right_weight)?
            .checked_add(self.neutral_weight)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.piece_spacing > 0.0) {
            return Err(TuningError::Spacing(self.piece_spacing));
        }
        if !(self.scroll_factor > 0.0 && self.scroll_factor <= 1.0) {
            return Err(TuningError::ScrollFactor(self.scroll_factor));
        }
        match self.total_weight() {
            None => return Err(TuningError::WeightOverflow),
            Some(0) => return Err(TuningError::ZeroWeights),
            Some(_) => {}
        }
        if self.health_drain_per_second < 0.0 || self.health_gain_per_hit < 0.0 {
            return Err(TuningError::NegativeHealthRate);
        }
        Ok(())
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    Json(serde_json::Error),
    Spacing(f32),
    ScrollFactor(f32),
    ZeroWeights,
    WeightOverflow,
    NegativeHealthRate,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Json(e) => write!(f, "invalid tuning JSON: {}", e),
            TuningError::Spacing(v) => write!(f, "piece_spacing must be positive, got {}", v),
            TuningError::ScrollFactor(v) => {
                write!(f, "scroll_factor must be in (0, 1], got {}", v)
            }
            TuningError::ZeroWeights => write!(f, "orientation weights sum to zero"),
            TuningError::WeightOverflow => write!(f, "orientation weights overflow u32"),
            TuningError::NegativeHealthRate => write!(f, "health rates must not be negative"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}
