//! The sushi tower
//!
//! Pieces form a queue: new pieces go on top (tail), the player knocks them
//! off the bottom (head). A Neutral base piece sits under the queue and is
//! never removed.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::{Orientation, Piece, PieceId};
use crate::tuning::Tuning;

/// Relative odds of each orientation for an unforced draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrientationWeights {
    pub left: u32,
    pub right: u32,
    pub neutral: u32,
}

impl OrientationWeights {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            left: tuning.left_weight,
            right: tuning.right_weight,
            neutral: tuning.neutral_weight,
        }
    }

    /// Draw one orientation
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        // Summed in u64 so oversized weights cannot wrap
        let (left, right) = (u64::from(self.left), u64::from(self.right));
        let total = left + right + u64::from(self.neutral);
        if total == 0 {
            return Orientation::Neutral;
        }
        let roll = rng.random_range(0..total);
        if roll < left {
            Orientation::Left
        } else if roll < left + right {
            Orientation::Right
        } else {
            Orientation::Neutral
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tower {
    /// Sentinel under the tower
    base: Piece,
    /// Bottom (head) first
    pieces: VecDeque<Piece>,
    spacing: f32,
    base_offset: f32,
    weights: OrientationWeights,
    next_id: u32,
    next_depth: i32,
}

impl Tower {
    pub fn new(tuning: &Tuning) -> Self {
        let base = Piece {
            id: PieceId(0),
            orientation: Orientation::Neutral,
            pos: tuning.base_position,
            depth: 0,
            tinted: false,
        };
        Self {
            base,
            pieces: VecDeque::new(),
            spacing: tuning.piece_spacing,
            base_offset: tuning.base_offset(),
            weights: OrientationWeights::from_tuning(tuning),
            next_id: 1,
            next_depth: 1,
        }
    }

    /// Place a new piece directly above the current top piece
    pub fn append_piece(&mut self, orientation: Orientation) -> Piece {
        let pos = match self.pieces.back() {
            Some(top) => top.pos + Vec2::new(0.0, self.spacing),
            None => Vec2::new(self.base.pos.x, self.base_offset),
        };
        let piece = Piece {
            id: PieceId(self.next_id),
            orientation,
            pos,
            depth: self.next_depth,
            tinted: false,
        };
        self.next_id += 1;
        self.next_depth += 1;
        self.pieces.push_back(piece);
        piece
    }

    /// Append `count` random pieces, returning them bottom first.
    ///
    /// A piece never lands on a non-Neutral piece unless it is Neutral itself.
    /// Neutral on Neutral is allowed.
    pub fn append_random_pieces<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<Piece> {
        let mut added = Vec::with_capacity(count);
        for _ in 0..count {
            let orientation = if self.top().orientation.is_neutral() {
                self.weights.sample(rng)
            } else {
                Orientation::Neutral
            };
            added.push(self.append_piece(orientation));
        }
        added
    }

    /// Remove the bottom piece.
    ///
    /// Popping an empty tower is a bug in the caller; release builds log it
    /// and return `None`.
    pub fn pop_head(&mut self) -> Option<Piece> {
        let head = self.pieces.pop_front();
        if head.is_none() {
            debug_assert!(false, "pop_head on an empty tower");
            log::error!("pop_head on an empty tower, ignoring");
        }
        head
    }

    pub fn peek_head(&self) -> Option<&Piece> {
        self.pieces.front()
    }

    /// Topmost piece, or the base piece when the tower is empty
    pub fn top(&self) -> &Piece {
        self.pieces.back().unwrap_or(&self.base)
    }

    pub fn base(&self) -> &Piece {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces bottom first
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Positions may move, the sequence may not
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }

    pub(crate) fn base_mut(&mut self) -> &mut Piece {
        &mut self.base
    }

    pub fn orientations(&self) -> Vec<Orientation> {
        self.pieces.iter().map(|p| p.orientation).collect()
    }

    /// Resting Y for the piece `index` places above the head
    #[inline]
    pub fn slot_target(&self, index: usize) -> f32 {
        super::scroll::slot_target(self.base_offset, index, self.spacing)
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn base_offset(&self) -> f32 {
        self.base_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tower() -> Tower {
        Tower::new(&Tuning::default())
    }

    #[test]
    fn test_first_piece_sits_on_base_offset() {
        let mut tower = tower();
        let piece = tower.append_piece(Orientation::Neutral);
        assert_eq!(piece.pos.y, tower.base_offset());
        assert_eq!(piece.pos.x, tower.base().pos.x);
        assert!(piece.depth > tower.base().depth);
        assert_eq!(tower.slot_target(0), tower.base_offset());
    }

    #[test]
    fn test_append_stacks_upward() {
        let mut tower = tower();
        let a = tower.append_piece(Orientation::Neutral);
        let b = tower.append_piece(Orientation::Right);
        let c = tower.append_piece(Orientation::Left);
        assert!((b.pos.y - a.pos.y - tower.spacing()).abs() < 0.001);
        assert!((c.pos.y - b.pos.y - tower.spacing()).abs() < 0.001);
        assert!(a.depth < b.depth && b.depth < c.depth);
        assert_ne!(a.id, b.id);
        assert_eq!(tower.top().id, c.id);
    }

    #[test]
    fn test_queue_order() {
        let mut tower = tower();
        tower.append_piece(Orientation::Left);
        tower.append_piece(Orientation::Right);
        assert_eq!(tower.peek_head().map(|p| p.orientation), Some(Orientation::Left));
        assert_eq!(tower.pop_head().map(|p| p.orientation), Some(Orientation::Left));
        assert_eq!(tower.peek_head().map(|p| p.orientation), Some(Orientation::Right));
        assert_eq!(tower.len(), 1);
    }

    #[test]
    fn test_peek_empty() {
        assert!(tower().peek_head().is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty tower")]
    fn test_pop_empty_asserts() {
        tower().pop_head();
    }

    #[test]
    fn test_depth_keeps_rising_after_pops() {
        let mut tower = tower();
        tower.append_piece(Orientation::Neutral);
        let old = tower.pop_head().unwrap();
        let new = tower.append_piece(Orientation::Neutral);
        assert!(new.depth > old.depth);
    }

    #[test]
    fn test_forced_neutral_after_lethal_piece() {
        let mut tower = tower();
        let mut rng = Pcg32::seed_from_u64(1);
        tower.append_piece(Orientation::Right);
        let added = tower.append_random_pieces(1, &mut rng);
        assert_eq!(added[0].orientation, Orientation::Neutral);
    }

    #[test]
    fn test_weights_all_neutral() {
        let weights = OrientationWeights {
            left: 0,
            right: 0,
            neutral: 1,
        };
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(weights.sample(&mut rng), Orientation::Neutral);
        }
    }

    #[test]
    fn test_weights_near_u32_max() {
        let weights = OrientationWeights {
            left: 0,
            right: u32::MAX,
            neutral: u32::MAX,
        };
        let mut rng = Pcg32::seed_from_u64(9);
        let mut seen_right = false;
        let mut seen_neutral = false;
        for _ in 0..200 {
            match weights.sample(&mut rng) {
                Orientation::Left => panic!("zero-weight side drawn"),
                Orientation::Right => seen_right = true,
                Orientation::Neutral => seen_neutral = true,
            }
        }
        assert!(seen_right && seen_neutral);
    }

    #[test]
    fn test_generation_deterministic() {
        let mut a = tower();
        let mut b = tower();
        a.append_random_pieces(100, &mut Pcg32::seed_from_u64(42));
        b.append_random_pieces(100, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.orientations(), b.orientations());
    }

    #[test]
    fn test_orientation_frequencies() {
        let mut tower = tower();
        let mut rng = Pcg32::seed_from_u64(2024);
        tower.append_random_pieces(1000, &mut rng);

        // Only count pieces drawn freely (sitting on a Neutral piece)
        let mut prev = Orientation::Neutral;
        let (mut left, mut right, mut neutral) = (0u32, 0u32, 0u32);
        for orientation in tower.orientations() {
            if prev.is_neutral() {
                match orientation {
                    Orientation::Left => left += 1,
                    Orientation::Right => right += 1,
                    Orientation::Neutral => neutral += 1,
                }
            }
            prev = orientation;
        }

        let draws = (left + right + neutral) as f32;
        assert!(draws > 400.0, "too few free draws: {}", draws);
        let pct = |n: u32| n as f32 / draws * 100.0;
        assert!((pct(left) - 45.0).abs() < 7.0, "left {}%", pct(left));
        assert!((pct(right) - 45.0).abs() < 7.0, "right {}%", pct(right));
        assert!((pct(neutral) - 10.0).abs() < 5.0, "neutral {}%", pct(neutral));
    }

    proptest! {
        #[test]
        fn prop_no_piece_lands_on_lethal_piece(seed in any::<u64>(), count in 1usize..200) {
            let mut tower = tower();
            let mut rng = Pcg32::seed_from_u64(seed);
            tower.append_random_pieces(count, &mut rng);
            let orientations = tower.orientations();
            prop_assert_eq!(orientations.len(), count);
            for pair in orientations.windows(2) {
                if !pair[0].is_neutral() {
                    prop_assert_eq!(pair[1], Orientation::Neutral);
                }
            }
        }

        #[test]
        fn prop_pieces_are_evenly_spaced(seed in any::<u64>(), count in 2usize..50) {
            let mut tower = tower();
            tower.append_random_pieces(count, &mut Pcg32::seed_from_u64(seed));
            let pieces: Vec<_> = tower.iter().copied().collect();
            for (i, piece) in pieces.iter().enumerate() {
                prop_assert!((piece.pos.y - tower.slot_target(i)).abs() < 0.01);
            }
            for pair in pieces.windows(2) {
                prop_assert!(pair[1].depth > pair[0].depth);
            }
        }
    }
}
