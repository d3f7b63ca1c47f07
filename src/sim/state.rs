//! Game state and core gameplay types
//!
//! Everything a running game owns lives in [`GameState`]. There are no
//! statics: the host keeps one context per scene and hands it to the entry
//! points in [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tower::Tower;
use crate::consts::MAX_HEALTH;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the play button
    Title,
    /// Play pressed, waiting for the first tap
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended, tower frozen until restart
    GameOver,
}

/// A side of the tower the player can stand on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Which half of the screen a tap landed in
    pub fn from_screen_x(x: f32, screen_width: f32) -> Self {
        if x > screen_width / 2.0 {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Which side a piece's chopsticks stick out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Left,
    Right,
    /// No chopsticks, never lethal
    Neutral,
}

impl Orientation {
    #[inline]
    pub fn is_neutral(self) -> bool {
        self == Orientation::Neutral
    }

    /// True if a player standing on `side` gets hit by this piece
    #[inline]
    pub fn is_lethal_for(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Orientation::Left, Side::Left) | (Orientation::Right, Side::Right)
        )
    }
}

impl From<Side> for Orientation {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Orientation::Left,
            Side::Right => Orientation::Right,
        }
    }
}

/// Opaque handle the host uses to find the sprite for a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// A single sushi piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub orientation: Orientation,
    /// Current position (mirrors the host sprite)
    pub pos: Vec2,
    /// Draw order, higher draws on top
    pub depth: i32,
    /// Death tint applied
    #[serde(default)]
    pub tinted: bool,
}

/// Outbound requests to the rendering host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Create and attach a sprite for a new piece
    SpawnPiece {
        id: PieceId,
        pos: Vec2,
        depth: i32,
        orientation: Orientation,
    },
    /// Animate a knocked-off piece flipping away from the player on `side`
    FlipPiece { id: PieceId, side: Side },
    /// Animate a piece to the death tint
    TintPiece { id: PieceId },
    /// Move the cat to `side`
    CharacterMoved { side: Side },
    /// Play the punch animation toward the tower from `side`
    Punch { side: Side },
    /// Animate the cat to the death tint
    TintCharacter,
    ScoreChanged { score: u32 },
    PhaseChanged { phase: GamePhase },
    /// Throw away the old scene and show this freshly built one
    PresentScene,
}

/// Complete game context (deterministic)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub tower: Tower,
    /// Pieces knocked off this run
    pub score: u32,
    /// Time meter, 0.0 (dead) to 1.0 (full)
    pub health: f32,
    /// Side the cat is standing on
    pub cat_side: Side,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once the tower has been built
    pub scene_ready: bool,
    /// Pending requests for the host, oldest first
    pub events: Vec<GameEvent>,
    /// Sole source of gameplay randomness
    #[serde(skip)]
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new game context with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tower = Tower::new(&tuning);
        Self {
            seed,
            tuning,
            phase: GamePhase::Title,
            tower,
            score: 0,
            health: MAX_HEALTH,
            cat_side: Side::Left,
            time_ticks: 0,
            scene_ready: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Take all pending host events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.push_event(GameEvent::PhaseChanged { phase });
    }

    pub(crate) fn push_spawn(&mut self, piece: &Piece) {
        self.push_event(GameEvent::SpawnPiece {
            id: piece.id,
            pos: piece.pos,
            depth: piece.depth,
            orientation: piece.orientation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_screen_x() {
        assert_eq!(Side::from_screen_x(10.0, 320.0), Side::Left);
        assert_eq!(Side::from_screen_x(300.0, 320.0), Side::Right);
        // Dead centre counts as left
        assert_eq!(Side::from_screen_x(160.0, 320.0), Side::Left);
    }

    #[test]
    fn test_lethality() {
        assert!(Orientation::Left.is_lethal_for(Side::Left));
        assert!(Orientation::Right.is_lethal_for(Side::Right));
        assert!(!Orientation::Left.is_lethal_for(Side::Right));
        assert!(!Orientation::Neutral.is_lethal_for(Side::Left));
        assert!(!Orientation::Neutral.is_lethal_for(Side::Right));
    }

    #[test]
    fn test_new_state() {
        let mut state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.tower.is_empty());
        assert!(!state.scene_ready);
        assert_eq!(state.health, MAX_HEALTH);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::FlipPiece {
            id: PieceId(3),
            side: Side::Right,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
