//! Host entry points
//!
//! The host calls these in order, one at a time: scene setup once, then a mix
//! of taps and per-frame ticks, then a restart after game over. Each call runs
//! to completion and leaves its requests in [`GameState::events`].

use super::resolve::{Resolution, resolve};
use super::scroll::settle_tower;
use super::state::{GameEvent, GamePhase, GameState, Orientation, Side};
use crate::consts::MAX_HEALTH;

/// Build the initial tower: base piece, two fixed pieces, then random fill
pub fn on_scene_ready(state: &mut GameState) {
    if state.scene_ready {
        debug_assert!(false, "on_scene_ready called twice");
        log::warn!("Scene already set up, ignoring");
        return;
    }
    state.scene_ready = true;

    let base = *state.tower.base();
    state.push_spawn(&base);

    for orientation in [Orientation::Neutral, Orientation::Right] {
        let piece = state.tower.append_piece(orientation);
        state.push_spawn(&piece);
    }

    let count = state.tuning.prefill_count;
    for piece in state.tower.append_random_pieces(count, &mut state.rng) {
        state.push_spawn(&piece);
    }

    state.push_event(GameEvent::CharacterMoved {
        side: state.cat_side,
    });
    log::info!(
        "Scene ready with seed {}: {} pieces",
        state.seed,
        state.tower.len()
    );
}

/// Advance one frame: drain the time meter, then settle the tower
pub fn on_tick(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;

    if state.phase == GamePhase::Playing {
        state.health -= state.tuning.health_drain_per_second * dt;
        if state.health <= 0.0 {
            state.health = 0.0;
            log::info!("Out of time");
            game_over(state);
        }
    }

    settle_tower(&mut state.tower, state.tuning.scroll_factor);
}

/// Play button pressed
pub fn on_start_pressed(state: &mut GameState) {
    if state.phase != GamePhase::Title {
        log::debug!("Start ignored in {:?}", state.phase);
        return;
    }
    // Playing needs a head piece to punch
    if !state.scene_ready {
        debug_assert!(false, "start pressed before on_scene_ready");
        log::warn!("Start pressed before the scene was set up, ignoring");
        return;
    }
    state.set_phase(GamePhase::Ready);
}

/// A tap at `x` on a screen `screen_width` wide
pub fn on_tap(state: &mut GameState, x: f32, screen_width: f32) -> Option<Resolution> {
    on_side_tapped(state, Side::from_screen_x(x, screen_width))
}

/// A tap on `side`. Returns the resolution if the tap was played.
///
/// The tap that leaves Ready is also the first punch.
pub fn on_side_tapped(state: &mut GameState, side: Side) -> Option<Resolution> {
    match state.phase {
        GamePhase::Title | GamePhase::GameOver => return None,
        GamePhase::Ready => state.set_phase(GamePhase::Playing),
        GamePhase::Playing => {}
    }
    resolve_punch(state, side)
}

/// Throw away a finished game and build a fresh one on the title screen.
///
/// Outside game over the current context is handed back untouched.
pub fn on_restart_requested(state: GameState, seed: u64) -> GameState {
    if state.phase != GamePhase::GameOver {
        log::debug!("Restart ignored in {:?}", state.phase);
        return state;
    }

    let mut fresh = GameState::with_tuning(seed, state.tuning);
    fresh.push_event(GameEvent::PresentScene);
    on_scene_ready(&mut fresh);
    log::info!("Game restarted with seed: {}", seed);
    fresh
}

fn resolve_punch(state: &mut GameState, side: Side) -> Option<Resolution> {
    if state.phase != GamePhase::Playing {
        debug_assert!(false, "punch resolved in {:?}", state.phase);
        log::error!("Punch resolved in {:?}, ignoring", state.phase);
        return None;
    }

    let Some(head) = state.tower.peek_head().copied() else {
        debug_assert!(false, "punch with an empty tower");
        log::error!("Punch with an empty tower, ignoring");
        return None;
    };

    state.cat_side = side;
    state.push_event(GameEvent::CharacterMoved { side });

    let resolution = resolve(side, head.orientation);
    log::debug!(
        "Punch from {:?} at {:?} piece {:?}: {:?}",
        side,
        head.orientation,
        head.id,
        resolution
    );

    match resolution {
        Resolution::Fatal => game_over(state),
        Resolution::Safe => {
            state.push_event(GameEvent::Punch { side });

            if let Some(knocked) = state.tower.pop_head() {
                state.push_event(GameEvent::FlipPiece {
                    id: knocked.id,
                    side,
                });
            }
            for piece in state.tower.append_random_pieces(1, &mut state.rng) {
                state.push_spawn(&piece);
            }

            state.score += 1;
            state.health = (state.health + state.tuning.health_gain_per_hit).min(MAX_HEALTH);
            state.push_event(GameEvent::ScoreChanged { score: state.score });
        }
    }

    Some(resolution)
}

/// Freeze the tower and tint everything
fn game_over(state: &mut GameState) {
    state.set_phase(GamePhase::GameOver);

    let base = state.tower.base_mut();
    base.tinted = true;
    let mut tinted = vec![base.id];
    for piece in state.tower.iter_mut() {
        piece.tinted = true;
        tinted.push(piece.id);
    }
    for id in tinted {
        state.push_event(GameEvent::TintPiece { id });
    }
    state.push_event(GameEvent::TintCharacter);

    log::info!("Game over with score {}", state.score);
}
