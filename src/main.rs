//! Sushi Neko headless driver
//!
//! Plays a scripted game through the gameplay core and logs every request the
//! core makes of its rendering host. Usage: `sushi-neko [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use sushi_neko::Tuning;

    env_logger::init();
    log::info!("Sushi Neko (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .with_context(|| format!("invalid seed: {}", s))?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {}", path))?;
            Tuning::from_json(&json).with_context(|| format!("loading tuning file {}", path))?
        }
        None => Tuning::default(),
    };

    autoplay::run(seed, tuning)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by the host engine on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use sushi_neko::consts::FRAME_DT;
    use sushi_neko::sim::{
        GameEvent, GamePhase, GameState, Side, on_restart_requested, on_scene_ready,
        on_start_pressed, on_tap, on_tick, safe_side,
    };
    use sushi_neko::Tuning;

    const SCREEN_WIDTH: f32 = 320.0;
    /// Frames between taps
    const FRAMES_PER_TAP: u32 = 8;
    /// Punches before the bot walks into the chopsticks
    const PUNCHES_BEFORE_MISTAKE: u32 = 40;

    pub fn run(seed: u64, tuning: Tuning) -> anyhow::Result<()> {
        let mut state = GameState::with_tuning(seed, tuning);
        on_scene_ready(&mut state);
        log::info!("Game initialized with seed: {}", seed);

        on_start_pressed(&mut state);
        flush(&mut state);

        while state.phase != GamePhase::GameOver {
            let Some(head) = state.tower.peek_head().map(|p| p.orientation) else {
                anyhow::bail!("tower emptied during play");
            };
            // Stay put on Neutral pieces, dodge the chopsticks otherwise
            let mut side = safe_side(head).unwrap_or(state.cat_side);
            if state.score >= PUNCHES_BEFORE_MISTAKE {
                side = side.opposite();
            }
            let x = match side {
                Side::Left => SCREEN_WIDTH * 0.25,
                Side::Right => SCREEN_WIDTH * 0.75,
            };
            on_tap(&mut state, x, SCREEN_WIDTH);
            for _ in 0..FRAMES_PER_TAP {
                on_tick(&mut state, FRAME_DT);
            }
            flush(&mut state);
        }

        println!(
            "Seed {}: score {} after {} ticks",
            state.seed, state.score, state.time_ticks
        );
        log::debug!("Final state: {}", serde_json::to_string(&state)?);

        let mut fresh = on_restart_requested(state, seed.wrapping_add(1));
        flush(&mut fresh);
        println!(
            "Restarted with seed {}: {} pieces waiting",
            fresh.seed,
            fresh.tower.len()
        );
        Ok(())
    }

    /// Stand-in for the rendering host
    fn flush(state: &mut GameState) {
        for event in state.drain_events() {
            match event {
                GameEvent::PhaseChanged { phase } => log::info!("Phase: {:?}", phase),
                GameEvent::ScoreChanged { score } => log::debug!("Score: {}", score),
                other => log::trace!("{:?}", other),
            }
        }
    }
}
