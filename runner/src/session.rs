use snake_engine::{GameState, SessionRng, SnakeEngine, log};
use tokio::sync::mpsc;

use crate::autopilot::Autopilot;
use crate::runner_config::RunnerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: u64,
    pub scores: Vec<u32>,
    pub high_score: u32,
    pub interrupted: bool,
}

/// Skips snapshots that are already stale. A game-over snapshot is never
/// lost: every later snapshot stays game over until the next `start()`.
fn newest_state(first: GameState, state_rx: &mut mpsc::UnboundedReceiver<GameState>) -> GameState {
    let mut state = first;
    while let Ok(newer) = state_rx.try_recv() {
        state = newer;
    }
    state
}

/// Plays `config.games` games on one engine, steering with the autopilot,
/// and restarts with `start()` after every game over so the high score
/// carries over. Ctrl+C ends the run early.
pub async fn run_games(config: &RunnerConfig, seed: u64) -> Result<RunSummary, String> {
    let engine = SnakeEngine::with_seed(config.engine, seed)?;
    let grid_size = config.engine.grid_size;
    let mut autopilot = Autopilot::new(config.autopilot, SessionRng::new(seed.wrapping_add(1)));

    let (state_tx, mut state_rx) = mpsc::unbounded_channel::<GameState>();
    engine.set_on_state_change(move |state| {
        // The receiver is gone only once the run is over.
        let _ = state_tx.send(state.clone());
    });

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut scores = Vec::new();
    let mut interrupted = false;

    log!(
        "Running {} game(s) on a {}x{} grid with {:?} autopilot, seed {}",
        config.games,
        grid_size,
        grid_size,
        config.autopilot,
        seed
    );
    engine.start();

    loop {
        tokio::select! {
            update = state_rx.recv() => {
                let Some(state) = update else {
                    break;
                };
                let state = newest_state(state, &mut state_rx);

                if state.is_game_over {
                    scores.push(state.score);
                    log!(
                        "Game {} finished ({:?}): score {}, length {}, high score {}",
                        scores.len(),
                        state.end_reason,
                        state.score,
                        state.snake.len(),
                        state.high_score
                    );
                    if scores.len() >= config.games as usize {
                        break;
                    }
                    autopilot.forget();
                    engine.start();
                    continue;
                }

                if let Some(direction) = autopilot.next_direction(&state, grid_size) {
                    engine.set_direction(direction);
                }
            }
            _ = &mut shutdown => {
                log!("Interrupted, stopping engine");
                interrupted = true;
                break;
            }
        }
    }

    let high_score = engine.state().high_score;
    engine.destroy();

    Ok(RunSummary {
        seed,
        scores,
        high_score,
        interrupted,
    })
}
