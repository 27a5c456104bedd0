use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::config::Validate;
use crate::{debug_log, log, warn_log};
use super::game_state::{SnakeGameState, TickOutcome};
use super::session_rng::SessionRng;
use super::settings::EngineConfig;
use super::snapshot::GameState;
use super::timer::TickTimer;
use super::types::Direction;

pub type StateCallback = Arc<dyn Fn(&GameState) + Send + Sync>;

/// Owns the game state and the tick timer.
///
/// Intents are synchronous and never fail: reversing or malformed directions
/// and lifecycle calls that do not apply to the current state are ignored.
/// The timer runs on the tokio runtime current at `start`/`resume`; without a
/// runtime no timer is created and the host calls [`SnakeEngine::tick`].
pub struct SnakeEngine {
    inner: Arc<Mutex<EngineInner>>,
}

struct EngineInner {
    config: EngineConfig,
    game: SnakeGameState,
    rng: SessionRng,
    timer: Option<TickTimer>,
    last_generation: u64,
    on_state_change: Option<StateCallback>,
    /// Snapshots queued in mutation order, waiting for delivery.
    outbox: VecDeque<(StateCallback, GameState)>,
    delivering: bool,
    destroyed: bool,
}

impl EngineInner {
    fn owns_timer(&self, generation: u64) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| timer.generation() == generation)
    }

    fn fresh_game(&mut self, high_score: u32) {
        self.game = SnakeGameState::new(&self.config, high_score, &mut self.rng);
    }

    /// Must be called under the same lock as the mutation it reports, so the
    /// outbox order matches the order of the changes.
    fn queue_notification(&mut self) {
        if let Some(callback) = self.on_state_change.clone() {
            let state = self.game.snapshot();
            self.outbox.push_back((callback, state));
        }
    }
}

fn lock(inner: &Mutex<EngineInner>) -> MutexGuard<'_, EngineInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Releases the delivery slot when an observer panics mid-drain.
struct DeliveryGuard<'a>(&'a Mutex<EngineInner>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            lock(self.0).delivering = false;
        }
    }
}

/// Hands queued snapshots to the observer, oldest first, outside the lock so
/// observers may call back into the engine.
///
/// Only one caller drains at a time. A caller that finds a delivery already
/// in progress (another thread, or an observer re-entering the engine) leaves
/// its snapshot in the outbox for the active drainer, so the observer never
/// sees an older state after a newer one.
fn deliver(shared: &Mutex<EngineInner>) {
    {
        let mut inner = lock(shared);
        if inner.delivering || inner.outbox.is_empty() {
            return;
        }
        inner.delivering = true;
    }

    let _guard = DeliveryGuard(shared);
    loop {
        let next = {
            let mut inner = lock(shared);
            let next = inner.outbox.pop_front();
            if next.is_none() {
                inner.delivering = false;
            }
            next
        };
        let Some((callback, state)) = next else {
            return;
        };
        callback(&state);
    }
}

impl SnakeEngine {
    pub fn new(config: EngineConfig) -> Result<Self, String> {
        Self::with_rng(config, SessionRng::from_random())
    }

    /// Same seed and same intents give the same game.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, String> {
        Self::with_rng(config, SessionRng::new(seed))
    }

    fn with_rng(config: EngineConfig, mut rng: SessionRng) -> Result<Self, String> {
        config
            .validate()
            .map_err(|e| format!("Invalid engine config: {}", e))?;

        let game = SnakeGameState::new(&config, 0, &mut rng);
        debug_log!(
            "Engine created: grid {}x{}, speed {}ms, seed {}",
            config.grid_size,
            config.grid_size,
            config.initial_speed,
            rng.seed()
        );

        Ok(Self {
            inner: Arc::new(Mutex::new(EngineInner {
                config,
                game,
                rng,
                timer: None,
                last_generation: 0,
                on_state_change: None,
                outbox: VecDeque::new(),
                delivering: false,
                destroyed: false,
            })),
        })
    }

    pub fn config(&self) -> EngineConfig {
        lock(&self.inner).config
    }

    /// Independent copy of the current state.
    pub fn state(&self) -> GameState {
        lock(&self.inner).game.snapshot()
    }

    pub fn is_ticking(&self) -> bool {
        lock(&self.inner).timer.is_some()
    }

    /// Period of the live timer, if any.
    pub fn tick_period(&self) -> Option<Duration> {
        lock(&self.inner).timer.as_ref().map(TickTimer::period)
    }

    /// Replaces any previously registered observer.
    pub fn set_on_state_change<F>(&self, callback: F)
    where
        F: Fn(&GameState) + Send + Sync + 'static,
    {
        lock(&self.inner).on_state_change = Some(Arc::new(callback));
    }

    pub fn clear_on_state_change(&self) {
        lock(&self.inner).on_state_change = None;
    }

    /// Takes effect on the next tick. A reversal of the current heading is
    /// ignored; anything else, including the current heading, is stored and
    /// notified.
    pub fn set_direction(&self, direction: Direction) {
        {
            let mut inner = lock(&self.inner);
            if !inner.game.set_direction(direction) {
                debug_log!("Ignored reversing direction {:?}", direction);
                return;
            }
            inner.queue_notification();
        }
        deliver(&self.inner);
    }

    /// Raw vector form of [`SnakeEngine::set_direction`]; anything other than
    /// a unit axis vector is ignored.
    pub fn set_direction_vector(&self, dx: i32, dy: i32) {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.set_direction(direction),
            None => debug_log!("Ignored invalid direction vector ({}, {})", dx, dy),
        }
    }

    /// Begins ticking. After a game over this starts a new game that keeps the
    /// high score; while running it only restarts the timer.
    pub fn start(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.destroyed {
                debug_log!("Ignored start on destroyed engine");
                return;
            }

            if inner.game.is_game_over() {
                let high_score = inner.game.high_score();
                inner.fresh_game(high_score);
                log!("New game started, high score {}", high_score);
            }

            inner.game.set_paused(false);
            Self::restart_timer(&self.inner, &mut inner);
            inner.queue_notification();
        }
        deliver(&self.inner);
    }

    pub fn pause(&self) {
        {
            let mut inner = lock(&self.inner);
            inner.timer = None;
            if inner.game.is_game_over() || inner.game.is_paused() {
                return;
            }
            inner.game.set_paused(true);
            debug_log!("Game paused at score {}", inner.game.score());
            inner.queue_notification();
        }
        deliver(&self.inner);
    }

    pub fn resume(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.destroyed || !inner.game.is_paused() || inner.game.is_game_over() {
                return;
            }
            inner.game.set_paused(false);
            Self::restart_timer(&self.inner, &mut inner);
            debug_log!("Game resumed at {}ms", inner.game.speed());
            inner.queue_notification();
        }
        deliver(&self.inner);
    }

    /// Stops ticking and starts over from scratch, high score included.
    pub fn reset(&self) {
        {
            let mut inner = lock(&self.inner);
            inner.timer = None;
            inner.fresh_game(0);
            log!("Game reset");
            inner.queue_notification();
        }
        deliver(&self.inner);
    }

    /// Stops ticking for good and drops the observer. Safe to call repeatedly.
    pub fn destroy(&self) {
        let mut inner = lock(&self.inner);
        inner.timer = None;
        inner.on_state_change = None;
        inner.outbox.clear();
        if !inner.destroyed {
            inner.destroyed = true;
            debug_log!("Engine destroyed");
        }
    }

    /// Advances the game by one step. The timer calls this every period; hosts
    /// without a runtime call it themselves.
    pub fn tick(&self) -> TickOutcome {
        Self::advance(&self.inner, None)
    }

    fn advance(shared: &Arc<Mutex<EngineInner>>, generation: Option<u64>) -> TickOutcome {
        let outcome = {
            let mut guard = lock(shared);
            if let Some(generation) = generation
                && !guard.owns_timer(generation)
            {
                return TickOutcome::Idle;
            }

            let inner = &mut *guard;
            let outcome = inner.game.tick(&mut inner.rng);
            match outcome {
                TickOutcome::Idle => return outcome,
                TickOutcome::Moved => {}
                TickOutcome::AteFood { speed } => {
                    debug_log!(
                        "Food eaten, score {}, speed {}ms, next food at ({}, {})",
                        inner.game.score(),
                        speed,
                        inner.game.food().x,
                        inner.game.food().y
                    );
                    if inner.timer.is_some() {
                        Self::restart_timer(shared, inner);
                    }
                }
                TickOutcome::GameOver(reason) => {
                    inner.timer = None;
                    log!(
                        "Game over ({:?}): score {}, high score {}",
                        reason,
                        inner.game.score(),
                        inner.game.high_score()
                    );
                }
            }
            inner.queue_notification();
            outcome
        };
        deliver(shared);
        outcome
    }

    /// Cancels the current timer and, if a runtime is available, starts a new
    /// one at the current speed.
    fn restart_timer(shared: &Arc<Mutex<EngineInner>>, inner: &mut EngineInner) {
        inner.timer = None;

        let Ok(runtime) = Handle::try_current() else {
            warn_log!("No tokio runtime available, ticks must be driven manually");
            return;
        };

        inner.last_generation += 1;
        let generation = inner.last_generation;
        let period = Duration::from_millis(u64::from(inner.game.speed()));
        let weak = Arc::downgrade(shared);

        inner.timer = Some(TickTimer::spawn(&runtime, generation, period, move || {
            let Some(shared) = weak.upgrade() else {
                return false;
            };
            Self::advance(&shared, Some(generation));
            lock(&shared).owns_timer(generation)
        }));
    }

    #[cfg(test)]
    pub(crate) fn with_game<R>(&self, f: impl FnOnce(&mut SnakeGameState) -> R) -> R {
        f(&mut lock(&self.inner).game)
    }
}

impl Drop for SnakeEngine {
    fn drop(&mut self) {
        lock(&self.inner).timer = None;
    }
}
