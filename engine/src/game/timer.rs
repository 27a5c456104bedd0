use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// A periodic tick task. Dropping the timer aborts the task, so replacing the
/// engine's `Option<TickTimer>` cancels the previous one.
pub(crate) struct TickTimer {
    generation: u64,
    period: Duration,
    handle: JoinHandle<()>,
}

impl TickTimer {
    /// Calls `on_tick` every `period`, first after one full period. The task
    /// ends once `on_tick` returns `false`.
    pub(crate) fn spawn<F>(runtime: &Handle, generation: u64, period: Duration, on_tick: F) -> Self
    where
        F: Fn() -> bool + Send + 'static,
    {
        let first_tick = Instant::now() + period;
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if !on_tick() {
                    break;
                }
            }
        });

        Self {
            generation,
            period,
            handle,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
