//! Background reclamation of expired cache entries.
//!
//! Request paths already treat expired entries as misses; the sweeper only
//! bounds memory. Its cadence is independent of any entry's TTL.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Something holding expirable entries.
pub trait Sweep: Send + Sync {
    /// Remove entries expired at `now`; return how many were removed.
    fn sweep_expired(&self, now: Instant) -> usize;
}

/// Owns the sweeper task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that sweeps `target` every `interval`, clamped to between
/// one millisecond and one year.
///
/// The task holds only a weak reference and exits on the first tick after
/// the target is dropped. Must be called from within a tokio runtime.
pub fn spawn_sweeper<S>(target: Weak<S>, interval: Duration) -> SweeperHandle
where
    S: Sweep + 'static,
{
    let period = interval.clamp(MIN_SWEEP_PERIOD, MAX_SWEEP_PERIOD);
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(target) = target.upgrade() else {
                debug!("sweep target dropped, stopping sweeper");
                return;
            };
            let removed = target.sweep_expired(Instant::now());
            if removed > 0 {
                debug!(removed, "swept expired cache entries");
            }
        }
    });
    SweeperHandle { task }
}
