#![cfg(feature = "async")]
//! Cooperative retry runner for suspendable tasks.
//!
//! A *task* here is a closure that reads containers with `wait_for`
//! and propagates the [`Suspend`] signal with `?`. [`Suspense::run`]
//! drives it: call the task; on `Ok` return the value; on
//! `Err(signal)` await the signal and call the task again.
//!
//! ```rust
//! use loadable::{Resource, Suspense};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let user = Resource::spawn(async { "ada".to_string() });
//! let runs = Resource::spawn(async { 12u32 });
//!
//! let summary = Suspense::default()
//!     .run(|| {
//!         let name = user.wait_for()?;
//!         let count = runs.wait_for()?;
//!         Ok(format!("{name}: {count} runs"))
//!     })
//!     .await;
//! assert_eq!(summary.as_deref(), Ok("ada: 12 runs"));
//! # }
//! ```
//!
//! `run` is an ordinary future. It needs no `Send` bound on the task,
//! so it also works on a current-thread runtime or inside a
//! `LocalSet` with non-`Send` state.

use crate::error::LoadableError;
use crate::suspend::Suspend;

/// Limits for [`Suspense`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuspenseConfig {
    /// How many times a task may suspend before the runner gives up.
    /// `None` retries until the task completes.
    pub max_suspensions: Option<usize>,
}

impl SuspenseConfig {
    /// No limit on suspensions.
    pub fn unbounded() -> Self {
        Self {
            max_suspensions: None,
        }
    }

    /// Give up after `max` suspensions.
    pub fn bounded(max: usize) -> Self {
        Self {
            max_suspensions: Some(max),
        }
    }
}

/// Runs suspendable tasks to completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct Suspense {
    config: SuspenseConfig,
}

impl Suspense {
    /// A runner with the given limits.
    pub fn new(config: SuspenseConfig) -> Self {
        Self { config }
    }

    /// The runner's limits.
    pub fn config(&self) -> SuspenseConfig {
        self.config
    }

    /// Run `task` until it returns a value.
    ///
    /// Each `Err(Suspend)` is awaited before the next attempt. Fails
    /// with [`LoadableError::Exhausted`] when the task suspends more
    /// than `max_suspensions` times; the reported count includes the
    /// suspension that exceeded the limit. Fails with
    /// [`LoadableError::Abandoned`] as soon as the task propagates an
    /// [abandoned](Suspend::is_abandoned) signal, bounded or not.
    pub async fn run<R, F>(&self, mut task: F) -> Result<R, LoadableError>
    where
        F: FnMut() -> Result<R, Suspend>,
    {
        let mut suspensions = 0usize;
        loop {
            let signal = match task() {
                Ok(value) => {
                    if suspensions > 0 {
                        tracing::debug!(suspensions, "suspended task completed");
                    }
                    return Ok(value);
                }
                Err(signal) => signal,
            };

            if signal.is_abandoned() {
                tracing::warn!(suspensions, "suspended task waits on an abandoned producer");
                return Err(LoadableError::Abandoned);
            }
            suspensions += 1;
            if let Some(max) = self.config.max_suspensions {
                if suspensions > max {
                    tracing::warn!(suspensions, max, "suspended task exhausted its retries");
                    return Err(LoadableError::Exhausted { suspensions });
                }
            }
            tracing::trace!(suspensions, linked = signal.is_linked(), "task suspended");
            signal.await;
        }
    }
}
