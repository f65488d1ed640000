//! The suspension signal produced by `wait_for`.
//!
//! A task that reads a container with `wait_for` gets either the value
//! or a [`Suspend`]. The signal is meant to be propagated with `?` out
//! of the task to whatever drives it (see `Suspense` under the
//! `async` feature), which awaits the signal and then runs the task
//! again:
//!
//! ```rust
//! use loadable::{Loadable, Suspend};
//!
//! fn render(user: &Loadable<String>) -> Result<String, Suspend> {
//!     let name = user.as_ref().wait_for()?;
//!     Ok(format!("hello, {name}"))
//! }
//!
//! assert!(render(&Loadable::pending()).is_err());
//! assert_eq!(render(&Loadable::from_value("ada".into())).unwrap(), "hello, ada");
//! ```
//!
//! `Suspend` is itself a [`Future`]. Awaiting it parks the caller
//! until the producer behind the value signals progress. A signal
//! created from a bare container has no producer to listen to; it
//! completes after yielding to the executor once, so the retried task
//! re-reads whatever state it closes over.
//!
//! A producer that went away without delivering hands out an
//! *abandoned* signal instead. It completes immediately, and a runner
//! should stop retrying when it sees one.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

type Wake = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// "Not ready yet": the value a suspended read returns instead of a
/// payload.
#[must_use = "a suspension does nothing unless it is awaited or propagated"]
pub struct Suspend {
    wake: Option<Wake>,
    yielded: bool,
    abandoned: bool,
}

impl Suspend {
    /// A signal with no producer attached.
    pub fn unlinked() -> Self {
        Self {
            wake: None,
            yielded: false,
            abandoned: false,
        }
    }

    /// A signal from a producer that will never deliver.
    pub fn abandoned() -> Self {
        Self {
            wake: None,
            yielded: false,
            abandoned: true,
        }
    }

    /// A signal that completes when `wake` does.
    ///
    /// Producers hand out a future that resolves on their next state
    /// transition.
    pub fn on<F>(wake: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            wake: Some(Box::pin(wake)),
            yielded: false,
            abandoned: false,
        }
    }

    /// Whether a producer is attached to this signal.
    pub fn is_linked(&self) -> bool {
        self.wake.is_some()
    }

    /// Whether the producer behind this signal went away for good.
    /// Retrying after such a signal cannot make progress.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }
}

impl Default for Suspend {
    fn default() -> Self {
        Self::unlinked()
    }
}

impl fmt::Debug for Suspend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suspend")
            .field("linked", &self.is_linked())
            .field("abandoned", &self.abandoned)
            .finish_non_exhaustive()
    }
}

impl Future for Suspend {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.abandoned {
            return Poll::Ready(());
        }
        if let Some(wake) = self.wake.as_mut() {
            return wake.as_mut().poll(cx);
        }
        // Unlinked: give other tasks one turn before resuming.
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn unlinked_yields_once_then_completes() {
        let mut s = Suspend::unlinked();
        assert!(!s.is_linked());
        assert!((&mut s).now_or_never().is_none());
        assert!((&mut s).now_or_never().is_some());
    }

    #[test]
    fn linked_follows_its_wake_future() {
        let s = Suspend::on(futures::future::ready(()));
        assert!(s.is_linked());
        assert!(s.now_or_never().is_some());

        let never = Suspend::on(futures::future::pending());
        assert!(never.now_or_never().is_none());
    }

    #[test]
    fn debug_reports_link() {
        let s = Suspend::unlinked();
        assert_eq!(format!("{s:?}"), "Suspend { linked: false, abandoned: false, .. }");
    }

    #[test]
    fn abandoned_completes_immediately() {
        let s = Suspend::abandoned();
        assert!(s.is_abandoned());
        assert!(!s.is_linked());
        assert!(s.now_or_never().is_some());
        assert!(!Suspend::unlinked().is_abandoned());
    }
}
