//! Stream extensions for containers (feature = `"async"`).
//!
//! Adds `.first_loaded()` and `.join_loaded()` to any
//! `futures::Stream` of [`Loadable`] values, such as the snapshots of a
//! [`Resource`](crate::Resource) turned into a stream.

use async_trait::async_trait;

use futures::Stream;
use futures::StreamExt;

use crate::loadable::Loadable;

/// Extension trait for folding `Stream`s of [`Loadable`] values.
///
/// Implemented for every `Stream<Item = Loadable<T>>`:
///
/// - [`first_loaded`](LoadableStreamExt::first_loaded): skip pending
///   snapshots and return the first payload, or `None` if the stream
///   ends first.
/// - [`join_loaded`](LoadableStreamExt::join_loaded): join a finite
///   stream the way [`all`](crate::all) joins a tuple, stopping at the
///   first `NotLoaded`.
///
/// # Example
///
/// ```rust
/// use futures::stream;
/// use loadable::stream_ext::LoadableStreamExt;
/// use loadable::Loadable;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let snapshots = stream::iter(vec![
///     Loadable::pending(),
///     Loadable::pending(),
///     Loadable::from_value("ready"),
/// ]);
/// assert_eq!(snapshots.first_loaded().await, Some("ready"));
///
/// let pages = stream::iter(vec![Loadable::from_value(1), Loadable::from_value(2)]);
/// assert_eq!(pages.join_loaded().await, Loadable::Loaded(vec![1, 2]));
/// # }
/// ```
#[async_trait]
pub trait LoadableStreamExt<T>: Stream<Item = Loadable<T>> + Sized + Unpin + Send
where
    T: Send + 'static,
{
    /// The first loaded payload, or `None` if the stream ends while
    /// every item is pending.
    async fn first_loaded(self) -> Option<T> {
        let mut s = self;
        while let Some(item) = s.next().await {
            if let Loadable::Loaded(value) = item {
                return Some(value);
            }
        }
        None
    }

    /// `Loaded` of every payload iff every item is loaded.
    ///
    /// Consumption stops at the first `NotLoaded`. An empty stream
    /// joins to `Loaded(vec![])`.
    async fn join_loaded(self) -> Loadable<Vec<T>> {
        let mut s = self;
        let mut values = Vec::new();
        while let Some(item) = s.next().await {
            match item {
                Loadable::Loaded(value) => values.push(value),
                Loadable::NotLoaded => return Loadable::NotLoaded,
            }
        }
        Loadable::Loaded(values)
    }
}

#[async_trait]
impl<S, T> LoadableStreamExt<T> for S
where
    S: Stream<Item = Loadable<T>> + Sized + Unpin + Send,
    T: Send + 'static,
{
    // Default method bodies from the trait are used.
}
