#![deny(missing_docs)]
//! # loadable — async value containers with a lawful combinator algebra
//!
//! **Part of the [loadable workspace](../index.html)**
//!
//! Core pieces:
//!
//! - [`Loadable<T>`]: a value that is either `Loaded(T)` or
//!   `NotLoaded`, with combinators that propagate `NotLoaded` without
//!   running user code
//! - [`Lookup<T>`]: the three-state variant with `NotFound`, for
//!   search and lookup results
//! - [`all`]: join a tuple of containers (arity 1 to 8) into a
//!   container of a tuple
//! - [`cases`]: named-handler matching whose exhaustiveness is checked
//!   at compile time
//! - [`Status`]: the tag of a container as a priority lattice
//! - [`Suspend`]: the signal `wait_for` returns when a value is not
//!   there yet
//! - [`hkt`]: functor and monad instances, so the laws in
//!   [`loadable_algebra::laws`] can be checked against both containers
//! - [`resource`] *(feature = "async")*: a producer cell an async task
//!   resolves
//! - [`suspense`] *(feature = "async")*: a runner that retries
//!   suspended tasks
//! - [`stream_ext`] *(feature = "async")*: stream adapters over
//!   `Stream<Item = Loadable<T>>`
//! - [`store`] *(feature = "async")*: an explicit authentication store
//!   with read-only selectors
//!
//! ## Concepts
//!
//! A container is an immutable value. "Loading" is modeled by
//! building a new container once data arrives, never by mutating one
//! in place. Every combinator is total: absence is part of the value,
//! so nothing here fails on `NotLoaded`. Errors only appear at the
//! edges, when a caller insists on leaving the container
//! ([`Loadable::try_loaded`]) or gives up on waiting.
//!
//! `Loadable` is a monad: `from_value` is `pure`, `flat_map` is
//! `bind`, and `map` is `fmap`. It is also a bounded join-semilattice
//! whenever its payload is, with `NotLoaded` as bottom.
//!
//! ## Features
//!
//! - **`async`** *(enabled by default)*: producer cells, the suspense
//!   runner, stream adapters and the auth store. Requires `tokio`,
//!   `futures` and `async-trait`.
//! - **`serde`**: `Serialize`/`Deserialize` for the containers, using
//!   the wire shape `{"_tag": "Loaded", "data": ...}` /
//!   `{"_tag": "NotLoaded"}` / `{"_tag": "NotFound"}`.
//!
//! To use only the containers and their algebra:
//! ```toml
//! loadable = { version = "…", default-features = false }
//! ```
//!
//! ## Quick start
//! ```rust
//! use loadable::{all, Cases, Loadable};
//!
//! let user = Loadable::from_value("ada");
//! let runs = Loadable::from_value(12);
//! let banner = all((user, runs))
//!     .map(|(name, n)| format!("{name} has {n} runs"))
//!     .match_with(Cases::loaded(|s: String| s).not_loaded(|| "loading…".into()));
//! assert_eq!(banner, "ada has 12 runs");
//!
//! let pending = all((user, Loadable::<u32>::pending()));
//! assert!(pending.is_not_loaded());
//! ```
//!
//! ### Async example
//! ```rust
//! # #[cfg(feature = "async")]
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use loadable::{Resource, Suspense};
//!
//! let trials = Resource::spawn(async { vec![1, 2, 3] });
//! let total = Suspense::default()
//!     .run(|| Ok(trials.wait_for()?.iter().sum::<i32>()))
//!     .await;
//! assert_eq!(total, Ok(6));
//! # }
//! # #[cfg(not(feature = "async"))]
//! # fn main() {}
//! ```

/// Handler tables for exhaustive named matching.
pub mod cases;

/// Error type for the fallible edges.
pub mod error;

/// Functor and monad instances.
pub mod hkt;

/// Joining tuples and iterators of containers.
pub mod join;

/// The two-state container.
pub mod loadable;

/// The three-state container.
pub mod lookup;

/// The tag lattice.
pub mod status;

/// The suspension signal.
pub mod suspend;

#[cfg(feature = "async")]
/// Producer cell resolved by an async task.
pub mod resource;

#[cfg(feature = "async")]
/// Cooperative retry runner for suspended tasks.
pub mod suspense;

#[cfg(feature = "async")]
/// Stream extensions for folding streams of containers (uses
/// `futures::Stream`).
pub mod stream_ext;

#[cfg(feature = "async")]
/// Explicit authentication store.
pub mod store;

pub use cases::AllCases;
pub use cases::Cases;
pub use cases::Exhaustive;
pub use cases::LoadedOr;
pub use cases::LookupCases;
pub use cases::MatchCases;
pub use cases::NotFoundOr;
pub use cases::NotLoadedOr;
pub use error::LoadableError;
pub use join::all;
pub use join::Join;
pub use loadable::Loadable;
pub use lookup::Lookup;
pub use status::Status;
pub use suspend::Suspend;

#[cfg(feature = "async")]
pub use resource::Resource;
#[cfg(feature = "async")]
pub use stream_ext::LoadableStreamExt;
#[cfg(feature = "async")]
pub use store::AuthStore;
#[cfg(feature = "async")]
pub use suspense::Suspense;
#[cfg(feature = "async")]
pub use suspense::SuspenseConfig;
