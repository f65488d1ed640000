//! The three-state container for search and lookup results.
//!
//! [`Lookup<T>`] adds `NotFound` to [`Loadable`]'s two tags: the
//! request finished and there is nothing to show. It has the same
//! combinators, and every one of them propagates both empty tags
//! unchanged. Joining follows the [`Status`] lattice, so a `NotFound`
//! anywhere wins over a `NotLoaded` anywhere.
//!
//! ```rust
//! use loadable::{Loadable, Lookup};
//!
//! let hits: Lookup<Vec<&str>> = Lookup::found(None);
//! assert!(hits.is_not_found());
//!
//! let from_cache: Lookup<u32> = Loadable::from_value(3).into();
//! assert_eq!(from_cache.map(|n| n * 2), Lookup::Loaded(6));
//! ```

use crate::cases::LookupCases;
use crate::error::LoadableError;
use crate::loadable::Loadable;
use crate::status::Status;
use crate::suspend::Suspend;

/// A value that may not be available yet, or may be known to be absent.
///
/// With the `serde` feature the third tag serializes as
/// `{"_tag": "NotFound"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "_tag", content = "data")
)]
pub enum Lookup<T> {
    /// The value is available.
    Loaded(T),
    /// The value is not available yet.
    NotLoaded,
    /// The request completed and found nothing.
    NotFound,
}

impl<T> Default for Lookup<T> {
    fn default() -> Self {
        Lookup::NotLoaded
    }
}

impl<T> Lookup<T> {
    /// `Loaded(value)`.
    pub fn from_value(value: T) -> Self {
        Lookup::Loaded(value)
    }

    /// `NotLoaded`.
    pub fn pending() -> Self {
        Lookup::NotLoaded
    }

    /// `NotFound`.
    pub fn not_found() -> Self {
        Lookup::NotFound
    }

    /// A finished search: `Some` is `Loaded`, `None` is `NotFound`.
    pub fn found(result: Option<T>) -> Self {
        match result {
            Some(x) => Lookup::Loaded(x),
            None => Lookup::NotFound,
        }
    }

    /// True for `Loaded`.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Lookup::Loaded(_))
    }

    /// True for `NotLoaded`.
    pub fn is_not_loaded(&self) -> bool {
        matches!(self, Lookup::NotLoaded)
    }

    /// True for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    /// The tag without the payload.
    pub fn status(&self) -> Status {
        match self {
            Lookup::Loaded(_) => Status::Loaded,
            Lookup::NotLoaded => Status::NotLoaded,
            Lookup::NotFound => Status::NotFound,
        }
    }

    /// Borrow the payload.
    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Loaded(x) => Lookup::Loaded(x),
            Lookup::NotLoaded => Lookup::NotLoaded,
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// The payload, if loaded.
    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            Lookup::Loaded(x) => Some(x),
            _ => None,
        }
    }

    /// The payload, or the error naming the empty tag.
    pub fn try_loaded(self) -> Result<T, LoadableError> {
        match self {
            Lookup::Loaded(x) => Ok(x),
            Lookup::NotLoaded => Err(LoadableError::NotLoaded),
            Lookup::NotFound => Err(LoadableError::NotFound),
        }
    }

    /// Apply `f` to the payload. Neither empty tag calls `f`.
    pub fn map<U, F>(self, f: F) -> Lookup<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Lookup::Loaded(x) => Lookup::Loaded(f(x)),
            Lookup::NotLoaded => Lookup::NotLoaded,
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// Apply `f` to the payload and return its container as-is.
    pub fn flat_map<U, F>(self, f: F) -> Lookup<U>
    where
        F: FnOnce(T) -> Lookup<U>,
    {
        match self {
            Lookup::Loaded(x) => f(x),
            Lookup::NotLoaded => Lookup::NotLoaded,
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// Run a side effect on the payload, once, if loaded.
    pub fn for_each<F>(self, f: F)
    where
        F: FnOnce(T),
    {
        if let Lookup::Loaded(x) = self {
            f(x);
        }
    }

    /// The payload, or `default` for either empty tag.
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Lookup::Loaded(x) => x,
            _ => default,
        }
    }

    /// `f(payload)` if loaded, otherwise `default`.
    pub fn quick_match<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Lookup::Loaded(x) => f(x),
            _ => default,
        }
    }

    /// Dispatch to exactly one handler of a three-state table.
    ///
    /// ```rust
    /// use loadable::{Cases, Lookup};
    ///
    /// let render = |hits: Lookup<usize>| {
    ///     hits.match_with(
    ///         Cases::loaded(|n: usize| format!("{n} results"))
    ///             .not_loaded(|| "searching".to_string())
    ///             .not_found(|| "no matches".to_string()),
    ///     )
    /// };
    /// assert_eq!(render(Lookup::NotFound), "no matches");
    /// assert_eq!(render(Lookup::Loaded(2)), "2 results");
    /// ```
    pub fn match_with<U, C>(self, cases: C) -> U
    where
        C: LookupCases<T, U>,
    {
        match self {
            Lookup::Loaded(x) => cases.on_loaded(x),
            Lookup::NotLoaded => cases.on_not_loaded(),
            Lookup::NotFound => cases.on_not_found(),
        }
    }

    /// Fold `NotFound` into the payload: `Loadable<Option<T>>`.
    pub fn into_loadable(self) -> Loadable<Option<T>> {
        match self {
            Lookup::Loaded(x) => Loadable::Loaded(Some(x)),
            Lookup::NotLoaded => Loadable::NotLoaded,
            Lookup::NotFound => Loadable::Loaded(None),
        }
    }

    /// The payload, or a suspension signal.
    ///
    /// `NotFound` is a final answer, not something to wait for, so it
    /// comes back as `Ok(None)` rather than suspending.
    pub fn wait_for(self) -> Result<Option<T>, Suspend> {
        match self {
            Lookup::Loaded(x) => Ok(Some(x)),
            Lookup::NotFound => Ok(None),
            Lookup::NotLoaded => Err(Suspend::unlinked()),
        }
    }
}

impl<T> Lookup<Lookup<T>> {
    /// Collapse one level of nesting.
    pub fn flatten(self) -> Lookup<T> {
        self.flat_map(|inner| inner)
    }
}

impl<T> From<Loadable<T>> for Lookup<T> {
    fn from(value: Loadable<T>) -> Self {
        match value {
            Loadable::Loaded(x) => Lookup::Loaded(x),
            Loadable::NotLoaded => Lookup::NotLoaded,
        }
    }
}
