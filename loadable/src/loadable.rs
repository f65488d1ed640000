//! The two-state asynchronous value container.
//!
//! A [`Loadable<T>`] is either `Loaded(T)` or `NotLoaded`. It is a
//! plain immutable value: "updating" it means building a new one,
//! usually with one of the combinators below. Every combinator
//! propagates `NotLoaded` without calling the function it was given.
//!
//! | operation | on `Loaded(x)` | on `NotLoaded` |
//! |---|---|---|
//! | [`map(f)`](Loadable::map) | `Loaded(f(x))` | `NotLoaded` |
//! | [`flat_map(f)`](Loadable::flat_map) | `f(x)` | `NotLoaded` |
//! | [`for_each(f)`](Loadable::for_each) | runs `f(x)` once | nothing |
//! | [`get_or_else(d)`](Loadable::get_or_else) | `x` | `d` |
//! | [`quick_match(d, f)`](Loadable::quick_match) | `f(x)` | `d` |
//! | [`match_with(cases)`](Loadable::match_with) | loaded handler | not-loaded handler |
//! | [`wait_for()`](Loadable::wait_for) | `Ok(x)` | `Err(Suspend)` |
//!
//! Joining several containers lives in [`crate::join`].
//!
//! # Example
//!
//! ```rust
//! use loadable::Loadable;
//!
//! let experiments = Loadable::from_value(vec!["mnist", "cifar"]);
//! let count = experiments.as_ref().map(|e| e.len());
//! assert_eq!(count, Loadable::Loaded(2));
//!
//! let pending: Loadable<Vec<&str>> = Loadable::pending();
//! assert_eq!(pending.map(|e| e.len()).get_or_else(0), 0);
//! ```

use loadable_algebra::BoundedJoinSemilattice;
use loadable_algebra::JoinSemilattice;

use crate::cases::MatchCases;
use crate::error::LoadableError;
use crate::status::Status;
use crate::suspend::Suspend;

/// A value that may not be available yet.
///
/// The payload exists exactly when the tag is `Loaded`; the enum makes
/// any other combination unrepresentable. With the `serde` feature the
/// wire shape is `{"_tag": "Loaded", "data": ...}` or
/// `{"_tag": "NotLoaded"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "_tag", content = "data")
)]
pub enum Loadable<T> {
    /// The value is available.
    Loaded(T),
    /// The value is not available yet.
    NotLoaded,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::NotLoaded
    }
}

impl<T> Loadable<T> {
    /// `Loaded(value)`.
    pub fn from_value(value: T) -> Self {
        Loadable::Loaded(value)
    }

    /// `NotLoaded`.
    pub fn pending() -> Self {
        Loadable::NotLoaded
    }

    /// True for `Loaded`.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Loadable::Loaded(_))
    }

    /// True for `NotLoaded`.
    pub fn is_not_loaded(&self) -> bool {
        matches!(self, Loadable::NotLoaded)
    }

    /// The tag without the payload.
    pub fn status(&self) -> Status {
        match self {
            Loadable::Loaded(_) => Status::Loaded,
            Loadable::NotLoaded => Status::NotLoaded,
        }
    }

    /// Borrow the payload: `&Loadable<T>` to `Loadable<&T>`.
    pub fn as_ref(&self) -> Loadable<&T> {
        match self {
            Loadable::Loaded(x) => Loadable::Loaded(x),
            Loadable::NotLoaded => Loadable::NotLoaded,
        }
    }

    /// Mutably borrow the payload.
    pub fn as_mut(&mut self) -> Loadable<&mut T> {
        match self {
            Loadable::Loaded(x) => Loadable::Loaded(x),
            Loadable::NotLoaded => Loadable::NotLoaded,
        }
    }

    /// The payload, if loaded.
    ///
    /// This is the narrowing accessor: `if let Some(x) = l.as_loaded()`
    /// checks the tag and hands out the payload in one step.
    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(x) => Some(x),
            Loadable::NotLoaded => None,
        }
    }

    /// Forget the distinction between "not loaded" and `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Loadable::Loaded(x) => Some(x),
            Loadable::NotLoaded => None,
        }
    }

    /// The payload, or [`LoadableError::NotLoaded`].
    pub fn try_loaded(self) -> Result<T, LoadableError> {
        match self {
            Loadable::Loaded(x) => Ok(x),
            Loadable::NotLoaded => Err(LoadableError::NotLoaded),
        }
    }

    /// Apply `f` to the payload. `f` is not called when not loaded.
    pub fn map<U, F>(self, f: F) -> Loadable<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Loadable::Loaded(x) => Loadable::Loaded(f(x)),
            Loadable::NotLoaded => Loadable::NotLoaded,
        }
    }

    /// Apply `f` to the payload and return its container as-is.
    ///
    /// The result is `NotLoaded` if either `self` or the container
    /// returned by `f` is.
    ///
    /// ```rust
    /// use loadable::Loadable;
    ///
    /// let trial_id = Loadable::from_value(7);
    /// let checkpoint = trial_id.flat_map(|id| {
    ///     if id > 5 { Loadable::from_value(format!("ckpt-{id}")) } else { Loadable::pending() }
    /// });
    /// assert_eq!(checkpoint, Loadable::Loaded("ckpt-7".to_string()));
    /// ```
    pub fn flat_map<U, F>(self, f: F) -> Loadable<U>
    where
        F: FnOnce(T) -> Loadable<U>,
    {
        match self {
            Loadable::Loaded(x) => f(x),
            Loadable::NotLoaded => Loadable::NotLoaded,
        }
    }

    /// Run a side effect on the payload, once, if loaded.
    pub fn for_each<F>(self, f: F)
    where
        F: FnOnce(T),
    {
        if let Loadable::Loaded(x) = self {
            f(x);
        }
    }

    /// The payload, or `default`.
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Loadable::Loaded(x) => x,
            Loadable::NotLoaded => default,
        }
    }

    /// The payload, or a lazily computed default.
    pub fn get_or_else_with<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Loadable::Loaded(x) => x,
            Loadable::NotLoaded => default(),
        }
    }

    /// Dispatch to exactly one handler of a complete handler table.
    ///
    /// See [`crate::cases`] for the accepted table shapes.
    pub fn match_with<U, C>(self, cases: C) -> U
    where
        C: MatchCases<T, U>,
    {
        match self {
            Loadable::Loaded(x) => cases.on_loaded(x),
            Loadable::NotLoaded => cases.on_not_loaded(),
        }
    }

    /// `f(payload)` if loaded, otherwise `default`.
    pub fn quick_match<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Loadable::Loaded(x) => f(x),
            Loadable::NotLoaded => default,
        }
    }

    /// Pair two containers; loaded only if both are.
    pub fn zip<U>(self, other: Loadable<U>) -> Loadable<(T, U)> {
        match (self, other) {
            (Loadable::Loaded(a), Loadable::Loaded(b)) => Loadable::Loaded((a, b)),
            _ => Loadable::NotLoaded,
        }
    }

    /// `self` if loaded, otherwise the container built by `f`.
    pub fn or_else<F>(self, f: F) -> Loadable<T>
    where
        F: FnOnce() -> Loadable<T>,
    {
        match self {
            Loadable::Loaded(x) => Loadable::Loaded(x),
            Loadable::NotLoaded => f(),
        }
    }

    /// The payload, or a suspension signal for the driving scheduler.
    ///
    /// A bare container has no producer to listen to, so the signal is
    /// unlinked; cells that do know their producer (`Resource` under
    /// the `async` feature) hand out linked signals instead.
    pub fn wait_for(self) -> Result<T, Suspend> {
        match self {
            Loadable::Loaded(x) => Ok(x),
            Loadable::NotLoaded => Err(Suspend::unlinked()),
        }
    }
}

impl<T> Loadable<Loadable<T>> {
    /// Collapse one level of nesting.
    pub fn flatten(self) -> Loadable<T> {
        self.flat_map(|inner| inner)
    }
}

impl<T> From<Option<T>> for Loadable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(x) => Loadable::Loaded(x),
            None => Loadable::NotLoaded,
        }
    }
}

impl<T> From<Loadable<T>> for Option<T> {
    fn from(value: Loadable<T>) -> Self {
        value.into_option()
    }
}

// Information order: NotLoaded ≤ Loaded(x), loaded payloads join.

impl<L: JoinSemilattice + Clone> JoinSemilattice for Loadable<L> {
    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (Loadable::NotLoaded, x) | (x, Loadable::NotLoaded) => x.clone(),
            (Loadable::Loaded(a), Loadable::Loaded(b)) => Loadable::Loaded(a.join(b)),
        }
    }
}

impl<L: JoinSemilattice + Clone> BoundedJoinSemilattice for Loadable<L> {
    fn bottom() -> Self {
        Loadable::NotLoaded
    }
}


#[cfg(all(test, feature = "serde"))]
mod wire_tests {
    use super::*;
    use crate::lookup::Lookup;
    use serde_json::json;

    #[test]
    fn wire_shape_is_tagged() {
        let loaded = serde_json::to_value(Loadable::from_value(vec![1, 2])).unwrap();
        assert_eq!(loaded, json!({"_tag": "Loaded", "data": [1, 2]}));

        let pending = serde_json::to_value(Loadable::<u8>::pending()).unwrap();
        assert_eq!(pending, json!({"_tag": "NotLoaded"}));

        let missing = serde_json::to_value(Lookup::<u8>::NotFound).unwrap();
        assert_eq!(missing, json!({"_tag": "NotFound"}));
    }

    #[test]
    fn reads_tagged_values_back() {
        let l: Loadable<String> =
            serde_json::from_value(json!({"_tag": "Loaded", "data": "ok"})).unwrap();
        assert_eq!(l, Loadable::Loaded("ok".to_string()));

        let p: Loadable<String> = serde_json::from_value(json!({"_tag": "NotLoaded"})).unwrap();
        assert_eq!(p, Loadable::NotLoaded);
    }

    #[test]
    fn rejects_unknown_tags() {
        let two_state = serde_json::from_value::<Loadable<u8>>(json!({"_tag": "NotFound"}));
        assert!(two_state.is_err());

        let bogus = serde_json::from_value::<Lookup<u8>>(json!({"_tag": "Loading"}));
        assert!(bogus.is_err());

        let untagged = serde_json::from_value::<Loadable<u8>>(json!(3));
        assert!(untagged.is_err());
    }
}
