//! Named-handler matching with compile-time exhaustiveness.
//!
//! Native `match` on [`Loadable`](crate::Loadable) is always available
//! and always exhaustive. This module adds the handler-table style:
//! callers hand [`Loadable::match_with`](crate::Loadable::match_with)
//! a set of closures keyed by tag. Three shapes are accepted:
//!
//! | shape | built with |
//! |---|---|
//! | loaded + not loaded | `Cases::loaded(f).not_loaded(g)` |
//! | loaded + fallback | `Cases::loaded(f).otherwise(h)` |
//! | not loaded + fallback | `Cases::not_loaded(g).otherwise(h)` |
//!
//! Each finished shape is a plain struct with public fields, so a
//! struct literal works as well as the builder. A half-built table
//! does not implement [`MatchCases`], so forgetting both the
//! applicable branch and the fallback is a type error:
//!
//! ```rust,compile_fail
//! use loadable::{Cases, Loadable};
//!
//! let l = Loadable::from_value(1);
//! // no `not_loaded` handler and no fallback
//! let n: i32 = l.match_with(Cases::loaded(|x: i32| x));
//! ```
//!
//! [`Lookup`](crate::Lookup) has a third tag, so it takes
//! [`LookupCases`] instead. Tables with a fallback work for both;
//! a two-branch [`Exhaustive`] table does not cover `NotFound` and
//! must be extended with `.not_found(..)` first.
//!
//! ```rust
//! use loadable::{Cases, Loadable, LoadedOr};
//!
//! let label = Loadable::from_value(3).match_with(
//!     Cases::loaded(|n: i32| format!("{n} runs")).not_loaded(|| "loading".to_string()),
//! );
//! assert_eq!(label, "3 runs");
//!
//! let spinning = Loadable::<i32>::pending().match_with(LoadedOr {
//!     loaded: |_: i32| false,
//!     otherwise: || true,
//! });
//! assert!(spinning);
//! ```

/// A complete handler table for the two-state container.
///
/// Exactly one method is called per match, chosen by tag.
pub trait MatchCases<T, U> {
    /// Handle `Loaded(value)`.
    fn on_loaded(self, value: T) -> U;

    /// Handle `NotLoaded`.
    fn on_not_loaded(self) -> U;
}

/// A complete handler table for the three-state container.
pub trait LookupCases<T, U> {
    /// Handle `Loaded(value)`.
    fn on_loaded(self, value: T) -> U;

    /// Handle `NotLoaded`.
    fn on_not_loaded(self) -> U;

    /// Handle `NotFound`.
    fn on_not_found(self) -> U;
}

/// Entry point for building handler tables.
#[derive(Clone, Copy, Debug)]
pub struct Cases;

impl Cases {
    /// Start a table with the `Loaded` handler.
    pub fn loaded<L>(loaded: L) -> OnLoaded<L> {
        OnLoaded { loaded }
    }

    /// Start a table with the `NotLoaded` handler.
    pub fn not_loaded<N>(not_loaded: N) -> OnNotLoaded<N> {
        OnNotLoaded { not_loaded }
    }

    /// Start a table with the `NotFound` handler.
    pub fn not_found<F>(not_found: F) -> OnNotFound<F> {
        OnNotFound { not_found }
    }
}

/// Half-built table: has a `Loaded` handler only.
#[derive(Clone, Copy, Debug)]
pub struct OnLoaded<L> {
    loaded: L,
}

impl<L> OnLoaded<L> {
    /// Add the `NotLoaded` handler.
    pub fn not_loaded<N>(self, not_loaded: N) -> Exhaustive<L, N> {
        Exhaustive {
            loaded: self.loaded,
            not_loaded,
        }
    }

    /// Add a fallback for every other tag.
    pub fn otherwise<O>(self, otherwise: O) -> LoadedOr<L, O> {
        LoadedOr {
            loaded: self.loaded,
            otherwise,
        }
    }
}

/// Half-built table: has a `NotLoaded` handler only.
#[derive(Clone, Copy, Debug)]
pub struct OnNotLoaded<N> {
    not_loaded: N,
}

impl<N> OnNotLoaded<N> {
    /// Add the `Loaded` handler.
    pub fn loaded<L>(self, loaded: L) -> Exhaustive<L, N> {
        Exhaustive {
            loaded,
            not_loaded: self.not_loaded,
        }
    }

    /// Add a fallback for every other tag.
    pub fn otherwise<O>(self, otherwise: O) -> NotLoadedOr<N, O> {
        NotLoadedOr {
            not_loaded: self.not_loaded,
            otherwise,
        }
    }
}

/// Half-built table: has a `NotFound` handler only.
#[derive(Clone, Copy, Debug)]
pub struct OnNotFound<F> {
    not_found: F,
}

impl<F> OnNotFound<F> {
    /// Add a fallback for every other tag.
    pub fn otherwise<O>(self, otherwise: O) -> NotFoundOr<F, O> {
        NotFoundOr {
            not_found: self.not_found,
            otherwise,
        }
    }
}

/// Both two-state handlers.
#[derive(Clone, Copy, Debug)]
pub struct Exhaustive<L, N> {
    /// Called with the payload.
    pub loaded: L,
    /// Called when no payload is present yet.
    pub not_loaded: N,
}

impl<L, N> Exhaustive<L, N> {
    /// Extend to the three-state table.
    pub fn not_found<F>(self, not_found: F) -> AllCases<L, N, F> {
        AllCases {
            loaded: self.loaded,
            not_loaded: self.not_loaded,
            not_found,
        }
    }
}

/// `Loaded` handler plus fallback.
#[derive(Clone, Copy, Debug)]
pub struct LoadedOr<L, O> {
    /// Called with the payload.
    pub loaded: L,
    /// Called for every other tag.
    pub otherwise: O,
}

/// `NotLoaded` handler plus fallback.
#[derive(Clone, Copy, Debug)]
pub struct NotLoadedOr<N, O> {
    /// Called when no payload is present yet.
    pub not_loaded: N,
    /// Called for every other tag.
    pub otherwise: O,
}

/// `NotFound` handler plus fallback (three-state only).
#[derive(Clone, Copy, Debug)]
pub struct NotFoundOr<F, O> {
    /// Called when the lookup found nothing.
    pub not_found: F,
    /// Called for every other tag.
    pub otherwise: O,
}

/// All three handlers (three-state only).
#[derive(Clone, Copy, Debug)]
pub struct AllCases<L, N, F> {
    /// Called with the payload.
    pub loaded: L,
    /// Called when no payload is present yet.
    pub not_loaded: N,
    /// Called when the lookup found nothing.
    pub not_found: F,
}

impl<T, U, L, N> MatchCases<T, U> for Exhaustive<L, N>
where
    L: FnOnce(T) -> U,
    N: FnOnce() -> U,
{
    fn on_loaded(self, value: T) -> U {
        (self.loaded)(value)
    }

    fn on_not_loaded(self) -> U {
        (self.not_loaded)()
    }
}

impl<T, U, L, O> MatchCases<T, U> for LoadedOr<L, O>
where
    L: FnOnce(T) -> U,
    O: FnOnce() -> U,
{
    fn on_loaded(self, value: T) -> U {
        (self.loaded)(value)
    }

    fn on_not_loaded(self) -> U {
        (self.otherwise)()
    }
}

impl<T, U, N, O> MatchCases<T, U> for NotLoadedOr<N, O>
where
    N: FnOnce() -> U,
    O: FnOnce() -> U,
{
    fn on_loaded(self, _value: T) -> U {
        (self.otherwise)()
    }

    fn on_not_loaded(self) -> U {
        (self.not_loaded)()
    }
}

impl<T, U, L, O> LookupCases<T, U> for LoadedOr<L, O>
where
    L: FnOnce(T) -> U,
    O: FnOnce() -> U,
{
    fn on_loaded(self, value: T) -> U {
        (self.loaded)(value)
    }

    fn on_not_loaded(self) -> U {
        (self.otherwise)()
    }

    fn on_not_found(self) -> U {
        (self.otherwise)()
    }
}

impl<T, U, N, O> LookupCases<T, U> for NotLoadedOr<N, O>
where
    N: FnOnce() -> U,
    O: FnOnce() -> U,
{
    fn on_loaded(self, _value: T) -> U {
        (self.otherwise)()
    }

    fn on_not_loaded(self) -> U {
        (self.not_loaded)()
    }

    fn on_not_found(self) -> U {
        (self.otherwise)()
    }
}

impl<T, U, F, O> LookupCases<T, U> for NotFoundOr<F, O>
where
    F: FnOnce() -> U,
    O: FnOnce() -> U,
{
    fn on_loaded(self, _value: T) -> U {
        (self.otherwise)()
    }

    fn on_not_loaded(self) -> U {
        (self.otherwise)()
    }

    fn on_not_found(self) -> U {
        (self.not_found)()
    }
}

impl<T, U, L, N, F> LookupCases<T, U> for AllCases<L, N, F>
where
    L: FnOnce(T) -> U,
    N: FnOnce() -> U,
    F: FnOnce() -> U,
{
    fn on_loaded(self, value: T) -> U {
        (self.loaded)(value)
    }

    fn on_not_loaded(self) -> U {
        (self.not_loaded)()
    }

    fn on_not_found(self) -> U {
        (self.not_found)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Loadable;
    use std::cell::Cell;

    #[test]
    fn exhaustive_runs_exactly_one_handler() {
        let loaded_calls = Cell::new(0);
        let pending_calls = Cell::new(0);

        let out = Loadable::from_value(2).match_with(
            Cases::loaded(|x: i32| {
                loaded_calls.set(loaded_calls.get() + 1);
                x * 2
            })
            .not_loaded(|| {
                pending_calls.set(pending_calls.get() + 1);
                0
            }),
        );
        assert_eq!(out, 4);
        assert_eq!((loaded_calls.get(), pending_calls.get()), (1, 0));

        let out = Loadable::<i32>::pending().match_with(
            Cases::not_loaded(|| {
                pending_calls.set(pending_calls.get() + 1);
                -1
            })
            .loaded(|x: i32| {
                loaded_calls.set(loaded_calls.get() + 1);
                x
            }),
        );
        assert_eq!(out, -1);
        assert_eq!((loaded_calls.get(), pending_calls.get()), (1, 1));
    }

    #[test]
    fn loaded_or_falls_back_on_pending() {
        let cases = |l: Loadable<&str>| {
            l.match_with(Cases::loaded(|s: &str| s.len()).otherwise(|| 0))
        };
        assert_eq!(cases(Loadable::from_value("abc")), 3);
        assert_eq!(cases(Loadable::pending()), 0);
    }

    #[test]
    fn not_loaded_or_falls_back_on_loaded() {
        let spinner = |l: Loadable<u8>| {
            l.match_with(NotLoadedOr {
                not_loaded: || "spinner",
                otherwise: || "content",
            })
        };
        assert_eq!(spinner(Loadable::pending()), "spinner");
        assert_eq!(spinner(Loadable::from_value(1)), "content");
    }

    #[test]
    fn struct_literal_matches_builder() {
        let built = Loadable::from_value(5)
            .match_with(Cases::loaded(|x: i32| x + 1).not_loaded(|| 0));
        let literal = Loadable::from_value(5).match_with(Exhaustive {
            loaded: |x: i32| x + 1,
            not_loaded: || 0,
        });
        assert_eq!(built, literal);
    }
}
