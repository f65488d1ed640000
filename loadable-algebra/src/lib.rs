#![deny(missing_docs)]
//! # loadable-algebra — algebraic kernel for the `loadable` workspace
//!
//! This crate provides the small set of algebraic structures the
//! `loadable` containers are specified against:
//!
//! - [`JoinSemilattice`]: associative, commutative, idempotent operation
//! - [`BoundedJoinSemilattice`]: join-semilattice with bottom element
//! - [`hkt::TypeApp`], [`hkt::Functor`], [`hkt::Monad`]: a
//!   higher-kinded encoding so container laws can be stated once
//! - [`laws`]: executable checkers for the functor, monad and lattice
//!   laws, usable from unit tests and property tests
//!
//! ## Quick start
//!
//! ```rust
//! use loadable_algebra::{BoundedJoinSemilattice, JoinSemilattice};
//!
//! // Booleans under OR: false is bottom
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! struct Any(bool);
//!
//! impl JoinSemilattice for Any {
//!     fn join(&self, other: &Self) -> Self {
//!         Any(self.0 || other.0)
//!     }
//! }
//!
//! impl BoundedJoinSemilattice for Any {
//!     fn bottom() -> Self {
//!         Any(false)
//!     }
//! }
//!
//! assert_eq!(Any(false).join(&Any(true)), Any(true));
//! assert_eq!(Any::join_all_from_bottom([]), Any(false));
//! ```
//!
//! [`BTreeSet<T>`](std::collections::BTreeSet) is a lattice out of
//! the box: union as join, empty set as bottom.

/// Higher-kinded encoding: type constructors, functors and monads.
pub mod hkt;

/// Executable algebraic laws.
pub mod laws;

pub use hkt::Functor;
pub use hkt::Monad;
pub use hkt::TypeApp;

use std::collections::BTreeSet;

/// A **join-semilattice**: a type with an associative, commutative,
/// idempotent binary operation.
///
/// Laws (not enforced by type system):
///
/// - **Associative**: `a.join(b).join(c) == a.join(b.join(c))`
/// - **Commutative**: `a.join(b) == b.join(a)`
/// - **Idempotent**: `a.join(a) == a`
///
/// The `join` operation computes the least upper bound in the induced
/// partial order: `x ≤ y` iff `x.join(y) == y`.
pub trait JoinSemilattice: Sized {
    /// The join (least upper bound).
    fn join(&self, other: &Self) -> Self;

    /// In-place variant.
    fn join_assign(&mut self, other: &Self) {
        *self = self.join(other);
    }

    /// Derived partial order: x ≤ y iff x ∨ y = y.
    fn leq(&self, other: &Self) -> bool
    where
        Self: PartialEq,
    {
        self.join(other) == *other
    }

    /// Join a finite iterator of values. Returns `None` for empty iterators.
    fn join_all<I>(it: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        it.into_iter().reduce(|acc, x| acc.join(&x))
    }
}

/// A **bounded join-semilattice**: a join-semilattice with a bottom element.
///
/// Laws (not enforced by type system):
///
/// - all [`JoinSemilattice`] laws
/// - **Identity**: `bottom().join(a) == a == a.join(bottom())`
pub trait BoundedJoinSemilattice: JoinSemilattice {
    /// The bottom element of the lattice (⊥).
    fn bottom() -> Self;

    /// Join a finite iterator of values, starting from ⊥.
    ///
    /// Never returns `None`: an empty iterator produces `bottom()`.
    fn join_all_from_bottom<I>(it: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        it.into_iter().fold(Self::bottom(), |acc, x| acc.join(&x))
    }
}

// Union as join.
impl<T: Ord + Clone> JoinSemilattice for BTreeSet<T> {
    fn join(&self, other: &Self) -> Self {
        self.union(other).cloned().collect()
    }
}

impl<T: Ord + Clone> BoundedJoinSemilattice for BTreeSet<T> {
    fn bottom() -> Self {
        BTreeSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Max(u8);

    impl JoinSemilattice for Max {
        fn join(&self, other: &Self) -> Self {
            Max(self.0.max(other.0))
        }
    }

    impl BoundedJoinSemilattice for Max {
        fn bottom() -> Self {
            Max(0)
        }
    }

    #[test]
    fn leq_follows_join() {
        assert!(Max(1).leq(&Max(3)));
        assert!(!Max(3).leq(&Max(1)));
        assert!(Max(2).leq(&Max(2)));
    }

    #[test]
    fn join_all_empty_is_none() {
        assert_eq!(Max::join_all(Vec::new()), None);
        assert_eq!(Max::join_all([Max(2), Max(7), Max(4)]), Some(Max(7)));
    }

    #[test]
    fn join_all_from_bottom_empty_is_bottom() {
        assert_eq!(Max::join_all_from_bottom(Vec::new()), Max::bottom());
    }

    #[test]
    fn join_assign_updates_in_place() {
        let mut m = Max(2);
        m.join_assign(&Max(5));
        assert_eq!(m, Max(5));
    }

    #[test]
    fn set_join_is_union() {
        let a: BTreeSet<_> = [1, 2].into_iter().collect();
        let b: BTreeSet<_> = [2, 3].into_iter().collect();
        assert_eq!(a.join(&b), [1, 2, 3].into_iter().collect());
        assert!(BTreeSet::<i32>::bottom().is_empty());
        assert!(a.leq(&a.join(&b)));
        assert!(!a.leq(&b));
    }

    #[test]
    fn lattice_laws_hold_for_max() {
        for a in 0..4u8 {
            for b in 0..4u8 {
                assert!(laws::join_commutative(&Max(a), &Max(b)));
                for c in 0..4u8 {
                    assert!(laws::join_associative(&Max(a), &Max(b), &Max(c)));
                }
            }
            assert!(laws::join_idempotent(&Max(a)));
            assert!(laws::bottom_is_identity(&Max(a)));
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_set() -> impl Strategy<Value = BTreeSet<u8>> {
            prop::collection::btree_set(0..16u8, 0..6)
        }

        proptest! {
            #[test]
            fn set_lattice_laws(a in arb_set(), b in arb_set(), c in arb_set()) {
                prop_assert!(laws::join_associative(&a, &b, &c));
                prop_assert!(laws::join_commutative(&a, &b));
                prop_assert!(laws::join_idempotent(&a));
                prop_assert!(laws::bottom_is_identity(&a));
                prop_assert!(a.leq(&a.join(&b)));
            }
        }
    }
}
