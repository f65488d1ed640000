//! Executable algebraic laws.
//!
//! Each function evaluates both sides of one law for the given inputs
//! and returns whether they agree. The container is named by its
//! [`TypeApp`](crate::hkt::TypeApp) tag, so call sites spell it with a
//! turbofish:
//!
//! ```rust
//! use loadable_algebra::hkt::{Functor, TypeApp};
//! use loadable_algebra::laws;
//!
//! struct OptionTag;
//!
//! impl TypeApp for OptionTag {
//!     type Applied<X> = Option<X>;
//! }
//!
//! impl Functor for OptionTag {
//!     fn fmap<X, Y, G: FnMut(X) -> Y>(fx: Option<X>, g: G) -> Option<Y> {
//!         fx.map(g)
//!     }
//! }
//!
//! assert!(laws::functor_identity::<OptionTag, _>(Some(1)));
//! assert!(laws::functor_composition::<OptionTag, _, _, _>(
//!     None::<i32>,
//!     |x| x + 1,
//!     |y| y * 2,
//! ));
//! ```

use crate::hkt::Functor;
use crate::hkt::Monad;
use crate::BoundedJoinSemilattice;
use crate::JoinSemilattice;

/// `fmap(fx, id) == fx`
pub fn functor_identity<F, X>(fx: F::Applied<X>) -> bool
where
    F: Functor,
    F::Applied<X>: Clone + PartialEq,
{
    F::fmap::<X, X, _>(fx.clone(), |x| x) == fx
}

/// `fmap(fmap(fx, f), g) == fmap(fx, |x| g(f(x)))`
pub fn functor_composition<F, X, Y, Z>(
    fx: F::Applied<X>,
    f: impl Fn(X) -> Y,
    g: impl Fn(Y) -> Z,
) -> bool
where
    F: Functor,
    F::Applied<X>: Clone,
    F::Applied<Z>: PartialEq,
{
    let lhs = F::fmap::<Y, Z, _>(F::fmap::<X, Y, _>(fx.clone(), &f), &g);
    let rhs = F::fmap::<X, Z, _>(fx, |x| g(f(x)));
    lhs == rhs
}

/// `bind(pure(x), f) == f(x)`
pub fn monad_left_identity<F, X, Y>(x: X, f: impl Fn(X) -> F::Applied<Y>) -> bool
where
    F: Monad,
    X: Clone,
    F::Applied<Y>: PartialEq,
{
    F::bind::<X, Y, _>(F::pure(x.clone()), &f) == f(x)
}

/// `bind(m, pure) == m`
pub fn monad_right_identity<F, X>(mx: F::Applied<X>) -> bool
where
    F: Monad,
    F::Applied<X>: Clone + PartialEq,
{
    F::bind::<X, X, _>(mx.clone(), |x| F::pure(x)) == mx
}

/// `bind(bind(m, f), g) == bind(m, |x| bind(f(x), g))`
pub fn monad_associativity<F, X, Y, Z>(
    mx: F::Applied<X>,
    f: impl Fn(X) -> F::Applied<Y>,
    g: impl Fn(Y) -> F::Applied<Z>,
) -> bool
where
    F: Monad,
    F::Applied<X>: Clone,
    F::Applied<Z>: PartialEq,
{
    let lhs = F::bind::<Y, Z, _>(F::bind::<X, Y, _>(mx.clone(), &f), &g);
    let rhs = F::bind::<X, Z, _>(mx, |x| F::bind::<Y, Z, _>(f(x), &g));
    lhs == rhs
}

/// `a ∨ (b ∨ c) == (a ∨ b) ∨ c`
pub fn join_associative<L>(a: &L, b: &L, c: &L) -> bool
where
    L: JoinSemilattice + PartialEq,
{
    a.join(&b.join(c)) == a.join(b).join(c)
}

/// `a ∨ b == b ∨ a`
pub fn join_commutative<L>(a: &L, b: &L) -> bool
where
    L: JoinSemilattice + PartialEq,
{
    a.join(b) == b.join(a)
}

/// `a ∨ a == a`
pub fn join_idempotent<L>(a: &L) -> bool
where
    L: JoinSemilattice + PartialEq,
{
    a.join(a) == *a
}

/// `⊥ ∨ a == a == a ∨ ⊥`
pub fn bottom_is_identity<L>(a: &L) -> bool
where
    L: BoundedJoinSemilattice + PartialEq,
{
    let bottom = L::bottom();
    bottom.join(a) == *a && a.join(&bottom) == *a
}
