//! Higher-kinded encoding for container types.
//!
//! - [`TypeApp`]: type constructor encoding
//! - [`Functor`]: structure-preserving map over one type parameter
//! - [`Monad`]: `pure` plus a flattening `bind`
//!
//! Rust lacks higher-kinded types, so a container `F<_>` is named by a
//! marker type (the "tag") whose associated type `Applied<X>` is
//! `F<X>`. Laws can then be written once, generically over the tag,
//! and checked with [`crate::laws`].
//!
//! # Example
//!
//! ```rust
//! use loadable_algebra::hkt::{Functor, Monad, TypeApp};
//!
//! struct OptionTag;
//!
//! impl TypeApp for OptionTag {
//!     type Applied<X> = Option<X>;
//! }
//!
//! impl Functor for OptionTag {
//!     fn fmap<X, Y, G>(fx: Option<X>, g: G) -> Option<Y>
//!     where
//!         G: FnMut(X) -> Y,
//!     {
//!         fx.map(g)
//!     }
//! }
//!
//! impl Monad for OptionTag {
//!     fn pure<X>(x: X) -> Option<X> {
//!         Some(x)
//!     }
//!
//!     fn bind<X, Y, G>(mx: Option<X>, g: G) -> Option<Y>
//!     where
//!         G: FnMut(X) -> Option<Y>,
//!     {
//!         mx.and_then(g)
//!     }
//! }
//!
//! let halve = |n: i32| if n % 2 == 0 { Some(n / 2) } else { None };
//! assert_eq!(OptionTag::bind(OptionTag::pure(8), halve), Some(4));
//! ```

/// A **type constructor** encoding via associated types.
///
/// `F : Type → Type` is encoded as a marker type `F` with an
/// associated type `Applied<X>` representing `F(X)`.
pub trait TypeApp {
    /// The result of applying this type constructor to `X`.
    type Applied<X>;
}

/// A **functor** for type constructors.
///
/// Laws (not enforced by type system):
///
/// - **Identity**: `fmap id = id`
/// - **Composition**: `fmap g ∘ fmap f = fmap (g ∘ f)`
pub trait Functor: TypeApp {
    /// Map a function over the holes (type parameter positions).
    fn fmap<X, Y, G>(fx: Self::Applied<X>, g: G) -> Self::Applied<Y>
    where
        G: FnMut(X) -> Y;
}

/// A **monad**: a functor with an injection and a flattening bind.
///
/// Laws (not enforced by type system):
///
/// - **Left identity**: `bind(pure(x), f) == f(x)`
/// - **Right identity**: `bind(m, pure) == m`
/// - **Associativity**:
///   `bind(bind(m, f), g) == bind(m, |x| bind(f(x), g))`
pub trait Monad: Functor {
    /// Inject a plain value.
    fn pure<X>(x: X) -> Self::Applied<X>;

    /// Sequence a computation that itself produces a container.
    fn bind<X, Y, G>(mx: Self::Applied<X>, g: G) -> Self::Applied<Y>
    where
        G: FnMut(X) -> Self::Applied<Y>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laws;

    // A two-slot container: exercises `FnMut` being called more than
    // once per `fmap`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Pair<X>(X, X);

    struct PairTag;

    impl TypeApp for PairTag {
        type Applied<X> = Pair<X>;
    }

    impl Functor for PairTag {
        fn fmap<X, Y, G>(fx: Pair<X>, mut g: G) -> Pair<Y>
        where
            G: FnMut(X) -> Y,
        {
            Pair(g(fx.0), g(fx.1))
        }
    }

    struct VecTag;

    impl TypeApp for VecTag {
        type Applied<X> = Vec<X>;
    }

    impl Functor for VecTag {
        fn fmap<X, Y, G>(fx: Vec<X>, g: G) -> Vec<Y>
        where
            G: FnMut(X) -> Y,
        {
            fx.into_iter().map(g).collect()
        }
    }

    impl Monad for VecTag {
        fn pure<X>(x: X) -> Vec<X> {
            vec![x]
        }

        fn bind<X, Y, G>(mx: Vec<X>, g: G) -> Vec<Y>
        where
            G: FnMut(X) -> Vec<Y>,
        {
            mx.into_iter().flat_map(g).collect()
        }
    }

    #[test]
    fn fmap_visits_every_hole() {
        let mut calls = 0;
        let out = PairTag::fmap(Pair(1, 2), |x| {
            calls += 1;
            x * 10
        });
        assert_eq!(out, Pair(10, 20));
        assert_eq!(calls, 2);
    }

    #[test]
    fn pair_functor_laws() {
        assert!(laws::functor_identity::<PairTag, _>(Pair(3, 4)));
        assert!(laws::functor_composition::<PairTag, _, _, _>(
            Pair(3, 4),
            |x: i32| x + 1,
            |y: i32| y * 2,
        ));
    }

    #[test]
    fn vec_monad_laws() {
        let f = |x: i32| vec![x, x + 1];
        let g = |y: i32| if y % 2 == 0 { vec![y] } else { Vec::new() };

        assert!(laws::monad_left_identity::<VecTag, _, _>(5, f));
        assert!(laws::monad_right_identity::<VecTag, _>(vec![1, 2, 3]));
        assert!(laws::monad_associativity::<VecTag, _, _, _>(
            vec![1, 2, 3],
            f,
            g
        ));
    }
}
