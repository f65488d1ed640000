//! Functor and monad instances for the containers.
//!
//! [`LoadableTag`] and [`LookupTag`] name `Loadable<_>` and `Lookup<_>`
//! in the higher-kinded encoding of [`loadable_algebra::hkt`], so the
//! generic law checkers in [`loadable_algebra::laws`] apply to them:
//!
//! ```rust
//! use loadable::hkt::LoadableTag;
//! use loadable::Loadable;
//! use loadable_algebra::laws;
//!
//! assert!(laws::monad_left_identity::<LoadableTag, _, _>(2, |x: i32| {
//!     Loadable::from_value(x + 1)
//! }));
//! assert!(laws::functor_identity::<LoadableTag, i32>(Loadable::pending()));
//! ```
//!
//! `fmap` is [`Loadable::map`], `pure` is [`Loadable::from_value`] and
//! `bind` is [`Loadable::flat_map`]; the same holds for [`Lookup`].

use loadable_algebra::Functor;
use loadable_algebra::Monad;
use loadable_algebra::TypeApp;

use crate::loadable::Loadable;
use crate::lookup::Lookup;

/// Type-constructor tag for [`Loadable`].
#[derive(Clone, Copy, Debug)]
pub struct LoadableTag;

/// Type-constructor tag for [`Lookup`].
#[derive(Clone, Copy, Debug)]
pub struct LookupTag;

impl TypeApp for LoadableTag {
    type Applied<X> = Loadable<X>;
}

impl Functor for LoadableTag {
    fn fmap<X, Y, G>(fx: Loadable<X>, g: G) -> Loadable<Y>
    where
        G: FnMut(X) -> Y,
    {
        fx.map(g)
    }
}

impl Monad for LoadableTag {
    fn pure<X>(x: X) -> Loadable<X> {
        Loadable::from_value(x)
    }

    fn bind<X, Y, G>(mx: Loadable<X>, g: G) -> Loadable<Y>
    where
        G: FnMut(X) -> Loadable<Y>,
    {
        mx.flat_map(g)
    }
}

impl TypeApp for LookupTag {
    type Applied<X> = Lookup<X>;
}

impl Functor for LookupTag {
    fn fmap<X, Y, G>(fx: Lookup<X>, g: G) -> Lookup<Y>
    where
        G: FnMut(X) -> Y,
    {
        fx.map(g)
    }
}

impl Monad for LookupTag {
    fn pure<X>(x: X) -> Lookup<X> {
        Lookup::from_value(x)
    }

    fn bind<X, Y, G>(mx: Lookup<X>, g: G) -> Lookup<Y>
    where
        G: FnMut(X) -> Lookup<Y>,
    {
        mx.flat_map(g)
    }
}
