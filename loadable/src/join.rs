//! Joining several containers into one.
//!
//! [`all`] takes a tuple of containers (arity 1 to 8, payload types may
//! differ) and returns one container of the tuple of payloads:
//!
//! - tuples of [`Loadable`]: `Loaded` iff every element is loaded. The
//!   scan runs left to right and returns at the first `NotLoaded`.
//! - tuples of [`Lookup`]: the result tag is the [`Status`] join of
//!   the element tags, so `NotFound` takes priority over `NotLoaded`.
//!   The scan returns at the first `NotFound`.
//!
//! ```rust
//! use loadable::{all, Loadable, Lookup};
//!
//! let user = Loadable::from_value("ada");
//! let perms = Loadable::from_value(vec!["admin"]);
//! let flags = Loadable::<u32>::pending();
//! assert_eq!(all((user, perms.clone(), flags)), Loadable::NotLoaded);
//! assert_eq!(
//!     all((user, perms, Loadable::from_value(3u32))),
//!     Loadable::Loaded(("ada", vec!["admin"], 3)),
//! );
//!
//! let found = all((Lookup::<u8>::NotLoaded, Lookup::<u8>::NotFound, Lookup::Loaded(4)));
//! assert_eq!(found, Lookup::NotFound);
//! ```
//!
//! Homogeneous collections join through [`FromIterator`]: collecting
//! an iterator of `Loadable<A>` into `Loadable<V>` (for any
//! `V: FromIterator<A>`) yields `Loaded` of the collection iff every
//! item is loaded, the same way `Option` collects.
//!
//! ```rust
//! use loadable::Loadable;
//!
//! let pages: Loadable<Vec<u32>> = (1..=3).map(Loadable::from_value).collect();
//! assert_eq!(pages, Loadable::Loaded(vec![1, 2, 3]));
//! ```

use loadable_algebra::BoundedJoinSemilattice;
use loadable_algebra::JoinSemilattice;

use crate::loadable::Loadable;
use crate::lookup::Lookup;
use crate::status::Status;

/// A fixed-arity group of containers that can be joined into one.
pub trait Join {
    /// The joined container.
    type Output;

    /// Join every element into one container of the tuple of payloads.
    fn all(self) -> Self::Output;
}

/// Join a tuple of containers. See the [module docs](self).
pub fn all<J: Join>(containers: J) -> J::Output {
    containers.all()
}

macro_rules! impl_join {
    ( $( $T:ident $v:ident ),+ ) => {
        impl<$( $T ),+> Join for ( $( Loadable<$T>, )+ ) {
            type Output = Loadable<( $( $T, )+ )>;

            fn all(self) -> Self::Output {
                let ( $( $v, )+ ) = self;
                $(
                    let Loadable::Loaded($v) = $v else {
                        return Loadable::NotLoaded;
                    };
                )+
                Loadable::Loaded(( $( $v, )+ ))
            }
        }

        impl<$( $T ),+> Join for ( $( Lookup<$T>, )+ ) {
            type Output = Lookup<( $( $T, )+ )>;

            fn all(self) -> Self::Output {
                let ( $( $v, )+ ) = self;
                let mut status = Status::bottom();
                $(
                    status.join_assign(&$v.status());
                    if status == Status::NotFound {
                        return Lookup::NotFound;
                    }
                )+
                match ( $( $v, )+ ) {
                    ( $( Lookup::Loaded($v), )+ ) => Lookup::Loaded(( $( $v, )+ )),
                    _ => Lookup::NotLoaded,
                }
            }
        }
    };
}

impl_join!(A a);
impl_join!(A a, B b);
impl_join!(A a, B b, C c);
impl_join!(A a, B b, C c, D d);
impl_join!(A a, B b, C c, D d, E e);
impl_join!(A a, B b, C c, D d, E e, F f);
impl_join!(A a, B b, C c, D d, E e, F f, G g);
impl_join!(A a, B b, C c, D d, E e, F f, G g, H h);

impl<A, V> FromIterator<Loadable<A>> for Loadable<V>
where
    V: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Loadable<A>>>(iter: I) -> Self {
        let mut pending = false;
        let collected: V = iter
            .into_iter()
            .map_while(|l| match l {
                Loadable::Loaded(x) => Some(x),
                Loadable::NotLoaded => {
                    pending = true;
                    None
                }
            })
            .collect();
        if pending {
            Loadable::NotLoaded
        } else {
            Loadable::Loaded(collected)
        }
    }
}

impl<A, V> FromIterator<Lookup<A>> for Lookup<V>
where
    V: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Lookup<A>>>(iter: I) -> Self {
        let mut status = Status::bottom();
        let mut values = Vec::new();
        for l in iter {
            match l {
                Lookup::Loaded(x) if status.is_loaded() => values.push(x),
                Lookup::Loaded(_) => {}
                Lookup::NotLoaded => status = Status::NotLoaded,
                Lookup::NotFound => return Lookup::NotFound,
            }
        }
        if status.is_loaded() {
            Lookup::Loaded(values.into_iter().collect())
        } else {
            Lookup::NotLoaded
        }
    }
}
