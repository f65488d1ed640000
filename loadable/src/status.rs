//! The container tag as a priority lattice.
//!
//! [`Status`] names which variant a container currently is, without
//! its payload. Ordered by priority,
//!
//! ```text
//! Loaded  <  NotLoaded  <  NotFound
//! ```
//!
//! it is a bounded join-semilattice: `join` keeps the higher-priority
//! tag and `Loaded` is bottom. Joining the tags of several containers
//! therefore yields the tag of their combined result, which is exactly
//! the rule `all` follows: everything loaded gives `Loaded`, any
//! `NotFound` wins over any `NotLoaded`.
//!
//! ```rust
//! use loadable::Status;
//! use loadable_algebra::BoundedJoinSemilattice;
//!
//! let tags = [Status::NotLoaded, Status::NotFound, Status::Loaded];
//! assert_eq!(Status::join_all_from_bottom(tags), Status::NotFound);
//! assert_eq!(Status::join_all_from_bottom([]), Status::Loaded);
//! ```

use loadable_algebra::BoundedJoinSemilattice;
use loadable_algebra::JoinSemilattice;

/// The tag of a [`Loadable`](crate::Loadable) or
/// [`Lookup`](crate::Lookup), ordered by join priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// A payload is present.
    Loaded,
    /// The value is not available yet.
    NotLoaded,
    /// The value is known to be absent.
    NotFound,
}

impl Status {
    /// True for [`Status::Loaded`].
    pub fn is_loaded(self) -> bool {
        self == Status::Loaded
    }
}

impl JoinSemilattice for Status {
    fn join(&self, other: &Self) -> Self {
        if self >= other {
            *self
        } else {
            *other
        }
    }
}

impl BoundedJoinSemilattice for Status {
    fn bottom() -> Self {
        Status::Loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadable_algebra::laws;

    const ALL: [Status; 3] = [Status::Loaded, Status::NotLoaded, Status::NotFound];

    #[test]
    fn join_picks_higher_priority() {
        assert_eq!(Status::Loaded.join(&Status::NotLoaded), Status::NotLoaded);
        assert_eq!(Status::NotFound.join(&Status::NotLoaded), Status::NotFound);
        assert_eq!(Status::Loaded.join(&Status::Loaded), Status::Loaded);
    }

    #[test]
    fn lattice_laws() {
        for a in ALL {
            assert!(laws::join_idempotent(&a));
            assert!(laws::bottom_is_identity(&a));
            for b in ALL {
                assert!(laws::join_commutative(&a, &b));
                for c in ALL {
                    assert!(laws::join_associative(&a, &b, &c));
                }
            }
        }
    }

    #[test]
    fn not_found_is_top() {
        for a in ALL {
            assert!(a.leq(&Status::NotFound));
        }
    }
}
