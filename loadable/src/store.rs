#![cfg(feature = "async")]
//! Owned authentication state with read-only selectors.
//!
//! [`AuthStore`] holds one [`AuthState`]: the session as a
//! [`Loadable<Auth>`] plus a flag recording whether the session has
//! been checked with the server at least once. Handles are cheap to
//! clone and all observe the same state. Reads go through selectors;
//! writes go through exactly three entry points:
//!
//! - [`set_auth`](AuthStore::set_auth) persists the token (if any) and
//!   marks the session loaded,
//! - [`set_checked`](AuthStore::set_checked) records the first check,
//! - [`reset`](AuthStore::reset) clears the persisted token and
//!   restores the defaults in a single update.
//!
//! Token persistence is delegated to a [`TokenStore`].
//!
//! ```rust
//! use loadable::store::{Auth, AuthStore, MemoryTokenStore, TokenStore};
//!
//! let tokens = MemoryTokenStore::default();
//! let store = AuthStore::new(tokens.clone());
//! assert!(!store.is_authenticated());
//!
//! store.set_auth(Auth::authenticated("t0k3n"));
//! store.set_checked();
//! assert!(store.is_authenticated());
//! assert_eq!(tokens.load().as_deref(), Some("t0k3n"));
//!
//! store.reset();
//! assert!(store.auth().is_not_loaded());
//! assert_eq!(tokens.load(), None);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use tokio::sync::watch;

use crate::cases::Cases;
use crate::loadable::Loadable;

/// A session as reported by the server.
#[derive(Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Auth {
    /// Whether the session is authenticated.
    pub is_authenticated: bool,
    /// Bearer token for the session, if the server issued one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub token: Option<String>,
}

impl Auth {
    /// An authenticated session carrying `token`.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            token: Some(token.into()),
        }
    }

    /// A session the server did not authenticate.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

// Tokens never appear in debug output or logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("is_authenticated", &self.is_authenticated)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything the store holds.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AuthState {
    /// The session; `NotLoaded` until the server answers.
    pub auth: Loadable<Auth>,
    /// Whether the session has been checked at least once.
    pub is_checked: bool,
}

/// Where the session token is persisted between runs.
///
/// There is one slot. A cookie that is written only when absent and a
/// storage entry that is always overwritten collapse into it with the
/// overwrite rule: the newest token the server issued wins.
pub trait TokenStore: Send + Sync {
    /// The persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous one.
    fn store(&self, token: &str);

    /// Forget the persisted token.
    fn clear(&self);
}

/// In-process [`TokenStore`]. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTokenStore")
            .field("has_token", &self.load().is_some())
            .finish()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Shared handle to the authentication state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<AuthState>,
    tokens: Box<dyn TokenStore>,
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    /// A store in the default state, persisting tokens to `tokens`.
    pub fn new<S>(tokens: S) -> Self
    where
        S: TokenStore + 'static,
    {
        let (state, _rx) = watch::channel(AuthState::default());
        Self {
            inner: Arc::new(Inner {
                state,
                tokens: Box::new(tokens),
            }),
        }
    }

    /// The session.
    pub fn auth(&self) -> Loadable<Auth> {
        self.inner.state.borrow().auth.clone()
    }

    /// Whether the session has been checked at least once.
    pub fn is_checked(&self) -> bool {
        self.inner.state.borrow().is_checked
    }

    /// True only for a loaded, authenticated session.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().auth.as_ref().match_with(
            Cases::loaded(|auth: &Auth| auth.is_authenticated).not_loaded(|| false),
        )
    }

    /// A snapshot of the whole state.
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// A receiver observing every state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// The token currently persisted by the token store.
    pub fn persisted_token(&self) -> Option<String> {
        self.inner.tokens.load()
    }

    /// Record the server's answer. A token, if present, is persisted
    /// before the state changes and replaces any token already stored.
    /// An answer without a token leaves the stored one alone.
    pub fn set_auth(&self, auth: Auth) {
        if let Some(token) = auth.token.as_deref() {
            self.inner.tokens.store(token);
        }
        tracing::debug!(
            is_authenticated = auth.is_authenticated,
            has_token = auth.token.is_some(),
            "auth set"
        );
        self.inner.state.send_modify(|state| state.auth = Loadable::Loaded(auth));
    }

    /// Record that the session has been checked.
    pub fn set_checked(&self) {
        let changed = self.inner.state.send_if_modified(|state| {
            let changed = !state.is_checked;
            state.is_checked = true;
            changed
        });
        if changed {
            tracing::debug!("auth checked");
        }
    }

    /// Forget the session: clear the persisted token and restore the
    /// default state. Subscribers see one change, never a half-reset
    /// state.
    pub fn reset(&self) {
        self.inner.tokens.clear();
        self.inner.state.send_replace(AuthState::default());
        tracing::debug!("auth reset");
    }
}

#[cfg(all(test, feature = "async"))]
mod tests {
    use super::*;

    fn store() -> (AuthStore, MemoryTokenStore) {
        let tokens = MemoryTokenStore::default();
        (AuthStore::new(tokens.clone()), tokens)
    }

    #[test]
    fn starts_in_default_state() {
        let (store, tokens) = store();
        assert_eq!(store.state(), AuthState::default());
        assert!(store.auth().is_not_loaded());
        assert!(!store.is_checked());
        assert!(!store.is_authenticated());
        assert_eq!(tokens.load(), None);
    }

    #[test]
    fn set_auth_persists_token_and_loads() {
        let (store, tokens) = store();
        store.set_auth(Auth::authenticated("abc"));
        assert_eq!(tokens.load().as_deref(), Some("abc"));
        assert_eq!(store.persisted_token().as_deref(), Some("abc"));
        assert_eq!(store.auth(), Loadable::Loaded(Auth::authenticated("abc")));
        assert!(store.is_authenticated());
        // Checking is a separate step.
        assert!(!store.is_checked());
    }

    #[test]
    fn newer_token_replaces_persisted_one() {
        let (store, tokens) = store();
        store.set_auth(Auth::authenticated("first"));
        store.set_auth(Auth::authenticated("second"));
        assert_eq!(tokens.load().as_deref(), Some("second"));
        assert_eq!(store.auth(), Loadable::Loaded(Auth::authenticated("second")));
    }

    #[test]
    fn anonymous_session_is_loaded_but_not_authenticated() {
        let (store, tokens) = store();
        tokens.store("old");
        store.set_auth(Auth::anonymous());
        assert!(store.auth().is_loaded());
        assert!(!store.is_authenticated());
        // No token in the answer: the persisted one is left alone.
        assert_eq!(tokens.load().as_deref(), Some("old"));
    }

    #[test]
    fn reset_clears_token_and_state() {
        let (store, tokens) = store();
        store.set_auth(Auth::authenticated("abc"));
        store.set_checked();
        store.reset();
        assert_eq!(tokens.load(), None);
        assert_eq!(store.state(), AuthState::default());
    }

    #[tokio::test]
    async fn subscribers_see_reset_as_one_change() {
        let (store, _tokens) = store();
        store.set_auth(Auth::authenticated("abc"));
        store.set_checked();

        let mut rx = store.subscribe();
        store.reset();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthState::default());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn set_checked_is_idempotent() {
        let (store, _tokens) = store();
        let rx = store.subscribe();
        store.set_checked();
        assert!(rx.has_changed().unwrap());

        let rx = store.subscribe();
        store.set_checked();
        assert!(!rx.has_changed().unwrap());
        assert!(store.is_checked());
    }

    #[test]
    fn clones_share_state() {
        let (store, _tokens) = store();
        let other = store.clone();
        other.set_auth(Auth::authenticated("x"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", Auth::authenticated("secret-token"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("redacted"));
    }
}
