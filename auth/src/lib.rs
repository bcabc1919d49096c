//! Credential storage for the Photos API.
//!
//! The access token is obtained out of band (the OAuth dance is not this
//! crate's concern) and kept in the system keyring. Setting the
//! `MOCK_KEYRING` environment variable switches to an in-memory store so
//! tests never touch real credentials; `MOCK_ACCESS_TOKEN` seeds it.

use keyring::Entry;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

const KEYRING_SERVICE_NAME: &str = "photofetch";
const ACCESS_TOKEN_USER: &str = "access_token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
    #[error("no access token stored")]
    NoToken,
    #[error("mock credential store poisoned")]
    MockStore,
}

static MOCK_STORE: Lazy<Mutex<HashMap<String, String>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn mock_enabled() -> bool {
    std::env::var("MOCK_KEYRING").is_ok()
}

pub fn store_access_token(token: &str) -> Result<(), AuthError> {
    if mock_enabled() {
        let mut store = MOCK_STORE.lock().map_err(|_| AuthError::MockStore)?;
        store.insert(ACCESS_TOKEN_USER.to_string(), token.to_string());
        return Ok(());
    }
    let entry = Entry::new(KEYRING_SERVICE_NAME, ACCESS_TOKEN_USER)?;
    entry.set_password(token)?;
    Ok(())
}

pub fn get_access_token() -> Result<String, AuthError> {
    if mock_enabled() {
        let store = MOCK_STORE.lock().map_err(|_| AuthError::MockStore)?;
        if let Some(token) = store.get(ACCESS_TOKEN_USER) {
            return Ok(token.clone());
        }
        return std::env::var("MOCK_ACCESS_TOKEN").map_err(|_| AuthError::NoToken);
    }
    let entry = Entry::new(KEYRING_SERVICE_NAME, ACCESS_TOKEN_USER)?;
    match entry.get_password() {
        Ok(token) => Ok(token),
        Err(keyring::Error::NoEntry) => Err(AuthError::NoToken),
        Err(e) => Err(e.into()),
    }
}

pub fn clear_access_token() -> Result<(), AuthError> {
    if mock_enabled() {
        let mut store = MOCK_STORE.lock().map_err(|_| AuthError::MockStore)?;
        store.remove(ACCESS_TOKEN_USER);
        return Ok(());
    }
    let entry = Entry::new(KEYRING_SERVICE_NAME, ACCESS_TOKEN_USER)?;
    match entry.delete_password() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// The credential as the rest of the system sees it: present or absent.
pub fn access_token() -> Option<String> {
    get_access_token().ok()
}

/// Sign-in state with a single registered observer.
///
/// The handler is invoked synchronously on every state transition and
/// replayed once with the current state at registration time, so late
/// registrants do not miss an already-signed-in session.
#[derive(Default)]
pub struct SignInNotifier {
    signed_in: bool,
    handler: Option<Box<dyn FnMut(bool) + Send>>,
}

impl SignInNotifier {
    pub fn new(signed_in: bool) -> Self {
        SignInNotifier {
            signed_in,
            handler: None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    /// Register the handler, replacing any previous one. The handler is
    /// called immediately with the current state.
    pub fn set_handler(&mut self, mut handler: impl FnMut(bool) + Send + 'static) {
        handler(self.signed_in);
        self.handler = Some(Box::new(handler));
    }

    /// Record a sign-in state change. The handler fires only on an
    /// actual transition.
    pub fn set_signed_in(&mut self, signed_in: bool) {
        if signed_in == self.signed_in {
            return;
        }
        self.signed_in = signed_in;
        tracing::info!(signed_in, "sign-in state changed");
        if let Some(handler) = &mut self.handler {
            handler(signed_in);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::{Arc, Mutex};

    #[test]
    #[serial]
    fn test_mock_store_roundtrip() {
        std::env::set_var("MOCK_KEYRING", "1");
        store_access_token("secret").unwrap();
        assert_eq!(get_access_token().unwrap(), "secret");
        assert_eq!(access_token().as_deref(), Some("secret"));

        clear_access_token().unwrap();
        assert!(matches!(get_access_token(), Err(AuthError::NoToken)));
        assert!(access_token().is_none());
        std::env::remove_var("MOCK_KEYRING");
    }

    #[test]
    #[serial]
    fn test_mock_env_token_fallback() {
        std::env::set_var("MOCK_KEYRING", "1");
        clear_access_token().unwrap();
        std::env::set_var("MOCK_ACCESS_TOKEN", "env_token");
        assert_eq!(get_access_token().unwrap(), "env_token");
        std::env::remove_var("MOCK_ACCESS_TOKEN");
        std::env::remove_var("MOCK_KEYRING");
    }

    #[test]
    fn test_notifier_replays_state_at_registration() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        let mut notifier = SignInNotifier::new(true);
        notifier.set_handler(move |signed_in| seen_clone.lock().unwrap().push(signed_in));

        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_notifier_fires_only_on_transition() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        let mut notifier = SignInNotifier::new(false);
        notifier.set_handler(move |signed_in| seen_clone.lock().unwrap().push(signed_in));

        notifier.set_signed_in(false); // no transition
        notifier.set_signed_in(true);
        notifier.set_signed_in(true); // no transition
        notifier.set_signed_in(false);

        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
        assert!(!notifier.is_signed_in());
    }
}
