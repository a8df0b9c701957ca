//! Session teardown coordination.
//!
//! Any authenticated call that sees HTTP 401 must be able to force a global
//! logout. Instead of a module-level mutable singleton, the client layer is
//! handed a [`SessionManager`] at construction: a single re-registerable
//! `on_session_expired` slot (written once by the session-owning component,
//! read by every failing call) with a fallback that clears the persisted
//! credential keys directly when no handler has been registered.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::warn;

/// Storage key for the serialized session user object.
pub const STORAGE_KEY_USER: &str = "gatepass_user";
/// Storage key for the bearer access token.
pub const STORAGE_KEY_TOKEN: &str = "gatepass_token";
/// Storage key for the refresh token.
pub const STORAGE_KEY_REFRESH: &str = "gatepass_refresh_token";

/// Persistence surface for the session user, access token, and refresh token.
///
/// The caller owns where these live (browser storage, keychain, a file); the
/// client layer only ever clears them atomically during session teardown.
pub trait SessionStore: Send + Sync {
    /// Stores a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Returns the value stored under a key, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Removes a key. Absent keys are ignored.
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStore`] used as the default and in tests.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemorySessionStore {
    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

type ExpiredHandler = Box<dyn Fn() + Send + Sync>;

/// Process-wide session teardown handle.
///
/// Single-writer (the session provider registers its handler once at
/// startup), multi-reader (any failing authenticated call may invoke it).
/// The handler slot is re-registerable so tests can swap it out.
pub struct SessionManager {
    handler: RwLock<Option<ExpiredHandler>>,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    /// Creates a manager backed by the given store, with no handler
    /// registered yet.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            handler: RwLock::new(None),
            store,
        }
    }

    /// Registers (or replaces) the session-expiration handler.
    pub fn on_session_expired<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let Ok(mut slot) = self.handler.write() {
            *slot = Some(Box::new(handler));
        }
    }

    /// Removes any registered handler, restoring the clear-storage fallback.
    pub fn reset(&self) {
        if let Ok(mut slot) = self.handler.write() {
            *slot = None;
        }
    }

    /// Invoked by the HTTP layer on every 401 response.
    ///
    /// Calls the registered handler when present; otherwise clears the three
    /// persisted credential keys so the next screen load lands on login.
    pub fn notify_expired(&self) {
        match self.handler.read() {
            Ok(slot) => match slot.as_ref() {
                Some(handler) => handler(),
                None => {
                    warn!("session expired with no handler registered, clearing stored credentials");
                    self.store.remove(STORAGE_KEY_USER);
                    self.store.remove(STORAGE_KEY_TOKEN);
                    self.store.remove(STORAGE_KEY_REFRESH);
                }
            },
            Err(_) => warn!("session handler lock poisoned, skipping teardown"),
        }
    }

    /// The backing store, for callers that persist the session themselves.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }
}
