//! The authentication gate.
//!
//! Authentication here is a single persisted flag that decides which
//! screens are rendered. It is not a security boundary: the backend must
//! authorize every request on its own.
//!
//! The flag lives in a per-client [`FlagStore`] (a cookie-backed session in
//! the admin panel, a state file for the CLI). It is read once when a
//! [`SessionGate`] is restored and changes only through
//! [`SessionGate::login`] and [`SessionGate::logout`].

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Storage key of the authentication flag.
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

/// The only stored value that counts as authenticated.
pub const AUTH_FLAG_MARKER: &str = "true";

/// Per-client key/value storage for the flag.
pub trait FlagStore: Send + Sync {
    /// Storage failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a value, `None` if absent.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Write a value, replacing any previous one.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Delete a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Snapshot of the gate, as handed to the navigation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
}

impl Session {
    /// Interpret a stored flag value.
    #[must_use]
    pub fn from_flag(stored: Option<&str>) -> Self {
        Self {
            authenticated: stored == Some(AUTH_FLAG_MARKER),
        }
    }
}

/// The authentication flag bound to its store.
#[derive(Debug)]
pub struct SessionGate<S: FlagStore> {
    store: S,
    session: Session,
}

impl<S: FlagStore> SessionGate<S> {
    /// Read the persisted flag once.
    ///
    /// Anything other than the exact marker, including a storage failure,
    /// restores an unauthenticated gate.
    pub async fn restore(store: S) -> Self {
        let stored = match store.read(AUTH_FLAG_KEY).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to read authentication flag");
                None
            }
        };
        let session = Session::from_flag(stored.as_deref());
        debug!(authenticated = session.authenticated, "Session restored");
        Self { store, session }
    }

    /// Whether restricted screens are visible.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Current snapshot.
    #[must_use]
    pub const fn session(&self) -> Session {
        self.session
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Persist the flag and mark the gate authenticated.
    ///
    /// Called only after the backend accepted the credentials.
    ///
    /// # Errors
    ///
    /// Returns the store error if the flag could not be written; the gate
    /// stays unauthenticated in that case.
    pub async fn login(&mut self) -> Result<(), S::Error> {
        self.store.write(AUTH_FLAG_KEY, AUTH_FLAG_MARKER).await?;
        self.session.authenticated = true;
        Ok(())
    }

    /// Mark the gate unauthenticated and delete the flag.
    ///
    /// # Errors
    ///
    /// Returns the store error if the flag could not be removed. The
    /// in-memory gate is already closed when that happens.
    pub async fn logout(&mut self) -> Result<(), S::Error> {
        self.session.authenticated = false;
        self.store.remove(AUTH_FLAG_KEY).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("storage offline")]
    struct Offline;

    #[derive(Debug, Default)]
    struct MemoryFlags {
        values: Mutex<HashMap<String, String>>,
        offline: bool,
    }

    impl MemoryFlags {
        fn holding(value: &str) -> Self {
            let store = Self::default();
            store
                .values
                .lock()
                .unwrap()
                .insert(AUTH_FLAG_KEY.to_owned(), value.to_owned());
            store
        }

        fn get(&self) -> Option<String> {
            self.values.lock().unwrap().get(AUTH_FLAG_KEY).cloned()
        }
    }

    impl FlagStore for MemoryFlags {
        type Error = Offline;

        async fn read(&self, key: &str) -> Result<Option<String>, Offline> {
            if self.offline {
                return Err(Offline);
            }
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn write(&self, key: &str, value: &str) -> Result<(), Offline> {
            if self.offline {
                return Err(Offline);
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_owned(), value.to_owned());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), Offline> {
            if self.offline {
                return Err(Offline);
            }
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_restore_requires_exact_marker() {
        assert!(SessionGate::restore(MemoryFlags::holding("true")).await.is_authenticated());
        assert!(!SessionGate::restore(MemoryFlags::holding("TRUE")).await.is_authenticated());
        assert!(!SessionGate::restore(MemoryFlags::holding("1")).await.is_authenticated());
        assert!(!SessionGate::restore(MemoryFlags::default()).await.is_authenticated());
    }

    #[tokio::test]
    async fn test_unreadable_store_is_unauthenticated() {
        let store = MemoryFlags {
            offline: true,
            ..MemoryFlags::default()
        };
        assert!(!SessionGate::restore(store).await.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_persists_marker() {
        let mut gate = SessionGate::restore(MemoryFlags::default()).await;
        gate.login().await.unwrap();
        assert!(gate.is_authenticated());
        assert_eq!(gate.store().get().as_deref(), Some(AUTH_FLAG_MARKER));
    }

    #[tokio::test]
    async fn test_logout_removes_flag() {
        let mut gate = SessionGate::restore(MemoryFlags::holding("true")).await;
        gate.logout().await.unwrap();
        assert!(!gate.is_authenticated());
        assert_eq!(gate.store().get(), None);
    }

    #[tokio::test]
    async fn test_failed_login_stays_closed() {
        let mut gate = SessionGate::restore(MemoryFlags {
            offline: true,
            ..MemoryFlags::default()
        })
        .await;
        assert!(gate.login().await.is_err());
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_session_from_flag() {
        assert!(Session::from_flag(Some("true")).authenticated);
        assert!(!Session::from_flag(Some("false")).authenticated);
        assert!(!Session::from_flag(None).authenticated);
    }
}
