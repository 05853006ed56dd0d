//! Browser-side state: the page-lifetime session and preference stores,
//! and cancellable timers for the simulated wallet connection.
//!
//! In the browser the stores persist to `localStorage`. During server
//! rendering they are in-memory and never written; reads and writes only
//! happen from effects and event handlers, which run on the client.

use drugledger_platform_access::{PreferenceStore, SessionStore};
use leptos::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[cfg(feature = "hydrate")]
pub use browser::BrowserStore;

/// Storage backend for the current build target.
#[cfg(feature = "hydrate")]
pub type ClientStore = BrowserStore;
#[cfg(not(feature = "hydrate"))]
pub type ClientStore = drugledger_platform_access::MemoryStore;

#[cfg(feature = "hydrate")]
fn client_backend() -> ClientStore {
    BrowserStore::local()
}

#[cfg(not(feature = "hydrate"))]
fn client_backend() -> ClientStore {
    ClientStore::new()
}

thread_local! {
    static SESSION: SessionStore<ClientStore> = SessionStore::new(client_backend());
    static PREFERENCES: PreferenceStore<ClientStore> = PreferenceStore::new(client_backend());
}

/// Runs `f` against the page's session store.
pub fn with_session<R>(f: impl FnOnce(&SessionStore<ClientStore>) -> R) -> R {
    SESSION.with(f)
}

/// Runs `f` against the page's preference store.
pub fn with_preferences<R>(f: impl FnOnce(&PreferenceStore<ClientStore>) -> R) -> R {
    PREFERENCES.with(f)
}

/// The browser's reported language tag, e.g. `es-MX`.
pub fn browser_language() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|window| window.navigator().language())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use drugledger_platform_access::{KeyValueStore, StorageError};
    use rootcause::prelude::Report;
    use wasm_bindgen::JsValue;

    /// `localStorage` for the page's origin.
    ///
    /// Holds `None` when the browser refuses access (privacy modes,
    /// sandboxed frames); every operation then fails as unavailable.
    #[derive(Debug, Clone)]
    pub struct BrowserStore {
        storage: Option<web_sys::Storage>,
    }

    impl BrowserStore {
        /// Opens the window's `localStorage`.
        pub fn local() -> Self {
            let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
            if storage.is_none() {
                tracing::warn!("localStorage is not available");
            }
            Self { storage }
        }

        fn storage(&self) -> Result<&web_sys::Storage, Report<StorageError>> {
            self.storage.as_ref().ok_or_else(|| {
                StorageError::Unavailable {
                    reason: "localStorage is not available".to_string(),
                }
                .into()
            })
        }
    }

    fn describe(err: &JsValue) -> String {
        err.as_string().unwrap_or_else(|| format!("{err:?}"))
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Result<Option<String>, Report<StorageError>> {
            let value = self.storage()?.get_item(key).map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                reason: describe(&e),
            })?;
            Ok(value)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), Report<StorageError>> {
            self.storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::WriteFailed {
                    key: key.to_string(),
                    reason: describe(&e),
                })?;
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), Report<StorageError>> {
            self.storage()?
                .remove_item(key)
                .map_err(|e| StorageError::RemoveFailed {
                    key: key.to_string(),
                    reason: describe(&e),
                })?;
            Ok(())
        }
    }
}

/// Timers owned by a component. All pending timers are cleared when the
/// owning component is unmounted.
#[derive(Clone, Default)]
pub struct PendingTimers {
    handles: Arc<Mutex<Vec<TimeoutHandle>>>,
}

impl PendingTimers {
    /// Creates a timer set tied to the current reactive owner.
    pub fn new() -> Self {
        let timers = Self::default();
        let on_unmount = timers.clone();
        on_cleanup(move || on_unmount.cancel_all());
        timers
    }

    /// Runs `f` after `delay` unless cancelled first.
    pub fn schedule(&self, delay: Duration, f: impl FnOnce() + 'static) {
        match set_timeout_with_handle(f, delay) {
            Ok(handle) => {
                if let Ok(mut handles) = self.handles.lock() {
                    handles.push(handle);
                }
            }
            Err(err) => tracing::warn!(error = ?err, "failed to schedule timer"),
        }
    }

    /// Clears every pending timer.
    pub fn cancel_all(&self) {
        if let Ok(mut handles) = self.handles.lock() {
            for handle in handles.drain(..) {
                handle.clear();
            }
        }
    }
}
