//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::StorefrontConfig;
use crate::services::{CartStore, ContactRecorder};
use crate::storage::KeyValueStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart store and contact
/// recorder sit behind mutexes so each UI action runs to completion
/// (mutate, persist, render) before the next one starts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: Arc<dyn KeyValueStore>,
    cart: Mutex<CartStore>,
    contacts: Mutex<ContactRecorder>,
}

impl AppState {
    /// Create application state, rehydrating the cart from `storage`.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `storage` - Local key-value store for the cart and contact log
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = CartStore::rehydrate(Arc::clone(&storage));
        let contacts = ContactRecorder::new(Arc::clone(&storage));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                cart: Mutex::new(cart),
                contacts: Mutex::new(contacts),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the key-value store.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.inner.storage.as_ref()
    }

    /// Get the cart store.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// Get the contact submission recorder.
    ///
    /// The lock serializes the read-append-write of the submission log.
    #[must_use]
    pub fn contacts(&self) -> &Mutex<ContactRecorder> {
        &self.inner.contacts
    }
}
