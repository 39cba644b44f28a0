//! Integration tests for the Venus Bake House storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p venus-integration-tests
//! ```
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`
//! against an in-memory key-value store, so no server, port or data directory
//! is needed.
//!
//! # Test Categories
//!
//! - `storefront_pages` - page switching, badge, toast, health
//! - `storefront_cart` - add, update, remove, checkout
//! - `storefront_contact` - contact form recording and download

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;
use venus_core::Cart;
use venus_storefront::config::StorefrontConfig;
use venus_storefront::routes;
use venus_storefront::state::AppState;
use venus_storefront::storage::{KeyValueStore, MemoryStore, keys, load_json};

/// A rendered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// A storefront router over an in-memory store.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: Router,
}

impl TestContext {
    /// Fresh storefront with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Storefront rehydrated from `store`, as after a restart.
    #[must_use]
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let storage: Arc<dyn KeyValueStore> = store.clone();
        let state = AppState::new(StorefrontConfig::default(), storage);
        Self {
            store,
            app: routes::app(state),
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .expect("valid request");
        self.send(request).await
    }

    /// Add one unit of `name` at `price` from the cakes page.
    pub async fn add(&self, name: &str, price: &str) -> TestResponse {
        let form = format!("name={name}&price={price}&return_to=cakes").replace(' ', "+");
        self.post_form("/cart/add", &form).await
    }

    /// The cart as currently persisted under its storage key.
    #[must_use]
    pub fn persisted_cart(&self) -> Option<Cart> {
        load_json(self.store.as_ref(), keys::CART)
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
