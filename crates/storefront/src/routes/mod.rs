//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /page/{id}              - Any page (home, cakes, snacks, contact-info, contact-form, cart)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (storage reachable)
//! GET  /static/*               - Stylesheet
//!
//! # Cart (form posts, answered with 303 redirects)
//! POST /cart/add               - Add one unit (name, price, return_to)
//! POST /cart/update            - Change quantity by delta (name, delta)
//! POST /cart/remove            - Remove a line (name)
//! GET  /cart/count             - Cart badge value (text)
//!
//! # Checkout
//! POST /checkout               - Place order, show receipt (or empty-cart notice)
//!
//! # Contact
//! POST /contact                - Record submission, offer download
//! ```

pub mod cart;
pub mod contact;
pub mod pages;

use axum::{
    Router,
    extract::{Request, State},
    http::Uri,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::error::{AppError, Result};
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;
use crate::storage::keys;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all page and action routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/page/{id}", get(pages::show))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/contact", post(contact::submit))
}

/// Build the complete application router with middleware and static files.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

/// Request span with a `request_id` slot filled in by the request id middleware.
fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the key-value store can be read.
///
/// # Errors
///
/// Returns 503 Service Unavailable if storage is unreachable.
async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.storage().get(keys::CART)?;
    Ok("ok")
}

/// Fallback for unmatched routes.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
