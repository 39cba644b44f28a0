//! Page route handlers.
//!
//! The storefront is a single document with one section per page. Every
//! response renders all sections from current state and marks exactly the
//! requested one visible. An unknown page id renders with every section
//! hidden.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;
use venus_core::Cart;

use crate::catalog::{self, CatalogItem};
use crate::state::AppState;
use crate::views::{self, CartView, Page, PageVisibility, Toast};

/// Query parameters accepted by page routes.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Name of an item just added to the cart, shown as a toast.
    pub added: Option<String>,
}

/// Full storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct StorefrontTemplate {
    pub stylesheet: String,
    pub badge: u64,
    pub pages: PageVisibility,
    pub cart: CartView,
    pub cakes: &'static [CatalogItem],
    pub snacks: &'static [CatalogItem],
    pub toast: Option<Toast>,
    pub notice: Option<String>,
}

impl StorefrontTemplate {
    /// Render the storefront with `page_id` visible.
    #[must_use]
    pub fn new(page_id: &str, cart: &Cart) -> Self {
        let cart = CartView::render(cart);
        Self {
            stylesheet: views::stylesheet_href(),
            badge: cart.item_count,
            pages: PageVisibility::show(page_id),
            cart,
            cakes: catalog::CAKES,
            snacks: catalog::SNACKS,
            toast: None,
            notice: None,
        }
    }

    /// Show the add-to-cart acknowledgement for `name`.
    #[must_use]
    pub fn with_toast(mut self, name: &str) -> Self {
        self.toast = Some(Toast::added(name));
        self
    }

    /// Show a message above the cart.
    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

/// Render `page_id` from current cart state.
async fn render_page(state: &AppState, page_id: &str, query: &PageQuery) -> StorefrontTemplate {
    if Page::from_id(page_id).is_none() {
        tracing::debug!(page_id, "Unknown page requested, no section shown");
    }

    let store = state.cart().lock().await;
    let template = StorefrontTemplate::new(page_id, store.cart());
    drop(store);

    match query.added.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => template.with_toast(name),
        None => template,
    }
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<PageQuery>) -> StorefrontTemplate {
    render_page(&state, Page::Home.id(), &query).await
}

/// Display any page by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> StorefrontTemplate {
    render_page(&state, &id, &query).await
}
