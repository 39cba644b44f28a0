//! Cart route handlers.
//!
//! Cart actions are plain form posts. Each one mutates the cart store,
//! which persists, and then redirects so the page re-renders the cart list,
//! badge and summary from the new state. Item identity travels in form
//! fields, so names are never spliced into markup or script.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use venus_core::OrderReceipt;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::pages::StorefrontTemplate;
use crate::state::AppState;
use crate::views::{self, Page};

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    pub price: Decimal,
    /// Page to return to after adding (defaults to home).
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub name: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub name: String,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "receipt.html")]
pub struct ReceiptTemplate {
    pub stylesheet: String,
    pub badge: u64,
    pub confirmation: String,
}

impl ReceiptTemplate {
    fn new(receipt: &OrderReceipt, badge: u64) -> Self {
        Self {
            stylesheet: views::stylesheet_href(),
            badge,
            confirmation: receipt.confirmation_message(),
        }
    }
}

fn form_error(rejection: &FormRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// Redirect target after adding `name` from `return_to`.
fn added_redirect(return_to: Option<&str>, name: &str) -> String {
    let page = return_to.and_then(Page::from_id).unwrap_or(Page::Home);
    format!("{}?added={}", page.href(), urlencoding::encode(name))
}

/// Add one unit of an item to the cart.
///
/// # Errors
///
/// Returns 400 if the form is missing fields, the price is not a number, or
/// the order total would no longer fit.
#[instrument(skip(state, form))]
pub async fn add(
    State(state): State<AppState>,
    form: std::result::Result<Form<AddToCartForm>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form.map_err(|e| form_error(&e))?;

    let (outcome, count) = {
        let mut store = state.cart().lock().await;
        let outcome = store
            .add_item(&form.name, form.price)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        (outcome, store.item_count())
    };

    tracing::info!(item = %form.name, ?outcome, count, "Item added to cart");
    add_breadcrumb("cart", "Added item", Some(&[("item", form.name.as_str())]));

    Ok(Redirect::to(&added_redirect(
        form.return_to.as_deref(),
        &form.name,
    )))
}

/// Change an item's quantity; dropping to zero removes it.
///
/// # Errors
///
/// Returns 400 if the form is missing fields, the delta is not an integer, or
/// an increase would push the order total out of range.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    form: std::result::Result<Form<UpdateQuantityForm>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form.map_err(|e| form_error(&e))?;

    let outcome = state
        .cart()
        .lock()
        .await
        .update_quantity(&form.name, form.delta)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::info!(item = %form.name, delta = form.delta, ?outcome, "Cart quantity updated");

    Ok(Redirect::to(&Page::Cart.href()))
}

/// Remove an item from the cart.
///
/// # Errors
///
/// Returns 400 if the form has no item name.
#[instrument(skip(state, form))]
pub async fn remove(
    State(state): State<AppState>,
    form: std::result::Result<Form<RemoveFromCartForm>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form.map_err(|e| form_error(&e))?;

    let removed = state.cart().lock().await.remove_item(&form.name);
    tracing::info!(item = %form.name, removed, "Cart item removed");

    Ok(Redirect::to(&Page::Cart.href()))
}

/// Cart badge value: the sum of all quantities.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> String {
    state.cart().lock().await.item_count().to_string()
}

/// Place the order.
///
/// An empty cart re-renders the cart page with the refusal message and
/// leaves the cart unchanged. Otherwise the receipt is shown and the cart
/// is cleared.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Response {
    let mut store = state.cart().lock().await;

    match store.checkout() {
        Ok(receipt) => {
            let badge = store.item_count();
            drop(store);
            add_breadcrumb("checkout", "Order placed", None);
            ReceiptTemplate::new(&receipt, badge).into_response()
        }
        Err(e) => {
            tracing::info!(reason = %e, "Checkout refused");
            StorefrontTemplate::new(Page::Cart.id(), store.cart())
                .with_notice(e.to_string())
                .into_response()
        }
    }
}
