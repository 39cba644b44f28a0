//! Integration tests for cart actions and checkout.
//!
//! Every action is a form post answered with a redirect; these tests follow
//! the redirect by fetching the target page and checking what it renders.

use std::sync::Arc;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use venus_integration_tests::TestContext;
use venus_storefront::storage::{KeyValueStore, MemoryStore, keys};

fn cart_rows(body: &str) -> usize {
    body.matches(r#"<div class="cart-item">"#).count()
}

// =============================================================================
// Add Tests
// =============================================================================

#[tokio::test]
async fn test_add_redirects_back_with_toast() {
    let ctx = TestContext::new();
    let resp = ctx.add("Chocolate Cake", "500").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/page/cakes?added=Chocolate%20Cake"));

    let page = ctx.get("/page/cakes?added=Chocolate%20Cake").await;
    assert!(page.body.contains("✓ Chocolate Cake added to cart!"));
    assert!(page.body.contains(r#"id="cartCount">1</span>"#));
}

#[tokio::test]
async fn test_add_without_return_page_goes_home() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/cart/add", "name=Samosa&price=15").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/?added=Samosa"));
}

#[tokio::test]
async fn test_repeated_add_keeps_one_row_per_name() {
    let ctx = TestContext::new();
    ctx.add("Chocolate Cake", "500").await;
    ctx.add("Chocolate Cake", "500").await;
    ctx.add("Red Velvet Cake", "650").await;

    let page = ctx.get("/page/cart").await;
    assert_eq!(cart_rows(&page.body), 2);
    assert!(page.body.contains(r#"id="cartCount">3</span>"#));

    let count = ctx.get("/cart/count").await;
    assert_eq!(count.body, "3");
}

#[tokio::test]
async fn test_add_keeps_first_seen_price() {
    let ctx = TestContext::new();
    ctx.add("Chocolate Cake", "500").await;
    ctx.add("Chocolate Cake", "999").await;

    let cart = ctx.persisted_cart().expect("cart persisted");
    let item = cart.get("Chocolate Cake").expect("item present");
    assert_eq!(item.quantity, 2);
    assert_eq!(item.unit_price, Decimal::from(500));
}

#[tokio::test]
async fn test_add_rejects_non_numeric_price() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/cart/add", "name=Cake&price=abc").await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(ctx.persisted_cart().is_none(), "nothing should be stored");
}

#[tokio::test]
async fn test_add_keeps_negative_price() {
    let ctx = TestContext::new();
    let resp = ctx.add("Refund", "-10").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let cart = ctx.persisted_cart().expect("cart persisted");
    assert_eq!(cart.get("Refund").expect("item present").unit_price, Decimal::from(-10));

    let page = ctx.get("/page/cart").await;
    assert!(page.body.contains(r#"<span id="subtotal">₹-10.00</span>"#));
}

#[tokio::test]
async fn test_add_refuses_price_too_large_for_totals() {
    let ctx = TestContext::new();
    ctx.add("Samosa", "15").await;

    let resp = ctx.add("Gold Cake", "79228162514264337593543950335").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let home = ctx.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains(r#"id="cartCount">1</span>"#));

    let cart = ctx.persisted_cart().expect("cart persisted");
    assert!(cart.get("Gold Cake").is_none());
}

#[tokio::test]
async fn test_increase_refused_when_totals_would_overflow() {
    let ctx = TestContext::new();
    ctx.add("Big Cake", "39614081257132168796771975167").await;

    let resp = ctx
        .post_form("/cart/update", "name=Big+Cake&delta=1")
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(ctx.get("/cart/count").await.body, "1");

    let page = ctx.get("/page/cart").await;
    assert_eq!(page.status, StatusCode::OK);
}

// =============================================================================
// Summary Tests
// =============================================================================

#[tokio::test]
async fn test_empty_cart_shows_call_to_action_and_zero_summary() {
    let ctx = TestContext::new();
    let page = ctx.get("/page/cart").await;

    assert!(page.body.contains("Your cart is empty"));
    assert!(page.body.contains("Start Shopping"));
    assert!(page.body.contains(r#"<span id="subtotal">₹0.00</span>"#));
    assert!(page.body.contains(r#"<span id="delivery">₹0</span>"#));
    assert!(page.body.contains(r#"<span id="total">₹0.00</span>"#));
}

#[tokio::test]
async fn test_summary_totals() {
    let ctx = TestContext::new();
    ctx.add("Chocolate Cake", "500").await;
    ctx.add("Red Velvet Cake", "600").await;

    let page = ctx.get("/page/cart").await;
    assert!(page.body.contains(r#"<span id="subtotal">₹1100.00</span>"#));
    assert!(page.body.contains(r#"<span id="tax">₹55.00</span>"#));
    assert!(page.body.contains(r#"<span id="delivery">₹50</span>"#));
    assert!(page.body.contains(r#"<span id="total">₹1205.00</span>"#));
    assert!(page.body.contains("₹500 each"));
}

// =============================================================================
// Update and Remove Tests
// =============================================================================

#[tokio::test]
async fn test_update_quantity_and_decrement_to_zero_removes() {
    let ctx = TestContext::new();
    ctx.add("Veg Puff", "25").await;

    let up = ctx.post_form("/cart/update", "name=Veg+Puff&delta=1").await;
    assert_eq!(up.status, StatusCode::SEE_OTHER);
    assert_eq!(up.location(), Some("/page/cart"));
    assert_eq!(ctx.get("/cart/count").await.body, "2");

    ctx.post_form("/cart/update", "name=Veg+Puff&delta=-1").await;
    ctx.post_form("/cart/update", "name=Veg+Puff&delta=-1").await;

    let page = ctx.get("/page/cart").await;
    assert_eq!(cart_rows(&page.body), 0);
    assert!(page.body.contains("Your cart is empty"));
    assert!(ctx.persisted_cart().expect("cart persisted").is_empty());
}

#[tokio::test]
async fn test_update_unknown_item_is_silent() {
    let ctx = TestContext::new();
    ctx.add("Samosa", "15").await;

    let resp = ctx.post_form("/cart/update", "name=Croissant&delta=1").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(ctx.get("/cart/count").await.body, "1");
}

#[tokio::test]
async fn test_remove_item() {
    let ctx = TestContext::new();
    ctx.add("Samosa", "15").await;
    ctx.add("Cream Roll", "20").await;

    let resp = ctx.post_form("/cart/remove", "name=Samosa").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let cart = ctx.persisted_cart().expect("cart persisted");
    assert!(cart.get("Samosa").is_none());
    assert!(cart.get("Cream Roll").is_some());
}

// =============================================================================
// Checkout Tests
// =============================================================================

#[tokio::test]
async fn test_checkout_empty_cart_shows_notice() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/checkout", "").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(
        resp.body
            .contains("Your cart is empty. Please add items before checking out.")
    );
    assert!(resp.body.contains(r#"id="cart-page" class="page ""#));
}

#[tokio::test]
async fn test_checkout_shows_receipt_and_clears_cart() {
    let ctx = TestContext::new();
    ctx.add("Chocolate Cake", "500").await;
    ctx.add("Chocolate Cake", "500").await;
    ctx.add("Veg Puff", "25").await;

    let resp = ctx.post_form("/checkout", "").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you for your order!"));
    assert!(resp.body.contains("ORDER SUMMARY"));
    assert!(resp.body.contains("Chocolate Cake x2 - ₹1000.00"));
    assert!(resp.body.contains("Veg Puff x1 - ₹25.00"));
    // 1025 + 51.25 tax + 50 delivery
    assert!(resp.body.contains("Total: ₹1126.25"));
    assert!(resp.body.contains(r#"id="cartCount">0</span>"#));

    assert!(ctx.persisted_cart().expect("cart persisted").is_empty());
    assert_eq!(ctx.get("/cart/count").await.body, "0");
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let store = Arc::new(MemoryStore::new());

    let first = TestContext::with_store(Arc::clone(&store));
    first.add("Butterscotch Cake", "480").await;
    first.add("Butterscotch Cake", "480").await;

    let second = TestContext::with_store(store);
    assert_eq!(second.get("/cart/count").await.body, "2");

    let page = second.get("/page/cart").await;
    assert!(page.body.contains("Butterscotch Cake"));
}

#[tokio::test]
async fn test_malformed_stored_cart_starts_empty() {
    let store = Arc::new(MemoryStore::new());
    store.set(keys::CART, "{not json").expect("memory store write");

    let ctx = TestContext::with_store(store);
    assert_eq!(ctx.get("/cart/count").await.body, "0");
}

#[tokio::test]
async fn test_stored_numeric_prices_rehydrate() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            keys::CART,
            r#"[{"name":"Pineapple Cake","price":450,"quantity":2}]"#,
        )
        .expect("memory store write");

    let ctx = TestContext::with_store(store);
    let page = ctx.get("/page/cart").await;
    assert!(page.body.contains(r#"<span id="subtotal">₹900.00</span>"#));
}

#[tokio::test]
async fn test_out_of_range_stored_cart_still_renders() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            keys::CART,
            r#"[{"name":"Gold Cake","price":"79228162514264337593543950335","quantity":3}]"#,
        )
        .expect("memory store write");

    let ctx = TestContext::with_store(store);
    let page = ctx.get("/page/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Gold Cake"));

    let resp = ctx.post_form("/cart/remove", "name=Gold+Cake").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(ctx.get("/cart/count").await.body, "0");
}
