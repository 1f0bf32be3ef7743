//! Checkout flow end to end.

#![allow(clippy::unwrap_used)]

use elegance_integration_tests::TestShop;
use elegance_storefront::forms::CheckoutForm;
use elegance_storefront::page::{PageEvent, Submission};
use elegance_storefront::render::Refresh;
use elegance_storefront::storage::keys;

fn form() -> CheckoutForm {
    CheckoutForm {
        full_name: "  Ada Lovelace ".to_string(),
        address: "1 Analytical Way".to_string(),
        email: "ada@example.com".to_string(),
        payment: "card".to_string(),
    }
}

fn add(name: &str, price: &str) -> PageEvent {
    PageEvent::AddToCart {
        name: name.to_string(),
        price: price.to_string(),
    }
}

#[test]
fn test_checkout_places_order_and_clears_cart() {
    let shop = TestShop::new().unwrap().with_store_name("Corner Shop");
    let mut page = shop.open_page();
    page.handle(add("Shirt", "20"));
    page.handle(add("Shirt", "20"));
    page.handle(add("Hat", "5.5"));

    let outcome = page.handle(PageEvent::SubmitCheckout(form()));

    assert_eq!(outcome.submission, Submission::PreventAndReset);
    assert_eq!(outcome.refresh, Refresh::ALL);
    assert_eq!(
        outcome.alert.as_deref(),
        Some("Order placed successfully! Thank you for shopping at Corner Shop.")
    );

    let receipt = outcome.receipt.unwrap();
    assert_eq!(receipt.customer.full_name, "Ada Lovelace");
    assert_eq!(receipt.customer.email.as_str(), "ada@example.com");
    assert_eq!(receipt.items.len(), 2);
    assert_eq!(receipt.total_display(), "45.50");

    assert!(page.cart().cart().is_empty());
    assert_eq!(shop.raw(keys::CART).unwrap().as_deref(), Some("[]"));
    assert!(shop.open_page().cart().cart().is_empty());
}

#[test]
fn test_checkout_with_empty_cart_is_refused() {
    let shop = TestShop::new().unwrap();
    let mut page = shop.open_page();

    let outcome = page.handle(PageEvent::SubmitCheckout(form()));

    assert_eq!(outcome.submission, Submission::Prevent);
    assert_eq!(outcome.alert.as_deref(), Some("Your cart is empty."));
    assert!(shop.raw(keys::CART).unwrap().is_none());
}

#[test]
fn test_invalid_form_leaves_cart_untouched() {
    let shop = TestShop::new().unwrap();
    let mut page = shop.open_page();
    page.handle(add("Shirt", "20"));
    let before = shop.raw(keys::CART).unwrap();

    let outcome = page.handle(PageEvent::SubmitCheckout(CheckoutForm {
        email: "ada@example".to_string(),
        ..form()
    }));

    assert_eq!(outcome.submission, Submission::Prevent);
    assert_eq!(
        outcome.alert.as_deref(),
        Some("Please complete all fields with a valid email.")
    );
    assert!(outcome.receipt.is_none());
    assert_eq!(shop.raw(keys::CART).unwrap(), before);
    assert_eq!(shop.open_page().cart().summary().count, 1);
}

#[test]
fn test_invalid_form_is_reported_before_empty_cart() {
    let shop = TestShop::new().unwrap();
    let mut page = shop.open_page();

    let outcome = page.handle(PageEvent::SubmitCheckout(CheckoutForm::default()));

    assert_eq!(
        outcome.alert.as_deref(),
        Some("Please complete all fields with a valid email.")
    );
}
