//! Form submissions.
//!
//! An accepted form prints its confirmation. A refused one comes back as a
//! [`StorefrontError`](elegance_storefront::StorefrontError) whose user
//! message `main` prints before exiting with status 1.

use std::process::ExitCode;

use elegance_storefront::Result;
use elegance_storefront::forms::{CheckoutForm, ContactForm};
use elegance_storefront::page::PageController;
use elegance_storefront::storage::FileStore;

/// Validate and "send" the contact form.
///
/// # Errors
///
/// Returns [`StorefrontError::Form`](elegance_storefront::StorefrontError::Form)
/// when a field is blank or the email is malformed.
#[allow(clippy::print_stdout)]
pub fn contact(form: &ContactForm) -> Result<ExitCode> {
    let message = form.validate()?;
    tracing::info!(email = %message.email, "Contact form accepted");
    println!("Message sent.");
    Ok(ExitCode::SUCCESS)
}

/// Place an order from the current cart.
///
/// # Errors
///
/// Returns [`StorefrontError::Checkout`](elegance_storefront::StorefrontError::Checkout)
/// when the cart is empty or the form is incomplete.
#[allow(clippy::print_stdout)]
pub fn checkout(page: &mut PageController<FileStore>, form: &CheckoutForm) -> Result<ExitCode> {
    let receipt = page.checkout(form)?;
    tracing::info!(
        items = receipt.items.len(),
        total = %receipt.total_display(),
        email = %receipt.customer.email,
        "Order placed"
    );
    println!("{}", page.config().order_confirmation());
    Ok(ExitCode::SUCCESS)
}
