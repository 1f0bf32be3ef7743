//! Cart commands.

use std::fmt::Write as _;
use std::process::ExitCode;

use elegance_storefront::page::{PageController, PageEvent};
use elegance_storefront::render::CartListing;
use elegance_storefront::storage::FileStore;

/// Add one unit of `name` at `price` (raw text, coerced like a `data-price`
/// attribute).
pub fn add(page: &mut PageController<FileStore>, name: String, price: String) -> ExitCode {
    page.handle(PageEvent::AddToCart { name, price });
    count(page)
}

/// Remove the line for `name`, if any.
pub fn remove(page: &mut PageController<FileStore>, name: &str) -> ExitCode {
    let event = PageEvent::RemoveFromCart {
        name: name.to_string(),
    };
    if page.handle(event).refresh.is_empty() {
        tracing::info!(name, "No such item in cart");
    }
    show(page)
}

/// Change the quantity of `name` by `delta`.
pub fn change_quantity(page: &mut PageController<FileStore>, name: &str, delta: i64) -> ExitCode {
    let event = PageEvent::ChangeQuantity {
        name: name.to_string(),
        delta,
    };
    if page.handle(event).refresh.is_empty() {
        tracing::info!(name, "No such item in cart");
    }
    show(page)
}

/// Print every line and the grand total.
#[allow(clippy::print_stdout)]
pub fn show(page: &PageController<FileStore>) -> ExitCode {
    print!("{}", format_listing(&page.cart().listing()));
    ExitCode::SUCCESS
}

/// Print the cart badge count.
#[allow(clippy::print_stdout)]
pub fn count(page: &PageController<FileStore>) -> ExitCode {
    println!("{}", page.cart().summary().count);
    ExitCode::SUCCESS
}

/// Plain-text rendering of the cart page.
fn format_listing(listing: &CartListing) -> String {
    let mut out = String::new();
    if listing.lines.is_empty() {
        out.push_str("Your cart is empty.\n");
    }
    for line in &listing.lines {
        let _ = writeln!(
            out,
            "{} x{} @ ${} = ${}",
            line.name, line.quantity, line.unit_price, line.subtotal
        );
    }
    let _ = writeln!(out, "Total: ${}", listing.total);
    out
}
