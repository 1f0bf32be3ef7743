//! Cart manager: the page's cart, kept in sync with storage.
//!
//! The manager owns one [`Cart`] hydrated from the `cart` key when the page
//! loads. Each operation mutates the cart, writes it back (best-effort), and
//! reports which display regions need redrawing. Operations that change
//! nothing write nothing, so an idle page never overwrites what another tab
//! stored.
//!
//! Two pages over the same storage still race: the last one to write wins.
//! [`CartManager::reload`] re-reads the stored cart when the page learns that
//! storage changed underneath it.

use elegance_core::{Cart, CartChange, LineItem, UnitPrice, format_amount};
use thiserror::Error;

use crate::forms::{CheckoutDetails, CheckoutForm, FormError};
use crate::render::{CartListing, CartSummary, Refresh};
use crate::storage::{KeyValueStore, Storage, keys};

/// Reasons a checkout is refused. The cart is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The checkout form is incomplete or the email is malformed.
    #[error(transparent)]
    Form(#[from] FormError),

    /// There is nothing to buy.
    #[error("Your cart is empty.")]
    EmptyCart,
}

/// Record of a completed checkout.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Validated checkout details.
    pub customer: CheckoutDetails,
    /// Items that were in the cart, in cart order.
    pub items: Vec<LineItem>,
    /// Grand total at checkout time.
    pub total: f64,
}

impl Receipt {
    /// Grand total, two decimals.
    #[must_use]
    pub fn total_display(&self) -> String {
        format_amount(self.total)
    }
}

/// The page's cart and its storage handle.
#[derive(Debug)]
pub struct CartManager<S> {
    cart: Cart,
    storage: Storage<S>,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Load the stored cart, or start empty.
    pub fn hydrate(storage: Storage<S>) -> Self {
        let lookup = storage.get_or_else(keys::CART, Cart::new);
        let stored = lookup.is_stored();
        let cart = lookup.into_inner();
        tracing::debug!(stored, items = cart.len(), "Cart hydrated");

        Self { cart, storage }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Projection for the count badge.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&self.cart)
    }

    /// Projection for the cart page.
    #[must_use]
    pub fn listing(&self) -> CartListing {
        CartListing::from(&self.cart)
    }

    /// Add one unit of `name` at `price` (price only applies to new items).
    pub fn add_item(&mut self, name: &str, price: UnitPrice) -> Refresh {
        let change = self.cart.add(name, price);
        tracing::debug!(name, ?change, "Add to cart");
        self.commit(change, Refresh::SUMMARY)
    }

    /// Remove `name` from the cart.
    pub fn remove_item(&mut self, name: &str) -> Refresh {
        let change = self.cart.remove(name);
        tracing::debug!(name, ?change, "Remove from cart");
        self.commit(change, Refresh::ALL)
    }

    /// Adjust the quantity of `name` by `delta`, removing it at zero.
    pub fn change_quantity(&mut self, name: &str, delta: i64) -> Refresh {
        let change = self.cart.change_quantity(name, delta);
        tracing::debug!(name, delta, ?change, "Change quantity");
        self.commit(change, Refresh::ALL)
    }

    /// Place the order: validate the form, require items, then empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Form` if the form is invalid (checked first)
    /// and `CheckoutError::EmptyCart` if the cart has no items. Neither
    /// touches the cart or storage.
    pub fn checkout(&mut self, form: &CheckoutForm) -> Result<Receipt, CheckoutError> {
        let customer = form.validate()?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = self.cart.grand_total();
        let items = self.cart.take_items();
        self.persist();

        tracing::info!(
            items = items.len(),
            total = %format_amount(total),
            "Order placed"
        );

        Ok(Receipt {
            customer,
            items,
            total,
        })
    }

    /// Replace the in-memory cart with what storage holds now.
    pub fn reload(&mut self) -> Refresh {
        self.cart = self.storage.get_or_else(keys::CART, Cart::new).into_inner();
        tracing::debug!(items = self.cart.len(), "Cart reloaded from storage");
        Refresh::ALL
    }

    fn commit(&self, change: CartChange, refresh: Refresh) -> Refresh {
        if !change.is_mutation() {
            return Refresh::NONE;
        }
        self.persist();
        refresh
    }

    fn persist(&self) -> bool {
        self.storage.set_best_effort(keys::CART, &self.cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::storage::{Lookup, MemoryStore};

    fn manager() -> (MemoryStore, CartManager<MemoryStore>) {
        let store = MemoryStore::new();
        let manager = CartManager::hydrate(Storage::new(store.clone()));
        (store, manager)
    }

    fn stored_cart(store: &MemoryStore) -> Lookup<Cart> {
        Storage::new(store.clone()).get(keys::CART, Cart::new())
    }

    fn valid_checkout() -> CheckoutForm {
        CheckoutForm {
            full_name: "Ada Lovelace".to_string(),
            address: "1 Analytical Way".to_string(),
            email: "ada@example.com".to_string(),
            payment: "card".to_string(),
        }
    }

    #[test]
    fn test_hydrate_empty_storage() {
        let (_, manager) = manager();
        assert!(manager.cart().is_empty());
    }

    #[test]
    fn test_add_persists_and_refreshes_summary() {
        let (store, mut manager) = manager();

        assert_eq!(
            manager.add_item("Shirt", UnitPrice::new(20.0)),
            Refresh::SUMMARY
        );
        let stored = stored_cart(&store);
        assert!(stored.is_stored());
        assert_eq!(stored.into_inner(), *manager.cart());
    }

    #[test]
    fn test_remove_and_change_refresh_everything() {
        let (store, mut manager) = manager();
        manager.add_item("Shirt", UnitPrice::new(20.0));
        manager.add_item("Hat", UnitPrice::new(5.0));

        assert_eq!(manager.change_quantity("Shirt", 2), Refresh::ALL);
        assert_eq!(manager.remove_item("Hat"), Refresh::ALL);

        let stored = stored_cart(&store).into_inner();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.get("Shirt").unwrap().quantity, 3);
    }

    #[test]
    fn test_noop_operations_do_not_write() {
        let (store, mut manager) = manager();

        assert_eq!(manager.remove_item("Ghost"), Refresh::NONE);
        assert_eq!(manager.change_quantity("Ghost", -1), Refresh::NONE);
        assert!(store.is_empty());
    }

    #[test]
    fn test_change_quantity_to_zero_removes_and_persists() {
        let (store, mut manager) = manager();
        manager.add_item("Shirt", UnitPrice::new(20.0));

        assert_eq!(manager.change_quantity("Shirt", -1), Refresh::ALL);
        assert!(manager.cart().is_empty());
        assert!(stored_cart(&store).into_inner().is_empty());
    }

    #[test]
    fn test_hydrate_reproduces_persisted_cart() {
        let (store, mut manager) = manager();
        manager.add_item("Shirt", UnitPrice::new(20.0));
        manager.add_item("Hat", UnitPrice::new(5.5));
        manager.change_quantity("Hat", 3);

        let reloaded = CartManager::hydrate(Storage::new(store));
        assert_eq!(reloaded.cart(), manager.cart());
    }

    #[test]
    fn test_hydrate_corrupt_value_falls_back_to_empty() {
        let store = MemoryStore::new();
        store.write(keys::CART, "not json").unwrap();

        let manager = CartManager::hydrate(Storage::new(store));
        assert!(manager.cart().is_empty());
    }

    #[test]
    fn test_storage_failure_does_not_block_mutation() {
        let mut manager = CartManager::hydrate(Storage::new(MemoryStore::unavailable()));

        assert_eq!(
            manager.add_item("Shirt", UnitPrice::new(20.0)),
            Refresh::SUMMARY
        );
        assert_eq!(manager.cart().total_quantity(), 1);
    }

    #[test]
    fn test_checkout_empty_cart_fails_without_writing() {
        let (store, mut manager) = manager();

        let err = manager.checkout(&valid_checkout()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty.");
        assert!(store.is_empty());
    }

    #[test]
    fn test_checkout_invalid_form_keeps_cart() {
        let (store, mut manager) = manager();
        manager.add_item("Shirt", UnitPrice::new(20.0));

        let mut form = valid_checkout();
        form.email = "a@.co".to_string();

        let err = manager.checkout(&form).unwrap_err();
        assert_eq!(err, CheckoutError::Form(FormError::Checkout));
        assert_eq!(manager.cart().len(), 1);
        assert_eq!(stored_cart(&store).into_inner().len(), 1);
    }

    #[test]
    fn test_form_is_checked_before_cart() {
        let (_, mut manager) = manager();
        let err = manager.checkout(&CheckoutForm::default()).unwrap_err();
        assert_eq!(err, CheckoutError::Form(FormError::Checkout));
    }

    #[test]
    fn test_checkout_success_empties_and_persists() {
        let (store, mut manager) = manager();
        manager.add_item("Shirt", UnitPrice::new(20.0));
        manager.add_item("Shirt", UnitPrice::new(20.0));
        manager.add_item("Hat", UnitPrice::new(5.0));

        let receipt = manager.checkout(&valid_checkout()).unwrap();
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.total, 45.0);
        assert_eq!(receipt.total_display(), "45.00");
        assert_eq!(receipt.customer.full_name, "Ada Lovelace");

        assert!(manager.cart().is_empty());
        let stored = stored_cart(&store);
        assert!(stored.is_stored());
        assert!(stored.into_inner().is_empty());
    }

    #[test]
    fn test_reload_picks_up_other_writer() {
        let (store, mut manager) = manager();
        manager.add_item("Shirt", UnitPrice::new(20.0));

        let mut other = CartManager::hydrate(Storage::new(store));
        other.add_item("Hat", UnitPrice::new(5.0));

        assert_eq!(manager.cart().len(), 1);
        assert_eq!(manager.reload(), Refresh::ALL);
        assert_eq!(manager.cart().len(), 2);
    }

    #[test]
    fn test_projections() {
        let (_, mut manager) = manager();
        manager.add_item("Shirt", UnitPrice::new(20.0));
        manager.add_item("Shirt", UnitPrice::new(999.0));

        assert_eq!(manager.summary().count, 2);
        assert_eq!(manager.listing().total, "40.00");
    }
}
