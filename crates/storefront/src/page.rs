//! Page controller: the single owner of a page's state.
//!
//! A [`PageController`] is built once per page load. It hydrates the theme
//! and the cart from storage, then turns each user event into a
//! [`PageOutcome`] describing what the page must do next: redraw regions,
//! apply a theme, show an alert, and let a form submission through or stop
//! it. The browser binding and the CLI both drive pages through it.

use elegance_core::{Theme, UnitPrice};

use crate::cart::{CartManager, Receipt};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::forms::{CheckoutForm, ContactForm};
use crate::render::{LineControl, Refresh};
use crate::storage::{KeyValueStore, Storage, keys};
use crate::theme::ThemeController;

/// A user action (or storage notification) delivered to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The theme toggle was clicked.
    ToggleTheme,
    /// A product button was clicked; `price` is the raw attribute text.
    AddToCart { name: String, price: String },
    /// A quantity control was clicked.
    ChangeQuantity { name: String, delta: i64 },
    /// A remove control was clicked.
    RemoveFromCart { name: String },
    /// The contact form was submitted.
    SubmitContact(ContactForm),
    /// The checkout form was submitted.
    SubmitCheckout(CheckoutForm),
    /// Another page wrote to storage. `None` means storage was cleared.
    StorageChanged { key: Option<String> },
}

impl PageEvent {
    /// Event for a cart-row control.
    #[must_use]
    pub fn from_control(control: LineControl, name: impl Into<String>) -> Self {
        let name = name.into();
        match control {
            LineControl::Decrease => Self::ChangeQuantity { name, delta: -1 },
            LineControl::Increase => Self::ChangeQuantity { name, delta: 1 },
            LineControl::Remove => Self::RemoveFromCart { name },
        }
    }
}

/// What happens to a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submission {
    /// The event was not a form submission.
    #[default]
    Unaffected,
    /// Let the browser submit the form.
    Proceed,
    /// Stop the submission.
    Prevent,
    /// Stop the submission and clear the form's inputs.
    PreventAndReset,
}

/// Effects of one event.
#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
    /// Cart regions to redraw.
    pub refresh: Refresh,
    /// Theme to apply, when it may have changed.
    pub theme: Option<Theme>,
    /// Blocking message to show.
    pub alert: Option<String>,
    /// Form submission disposition.
    pub submission: Submission,
    /// Completed order, after a successful checkout.
    pub receipt: Option<Receipt>,
}

impl PageOutcome {
    fn refresh(refresh: Refresh) -> Self {
        Self {
            refresh,
            ..Self::default()
        }
    }

    fn blocked(message: String) -> Self {
        Self {
            alert: Some(message),
            submission: Submission::Prevent,
            ..Self::default()
        }
    }
}

/// Owns everything a page knows: configuration, theme and cart.
#[derive(Debug)]
pub struct PageController<S> {
    config: StorefrontConfig,
    theme: ThemeController<S>,
    cart: CartManager<S>,
}

impl<S: KeyValueStore + Clone> PageController<S> {
    /// Load the page state from storage.
    pub fn load(config: StorefrontConfig, storage: Storage<S>) -> Self {
        let theme = ThemeController::load(storage.clone());
        let cart = CartManager::hydrate(storage);
        Self {
            config,
            theme,
            cart,
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Get a reference to the cart manager.
    #[must_use]
    pub const fn cart(&self) -> &CartManager<S> {
        &self.cart
    }

    /// Apply one event.
    pub fn handle(&mut self, event: PageEvent) -> PageOutcome {
        match event {
            PageEvent::ToggleTheme => PageOutcome {
                theme: Some(self.theme.toggle()),
                ..PageOutcome::default()
            },
            PageEvent::AddToCart { name, price } => {
                PageOutcome::refresh(self.cart.add_item(&name, UnitPrice::coerce(&price)))
            }
            PageEvent::ChangeQuantity { name, delta } => {
                PageOutcome::refresh(self.cart.change_quantity(&name, delta))
            }
            PageEvent::RemoveFromCart { name } => {
                PageOutcome::refresh(self.cart.remove_item(&name))
            }
            PageEvent::SubmitContact(form) => Self::submit_contact(&form),
            PageEvent::SubmitCheckout(form) => self.submit_checkout(&form),
            PageEvent::StorageChanged { key } => self.storage_changed(key.as_deref()),
        }
    }

    /// Validate the checkout form and place the order.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` if the form is invalid or the cart
    /// is empty; nothing is changed in that case.
    pub fn checkout(&mut self, form: &CheckoutForm) -> Result<Receipt> {
        Ok(self.cart.checkout(form)?)
    }

    fn submit_contact(form: &ContactForm) -> PageOutcome {
        match form.validate().map_err(StorefrontError::from) {
            Ok(message) => {
                tracing::info!(email = %message.email, "Contact form accepted");
                PageOutcome {
                    submission: Submission::Proceed,
                    ..PageOutcome::default()
                }
            }
            Err(e) => PageOutcome::blocked(e.user_message()),
        }
    }

    fn submit_checkout(&mut self, form: &CheckoutForm) -> PageOutcome {
        match self.checkout(form) {
            Ok(receipt) => PageOutcome {
                refresh: Refresh::ALL,
                alert: Some(self.config.order_confirmation()),
                submission: Submission::PreventAndReset,
                receipt: Some(receipt),
                ..PageOutcome::default()
            },
            Err(e) => PageOutcome::blocked(e.user_message()),
        }
    }

    fn storage_changed(&mut self, key: Option<&str>) -> PageOutcome {
        let mut outcome = PageOutcome::default();
        if matches!(key, None | Some(keys::CART)) {
            outcome.refresh = self.cart.reload();
        }
        if matches!(key, None | Some(keys::THEME)) {
            outcome.theme = Some(self.theme.reload());
        }
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn page(store: &MemoryStore) -> PageController<MemoryStore> {
        PageController::load(StorefrontConfig::default(), Storage::new(store.clone()))
    }

    fn add(name: &str, price: &str) -> PageEvent {
        PageEvent::AddToCart {
            name: name.to_string(),
            price: price.to_string(),
        }
    }

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Ada Lovelace".to_string(),
            address: "1 Analytical Way".to_string(),
            email: "ada@example.com".to_string(),
            payment: "card".to_string(),
        }
    }

    #[test]
    fn test_add_coerces_price_and_refreshes_summary() {
        let store = MemoryStore::new();
        let mut page = page(&store);

        let outcome = page.handle(add("Shirt", " 20 "));
        assert_eq!(outcome.refresh, Refresh::SUMMARY);
        assert_eq!(outcome.submission, Submission::Unaffected);
        assert_eq!(page.cart().listing().total, "20.00");
    }

    #[test]
    fn test_controls_map_to_operations() {
        let store = MemoryStore::new();
        let mut page = page(&store);
        page.handle(add("Shirt", "20"));

        page.handle(PageEvent::from_control(LineControl::Increase, "Shirt"));
        assert_eq!(page.cart().summary().count, 2);

        page.handle(PageEvent::from_control(LineControl::Decrease, "Shirt"));
        assert_eq!(page.cart().summary().count, 1);

        let outcome = page.handle(PageEvent::from_control(LineControl::Remove, "Shirt"));
        assert_eq!(outcome.refresh, Refresh::ALL);
        assert!(page.cart().cart().is_empty());
    }

    #[test]
    fn test_toggle_theme() {
        let store = MemoryStore::new();
        let mut page = page(&store);

        let outcome = page.handle(PageEvent::ToggleTheme);
        assert_eq!(outcome.theme, Some(Theme::Dark));
        assert_eq!(outcome.refresh, Refresh::NONE);

        // Next page load sees the saved theme.
        assert_eq!(self::page(&store).theme(), Theme::Dark);
    }

    #[test]
    fn test_contact_valid_proceeds() {
        let store = MemoryStore::new();
        let mut page = page(&store);

        let outcome = page.handle(PageEvent::SubmitContact(ContactForm {
            name: "Ada".to_string(),
            email: "a@b.co".to_string(),
            message: "Hi".to_string(),
        }));
        assert_eq!(outcome.submission, Submission::Proceed);
        assert!(outcome.alert.is_none());
    }

    #[test]
    fn test_contact_invalid_is_blocked() {
        let store = MemoryStore::new();
        let mut page = page(&store);

        let outcome = page.handle(PageEvent::SubmitContact(ContactForm::default()));
        assert_eq!(outcome.submission, Submission::Prevent);
        assert_eq!(
            outcome.alert.as_deref(),
            Some("Please fill all fields with a valid email.")
        );
    }

    #[test]
    fn test_checkout_empty_cart_is_blocked() {
        let store = MemoryStore::new();
        let mut page = page(&store);

        let outcome = page.handle(PageEvent::SubmitCheckout(checkout_form()));
        assert_eq!(outcome.submission, Submission::Prevent);
        assert_eq!(outcome.alert.as_deref(), Some("Your cart is empty."));
        assert!(outcome.receipt.is_none());
        assert!(outcome.refresh.is_empty());
    }

    #[test]
    fn test_checkout_success_resets_and_confirms() {
        let store = MemoryStore::new();
        let mut page = page(&store);
        page.handle(add("Shirt", "20"));

        let outcome = page.handle(PageEvent::SubmitCheckout(checkout_form()));
        assert_eq!(outcome.submission, Submission::PreventAndReset);
        assert_eq!(outcome.refresh, Refresh::ALL);
        assert_eq!(
            outcome.alert.as_deref(),
            Some("Order placed successfully! Thank you for shopping at Elegance Wardrobe.")
        );
        assert_eq!(outcome.receipt.unwrap().items.len(), 1);
        assert!(self::page(&store).cart().cart().is_empty());
    }

    #[test]
    fn test_checkout_refusal_is_typed() {
        let store = MemoryStore::new();
        let mut page = page(&store);

        let err = page.checkout(&checkout_form()).unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Checkout(crate::cart::CheckoutError::EmptyCart)
        ));
        assert!(err.is_user_error());
        assert_eq!(err.user_message(), "Your cart is empty.");

        page.handle(add("Shirt", "20"));
        let receipt = page.checkout(&checkout_form()).unwrap();
        assert_eq!(receipt.total_display(), "20.00");
    }

    #[test]
    fn test_storage_changed_reloads_cart() {
        let store = MemoryStore::new();
        let mut first = page(&store);
        let mut second = page(&store);

        second.handle(add("Hat", "5"));
        assert!(first.cart().cart().is_empty());

        let outcome = first.handle(PageEvent::StorageChanged {
            key: Some(keys::CART.to_string()),
        });
        assert_eq!(outcome.refresh, Refresh::ALL);
        assert_eq!(outcome.theme, None);
        assert_eq!(first.cart().summary().count, 1);
    }

    #[test]
    fn test_storage_cleared_reloads_everything() {
        let store = MemoryStore::new();
        let mut page = page(&store);
        page.handle(add("Hat", "5"));
        page.handle(PageEvent::ToggleTheme);

        // Another tab cleared storage: both keys now read as empty.
        store.write(keys::CART, "").unwrap();
        store.write(keys::THEME, "").unwrap();

        let outcome = page.handle(PageEvent::StorageChanged { key: None });
        assert_eq!(outcome.refresh, Refresh::ALL);
        assert_eq!(outcome.theme, Some(Theme::Light));
        assert!(page.cart().cart().is_empty());
    }

    #[test]
    fn test_unrelated_storage_key_is_ignored() {
        let store = MemoryStore::new();
        let mut page = page(&store);

        let outcome = page.handle(PageEvent::StorageChanged {
            key: Some("analytics".to_string()),
        });
        assert!(outcome.refresh.is_empty());
        assert!(outcome.theme.is_none());
    }
}
