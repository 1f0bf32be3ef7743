//! Cart display projections.
//!
//! Rendering is a pure function of the cart: [`CartSummary`] feeds the cart
//! count badge and [`CartListing`] feeds the cart page (one row per item plus
//! the grand total). HTML for the rows comes from the
//! `partials/cart_items.html` template; item names are escaped.

use askama::Template;
use elegance_core::{Cart, LineItem, format_amount};

/// Display regions that need redrawing after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    /// The cart count badge.
    pub summary: bool,
    /// The line-item list and total.
    pub listing: bool,
}

impl Refresh {
    /// Nothing to redraw.
    pub const NONE: Self = Self {
        summary: false,
        listing: false,
    };

    /// Only the count badge.
    pub const SUMMARY: Self = Self {
        summary: true,
        listing: false,
    };

    /// Badge, list and total.
    pub const ALL: Self = Self {
        summary: true,
        listing: true,
    };

    /// Returns `true` if nothing needs redrawing.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.summary && !self.listing
    }

    /// The list and total elements to redraw, if the listing is due. A page
    /// missing either one gets neither.
    #[must_use]
    pub fn listing_targets<T>(self, items: Option<T>, total: Option<T>) -> Option<(T, T)> {
        if self.listing { items.zip(total) } else { None }
    }
}

/// Cart count badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of all item quantities.
    pub count: u64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        Self {
            count: cart.total_quantity(),
        }
    }
}

/// One row of the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub name: String,
    pub quantity: u64,
    /// Unit price, two decimals.
    pub unit_price: String,
    /// `price * quantity`, two decimals.
    pub subtotal: String,
}

impl From<&LineItem> for LineView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.price.to_string(),
            subtotal: format_amount(item.subtotal()),
        }
    }
}

/// Full cart page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartListing {
    pub lines: Vec<LineView>,
    /// Sum of subtotals, two decimals.
    pub total: String,
}

impl From<&Cart> for CartListing {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.iter().map(LineView::from).collect(),
            total: format_amount(cart.grand_total()),
        }
    }
}

impl CartListing {
    /// Render the rows as HTML list items.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Render` if the template fails to render.
    pub fn to_html(&self) -> crate::Result<String> {
        let html = CartItemsTemplate {
            listing: self,
            decrease: LineControl::Decrease,
            increase: LineControl::Increase,
            remove: LineControl::Remove,
        }
        .render()?;
        Ok(html)
    }
}

/// Per-row controls on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineControl {
    Decrease,
    Increase,
    Remove,
}

impl LineControl {
    /// Value of the button's `data-action` attribute.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Decrease => "decrease",
            Self::Increase => "increase",
            Self::Remove => "remove",
        }
    }

    /// Parse a `data-action` attribute value.
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "decrease" => Some(Self::Decrease),
            "increase" => Some(Self::Increase),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }

    /// Accessible label of the button.
    #[must_use]
    pub const fn aria_label(self) -> &'static str {
        match self {
            Self::Decrease => "Decrease quantity",
            Self::Increase => "Increase quantity",
            Self::Remove => "Remove item",
        }
    }

    /// Visible button text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decrease => "-",
            Self::Increase => "+",
            Self::Remove => "Remove",
        }
    }
}

/// Cart rows fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub listing: &'a CartListing,
    pub decrease: LineControl,
    pub increase: LineControl,
    pub remove: LineControl,
}
