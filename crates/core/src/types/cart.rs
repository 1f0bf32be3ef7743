//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s keyed by product name. The
//! mutation methods here are the whole cart state machine: every call runs to
//! completion and reports what changed through a [`CartChange`], so callers
//! can decide whether to persist and what to re-render.
//!
//! ## Invariants
//!
//! - No two items share a `name`
//! - Every item has `quantity >= 1`
//! - Items keep the order in which their name was first added
//!
//! ## Pricing policy
//!
//! The unit price is fixed by the first add of a name. Adding the same name
//! again at a different price only increases the quantity.

use serde::{Deserialize, Deserializer, Serialize};

use super::price::UnitPrice;

/// One named product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name; unique within a cart.
    pub name: String,
    /// Unit price captured on first add.
    pub price: UnitPrice,
    /// Number of units, always at least 1 while in a cart.
    ///
    /// Carts saved by the legacy page script call this field `qty`.
    #[serde(alias = "qty")]
    pub quantity: u64,
}

impl LineItem {
    /// Create a line item with a quantity of one.
    #[must_use]
    pub fn new(name: impl Into<String>, price: UnitPrice) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price.times(self.quantity)
    }
}

/// Outcome of a cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended.
    Inserted,
    /// An existing line item gained one unit.
    Incremented { quantity: u64 },
    /// An existing line item's quantity was adjusted and is still positive.
    QuantityChanged { quantity: u64 },
    /// A line item was removed.
    Removed,
    /// Nothing matched; the cart is untouched.
    Unchanged,
}

impl CartChange {
    /// Returns `true` if the cart was modified.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Ordered collection of line items, unique by name.
///
/// Serializes as a plain JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw items, restoring the invariants.
    ///
    /// Items with a zero quantity are dropped. Repeated names are merged into
    /// the first occurrence, which keeps its price and position.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            if let Some(existing) = cart.find_mut(&item.name) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Add one unit of `name`.
    ///
    /// Appends a new item at `price` if the name is not in the cart yet;
    /// otherwise increments the existing item and ignores `price`.
    pub fn add(&mut self, name: &str, price: UnitPrice) -> CartChange {
        if let Some(existing) = self.find_mut(name) {
            existing.quantity = existing.quantity.saturating_add(1);
            return CartChange::Incremented {
                quantity: existing.quantity,
            };
        }

        self.items.push(LineItem::new(name, price));
        CartChange::Inserted
    }

    /// Remove the item named `name`, if present.
    pub fn remove(&mut self, name: &str) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);

        if self.items.len() == before {
            CartChange::Unchanged
        } else {
            CartChange::Removed
        }
    }

    /// Adjust the quantity of `name` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the item. Absent names
    /// are left alone.
    pub fn change_quantity(&mut self, name: &str, delta: i64) -> CartChange {
        let Some(item) = self.find_mut(name) else {
            return CartChange::Unchanged;
        };

        let next = i128::from(item.quantity) + i128::from(delta);
        if next > 0 {
            item.quantity = u64::try_from(next).unwrap_or(u64::MAX);
            return CartChange::QuantityChanged {
                quantity: item.quantity,
            };
        }

        self.remove(name)
    }

    /// Remove and return every item, leaving the cart empty.
    pub fn take_items(&mut self) -> Vec<LineItem> {
        std::mem::take(&mut self.items)
    }

    /// Look up an item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Sum of all subtotals, accumulated in item order.
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.items
            .iter()
            .fold(0.0, |total, item| total + item.subtotal())
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.name == name)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LineItem>::deserialize(deserializer).map(Self::from_items)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
