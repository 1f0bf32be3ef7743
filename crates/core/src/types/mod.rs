//! Core types for Elegance.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod email;
pub mod price;
pub mod theme;

pub use cart::{Cart, CartChange, LineItem};
pub use email::{Email, EmailError};
pub use price::{UnitPrice, format_amount};
pub use theme::Theme;
