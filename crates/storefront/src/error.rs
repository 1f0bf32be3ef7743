//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type for the storefront entry points
//! (page controller, browser binding and CLI). Validation failures carry the
//! exact message the shopper sees; everything else is reported with a
//! generic message so internal details never reach the page.

use thiserror::Error;

use crate::cart::CheckoutError;
use crate::config::ConfigError;
use crate::forms::FormError;

/// Generic text shown for failures that are not the shopper's to fix.
const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A submitted form failed validation.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Checkout was refused.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// The browser page could not be wired up (no window, a listener
    /// refused, an element of the wrong kind).
    #[error("Page error: {0}")]
    Page(String),
}

impl StorefrontError {
    /// Returns `true` for errors caused by shopper input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Form(_) | Self::Checkout(_))
    }

    /// Text suitable for an alert on the page.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_user_error() {
            self.to_string()
        } else {
            GENERIC_MESSAGE.to_string()
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
