//! Contact and checkout form validation.
//!
//! Both validators trim required text fields and check the email with
//! [`Email::parse`]. A failure produces one combined message per form; it
//! never says which field was wrong.

use elegance_core::Email;
use thiserror::Error;

/// Validation failure for a submitted form.
///
/// The `Display` text is the message shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// The contact form has an empty field or a malformed email.
    #[error("Please fill all fields with a valid email.")]
    Contact,
    /// The checkout form has an empty field or a malformed email.
    #[error("Please complete all fields with a valid email.")]
    Checkout,
}

/// Raw contact form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact submission that passed validation, with fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Contact` if the name or message is blank or the
    /// email is malformed.
    pub fn validate(&self) -> Result<ContactMessage, FormError> {
        let email = Email::parse(self.email.trim()).ok();
        let name = required(&self.name);
        let message = required(&self.message);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(ContactMessage {
                name,
                email,
                message,
            }),
            _ => Err(FormError::Contact),
        }
    }
}

/// Raw checkout form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub full_name: String,
    pub address: String,
    pub email: String,
    /// Selected payment method; a select value, so it is not trimmed.
    pub payment: String,
}

/// Checkout details that passed validation, with text fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub full_name: String,
    pub address: String,
    pub email: Email,
    pub payment: String,
}

impl CheckoutForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Checkout` if the full name or address is blank,
    /// no payment method is selected, or the email is malformed.
    pub fn validate(&self) -> Result<CheckoutDetails, FormError> {
        let email = Email::parse(self.email.trim()).ok();
        let full_name = required(&self.full_name);
        let address = required(&self.address);

        match (full_name, address, email) {
            (Some(full_name), Some(address), Some(email)) if !self.payment.is_empty() => {
                Ok(CheckoutDetails {
                    full_name,
                    address,
                    email,
                    payment: self.payment.clone(),
                })
            }
            _ => Err(FormError::Checkout),
        }
    }
}

/// Trimmed value of a required field, or `None` if blank.
fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
