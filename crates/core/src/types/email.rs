//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// No `.` follows the @ with at least one character in between.
    #[error("email domain must contain a dot after its first character")]
    MissingDomainDot,
}

/// An email address accepted by the storefront forms.
///
/// The check is a shape heuristic, not an address grammar.
///
/// ## Constraints
///
/// - Must contain an @ symbol, and the first @ must not be at position 0
/// - The last `.` in the whole address must come after the first @, with at
///   least one character between them
///
/// ## Examples
///
/// ```
/// use elegance_core::Email;
///
/// assert!(Email::parse("a@b.co").is_ok());
///
/// assert!(Email::parse("@b.co").is_err());  // empty local part
/// assert!(Email::parse("ab.co").is_err());  // missing @
/// assert!(Email::parse("a@.co").is_err());  // dot right after @
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string.
    ///
    /// The input is taken as-is; form validators trim it first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Does not contain an @ symbol
    /// - Starts with the @ symbol
    /// - Has no `.` at least two positions after the first @
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        let at_pos = s.find('@').ok_or(EmailError::MissingAtSymbol)?;

        if at_pos == 0 {
            return Err(EmailError::EmptyLocalPart);
        }

        // Byte offsets keep the same ordering as character offsets, and the
        // @ is one byte wide, so "> at + 1" means one character in between.
        match s.rfind('.') {
            Some(dot_pos) if dot_pos > at_pos + 1 => Ok(Self(s.to_owned())),
            _ => Err(EmailError::MissingDomainDot),
        }
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("a@b.co").is_ok());
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user+tag@example.co.uk").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_missing_at() {
        assert_eq!(Email::parse("ab.co"), Err(EmailError::MissingAtSymbol));
    }

    #[test]
    fn test_parse_empty_local_part() {
        assert_eq!(Email::parse("@b.co"), Err(EmailError::EmptyLocalPart));
    }

    #[test]
    fn test_parse_dot_immediately_after_at() {
        assert_eq!(Email::parse("a@.co"), Err(EmailError::MissingDomainDot));
    }

    #[test]
    fn test_parse_no_dot_in_domain() {
        assert_eq!(Email::parse("a@bco"), Err(EmailError::MissingDomainDot));
        assert_eq!(Email::parse("a.b@co"), Err(EmailError::MissingDomainDot));
    }

    #[test]
    fn test_parse_uses_last_dot_only() {
        // Only the last dot is compared, so a trailing dot still passes.
        assert!(Email::parse("a@b.").is_ok());
        assert!(Email::parse("first.last@b.co").is_ok());
    }

    #[test]
    fn test_parse_multibyte_local_part() {
        assert!(Email::parse("é@b.co").is_ok());
        assert!(Email::parse("a@é.co").is_ok());
    }

    #[test]
    fn test_display() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(format!("{email}"), "user@example.com");
    }

    #[test]
    fn test_serde_transparent() {
        let email = Email::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");
    }

    #[test]
    fn test_from_str() {
        let email: Email = "user@example.com".parse().unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }
}
