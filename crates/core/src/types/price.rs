//! Unit prices and amount formatting.
//!
//! Prices arrive as text (a product button's `data-price` attribute) and are
//! coerced the way a browser's `Number(text)` does, so a malformed price
//! becomes NaN instead of an error. NaN then flows into line and cart totals
//! and is displayed as `NaN`. Amounts are binary floating point; decimal
//! arithmetic is only used to round them for display.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Amounts at or above this are shown in exponent notation.
const EXPONENT_THRESHOLD: f64 = 1e21;

/// A unit price in the store's currency.
///
/// Serializes as a JSON number. Non-finite values serialize as `null`
/// (as `JSON.stringify` does) and `null` deserializes back to NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct UnitPrice(f64);

impl UnitPrice {
    /// Create a price from a raw amount.
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    /// Coerce a textual price into a number.
    ///
    /// Follows `Number(text)`:
    /// - surrounding whitespace (including U+FEFF) is ignored, and blank
    ///   text is `0`
    /// - `Infinity`, `+Infinity` and `-Infinity` are accepted
    /// - `0x`, `0o` and `0b` prefixed integer literals are accepted
    /// - decimal and exponent forms (`12`, `-1.5`, `.5`, `2e3`) are accepted
    /// - anything else is NaN
    #[must_use]
    pub fn coerce(input: &str) -> Self {
        let trimmed = input.trim_matches(is_number_whitespace);
        if trimmed.is_empty() {
            return Self(0.0);
        }

        match trimmed {
            "Infinity" | "+Infinity" => return Self(f64::INFINITY),
            "-Infinity" => return Self(f64::NEG_INFINITY),
            _ => {}
        }

        if let Some(value) = parse_prefixed_integer(trimmed) {
            return Self(value);
        }

        // Rust also accepts "inf" and "nan" spellings; `Number()` does not.
        if trimmed
            .bytes()
            .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'))
        {
            return Self(f64::NAN);
        }

        trimmed.parse::<f64>().map_or(Self(f64::NAN), Self)
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Returns `true` if the price is NaN.
    #[must_use]
    pub const fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u64) -> f64 {
        #[allow(clippy::cast_precision_loss)] // Cart quantities never approach 2^53
        let quantity = quantity as f64;
        self.0 * quantity
    }
}

impl From<f64> for UnitPrice {
    fn from(amount: f64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for UnitPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = Option::<f64>::deserialize(deserializer)?;
        Ok(Self(amount.unwrap_or(f64::NAN)))
    }
}

/// Format an amount with exactly two decimals, like `toFixed(2)`.
///
/// Rounds half away from zero on the exact binary value, so `0.125` becomes
/// `0.13` while `1.005` (stored as 1.00499...) becomes `1.00`. Negative
/// amounts keep their sign even when they round to zero (`-0.00`), and
/// magnitudes of `1e21` and above use exponent notation (`1e+21`).
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount < 0.0 {
        return format!("-{}", format_magnitude(-amount));
    }
    format_magnitude(amount)
}

/// `toFixed(2)` for a non-negative amount (or negative zero).
fn format_magnitude(amount: f64) -> String {
    if amount.is_infinite() {
        return "Infinity".to_string();
    }
    if amount >= EXPONENT_THRESHOLD {
        return exponent_notation(amount);
    }
    if amount == 0.0 {
        return "0.00".to_string();
    }

    Decimal::from_f64_retain(amount).map_or_else(
        || format!("{amount:.2}"),
        |exact| {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        },
    )
}

/// Shortest round-trip digits with a signed exponent, e.g. `1.5e+21`.
fn exponent_notation(amount: f64) -> String {
    let text = format!("{amount:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Whitespace that `Number()` strips: Unicode `White_Space` except U+0085,
/// plus the byte-order mark U+FEFF.
const fn is_number_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | ' ' | '\u{a0}' | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

/// Parse `0x`, `0o` and `0b` literals (unsigned, as `Number()` requires).
fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let lower = s.get(..2)?.to_ascii_lowercase();
    let radix = match lower.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };

    let digits = s.get(2..)?;
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    });
    Some(value.unwrap_or(f64::NAN))
}
