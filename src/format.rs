//! Number formatting rules
//!
//! A [`NumberFormat`] is an immutable formatting rule shared across metrics
//! of the same kind (via `Arc`). Formatters are configuration, not state:
//! once built they are never mutated, so sharing one instance across every
//! metric of a kind is safe.

use serde::{Deserialize, Serialize};

/// Immutable number-rendering rule for metric display
///
/// Rounds to at most `max_fraction_digits`, trims trailing zeros, and
/// renders the decimal point with a configurable separator so callers can
/// match their locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    max_fraction_digits: usize,
    decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NumberFormat {
    /// Create a format with the given maximum fraction digits and a `.`
    /// decimal separator
    pub fn new(max_fraction_digits: usize) -> Self {
        Self {
            max_fraction_digits,
            decimal_separator: '.',
        }
    }

    /// Replace the decimal separator, e.g. `','` for comma locales
    pub fn with_separator(mut self, decimal_separator: char) -> Self {
        self.decimal_separator = decimal_separator;
        self
    }

    pub fn max_fraction_digits(&self) -> usize {
        self.max_fraction_digits
    }

    /// Render a value under this rule
    pub fn format(&self, value: f64) -> String {
        let mut rendered = format!("{:.*}", self.max_fraction_digits, value);

        // Maximum digits, not fixed digits: trailing zeros are trimmed.
        if self.max_fraction_digits > 0 && rendered.contains('.') {
            while rendered.ends_with('0') {
                rendered.pop();
            }
            if rendered.ends_with('.') {
                rendered.pop();
            }
        }

        if self.decimal_separator != '.' {
            rendered = rendered.replace('.', &self.decimal_separator.to_string());
        }

        rendered
    }
}
