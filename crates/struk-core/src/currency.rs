//! # Currency Formatting
//!
//! Renders amounts as Indonesian Rupiah with zero fractional digits.
//!
//! ```text
//! Money(3_500_000 sen) ──► round to rupiah ──► group by locale ──► "Rp 35.000"
//!                                                    │
//!                                         unknown locale?
//!                                                    │
//!                                                    ▼
//!                                   manual "." grouping ──► "Rp 35.000"
//! ```
//!
//! Formatting never fails: a locale that cannot be resolved falls back to the
//! manual rendering.

use num_format::{Locale, ToFormattedString};
use tracing::debug;

use crate::error::CurrencyError;
use crate::money::Money;

/// Default locale for grouping (Indonesian).
pub const DEFAULT_LOCALE: &str = "id";

/// Currency prefix printed before every amount.
pub const RUPIAH_PREFIX: &str = "Rp";

/// Locale-aware Rupiah formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RupiahFormatter {
    locale: String,
}

impl RupiahFormatter {
    /// Creates a formatter for a locale name such as `id` or `en`.
    pub fn new(locale: impl Into<String>) -> Self {
        RupiahFormatter {
            locale: locale.into(),
        }
    }

    /// Returns the configured locale name.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Formats an amount, falling back to manual grouping on failure.
    ///
    /// ## Example
    /// ```rust
    /// use struk_core::currency::RupiahFormatter;
    /// use struk_core::Money;
    ///
    /// let fmt = RupiahFormatter::default();
    /// assert_eq!(fmt.format(Money::from_rupiah(35_000)), "Rp 35.000");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        match self.try_format(amount) {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "Locale formatting failed, using manual rendering");
                format_rupiah_manual(amount)
            }
        }
    }

    /// Formats an amount with the configured locale.
    pub fn try_format(&self, amount: Money) -> Result<String, CurrencyError> {
        let locale = Locale::from_name(&self.locale).map_err(|_| CurrencyError::UnknownLocale {
            locale: self.locale.clone(),
        })?;

        let rupiah = amount.rupiah_rounded();
        let grouped = rupiah.unsigned_abs().to_formatted_string(&locale);
        Ok(with_prefix(rupiah < 0, &grouped))
    }
}

impl Default for RupiahFormatter {
    fn default() -> Self {
        RupiahFormatter::new(DEFAULT_LOCALE)
    }
}

/// Manual rendering: `Rp {rounded, "."-grouped}`.
///
/// ## Example
/// ```rust
/// use struk_core::currency::format_rupiah_manual;
/// use struk_core::Money;
///
/// assert_eq!(format_rupiah_manual(Money::from_rupiah(1_250_000)), "Rp 1.250.000");
/// assert_eq!(format_rupiah_manual(Money::from_sen(-150)), "-Rp 2");
/// ```
pub fn format_rupiah_manual(amount: Money) -> String {
    let rupiah = amount.rupiah_rounded();
    with_prefix(rupiah < 0, &group_thousands(rupiah.unsigned_abs(), '.'))
}

fn with_prefix(negative: bool, digits: &str) -> String {
    let sign = if negative { "-" } else { "" };
    format!("{sign}{RUPIAH_PREFIX} {digits}")
}

/// Groups the digits of `value` in threes.
fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
