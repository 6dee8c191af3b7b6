//! Money display helpers.
//!
//! Monetary amounts are carried as [`rust_decimal::Decimal`] throughout the
//! workspace; prices never touch binary floating point. This module owns the
//! display convention for Indian rupees.

use rust_decimal::Decimal;

/// Format a decimal amount as Indian rupees (e.g., "₹249.50").
///
/// Always renders two decimal places, matching printed receipts.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    format!("\u{20b9}{amount:.2}")
}
