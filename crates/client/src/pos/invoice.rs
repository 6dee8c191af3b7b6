//! Printable invoice artifact.
//!
//! Rendering is a pure presentation step after a fully successful checkout:
//! no backend interaction, no effect on the recorded sale. The artifact is
//! an HTML document written next to the configured invoice directory,
//! named after the timestamp-derived invoice number.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use chrono::{DateTime, Local};
use medipos_core::format_inr;
use thiserror::Error;

use super::Receipt;

/// Errors producing the invoice artifact.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("failed to render invoice: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to write invoice: {0}")]
    Io(#[from] std::io::Error),
}

/// One invoice row, preformatted for the template.
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// The invoice document.
///
/// All monetary fields are preformatted strings; the template does layout
/// only.
#[derive(Debug, Clone, Template)]
#[template(path = "invoice.html")]
pub struct Invoice {
    pub store_name: String,
    pub invoice_no: String,
    pub date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: String,
    pub gst: String,
    pub total: String,
}

impl Invoice {
    /// Build an invoice from a checkout receipt with an explicit issue
    /// time. The invoice number is `INV-` followed by the issue time in
    /// milliseconds since the epoch.
    #[must_use]
    pub fn with_issue_time(
        store_name: &str,
        receipt: &Receipt,
        issued_at: DateTime<Local>,
    ) -> Self {
        Self {
            store_name: store_name.to_owned(),
            invoice_no: format!("INV-{}", issued_at.timestamp_millis()),
            date: issued_at.format("%d/%m/%Y, %H:%M:%S").to_string(),
            customer_name: receipt.customer.name.clone(),
            customer_phone: receipt.customer.phone.clone(),
            lines: receipt
                .lines
                .iter()
                .map(|line| InvoiceLine {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: format_inr(line.unit_price),
                    line_total: format_inr(line.line_total()),
                })
                .collect(),
            subtotal: format_inr(receipt.totals.subtotal),
            gst: format_inr(receipt.totals.gst),
            total: format_inr(receipt.totals.total),
        }
    }

    /// Build an invoice issued now.
    #[must_use]
    pub fn generate(store_name: &str, receipt: &Receipt) -> Self {
        Self::with_issue_time(store_name, receipt, Local::now())
    }

    /// File name the artifact is written under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.html", self.invoice_no)
    }

    /// Render and write the artifact into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering fails or the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, InvoiceError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render()?)?;

        tracing::info!("invoice written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use medipos_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;
    use crate::pos::{CartLine, Customer, Totals};

    fn receipt() -> Receipt {
        let lines = vec![
            CartLine {
                product_id: ProductId::new(1),
                name: "Paracetamol".to_owned(),
                unit_price: Decimal::new(100, 0),
                quantity: 2,
            },
            CartLine {
                product_id: ProductId::new(2),
                name: "Ibuprofen".to_owned(),
                unit_price: Decimal::new(50, 0),
                quantity: 1,
            },
        ];
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let gst = subtotal * Decimal::new(18, 2);

        Receipt {
            lines,
            customer: Customer {
                name: "Asha".to_owned(),
                phone: "9876543210".to_owned(),
            },
            totals: Totals {
                subtotal,
                gst,
                total: subtotal + gst,
            },
        }
    }

    fn issue_time() -> DateTime<Local> {
        Local.timestamp_millis_opt(1_750_000_000_000).unwrap()
    }

    #[test]
    fn test_invoice_number_derives_from_timestamp() {
        let invoice = Invoice::with_issue_time("Test Store", &receipt(), issue_time());

        assert_eq!(invoice.invoice_no, "INV-1750000000000");
        assert_eq!(invoice.file_name(), "INV-1750000000000.html");
    }

    #[test]
    fn test_line_totals_equal_price_times_quantity() {
        let invoice = Invoice::with_issue_time("Test Store", &receipt(), issue_time());

        let first = invoice.lines.first().unwrap();
        assert_eq!(first.unit_price, "\u{20b9}100.00");
        assert_eq!(first.line_total, "\u{20b9}200.00");

        let second = invoice.lines.get(1).unwrap();
        assert_eq!(second.line_total, "\u{20b9}50.00");
    }

    #[test]
    fn test_invoice_totals_match_receipt() {
        let invoice = Invoice::with_issue_time("Test Store", &receipt(), issue_time());

        assert_eq!(invoice.subtotal, "\u{20b9}250.00");
        assert_eq!(invoice.gst, "\u{20b9}45.00");
        assert_eq!(invoice.total, "\u{20b9}295.00");
    }

    #[test]
    fn test_rendered_document_contains_every_line() {
        let invoice = Invoice::with_issue_time("Test Store", &receipt(), issue_time());
        let html = invoice.render().unwrap();

        assert!(html.contains("Test Store"));
        assert!(html.contains("INV-1750000000000"));
        assert!(html.contains("Paracetamol"));
        assert!(html.contains("Ibuprofen"));
        assert!(html.contains("\u{20b9}295.00"));
    }

    #[test]
    fn test_write_to_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("invoices");
        let invoice = Invoice::with_issue_time("Test Store", &receipt(), issue_time());

        let path = invoice.write_to(&target).unwrap();

        assert!(path.ends_with("INV-1750000000000.html"));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("Asha"));
    }
}
