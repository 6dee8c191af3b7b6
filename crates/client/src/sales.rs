//! Sales history display conversion.
//!
//! A single read-only fetch with no pagination, filtering, or sorting. Old
//! rows can predate schema additions, so every field except the id is
//! nullable on the wire; the view substitutes display defaults instead of
//! failing the whole list.

use medipos_core::format_inr;
use rust_decimal::Decimal;

use crate::api::SaleRecord;

/// Product name shown when the backend row has none.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Customer name shown when the sale was recorded without one.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// One past transaction, formatted for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleView {
    pub product_name: String,
    pub quantity: u32,
    pub customer_name: String,
    pub customer_phone: String,
    pub sold_at: String,
    pub total: String,
}

impl From<&SaleRecord> for SaleView {
    fn from(sale: &SaleRecord) -> Self {
        Self {
            product_name: sale
                .product_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_owned()),
            quantity: sale.quantity.unwrap_or(0),
            customer_name: sale
                .customer_name
                .clone()
                .unwrap_or_else(|| WALK_IN_CUSTOMER.to_owned()),
            customer_phone: sale
                .customer_phone
                .clone()
                .unwrap_or_else(|| "-".to_owned()),
            sold_at: sale.sold_at.map_or_else(
                || "-".to_owned(),
                |at| at.format("%d/%m/%Y, %H:%M:%S").to_string(),
            ),
            total: format_inr(sale.total_price.unwrap_or(Decimal::ZERO)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use medipos_core::SaleId;

    use super::*;

    #[test]
    fn test_null_fields_get_display_defaults() {
        let record = SaleRecord {
            id: SaleId::new(1),
            product_name: None,
            quantity: None,
            customer_name: None,
            customer_phone: None,
            sold_at: None,
            total_price: None,
        };

        let view = SaleView::from(&record);

        assert_eq!(view.product_name, UNKNOWN_PRODUCT);
        assert_eq!(view.quantity, 0);
        assert_eq!(view.customer_name, WALK_IN_CUSTOMER);
        assert_eq!(view.customer_phone, "-");
        assert_eq!(view.sold_at, "-");
        assert_eq!(view.total, "\u{20b9}0.00");
    }

    #[test]
    fn test_populated_fields_pass_through() {
        let record = SaleRecord {
            id: SaleId::new(2),
            product_name: Some("Paracetamol".to_owned()),
            quantity: Some(3),
            customer_name: Some("Asha".to_owned()),
            customer_phone: Some("9876543210".to_owned()),
            sold_at: NaiveDate::from_ymd_opt(2026, 6, 1)
                .unwrap()
                .and_hms_opt(14, 30, 5),
            total_price: Some(Decimal::new(29_500, 2)),
        };

        let view = SaleView::from(&record);

        assert_eq!(view.product_name, "Paracetamol");
        assert_eq!(view.quantity, 3);
        assert_eq!(view.sold_at, "01/06/2026, 14:30:05");
        assert_eq!(view.total, "\u{20b9}295.00");
    }
}
