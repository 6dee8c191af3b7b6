//! Typed request/response schemas for the backend REST API.
//!
//! Every endpoint gets an explicit serde type here; payloads are validated
//! at the client boundary instead of being trusted ad hoc at each call site.
//! Field names mirror the backend wire format, so no `rename` attributes are
//! needed.

use chrono::{NaiveDate, NaiveDateTime};
use medipos_core::{ProductId, SaleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth
// =============================================================================

/// `POST /login` request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /login` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// JWT issued by the backend, attached as a bearer token afterwards.
    pub access_token: String,
}

/// `POST /register` request body.
///
/// The backend calls the company field `name`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Products
// =============================================================================

/// A stocked item as returned by `GET /products`.
///
/// Owned and mutated only by the backend; the client mirrors it read-only
/// except for optimistic edits submitted via [`ProductPayload`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// On-hand quantity. The backend guarantees this is never negative.
    pub quantity: u32,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub buy_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sell_price: Decimal,
    #[serde(default)]
    pub supplier: String,
}

/// Request body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub buy_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sell_price: Decimal,
    pub quantity: u32,
    pub supplier: String,
}

// =============================================================================
// Sales
// =============================================================================

/// `POST /sales` request body: one cart line of a checkout.
#[derive(Debug, Clone, Serialize)]
pub struct SaleRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub customer_name: String,
    pub customer_phone: String,
}

/// A past transaction as returned by `GET /sales`.
///
/// Old rows can predate schema additions, so everything except the id is
/// nullable; the sales view substitutes display defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub sold_at: Option<NaiveDateTime>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_price: Option<Decimal>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Aggregate KPIs from `GET /dashboard`.
///
/// All figures are asserted by backend data; nothing here is recomputed
/// client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_margin_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub today_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub today_profit: Decimal,
    pub today_sales_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_growth_percent: Decimal,
    #[serde(default)]
    pub weekly_revenue: Vec<DailyRevenue>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    /// Items inside the backend's 30-day expiry window.
    #[serde(default)]
    pub expiring_soon: Vec<ExpiringProduct>,
}

/// One day of the trailing-week revenue series.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// One row of the top-selling-products list.
#[derive(Debug, Clone, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub total_sold: u32,
}

/// One row of the expiring-soon list.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpiringProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_backend_shape() {
        let json = r#"{
            "id": 3,
            "name": "Paracetamol 500mg",
            "quantity": 40,
            "batch_number": "B-1021",
            "expiry_date": "2026-11-30",
            "buy_price": 1.2,
            "sell_price": 2.5,
            "supplier": "Acme Pharma"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.quantity, 40);
        assert_eq!(product.sell_price, Decimal::new(25, 1));
        assert_eq!(
            product.expiry_date,
            Some(NaiveDate::from_ymd_opt(2026, 11, 30).unwrap())
        );
    }

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 1,
            "name": "Ibuprofen",
            "quantity": 0,
            "expiry_date": null,
            "buy_price": 3.0,
            "sell_price": 4.0
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.batch_number.is_empty());
        assert!(product.supplier.is_empty());
        assert!(product.expiry_date.is_none());
    }

    #[test]
    fn test_sale_record_with_null_fields() {
        let json = r#"{"id": 9, "product_name": null, "total_price": null}"#;

        let sale: SaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(sale.id, SaleId::new(9));
        assert!(sale.product_name.is_none());
        assert!(sale.total_price.is_none());
        assert!(sale.sold_at.is_none());
    }

    #[test]
    fn test_sale_request_wire_format() {
        let request = SaleRequest {
            product_id: ProductId::new(7),
            quantity: 2,
            customer_name: "Asha".to_owned(),
            customer_phone: "9876543210".to_owned(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["product_id"], 7);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["customer_name"], "Asha");
    }

    #[test]
    fn test_dashboard_defaults_empty_lists() {
        let json = r#"{
            "total_revenue": 1000.5,
            "total_profit": 250.0,
            "profit_margin_percent": 25.0,
            "today_revenue": 120.0,
            "today_profit": 30.0,
            "today_sales_count": 4,
            "weekly_growth_percent": -2.5
        }"#;

        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        assert!(summary.top_products.is_empty());
        assert!(summary.expiring_soon.is_empty());
        assert!(summary.weekly_revenue.is_empty());
        assert_eq!(summary.weekly_growth_percent, Decimal::new(-25, 1));
    }
}
