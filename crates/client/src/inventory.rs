//! Inventory management: stock CRUD plus the client-side search filter.
//!
//! Writes follow the refresh-on-success policy: no incremental merge, the
//! caller re-fetches the full list after any successful mutation. Write
//! failures surface a generic notice only - the backend detail is logged
//! but never propagated to the user.

use chrono::NaiveDate;
use medipos_core::{ProductId, SessionToken};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, Product, ProductPayload};

/// Batch number submitted when the form does not provide one.
pub const PLACEHOLDER_BATCH: &str = "AUTO";

/// Supplier submitted when the form does not provide one.
pub const PLACEHOLDER_SUPPLIER: &str = "Default Supplier";

/// Inventory write failures. Deliberately generic: the user notice never
/// carries backend detail.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Name or stock missing on the add form.
    #[error("medicine name and stock are required")]
    MissingFields,

    #[error("failed to add medicine")]
    CreateFailed,

    #[error("update failed")]
    UpdateFailed,

    #[error("delete failed")]
    DeleteFailed,
}

/// A new stock item from the add form.
///
/// Price and expiry are not validated client-side; the single price is
/// submitted as both buy and sell price, as the form offers only one field.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub stock: u32,
    pub price: Decimal,
    pub expiry: Option<NaiveDate>,
}

/// An edited stock item from the edit form.
#[derive(Debug, Clone)]
pub struct ItemEdit {
    pub id: ProductId,
    pub name: String,
    pub stock: u32,
    pub price: Decimal,
    pub expiry: Option<NaiveDate>,
    /// Kept from the fetched record; placeholder when absent.
    pub batch_number: Option<String>,
    /// Kept from the fetched record; placeholder when absent.
    pub supplier: Option<String>,
}

/// Typed inventory operations over the backend client.
#[derive(Debug, Clone)]
pub struct InventoryManager {
    api: ApiClient,
}

impl InventoryManager {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the full product list.
    ///
    /// An empty result is an empty table, not an error.
    ///
    /// # Errors
    ///
    /// Propagates the backend error untouched; the caller applies the
    /// read-failure policy.
    pub async fn list(&self, token: &SessionToken) -> Result<Vec<Product>, ApiError> {
        self.api.list_products(token).await
    }

    /// Create a stock item.
    ///
    /// # Errors
    ///
    /// [`InventoryError::MissingFields`] for an empty name (before any
    /// network call), [`InventoryError::CreateFailed`] on backend rejection.
    pub async fn create(&self, token: &SessionToken, item: &NewItem) -> Result<(), InventoryError> {
        if item.name.is_empty() {
            return Err(InventoryError::MissingFields);
        }

        let payload = ProductPayload {
            name: item.name.clone(),
            batch_number: PLACEHOLDER_BATCH.to_owned(),
            expiry_date: item.expiry,
            buy_price: item.price,
            sell_price: item.price,
            quantity: item.stock,
            supplier: PLACEHOLDER_SUPPLIER.to_owned(),
        };

        self.api
            .create_product(token, &payload)
            .await
            .map_err(|e| {
                tracing::debug!("create product rejected: {e}");
                InventoryError::CreateFailed
            })
    }

    /// Update a stock item by identifier.
    ///
    /// # Errors
    ///
    /// [`InventoryError::UpdateFailed`] on backend rejection.
    pub async fn update(&self, token: &SessionToken, edit: &ItemEdit) -> Result<(), InventoryError> {
        let payload = ProductPayload {
            name: edit.name.clone(),
            batch_number: filled_or(edit.batch_number.as_deref(), PLACEHOLDER_BATCH),
            expiry_date: edit.expiry,
            buy_price: edit.price,
            sell_price: edit.price,
            quantity: edit.stock,
            supplier: filled_or(edit.supplier.as_deref(), PLACEHOLDER_SUPPLIER),
        };

        self.api
            .update_product(token, edit.id, &payload)
            .await
            .map_err(|e| {
                tracing::debug!("update product {} rejected: {e}", edit.id);
                InventoryError::UpdateFailed
            })
    }

    /// Delete a stock item by identifier. No confirmation step, no undo.
    ///
    /// # Errors
    ///
    /// [`InventoryError::DeleteFailed`] on backend rejection.
    pub async fn delete(&self, token: &SessionToken, id: ProductId) -> Result<(), InventoryError> {
        self.api.delete_product(token, id).await.map_err(|e| {
            tracing::debug!("delete product {id} rejected: {e}");
            InventoryError::DeleteFailed
        })
    }
}

fn filled_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => placeholder.to_owned(),
    }
}

/// Client-side inventory filter: case-insensitive substring match on the
/// name, optionally narrowed to items whose expiry date has passed.
///
/// Recomputed per invocation, never persisted.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub search: String,
    pub expired_only: bool,
}

impl InventoryFilter {
    /// Apply the filter against a product snapshot.
    ///
    /// Items without an expiry date never count as expired.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product], today: NaiveDate) -> Vec<&'a Product> {
        let needle = self.search.to_lowercase();

        products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .filter(|p| {
                !self.expired_only || p.expiry_date.is_some_and(|expiry| expiry < today)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(name: &str, expiry: Option<(i32, u32, u32)>) -> Product {
        Product {
            id: ProductId::new(1),
            name: name.to_owned(),
            quantity: 10,
            batch_number: PLACEHOLDER_BATCH.to_owned(),
            expiry_date: expiry.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            buy_price: Decimal::new(10, 0),
            sell_price: Decimal::new(15, 0),
            supplier: PLACEHOLDER_SUPPLIER.to_owned(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = vec![product("Paracetamol", None), product("Ibuprofen", None)];
        let filter = InventoryFilter {
            search: "PARA".to_owned(),
            expired_only: false,
        };

        let matched = filter.apply(&products, today());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Paracetamol");
    }

    #[test]
    fn test_empty_search_matches_all() {
        let products = vec![product("A", None), product("B", None)];
        let filter = InventoryFilter::default();

        assert_eq!(filter.apply(&products, today()).len(), 2);
    }

    #[test]
    fn test_expired_only_excludes_future_and_missing_dates() {
        let products = vec![
            product("Old", Some((2025, 1, 1))),
            product("Fresh", Some((2027, 1, 1))),
            product("Undated", None),
        ];
        let filter = InventoryFilter {
            search: String::new(),
            expired_only: true,
        };

        let matched = filter.apply(&products, today());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Old");
    }

    #[test]
    fn test_expiring_today_is_not_expired() {
        let products = vec![product("Edge", Some((2026, 6, 1)))];
        let filter = InventoryFilter {
            search: String::new(),
            expired_only: true,
        };

        assert!(filter.apply(&products, today()).is_empty());
    }

    #[test]
    fn test_filled_or_placeholder() {
        assert_eq!(filled_or(Some("B-10"), PLACEHOLDER_BATCH), "B-10");
        assert_eq!(filled_or(Some(""), PLACEHOLDER_BATCH), PLACEHOLDER_BATCH);
        assert_eq!(filled_or(None, PLACEHOLDER_SUPPLIER), PLACEHOLDER_SUPPLIER);
    }
}
