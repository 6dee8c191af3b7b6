//! Point-of-sale cart engine.
//!
//! [`PosSession`] holds the product snapshot fetched at open and an
//! in-memory cart derived from it. The snapshot is the authority for stock
//! ceilings until the next [`PosSession::refresh`]; the backend remains the
//! truth and re-checks stock on every sale it records.
//!
//! Checkout submits one sale request per cart line, in cart order, and
//! stops at the first rejection. The backend offers no batched sale
//! endpoint and no way to delete a recorded sale, so lines submitted before
//! a failure stay recorded; [`CheckoutError::SaleFailed`] reports exactly
//! which ones so the operator sees the true backend state instead of a
//! generic failure.

mod invoice;

pub use invoice::{Invoice, InvoiceError, InvoiceLine};

use medipos_core::{ProductId, SessionToken, format_inr};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, Product, SaleRequest};

/// The fixed GST rate applied to the subtotal.
#[must_use]
pub fn gst_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// A product as the POS view sees it: id, name, stock, and the sell price.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    pub id: ProductId,
    pub name: String,
    pub stock: u32,
    pub price: Decimal,
}

impl From<&Product> for StockItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            stock: product.quantity,
            price: product.sell_price,
        }
    }
}

/// A pending, unconfirmed sale quantity for one product.
///
/// Quantity is always in `[1, stock]` as observed at the last refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Customer identity captured for the sale records and the invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub phone: String,
}

/// Cart totals. Always recomputed from the lines, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub gst: Decimal,
    pub total: Decimal,
}

/// Rejected cart mutations. The cart is left unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartWarning {
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    #[error("cannot exceed available stock for {name}")]
    ExceedsStock { name: String },

    /// The id does not appear in the current snapshot.
    #[error("no product with id {0}")]
    UnknownProduct(ProductId),
}

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("customer name and phone are required")]
    MissingCustomer,

    /// A sale line was rejected mid-loop. Lines in `committed` were already
    /// recorded by the backend and cannot be rolled back.
    #[error(
        "sale for {} failed ({} earlier {} already recorded): {source}",
        failed.name,
        committed.len(),
        if committed.len() == 1 { "line was" } else { "lines were" }
    )]
    SaleFailed {
        committed: Vec<CartLine>,
        failed: CartLine,
        #[source]
        source: ApiError,
    },
}

/// Everything checkout hands back for invoice rendering: the sold lines,
/// the customer, and the totals as they stood at submission time.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub lines: Vec<CartLine>,
    pub customer: Customer,
    pub totals: Totals,
}

/// One POS cart session over a product snapshot.
#[derive(Debug, Clone, Default)]
pub struct PosSession {
    items: Vec<StockItem>,
    cart: Vec<CartLine>,
    customer: Customer,
}

impl PosSession {
    /// Open a session over a freshly fetched product list.
    #[must_use]
    pub fn new(products: &[Product]) -> Self {
        Self {
            items: products.iter().map(StockItem::from).collect(),
            cart: Vec::new(),
            customer: Customer::default(),
        }
    }

    /// The product snapshot this session sells from.
    #[must_use]
    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    /// Case-insensitive substring search over the snapshot.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&StockItem> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    #[must_use]
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn set_customer(&mut self, name: &str, phone: &str) {
        self.customer = Customer {
            name: name.to_owned(),
            phone: phone.to_owned(),
        };
    }

    /// Add one unit of a product to the cart.
    ///
    /// Inserts a new line with quantity 1, or increments an existing line
    /// by one. Rejected without state change when the product is out of
    /// stock or the increment would exceed the snapshot's on-hand quantity.
    ///
    /// # Errors
    ///
    /// [`CartWarning`] describing why the add was rejected.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<(), CartWarning> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or(CartWarning::UnknownProduct(id))?;

        if item.stock == 0 {
            return Err(CartWarning::OutOfStock {
                name: item.name.clone(),
            });
        }

        if let Some(line) = self.cart.iter_mut().find(|line| line.product_id == id) {
            if line.quantity >= item.stock {
                return Err(CartWarning::ExceedsStock {
                    name: item.name.clone(),
                });
            }
            line.quantity += 1;
        } else {
            self.cart.push(CartLine {
                product_id: id,
                name: item.name.clone(),
                unit_price: item.price,
                quantity: 1,
            });
        }

        Ok(())
    }

    /// Replace a cart line's quantity.
    ///
    /// A quantity below 1 is a silent no-op; a quantity above the
    /// snapshot's on-hand stock is rejected with no state change. Setting
    /// a quantity for a product that has no cart line is also a no-op.
    ///
    /// # Errors
    ///
    /// [`CartWarning::ExceedsStock`] when the requested quantity exceeds
    /// the current snapshot.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), CartWarning> {
        if quantity < 1 {
            return Ok(());
        }

        if let Some(item) = self.items.iter().find(|item| item.id == id) {
            if quantity > item.stock {
                return Err(CartWarning::ExceedsStock {
                    name: item.name.clone(),
                });
            }
        }

        if let Some(line) = self.cart.iter_mut().find(|line| line.product_id == id) {
            line.quantity = quantity;
        }

        Ok(())
    }

    /// Delete a cart line unconditionally.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.retain(|line| line.product_id != id);
    }

    /// Subtotal, GST, and grand total over the current cart.
    ///
    /// All three are zero for the empty cart. Exact decimal arithmetic;
    /// GST is subtotal times the fixed rate, never re-rounded.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let subtotal: Decimal = self.cart.iter().map(CartLine::line_total).sum();
        let gst = subtotal * gst_rate();

        Totals {
            subtotal,
            gst,
            total: subtotal + gst,
        }
    }

    /// Submit the cart as one sale record per line, in cart order.
    ///
    /// Preconditions are checked before any network activity: the cart
    /// must be non-empty and the customer name and phone must both be set.
    /// On success the cart and customer are cleared and a [`Receipt`] is
    /// returned for invoice rendering; call [`Self::refresh`] afterwards to
    /// pick up the depleted stock.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::SaleFailed`] stops at the first rejected line and
    /// reports the lines already recorded.
    pub async fn checkout(
        &mut self,
        api: &ApiClient,
        token: &SessionToken,
    ) -> Result<Receipt, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.customer.name.is_empty() || self.customer.phone.is_empty() {
            return Err(CheckoutError::MissingCustomer);
        }

        let totals = self.totals();
        let mut committed: Vec<CartLine> = Vec::with_capacity(self.cart.len());

        for line in &self.cart {
            let request = SaleRequest {
                product_id: line.product_id,
                quantity: line.quantity,
                customer_name: self.customer.name.clone(),
                customer_phone: self.customer.phone.clone(),
            };

            if let Err(source) = api.create_sale(token, &request).await {
                tracing::warn!(
                    "sale line for {} rejected after {} committed lines",
                    line.name,
                    committed.len()
                );
                return Err(CheckoutError::SaleFailed {
                    committed,
                    failed: line.clone(),
                    source,
                });
            }

            tracing::debug!("recorded sale line: {} x{}", line.name, line.quantity);
            committed.push(line.clone());
        }

        let receipt = Receipt {
            lines: std::mem::take(&mut self.cart),
            customer: std::mem::take(&mut self.customer),
            totals,
        };

        tracing::info!(
            "checkout complete: {} lines, total {}",
            receipt.lines.len(),
            format_inr(receipt.totals.total)
        );
        Ok(receipt)
    }

    /// Re-fetch the product snapshot, e.g. after a completed checkout.
    ///
    /// The cart is left untouched; stock ceilings for later mutations come
    /// from the new snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the backend error untouched; the caller applies the
    /// read-failure policy.
    pub async fn refresh(&mut self, api: &ApiClient, token: &SessionToken) -> Result<(), ApiError> {
        let products = api.list_products(token).await?;
        self.items = products.iter().map(StockItem::from).collect();
        Ok(())
    }
}
