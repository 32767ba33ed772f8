//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product entity
///
/// `price` is what the customer pays and is snapshotted into line items at
/// order creation; later catalog price changes never touch existing orders.
/// `stock` may only be written inside a storage write transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    /// Free-form category name (e.g. "Plato", "Bebida")
    pub category: String,
    pub price: Decimal,
    pub cost: Decimal,
    /// Current stock level, never negative
    pub stock: i32,
    /// Low-stock alert threshold (stock <= min_stock triggers an alert)
    pub min_stock: i32,
    /// Unit of measure (e.g. "Unidad", "Vaso", "Plato")
    pub unit: String,
}

impl Product {
    /// Severity ratio for low-stock ordering: lower = worse
    ///
    /// A zero threshold is treated as 1 so depleted products without a
    /// configured minimum still sort first.
    pub fn stock_ratio(&self) -> f64 {
        f64::from(self.stock) / f64::from(self.min_stock.max(1))
    }

    /// Whether this product should appear in the low-stock alert list
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

/// Manual stock adjustment payload (positive = restock, negative = shrinkage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub delta: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32, min_stock: i32) -> Product {
        Product {
            id: 1,
            name: "Cerveza".into(),
            description: None,
            category: "Bebida".into(),
            price: Decimal::new(1500, 2),
            cost: Decimal::new(800, 2),
            stock,
            min_stock,
            unit: "Unidad".into(),
        }
    }

    #[test]
    fn low_stock_includes_equal_threshold() {
        assert!(product(5, 5).is_low_stock());
        assert!(product(4, 5).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
    }

    #[test]
    fn stock_ratio_handles_zero_threshold() {
        assert_eq!(product(0, 0).stock_ratio(), 0.0);
        assert_eq!(product(2, 4).stock_ratio(), 0.5);
    }
}
