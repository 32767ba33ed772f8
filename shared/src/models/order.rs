//! Order and Line Item Models
//!
//! An [`Order`] is created atomically together with its [`LineItem`]s and
//! owns them for its whole lifetime; items then advance through the
//! preparation pipeline independently.
//!
//! Order status is **staff-set**, never derived from line items: kitchen
//! staff work at line-item granularity, waiters move the order itself.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Status machines
// ============================================================================

/// Line item preparation status
///
/// Forward-only pipeline with cancellation from the first two stages:
///
/// ```text
/// pending -> in_preparation -> ready -> delivered
///    |              |
///    +--------------+--> cancelled
/// ```
///
/// `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemStatus {
    Pending,
    InPreparation,
    Ready,
    Delivered,
    Cancelled,
}

impl LineItemStatus {
    /// Total transition check over the line-item pipeline
    pub fn can_transition_to(self, next: LineItemStatus) -> bool {
        use LineItemStatus::*;
        matches!(
            (self, next),
            (Pending, InPreparation)
                | (InPreparation, Ready)
                | (Ready, Delivered)
                | (Pending, Cancelled)
                | (InPreparation, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LineItemStatus::Delivered | LineItemStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineItemStatus::Pending => "pending",
            LineItemStatus::InPreparation => "in_preparation",
            LineItemStatus::Ready => "ready",
            LineItemStatus::Delivered => "delivered",
            LineItemStatus::Cancelled => "cancelled",
        }
    }
}

/// Order status, the coarse staff-facing view
///
/// `paid` and `cancelled` settle the order and release its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InPreparation,
    Ready,
    Delivered,
    Cancelled,
    Paid,
}

impl OrderStatus {
    /// Total transition check over the order state machine
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, InPreparation)
                | (InPreparation, Ready)
                | (Ready, Delivered)
                | (Delivered, Paid)
                | (Pending, Cancelled)
                | (InPreparation, Cancelled)
        )
    }

    /// Settled orders no longer hold their table
    pub fn is_settled(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InPreparation => "in_preparation",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Paid => "paid",
        }
    }
}

// ============================================================================
// Entities
// ============================================================================

/// One product entry within an order
///
/// `unit_price` and `category` are snapshotted from the catalog at creation
/// time; later catalog edits never change an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub product_id: u64,
    pub product_name: String,
    /// Category snapshot, used by the kitchen food/drink filter
    pub category: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: LineItemStatus,
}

impl LineItem {
    /// `unit_price * quantity`
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A customer order tied to one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub table_number: u32,
    /// Staff member who created the order
    pub staff_id: u64,
    pub status: OrderStatus,
    /// Creation time (Unix millis), basis for kitchen elapsed-time display
    pub started_at: i64,
    /// Set when the order is marked delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
    /// Always equals the sum of non-cancelled item subtotals
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Insertion order = display order
    pub items: Vec<LineItem>,
}

impl Order {
    /// Recompute the total from non-cancelled line items
    ///
    /// The stored total is always refreshed through this after any item
    /// change; it is never incrementally adjusted.
    pub fn computed_total(&self) -> Decimal {
        self.items
            .iter()
            .filter(|item| item.status != LineItemStatus::Cancelled)
            .map(LineItem::subtotal)
            .sum()
    }

    /// An order is open while it still holds its table
    pub fn is_open(&self) -> bool {
        !self.status.is_settled()
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// One requested item within a create-order call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderItem {
    pub product_id: u64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub table_number: u32,
    pub items: Vec<CreateOrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    /// Recorded on the `paid` transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// Update line-item status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemStatusUpdate {
    pub status: LineItemStatus,
}

/// Kitchen view category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    /// Items whose category equals the configured kitchen food category
    Food,
    /// Everything that is not food
    Drink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_pipeline_is_forward_only() {
        use LineItemStatus::*;
        assert!(Pending.can_transition_to(InPreparation));
        assert!(InPreparation.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Delivered));
        // backward edges rejected
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Ready.can_transition_to(InPreparation));
        assert!(!InPreparation.can_transition_to(Pending));
    }

    #[test]
    fn cancellation_only_before_ready() {
        use LineItemStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(InPreparation.can_transition_to(Cancelled));
        assert!(!Ready.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_item_states_have_no_exits() {
        use LineItemStatus::*;
        for next in [Pending, InPreparation, Ready, Delivered, Cancelled] {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn order_settlement_edges() {
        use OrderStatus::*;
        assert!(Delivered.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(InPreparation.can_transition_to(Cancelled));
        assert!(!Ready.can_transition_to(Cancelled));
        assert!(!Paid.can_transition_to(Pending));
        assert!(Paid.is_settled());
        assert!(Cancelled.is_settled());
    }

    #[test]
    fn total_skips_cancelled_items() {
        let item = |status, price: i64, qty| LineItem {
            id: 1,
            product_id: 1,
            product_name: "x".into(),
            category: "Plato".into(),
            quantity: qty,
            unit_price: Decimal::new(price, 2),
            note: None,
            status,
        };
        let order = Order {
            id: 1,
            table_number: 3,
            staff_id: 1,
            status: OrderStatus::Pending,
            started_at: 0,
            delivered_at: None,
            total: Decimal::ZERO,
            payment_method: None,
            note: None,
            items: vec![
                item(LineItemStatus::Pending, 1500, 2),
                item(LineItemStatus::Cancelled, 999, 5),
            ],
        };
        assert_eq!(order.computed_total(), Decimal::new(3000, 2));
    }
}
