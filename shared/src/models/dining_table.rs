//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy status
///
/// Transitions:
///
/// ```text
/// free ──────────────> occupied        (order creation / staff action)
/// occupied <─────────> payment_pending (staff action)
/// occupied ──────────> free            (order settlement)
/// payment_pending ───> free            (order settlement)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Free,
    Occupied,
    PaymentPending,
}

impl TableStatus {
    /// Total transition check over the table state machine
    ///
    /// Self-transitions are allowed so an assignment-only update never
    /// trips the validator.
    pub fn can_transition_to(self, next: TableStatus) -> bool {
        use TableStatus::*;
        match (self, next) {
            (a, b) if a == b => true,
            (Free, Occupied) => true,
            (Occupied, PaymentPending) | (PaymentPending, Occupied) => true,
            (Occupied, Free) | (PaymentPending, Free) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
            TableStatus::PaymentPending => "payment_pending",
        }
    }
}

/// Dining table entity
///
/// Keyed by its physical number. `staff_id` is the waiter currently
/// responsible for the table, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub number: u32,
    pub capacity: i32,
    pub status: TableStatus,
    pub staff_id: Option<u64>,
    /// Last status/assignment change (Unix millis)
    pub updated_at: i64,
}

/// Update table payload: change status, staff assignment, or both
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_table_can_only_be_seated() {
        assert!(TableStatus::Free.can_transition_to(TableStatus::Occupied));
        assert!(!TableStatus::Free.can_transition_to(TableStatus::PaymentPending));
    }

    #[test]
    fn payment_pending_round_trips() {
        assert!(TableStatus::Occupied.can_transition_to(TableStatus::PaymentPending));
        assert!(TableStatus::PaymentPending.can_transition_to(TableStatus::Occupied));
        assert!(TableStatus::PaymentPending.can_transition_to(TableStatus::Free));
    }

    #[test]
    fn self_transition_is_a_noop() {
        assert!(TableStatus::Occupied.can_transition_to(TableStatus::Occupied));
    }
}
