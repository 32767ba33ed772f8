//! Pending-ticket projection
//!
//! Turns open orders into the kitchen display view. Delivered and cancelled
//! items are off the queue; each ticket carries its waiting time and an
//! urgency band so the display can color-code without its own clock math.

use serde::Serialize;
use shared::util::elapsed_minutes;
use shared::{CategoryFilter, LineItemStatus, Order};
use std::collections::HashMap;

/// Waiting-time urgency band
///
/// | Band | Elapsed |
/// |---------|-------------|
/// | normal | < 10 min |
/// | warning | 10..20 min |
/// | danger | >= 20 min |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    Normal,
    Warning,
    Danger,
}

impl TimeBand {
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes < 10 {
            TimeBand::Normal
        } else if minutes < 20 {
            TimeBand::Warning
        } else {
            TimeBand::Danger
        }
    }
}

/// One line on a kitchen ticket
#[derive(Debug, Clone, Serialize)]
pub struct TicketItem {
    pub item_id: u64,
    pub product_name: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: LineItemStatus,
}

/// One kitchen ticket, projected from an open order
#[derive(Debug, Clone, Serialize)]
pub struct PendingTicket {
    pub order_id: u64,
    pub table_number: u32,
    /// Display name of the waiter who took the order, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    pub elapsed_minutes: i64,
    pub band: TimeBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub items: Vec<TicketItem>,
}

/// Project open orders into kitchen tickets
///
/// Orders arrive from one storage snapshot. Items already delivered or
/// cancelled are dropped; orders left with no items after filtering produce
/// no ticket. Oldest orders come first so the queue reads top-down.
pub fn build(
    orders: Vec<Order>,
    staff_names: &HashMap<u64, String>,
    food_category: &str,
    filter: CategoryFilter,
    now: i64,
) -> Vec<PendingTicket> {
    let mut tickets: Vec<PendingTicket> = orders
        .into_iter()
        .filter_map(|order| {
            let items: Vec<TicketItem> = order
                .items
                .into_iter()
                .filter(|item| {
                    !matches!(
                        item.status,
                        LineItemStatus::Delivered | LineItemStatus::Cancelled
                    )
                })
                .filter(|item| match filter {
                    CategoryFilter::All => true,
                    CategoryFilter::Food => item.category == food_category,
                    CategoryFilter::Drink => item.category != food_category,
                })
                .map(|item| TicketItem {
                    item_id: item.id,
                    product_name: item.product_name,
                    quantity: item.quantity,
                    note: item.note,
                    status: item.status,
                })
                .collect();

            if items.is_empty() {
                return None;
            }

            let elapsed = elapsed_minutes(order.started_at, now);
            Some(PendingTicket {
                order_id: order.id,
                table_number: order.table_number,
                staff_name: staff_names.get(&order.staff_id).cloned(),
                elapsed_minutes: elapsed,
                band: TimeBand::from_minutes(elapsed),
                note: order.note,
                items,
            })
        })
        .collect();

    tickets.sort_by_key(|t| std::cmp::Reverse(t.elapsed_minutes));
    tickets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{LineItem, OrderStatus};

    const MINUTE: i64 = 60_000;

    fn item(id: u64, name: &str, category: &str, status: LineItemStatus) -> LineItem {
        LineItem {
            id,
            product_id: id,
            product_name: name.to_string(),
            category: category.to_string(),
            quantity: 1,
            unit_price: Decimal::new(1000, 2),
            note: None,
            status,
        }
    }

    fn order(id: u64, started_at: i64, items: Vec<LineItem>) -> Order {
        Order {
            id,
            table_number: id as u32,
            staff_id: 2,
            status: OrderStatus::Pending,
            started_at,
            delivered_at: None,
            total: Decimal::ZERO,
            payment_method: None,
            note: None,
            items,
        }
    }

    #[test]
    fn bands_at_thresholds() {
        assert_eq!(TimeBand::from_minutes(0), TimeBand::Normal);
        assert_eq!(TimeBand::from_minutes(9), TimeBand::Normal);
        assert_eq!(TimeBand::from_minutes(10), TimeBand::Warning);
        assert_eq!(TimeBand::from_minutes(19), TimeBand::Warning);
        assert_eq!(TimeBand::from_minutes(20), TimeBand::Danger);
        assert_eq!(TimeBand::from_minutes(90), TimeBand::Danger);
    }

    #[test]
    fn delivered_and_cancelled_items_leave_the_queue() {
        let now = 100 * MINUTE;
        let orders = vec![order(
            1,
            now - 5 * MINUTE,
            vec![
                item(1, "Ceviche", "Plato", LineItemStatus::Pending),
                item(2, "Cerveza", "Bebida", LineItemStatus::Delivered),
                item(3, "Lomo", "Plato", LineItemStatus::Cancelled),
            ],
        )];

        let tickets = build(orders, &HashMap::new(), "Plato", CategoryFilter::All, now);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].items.len(), 1);
        assert_eq!(tickets[0].items[0].product_name, "Ceviche");
    }

    #[test]
    fn fully_delivered_order_produces_no_ticket() {
        let now = 100 * MINUTE;
        let orders = vec![order(
            1,
            now - MINUTE,
            vec![item(1, "Ceviche", "Plato", LineItemStatus::Delivered)],
        )];
        assert!(build(orders, &HashMap::new(), "Plato", CategoryFilter::All, now).is_empty());
    }

    #[test]
    fn food_and_drink_filters_split_on_configured_category() {
        let now = 100 * MINUTE;
        let orders = || {
            vec![order(
                1,
                now - MINUTE,
                vec![
                    item(1, "Ceviche", "Plato", LineItemStatus::Pending),
                    item(2, "Cerveza", "Bebida", LineItemStatus::Pending),
                ],
            )]
        };

        let food = build(orders(), &HashMap::new(), "Plato", CategoryFilter::Food, now);
        assert_eq!(food[0].items.len(), 1);
        assert_eq!(food[0].items[0].product_name, "Ceviche");

        let drink = build(orders(), &HashMap::new(), "Plato", CategoryFilter::Drink, now);
        assert_eq!(drink[0].items.len(), 1);
        assert_eq!(drink[0].items[0].product_name, "Cerveza");
    }

    #[test]
    fn oldest_ticket_first_with_band() {
        let now = 100 * MINUTE;
        let orders = vec![
            order(
                1,
                now - 5 * MINUTE,
                vec![item(1, "A", "Plato", LineItemStatus::Pending)],
            ),
            order(
                2,
                now - 25 * MINUTE,
                vec![item(2, "B", "Plato", LineItemStatus::Pending)],
            ),
            order(
                3,
                now - 12 * MINUTE,
                vec![item(3, "C", "Plato", LineItemStatus::InPreparation)],
            ),
        ];

        let tickets = build(orders, &HashMap::new(), "Plato", CategoryFilter::All, now);
        let ids: Vec<u64> = tickets.iter().map(|t| t.order_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(tickets[0].band, TimeBand::Danger);
        assert_eq!(tickets[1].band, TimeBand::Warning);
        assert_eq!(tickets[2].band, TimeBand::Normal);
    }

    #[test]
    fn staff_names_are_resolved_when_known() {
        let now = 100 * MINUTE;
        let mut names = HashMap::new();
        names.insert(2u64, "Juan Pérez".to_string());

        let tickets = build(
            vec![order(
                1,
                now - MINUTE,
                vec![item(1, "A", "Plato", LineItemStatus::Pending)],
            )],
            &names,
            "Plato",
            CategoryFilter::All,
            now,
        );
        assert_eq!(tickets[0].staff_name.as_deref(), Some("Juan Pérez"));
    }
}
