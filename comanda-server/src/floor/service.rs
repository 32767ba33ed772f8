//! Floor service - order, table and stock operations
//!
//! Every mutation runs inside one redb write transaction: either all of its
//! effects commit (stock decrement, order row, table occupancy) or none do.
//! Dropping the transaction on an error path aborts it, so validation
//! failures leave the store untouched.

use rust_decimal::Decimal;
use shared::util::now_millis;
use shared::{
    CreateOrderRequest, DiningTable, LineItem, LineItemStatus, Order, OrderStatus,
    OrderStatusUpdate, Product, Staff, StaffPublic, StockAdjustment, TableStatus, TableUpdate,
};
use std::collections::HashMap;

use crate::floor::storage::{
    FloorStorage, LINE_ITEM_COUNTER, ORDER_COUNTER, StorageError,
};
use crate::floor::{FloorError, FloorResult, seed};

/// The order-fulfillment engine
pub struct FloorService {
    storage: FloorStorage,
}

impl FloorService {
    pub fn new(storage: FloorStorage) -> Self {
        Self { storage }
    }

    /// Seed default staff, tables and catalog when the store is empty
    ///
    /// Returns true when seeding ran.
    pub fn seed_if_empty(&self) -> FloorResult<bool> {
        if !self.storage.is_empty()? {
            return Ok(false);
        }
        seed::seed(&self.storage)?;
        Ok(true)
    }

    // ========== Orders ==========

    /// Create an order: reserve stock, snapshot prices, occupy the table
    ///
    /// The whole operation is one write transaction. Stock is checked and
    /// decremented per item; any failure (unknown product, short stock,
    /// invalid table state) aborts everything.
    pub fn create_order(&self, staff_id: u64, req: CreateOrderRequest) -> FloorResult<Order> {
        if req.items.is_empty() {
            return Err(FloorError::EmptyOrder);
        }
        for item in &req.items {
            if item.quantity <= 0 {
                return Err(FloorError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
        }

        let now = now_millis();
        let txn = self.storage.begin_write()?;

        let mut table = self
            .storage
            .get_table_txn(&txn, req.table_number)?
            .ok_or(FloorError::TableNotFound(req.table_number))?;
        if !table.status.can_transition_to(TableStatus::Occupied) {
            return Err(FloorError::InvalidTransition {
                entity: "table",
                from: table.status.as_str(),
                to: TableStatus::Occupied.as_str(),
            });
        }

        let mut items = Vec::with_capacity(req.items.len());
        for requested in &req.items {
            let mut product = self
                .storage
                .get_product_txn(&txn, requested.product_id)?
                .ok_or(FloorError::ProductNotFound(requested.product_id))?;

            if product.stock < requested.quantity {
                return Err(FloorError::InsufficientStock {
                    product_id: product.id,
                    product_name: product.name,
                    requested: requested.quantity,
                    available: product.stock,
                });
            }

            product.stock -= requested.quantity;
            self.storage.put_product_txn(&txn, &product)?;

            let item_id = self.storage.next_id(&txn, LINE_ITEM_COUNTER)?;
            items.push(LineItem {
                id: item_id,
                product_id: product.id,
                product_name: product.name,
                category: product.category,
                quantity: requested.quantity,
                unit_price: product.price,
                note: requested.note.clone(),
                status: LineItemStatus::Pending,
            });
        }

        let order_id = self.storage.next_id(&txn, ORDER_COUNTER)?;
        let mut order = Order {
            id: order_id,
            table_number: req.table_number,
            staff_id,
            status: OrderStatus::Pending,
            started_at: now,
            delivered_at: None,
            total: Decimal::ZERO,
            payment_method: None,
            note: req.note,
            items,
        };
        order.total = order.computed_total();
        self.storage.put_order_txn(&txn, &order)?;

        table.status = TableStatus::Occupied;
        table.staff_id = Some(staff_id);
        table.updated_at = now;
        self.storage.put_table_txn(&txn, &table)?;

        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            order_id = order.id,
            table_number = order.table_number,
            staff_id,
            total = %order.total,
            "Order created"
        );
        Ok(order)
    }

    pub fn get_order(&self, id: u64) -> FloorResult<Order> {
        self.storage
            .get_order(id)?
            .ok_or(FloorError::OrderNotFound(id))
    }

    /// List orders, optionally filtered by status, newest first
    pub fn list_orders(&self, status: Option<OrderStatus>) -> FloorResult<Vec<Order>> {
        let mut orders = self.storage.list_orders()?;
        if let Some(status) = status {
            orders.retain(|o| o.status == status);
        }
        orders.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(orders)
    }

    /// Move an order through its state machine
    ///
    /// - `delivered` stamps the delivery time
    /// - `paid` records the payment method
    /// - `cancelled` returns stock for items not yet prepared and cancels them
    /// - settlement (`paid`/`cancelled`) frees the table, unless another open
    ///   order still holds it
    pub fn update_order_status(&self, id: u64, update: OrderStatusUpdate) -> FloorResult<Order> {
        let now = now_millis();
        let txn = self.storage.begin_write()?;

        let mut order = self
            .storage
            .get_order_txn(&txn, id)?
            .ok_or(FloorError::OrderNotFound(id))?;

        if !order.status.can_transition_to(update.status) {
            return Err(FloorError::InvalidTransition {
                entity: "order",
                from: order.status.as_str(),
                to: update.status.as_str(),
            });
        }

        match update.status {
            OrderStatus::Delivered => {
                order.delivered_at = Some(now);
            }
            OrderStatus::Paid => {
                order.payment_method = update.payment_method;
            }
            OrderStatus::Cancelled => {
                // Items not yet prepared go back to stock; prepared ones are a loss
                for item in &mut order.items {
                    if matches!(
                        item.status,
                        LineItemStatus::Pending | LineItemStatus::InPreparation
                    ) {
                        let mut product = self
                            .storage
                            .get_product_txn(&txn, item.product_id)?
                            .ok_or(FloorError::ProductNotFound(item.product_id))?;
                        product.stock += item.quantity;
                        self.storage.put_product_txn(&txn, &product)?;
                        item.status = LineItemStatus::Cancelled;
                    }
                }
                order.total = order.computed_total();
            }
            _ => {}
        }

        order.status = update.status;
        self.storage.put_order_txn(&txn, &order)?;

        if order.status.is_settled() {
            self.release_table_if_last(&txn, &order, now)?;
        }

        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            order_id = order.id,
            status = order.status.as_str(),
            "Order status updated"
        );
        Ok(order)
    }

    /// Whether any open order (optionally excluding one) references the table
    fn open_order_holds_table(
        &self,
        txn: &redb::WriteTransaction,
        table_number: u32,
        excluding: Option<u64>,
    ) -> FloorResult<bool> {
        Ok(self
            .storage
            .list_orders_txn(txn)?
            .iter()
            .any(|o| o.table_number == table_number && o.is_open() && Some(o.id) != excluding))
    }

    /// Free the order's table unless another open order still references it
    fn release_table_if_last(
        &self,
        txn: &redb::WriteTransaction,
        settled: &Order,
        now: i64,
    ) -> FloorResult<()> {
        if self.open_order_holds_table(txn, settled.table_number, Some(settled.id))? {
            return Ok(());
        }

        let mut table = self
            .storage
            .get_table_txn(txn, settled.table_number)?
            .ok_or(FloorError::TableNotFound(settled.table_number))?;
        table.status = TableStatus::Free;
        table.staff_id = None;
        table.updated_at = now;
        self.storage.put_table_txn(txn, &table)?;
        Ok(())
    }

    /// Move a single line item through the preparation pipeline
    ///
    /// Cancelling a not-yet-prepared item returns its stock and recomputes
    /// the order total, all in the same transaction.
    pub fn update_line_item_status(
        &self,
        order_id: u64,
        item_id: u64,
        new_status: LineItemStatus,
    ) -> FloorResult<Order> {
        let txn = self.storage.begin_write()?;

        let mut order = self
            .storage
            .get_order_txn(&txn, order_id)?
            .ok_or(FloorError::OrderNotFound(order_id))?;
        if !order.is_open() {
            return Err(FloorError::OrderSettled(order_id));
        }

        let item = order
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(FloorError::LineItemNotFound { order_id, item_id })?;

        if !item.status.can_transition_to(new_status) {
            return Err(FloorError::InvalidTransition {
                entity: "line_item",
                from: item.status.as_str(),
                to: new_status.as_str(),
            });
        }

        let restock = new_status == LineItemStatus::Cancelled;
        let product_id = item.product_id;
        let quantity = item.quantity;
        item.status = new_status;

        if restock {
            let mut product = self
                .storage
                .get_product_txn(&txn, product_id)?
                .ok_or(FloorError::ProductNotFound(product_id))?;
            product.stock += quantity;
            self.storage.put_product_txn(&txn, &product)?;
            order.total = order.computed_total();
        }

        self.storage.put_order_txn(&txn, &order)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            order_id,
            item_id,
            status = new_status.as_str(),
            "Line item status updated"
        );
        Ok(order)
    }

    // ========== Tables ==========

    pub fn list_tables(&self) -> FloorResult<Vec<DiningTable>> {
        Ok(self.storage.list_tables()?)
    }

    /// Staff-driven table update: status change, assignment change, or both
    ///
    /// A table with open orders can only be freed through settlement, never
    /// by hand; freeing here is allowed once for seated-but-never-ordered
    /// tables.
    pub fn update_table(&self, number: u32, update: TableUpdate) -> FloorResult<DiningTable> {
        let txn = self.storage.begin_write()?;

        let mut table = self
            .storage
            .get_table_txn(&txn, number)?
            .ok_or(FloorError::TableNotFound(number))?;

        if let Some(status) = update.status {
            if !table.status.can_transition_to(status) {
                return Err(FloorError::InvalidTransition {
                    entity: "table",
                    from: table.status.as_str(),
                    to: status.as_str(),
                });
            }
            if status == TableStatus::Free
                && table.status != TableStatus::Free
                && self.open_order_holds_table(&txn, number, None)?
            {
                return Err(FloorError::TableHasOpenOrders(number));
            }
            table.status = status;
        }
        if let Some(staff_id) = update.staff_id {
            table.staff_id = Some(staff_id);
        }
        table.updated_at = now_millis();

        self.storage.put_table_txn(&txn, &table)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            table_number = number,
            status = table.status.as_str(),
            "Table updated"
        );
        Ok(table)
    }

    // ========== Catalog and stock ==========

    /// All products, grouped by category then name
    pub fn list_products(&self) -> FloorResult<Vec<Product>> {
        let mut products = self.storage.list_products()?;
        products.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        Ok(products)
    }

    /// Distinct category names, sorted
    pub fn product_categories(&self) -> FloorResult<Vec<String>> {
        let mut categories: Vec<String> = self
            .storage
            .list_products()?
            .into_iter()
            .map(|p| p.category)
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Manual stock correction (restock or shrinkage)
    ///
    /// Goes through the same write-transaction discipline as reservation;
    /// the result may never be negative.
    pub fn adjust_stock(&self, product_id: u64, adj: StockAdjustment) -> FloorResult<Product> {
        let txn = self.storage.begin_write()?;

        let mut product = self
            .storage
            .get_product_txn(&txn, product_id)?
            .ok_or(FloorError::ProductNotFound(product_id))?;

        let new_stock = product
            .stock
            .checked_add(adj.delta)
            .filter(|s| *s >= 0)
            .ok_or(FloorError::InvalidQuantity {
                product_id,
                quantity: adj.delta,
            })?;
        product.stock = new_stock;

        self.storage.put_product_txn(&txn, &product)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            product_id,
            delta = adj.delta,
            stock = product.stock,
            reason = adj.reason.as_deref().unwrap_or("-"),
            "Stock adjusted"
        );
        Ok(product)
    }

    /// Products at or below their threshold, most critical first
    ///
    /// Ordered by stock/threshold ratio ascending so a product at 0 of 10
    /// sorts before one at 4 of 5.
    pub fn low_stock_alerts(&self) -> FloorResult<Vec<Product>> {
        let mut alerts: Vec<Product> = self
            .storage
            .list_products()?
            .into_iter()
            .filter(Product::is_low_stock)
            .collect();
        alerts.sort_by(|a, b| {
            a.stock_ratio()
                .partial_cmp(&b.stock_ratio())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.stock.cmp(&b.stock))
        });
        Ok(alerts)
    }

    // ========== Staff ==========

    /// Staff accounts without credentials
    pub fn list_staff(&self) -> FloorResult<Vec<StaffPublic>> {
        Ok(self
            .storage
            .list_staff()?
            .iter()
            .map(Staff::to_public)
            .collect())
    }

    /// Full staff record for authentication
    pub fn find_staff_by_username(&self, username: &str) -> FloorResult<Option<Staff>> {
        Ok(self.storage.find_staff_by_username(username)?)
    }

    // ========== Kitchen snapshot ==========

    /// Open orders and staff names from one consistent read snapshot
    pub fn open_orders_with_staff(&self) -> FloorResult<(Vec<Order>, HashMap<u64, String>)> {
        Ok(self.storage.open_orders_with_staff()?)
    }
}
