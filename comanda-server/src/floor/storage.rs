//! redb-based storage for the dining floor
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `products` | `product_id` | `Product` | Catalog + live stock |
//! | `dining_tables` | `table_number` | `DiningTable` | Floor plan |
//! | `orders` | `order_id` | `Order` | Orders with embedded line items |
//! | `staff` | `staff_id` | `Staff` | Accounts (argon2 hashes) |
//! | `counters` | name | `u64` | Id allocation |
//!
//! Values are JSON-serialized. redb admits exactly one write transaction at a
//! time and commits atomically, which is what makes the engine's
//! check-and-decrement stock reservation safe under concurrency: two
//! competing reservations for the last unit serialize, and the loser sees the
//! decremented stock. Read transactions are snapshot-isolated, so listings
//! and the kitchen projection never observe a half-applied order.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::{DiningTable, Order, Product, Staff};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Catalog products: key = product id, value = JSON-serialized Product
const PRODUCTS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("products");

/// Dining tables: key = table number, value = JSON-serialized DiningTable
const TABLES_TABLE: TableDefinition<u32, &[u8]> = TableDefinition::new("dining_tables");

/// Orders: key = order id, value = JSON-serialized Order (line items embedded)
const ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("orders");

/// Staff accounts: key = staff id, value = JSON-serialized Staff
const STAFF_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("staff");

/// Id counters: key = counter name, value = last allocated id
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

pub const ORDER_COUNTER: &str = "order";
pub const LINE_ITEM_COUNTER: &str = "line_item";
pub const PRODUCT_COUNTER: &str = "product";
pub const STAFF_COUNTER: &str = "staff";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Floor storage backed by redb
#[derive(Clone)]
pub struct FloorStorage {
    db: Arc<Database>,
}

impl FloorStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate`: once `commit()` returns the
    /// change is on disk, and the file is always in a consistent state even
    /// across power loss.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(db)
    }

    /// Create all tables so later read transactions can open them
    fn init_tables(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PRODUCTS_TABLE)?;
            let _ = write_txn.open_table(TABLES_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(STAFF_TABLE)?;
            let _ = write_txn.open_table(COUNTERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction (exclusive)
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Id allocation ==========

    /// Allocate the next id for the named counter (within transaction)
    pub fn next_id(&self, txn: &WriteTransaction, counter: &str) -> StorageResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let current = table.get(counter)?.map(|g| g.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(counter, next)?;
        Ok(next)
    }

    // ========== Products ==========

    /// Get a product (within transaction)
    pub fn get_product_txn(
        &self,
        txn: &WriteTransaction,
        id: u64,
    ) -> StorageResult<Option<Product>> {
        let table = txn.open_table(PRODUCTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Store a product (within transaction)
    pub fn put_product_txn(&self, txn: &WriteTransaction, product: &Product) -> StorageResult<()> {
        let mut table = txn.open_table(PRODUCTS_TABLE)?;
        let value = serde_json::to_vec(product)?;
        table.insert(product.id, value.as_slice())?;
        Ok(())
    }

    /// Get a product (read-only)
    pub fn get_product(&self, id: u64) -> StorageResult<Option<Product>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All products
    pub fn list_products(&self) -> StorageResult<Vec<Product>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;

        let mut products = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            products.push(serde_json::from_slice(value.value())?);
        }
        Ok(products)
    }

    // ========== Dining tables ==========

    /// Get a dining table (within transaction)
    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        number: u32,
    ) -> StorageResult<Option<DiningTable>> {
        let table = txn.open_table(TABLES_TABLE)?;
        match table.get(number)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Store a dining table (within transaction)
    pub fn put_table_txn(
        &self,
        txn: &WriteTransaction,
        dining_table: &DiningTable,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(TABLES_TABLE)?;
        let value = serde_json::to_vec(dining_table)?;
        table.insert(dining_table.number, value.as_slice())?;
        Ok(())
    }

    /// Get a dining table (read-only)
    pub fn get_table(&self, number: u32) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLES_TABLE)?;
        match table.get(number)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All dining tables, ascending by number (redb key order)
    pub fn list_tables(&self) -> StorageResult<Vec<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLES_TABLE)?;

        let mut tables = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            tables.push(serde_json::from_slice(value.value())?);
        }
        Ok(tables)
    }

    // ========== Orders ==========

    /// Get an order (within transaction)
    pub fn get_order_txn(&self, txn: &WriteTransaction, id: u64) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Store an order (within transaction)
    pub fn put_order_txn(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id, value.as_slice())?;
        Ok(())
    }

    /// All orders (within transaction)
    pub fn list_orders_txn(&self, txn: &WriteTransaction) -> StorageResult<Vec<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    /// Get an order (read-only)
    pub fn get_order(&self, id: u64) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All orders
    pub fn list_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    /// Open orders plus a staff id -> display name map, from one read snapshot
    ///
    /// The kitchen projection is built from this; a single read transaction
    /// guarantees the two views are mutually consistent.
    pub fn open_orders_with_staff(
        &self,
    ) -> StorageResult<(Vec<Order>, HashMap<u64, String>)> {
        let read_txn = self.db.begin_read()?;

        let orders_table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders: Vec<Order> = Vec::new();
        for result in orders_table.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.is_open() {
                orders.push(order);
            }
        }

        let staff_table = read_txn.open_table(STAFF_TABLE)?;
        let mut staff_names = HashMap::new();
        for result in staff_table.iter()? {
            let (key, value) = result?;
            let staff: Staff = serde_json::from_slice(value.value())?;
            staff_names.insert(key.value(), staff.display_name);
        }

        Ok((orders, staff_names))
    }

    // ========== Staff ==========

    /// Store a staff account (within transaction)
    pub fn put_staff_txn(&self, txn: &WriteTransaction, staff: &Staff) -> StorageResult<()> {
        let mut table = txn.open_table(STAFF_TABLE)?;
        let value = serde_json::to_vec(staff)?;
        table.insert(staff.id, value.as_slice())?;
        Ok(())
    }

    /// All staff accounts
    pub fn list_staff(&self) -> StorageResult<Vec<Staff>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STAFF_TABLE)?;

        let mut staff = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            staff.push(serde_json::from_slice(value.value())?);
        }
        Ok(staff)
    }

    /// Look up a staff account by username
    pub fn find_staff_by_username(&self, username: &str) -> StorageResult<Option<Staff>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STAFF_TABLE)?;

        for result in table.iter()? {
            let (_key, value) = result?;
            let staff: Staff = serde_json::from_slice(value.value())?;
            if staff.username == username {
                return Ok(Some(staff));
            }
        }
        Ok(None)
    }

    /// True when no staff accounts exist (fresh store)
    pub fn is_empty(&self) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STAFF_TABLE)?;
        Ok(table.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{LineItemStatus, OrderStatus, Role, TableStatus};

    fn test_product(id: u64, stock: i32) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: None,
            category: "Plato".into(),
            price: Decimal::new(2500, 2),
            cost: Decimal::new(1000, 2),
            stock,
            min_stock: 5,
            unit: "Unidad".into(),
        }
    }

    fn test_order(id: u64) -> Order {
        Order {
            id,
            table_number: 1,
            staff_id: 1,
            status: OrderStatus::Pending,
            started_at: shared::util::now_millis(),
            delivered_at: None,
            total: Decimal::new(2500, 2),
            payment_method: None,
            note: None,
            items: vec![shared::LineItem {
                id: 1,
                product_id: 1,
                product_name: "Product 1".into(),
                category: "Plato".into(),
                quantity: 1,
                unit_price: Decimal::new(2500, 2),
                note: None,
                status: LineItemStatus::Pending,
            }],
        }
    }

    #[test]
    fn counters_are_monotonic() {
        let storage = FloorStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        let a = storage.next_id(&txn, ORDER_COUNTER).unwrap();
        let b = storage.next_id(&txn, ORDER_COUNTER).unwrap();
        let other = storage.next_id(&txn, PRODUCT_COUNTER).unwrap();
        txn.commit().unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 2);
        // independent counter
        assert_eq!(other, 1);

        let txn = storage.begin_write().unwrap();
        assert_eq!(storage.next_id(&txn, ORDER_COUNTER).unwrap(), 3);
        txn.commit().unwrap();
    }

    #[test]
    fn product_round_trip() {
        let storage = FloorStorage::open_in_memory().unwrap();
        let product = test_product(1, 10);

        let txn = storage.begin_write().unwrap();
        storage.put_product_txn(&txn, &product).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_product(1).unwrap().unwrap();
        assert_eq!(loaded.name, "Product 1");
        assert_eq!(loaded.stock, 10);
        assert_eq!(loaded.price, Decimal::new(2500, 2));

        assert!(storage.get_product(99).unwrap().is_none());
    }

    #[test]
    fn uncommitted_writes_are_invisible() {
        let storage = FloorStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage.put_product_txn(&txn, &test_product(1, 10)).unwrap();
        drop(txn); // abort

        assert!(storage.get_product(1).unwrap().is_none());
    }

    #[test]
    fn order_round_trip_preserves_items() {
        let storage = FloorStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage.put_order_txn(&txn, &test_order(1)).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_order(1).unwrap().unwrap();
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].unit_price, Decimal::new(2500, 2));
        assert_eq!(loaded.status, OrderStatus::Pending);
    }

    #[test]
    fn tables_list_in_number_order() {
        let storage = FloorStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        for number in [3u32, 1, 2] {
            storage
                .put_table_txn(
                    &txn,
                    &DiningTable {
                        number,
                        capacity: 4,
                        status: TableStatus::Free,
                        staff_id: None,
                        updated_at: 0,
                    },
                )
                .unwrap();
        }
        txn.commit().unwrap();

        let numbers: Vec<u32> = storage.list_tables().unwrap().iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor.redb");

        {
            let storage = FloorStorage::open(&path).unwrap();
            let txn = storage.begin_write().unwrap();
            storage.put_product_txn(&txn, &test_product(1, 10)).unwrap();
            txn.commit().unwrap();
        }

        let storage = FloorStorage::open(&path).unwrap();
        assert_eq!(storage.get_product(1).unwrap().unwrap().stock, 10);
    }

    #[test]
    fn staff_lookup_by_username() {
        let storage = FloorStorage::open_in_memory().unwrap();
        assert!(storage.is_empty().unwrap());

        let staff = Staff {
            id: 1,
            username: "mesero1".into(),
            display_name: "Juan".into(),
            role: Role::Waiter,
            password_hash: "hash".into(),
            is_active: true,
        };
        let txn = storage.begin_write().unwrap();
        storage.put_staff_txn(&txn, &staff).unwrap();
        txn.commit().unwrap();

        assert!(!storage.is_empty().unwrap());
        assert!(storage.find_staff_by_username("mesero1").unwrap().is_some());
        assert!(storage.find_staff_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn open_orders_snapshot_excludes_settled() {
        let storage = FloorStorage::open_in_memory().unwrap();

        let mut open = test_order(1);
        open.status = OrderStatus::InPreparation;
        let mut paid = test_order(2);
        paid.status = OrderStatus::Paid;

        let staff = Staff {
            id: 1,
            username: "mesero1".into(),
            display_name: "Juan".into(),
            role: Role::Waiter,
            password_hash: "hash".into(),
            is_active: true,
        };

        let txn = storage.begin_write().unwrap();
        storage.put_order_txn(&txn, &open).unwrap();
        storage.put_order_txn(&txn, &paid).unwrap();
        storage.put_staff_txn(&txn, &staff).unwrap();
        txn.commit().unwrap();

        let (orders, staff_names) = storage.open_orders_with_staff().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, 1);
        assert_eq!(staff_names.get(&1).map(String::as_str), Some("Juan"));
    }
}
