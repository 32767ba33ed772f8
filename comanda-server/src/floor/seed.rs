//! First-run seeding
//!
//! A fresh store gets default staff accounts, a 20-table floor plan and a
//! small starting catalog so the server is usable immediately after install.

use rust_decimal::Decimal;
use shared::{DiningTable, Product, Role, Staff, TableStatus};

use crate::auth::password::hash_password;
use crate::floor::storage::{FloorStorage, PRODUCT_COUNTER, STAFF_COUNTER};
use crate::floor::{FloorError, FloorResult};

/// Default password for seeded accounts. Change after first login.
const DEFAULT_PASSWORD: &str = "123456";

const DEFAULT_STAFF: &[(&str, &str, Role)] = &[
    ("admin", "Administrador", Role::Admin),
    ("mesero1", "Juan Pérez", Role::Waiter),
    ("mesero2", "María García", Role::Waiter),
    ("cocinero1", "Carlos López", Role::Cook),
];

const TABLE_COUNT: u32 = 20;
const TABLE_CAPACITY: i32 = 4;

struct SeedProduct {
    name: &'static str,
    category: &'static str,
    price: Decimal,
    cost: Decimal,
    stock: i32,
    min_stock: i32,
    unit: &'static str,
}

fn default_products() -> Vec<SeedProduct> {
    vec![
        SeedProduct {
            name: "Lomo Saltado",
            category: "Plato",
            price: Decimal::new(2500, 2),
            cost: Decimal::new(1200, 2),
            stock: 30,
            min_stock: 10,
            unit: "Plato",
        },
        SeedProduct {
            name: "Ají de Gallina",
            category: "Plato",
            price: Decimal::new(2200, 2),
            cost: Decimal::new(1000, 2),
            stock: 25,
            min_stock: 10,
            unit: "Plato",
        },
        SeedProduct {
            name: "Ceviche",
            category: "Plato",
            price: Decimal::new(2800, 2),
            cost: Decimal::new(1500, 2),
            stock: 20,
            min_stock: 8,
            unit: "Plato",
        },
        SeedProduct {
            name: "Chicha Morada",
            category: "Bebida",
            price: Decimal::new(800, 2),
            cost: Decimal::new(300, 2),
            stock: 50,
            min_stock: 15,
            unit: "Vaso",
        },
        SeedProduct {
            name: "Cerveza",
            category: "Bebida",
            price: Decimal::new(1200, 2),
            cost: Decimal::new(600, 2),
            stock: 60,
            min_stock: 20,
            unit: "Botella",
        },
    ]
}

/// Write the full seed set in one transaction
pub fn seed(storage: &FloorStorage) -> FloorResult<()> {
    let now = shared::util::now_millis();
    let txn = storage.begin_write()?;

    for (username, display_name, role) in DEFAULT_STAFF {
        let id = storage.next_id(&txn, STAFF_COUNTER)?;
        let password_hash =
            hash_password(DEFAULT_PASSWORD).map_err(|e| FloorError::Seed(e.to_string()))?;
        storage.put_staff_txn(
            &txn,
            &Staff {
                id,
                username: (*username).to_string(),
                display_name: (*display_name).to_string(),
                role: *role,
                password_hash,
                is_active: true,
            },
        )?;
    }

    for number in 1..=TABLE_COUNT {
        storage.put_table_txn(
            &txn,
            &DiningTable {
                number,
                capacity: TABLE_CAPACITY,
                status: TableStatus::Free,
                staff_id: None,
                updated_at: now,
            },
        )?;
    }

    for seed in default_products() {
        let id = storage.next_id(&txn, PRODUCT_COUNTER)?;
        storage.put_product_txn(
            &txn,
            &Product {
                id,
                name: seed.name.to_string(),
                description: None,
                category: seed.category.to_string(),
                price: seed.price,
                cost: seed.cost,
                stock: seed.stock,
                min_stock: seed.min_stock,
                unit: seed.unit.to_string(),
            },
        )?;
    }

    txn.commit().map_err(crate::floor::storage::StorageError::from)?;
    Ok(())
}
