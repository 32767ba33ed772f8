use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::floor::{FloorService, FloorStorage};

/// Shared server state, cloned into every handler
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | floor | Arc<FloorService> | The order-fulfillment engine |
/// | jwt_service | Arc<JwtService> | Token issuing and validation |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub floor: Arc<FloorService>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, floor: Arc<FloorService>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            floor,
            jwt_service,
        }
    }

    /// Initialize the server state
    ///
    /// 1. Ensure the work directory exists
    /// 2. Open (or create) the embedded store at `work_dir/comanda.redb`
    /// 3. Seed default staff, tables and catalog on first run
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.database_path();
        tracing::info!(path = %db_path.display(), "Opening store");
        let storage = FloorStorage::open(&db_path)?;

        let floor = FloorService::new(storage);
        let seeded = floor.seed_if_empty()?;
        if seeded {
            tracing::info!("Empty store detected, seeded default staff, tables and catalog");
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), Arc::new(floor), jwt_service))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
