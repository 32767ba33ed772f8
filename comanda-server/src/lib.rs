//! Comanda Server - dining-floor order-fulfillment engine
//!
//! # Architecture
//!
//! - **Floor engine** (`floor`): orders, tables and stock behind one embedded
//!   redb store; every order-side effect commits in a single write transaction
//! - **Kitchen view** (`kitchen`): pure projection of pending work for the
//!   kitchen display, rebuilt from a consistent read snapshot
//! - **Auth** (`auth`): JWT + Argon2, role-gated routes
//! - **HTTP API** (`api`): RESTful surface over axum
//!
//! # Module layout
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT service, extractor, middleware, passwords
//! ├── floor/         # storage, service, seeding (the engine)
//! ├── kitchen/       # pending-work projection
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # error envelope, logger
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod floor;
pub mod kitchen;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use floor::{FloorError, FloorService, FloorStorage};
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::init_logger;

/// Prepare the process environment: dotenv, then logging.
///
/// Must run before [`Config::from_env`] so `.env` values are visible.
pub fn setup_environment() -> anyhow::Result<()> {
    // Missing .env is fine, env vars may come from the shell
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______                                __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
