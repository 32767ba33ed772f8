//! Authentication and authorization
//!
//! JWT tokens (HS256) carry the staff id, username and role. Route access is
//! gated by [`middleware::require_auth`] plus per-resource
//! [`middleware::require_role`] layers.

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
pub use password::{hash_password, verify_password};
