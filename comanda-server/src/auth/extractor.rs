//! JWT Extractor
//!
//! Lets protected handlers take [`CurrentUser`] as an argument; validates the
//! bearer token when the middleware has not already done so.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already extracted by the middleware
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "Request without credentials");
                return Err(AppError::unauthorized());
            }
        };

        let jwt_service = state.get_jwt_service();
        match jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::try_from(claims)
                    .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, uri = %parts.uri, "Token validation failed");
                match e {
                    crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtConfig, JwtService};
    use crate::core::Config;
    use crate::floor::{FloorService, FloorStorage};
    use shared::Role;
    use std::sync::Arc;

    fn test_state() -> ServerState {
        let jwt = JwtConfig {
            secret: "test-secret-key-that-is-long-enough!".to_string(),
            expiration_minutes: 60,
            issuer: "comanda-server".to_string(),
            audience: "comanda-clients".to_string(),
        };
        let config = Config {
            work_dir: "/tmp".into(),
            http_port: 0,
            jwt: jwt.clone(),
            environment: "development".into(),
            food_category: "Plato".into(),
            kitchen_refresh_secs: 30,
        };
        let floor = FloorService::new(FloorStorage::open_in_memory().unwrap());
        ServerState::new(
            config,
            Arc::new(floor),
            Arc::new(JwtService::with_config(jwt)),
        )
    }

    fn parts_with_header(header: Option<&str>) -> Parts {
        let mut builder = http::Request::builder().uri("/api/orders");
        if let Some(h) = header {
            builder = builder.header(http::header::AUTHORIZATION, h);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn bearer_token_is_validated_without_middleware() {
        let state = test_state();
        let token = state
            .get_jwt_service()
            .generate_token(7, "mesero1", Role::Waiter)
            .unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let user = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Waiter);
    }

    #[tokio::test]
    async fn missing_credentials_are_rejected() {
        let state = test_state();
        let mut parts = parts_with_header(None);
        assert!(
            CurrentUser::from_request_parts(&mut parts, &state)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn injected_user_takes_precedence() {
        let state = test_state();
        let mut parts = parts_with_header(None);
        parts.extensions.insert(CurrentUser {
            id: 1,
            username: "admin".into(),
            role: Role::Admin,
        });

        let user = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert!(user.is_admin());
    }
}
