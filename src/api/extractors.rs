//! Request extractors

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::models::User;
use crate::services::auth::TokenClaims;
use crate::state::AppState;
use crate::{Error, Result};

/// The user identified by the request's bearer token.
///
/// The lookup goes through the session resolver, so inside an open
/// transaction scope it observes the scope's session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub claims: TokenClaims,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::Unauthorized("missing bearer token".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("invalid authorization header".to_string()))?;

        let claims = state.auth.verify_token(token)?;

        let user = match state.users.find_by_uuid(&claims.sub).await {
            Ok(user) => user,
            Err(Error::NotFound(_)) => {
                return Err(Error::Unauthorized("user no longer exists".to_string()));
            }
            Err(e) => return Err(e),
        };

        Ok(Self { user, claims })
    }
}
