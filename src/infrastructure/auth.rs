//! Static bearer-token authentication.
//!
//! Handlers declare the scope they need by taking [`ClientAccess`] or
//! [`AdminAccess`] as an extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::DomainError;
use crate::infrastructure::AppState;

/// Request carries a client-scope token
#[derive(Debug, Clone, Copy)]
pub struct ClientAccess;

/// Request carries an admin-scope token
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

#[async_trait]
impl FromRequestParts<AppState> for ClientAccess {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        check(parts, &state.auth().client_tokens, "Invalid client token")?;
        Ok(ClientAccess)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        check(parts, &state.auth().admin_tokens, "Admin privileges required")?;
        Ok(AdminAccess)
    }
}

fn check(parts: &Parts, accepted: &[SecretString], denied: &str) -> Result<(), DomainError> {
    let token = bearer_token(parts).map_err(|e| {
        tracing::warn!("{} {}: {}", parts.method, parts.uri.path(), e);
        e
    })?;
    authorize(token, accepted, denied)
}

/// Token part of `Authorization: Bearer <token>`
pub fn bearer_token(parts: &Parts) -> Result<&str, DomainError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| DomainError::Unauthenticated("Missing Authorization header".to_string()))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        DomainError::Unauthenticated("Invalid Authorization header format".to_string())
    })
}

/// Byte-for-byte comparison against every configured secret of the scope
pub fn authorize(token: &str, accepted: &[SecretString], denied: &str) -> Result<(), DomainError> {
    if accepted
        .iter()
        .any(|secret| secret.expose_secret().as_bytes() == token.as_bytes())
    {
        return Ok(());
    }

    tracing::warn!("Rejected bearer token: {}", denied);
    Err(DomainError::PermissionDenied(denied.to_string()))
}
