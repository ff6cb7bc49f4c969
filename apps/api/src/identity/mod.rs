//! Identity — who is calling, passed explicitly into every router call.
//!
//! Tokens are verified by an `IdentityProvider`; the HTTP extractor turns a missing or
//! rejected token into "no identity" and leaves the authorization decision to the router.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub mod firebase;
pub mod handlers;

#[cfg(test)]
pub(crate) mod testing;

pub use firebase::FirebaseIdentityProvider;

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
}

/// Result of a successful sign-up or sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id_token: String,
    pub refresh_token: String,
    /// Token lifetime in seconds, as reported by the provider.
    pub expires_in: String,
    pub uid: String,
    pub email: Option<String>,
}

impl Session {
    pub fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            email: self.email.clone(),
        }
    }
}

/// Backend that issues and verifies id tokens.
/// Carried in `AppState` as `Arc<dyn IdentityProvider>`.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the token is invalid, expired or unknown.
    async fn verify(&self, id_token: &str) -> Result<Option<Identity>, AppError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AppError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;
}

/// Axum extractor for the optional caller identity. Never rejects: a token that
/// cannot be verified, for any reason, yields no identity.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Infallible> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => match state.identity.verify(token).await {
                Ok(identity) => Ok(MaybeIdentity(identity)),
                Err(e) => {
                    warn!("Token verification unavailable; continuing without identity: {e}");
                    Ok(MaybeIdentity(None))
                }
            },
            None => Ok(MaybeIdentity(None)),
        }
    }
}
