//! Axum route handlers for account sign-up and sign-in.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::identity::Session;
use crate::models::profile::UserProfile;
use crate::state::AppState;
use crate::store::Collection;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(
                "email and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// POST /auth/signup
///
/// Creates the account, then writes a skeleton profile with `profileCompleted: false`.
/// A failed skeleton write does not fail the sign-up; the user is still signed in.
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, AppError> {
    credentials.validate()?;

    let session = state
        .identity
        .sign_up(credentials.email.trim(), &credentials.password)
        .await?;
    info!("Created account {}", session.uid);

    let skeleton = serde_json::to_value(UserProfile::skeleton(&session.identity(), Utc::now()))?;
    if let Err(e) = state
        .store
        .set(Collection::Users, &session.uid, &skeleton)
        .await
    {
        warn!(
            "Initial profile write failed for {}; continuing signed in: {e}",
            session.uid
        );
    }

    Ok(Json(session))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, AppError> {
    credentials.validate()?;

    let session = state
        .identity
        .sign_in(credentials.email.trim(), &credentials.password)
        .await?;

    Ok(Json(session))
}
