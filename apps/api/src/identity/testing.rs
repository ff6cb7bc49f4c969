//! In-process identity provider for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::identity::{Identity, IdentityProvider, Session};

/// Accepts a fixed set of tokens. Sign-up always succeeds with a derived uid;
/// sign-in succeeds only for `correct-password`.
#[derive(Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, Identity>,
}

impl StaticIdentityProvider {
    pub fn with_token(mut self, token: &str, uid: &str) -> Self {
        self.tokens.insert(
            token.to_string(),
            Identity {
                uid: uid.to_string(),
                email: Some(format!("{uid}@example.com")),
            },
        );
        self
    }
}

fn session(uid: String, email: &str) -> Session {
    Session {
        id_token: format!("token-for-{uid}"),
        refresh_token: "refresh".to_string(),
        expires_in: "3600".to_string(),
        uid,
        email: Some(email.to_string()),
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<Option<Identity>, AppError> {
        Ok(self.tokens.get(id_token).cloned())
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<Session, AppError> {
        let uid = format!("uid-{}", email.split('@').next().unwrap_or(email));
        Ok(session(uid, email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        if password != "correct-password" {
            return Err(AppError::Unauthorized);
        }
        let uid = format!("uid-{}", email.split('@').next().unwrap_or(email));
        Ok(session(uid, email))
    }
}

/// Fails every call as if the provider were down.
pub struct UnreachableIdentityProvider;

#[async_trait]
impl IdentityProvider for UnreachableIdentityProvider {
    async fn verify(&self, _id_token: &str) -> Result<Option<Identity>, AppError> {
        Err(AppError::Identity("accounts:lookup returned 503".to_string()))
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Session, AppError> {
        Err(AppError::Identity("accounts:signUp returned 503".to_string()))
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, AppError> {
        Err(AppError::Identity("accounts:signInWithPassword returned 503".to_string()))
    }
}
