//! Firebase Identity Toolkit backend (REST, API-key authenticated).

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Identity, IdentityProvider, Session};
use crate::errors::AppError;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    local_id: String,
    email: Option<String>,
}

impl From<TokenResponse> for Session {
    fn from(t: TokenResponse) -> Self {
        Session {
            id_token: t.id_token,
            refresh_token: t.refresh_token,
            expires_in: t.expires_in,
            uid: t.local_id,
            email: t.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolkitError {
    error: ToolkitErrorBody,
}

#[derive(Debug, Deserialize)]
struct ToolkitErrorBody {
    message: String,
}

/// A 4xx answer from the toolkit: the request was understood and refused.
#[derive(Debug)]
struct Rejection {
    status: u16,
    message: String,
}

#[derive(Clone)]
pub struct FirebaseIdentityProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FirebaseIdentityProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Identity(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Calls `v1/{operation}`. Transport failures and 5xx are errors; 4xx is a `Rejection`.
    async fn post<B, R>(&self, operation: &str, body: &B) -> Result<Result<R, Rejection>, AppError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/v1/{}", self.base_url, operation);
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("{operation}: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Identity(format!("{operation}: {e}")))?;

        if status.is_client_error() {
            let message = serde_json::from_str::<ToolkitError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Ok(Err(Rejection {
                status: status.as_u16(),
                message,
            }));
        }

        if !status.is_success() {
            return Err(AppError::Identity(format!(
                "{operation} returned {status}: {text}"
            )));
        }

        serde_json::from_str(&text)
            .map(Ok)
            .map_err(|e| AppError::Identity(format!("{operation}: invalid response: {e}")))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<Option<Identity>, AppError> {
        let lookup: Result<LookupResponse, Rejection> = self
            .post("accounts:lookup", &LookupRequest { id_token })
            .await?;

        match lookup {
            Ok(response) => Ok(response.users.into_iter().next().map(|u| Identity {
                uid: u.local_id,
                email: u.email,
            })),
            Err(rejection) => {
                debug!(
                    "Id token rejected ({}): {}",
                    rejection.status, rejection.message
                );
                Ok(None)
            }
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        match self.post::<_, TokenResponse>("accounts:signUp", &request).await? {
            Ok(tokens) => Ok(tokens.into()),
            Err(rejection) => Err(AppError::Validation(format!(
                "Sign-up rejected: {}",
                rejection.message
            ))),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        match self
            .post::<_, TokenResponse>("accounts:signInWithPassword", &request)
            .await?
        {
            Ok(tokens) => Ok(tokens.into()),
            Err(rejection) => {
                warn!("Sign-in rejected for {email}: {}", rejection.message);
                Err(AppError::Unauthorized)
            }
        }
    }
}
