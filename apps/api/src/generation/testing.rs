//! Test doubles for the content gateway.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{ContentGateway, GenerationRequest, LlmError};

/// Replies with a fixed text and records every request it receives.
pub struct ScriptedGateway {
    reply: Option<String>,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGateway {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            reply: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests()
            .pop()
            .expect("gateway was never called")
    }
}

#[async_trait]
impl ContentGateway for ScriptedGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Always fails as if the API were down.
pub struct FailingGateway;

#[async_trait]
impl ContentGateway for FailingGateway {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Option<String>, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}
