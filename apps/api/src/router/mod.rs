//! Request Router — the single entry point from the HTTP surface into the handlers.
//!
//! `handle_request` gates on identity, resolves the `(method, path)` pair, decodes the
//! typed body and dispatches to exactly one handler. Failures are logged and returned
//! unchanged; there is no recovery and no retry here.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, warn};

use crate::errors::AppError;
use crate::generation::{assessment, briefing, chat, profile, resume};
use crate::identity::Identity;
use crate::llm_client::ContentGateway;
use crate::models::job::Job;
use crate::store::DocumentStore;

pub mod endpoint;
pub mod request;

pub use endpoint::{Endpoint, Method};
pub use request::{ApiRequest, ApiResponse};

pub struct Dispatcher {
    store: Arc<dyn DocumentStore>,
    gateway: Arc<dyn ContentGateway>,
    jobs: Vec<Job>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        gateway: Arc<dyn ContentGateway>,
        jobs: Vec<Job>,
    ) -> Self {
        Self {
            store,
            gateway,
            jobs,
        }
    }

    pub async fn handle_request(
        &self,
        identity: Option<&Identity>,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<ApiResponse, AppError> {
        let result = self.route(identity, path, method, body).await;
        if let Err(e) = &result {
            if e.is_client_fault() {
                warn!("{method} {path} rejected: {e}");
            } else {
                error!("{method} {path} failed: {e}");
            }
        }
        result
    }

    async fn route(
        &self,
        identity: Option<&Identity>,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<ApiResponse, AppError> {
        if identity.is_none() && !endpoint::is_public_path(path) {
            return Err(AppError::Unauthorized);
        }

        let endpoint = Endpoint::resolve(method, path)?;
        let request = ApiRequest::decode(endpoint, body)?;

        if let ApiRequest::Jobs = request {
            return Ok(ApiResponse::Jobs(self.jobs.clone()));
        }
        let identity = identity.ok_or(AppError::Unauthorized)?;
        self.dispatch(identity, request).await
    }

    async fn dispatch(
        &self,
        identity: &Identity,
        request: ApiRequest,
    ) -> Result<ApiResponse, AppError> {
        let store = self.store.as_ref();
        let gateway = self.gateway.as_ref();

        Ok(match request {
            ApiRequest::Jobs => ApiResponse::Jobs(self.jobs.clone()),
            ApiRequest::Profile => ApiResponse::Profile(profile::read_profile(store, identity).await?),
            ApiRequest::DashboardBriefing => {
                ApiResponse::Briefing(briefing::read_briefing(store, identity).await?)
            }
            ApiRequest::SynthesizeProfile(body) => ApiResponse::SynthesizedProfile(
                profile::synthesize_profile(gateway, store, identity, &body.user_details).await?,
            ),
            ApiRequest::GenerateBriefing(body) => ApiResponse::GeneratedBriefing(
                briefing::generate_briefing(gateway, store, identity, &body.profile).await?,
            ),
            ApiRequest::Chat(body) => {
                ApiResponse::Chat(chat::chat_turn(gateway, &body.history, &body.message).await?)
            }
            ApiRequest::AnalyzeResume(body) => ApiResponse::ResumeAnalysis(
                resume::analyze_resume(gateway, &body.resume_text, &body.job_description).await?,
            ),
            ApiRequest::GenerateResume(body) => ApiResponse::GeneratedResume(
                resume::generate_resume(gateway, &body.user_details, &body.template_type).await?,
            ),
            ApiRequest::GenerateAssessment(body) => ApiResponse::Assessment(
                assessment::generate_assessment(
                    gateway,
                    &body.topic,
                    &body.difficulty,
                    body.question_count,
                )
                .await?,
            ),
        })
    }
}
