//! Typed request and response variants, one per endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::assessment::Assessment;
use crate::models::briefing::Briefing;
use crate::models::chat::{ChatMessage, ChatReply};
use crate::models::job::Job;
use crate::models::profile::{UserDetails, UserProfile};
use crate::models::resume::{GeneratedResume, ResumeAnalysis};
use crate::router::endpoint::Endpoint;

/// A request body that can reject itself after deserializing.
trait RequestBody: DeserializeOwned {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeProfileBody {
    pub user_details: UserDetails,
}

impl RequestBody for SynthesizeProfileBody {}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateBriefingBody {
    pub profile: Value,
}

impl RequestBody for GenerateBriefingBody {
    fn validate(&self) -> Result<(), AppError> {
        if !self.profile.is_object() {
            return Err(AppError::Validation("profile must be an object".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatBody {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

impl RequestBody for ChatBody {
    fn validate(&self) -> Result<(), AppError> {
        require("message", &self.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeBody {
    pub resume_text: String,
    pub job_description: String,
}

impl RequestBody for AnalyzeResumeBody {
    fn validate(&self) -> Result<(), AppError> {
        require("resumeText", &self.resume_text)?;
        require("jobDescription", &self.job_description)
    }
}

fn default_template() -> String {
    "modern".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeBody {
    pub user_details: Value,
    #[serde(default = "default_template")]
    pub template_type: String,
}

impl RequestBody for GenerateResumeBody {}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAssessmentBody {
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    pub question_count: Option<usize>,
}

impl RequestBody for GenerateAssessmentBody {
    fn validate(&self) -> Result<(), AppError> {
        require("topic", &self.topic)
    }
}

/// Closed set of router inputs.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    Jobs,
    Profile,
    DashboardBriefing,
    SynthesizeProfile(SynthesizeProfileBody),
    GenerateBriefing(GenerateBriefingBody),
    Chat(ChatBody),
    AnalyzeResume(AnalyzeResumeBody),
    GenerateResume(GenerateResumeBody),
    GenerateAssessment(GenerateAssessmentBody),
}

impl ApiRequest {
    /// Pairs a resolved endpoint with its body. GET endpoints ignore any body.
    pub fn decode(endpoint: Endpoint, body: Option<Value>) -> Result<Self, AppError> {
        Ok(match endpoint {
            Endpoint::Jobs => ApiRequest::Jobs,
            Endpoint::Profile => ApiRequest::Profile,
            Endpoint::DashboardBriefing => ApiRequest::DashboardBriefing,
            Endpoint::SynthesizeProfile => ApiRequest::SynthesizeProfile(parse(endpoint, body)?),
            Endpoint::GenerateBriefing => ApiRequest::GenerateBriefing(parse(endpoint, body)?),
            Endpoint::Chat => ApiRequest::Chat(parse(endpoint, body)?),
            Endpoint::AnalyzeResume => ApiRequest::AnalyzeResume(parse(endpoint, body)?),
            Endpoint::GenerateResume => ApiRequest::GenerateResume(parse(endpoint, body)?),
            Endpoint::GenerateAssessment => {
                ApiRequest::GenerateAssessment(parse(endpoint, body)?)
            }
        })
    }
}

fn parse<B: RequestBody>(endpoint: Endpoint, body: Option<Value>) -> Result<B, AppError> {
    let body = body.ok_or_else(|| {
        AppError::Validation(format!("{} requires a JSON body", endpoint.path()))
    })?;
    let parsed: B = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("invalid body for {}: {e}", endpoint.path())))?;
    parsed.validate()?;
    Ok(parsed)
}

/// Closed set of router outputs. Serialized without a tag, so each endpoint's
/// response is just its own shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Jobs(Vec<Job>),
    /// `null` until the user has a profile document.
    Profile(Option<UserProfile>),
    /// `null` until a briefing has been generated.
    Briefing(Option<Briefing>),
    SynthesizedProfile(UserProfile),
    GeneratedBriefing(Briefing),
    Chat(ChatReply),
    ResumeAnalysis(ResumeAnalysis),
    GeneratedResume(GeneratedResume),
    Assessment(Assessment),
}
