//! Dashboard briefing: generated from the profile, cached per user, overwritten on regenerate.

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{fill, BRIEFING_PROMPT};
use crate::identity::Identity;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::schema::{object, string, string_array};
use crate::llm_client::{ContentGateway, GenerationRequest, FLASH_MODEL};
use crate::models::briefing::Briefing;
use crate::normalizer::normalize_as;
use crate::store::{Collection, DocumentStore};

fn response_schema() -> Value {
    object(&[
        ("welcomeMessage", string()),
        ("strengths", string_array()),
        ("focusAreas", string_array()),
        ("nextSteps", string_array()),
        ("sessionSummary", string()),
    ])
}

/// Reads the cached briefing. `None` until one has been generated.
pub async fn read_briefing(
    store: &dyn DocumentStore,
    identity: &Identity,
) -> Result<Option<Briefing>, AppError> {
    match store.get(Collection::Briefings, &identity.uid).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
        None => Ok(None),
    }
}

/// Generates a fresh briefing and replaces `briefings/{uid}` with it.
pub async fn generate_briefing(
    gateway: &dyn ContentGateway,
    store: &dyn DocumentStore,
    identity: &Identity,
    profile: &Value,
) -> Result<Briefing, AppError> {
    let profile_json = serde_json::to_string(profile)?;
    let prompt = fill(BRIEFING_PROMPT, &[("profile", profile_json.as_str())]);
    let request = GenerationRequest::prompt(FLASH_MODEL, prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(0.1)
        .schema(response_schema());

    let text = gateway.generate(&request).await?;
    let briefing: Briefing = normalize_as(text.as_deref())?;

    store
        .set(
            Collection::Briefings,
            &identity.uid,
            &serde_json::to_value(&briefing)?,
        )
        .await?;
    info!("Briefing regenerated for {}", identity.uid);

    Ok(briefing)
}
