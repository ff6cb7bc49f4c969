//! Profile synthesis: free-text form details → structured professional profile.

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{fill, PROFILE_SYNTHESIS_PROMPT};
use crate::identity::Identity;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::schema::{object, string, string_array};
use crate::llm_client::{ContentGateway, GenerationRequest, FLASH_MODEL};
use crate::models::profile::{ProfileSynthesis, UserDetails, UserProfile};
use crate::normalizer::normalize_as;
use crate::store::{Collection, DocumentStore};

fn response_schema() -> Value {
    object(&[
        ("headline", string()),
        ("summary", string()),
        ("keySkills", string_array()),
        ("preparationStage", string()),
        ("suggestedFocusAreas", string_array()),
    ])
}

/// Reads `users/{uid}`. `None` when the user has no profile document yet.
pub async fn read_profile(
    store: &dyn DocumentStore,
    identity: &Identity,
) -> Result<Option<UserProfile>, AppError> {
    match store.get(Collection::Users, &identity.uid).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
        None => Ok(None),
    }
}

/// Synthesizes the profile, merges it into `users/{uid}`, and returns what was written.
pub async fn synthesize_profile(
    gateway: &dyn ContentGateway,
    store: &dyn DocumentStore,
    identity: &Identity,
    details: &UserDetails,
) -> Result<UserProfile, AppError> {
    let details_json = serde_json::to_string(details)?;
    let prompt = format!(
        "{}\n\n{}",
        fill(
            PROFILE_SYNTHESIS_PROMPT,
            &[("user_details", details_json.as_str())]
        ),
        NO_FABRICATION_INSTRUCTION
    );
    let request = GenerationRequest::prompt(FLASH_MODEL, prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(0.1)
        .schema(response_schema());

    let text = gateway.generate(&request).await?;
    let synthesis: ProfileSynthesis = normalize_as(text.as_deref())?;

    let mut profile = UserProfile::completed(synthesis, details, Utc::now());
    profile.uid = Some(identity.uid.clone());

    store
        .merge(Collection::Users, &identity.uid, &serde_json::to_value(&profile)?)
        .await?;
    info!("Profile synthesized for {}", identity.uid);

    Ok(profile)
}
