//! Resume analysis against a job description, and full resume generation.

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{fill, RESUME_ANALYSIS_PROMPT, RESUME_GENERATION_PROMPT};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::schema::{array, number, object, string, string_array};
use crate::llm_client::{ContentGateway, GenerationRequest, FLASH_MODEL, PRO_MODEL};
use crate::models::resume::{GeneratedResume, ResumeAnalysis};
use crate::normalizer::normalize_as;

/// Thinking budget for resume generation, the one call made on the larger model.
const GENERATION_THINKING_BUDGET: u32 = 1024;

fn analysis_schema() -> Value {
    object(&[
        ("matchScore", number()),
        ("strengths", string_array()),
        ("risks", string_array()),
        ("matchedSkills", string_array()),
        ("missingSkills", string_array()),
        ("improvementSuggestions", string_array()),
    ])
}

fn generated_resume_schema() -> Value {
    object(&[
        (
            "header",
            object(&[
                ("name", string()),
                ("title", string()),
                ("contact", string()),
            ]),
        ),
        ("summary", string()),
        ("skills", string_array()),
        (
            "experience",
            array(object(&[
                ("role", string()),
                ("company", string()),
                ("duration", string()),
                ("achievements", string_array()),
            ])),
        ),
        ("education", string_array()),
    ])
}

pub async fn analyze_resume(
    gateway: &dyn ContentGateway,
    resume_text: &str,
    job_description: &str,
) -> Result<ResumeAnalysis, AppError> {
    let prompt = fill(
        RESUME_ANALYSIS_PROMPT,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
        ],
    );
    let request = GenerationRequest::prompt(FLASH_MODEL, prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(0.0)
        .schema(analysis_schema());

    let text = gateway.generate(&request).await?;
    let mut analysis: ResumeAnalysis = normalize_as(text.as_deref())?;
    analysis.match_score = analysis.match_score.clamp(0.0, 100.0);

    info!("Resume analysis complete (match score {:.0})", analysis.match_score);
    Ok(analysis)
}

pub async fn generate_resume(
    gateway: &dyn ContentGateway,
    user_details: &Value,
    template_type: &str,
) -> Result<GeneratedResume, AppError> {
    let details_json = serde_json::to_string(user_details)?;
    let prompt = format!(
        "{}\n\n{}",
        fill(
            RESUME_GENERATION_PROMPT,
            &[
                ("user_details", details_json.as_str()),
                ("template_type", template_type),
            ],
        ),
        NO_FABRICATION_INSTRUCTION
    );
    let request = GenerationRequest::prompt(PRO_MODEL, prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(0.1)
        .schema(generated_resume_schema())
        .thinking_budget(GENERATION_THINKING_BUDGET);

    let text = gateway.generate(&request).await?;
    let resume: GeneratedResume = normalize_as(text.as_deref())?;

    info!(
        "Resume generated ({} experience entries, template {template_type})",
        resume.experience.len()
    );
    Ok(resume)
}
