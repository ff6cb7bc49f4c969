//! Topic assessments: a batch of multiple-choice questions, generated per session.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{fill, ASSESSMENT_PROMPT};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::schema::{array, integer, object, string, string_array};
use crate::llm_client::{ContentGateway, GenerationRequest, FLASH_MODEL};
use crate::models::assessment::{Assessment, Question, RawQuestion};
use crate::normalizer::normalize_as;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const MAX_QUESTION_COUNT: usize = 20;

fn response_schema() -> Value {
    array(object(&[
        ("question", string()),
        ("options", string_array()),
        ("correctIndex", integer()),
        ("explanation", string()),
    ]))
}

pub async fn generate_assessment(
    gateway: &dyn ContentGateway,
    topic: &str,
    difficulty: &str,
    count: Option<usize>,
) -> Result<Assessment, AppError> {
    let count = count
        .unwrap_or(DEFAULT_QUESTION_COUNT)
        .clamp(1, MAX_QUESTION_COUNT);
    let count_text = count.to_string();
    let prompt = fill(
        ASSESSMENT_PROMPT,
        &[
            ("count", count_text.as_str()),
            ("topic", topic),
            ("difficulty", difficulty),
        ],
    );
    let request = GenerationRequest::prompt(FLASH_MODEL, prompt)
        .system(JSON_ONLY_SYSTEM)
        .temperature(0.4)
        .schema(response_schema());

    let text = gateway.generate(&request).await?;
    // Elements are checked one by one; only the outer array must parse.
    let generated: Vec<Value> = normalize_as(text.as_deref())?;
    let total = generated.len();

    let questions: Vec<Question> = generated
        .into_iter()
        .filter_map(|element| serde_json::from_value::<RawQuestion>(element).ok())
        .filter_map(RawQuestion::into_question)
        .collect();
    if questions.len() < total {
        warn!(
            "Dropped {} malformed assessment questions for {topic}",
            total - questions.len()
        );
    }
    if questions.is_empty() {
        return Err(AppError::MalformedJson {
            raw: text.unwrap_or_default(),
            reason: "no well-formed questions".to_string(),
        });
    }

    info!("Generated {} {difficulty} questions on {topic}", questions.len());
    Ok(Assessment {
        topic: topic.to_string(),
        difficulty: difficulty.to_string(),
        questions,
    })
}
