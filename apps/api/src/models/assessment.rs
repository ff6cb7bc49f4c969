use serde::{Deserialize, Serialize};

/// Every generated question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == OPTION_COUNT
            && self.correct_index < OPTION_COUNT
    }
}

/// A question as the model wrote it, before any checks. Every field is optional
/// and the index is signed so one bad element cannot fail the whole batch.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawQuestion {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_index: Option<i64>,
    pub explanation: Option<String>,
}

impl RawQuestion {
    /// `None` unless the result would be well formed.
    pub fn into_question(self) -> Option<Question> {
        let question = Question {
            question: self.question?,
            options: self.options?,
            correct_index: usize::try_from(self.correct_index?).ok()?,
            explanation: self.explanation.unwrap_or_default(),
        };
        question.is_well_formed().then_some(question)
    }
}

/// A quiz generated for one session. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub topic: String,
    pub difficulty: String,
    pub questions: Vec<Question>,
}
