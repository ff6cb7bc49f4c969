use serde::{Deserialize, Serialize};

/// The `briefings/{uid}` document shown on the dashboard. Regenerating overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Briefing {
    pub welcome_message: String,
    pub strengths: Vec<String>,
    pub focus_areas: Vec<String>,
    pub next_steps: Vec<String>,
    pub session_summary: String,
}
