use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::identity::Identity;

/// Free-text details submitted from the profile editor.
/// Form fields beyond the known ones are kept in `extra` and stored with the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDetails {
    pub name: String,
    pub branch: String,
    pub college: String,
    /// Forms send this as either `"2026"` or `2026`.
    #[serde(deserialize_with = "string_or_number")]
    pub graduation_year: String,
    pub skills: String,
    pub projects: String,
    pub career_goal: String,
    pub prep_level: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// Fields of `users/{uid}` the server owns. Submitted extras never overwrite them.
const PROFILE_FIELDS: &[&str] = &[
    "uid",
    "email",
    "name",
    "branch",
    "college",
    "graduationYear",
    "skills",
    "projects",
    "careerGoal",
    "prepLevel",
    "headline",
    "summary",
    "keySkills",
    "preparationStage",
    "suggestedFocusAreas",
    "profileCompleted",
    "createdAt",
    "updatedAt",
];

/// Fields produced by profile synthesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSynthesis {
    pub headline: String,
    pub summary: String,
    pub key_skills: Vec<String>,
    pub preparation_stage: String,
    pub suggested_focus_areas: Vec<String>,
}

/// The `users/{uid}` document.
///
/// Schema-on-read: every field is optional and unknown fields survive a round trip
/// through `extra`. Absent fields are not serialized, so a merge never blanks them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_focus_areas: Option<Vec<String>>,
    /// Gates every feature except the job board (enforced by the client).
    #[serde(default)]
    pub profile_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// The document written at signup, before the user has filled anything in.
    pub fn skeleton(identity: &Identity, now: DateTime<Utc>) -> Self {
        Self {
            uid: Some(identity.uid.clone()),
            email: identity.email.clone(),
            profile_completed: false,
            created_at: Some(now),
            ..Default::default()
        }
    }

    /// Synthesized fields overlaid by the submitted details, marked complete.
    pub fn completed(
        synthesis: ProfileSynthesis,
        details: &UserDetails,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: Some(details.name.clone()),
            branch: Some(details.branch.clone()),
            college: Some(details.college.clone()),
            graduation_year: Some(details.graduation_year.clone()),
            skills: Some(details.skills.clone()),
            projects: Some(details.projects.clone()),
            career_goal: Some(details.career_goal.clone()),
            prep_level: Some(details.prep_level.clone()),
            headline: Some(synthesis.headline),
            summary: Some(synthesis.summary),
            key_skills: Some(synthesis.key_skills),
            preparation_stage: Some(synthesis.preparation_stage),
            suggested_focus_areas: Some(synthesis.suggested_focus_areas),
            profile_completed: true,
            updated_at: Some(now),
            extra: details
                .extra
                .iter()
                .filter(|(key, _)| !PROFILE_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            ..Default::default()
        }
    }
}
