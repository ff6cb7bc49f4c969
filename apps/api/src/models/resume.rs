use serde::{Deserialize, Serialize};

/// Resume-to-job match report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeAnalysis {
    /// 0 – 100
    pub match_score: f64,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeHeader {
    pub name: String,
    pub title: String,
    pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub achievements: Vec<String>,
}

/// A recruiter-ready resume synthesized from the user's details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedResume {
    pub header: ResumeHeader,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<String>,
}
