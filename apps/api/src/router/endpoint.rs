use std::fmt;

use crate::errors::AppError;

/// The two request methods the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// `None` for anything other than GET and POST.
    pub fn from_http(method: &axum::http::Method) -> Option<Self> {
        match *method {
            axum::http::Method::GET => Some(Method::Get),
            axum::http::Method::POST => Some(Method::Post),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const JOBS_PATH: &str = "/jobs";

/// Every `(method, path)` pair the router dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Jobs,
    Profile,
    DashboardBriefing,
    SynthesizeProfile,
    GenerateBriefing,
    Chat,
    AnalyzeResume,
    GenerateResume,
    GenerateAssessment,
}

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::Jobs,
        Endpoint::Profile,
        Endpoint::DashboardBriefing,
        Endpoint::SynthesizeProfile,
        Endpoint::GenerateBriefing,
        Endpoint::Chat,
        Endpoint::AnalyzeResume,
        Endpoint::GenerateResume,
        Endpoint::GenerateAssessment,
    ];

    pub fn resolve(method: Method, path: &str) -> Result<Self, AppError> {
        Self::ALL
            .into_iter()
            .find(|e| e.method() == method && e.path() == path)
            .ok_or_else(|| AppError::InvalidEndpoint {
                method: method.as_str().to_string(),
                endpoint: path.to_string(),
            })
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Jobs => JOBS_PATH,
            Endpoint::Profile => "/profile",
            Endpoint::DashboardBriefing => "/dashboard-briefing",
            Endpoint::SynthesizeProfile => "/synthesize-profile",
            Endpoint::GenerateBriefing => "/generate-briefing",
            Endpoint::Chat => "/chat",
            Endpoint::AnalyzeResume => "/analyze-resume",
            Endpoint::GenerateResume => "/generate-resume",
            Endpoint::GenerateAssessment => "/generate-assessment",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Jobs | Endpoint::Profile | Endpoint::DashboardBriefing => Method::Get,
            _ => Method::Post,
        }
    }
}

/// Paths reachable without an identity. Checked on the raw path, before resolution.
pub fn is_public_path(path: &str) -> bool {
    path == JOBS_PATH
}
