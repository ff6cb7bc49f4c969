use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub match_score: u8,
    pub link: String,
    pub source: String,
}

impl Job {
    fn listing(
        id: &str,
        title: &str,
        company: &str,
        location: &str,
        salary: &str,
        match_score: u8,
        link: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            salary: salary.to_string(),
            match_score,
            link: link.to_string(),
            source: company.split_whitespace().next().unwrap_or(company).to_string(),
        }
    }
}

/// The public job board. Served as-is to anyone, signed in or not.
pub fn static_jobs() -> Vec<Job> {
    vec![
        Job::listing(
            "1",
            "Junior Frontend Developer",
            "Google Cloud",
            "Bangalore",
            "₹12–18 LPA",
            85,
            "https://google.com/careers",
        ),
        Job::listing(
            "2",
            "SDE Intern",
            "Microsoft",
            "Hyderabad",
            "₹80,000/mo",
            72,
            "https://careers.microsoft.com",
        ),
        Job::listing(
            "3",
            "AI Research Assistant",
            "Meta",
            "Remote",
            "₹24 LPA",
            91,
            "https://meta.com/careers",
        ),
    ]
}
