pub mod assessment;
pub mod briefing;
pub mod chat;
pub mod job;
pub mod profile;
pub mod resume;
