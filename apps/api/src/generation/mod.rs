// Generation handlers: one module per AI-backed endpoint.
// Each builds an instruction plus a schema hint, calls the ContentGateway, and runs the
// raw text through the normalizer. All gateway calls go through llm_client.

pub mod assessment;
pub mod briefing;
pub mod chat;
pub mod profile;
pub mod prompts;
pub mod resume;

#[cfg(test)]
pub(crate) mod testing;
