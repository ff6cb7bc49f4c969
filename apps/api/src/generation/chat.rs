//! Career assistant chat. Stateless on the server: the client sends its history each turn.

use tracing::debug;

use crate::errors::AppError;
use crate::generation::prompts::CHAT_SYSTEM;
use crate::llm_client::{ContentGateway, GenerationRequest, Role, Turn, FLASH_MODEL};
use crate::models::chat::{ChatMessage, ChatReply};

/// Builds the turn list sent to the model.
///
/// Blank turns are dropped, the list never opens with a model turn, and
/// consecutive turns by the same author are joined. The new user message is
/// appended last, folded into a trailing user turn if there is one.
pub fn reshape_history(history: &[ChatMessage], message: &str) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::with_capacity(history.len() + 1);

    let incoming = history
        .iter()
        .filter(|m| !m.text.trim().is_empty())
        .skip_while(|m| m.role == Role::Model)
        .map(|m| (m.role, m.text.as_str()))
        .chain(std::iter::once((Role::User, message)));

    for (role, text) in incoming {
        match turns.last_mut() {
            Some(last) if last.role == role => {
                last.text.push_str("\n\n");
                last.text.push_str(text);
            }
            _ => turns.push(Turn {
                role,
                text: text.to_string(),
            }),
        }
    }

    turns
}

pub async fn chat_turn(
    gateway: &dyn ContentGateway,
    history: &[ChatMessage],
    message: &str,
) -> Result<ChatReply, AppError> {
    let turns = reshape_history(history, message);
    debug!("Chat turn with {} reshaped turns", turns.len());

    let request = GenerationRequest::conversation(FLASH_MODEL, turns)
        .system(CHAT_SYSTEM)
        .temperature(0.7);

    match gateway.generate(&request).await? {
        Some(text) if !text.trim().is_empty() => Ok(ChatReply { text }),
        _ => Err(AppError::EmptyResponse),
    }
}
