//! DTOs for the chat completions wire format.
//!
//! Only the fields the adapter sends or reads are modelled; unknown response
//! fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: [ChatMessageDto<'a>; 1],
    pub(super) max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

impl<'a> ChatCompletionRequestDto<'a> {
    pub(super) fn user_prompt(model: &'a str, prompt: &'a str, max_tokens: u32) -> Self {
        Self {
            model,
            messages: [ChatMessageDto {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceDto {
    pub(super) message: Option<ResponseMessageDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseMessageDto {
    pub(super) content: Option<String>,
}

impl ChatCompletionResponseDto {
    /// Text of the first choice, if it carries any non-blank content.
    pub(super) fn into_first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}
