use crate::{Error, Result};
use async_trait::async_trait;
use derive_builder::Builder;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    #[default]
    User,
    Assistant,
    #[serde(other)]
    Unknown,
}

/// A message sent as part of a [`ChatCompletionRequest`], tagged by its role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatCompletionMessage {
    System(ChatCompletionMessageBody),
    User(ChatCompletionMessageBody),
    Assistant(ChatCompletionMessageBody),
}

impl ChatCompletionMessage {
    pub fn role(&self) -> Role {
        match self {
            ChatCompletionMessage::System(_) => Role::System,
            ChatCompletionMessage::User(_) => Role::User,
            ChatCompletionMessage::Assistant(_) => Role::Assistant,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ChatCompletionMessage::System(body)
            | ChatCompletionMessage::User(body)
            | ChatCompletionMessage::Assistant(body) => &body.content,
        }
    }
}

impl TryFrom<(&str, &str)> for ChatCompletionMessage {
    type Error = Error;

    fn try_from((role, content): (&str, &str)) -> Result<Self> {
        match role {
            "system" => Ok(ChatCompletionMessage::System(content.into())),
            "user" => Ok(ChatCompletionMessage::User(content.into())),
            "assistant" => Ok(ChatCompletionMessage::Assistant(content.into())),
            _ => Err(Error::InvalidRole(role.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionMessageBody {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl<S: Into<String>> From<S> for ChatCompletionMessageBody {
    fn from(content: S) -> Self {
        ChatCompletionMessageBody {
            content: content.into(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(pattern = "mutable")]
#[builder(setter(into, strip_option))]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[builder(default = "None")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[builder(default = "None")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u64>,
    #[builder(default = "None")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[builder(default = "None")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

impl ChatCompletionRequestBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        match &self.messages {
            Some(messages) if messages.is_empty() => {
                Err("messages must contain at least one message".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// The message of the first choice, which is the reply when `n` is unset.
    pub fn first_message(&self) -> Result<&ChatCompletionResponseMessage> {
        self.choices
            .first()
            .map(|choice| &choice.message)
            .ok_or(Error::NoChoices)
    }

    pub fn created_at(&self) -> Result<OffsetDateTime> {
        i64::try_from(self.created)
            .ok()
            .and_then(|created| OffsetDateTime::from_unix_timestamp(created).ok())
            .ok_or(Error::InvalidTimestamp(self.created))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponseMessage {
    pub role: Role,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

impl ChatCompletionResponseMessage {
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    pub index: u32,
    pub message: ChatCompletionResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait ChatCompletion: DynClone + Send + Sync {
    async fn chat_completions(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

dyn_clone::clone_trait_object!(ChatCompletion);
