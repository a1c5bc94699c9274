use localchat::chat_completions::{
    ChatCompletionMessage, ChatCompletionRequestBuilder, ChatCompletionResponseMessage,
};
use localchat::clients::Client;
use localchat::Result;

use crate::config::{OutputFormat, Settings};

/// Sends the system and user messages as one request and returns the first
/// choice's message.
pub async fn ask<T: Client + ?Sized>(
    client: &T,
    settings: &Settings,
) -> Result<ChatCompletionResponseMessage> {
    let request = ChatCompletionRequestBuilder::default()
        .model(settings.model.as_str())
        .messages(vec![
            ChatCompletionMessage::System(settings.system.as_str().into()),
            ChatCompletionMessage::User(settings.prompt.as_str().into()),
        ])
        .build()?;

    let response = client.chat_completions(&request).await?;
    match response.created_at() {
        Ok(created_at) => {
            tracing::debug!(id = ?response.id, model = %response.model, %created_at, "completion created")
        }
        Err(e) => tracing::debug!(id = ?response.id, error = %e, "server sent an unusable created timestamp"),
    }

    Ok(response.first_message()?.clone())
}

pub fn render(message: &ChatCompletionResponseMessage, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(message.text().to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(message)?),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{Args, FileConfig};
    use httpmock::prelude::*;
    use localchat::chat_completions::Role;
    use localchat::Error;
    use secrecy::ExposeSecret;
    use serde_json::json;

    fn settings(base_url: String) -> Settings {
        let args = Args {
            prompt: None,
            system: None,
            base_url: Some(base_url),
            api_key: Some("123456".into()),
            model: None,
            config: None,
            output: OutputFormat::Text,
            verbose: 0,
        };
        Settings::resolve(args, FileConfig::default())
    }

    fn client(settings: &Settings) -> localchat::clients::openai::Client {
        localchat::clients::openai::Client::from_url(
            settings.api_key.expose_secret(),
            &settings.base_url,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_ask_sends_system_and_user_messages() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .json_body(json!({
                        "model": "yi-chat-6b.Q5_K_M.gguf",
                        "messages": [
                            {"role": "system", "content": "You are a helpful assistant."},
                            {"role": "user", "content": "Hello!"}
                        ]
                    }));
                then.status(200).json_body(json!({
                    "id": "chatcmpl-7",
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "yi-chat-6b.Q5_K_M.gguf",
                    "choices": [
                        {"index": 0, "message": {"role": "assistant", "content": "Hi!"}, "finish_reason": "stop"},
                        {"index": 1, "message": {"role": "assistant", "content": "Hello."}, "finish_reason": "stop"}
                    ]
                }));
            })
            .await;

        let settings = settings(server.url("/v1"));
        let message = ask(&client(&settings), &settings).await.unwrap();

        mock.assert_async().await;
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.text(), "Hi!");
    }

    #[tokio::test]
    async fn test_ask_without_choices() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "yi-chat-6b.Q5_K_M.gguf",
                    "choices": []
                }));
            })
            .await;

        let settings = settings(server.url("/v1"));
        let err = ask(&client(&settings), &settings).await.unwrap_err();
        assert!(matches!(err, Error::NoChoices));
    }

    #[test]
    fn test_render() {
        let message = ChatCompletionResponseMessage {
            role: Role::Assistant,
            content: Some("Hi!".into()),
            refusal: None,
        };

        assert_eq!(render(&message, OutputFormat::Text).unwrap(), "Hi!");

        let rendered = render(&message, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "Hi!"}));
    }
}
