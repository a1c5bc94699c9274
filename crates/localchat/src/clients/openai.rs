use crate::chat_completions::{ChatCompletion, ChatCompletionRequest, ChatCompletionResponse};
use crate::utils::uri::{ensure_no_trailing_slash, join};
use crate::{Error, Result};
use async_trait::async_trait;
use derive_builder::Builder;
use secrecy::{ExposeSecret, SecretString};

pub const OPENAI_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for OpenAI and any server exposing the same `/chat/completions` API,
/// such as llama.cpp, vLLM or Ollama.
#[derive(Debug, Clone, Builder)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub struct Client {
    #[builder(default)]
    http_client: reqwest::Client,
    #[builder(default = "OPENAI_BASE_URL.to_string()")]
    base_url: String,
    api_key: SecretString,
}

impl Client {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::from_url(api_key, OPENAI_BASE_URL)
    }

    pub fn from_url(api_key: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            http_client: reqwest::Client::default(),
            base_url: ensure_no_trailing_slash(base_url),
            api_key: SecretString::from(api_key.to_string()),
        })
    }

    /// Reads the key from `OPENAI_API_KEY` and, when set, the server from
    /// `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(OPENAI_API_KEY_ENV_VAR)
            .map_err(|e| Error::EnvVarError(OPENAI_API_KEY_ENV_VAR.to_string(), e))?;
        let base_url = match std::env::var(OPENAI_BASE_URL_ENV_VAR) {
            Ok(base_url) => base_url,
            Err(std::env::VarError::NotPresent) => OPENAI_BASE_URL.to_string(),
            Err(e) => return Err(Error::EnvVarError(OPENAI_BASE_URL_ENV_VAR.to_string(), e)),
        };
        Self::from_url(&api_key, &base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();

        let mut auth_header_value = reqwest::header::HeaderValue::from_str(&format!(
            "Bearer {}",
            self.api_key.expose_secret()
        ))
        .map_err(|e| Error::InvalidHeaderValue(reqwest::header::AUTHORIZATION.to_string(), e))?;
        auth_header_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_header_value);

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

#[async_trait]
impl ChatCompletion for Client {
    #[tracing::instrument(skip_all, fields(model = %request.model, base_url = %self.base_url))]
    async fn chat_completions(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        if request.stream == Some(true) {
            return Err(Error::StreamingNotSupported(
                "Streaming is not supported when using chat_completions() api".to_string(),
            ));
        }

        let url = join(&self.base_url, "chat/completions");
        tracing::debug!(%url, messages = request.messages.len(), "sending chat completion request");

        let response = self
            .http_client
            .post(url)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, "received chat completion response");

        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!(%status, "chat completion request failed");
            return Err(Error::Api { status, body });
        }

        let body = response.text().await?;
        let chat_completion_response = serde_json::from_str::<ChatCompletionResponse>(&body)?;

        if let Some(usage) = &chat_completion_response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "token usage"
            );
        }

        Ok(chat_completion_response)
    }
}

impl super::Client for Client {}
