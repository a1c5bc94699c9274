use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use secrecy::SecretString;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/v1";
pub const DEFAULT_API_KEY: &str = "123456";
pub const DEFAULT_MODEL: &str = "yi-chat-6b.Q5_K_M.gguf";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_PROMPT: &str = "Hello!";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
/// Send one chat completion to an OpenAI-compatible server and print the reply
pub struct Args {
    /// User message
    pub prompt: Option<String>,
    /// System message
    #[arg(long)]
    pub system: Option<String>,
    /// Server base URL, including the API prefix (e.g. http://localhost:8000/v1)
    #[arg(long, env = "LOCALCHAT_BASE_URL")]
    pub base_url: Option<String>,
    /// API key sent as a bearer token
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Model identifier
    #[arg(long, env = "LOCALCHAT_MODEL")]
    pub model: Option<String>,
    /// TOML file with base_url, api_key, model and system
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Only the reply text
    #[default]
    Text,
    /// The whole reply message as JSON
    Json,
}

/// Contents of the `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub system: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Fully resolved settings for a single request.
#[derive(Debug)]
pub struct Settings {
    pub base_url: String,
    pub api_key: SecretString,
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub output: OutputFormat,
}

impl Settings {
    pub fn load(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(args, file))
    }

    /// Flags and environment (already merged by clap) win over the file,
    /// which wins over the built-in defaults.
    pub fn resolve(args: Args, file: FileConfig) -> Self {
        let api_key = args
            .api_key
            .or(file.api_key)
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        Self {
            base_url: args
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: SecretString::from(api_key),
            model: args
                .model
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system: args
                .system
                .or(file.system)
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            prompt: args.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            output: args.output,
        }
    }
}
