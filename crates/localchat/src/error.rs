/// The main error type for the localchat [`crate`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Represents errors that occur during IO operations.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// The error type for operations interacting with environment variables.
    /// Possibly returned from [`std::env::var()`].
    #[error("Environment variable error: {0} {1}")]
    EnvVarError(String, std::env::VarError),

    #[error("Invalid header value for {0}: {1}")]
    InvalidHeaderValue(String, reqwest::header::InvalidHeaderValue),

    /// Represents [`crate::chat_completions::ChatCompletionRequestBuilder`] errors.
    #[error(transparent)]
    ChatCompletionRequestBuilderError(
        #[from] crate::chat_completions::ChatCompletionRequestBuilderError,
    ),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Streaming not supported: {0}")]
    StreamingNotSupported(String),

    /// The server answered with a non-success status code.
    #[error("API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Response contained no choices")]
    NoChoices,

    /// The `created` unix timestamp does not fit in an [`time::OffsetDateTime`].
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(u64),

    /// Catches any other error types that don't fit into the above categories.
    /// Uses a boxed trait object to support a wide range of error types.
    #[error("OtherError: {0}")]
    OtherError(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// A specialized [`Result`] type for this localchat [`crate`].
///
/// This type is broadly used across localchat [`crate`] for any operation
/// which may produce an error.
///
/// This typedef is generally used to avoid writing out [`Error`] directly and
/// is otherwise a direct mapping to [`Result`].
///
/// # Examples
///
/// A convenience function that bubbles a `localchat::Result` to its caller:
///
/// ```
/// fn ask_local_model() -> localchat::Result<()> {
///     // run some code that may produce an error from the localchat code
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
