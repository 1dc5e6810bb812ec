use thiserror::Error;

/// Errors from the generative model gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoachError {
    #[error("API key missing")]
    MissingApiKey,

    #[error("model request failed: {message}")]
    Request { message: String },

    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("malformed diet plan: {message}")]
    MalformedPlan { message: String },
}
