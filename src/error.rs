use std::fmt;

/// Label every provider-side or transport-side failure message starts with.
pub const GENERATION_FAILED_PREFIX: &str = "Stability image generation failed: ";

const UNKNOWN_PROVIDER_ERROR: &str = "Unknown error from Stability";

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("Stability API key is missing (set STABILITY_API_KEY)")]
    Configuration,

    #[error(
        "Stability image generation failed: Stability API error {status}: {}",
        provider_body(.body)
    )]
    Provider { status: u16, body: String },

    #[error("Stability image generation failed: {0}")]
    Transport(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn provider_body(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        UNKNOWN_PROVIDER_ERROR
    } else {
        trimmed
    }
}

/// Which side of the call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Provider,
    Transport,
    InvalidRequest,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Provider => "provider",
            ErrorKind::Transport => "transport",
            ErrorKind::InvalidRequest => "invalid_request",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StudioError::Configuration => ErrorKind::Configuration,
            StudioError::Provider { .. } => ErrorKind::Provider,
            StudioError::Transport(_) => ErrorKind::Transport,
            StudioError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// HTTP status the provider answered with, if the failure came from it.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            StudioError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(e: reqwest::Error) -> Self {
        StudioError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_carries_status_and_body() {
        let err = StudioError::Provider {
            status: 401,
            body: "{\"message\":\"invalid api key\"}".into(),
        };
        assert_eq!(
            err.to_string(),
            "Stability image generation failed: Stability API error 401: {\"message\":\"invalid api key\"}"
        );
        assert_eq!(err.kind(), ErrorKind::Provider);
        assert_eq!(err.provider_status(), Some(401));
    }

    #[test]
    fn test_provider_message_with_empty_body() {
        let err = StudioError::Provider {
            status: 500,
            body: "  ".into(),
        };
        assert!(err.to_string().ends_with("500: Unknown error from Stability"));
    }

    #[test]
    fn test_failure_prefix_is_shared() {
        let transport = StudioError::Transport("connection refused".into());
        let provider = StudioError::Provider {
            status: 403,
            body: String::new(),
        };
        assert!(transport.to_string().starts_with(GENERATION_FAILED_PREFIX));
        assert!(provider.to_string().starts_with(GENERATION_FAILED_PREFIX));
        assert!(!StudioError::Configuration
            .to_string()
            .starts_with(GENERATION_FAILED_PREFIX));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(StudioError::Configuration.kind().as_str(), "configuration");
        assert_eq!(
            StudioError::InvalidRequest("empty".into()).kind(),
            ErrorKind::InvalidRequest
        );
        assert_eq!(StudioError::Transport("x".into()).kind().to_string(), "transport");
        assert_eq!(StudioError::Transport("x".into()).provider_status(), None);
    }
}
