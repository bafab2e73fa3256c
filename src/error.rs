use thiserror::Error;

/// BankHub error type
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure (connection refused, timeout, bad body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A toast was requested through a handle whose queue is no longer running
    #[error("Configuration error: toasts can only be shown while a toast queue is running")]
    ToastUnavailable,

    /// Form input rejected before reaching the API
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an API error from a response status and body
    pub fn api(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        Error::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Whether this error came from talking to the remote API
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Api { .. })
    }

    /// Programmer misuse that must stop the application
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ToastUnavailable | Error::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = Error::api(reqwest::StatusCode::NOT_FOUND, "compte introuvable");
        match &err {
            Error::Api { status, message } => {
                assert_eq!(*status, 404);
                assert_eq!(message, "compte introuvable");
            }
            _ => panic!("Expected Api error variant"),
        }
        assert!(err.is_network());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_toast_unavailable_is_fatal() {
        assert!(Error::ToastUnavailable.is_fatal());
        assert!(Error::Config("missing".to_string()).is_fatal());
        assert!(!Error::Validation("solde".to_string()).is_fatal());
    }
}
