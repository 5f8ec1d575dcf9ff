use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    // Parsing errors
    #[error("Malformed news payload: {0}")]
    Decode(#[from] serde_json::Error),

    // Terminal input errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NewsResult<T> = Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = NewsError::Status {
            endpoint: "/api/news".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "/api/news returned status 503");
    }

    #[test]
    fn test_missing_env_var_message() {
        let err = NewsError::MissingEnvVar("NEWS_BACKEND_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: NEWS_BACKEND_URL"
        );
    }

    #[test]
    fn test_decode_error_message() {
        let err: NewsError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, NewsError::Decode(_)));
        assert!(err.to_string().starts_with("Malformed news payload"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        );
        let err: NewsError = io.into();
        assert!(matches!(err, NewsError::Io(_)));
        assert_eq!(err.to_string(), "IO error: stream did not contain valid UTF-8");
    }
}
