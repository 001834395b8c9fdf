use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{message}")]
    NetworkError { message: String },

    #[error("The data couldn't be read because it isn't in the correct format: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Malformed URL '{value}': {reason}")]
    MalformedUrlError { value: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal error: {message}")]
    TerminalError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

impl SearchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::NetworkError { .. } => ErrorCategory::Network,
            SearchError::DecodeError(_) | SearchError::MalformedUrlError { .. } => {
                ErrorCategory::Data
            }
            SearchError::ConfigError { .. }
            | SearchError::ConfigValidationError { .. }
            | SearchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SearchError::IoError(_) | SearchError::TerminalError { .. } => ErrorCategory::System,
        }
    }

    /// Exit code used by the binary when this error ends the process.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Network | ErrorCategory::Data => 1,
            ErrorCategory::System => 3,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        let message = match err.status() {
            Some(status) => format!("Server responded with {}", status),
            None => err.to_string(),
        };
        SearchError::NetworkError { message }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
