use crate::domain::model::FetchFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreebiesError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream returned an error status: {0}")]
    UpstreamStatus(FetchFailure),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依錯誤嚴重程度決定行程退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl FreebiesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FreebiesError::ApiError(_) => ErrorCategory::Network,
            FreebiesError::UpstreamStatus(_) | FreebiesError::SerializationError(_) => {
                ErrorCategory::Upstream
            }
            FreebiesError::ConfigError { .. }
            | FreebiesError::MissingConfigError { .. }
            | FreebiesError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FreebiesError::CsvError(_) | FreebiesError::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路與上游錯誤通常稍後重試即可
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FreebiesError::ApiError(e) if e.is_timeout() => {
                "Steam did not answer in time; try again later or raise --timeout"
            }
            FreebiesError::ApiError(_) => "Check your network connection and try again",
            FreebiesError::UpstreamStatus(failure) if failure.status == 403 => {
                "Steam rejected the request; verify the API key"
            }
            FreebiesError::UpstreamStatus(_) => {
                "Steam returned an error; retry later or run without --strict"
            }
            FreebiesError::SerializationError(_) => {
                "Steam returned an unexpected payload; the API may have changed"
            }
            FreebiesError::MissingConfigError { .. } => {
                "Pass the value on the command line, via environment, or in the config file"
            }
            FreebiesError::ConfigError { .. } | FreebiesError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            FreebiesError::CsvError(_) | FreebiesError::IoError(_) => {
                "Check that the output path is writable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FreebiesError::ApiError(_) => format!("Could not reach Steam: {}", self),
            FreebiesError::UpstreamStatus(failure) => format!(
                "Steam {} request failed with HTTP {}",
                failure.endpoint, failure.status
            ),
            FreebiesError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FreebiesError>;
