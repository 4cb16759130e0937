use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Remote fault {code}: {message}")]
    RemoteFault { code: i64, message: String },

    #[error("Authentication failed for user '{username}' on database '{database}'")]
    AuthenticationFailed { database: String, username: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::ApiError(_) | ProbeError::IoError(_) => ErrorCategory::Network,
            ProbeError::RemoteFault { .. } | ProbeError::AuthenticationFailed { .. } => {
                ErrorCategory::Remote
            }
            ProbeError::SerializationError(_) | ProbeError::InvalidResponse { .. } => {
                ErrorCategory::Data
            }
            ProbeError::ConfigError { .. }
            | ProbeError::ConfigValidationError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProbeError::ApiError(_) => ErrorSeverity::Medium,
            ProbeError::RemoteFault { .. } | ProbeError::InvalidResponse { .. } => {
                ErrorSeverity::High
            }
            ProbeError::SerializationError(_) | ProbeError::IoError(_) => ErrorSeverity::High,
            ProbeError::AuthenticationFailed { .. } => ErrorSeverity::Critical,
            ProbeError::ConfigError { .. }
            | ProbeError::ConfigValidationError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProbeError::ApiError(e) if e.is_timeout() => {
                "The Odoo server did not answer in time".to_string()
            }
            ProbeError::ApiError(e) if e.is_connect() => {
                "Could not reach the Odoo server".to_string()
            }
            ProbeError::AuthenticationFailed { .. } => {
                "Authentication failed. Please check your credentials.".to_string()
            }
            ProbeError::MissingConfigError { field } => {
                format!("Missing setting: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the Odoo URL and your network connection",
            ErrorCategory::Remote => {
                "Verify the database name, credentials and access rights of the Odoo user"
            }
            ErrorCategory::Data => "Check that the server is an Odoo instance exposing /jsonrpc",
            ErrorCategory::Configuration => {
                "Fix the flags, environment variables or config file and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
