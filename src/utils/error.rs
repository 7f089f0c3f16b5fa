use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("API request to {url} failed with status {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Unexpected response from {endpoint}: {message}")]
    DecodeError { endpoint: String, message: String },

    #[error("Cannot parse a year from '{value}'")]
    ParseError { value: String },

    #[error("No data for {selection}")]
    NotFoundError { selection: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
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
    Data,
    Selection,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DecodeError {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn not_found(selection: impl Into<String>) -> Self {
        Self::NotFoundError {
            selection: selection.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TransportError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::DecodeError { .. } | Self::ParseError { .. } => ErrorCategory::Data,
            Self::NotFoundError { .. } => ErrorCategory::Selection,
            Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Output,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 只有「查無資料」可以繼續執行
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFoundError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::TransportError(_) | Self::HttpStatusError { .. } => {
                "Check network access, the API base URLs and the client credentials, then run again"
            }
            Self::DecodeError { .. } => {
                "The API response shape changed; inspect the payload with --verbose"
            }
            Self::ParseError { .. } => "An academic period name does not start with a 4-digit year",
            Self::NotFoundError { .. } => "Pick a different year or term from the listed range",
            Self::CsvError(_) | Self::IoError(_) => {
                "Make sure the output directory exists and is writable"
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Fix the TOML configuration or export the referenced environment variables"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::TransportError(e) => format!("Could not reach the academic API: {}", e),
            Self::HttpStatusError { status, .. } => {
                format!("The academic API rejected the request (HTTP {})", status)
            }
            Self::DecodeError { endpoint, .. } => {
                format!("The {} response could not be understood", endpoint)
            }
            Self::NotFoundError { selection } => format!("There is no data for {}", selection),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
