use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorrectorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Not logged succesfully")]
    NotLoggedIn,

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl CorrectorError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CorrectorError::NotLoggedIn => "Check the USERNAME and PASSWORD arguments",
            CorrectorError::ApiError(_) | CorrectorError::UnexpectedStatus { .. } => {
                "Check network access to the catalog and try again later"
            }
            CorrectorError::ConfigError { .. } | CorrectorError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            CorrectorError::ValidationError { .. } => "Check the brand mapping and arguments",
            CorrectorError::IoError(_) => "Check the file path and its contents",
        }
    }
}

pub type Result<T> = std::result::Result<T, CorrectorError>;
