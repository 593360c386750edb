use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request failed: {status}")]
    StatusError { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl GalleryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// 傳輸失敗、非 2xx 或回應格式錯誤，一律視為抓取失敗
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::ApiError(_) | Self::StatusError { .. } | Self::SerializationError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            e if e.is_fetch_error() => {
                "Sorry, we couldn't load the space images. Please try again later.".to_string()
            }
            Self::IoError(e) => format!("Could not write output: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing setting '{}'", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
