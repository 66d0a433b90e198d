use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Theme table error: {message}")]
    ThemeTableError { message: String },
}

impl DashError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::IoError(e) => format!("Could not access a file: {}", e),
            DashError::SerializationError(e) => format!("Could not read JSON data: {}", e),
            DashError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            DashError::ConfigError { message } => format!("Configuration problem: {}", message),
            DashError::MissingConfigError { field } => {
                format!("The configuration is missing '{}'", field)
            }
            DashError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is invalid: {}", field, reason)
            }
            DashError::ThemeTableError { message } => {
                format!("The theme table cannot be used: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashError::IoError(_) => "Check that the path exists and is readable",
            DashError::SerializationError(_) => "Validate the file with a JSON linter",
            DashError::TomlError(_) => "Check the configuration file syntax",
            DashError::ConfigError { .. }
            | DashError::MissingConfigError { .. }
            | DashError::InvalidConfigValueError { .. } => {
                "Review the configuration file against the documented sections"
            }
            DashError::ThemeTableError { .. } => {
                "Make sure the table has a \"default\" entry and every value is a CSS color"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
