use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Listing query failed: {message}")]
    QueryFailed { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Seed data error: {message}")]
    SeedError { message: String },
}

impl DirectoryError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::QueryFailed { .. } => {
                "The listing source could not be queried.".to_string()
            }
            DirectoryError::CsvError(_) | DirectoryError::SeedError { .. } => {
                "The seed dataset could not be read.".to_string()
            }
            DirectoryError::IoError(_) => "A file could not be read or written.".to_string(),
            DirectoryError::SerializationError(_) => {
                "Listing data could not be decoded.".to_string()
            }
            DirectoryError::ConfigError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => {
                "The configuration is invalid.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DirectoryError::QueryFailed { .. } => {
                "Check that the endpoint is reachable and the API key is valid, then search again."
                    .to_string()
            }
            DirectoryError::CsvError(_) | DirectoryError::SeedError { .. } => {
                "Check the seed CSV path and that its header row matches the companies schema."
                    .to_string()
            }
            DirectoryError::IoError(_) => "Check the path and file permissions.".to_string(),
            DirectoryError::SerializationError(_) => {
                "Check that the source returns companies rows as JSON.".to_string()
            }
            DirectoryError::ConfigError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => {
                "Run with --help for the accepted flags and config fields.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
