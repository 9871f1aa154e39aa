use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToonifyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid file type: {0} (expected an image/* file)")]
    InvalidFileType(String),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    #[error("No content generated")]
    EmptyResponse,

    #[error("Model returned text instead of image: {0}")]
    TextOnlyResponse(String),

    #[error("No image data found in response")]
    NoImageInResponse,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ToonifyError>;
