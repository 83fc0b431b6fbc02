use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    EncodingError,
    ConfigError,
    InvalidValidatorSet,
    DuplicateValidator,
    ThresholdExceedsValidators,
    LoggingError,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    // === Validator Set Errors ===
    #[error("invalid validator set: {details}")]
    InvalidValidatorSet { details: String },

    #[error("duplicate validator address: {address}")]
    DuplicateValidator { address: String },

    #[error("threshold {threshold} exceeds validator count {validators}")]
    ThresholdExceedsValidators { threshold: u64, validators: usize },

    #[error("logging init failed: {details}")]
    LoggingError { details: String },
}

pub type Result<T> = std::result::Result<T, PoolError>;

impl PoolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PoolError::EncodingError(_) => ErrorCode::EncodingError,
            PoolError::ConfigError(_) => ErrorCode::ConfigError,
            PoolError::InvalidValidatorSet { .. } => ErrorCode::InvalidValidatorSet,
            PoolError::DuplicateValidator { .. } => ErrorCode::DuplicateValidator,
            PoolError::ThresholdExceedsValidators { .. } => ErrorCode::ThresholdExceedsValidators,
            PoolError::LoggingError { .. } => ErrorCode::LoggingError,
        }
    }

    pub fn context(&self) -> ErrorContext {
        ErrorContext { code: self.code(), message: self.to_string() }
    }

    pub fn logging(details: impl ToString) -> Self {
        PoolError::LoggingError { details: details.to_string() }
    }
}

impl From<hex::FromHexError> for PoolError {
    fn from(err: hex::FromHexError) -> Self {
        PoolError::EncodingError(format!("hex decode error: {}", err))
    }
}

impl From<figment::Error> for PoolError {
    fn from(err: figment::Error) -> Self {
        PoolError::ConfigError(format!("config extraction failed: {}", err))
    }
}
