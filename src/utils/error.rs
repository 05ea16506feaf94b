use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpaceTravelError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Planet with ID '{id}' already exists.")]
    DuplicateId { id: String },

    #[error("Data access failure: {0}")]
    DataAccess(#[from] rusqlite::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    NotFound,
    Conflict,
    Storage,
    Configuration,
}

impl SpaceTravelError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateId { .. } => ErrorCategory::Conflict,
            Self::DataAccess(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Config { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    /// Message shown to the shell user. Storage details stay in the log.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::DuplicateId { .. } => self.to_string(),
            Self::DataAccess(_) | Self::Io(_) => {
                "The database could not complete the request.".to_string()
            }
            Self::Config { message } => format!("Configuration problem: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpaceTravelError>;
