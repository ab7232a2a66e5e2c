use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("{message}")]
    InvalidParticipants { message: String },

    #[error("{message}")]
    AssignmentImpossible { message: String },

    #[error("{message}")]
    NoAssignments { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Participant not found: {id}")]
    ParticipantNotFound { id: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Assignment generation exceeded the {seconds}s deadline")]
    Timeout { seconds: u64 },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// 錯誤分類，決定對外的錯誤碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidParticipants,
    AssignmentImpossible,
    NoAssignments,
    Configuration,
    Unexpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn invalid_participants(message: impl Into<String>) -> Self {
        Self::InvalidParticipants {
            message: message.into(),
        }
    }

    pub fn assignment_impossible(message: impl Into<String>) -> Self {
        Self::AssignmentImpossible {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidParticipants { .. } => ErrorCategory::InvalidParticipants,
            Self::AssignmentImpossible { .. } => ErrorCategory::AssignmentImpossible,
            Self::NoAssignments { .. } => ErrorCategory::NoAssignments,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::Storage { .. }
            | Self::ParticipantNotFound { .. }
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Timeout { .. }
            | Self::Internal { .. } => ErrorCategory::Unexpected,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NoAssignments => ErrorSeverity::Low,
            ErrorCategory::InvalidParticipants | ErrorCategory::AssignmentImpossible => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Unexpected => match self {
                Self::Timeout { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    /// 是否屬於呼叫端可修正的錯誤 (對應 400)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::InvalidParticipants
                | ErrorCategory::AssignmentImpossible
                | ErrorCategory::NoAssignments
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InvalidParticipants => "INVALID_PARTICIPANTS",
            ErrorCategory::AssignmentImpossible => "ASSIGNMENT_IMPOSSIBLE",
            ErrorCategory::NoAssignments => "NO_ASSIGNMENTS",
            ErrorCategory::Configuration | ErrorCategory::Unexpected => "INTERNAL_ERROR",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidParticipants { .. } => "Add at least two participants to the members file",
            Self::AssignmentImpossible { .. } => {
                "Add participants from other families, or remove relations or history that block every pairing"
            }
            Self::NoAssignments { .. } => "Generate assignments for an earlier year first",
            Self::Internal { .. } => "Retry the request; report it if the failure persists",
            Self::Storage { .. } | Self::Io(_) | Self::Serialization(_) => {
                "Check that the data directory exists and its JSON files are well formed"
            }
            Self::ParticipantNotFound { .. } => {
                "Check that every assignment references a participant in the members file"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the command line flags and the TOML config file",
            Self::Timeout { .. } => "Raise --timeout-seconds or relax the participant constraints",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::InvalidParticipants
            | ErrorCategory::AssignmentImpossible
            | ErrorCategory::NoAssignments => self.to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Unexpected => "Unexpected error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;
