use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixupError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to launch '{program}': {source}")]
    VcsUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    VcsCommandError {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Content of {origin} is not valid UTF-8")]
    DecodeError { origin: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    VersionControl,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FixupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FixupError::ConfigValidationError { .. }
            | FixupError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FixupError::IoError(_) => ErrorCategory::FileSystem,
            FixupError::VcsUnavailable { .. } | FixupError::VcsCommandError { .. } => {
                ErrorCategory::VersionControl
            }
            FixupError::SerializationError(_) | FixupError::DecodeError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FixupError::VcsCommandError { .. } => ErrorSeverity::Medium,
            FixupError::ConfigValidationError { .. }
            | FixupError::InvalidConfigValueError { .. }
            | FixupError::SerializationError(_)
            | FixupError::DecodeError { .. } => ErrorSeverity::High,
            FixupError::IoError(_) | FixupError::VcsUnavailable { .. } => ErrorSeverity::Critical,
        }
    }

    /// 對應 CLI 的退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FixupError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the file exists and that you are running from the project root"
                    .to_string()
            }
            FixupError::IoError(_) => "Check file permissions and available disk space".to_string(),
            FixupError::ConfigValidationError { field, .. }
            | FixupError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the job file or command line", field)
            }
            FixupError::VcsUnavailable { program, .. } => {
                format!("Install '{}' and make sure it is on PATH", program)
            }
            FixupError::VcsCommandError { .. } => {
                "Make sure the working directory is inside the repository and the revision and path exist in its history".to_string()
            }
            FixupError::DecodeError { .. } => {
                "Only text files can be rewritten; pick a different source path".to_string()
            }
            FixupError::SerializationError(_) => "Re-run without --json".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid job configuration: {}", self),
            ErrorCategory::FileSystem => format!("File access failed: {}", self),
            ErrorCategory::VersionControl => format!("Version control lookup failed: {}", self),
            ErrorCategory::Processing => format!("Could not process content: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FixupError>;
