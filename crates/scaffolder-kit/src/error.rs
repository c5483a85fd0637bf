//! Error type shared by every generator operation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;

/// Errors raised while defining, resolving or writing a generator run
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A prompt type outside the supported set was requested.
    /// This is a defect in the generator definition, not a user error.
    #[error("unsupported prompt type '{0}'")]
    UnsupportedPromptType(String),

    /// The same option name was registered twice
    #[error("option '{0}' is registered more than once")]
    DuplicateOption(String),

    /// A resolved option failed its validator. Terminates the run.
    #[error("{0}")]
    Validation(String),

    /// An asynchronous default supplier failed
    #[error("could not compute default for option '{name}': {source}")]
    DefaultValue {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The terminal interaction itself failed
    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("failed to render template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("invalid option definitions: {0}")]
    Definitions(#[from] serde_yaml::Error),
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from a failed option validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = GeneratorError::Validation("Name must be lowercase".to_string());
        assert_eq!(err.to_string(), "Name must be lowercase");
        assert!(err.is_validation());
    }

    #[test]
    fn test_unsupported_prompt_type_message() {
        let err = GeneratorError::UnsupportedPromptType("list".to_string());
        assert_eq!(err.to_string(), "unsupported prompt type 'list'");
        assert!(!err.is_validation());
    }
}
