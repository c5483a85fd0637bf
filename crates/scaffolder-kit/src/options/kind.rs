//! Prompt kinds and the command-line flag kind each one maps to

use crate::error::GeneratorError;
use std::fmt;
use std::str::FromStr;

/// Supported interactive prompt kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// Free text answer
    Input,
    /// Yes/no answer
    Confirm,
}

/// Kind of command-line flag registered for an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    String,
    Boolean,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Input => "input",
            PromptKind::Confirm => "confirm",
        }
    }

    /// Flag kind used when this prompt is also exposed as a flag
    pub fn flag_kind(&self) -> FlagKind {
        match self {
            PromptKind::Input => FlagKind::String,
            PromptKind::Confirm => FlagKind::Boolean,
        }
    }
}

impl FromStr for PromptKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(PromptKind::Input),
            "confirm" => Ok(PromptKind::Confirm),
            other => Err(GeneratorError::UnsupportedPromptType(other.to_string())),
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_kind_mapping() {
        assert_eq!(PromptKind::Input.flag_kind(), FlagKind::String);
        assert_eq!(PromptKind::Confirm.flag_kind(), FlagKind::Boolean);
    }

    #[test]
    fn test_parse_supported_kinds() {
        assert_eq!("input".parse::<PromptKind>().unwrap(), PromptKind::Input);
        assert_eq!("confirm".parse::<PromptKind>().unwrap(), PromptKind::Confirm);
    }

    #[test]
    fn test_parse_unsupported_kind_fails() {
        for kind in ["list", "checkbox", "Input", ""] {
            let err = kind.parse::<PromptKind>().unwrap_err();
            assert!(
                matches!(err, GeneratorError::UnsupportedPromptType(ref k) if k == kind),
                "unexpected error for {:?}: {}",
                kind,
                err
            );
        }
    }
}
