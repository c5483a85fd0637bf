//! Option prompts declared in YAML
//!
//! ```yaml
//! - name: test
//!   type: confirm
//!   alias: t
//!   description: Set up a test runner
//!   default: true
//! - name: coverage
//!   type: confirm
//!   requires: test
//!   when_prohibited: false
//! ```

use crate::error::{GeneratorError, Result};
use crate::options::{is_truthy, OptionPrompt, Validation};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One option prompt as written in a definitions file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub alias: Option<char>,
    pub description: Option<String>,
    pub message: Option<String>,
    pub default: Option<Value>,
    pub when_prohibited: Option<Value>,
    /// Reject empty or false values
    #[serde(default)]
    pub required: bool,
    /// Only allow this option when the named option is truthy
    pub requires: Option<String>,
}

impl OptionDefinition {
    /// Convert to a descriptor. Fails on an unsupported `type`.
    pub fn into_prompt(self) -> Result<OptionPrompt> {
        let mut prompt = OptionPrompt::with_type(self.name.clone(), &self.kind)?;

        if let Some(alias) = self.alias {
            prompt = prompt.alias(alias);
        }
        if let Some(description) = self.description {
            prompt = prompt.description(description);
        }
        if let Some(message) = self.message {
            prompt = prompt.message(message);
        }
        if let Some(default) = self.default {
            prompt = prompt.default_value(default);
        }
        if let Some(value) = self.when_prohibited {
            prompt = prompt.when_prohibited(value);
        }
        if self.required {
            let name = self.name.clone();
            prompt = prompt.validate(move |value: &Value| {
                if is_truthy(value) {
                    Validation::Valid
                } else {
                    Validation::Message(format!("{} is required", name))
                }
            });
        }
        if let Some(dependency) = self.requires {
            prompt = prompt.allowed(move |options| options.get(&dependency).is_some_and(is_truthy));
        }

        Ok(prompt)
    }
}

/// Parse a YAML list of option definitions into descriptors
pub fn load_definitions(yaml: &str) -> Result<Vec<OptionPrompt>> {
    let definitions: Vec<OptionDefinition> = serde_yaml::from_str(yaml)?;
    definitions
        .into_iter()
        .map(OptionDefinition::into_prompt)
        .collect()
}

pub fn load_definitions_file(path: &Path) -> Result<Vec<OptionPrompt>> {
    let yaml = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    load_definitions(&yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FlagKind, Options, PromptKind};
    use serde_json::json;

    const DEFINITIONS: &str = r#"
- name: description
  type: input
  alias: d
  description: Package description
  message: Describe your package
  required: true
- name: test
  type: confirm
  default: true
- name: coverage
  type: confirm
  requires: test
  when_prohibited: false
"#;

    #[test]
    fn test_load_definitions() {
        let prompts = load_definitions(DEFINITIONS).unwrap();
        assert_eq!(prompts.len(), 3);

        let description = &prompts[0];
        assert_eq!(description.name(), "description");
        assert_eq!(description.kind(), PromptKind::Input);
        assert_eq!(description.short_alias(), Some('d'));
        assert_eq!(description.help(), Some("Package description"));
        assert_eq!(description.prompt_message(), "Describe your package");
        assert!(description.validator().is_some());

        assert_eq!(prompts[1].flag_kind(), FlagKind::Boolean);
        assert_eq!(prompts[2].prohibited_value(), Some(&json!(false)));
    }

    #[test]
    fn test_requires_gates_allowed() {
        let prompts = load_definitions(DEFINITIONS).unwrap();
        let coverage = &prompts[2];

        let mut options = Options::new();
        assert!(!coverage.is_allowed(&options));
        options.insert("test".to_string(), json!(false));
        assert!(!coverage.is_allowed(&options));
        options.insert("test".to_string(), json!(true));
        assert!(coverage.is_allowed(&options));
    }

    #[tokio::test]
    async fn test_required_rejects_empty_values() {
        let prompts = load_definitions(DEFINITIONS).unwrap();
        let validator = prompts[0].validator().unwrap();

        assert_eq!(validator.check(&json!("A library")).await, Validation::Valid);
        assert_eq!(
            validator.check(&json!("")).await,
            Validation::Message("description is required".to_string())
        );
    }

    #[test]
    fn test_unsupported_type_fails() {
        let err = load_definitions("- name: license\n  type: list\n").unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedPromptType(k) if k == "list"));
    }

    #[test]
    fn test_unknown_field_fails() {
        let err = load_definitions("- name: a\n  type: input\n  choices: [x]\n").unwrap_err();
        assert!(matches!(err, GeneratorError::Definitions(_)));
    }
}
