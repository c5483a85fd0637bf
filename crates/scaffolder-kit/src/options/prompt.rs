//! Option-prompt descriptors
//!
//! An [`OptionPrompt`] describes one value that can be supplied either as a
//! command-line flag or, when the flag is absent, through an interactive
//! prompt. Descriptors are built once with the builder methods below and are
//! never mutated after registration.

use super::kind::{FlagKind, PromptKind};
use super::validation::{Validation, Validator};
use crate::error::Result;
use crate::generator::Generator;
use clap::{value_parser, Arg, ArgAction};
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Resolved options bag: option name to final value
pub type Options = Map<String, Value>;

type SupplyFn = dyn Fn(&Generator) -> Value + Send + Sync;
type AsyncSupplyFn = dyn Fn(&Generator) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync;
type AllowedFn = dyn Fn(&Options) -> bool + Send + Sync;

/// Default answer for a prompt
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    /// Computed lazily, only when the prompt fires
    Supplier(Arc<SupplyFn>),
    /// Computed lazily and awaited, only when the prompt fires
    AsyncSupplier(Arc<AsyncSupplyFn>),
}

impl DefaultValue {
    pub async fn resolve(&self, generator: &Generator) -> anyhow::Result<Value> {
        match self {
            DefaultValue::Value(value) => Ok(value.clone()),
            DefaultValue::Supplier(supply) => Ok(supply(generator)),
            DefaultValue::AsyncSupplier(supply) => supply(generator).await,
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Supplier(_) => f.write_str("Supplier(..)"),
            DefaultValue::AsyncSupplier(_) => f.write_str("AsyncSupplier(..)"),
        }
    }
}

/// A configuration value resolvable from a flag or a prompt
#[derive(Clone)]
pub struct OptionPrompt {
    name: String,
    kind: PromptKind,
    alias: Option<char>,
    description: Option<String>,
    message: Option<String>,
    default: Option<DefaultValue>,
    validator: Option<Validator>,
    allowed: Option<Arc<AllowedFn>>,
    when_prohibited: Option<Value>,
}

impl OptionPrompt {
    pub fn new(name: impl Into<String>, kind: PromptKind) -> Self {
        Self {
            name: name.into(),
            kind,
            alias: None,
            description: None,
            message: None,
            default: None,
            validator: None,
            allowed: None,
            when_prohibited: None,
        }
    }

    /// Free text option, exposed as a string flag
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, PromptKind::Input)
    }

    /// Yes/no option, exposed as a boolean flag
    pub fn confirm(name: impl Into<String>) -> Self {
        Self::new(name, PromptKind::Confirm)
    }

    /// Build from a prompt type string, failing on anything but
    /// `"input"` or `"confirm"`
    pub fn with_type(name: impl Into<String>, kind: &str) -> Result<Self> {
        Ok(Self::new(name, kind.parse()?))
    }

    /// Single-character short flag
    pub fn alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Help text shown for the flag
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Question shown when prompting
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_with<F>(mut self, supply: F) -> Self
    where
        F: Fn(&Generator) -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Supplier(Arc::new(supply)));
        self
    }

    /// Asynchronous default. The closure runs synchronously against the
    /// generator and returns the future to await.
    pub fn default_async<F, Fut>(mut self, supply: F) -> Self
    where
        F: Fn(&Generator) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.default = Some(DefaultValue::AsyncSupplier(Arc::new(
            move |generator: &Generator| -> BoxFuture<'static, anyhow::Result<Value>> {
                Box::pin(supply(generator))
            },
        )));
        self
    }

    pub fn validate<F, V>(mut self, validate: F) -> Self
    where
        F: Fn(&Value) -> V + Send + Sync + 'static,
        V: Into<Validation>,
    {
        self.validator = Some(Validator::Sync(Arc::new(move |value: &Value| -> Validation {
            validate(value).into()
        })));
        self
    }

    pub fn validate_async<F, Fut, V>(mut self, validate: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = V> + Send + 'static,
        V: Into<Validation>,
    {
        let validate = Arc::new(validate);
        self.validator = Some(Validator::Async(Arc::new(
            move |value: Value| -> BoxFuture<'static, Validation> {
                let fut = validate(value);
                Box::pin(async move { fut.await.into() })
            },
        )));
        self
    }

    /// Predicate deciding whether the option may be set at all
    pub fn allowed<F>(mut self, allowed: F) -> Self
    where
        F: Fn(&Options) -> bool + Send + Sync + 'static,
    {
        self.allowed = Some(Arc::new(allowed));
        self
    }

    /// Value assigned when the option is not allowed
    pub fn when_prohibited(mut self, value: impl Into<Value>) -> Self {
        self.when_prohibited = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn flag_kind(&self) -> FlagKind {
        self.kind.flag_kind()
    }

    pub fn short_alias(&self) -> Option<char> {
        self.alias
    }

    pub fn help(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Prompt text; falls back to the description, then the name
    pub fn prompt_message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or(&self.name)
    }

    pub fn default_answer(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub fn prohibited_value(&self) -> Option<&Value> {
        self.when_prohibited.as_ref()
    }

    /// Evaluate the allowed predicate; no predicate means allowed
    pub fn is_allowed(&self, options: &Options) -> bool {
        self.allowed.as_ref().map_or(true, |allowed| allowed(options))
    }

    /// Command-line flag for this option.
    ///
    /// Boolean flags take an optional `=true|false` so `--name` alone means true.
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone()).long(self.name.clone());
        if let Some(short) = self.alias {
            arg = arg.short(short);
        }
        if let Some(help) = &self.description {
            arg = arg.help(help.clone());
        }

        match self.flag_kind() {
            FlagKind::String => arg
                .action(ArgAction::Set)
                .value_name("VALUE")
                .value_parser(value_parser!(String)),
            FlagKind::Boolean => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(value_parser!(bool)),
        }
    }
}

impl fmt::Debug for OptionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionPrompt")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("alias", &self.alias)
            .field("description", &self.description)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("validator", &self.validator)
            .field("allowed", &self.allowed.as_ref().map(|_| ".."))
            .field("when_prohibited", &self.when_prohibited)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneratorError;
    use serde_json::json;

    #[test]
    fn test_with_type_rejects_unknown_kind() {
        let err = OptionPrompt::with_type("license", "list").unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedPromptType(k) if k == "list"));
    }

    #[test]
    fn test_with_type_accepts_confirm() {
        let prompt = OptionPrompt::with_type("test", "confirm").unwrap();
        assert_eq!(prompt.kind(), PromptKind::Confirm);
        assert_eq!(prompt.flag_kind(), FlagKind::Boolean);
    }

    #[test]
    fn test_prompt_message_fallbacks() {
        assert_eq!(OptionPrompt::input("name").prompt_message(), "name");
        assert_eq!(
            OptionPrompt::input("name")
                .description("Package name")
                .prompt_message(),
            "Package name"
        );
        assert_eq!(
            OptionPrompt::input("name")
                .description("Package name")
                .message("What is the package name?")
                .prompt_message(),
            "What is the package name?"
        );
    }

    #[test]
    fn test_allowed_defaults_to_true() {
        let options = Options::new();
        assert!(OptionPrompt::confirm("lint").is_allowed(&options));

        let gated = OptionPrompt::confirm("coverage")
            .allowed(|opts| opts.get("test") == Some(&json!(true)));
        assert!(!gated.is_allowed(&options));

        let mut options = Options::new();
        options.insert("test".to_string(), json!(true));
        assert!(gated.is_allowed(&options));
    }

    #[test]
    fn test_string_flag_parses_value() {
        let prompt = OptionPrompt::input("name").alias('n');
        let matches = clap::Command::new("gen")
            .arg(prompt.to_arg())
            .try_get_matches_from(["gen", "-n", "my-lib"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("name").map(String::as_str),
            Some("my-lib")
        );
    }

    #[test]
    fn test_boolean_flag_forms() {
        let command = clap::Command::new("gen").arg(OptionPrompt::confirm("lint").to_arg());

        let matches = command
            .clone()
            .try_get_matches_from(["gen", "--lint"])
            .unwrap();
        assert_eq!(matches.get_one::<bool>("lint"), Some(&true));

        let matches = command
            .clone()
            .try_get_matches_from(["gen", "--lint=false"])
            .unwrap();
        assert_eq!(matches.get_one::<bool>("lint"), Some(&false));

        let matches = command.try_get_matches_from(["gen"]).unwrap();
        assert_eq!(matches.get_one::<bool>("lint"), None);
    }
}
