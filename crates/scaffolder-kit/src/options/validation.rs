//! Validator outcomes and the validator wrapper stored on each option

use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Outcome of running a validator against a resolved value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Rejected without an explanation; a generic message is generated
    Invalid,
    /// Rejected with an explicit message shown to the user
    Message(String),
}

impl Validation {
    /// Error message for this outcome, or `None` when the value is valid.
    ///
    /// An empty message counts as a bare rejection.
    pub fn error_message(self, name: &str, value: &Value) -> Option<String> {
        match self {
            Validation::Valid => None,
            Validation::Message(message) if !message.is_empty() => Some(message),
            Validation::Invalid | Validation::Message(_) => Some(format!(
                "Invalid {} option '{}'",
                name,
                display_value(value)
            )),
        }
    }
}

impl From<bool> for Validation {
    fn from(valid: bool) -> Self {
        if valid {
            Validation::Valid
        } else {
            Validation::Invalid
        }
    }
}

impl From<String> for Validation {
    fn from(message: String) -> Self {
        Validation::Message(message)
    }
}

impl From<&str> for Validation {
    fn from(message: &str) -> Self {
        Validation::Message(message.to_string())
    }
}

impl<E: ToString> From<Result<(), E>> for Validation {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Validation::Valid,
            Err(e) => Validation::Message(e.to_string()),
        }
    }
}

pub type SyncValidateFn = dyn Fn(&Value) -> Validation + Send + Sync;
pub type AsyncValidateFn = dyn Fn(Value) -> BoxFuture<'static, Validation> + Send + Sync;

/// Validator attached to an option prompt
#[derive(Clone)]
pub enum Validator {
    Sync(Arc<SyncValidateFn>),
    Async(Arc<AsyncValidateFn>),
}

impl Validator {
    pub async fn check(&self, value: &Value) -> Validation {
        match self {
            Validator::Sync(f) => f(value),
            Validator::Async(f) => f(value.clone()).await,
        }
    }

    /// The synchronous validator, if any. Only these can run inside a prompt.
    pub fn as_sync(&self) -> Option<Arc<SyncValidateFn>> {
        match self {
            Validator::Sync(f) => Some(Arc::clone(f)),
            Validator::Async(_) => None,
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Sync(_) => f.write_str("Validator::Sync(..)"),
            Validator::Async(_) => f.write_str("Validator::Async(..)"),
        }
    }
}

/// Render a value the way it appears in user-facing messages
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose truthiness used by declarative `requires` rules
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
