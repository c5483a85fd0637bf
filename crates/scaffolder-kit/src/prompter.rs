//! The seam between option resolution and the user

use crate::options::{display_value, is_truthy, PromptKind, Validator};
use serde_json::Value;
use std::io;

/// One question asked during option resolution
#[derive(Debug, Clone)]
pub struct Question<'a> {
    pub name: &'a str,
    pub kind: PromptKind,
    pub message: &'a str,
    /// Already-resolved default answer
    pub default: Option<&'a Value>,
    pub validator: Option<&'a Validator>,
}

/// Asks questions and returns the answer as JSON.
///
/// `input` answers are strings, `confirm` answers are booleans.
pub trait Prompter {
    fn ask(&mut self, question: &Question<'_>) -> io::Result<Value>;
}

/// Non-interactive prompter that answers every question with its default.
///
/// Defaults are coerced to the answer type of the question, so `--yes`
/// yields the same types as an interactive run. Questions without a
/// default get an empty string or `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask(&mut self, question: &Question<'_>) -> io::Result<Value> {
        Ok(match question.kind {
            PromptKind::Input => {
                Value::String(question.default.map(display_value).unwrap_or_default())
            }
            PromptKind::Confirm => Value::Bool(question.default.is_some_and(is_truthy)),
        })
    }
}
