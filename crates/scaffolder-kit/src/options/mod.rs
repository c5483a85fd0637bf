//! Option/prompt hybrids
//!
//! - [`OptionPrompt`]: descriptor of a value that comes from a flag or a prompt
//! - [`PromptKind`] / [`FlagKind`]: the closed prompt-to-flag mapping
//! - [`Validation`] / [`Validator`]: validator outcomes
//! - [`flags`]: clap integration
//! - [`resolve`]: the sequential resolution loop

pub mod flags;
pub mod kind;
pub mod prompt;
pub mod resolve;
pub mod validation;

pub use kind::{FlagKind, PromptKind};
pub use prompt::{DefaultValue, OptionPrompt, Options};
pub use validation::{display_value, is_truthy, Validation, Validator};
