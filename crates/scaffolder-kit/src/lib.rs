//! Scaffolder Kit - Option/prompt hybrids and JSON helpers for project generators
//!
//! This library lets a scaffolding tool declare options that can be given as
//! command-line flags or, when absent, asked interactively, with the same
//! validation applied either way. It also provides the file helpers most
//! JavaScript/TypeScript generators need: deep-merging `package.json` and
//! `tsconfig.json`, chaining and reordering scripts, and rendering templates.
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - JSON merge strategies, script operations,
//!   template copying, option descriptors and flag mapping
//! - **Layer 2: Generator** - [`Generator`] owns the options bag and runs the
//!   prompt resolution loop through a [`Prompter`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompter and
//!   lifecycle driver (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter and [`run`]
//!
//! # Example Usage
//!
//! ```ignore
//! use scaffolder_kit::{Generator, OptionPrompt};
//!
//! let mut generator = Generator::new("/work/my-lib", "/templates/ts-lib");
//! generator.register_option_prompts([
//!     OptionPrompt::input("name")
//!         .alias('n')
//!         .default_with(|g| g.destination_name().into()),
//!     OptionPrompt::confirm("test").default_value(true),
//! ])?;
//! generator.prompting(&mut scaffolder_kit::DefaultsPrompter).await?;
//! generator.extend_package_json(&serde_json::json!({ "files": ["dist"] }))?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod json;
pub mod options;
pub mod product;
pub mod prompter;
pub mod runtime;
pub mod scripts;
pub mod template;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{GeneratorError, Result};
pub use generator::{Generator, PACKAGE_JSON, TSCONFIG_JSON};
pub use json::{AppendScript, ConcatArrays, MergeStrategy, PrependScript};
pub use options::{FlagKind, OptionPrompt, Options, PromptKind, Validation};
pub use product::GeneratorDefinition;
pub use prompter::{DefaultsPrompter, Prompter, Question};
pub use runtime::{detect_package_manager, git_user_name, PackageManager};

#[cfg(feature = "tui")]
pub use tui::{is_reported, run};
