//! Generator definition trait for CLI binaries
//!
//! Each scaffolding tool implements this trait to describe its identity,
//! where its templates live, which option prompts it registers and what it
//! writes.

use crate::generator::Generator;
use anyhow::Result;
use std::path::PathBuf;

/// Lifecycle of a generator run, driven by [`crate::tui::run`]:
///
/// 1. [`initializing`](Self::initializing): register option prompts
/// 2. flags are parsed into the options bag
/// 3. missing options are prompted for and every option is validated
/// 4. [`writing`](Self::writing): produce the project files
/// 5. [`next_steps`](Self::next_steps) are shown
pub trait GeneratorDefinition: Send + Sync + 'static {
    /// Internal name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn description(&self) -> &'static str;

    /// Template directory used when no override is given
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Register the generator's option prompts.
    ///
    /// Implementations must call [`Generator::register_option_prompts`]
    /// here; prompts registered later are neither exposed as flags nor
    /// resolved.
    fn initializing(&self, generator: &mut Generator) -> Result<()>;

    /// Write the project using the resolved options
    fn writing(&self, generator: &Generator) -> Result<()>;

    /// Instructions shown after the project is written
    fn next_steps(&self, generator: &Generator) -> Vec<String>;
}
