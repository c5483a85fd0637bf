//! The generator object: roots, options bag, registered option prompts and
//! the file helpers used while writing a project

use crate::error::{GeneratorError, Result};
use crate::json::{self, ConcatArrays, MergeStrategy};
use crate::options::{flags, resolve, OptionPrompt, Options};
use crate::prompter::Prompter;
use crate::scripts;
use crate::template;
use clap::{ArgMatches, Command};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Package manifest file name
pub const PACKAGE_JSON: &str = "package.json";

/// Compiler configuration file name
pub const TSCONFIG_JSON: &str = "tsconfig.json";

/// State of a single generator run
#[derive(Debug)]
pub struct Generator {
    destination_root: PathBuf,
    template_root: PathBuf,
    options: Options,
    option_prompts: Vec<OptionPrompt>,
}

impl Generator {
    pub fn new(destination_root: impl Into<PathBuf>, template_root: impl Into<PathBuf>) -> Self {
        Self {
            destination_root: destination_root.into(),
            template_root: template_root.into(),
            options: Options::new(),
            option_prompts: Vec::new(),
        }
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn set_destination_root(&mut self, root: impl Into<PathBuf>) {
        self.destination_root = root.into();
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn set_template_root(&mut self, root: impl Into<PathBuf>) {
        self.template_root = root.into();
    }

    /// Final path segment of the destination root
    pub fn destination_name(&self) -> String {
        self.destination_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn destination_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.destination_root.join(relative)
    }

    pub fn template_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.template_root.join(relative)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Register option prompts for this run.
    ///
    /// Every generator definition must call this from its initializing step;
    /// nothing is registered implicitly. Prompts are resolved in the order
    /// they are registered.
    pub fn register_option_prompts<I>(&mut self, prompts: I) -> Result<()>
    where
        I: IntoIterator<Item = OptionPrompt>,
    {
        let mut seen: HashSet<String> = self
            .option_prompts
            .iter()
            .map(|p| p.name().to_string())
            .collect();

        let prompts: Vec<OptionPrompt> = prompts.into_iter().collect();
        for prompt in &prompts {
            if !seen.insert(prompt.name().to_string()) {
                return Err(GeneratorError::DuplicateOption(prompt.name().to_string()));
            }
        }

        tracing::debug!(count = prompts.len(), "registered option prompts");
        self.option_prompts.extend(prompts);
        Ok(())
    }

    pub fn option_prompts(&self) -> &[OptionPrompt] {
        &self.option_prompts
    }

    /// `command` extended with one flag per registered option prompt
    pub fn command(&self, command: Command) -> Command {
        flags::augment_command(command, &self.option_prompts)
    }

    /// Copy the registered flags present in `matches` into the options bag
    pub fn apply_flags(&mut self, matches: &ArgMatches) {
        flags::apply_matches(&self.option_prompts, matches, &mut self.options);
    }

    /// Resolve every registered option, prompting for the missing ones.
    ///
    /// Fails with [`GeneratorError::Validation`] on the first value that does
    /// not pass its validator.
    pub async fn prompting(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        resolve::resolve_options(self, prompter).await
    }

    /// Render `from` (relative to the template root) into `to` (relative to
    /// the destination root). `data` defaults to the options bag.
    pub fn copy_template(
        &self,
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
        data: Option<&Value>,
    ) -> Result<Vec<PathBuf>> {
        let data = match data {
            Some(data) => data.clone(),
            None => Value::Object(self.options.clone()),
        };
        template::copy_template(&self.template_path(from), &self.destination_path(to), &data)
    }

    /// Deep-merge `contents` into the JSON file at `path` (relative to the
    /// destination root) and write it back. A missing file counts as `{}`.
    pub fn extend_json(
        &self,
        path: impl AsRef<Path>,
        contents: &Value,
        strategy: &dyn MergeStrategy,
    ) -> Result<Value> {
        let path = self.destination_path(path);
        let mut document = Value::Object(json::read_json_object(&path)?);
        match (&mut document, contents) {
            (Value::Object(target), Value::Object(source)) => {
                json::merge_into(target, source, strategy)
            }
            (document, contents) => *document = contents.clone(),
        }
        json::write_json(&path, &document)?;
        Ok(document)
    }

    /// [`extend_json`](Self::extend_json) on `package.json`, concatenating arrays
    pub fn extend_package_json(&self, contents: &Value) -> Result<Value> {
        self.extend_json(PACKAGE_JSON, contents, &ConcatArrays)
    }

    /// [`extend_json`](Self::extend_json) on `tsconfig.json`, concatenating arrays
    pub fn extend_tsconfig(&self, contents: &Value) -> Result<Value> {
        self.extend_json(TSCONFIG_JSON, contents, &ConcatArrays)
    }

    /// Merge scripts into `package.json`, chaining commands for names that
    /// already exist
    pub fn add_scripts(&self, new_scripts: &Map<String, Value>, prepend: bool) -> Result<Value> {
        let path = self.destination_path(PACKAGE_JSON);
        let mut manifest = json::read_json_object(&path)?;
        scripts::add_scripts(&mut manifest, new_scripts, prepend);

        let manifest = Value::Object(manifest);
        json::write_json(&path, &manifest)?;
        Ok(manifest)
    }

    /// Reorder `package.json` scripts so the given names come first.
    /// Leaves the file untouched when it has no scripts.
    pub fn sort_scripts<S: AsRef<str>>(&self, order: &[S]) -> Result<()> {
        let path = self.destination_path(PACKAGE_JSON);
        let mut manifest = json::read_json_object(&path)?;
        if scripts::sort_manifest_scripts(&mut manifest, order) {
            json::write_json(&path, &Value::Object(manifest))?;
        }
        Ok(())
    }
}
