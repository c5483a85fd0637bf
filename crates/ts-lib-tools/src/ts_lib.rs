//! TypeScript library generator definition

use anyhow::{Context, Result};
use scaffolder_kit::config::load_definitions;
use scaffolder_kit::options::is_truthy;
use scaffolder_kit::{
    detect_package_manager, git_user_name, Generator, GeneratorDefinition, OptionPrompt,
};
use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// Option prompts declared in YAML, resolved after `name` and `author`
const OPTION_DEFINITIONS: &str = include_str!("options.yaml");

/// Scripts listed first in the generated package.json, in this order
const SCRIPT_ORDER: &[&str] = &["build", "test", "coverage", "lint"];

/// Maximum length npm accepts for a package name
const MAX_PACKAGE_NAME_LEN: usize = 214;

/// TypeScript library generator
#[derive(Clone)]
pub struct TsLibGenerator;

impl GeneratorDefinition for TsLibGenerator {
    fn name(&self) -> &'static str {
        "create-ts-lib"
    }

    fn display_name(&self) -> &'static str {
        "TypeScript library"
    }

    fn description(&self) -> &'static str {
        "CLI for scaffolding TypeScript libraries"
    }

    fn default_template_dir(&self) -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates/ts-lib"))
    }

    fn template_dir_env(&self) -> &'static str {
        "TS_LIB_TEMPLATE_DIR"
    }

    fn initializing(&self, generator: &mut Generator) -> Result<()> {
        let name = OptionPrompt::input("name")
            .alias('n')
            .description("Package name")
            .message("What is the package name?")
            .default_with(|generator: &Generator| Value::String(generator.destination_name()))
            .validate(|value: &Value| validate_package_name(value.as_str().unwrap_or_default()));

        let author = OptionPrompt::input("author")
            .alias('a')
            .description("Package author")
            .message("Who is the author?")
            .default_async(|_: &Generator| async {
                Ok(Value::String(git_user_name().await.unwrap_or_default()))
            });

        generator.register_option_prompts([name, author])?;
        generator.register_option_prompts(
            load_definitions(OPTION_DEFINITIONS).context("Invalid built-in option definitions")?,
        )?;
        Ok(())
    }

    fn writing(&self, generator: &Generator) -> Result<()> {
        let enabled = |name: &str| generator.option(name).is_some_and(is_truthy);

        generator.copy_template("base", ".", None)?;

        if enabled("test") {
            generator.copy_template("test", "test", None)?;
            generator.extend_package_json(&json!({
                "devDependencies": { "vitest": "^2.1.0" }
            }))?;
            generator.extend_tsconfig(&json!({ "include": ["test"] }))?;
            generator.add_scripts(&scripts(&[("test", "vitest run")]), false)?;
        }

        if enabled("coverage") {
            generator.extend_package_json(&json!({
                "devDependencies": { "@vitest/coverage-v8": "^2.1.0" }
            }))?;
            generator.add_scripts(&scripts(&[("coverage", "vitest run --coverage")]), false)?;
        }

        if enabled("lint") {
            generator.extend_package_json(&json!({
                "devDependencies": { "eslint": "^9.12.0", "typescript-eslint": "^8.8.0" }
            }))?;
            // Lint before compiling so a failing lint stops the build
            generator.add_scripts(
                &scripts(&[("lint", "eslint src"), ("build", "npm run lint")]),
                true,
            )?;
        }

        generator.sort_scripts(SCRIPT_ORDER)?;
        tracing::debug!(destination = %generator.destination_root().display(), "library written");
        Ok(())
    }

    fn next_steps(&self, generator: &Generator) -> Vec<String> {
        let manager = detect_package_manager();
        let mut steps = Vec::new();

        // Step 1: cd to directory if not current
        if std::env::current_dir().ok().as_deref() != Some(generator.destination_root()) {
            steps.push(format!("cd {}", generator.destination_root().display()));
        }

        steps.push(manager.install_command());
        steps.push(manager.run_command("build"));

        if generator.option("test").is_some_and(is_truthy) {
            steps.push(manager.run_command("test"));
        }

        steps
    }
}

fn scripts(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(name, command)| (name.to_string(), Value::String(command.to_string())))
        .collect()
}

/// Check a name against the npm package naming rules
pub fn validate_package_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Package name cannot be empty".to_string());
    }
    if name.len() > MAX_PACKAGE_NAME_LEN {
        return Err(format!(
            "Package name cannot be longer than {} characters",
            MAX_PACKAGE_NAME_LEN
        ));
    }

    let bare = match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, bare)) if !scope.is_empty() && !scope.contains('/') => {
                check_segment(scope)?;
                bare
            }
            _ => return Err(format!("'{}' is not a valid scoped package name", name)),
        },
        None => name,
    };

    if bare.is_empty() || bare.contains('/') {
        return Err(format!("'{}' is not a valid package name", name));
    }
    if bare.starts_with('.') || bare.starts_with('_') {
        return Err("Package name cannot start with a period or an underscore".to_string());
    }
    check_segment(bare)
}

fn check_segment(segment: &str) -> Result<(), String> {
    if segment.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Package name must be lowercase".to_string());
    }
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || "-._~".contains(c);
    match segment.chars().find(|&c| !allowed(c)) {
        Some(c) => Err(format!("Package name cannot contain '{}'", c)),
        None => Ok(()),
    }
}
