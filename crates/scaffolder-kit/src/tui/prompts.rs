//! Charm-style generator driver using cliclack

use crate::error::GeneratorError;
use crate::generator::Generator;
use crate::options::validation::SyncValidateFn;
use crate::options::{display_value, is_truthy, PromptKind, Validator};
use crate::product::GeneratorDefinition;
use crate::prompter::{DefaultsPrompter, Prompter, Question};
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use serde_json::Value;
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

const DESTINATION_ARG: &str = "destination";
const TEMPLATE_DIR_ARG: &str = "template-dir";
const YES_ARG: &str = "yes";

/// Flag names and short aliases owned by the driver
const RESERVED_NAMES: &[&str] = &[DESTINATION_ARG, TEMPLATE_DIR_ARG, YES_ARG, "help", "version"];
const RESERVED_SHORTS: &[char] = &['y', 'h', 'V'];

/// Prompter backed by cliclack inline prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn ask(&mut self, question: &Question<'_>) -> io::Result<Value> {
        match question.kind {
            PromptKind::Input => {
                let mut input = cliclack::input(question.message).required(false);

                if let Some(default) = question.default {
                    let default = display_value(default);
                    input = input.placeholder(&default).default_input(&default);
                }

                // Let the user correct the answer before the final validation
                if let Some(validate) = question.validator.and_then(Validator::as_sync) {
                    let name = question.name.to_string();
                    input = input.validate(move |answer: &String| -> Result<(), String> {
                        check_answer(&*validate, &name, answer)
                    });
                }

                let answer: String = input.interact()?;
                Ok(Value::String(answer))
            }
            PromptKind::Confirm => {
                let initial = question.default.is_some_and(is_truthy);
                let answer: bool = cliclack::confirm(question.message)
                    .initial_value(initial)
                    .interact()?;
                Ok(Value::Bool(answer))
            }
        }
    }
}

/// Run a sync validator against a typed answer, yielding the inline error text
fn check_answer(validate: &SyncValidateFn, name: &str, answer: &str) -> Result<(), String> {
    let value = Value::String(answer.to_string());
    match validate(&value).error_message(name, &value) {
        Some(message) => Err(message),
        None => Ok(()),
    }
}

/// Resolve `.` and `..` without touching the filesystem
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Whether `run` already reported this error through an outro.
///
/// Binaries use this to avoid printing the same message twice.
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<GeneratorError>()
        .is_some_and(GeneratorError::is_validation)
}

/// Settings owned by the driver rather than the generator
#[derive(Debug, Clone)]
struct RunSettings {
    destination: PathBuf,
    template_dir: PathBuf,
    yes: bool,
}

impl RunSettings {
    fn from_matches<D: GeneratorDefinition>(definition: &D, matches: &ArgMatches) -> Result<Self> {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let destination = match matches.get_one::<PathBuf>(DESTINATION_ARG) {
            Some(dir) => normalize_path(&current_dir.join(dir)),
            None => current_dir,
        };

        // --template-dir wins over the environment, which wins over the default
        let template_dir = match matches.get_one::<PathBuf>(TEMPLATE_DIR_ARG) {
            Some(dir) => dir.clone(),
            None => match std::env::var_os(definition.template_dir_env()) {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => definition.default_template_dir(),
            },
        };

        if !template_dir.is_dir() {
            anyhow::bail!("Template directory does not exist: {}", template_dir.display());
        }

        Ok(Self {
            destination,
            template_dir,
            yes: matches.get_flag(YES_ARG),
        })
    }
}

/// Base command with the driver's own flags
fn base_command<D: GeneratorDefinition>(definition: &D) -> Command {
    Command::new(definition.name())
        .about(definition.description())
        .arg(
            Arg::new(DESTINATION_ARG)
                .long(DESTINATION_ARG)
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory to generate the project in (defaults to the current directory)"),
        )
        .arg(
            Arg::new(TEMPLATE_DIR_ARG)
                .long(TEMPLATE_DIR_ARG)
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Local directory to use for templates (for development use)"),
        )
        .arg(
            Arg::new(YES_ARG)
                .short('y')
                .long(YES_ARG)
                .action(ArgAction::SetTrue)
                .help("Answer every prompt with its default (non-interactive mode)"),
        )
}

fn check_reserved(generator: &Generator) -> Result<()> {
    for prompt in generator.option_prompts() {
        if RESERVED_NAMES.contains(&prompt.name()) {
            anyhow::bail!("Option '{}' conflicts with a built-in flag", prompt.name());
        }
        if let Some(short) = prompt.short_alias() {
            if RESERVED_SHORTS.contains(&short) {
                anyhow::bail!(
                    "Alias '-{}' of option '{}' conflicts with a built-in flag",
                    short,
                    prompt.name()
                );
            }
        }
    }
    Ok(())
}

/// Run a generator: register, parse flags, prompt, write, show next steps.
///
/// `args` are the raw command-line arguments including the program name.
/// Help, version and parse errors exit the process the way clap does.
/// A failed validation is shown as a cancelled outro; see [`is_reported`].
pub async fn run<D, I, T>(definition: &D, args: I) -> Result<()>
where
    D: GeneratorDefinition,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut generator = Generator::new(".", definition.default_template_dir());
    definition.initializing(&mut generator)?;
    check_reserved(&generator)?;

    let matches = generator
        .command(base_command(definition))
        .get_matches_from(args);
    let settings = RunSettings::from_matches(definition, &matches)?;

    generator.set_destination_root(&settings.destination);
    generator.set_template_root(&settings.template_dir);
    generator.apply_flags(&matches);

    cliclack::intro(definition.display_name())?;
    check_destination(&settings.destination, settings.yes)?;

    let resolved = if settings.yes {
        generator.prompting(&mut DefaultsPrompter).await
    } else {
        generator.prompting(&mut CliclackPrompter).await
    };
    if let Err(e) = resolved {
        if e.is_validation() {
            cliclack::outro_cancel(e.to_string())?;
        }
        return Err(e.into());
    }

    write_project(definition, &generator)?;
    print_next_steps(definition, &generator)?;

    Ok(())
}

/// Warn when the destination already has files
fn check_destination(path: &Path, yes: bool) -> Result<()> {
    cliclack::log::info(format!("Using directory: {}", path.display()))?;

    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(())
}

fn write_project<D: GeneratorDefinition>(definition: &D, generator: &Generator) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Writing project...");

    match definition.writing(generator) {
        Ok(()) => {
            spinner.stop(format!(
                "Created {} in {}",
                definition.display_name(),
                generator.destination_root().display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Failed to write project");
            Err(e).context("Could not write the project")
        }
    }
}

fn print_next_steps<D: GeneratorDefinition>(definition: &D, generator: &Generator) -> Result<()> {
    let steps = definition.next_steps(generator);

    if !steps.is_empty() {
        println!();
        println!("  {}", "Next steps".bold());
        println!();

        for (i, step) in steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step.cyan());
        }
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
