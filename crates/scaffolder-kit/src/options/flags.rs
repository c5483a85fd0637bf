//! Exposing option prompts as command-line flags

use super::kind::FlagKind;
use super::prompt::{OptionPrompt, Options};
use clap::{ArgMatches, Command};
use serde_json::Value;

/// Add one flag per option prompt to `command`
pub fn augment_command(command: Command, prompts: &[OptionPrompt]) -> Command {
    prompts
        .iter()
        .fold(command, |command, prompt| command.arg(prompt.to_arg()))
}

/// Copy every flag present in `matches` into the options bag.
///
/// Flags that were not given are left out so the prompt can fire later.
pub fn apply_matches(prompts: &[OptionPrompt], matches: &ArgMatches, options: &mut Options) {
    for prompt in prompts {
        let name = prompt.name();
        let value = match prompt.flag_kind() {
            FlagKind::String => matches
                .try_get_one::<String>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.clone())),
            FlagKind::Boolean => matches
                .try_get_one::<bool>(name)
                .ok()
                .flatten()
                .map(|v| Value::Bool(*v)),
        };

        if let Some(value) = value {
            tracing::debug!(option = name, "option supplied by flag");
            options.insert(name.to_string(), value);
        }
    }
}
