//! Sequential resolution of registered option prompts

use crate::error::{GeneratorError, Result};
use crate::generator::Generator;
use crate::prompter::{Prompter, Question};
use serde_json::Value;

/// Resolve the generator's option prompts in registration order.
///
/// For each prompt: a disallowed option takes its prohibited value (or is
/// removed when none is configured); an allowed option already present in
/// the options bag keeps its value; anything else is asked through
/// `prompter`. Allowed options are then validated and the first failure
/// ends resolution.
pub async fn resolve_options(generator: &mut Generator, prompter: &mut dyn Prompter) -> Result<()> {
    let prompts = generator.option_prompts().to_vec();

    for prompt in &prompts {
        let name = prompt.name();

        if !prompt.is_allowed(generator.options()) {
            match prompt.prohibited_value() {
                Some(value) => {
                    generator
                        .options_mut()
                        .insert(name.to_string(), value.clone());
                }
                None => {
                    generator.options_mut().remove(name);
                }
            }
            tracing::debug!(option = name, "option not allowed, using prohibited value");
            continue;
        }

        if generator.options().contains_key(name) {
            tracing::trace!(option = name, "option already set, skipping prompt");
        } else {
            let default = match prompt.default_answer() {
                Some(default) => Some(default.resolve(generator).await.map_err(|source| {
                    GeneratorError::DefaultValue {
                        name: name.to_string(),
                        source,
                    }
                })?),
                None => None,
            };

            let question = Question {
                name,
                kind: prompt.kind(),
                message: prompt.prompt_message(),
                default: default.as_ref(),
                validator: prompt.validator(),
            };
            let answer = prompter.ask(&question).map_err(GeneratorError::Prompt)?;
            generator.options_mut().insert(name.to_string(), answer);
        }

        if let Some(validator) = prompt.validator() {
            let value = generator.option(name).cloned().unwrap_or(Value::Null);
            if let Some(message) = validator.check(&value).await.error_message(name, &value) {
                tracing::debug!(option = name, %message, "option failed validation");
                return Err(GeneratorError::Validation(message));
            }
        }
    }

    Ok(())
}
