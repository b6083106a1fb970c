//! Compiled command validation.
//!
//! The compiler itself is total: it never rejects a signature. These checks
//! are opt-in and catch structural problems a command author probably did
//! not intend, such as two commands claiming the same top-level name or a
//! flag alias made only of dashes.
//!
//! # Examples
//!
//! ```
//! use signature_core::*;
//!
//! let cmd = ParsedCommand::new("serve");
//! assert!(validate_command(&cmd).is_empty());
//!
//! // Two commands with the same name
//! let errors = validate_commands(&[ParsedCommand::new("serve"), ParsedCommand::new("serve")]);
//! assert_eq!(errors, vec![ValidationError::DuplicateCommand("serve".into())]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandOption, ParsedCommand};

/// Command validation errors.
///
/// Each variant describes a specific structural problem. The `Display` impl
/// provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Base line contained no usable characters.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Two commands resolve to the same top-level name.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
    /// A token inside the named command has an empty name.
    #[error("empty option name in command: {0}")]
    EmptyOptionName(String),
    /// A flag alias has no characters after its dashes.
    #[error("invalid flag alias: {0}")]
    InvalidFlagAlias(String),
    /// A nested option declares options of its own.
    #[error("options nested more than one level deep at: {0}")]
    NestedTooDeep(String),
}

/// Validates a full set of compiled commands.
///
/// Every command is checked individually, and each top-level name claimed
/// more than once is reported at its repeat. All problems are collected.
pub fn validate_commands(commands: &[ParsedCommand]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for command in commands {
        errors.extend(validate_command(command));
        if !seen.insert(command.base_command.as_str()) {
            errors.push(ValidationError::DuplicateCommand(
                command.base_command.clone(),
            ));
        }
    }

    errors
}

/// Validates a single compiled command.
///
/// # Examples
///
/// ```
/// use signature_core::*;
///
/// let mut cmd = ParsedCommand::new("make");
/// let mut bad = CommandOption::new("");
/// bad.is_flag = true;
/// bad.flags = Some(vec!["--".into()]);
/// cmd.options = Some(vec![bad]);
///
/// let errors = validate_command(&cmd);
/// assert_eq!(
///     errors,
///     vec![
///         ValidationError::EmptyOptionName("make".into()),
///         ValidationError::InvalidFlagAlias("--".into()),
///     ]
/// );
/// ```
pub fn validate_command(command: &ParsedCommand) -> Vec<ValidationError> {
    if command.base_command.trim().is_empty() {
        return vec![ValidationError::EmptyCommandName];
    }

    let mut errors = Vec::new();
    let mut path = vec![command.base_command.clone()];
    validate_options(command.sub_commands(), &mut path, &mut errors);
    validate_options(command.options(), &mut path, &mut errors);
    errors
}

fn validate_options(
    options: &[CommandOption],
    path: &mut Vec<String>,
    errors: &mut Vec<ValidationError>,
) {
    for option in options {
        if option.name.trim().is_empty() {
            errors.push(ValidationError::EmptyOptionName(path.join(":")));
        }

        if let Some(flags) = &option.flags {
            errors.extend(
                flags
                    .iter()
                    .filter(|alias| alias.trim_start_matches('-').is_empty())
                    .map(|alias| ValidationError::InvalidFlagAlias(alias.clone())),
            );
        }

        // path holds the command; one more segment means we are inside a nested block
        if path.len() > 1 && !option.nested().is_empty() {
            errors.push(ValidationError::NestedTooDeep(format!(
                "{}:{}",
                path.join(":"),
                option.name
            )));
            continue;
        }

        path.push(option.name.clone());
        validate_options(option.nested(), path, errors);
        path.pop();
    }
}
