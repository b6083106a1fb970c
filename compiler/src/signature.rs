//! Signature compilation.
//!
//! A signature is a base line followed by a body of `{...}` tokens:
//!
//! ```text
//! make:
//!     {controller : Generate a controller | {--a|api : API controller}}
//!     {^--force : Overwrite existing files}
//! ```
//!
//! A base line ending in `:` declares a namespace command whose non-flag
//! tokens become sub-commands. Any other base line declares a plain command
//! whose tokens are its flags and positional arguments.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use signature_core::{CommandManifest, ParsedCommand};

use crate::parser::{classify_sigils, parse_options};

// Everything outside word characters, `=`, `:` and `-` is dropped from the base line.
static BASE_LINE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w=:-]").expect("static regex must compile"));

/// Compiles one signature into a [`ParsedCommand`].
///
/// `description` is taken verbatim from the caller; the signature body never
/// contributes to it. Compilation never fails: missing structure yields a
/// partial command.
///
/// # Examples
///
/// ```
/// use signature_compiler::parse_signature;
///
/// let cmd = parse_signature("make:\n {controller : c}\n {^--force : f}", "Generators");
/// assert!(cmd.is_namespace_command);
/// assert_eq!(cmd.base_command, "make");
/// assert_eq!(cmd.sub_command_names(), vec!["controller"]);
/// assert_eq!(cmd.options()[0].name, "force");
/// assert!(cmd.options()[0].shared);
/// ```
pub fn parse_signature(signature: &str, description: &str) -> ParsedCommand {
    let lines: Vec<&str> = signature
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let first = lines.first().copied().unwrap_or_default();
    // Tokens written on the base line itself are treated as body text.
    let (base_line, inline_body) = match first.find('{') {
        Some(idx) => (first[..idx].trim_end(), &first[idx..]),
        None => (first, ""),
    };

    let sigils = classify_sigils(base_line);
    let mut base_command = BASE_LINE_NOISE.replace_all(base_line, "").into_owned();
    let is_namespace_command = base_command.ends_with(':');

    let mut body_lines = Vec::with_capacity(lines.len());
    if !inline_body.is_empty() {
        body_lines.push(inline_body);
    }
    body_lines.extend(lines.iter().skip(1).copied());
    let all_options = parse_options(&body_lines.join(" "));

    let mut command = ParsedCommand {
        description: (!description.is_empty()).then(|| description.to_string()),
        is_hidden: sigils.hidden || sigils.shared,
        is_namespace_command,
        ..Default::default()
    };

    if is_namespace_command {
        base_command.pop();
        let (flags, others): (Vec<_>, Vec<_>) =
            all_options.into_iter().partition(|opt| opt.flags.is_some());
        command.sub_commands = Some(others.into_iter().filter(|opt| !opt.is_hidden).collect());
        command.options = Some(flags);
    } else {
        command.options = Some(all_options);
    }
    command.base_command = base_command;

    debug!(
        command = %command.base_command,
        namespace = command.is_namespace_command,
        hidden = command.is_hidden,
        sub_commands = command.sub_commands().len(),
        options = command.options().len(),
        "Compiled signature"
    );
    command
}

/// Compiles every active manifest entry, paired with its handler name.
///
/// Entries whose handler is listed in the manifest's `exclude` are skipped.
pub fn compile_manifest(manifest: &CommandManifest) -> Vec<(ParsedCommand, String)> {
    manifest
        .active_commands()
        .map(|entry| {
            (
                parse_signature(&entry.signature, &entry.description),
                entry.handler_name(),
            )
        })
        .collect()
}
