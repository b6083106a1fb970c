//! Output formatting for compiled commands and dispatch trees.

use serde::Serialize;

use signature_core::{CommandEntry, CommandOption, DispatchTree, ParsedCommand};

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a compiled command in the requested output format.
pub fn format_command(command: &ParsedCommand, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(command)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(command).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(command_to_markdown(command)),
        OutputFormat::Table => Ok(command_to_table(command)),
    }
}

/// Formats a dispatch tree in the requested output format.
pub fn format_tree<H: Serialize>(
    tree: &DispatchTree<H>,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tree)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(tree).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(tree_to_markdown(tree)),
        OutputFormat::Table => Ok(tree_to_table(tree)),
    }
}

fn option_label(option: &CommandOption) -> String {
    match &option.flags {
        Some(flags) => flags.join(", "),
        None => option.name.clone(),
    }
}

fn option_markers(option: &CommandOption) -> String {
    let mut markers = Vec::new();
    if option.required {
        markers.push("required");
    }
    if option.multiple {
        markers.push("multiple");
    }
    if option.shared {
        markers.push("shared");
    }
    if option.is_hidden {
        markers.push("hidden");
    }
    markers.join(", ")
}

fn push_option_rows(out: &mut String, options: &[CommandOption]) {
    out.push_str("| Token | Flags | Description |\n");
    out.push_str("|-------|-------|-------------|\n");
    for option in options {
        out.push_str(&format!(
            "| `{}` | {} | {} |\n",
            option_label(option),
            option_markers(option),
            option.description
        ));
        for nested in option.nested() {
            out.push_str(&format!(
                "| &nbsp;&nbsp;`{}` | {} | {} |\n",
                option_label(nested),
                option_markers(nested),
                nested.description
            ));
        }
    }
    out.push('\n');
}

fn command_to_markdown(command: &ParsedCommand) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", command.base_command));

    if let Some(ref desc) = command.description {
        out.push_str(&format!("{desc}\n\n"));
    }

    let kind = if command.is_namespace_command {
        "namespace"
    } else {
        "command"
    };
    out.push_str(&format!("**Kind:** {kind}\n\n"));
    if command.is_hidden {
        out.push_str("**Hidden:** yes\n\n");
    }

    if !command.sub_commands().is_empty() {
        out.push_str("## Sub-commands\n\n");
        push_option_rows(&mut out, command.sub_commands());
    }

    if !command.options().is_empty() {
        out.push_str("## Options\n\n");
        push_option_rows(&mut out, command.options());
    }

    out
}

fn command_to_table(command: &ParsedCommand) -> String {
    let mut out = String::new();

    out.push_str(&format!("Command: {}", command.base_command));
    if command.is_namespace_command {
        out.push_str("  (namespace)");
    }
    out.push('\n');

    if let Some(ref desc) = command.description {
        out.push_str(&format!("  {desc}\n"));
    }

    for (title, options) in [
        ("Sub-commands", command.sub_commands()),
        ("Options", command.options()),
    ] {
        if options.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{title}:\n"));
        let width = options
            .iter()
            .map(|o| option_label(o).len())
            .max()
            .unwrap_or(4);
        for option in options {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                option_label(option),
                option.description,
                width = width
            ));
        }
    }

    out
}

fn entry_to_markdown<H>(out: &mut String, entry: &CommandEntry<H>, level: usize) {
    out.push_str(&format!("{} {}\n\n", "#".repeat(level), entry.name));

    if let Some(ref desc) = entry.description {
        out.push_str(&format!("{desc}\n\n"));
    }
    if entry.hidden {
        out.push_str("**Hidden:** yes\n\n");
    }

    if !entry.arguments.is_empty() {
        out.push_str("| Argument | Required | Description |\n");
        out.push_str("|----------|----------|-------------|\n");
        for arg in &entry.arguments {
            let required = if arg.required { "yes" } else { "no" };
            out.push_str(&format!(
                "| `{}` | {required} | {} |\n",
                arg.spec, arg.description
            ));
        }
        out.push('\n');
    }

    if !entry.flags.is_empty() {
        out.push_str("| Flag | Default | Description |\n");
        out.push_str("|------|---------|-------------|\n");
        for flag in &entry.flags {
            let default = flag
                .default_value
                .as_ref()
                .map(|v| v.display())
                .unwrap_or_default();
            out.push_str(&format!(
                "| `{}` | {default} | {} |\n",
                flag.spec, flag.description
            ));
        }
        out.push('\n');
    }

    for child in &entry.sub_commands {
        entry_to_markdown(out, child, level + 1);
    }
}

fn tree_to_markdown<H>(tree: &DispatchTree<H>) -> String {
    let mut out = String::new();
    for entry in &tree.commands {
        entry_to_markdown(&mut out, entry, 1);
    }
    out
}

fn tree_to_table<H>(tree: &DispatchTree<H>) -> String {
    let mut rows: Vec<(String, String)> = Vec::new();
    for entry in &tree.commands {
        rows.push((entry_usage(entry), entry.description.clone().unwrap_or_default()));
        for child in &entry.sub_commands {
            rows.push((
                format!("  {}", entry_usage(child)),
                child.description.clone().unwrap_or_default(),
            ));
        }
    }

    let width = rows.iter().map(|(usage, _)| usage.len()).max().unwrap_or(4);
    let mut out = String::new();
    for (usage, desc) in rows {
        out.push_str(&format!("{usage:<width$}  {desc}\n", width = width));
    }
    out
}

fn entry_usage<H>(entry: &CommandEntry<H>) -> String {
    let mut usage = entry.name.clone();
    for arg in &entry.arguments {
        usage.push(' ');
        usage.push_str(&arg.spec);
    }
    if !entry.flags.is_empty() {
        usage.push_str(" [options]");
    }
    usage
}
