//! Flag and argument materialization.
//!
//! Turns a parsed [`CommandOption`] into what a front-end registers: a flag
//! with a rendered alias spec such as `-a, --api <api>`, or a positional
//! argument rendered as `<name>` / `[name]`.

use signature_core::{ArgumentRegistration, CommandOption, FlagRegistration};

/// A materialized option.
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Flag(FlagRegistration),
    Argument(ArgumentRegistration),
}

/// Materializes `option` as a flag or a positional argument.
///
/// `placeholder` is only used for flags; see [`normalize_flag`].
pub fn materialize(option: &CommandOption, placeholder: Option<&str>) -> Registration {
    if option.is_flag {
        Registration::Flag(normalize_flag(option, placeholder))
    } else {
        Registration::Argument(normalize_argument(option))
    }
}

/// Renders one alias as `-x` (one character) or `--long`.
pub fn render_alias(alias: &str) -> String {
    let body = alias.trim_start_matches('-');
    match body.chars().count() {
        0 => alias.to_string(),
        1 => format!("-{body}"),
        _ => format!("--{body}"),
    }
}

/// Builds the flag registration for `option`.
///
/// Aliases are joined with `, `. A supplied `placeholder` is appended
/// verbatim; otherwise a required flag gets `<type>`, where `type` is the
/// option name without dashes.
///
/// # Examples
///
/// ```
/// use signature_compiler::{normalize::normalize_flag, parse_options};
///
/// let opt = &parse_options("{--a|api : API controller}")[0];
/// assert_eq!(normalize_flag(opt, None).spec, "-a, --api <api>");
///
/// let opt = &parse_options("{--force: Overwrite}")[0];
/// assert_eq!(normalize_flag(opt, None).spec, "--force");
/// ```
pub fn normalize_flag(option: &CommandOption, placeholder: Option<&str>) -> FlagRegistration {
    let aliases = option
        .flags
        .clone()
        .unwrap_or_else(|| vec![format!("--{}", option.name)]);

    let mut spec = aliases
        .iter()
        .map(|alias| render_alias(alias))
        .collect::<Vec<_>>()
        .join(", ");
    match placeholder {
        Some(text) => {
            spec.push(' ');
            spec.push_str(text);
        }
        None if option.required => {
            spec.push_str(&format!(" <{}>", option.name.replace('-', "")));
        }
        None => {}
    }

    FlagRegistration {
        name: option.name.clone(),
        aliases,
        spec,
        description: option.description.clone(),
        default_value: option.default_value.clone(),
        required: option.required,
        multiple: option.multiple,
        hidden: option.is_hidden,
    }
}

/// Builds the positional-argument registration for `option`.
///
/// # Examples
///
/// ```
/// use signature_compiler::{normalize::normalize_argument, parse_options};
///
/// let opts = parse_options("{name : Name} {path? : Path} {files?* : Files}");
/// assert_eq!(normalize_argument(&opts[0]).spec, "<name>");
/// assert_eq!(normalize_argument(&opts[1]).spec, "[path]");
/// assert_eq!(normalize_argument(&opts[2]).spec, "[files...]");
/// ```
pub fn normalize_argument(option: &CommandOption) -> ArgumentRegistration {
    let variadic = if option.multiple { "..." } else { "" };
    let spec = if option.required {
        format!("<{}{variadic}>", option.name)
    } else {
        format!("[{}{variadic}]", option.name)
    };

    ArgumentRegistration {
        name: option.name.clone(),
        spec,
        description: option.description.clone(),
        default_value: option.default_value.clone(),
        required: option.required,
        multiple: option.multiple,
    }
}

/// Placeholder the tree builder supplies for multi-valued flags.
pub fn variadic_placeholder(option: &CommandOption) -> Option<String> {
    if !option.is_flag || !option.multiple {
        return None;
    }
    let value = option.name.replace('-', "");
    Some(if option.required {
        format!("<{value}...>")
    } else {
        format!("[{value}...]")
    })
}
