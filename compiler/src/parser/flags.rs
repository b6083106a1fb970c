//! Flag alias splitting and default-value extraction.

use signature_core::DefaultValue;

/// Aliases and default extracted from a flag token name such as
/// `--l|type=ts`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagParts {
    /// Dash-normalized aliases in source order; the last one is canonical.
    pub aliases: Vec<String>,
    pub default_value: Option<DefaultValue>,
}

impl FlagParts {
    /// Canonical alias with its leading dashes removed.
    pub fn name(&self) -> String {
        self.aliases
            .last()
            .map(|alias| alias.trim_start_matches('-').to_string())
            .unwrap_or_default()
    }
}

/// Splits a flag name on `|` and pulls out any `=default`.
///
/// `required` only matters for an empty default: `{--x= : d}` on an
/// optional token coerces to `false`.
///
/// # Examples
///
/// ```
/// use signature_compiler::parser::parse_flag;
/// use signature_core::DefaultValue;
///
/// let parts = parse_flag("--l|type=ts", true);
/// assert_eq!(parts.aliases, vec!["-l", "--type"]);
/// assert_eq!(parts.default_value, Some(DefaultValue::String("ts".into())));
/// assert_eq!(parts.name(), "type");
/// ```
pub fn parse_flag(name: &str, required: bool) -> FlagParts {
    let mut aliases = Vec::new();
    let mut default_value = None;

    for part in name.split('|') {
        match part.split_once('=') {
            Some((alias, raw)) => {
                aliases.push(normalize_alias(alias));
                default_value = Some(DefaultValue::coerce(raw.trim(), required));
            }
            None => aliases.push(normalize_alias(part)),
        }
    }

    FlagParts {
        aliases,
        default_value,
    }
}

/// Normalizes the dash prefix of one alias.
///
/// Dashed one-character aliases get a single dash, longer ones a double
/// dash. A bare one-character alias keeps no dash. Aliases made only of
/// dashes, or with three or more, are returned as-is.
///
/// # Examples
///
/// ```
/// use signature_compiler::parser::normalize_alias;
///
/// assert_eq!(normalize_alias("--a"), "-a");
/// assert_eq!(normalize_alias("-api"), "--api");
/// assert_eq!(normalize_alias("api"), "--api");
/// assert_eq!(normalize_alias("--api"), "--api");
/// ```
pub fn normalize_alias(alias: &str) -> String {
    let alias = alias.trim();
    let body = alias.trim_start_matches('-');
    let dashes = alias.len() - body.len();
    let is_long = body.chars().count() > 1;

    // bare one-character aliases are left as written
    if body.is_empty() || dashes > 2 || (dashes == 0 && !is_long) {
        return alias.to_string();
    }
    if is_long {
        format!("--{body}")
    } else {
        format!("-{body}")
    }
}
