//! Option block parser.
//!
//! Turns the body of a signature, a run of `{...}` tokens, into an ordered
//! list of [`CommandOption`]s. Each token follows the grammar
//!
//! ```text
//! {<sigil?><name><suffix?> : <description> [| {<nested>} ...]}
//! ```
//!
//! - **sigil**: `#` hidden, `^` shared (also accepted right after the colon)
//! - **name**: a flag (`--long`, `--l|long`, optional `=default`) or a bare
//!   positional/sub-command name
//! - **suffix**: `?` optional, `*` multiple, `?*` optional and multiple
//! - **nested**: further tokens, one level deep, used for a sub-command's own
//!   flags
//!
//! Parsing is total: malformed tokens degrade to a best-effort record.
//!
//! [`CommandOption`]: signature_core::CommandOption

mod flags;
mod sigils;
pub(crate) mod util;

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use signature_core::CommandOption;

pub use flags::{FlagParts, normalize_alias, parse_flag};
pub use sigils::{classify_sigils, strip_sigils};

/// Regex patterns for parsing signature bodies.
static PATTERNS: LazyLock<TokenPatterns> = LazyLock::new(TokenPatterns::new);

struct TokenPatterns {
    // A `{...}` group whose body may hold `{...}` groups without braces of their own
    group: Regex,
    // Names made only of these characters are not marked required
    plain_name: Regex,
}

impl TokenPatterns {
    fn new() -> Self {
        // All regexes here are compile-time constants. An expect() failure indicates
        // a programmer error in the pattern, not a runtime condition.
        Self {
            group: Regex::new(r"\{((?:[^{}]|\{[^{}]*\})*)\}").expect("static regex must compile"),
            plain_name: Regex::new(r"^[a-zA-Z0-9_|-]+$").expect("static regex must compile"),
        }
    }
}

/// Parses every top-level `{...}` token of `block`, in source order.
///
/// Text outside of groups is ignored.
///
/// # Examples
///
/// ```
/// use signature_compiler::parse_options;
///
/// let opts = parse_options("{name : does thing} {--a|api : API mode}");
/// assert_eq!(opts.len(), 2);
/// assert_eq!(opts[0].name, "name");
/// assert_eq!(opts[0].description, "does thing");
/// assert!(opts[0].required);
/// assert_eq!(opts[1].flags.as_deref(), Some(&["-a".to_string(), "--api".to_string()][..]));
/// ```
pub fn parse_options(block: &str) -> Vec<CommandOption> {
    PATTERNS
        .group
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|body| parse_token(body.as_str()))
        .collect()
}

/// Parses the body of a single token (without its outer braces).
pub fn parse_token(raw: &str) -> CommandOption {
    let sigils = classify_sigils(raw);
    let content = strip_sigils(raw);

    let Some((name_part, rest)) = util::split_top_level(&content, ':') else {
        trace!(token = %content.trim(), "Bare token without description");
        return CommandOption::new(content.trim()).with_sigils(sigils);
    };

    let (description, nested_options) = match util::split_top_level(rest, '|') {
        Some((description, nested)) => {
            let nested = parse_options(nested);
            (description, (!nested.is_empty()).then_some(nested))
        }
        None => (rest, None),
    };

    // Checked on the untrimmed text, so `{name : x}` counts as required.
    let mut required = !PATTERNS.plain_name.is_match(name_part);
    let mut multiple = false;
    let mut name = name_part.trim();

    if let Some(stripped) = name.strip_suffix("?*") {
        name = stripped;
        required = false;
        multiple = true;
    } else if let Some(stripped) = name.strip_suffix('*') {
        name = stripped;
        multiple = true;
    } else if let Some(stripped) = name.strip_suffix('?') {
        name = stripped;
        required = false;
    }

    let mut option = CommandOption {
        name: name.to_string(),
        required,
        multiple,
        description: description.trim().to_string(),
        is_flag: name.starts_with("--"),
        nested_options,
        ..Default::default()
    }
    .with_sigils(sigils);

    if option.is_flag {
        let parts = parse_flag(name, required);
        option.name = parts.name();
        option.default_value = parts.default_value;
        option.flags = Some(parts.aliases);
    }

    trace!(
        name = %option.name,
        flag = option.is_flag,
        required = option.required,
        multiple = option.multiple,
        hidden = option.is_hidden,
        shared = option.shared,
        "Parsed signature token"
    );
    option
}

#[cfg(test)]
mod tests {
    use signature_core::DefaultValue;

    use super::*;

    #[test]
    fn test_trivial_option() {
        let opts = parse_options("{name : does thing}");
        assert_eq!(opts.len(), 1);
        let opt = &opts[0];
        assert_eq!(opt.name, "name");
        assert_eq!(opt.description, "does thing");
        assert!(!opt.is_flag);
        assert!(opt.required);
        assert!(!opt.multiple);
        assert!(opt.flags.is_none());
    }

    #[test]
    fn test_suffix_modifiers() {
        let opts = parse_options("{a?* : x} {b* : x} {c? : x}");
        assert_eq!((opts[0].required, opts[0].multiple), (false, true));
        assert_eq!((opts[1].required, opts[1].multiple), (true, true));
        assert_eq!((opts[2].required, opts[2].multiple), (false, false));
        assert_eq!(opts[0].name, "a");
        assert_eq!(opts[1].name, "b");
        assert_eq!(opts[2].name, "c");
    }

    #[test]
    fn test_clean_name_without_space_is_not_required() {
        let opts = parse_options("{--force: Overwrite}");
        assert!(!opts[0].required);
        assert_eq!(opts[0].name, "force");
    }

    #[test]
    fn test_flag_aliases() {
        let opt = &parse_options("{--a|api : x}")[0];
        assert!(opt.is_flag);
        assert_eq!(
            opt.flags,
            Some(vec!["-a".to_string(), "--api".to_string()])
        );
        assert_eq!(opt.name, "api");
        assert_eq!(opt.canonical_flag(), Some("--api"));
    }

    #[test]
    fn test_default_coercion() {
        let opts = parse_options("{--l|type=ts : x} {--force=true : x} {--count=3 : x}");
        assert_eq!(
            opts[0].default_value,
            Some(DefaultValue::String("ts".into()))
        );
        assert_eq!(opts[1].default_value, Some(DefaultValue::Bool(true)));
        assert_eq!(opts[2].default_value, Some(DefaultValue::Number(3.0)));
    }

    #[test]
    fn test_nested_options() {
        let opts = parse_options(
            "{controller : Generate a controller | {--a|api : API} {--r|resource? : Resource}} {model : m}",
        );
        assert_eq!(opts.len(), 2);
        assert_eq!(opts[0].description, "Generate a controller");
        let nested = opts[0].nested();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].name, "api");
        assert_eq!(nested[1].name, "resource");
        assert!(!nested[1].required);
        assert!(opts[1].nested_options.is_none());
    }

    #[test]
    fn test_nested_tokens_keep_their_sigils() {
        let opt = &parse_options("{^controller : c | {^--force : f} {#--debug : d}}")[0];
        assert!(opt.shared);
        assert!(opt.nested()[0].shared);
        assert!(opt.nested()[1].is_hidden);
    }

    #[test]
    fn test_pipe_without_groups_yields_no_nested() {
        let opt = &parse_options("{name : a | b}")[0];
        assert_eq!(opt.description, "a");
        assert!(opt.nested_options.is_none());
    }

    #[test]
    fn test_bare_token_without_colon() {
        let opt = &parse_options("{#name}")[0];
        assert_eq!(opt.name, "name");
        assert!(opt.is_hidden);
        assert!(opt.description.is_empty());
        assert!(!opt.is_flag);
        assert!(opt.flags.is_none());
    }

    #[test]
    fn test_malformed_flag_degrades() {
        let opt = &parse_options("{-- : nothing}")[0];
        assert!(opt.is_flag);
        assert_eq!(opt.flags, Some(vec!["--".to_string()]));
        assert_eq!(opt.name, "");
    }

    #[test]
    fn test_text_outside_groups_is_ignored() {
        assert!(parse_options("no groups here").is_empty());
        assert_eq!(parse_options("junk {a : x} junk").len(), 1);
    }
}
