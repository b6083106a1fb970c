//! Signature model type definitions.
//!
//! This module defines the data contracts produced by the signature compiler:
//! one [`CommandOption`] per `{...}` token of a signature body, and one
//! [`ParsedCommand`] per compiled signature. The types are designed for
//! serialization with [`serde`] so a compiled model can be dumped as JSON or
//! YAML and handed to a CLI front-end.

use serde::{Deserialize, Serialize};

/// Version of the compiled-model contract (semver).
///
/// Embedded in serialized manifests and dispatch trees to track
/// compatibility across releases.
pub const MODEL_CONTRACT_VERSION: &str = "1.0.0";

/// Default value attached to a flag through a trailing `=value`.
///
/// Serialized untagged, so `{--count=3}` renders as `3` and `{--force=true}`
/// as `true` in JSON/YAML output.
///
/// # Examples
///
/// ```
/// use signature_core::DefaultValue;
///
/// assert_eq!(DefaultValue::coerce("true", true), DefaultValue::Bool(true));
/// assert_eq!(DefaultValue::coerce("3", true), DefaultValue::Number(3.0));
/// assert_eq!(DefaultValue::coerce("*", true), DefaultValue::List(Vec::new()));
/// assert_eq!(DefaultValue::coerce("ts", true), DefaultValue::String("ts".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean default (`=true`, `=false`, or an empty value on an optional flag).
    Bool(bool),
    /// Numeric default (`=3`, `=0.5`).
    Number(f64),
    /// Array default (`=*`), always empty at parse time.
    List(Vec<String>),
    /// Any other raw text.
    String(String),
}

impl DefaultValue {
    /// Coerces the raw text after `=` into a typed default.
    ///
    /// Rules are applied in order: `*` is an empty list, `true`/`false` are
    /// booleans, a finite number is a number, an empty value on an optional
    /// token is `false`, anything else stays a string.
    pub fn coerce(raw: &str, required: bool) -> Self {
        match raw {
            "*" => Self::List(Vec::new()),
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            "" if !required => Self::Bool(false),
            _ => match parse_number(raw) {
                Some(n) => Self::Number(n),
                None => Self::String(raw.to_string()),
            },
        }
    }

    /// Renders the value the way it would appear in help text.
    pub fn display(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::List(items) => format!("[{}]", items.join(", ")),
            Self::String(s) => s.clone(),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Rust accepts "inf"/"nan" spellings; only digit-based literals count here.
    if !trimmed
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Visibility/sharing classification of a raw token or base line.
///
/// `#` marks a token hidden, `^` marks it shared. The two are exclusive:
/// shared takes precedence, so `hidden && shared` never holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sigils {
    /// Token is omitted from listings.
    pub hidden: bool,
    /// Token is inherited by every sibling sub-command.
    pub shared: bool,
}

/// One parsed `{...}` token of a signature body.
///
/// A token is either a flag (its raw name starts with `--`) or a positional
/// argument / sub-command name. Flags carry their dash-normalized aliases in
/// [`flags`](CommandOption::flags); the last alias is canonical and `name`
/// holds it with the dashes stripped.
///
/// # Examples
///
/// ```
/// use signature_core::CommandOption;
///
/// let opt = CommandOption::new("controller").with_description("Generate a controller");
/// assert_eq!(opt.name, "controller");
/// assert!(!opt.is_flag);
/// assert_eq!(opt.attribute("description").as_deref(), Some("Generate a controller"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Logical identifier.
    pub name: String,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Whether the option accepts several values.
    pub multiple: bool,
    /// Free text following the name's colon.
    pub description: String,
    /// Dash-normalized aliases, present only for flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
    /// Raw name started with `--`.
    pub is_flag: bool,
    /// Omitted from listings.
    pub is_hidden: bool,
    /// Inherited by sibling sub-commands.
    pub shared: bool,
    /// Coerced `=value` default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    /// Tokens declared after `| { ... }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_options: Option<Vec<CommandOption>>,
}

impl CommandOption {
    /// Creates a bare token with only a name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Applies a sigil classification.
    pub fn with_sigils(mut self, sigils: Sigils) -> Self {
        self.is_hidden = sigils.hidden;
        self.shared = sigils.shared;
        self
    }

    /// Returns the canonical dashed alias (e.g. `--api`) for flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use signature_core::CommandOption;
    ///
    /// let mut opt = CommandOption::new("api");
    /// opt.is_flag = true;
    /// opt.flags = Some(vec!["-a".into(), "--api".into()]);
    /// assert_eq!(opt.canonical_flag(), Some("--api"));
    /// assert_eq!(CommandOption::new("name").canonical_flag(), None);
    /// ```
    pub fn canonical_flag(&self) -> Option<&str> {
        self.flags.as_ref()?.last().map(String::as_str)
    }

    /// Checks whether `alias` names this flag (with or without dashes).
    pub fn matches(&self, alias: &str) -> bool {
        if self.name == alias.trim_start_matches('-') && !alias.is_empty() {
            return true;
        }
        self.flags
            .as_ref()
            .is_some_and(|flags| flags.iter().any(|f| f == alias))
    }

    /// Looks up a named attribute, used when resolving `[key]` placeholders.
    ///
    /// Every field of the token is addressable, by its camelCase or
    /// snake_case name: `name`, `description`, `required`, `multiple`,
    /// `flags`, `isFlag`, `isHidden`, `shared`, `defaultValue` and
    /// `nestedOptions` (the nested names). Flags are joined with `, `.
    /// Unknown keys, absent fields and empty values yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use signature_core::{CommandOption, DefaultValue};
    ///
    /// let mut opt = CommandOption::new("port").with_description("Port");
    /// opt.default_value = Some(DefaultValue::Number(8000.0));
    /// assert_eq!(opt.attribute("defaultValue").as_deref(), Some("8000"));
    /// assert_eq!(opt.attribute("default_value").as_deref(), Some("8000"));
    /// assert_eq!(opt.attribute("required").as_deref(), Some("false"));
    /// assert_eq!(opt.attribute("flags"), None);
    /// assert_eq!(opt.attribute("unknown"), None);
    /// ```
    pub fn attribute(&self, key: &str) -> Option<String> {
        let value = match key {
            "name" => Some(self.name.clone()),
            "description" => Some(self.description.clone()),
            "required" => Some(self.required.to_string()),
            "multiple" => Some(self.multiple.to_string()),
            "flags" => self.flags.as_ref().map(|flags| flags.join(", ")),
            "isFlag" | "is_flag" => Some(self.is_flag.to_string()),
            "isHidden" | "is_hidden" => Some(self.is_hidden.to_string()),
            "shared" => Some(self.shared.to_string()),
            "defaultValue" | "default_value" => {
                self.default_value.as_ref().map(DefaultValue::display)
            }
            "nestedOptions" | "nested_options" => self.nested_options.as_ref().map(|nested| {
                nested
                    .iter()
                    .map(|opt| opt.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Nested tokens, or an empty slice.
    pub fn nested(&self) -> &[CommandOption] {
        self.nested_options.as_deref().unwrap_or(&[])
    }
}

/// Compiled signature for one command.
///
/// A namespace command (base line ending in `:`) splits its body into
/// [`sub_commands`](ParsedCommand::sub_commands) and flag
/// [`options`](ParsedCommand::options); a plain command keeps every token in
/// `options`.
///
/// # Examples
///
/// ```
/// use signature_core::{CommandOption, ParsedCommand};
///
/// let mut cmd = ParsedCommand::new("make");
/// cmd.is_namespace_command = true;
/// cmd.sub_commands = Some(vec![CommandOption::new("controller")]);
///
/// assert_eq!(cmd.sub_command_names(), vec!["controller"]);
/// assert!(cmd.find_sub_command("controller").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Command name with sigils and the namespace colon removed.
    pub base_command: String,
    /// Caller-supplied description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base line carried a hidden sigil.
    pub is_hidden: bool,
    /// Base line ended in `:`.
    pub is_namespace_command: bool,
    /// Visible non-flag tokens of a namespace command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_commands: Option<Vec<CommandOption>>,
    /// Flags of a namespace command, or every token of a plain command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
}

impl ParsedCommand {
    /// Creates an empty plain command.
    pub fn new(base_command: &str) -> Self {
        Self {
            base_command: base_command.to_string(),
            ..Default::default()
        }
    }

    /// Sub-command tokens, or an empty slice.
    pub fn sub_commands(&self) -> &[CommandOption] {
        self.sub_commands.as_deref().unwrap_or(&[])
    }

    /// Option tokens, or an empty slice.
    pub fn options(&self) -> &[CommandOption] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Names of all sub-command tokens in source order.
    pub fn sub_command_names(&self) -> Vec<&str> {
        self.sub_commands().iter().map(|s| s.name.as_str()).collect()
    }

    /// Finds a sub-command token by name.
    pub fn find_sub_command(&self, name: &str) -> Option<&CommandOption> {
        self.sub_commands().iter().find(|s| s.name == name)
    }

    /// Finds an option token by name or alias.
    pub fn find_option(&self, name: &str) -> Option<&CommandOption> {
        self.options().iter().find(|o| o.matches(name))
    }
}
