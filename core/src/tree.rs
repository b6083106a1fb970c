//! Dispatch tree value objects.
//!
//! A [`DispatchTree`] is the registration plan handed to a CLI front-end:
//! top-level commands in registration order, each with its flags, positional
//! arguments and (for namespace commands) `namespace:sub` children. Every
//! entry carries a typed handler reference `H`, so dispatch is a lookup
//! resolved once at build time rather than a dynamic property access.

use serde::{Deserialize, Serialize};

use crate::DefaultValue;

/// A flag as it should be registered with the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagRegistration {
    /// Logical name (canonical alias without dashes).
    pub name: String,
    /// Dash-normalized aliases, canonical last.
    pub aliases: Vec<String>,
    /// Rendered alias spec, e.g. `-a, --api <api>`.
    pub spec: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    pub required: bool,
    pub multiple: bool,
    pub hidden: bool,
}

/// A positional argument as it should be registered with the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRegistration {
    pub name: String,
    /// Rendered spec, `<name>` when required, `[name]` otherwise.
    pub spec: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    pub required: bool,
    pub multiple: bool,
}

/// One registrable command.
///
/// Top-level entries have `sub_command == None`; children of a namespace
/// command are named `namespace:sub` and record `sub` in
/// [`sub_command`](CommandEntry::sub_command).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "H: Deserialize<'de>"))]
pub struct CommandEntry<H> {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_command: Option<String>,
    pub flags: Vec<FlagRegistration>,
    pub arguments: Vec<ArgumentRegistration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_commands: Vec<CommandEntry<H>>,
    pub handler: H,
}

impl<H> CommandEntry<H> {
    /// Finds a flag by logical name or alias.
    pub fn find_flag(&self, name: &str) -> Option<&FlagRegistration> {
        self.flags
            .iter()
            .find(|f| f.name == name || f.aliases.iter().any(|a| a == name))
    }

    /// Finds a positional argument by name.
    pub fn find_argument(&self, name: &str) -> Option<&ArgumentRegistration> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Finds a direct child by its short (`sub`) or full (`ns:sub`) name.
    pub fn find_sub_command(&self, name: &str) -> Option<&CommandEntry<H>> {
        self.sub_commands
            .iter()
            .find(|c| c.name == name || c.sub_command.as_deref() == Some(name))
    }

    /// Names of the direct children in registration order.
    pub fn sub_command_names(&self) -> Vec<&str> {
        self.sub_commands.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Result of resolving a command name against a [`DispatchTree`].
///
/// `sub_command` is the logical sub-command name the handler should run, or
/// `None` when the top-level command itself was invoked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route<'a, H> {
    pub entry: &'a CommandEntry<H>,
    pub handler: &'a H,
    pub sub_command: Option<&'a str>,
}

/// The complete registration plan for one process.
///
/// # Examples
///
/// ```
/// use signature_core::{CommandEntry, DispatchTree};
///
/// let child = CommandEntry {
///     name: "make:controller".to_string(),
///     description: None,
///     hidden: false,
///     sub_command: Some("controller".to_string()),
///     flags: Vec::new(),
///     arguments: Vec::new(),
///     sub_commands: Vec::new(),
///     handler: "make",
/// };
/// let parent = CommandEntry {
///     name: "make".to_string(),
///     description: None,
///     hidden: false,
///     sub_command: None,
///     flags: Vec::new(),
///     arguments: Vec::new(),
///     sub_commands: vec![child],
///     handler: "make",
/// };
/// let tree = DispatchTree::new(vec![parent]);
///
/// let route = tree.route("make:controller").unwrap();
/// assert_eq!(*route.handler, "make");
/// assert_eq!(route.sub_command, Some("controller"));
/// assert_eq!(tree.command_names(), vec!["make", "make:controller"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchTree<H> {
    pub commands: Vec<CommandEntry<H>>,
}

impl<H> Default for DispatchTree<H> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<H> DispatchTree<H> {
    pub fn new(commands: Vec<CommandEntry<H>>) -> Self {
        Self { commands }
    }

    /// Finds an entry by full name, either `command` or `namespace:sub`.
    pub fn find(&self, name: &str) -> Option<&CommandEntry<H>> {
        if let Some(top) = self.commands.iter().find(|c| c.name == name) {
            return Some(top);
        }
        let (namespace, _) = name.split_once(':')?;
        self.commands
            .iter()
            .find(|c| c.name == namespace)?
            .sub_commands
            .iter()
            .find(|c| c.name == name)
    }

    /// Resolves a name to its handler and logical sub-command.
    pub fn route(&self, name: &str) -> Option<Route<'_, H>> {
        let entry = self.find(name)?;
        Some(Route {
            entry,
            handler: &entry.handler,
            sub_command: entry.sub_command.as_deref(),
        })
    }

    /// Every registrable name, parents followed by their children.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for command in &self.commands {
            names.push(command.name.as_str());
            names.extend(command.sub_commands.iter().map(|c| c.name.as_str()));
        }
        names
    }

    /// Number of registrable entries, children included.
    pub fn len(&self) -> usize {
        self.commands
            .iter()
            .map(|c| 1 + c.sub_commands.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
