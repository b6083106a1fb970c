//! Dispatch tree assembly.
//!
//! [`DispatchTreeBuilder`] collects one [`ParsedCommand`] per registered
//! command and turns the whole set into a [`DispatchTree`]:
//!
//! - a plain command becomes one entry whose flags and arguments are its
//!   deduplicated options;
//! - a namespace command becomes a parent entry carrying its deduplicated
//!   flags, plus one `namespace:sub` child per non-shared sub-command. Each
//!   child receives the shared sub-commands, then the shared flags, then its
//!   own nested options, deduplicated by name with earlier sources winning;
//! - `[key]` placeholders in a child's descriptions resolve against that
//!   child's sub-command token.
//!
//! Building is a pure function of the registered commands, so building twice
//! yields equal trees.
//!
//! # Example
//!
//! ```
//! use signature_compiler::{DispatchTreeBuilder, parse_signature};
//!
//! let mut builder = DispatchTreeBuilder::new();
//! builder
//!     .register(
//!         parse_signature(
//!             "make:\n {controller : Generate a controller | {--a|api : API}}\n {^--force : Overwrite [name]}",
//!             "Generators",
//!         ),
//!         "make",
//!     )
//!     .unwrap();
//!
//! let tree = builder.build();
//! assert_eq!(tree.command_names(), vec!["make", "make:controller"]);
//!
//! let child = tree.find("make:controller").unwrap();
//! let names: Vec<_> = child.flags.iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(names, vec!["force", "api"]);
//! assert_eq!(child.flags[0].description, "Overwrite controller");
//! ```

use tracing::{debug, warn};

use signature_core::{
    CommandEntry, CommandManifest, CommandOption, DispatchTree, ParsedCommand, dedup_by_name,
    merge_option_sets,
};

use crate::error::{BuildError, Result};
use crate::normalize::{Registration, materialize, variadic_placeholder};
use crate::placeholder::substitute;
use crate::signature::compile_manifest;

/// Accumulates compiled commands and assembles the dispatch tree.
///
/// `H` is the handler reference stored on every entry, typically an enum of
/// handler variants or a handler name.
#[derive(Debug, Clone)]
pub struct DispatchTreeBuilder<H> {
    commands: Vec<(ParsedCommand, H)>,
    strict: bool,
}

impl<H> Default for DispatchTreeBuilder<H> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            strict: false,
        }
    }
}

impl<H: Clone> DispatchTreeBuilder<H> {
    /// Creates an empty, lenient builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode a second command with an existing top-level name is
    /// rejected instead of replacing the earlier one.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Registers a compiled command with its handler.
    ///
    /// When the name is already registered, the later registration replaces
    /// the earlier one in place (keeping its position), unless the builder
    /// is strict.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateCommand`] in strict mode when the
    /// name is taken.
    pub fn register(&mut self, parsed: ParsedCommand, handler: H) -> Result<&mut Self> {
        let existing = self
            .commands
            .iter()
            .position(|(command, _)| command.base_command == parsed.base_command);

        match existing {
            Some(_) if self.strict => {
                return Err(BuildError::DuplicateCommand(parsed.base_command));
            }
            Some(index) => {
                warn!(command = %parsed.base_command, "Command registered twice; later registration wins");
                self.commands[index] = (parsed, handler);
            }
            None => self.commands.push((parsed, handler)),
        }
        Ok(self)
    }

    /// Compiles a signature and registers it.
    pub fn register_signature(
        &mut self,
        signature: &str,
        description: &str,
        handler: H,
    ) -> Result<&mut Self> {
        self.register(
            crate::parse_signature(signature, description),
            handler,
        )
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Assembles the dispatch tree.
    pub fn build(&self) -> DispatchTree<H> {
        let commands = self
            .commands
            .iter()
            .map(|(parsed, handler)| {
                if parsed.is_namespace_command {
                    build_namespace(parsed, handler)
                } else {
                    build_plain(parsed, handler)
                }
            })
            .collect();
        DispatchTree::new(commands)
    }
}

impl DispatchTreeBuilder<String> {
    /// Builds a builder from a manifest, using handler names as references.
    ///
    /// The manifest's `strict` setting carries over to the builder.
    pub fn from_manifest(manifest: &CommandManifest) -> Result<Self> {
        let mut builder = Self::new().strict(manifest.strict);
        for (parsed, handler) in compile_manifest(manifest) {
            builder.register(parsed, handler)?;
        }
        Ok(builder)
    }
}

fn empty_entry<H: Clone>(name: String, handler: &H) -> CommandEntry<H> {
    CommandEntry {
        name,
        description: None,
        hidden: false,
        sub_command: None,
        flags: Vec::new(),
        arguments: Vec::new(),
        sub_commands: Vec::new(),
        handler: handler.clone(),
    }
}

fn attach<H>(entry: &mut CommandEntry<H>, options: &[CommandOption], context: Option<&CommandOption>) {
    for option in options {
        let placeholder = variadic_placeholder(option);
        let mut registration = materialize(option, placeholder.as_deref());
        if let Some(context) = context {
            match &mut registration {
                Registration::Flag(flag) => flag.description = substitute(&flag.description, context),
                Registration::Argument(arg) => arg.description = substitute(&arg.description, context),
            }
        }
        match registration {
            Registration::Flag(flag) => entry.flags.push(flag),
            Registration::Argument(arg) => entry.arguments.push(arg),
        }
    }
}

fn build_plain<H: Clone>(parsed: &ParsedCommand, handler: &H) -> CommandEntry<H> {
    let mut entry = empty_entry(parsed.base_command.clone(), handler);
    entry.description = parsed.description.clone();
    entry.hidden = parsed.is_hidden;
    attach(&mut entry, &dedup_by_name(parsed.options()), None);

    debug!(
        command = %entry.name,
        flags = entry.flags.len(),
        arguments = entry.arguments.len(),
        "Registered command"
    );
    entry
}

fn build_namespace<H: Clone>(parsed: &ParsedCommand, handler: &H) -> CommandEntry<H> {
    let mut parent = empty_entry(parsed.base_command.clone(), handler);
    parent.description = parsed.description.clone();
    parent.hidden = parsed.is_hidden;
    attach(&mut parent, &dedup_by_name(parsed.options()), None);

    let shared_sub_commands: Vec<CommandOption> = parsed
        .sub_commands()
        .iter()
        .filter(|sub| sub.shared)
        .cloned()
        .collect();
    let shared_options: Vec<CommandOption> = parsed
        .options()
        .iter()
        .filter(|opt| opt.shared)
        .cloned()
        .collect();

    for sub in dedup_by_name(parsed.sub_commands())
        .iter()
        .filter(|sub| !sub.shared)
    {
        let mut child = empty_entry(format!("{}:{}", parsed.base_command, sub.name), handler);
        child.sub_command = Some(sub.name.clone());
        child.hidden = parsed.is_hidden || sub.is_hidden;
        child.description =
            (!sub.description.is_empty()).then(|| substitute(&sub.description, sub));

        let options = merge_option_sets(&[&shared_sub_commands, &shared_options, sub.nested()]);
        attach(&mut child, &options, Some(sub));

        debug!(
            command = %child.name,
            flags = child.flags.len(),
            arguments = child.arguments.len(),
            "Registered sub-command"
        );
        parent.sub_commands.push(child);
    }

    debug!(
        command = %parent.name,
        flags = parent.flags.len(),
        sub_commands = parent.sub_commands.len(),
        "Registered namespace command"
    );
    parent
}
