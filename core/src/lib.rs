//! Core data contracts for the command-signature compiler.
//!
//! This crate defines the types exchanged between the signature compiler and
//! a CLI front-end:
//!
//! - [`CommandOption`]: one `{...}` token of a signature (flag, positional
//!   argument, or sub-command) with its sigils, arity and default.
//! - [`ParsedCommand`]: a compiled signature, either a namespace command
//!   with sub-commands or a plain command.
//! - [`DispatchTree`]: the registration plan built from many parsed
//!   commands, with typed handler references for dispatch.
//! - [`CommandManifest`]: a YAML/JSON list of signatures to compile.
//!
//! Validation ([`validate_command`], [`validate_commands`]) catches
//! structural mistakes such as duplicate top-level names.
//!
//! Merging ([`merge_option_sets`], [`dedup_by_name`]) implements the
//! first-occurrence-wins option deduplication used by the tree builder.
//!
//! # Example
//!
//! ```
//! use signature_core::*;
//!
//! let mut make = ParsedCommand::new("make");
//! make.is_namespace_command = true;
//! make.sub_commands = Some(vec![
//!     CommandOption::new("controller").with_description("Generate a controller"),
//! ]);
//!
//! assert_eq!(make.sub_command_names(), vec!["controller"]);
//! assert!(validate_command(&make).is_empty());
//! ```

mod error;
mod manifest;
mod merge;
mod tree;
mod types;
mod validate;

pub use error::{ManifestError, Result};
pub use manifest::{CommandManifest, ManifestEntry};
pub use merge::{dedup_by_name, merge_option_sets};
pub use tree::{ArgumentRegistration, CommandEntry, DispatchTree, FlagRegistration, Route};
pub use types::*;
pub use validate::{ValidationError, validate_command, validate_commands};
