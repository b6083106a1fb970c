//! Command signature compiler.
//!
//! This crate compiles human-authored signature strings into the structured
//! model defined by `signature-core`, and assembles many compiled commands
//! into a dispatch tree a CLI front-end can register.
//!
//! # Main entry points
//!
//! - [`parse_options`]: parse a body of `{...}` tokens.
//! - [`parse_signature`]: compile a full signature plus description into a
//!   [`ParsedCommand`].
//! - [`DispatchTreeBuilder`]: merge compiled commands into a
//!   [`DispatchTree`], propagating shared options into sub-commands.
//! - [`build_tree`]: compile and assemble a whole [`CommandManifest`].
//!
//! # Example
//!
//! ```
//! use signature_compiler::{DispatchTreeBuilder, parse_signature};
//!
//! let signature = "\
//! make:
//!     {controller : Generate a controller | {--a|api : API controller}}
//!     {model : Generate a model}
//!     {^name : The name of the [name]}
//! ";
//!
//! let parsed = parse_signature(signature, "Code generators");
//! assert!(parsed.is_namespace_command);
//! assert_eq!(parsed.sub_command_names(), vec!["controller", "model", "name"]);
//!
//! let mut builder = DispatchTreeBuilder::new();
//! builder.register(parsed, "make").unwrap();
//! let tree = builder.build();
//!
//! let model = tree.find("make:model").unwrap();
//! assert_eq!(model.arguments[0].description, "The name of the model");
//! ```
//!
//! [`ParsedCommand`]: signature_core::ParsedCommand
//! [`DispatchTree`]: signature_core::DispatchTree
//! [`CommandManifest`]: signature_core::CommandManifest

pub mod builder;
pub mod error;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod placeholder;
pub mod signature;

pub use builder::DispatchTreeBuilder;
pub use error::{BuildError, Result};
pub use parser::parse_options;
pub use signature::{compile_manifest, parse_signature};

use signature_core::{CommandManifest, DispatchTree};

/// Compiles every active manifest entry and assembles the dispatch tree.
///
/// Handler references are the entries' handler names.
///
/// # Errors
///
/// Returns [`BuildError::DuplicateCommand`] when the manifest is strict and
/// two entries share a top-level name.
///
/// # Examples
///
/// ```
/// use signature_compiler::build_tree;
/// use signature_core::CommandManifest;
///
/// let manifest = CommandManifest::from_yaml_str(r#"
/// commands:
///   - signature: "serve {--p|port=8000 : Port}"
///     description: Start the server
/// "#).unwrap();
///
/// let tree = build_tree(&manifest).unwrap();
/// let route = tree.route("serve").unwrap();
/// assert_eq!(route.handler, "serve");
/// ```
pub fn build_tree(manifest: &CommandManifest) -> Result<DispatchTree<String>> {
    Ok(DispatchTreeBuilder::from_manifest(manifest)?.build())
}
