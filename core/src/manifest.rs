//! Command manifest configuration.
//!
//! A manifest lists the commands a process registers: each entry pairs a raw
//! signature with the human description and the name of the handler that
//! runs it. It is the file-based stand-in for the command classes a host
//! application would otherwise feed the compiler one by one.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! strict: false
//! exclude:
//!   - legacy
//! commands:
//!   - signature: |
//!       make:
//!         {controller : Generate a controller | {--a|api : API controller}}
//!         {^name : Name of the [name]}
//!     description: Code generators
//!     handler: make
//!   - signature: "serve {--p|port=8000 : Port to listen on}"
//!     description: Start the development server
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, Result};

fn default_version() -> String {
    crate::MODEL_CONTRACT_VERSION.to_string()
}

/// One command declared in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Raw signature string.
    pub signature: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Handler reference; defaults to the signature's first word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

impl ManifestEntry {
    pub fn new(signature: &str, description: &str) -> Self {
        Self {
            signature: signature.to_string(),
            description: description.to_string(),
            handler: None,
        }
    }

    /// Sets the handler reference.
    pub fn with_handler(mut self, handler: &str) -> Self {
        self.handler = Some(handler.to_string());
        self
    }

    /// Returns the handler name, falling back to the signature's first word
    /// stripped of sigils and the namespace colon.
    ///
    /// # Examples
    ///
    /// ```
    /// use signature_core::ManifestEntry;
    ///
    /// let entry = ManifestEntry::new("#make:\n {controller : c}", "Generators");
    /// assert_eq!(entry.handler_name(), "make");
    /// assert_eq!(entry.with_handler("gen").handler_name(), "gen");
    /// ```
    pub fn handler_name(&self) -> String {
        if let Some(handler) = &self.handler {
            return handler.clone();
        }
        self.signature
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .trim_start_matches(['#', '^'])
            .trim_end_matches(':')
            .to_string()
    }
}

/// Top-level command manifest.
///
/// Loaded from YAML or JSON; the format is chosen by file extension
/// (`.json` is JSON, anything else YAML).
///
/// # Examples
///
/// ```
/// use signature_core::CommandManifest;
///
/// let manifest = CommandManifest::from_yaml_str(r#"
/// commands:
///   - signature: "serve {--p|port=8000 : Port}"
///     description: Start the server
/// "#).unwrap();
/// assert_eq!(manifest.commands.len(), 1);
/// assert!(!manifest.strict);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandManifest {
    /// Manifest format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Treat duplicate top-level command names as a hard error.
    #[serde(default)]
    pub strict: bool,
    /// Handler names to skip while compiling.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Declared commands, in registration order.
    #[serde(default)]
    pub commands: Vec<ManifestEntry>,
}

impl Default for CommandManifest {
    fn default() -> Self {
        Self {
            version: default_version(),
            strict: false,
            exclude: Vec::new(),
            commands: Vec::new(),
        }
    }
}

impl CommandManifest {
    /// Loads a manifest from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ManifestError::IoError) if the file cannot be
    /// read, [`YamlError`](ManifestError::YamlError) or
    /// [`JsonError`](ManifestError::JsonError) if parsing fails, and
    /// [`InvalidManifest`](ManifestError::InvalidManifest) if an entry has
    /// an empty signature.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let manifest: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        manifest.check()?;
        Ok(manifest)
    }

    /// Saves the manifest, choosing the format by file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }

    /// Parses a manifest from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(text)?;
        manifest.check()?;
        Ok(manifest)
    }

    /// Parses a manifest from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(text)?;
        manifest.check()?;
        Ok(manifest)
    }

    /// Returns `true` if entries with this handler name are skipped.
    pub fn is_excluded(&self, handler: &str) -> bool {
        self.exclude.iter().any(|h| h == handler)
    }

    /// Entries that are not excluded, in declaration order.
    pub fn active_commands(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.commands
            .iter()
            .filter(|entry| !self.is_excluded(&entry.handler_name()))
    }

    fn check(&self) -> Result<()> {
        if let Some(index) = self
            .commands
            .iter()
            .position(|entry| entry.signature.trim().is_empty())
        {
            return Err(ManifestError::InvalidManifest(format!(
                "command #{index} has an empty signature"
            )));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
