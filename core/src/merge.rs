//! Name-based merging of option lists.
//!
//! A dispatch entry must never register the same option twice. When several
//! sources contribute options to one entry (shared sub-commands, shared
//! flags, a sub-command's own nested flags), [`merge_option_sets`] combines
//! them with first-source-wins deduplication by [`CommandOption::name`].
//!
//! # Example
//!
//! ```
//! use signature_core::*;
//!
//! let shared = vec![CommandOption::new("force").with_description("shared")];
//! let own = vec![
//!     CommandOption::new("force").with_description("own"),
//!     CommandOption::new("api"),
//! ];
//!
//! let merged = merge_option_sets(&[&shared, &own]);
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged[0].description, "shared");
//! ```

use std::collections::HashSet;

use crate::CommandOption;

/// Removes later options whose name was already seen.
///
/// Source order is preserved; the first occurrence of each name wins.
///
/// # Examples
///
/// ```
/// use signature_core::*;
///
/// let opts = vec![
///     CommandOption::new("name"),
///     CommandOption::new("force"),
///     CommandOption::new("name").with_description("dropped"),
/// ];
/// let deduped = dedup_by_name(&opts);
/// assert_eq!(deduped.len(), 2);
/// assert_eq!(deduped[0].description, "");
/// ```
pub fn dedup_by_name(options: &[CommandOption]) -> Vec<CommandOption> {
    merge_option_sets(&[options])
}

/// Concatenates option sources, keeping the first option seen for each name.
///
/// Earlier sources take priority over later ones when names collide.
pub fn merge_option_sets(sources: &[&[CommandOption]]) -> Vec<CommandOption> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::new();

    for source in sources {
        for option in source.iter() {
            if seen.insert(option.name.as_str()) {
                merged.push(option.clone());
            }
        }
    }

    merged
}
