//! `[key]` placeholder substitution in descriptions.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use signature_core::CommandOption;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_-]+)\]").expect("static regex must compile"));

/// Replaces each `[key]` in `text` with the matching attribute of `context`.
///
/// Keys the context cannot resolve are left as the literal `[key]`.
///
/// # Examples
///
/// ```
/// use signature_compiler::placeholder::substitute;
/// use signature_core::CommandOption;
///
/// let ctx = CommandOption::new("controller");
/// assert_eq!(
///     substitute("The table to migrate for [name]", &ctx),
///     "The table to migrate for controller"
/// );
/// assert_eq!(substitute("Keep [unknown]", &ctx), "Keep [unknown]");
/// ```
pub fn substitute(text: &str, context: &CommandOption) -> String {
    if !text.contains('[') {
        return text.to_string();
    }
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            context
                .attribute(&caps[1])
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
