//! Sigil classification.
//!
//! A `#` or `^` means different things depending on where it sits: as the
//! first character of a token or base line, or directly after the name's
//! colon (`{name :^ desc}`). All position checks live here so callers only
//! ever see a [`Sigils`] value.

use signature_core::Sigils;

use super::util::find_top_level;

const HIDDEN: char = '#';
const SHARED: char = '^';

fn is_sigil(ch: char) -> bool {
    ch == HIDDEN || ch == SHARED
}

fn sigil_after_colon(text: &str) -> Option<char> {
    let colon = find_top_level(text, ':')?;
    text[colon + 1..].chars().next().filter(|ch| is_sigil(*ch))
}

/// Classifies a raw token body or base line.
///
/// `^` in either sigil position makes the token shared; otherwise any sigil
/// makes it hidden. Shared tokens are never hidden.
///
/// # Examples
///
/// ```
/// use signature_compiler::parser::classify_sigils;
///
/// assert!(classify_sigils("#name : x").hidden);
/// assert!(classify_sigils("^name : x").shared);
/// assert!(classify_sigils("name :^ x").shared);
/// assert!(!classify_sigils("^name : x").hidden);
/// assert_eq!(classify_sigils("name : x"), Default::default());
/// ```
pub fn classify_sigils(raw: &str) -> Sigils {
    let text = raw.trim_start();
    let lead = text.chars().next().filter(|ch| is_sigil(*ch));
    let after_colon = sigil_after_colon(text);

    let shared = lead == Some(SHARED) || after_colon == Some(SHARED);
    let hidden = !shared && (lead.is_some() || after_colon.is_some());
    Sigils { hidden, shared }
}

/// Removes the sigils found in sigil positions, leaving any `#`/`^` that
/// belong to descriptions or nested tokens untouched.
pub fn strip_sigils(raw: &str) -> String {
    let text = raw.trim_start();
    let body = text.strip_prefix([HIDDEN, SHARED]).unwrap_or(text);

    match find_top_level(body, ':') {
        Some(colon) => {
            let (head, tail) = body.split_at(colon + 1);
            let tail = tail.strip_prefix([HIDDEN, SHARED]).unwrap_or(tail);
            format!("{head}{tail}")
        }
        None => body.to_string(),
    }
}
