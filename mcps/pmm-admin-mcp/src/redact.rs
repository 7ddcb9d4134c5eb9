//! Credential masking for anything that leaves the process
//!
//! Commands carry `--username=` / `--password=` tokens and pmm-admin may echo
//! credentials back in its output. Both are masked before being logged or
//! returned to a caller.

use std::borrow::Cow;

/// Replacement text for masked values
pub const REDACTED: &str = "********";

/// Flags whose values are credentials
const SECRET_FLAGS: &[&str] = &["--username=", "--password="];

/// Mask the value of a credential flag, leaving other tokens untouched
pub fn redact_token(token: &str) -> Cow<'_, str> {
    for flag in SECRET_FLAGS {
        if token.starts_with(flag) {
            return Cow::Owned(format!("{}{}", flag, REDACTED));
        }
    }
    Cow::Borrowed(token)
}

/// Replace whole-word occurrences of each non-empty secret in `text`
///
/// A match glued to a neighbouring word character is left alone, so a
/// username like `pmm` masks `user pmm` but not `pmm-admin`.
pub fn mask_secrets(text: &str, secrets: &[&str]) -> String {
    secrets
        .iter()
        .filter(|s| !s.is_empty())
        .fold(text.to_string(), |acc, secret| mask_whole_words(&acc, secret))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn mask_whole_words(text: &str, secret: &str) -> String {
    // edges made of punctuation already sit on a boundary
    let check_before = secret.chars().next().is_some_and(is_word_char);
    let check_after = secret.chars().next_back().is_some_and(is_word_char);

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, matched) in text.match_indices(secret) {
        let end = start + matched.len();
        let glued_before =
            check_before && text[..start].chars().next_back().is_some_and(is_word_char);
        let glued_after =
            check_after && text[end..].chars().next().is_some_and(is_word_char);
        if glued_before || glued_after {
            continue;
        }
        out.push_str(&text[last..start]);
        out.push_str(REDACTED);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}
