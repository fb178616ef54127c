use lipi_core::unicode::{char_count, common_prefix_chars, truncate_last_chars};

use crate::{TypingDiff, TypingError, TypingOptions, TypingSession};

/// `(delete_count, insert_text)` turning `prev` into `next`, by shared
/// code-point prefix.
pub fn compute_diff(prev: &str, next: &str) -> (usize, String) {
    let common = common_prefix_chars(prev, next);
    let delete_count = char_count(prev).saturating_sub(common);
    let insert_text = next.chars().skip(common).collect();
    (delete_count, insert_text)
}

/// Apply a diff to the shown text.
pub fn apply_diff(shown: &mut String, diff: &TypingDiff) {
    truncate_last_chars(shown, diff.delete_count);
    shown.push_str(&diff.insert_text);
}

/// Feed `text` one char at a time and return the text a user would see.
pub fn emulate_typing(
    text: &str,
    script: &str,
    options: TypingOptions,
) -> Result<String, TypingError> {
    let mut session = TypingSession::new(script, options)?;
    let mut shown = String::new();
    let mut key = [0; 4];
    for ch in text.chars() {
        let diff = session.take_key_input(ch.encode_utf8(&mut key))?;
        apply_diff(&mut shown, &diff);
    }
    Ok(shown)
}
