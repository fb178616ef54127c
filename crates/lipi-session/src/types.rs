use std::time::Duration;

use lipi_core::settings::settings;
use lipi_core::{ScriptDataError, TransliterateError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypingError {
    #[error(transparent)]
    Transliterate(#[from] TransliterateError),
    #[error(transparent)]
    Script(#[from] ScriptDataError),
    #[error("typing into {0} is not supported")]
    UnsupportedScript(String),
}

/// Per-session typing behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingOptions {
    /// Idle gap after which the next key starts a fresh buffer.
    pub auto_context_clear_time_ms: u64,
    pub use_native_numerals: bool,
    /// `k` gives `क` instead of `क्`.
    pub include_inherent_vowel: bool,
}

impl Default for TypingOptions {
    /// Values from the `[typing]` table of the global settings.
    fn default() -> Self {
        let s = &settings().typing;
        Self {
            auto_context_clear_time_ms: s.auto_context_clear_time_ms,
            use_native_numerals: s.use_native_numerals,
            include_inherent_vowel: s.include_inherent_vowel,
        }
    }
}

impl TypingOptions {
    pub(crate) fn clear_after(&self) -> Duration {
        Duration::from_millis(self.auto_context_clear_time_ms)
    }
}

/// Edit to apply to the text shown to the user after one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingDiff {
    /// Chars to remove from the end of the shown text.
    pub delete_count: usize,
    /// Text to append after the deletion.
    pub insert_text: String,
    /// 0 when the session has just been reset.
    pub context_length: usize,
}

/// Coarse classification shown in typing help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharKind {
    Anya,
    Vyanjana,
    Matra,
    Svara,
}

impl From<lipi_core::script_data::Class> for CharKind {
    fn from(class: lipi_core::script_data::Class) -> Self {
        use lipi_core::script_data::Class;
        match class {
            Class::Anya => CharKind::Anya,
            Class::Vyanjana => CharKind::Vyanjana,
            Class::Matra => CharKind::Matra,
            Class::Svara { .. } => CharKind::Svara,
        }
    }
}

/// One rendered text with the keys that type it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypingMapItem {
    pub text: String,
    pub kind: CharKind,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypingDataMap {
    /// Texts addressed by a krama key.
    pub common: Vec<TypingMapItem>,
    /// Characters only this script has.
    pub script_specific: Vec<TypingMapItem>,
}
