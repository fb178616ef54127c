//! Transliteration between Indic scripts and their romanized input form, and
//! a keystroke typing session built on it.
//!
//! The engine lives in [`lipi_core`], the typing session in [`lipi_session`].
//! This crate re-exports both for hosts that want a single dependency.

pub mod trace_init;

pub use lipi_core;
pub use lipi_session;

pub use lipi_core::{
    transliterate, transliterate_with, ScriptRegistry, TransliterateError, TransliterateOptions,
    Transliteration,
};
pub use lipi_session::{emulate_typing, typing_data_map, TypingDiff, TypingOptions, TypingSession};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_round_trip() {
        let deva = transliterate("namastE", "Normal", "Devanagari", None).unwrap();
        assert_eq!(deva, "नमस्ते");
        assert_eq!(
            transliterate(&deva, "Devanagari", "Normal", None).unwrap(),
            "namastE"
        );
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        let dir = std::env::temp_dir();
        trace_init::init_tracing(&dir);
        trace_init::init_tracing(&dir);
    }

    #[test]
    fn test_facade_typing() {
        let typed = emulate_typing("namastE", "hi", TypingOptions::default()).unwrap();
        assert_eq!(typed, "नमस्ते");
    }
}
