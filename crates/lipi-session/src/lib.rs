//! Keystroke-by-keystroke typing into a brahmic script.
//!
//! `TypingSession` keeps the Normal keys typed so far, re-transliterates the
//! whole buffer on every key and reports what changed as a [`TypingDiff`] the
//! frontend applies to the text it shows.

mod diff;
mod typing_map;
mod types;

#[cfg(test)]
mod tests;

use std::time::Instant;

use lipi_core::options::ResolvedRules;
use lipi_core::script_data::Script;
use lipi_core::{transliterate_with, ScriptRegistry, TransliterateOptions, BASE_SCRIPT};
use tracing::{debug, debug_span};

pub use diff::{apply_diff, compute_diff, emulate_typing};
pub use typing_map::{typing_data_map, typing_data_map_in};
pub use types::{CharKind, TypingDataMap, TypingDiff, TypingError, TypingMapItem, TypingOptions};

/// Typing state for one target script.
pub struct TypingSession<'r> {
    from: &'r Script,
    to: &'r Script,
    rules: ResolvedRules,
    options: TypingOptions,

    buffer: String,
    output: String,
    last_key_at: Option<Instant>,
}

impl TypingSession<'static> {
    /// Session on the global registry. `script` may be a script name,
    /// language or alias.
    pub fn new(script: &str, options: TypingOptions) -> Result<Self, TypingError> {
        Self::with_registry(ScriptRegistry::global(), script, options)
    }
}

impl<'r> TypingSession<'r> {
    pub fn with_registry(
        registry: &'r ScriptRegistry,
        script: &str,
        options: TypingOptions,
    ) -> Result<Self, TypingError> {
        let to = registry.resolve(script)?;
        let from = registry.resolve(BASE_SCRIPT)?;
        let rules = registry.options().resolve(from, to, None);
        Ok(Self {
            from,
            to,
            rules,
            options,
            buffer: String::new(),
            output: String::new(),
            last_key_at: None,
        })
    }

    /// Drop the buffered keys and the remembered output.
    pub fn clear_context(&mut self) {
        self.last_key_at = None;
        self.buffer.clear();
        self.output.clear();
    }

    pub fn take_key_input(&mut self, key: &str) -> Result<TypingDiff, TypingError> {
        self.take_key_input_at(key, Instant::now())
    }

    /// [`take_key_input`](Self::take_key_input) with the key's arrival time.
    pub fn take_key_input_at(&mut self, key: &str, now: Instant) -> Result<TypingDiff, TypingError> {
        let Some(ch) = key.chars().next() else {
            return Ok(TypingDiff::default());
        };
        let _span = debug_span!("take_key_input", script = self.to.name(), key = %ch).entered();

        if let Some(last) = self.last_key_at {
            if now.saturating_duration_since(last) > self.options.clear_after() {
                debug!(buffered = self.buffer.chars().count(), "idle reset");
                self.clear_context();
            }
        }

        self.buffer.push(ch);
        let prev_output = std::mem::take(&mut self.output);
        let result = transliterate_with(
            self.from,
            self.to,
            &self.rules,
            &self.buffer,
            TransliterateOptions {
                typing_mode: true,
                use_native_numerals: self.options.use_native_numerals,
                include_inherent_vowel: self.options.include_inherent_vowel,
            },
        )?;

        let (delete_count, insert_text) = compute_diff(&prev_output, &result.output);
        if result.context_length > 0 {
            self.output = result.output;
        } else {
            debug!("context closed");
            self.buffer.clear();
        }
        self.last_key_at = Some(now);

        Ok(TypingDiff {
            delete_count,
            insert_text,
            context_length: result.context_length,
        })
    }

    pub fn set_use_native_numerals(&mut self, enabled: bool) {
        self.options.use_native_numerals = enabled;
    }

    pub fn set_include_inherent_vowel(&mut self, enabled: bool) {
        self.options.include_inherent_vowel = enabled;
    }

    pub fn use_native_numerals(&self) -> bool {
        self.options.use_native_numerals
    }

    pub fn include_inherent_vowel(&self) -> bool {
        self.options.include_inherent_vowel
    }

    /// Canonical name of the target script.
    pub fn script_name(&self) -> &str {
        self.to.name()
    }

    /// Output of the keys buffered since the last reset.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_idle(&self) -> bool {
        self.buffer.is_empty()
    }
}
