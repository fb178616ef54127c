//! Context-sensitive conversion between two scripts.
//!
//! Input is scanned left to right. At each position the longest key of the
//! active map is matched, rendered in the target script, and a small context
//! of the previous units decides where an inherent vowel must be spelled out
//! (brahmic → other) or a halant inserted (other → brahmic).

mod builder;
mod context;
mod cursor;
mod engine;
pub(crate) mod rules;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, debug_span};

use crate::options::{CheckIn, ResolvedRules, USE_TYPING_CHARS};
use crate::script_data::{Script, ScriptDataError, ScriptRegistry, BASE_SCRIPT};

use engine::Engine;
use rules::apply_replace_rules;

/// Units remembered for the epenthesis decisions.
pub const MAX_CONTEXT_LENGTH: usize = 3;

/// Characters copied as-is; they also break the context.
pub const CHARS_TO_SKIP: [char; 10] = [' ', '\n', '\r', '\t', ',', '~', '!', '@', '?', '%'];

#[derive(Debug, Error)]
pub enum TransliterateError {
    #[error("typing mode needs Normal as source script, got {from}")]
    TypingRequiresNormal { from: String },
    #[error(transparent)]
    Script(#[from] ScriptDataError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransliterateOptions {
    /// Input is a keystroke buffer: typing keys and aliases are recognised and
    /// the context is trimmed for incremental use.
    pub typing_mode: bool,
    /// Render ASCII digits with the target's own numerals.
    pub use_native_numerals: bool,
    /// Consonants in the input carry an inherent vowel.
    pub include_inherent_vowel: bool,
}

impl Default for TransliterateOptions {
    fn default() -> Self {
        Self {
            typing_mode: false,
            use_native_numerals: true,
            include_inherent_vowel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliteration {
    pub output: String,
    /// Units still held in the context when the input ended.
    pub context_length: usize,
}

/// Convert `text` between two compiled scripts.
pub fn transliterate_with(
    from: &Script,
    to: &Script,
    rules: &ResolvedRules,
    text: &str,
    opts: TransliterateOptions,
) -> Result<Transliteration, TransliterateError> {
    let _span = debug_span!(
        "transliterate",
        from = from.name(),
        to = to.name(),
        typing = opts.typing_mode,
        chars = text.chars().count()
    )
    .entered();

    if opts.typing_mode && from.name() != BASE_SCRIPT {
        return Err(TransliterateError::TypingRequiresNormal {
            from: from.name().to_string(),
        });
    }

    if !opts.typing_mode && from.name() == to.name() {
        return Ok(Transliteration {
            output: text.to_string(),
            context_length: 0,
        });
    }

    let forced;
    let rules = if opts.typing_mode {
        forced = rules.with_flag(USE_TYPING_CHARS);
        &forced
    } else {
        rules
    };

    let mut input = text.to_string();
    if opts.typing_mode {
        input = apply_typing_aliases(&input, to);
    }
    let input = apply_replace_rules(input, from, &rules.rules, CheckIn::Input);

    let (output, context_length) = Engine::new(from, to, rules, opts, &input).run();
    let output = apply_replace_rules(output, to, &rules.rules, CheckIn::Output);
    debug!(context_length, "transliterated");

    Ok(Transliteration {
        output,
        context_length,
    })
}

/// Convert `text` between scripts named by script name, language or alias,
/// using the global registry.
///
/// `options` enables custom options by name; unknown names are ignored.
pub fn transliterate(
    text: &str,
    from: &str,
    to: &str,
    options: Option<&HashMap<String, bool>>,
) -> Result<String, TransliterateError> {
    transliterate_in(ScriptRegistry::global(), text, from, to, options)
}

/// [`transliterate`] against a specific registry.
pub fn transliterate_in(
    registry: &ScriptRegistry,
    text: &str,
    from: &str,
    to: &str,
    options: Option<&HashMap<String, bool>>,
) -> Result<String, TransliterateError> {
    let from = registry.resolve(from)?;
    let to = registry.resolve(to)?;
    if from.name() == to.name() {
        return Ok(text.to_string());
    }
    let rules = registry.options().resolve(from, to, options);
    let result = transliterate_with(from, to, &rules, text, TransliterateOptions::default())?;
    Ok(result.output)
}

/// Keystroke aliases accepted only while typing.
fn apply_typing_aliases(text: &str, to: &Script) -> String {
    let mut out = text.replace('x', "kSh");
    if to.has_superscript_forms() {
        out = out
            .replace('_', "\u{2193}")
            .replace("'''", "\u{2191}\u{2191}\u{2191}")
            .replace("''", "\u{2191}\u{2191}")
            .replace('\'', "\u{2191}");
    }
    out
}
