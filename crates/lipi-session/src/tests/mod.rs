mod basic;
mod typing_map;

use std::time::Duration;

use super::{TypingOptions, TypingSession};

pub(super) fn options() -> TypingOptions {
    TypingOptions {
        auto_context_clear_time_ms: 4500,
        use_native_numerals: true,
        include_inherent_vowel: false,
    }
}

pub(super) fn session(script: &str) -> TypingSession<'static> {
    TypingSession::new(script, options()).unwrap()
}

pub(super) fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
