use std::fs;
use std::process;

use lipi_engine::lipi_core;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", lipi_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        lipi_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: typing.auto_context_clear_time_ms={}, typing.use_native_numerals={}, typing.include_inherent_vowel={}",
        s.typing.auto_context_clear_time_ms,
        s.typing.use_native_numerals,
        s.typing.include_inherent_vowel
    );
}
