mod basic;
mod fixtures;
mod options;

use std::collections::HashMap;

use super::{transliterate, transliterate_with, TransliterateOptions, Transliteration};
use crate::options::ResolvedRules;
use crate::script_data::{Script, ScriptRegistry};

fn script(name: &str) -> &'static Script {
    ScriptRegistry::global().resolve(name).unwrap()
}

fn convert(text: &str, from: &str, to: &str) -> String {
    transliterate(text, from, to, None).unwrap()
}

fn convert_with_option(text: &str, from: &str, to: &str, option: &str) -> String {
    let options = HashMap::from([(option.to_string(), true)]);
    transliterate(text, from, to, Some(&options)).unwrap()
}

/// Run a whole keystroke buffer in typing mode from Normal.
fn type_buffer(keys: &str, to: &str) -> Transliteration {
    transliterate_with(
        script("Normal"),
        script(to),
        &ResolvedRules::default(),
        keys,
        TransliterateOptions {
            typing_mode: true,
            ..TransliterateOptions::default()
        },
    )
    .unwrap()
}
