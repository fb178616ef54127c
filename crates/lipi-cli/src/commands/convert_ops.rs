use std::collections::HashMap;
use std::process;

use lipi_engine::lipi_core::script_data::Family;
use lipi_engine::lipi_core::{transliterate, ScriptRegistry};
use serde::Serialize;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn convert_cmd(from: &str, to: &str, options: &[String], text: &str) {
    let enabled: HashMap<String, bool> = options.iter().map(|o| (o.clone(), true)).collect();
    let registry = ScriptRegistry::global();
    for name in options {
        if registry.options().get(name).is_none() {
            eprintln!("warning: unknown option {name}");
        }
    }
    let out = die!(
        transliterate(text, from, to, Some(&enabled)),
        "Error: {}"
    );
    println!("{out}");
}

pub fn scripts_cmd() {
    let registry = ScriptRegistry::global();
    println!("{:<16} {:>3}  family", "script", "id");
    for script in registry.scripts() {
        let family = match script.family() {
            Family::Brahmic { schwa_property, .. } => {
                format!("brahmic (schwa deletion: {schwa_property})")
            }
            Family::Other { schwa_character } => format!("other (schwa: {schwa_character})"),
        };
        println!("{:<16} {:>3}  {family}", script.name(), script.id());
    }

    println!();
    println!("{:<16} script", "language");
    for (language, script) in registry.languages() {
        println!("{language:<16} {script}");
    }
}

#[derive(Serialize)]
struct OptionInfo<'a> {
    name: &'a str,
    description: &'a str,
    rules: usize,
}

pub fn options_cmd(json: bool) {
    let registry = ScriptRegistry::global();
    let infos: Vec<OptionInfo> = registry
        .options()
        .iter()
        .map(|o| OptionInfo {
            name: &o.name,
            description: &o.description,
            rules: o.rules.len(),
        })
        .collect();

    if json {
        let out = die!(serde_json::to_string_pretty(&infos), "Error: {}");
        println!("{out}");
        return;
    }
    for info in &infos {
        println!("{}", info.name);
        if !info.description.is_empty() {
            println!("    {}", info.description);
        }
    }
}
