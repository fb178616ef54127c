use std::process;

use lipi_engine::lipi_session::{
    apply_diff, typing_data_map, TypingDataMap, TypingMapItem, TypingOptions, TypingSession,
};
use unicode_width::UnicodeWidthStr;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Type `text` key by key, printing each diff when `steps` is set.
pub fn type_cmd(script: &str, inherent: bool, latin_digits: bool, steps: bool, text: &str) {
    let options = TypingOptions {
        include_inherent_vowel: inherent,
        use_native_numerals: !latin_digits,
        ..TypingOptions::default()
    };
    let mut session = die!(TypingSession::new(script, options), "Error: {}");
    let mut shown = String::new();
    for ch in text.chars() {
        let diff = die!(session.take_key_input(&ch.to_string()), "Error: {}");
        apply_diff(&mut shown, &diff);
        if steps {
            println!(
                "{ch:?}: -{} +{:?} (context {})  {shown}",
                diff.delete_count, diff.insert_text, diff.context_length
            );
        }
    }
    println!("{shown}");
}

pub fn typing_map_cmd(script: &str, json: bool) {
    let map = die!(typing_data_map(script), "Error: {}");
    if json {
        let out = die!(serde_json::to_string_pretty(&map), "Error: {}");
        println!("{out}");
        return;
    }
    print_table(&map);
}

fn print_table(map: &TypingDataMap) {
    let sections: [(&str, &[TypingMapItem]); 2] = [
        ("common", map.common.as_slice()),
        ("script specific", map.script_specific.as_slice()),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        println!("# {title}");
        let text_width = items
            .iter()
            .map(|i| display_text(&i.text).width())
            .max()
            .unwrap_or(0);
        for item in items {
            let text = display_text(&item.text);
            // pad by display width; combining signs take no column
            let pad = text_width.saturating_sub(text.width());
            println!(
                "{text}{:pad$}  {:<9} {}",
                "",
                format!("{:?}", item.kind).to_lowercase(),
                item.keys.join(" "),
            );
        }
        println!();
    }
}

/// Visible stand-in for texts that render as nothing.
fn display_text(text: &str) -> String {
    match text {
        "" => "(none)".to_string(),
        "\u{200D}" => "(zwj)".to_string(),
        t => t.to_string(),
    }
}
