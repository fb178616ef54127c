use std::collections::HashMap;

use lipi_core::script_data::{MapTarget, Script};
use lipi_core::{ScriptRegistry, BASE_SCRIPT};

use crate::types::{CharKind, TypingDataMap, TypingMapItem};
use crate::TypingError;

/// Keys that type each character of `script`, from the global registry.
pub fn typing_data_map(script: &str) -> Result<TypingDataMap, TypingError> {
    typing_data_map_in(ScriptRegistry::global(), script)
}

pub fn typing_data_map_in(
    registry: &ScriptRegistry,
    script: &str,
) -> Result<TypingDataMap, TypingError> {
    let script = registry.resolve(script)?;
    if script.name() == BASE_SCRIPT {
        return Err(TypingError::UnsupportedScript(script.name().to_string()));
    }

    let kind_of = |list_ref: Option<usize>| {
        script
            .class_of_list(list_ref)
            .map(CharKind::from)
            .unwrap_or(CharKind::Anya)
    };
    let mut common: Vec<TypingMapItem> = script
        .krama_entries()
        .iter()
        .map(|(text, list_ref)| item(text, kind_of(*list_ref)))
        .collect();
    let mut script_specific: Vec<TypingMapItem> = script
        .custom_chars()
        .iter()
        .map(|c| item(&c.text, kind_of(c.list_ref)))
        .collect();

    collect_keys(script, &mut common, &mut script_specific);

    Ok(TypingDataMap {
        common: merge_same_text(common),
        script_specific: merge_same_text(script_specific),
    })
}

fn item(text: &str, kind: CharKind) -> TypingMapItem {
    TypingMapItem {
        text: text.to_string(),
        kind,
        keys: Vec::new(),
    }
}

fn collect_keys(script: &Script, common: &mut [TypingMapItem], custom: &mut [TypingMapItem]) {
    for (key, entry) in script.typing_map().iter() {
        if let Some(custom_ref) = entry.custom_back_ref {
            if let Some(item) = custom.get_mut(custom_ref) {
                item.keys.push(key.to_string());
            }
        } else if let MapTarget::Krama(indices) = &entry.target {
            // multi-key entries are intermediate states
            if let [k] = indices.as_slice() {
                if let Some(item) = common.get_mut(*k) {
                    item.keys.push(key.to_string());
                }
            }
        }
    }
}

/// Fold items with the same text and kind together, keys deduplicated in
/// first-seen order. Items without keys are dropped.
fn merge_same_text(items: Vec<TypingMapItem>) -> Vec<TypingMapItem> {
    let mut index: HashMap<(String, CharKind), usize> = HashMap::new();
    let mut out: Vec<TypingMapItem> = Vec::new();
    for item in items {
        let slot = *index
            .entry((item.text.clone(), item.kind))
            .or_insert_with(|| {
                out.push(TypingMapItem {
                    keys: Vec::new(),
                    ..item.clone()
                });
                out.len() - 1
            });
        let keys = &mut out[slot].keys;
        for key in item.keys {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    out.retain(|i| !i.keys.is_empty());
    out
}
