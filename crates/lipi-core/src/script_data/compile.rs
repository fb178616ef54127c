//! Compiles a [`ScriptSource`] into a runtime [`Script`].
//!
//! Order matters: manual `[krama]` texts are applied first and list items
//! override them. The canonical map gets every krama text (lowest index wins)
//! except those of `render_only` items, then duplicates and fallbacks. The
//! typing map is keyed by the base script's renderings and then extended by
//! typing presets and the script's own typing items. Both maps are closed
//! under prefixes last.

use std::collections::HashMap;

use tracing::{debug, debug_span};

use super::source::{FamilyKind, ScriptSource, TypingItem, TypingPresets};
use super::{
    Class, CustomChar, Family, ListEntry, MapEntry, MapTarget, Script, ScriptDataError, TextMap,
};
use crate::krama::{krama_index, KramaIndex, KRAMA_LEN};

struct Ctx<'a> {
    script: &'a str,
}

impl Ctx<'_> {
    fn index(&self, label: &str) -> Result<KramaIndex, ScriptDataError> {
        krama_index(label).ok_or_else(|| ScriptDataError::UnknownKrama {
            script: self.script.to_string(),
            label: label.to_string(),
        })
    }

    fn indices(&self, labels: &[String]) -> Result<Vec<KramaIndex>, ScriptDataError> {
        labels.iter().map(|l| self.index(l)).collect()
    }

    fn missing(&self, field: &'static str) -> ScriptDataError {
        ScriptDataError::MissingField {
            script: self.script.to_string(),
            field,
        }
    }
}

/// Compile `src`. `base` supplies the key sequences of the typing map; pass
/// `None` when compiling the base script itself.
pub fn compile(
    src: &ScriptSource,
    base: Option<&Script>,
    presets: &TypingPresets,
) -> Result<Script, ScriptDataError> {
    let _span = debug_span!("compile_script", script = %src.name).entered();
    let ctx = Ctx { script: &src.name };

    let family = match src.family {
        FamilyKind::Brahmic => Family::Brahmic {
            halant: src.halant.clone().ok_or_else(|| ctx.missing("halant"))?,
            nuqta: src.nuqta.clone(),
            schwa_property: src.schwa_property.unwrap_or(false),
        },
        FamilyKind::Other => Family::Other {
            schwa_character: src
                .schwa_character
                .clone()
                .ok_or_else(|| ctx.missing("schwa_character"))?,
        },
    };

    let mut krama: Vec<(String, Option<usize>)> = vec![(String::new(), None); KRAMA_LEN];
    for (label, text) in &src.krama {
        krama[ctx.index(label)?] = (text.clone(), None);
    }

    // krama slots left out of the reverse lookups
    let mut render_only = vec![false; KRAMA_LEN];
    let mut list: Vec<ListEntry> = Vec::new();
    let mut list_by_text: HashMap<String, usize> = HashMap::new();
    // (text, duplicates, krama keys, fallback, list index)
    let mut map_items: Vec<(String, Vec<String>, Vec<KramaIndex>, Vec<KramaIndex>, usize)> =
        Vec::new();

    for item in &src.svara {
        let svara_krama = ctx.indices(&item.krama)?;
        let matra_krama = ctx.indices(&item.matra_krama)?;

        let svara_ref = list.len();
        list.push(ListEntry {
            class: Class::Svara {
                matra: matra_krama.first().copied(),
            },
            krama_ref: svara_krama.clone(),
        });
        for &k in &svara_krama {
            krama[k] = (item.text.clone(), Some(svara_ref));
            render_only[k] = item.render_only;
        }
        list_by_text.entry(item.text.clone()).or_insert(svara_ref);
        map_items.push((
            item.text.clone(),
            item.duplicates.clone(),
            svara_krama,
            Vec::new(),
            svara_ref,
        ));

        let matra_ref = list.len();
        list.push(ListEntry {
            class: Class::Matra,
            krama_ref: matra_krama.clone(),
        });
        for &k in &matra_krama {
            krama[k] = (item.matra.clone(), Some(matra_ref));
            render_only[k] = item.render_only;
        }
        if !item.matra.is_empty() {
            list_by_text.entry(item.matra.clone()).or_insert(matra_ref);
        }
        map_items.push((
            item.matra.clone(),
            item.matra_duplicates.clone(),
            matra_krama,
            Vec::new(),
            matra_ref,
        ));
    }

    let plain_lists = [(Class::Vyanjana, &src.vyanjana), (Class::Anya, &src.anya)];
    for (class, items) in plain_lists {
        for item in items.iter() {
            let item_krama = ctx.indices(&item.krama)?;
            let fallback = ctx.indices(&item.fallback)?;
            let list_ref = list.len();
            list.push(ListEntry {
                class,
                krama_ref: item_krama.clone(),
            });
            for &k in &item_krama {
                krama[k] = (item.text.clone(), Some(list_ref));
                render_only[k] = item.render_only;
            }
            list_by_text.entry(item.text.clone()).or_insert(list_ref);
            map_items.push((
                item.text.clone(),
                item.duplicates.clone(),
                item_krama,
                fallback,
                list_ref,
            ));
        }
    }

    let mut krama_lookup: HashMap<String, KramaIndex> = HashMap::new();
    for (i, (text, _)) in krama.iter().enumerate() {
        if !text.is_empty() && !render_only[i] {
            krama_lookup.entry(text.clone()).or_insert(i);
        }
    }

    let mut text_map = TextMap::default();
    for (text, _) in &krama {
        if let Some(&lowest) = krama_lookup.get(text) {
            text_map.insert_if_absent(text, MapEntry::krama(vec![lowest]));
        }
    }
    for (text, duplicates, item_krama, fallback, list_ref) in &map_items {
        if let Some(&first) = item_krama.first() {
            for dup in duplicates {
                text_map.insert_if_absent(dup, MapEntry::krama(vec![first]));
            }
        } else if !fallback.is_empty() && !text.is_empty() {
            text_map.insert_if_absent(
                text,
                MapEntry {
                    fallback_list_ref: Some(*list_ref),
                    ..MapEntry::krama(fallback.clone())
                },
            );
        }
    }

    let mut typing_map = TextMap::default();
    let base_krama = base.map(|b| b.krama.as_slice()).unwrap_or(krama.as_slice());
    for (k, (text, _)) in krama.iter().enumerate() {
        let key = &base_krama[k].0;
        if !text.is_empty() && !key.is_empty() {
            typing_map.insert_if_absent(key, MapEntry::krama(vec![k]));
        }
    }
    if let Some(base) = base {
        // alternative spellings of the base script, e.g. `ch` for `C`
        for (key, entry) in base.text_map.iter() {
            if let MapTarget::Krama(ks) = &entry.target {
                if let [k] = ks.as_slice() {
                    if !krama[*k].0.is_empty() {
                        typing_map.insert_if_absent(key, MapEntry::krama(vec![*k]));
                    }
                }
            }
        }
    }

    let mut custom_chars: Vec<CustomChar> = Vec::new();
    let mut typing_items: Vec<&TypingItem> = Vec::new();
    for preset in &src.typing_presets {
        let group = presets
            .get(preset)
            .ok_or_else(|| ScriptDataError::UnknownTypingPreset {
                script: src.name.clone(),
                preset: preset.clone(),
            })?;
        typing_items.extend(group.iter());
    }
    typing_items.extend(src.typing.iter());

    for item in typing_items {
        match item {
            TypingItem::Duplicates { krama: label, keys } => {
                let k = ctx.index(label)?;
                if krama[k].0.is_empty() {
                    continue;
                }
                for key in keys {
                    typing_map.upsert(key, MapEntry::krama(vec![k]));
                }
            }
            TypingItem::Custom { text, key } => {
                let custom_ref = custom_chars.len();
                let typing_ref = typing_map.upsert(
                    key,
                    MapEntry {
                        target: MapTarget::Unmapped,
                        custom_back_ref: Some(custom_ref),
                        ..MapEntry::pass_through()
                    },
                );
                custom_chars.push(CustomChar {
                    text: text.clone(),
                    list_ref: list_by_text.get(text).copied(),
                    typing_ref: Some(typing_ref),
                });
            }
        }
    }

    text_map.close_prefixes();
    typing_map.close_prefixes();

    let mut custom_lookup: HashMap<String, usize> = HashMap::new();
    for (i, c) in custom_chars.iter().enumerate() {
        if !c.text.is_empty() {
            custom_lookup.entry(c.text.clone()).or_insert(i);
        }
    }

    debug!(
        krama = krama_lookup.len(),
        list = list.len(),
        text_map = text_map.len(),
        typing_map = typing_map.len(),
        custom = custom_chars.len(),
        "compiled"
    );

    Ok(Script {
        name: src.name.clone(),
        id: src.id,
        family,
        superscript_forms: src.superscript_forms,
        krama,
        krama_lookup,
        list,
        text_map,
        typing_map,
        custom_chars,
        custom_lookup,
    })
}
