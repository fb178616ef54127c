//! Compiled per-script tables.
//!
//! A [`Script`] is built once by [`compile`] from the authoring TOML in
//! `data/scripts/` and never mutated afterwards. Everything else in the crate
//! borrows it read-only, usually through [`ScriptRegistry`].

pub mod compile;
mod registry;
pub mod source;

use std::collections::HashMap;

pub use registry::{RegistrySources, ScriptRegistry, BASE_SCRIPT, SCRIPT_LIST_TOML};

use crate::krama::KramaIndex;

#[derive(Debug, thiserror::Error)]
pub enum ScriptDataError {
    #[error("TOML parse error in {file}: {reason}")]
    Parse { file: String, reason: String },
    #[error("{script}: unknown krama label `{label}`")]
    UnknownKrama { script: String, label: String },
    #[error("{script}: missing `{field}`")]
    MissingField { script: String, field: &'static str },
    #[error("{script}: unknown typing preset `{preset}`")]
    UnknownTypingPreset { script: String, preset: String },
    #[error("unknown script or language `{0}`")]
    UnknownScript(String),
    #[error("script `{0}` defined twice")]
    DuplicateScript(String),
    #[error("base script `{0}` is missing")]
    MissingBase(String),
    #[error(transparent)]
    Options(#[from] crate::options::OptionsError),
    #[error("script registry already initialized")]
    AlreadyInitialized,
}

/// Classification of a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Anya,
    Vyanjana,
    Matra,
    /// Independent vowel; `matra` is the krama index of its dependent sign.
    Svara { matra: Option<KramaIndex> },
}

impl Class {
    pub fn is_anya(self) -> bool {
        matches!(self, Class::Anya)
    }

    pub fn is_vyanjana(self) -> bool {
        matches!(self, Class::Vyanjana)
    }

    pub fn is_matra(self) -> bool {
        matches!(self, Class::Matra)
    }

    pub fn is_svara(self) -> bool {
        matches!(self, Class::Svara { .. })
    }

    pub fn name(self) -> &'static str {
        match self {
            Class::Anya => "anya",
            Class::Vyanjana => "vyanjana",
            Class::Matra => "matra",
            Class::Svara { .. } => "svara",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub class: Class,
    pub krama_ref: Vec<KramaIndex>,
}

/// What a matched map key produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapTarget {
    /// Render these krama keys in the target script.
    Krama(Vec<KramaIndex>),
    /// Only a prefix of longer keys; emitted literally.
    PassThrough,
    /// No krama; resolved through the krama table or a custom back reference.
    Unmapped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Characters that extend the match when found right after it.
    pub next: Vec<char>,
    pub target: MapTarget,
    pub fallback_list_ref: Option<usize>,
    /// Index into the script's custom characters (typing maps only).
    pub custom_back_ref: Option<usize>,
}

impl MapEntry {
    pub fn krama(indices: Vec<KramaIndex>) -> Self {
        Self {
            next: Vec::new(),
            target: MapTarget::Krama(indices),
            fallback_list_ref: None,
            custom_back_ref: None,
        }
    }

    pub fn pass_through() -> Self {
        Self {
            next: Vec::new(),
            target: MapTarget::PassThrough,
            fallback_list_ref: None,
            custom_back_ref: None,
        }
    }

    pub fn krama_ref(&self) -> Option<&[KramaIndex]> {
        match &self.target {
            MapTarget::Krama(k) => Some(k),
            _ => None,
        }
    }
}

/// Insertion-ordered text → entry map with O(1) lookup.
#[derive(Debug, Clone, Default)]
pub struct TextMap {
    entries: Vec<(String, MapEntry)>,
    lookup: HashMap<String, usize>,
}

impl TextMap {
    pub fn get(&self, text: &str) -> Option<usize> {
        self.lookup.get(text).copied()
    }

    pub fn entry(&self, index: usize) -> Option<(&str, &MapEntry)> {
        self.entries.get(index).map(|(t, e)| (t.as_str(), e))
    }

    pub fn find(&self, text: &str) -> Option<&MapEntry> {
        self.get(text).map(|i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MapEntry)> {
        self.entries.iter().map(|(t, e)| (t.as_str(), e))
    }

    /// Insert only when `text` has no entry yet. Returns the entry index.
    pub(crate) fn insert_if_absent(&mut self, text: &str, entry: MapEntry) -> usize {
        if let Some(i) = self.get(text) {
            return i;
        }
        self.push(text, entry)
    }

    /// Insert or replace the target of `text`, keeping its `next` set.
    pub(crate) fn upsert(&mut self, text: &str, entry: MapEntry) -> usize {
        match self.get(text) {
            Some(i) => {
                let next = std::mem::take(&mut self.entries[i].1.next);
                self.entries[i].1 = MapEntry { next, ..entry };
                i
            }
            None => self.push(text, entry),
        }
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut MapEntry {
        &mut self.entries[index].1
    }

    fn push(&mut self, text: &str, entry: MapEntry) -> usize {
        let i = self.entries.len();
        self.entries.push((text.to_string(), entry));
        self.lookup.insert(text.to_string(), i);
        i
    }

    /// Add every proper prefix of every key as a pass-through entry and
    /// record each key's following char in its prefix's `next` set.
    pub(crate) fn close_prefixes(&mut self) {
        let keys: Vec<String> = self.entries.iter().map(|(t, _)| t.clone()).collect();
        for key in keys {
            let chars: Vec<char> = key.chars().collect();
            for end in 1..chars.len() {
                let prefix: String = chars[..end].iter().collect();
                let i = self.insert_if_absent(&prefix, MapEntry::pass_through());
                let next = &mut self.entries[i].1.next;
                if !next.contains(&chars[end]) {
                    next.push(chars[end]);
                }
            }
        }
    }
}

/// A character with no krama key of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomChar {
    pub text: String,
    pub list_ref: Option<usize>,
    /// Index of the typing map entry whose key produces this char.
    pub typing_ref: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Family {
    Brahmic {
        halant: String,
        nuqta: Option<String>,
        /// Whether the language drops the inherent vowel when typing.
        schwa_property: bool,
    },
    Other {
        schwa_character: String,
    },
}

#[derive(Debug, Clone)]
pub struct Script {
    pub(crate) name: String,
    pub(crate) id: u16,
    pub(crate) family: Family,
    pub(crate) superscript_forms: bool,
    pub(crate) krama: Vec<(String, Option<usize>)>,
    pub(crate) krama_lookup: HashMap<String, KramaIndex>,
    pub(crate) list: Vec<ListEntry>,
    pub(crate) text_map: TextMap,
    pub(crate) typing_map: TextMap,
    pub(crate) custom_chars: Vec<CustomChar>,
    pub(crate) custom_lookup: HashMap<String, usize>,
}

impl Script {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    pub fn is_brahmic(&self) -> bool {
        matches!(self.family, Family::Brahmic { .. })
    }

    pub fn is_other(&self) -> bool {
        matches!(self.family, Family::Other { .. })
    }

    /// Tamil-Extended style consonants marked with a trailing superscript digit.
    pub fn has_superscript_forms(&self) -> bool {
        self.superscript_forms
    }

    pub fn halant(&self) -> Option<&str> {
        match &self.family {
            Family::Brahmic { halant, .. } => Some(halant),
            Family::Other { .. } => None,
        }
    }

    pub fn nuqta(&self) -> Option<&str> {
        match &self.family {
            Family::Brahmic { nuqta, .. } => nuqta.as_deref(),
            Family::Other { .. } => None,
        }
    }

    pub fn schwa_character(&self) -> Option<&str> {
        match &self.family {
            Family::Other { schwa_character } => Some(schwa_character),
            Family::Brahmic { .. } => None,
        }
    }

    pub fn schwa_property(&self) -> Option<bool> {
        match &self.family {
            Family::Brahmic { schwa_property, .. } => Some(*schwa_property),
            Family::Other { .. } => None,
        }
    }

    /// Rendering of a krama key, `""` when the script has none.
    pub fn krama_text(&self, index: KramaIndex) -> &str {
        self.krama.get(index).map(|(t, _)| t.as_str()).unwrap_or("")
    }

    /// Lowest krama index rendered as exactly `text`.
    pub fn krama_index_of(&self, text: &str) -> Option<KramaIndex> {
        self.krama_lookup.get(text).copied()
    }

    pub fn list_entry(&self, list_ref: usize) -> Option<&ListEntry> {
        self.list.get(list_ref)
    }

    pub fn class_of_list(&self, list_ref: Option<usize>) -> Option<Class> {
        list_ref.and_then(|i| self.list.get(i)).map(|l| l.class)
    }

    /// Classification of the list entry a krama key belongs to.
    pub fn class_of_krama(&self, index: KramaIndex) -> Option<Class> {
        self.class_of_list(self.krama.get(index).and_then(|(_, l)| *l))
    }

    /// Classification of the krama key rendered as `text`.
    pub fn class_of_text(&self, text: &str) -> Option<Class> {
        self.krama_index_of(text)
            .and_then(|i| self.class_of_krama(i))
    }

    /// Non-empty renderings of `indices`, in order.
    pub fn render(&self, indices: &[KramaIndex]) -> Vec<String> {
        indices
            .iter()
            .map(|&k| self.krama_text(k))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn render_joined(&self, indices: &[KramaIndex]) -> String {
        indices.iter().map(|&k| self.krama_text(k)).collect()
    }

    pub fn krama_entries(&self) -> &[(String, Option<usize>)] {
        &self.krama
    }

    pub fn text_map(&self) -> &TextMap {
        &self.text_map
    }

    pub fn typing_map(&self) -> &TextMap {
        &self.typing_map
    }

    pub fn custom_chars(&self) -> &[CustomChar] {
        &self.custom_chars
    }

    pub fn custom_char(&self, index: usize) -> Option<&CustomChar> {
        self.custom_chars.get(index)
    }

    pub fn custom_char_index(&self, text: &str) -> Option<usize> {
        self.custom_lookup.get(text).copied()
    }
}
