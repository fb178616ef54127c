//! Authoring format of the script tables under `data/scripts/`.
//!
//! Krama keys are written by label (`"k"`, `"A-mAtrA"`) and resolved to
//! indices by the compiler.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::ScriptDataError;

pub const NORMAL_TOML: &str = include_str!("../../data/scripts/normal.toml");
pub const ROMANIZED_TOML: &str = include_str!("../../data/scripts/romanized.toml");
pub const DEVANAGARI_TOML: &str = include_str!("../../data/scripts/devanagari.toml");
pub const SINHALA_TOML: &str = include_str!("../../data/scripts/sinhala.toml");
pub const TAMIL_EXTENDED_TOML: &str = include_str!("../../data/scripts/tamil_extended.toml");
pub const TELUGU_TOML: &str = include_str!("../../data/scripts/telugu.toml");
pub const TAMIL_TOML: &str = include_str!("../../data/scripts/tamil.toml");
pub const BENGALI_TOML: &str = include_str!("../../data/scripts/bengali.toml");
pub const KANNADA_TOML: &str = include_str!("../../data/scripts/kannada.toml");
pub const GUJARATI_TOML: &str = include_str!("../../data/scripts/gujarati.toml");
pub const MALAYALAM_TOML: &str = include_str!("../../data/scripts/malayalam.toml");
pub const ODIA_TOML: &str = include_str!("../../data/scripts/odia.toml");
pub const GURUMUKHI_TOML: &str = include_str!("../../data/scripts/gurumukhi.toml");
pub const ASSAMESE_TOML: &str = include_str!("../../data/scripts/assamese.toml");
pub const COMMON_TYPING_TOML: &str = include_str!("../../data/common_typing.toml");

/// Embedded script tables as `(file name, content)`, base script first.
pub const EMBEDDED_SCRIPTS: &[(&str, &str)] = &[
    ("normal.toml", NORMAL_TOML),
    ("romanized.toml", ROMANIZED_TOML),
    ("devanagari.toml", DEVANAGARI_TOML),
    ("sinhala.toml", SINHALA_TOML),
    ("tamil_extended.toml", TAMIL_EXTENDED_TOML),
    ("telugu.toml", TELUGU_TOML),
    ("tamil.toml", TAMIL_TOML),
    ("bengali.toml", BENGALI_TOML),
    ("kannada.toml", KANNADA_TOML),
    ("gujarati.toml", GUJARATI_TOML),
    ("malayalam.toml", MALAYALAM_TOML),
    ("odia.toml", ODIA_TOML),
    ("gurumukhi.toml", GURUMUKHI_TOML),
    ("assamese.toml", ASSAMESE_TOML),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    Brahmic,
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptSource {
    pub name: String,
    pub id: u16,
    pub family: FamilyKind,
    #[serde(default)]
    pub halant: Option<String>,
    #[serde(default)]
    pub nuqta: Option<String>,
    #[serde(default)]
    pub schwa_property: Option<bool>,
    #[serde(default)]
    pub schwa_character: Option<String>,
    #[serde(default)]
    pub superscript_forms: bool,
    /// Named groups from `common_typing.toml` merged into the typing map.
    #[serde(default)]
    pub typing_presets: Vec<String>,
    /// Direct label → text renderings, overridden by list items.
    #[serde(default)]
    pub krama: BTreeMap<String, String>,
    #[serde(default)]
    pub svara: Vec<SvaraItem>,
    #[serde(default)]
    pub vyanjana: Vec<ListItem>,
    #[serde(default)]
    pub anya: Vec<ListItem>,
    #[serde(default)]
    pub typing: Vec<TypingItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListItem {
    pub text: String,
    #[serde(default)]
    pub krama: Vec<String>,
    /// Alternative spellings that map to the first krama key.
    #[serde(default)]
    pub duplicates: Vec<String>,
    /// Keys rendered when the item has no krama key of its own.
    #[serde(default)]
    pub fallback: Vec<String>,
    /// Written when rendering but never matched when reading the script.
    #[serde(default)]
    pub render_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SvaraItem {
    pub text: String,
    pub krama: Vec<String>,
    #[serde(default)]
    pub duplicates: Vec<String>,
    pub matra: String,
    pub matra_krama: Vec<String>,
    #[serde(default)]
    pub matra_duplicates: Vec<String>,
    /// `ரு` is read back as `r` + `u`, not as the vocalic r it renders.
    #[serde(default)]
    pub render_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypingItem {
    /// Extra key sequences for a krama key.
    Duplicates { krama: String, keys: Vec<String> },
    /// A character with no krama key, typed with `key`.
    Custom { text: String, key: String },
}

/// Named groups of typing items shared by every script.
pub type TypingPresets = BTreeMap<String, Vec<TypingItem>>;

pub fn parse_script_source(file: &str, content: &str) -> Result<ScriptSource, ScriptDataError> {
    toml::from_str(content).map_err(|e| ScriptDataError::Parse {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

pub fn parse_typing_presets(content: &str) -> Result<TypingPresets, ScriptDataError> {
    toml::from_str(content).map_err(|e| ScriptDataError::Parse {
        file: "common_typing.toml".to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_embedded_sources() {
        for (file, content) in EMBEDDED_SCRIPTS {
            let src = parse_script_source(file, content).unwrap();
            assert!(!src.name.is_empty(), "{file}");
        }
    }

    #[test]
    fn parse_typing_presets_groups() {
        let presets = parse_typing_presets(COMMON_TYPING_TOML).unwrap();
        assert!(presets.contains_key("common"));
        assert_eq!(presets["numbers"].len(), 10);
    }

    #[test]
    fn error_unknown_field() {
        let toml = r#"
name = "X"
id = 99
family = "other"
schwa_character = "a"
colour = "red"
"#;
        let err = parse_script_source("x.toml", toml).unwrap_err();
        assert!(matches!(err, ScriptDataError::Parse { .. }));
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn parse_typing_items() {
        let toml = r##"
name = "X"
id = 99
family = "brahmic"
halant = "x"

[[typing]]
kind = "duplicates"
krama = "phz"
keys = ["f"]

[[typing]]
kind = "custom"
text = "y"
key = "#y"
"##;
        let src = parse_script_source("x.toml", toml).unwrap();
        assert_eq!(src.typing.len(), 2);
        assert!(matches!(&src.typing[1], TypingItem::Custom { key, .. } if key == "#y"));
    }
}
