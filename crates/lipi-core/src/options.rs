//! Custom transliteration options and their substitution rules.
//!
//! Options are loaded from `data/custom_options.toml`. An option applies to a
//! conversion only when its script filters match both sides and the caller
//! enabled it by name; see [`OptionCatalogue::resolve`].

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::krama::{krama_index, KramaIndex};
use crate::script_data::Script;

pub const CUSTOM_OPTIONS_TOML: &str = include_str!("../data/custom_options.toml");

/// Use the target script's typing map when reading Normal input.
pub const USE_TYPING_CHARS: &str = "normal_to_all:use_typing_chars";
/// Keep script-specific characters as their typing keys when converting to Normal.
pub const PRESERVE_SPECIFIC_CHARS: &str = "all_to_normal:preserve_specific_chars";
/// Append a zero width joiner to inserted halants in Sinhala output.
pub const SINHALA_CONJUNCT_HALANT: &str = "all_to_sinhala:use_conjunct_enabling_halant";

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("option {option}: unknown krama label `{label}`")]
    UnknownKrama { option: String, label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckIn {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Brahmic,
    Other,
    All,
}

impl ScriptType {
    fn of(script: &Script) -> Self {
        if script.is_brahmic() {
            ScriptType::Brahmic
        } else {
            ScriptType::Other
        }
    }

    /// `All` matches any script type.
    fn matches(self, actual: ScriptType) -> bool {
        self == ScriptType::All || self == actual
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Replace the keys in `prev` when one of `following` comes next.
    ReplacePrev {
        prev: Vec<KramaIndex>,
        following: Vec<KramaIndex>,
        replace_with: Vec<KramaIndex>,
        check_in: CheckIn,
        use_replace: bool,
    },
    /// Replace any of the key groups in `to_replace`.
    DirectReplace {
        to_replace: Vec<Vec<KramaIndex>>,
        replace_with: Vec<KramaIndex>,
        replace_text: Option<String>,
        check_in: CheckIn,
        use_replace: bool,
    },
}

impl Rule {
    pub fn check_in(&self) -> CheckIn {
        match self {
            Rule::ReplacePrev { check_in, .. } | Rule::DirectReplace { check_in, .. } => *check_in,
        }
    }

    /// Applied as a whole-string replacement before or after the scan.
    pub fn use_replace(&self) -> bool {
        match self {
            Rule::ReplacePrev { use_replace, .. } | Rule::DirectReplace { use_replace, .. } => {
                *use_replace
            }
        }
    }

    pub fn replace_with(&self) -> &[KramaIndex] {
        match self {
            Rule::ReplacePrev { replace_with, .. } | Rule::DirectReplace { replace_with, .. } => {
                replace_with
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CustomOption {
    pub name: String,
    pub description: String,
    pub from_script_type: Option<ScriptType>,
    pub from_script_name: Vec<String>,
    pub to_script_type: Option<ScriptType>,
    pub to_script_name: Vec<String>,
    pub rules: Vec<Rule>,
}

impl CustomOption {
    /// Whether the option's script filters accept this conversion.
    pub fn applies_to(&self, from: &Script, to: &Script) -> bool {
        let from_all = self.from_script_type == Some(ScriptType::All);
        let to_all = self.to_script_type == Some(ScriptType::All);
        if from_all && to_all {
            return true;
        }
        let from_matches = self
            .from_script_type
            .is_some_and(|t| t.matches(ScriptType::of(from)))
            || self.from_script_name.iter().any(|n| n == from.name());
        let to_matches = self
            .to_script_type
            .is_some_and(|t| t.matches(ScriptType::of(to)))
            || self.to_script_name.iter().any(|n| n == to.name());
        from_matches && to_matches
    }
}

/// Options active for one (from, to) pair and the rules of the enabled ones.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRules {
    pub active: HashMap<String, bool>,
    pub rules: Vec<Rule>,
}

impl ResolvedRules {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.active.get(name).copied().unwrap_or(false)
    }

    pub(crate) fn with_flag(&self, name: &str) -> ResolvedRules {
        let mut r = self.clone();
        r.active.insert(name.to_string(), true);
        r
    }
}

#[derive(Debug, Clone, Default)]
pub struct OptionCatalogue {
    options: Vec<CustomOption>,
    by_name: HashMap<String, usize>,
}

impl OptionCatalogue {
    pub fn get(&self, name: &str) -> Option<&CustomOption> {
        self.by_name.get(name).map(|&i| &self.options[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomOption> {
        self.options.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Keep the options whose filters match, then collect the rules of the
    /// enabled ones. Unknown names are ignored.
    pub fn resolve(
        &self,
        from: &Script,
        to: &Script,
        enabled: Option<&HashMap<String, bool>>,
    ) -> ResolvedRules {
        let Some(enabled) = enabled else {
            return ResolvedRules::default();
        };
        let mut resolved = ResolvedRules::default();
        // stable rule order regardless of the caller's map order
        let mut names: Vec<&String> = enabled.keys().collect();
        names.sort_by_key(|n| self.by_name.get(n.as_str()).copied().unwrap_or(usize::MAX));
        for name in names {
            let Some(option) = self.get(name) else {
                continue;
            };
            if !option.applies_to(from, to) {
                continue;
            }
            let on = enabled[name];
            resolved.active.insert(name.clone(), on);
            if on {
                resolved.rules.extend(option.rules.iter().cloned());
            }
        }
        debug!(
            from = from.name(),
            to = to.name(),
            active = resolved.active.len(),
            rules = resolved.rules.len(),
            "resolved options"
        );
        resolved
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogueSource {
    #[serde(default)]
    options: Vec<OptionSource>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionSource {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    from_script_type: Option<ScriptType>,
    #[serde(default)]
    from_script_name: Vec<String>,
    #[serde(default)]
    to_script_type: Option<ScriptType>,
    #[serde(default)]
    to_script_name: Vec<String>,
    #[serde(default)]
    check_in: Option<CheckIn>,
    #[serde(default)]
    rules: Vec<RuleSource>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RuleSource {
    ReplacePrev {
        prev: Vec<String>,
        following: Vec<String>,
        replace_with: Vec<String>,
        #[serde(default)]
        check_in: Option<CheckIn>,
        #[serde(default)]
        use_replace: bool,
    },
    DirectReplace {
        to_replace: Vec<Vec<String>>,
        #[serde(default)]
        replace_with: Vec<String>,
        #[serde(default)]
        replace_text: Option<String>,
        #[serde(default)]
        check_in: Option<CheckIn>,
        #[serde(default)]
        use_replace: bool,
    },
}

pub fn parse_options_toml(toml_str: &str) -> Result<OptionCatalogue, OptionsError> {
    let src: CatalogueSource =
        toml::from_str(toml_str).map_err(|e| OptionsError::Parse(e.to_string()))?;

    let mut catalogue = OptionCatalogue::default();
    for opt in src.options {
        let labels = |labels: &[String]| -> Result<Vec<KramaIndex>, OptionsError> {
            labels
                .iter()
                .map(|l| {
                    krama_index(l).ok_or_else(|| OptionsError::UnknownKrama {
                        option: opt.name.clone(),
                        label: l.clone(),
                    })
                })
                .collect()
        };
        // rules without their own check_in inherit the option's
        let default_check_in = opt.check_in.unwrap_or(CheckIn::Input);
        let mut rules = Vec::with_capacity(opt.rules.len());
        for rule in &opt.rules {
            rules.push(match rule {
                RuleSource::ReplacePrev {
                    prev,
                    following,
                    replace_with,
                    check_in,
                    use_replace,
                } => Rule::ReplacePrev {
                    prev: labels(prev)?,
                    following: labels(following)?,
                    replace_with: labels(replace_with)?,
                    check_in: check_in.unwrap_or(default_check_in),
                    use_replace: *use_replace,
                },
                RuleSource::DirectReplace {
                    to_replace,
                    replace_with,
                    replace_text,
                    check_in,
                    use_replace,
                } => Rule::DirectReplace {
                    to_replace: to_replace
                        .iter()
                        .map(|g| labels(g))
                        .collect::<Result<_, _>>()?,
                    replace_with: labels(replace_with)?,
                    replace_text: replace_text.clone(),
                    check_in: check_in.unwrap_or(default_check_in),
                    use_replace: *use_replace,
                },
            });
        }
        catalogue
            .by_name
            .insert(opt.name.clone(), catalogue.options.len());
        catalogue.options.push(CustomOption {
            name: opt.name,
            description: opt.description,
            from_script_type: opt.from_script_type,
            from_script_name: opt.from_script_name,
            to_script_type: opt.to_script_type,
            to_script_name: opt.to_script_name,
            rules,
        });
    }
    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script_data::ScriptRegistry;

    #[test]
    fn parse_default_catalogue() {
        let c = parse_options_toml(CUSTOM_OPTIONS_TOML).unwrap();
        assert_eq!(c.names().len(), 7);
        let opt = c.get("all_to_normal:replace_pancham_varga_varna_with_n").unwrap();
        assert_eq!(opt.rules.len(), 2);
        assert!(opt.rules.iter().all(|r| r.check_in() == CheckIn::Output));
        assert!(c.get(USE_TYPING_CHARS).unwrap().rules.is_empty());
    }

    #[test]
    fn rule_check_in_defaults_to_option() {
        let toml = r#"
[[options]]
name = "a:b"
from_script_type = "all"
to_script_type = "all"
check_in = "output"

[[options.rules]]
kind = "direct_replace"
to_replace = [["virama"]]

[[options.rules]]
kind = "direct_replace"
to_replace = [["virama"]]
check_in = "input"
use_replace = true
"#;
        let c = parse_options_toml(toml).unwrap();
        let rules = &c.get("a:b").unwrap().rules;
        assert_eq!(rules[0].check_in(), CheckIn::Output);
        assert!(!rules[0].use_replace());
        assert_eq!(rules[1].check_in(), CheckIn::Input);
        assert!(rules[1].use_replace());
    }

    #[test]
    fn error_unknown_label() {
        let toml = r#"
[[options]]
name = "a:b"
[[options.rules]]
kind = "direct_replace"
to_replace = [["zero_width_joiner"]]
"#;
        let err = parse_options_toml(toml).unwrap_err();
        assert!(matches!(err, OptionsError::UnknownKrama { .. }));
    }

    #[test]
    fn activation_by_type_and_name() {
        let reg = ScriptRegistry::global();
        let deva = reg.script("Devanagari").unwrap();
        let normal = reg.script("Normal").unwrap();
        let sinhala = reg.script("Sinhala").unwrap();
        let c = reg.options();

        let pancham_n = c.get("all_to_normal:replace_pancham_varga_varna_with_n").unwrap();
        assert!(pancham_n.applies_to(deva, normal));
        assert!(!pancham_n.applies_to(normal, deva));

        let anusvara = c
            .get("brahmic_to_brahmic:replace_pancham_varga_varna_with_anuvsvAra")
            .unwrap();
        assert!(anusvara.applies_to(deva, sinhala));
        assert!(!anusvara.applies_to(deva, normal));

        let typing = c.get(USE_TYPING_CHARS).unwrap();
        assert!(typing.applies_to(normal, deva));
        assert!(!typing.applies_to(deva, sinhala));
    }

    #[test]
    fn resolve_keeps_disabled_active_but_without_rules() {
        let reg = ScriptRegistry::global();
        let deva = reg.script("Devanagari").unwrap();
        let normal = reg.script("Normal").unwrap();
        let mut enabled = HashMap::new();
        enabled.insert(
            "all_to_normal:replace_pancham_varga_varna_with_n".to_string(),
            false,
        );
        enabled.insert("no_such:option".to_string(), true);
        enabled.insert(SINHALA_CONJUNCT_HALANT.to_string(), true);

        let r = reg.options().resolve(deva, normal, Some(&enabled));
        assert_eq!(r.active.len(), 1);
        assert!(!r.is_enabled("all_to_normal:replace_pancham_varga_varna_with_n"));
        assert!(r.rules.is_empty());
    }

    #[test]
    fn resolve_without_options_is_empty() {
        let reg = ScriptRegistry::global();
        let deva = reg.script("Devanagari").unwrap();
        let r = reg.options().resolve(deva, deva, None);
        assert!(r.active.is_empty());
        assert!(r.rules.is_empty());
    }
}
