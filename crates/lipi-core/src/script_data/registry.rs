use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{debug, debug_span};

use super::compile::compile;
use super::source::{
    parse_script_source, parse_typing_presets, COMMON_TYPING_TOML, EMBEDDED_SCRIPTS,
};
use super::{Script, ScriptDataError};
use crate::options::{parse_options_toml, OptionCatalogue, ResolvedRules, CUSTOM_OPTIONS_TOML};

/// Script whose renderings are the typing keys of every other script.
pub const BASE_SCRIPT: &str = "Normal";

pub const SCRIPT_LIST_TOML: &str = include_str!("../../data/script_list.toml");

static INSTANCE: OnceLock<ScriptRegistry> = OnceLock::new();

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptList {
    #[serde(default)]
    scripts: Vec<NameEntry>,
    #[serde(default)]
    languages: Vec<LanguageEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NameEntry {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LanguageEntry {
    name: String,
    script: String,
    #[serde(default)]
    aliases: Vec<String>,
}

/// Raw inputs of a registry.
#[derive(Debug, Clone, Copy)]
pub struct RegistrySources<'a> {
    /// `(file name, content)` pairs; the base script must be among them.
    pub scripts: &'a [(&'a str, &'a str)],
    pub script_list: &'a str,
    pub custom_options: &'a str,
    pub common_typing: &'a str,
}

impl RegistrySources<'static> {
    pub fn embedded() -> Self {
        Self {
            scripts: EMBEDDED_SCRIPTS,
            script_list: SCRIPT_LIST_TOML,
            custom_options: CUSTOM_OPTIONS_TOML,
            common_typing: COMMON_TYPING_TOML,
        }
    }
}

/// Immutable set of compiled scripts, name aliases and custom options.
#[derive(Debug)]
pub struct ScriptRegistry {
    scripts: Vec<Script>,
    by_name: HashMap<String, usize>,
    /// language name → script name
    languages: Vec<(String, String)>,
    /// lowercase alias → script name
    aliases: HashMap<String, String>,
    options: OptionCatalogue,
}

impl ScriptRegistry {
    /// Install a registry before the first `global()` call.
    pub fn init_custom(registry: ScriptRegistry) -> Result<(), ScriptDataError> {
        INSTANCE
            .set(registry)
            .map_err(|_| ScriptDataError::AlreadyInitialized)
    }

    /// Get or build the global registry from the embedded tables.
    pub fn global() -> &'static ScriptRegistry {
        INSTANCE.get_or_init(|| {
            ScriptRegistry::from_sources(&RegistrySources::embedded())
                .expect("embedded script tables must be valid")
        })
    }

    pub fn from_sources(sources: &RegistrySources<'_>) -> Result<Self, ScriptDataError> {
        let _span = debug_span!("build_registry", scripts = sources.scripts.len()).entered();

        let presets = parse_typing_presets(sources.common_typing)?;
        let mut parsed = sources
            .scripts
            .iter()
            .map(|(file, content)| parse_script_source(file, content))
            .collect::<Result<Vec<_>, _>>()?;
        // the base script compiles first; the rest key their typing maps on it
        let base_pos = parsed
            .iter()
            .position(|s| s.name == BASE_SCRIPT)
            .ok_or_else(|| ScriptDataError::MissingBase(BASE_SCRIPT.to_string()))?;
        let base_src = parsed.remove(base_pos);
        let base = compile(&base_src, None, &presets)?;

        let mut scripts = Vec::with_capacity(parsed.len() + 1);
        for src in &parsed {
            scripts.push(compile(src, Some(&base), &presets)?);
        }
        scripts.insert(0, base);
        scripts.sort_by_key(|s| s.id);

        let mut by_name = HashMap::new();
        for (i, s) in scripts.iter().enumerate() {
            if by_name.insert(s.name.clone(), i).is_some() {
                return Err(ScriptDataError::DuplicateScript(s.name.clone()));
            }
        }

        let list: ScriptList =
            toml::from_str(sources.script_list).map_err(|e| ScriptDataError::Parse {
                file: "script_list.toml".to_string(),
                reason: e.to_string(),
            })?;
        let mut aliases = HashMap::new();
        let mut languages = Vec::new();
        for entry in list.scripts {
            if !by_name.contains_key(&entry.name) {
                return Err(ScriptDataError::UnknownScript(entry.name));
            }
            for alias in entry.aliases {
                aliases.insert(alias.to_lowercase(), entry.name.clone());
            }
        }
        for lang in list.languages {
            if !by_name.contains_key(&lang.script) {
                return Err(ScriptDataError::UnknownScript(lang.script));
            }
            for alias in lang.aliases {
                aliases.insert(alias.to_lowercase(), lang.script.clone());
            }
            languages.push((lang.name, lang.script));
        }

        let options = parse_options_toml(sources.custom_options)?;
        debug!(
            scripts = scripts.len(),
            languages = languages.len(),
            options = options.names().len(),
            "registry ready"
        );

        Ok(Self {
            scripts,
            by_name,
            languages,
            aliases,
            options,
        })
    }

    /// Script by canonical name.
    pub fn script(&self, name: &str) -> Option<&Script> {
        self.by_name.get(name).map(|&i| &self.scripts[i])
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// Canonical script name for a script name, language name or alias.
    pub fn resolve_name(&self, name: &str) -> Result<&str, ScriptDataError> {
        let normalized = normalize_name(name);
        if let Some(&i) = self.by_name.get(&normalized) {
            return Ok(self.scripts[i].name.as_str());
        }
        if let Some((_, script)) = self.languages.iter().find(|(l, _)| *l == normalized) {
            return Ok(script.as_str());
        }
        self.aliases
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| ScriptDataError::UnknownScript(name.to_string()))
    }

    /// Script for a script name, language name or alias.
    pub fn resolve(&self, name: &str) -> Result<&Script, ScriptDataError> {
        let canonical = self.resolve_name(name)?;
        self.script(canonical)
            .ok_or_else(|| ScriptDataError::UnknownScript(name.to_string()))
    }

    /// `Some(schwa_property)` for brahmic scripts, `None` for the others.
    pub fn schwa_property(&self, name: &str) -> Result<Option<bool>, ScriptDataError> {
        Ok(self.resolve(name)?.schwa_property())
    }

    pub fn script_names(&self) -> Vec<&str> {
        self.scripts.iter().map(|s| s.name.as_str()).collect()
    }

    /// `(language, script)` pairs in table order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.languages.iter().map(|(l, s)| (l.as_str(), s.as_str()))
    }

    pub fn options(&self) -> &OptionCatalogue {
        &self.options
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.names()
    }

    pub fn resolve_rules(
        &self,
        from: &str,
        to: &str,
        enabled: Option<&HashMap<String, bool>>,
    ) -> Result<ResolvedRules, ScriptDataError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        Ok(self.options.resolve(from, to, enabled))
    }
}

/// `tamil-extended` → `Tamil-Extended`: first letter and every letter after
/// `-` upper-cased, the rest lower-cased.
fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.trim().chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}
