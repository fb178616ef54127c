pub mod krama;
pub mod options;
pub mod script_data;
pub mod settings;
pub mod transliterate;
pub mod unicode;

pub use options::{CheckIn, OptionCatalogue, ResolvedRules};
pub use script_data::{Script, ScriptDataError, ScriptRegistry, BASE_SCRIPT};
pub use transliterate::{
    transliterate, transliterate_in, transliterate_with, TransliterateError,
    TransliterateOptions, Transliteration,
};
