use super::*;
use crate::script_data::RegistrySources;
use crate::transliterate::transliterate_in;

const PANCHAM_N: &str = "all_to_normal:replace_pancham_varga_varna_with_n";
const PANCHAM_ANUSVARA: &str = "brahmic_to_brahmic:replace_pancham_varga_varna_with_anuvsvAra";
const SINHALA_ZWJ: &str = "all_to_sinhala:use_conjunct_enabling_halant";
const REMOVE_VIRAMA: &str = "all_to_normal:remove_virAma_and_double_virAma";
const AVAGRAHA: &str = "all_to_normal:replace_avagraha_with_a";
const PRESERVE: &str = "all_to_normal:preserve_specific_chars";

#[test]
fn test_pancham_varga_to_n() {
    assert_eq!(convert("अङ्क", "Devanagari", "Normal"), "aGka");
    assert_eq!(convert_with_option("अङ्क", "Devanagari", "Normal", PANCHAM_N), "anka");
}

#[test]
fn test_pancham_varga_to_anusvara() {
    assert_eq!(convert("अङ्क", "Devanagari", "Sinhala"), "අඞ්ක");
    assert_eq!(
        convert_with_option("अङ्क", "Devanagari", "Sinhala", PANCHAM_ANUSVARA),
        "අංක"
    );
}

#[test]
fn test_sinhala_conjunct_halant() {
    assert_eq!(
        convert_with_option("namastE", "Normal", "Sinhala", SINHALA_ZWJ),
        "නමස්\u{200D}තේ"
    );
    assert_eq!(
        convert_with_option("नमस्ते", "Devanagari", "Sinhala", SINHALA_ZWJ),
        "නමස්\u{200D}තේ"
    );
}

#[test]
fn test_remove_virama() {
    assert_eq!(convert("राम॥ सीता।", "Devanagari", "Normal"), "rAma.. sItA.");
    assert_eq!(
        convert_with_option("राम॥ सीता।", "Devanagari", "Normal", REMOVE_VIRAMA),
        "rAma sItA"
    );
}

#[test]
fn test_avagraha_as_a() {
    assert_eq!(convert("ऽ", "Devanagari", "Normal"), "'");
    assert_eq!(convert_with_option("ऽ", "Devanagari", "Normal", AVAGRAHA), "a");
}

#[test]
fn test_preserve_specific_chars() {
    assert_eq!(convert("ඥ", "Sinhala", "Normal"), "Jja");
    assert_eq!(convert_with_option("ඥ", "Sinhala", "Normal", PRESERVE), "^ja");
}

#[test]
fn test_option_outside_its_scripts_is_inert() {
    assert_eq!(
        convert_with_option("अङ्क", "Devanagari", "Sinhala", PANCHAM_N),
        "අඞ්ක"
    );
}

#[test]
fn test_unknown_option_ignored() {
    assert_eq!(
        convert_with_option("namastE", "Normal", "Devanagari", "no_such_option"),
        "नमस्ते"
    );
}

#[test]
fn test_disabled_option_has_no_rules() {
    let options = HashMap::from([(PANCHAM_N.to_string(), false)]);
    let out = transliterate("अङ्क", "Devanagari", "Normal", Some(&options)).unwrap();
    assert_eq!(out, "aGka");
}

#[test]
fn test_replace_pass_before_scan() {
    const NAME: &str = "all_to_normal:avagraha_as_a_before_scan";
    let custom_options = r#"
[[options]]
name = "all_to_normal:avagraha_as_a_before_scan"
from_script_type = "all"
to_script_name = ["Normal"]
check_in = "input"

[[options.rules]]
kind = "direct_replace"
to_replace = [["avagraha"]]
replace_with = ["a-svara"]
use_replace = true
"#;
    let registry = ScriptRegistry::from_sources(&RegistrySources {
        custom_options,
        ..RegistrySources::embedded()
    })
    .unwrap();
    let enabled = HashMap::from([(NAME.to_string(), true)]);

    let out = transliterate_in(&registry, "सोऽहम्", "Devanagari", "Normal", None).unwrap();
    assert_eq!(out, "sO'ham");
    let out =
        transliterate_in(&registry, "सोऽहम्", "Devanagari", "Normal", Some(&enabled)).unwrap();
    assert_eq!(out, "sOaham");
}
