use super::*;
use crate::script_data::ScriptDataError;
use crate::transliterate::TransliterateError;

#[test]
fn test_normal_to_devanagari() {
    assert_eq!(convert("namastE", "Normal", "Devanagari"), "नमस्ते");
}

#[test]
fn test_devanagari_to_normal() {
    assert_eq!(convert("नमस्ते", "Devanagari", "Normal"), "namastE");
}

#[test]
fn test_final_consonant_takes_halant() {
    assert_eq!(convert("rAm", "Normal", "Devanagari"), "राम्");
    assert_eq!(convert("rAma", "Normal", "Devanagari"), "राम");
}

#[test]
fn test_inherent_vowel_written_out() {
    // a consonant after a vowel sign still gets its schwa at the end
    assert_eq!(convert("राम", "Devanagari", "Normal"), "rAma");
}

#[test]
fn test_skip_chars_break_context() {
    assert_eq!(convert("rAma sItA", "Normal", "Devanagari"), "राम सीता");
    assert_eq!(convert("राम, सीता", "Devanagari", "Normal"), "rAma, sItA");
}

#[test]
fn test_language_names_resolve() {
    assert_eq!(convert("namastE", "English", "Hindi"), "नमस्ते");
    assert_eq!(convert("नमस्ते", "sa", "en"), "namastE");
}

#[test]
fn test_same_script_is_identity() {
    assert_eq!(convert("anything at all", "Normal", "normal"), "anything at all");
    assert_eq!(convert("नमस्ते", "Hindi", "Sanskrit"), "नमस्ते");
    assert_eq!(convert("नमः", "Devanagari", "Devanagari"), "नमः");
}

#[test]
fn test_same_script_keeps_precomposed_nuqta() {
    let deva = script("Devanagari");
    let out = transliterate_with(
        deva,
        deva,
        &ResolvedRules::default(),
        "\u{0958}",
        TransliterateOptions::default(),
    )
    .unwrap();
    assert_eq!(out.output, "\u{0958}");
    assert_eq!(out.context_length, 0);
}

#[test]
fn test_empty_input() {
    assert_eq!(convert("", "Normal", "Devanagari"), "");
    assert_eq!(convert("", "Devanagari", "Normal"), "");
}

#[test]
fn test_unknown_script() {
    let err = transliterate("a", "Normal", "Klingon", None).unwrap_err();
    assert!(matches!(
        err,
        TransliterateError::Script(ScriptDataError::UnknownScript(ref n)) if n == "Klingon"
    ));
}

#[test]
fn test_native_numerals() {
    assert_eq!(convert("123", "Normal", "Devanagari"), "१२३");
    assert_eq!(convert("१२३", "Devanagari", "Normal"), "123");
}

#[test]
fn test_ascii_numerals_kept() {
    let out = transliterate_with(
        script("Normal"),
        script("Devanagari"),
        &ResolvedRules::default(),
        "12",
        TransliterateOptions {
            use_native_numerals: false,
            ..TransliterateOptions::default()
        },
    )
    .unwrap();
    assert_eq!(out.output, "12");
}

#[test]
fn test_brahmic_to_brahmic() {
    assert_eq!(convert("नमस्ते", "Devanagari", "Sinhala"), "නමස්තේ");
    assert_eq!(convert("නමස්තේ", "Sinhala", "Devanagari"), "नमस्ते");
}

#[test]
fn test_normal_to_sinhala() {
    assert_eq!(convert("namastE", "Normal", "Sinhala"), "නමස්තේ");
}

#[test]
fn test_sinhala_fallback_consonant() {
    // ඥ has no krama key of its own and is read as J + halant + j
    assert_eq!(convert("ඥ", "Sinhala", "Normal"), "Jja");
}

#[test]
fn test_unmapped_char_passes_through() {
    assert_eq!(convert("k#", "Normal", "Devanagari"), "क्#");
}

#[test]
fn test_context_length_reported() {
    let out = transliterate_with(
        script("Normal"),
        script("Devanagari"),
        &ResolvedRules::default(),
        "namastE",
        TransliterateOptions::default(),
    )
    .unwrap();
    assert_eq!(out.output, "नमस्ते");
    assert_eq!(out.context_length, 3);
}

#[test]
fn test_context_unused_within_family() {
    let out = transliterate_with(
        script("Devanagari"),
        script("Sinhala"),
        &ResolvedRules::default(),
        "नम",
        TransliterateOptions::default(),
    )
    .unwrap();
    assert_eq!(out.context_length, 0);
}
