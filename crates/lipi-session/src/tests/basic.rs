use std::time::Instant;

use super::*;
use crate::{emulate_typing, TypingDiff, TypingError};

fn diff(delete_count: usize, insert_text: &str, context_length: usize) -> TypingDiff {
    TypingDiff {
        delete_count,
        insert_text: insert_text.to_string(),
        context_length,
    }
}

#[test]
fn test_type_nam() {
    let mut s = session("Devanagari");
    assert_eq!(s.take_key_input("n").unwrap(), diff(0, "न्", 1));
    assert_eq!(s.take_key_input("a").unwrap(), diff(1, "", 2));
    assert_eq!(s.take_key_input("m").unwrap(), diff(0, "म्", 3));
    assert_eq!(s.output(), "नम्");
}

#[test]
fn test_empty_key_is_noop() {
    let mut s = session("Devanagari");
    s.take_key_input("n").unwrap();
    assert_eq!(s.take_key_input("").unwrap(), TypingDiff::default());
    assert_eq!(s.output(), "न्");
}

#[test]
fn test_only_first_char_of_key_used() {
    let mut s = session("Devanagari");
    assert_eq!(s.take_key_input("na").unwrap(), diff(0, "न्", 1));
}

#[test]
fn test_idle_gap_resets() {
    let mut s = session("Devanagari");
    let t0 = Instant::now();
    s.take_key_input_at("n", t0).unwrap();
    // past the threshold: the buffer starts over, nothing is deleted
    let d = s.take_key_input_at("a", t0 + ms(5000)).unwrap();
    assert_eq!(d, diff(0, "अ", 1));
    let d = s.take_key_input_at("n", t0 + ms(6000)).unwrap();
    assert_eq!(d, diff(0, "न्", 2));
    assert_eq!(s.output(), "अन्");
}

#[test]
fn test_gap_within_threshold_keeps_buffer() {
    let mut s = session("Devanagari");
    let t0 = Instant::now();
    s.take_key_input_at("n", t0).unwrap();
    let d = s.take_key_input_at("a", t0 + ms(4500)).unwrap();
    assert_eq!(d, diff(1, "", 2));
}

#[test]
fn test_clear_context() {
    let mut s = session("Devanagari");
    s.take_key_input("n").unwrap();
    s.clear_context();
    assert!(s.is_idle());
    assert_eq!(s.output(), "");
    assert_eq!(s.take_key_input("m").unwrap(), diff(0, "म्", 1));
}

#[test]
fn test_inherent_vowel_toggle() {
    let mut s = session("Devanagari");
    assert!(!s.include_inherent_vowel());
    s.set_include_inherent_vowel(true);
    assert!(s.include_inherent_vowel());
    assert_eq!(s.take_key_input("k").unwrap().insert_text, "क");
}

#[test]
fn test_numerals_toggle() {
    let mut s = session("Devanagari");
    assert!(s.use_native_numerals());
    assert_eq!(s.take_key_input("1").unwrap().insert_text, "१");

    s.set_use_native_numerals(false);
    let d = s.take_key_input("1").unwrap();
    assert_eq!(d.insert_text, "1");
    assert_eq!(d.context_length, 0);
    assert!(s.is_idle());
}

#[test]
fn test_script_name_resolved() {
    assert_eq!(session("hi").script_name(), "Devanagari");
    assert_eq!(session("sinhala").script_name(), "Sinhala");
}

#[test]
fn test_unknown_script() {
    let err = TypingSession::new("Klingon", options()).err().unwrap();
    assert!(matches!(err, TypingError::Script(_)));
}

#[test]
fn test_emulate_typing() {
    assert_eq!(emulate_typing("nam", "Devanagari", options()).unwrap(), "नम्");
    assert_eq!(
        emulate_typing("namastE", "Devanagari", options()).unwrap(),
        "नमस्ते"
    );
    assert_eq!(emulate_typing("namastE", "Sinhala", options()).unwrap(), "නමස්තේ");
}

#[test]
fn test_emulate_typing_across_spaces() {
    assert_eq!(
        emulate_typing("rAma sItA", "Devanagari", options()).unwrap(),
        "राम सीता"
    );
}

#[test]
fn test_emulate_custom_key() {
    assert_eq!(emulate_typing("^ja", "Sinhala", options()).unwrap(), "ඥ");
}
