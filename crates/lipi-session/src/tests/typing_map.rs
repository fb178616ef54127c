use crate::{typing_data_map, CharKind, TypingError};

#[test]
fn test_normal_rejected() {
    assert!(matches!(
        typing_data_map("Normal"),
        Err(TypingError::UnsupportedScript(ref s)) if s == "Normal"
    ));
    assert!(matches!(typing_data_map("en"), Err(TypingError::UnsupportedScript(_))));
}

#[test]
fn test_devanagari_consonant_keys() {
    let map = typing_data_map("Devanagari").unwrap();
    let ka = map.common.iter().find(|i| i.text == "क").unwrap();
    assert_eq!(ka.kind, CharKind::Vyanjana);
    assert!(ka.keys.iter().any(|k| k == "k"));

    let a = map.common.iter().find(|i| i.text == "अ").unwrap();
    assert_eq!(a.kind, CharKind::Svara);
    assert!(a.keys.iter().any(|k| k == "a"));
}

#[test]
fn test_items_unique_and_keyed() {
    let map = typing_data_map("Sinhala").unwrap();
    for item in map.common.iter().chain(&map.script_specific) {
        assert!(!item.keys.is_empty(), "{} has no keys", item.text);
        let mut keys = item.keys.clone();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), item.keys.len(), "{} repeats a key", item.text);
    }
    let mut seen = std::collections::HashSet::new();
    for item in &map.common {
        assert!(seen.insert((item.text.clone(), item.kind)), "{} twice", item.text);
    }
}

#[test]
fn test_script_specific_chars() {
    let map = typing_data_map("Sinhala").unwrap();
    let jna = map.script_specific.iter().find(|i| i.text == "ඥ").unwrap();
    assert_eq!(jna.kind, CharKind::Vyanjana);
    assert_eq!(jna.keys, vec!["^j".to_string()]);
}
