//! Krama keys: the fixed, ordered list of phoneme labels shared by every script.
//!
//! A [`KramaIndex`] is a position in [`KRAMA_KEYS`]. Script tables store one
//! rendering per index, so the same index names the same sound in every
//! script. When two keys render to the same text, the earlier index wins.

use std::collections::HashMap;
use std::sync::OnceLock;

pub type KramaIndex = usize;

pub const KRAMA_KEYS: &[&str] = &[
    "AUM",
    // vowels, independent form followed by the dependent sign
    "a-svara",
    "a-mAtrA",
    "a1-svara",
    "a1-mAtrA",
    "A-svara",
    "A-mAtrA",
    "A1-svara",
    "A1-mAtrA",
    "i-svara",
    "i-mAtrA",
    "I-svara",
    "I-mAtrA",
    "u-svara",
    "u-mAtrA",
    "u1-svara",
    "u1-mAtrA",
    "U-svara",
    "U-mAtrA",
    "U1-svara",
    "U1-mAtrA",
    "E-svara",
    "E-mAtrA",
    "e-svara",
    "e-mAtrA",
    "ai-svara",
    "ai-mAtrA",
    "aiI-svara",
    "aiI-mAtrA",
    "O-svara",
    "O-mAtrA",
    "o-svara",
    "o-mAtrA",
    "au-svara",
    "au-mAtrA",
    "auU-svara",
    "auU-mAtrA",
    "R-svara",
    "R-mAtrA",
    "RR-svara",
    "RR-mAtrA",
    "LR-svara",
    "LR-mAtrA",
    "LRR-svara",
    "LRR-mAtrA",
    "anusvAra",
    "anunAnAsika",
    "visarga",
    "avagraha",
    "halant",
    "nuqta",
    "saMkShepachihna",
    // consonants
    "k",
    "kz",
    "kh",
    "khz",
    "g",
    "gz",
    "g1",
    "gh",
    "G",
    "C",
    "Ch",
    "j",
    "jz",
    "j1",
    "jh",
    "J",
    "t",
    "th",
    "d",
    "dh",
    "n",
    "nz",
    "T",
    "Th",
    "D",
    "Dz",
    "D1",
    "Dh",
    "Dhz",
    "N",
    "p",
    "ph",
    "phz",
    "b",
    "b1",
    "bh",
    "m",
    "y",
    "yz",
    "v",
    "r",
    "rz",
    "l",
    "L",
    "Lz",
    "h",
    "s",
    "sh",
    "Sh",
    // vedic accents
    "anudAttA",
    "udAtta-1",
    "udAtta-2",
    "udAtta-3",
    "0",
    "1",
    "2",
    "3",
    "4",
    "5",
    "6",
    "7",
    "8",
    "9",
    "virama",
    "double_virama",
];

pub const KRAMA_LEN: usize = KRAMA_KEYS.len();

fn label_index() -> &'static HashMap<&'static str, KramaIndex> {
    static INDEX: OnceLock<HashMap<&'static str, KramaIndex>> = OnceLock::new();
    INDEX.get_or_init(|| {
        KRAMA_KEYS
            .iter()
            .enumerate()
            .map(|(i, label)| (*label, i))
            .collect()
    })
}

/// Index of a krama label, e.g. `krama_index("k") == Some(52)`.
pub fn krama_index(label: &str) -> Option<KramaIndex> {
    label_index().get(label).copied()
}

/// Label of a krama index.
pub fn krama_label(index: KramaIndex) -> Option<&'static str> {
    KRAMA_KEYS.get(index).copied()
}

/// Resolve a list of labels, reporting the first unknown one.
pub fn resolve_labels<S: AsRef<str>>(labels: &[S]) -> Result<Vec<KramaIndex>, String> {
    labels
        .iter()
        .map(|l| krama_index(l.as_ref()).ok_or_else(|| l.as_ref().to_string()))
        .collect()
}
