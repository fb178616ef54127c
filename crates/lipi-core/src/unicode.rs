//! Character-level helpers shared by the engine and the typing session.

/// Superscript digits that mark Tamil-Extended consonant variants.
pub const SUPERSCRIPT_TAILS: [char; 3] = ['²', '³', '⁴'];

/// Vedic accent marks (anudatta, udatta, double and triple svarita).
pub const VEDIC_SVARAS: [char; 4] = ['\u{0952}', '\u{0951}', '\u{1CDA}', '\u{1CDB}'];

pub fn is_superscript_tail(c: Option<char>) -> bool {
    c.is_some_and(|c| SUPERSCRIPT_TAILS.contains(&c))
}

pub fn is_vedic_svara_tail(c: Option<char>) -> bool {
    c.is_some_and(|c| VEDIC_SVARAS.contains(&c))
}

pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Drop the last `n` code points of `s`. Removes everything when `n`
/// exceeds the length.
pub fn truncate_last_chars(s: &mut String, n: usize) {
    for _ in 0..n {
        if s.pop().is_none() {
            break;
        }
    }
}

/// Length in code points of the longest common prefix of `a` and `b`.
pub fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
