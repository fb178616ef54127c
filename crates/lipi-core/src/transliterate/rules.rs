//! Custom rule application: whole-string passes before and after the scan,
//! and in-scan rewrites of the pieces just emitted.

use tracing::debug;

use crate::krama::KramaIndex;
use crate::options::{CheckIn, Rule};
use crate::script_data::Script;

use super::builder::ResultBuilder;
use super::cursor::InputCursor;

/// Match `prev` backwards, its last key at `anchor`. Each position is
/// classified through `script`. Returns the matched length.
pub(crate) fn match_prev_sequence<F>(
    script: &Script,
    peek: F,
    anchor: isize,
    prev: &[KramaIndex],
) -> Option<usize>
where
    F: Fn(isize) -> Option<String>,
{
    for (i, &expected) in prev.iter().rev().enumerate() {
        let text = peek(anchor - i as isize)?;
        if script.krama_index_of(&text) != Some(expected) {
            return None;
        }
    }
    Some(prev.len())
}

/// String replacement pass for the rules marked `use_replace` whose
/// `check_in` is `phase`.
pub(crate) fn apply_replace_rules(
    mut text: String,
    script: &Script,
    rules: &[Rule],
    phase: CheckIn,
) -> String {
    for rule in rules {
        if !rule.use_replace() || rule.check_in() != phase {
            continue;
        }
        match rule {
            Rule::ReplacePrev {
                prev,
                following,
                replace_with,
                ..
            } => {
                let prev_text = script.render_joined(prev);
                let replacement = script.render_joined(replace_with);
                for &f in following {
                    let follow = script.krama_text(f);
                    if follow.is_empty() {
                        continue;
                    }
                    text = text.replace(
                        &format!("{prev_text}{follow}"),
                        &format!("{replacement}{follow}"),
                    );
                }
            }
            Rule::DirectReplace {
                to_replace,
                replace_with,
                replace_text,
                ..
            } => {
                let replacement = replace_text
                    .clone()
                    .unwrap_or_else(|| script.render_joined(replace_with));
                for group in to_replace {
                    let search = script.render_joined(group);
                    if !search.is_empty() {
                        text = text.replace(&search, &replacement);
                    }
                }
            }
        }
    }
    text
}

/// Rewrite recently emitted pieces after a match of `matched_len` chars that
/// ended at cursor position `pos`.
pub(crate) fn apply_scan_rules(
    rules: &[Rule],
    from: &Script,
    to: &Script,
    cursor: &InputCursor,
    result: &mut ResultBuilder,
    pos: usize,
    matched_len: usize,
) {
    let anchor = pos as isize - matched_len as isize;
    for rule in rules {
        if rule.use_replace() {
            continue;
        }
        match rule {
            Rule::ReplacePrev {
                prev,
                following,
                replace_with,
                check_in: CheckIn::Input,
                ..
            } => {
                let Some(len) = match_prev_sequence(
                    from,
                    |i| cursor.peek_signed(i).map(String::from),
                    anchor,
                    prev,
                ) else {
                    continue;
                };
                let Some(next) = cursor.peek_at(pos) else {
                    continue;
                };
                let follows = from
                    .krama_index_of(next.encode_utf8(&mut [0; 4]))
                    .is_some_and(|k| following.contains(&k));
                if follows {
                    debug!(rule = "replace_prev", check_in = "input", len, "rewrite");
                    result.rewrite_tail(len, &to.render(replace_with));
                }
            }
            Rule::ReplacePrev {
                prev,
                following,
                replace_with,
                check_in: CheckIn::Output,
                ..
            } => {
                let Some(last) = result.last_piece().map(str::to_string) else {
                    continue;
                };
                let follows = to
                    .krama_index_of(&last)
                    .is_some_and(|k| following.contains(&k));
                if !follows {
                    continue;
                }
                let peek = |i| result.peek_at(i).map(str::to_string);
                if let Some(len) = match_prev_sequence(to, peek, -2, prev) {
                    let mut pieces = to.render(replace_with);
                    pieces.push(last);
                    debug!(rule = "replace_prev", check_in = "output", len, "rewrite");
                    result.rewrite_tail(len + 1, &pieces);
                }
            }
            Rule::DirectReplace {
                to_replace,
                replace_with,
                replace_text,
                check_in,
                ..
            } => {
                let lookup = match check_in {
                    CheckIn::Output => to,
                    CheckIn::Input => from,
                };
                for group in to_replace {
                    let peek = |i| result.peek_at(i).map(str::to_string);
                    let Some(len) = match_prev_sequence(lookup, peek, -1, group) else {
                        continue;
                    };
                    let pieces = match replace_text {
                        Some(text) => vec![text.clone()],
                        None => lookup.render(replace_with),
                    };
                    debug!(rule = "direct_replace", len, "rewrite");
                    result.rewrite_tail(len, &pieces);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::krama::krama_index;
    use crate::script_data::ScriptRegistry;

    fn k(label: &str) -> KramaIndex {
        krama_index(label).unwrap()
    }

    #[test]
    fn match_prev_over_pieces() {
        let deva = ScriptRegistry::global().script("Devanagari").unwrap();
        let mut b = ResultBuilder::new();
        b.emit_pieces(["ङ", "्", "क"]);
        let peek = |i| b.peek_at(i).map(str::to_string);
        assert_eq!(
            match_prev_sequence(deva, peek, -2, &[k("G"), k("halant")]),
            Some(2)
        );
        assert_eq!(match_prev_sequence(deva, peek, -1, &[k("G")]), None);
        assert_eq!(match_prev_sequence(deva, peek, -3, &[k("k"), k("G")]), None);
    }

    #[test]
    fn replace_pass_direct() {
        let normal = ScriptRegistry::global().script("Normal").unwrap();
        let rules = vec![Rule::DirectReplace {
            to_replace: vec![vec![k("double_virama")], vec![k("virama")]],
            replace_with: vec![],
            replace_text: None,
            check_in: CheckIn::Output,
            use_replace: true,
        }];
        let out = apply_replace_rules("rAma.. sItA.".to_string(), normal, &rules, CheckIn::Output);
        assert_eq!(out, "rAma sItA");
        // wrong phase leaves the text alone
        let out = apply_replace_rules("a.".to_string(), normal, &rules, CheckIn::Input);
        assert_eq!(out, "a.");
    }

    #[test]
    fn replace_pass_prev() {
        let deva = ScriptRegistry::global().script("Devanagari").unwrap();
        let rules = vec![Rule::ReplacePrev {
            prev: vec![k("G"), k("halant")],
            following: vec![k("k"), k("g")],
            replace_with: vec![k("anusvAra")],
            check_in: CheckIn::Input,
            use_replace: true,
        }];
        let out = apply_replace_rules("अङ्क".to_string(), deva, &rules, CheckIn::Input);
        assert_eq!(out, "अंक");
    }
}
