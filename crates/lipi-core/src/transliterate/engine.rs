//! The scan loop: longest match over the active map, context cleanup between
//! matches, and emission into the result builder.

use tracing::debug;

use crate::options::{
    ResolvedRules, Rule, PRESERVE_SPECIFIC_CHARS, SINHALA_CONJUNCT_HALANT, USE_TYPING_CHARS,
};
use crate::script_data::{Class, MapEntry, MapTarget, Script, TextMap, BASE_SCRIPT};
use crate::unicode::{char_count, is_superscript_tail, is_vedic_svara_tail};

use super::builder::ResultBuilder;
use super::context::ContextTracker;
use super::cursor::InputCursor;
use super::rules::apply_scan_rules;
use super::{TransliterateOptions, CHARS_TO_SKIP};

const NO_NEXT: &[char] = &[];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    BrahmicToOther,
    OtherToBrahmic,
    /// Both scripts in the same family.
    Within,
}

/// A consumed unit as seen by the context cleanup.
struct Item<'t> {
    text: &'t str,
    class: Option<Class>,
    /// Target rendering of the unit, when it has one.
    rendered: Option<&'t str>,
}

impl<'t> Item<'t> {
    fn plain(text: &'t str) -> Self {
        Self {
            text,
            class: None,
            rendered: None,
        }
    }
}

pub(crate) struct Engine<'a> {
    from: &'a Script,
    to: &'a Script,
    rules: &'a [Rule],
    cursor: InputCursor,
    result: ResultBuilder,
    context: ContextTracker,
    direction: Direction,
    context_in_use: bool,
    /// Halant and nuqta of the brahmic side when crossing families.
    halant: Option<&'a str>,
    nuqta: Option<&'a str>,
    typing: bool,
    use_typing_map: bool,
    use_typing_chars: bool,
    preserve_specific: bool,
    sinhala_zwj: bool,
    include_inherent_vowel: bool,
    use_native_numerals: bool,
    /// Input index of a superscript already folded into a match.
    skip_superscript: Option<usize>,
}

impl<'a> Engine<'a> {
    pub fn new(
        from: &'a Script,
        to: &'a Script,
        resolved: &'a ResolvedRules,
        opts: TransliterateOptions,
        text: &str,
    ) -> Self {
        let direction = match (from.is_brahmic(), to.is_brahmic()) {
            (true, false) => Direction::BrahmicToOther,
            (false, true) => Direction::OtherToBrahmic,
            _ => Direction::Within,
        };
        let typing = opts.typing_mode;
        let from_base = from.name() == BASE_SCRIPT;
        let use_typing_chars = typing || resolved.is_enabled(USE_TYPING_CHARS);
        let context_in_use =
            direction != Direction::Within || (typing && from_base && to.is_other());
        let brahmic = match direction {
            Direction::BrahmicToOther => Some(from),
            Direction::OtherToBrahmic => Some(to),
            Direction::Within => None,
        };
        Self {
            from,
            to,
            rules: &resolved.rules,
            cursor: InputCursor::new(text),
            result: ResultBuilder::new(),
            context: ContextTracker::new(),
            direction,
            context_in_use,
            halant: brahmic.and_then(Script::halant),
            nuqta: brahmic.and_then(Script::nuqta),
            typing,
            use_typing_map: (use_typing_chars || typing) && from_base,
            use_typing_chars,
            preserve_specific: resolved.is_enabled(PRESERVE_SPECIFIC_CHARS),
            sinhala_zwj: resolved.is_enabled(SINHALA_CONJUNCT_HALANT),
            include_inherent_vowel: opts.include_inherent_vowel,
            use_native_numerals: opts.use_native_numerals,
            skip_superscript: None,
        }
    }

    /// Run the scan. Returns the output and the context length.
    pub fn run(mut self) -> (String, usize) {
        let map: &'a TextMap = if self.use_typing_map {
            self.to.typing_map()
        } else {
            self.from.text_map()
        };

        while self.cursor.pos() < self.cursor.len() {
            let start = self.cursor.pos();
            let Some(ch) = self.cursor.peek() else {
                break;
            };

            if self.skip_superscript.is_some_and(|i| start >= i) {
                self.skip_superscript = None;
                self.cursor.advance(1);
                continue;
            }

            if CHARS_TO_SKIP.contains(&ch) {
                self.cursor.advance(1);
                if self.context_in_use {
                    self.cleanup(Some(Item::plain(" ")), NO_NEXT, false);
                    self.context.clear();
                }
                self.result.emit(ch.to_string());
                continue;
            }

            if ch.is_ascii_digit() && !self.use_native_numerals {
                let digit = ch.to_string();
                self.result.emit(digit.as_str());
                self.cursor.advance(1);
                self.cleanup(Some(Item::plain(&digit)), NO_NEXT, false);
                continue;
            }

            if self.preserve_specific && self.to.name() == BASE_SCRIPT && self.preserve(ch) {
                continue;
            }

            let fallback_text = match self.longest_match(map, start) {
                Some(index) => {
                    let Some((matched, entry)) = map.entry(index) else {
                        break;
                    };
                    let delete = self.superscript_delete_len(matched, entry);
                    let matched_len = char_count(matched) - delete;
                    self.cursor.advance(matched_len);

                    if self.use_typing_chars && self.emit_custom(matched, entry) {
                        continue;
                    }
                    match &entry.target {
                        MapTarget::Krama(indices) => {
                            self.emit_krama(matched, entry, indices, matched_len);
                            continue;
                        }
                        MapTarget::PassThrough => {
                            self.result.emit(matched);
                            if self.typing {
                                self.cleanup(Some(Item::plain(matched)), &entry.next, false);
                            }
                            continue;
                        }
                        MapTarget::Unmapped => matched.to_string(),
                    }
                }
                None => {
                    self.cursor.advance(1);
                    ch.to_string()
                }
            };
            self.emit_fallback(&fallback_text);
        }

        if self.context_in_use {
            self.cleanup(None, NO_NEXT, true);
        }
        (self.result.finish(), self.context.len())
    }

    fn after_consonant(&self) -> bool {
        self.context.ends_with_class(-1, Class::is_vyanjana)
            || (self.nuqta.is_some()
                && self.context.ends_with_class(-2, Class::is_vyanjana)
                && self.context.text_at(-1) == self.nuqta)
    }

    /// Keep a script specific char as the key that types it.
    fn preserve(&mut self, ch: char) -> bool {
        let from = self.from;
        let Some(custom) = from
            .custom_char_index(ch.encode_utf8(&mut [0; 4]))
            .and_then(|i| from.custom_char(i))
        else {
            return false;
        };
        self.cleanup(
            Some(Item {
                text: &custom.text,
                class: from.class_of_list(custom.list_ref),
                rendered: None,
            }),
            NO_NEXT,
            false,
        );
        let key = custom
            .typing_ref
            .and_then(|r| from.typing_map().entry(r))
            .map(|(key, _)| key)
            .unwrap_or("");
        self.result.emit(key);
        self.cursor.advance(char_count(&custom.text).max(1));
        true
    }

    /// Index of the longest map entry starting at `start`.
    fn longest_match(&mut self, map: &'a TextMap, start: usize) -> Option<usize> {
        let mut scan = 0;
        let mut vowel_hit: Option<usize> = None;
        let mut complete_hit: Option<usize> = None;
        let check_vowel = self.context_in_use
            && self.direction == Direction::OtherToBrahmic
            && self.after_consonant();

        loop {
            if self.skip_superscript.is_some()
                && is_superscript_tail(self.cursor.peek_at(start + scan + 1))
            {
                scan += 1;
            }
            let end = start + scan + 1;
            let probe = match self.skip_superscript {
                Some(skip) => {
                    let mut probe = self.cursor.slice(start, skip);
                    if end > skip {
                        probe.push_str(&self.cursor.slice(skip + 1, end));
                    }
                    probe
                }
                None => self.cursor.slice(start, end),
            };

            let index = map.get(&probe)?;
            let (_, entry) = map.entry(index)?;

            if check_vowel {
                if let MapTarget::Krama(indices) = &entry.target {
                    if let Some(&first) = indices.first() {
                        let single_vowel = indices.len() == 1
                            && self
                                .to
                                .class_of_krama(first)
                                .is_some_and(|c| c.is_svara() || c.is_matra());
                        if single_vowel {
                            vowel_hit = Some(index);
                        } else if vowel_hit.is_some() {
                            debug!(probe = %probe, "vowel retraction");
                            return vowel_hit;
                        }
                    }
                }
            }
            if entry.target != MapTarget::PassThrough {
                complete_hit = Some(index);
            }

            if !entry.next.is_empty() {
                if self.from.has_superscript_forms() && self.from.is_brahmic() {
                    if let Some(hit) = self.superscript_match(map, &probe, entry, end) {
                        return Some(hit);
                    }
                }
                if let Some(c) = self.cursor.peek_at(end) {
                    if entry.next.contains(&c) {
                        scan += 1;
                        continue;
                    }
                }
            }

            // a canonical prefix that completes nothing falls back to the
            // longest complete key inside it
            if entry.target == MapTarget::PassThrough && !self.use_typing_map {
                return complete_hit.or(Some(index));
            }
            return Some(index);
        }
    }

    /// Fold a superscript that follows a vowel sign, halant or accent into the
    /// consonant before it (`கா²` reads as `க²` + `ா`).
    fn superscript_match(
        &mut self,
        map: &TextMap,
        probe: &str,
        entry: &MapEntry,
        end: usize,
    ) -> Option<usize> {
        if self.skip_superscript.is_some() {
            return None;
        }
        let from = self.from;
        let nth = self.cursor.peek_at(end);
        let n1 = nth.and_then(|_| self.cursor.peek_at(end + 1));
        let n2 = n1.and_then(|_| self.cursor.peek_at(end + 2));
        let in_next = |c: Option<char>| c.is_some_and(|c| entry.next.contains(&c));
        let krama_of = |c: Option<char>| c.and_then(|c| from.krama_index_of(c.encode_utf8(&mut [0; 4])));
        let is_matra = |k: usize| from.class_of_krama(k).is_some_and(Class::is_matra);
        let with_tail = |tail: Option<char>| {
            let mut key = probe.to_string();
            key.extend(tail);
            map.get(&key)
        };

        if is_superscript_tail(n1) && in_next(n1) {
            // consonant + vowel sign or halant + superscript
            if let (Some(hit), Some(k)) = (with_tail(n1), krama_of(nth)) {
                let is_halant = from
                    .halant()
                    .is_some_and(|h| nth.is_some_and(|c| h.chars().eq(std::iter::once(c))));
                if is_halant || is_matra(k) {
                    self.skip_superscript = Some(end + 1);
                    return Some(hit);
                }
            }
        } else if is_superscript_tail(n2) && in_next(n2) {
            // consonant + two-part vowel sign + superscript
            if let (Some(hit), Some(k0), Some(k1)) = (with_tail(n2), krama_of(nth), krama_of(n1)) {
                if is_matra(k0) && is_matra(k1) {
                    self.skip_superscript = Some(end + 2);
                    return Some(hit);
                }
            }
        }

        // consonant + vowel sign + accent + superscript
        if nth.is_some() && is_vedic_svara_tail(n1) && is_superscript_tail(n2) && in_next(n2) {
            if krama_of(nth).is_some_and(is_matra) {
                if let Some(hit) = with_tail(n2) {
                    self.skip_superscript = Some(end + 2);
                    return Some(hit);
                }
            }
        }
        None
    }

    /// 1 when a consonant key ending in a superscript was matched while that
    /// superscript is still pending, so the cursor stops before it.
    fn superscript_delete_len(&self, matched: &str, entry: &MapEntry) -> usize {
        let is_consonant = entry
            .krama_ref()
            .and_then(|k| k.first())
            .and_then(|&k| self.from.class_of_krama(k))
            .is_some_and(Class::is_vyanjana);
        let pending = self.skip_superscript.is_some()
            && char_count(matched) > 1
            && is_consonant
            && is_superscript_tail(matched.chars().next_back());
        usize::from(pending)
    }

    /// Emit the custom char a typing key stands for.
    fn emit_custom(&mut self, matched: &str, entry: &MapEntry) -> bool {
        let to = self.to;
        let Some(custom) = entry.custom_back_ref.and_then(|i| to.custom_char(i)) else {
            return false;
        };
        self.result.emit(custom.text.as_str());
        self.cleanup(
            Some(Item {
                text: matched,
                class: to.class_of_list(custom.list_ref),
                rendered: Some(&custom.text),
            }),
            &entry.next,
            false,
        );
        true
    }

    fn emit_krama(&mut self, matched: &str, entry: &MapEntry, indices: &[usize], matched_len: usize) {
        let pieces = self.to.render(indices);
        let rendered = pieces.concat();
        let mut concatenated = false;
        if self.context_in_use {
            let (class, next): (Option<Class>, &[char]) = match self.direction {
                Direction::BrahmicToOther => (self.source_class(entry, indices), NO_NEXT),
                Direction::OtherToBrahmic => {
                    let class = match entry.fallback_list_ref {
                        Some(list_ref) => self.to.class_of_list(Some(list_ref)),
                        None => indices.first().and_then(|&k| self.to.class_of_krama(k)),
                    };
                    (class, if self.typing { entry.next.as_slice() } else { NO_NEXT })
                }
                Direction::Within => (None, entry.next.as_slice()),
            };
            concatenated = self.cleanup(
                Some(Item {
                    text: matched,
                    class,
                    rendered: Some(&rendered),
                }),
                next,
                false,
            );
        }
        if !concatenated {
            let last_is_matra = indices
                .last()
                .and_then(|&k| self.to.class_of_krama(k))
                .is_some_and(Class::is_matra);
            self.emit_target(&pieces, last_is_matra);
        }
        apply_scan_rules(
            self.rules,
            self.from,
            self.to,
            &self.cursor,
            &mut self.result,
            self.cursor.pos(),
            matched_len,
        );
    }

    /// Classification of a source match when reading a brahmic script.
    fn source_class(&self, entry: &MapEntry, indices: &[usize]) -> Option<Class> {
        if !self.use_typing_chars {
            if let Some(list_ref) = entry.fallback_list_ref {
                return self.from.class_of_list(Some(list_ref));
            }
        }
        let classes: Vec<Option<Class>> = indices
            .iter()
            .map(|&k| self.from.class_of_krama(k))
            .collect();
        if self.from.has_superscript_forms() {
            let has = |pred: fn(Class) -> bool| classes.iter().any(|c| c.is_some_and(pred));
            if has(Class::is_matra) && has(Class::is_vyanjana) {
                return Some(Class::Anya);
            }
            if classes.len() > 1 && classes.iter().any(Option::is_none) {
                return classes.last().copied().flatten();
            }
        }
        classes.first().copied().flatten()
    }

    /// Unmatched or unmapped text: look it up in the source krama table.
    fn emit_fallback(&mut self, text: &str) {
        let Some(index) = self.from.krama_index_of(text) else {
            if self.context_in_use {
                self.cleanup(Some(Item::plain(text)), NO_NEXT, false);
                self.context.clear();
            }
            self.result.emit(text);
            return;
        };

        let rendered = self.to.krama_text(index).to_string();
        let mut concatenated = false;
        if self.context_in_use {
            let class = if self.from.is_brahmic() {
                Some(self.from.class_of_krama(index))
            } else if self.to.is_brahmic() {
                Some(self.to.class_of_krama(index))
            } else {
                None
            };
            if let Some(class) = class {
                concatenated = self.cleanup(
                    Some(Item {
                        text,
                        class,
                        rendered: Some(&rendered),
                    }),
                    NO_NEXT,
                    false,
                );
            }
        }
        if !concatenated {
            let last_is_matra = self.to.class_of_krama(index).is_some_and(Class::is_matra);
            self.emit_target(&[rendered], last_is_matra);
        }
        apply_scan_rules(
            self.rules,
            self.from,
            self.to,
            &self.cursor,
            &mut self.result,
            self.cursor.pos(),
            1,
        );
    }

    /// Emit target pieces, keeping a trailing superscript last when the
    /// target marks consonants with one.
    fn emit_target(&mut self, pieces: &[String], last_is_matra: bool) {
        if !(self.to.has_superscript_forms() && is_superscript_tail(self.result.last_char())) {
            self.result.emit_pieces(pieces.iter().map(String::as_str));
            return;
        }
        let halant = self.to.halant().unwrap_or("");
        if pieces.concat() == halant || last_is_matra {
            self.result.emit_pieces_with_reorder(pieces, halant, true);
        } else if is_vedic_svara_tail(pieces.last().and_then(|p| p.chars().next_back())) {
            let last = self.result.pop_last_char();
            self.result.emit_pieces(pieces.iter().map(String::as_str));
            if let Some(c) = last {
                self.result.emit(c.to_string());
            }
        } else {
            self.result.emit_pieces(pieces.iter().map(String::as_str));
        }
    }

    fn reorder_pending(&self) -> bool {
        self.to.has_superscript_forms() && is_superscript_tail(self.result.last_char())
    }

    /// Insert the target halant after a consonant.
    fn emit_halant(&mut self) {
        let Some(halant) = self.to.halant() else {
            return;
        };
        let reorder = self.reorder_pending();
        self.result
            .emit_pieces_with_reorder(&[halant.to_string()], halant, reorder);
        if self.sinhala_zwj && self.to.name() == "Sinhala" {
            if let Some(last) = self.result.last_piece() {
                let joined = format!("{last}\u{200D}");
                self.result.rewrite_at(-1, joined);
            }
        }
    }

    /// Epenthesis and reordering between the previous context and `item`,
    /// then the context update. Returns `true` when the item's output was
    /// already written.
    fn cleanup(&mut self, item: Option<Item<'_>>, next: &[char], last_call: bool) -> bool {
        if !self.context_in_use {
            return false;
        }
        let mut concatenated = false;
        let text = item.as_ref().map(|i| i.text);
        let class = item.as_ref().and_then(|i| i.class);
        let is = |pred: fn(Class) -> bool| class.is_some_and(pred);

        let consonant_sign = (self.nuqta.is_some()
            && self.context.ends_with_class(-3, Class::is_vyanjana)
            && self.context.text_at(-2) == self.nuqta
            && self.context.ends_with_class(-1, Class::is_matra))
            || (self.context.ends_with_class(-2, Class::is_vyanjana)
                && self.context.ends_with_class(-1, Class::is_matra));
        if consonant_sign && (item.is_none() || is(Class::is_anya)) {
            self.context.clear();
        }

        match self.direction {
            Direction::BrahmicToOther => {
                let halant = self.halant;
                let not_halant = text != halant;
                let superscript_case = !self.from.has_superscript_forms()
                    || text.and_then(|t| t.chars().next())
                        != halant.and_then(|h| h.chars().next());
                let consonant_case = (self.nuqta.is_none() || text != self.nuqta)
                    && self.after_consonant();
                let plain_item = (!is(Class::is_matra) && not_halant)
                    || is(Class::is_anya)
                    || class.is_none();
                if not_halant && superscript_case && consonant_case && plain_item {
                    if let Some(schwa) = self.to.schwa_character() {
                        self.result.emit(schwa);
                    }
                }
            }
            Direction::OtherToBrahmic => {
                let prev_consonant = self.context.ends_with_class(-1, Class::is_vyanjana);
                if prev_consonant && (is(Class::is_matra) || is(Class::is_svara)) {
                    let linked = match class {
                        Some(Class::Svara { matra }) => {
                            matra.map(|k| self.to.krama_text(k)).unwrap_or("").to_string()
                        }
                        _ => item
                            .as_ref()
                            .and_then(|i| i.rendered.or(Some(i.text)))
                            .unwrap_or("")
                            .to_string(),
                    };
                    let halant = self.to.halant().unwrap_or("");
                    let reorder = self.reorder_pending();
                    self.result
                        .emit_pieces_with_reorder(&[linked], halant, reorder);
                    concatenated = true;
                } else if !self.include_inherent_vowel
                    && prev_consonant
                    && !(text == self.halant || is(Class::is_matra))
                {
                    self.emit_halant();
                } else if self.include_inherent_vowel
                    && item.is_some()
                    && is(Class::is_vyanjana)
                    && self.after_consonant()
                {
                    self.emit_halant();
                }
            }
            Direction::Within => {}
        }

        let mut cleared = false;
        if self.typing && next.is_empty() && !last_call && !self.reorder_pending() {
            // a consonant may still take a vowel sign
            if !is(Class::is_vyanjana) {
                self.context.clear();
                cleared = true;
            }
        }

        if !self.typing || (!last_call && !cleared) {
            if let Some(item) = item {
                self.context.push(item.text, item.class);
            }
        }
        concatenated
    }
}
