//! Output accumulated as a list of emitted pieces.
//!
//! Rules and reordering work on whole pieces, so each emission stays a
//! separate entry until [`ResultBuilder::finish`].

pub(crate) struct ResultBuilder {
    pieces: Vec<String>,
}

impl ResultBuilder {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    pub fn emit(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.pieces.push(text);
        }
    }

    pub fn emit_pieces<I, S>(&mut self, pieces: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for p in pieces {
            self.emit(p);
        }
    }

    pub fn last_piece(&self) -> Option<&str> {
        self.pieces.last().map(String::as_str)
    }

    pub fn last_char(&self) -> Option<char> {
        self.pieces.last().and_then(|p| p.chars().next_back())
    }

    /// Remove one trailing code point, dropping its piece once empty.
    pub fn pop_last_char(&mut self) -> Option<char> {
        let last = self.pieces.last_mut()?;
        let c = last.pop();
        if last.is_empty() {
            self.pieces.pop();
        }
        c
    }

    /// Replace the last `count` pieces with `pieces`.
    pub fn rewrite_tail<S: AsRef<str>>(&mut self, count: usize, pieces: &[S]) {
        let start = self.pieces.len().saturating_sub(count);
        self.pieces.truncate(start);
        for p in pieces {
            self.emit(p.as_ref());
        }
    }

    fn resolve(&self, index: isize) -> Option<usize> {
        let len = self.pieces.len() as isize;
        let i = if index < 0 { len + index } else { index };
        (0..len).contains(&i).then_some(i as usize)
    }

    /// Piece at `index`; negative indices count from the end.
    pub fn peek_at(&self, index: isize) -> Option<&str> {
        self.resolve(index).map(|i| self.pieces[i].as_str())
    }

    pub fn rewrite_at(&mut self, index: isize, piece: String) {
        if let Some(i) = self.resolve(index) {
            self.pieces[i] = piece;
        }
    }

    /// Pop the last char, emit `before`, re-emit the char, then `after`.
    pub fn move_last_char_after(&mut self, before: &[String], after: &[String]) {
        let last = self.pop_last_char();
        self.emit_pieces(before.iter().map(String::as_str));
        if let Some(c) = last {
            self.emit(c.to_string());
        }
        self.emit_pieces(after.iter().map(String::as_str));
    }

    /// Emit `pieces`, optionally placing them before the current last char.
    /// A leading halant goes before the moved char and the rest after it.
    pub fn emit_pieces_with_reorder(&mut self, pieces: &[String], halant: &str, reorder: bool) {
        let Some(first) = pieces.first() else {
            return;
        };
        if !reorder {
            self.emit_pieces(pieces.iter().map(String::as_str));
            return;
        }
        match first.strip_prefix(halant) {
            Some(rest) if !halant.is_empty() => {
                let mut after = Vec::with_capacity(pieces.len());
                if !rest.is_empty() {
                    after.push(rest.to_string());
                }
                after.extend(pieces[1..].iter().cloned());
                self.move_last_char_after(&[halant.to_string()], &after);
            }
            _ => self.move_last_char_after(pieces, &[]),
        }
    }

    pub fn finish(&self) -> String {
        self.pieces.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_skips_empty() {
        let mut b = ResultBuilder::new();
        b.emit("");
        b.emit("क");
        b.emit_pieces(["", "्"]);
        assert_eq!(b.peek_at(0), Some("क"));
        assert_eq!(b.peek_at(-1), Some("्"));
        assert_eq!(b.peek_at(2), None);
        assert_eq!(b.peek_at(-3), None);
        assert_eq!(b.finish(), "क्");
    }

    #[test]
    fn pop_last_char_drops_empty_piece() {
        let mut b = ResultBuilder::new();
        b.emit("ab");
        b.emit("c");
        assert_eq!(b.pop_last_char(), Some('c'));
        assert_eq!(b.last_piece(), Some("ab"));
        assert_eq!(b.pop_last_char(), Some('b'));
        assert_eq!(b.last_piece(), Some("a"));
        let mut empty = ResultBuilder::new();
        assert_eq!(empty.pop_last_char(), None);
    }

    #[test]
    fn rewrite_tail_and_at() {
        let mut b = ResultBuilder::new();
        b.emit_pieces(["a", "G", "k"]);
        b.rewrite_tail(2, &["n", "", "k"]);
        assert_eq!(b.finish(), "ank");
        b.rewrite_at(-1, "g".to_string());
        assert_eq!(b.finish(), "ang");
        b.rewrite_tail(10, &["x"]);
        assert_eq!(b.finish(), "x");
    }

    #[test]
    fn reorder_halant_before_superscript() {
        let mut b = ResultBuilder::new();
        b.emit("க²");
        b.emit_pieces_with_reorder(&["்".to_string()], "்", true);
        assert_eq!(b.finish(), "க்²");
    }

    #[test]
    fn reorder_matra_before_superscript() {
        let mut b = ResultBuilder::new();
        b.emit("க²");
        b.emit_pieces_with_reorder(&["ா".to_string()], "்", true);
        assert_eq!(b.finish(), "கா²");
    }

    #[test]
    fn reorder_halant_prefixed_piece_splits() {
        let mut b = ResultBuilder::new();
        b.emit("க²");
        b.emit_pieces_with_reorder(&["்ல".to_string(), "x".to_string()], "்", true);
        assert_eq!(b.finish(), "க்²லx");
    }

    #[test]
    fn no_reorder_appends() {
        let mut b = ResultBuilder::new();
        b.emit("க²");
        b.emit_pieces_with_reorder(&["ா".to_string()], "்", false);
        assert_eq!(b.finish(), "க²ா");
    }
}
