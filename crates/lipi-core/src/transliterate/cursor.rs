//! Code-point indexed view over the input text.

pub(crate) struct InputCursor {
    chars: Vec<char>,
    pos: usize,
}

impl InputCursor {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.peek_at(self.pos)
    }

    pub fn peek_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Like [`peek_at`](Self::peek_at) but for signed indices; negative is
    /// out of range.
    pub fn peek_signed(&self, index: isize) -> Option<char> {
        usize::try_from(index).ok().and_then(|i| self.peek_at(i))
    }

    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Text of `[start, end)`, clamped to the input. Empty when `start >= end`.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        if start >= end {
            return String::new();
        }
        self.chars[start..end].iter().collect()
    }
}
