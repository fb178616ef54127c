//! Bounded history of recently consumed items and their classes.

use std::collections::VecDeque;

use crate::script_data::Class;

use super::MAX_CONTEXT_LENGTH;

pub(crate) struct ContextTracker {
    items: VecDeque<(String, Option<Class>)>,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(MAX_CONTEXT_LENGTH),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn resolve(&self, index: isize) -> Option<&(String, Option<Class>)> {
        let len = self.items.len() as isize;
        let i = if index < 0 { len + index } else { index };
        if i < 0 {
            return None;
        }
        self.items.get(i as usize)
    }

    /// Class of the entry at `index` (negative counts from the newest).
    pub fn class_at(&self, index: isize) -> Option<Class> {
        self.resolve(index).and_then(|(_, c)| *c)
    }

    pub fn text_at(&self, index: isize) -> Option<&str> {
        self.resolve(index).map(|(t, _)| t.as_str())
    }

    /// Push an entry, evicting the oldest when full. Empty text is ignored.
    pub fn push(&mut self, text: &str, class: Option<Class>) {
        if text.is_empty() {
            return;
        }
        if self.items.len() == MAX_CONTEXT_LENGTH {
            self.items.pop_front();
        }
        self.items.push_back((text.to_string(), class));
    }

    pub fn ends_with_class(&self, index: isize, pred: fn(Class) -> bool) -> bool {
        self.class_at(index).is_some_and(pred)
    }
}
