/// Result of a cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    /// `next()` was called on the last item. The cursor did not move.
    Completed,
    Stayed,
}

/// Position in the active item sequence, bounded to `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_last(&self) -> bool {
        self.len > 0 && self.index == self.len - 1
    }

    pub fn next(&mut self) -> Step {
        if self.is_empty() {
            Step::Stayed
        } else if self.index < self.len - 1 {
            self.index += 1;
            Step::Moved(self.index)
        } else {
            Step::Completed
        }
    }

    pub fn previous(&mut self) -> Step {
        if self.index > 0 {
            self.index -= 1;
            Step::Moved(self.index)
        } else {
            Step::Stayed
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Step {
        if self.is_empty() {
            return Step::Stayed;
        }
        let target = index.min(self.len - 1);
        if target == self.index {
            Step::Stayed
        } else {
            self.index = target;
            Step::Moved(target)
        }
    }

    /// Shrinks or grows the sequence, clamping the index.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }
}

/// Cursor over a list of items plus the per-item scratch state that must not leak
/// from one item into the next. Every successful move replaces `scratch` with
/// `S::default()`.
#[derive(Debug, Clone)]
pub struct StudySession<T, S: Default> {
    items: Vec<T>,
    cursor: Cursor,
    pub scratch: S,
}

impl<T, S: Default> StudySession<T, S> {
    pub fn new(items: Vec<T>) -> Self {
        let cursor = Cursor::new(items.len());
        Self {
            items,
            cursor,
            scratch: S::default(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.cursor.index())
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next(&mut self) -> Step {
        self.reset_on_move(|cursor| cursor.next())
    }

    pub fn previous(&mut self) -> Step {
        self.reset_on_move(|cursor| cursor.previous())
    }

    pub fn jump_to(&mut self, index: usize) -> Step {
        self.reset_on_move(|cursor| cursor.jump_to(index))
    }

    /// Replaces the item list (e.g. after a filter changed) and clamps the cursor.
    pub fn replace_items(&mut self, items: Vec<T>) {
        let before = self.cursor.index();
        self.cursor.resize(items.len());
        self.items = items;
        if self.cursor.index() != before {
            self.scratch = S::default();
        }
    }

    fn reset_on_move<F>(&mut self, step: F) -> Step
    where
        F: FnOnce(&mut Cursor) -> Step,
    {
        let result = step(&mut self.cursor);
        if let Step::Moved(_) = result {
            self.scratch = S::default();
        }
        result
    }
}
