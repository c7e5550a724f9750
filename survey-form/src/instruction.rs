use crate::TextEdit;

/// The free-text system instruction and its edit cursor.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionField {
    text: String,
    cursor: usize,
}

impl InstructionField {
    /// Create a field holding `text`, with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Line and column of the cursor, both in characters.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before: String = self.text.chars().take(self.cursor).collect();
        let line = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|tail| tail.chars().count())
            .unwrap_or(0);
        (line, col)
    }

    /// Replace the whole text, moving the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    pub fn apply(&mut self, edit: TextEdit) {
        match edit {
            TextEdit::Insert(c) => self.insert(c),
            TextEdit::Newline => self.insert('\n'),
            TextEdit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at_cursor();
                }
            }
            TextEdit::Delete => self.remove_at_cursor(),
            TextEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            TextEdit::Right => {
                if self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                }
            }
            TextEdit::Home => self.cursor = 0,
            TextEdit::End => self.cursor = self.text.chars().count(),
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn remove_at_cursor(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_editing() {
        let mut field = InstructionField::default();
        for c in "helo".chars() {
            field.apply(TextEdit::Insert(c));
        }
        field.apply(TextEdit::Left);
        field.apply(TextEdit::Insert('l'));
        assert_eq!(field.text(), "hello");
        assert_eq!(field.cursor(), 4);

        field.apply(TextEdit::End);
        field.apply(TextEdit::Backspace);
        assert_eq!(field.text(), "hell");

        field.apply(TextEdit::Home);
        field.apply(TextEdit::Delete);
        assert_eq!(field.text(), "ell");
    }

    #[test]
    fn multibyte_characters() {
        let mut field = InstructionField::new("café");
        assert_eq!(field.cursor(), 4);
        field.apply(TextEdit::Backspace);
        assert_eq!(field.text(), "caf");
        field.apply(TextEdit::Insert('é'));
        field.apply(TextEdit::Insert('!'));
        assert_eq!(field.text(), "café!");
    }

    #[test]
    fn cursor_line_and_column() {
        let mut field = InstructionField::new("ab");
        field.apply(TextEdit::Newline);
        field.apply(TextEdit::Insert('c'));
        assert_eq!(field.cursor_line_col(), (1, 1));
        field.apply(TextEdit::Home);
        assert_eq!(field.cursor_line_col(), (0, 0));
    }

    #[test]
    fn edits_at_bounds_are_noops() {
        let mut field = InstructionField::new("x");
        field.apply(TextEdit::Delete);
        field.apply(TextEdit::Right);
        assert_eq!(field.text(), "x");
        assert_eq!(field.cursor(), 1);
        field.apply(TextEdit::Home);
        field.apply(TextEdit::Backspace);
        assert_eq!(field.text(), "x");
    }
}
