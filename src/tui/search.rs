use unicode_width::UnicodeWidthStr;

pub const PLACEHOLDER: &str = "Search";

/// Text input state for the search bar. `cursor_pos` is a byte offset that
/// always sits on a char boundary.
#[derive(Debug, Default)]
pub struct SearchInput {
    pub query: String,
    pub cursor_pos: usize,
}

impl SearchInput {
    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    /// Returns `true` when the text changed.
    pub fn backspace(&mut self) -> bool {
        match self.query[..self.cursor_pos].char_indices().last() {
            Some((prev, _)) => {
                self.query.remove(prev);
                self.cursor_pos = prev;
                true
            }
            None => false,
        }
    }

    /// Returns `true` when the text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor_pos < self.query.len() {
            self.query.remove(self.cursor_pos);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if let Some((prev, _)) = self.query[..self.cursor_pos].char_indices().last() {
            self.cursor_pos = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.query[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.query.len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Display column of the cursor, counting wide characters.
    pub fn cursor_column(&self) -> u16 {
        self.query[..self.cursor_pos].width() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = SearchInput::default();
        for c in "Zürich".chars() {
            input.insert(c);
        }
        assert_eq!(input.query, "Zürich");
        assert_eq!(input.cursor_pos, input.query.len());

        input.move_left();
        input.move_left();
        input.move_left();
        input.move_left();
        assert!(input.backspace());
        assert_eq!(input.query, "Zrich");
        assert_eq!(input.cursor_column(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = SearchInput::default();
        input.insert('a');
        input.move_home();
        assert!(!input.backspace());
        assert!(input.delete());
        assert!(input.is_empty());
        assert!(!input.delete());
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut input = SearchInput::default();
        input.insert('x');
        input.clear();
        assert_eq!(input.cursor_pos, 0);
        assert!(input.is_empty());
    }
}
