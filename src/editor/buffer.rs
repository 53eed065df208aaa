use ropey::Rope;

/// Direction for cursor movement.
///
/// Vertical movement follows the wrapped layout, so the buffer itself only
/// handles the horizontal directions; see [`crate::overlay::Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The draft being edited, backed by a rope.
///
/// The cursor is a char offset into the whole draft, which is the same
/// coordinate system the tokenizer and the layout use.
pub struct EditorBuffer {
    rope: Rope,
    cursor: usize,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a buffer holding `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            dirty: false,
        }
    }

    /// Cursor position as a char offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position as zero-based `(line, column)` in chars.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.rope.char_to_line(self.cursor);
        (line, self.cursor - self.rope.line_to_char(line))
    }

    /// Whether the draft changed since creation or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the draft as saved.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark the draft as differing from its file.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Length of the draft in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of logical lines.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The full draft.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
        self.dirty = true;
    }

    /// Insert a string at the cursor (paste). CRLF line endings become LF.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let normalized = s.replace("\r\n", "\n");
        self.rope.insert(self.cursor, &normalized);
        self.cursor += normalized.chars().count();
        self.dirty = true;
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.cursor..=self.cursor);
        self.dirty = true;
        true
    }

    /// Replace the whole draft, as when a correction is applied.
    ///
    /// The cursor moves to `cursor`, clamped to the new length. Replacing
    /// with identical text is a no-op and leaves the dirty flag alone.
    pub fn replace_text(&mut self, text: &str, cursor: usize) {
        if self.rope == text {
            return;
        }
        self.rope = Rope::from_str(text);
        self.cursor = cursor.min(self.rope.len_chars());
        self.dirty = true;
    }

    /// Move left or right by one char. Vertical directions are ignored.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.cursor = self.cursor.saturating_sub(1),
            Direction::Right => self.cursor = (self.cursor + 1).min(self.rope.len_chars()),
            Direction::Up | Direction::Down => {}
        }
    }

    /// Move to a char offset, clamped to the draft.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.rope.len_chars());
    }

    /// Move to the start of the logical line (Home).
    pub fn move_home(&mut self) {
        let line = self.rope.char_to_line(self.cursor);
        self.cursor = self.rope.line_to_char(line);
    }

    /// Move to the end of the logical line (End).
    pub fn move_end(&mut self) {
        let line = self.rope.char_to_line(self.cursor);
        self.cursor = self.line_end(line);
    }

    /// Move to the start of the previous word (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        let mut chars = self.rope.chars_at(self.cursor);
        let mut pos = self.cursor;
        while pos > 0 {
            match chars.prev() {
                Some(c) if !is_word_char(c) => pos -= 1,
                Some(_) => {
                    chars.next();
                    break;
                }
                None => break,
            }
        }
        while pos > 0 {
            match chars.prev() {
                Some(c) if is_word_char(c) => pos -= 1,
                _ => break,
            }
        }
        self.cursor = pos;
    }

    /// Move past the current word and following separators (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let len = self.rope.len_chars();
        let mut pos = self.cursor;
        let mut chars = self.rope.chars_at(pos);
        let mut in_word = true;
        while pos < len {
            let Some(c) = chars.next() else { break };
            if in_word && !is_word_char(c) {
                in_word = false;
            }
            if !in_word && is_word_char(c) {
                break;
            }
            pos += 1;
        }
        self.cursor = pos;
    }

    /// Move to the start of the draft (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move to the end of the draft (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.cursor = self.rope.len_chars();
    }

    fn line_end(&self, line: usize) -> usize {
        let start = self.rope.line_to_char(line);
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        start + len
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '_'
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("rope", &format_args!("Rope({} chars)", self.rope.len_chars()))
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}
