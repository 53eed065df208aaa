use unicode_width::UnicodeWidthChar;

use crate::annotate::is_whitespace_token;
use crate::import::PAGE_BREAK;

/// Columns a tab advances to.
pub const TAB_WIDTH: u16 = 4;

/// One char of the draft placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Char offset in the draft.
    pub offset: usize,
    pub col: u16,
    pub width: u16,
    pub token_index: usize,
}

/// A visual row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub glyphs: Vec<Glyph>,
    /// Where the cursor lands when clicking past the last glyph.
    pub end_offset: usize,
}

/// Bounding box of a token in layout rows/columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRect {
    pub top: usize,
    pub bottom: usize,
    pub left: u16,
    pub right: u16,
}

/// Wrapped geometry of a draft.
///
/// Text wraps like `white-space: pre-wrap` with `word-break: break-word`:
/// newlines and page breaks end rows, a word that does not fit moves to the next row,
/// and a word wider than a whole row is broken between chars. The same
/// layout drives the highlight pass, the text pass and the pointer hit-map,
/// so their positions always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: u16,
    rows: Vec<Row>,
    positions: Vec<(usize, u16)>,
}

struct Builder {
    width: u16,
    rows: Vec<Row>,
    positions: Vec<(usize, u16)>,
    col: u16,
    offset: usize,
    prev: Option<char>,
}

impl Builder {
    fn row(&self) -> usize {
        self.rows.len() - 1
    }

    fn soft_wrap(&mut self) {
        let last = self.rows.last_mut().expect("layout always has a row");
        last.end_offset = last.glyphs.last().map_or(self.offset, |g| g.offset);
        self.rows.push(Row::default());
        self.col = 0;
    }

    fn place(&mut self, ch: char, width: u16, token_index: usize) {
        if self.col > 0 && self.col + width > self.width {
            self.soft_wrap();
        }
        let row = self.row();
        self.positions.push((row, self.col));
        self.rows[row].glyphs.push(Glyph {
            ch,
            offset: self.offset,
            col: self.col,
            width,
            token_index,
        });
        self.col += width;
        self.offset += 1;
        self.prev = Some(ch);
    }

    fn push_whitespace(&mut self, ch: char, token_index: usize) {
        match ch {
            // A page break ends the row like a newline.
            '\n' | PAGE_BREAK => {
                let row = self.row();
                self.positions.push((row, self.col));
                let end = if self.prev == Some('\r') {
                    self.offset - 1
                } else {
                    self.offset
                };
                self.rows[row].end_offset = end;
                self.rows.push(Row::default());
                self.col = 0;
                self.offset += 1;
                self.prev = Some(ch);
            }
            '\r' => {
                self.positions.push((self.row(), self.col));
                self.offset += 1;
                self.prev = Some(ch);
            }
            '\t' => {
                let width = (TAB_WIDTH - self.col % TAB_WIDTH).min(self.width);
                self.place(ch, width, token_index);
            }
            _ => {
                let width = u16::try_from(ch.width().unwrap_or(1)).unwrap_or(1);
                self.place(ch, width, token_index);
            }
        }
    }

    fn push_word(&mut self, token: &str, token_index: usize) {
        let word_width: u16 = token.chars().map(char_width).sum();
        if self.col > 0 && self.col + word_width > self.width && word_width <= self.width {
            self.soft_wrap();
        }
        for ch in token.chars() {
            self.place(ch, char_width(ch), token_index);
        }
    }

    fn finish(mut self) -> Layout {
        let row = self.row();
        self.positions.push((row, self.col));
        self.rows[row].end_offset = self.offset;
        Layout {
            width: self.width,
            rows: self.rows,
            positions: self.positions,
        }
    }
}

fn char_width(ch: char) -> u16 {
    u16::try_from(ch.width().unwrap_or(0)).unwrap_or(0)
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(&[""], 1)
    }
}

impl Layout {
    /// Lay out `tokens` into rows of at most `width` columns.
    pub fn new(tokens: &[&str], width: u16) -> Self {
        let mut builder = Builder {
            width: width.max(1),
            rows: vec![Row::default()],
            positions: Vec::new(),
            col: 0,
            offset: 0,
            prev: None,
        };
        for (token_index, token) in tokens.iter().enumerate() {
            if is_whitespace_token(token) {
                for ch in token.chars() {
                    builder.push_whitespace(ch, token_index);
                }
            } else {
                builder.push_word(token, token_index);
            }
        }
        builder.finish()
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of chars laid out.
    pub fn len_chars(&self) -> usize {
        self.positions.len() - 1
    }

    /// Screen position `(row, col)` of a char offset; offsets past the end
    /// map to the end of the text.
    pub fn position_of(&self, offset: usize) -> (usize, u16) {
        let idx = offset.min(self.positions.len() - 1);
        self.positions[idx]
    }

    /// Char offset under `(row, col)`, for clicks and vertical movement.
    pub fn offset_at(&self, row: usize, col: u16) -> usize {
        let Some(r) = self.rows.get(row) else {
            return self.len_chars();
        };
        r.glyphs
            .iter()
            .find(|g| col < g.col + g.width.max(1))
            .map_or(r.end_offset, |g| g.offset)
    }

    /// Bounding box of every glyph belonging to `token_index`.
    pub fn token_rect(&self, token_index: usize) -> Option<TokenRect> {
        let mut rect: Option<TokenRect> = None;
        for (row_idx, row) in self.rows.iter().enumerate() {
            for glyph in row.glyphs.iter().filter(|g| g.token_index == token_index) {
                let right = glyph.col + glyph.width;
                rect = Some(match rect {
                    None => TokenRect {
                        top: row_idx,
                        bottom: row_idx,
                        left: glyph.col,
                        right,
                    },
                    Some(r) => TokenRect {
                        top: r.top,
                        bottom: row_idx,
                        left: r.left.min(glyph.col),
                        right: r.right.max(right),
                    },
                });
            }
        }
        rect
    }
}
