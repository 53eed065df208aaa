//! Splicing a correction back into the draft.

use super::resolver::WordParts;
use super::tokenizer::tokenize;

/// Result of a successful correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCorrection {
    /// The full draft after the substitution.
    pub text: String,
    /// Char offset where the replaced token starts.
    pub token_start: usize,
    /// Char length of the token before the fix.
    pub old_len: usize,
    /// Char length of the token after the fix.
    pub new_len: usize,
}

impl AppliedCorrection {
    /// Map a char offset in the old draft to the equivalent offset in the new one.
    pub const fn shift_offset(&self, offset: usize) -> usize {
        if offset <= self.token_start {
            offset
        } else if offset >= self.token_start + self.old_len {
            offset + self.new_len - self.old_len
        } else {
            // Inside the replaced token: keep it inside the replacement.
            let inside = offset - self.token_start;
            if inside < self.new_len {
                offset
            } else {
                self.token_start + self.new_len
            }
        }
    }
}

/// Carry the capitalization of the original word's first letter over to
/// `correction`.
///
/// Only the first character is considered; all-caps or mixed-case
/// originals are not mapped further.
pub fn preserve_case(original_core: &str, correction: &str) -> String {
    let capitalized = original_core.chars().next().is_some_and(char::is_uppercase);
    if !capitalized {
        return correction.to_string();
    }
    let mut chars = correction.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Replace the word core of token `token_index` in `text` with `correction`.
///
/// The draft is re-tokenized first so a stale index from an earlier render
/// is checked against the current text. Returns `None`, leaving the draft
/// untouched, when the index is out of range or the token no longer has a
/// word core.
pub fn apply_correction(text: &str, token_index: usize, correction: &str) -> Option<AppliedCorrection> {
    let tokens = tokenize(text);
    let token = *tokens.get(token_index)?;
    let parts = WordParts::parse(token)?;
    let replacement = format!(
        "{}{}{}",
        parts.leading,
        preserve_case(parts.core, correction),
        parts.trailing
    );

    let mut out = String::with_capacity(text.len() + replacement.len());
    let mut token_start = 0;
    for (idx, piece) in tokens.iter().enumerate() {
        if idx < token_index {
            token_start += piece.chars().count();
        }
        if idx == token_index {
            out.push_str(&replacement);
        } else {
            out.push_str(piece);
        }
    }

    tracing::debug!(token_index, from = token, to = %replacement, "applied correction");
    Some(AppliedCorrection {
        text: out,
        token_start,
        old_len: token.chars().count(),
        new_len: replacement.chars().count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_case_capitalized_original() {
        assert_eq!(preserve_case("Todays", "today's"), "Today's");
    }

    #[test]
    fn test_preserve_case_lowercase_original() {
        assert_eq!(preserve_case("todays", "today's"), "today's");
    }

    #[test]
    fn test_preserve_case_only_looks_at_first_letter() {
        assert_eq!(preserve_case("DONT", "don't"), "Don't");
        assert_eq!(preserve_case("dONT", "don't"), "don't");
    }

    #[test]
    fn test_preserve_case_leading_apostrophe_is_not_capital() {
        assert_eq!(preserve_case("'tis", "it is"), "it is");
    }

    #[test]
    fn test_preserve_case_empty_correction() {
        assert_eq!(preserve_case("Word", ""), "");
    }

    #[test]
    fn test_apply_correction_capitalized() {
        let applied = apply_correction("Todays weather", 0, "today's").unwrap();
        assert_eq!(applied.text, "Today's weather");
    }

    #[test]
    fn test_apply_correction_lowercase() {
        let applied = apply_correction("all of todays news", 4, "today's").unwrap();
        assert_eq!(applied.text, "all of today's news");
    }

    #[test]
    fn test_apply_correction_keeps_trailing_punctuation() {
        let applied = apply_correction("I dont, really", 2, "don't").unwrap();
        assert_eq!(applied.text, "I don't, really");
        assert_eq!(applied.token_start, 2);
        assert_eq!(applied.old_len, 5);
        assert_eq!(applied.new_len, 6);
    }

    #[test]
    fn test_apply_correction_stale_index_is_noop() {
        assert_eq!(apply_correction("one two", 9, "three"), None);
    }

    #[test]
    fn test_apply_correction_non_word_token_is_noop() {
        assert_eq!(apply_correction("wait ... what", 2, "x"), None);
        assert_eq!(apply_correction("wait ... what", 1, "x"), None);
    }

    #[test]
    fn test_apply_correction_preserves_other_whitespace() {
        let text = "first\n\n  Goverments\tact";
        let applied = apply_correction(text, 2, "governments").unwrap();
        assert_eq!(applied.text, "first\n\n  Governments\tact");
    }

    #[test]
    fn test_shift_offset_after_token_moves_by_delta() {
        let applied = apply_correction("I dont, really", 2, "don't").unwrap();
        assert_eq!(applied.shift_offset(0), 0);
        assert_eq!(applied.shift_offset(2), 2);
        assert_eq!(applied.shift_offset(14), 15);
        assert_eq!(applied.shift_offset(4), 4);
    }

    #[test]
    fn test_shift_offset_inside_shrinking_token_clamps() {
        let applied = apply_correction("aa noww bb", 2, "now").unwrap();
        assert_eq!(applied.text, "aa now bb");
        // Cursor just before the last "w" lands at the end of "now".
        assert_eq!(applied.shift_offset(6), 6);
        assert_eq!(applied.shift_offset(7), 6);
        assert_eq!(applied.shift_offset(9), 8);
    }
}
