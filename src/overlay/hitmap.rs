use crate::annotate::{Annotations, Suggestion};

use super::layout::{Layout, TokenRect};

/// Width of the hover card in columns.
pub const TOOLTIP_WIDTH: u16 = 36;
/// Height of the hover card in rows, borders included.
pub const TOOLTIP_HEIGHT: u16 = 6;

/// A horizontal run of one flagged token on one layout row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub row: usize,
    pub start: u16,
    /// Exclusive.
    pub end: u16,
    pub token_index: usize,
}

/// Pointer targets for flagged tokens.
///
/// Only flagged tokens are targets; plain text and whitespace fall through
/// to the editor underneath.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    targets: Vec<HitTarget>,
}

impl HitMap {
    pub fn build(layout: &Layout, annotations: &Annotations) -> Self {
        let mut targets = Vec::new();
        for (row_idx, row) in layout.rows().iter().enumerate() {
            let mut current: Option<HitTarget> = None;
            for glyph in &row.glyphs {
                let flagged = annotations.is_flagged(glyph.token_index);
                match current.as_mut() {
                    Some(t) if flagged && t.token_index == glyph.token_index => {
                        t.end = glyph.col + glyph.width;
                    }
                    _ => {
                        if let Some(done) = current.take() {
                            targets.push(done);
                        }
                        if flagged {
                            current = Some(HitTarget {
                                row: row_idx,
                                start: glyph.col,
                                end: glyph.col + glyph.width,
                                token_index: glyph.token_index,
                            });
                        }
                    }
                }
            }
            if let Some(done) = current {
                targets.push(done);
            }
        }
        Self { targets }
    }

    /// Flagged token under layout position `(row, col)`.
    pub fn token_at(&self, row: usize, col: u16) -> Option<usize> {
        self.targets
            .iter()
            .find(|t| t.row == row && col >= t.start && col < t.end)
            .map(|t| t.token_index)
    }

    pub fn targets(&self) -> &[HitTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Card position relative to the top-left of the editor area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TooltipPosition {
    pub top: u16,
    pub left: u16,
}

/// Place a hover card next to a token.
///
/// The card sits one row below the token, left-aligned with it. It is
/// shifted left so it never overflows the right edge, and flipped above the
/// token when there is no room below but room above.
pub fn place_tooltip(
    anchor: TokenRect,
    scroll: usize,
    container: (u16, u16),
    card: (u16, u16),
) -> TooltipPosition {
    let (container_w, container_h) = container;
    let (card_w, card_h) = card;
    let to_screen = |row: usize| u16::try_from(row.saturating_sub(scroll)).unwrap_or(u16::MAX);
    let token_top = to_screen(anchor.top);
    let below = to_screen(anchor.bottom).saturating_add(1);

    let top = if below.saturating_add(card_h) > container_h && token_top >= card_h {
        token_top - card_h
    } else {
        below
    };
    let left = if anchor.left.saturating_add(card_w) > container_w {
        container_w.saturating_sub(card_w)
    } else {
        anchor.left
    };
    TooltipPosition { top, left }
}

/// The open hover card.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    pub token_index: usize,
    /// Token text as it appears in the draft, punctuation included.
    pub word: String,
    pub suggestion: Suggestion,
    pub position: TooltipPosition,
}

impl HoverState {
    /// Whether the editor-relative cell `(row, col)` is inside the card.
    pub fn contains(&self, row: u16, col: u16) -> bool {
        let TooltipPosition { top, left } = self.position;
        row >= top
            && row < top.saturating_add(TOOLTIP_HEIGHT)
            && col >= left
            && col < left.saturating_add(TOOLTIP_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::TypoDictionary;

    fn build(text: &str, width: u16) -> (Annotations, Layout, HitMap) {
        let notes = Annotations::compute(text, &TypoDictionary::builtin(), &[]);
        let layout = Layout::new(&notes.tokens(), width);
        let map = HitMap::build(&layout, &notes);
        (notes, layout, map)
    }

    #[test]
    fn test_only_flagged_tokens_are_targets() {
        let (_, _, map) = build("I dont know", 40);
        assert_eq!(map.len(), 1);
        assert_eq!(map.token_at(0, 2), Some(2));
        assert_eq!(map.token_at(0, 5), Some(2));
        assert_eq!(map.token_at(0, 6), None);
        assert_eq!(map.token_at(0, 0), None);
    }

    #[test]
    fn test_wrapped_flagged_word_has_a_target_per_row() {
        let (_, _, map) = build("ab technologyy", 8);
        let rows: Vec<usize> = map.targets().iter().map(|t| t.row).collect();
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(map.token_at(1, 3), Some(2));
    }

    #[test]
    fn test_adjacent_rows_do_not_merge() {
        let (_, _, map) = build("dont\ndont", 20);
        assert_eq!(map.len(), 2);
        assert_eq!(map.token_at(1, 0), Some(2));
    }

    #[test]
    fn test_tooltip_below_token() {
        let anchor = TokenRect { top: 2, bottom: 2, left: 5, right: 9 };
        let pos = place_tooltip(anchor, 0, (80, 24), (TOOLTIP_WIDTH, TOOLTIP_HEIGHT));
        assert_eq!(pos, TooltipPosition { top: 3, left: 5 });
    }

    #[test]
    fn test_tooltip_shifts_left_at_right_edge() {
        let anchor = TokenRect { top: 0, bottom: 0, left: 70, right: 76 };
        let pos = place_tooltip(anchor, 0, (80, 24), (TOOLTIP_WIDTH, TOOLTIP_HEIGHT));
        assert_eq!(pos.left, 80 - TOOLTIP_WIDTH);
    }

    #[test]
    fn test_tooltip_flips_above_near_bottom() {
        let anchor = TokenRect { top: 21, bottom: 21, left: 0, right: 4 };
        let pos = place_tooltip(anchor, 0, (80, 24), (TOOLTIP_WIDTH, TOOLTIP_HEIGHT));
        assert_eq!(pos.top, 21 - TOOLTIP_HEIGHT);
    }

    #[test]
    fn test_tooltip_accounts_for_scroll() {
        let anchor = TokenRect { top: 12, bottom: 12, left: 0, right: 4 };
        let pos = place_tooltip(anchor, 10, (80, 24), (TOOLTIP_WIDTH, TOOLTIP_HEIGHT));
        assert_eq!(pos.top, 3);
    }

    #[test]
    fn test_tooltip_stays_below_in_tiny_container() {
        let anchor = TokenRect { top: 1, bottom: 1, left: 0, right: 4 };
        let pos = place_tooltip(anchor, 0, (20, 4), (TOOLTIP_WIDTH, TOOLTIP_HEIGHT));
        assert_eq!(pos, TooltipPosition { top: 2, left: 0 });
    }

    #[test]
    fn test_hover_contains() {
        let hover = HoverState {
            token_index: 0,
            word: "dont".into(),
            suggestion: Suggestion::new("don't", "Missing apostrophe."),
            position: TooltipPosition { top: 3, left: 5 },
        };
        assert!(hover.contains(3, 5));
        assert!(hover.contains(3 + TOOLTIP_HEIGHT - 1, 5 + TOOLTIP_WIDTH - 1));
        assert!(!hover.contains(2, 5));
        assert!(!hover.contains(3, 5 + TOOLTIP_WIDTH));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn card_never_overflows_container_width(
                left in 0..200u16,
                width in 1..20u16,
                top in 0..100usize,
                height in 0..3usize,
                scroll in 0..100usize,
                container_w in 1..200u16,
                container_h in 1..60u16,
                card_w in 1..200u16,
                card_h in 1..12u16,
            ) {
                prop_assume!(card_w <= container_w);
                let anchor = TokenRect {
                    top,
                    bottom: top + height,
                    left,
                    right: left.saturating_add(width),
                };
                let pos = place_tooltip(anchor, scroll, (container_w, container_h), (card_w, card_h));
                prop_assert!(pos.left + card_w <= container_w);
                prop_assert!(pos.left <= left);
            }

            #[test]
            fn flipped_card_never_covers_token(
                top in 0..40usize,
                container_h in 1..40u16,
            ) {
                let anchor = TokenRect { top, bottom: top, left: 0, right: 4 };
                let container = (80, container_h);
                let pos = place_tooltip(anchor, 0, container, (TOOLTIP_WIDTH, TOOLTIP_HEIGHT));
                let token_row = u16::try_from(top).unwrap();
                if pos.top < token_row {
                    prop_assert!(pos.top + TOOLTIP_HEIGHT <= token_row);
                } else {
                    prop_assert_eq!(pos.top, token_row + 1);
                }
            }
        }
    }
}
