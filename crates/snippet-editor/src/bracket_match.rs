//! Bracket-Match Selector
//!
//! Finds the bracket complementing the one next to the caret and returns the span covering both.
//!
//! The search is purely textual: brackets inside strings and comments are matched like any
//! other.

use snippet_editor_lang::BracketPair;
use std::ops::Range;

/// Find the complement of the bracket at `anchor` in `chars`.
///
/// Openers search forward and closers search backward. A nesting counter starts at 1, goes up on
/// every further occurrence of the anchor character and down on every complement; the complement
/// that brings it to 0 is the match.
pub fn find_matching_bracket(chars: &[char], anchor: usize, pairs: &[BracketPair]) -> Option<usize> {
    let ch = *chars.get(anchor)?;
    let pair = pairs.iter().find(|p| p.open == ch || p.close == ch)?;
    let complement = pair.complement(ch)?;
    let forward = ch == pair.open;

    let mut depth = 1usize;
    let mut step = |i: usize| {
        let c = chars[i];
        if c == ch {
            depth += 1;
        } else if c == complement {
            depth -= 1;
        }
        depth == 0
    };

    if forward {
        (anchor + 1..chars.len()).find(|&i| step(i))
    } else {
        (0..anchor).rev().find(|&i| step(i))
    }
}

/// Select the bracket span around the caret.
///
/// The anchor is the character just before the caret if it is a bracket, otherwise the character
/// at the caret. Returns the half-open range covering both brackets, or `None` when there is no
/// anchor or no match (the selection should stay unchanged).
pub fn select_bracket_span(
    text: &str,
    caret_offset: usize,
    pairs: &[BracketPair],
) -> Option<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    let is_bracket = |i: usize| {
        chars
            .get(i)
            .is_some_and(|c| pairs.iter().any(|p| p.complement(*c).is_some()))
    };

    let anchor = if caret_offset > 0 && is_bracket(caret_offset - 1) {
        caret_offset - 1
    } else if is_bracket(caret_offset) {
        caret_offset
    } else {
        return None;
    };

    let matched = find_matching_bracket(&chars, anchor, pairs)?;
    Some(anchor.min(matched)..anchor.max(matched) + 1)
}
