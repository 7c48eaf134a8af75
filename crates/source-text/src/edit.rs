//! Span-addressed text replacements.

use crate::Span;

/// Replace the text under `range` with `replacement`.
///
/// An empty range is a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Span,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: Span, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(Span::from_offsets(at, at), text)
    }
}

/// Applies `edits` to `text`.
///
/// Edits are ordered by start offset; ties keep their original order. An
/// edit overlapping one already applied, or reaching past the text, is
/// skipped.
pub fn apply_edits(text: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by_key(|edit| edit.range.start);

    let mut out = String::with_capacity(
        text.len() + edits.iter().map(|e| e.replacement.len()).sum::<usize>(),
    );
    let mut last = 0;
    for edit in edits {
        let (start, end) = (edit.range.start_usize(), edit.range.end_usize());
        if start < last || end > text.len() || !text.is_char_boundary(start) {
            continue;
        }
        out.push_str(&text[last..start]);
        out.push_str(&edit.replacement);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_replacements_and_insertions() {
        let text = "this.setState({ a: 1 })";
        let edits = vec![
            TextEdit::insert(14, "this.$data, "),
            TextEdit::replace(Span::from_offsets(0, 13), "Object.assign"),
        ];
        assert_eq!(
            apply_edits(text, edits),
            "Object.assign(this.$data, { a: 1 })"
        );
    }

    #[test]
    fn test_overlapping_edit_is_skipped() {
        let text = "abcdef";
        let edits = vec![
            TextEdit::replace(Span::from_offsets(0, 4), "X"),
            TextEdit::replace(Span::from_offsets(2, 3), "Y"),
        ];
        assert_eq!(apply_edits(text, edits), "Xef");
    }
}
