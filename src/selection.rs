//! Selection argument parsing and position-to-offset conversion.

use crate::error::Error;
use crate::types::LineSpan;

/// A normalized selection over a document: byte offsets with `start <= end`
/// regardless of the order the endpoints were given, plus the 0-based line
/// indices of both ends. An empty selection collapses to a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// End byte offset (exclusive).
    pub end: usize,
    /// 0-based line index of the end position.
    pub end_line: u32,
    /// Start byte offset.
    pub start: usize,
    /// 0-based line index of the start position.
    pub start_line: u32,
}

impl Selection {
    /// The focus position used for enclosing-construct fallback lookups.
    pub fn focus(&self) -> usize {
        self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// 1-based inclusive line span of the selection itself.
    pub fn line_span(&self) -> LineSpan {
        LineSpan {
            end: self.end_line + 1,
            start: self.start_line + 1,
        }
    }

    /// The selected slice of the document. Empty for a bare cursor.
    pub fn selected_text<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Parse a `line:col` or `line:col-line:col` argument (1-based) against the
/// document it selects from. Reversed ranges are normalized; out-of-range
/// lines and columns clamp to the document.
///
/// # Errors
///
/// Returns `Error::InvalidSelection` when the argument is not of the
/// `line:col[-line:col]` form or uses 0 as a line or column.
pub fn parse(spec: &str, text: &str) -> Result<Selection, Error> {
    let (first, second) = match spec.split_once('-') {
        Some((a, b)) => (a, b),
        None => (spec, spec),
    };

    let a = parse_position(first, spec)?;
    let b = parse_position(second, spec)?;
    // (line, col) tuples order lexicographically, which matches document order.
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let (start_line, start) = locate(text, lo);
    let (end_line, end) = locate(text, hi);

    Ok(Selection { end, end_line, start, start_line })
}

/// Resolve a 1-based (line, col) position to a clamped 0-based line index and
/// byte offset. Columns count characters; a column past the end of the line
/// clamps to the line's content end (before the newline).
fn locate(text: &str, position: (u32, u32)) -> (u32, usize) {
    let target_line = usize::try_from(position.0).unwrap_or(usize::MAX).saturating_sub(1);
    let target_col = usize::try_from(position.1).unwrap_or(usize::MAX).saturating_sub(1);

    let mut starts = vec![0_usize];
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(i + 1);
        }
    }

    let line = target_line.min(starts.len().saturating_sub(1));
    let line_start = starts.get(line).copied().unwrap_or(0);
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);
    let content = text[line_start..line_end].trim_end_matches('\r');

    let offset = content
        .char_indices()
        .nth(target_col)
        .map_or(line_start + content.len(), |(i, _)| line_start + i);

    (u32::try_from(line).unwrap_or(u32::MAX), offset)
}

/// Parse one `line:col` endpoint.
///
/// # Errors
///
/// Returns `Error::InvalidSelection` for missing `:`, non-numeric parts,
/// or 0 values (positions are 1-based).
fn parse_position(part: &str, spec: &str) -> Result<(u32, u32), Error> {
    let invalid = |reason: &str| Error::InvalidSelection {
        reason: reason.to_string(),
        spec: spec.to_string(),
    };

    let (line, col) = part.split_once(':').ok_or_else(|| invalid("expected line:col"))?;
    let line: u32 = line.trim().parse().map_err(|_err| invalid("line is not a number"))?;
    let col: u32 = col.trim().parse().map_err(|_err| invalid("column is not a number"))?;
    if line == 0 || col == 0 {
        return Err(invalid("lines and columns are 1-based"));
    }

    Ok((line, col))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests unwrap on fixture input")]
mod tests {
    use super::*;

    const TEXT: &str = "alpha\nbravo charlie\ndelta\n";

    #[test]
    fn bare_position_is_empty_selection() {
        let sel = parse("2:3", TEXT).unwrap();
        assert!(sel.is_empty());
        assert_eq!(sel.start, 8); // "alpha\n" + 2 chars
        assert_eq!(sel.start_line, 1);
        assert_eq!(sel.line_span().render(), "2");
    }

    #[test]
    fn range_selects_slice() {
        let sel = parse("1:1-1:6", TEXT).unwrap();
        assert_eq!(sel.selected_text(TEXT), "alpha");
    }

    #[test]
    fn reversed_range_is_normalized() {
        let forward = parse("1:2-3:4", TEXT).unwrap();
        let reversed = parse("3:4-1:2", TEXT).unwrap();
        assert_eq!(forward, reversed);
        assert!(forward.start <= forward.end);
    }

    #[test]
    fn column_past_line_end_clamps() {
        let sel = parse("1:99", TEXT).unwrap();
        assert_eq!(sel.start, 5); // end of "alpha"
    }

    #[test]
    fn line_past_eof_clamps_to_last_line() {
        let sel = parse("99:1", TEXT).unwrap();
        // Text ends with a newline, so the final (empty) line is addressable.
        assert_eq!(sel.start, TEXT.len());
    }

    #[test]
    fn zero_position_is_rejected() {
        assert!(parse("0:1", TEXT).is_err());
        assert!(parse("1:0", TEXT).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("abc", TEXT).is_err());
        assert!(parse("1:x", TEXT).is_err());
    }

    #[test]
    fn empty_document_clamps_to_origin() {
        let sel = parse("5:5", "").unwrap();
        assert_eq!(sel.start, 0);
        assert_eq!(sel.start_line, 0);
    }
}
