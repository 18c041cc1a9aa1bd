//! Core domain types for copyref candidates and entries.

use serde::Serialize;

/// A label strategy's raw output: where the label points, and the label
/// itself when one could be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Optional human-readable label (`Class.method`, `foo`, `div`).
    pub label: Option<String>,
    /// Line range the candidate describes.
    pub lines: LineSpan,
}

/// One fully resolved output unit, ready for text or JSON rendering.
/// Rendered form: `{path}:{lines} {label}`, label segment omitted when absent.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Optional reference label.
    pub label: Option<String>,
    /// Rendered line text — `"N"` or `"start-end"`, 1-based.
    pub lines: String,
    /// File path exactly as the caller supplied it.
    pub path: String,
}

impl Entry {
    /// The user-facing reference line for this entry.
    pub fn render(&self) -> String {
        match &self.label {
            Some(label) => format!("{}:{} {label}", self.path, self.lines),
            None => format!("{}:{}", self.path, self.lines),
        }
    }
}

/// Inclusive 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Last line, >= `start`.
    pub end: u32,
    /// First line.
    pub start: u32,
}

impl LineSpan {
    /// A span covering exactly one line.
    pub fn single(line: u32) -> Self {
        Self { end: line, start: line }
    }

    /// Render as `"N"` for single lines, `"start-end"` otherwise.
    pub fn render(&self) -> String {
        if self.start == self.end {
            self.start.to_string()
        } else {
            format!("{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_renders_bare_number() {
        assert_eq!(LineSpan::single(7).render(), "7");
    }

    #[test]
    fn multi_line_renders_range() {
        assert_eq!(LineSpan { end: 9, start: 3 }.render(), "3-9");
    }

    #[test]
    fn entry_omits_label_segment_when_absent() {
        let entry = Entry {
            label: None,
            lines: "4".to_string(),
            path: "src/a.ts".to_string(),
        };
        assert_eq!(entry.render(), "src/a.ts:4");
    }

    #[test]
    fn entry_appends_label_after_single_space() {
        let entry = Entry {
            label: Some("Config.validate".to_string()),
            lines: "12-14".to_string(),
            path: "src/a.ts".to_string(),
        };
        assert_eq!(entry.render(), "src/a.ts:12-14 Config.validate");
    }
}
