//! Reference orchestration: strategy dispatch, fallback entry, dedup, and
//! final text formatting.

use crate::grammar::ScriptDialect;
use crate::locator;
use crate::python;
use crate::selection::Selection;
use crate::structural;
use crate::types::{Candidate, Entry};

/// A label strategy, selected once per call from the file extension.
/// Strategies are independent and individually testable; adding a language
/// means adding a variant here, not touching the orchestration below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Nearest-preceding-open-tag lookup for `.html`/`.htm`.
    HtmlTag,
    /// Indentation block parsing for `.py`.
    Python,
    /// Syntax-tree traversal for the TS/JS family.
    Structural(ScriptDialect),
}

impl Strategy {
    /// Explicit extension → strategy mapping (expects a lower-cased
    /// extension without the dot).
    pub fn for_extension(ext: &str) -> Option<Self> {
        if let Some(dialect) = ScriptDialect::for_extension(ext) {
            return Some(Self::Structural(dialect));
        }
        match ext {
            "py" => Some(Self::Python),
            "htm" | "html" => Some(Self::HtmlTag),
            _ => None,
        }
    }

    /// Run the strategy. Total: malformed or unrecognized input yields no
    /// candidates, never an error.
    pub fn candidates(self, text: &str, selection: &Selection) -> Vec<Candidate> {
        match self {
            Self::HtmlTag => html_tag_candidates(text, selection),
            Self::Python => python::candidates(text, selection),
            Self::Structural(dialect) => structural::candidates(text, selection, dialect),
        }
    }
}

/// One entry naming the tag enclosing the focus position, if any.
fn html_tag_candidates(text: &str, selection: &Selection) -> Vec<Candidate> {
    match locator::enclosing_tag_name(text, selection.focus()) {
        Some(name) => vec![Candidate {
            label: Some(name),
            lines: selection.line_span(),
        }],
        None => Vec::new(),
    }
}

/// Resolve entries for one document. Never returns an empty list: when the
/// strategy produces nothing — or no strategy exists for the extension — a
/// single unlabeled entry for the selection's own line range takes its place.
pub fn resolve(path: &str, ext: &str, text: &str, selection: &Selection) -> Vec<Entry> {
    let candidates = match Strategy::for_extension(ext) {
        Some(strategy) => strategy.candidates(text, selection),
        None => Vec::new(),
    };

    let mut entries: Vec<Entry> = candidates
        .into_iter()
        .map(|c| Entry {
            label: c.label,
            lines: c.lines.render(),
            path: path.to_string(),
        })
        .collect();

    if entries.is_empty() {
        entries.push(Entry {
            label: None,
            lines: selection.line_span().render(),
            path: path.to_string(),
        });
    }

    entries
}

/// Render entries as the final reference text: one line each, deduplicated
/// by fully rendered form, first-seen order preserved.
pub fn format_entries(entries: &[Entry]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for entry in entries {
        let line = entry.render();
        if !lines.contains(&line) {
            lines.push(line);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests unwrap on fixture input")]
mod tests {
    use super::*;
    use crate::selection;

    #[test]
    fn extension_mapping_covers_all_strategies() {
        assert_eq!(Strategy::for_extension("py"), Some(Strategy::Python));
        assert_eq!(Strategy::for_extension("html"), Some(Strategy::HtmlTag));
        assert_eq!(Strategy::for_extension("htm"), Some(Strategy::HtmlTag));
        assert!(matches!(
            Strategy::for_extension("ts"),
            Some(Strategy::Structural(_))
        ));
        assert!(matches!(
            Strategy::for_extension("jsx"),
            Some(Strategy::Structural(_))
        ));
        assert_eq!(Strategy::for_extension("rb"), None);
    }

    #[test]
    fn unknown_extension_falls_back_to_unlabeled_entry() {
        let text = "some text\nmore text\n";
        let sel = selection::parse("1:1-2:5", text).unwrap();
        let entries = resolve("notes.txt", "txt", text, &sel);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].render(), "notes.txt:1-2");
    }

    #[test]
    fn empty_selection_on_blank_line_yields_exactly_one_unlabeled_entry() {
        let text = "\n\n\n";
        let sel = selection::parse("2:1", text).unwrap();
        let entries = resolve("src/a.ts", "ts", text, &sel);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].render(), "src/a.ts:2");
    }

    #[test]
    fn html_entry_names_enclosing_tag() {
        let text = "<div><span>cursor_here</span></div>";
        let col = text.find("cursor_here").unwrap() + 3;
        let sel = selection::parse(&format!("1:{col}"), text).unwrap();
        let entries = resolve("page.html", "html", text, &sel);
        assert_eq!(entries[0].render(), "page.html:1 span");
    }

    #[test]
    fn class_span_selection_end_to_end() {
        let text = "class Widget {\n  m1() { return 1; }\n  m2() { return 1; }\n}\n";
        let sel = selection::parse("1:1-4:2", text).unwrap();
        let entries = resolve("src/a.ts", "ts", text, &sel);
        let rendered = format_entries(&entries);
        assert_eq!(rendered, "src/a.ts:2 Widget.m1\nsrc/a.ts:3 Widget.m2");
    }

    #[test]
    fn identical_rendered_lines_are_deduplicated_in_order() {
        let entry = |lines: &str, label: &str| Entry {
            label: Some(label.to_string()),
            lines: lines.to_string(),
            path: "a.py".to_string(),
        };
        let entries = vec![entry("3", "f"), entry("5", "g"), entry("3", "f")];
        assert_eq!(format_entries(&entries), "a.py:3 f\na.py:5 g");
    }
}
