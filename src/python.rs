//! Indentation-driven Python block parsing and label selection.
//!
//! No syntax tree: a single forward scan with a stack of currently open
//! blocks, keyed by indentation. Good enough for labeling, degrades to "no
//! label" on anything it cannot place.

use regex::Regex;

use crate::selection::Selection;
use crate::types::{Candidate, LineSpan};

/// Indentation units contributed by one tab.
const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Class,
    Def,
}

/// A `class`/`def` header plus its indentation-derived range of influence.
/// Blocks form a tree by nesting of line ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub name: String,
    /// `Class.method` when the nearest open ancestor is a class, else bare.
    pub label: String,
    /// Indentation units of the header line.
    pub indent: usize,
    /// 0-based, inclusive.
    pub start_line: usize,
    /// 0-based, inclusive. Fixed when a later line at the same or lower
    /// indentation closes the block, or at end of input.
    pub end_line: usize,
}

/// Scan the source into a flat, source-ordered list of blocks.
///
/// Blank lines and `#` comment lines neither open nor close blocks. A block
/// closes when a later significant line's indentation is `<=` its own —
/// Python bodies are strictly deeper-indented.
///
/// # Panics
///
/// Panics if the hardcoded header regexes are invalid (compile-time
/// invariant).
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let class_header = Regex::new(r"^class\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex");
    let def_header =
        Regex::new(r"^(?:async\s+)?def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid regex");

    let mut blocks: Vec<Block> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut last_line = 0_usize;

    for (line_no, line) in text.lines().enumerate() {
        last_line = line_no;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indent = indent_width(line);
        close_shallower_blocks(&mut blocks, &mut open, indent, line_no);

        let header = match_header(trimmed, &class_header, &def_header);
        let Some((kind, name)) = header else {
            continue;
        };

        let label = qualified_label(&blocks, &open, kind, &name);
        let idx = blocks.len();
        blocks.push(Block {
            kind,
            name,
            label,
            indent,
            start_line: line_no,
            end_line: line_no,
        });
        open.push(idx);
    }

    for &idx in &open {
        if let Some(block) = blocks.get_mut(idx) {
            block.end_line = last_line;
        }
    }

    blocks
}

/// Pop and close every open block whose indentation is `>=` the current
/// line's, fixing its end line to the previous line.
fn close_shallower_blocks(
    blocks: &mut [Block],
    open: &mut Vec<usize>,
    indent: usize,
    line_no: usize,
) {
    while let Some(&top) = open.last() {
        let Some(block) = blocks.get_mut(top) else {
            return;
        };
        if block.indent < indent {
            return;
        }
        block.end_line = line_no.saturating_sub(1);
        open.pop();
    }
}

/// Try both header forms against a trimmed line.
fn match_header(
    trimmed: &str,
    class_header: &Regex,
    def_header: &Regex,
) -> Option<(BlockKind, String)> {
    if let Some(cap) = class_header.captures(trimmed) {
        return Some((BlockKind::Class, cap.get(1)?.as_str().to_string()));
    }
    if let Some(cap) = def_header.captures(trimmed) {
        return Some((BlockKind::Def, cap.get(1)?.as_str().to_string()));
    }
    None
}

/// Qualify a `def` with the nearest enclosing class still on the stack.
fn qualified_label(blocks: &[Block], open: &[usize], kind: BlockKind, name: &str) -> String {
    if kind == BlockKind::Def
        && let Some(class_block) = open
            .iter()
            .rev()
            .filter_map(|&i| blocks.get(i))
            .find(|b| b.kind == BlockKind::Class)
    {
        return format!("{}.{name}", class_block.name);
    }
    name.to_string()
}

/// Leading indentation in units: spaces count 1, tabs count 4. Mixed
/// indentation is not otherwise normalized.
fn indent_width(line: &str) -> usize {
    let mut width = 0_usize;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => break,
        }
    }
    width
}

/// The label-selection policy: first non-empty step wins.
///
/// 1. Every `def` whose header line falls inside the selected lines.
/// 2. A selected dotted identifier chain, bare identifier, or `class Name`
///    header, used literally.
/// 3. The smallest `def` block containing the cursor line.
/// 4. The smallest `class` block containing the cursor line.
pub fn candidates(text: &str, selection: &Selection) -> Vec<Candidate> {
    let blocks = parse_blocks(text);
    let start_line = usize::try_from(selection.start_line).unwrap_or(usize::MAX);
    let end_line = usize::try_from(selection.end_line).unwrap_or(usize::MAX);

    let selected_defs: Vec<Candidate> = blocks
        .iter()
        .filter(|b| {
            b.kind == BlockKind::Def && b.start_line >= start_line && b.start_line <= end_line
        })
        .map(|b| Candidate {
            label: Some(b.label.clone()),
            lines: LineSpan::single(u32::try_from(b.start_line).unwrap_or(u32::MAX) + 1),
        })
        .collect();
    if !selected_defs.is_empty() {
        return selected_defs;
    }

    if !selection.is_empty()
        && let Some(label) = literal_selection_label(selection.selected_text(text))
    {
        return vec![Candidate {
            label: Some(label),
            lines: selection.line_span(),
        }];
    }

    let cursor_line = start_line;
    let enclosing = smallest_block(&blocks, cursor_line, BlockKind::Def)
        .or_else(|| smallest_block(&blocks, cursor_line, BlockKind::Class));
    match enclosing {
        Some(block) => vec![Candidate {
            label: Some(block.label.clone()),
            lines: selection.line_span(),
        }],
        None => Vec::new(),
    }
}

/// The narrowest block of the given kind whose range contains the line.
fn smallest_block(blocks: &[Block], line: usize, kind: BlockKind) -> Option<&Block> {
    blocks
        .iter()
        .filter(|b| b.kind == kind && b.start_line <= line && line <= b.end_line)
        .min_by_key(|b| b.end_line - b.start_line)
}

/// Recognize literal selections worth echoing back as a label: a dotted
/// identifier chain (line-continuation backslashes and whitespace around
/// dots collapsed), a bare identifier, or a `class Name` header (which
/// yields the class name).
fn literal_selection_label(selected: &str) -> Option<String> {
    let trimmed = selected.trim();
    if trimmed.is_empty() {
        return None;
    }

    let class_header = Regex::new(r"^class\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex");
    if let Some(cap) = class_header.captures(trimmed) {
        return Some(cap.get(1)?.as_str().to_string());
    }

    let continuation = Regex::new(r"\\\s*\n\s*").expect("valid regex");
    let collapsed = continuation.replace_all(trimmed, "");
    let dot_spacing = Regex::new(r"\s*\.\s*").expect("valid regex");
    let cleaned = dot_spacing.replace_all(&collapsed, ".").into_owned();

    let chain = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("valid regex");
    if chain.is_match(&cleaned) {
        return Some(cleaned);
    }
    None
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests unwrap on fixture input")]
mod tests {
    use super::*;
    use crate::selection;

    const SAMPLE: &str = "class A:\n    def m(self):\n        pass\ndef top():\n    pass\n";

    #[test]
    fn blocks_nest_and_qualify() {
        let blocks = parse_blocks(SAMPLE);
        let summary: Vec<(&str, usize, usize)> = blocks
            .iter()
            .map(|b| (b.label.as_str(), b.start_line, b.end_line))
            .collect();
        assert_eq!(summary, vec![("A", 0, 2), ("A.m", 1, 2), ("top", 3, 4)]);
    }

    #[test]
    fn blank_and_comment_lines_do_not_close_blocks() {
        let text = "def f():\n\n    # comment\n    pass\ndef g():\n    pass\n";
        let blocks = parse_blocks(text);
        assert_eq!(blocks[0].label, "f");
        assert_eq!(blocks[0].end_line, 3);
        assert_eq!(blocks[1].label, "g");
    }

    #[test]
    fn sibling_line_at_same_indent_closes_block() {
        let text = "class C:\n    def m(self):\n        pass\n    x = 1\n";
        let blocks = parse_blocks(text);
        // `x = 1` at the def's own indent closes it.
        assert_eq!(blocks[1].label, "C.m");
        assert_eq!(blocks[1].end_line, 2);
        assert_eq!(blocks[0].end_line, 3);
    }

    #[test]
    fn tabs_count_four_units() {
        let text = "class C:\n\tdef m(self):\n\t\tpass\n";
        let blocks = parse_blocks(text);
        assert_eq!(blocks[1].label, "C.m");
        assert_eq!(blocks[1].indent, 4);
    }

    #[test]
    fn async_def_opens_a_def_block() {
        let blocks = parse_blocks("async def fetch():\n    pass\n");
        assert_eq!(blocks[0].kind, BlockKind::Def);
        assert_eq!(blocks[0].label, "fetch");
    }

    #[test]
    fn nested_def_qualifies_with_nearest_class_only() {
        let text = "class Outer:\n    class Inner:\n        def m(self):\n            pass\n";
        let blocks = parse_blocks(text);
        assert_eq!(blocks[2].label, "Inner.m");
    }

    #[test]
    fn selection_spanning_defs_yields_one_entry_each() {
        let sel = selection::parse("1:1-5:1", SAMPLE).unwrap();
        let found = candidates(SAMPLE, &sel);
        let labels: Vec<_> = found.iter().filter_map(|c| c.label.as_deref()).collect();
        assert_eq!(labels, vec!["A.m", "top"]);
        assert_eq!(found[0].lines.render(), "2");
        assert_eq!(found[1].lines.render(), "4");
    }

    #[test]
    fn selected_identifier_is_echoed_literally() {
        let text = "value = settings.db.host\n";
        let sel = selection::parse("1:9-1:25", text).unwrap();
        assert_eq!(sel.selected_text(text), "settings.db.host");
        let found = candidates(text, &sel);
        assert_eq!(found[0].label.as_deref(), Some("settings.db.host"));
    }

    #[test]
    fn dotted_chain_collapses_continuations() {
        assert_eq!(
            literal_selection_label("settings \\\n    .db \\\n    .host"),
            Some("settings.db.host".to_string())
        );
    }

    #[test]
    fn class_header_selection_yields_class_name() {
        assert_eq!(
            literal_selection_label("class Config:"),
            Some("Config".to_string())
        );
    }

    #[test]
    fn cursor_inside_method_falls_back_to_qualified_def() {
        let sel = selection::parse("3:9", SAMPLE).unwrap();
        let found = candidates(SAMPLE, &sel);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label.as_deref(), Some("A.m"));
        assert_eq!(found[0].lines.render(), "3");
    }

    #[test]
    fn cursor_in_class_body_outside_defs_yields_class_name() {
        let text = "class C:\n    x = 1\n    def m(self):\n        pass\n";
        let sel = selection::parse("2:5", text).unwrap();
        let found = candidates(text, &sel);
        assert_eq!(found[0].label.as_deref(), Some("C"));
    }

    #[test]
    fn nothing_matches_outside_any_block() {
        let text = "x = 1\n\ny = 2\n";
        let sel = selection::parse("2:1", text).unwrap();
        assert!(candidates(text, &sel).is_empty());
    }
}
