//! Backward nearest-preceding-open-tag scan for HTML buffers.
//!
//! This is a heuristic, not a balanced-tag matcher: it returns the closest
//! opening tag before the cursor even when that tag has already been closed.
//! Kept as documented behavior — downstream expectations depend on it.

use regex::Regex;

/// How much of the buffer after a `<` is inspected when classifying it.
const SNIPPET_LEN: usize = 200;

/// Walk backward from `cursor` to the nearest `<` that opens a tag and
/// return its name as written in the source. Returns `None` when no `<`
/// precedes the cursor.
///
/// # Panics
///
/// Panics if the hardcoded opening-tag regex is invalid (compile-time
/// invariant).
pub fn enclosing_tag_name(text: &str, cursor: usize) -> Option<String> {
    let opening = Regex::new(r"^<([A-Za-z][A-Za-z0-9:-]*)").expect("valid regex");
    let mut search_end = floor_char_boundary(text, cursor.min(text.len()));

    loop {
        let idx = text[..search_end].rfind('<')?;
        let snippet_end = floor_char_boundary(text, (idx + SNIPPET_LEN).min(text.len()));
        let snippet = &text[idx..snippet_end];

        if !snippet.starts_with("</") && !snippet.starts_with("<!") && !snippet.starts_with("<?")
            && let Some(cap) = opening.captures(snippet)
            && let Some(name) = cap.get(1)
        {
            return Some(name.as_str().to_string());
        }

        // Close tag, declaration, processing instruction, or stray `<`:
        // keep scanning further back.
        search_end = idx;
    }
}

/// Largest char-boundary offset `<= index`.
fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
