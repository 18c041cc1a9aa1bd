//! Indented, line-oriented HTML rendering over the token stream.
//!
//! Depth underflow from unmatched close tags is clamped, never rejected —
//! rendering is total over any token sequence the tokenizer can produce.

use crate::tokenizer::Token;

/// Rendering knobs. Defaults reproduce two-space indents and the 60-character
/// raw-text inlining threshold.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Maximum length for inlining a single-line raw-text body.
    pub inline_text_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            inline_text_limit: 60,
        }
    }
}

/// Elements whose text content must not be reformatted.
fn is_whitespace_preserving(name: &str) -> bool {
    matches!(name, "pre" | "code" | "textarea")
}

/// Render tokens as indented, line-oriented HTML. No trailing newline.
pub fn render(tokens: &[Token], options: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut depth = 0_usize;
    // Open non-self-closing elements, for whitespace-preservation checks.
    let mut open_elements: Vec<String> = Vec::new();
    let mut i = 0_usize;

    while i < tokens.len() {
        match &tokens[i] {
            Token::Comment(content) => {
                lines.push(format!("{}<!--{content}-->", pad(depth, options)));
            },
            Token::Doctype(content) => {
                lines.push(format!("{}<!{content}>", pad(depth, options)));
            },
            Token::EndTag { name } => {
                depth = depth.saturating_sub(1);
                lines.push(format!("{}</{name}>", pad(depth, options)));
                if let Some(idx) = open_elements.iter().rposition(|n| n == name) {
                    open_elements.remove(idx);
                }
            },
            Token::RawText { name, attrs, content } => {
                render_raw_text(&mut lines, depth, options, name, attrs, content);
            },
            Token::StartTag { name, attrs, self_closing } => {
                let open = open_tag_text(name, attrs, *self_closing);
                if *self_closing {
                    lines.push(format!("{}{open}", pad(depth, options)));
                } else if let Some(text) = inline_element_text(tokens, i, name) {
                    // <name>text</name> collapsed to one line; the two
                    // lookahead tokens are consumed.
                    lines.push(format!("{}{open}{text}</{name}>", pad(depth, options)));
                    i += 2;
                } else {
                    lines.push(format!("{}{open}", pad(depth, options)));
                    depth += 1;
                    open_elements.push(name.clone());
                }
            },
            Token::Text(content) => {
                render_text(&mut lines, depth, options, &open_elements, content);
            },
        }
        i += 1;
    }

    lines.join("\n")
}

/// Indentation prefix for a nesting depth.
fn pad(depth: usize, options: &RenderOptions) -> String {
    " ".repeat(depth * options.indent_width)
}

/// Reconstruct an opening tag.
fn open_tag_text(name: &str, attrs: &str, self_closing: bool) -> String {
    match (attrs.is_empty(), self_closing) {
        (true, true) => format!("<{name} />"),
        (true, false) => format!("<{name}>"),
        (false, true) => format!("<{name} {attrs} />"),
        (false, false) => format!("<{name} {attrs}>"),
    }
}

/// Lookahead for the single-line element collapse: the next two tokens must
/// be exactly (text, matching end tag) and the text, trimmed, must be
/// non-empty with no embedded line break.
fn inline_element_text<'a>(tokens: &'a [Token], i: usize, name: &str) -> Option<&'a str> {
    let Some(Token::Text(text)) = tokens.get(i + 1) else {
        return None;
    };
    let Some(Token::EndTag { name: end_name }) = tokens.get(i + 2) else {
        return None;
    };
    if end_name != name {
        return None;
    }
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
        return None;
    }
    Some(trimmed)
}

/// Emit a text token. Inside pre/code/textarea the content is kept verbatim
/// (blank margin lines stripped, no re-indent); elsewhere it is trimmed and
/// embedded line breaks become numeric character references so the output
/// stays line-oriented.
fn render_text(
    lines: &mut Vec<String>,
    depth: usize,
    options: &RenderOptions,
    open_elements: &[String],
    content: &str,
) {
    if open_elements.iter().any(|n| is_whitespace_preserving(n)) {
        for line in strip_blank_margin(content) {
            lines.push(line.to_string());
        }
        return;
    }

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return;
    }
    let escaped = trimmed.replace('\r', "&#13;").replace('\n', "&#10;");
    lines.push(format!("{}{escaped}", pad(depth, options)));
}

/// Emit a raw-text (style/script) element. Short single-line bodies are
/// inlined; anything else becomes a nested block re-indented relative to its
/// own common margin, so internal formatting survives.
fn render_raw_text(
    lines: &mut Vec<String>,
    depth: usize,
    options: &RenderOptions,
    name: &str,
    attrs: &str,
    content: &str,
) {
    let outer = pad(depth, options);
    let open = open_tag_text(name, attrs, false);
    let body = strip_blank_margin(content);

    if body.is_empty() {
        lines.push(format!("{outer}{open}</{name}>"));
        return;
    }

    if let [only] = body.as_slice()
        && only.trim().len() < options.inline_text_limit
    {
        lines.push(format!("{outer}{open}{}</{name}>", only.trim()));
        return;
    }

    let margin = common_leading_whitespace(&body);
    let inner = pad(depth + 1, options);
    lines.push(format!("{outer}{open}"));
    for line in &body {
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{inner}{}", &line[margin..]));
        }
    }
    lines.push(format!("{outer}</{name}>"));
}

/// Split into lines and drop leading/trailing blank lines.
fn strip_blank_margin(content: &str) -> Vec<&str> {
    let mut body: Vec<&str> = content.lines().collect();
    while body.first().is_some_and(|l| l.trim().is_empty()) {
        body.remove(0);
    }
    while body.last().is_some_and(|l| l.trim().is_empty()) {
        body.pop();
    }
    body
}

/// Byte length of the whitespace prefix shared by all non-blank lines.
/// Leading whitespace is ASCII spaces/tabs, so byte slicing stays valid.
fn common_leading_whitespace(body: &[&str]) -> usize {
    body.iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0)
}
