//! HTML tokenizer: one left-to-right pass producing a flat token stream.
//!
//! Total over its input — every branch advances the cursor, so the scan
//! always terminates, and malformed markup degrades to literal text tokens
//! rather than failing. Known quirk, kept on purpose: any `<!...>` construct
//! (CDATA sections included) tokenizes as a doctype token.

/// A single HTML token in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Comment body between `<!--` and `-->`.
    Comment(String),
    /// Content between `<!` and `>` (e.g. `DOCTYPE html`).
    Doctype(String),
    /// `</name>`; name is stored lower-cased.
    EndTag { name: String },
    /// A style/script element captured whole: tag name, normalized
    /// attributes, and the untouched body text between the tags.
    RawText {
        name: String,
        attrs: String,
        content: String,
    },
    /// `<name attrs>`; `self_closing` covers both an explicit `/>` and the
    /// void-element set.
    StartTag {
        name: String,
        attrs: String,
        self_closing: bool,
    },
    /// Literal text between tags, untrimmed.
    Text(String),
}

/// Elements that never take a closing tag.
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose bodies are captured verbatim, never tokenized as markup.
fn is_raw_text_element(name: &str) -> bool {
    matches!(name, "style" | "script")
}

/// Tokenize an HTML document. Never fails; see the module docs for the
/// degradation rules.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0_usize;

    while pos < input.len() {
        let rest = &input[pos..];

        if let Some(body) = rest.strip_prefix("<!--") {
            pos += 4 + scan_comment(body, &mut tokens);
            continue;
        }

        if let Some(body) = rest.strip_prefix("<!") {
            pos += 2 + scan_doctype(body, &mut tokens);
            continue;
        }

        if let Some(body) = rest.strip_prefix("</")
            && let Some((name, consumed)) = scan_end_tag(body)
        {
            tokens.push(Token::EndTag { name });
            pos += 2 + consumed;
            continue;
        }

        if rest.starts_with('<') {
            if let Some(scan) = scan_start_tag(rest) {
                pos += emit_start_tag(rest, scan, &mut tokens);
            } else {
                // Lone or malformed `<`: degrade to a one-character text
                // token so the cursor always advances.
                tokens.push(Token::Text("<".to_string()));
                pos += 1;
            }
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        tokens.push(Token::Text(rest[..end].to_string()));
        pos += end;
    }

    tokens
}

/// Consume a comment body (text after `<!--`). Returns bytes consumed.
fn scan_comment(body: &str, tokens: &mut Vec<Token>) -> usize {
    match body.find("-->") {
        Some(end) => {
            tokens.push(Token::Comment(body[..end].to_string()));
            end + 3
        },
        None => {
            // Unterminated comment runs to end of input.
            tokens.push(Token::Comment(body.to_string()));
            body.len()
        },
    }
}

/// Consume a `<!...>` body (text after `<!`). Returns bytes consumed.
fn scan_doctype(body: &str, tokens: &mut Vec<Token>) -> usize {
    match body.find('>') {
        Some(end) => {
            tokens.push(Token::Doctype(body[..end].to_string()));
            end + 1
        },
        None => {
            tokens.push(Token::Doctype(body.to_string()));
            body.len()
        },
    }
}

/// Parse `name>` at the start of `body` (text after `</`).
/// Returns the lower-cased name and bytes consumed after the `</`.
fn scan_end_tag(body: &str) -> Option<(String, usize)> {
    let name_len = tag_name_len(body);
    if name_len == 0 || !body[name_len..].starts_with('>') {
        return None;
    }
    Some((body[..name_len].to_ascii_lowercase(), name_len + 1))
}

/// A successfully scanned start tag, before raw-text handling.
struct StartScan {
    name: String,
    attrs: String,
    explicit_self_close: bool,
    /// Total bytes consumed including `<` and `>`.
    consumed: usize,
}

/// Parse a start tag at `rest` (which begins with `<`). Returns `None` when
/// this `<` does not open a tag, in which case the caller degrades it to text.
fn scan_start_tag(rest: &str) -> Option<StartScan> {
    let body = &rest[1..];
    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let name_len = tag_name_len(body);
    let name = body[..name_len].to_ascii_lowercase();
    let close = find_tag_close(&body[name_len..])?;

    let raw_attrs = &body[name_len..name_len + close];
    let trimmed = raw_attrs.trim_end();
    let explicit_self_close = trimmed.ends_with('/');
    let attrs_src = if explicit_self_close {
        &trimmed[..trimmed.len() - 1]
    } else {
        raw_attrs
    };

    Some(StartScan {
        name,
        attrs: normalize_attrs(attrs_src),
        explicit_self_close,
        consumed: 1 + name_len + close + 1,
    })
}

/// Emit a start tag token, or a raw-text token when the tag opens a
/// style/script element with a matching close tag in the remaining input.
/// Returns total bytes consumed from `rest`.
fn emit_start_tag(rest: &str, scan: StartScan, tokens: &mut Vec<Token>) -> usize {
    let self_closing = scan.explicit_self_close || is_void_element(&scan.name);

    if !self_closing && is_raw_text_element(&scan.name) {
        let body = &rest[scan.consumed..];
        let close = format!("</{}>", scan.name);
        if let Some(idx) = find_ascii_case_insensitive(body, &close) {
            tokens.push(Token::RawText {
                name: scan.name,
                attrs: scan.attrs,
                content: body[..idx].to_string(),
            });
            return scan.consumed + idx + close.len();
        }
        // No matching close tag: fall through to an ordinary start tag.
    }

    tokens.push(Token::StartTag {
        name: scan.name,
        attrs: scan.attrs,
        self_closing,
    });
    scan.consumed
}

/// Length of the leading tag-name run (letters, digits, `:`, `-`).
fn tag_name_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b':' || *b == b'-')
        .count()
}

/// Find the byte offset of the `>` that closes the current tag, skipping any
/// `>` inside a quoted attribute value. Returns `None` for an unterminated tag.
fn find_tag_close(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {},
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some(i),
                _ => {},
            },
        }
    }
    None
}

/// Collapse whitespace runs to a single space and trim. Applies everywhere,
/// including inside quoted values — a long-standing quirk kept as-is.
fn normalize_attrs(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
/// The needle is ASCII, so a match position is always a char boundary.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let nee = needle.as_bytes();
    if nee.is_empty() || hay.len() < nee.len() {
        return None;
    }
    (0..=hay.len() - nee.len()).find(|&i| hay[i..i + nee.len()].eq_ignore_ascii_case(nee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_element_with_text() {
        let tokens = tokenize("<div>hello</div>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "div".to_string(),
                    attrs: String::new(),
                    self_closing: false,
                },
                Token::Text("hello".to_string()),
                Token::EndTag { name: "div".to_string() },
            ]
        );
    }

    #[test]
    fn attributes_are_whitespace_normalized() {
        let tokens = tokenize("<a   href=\"x\"\n   class=\"y\">");
        assert_eq!(
            tokens,
            vec![Token::StartTag {
                name: "a".to_string(),
                attrs: "href=\"x\" class=\"y\"".to_string(),
                self_closing: false,
            }]
        );
    }

    #[test]
    fn void_elements_are_self_closing_without_slash() {
        for name in ["br", "img", "meta", "input"] {
            let tokens = tokenize(&format!("<{name}>"));
            assert_eq!(
                tokens,
                vec![Token::StartTag {
                    name: name.to_string(),
                    attrs: String::new(),
                    self_closing: true,
                }],
                "{name} should be void"
            );
        }
    }

    #[test]
    fn explicit_self_close_is_detected() {
        let tokens = tokenize("<use href=\"#icon\" />");
        assert_eq!(
            tokens,
            vec![Token::StartTag {
                name: "use".to_string(),
                attrs: "href=\"#icon\"".to_string(),
                self_closing: true,
            }]
        );
    }

    #[test]
    fn comment_and_doctype() {
        let tokens = tokenize("<!DOCTYPE html><!-- note -->");
        assert_eq!(
            tokens,
            vec![
                Token::Doctype("DOCTYPE html".to_string()),
                Token::Comment(" note ".to_string()),
            ]
        );
    }

    #[test]
    fn cdata_tokenizes_as_doctype() {
        // Preserved quirk: any <!...> construct is a doctype token.
        let tokens = tokenize("<![CDATA[x]]>");
        assert_eq!(tokens, vec![Token::Doctype("[CDATA[x]]".to_string())]);
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        let tokens = tokenize("<!-- dangling");
        assert_eq!(tokens, vec![Token::Comment(" dangling".to_string())]);
    }

    #[test]
    fn script_body_is_captured_raw() {
        let tokens = tokenize("<script>if (a < b) { go(); }</script>");
        assert_eq!(
            tokens,
            vec![Token::RawText {
                name: "script".to_string(),
                attrs: String::new(),
                content: "if (a < b) { go(); }".to_string(),
            }]
        );
    }

    #[test]
    fn raw_text_close_tag_is_case_insensitive() {
        let tokens = tokenize("<style>p{}</STYLE>");
        assert_eq!(
            tokens,
            vec![Token::RawText {
                name: "style".to_string(),
                attrs: String::new(),
                content: "p{}".to_string(),
            }]
        );
    }

    #[test]
    fn unterminated_script_falls_back_to_start_tag() {
        let tokens = tokenize("<script>let x = 1;");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "script".to_string(),
                    attrs: String::new(),
                    self_closing: false,
                },
                Token::Text("let x = 1;".to_string()),
            ]
        );
    }

    #[test]
    fn stray_angle_bracket_degrades_to_text() {
        let tokens = tokenize("a < b");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a ".to_string()),
                Token::Text("<".to_string()),
                Token::Text(" b".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_gt_does_not_close_tag() {
        let tokens = tokenize("<div data-x=\"a>b\"></div>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "div".to_string(),
                    attrs: "data-x=\"a>b\"".to_string(),
                    self_closing: false,
                },
                Token::EndTag { name: "div".to_string() },
            ]
        );
    }

    #[test]
    fn tag_names_are_lower_cased() {
        let tokens = tokenize("<DIV></DIV>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "div".to_string(),
                    attrs: String::new(),
                    self_closing: false,
                },
                Token::EndTag { name: "div".to_string() },
            ]
        );
    }

    #[test]
    fn no_bare_end_tag_for_void_elements() {
        let tokens = tokenize("<p><br></p>");
        let has_br_end = tokens
            .iter()
            .any(|t| matches!(t, Token::EndTag { name } if name == "br"));
        assert!(!has_br_end);
    }
}
