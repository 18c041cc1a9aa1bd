//! Declaration labeling over TypeScript/JavaScript syntax trees.
//!
//! One recursive descent does two independent jobs per node: collect a label
//! for every declaration-like node intersecting the selection, and track the
//! narrowest node enclosing the focus offset for the no-intersection
//! fallback. Traversal state is threaded as an argument — nothing is shared
//! between invocations.

use tree_sitter::{Node, Parser};

use crate::grammar::{self, ScriptDialect};
use crate::selection::Selection;
use crate::types::{Candidate, LineSpan};

/// Resolve label candidates for a script buffer. Total: unparsable input
/// (including a grammar the linked tree-sitter runtime rejects) yields no
/// candidates rather than an error.
pub fn candidates(text: &str, selection: &Selection, dialect: ScriptDialect) -> Vec<Candidate> {
    let mut parser = Parser::new();
    if parser.set_language(&grammar::language(dialect)).is_err() {
        return Vec::new();
    }
    let Some(tree) = parser.parse(text, None) else {
        return Vec::new();
    };

    let mut walk = Walk {
        source: text,
        selection,
        matches: Vec::new(),
        seen: Vec::new(),
        enclosing: None,
    };
    visit(tree.root_node(), &mut walk);

    if !walk.matches.is_empty() {
        return walk.matches;
    }

    let Some(candidate) = walk.enclosing else {
        return Vec::new();
    };
    match fallback_label(candidate, text) {
        Some((node, label)) => vec![Candidate {
            label: Some(label),
            lines: LineSpan::single(start_line(node)),
        }],
        None => Vec::new(),
    }
}

/// State threaded through one traversal.
struct Walk<'a, 'tree> {
    source: &'a str,
    selection: &'a Selection,
    /// Labeled candidates in source order.
    matches: Vec<Candidate>,
    /// Dedup keys: (start line, label).
    seen: Vec<(u32, String)>,
    /// Narrowest node containing the focus offset so far.
    enclosing: Option<Node<'tree>>,
}

fn visit<'tree>(node: Node<'tree>, walk: &mut Walk<'_, 'tree>) {
    track_enclosing(node, walk);

    if intersects_selection(node, walk.selection)
        && let Some(label) = classify(node, walk.source)
    {
        let key = (start_line(node), label);
        if !walk.seen.contains(&key) {
            walk.matches.push(Candidate {
                label: Some(key.1.clone()),
                lines: LineSpan::single(key.0),
            });
            walk.seen.push(key);
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, walk);
    }
}

/// Keep the strictly narrowest node whose span contains the focus offset.
/// The strict comparison plus outer-before-inner visit order means ties go
/// to the first-visited node.
fn track_enclosing<'tree>(node: Node<'tree>, walk: &mut Walk<'_, 'tree>) {
    let focus = walk.selection.focus();
    if node.start_byte() > focus || focus > node.end_byte() {
        return;
    }
    let width = node.end_byte() - node.start_byte();
    let narrower = match walk.enclosing {
        Some(best) => width < best.end_byte() - best.start_byte(),
        None => true,
    };
    if narrower {
        walk.enclosing = Some(node);
    }
}

/// Open-interval overlap test between the node span and the selection.
fn intersects_selection(node: Node<'_>, selection: &Selection) -> bool {
    node.start_byte() <= selection.end && selection.start <= node.end_byte()
}

/// Classify a node as a declaration-like construct and derive its label.
/// First match wins; anything unrecognized yields `None`.
fn classify(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            node_text(node.child_by_field_name("name")?, source)
        },
        "variable_declarator" => function_variable_name(node, source),
        "method_definition" => member_label(node, source),
        "public_field_definition" | "field_definition" => member_label(node, source),
        "pair" => pair_label(node, source),
        _ => None,
    }
}

/// `const foo = () => ...` / `let f = function ...`: the bound name, but only
/// for simple identifiers with a function-literal initializer.
fn function_variable_name(declarator: Node<'_>, source: &str) -> Option<String> {
    let value = declarator.child_by_field_name("value")?;
    if !is_function_literal(value.kind()) {
        return None;
    }
    let name = declarator.child_by_field_name("name")?;
    if name.kind() != "identifier" {
        return None;
    }
    node_text(name, source)
}

fn is_function_literal(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// Class methods/fields become `ClassName.member`; object-literal methods
/// become `owner.member`. Falls back to the bare member name when the owner
/// cannot be recovered.
fn member_label(node: Node<'_>, source: &str) -> Option<String> {
    let member = node_text(node.child_by_field_name("name")?, source)?;
    let parent = node.parent()?;
    let owner = match parent.kind() {
        "class_body" => enclosing_class_name(parent, source),
        "object" => object_owner_name(parent, source),
        _ => return None,
    };
    Some(match owner {
        Some(owner) => format!("{owner}.{member}"),
        None => member,
    })
}

/// `key: value` inside an object literal, labeled `owner.key` when the
/// object's binding can be recovered.
fn pair_label(node: Node<'_>, source: &str) -> Option<String> {
    let parent = node.parent()?;
    if parent.kind() != "object" {
        return None;
    }
    let key = node_text(node.child_by_field_name("key")?, source)?;
    Some(match object_owner_name(parent, source) {
        Some(owner) => format!("{owner}.{key}"),
        None => key,
    })
}

/// The name of the class a `class_body` belongs to. Anonymous class
/// expressions have no name field.
fn enclosing_class_name(body: Node<'_>, source: &str) -> Option<String> {
    let class_node = body.parent()?;
    if !matches!(class_node.kind(), "class_declaration" | "class") {
        return None;
    }
    node_text(class_node.child_by_field_name("name")?, source)
}

/// Recover the binding an object literal is assigned to: the variable name
/// when it initializes a simple-identifier declarator, or the left-hand side
/// text when it is the right side of an assignment to an identifier or
/// property access.
fn object_owner_name(object: Node<'_>, source: &str) -> Option<String> {
    let parent = object.parent()?;
    match parent.kind() {
        "variable_declarator" => {
            if parent.child_by_field_name("value")?.id() != object.id() {
                return None;
            }
            let name = parent.child_by_field_name("name")?;
            if name.kind() != "identifier" {
                return None;
            }
            node_text(name, source)
        },
        "assignment_expression" => {
            if parent.child_by_field_name("right")?.id() != object.id() {
                return None;
            }
            let left = parent.child_by_field_name("left")?;
            if !matches!(left.kind(), "identifier" | "member_expression") {
                return None;
            }
            node_text(left, source)
        },
        _ => None,
    }
}

/// Fallback for selections that intersect nothing classifiable: walk the
/// narrowest enclosing node and its ancestors outward, returning the first
/// property-access expression (verbatim source) or classifiable declaration.
fn fallback_label<'tree>(start: Node<'tree>, source: &str) -> Option<(Node<'tree>, String)> {
    let mut current = Some(start);
    while let Some(node) = current {
        if node.kind() == "member_expression" {
            if let Some(text) = node_text(node, source) {
                return Some((node, text));
            }
        } else if let Some(label) = classify(node, source) {
            return Some((node, label));
        }
        current = node.parent();
    }
    None
}

fn node_text(node: Node<'_>, source: &str) -> Option<String> {
    node.utf8_text(source.as_bytes()).ok().map(String::from)
}

/// 1-based line of the node's start offset.
fn start_line(node: Node<'_>) -> u32 {
    u32::try_from(node.start_position().row).unwrap_or(u32::MAX - 1) + 1
}
