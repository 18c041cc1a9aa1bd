//! Tree-sitter grammar selection for the structural strategy.

use tree_sitter::Language;

/// Script grammar variant, chosen by file extension. Plain and JSX-bearing
/// sources need different grammars; the TypeScript grammar also parses
/// JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptDialect {
    /// `.ts` and `.js`.
    TypeScript,
    /// `.tsx` and `.jsx`.
    Tsx,
}

impl ScriptDialect {
    /// Map a lower-cased file extension to a dialect.
    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "ts" => Some(Self::TypeScript),
            "jsx" | "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }
}

/// The tree-sitter language for a dialect.
pub fn language(dialect: ScriptDialect) -> Language {
    match dialect {
        ScriptDialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        ScriptDialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}
