use std::path::PathBuf;

use serde::Serialize;

/// Output the comprehensive copyref reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let config_found = root.join(".copyref.toml").exists();

    if json {
        print_json(config_found);
    } else {
        print_markdown(config_found);
    }
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(config_found: bool) {
    let version = env!("CARGO_PKG_VERSION");
    print!(
        "\
# copyref {version}

Human-readable code reference labels for a file selection — `path:line label`
lines describing the construct under the cursor — plus an HTML re-indenter.

## Commands

    copyref label <file> [--select L:C[-L:C]] [--json]   Resolve reference labels
    copyref fmt <file> [--select L:C-L:C] [--write]      Re-indent an HTML document
    copyref info [--json]                                Show this document

## Selections

Positions are 1-based `line:col`; a single position is an empty selection
(a cursor). Reversed ranges are normalized, out-of-range positions clamp.

## Supported Extensions

| Extension            | Strategy                        |
|----------------------|---------------------------------|
| .ts .tsx .js .jsx    | syntax-tree declaration labels  |
| .py                  | indentation block labels        |
| .html .htm           | enclosing tag name              |
| anything else        | unlabeled `path:lines` fallback |

## Configuration (.copyref.toml)

    [html]
    indent_width = 2        # spaces per nesting level
    inline_text_limit = 60  # max chars for one-line <script>/<style> bodies

## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success |
| 1    | Runtime error |

"
    );
    if config_found {
        println!("Config: .copyref.toml (found)");
    } else {
        println!("Config: .copyref.toml (not found)");
    }
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    version: String,
    strategies: Vec<StrategyInfo>,
    selection_syntax: String,
    exit_codes: Vec<ExitCodeInfo>,
    config_found: bool,
}

#[derive(Serialize)]
struct StrategyInfo {
    extensions: Vec<String>,
    strategy: String,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

fn print_json(config_found: bool) {
    let info = InfoJson {
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategies: vec![
            StrategyInfo {
                extensions: vec![
                    ".ts".to_string(),
                    ".tsx".to_string(),
                    ".js".to_string(),
                    ".jsx".to_string(),
                ],
                strategy: "syntax-tree declaration labels".to_string(),
            },
            StrategyInfo {
                extensions: vec![".py".to_string()],
                strategy: "indentation block labels".to_string(),
            },
            StrategyInfo {
                extensions: vec![".html".to_string(), ".htm".to_string()],
                strategy: "enclosing tag name".to_string(),
            },
        ],
        selection_syntax: "line:col or line:col-line:col, 1-based".to_string(),
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success".to_string() },
            ExitCodeInfo { code: 1, meaning: "Runtime error".to_string() },
        ],
        config_found,
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
