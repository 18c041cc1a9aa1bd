//! CLI commands for copyref: label and fmt.

use std::path::Path;

use crate::config::Config;
use crate::error::Error;
use crate::renderer;
use crate::resolver;
use crate::selection;
use crate::tokenizer;

/// Maximum source file size (16 MiB).
const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Selection used when `--select` is omitted: a cursor at the origin.
const DEFAULT_SELECT: &str = "1:1";

/// Resolve reference labels for a selection and print them, one entry per
/// line (or as pretty JSON with `--json`). The path in the output is the
/// file argument verbatim.
///
/// # Errors
///
/// Returns errors from file reading or selection parsing. Label resolution
/// itself never fails; unresolvable selections print an unlabeled entry.
pub fn label(file: &str, select: Option<&str>, json: bool) -> Result<(), Error> {
    let text = read_source(Path::new(file))?;
    let sel = selection::parse(select.unwrap_or(DEFAULT_SELECT), &text)?;
    let ext = extension_of(file);
    let entries = resolver::resolve(file, &ext, &text, &sel);

    if json {
        // serde_json::to_string_pretty won't fail on this structure.
        println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
    } else {
        println!("{}", resolver::format_entries(&entries));
    }

    Ok(())
}

/// Re-indent an HTML document. With `--select`, only the selected byte range
/// is re-rendered and spliced back; otherwise the whole document is
/// formatted. Output goes to stdout, or back to the file with `--write`.
///
/// # Errors
///
/// Returns `Error::UnsupportedExtension` for non-HTML files, plus errors
/// from file I/O, config loading, or selection parsing.
pub fn fmt(file: &str, select: Option<&str>, write: bool) -> Result<(), Error> {
    let ext = extension_of(file);
    if !matches!(ext.as_str(), "htm" | "html") {
        return Err(Error::UnsupportedExtension { ext });
    }

    let path = Path::new(file);
    let text = read_source(path)?;
    let config = Config::load(Path::new("."))?;
    let options = config.render_options();

    let output = match select {
        None => renderer::render(&tokenizer::tokenize(&text), &options),
        Some(spec) => {
            let sel = selection::parse(spec, &text)?;
            let rendered =
                renderer::render(&tokenizer::tokenize(sel.selected_text(&text)), &options);
            format!("{}{rendered}{}", &text[..sel.start], &text[sel.end..])
        },
    };

    if write {
        let mut content = output;
        if text.ends_with('\n') && !content.ends_with('\n') {
            content.push('\n');
        }
        std::fs::write(path, content)?;
        eprintln!("Formatted {file}");
    } else {
        println!("{output}");
    }

    Ok(())
}

/// Read a source file with the size cap applied.
///
/// # Errors
///
/// Returns `Error::FileNotFound`, `Error::FileTooLarge`, or `Error::Io`.
fn read_source(path: &Path) -> Result<String, Error> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound { path: path.to_path_buf() },
        _ => Error::Io(e),
    })?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge {
            file: path.to_path_buf(),
            max_bytes: MAX_FILE_SIZE,
            size_bytes: metadata.len(),
        });
    }

    Ok(std::fs::read_to_string(path)?)
}

/// Lower-cased file extension without the dot; empty when absent.
fn extension_of(file: &str) -> String {
    Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}
