use std::path::Path;

use crate::error::Error;
use crate::renderer::RenderOptions;

/// Tool configuration loaded from `.copyref.toml`. Only HTML rendering is
/// configurable; the label strategies take no options.
pub struct Config {
    indent_width: usize,
    inline_text_limit: usize,
}

/// Raw TOML structure for `.copyref.toml`.
#[derive(serde::Deserialize)]
struct CopyrefTomlConfig {
    #[serde(default)]
    html: HtmlSection,
}

#[derive(Default, serde::Deserialize)]
struct HtmlSection {
    indent_width: Option<usize>,
    inline_text_limit: Option<usize>,
}

impl Config {
    /// Load config from `.copyref.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist. Returns an error if
    /// the file exists but is malformed — never silently falls back to
    /// defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".copyref.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::defaults()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: CopyrefTomlConfig = toml::from_str(&content)?;
        let base = RenderOptions::default();
        Ok(Self {
            indent_width: raw.html.indent_width.unwrap_or(base.indent_width),
            inline_text_limit: raw.html.inline_text_limit.unwrap_or(base.inline_text_limit),
        })
    }

    fn defaults() -> Self {
        let base = RenderOptions::default();
        Self {
            indent_width: base.indent_width,
            inline_text_limit: base.inline_text_limit,
        }
    }

    /// Rendering options for the HTML formatter.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent_width: self.indent_width,
            inline_text_limit: self.inline_text_limit,
        }
    }
}
