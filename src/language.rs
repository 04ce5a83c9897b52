//! Per-document language routing.

use std::path::Path;

use tower_lsp::lsp_types::Url;

/// Languages this server understands.
///
/// Markdown documents get structural analysis (semantic tokens, completion,
/// structural validation); JSON documents get decode validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentLanguage {
    #[default]
    Markdown,
    Json,
}

impl DocumentLanguage {
    /// Maps an LSP language identifier to a supported language.
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id {
            "markdown" => Some(Self::Markdown),
            "json" | "jsonc" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detects the language from a document URI's file extension.
    pub fn from_uri(uri: &Url) -> Option<Self> {
        let extension = Path::new(uri.path())
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();
        match extension.as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Routing used when a document is opened: the client's language id wins,
    /// then the file extension, then Markdown.
    pub fn detect(language_id: &str, uri: &Url) -> Self {
        Self::from_language_id(language_id)
            .or_else(|| Self::from_uri(uri))
            .unwrap_or_default()
    }
}
