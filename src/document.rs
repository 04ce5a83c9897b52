//! Open-document tracking.

use ropey::Rope;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

use crate::language::DocumentLanguage;

#[derive(Debug)]
pub struct LspDocumentState {
    pub uri: Url,
    pub text: Rope,
    pub version: i32,
}

/// A tracked text document. The text is the single source of truth for every
/// analysis request; a fresh tree is parsed from it per request.
#[derive(Debug)]
pub struct LspDocument {
    pub id: u32,
    pub language: DocumentLanguage,
    pub state: RwLock<LspDocumentState>,
}

/// Converts an LSP position to a char offset in the rope, clamped to the
/// document.
fn position_to_char(position: &Position, text: &Rope) -> usize {
    let line = (position.line as usize).min(text.len_lines().saturating_sub(1));
    let line_start = text.line_to_char(line);
    let line_len = text.line(line).len_chars();
    line_start + (position.character as usize).min(line_len)
}

impl LspDocumentState {
    /// Applies content changes in order: ranged edits replace in place, a
    /// rangeless change is a full rewrite. Stale versions are rejected.
    pub fn apply(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<String, String> {
        if version <= self.version {
            return Err(format!(
                "version {} is not newer than {}",
                version, self.version
            ));
        }
        for change in &changes {
            if let Some(range) = change.range {
                let start = position_to_char(&range.start, &self.text);
                let end = position_to_char(&range.end, &self.text);
                if start <= end && end <= self.text.len_chars() {
                    self.text.remove(start..end);
                    self.text.insert(start, &change.text);
                }
            } else {
                self.text = Rope::from_str(&change.text);
            }
        }
        self.version = version;
        Ok(self.text.to_string())
    }
}

impl LspDocument {
    pub fn new(
        id: u32,
        uri: Url,
        language: DocumentLanguage,
        text: &str,
        version: i32,
    ) -> Self {
        LspDocument {
            id,
            language,
            state: RwLock::new(LspDocumentState {
                uri,
                text: Rope::from_str(text),
                version,
            }),
        }
    }

    pub async fn uri(&self) -> Url {
        self.state.read().await.uri.clone()
    }

    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    /// Applies changes, returning the updated text, or `None` when the
    /// version is stale.
    pub async fn apply(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Option<String> {
        let mut state = self.state.write().await;
        state.apply(changes, version).ok()
    }
}
