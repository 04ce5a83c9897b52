//! Context-derived completion candidates.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};
use tree_sitter::{Point, Tree};

use super::AnalysisError;
use super::node_path::find_node_with_path;

/// Structural characters offered for insertion, in presentation order.
const STRUCTURAL_CANDIDATES: [&str; 5] = ["\"", "[", "]", "{", "}"];

/// Derives completion candidates for the syntactic context under `point`.
///
/// The ancestor chain is resolved first; failure to resolve a node for an
/// in-bounds position is a defect, never an empty result. The returned list
/// is non-empty, duplicate-free, and deterministically ordered.
pub fn resolve_completions(
    tree: &Tree,
    point: Point,
) -> Result<Vec<CompletionItem>, AnalysisError> {
    let (innermost, _path) = find_node_with_path(tree, point)?;

    let items = candidates_for(innermost.kind())
        .iter()
        .map(|label| CompletionItem {
            label: (*label).to_string(),
            kind: Some(CompletionItemKind::OPERATOR),
            detail: Some("structural character".to_string()),
            ..Default::default()
        })
        .collect();
    Ok(items)
}

/// Candidate selection per syntactic context.
///
/// Every context currently maps to the full structural set; the match on the
/// node kind is the extension point for narrower per-construct sets.
fn candidates_for(kind: &str) -> &'static [&'static str] {
    match kind {
        "document" => &STRUCTURAL_CANDIDATES,
        _ => &STRUCTURAL_CANDIDATES,
    }
}
