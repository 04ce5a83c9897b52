//! Tree-Sitter parsing for Markdown block structure.

use anyhow::{Context, Result};
use tree_sitter::{Parser, Tree};

/// Parses a full document with the Markdown block grammar.
///
/// The grammar is resilient: any well-formed UTF-8 input yields a tree, with
/// malformed markup represented inside the tree rather than raised. A `None`
/// from the underlying parser is a host-level failure, not a syntax error.
pub fn parse_document(text: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_md::LANGUAGE.into())
        .context("failed to load the Markdown grammar")?;
    parser
        .parse(text, None)
        .context("Tree-Sitter returned no tree")
}
