//! Syntax-tree-driven analysis engine.
//!
//! Everything in this module is a pure, synchronous computation over an
//! already-parsed tree and the document text: classifying nodes into semantic
//! token categories, resolving the node chain under a cursor, collecting and
//! delta-encoding semantic tokens, deriving completion candidates, and
//! validating document text. No function here performs I/O or retains tree
//! references past its own call.

pub mod classify;
pub mod completion;
pub mod encode;
pub mod node_path;
pub mod tokens;
pub mod validate;

pub use classify::{NodeClass, TokenCategory, classify, token_legend};
pub use completion::resolve_completions;
pub use encode::encode_tokens;
pub use node_path::find_node_with_path;
pub use tokens::{AbsoluteToken, collect_tokens};
pub use validate::{DIAGNOSTIC_SOURCE, validate_json, validate_markdown};

use thiserror::Error;

/// Defects raised by the analysis engine.
///
/// Each variant means the classification table, the legend, or the caller is
/// out of sync with the grammar. They propagate immediately: skipping a node
/// or substituting a default index would corrupt the delta encoding for every
/// token that follows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("unhandled syntax node kind '{kind}'")]
    UnhandledNodeKind { kind: String },

    #[error("no syntax node contains position {line}:{column}")]
    NoNodeAtPosition { line: usize, column: usize },

    #[error("token category '{category}' is missing from the client legend")]
    CategoryNotInLegend { category: &'static str },
}
