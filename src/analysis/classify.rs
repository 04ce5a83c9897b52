//! Classification of Markdown syntax nodes into semantic token categories.

use tower_lsp::lsp_types::SemanticTokenType;

use super::AnalysisError;

/// Semantic token categories this server produces.
///
/// The set is closed; [`token_legend`] fixes the order advertised to the
/// client at initialization, and the encoder resolves category indices
/// against that same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    /// Heading markers and setext underlines.
    Struct,
    /// List bullets, ordered-list markers, task checkboxes.
    Property,
    /// Block-quote markers and thematic breaks.
    Operator,
    /// Code-fence delimiters and info strings.
    Keyword,
}

impl TokenCategory {
    pub fn token_type(self) -> SemanticTokenType {
        match self {
            Self::Struct => SemanticTokenType::STRUCT,
            Self::Property => SemanticTokenType::PROPERTY,
            Self::Operator => SemanticTokenType::OPERATOR,
            Self::Keyword => SemanticTokenType::KEYWORD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Property => "property",
            Self::Operator => "operator",
            Self::Keyword => "keyword",
        }
    }
}

/// The ordered token-type legend advertised in the server capabilities.
pub fn token_legend() -> Vec<SemanticTokenType> {
    vec![
        SemanticTokenType::STRUCT,
        SemanticTokenType::PROPERTY,
        SemanticTokenType::OPERATOR,
        SemanticTokenType::KEYWORD,
    ]
}

/// How the token collector must treat a node of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// No category of its own; children are visited in order.
    Container,
    /// Semantically inert; the whole subtree is skipped.
    Opaque,
    /// The node's own span becomes exactly one token; children are not
    /// visited independently.
    Token(TokenCategory),
}

/// Maps a node kind from the Markdown block grammar to its [`NodeClass`].
///
/// The table is total over the kinds the grammar emits for block structure.
/// A kind outside the table is a defect: the grammar grew a construct this
/// table does not know about, and the fix is a new table entry, not a silent
/// skip.
pub fn classify(kind: &str) -> Result<NodeClass, AnalysisError> {
    match kind {
        "document" | "section" | "atx_heading" | "setext_heading" | "block_quote" | "list"
        | "list_item" | "fenced_code_block" => Ok(NodeClass::Container),

        "paragraph" | "inline" | "indented_code_block" | "code_fence_content" | "html_block"
        | "link_reference_definition" | "pipe_table" | "minus_metadata" | "plus_metadata"
        | "block_continuation" => Ok(NodeClass::Opaque),

        "atx_h1_marker" | "atx_h2_marker" | "atx_h3_marker" | "atx_h4_marker"
        | "atx_h5_marker" | "atx_h6_marker" | "setext_h1_underline" | "setext_h2_underline" => {
            Ok(NodeClass::Token(TokenCategory::Struct))
        }

        "list_marker_minus" | "list_marker_plus" | "list_marker_star" | "list_marker_dot"
        | "list_marker_parenthesis" | "task_list_marker_checked"
        | "task_list_marker_unchecked" => Ok(NodeClass::Token(TokenCategory::Property)),

        "block_quote_marker" | "thematic_break" => Ok(NodeClass::Token(TokenCategory::Operator)),

        "fenced_code_block_delimiter" | "info_string" => {
            Ok(NodeClass::Token(TokenCategory::Keyword))
        }

        _ => Err(AnalysisError::UnhandledNodeKind {
            kind: kind.to_string(),
        }),
    }
}
