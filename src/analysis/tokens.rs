//! Depth-first collection of semantic tokens in document order.

use tree_sitter::Node;

use super::AnalysisError;
use super::classify::{NodeClass, TokenCategory, classify};

/// A semantic token with absolute document coordinates, before delta
/// encoding. Lines and columns are 0-based; columns count UTF-8 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteToken {
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub category: TokenCategory,
}

/// Walks the tree and returns every token node's span and category, ordered
/// by (line, column).
///
/// The traversal is a pure function of the tree: identical trees always
/// yield identical sequences. An unhandled node kind aborts the walk.
pub fn collect_tokens(root: Node) -> Result<Vec<AbsoluteToken>, AnalysisError> {
    let mut tokens = Vec::new();
    visit(root, &mut tokens)?;
    Ok(tokens)
}

fn visit(node: Node, out: &mut Vec<AbsoluteToken>) -> Result<(), AnalysisError> {
    match classify(node.kind())? {
        NodeClass::Opaque => {}
        NodeClass::Token(category) => out.push(token_for(&node, category)),
        NodeClass::Container => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                visit(child, out)?;
            }
        }
    }
    Ok(())
}

/// Builds one token from a node's own span.
///
/// A span that runs up to column 0 of a later line includes the trailing
/// line terminator; that byte is not part of the highlighted token.
fn token_for(node: &Node, category: TokenCategory) -> AbsoluteToken {
    let start = node.start_position();
    let end = node.end_position();
    let mut length = (node.end_byte() - node.start_byte()) as u32;
    if end.row > start.row && end.column == 0 {
        length -= 1;
    }
    AbsoluteToken {
        line: start.row as u32,
        column: start.column as u32,
        length,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    #[test]
    fn heading_marker_yields_exactly_one_token() {
        let tree = parse_document("# Title\n").unwrap();
        let tokens = collect_tokens(tree.root_node()).unwrap();

        assert_eq!(tokens.len(), 1);
        let token = tokens[0];
        assert_eq!((token.line, token.column), (0, 0));
        assert_eq!(token.length, 1);
        assert_eq!(token.category, TokenCategory::Struct);
    }

    #[test]
    fn plain_paragraph_produces_no_tokens() {
        let tree = parse_document("just a paragraph of text\n").unwrap();
        let tokens = collect_tokens(tree.root_node()).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn list_markers_come_out_in_document_order() {
        let tree = parse_document("- alpha\n- beta\n- gamma\n").unwrap();
        let tokens = collect_tokens(tree.root_node()).unwrap();

        assert_eq!(tokens.len(), 3);
        for (line, token) in tokens.iter().enumerate() {
            assert_eq!(token.line, line as u32);
            assert_eq!(token.column, 0);
            assert_eq!(token.category, TokenCategory::Property);
        }
    }

    #[test]
    fn fenced_code_body_is_not_tokenized() {
        let source = "```rust\nlet x = 1;\n```\n";
        let tree = parse_document(source).unwrap();
        let tokens = collect_tokens(tree.root_node()).unwrap();

        // Two fence delimiters and the info string; nothing from the body.
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.category == TokenCategory::Keyword));
        assert!(tokens.iter().all(|t| t.line != 1));
    }

    #[test]
    fn trailing_line_terminator_is_not_counted() {
        let tree = parse_document("# x\n\n---\n").unwrap();
        let tokens = collect_tokens(tree.root_node()).unwrap();

        assert_eq!(tokens.len(), 2);
        let brk = tokens[1];
        assert_eq!(brk.category, TokenCategory::Operator);
        assert_eq!((brk.line, brk.column), (2, 0));
        assert_eq!(brk.length, 3);
    }

    #[test]
    fn collection_is_deterministic() {
        let source = "# One\n\n- a\n- b\n\n> quote\n";
        let first = collect_tokens(parse_document(source).unwrap().root_node()).unwrap();
        let second = collect_tokens(parse_document(source).unwrap().root_node()).unwrap();
        assert_eq!(first, second);
    }
}
