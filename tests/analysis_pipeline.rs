//! End-to-end tests over the analysis engine: parse, collect, and encode for
//! highlighting; resolve and complete for the cursor; validate for
//! diagnostics.

use indoc::indoc;
use tower_lsp::lsp_types::{Position, SemanticToken, SemanticTokenType};
use tree_sitter::Point;

use tentiris_language_server::analysis::{
    AnalysisError, TokenCategory, collect_tokens, encode_tokens, find_node_with_path,
    resolve_completions, token_legend, validate_json,
};
use tentiris_language_server::parser::parse_document;

/// Reconstructs absolute (line, column) pairs from the delta stream.
fn decode_positions(data: &[SemanticToken]) -> Vec<(u32, u32)> {
    let mut line = 0u32;
    let mut column = 0u32;
    let mut out = Vec::with_capacity(data.len());
    for token in data {
        line += token.delta_line;
        if token.delta_line == 0 {
            column += token.delta_start;
        } else {
            column = token.delta_start;
        }
        out.push((line, column));
    }
    out
}

#[test]
fn heading_marker_encodes_against_a_client_legend() {
    let tree = parse_document("# Overview\nintro text\n").unwrap();
    let tokens = collect_tokens(tree.root_node()).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].category, TokenCategory::Struct);

    let client_legend = vec![SemanticTokenType::STRUCT, SemanticTokenType::PROPERTY];
    let data = encode_tokens(&tokens, &client_legend).unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0].delta_line, 0);
    assert_eq!(data[0].delta_start, 0);
    assert_eq!(data[0].length, 1);
    assert_eq!(data[0].token_type, 0);
    assert_eq!(data[0].token_modifiers_bitset, 0);
}

#[test]
fn a_line_change_resets_the_column_delta_to_absolute() {
    let source = indoc! {"
        # One

           ### Two
    "};
    let tokens = collect_tokens(parse_document(source).unwrap().root_node()).unwrap();
    assert_eq!(tokens.len(), 2);

    let data = encode_tokens(&tokens, &token_legend()).unwrap();
    assert_eq!((data[0].delta_line, data[0].delta_start), (0, 0));
    // Second marker sits on line 2, column 3; a new line carries the
    // absolute column, not a delta against the previous token.
    assert_eq!((data[1].delta_line, data[1].delta_start), (2, 3));
    assert_eq!(data[1].length, 3);
}

#[test]
fn collect_then_encode_is_deterministic_and_round_trips() {
    let source = indoc! {r#"
        # Title

        - first
        - second

        > quoted line

        ```rust
        let x = 1;
        ```

        ---
    "#};

    let first_tokens = collect_tokens(parse_document(source).unwrap().root_node()).unwrap();
    let second_tokens = collect_tokens(parse_document(source).unwrap().root_node()).unwrap();
    assert_eq!(first_tokens, second_tokens);
    assert!(!first_tokens.is_empty());

    // Document order: non-decreasing by (line, column).
    for pair in first_tokens.windows(2) {
        assert!((pair[0].line, pair[0].column) <= (pair[1].line, pair[1].column));
    }

    let legend = token_legend();
    let first_data = encode_tokens(&first_tokens, &legend).unwrap();
    let second_data = encode_tokens(&second_tokens, &legend).unwrap();
    assert_eq!(first_data, second_data);

    let expected: Vec<(u32, u32)> = first_tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(decode_positions(&first_data), expected);
}

#[test]
fn every_in_bounds_position_resolves_to_a_rooted_path() {
    let source = "# A\n\n- b\n";
    let tree = parse_document(source).unwrap();

    for (row, line) in source.split('\n').enumerate() {
        for column in 0..=line.len() {
            let point = Point { row, column };
            let (_, path) = find_node_with_path(&tree, point)
                .unwrap_or_else(|e| panic!("no path at {row}:{column}: {e}"));
            assert_eq!(path.first().unwrap().kind(), "document");

            for pair in path.windows(2) {
                let earlier = pair[0].start_position();
                let later = pair[1].start_position();
                assert!((earlier.row, earlier.column) <= (later.row, later.column));
            }
        }
    }
}

#[test]
fn completion_candidates_are_identical_across_contexts() {
    let source = indoc! {r#"
        # Title

        - first

        ```rust
        let x = 1;
        ```
    "#};
    let tree = parse_document(source).unwrap();

    let labels = |point: Point| -> Vec<String> {
        resolve_completions(&tree, point)
            .unwrap()
            .into_iter()
            .map(|item| item.label)
            .collect()
    };

    let at_heading = labels(Point { row: 0, column: 0 });
    let at_list = labels(Point { row: 2, column: 1 });
    let in_code = labels(Point { row: 5, column: 2 });

    assert_eq!(at_heading, ["\"", "[", "]", "{", "}"]);
    assert_eq!(at_heading, at_list);
    assert_eq!(at_heading, in_code);
}

#[test]
fn malformed_json_produces_exactly_one_single_column_diagnostic() {
    let diagnostics = validate_json(r#"{"a": }"#);

    assert_eq!(diagnostics.len(), 1);
    let range = diagnostics[0].range;
    assert_eq!(range.start, Position { line: 0, character: 6 });
    assert_eq!(range.end, Position { line: 0, character: 7 });
}

#[test]
fn encoding_fails_for_a_legend_without_the_category() {
    let tokens = collect_tokens(parse_document("- item\n").unwrap().root_node()).unwrap();
    assert_eq!(tokens[0].category, TokenCategory::Property);

    let narrow_legend = vec![SemanticTokenType::STRUCT];
    let err = encode_tokens(&tokens, &narrow_legend).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::CategoryNotInLegend {
            category: "property"
        }
    );
}
