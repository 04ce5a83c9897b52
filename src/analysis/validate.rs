//! Document validation: JSON decode diagnostics and structural Markdown
//! parsing.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::parser::parse_document;

/// Source tag attached to every diagnostic this server publishes.
pub const DIAGNOSTIC_SOURCE: &str = "tentiris";

/// Validates a document as JSON text.
///
/// A decode failure is a recoverable input problem: it becomes exactly one
/// diagnostic spanning the single column the decoder reported. The decoder's
/// line and column are 1-based.
pub fn validate_json(source: &str) -> Vec<Diagnostic> {
    match serde_json::from_str::<serde_json::Value>(source) {
        Ok(_) => Vec::new(),
        Err(err) => {
            let line = err.line().saturating_sub(1) as u32;
            let column = err.column() as u32;
            vec![Diagnostic {
                range: Range {
                    start: Position {
                        line,
                        character: column.saturating_sub(1),
                    },
                    end: Position {
                        line,
                        character: column,
                    },
                },
                severity: Some(DiagnosticSeverity::ERROR),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: err.to_string(),
                ..Default::default()
            }]
        }
    }
}

/// Validates a Markdown document structurally.
///
/// The grammar recovers from malformed markup on its own, so a successfully
/// returned tree produces no diagnostics. Only a parser-level failure is an
/// error, and it propagates to the caller rather than degrading into partial
/// output.
pub fn validate_markdown(source: &str) -> anyhow::Result<Vec<Diagnostic>> {
    let _tree = parse_document(source)?;
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_json_has_no_diagnostics() {
        assert!(validate_json(r#"{"a": [1, 2, 3]}"#).is_empty());
    }

    #[test]
    fn malformed_json_yields_one_positioned_diagnostic() {
        let diagnostics = validate_json(r#"{"a": }"#);

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        // serde_json reports line 1, column 7; published 0-based, one column
        // wide.
        assert_eq!(diagnostic.range.start, Position { line: 0, character: 6 });
        assert_eq!(diagnostic.range.end, Position { line: 0, character: 7 });
        assert_eq!(diagnostic.source.as_deref(), Some(DIAGNOSTIC_SOURCE));
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
    }

    #[test]
    fn decode_error_line_is_converted_to_zero_based() {
        let diagnostics = validate_json("{\n  \"a\": oops\n}");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start.line, 1);
    }

    #[test]
    fn markdown_validation_accepts_arbitrary_markup() {
        let diagnostics = validate_markdown("# ]][[ not balanced\n\n> ```\n").unwrap();
        assert!(diagnostics.is_empty());
    }
}
