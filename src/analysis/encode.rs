//! Delta encoding of absolute token positions into the LSP wire form.

use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType};

use super::AnalysisError;
use super::tokens::AbsoluteToken;

/// Encodes document-ordered tokens into the 5-integers-per-token relative
/// form: line delta, start-column delta, length, legend index, modifier
/// bitset.
///
/// The column delta is relative to the previous token only when both share a
/// line; a line change resets it to the absolute column. The fold is purely
/// forward: it needs the input sorted by (line, column), which the collector
/// guarantees. A category whose token type is absent from `legend` is a
/// defect and fails the whole encoding; substituting an index would corrupt
/// the stream.
pub fn encode_tokens(
    tokens: &[AbsoluteToken],
    legend: &[SemanticTokenType],
) -> Result<Vec<SemanticToken>, AnalysisError> {
    let mut data = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let token_type = legend
            .iter()
            .position(|t| *t == token.category.token_type())
            .ok_or(AnalysisError::CategoryNotInLegend {
                category: token.category.name(),
            })? as u32;

        debug_assert!(
            data.is_empty()
                || token.line > prev_line
                || (token.line == prev_line && token.column >= prev_start),
            "tokens must arrive in document order"
        );

        let delta_line = token.line - prev_line;
        let delta_start = if delta_line == 0 {
            token.column - prev_start
        } else {
            token.column
        };

        data.push(SemanticToken {
            delta_line,
            delta_start,
            length: token.length,
            token_type,
            token_modifiers_bitset: 0,
        });

        prev_line = token.line;
        prev_start = token.column;
    }

    Ok(data)
}
