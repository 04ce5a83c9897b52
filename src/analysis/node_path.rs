//! Cursor-position resolution against the syntax tree.

use tree_sitter::{Node, Point, Tree};

use super::AnalysisError;

/// True when `point` falls within `node`'s span, boundaries included.
///
/// A zero-width node at the boundary still contains a position equal to that
/// boundary.
fn node_contains(node: &Node, point: Point) -> bool {
    let start = node.start_position();
    let end = node.end_position();
    if point.row < start.row || point.row > end.row {
        return false;
    }
    if point.row == start.row && point.column < start.column {
        return false;
    }
    if point.row == end.row && point.column > end.column {
        return false;
    }
    true
}

fn starts_after(node: &Node, point: Point) -> bool {
    let start = node.start_position();
    (start.row, start.column) > (point.row, point.column)
}

/// Resolves the innermost node containing `point` together with its ancestor
/// chain in root-to-leaf order.
///
/// The search descends depth-first. Siblings are laid out in document order,
/// so once a child starts past the query point no later sibling can contain
/// it and the scan stops. A position outside the root's span is a defect in
/// the caller, not an occasion for a silent default.
pub fn find_node_with_path<'tree>(
    tree: &'tree Tree,
    point: Point,
) -> Result<(Node<'tree>, Vec<Node<'tree>>), AnalysisError> {
    let root = tree.root_node();
    if !node_contains(&root, point) {
        return Err(AnalysisError::NoNodeAtPosition {
            line: point.row,
            column: point.column,
        });
    }

    let mut path = vec![root];
    let mut current = root;
    loop {
        let next = {
            let mut cursor = current.walk();
            let mut found = None;
            for child in current.named_children(&mut cursor) {
                if starts_after(&child, point) {
                    break;
                }
                if node_contains(&child, point) {
                    found = Some(child);
                    break;
                }
            }
            found
        };
        match next {
            Some(child) => {
                path.push(child);
                current = child;
            }
            None => return Ok((current, path)),
        }
    }
}
