/// Bounded search of a document symbol tree.
use tower_lsp::lsp_types::{Range, SymbolKind};

use crate::types::SymbolNode;

/// Whether two ranges share at least one position (touching ends count).
pub fn ranges_intersect(a: &Range, b: &Range) -> bool {
    a.start <= b.end && b.start <= a.end
}

/// Whether a symbol name denotes `name`.  Flat providers may report
/// qualified names, so only the last `::` segment is compared.
fn name_matches(symbol_name: &str, name: &str) -> bool {
    let bare = symbol_name.rsplit("::").next().unwrap_or(symbol_name);
    bare == name
}

/// Depth-first search for the first symbol called `name` of kind `kind`.
///
/// With a `bound`, only subtrees whose range intersects it are visited, so
/// the walk stays local to the type definition instead of scanning the
/// whole file.  A child can only match if every ancestor intersects too.
pub fn find_symbol<'a>(
    nodes: &'a [SymbolNode],
    name: &str,
    kind: SymbolKind,
    bound: Option<&Range>,
) -> Option<&'a SymbolNode> {
    for node in nodes {
        if let Some(bound) = bound
            && !ranges_intersect(&node.range, bound)
        {
            continue;
        }
        if node.kind == kind && name_matches(&node.name, name) {
            return Some(node);
        }
        if let Some(found) = find_symbol(&node.children, name, kind, bound) {
            return Some(found);
        }
    }
    None
}
