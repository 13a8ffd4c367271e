//! Normalisation of raw LSP responses into the crate's own types.
//!
//! Providers are free to answer in several shapes (scalar or array
//! locations, links, nested or flat symbols, bare arrays or completion
//! lists).  Everything downstream only ever sees one shape per query.
use tower_lsp::lsp_types::{
    CompletionResponse, DocumentSymbol, DocumentSymbolResponse, GotoDefinitionResponse, Hover,
    HoverContents, Location, MarkedString,
};

use crate::types::{CompletionCandidate, HoverText, SymbolNode};

/// Flatten any definition-shaped response into plain locations.
///
/// Links resolve to their target selection range (the declared name), which
/// is what hover and type-definition are later queried at.
pub fn locations(response: GotoDefinitionResponse) -> Vec<Location> {
    match response {
        GotoDefinitionResponse::Scalar(location) => vec![location],
        GotoDefinitionResponse::Array(locations) => locations,
        GotoDefinitionResponse::Link(links) => links
            .into_iter()
            .map(|link| Location {
                uri: link.target_uri,
                range: link.target_selection_range,
            })
            .collect(),
    }
}

fn render_marked(marked: &MarkedString) -> String {
    match marked {
        MarkedString::String(text) => text.clone(),
        MarkedString::LanguageString(code) => {
            format!("```{}\n{}\n```", code.language, code.value)
        }
    }
}

/// Render a hover as one markdown string.
pub fn hover_text(hover: &Hover) -> HoverText {
    let text = match &hover.contents {
        HoverContents::Scalar(marked) => render_marked(marked),
        HoverContents::Array(parts) => parts
            .iter()
            .map(render_marked)
            .collect::<Vec<_>>()
            .join("\n"),
        HoverContents::Markup(markup) => markup.value.clone(),
    };
    HoverText(text)
}

fn symbol_node(symbol: DocumentSymbol) -> SymbolNode {
    let children = symbol
        .children
        .unwrap_or_default()
        .into_iter()
        .map(symbol_node)
        .collect();
    SymbolNode::new(symbol.name, symbol.kind, symbol.range).with_children(children)
}

pub fn symbols(response: DocumentSymbolResponse) -> Vec<SymbolNode> {
    match response {
        DocumentSymbolResponse::Nested(symbols) => symbols.into_iter().map(symbol_node).collect(),
        DocumentSymbolResponse::Flat(symbols) => symbols
            .into_iter()
            .map(|info| SymbolNode::new(info.name, info.kind, info.location.range))
            .collect(),
    }
}

pub fn completions(response: CompletionResponse) -> Vec<CompletionCandidate> {
    let items = match response {
        CompletionResponse::Array(items) => items,
        CompletionResponse::List(list) => list.items,
    };
    items
        .into_iter()
        .map(|item| CompletionCandidate {
            label: item.label,
            kind: item.kind,
        })
        .collect()
}
