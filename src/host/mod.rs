/// Access to the host editor's language intelligence and buffer.
///
/// The add-on has no C++ front end of its own.  Everything it knows about a
/// document comes from five queries answered by the host (definition,
/// hover, type definition, document symbols, completion) and every change
/// it makes goes through the host's edit machinery.  Both sides sit behind
/// traits so the resolution pipeline can run against the real LSP client
/// or an in-memory double.
///
/// - [`requests`]: the custom server-to-client request types.
/// - [`convert`]: normalisation of raw LSP responses.
/// - [`client`]: [`ClientHost`], the implementation over `tower_lsp::Client`.
mod client;
pub mod convert;
pub mod requests;

pub use client::ClientHost;

use tower_lsp::lsp_types::{Location, Position, Url, WorkspaceEdit};

use crate::types::{CompletionCandidate, HoverText, SymbolNode};

/// Failure of a host round-trip.
///
/// An empty answer is not an error; these only cover requests that could
/// not be completed at all.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("host request `{method}` failed: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: tower_lsp::jsonrpc::Error,
    },
    #[error("host rejected `{method}`: {reason}")]
    Rejected { method: &'static str, reason: String },
}

/// Query side of the host.  Each call may take arbitrarily long.
#[tower_lsp::async_trait]
pub trait LanguageService: Send + Sync {
    async fn definitions_at(&self, uri: &Url, position: Position)
    -> Result<Vec<Location>, HostError>;

    async fn hover_at(&self, uri: &Url, position: Position) -> Result<Vec<HoverText>, HostError>;

    async fn type_definition_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> Result<Vec<Location>, HostError>;

    async fn document_symbols(&self, uri: &Url) -> Result<Vec<SymbolNode>, HostError>;

    async fn completions_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> Result<Vec<CompletionCandidate>, HostError>;
}

/// Edit side of the host.  Each call is one undoable transaction.
///
/// Returns whether the host actually applied the edit.
#[tower_lsp::async_trait]
pub trait EditSink: Send + Sync {
    async fn apply_edit(&self, edit: WorkspaceEdit) -> Result<bool, HostError>;
}

/// Everything the backend needs from the editor it is attached to.
pub trait Host: LanguageService + EditSink {}

impl<T: LanguageService + EditSink> Host for T {}
