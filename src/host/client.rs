/// [`Host`](super::Host) implementation that forwards every query to the
/// connected editor and applies edits through `workspace/applyEdit`.
use tower_lsp::Client;
use tower_lsp::lsp_types::request::Request;
use tower_lsp::lsp_types::{
    Location, Position, TextDocumentIdentifier, TextDocumentPositionParams, Url, WorkspaceEdit,
};

use super::requests::{
    HostCompletion, HostDefinition, HostDocumentSymbol, HostHover, HostTypeDefinition,
};
use super::{EditSink, HostError, LanguageService, convert};
use crate::types::{CompletionCandidate, HoverText, SymbolNode};

pub struct ClientHost {
    client: Client,
}

impl ClientHost {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn send<R: Request>(&self, params: R::Params) -> Result<R::Result, HostError> {
        self.client
            .send_request::<R>(params)
            .await
            .map_err(|source| HostError::Transport {
                method: R::METHOD,
                source,
            })
    }
}

fn at(uri: &Url, position: Position) -> TextDocumentPositionParams {
    TextDocumentPositionParams {
        text_document: TextDocumentIdentifier { uri: uri.clone() },
        position,
    }
}

#[tower_lsp::async_trait]
impl LanguageService for ClientHost {
    async fn definitions_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> Result<Vec<Location>, HostError> {
        let response = self.send::<HostDefinition>(at(uri, position)).await?;
        Ok(response.map(convert::locations).unwrap_or_default())
    }

    async fn hover_at(&self, uri: &Url, position: Position) -> Result<Vec<HoverText>, HostError> {
        let hovers = self.send::<HostHover>(at(uri, position)).await?;
        Ok(hovers
            .unwrap_or_default()
            .iter()
            .map(convert::hover_text)
            .collect())
    }

    async fn type_definition_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> Result<Vec<Location>, HostError> {
        let response = self.send::<HostTypeDefinition>(at(uri, position)).await?;
        Ok(response.map(convert::locations).unwrap_or_default())
    }

    async fn document_symbols(&self, uri: &Url) -> Result<Vec<SymbolNode>, HostError> {
        let response = self
            .send::<HostDocumentSymbol>(TextDocumentIdentifier { uri: uri.clone() })
            .await?;
        Ok(response.map(convert::symbols).unwrap_or_default())
    }

    async fn completions_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> Result<Vec<CompletionCandidate>, HostError> {
        let response = self.send::<HostCompletion>(at(uri, position)).await?;
        Ok(response.map(convert::completions).unwrap_or_default())
    }
}

#[tower_lsp::async_trait]
impl EditSink for ClientHost {
    async fn apply_edit(&self, edit: WorkspaceEdit) -> Result<bool, HostError> {
        let response =
            self.client
                .apply_edit(edit)
                .await
                .map_err(|source| HostError::Transport {
                    method: "workspace/applyEdit",
                    source,
                })?;
        if !response.applied
            && let Some(reason) = response.failure_reason
        {
            return Err(HostError::Rejected {
                method: "workspace/applyEdit",
                reason,
            });
        }
        Ok(response.applied)
    }
}
