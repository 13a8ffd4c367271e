/// Server-to-client requests that ask the editor to run one of its own
/// language providers and hand the answer back.
///
/// The editor side answers each method with exactly what its built-in
/// provider returned for the given document and position.
use tower_lsp::lsp_types::request::Request;
use tower_lsp::lsp_types::{
    CompletionResponse, DocumentSymbolResponse, GotoDefinitionResponse, Hover,
    TextDocumentIdentifier, TextDocumentPositionParams,
};

pub enum HostDefinition {}

impl Request for HostDefinition {
    type Params = TextDocumentPositionParams;
    type Result = Option<GotoDefinitionResponse>;
    const METHOD: &'static str = "enumSwitch/definition";
}

pub enum HostHover {}

impl Request for HostHover {
    type Params = TextDocumentPositionParams;
    type Result = Option<Vec<Hover>>;
    const METHOD: &'static str = "enumSwitch/hover";
}

pub enum HostTypeDefinition {}

impl Request for HostTypeDefinition {
    type Params = TextDocumentPositionParams;
    type Result = Option<GotoDefinitionResponse>;
    const METHOD: &'static str = "enumSwitch/typeDefinition";
}

pub enum HostDocumentSymbol {}

impl Request for HostDocumentSymbol {
    type Params = TextDocumentIdentifier;
    type Result = Option<DocumentSymbolResponse>;
    const METHOD: &'static str = "enumSwitch/documentSymbol";
}

pub enum HostCompletion {}

impl Request for HostCompletion {
    type Params = TextDocumentPositionParams;
    type Result = Option<CompletionResponse>;
    const METHOD: &'static str = "enumSwitch/completion";
}
