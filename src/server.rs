/// LSP server trait implementation.
///
/// This module contains the `impl LanguageServer for Backend` block,
/// which handles all LSP protocol messages (initialize, didOpen, didChange,
/// didClose, codeAction, executeCommand).
use std::path::PathBuf;

use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{info, warn};

use crate::config::Config;
use crate::types::FixOutcome;
use crate::{ADD_CASES_COMMAND, Backend, OpenDocument};

fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    if let Some(folder) = params.workspace_folders.as_ref().and_then(|f| f.first()) {
        return folder.uri.to_file_path().ok();
    }
    #[allow(deprecated)]
    let root_uri = params.root_uri.as_ref();
    root_uri.and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = workspace_root(&params);

        let mut config = match Config::discover(self.config_path.as_deref(), root.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Config::default()
            }
        };
        if let Some(options) = params.initialization_options {
            match Config::from_options(options) {
                Ok(from_client) => config = from_client,
                Err(e) => warn!(error = %e, "ignoring initializationOptions"),
            }
        }
        self.set_config(config);
        *self.workspace_root.lock() = root;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                        work_done_progress_options: WorkDoneProgressOptions::default(),
                        resolve_provider: Some(false),
                    },
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![ADD_CASES_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let root = self.workspace_root.lock().clone();
        info!(?root, "server initialized");
        self.log(MessageType::INFO, format!("{} {} initialized", self.name, self.version))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.open_files.lock().insert(
            doc.uri.to_string(),
            OpenDocument {
                language_id: Some(doc.language_id),
                text: doc.text,
            },
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        if let Some(change) = params.content_changes.into_iter().last() {
            let mut files = self.open_files.lock();
            match files.get_mut(&uri) {
                Some(doc) => doc.text = change.text,
                None => {
                    files.insert(
                        uri,
                        OpenDocument {
                            language_id: None,
                            text: change.text,
                        },
                    );
                }
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        self.open_files.lock().remove(&uri);
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        Ok(self.handle_code_action(params).await)
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        if params.command != ADD_CASES_COMMAND {
            warn!(command = %params.command, "unknown command");
            return Ok(None);
        }

        match self.handle_add_cases(params.arguments).await {
            Some(FixOutcome::Committed { prefix, members }) => Ok(Some(serde_json::json!({
                "prefix": prefix,
                "members": members,
            }))),
            _ => Ok(None),
        }
    }
}
