/// Code-action and command orchestration.
///
/// These are the two top-level boundaries of the server.  Each one runs
/// its own resolution pass against the host and swallows every failure:
/// a broken query means "no quick-fix" or "no edit", never an LSP error.
use tower_lsp::lsp_types::*;
use tracing::{debug, warn};

use crate::generator::add_cases;
use crate::types::FixOutcome;
use crate::util::{is_cpp_document, line_len, line_text};
use crate::validator::{is_enum_switch, passes_switch_gate};
use crate::{ADD_CASES_COMMAND, ADD_CASES_TITLE, Backend};

/// The range a quick-fix pass sweeps.
///
/// A bare cursor is widened to its whole line so the fix is found no matter
/// where on the header the cursor sits.
pub fn header_range(content: &str, requested: Range) -> Range {
    if requested.start != requested.end {
        return requested;
    }
    let line = requested.start.line;
    let len = line_text(content, line).map(line_len).unwrap_or(0);
    Range {
        start: Position::new(line, 0),
        end: Position::new(line, len),
    }
}

impl Backend {
    /// Offer the "generate cases" quick-fix when the range is a switch
    /// over an enum.
    pub(crate) async fn handle_code_action(
        &self,
        params: CodeActionParams,
    ) -> Option<CodeActionResponse> {
        let uri = params.text_document.uri;
        let doc = self.document(uri.as_str())?;
        let config = self.config();

        if !is_cpp_document(
            &uri,
            doc.language_id.as_deref(),
            &config.language_ids,
            &config.file_extensions,
        ) {
            return None;
        }

        let range = header_range(&doc.text, params.range);
        if !passes_switch_gate(&doc.text, &range) {
            return None;
        }

        let host = self.host.as_ref()?;
        if !is_enum_switch(host.as_ref(), &uri, &doc.text, &range, &config).await {
            return None;
        }

        let arguments = vec![serde_json::to_value(&uri).ok()?, serde_json::to_value(range).ok()?];
        Some(vec![CodeActionOrCommand::CodeAction(CodeAction {
            title: config.action_title,
            kind: Some(CodeActionKind::QUICKFIX),
            command: Some(Command {
                title: ADD_CASES_TITLE.to_string(),
                command: ADD_CASES_COMMAND.to_string(),
                arguments: Some(arguments),
            }),
            ..CodeAction::default()
        })])
    }

    /// Run the add-cases command with its `[uri, range]` arguments.
    pub(crate) async fn handle_add_cases(
        &self,
        arguments: Vec<serde_json::Value>,
    ) -> Option<FixOutcome> {
        let (uri, range): (Url, Range) =
            match serde_json::from_value(serde_json::Value::Array(arguments)) {
                Ok(args) => args,
                Err(e) => {
                    warn!(error = %e, "malformed {} arguments", ADD_CASES_COMMAND);
                    return None;
                }
            };

        let Some(doc) = self.document(uri.as_str()) else {
            debug!(%uri, "add cases on a document that is not open");
            return None;
        };
        let host = self.host.as_ref()?;
        let config = self.config();

        match add_cases(host.as_ref(), &uri, &doc.text, &range, &config).await {
            Ok(outcome) => {
                if let FixOutcome::Committed { prefix, members } = &outcome {
                    self.log(
                        MessageType::INFO,
                        format!("Added {} cases for {}", members.len(), prefix),
                    )
                    .await;
                }
                Some(outcome)
            }
            Err(e) => {
                warn!(%uri, error = %e, "add cases failed");
                None
            }
        }
    }
}
