/// Case-block generation for an accepted quick-fix.
///
/// The generator has no way of listing an enum's members on its own.  It
/// inserts a provisional `case Prefix::` line and asks the host what could
/// be completed there; the completion list *is* the member list.  The
/// protocol is explicit:
///
/// ```text
///   Proposed  --(completions)-->  Committed   final case block inserted
///             --(nothing)------>  Aborted     provisional text deleted
/// ```
///
/// Two buffer transactions happen per run: the provisional edit, then the
/// final edit or the rollback.
///
/// - [`header`]: which punctuation the header lacks and where to insert.
/// - [`cases`]: the generated text and how the block is closed.
pub mod cases;
pub mod header;

use std::collections::HashMap;

use tower_lsp::lsp_types::{Position, Range, TextEdit, Url, WorkspaceEdit};
use tracing::{debug, warn};

use crate::config::Config;
use crate::host::{Host, HostError};
use crate::types::{CandidateSwitch, FixOutcome, FixState};
use crate::util::{line_len, line_text};
use crate::validator::resolve_switch;

use cases::{Closing, case_block, case_template, distinct_members};
use header::HeaderShape;

fn single_file_edit(uri: &Url, edits: Vec<TextEdit>) -> WorkspaceEdit {
    let mut changes = HashMap::new();
    changes.insert(uri.clone(), edits);
    WorkspaceEdit {
        changes: Some(changes),
        ..Default::default()
    }
}

fn insert(position: Position, text: impl Into<String>) -> TextEdit {
    TextEdit {
        range: Range {
            start: position,
            end: position,
        },
        new_text: text.into(),
    }
}

fn delete(start: Position, end: Position) -> TextEdit {
    TextEdit {
        range: Range { start, end },
        new_text: String::new(),
    }
}

/// The provisional insertion and everything needed to commit or undo it.
#[derive(Debug, Clone)]
struct Proposal {
    uri: Url,
    line: u32,
    prefix: String,
    open_paren_at: Option<u32>,
    close_paren_at: Option<u32>,
    insert_at: u32,
    /// Synthesized punctuation followed by the case template.
    text: String,
}

impl Proposal {
    fn new(uri: &Url, line: u32, shape: &HeaderShape, prefix: &str) -> Self {
        Self {
            uri: uri.clone(),
            line,
            prefix: prefix.to_string(),
            open_paren_at: shape.open_paren_at,
            close_paren_at: shape.close_paren_at,
            insert_at: shape.insert_at,
            text: format!("{}{}", shape.synthesized_punctuation(), case_template(prefix)),
        }
    }

    /// Where completion is queried once the provisional edit is applied:
    /// right after `case Prefix::` on the new line.
    fn completion_at(&self) -> Position {
        let placeholder = case_template(&self.prefix);
        Position::new(self.line + 1, line_len(placeholder.trim_start_matches('\n')))
    }

    fn provisional_edit(&self) -> WorkspaceEdit {
        let mut edits = Vec::new();
        if let Some(col) = self.open_paren_at {
            edits.push(insert(Position::new(self.line, col), "("));
        }
        if let Some(col) = self.close_paren_at {
            edits.push(insert(Position::new(self.line, col), ")"));
        }
        edits.push(insert(Position::new(self.line, self.insert_at), self.text.clone()));
        single_file_edit(&self.uri, edits)
    }

    /// Deletes exactly what the provisional edit inserted.  Positions are in
    /// the coordinates of the edited buffer, where the synthesized `(` sits
    /// at or before the synthesized `)`, and both before the case text.
    fn rollback_edit(&self) -> WorkspaceEdit {
        let opened = u32::from(self.open_paren_at.is_some());
        let closed = u32::from(self.close_paren_at.is_some());
        let mut edits = vec![delete(
            Position::new(self.line, self.insert_at + opened + closed),
            self.completion_at(),
        )];
        if let Some(col) = self.close_paren_at {
            let col = col + opened;
            edits.push(delete(
                Position::new(self.line, col),
                Position::new(self.line, col + 1),
            ));
        }
        if let Some(col) = self.open_paren_at {
            edits.push(delete(
                Position::new(self.line, col),
                Position::new(self.line, col + 1),
            ));
        }
        single_file_edit(&self.uri, edits)
    }

    /// Apply the provisional edit.
    async fn propose<H: Host + ?Sized>(&self, host: &H) -> Result<FixState, HostError> {
        if !host.apply_edit(self.provisional_edit()).await? {
            warn!(uri = %self.uri, "host declined the provisional edit");
            return Ok(FixState::Aborted);
        }
        Ok(FixState::Proposed {
            completion_at: self.completion_at(),
        })
    }

    async fn abort<H: Host + ?Sized>(&self, host: &H) -> FixState {
        match host.apply_edit(self.rollback_edit()).await {
            Ok(true) => {}
            Ok(false) => warn!(uri = %self.uri, "host declined the rollback edit"),
            Err(e) => warn!(uri = %self.uri, error = %e, "rollback edit failed"),
        }
        FixState::Aborted
    }

    /// Turn a proposed fix into a committed or aborted one.  Any failure
    /// after the provisional edit ends in a rollback.
    async fn settle<H: Host + ?Sized>(
        &self,
        host: &H,
        completion_at: Position,
        closing: Closing,
    ) -> FixState {
        let candidates = match host.completions_at(&self.uri, completion_at).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(uri = %self.uri, error = %e, "completion query failed, rolling back");
                return self.abort(host).await;
            }
        };

        let members = distinct_members(&candidates);
        if members.is_empty() {
            debug!(prefix = %self.prefix, "no members offered after placeholder, rolling back");
            return self.abort(host).await;
        }

        let block = case_block(&self.prefix, &members, closing);
        let edit = single_file_edit(&self.uri, vec![insert(completion_at, block)]);
        match host.apply_edit(edit).await {
            Ok(true) => FixState::Committed { members },
            Ok(false) => {
                warn!(uri = %self.uri, "host declined the case block, rolling back");
                self.abort(host).await
            }
            Err(e) => {
                warn!(uri = %self.uri, error = %e, "case block edit failed, rolling back");
                self.abort(host).await
            }
        }
    }
}

/// Resolve the switch at `range` again and fill it with one case per
/// enumerator.
///
/// `content` is the document as it was when the command was invoked; every
/// position is derived from it and the text inserted, so the buffer is not
/// re-read between the two transactions.
pub async fn add_cases<H: Host + ?Sized>(
    host: &H,
    uri: &Url,
    content: &str,
    range: &Range,
    config: &Config,
) -> Result<FixOutcome, HostError> {
    let mut candidate = CandidateSwitch::new(uri.clone(), *range);
    candidate.resolved = resolve_switch(host, uri, content, range, config).await?;

    let Some(prefix) = candidate.prefix() else {
        return Ok(FixOutcome::NotApplicable);
    };
    let header_line = candidate.range.start.line;
    let Some(shape) = line_text(content, header_line).and_then(HeaderShape::inspect) else {
        return Ok(FixOutcome::NotApplicable);
    };

    let proposal = Proposal::new(uri, header_line, &shape, prefix);
    let closing = Closing::for_header(&shape, content, header_line);
    debug!(%uri, %prefix, ?shape, ?closing, "proposing case block");

    let state = match proposal.propose(host).await? {
        FixState::Proposed { completion_at } => {
            proposal.settle(host, completion_at, closing).await
        }
        other => other,
    };

    Ok(FixOutcome::from((prefix.to_string(), state)))
}
