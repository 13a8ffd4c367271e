/// Text of the generated case block.
use crate::types::CompletionCandidate;

use super::header::HeaderShape;

/// Provisional text that makes the host offer the enum's members.
pub fn case_template(prefix: &str) -> String {
    format!("\ncase {prefix}::")
}

/// Member names in completion order, trimmed, without blanks or repeats.
pub fn distinct_members(candidates: &[CompletionCandidate]) -> Vec<String> {
    let mut members: Vec<String> = Vec::new();
    for candidate in candidates {
        let label = candidate.label.trim();
        if label.is_empty() || members.iter().any(|m| m == label) {
            continue;
        }
        members.push(label.to_string());
    }
    members
}

/// What follows the last `break;` of the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    /// The body is already closed further down.
    Nothing,
    /// The closing brace was on the header line and now follows the block;
    /// move it to a line of its own.
    LineBreak,
    /// No closing brace exists yet.
    Brace,
}

impl Closing {
    /// Decide how the block ends, given the header and the document as it
    /// was before any edit.
    pub fn for_header(shape: &HeaderShape, content: &str, header_line: u32) -> Self {
        if shape.end_curly_at.is_some() {
            Closing::LineBreak
        } else if shape.needs_open_brace || !body_closed_below(content, header_line + 1) {
            Closing::Brace
        } else {
            Closing::Nothing
        }
    }

    fn text(self) -> &'static str {
        match self {
            Closing::Nothing => "",
            Closing::LineBreak => "\n",
            Closing::Brace => "\n}",
        }
    }
}

/// Scan down from `from_line`: a `}` before any other non-blank line means
/// the body is already closed.  Any other non-blank line means the body was
/// a single bare statement; running off the end means nothing closes it.
pub fn body_closed_below(content: &str, from_line: u32) -> bool {
    for line in content.lines().skip(from_line as usize) {
        if line.contains('}') {
            return true;
        }
        if !line.trim().is_empty() {
            return false;
        }
    }
    false
}

/// Final text inserted right after the provisional `case Prefix::`.
///
/// The first member completes the placeholder label; every other member
/// gets its own `case Prefix::Member:` / `break;` pair.
pub fn case_block(prefix: &str, members: &[String], closing: Closing) -> String {
    let mut block = String::new();
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            block.push_str(&format!("\ncase {prefix}::"));
        }
        block.push_str(member);
        block.push_str(":\nbreak;");
    }
    block.push_str(closing.text());
    block
}
