/// Utility functions for the enum-switch server.
///
/// This module contains text helpers for line / word lookup at LSP
/// positions, C++ document detection, and the client logging helper.
///
/// LSP columns count UTF-16 code units; text is sliced by byte offset, so
/// every column is converted at the boundary.
use tower_lsp::lsp_types::*;

use crate::Backend;

/// Whether `ch` can be part of a C++ identifier.
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Whether `text` is a single C++ identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => chars.all(is_identifier_char),
        _ => false,
    }
}

/// The text of line `line`, without its line terminator.
pub fn line_text(content: &str, line: u32) -> Option<&str> {
    content.lines().nth(line as usize)
}

/// Length of `text` in LSP columns (UTF-16 code units).
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|ch| ch.len_utf16() as u32).sum()
}

/// Length of a line in columns.
pub fn line_len(line: &str) -> u32 {
    utf16_len(line)
}

/// LSP column of byte offset `byte` in `line`.
pub fn column_at_byte(line: &str, byte: usize) -> u32 {
    utf16_len(&line[..byte])
}

/// Byte offset of LSP column `column` in `line`, or `None` past the end.
///
/// A column that falls inside a surrogate pair maps to the next character.
pub fn byte_at_column(line: &str, column: u32) -> Option<usize> {
    let mut units = 0u32;
    for (idx, ch) in line.char_indices() {
        if units >= column {
            return Some(idx);
        }
        units += ch.len_utf16() as u32;
    }
    (units >= column).then_some(line.len())
}

/// Extract the identifier at the given position.
///
/// A position just past the last character of an identifier still yields
/// that identifier, so a sweep that lands on the closing `)` of
/// `switch (c)` reports `c`.
pub fn word_at_position(content: &str, position: Position) -> Option<String> {
    let line = line_text(content, position.line)?;
    let pos = byte_at_column(line, position.character)?;

    let start = line[..pos]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| is_identifier_char(*ch))
        .last()
        .map_or(pos, |(idx, _)| idx);
    let end = line[pos..]
        .char_indices()
        .find(|(_, ch)| !is_identifier_char(*ch))
        .map_or(line.len(), |(idx, _)| pos + idx);

    (start < end).then(|| line[start..end].to_string())
}

/// Byte offset of the first whole-word occurrence of `word` in `text`:
/// neither neighbour may be an identifier character.
pub fn find_word(text: &str, word: &str) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    text.match_indices(word).map(|(idx, _)| idx).find(|&idx| {
        let before_ok = text[..idx]
            .chars()
            .next_back()
            .is_none_or(|ch| !is_identifier_char(ch));
        let after_ok = text[idx + word.len()..]
            .chars()
            .next()
            .is_none_or(|ch| !is_identifier_char(ch));
        before_ok && after_ok
    })
}

/// Decide whether a document is C++ from its language id, falling back to
/// the file extension when the id is unknown.
pub fn is_cpp_document(
    uri: &Url,
    language_id: Option<&str>,
    language_ids: &[String],
    extensions: &[String],
) -> bool {
    if let Some(id) = language_id {
        return language_ids.iter().any(|known| known == id);
    }

    let path = uri.path();
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    extensions.iter().any(|known| known.eq_ignore_ascii_case(ext))
}

impl Backend {
    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
