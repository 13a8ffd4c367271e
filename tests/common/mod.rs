#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use enumswitch_lsp::types::{CompletionCandidate, HoverText, SymbolNode};
use enumswitch_lsp::util::{byte_at_column, word_at_position};
use enumswitch_lsp::{Backend, EditSink, HostError, LanguageService};
use parking_lot::Mutex;
use tower_lsp::lsp_types::*;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

pub fn range(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> Range {
    Range {
        start: Position::new(start_line, start_char),
        end: Position::new(end_line, end_char),
    }
}

/// A variable the fake language server knows the declaration of.
pub struct FakeVariable {
    pub name: String,
    pub decl: Range,
    pub hover: String,
    /// Name of the enum its type definition points at.
    pub type_name: Option<String>,
}

pub struct FakeEnum {
    pub name: String,
    pub range: Range,
    pub members: Vec<String>,
}

/// In-memory stand-in for the editor: one mutable document plus scripted
/// answers for every language-service query.
///
/// Completion only answers after `Name::` for a known enum `Name`, which is
/// what the provisional `case Name::` line relies on.
pub struct FakeHost {
    pub uri: Url,
    text: Mutex<String>,
    variables: Vec<FakeVariable>,
    enums: Vec<FakeEnum>,
    extra_symbols: Vec<SymbolNode>,
    pub fail_hover: bool,
    pub silent_completions: bool,
    pub decline_edits: bool,
    /// 1-based number of the one edit answered with `applied: false`.
    pub decline_edit_number: Option<usize>,
    /// 1-based number of the one edit answered with an error.
    pub reject_edit_number: Option<usize>,
    definition_queries: AtomicUsize,
    completion_queries: AtomicUsize,
    edits: Mutex<Vec<WorkspaceEdit>>,
}

impl FakeHost {
    pub fn new(uri: &str, text: &str) -> Self {
        Self {
            uri: Url::parse(uri).expect("valid uri"),
            text: Mutex::new(text.to_string()),
            variables: Vec::new(),
            enums: Vec::new(),
            extra_symbols: Vec::new(),
            fail_hover: false,
            silent_completions: false,
            decline_edits: false,
            decline_edit_number: None,
            reject_edit_number: None,
            definition_queries: AtomicUsize::new(0),
            completion_queries: AtomicUsize::new(0),
            edits: Mutex::new(Vec::new()),
        }
    }

    pub fn with_variable(mut self, name: &str, decl: Range, hover: &str, type_name: Option<&str>) -> Self {
        self.variables.push(FakeVariable {
            name: name.to_string(),
            decl,
            hover: hover.to_string(),
            type_name: type_name.map(str::to_string),
        });
        self
    }

    pub fn with_enum(mut self, name: &str, range: Range, members: &[&str]) -> Self {
        self.enums.push(FakeEnum {
            name: name.to_string(),
            range,
            members: members.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    pub fn with_symbol(mut self, symbol: SymbolNode) -> Self {
        self.extra_symbols.push(symbol);
        self
    }

    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    pub fn edit_count(&self) -> usize {
        self.edits.lock().len()
    }

    pub fn definition_queries(&self) -> usize {
        self.definition_queries.load(Ordering::SeqCst)
    }

    pub fn completion_queries(&self) -> usize {
        self.completion_queries.load(Ordering::SeqCst)
    }

    fn variable_declared_at(&self, position: Position) -> Option<&FakeVariable> {
        self.variables.iter().find(|v| v.decl.start == position)
    }
}

/// Byte offset of an LSP position (columns counted in UTF-16 units).
pub fn offset_of(text: &str, position: Position) -> usize {
    let mut offset = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i == position.line as usize {
            let col = byte_at_column(line, position.character).unwrap_or(line.len());
            return offset + col;
        }
        offset += line.len() + 1;
    }
    text.len()
}

/// Apply the edits of one transaction.  All ranges refer to the text before
/// the transaction; inserts at the same spot keep their array order.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<(usize, &TextEdit)> = edits.iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| {
        (b.range.start, b.range.end, ib).cmp(&(a.range.start, a.range.end, ia))
    });

    let mut result = text.to_string();
    for (_, edit) in ordered {
        let start = offset_of(&result, edit.range.start);
        let end = offset_of(&result, edit.range.end);
        result.replace_range(start..end, &edit.new_text);
    }
    result
}

#[tower_lsp::async_trait]
impl LanguageService for FakeHost {
    async fn definitions_at(
        &self,
        _uri: &Url,
        position: Position,
    ) -> Result<Vec<Location>, HostError> {
        self.definition_queries.fetch_add(1, Ordering::SeqCst);
        let text = self.text();
        let Some(word) = word_at_position(&text, position) else {
            return Ok(Vec::new());
        };
        Ok(self
            .variables
            .iter()
            .filter(|v| v.name == word)
            .map(|v| Location {
                uri: self.uri.clone(),
                range: v.decl,
            })
            .collect())
    }

    async fn hover_at(&self, _uri: &Url, position: Position) -> Result<Vec<HoverText>, HostError> {
        if self.fail_hover {
            return Err(HostError::Rejected {
                method: "enumSwitch/hover",
                reason: "language server crashed".to_string(),
            });
        }
        Ok(self
            .variable_declared_at(position)
            .map(|v| vec![HoverText(v.hover.clone())])
            .unwrap_or_default())
    }

    async fn type_definition_at(
        &self,
        _uri: &Url,
        position: Position,
    ) -> Result<Vec<Location>, HostError> {
        let Some(type_name) = self
            .variable_declared_at(position)
            .and_then(|v| v.type_name.as_deref())
        else {
            return Ok(Vec::new());
        };
        Ok(self
            .enums
            .iter()
            .filter(|e| e.name == type_name)
            .map(|e| Location {
                uri: self.uri.clone(),
                range: e.range,
            })
            .collect())
    }

    async fn document_symbols(&self, _uri: &Url) -> Result<Vec<SymbolNode>, HostError> {
        let mut symbols: Vec<SymbolNode> = self.extra_symbols.clone();
        for e in &self.enums {
            let children = e
                .members
                .iter()
                .map(|m| SymbolNode::new(m.clone(), SymbolKind::ENUM_MEMBER, e.range))
                .collect();
            symbols.push(SymbolNode::new(e.name.clone(), SymbolKind::ENUM, e.range).with_children(children));
        }
        Ok(symbols)
    }

    async fn completions_at(
        &self,
        _uri: &Url,
        position: Position,
    ) -> Result<Vec<CompletionCandidate>, HostError> {
        self.completion_queries.fetch_add(1, Ordering::SeqCst);
        if self.silent_completions {
            return Ok(Vec::new());
        }
        let text = self.text();
        let Some(line) = text.split('\n').nth(position.line as usize) else {
            return Ok(Vec::new());
        };
        let before = &line[..byte_at_column(line, position.character).unwrap_or(line.len())];
        Ok(self
            .enums
            .iter()
            .find(|e| before.ends_with(&format!("{}::", e.name)))
            .map(|e| {
                e.members
                    .iter()
                    .map(|m| CompletionCandidate {
                        label: m.clone(),
                        kind: Some(CompletionItemKind::ENUM_MEMBER),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[tower_lsp::async_trait]
impl EditSink for FakeHost {
    async fn apply_edit(&self, edit: WorkspaceEdit) -> Result<bool, HostError> {
        let number = {
            let mut edits = self.edits.lock();
            edits.push(edit.clone());
            edits.len()
        };
        if self.reject_edit_number == Some(number) {
            return Err(HostError::Rejected {
                method: "workspace/applyEdit",
                reason: "busy".to_string(),
            });
        }
        if self.decline_edits || self.decline_edit_number == Some(number) {
            return Ok(false);
        }
        if let Some(edits) = edit.changes.as_ref().and_then(|c| c.get(&self.uri)) {
            let mut text = self.text.lock();
            *text = apply_text_edits(&text, edits);
        }
        Ok(true)
    }
}

// ─── Shared fixtures ────────────────────────────────────────────────────────

pub const URI: &str = "file:///paint.cpp";

/// `enum Color { RED, GREEN, BLUE };` on line 0.
pub const COLOR_ENUM_LINE: &str = "enum Color { RED, GREEN, BLUE };\n";

/// `void paint(Color c) {` on line 1, declaring `c` at column 17.
pub const PAINT_SIGNATURE_LINE: &str = "void paint(Color c) {\n";

pub fn color_decl() -> Range {
    range(1, 17, 1, 18)
}

pub fn color_enum_range() -> Range {
    range(0, 0, 0, 32)
}

/// A document with the `Color` enum on line 0, `paint(Color c)` on line 1
/// and `body` starting at line 2.
pub fn color_document(body: &str) -> String {
    format!("{COLOR_ENUM_LINE}{PAINT_SIGNATURE_LINE}{body}")
}

/// A host that resolves `c` to `Color { RED, GREEN, BLUE }`.
pub fn color_host(body: &str) -> FakeHost {
    FakeHost::new(URI, &color_document(body))
        .with_enum("Color", color_enum_range(), &["RED", "GREEN", "BLUE"])
        .with_variable("c", color_decl(), "```cpp\nColor c\n```", Some("Color"))
}

pub fn backend_with_host(host: Arc<FakeHost>) -> Backend {
    Backend::new_test_with_host(host)
}
