//! Data types used throughout the enum-switch server.
//!
//! These are the normalised shapes of everything the host editor's
//! language services hand back (hovers, symbols, completions) plus the
//! in-flight unit of work of a single quick-fix pass.
use tower_lsp::lsp_types::{CompletionItemKind, Location, Position, Range, SymbolKind, Url};

/// Markdown text of one hover result.
///
/// Usually a fenced code block with the declaration followed by free text.
/// It is parsed heuristically by [`crate::hover::extract_type_name`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoverText(pub String);

impl HoverText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// A node of a document's symbol tree.
///
/// Flat symbol listings are normalised into childless nodes whose range is
/// the symbol's location range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolNode {
    pub name: String,
    pub kind: SymbolKind,
    /// Full extent of the declaration.
    pub range: Range,
    pub children: Vec<SymbolNode>,
}

impl SymbolNode {
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SymbolNode>) -> Self {
        self.children = children;
        self
    }
}

/// One completion suggestion; only its label is used to name enumerators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub label: String,
    pub kind: Option<CompletionItemKind>,
}

impl CompletionCandidate {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: None,
        }
    }
}

/// A definition found while sweeping the switch header, together with the
/// identifier the sweep was sitting on when it was reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepHit {
    pub location: Location,
    pub identifier: String,
}

/// The enum a switch statement was resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnum {
    /// Bare declared name, used to qualify case labels (`Prefix::Member`).
    pub prefix: String,
    /// The enum symbol matched in the type definition's symbol tree.
    pub symbol: SymbolNode,
    /// Document that declares the enum.
    pub declared_in: Url,
    /// The switched identifier that led to the enum.
    pub identifier: String,
}

/// A switch statement under consideration by one quick-fix pass.
///
/// Created per code-action request and per executed command; never shared
/// between the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSwitch {
    pub uri: Url,
    pub range: Range,
    pub resolved: Option<ResolvedEnum>,
}

impl CandidateSwitch {
    pub fn new(uri: Url, range: Range) -> Self {
        Self {
            uri,
            range,
            resolved: None,
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.resolved.as_ref().map(|r| r.prefix.as_str())
    }
}

/// States of the speculative edit protocol used by the case generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixState {
    /// The `case Prefix::` placeholder is in the buffer; completions are
    /// queried at `completion_at`.
    Proposed { completion_at: Position },
    /// The case block was written.
    Committed { members: Vec<String> },
    /// The placeholder was deleted again (or the host declined an edit).
    Aborted,
}

/// What an executed add-cases command ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The range is not a switch over an enum; the buffer was not touched.
    NotApplicable,
    /// One case per member was inserted.
    Committed { prefix: String, members: Vec<String> },
    /// The provisional edit was rolled back or refused.
    Aborted { prefix: String },
}

impl From<(String, FixState)> for FixOutcome {
    fn from((prefix, state): (String, FixState)) -> Self {
        match state {
            FixState::Committed { members } => FixOutcome::Committed { prefix, members },
            FixState::Proposed { .. } | FixState::Aborted => FixOutcome::Aborted { prefix },
        }
    }
}
