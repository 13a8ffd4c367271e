/// Enum-switch eligibility.
///
/// Decides whether a range covers a `switch` whose controlling expression
/// has an enumeration type, using nothing but the host's language services:
///
///   1. Textual gate: the range's start line must contain `switch`.
///   2. Definition sweep over every position of the range.
///   3. Deduplication of the hits by range.
///   4. For each hit: hover -> declared type name, type definition ->
///      symbol tree -> an `enum` symbol with that name.
///
/// The same pass is run independently by the code action and by the
/// add-cases command; nothing is cached between the two.
use tower_lsp::lsp_types::{Location, Position, Range, SymbolKind, Url};
use tracing::{debug, warn};

use crate::config::Config;
use crate::host::{HostError, LanguageService};
use crate::hover::extract_type_name;
use crate::symbols::find_symbol;
use crate::types::{ResolvedEnum, SweepHit, SymbolNode};
use crate::util::{line_len, line_text, word_at_position};

/// Keyword a candidate line has to contain before any query is issued.
pub const SWITCH_KEYWORD: &str = "switch";

/// Whether the range's start line contains the `switch` keyword.
pub fn passes_switch_gate(content: &str, range: &Range) -> bool {
    line_text(content, range.start.line).is_some_and(|line| line.contains(SWITCH_KEYWORD))
}

/// Query definitions at every position of `range`, line by line and column
/// by column, one request at a time.
///
/// The end column of each line is included.  Hits are deduplicated by
/// range as they arrive; the first identifier seen for a range is kept.
pub async fn sweep_definitions<S: LanguageService + ?Sized>(
    service: &S,
    uri: &Url,
    content: &str,
    range: &Range,
    max_positions: usize,
) -> Result<Vec<SweepHit>, HostError> {
    let mut hits: Vec<SweepHit> = Vec::new();
    let mut queried = 0usize;

    for line_number in range.start.line..=range.end.line {
        let Some(line) = line_text(content, line_number) else {
            break;
        };
        let first_char = if line_number == range.start.line {
            range.start.character
        } else {
            0
        };
        let last_char = if line_number == range.end.line {
            range.end.character
        } else {
            line_len(line)
        };

        for character in first_char..=last_char {
            if queried >= max_positions {
                debug!(queried, "definition sweep stopped at position cap");
                return Ok(hits);
            }
            queried += 1;

            let position = Position::new(line_number, character);
            let locations = service.definitions_at(uri, position).await?;
            if locations.is_empty() {
                continue;
            }
            let identifier = word_at_position(content, position).unwrap_or_default();
            for location in locations {
                if hits.iter().any(|hit| hit.location.range == location.range) {
                    continue;
                }
                hits.push(SweepHit {
                    location,
                    identifier: identifier.clone(),
                });
            }
        }
    }

    Ok(hits)
}

/// Look for an enum called `prefix` starting from one definition.
///
/// The enum's symbol tree is searched around each type-definition location
/// of the definition.  When the host reports no type definition, the
/// definition's own document is searched without a bound.
async fn find_enum_symbol<S: LanguageService + ?Sized>(
    service: &S,
    definition: &Location,
    prefix: &str,
) -> Result<Option<(Url, SymbolNode)>, HostError> {
    let type_definitions = service
        .type_definition_at(&definition.uri, definition.range.start)
        .await?;

    if type_definitions.is_empty() {
        let symbols = service.document_symbols(&definition.uri).await?;
        return Ok(find_symbol(&symbols, prefix, SymbolKind::ENUM, None)
            .map(|symbol| (definition.uri.clone(), symbol.clone())));
    }

    for type_definition in &type_definitions {
        let symbols = service.document_symbols(&type_definition.uri).await?;
        if let Some(symbol) = find_symbol(
            &symbols,
            prefix,
            SymbolKind::ENUM,
            Some(&type_definition.range),
        ) {
            return Ok(Some((type_definition.uri.clone(), symbol.clone())));
        }
    }
    Ok(None)
}

/// Resolve the enum a switch statement switches on.
///
/// `Ok(None)` covers every "cannot proceed" outcome: no `switch` on the
/// line, no definitions, no usable hover, or no matching enum symbol.
pub async fn resolve_switch<S: LanguageService + ?Sized>(
    service: &S,
    uri: &Url,
    content: &str,
    range: &Range,
    config: &Config,
) -> Result<Option<ResolvedEnum>, HostError> {
    if !passes_switch_gate(content, range) {
        return Ok(None);
    }

    let hits = sweep_definitions(service, uri, content, range, config.max_sweep_positions).await?;
    if hits.is_empty() {
        debug!(%uri, "no definitions under switch header");
        return Ok(None);
    }
    debug!(%uri, count = hits.len(), "distinct definitions under switch header");

    for hit in &hits {
        if hit.identifier.is_empty() {
            continue;
        }

        let hovers = service
            .hover_at(&hit.location.uri, hit.location.range.start)
            .await?;
        let Some(hover) = hovers.iter().find(|hover| !hover.is_empty()) else {
            continue;
        };
        if !hover.as_str().contains(&hit.identifier) {
            continue;
        }

        let Some(prefix) = extract_type_name(hover.as_str(), &hit.identifier) else {
            debug!(identifier = %hit.identifier, "hover did not yield a type name");
            continue;
        };

        if let Some((declared_in, symbol)) = find_enum_symbol(service, &hit.location, &prefix).await? {
            debug!(identifier = %hit.identifier, %prefix, "switch resolved to enum");
            return Ok(Some(ResolvedEnum {
                prefix,
                symbol,
                declared_in,
                identifier: hit.identifier.clone(),
            }));
        }
    }

    Ok(None)
}

/// Eligibility verdict for the quick-fix.  Host failures count as "not
/// eligible" and never reach the editor.
pub async fn is_enum_switch<S: LanguageService + ?Sized>(
    service: &S,
    uri: &Url,
    content: &str,
    range: &Range,
    config: &Config,
) -> bool {
    match resolve_switch(service, uri, content, range, config).await {
        Ok(resolved) => resolved.is_some(),
        Err(e) => {
            warn!(%uri, error = %e, "enum switch check failed");
            false
        }
    }
}
