/// Declared-type extraction from hover markdown.
///
/// The host only tells us what type a variable has through the hover it
/// renders for it, e.g.
///
/// ````text
/// ```cpp
/// // In main
/// MyNamespace::Color c = RED
/// ```
/// ````
///
/// [`extract_type_name`] turns such a hover plus the variable's identifier
/// into the bare type name (`Color`).  All the string scraping lives here so
/// it can be swapped for a semantic query without touching the pipeline.
use crate::util::{find_word, is_identifier};

/// Tokens that can precede a type name in a declaration without being part
/// of it.
const DECLARATION_KEYWORDS: &[&str] = &[
    "enum",
    "class",
    "struct",
    "union",
    "typename",
    "const",
    "volatile",
    "static",
    "extern",
    "constexpr",
    "constinit",
    "inline",
    "mutable",
    "register",
    "thread_local",
    "public:",
    "protected:",
    "private:",
];

/// Isolate the plain declaration text from a hover.
///
/// Takes the body of the first fenced code block (dropping the fence line
/// and its language tag), or the whole text with inline backticks removed
/// when there is no fenced block.  Comment lines are dropped and line
/// breaks become single spaces.
pub fn isolate_signature(hover: &str) -> String {
    let body = match hover.find("```") {
        Some(open) => {
            let after_fence = &hover[open + 3..];
            // Skip the language tag up to the end of the fence line.
            let code = match after_fence.find('\n') {
                Some(nl) => &after_fence[nl + 1..],
                None => "",
            };
            match code.find("```") {
                Some(close) => code[..close].to_string(),
                None => code.to_string(),
            }
        }
        None => hover.replace('`', ""),
    };

    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduce the text preceding an identifier to a bare type name.
///
/// Returns `Some("")` when only declaration keywords were present.
fn bare_type_name(prefix: &str) -> Option<String> {
    let last = prefix
        .split_whitespace()
        .map(|token| token.trim_matches(|ch| ch == '*' || ch == '&'))
        .filter(|token| !token.is_empty() && !DECLARATION_KEYWORDS.contains(token))
        .last();

    let Some(token) = last else {
        return Some(String::new());
    };

    let name = match token.rfind("::") {
        Some(idx) => &token[idx + 2..],
        None => token,
    };
    let name = name.trim();
    is_identifier(name).then(|| name.to_string())
}

/// Extract the declared type name from a hover about `identifier`.
///
/// The first whole-word occurrence of the identifier governs.  When it
/// starts a clean token (preceded by whitespace) the type is whatever
/// comes before it; when it is glued to something (`*c`, `&c`, `ns::c`)
/// the type is whatever comes before the nearest preceding whitespace.
/// Qualifiers before the last `::` are discarded.  A hover that only
/// names the type itself (`enum Color`) yields the identifier.
///
/// Returns `None` whenever the result would not be a plain identifier.
pub fn extract_type_name(hover: &str, identifier: &str) -> Option<String> {
    if identifier.is_empty() {
        return None;
    }

    let signature = isolate_signature(hover);
    let idx = find_word(&signature, identifier)?;
    if idx == 0 {
        return None;
    }

    let before = &signature[..idx];
    let clean_boundary = before.chars().next_back().is_some_and(char::is_whitespace);
    let type_part = if clean_boundary {
        before
    } else {
        match before.rfind(char::is_whitespace) {
            Some(space) => &before[..space],
            None => return None,
        }
    };

    match bare_type_name(type_part)? {
        name if name.is_empty() => {
            // Only keywords precede the identifier, so it names the type.
            (clean_boundary && is_identifier(identifier)).then(|| identifier.to_string())
        }
        name => Some(name),
    }
}
