/// Inspection of a `switch` header line.
///
/// Works out which punctuation the header is missing and where the case
/// block has to be inserted.  All columns refer to the line as it is before
/// any edit.
use crate::util::{column_at_byte, find_word, line_len};
use crate::validator::SWITCH_KEYWORD;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderShape {
    /// Column where a `(` has to be synthesized, if the header has none.
    pub open_paren_at: Option<u32>,
    /// The header has no `)`.
    pub needs_close_paren: bool,
    /// Column where a missing `)` goes when the header already has its
    /// `{`: right after the last non-blank character before the brace.
    /// Without a `{` the `)` is part of the synthesized punctuation.
    pub close_paren_at: Option<u32>,
    /// The header has no `{`; one is synthesized.
    pub needs_open_brace: bool,
    /// Column of a `}` closing the body on the same line.
    pub end_curly_at: Option<u32>,
    /// Column the provisional text is inserted at.
    pub insert_at: u32,
}

impl HeaderShape {
    /// Inspect `line` from the `switch` keyword to the end of the line, so a
    /// cursor placed anywhere on the header sees the whole header.
    ///
    /// Returns `None` when the line has no `switch` keyword as a whole word.
    pub fn inspect(line: &str) -> Option<Self> {
        let keyword = find_word(line, SWITCH_KEYWORD)?;
        let after_keyword = keyword + SWITCH_KEYWORD.len();
        let tail = &line[keyword..];
        let rest = &line[after_keyword..];

        let open_paren_at = if rest.contains('(') {
            None
        } else {
            let spaces = rest.len() - rest.trim_start().len();
            Some(column_at_byte(line, after_keyword + spaces))
        };

        let needs_close_paren = !tail.contains(')');
        let open_brace = tail.find('{').map(|idx| keyword + idx);
        let needs_open_brace = open_brace.is_none();

        let close_paren_at = match open_brace {
            Some(brace) if needs_close_paren => {
                let expression_end = line[..brace].trim_end().len();
                let col = column_at_byte(line, expression_end);
                // Never ahead of a synthesized `(`.
                Some(open_paren_at.map_or(col, |open| col.max(open)))
            }
            _ => None,
        };

        let end_curly_at = open_brace.and_then(|brace| {
            line[brace + 1..]
                .find('}')
                .map(|close| column_at_byte(line, brace + 1 + close))
        });

        let insert_at = end_curly_at.unwrap_or_else(|| line_len(line));

        Some(Self {
            open_paren_at,
            needs_close_paren,
            close_paren_at,
            needs_open_brace,
            end_curly_at,
            insert_at,
        })
    }

    /// Punctuation inserted in front of the first case.
    pub fn synthesized_punctuation(&self) -> String {
        let mut punct = String::new();
        if self.needs_close_paren && self.close_paren_at.is_none() {
            punct.push(')');
        }
        if self.needs_open_brace {
            punct.push_str(" {");
        }
        punct
    }
}
