//! A reference implementation of the *external* byte tokenizer (§1: "the raw
//! byte tokenizer... [is] out of scope"; §6 defines only the shape of its
//! output). Kept in its own module with a single public entry point so the
//! boundary the spec draws stays visible in the code, not just in prose.
//!
//! Grounded on `plotnik-lib::parser::lexer`: a `logos`-driven scan that
//! coalesces consecutive lexer errors into one `Invalid` token instead of one
//! per bad byte, and tracks line/column incrementally rather than
//! recomputing it per token.

mod kind;

pub use kind::SourceKind;

/// One token as the external tokenizer contract defines it (§6):
/// `{kind, lexeme, span{start{byte,line,col}, end{byte,line,col}}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceToken {
    pub kind: SourceKind,
    pub lexeme: String,
    pub span: lattice_core::Span,
}

struct LineTracker {
    line: u32,
    column: u32,
    last_byte: u32,
}

impl LineTracker {
    fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            last_byte: 0,
        }
    }

    /// Advance from `self.last_byte` to `up_to_byte`, returning the position
    /// at `up_to_byte`. Source must be valid UTF-8; called with monotonically
    /// increasing offsets since logos scans left to right.
    fn advance_to(&mut self, source: &str, up_to_byte: u32) -> lattice_core::Position {
        let slice = &source[self.last_byte as usize..up_to_byte as usize];
        for ch in slice.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.last_byte = up_to_byte;
        lattice_core::Position::new(up_to_byte, self.line, self.column)
    }
}

/// Tokenize `source`, producing the external tokenizer's output stream.
///
/// Consecutive un-lexable bytes are coalesced into a single `Invalid` token
/// (matching the teacher's `Garbage`-coalescing lexer) so malformed input
/// doesn't flood downstream consumers with one diagnostic per byte.
pub fn lex(source: &str) -> Vec<SourceToken> {
    use logos::Logos;

    let mut tokens = Vec::new();
    let mut lexer = SourceKind::lexer(source);
    let mut tracker = LineTracker::new();
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    push_token(&mut tokens, &mut tracker, source, SourceKind::Invalid, start, lexer.span().start);
                }
                let span = lexer.span();
                push_token(&mut tokens, &mut tracker, source, kind, span.start, span.end);
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    push_token(&mut tokens, &mut tracker, source, SourceKind::Invalid, start, source.len());
                }
                break;
            }
        }
    }

    let eof_pos = tracker.advance_to(source, source.len() as u32);
    tokens.push(SourceToken {
        kind: SourceKind::Eof,
        lexeme: String::new(),
        span: lattice_core::Span::empty(eof_pos),
    });

    tokens
}

fn push_token(tokens: &mut Vec<SourceToken>, tracker: &mut LineTracker, source: &str, kind: SourceKind, start: usize, end: usize) {
    let start_pos = tracker.advance_to(source, start as u32);
    let end_pos = tracker.advance_to(source, end as u32);
    tokens.push(SourceToken {
        kind,
        lexeme: source[start..end].to_string(),
        span: lattice_core::Span::new(start_pos, end_pos),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_keywords_and_identifiers() {
        let tokens = lex("func main");
        assert_eq!(tokens[0].kind, SourceKind::KwFunc);
        assert_eq!(tokens[1].kind, SourceKind::Identifier);
        assert_eq!(tokens[1].lexeme, "main");
    }

    #[test]
    fn walrus_is_a_single_external_token() {
        let tokens = lex("x := 1");
        assert_eq!(tokens[1].kind, SourceKind::Walrus);
        assert_eq!(tokens[1].lexeme, ":=");
    }

    #[test]
    fn coalesces_consecutive_invalid_bytes() {
        let tokens = lex("a@@@b");
        let invalid: Vec<_> = tokens.iter().filter(|t| t.kind == SourceKind::Invalid).collect();
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].lexeme, "@@@");
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = lex("a\nbb");
        let b = tokens.iter().find(|t| t.lexeme == "bb").unwrap();
        assert_eq!(b.span.start.line, 2);
        assert_eq!(b.span.start.column, 1);
    }

    #[test]
    fn always_ends_with_eof() {
        let tokens = lex("");
        assert_eq!(tokens.last().unwrap().kind, SourceKind::Eof);
    }
}
