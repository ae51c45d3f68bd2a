//! Diagnostic message types (§4.14).

use crate::span::Span;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Error,
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// Producer that assigned a diagnostic its code, used to partition the code
/// space (§4.14: `P####` parser, `T####` type, `R####` resolution, `Q####`
/// quantization/backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Producer {
    Parser,
    Type,
    Resolution,
    Backend,
}

impl Producer {
    fn prefix(self) -> char {
        match self {
            Producer::Parser => 'P',
            Producer::Type => 'T',
            Producer::Resolution => 'R',
            Producer::Backend => 'Q',
        }
    }
}

/// A diagnostic code such as `P0001`, validated against its producer prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    prefix: char,
    number: u16,
}

impl Code {
    pub fn new(producer: Producer, number: u16) -> Self {
        Self {
            prefix: producer.prefix(),
            number,
        }
    }

    pub const P0001_UNEXPECTED_TOKEN: Code = Code {
        prefix: 'P',
        number: 1,
    };
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}

/// A suggested fix-it for a diagnostic: a span to replace and the text to put
/// there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub span: Span,
    pub replacement: String,
}

impl Fix {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

/// One diagnostic: `{ severity, code, message, span, hints, fix? }` (§4.14).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Code,
    pub message: String,
    pub span: Span,
    pub hints: Vec<String>,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: Code, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            span,
            hints: Vec::new(),
            fix: None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error | Severity::Fatal)
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
