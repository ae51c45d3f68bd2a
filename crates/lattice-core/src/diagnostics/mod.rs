//! Diagnostic collection and rendering (§4.14, §7).
//!
//! Mirrors `plotnik-lib::diagnostics`: an append-only `Diagnostics` collection
//! built through a `DiagnosticBuilder`, plus a printer that knows how to
//! render a diagnostic against its source text.

mod message;
mod printer;

pub use message::{Code, Diagnostic, Fix, Producer, Severity};
pub use printer::DiagnosticsPrinter;

use crate::span::Span;

/// Append-only collection of diagnostics, one per `Unit` (§4.2: "The
/// [Diagnostic Engine] is append-only per Unit").
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

/// Builder for constructing and emitting a diagnostic with hints and a fix.
#[must_use = "diagnostic not recorded until .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, severity: Severity, code: Code, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: Diagnostic::new(severity, code, msg, span),
        }
    }

    pub fn error(&mut self, code: Code, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        self.build(Severity::Error, code, msg, span)
    }

    pub fn warning(&mut self, code: Code, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        self.build(Severity::Warning, code, msg, span)
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.messages.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(Diagnostic::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(Diagnostic::is_warning)
    }

    pub fn filter_by_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.messages.iter().filter(|d| d.severity == severity).collect()
    }

    /// Stable display order: `(line, column, code)` (§5 ordering guarantees).
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut out: Vec<&Diagnostic> = self.messages.iter().collect();
        out.sort_by(|a, b| {
            (a.span.start.line, a.span.start.column, a.code).cmp(&(b.span.start.line, b.span.start.column, b.code))
        });
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn printer<'a>(&'a self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(self.as_slice(), source)
    }
}

impl<'a> DiagnosticBuilder<'a> {
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn fix(mut self, span: Span, replacement: impl Into<String>) -> Self {
        self.message.fix = Some(Fix::new(span, replacement));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
