//! Renders a `Diagnostics` collection against source text using
//! `annotate-snippets`, the way `plotnik-lib::diagnostics::printer` does.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};

use super::message::{Diagnostic, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d [Diagnostic],
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d [Diagnostic], source: &'s str) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.diagnostics.is_empty() {
            return Ok(());
        }

        let renderer = if self.colored { Renderer::styled() } else { Renderer::plain() };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let range = adjust_range(diag.span.byte_range(), self.source.len());
            let title = format!("{}: {}", diag.code, diag.message);

            let mut snippet = Snippet::source(self.source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range.clone()).label(&diag.message));

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let level = severity_to_level(diag.severity);
            let mut report: Vec<Group> = vec![level.primary_title(&title).element(snippet)];

            for hint in &diag.hints {
                report.push(Level::HELP.secondary_title(hint));
            }

            if let Some(fix) = &diag.fix {
                let fix_range = adjust_range(fix.span.byte_range(), self.source.len());
                report.push(
                    Level::HELP
                        .secondary_title("suggested fix")
                        .element(Snippet::source(self.source).line_start(1).patch(Patch::new(fix_range, &fix.replacement))),
                );
            }

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Info => Level::NOTE,
        Severity::Warning => Level::WARNING,
        Severity::Error => Level::ERROR,
        Severity::Fatal => Level::ERROR,
    }
}

fn adjust_range(range: std::ops::Range<u32>, limit: usize) -> std::ops::Range<usize> {
    let start = range.start as usize;
    let end = range.end as usize;
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}
