//! Core types for diagnostics and results.

use crate::syntax::Span;
use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Should be addressed.
    Warning,
    /// Must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as given by the host.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Line just past the end of the range.
    pub end_line: usize,
    /// Column just past the end of the range.
    pub end_column: usize,
}

impl Location {
    /// Creates a location covering `span` in `file`.
    #[must_use]
    pub fn from_span(file: &Path, span: Span) -> Self {
        Self {
            file: file.to_path_buf(),
            line: span.start.line,
            column: span.start.column,
            end_line: span.end.line,
            end_column: span.end.column,
        }
    }

    /// Creates a zero-width location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            end_line: line,
            end_column: column,
        }
    }
}

/// A finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic id (e.g., "WTI0001").
    pub id: String,
    /// Rule name (e.g., "method-length").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Primary location.
    pub location: Location,
    /// Rendered message.
    pub message: String,
    /// Message arguments in template order.
    pub arguments: Vec<String>,
    /// Longer explanation taken from the rule's descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.id,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(help) = &self.help {
            let _ = writeln!(output, "  = help: {help}");
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.id,
            self.message
        )
    }
}

/// A [`Diagnostic`] bound to its source text for rich rendering with `miette`.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("[{id}] {message}")]
pub struct DiagnosticReport {
    id: String,
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: miette::NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
}

impl DiagnosticReport {
    /// Attaches `content`, the full text of the diagnostic's file.
    ///
    /// Positions outside the text are clamped to its end.
    #[must_use]
    pub fn from_source(diagnostic: &Diagnostic, content: impl Into<String>) -> Self {
        let content = content.into();
        let loc = &diagnostic.location;
        let start = byte_offset(&content, loc.line, loc.column);
        let end = byte_offset(&content, loc.end_line, loc.end_column).max(start);
        Self {
            id: diagnostic.id.clone(),
            message: diagnostic.message.clone(),
            help: diagnostic.help.clone(),
            source_code: miette::NamedSource::new(loc.file.display().to_string(), content),
            span: SourceSpan::from((start, end - start)),
            label: diagnostic.rule.clone(),
        }
    }
}

/// Byte offset of a 1-indexed line/column (column counted in chars).
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, text) in content.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map_or(text.trim_end_matches('\n').len(), |(i, _)| i);
            return offset + within;
        }
        offset += text.len();
    }
    content.len()
}

/// Result of running analysis.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LintResult {
    /// All diagnostics found.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Counts diagnostics as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        (errors, self.diagnostics.len() - errors)
    }

    /// Diagnostics carrying the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.id == id).collect()
    }

    /// Groups diagnostics by rule name.
    #[must_use]
    pub fn by_rule(&self) -> BTreeMap<&str, Vec<&Diagnostic>> {
        let mut groups: BTreeMap<&str, Vec<&Diagnostic>> = BTreeMap::new();
        for d in &self.diagnostics {
            groups.entry(d.rule.as_str()).or_default().push(d);
        }
        groups
    }

    /// Sorts diagnostics by file, position, then id.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    /// Adds diagnostics from another result.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.files_checked += other.files_checked;
    }

    /// Formats all diagnostics followed by a summary line.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for d in &self.diagnostics {
            let _ = writeln!(report, "{}", d.format());
        }
        let (errors, warnings) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Found {} error(s), {} warning(s) in {} file(s)",
            errors, warnings, self.files_checked
        );
        report
    }

    /// Serializes the result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
