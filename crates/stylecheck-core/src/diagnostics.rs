//! Diagnostic descriptors and the constructors rules use to report.
//!
//! Every rule reports through one of the builders below so message
//! formatting lives in one place.

use crate::types::{Diagnostic, Location, Severity};

/// Static description of a diagnostic a rule can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    /// Diagnostic id (e.g., "WTI0001").
    pub id: &'static str,
    /// Name of the rule that owns the descriptor.
    pub rule: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Message template with `{0}`, `{1}`... placeholders.
    pub message_format: &'static str,
    /// Category for grouping.
    pub category: &'static str,
    /// Severity of reported diagnostics.
    pub severity: Severity,
    /// Longer explanation.
    pub description: &'static str,
}

impl DiagnosticDescriptor {
    /// Creates a diagnostic at `location` with the given message arguments.
    #[must_use]
    pub fn create(&self, location: Location, arguments: Vec<String>) -> Diagnostic {
        Diagnostic {
            id: self.id.to_string(),
            rule: self.rule.to_string(),
            severity: self.severity,
            location,
            message: format_message(self.message_format, &arguments),
            arguments,
            help: Some(self.description.to_string()),
        }
    }
}

/// Replaces `{N}` placeholders with the matching argument. Placeholders
/// without an argument are left as written.
#[must_use]
pub fn format_message(template: &str, arguments: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = arguments.get(index)?;
            Some((arg, close))
        });
        match replaced {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Method or local function body exceeds the line limit.
#[must_use]
pub fn method_too_long(
    descriptor: &DiagnosticDescriptor,
    location: Location,
    actual_lines: usize,
    max_lines: usize,
) -> Diagnostic {
    descriptor.create(
        location,
        vec![actual_lines.to_string(), max_lines.to_string()],
    )
}

/// Async method is missing the `Async` suffix.
#[must_use]
pub fn missing_async_suffix(
    descriptor: &DiagnosticDescriptor,
    location: Location,
    method_name: &str,
) -> Diagnostic {
    descriptor.create(location, vec![method_name.to_string()])
}

/// Wall-clock property accessed directly. `property` is the fully
/// qualified member, e.g. `global::System.DateTime.Now`.
#[must_use]
pub fn forbidden_time_property(
    descriptor: &DiagnosticDescriptor,
    location: Location,
    property: &str,
) -> Diagnostic {
    descriptor.create(location, vec![property.to_string()])
}

/// Method or constructor does not start with a guard call.
#[must_use]
pub fn missing_guard_clause(
    descriptor: &DiagnosticDescriptor,
    location: Location,
    method_name: &str,
) -> Diagnostic {
    descriptor.create(location, vec![method_name.to_string()])
}

/// Namespace declared with a block instead of file-scoped.
#[must_use]
pub fn invalid_namespace_style(
    descriptor: &DiagnosticDescriptor,
    location: Location,
    namespace_name: &str,
) -> Diagnostic {
    descriptor.create(location, vec![namespace_name.to_string()])
}

/// File declares more than one public type.
#[must_use]
pub fn multiple_public_types(
    descriptor: &DiagnosticDescriptor,
    location: Location,
    type_names: &[&str],
) -> Diagnostic {
    descriptor.create(location, vec![type_names.join(", ")])
}
