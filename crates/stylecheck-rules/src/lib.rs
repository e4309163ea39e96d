//! # stylecheck-rules
//!
//! Built-in rules for stylecheck.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | WTI0001 | `method-length` | Limits the number of lines in method bodies |
//! | WTI0002 | `async-suffix` | Requires the `Async` suffix on asynchronous methods |
//! | WTI0004 | `forbidden-time-access` | Forbids `DateTime.Now`/`UtcNow` reads |
//! | WTI0005 | `guard-clause` | Requires a leading `Guard.Against` call |
//! | WTI0006 | `namespace-style` | Requires file-scoped namespaces |
//! | WTI0007 | `namespace-style` | Allows one public type per file |
//!
//! Each rule module exposes its `CODE`, `NAME` and descriptor constants.
//!
//! ## Usage
//!
//! ```ignore
//! use stylecheck_core::Analyzer;
//! use stylecheck_rules::{AsyncSuffix, MethodLength};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MethodLength::new())
//!     .rule(AsyncSuffix::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod async_suffix;
pub mod forbidden_time_access;
pub mod guard_clause;
pub mod method_length;
pub mod namespace_style;
mod presets;

pub use async_suffix::AsyncSuffix;
pub use forbidden_time_access::ForbiddenTimeAccess;
pub use guard_clause::GuardClause;
pub use method_length::MethodLength;
pub use namespace_style::NamespaceStyle;
pub use presets::{all_rules, naming_rules, rule_by_name, structure_rules, RuleSet};

/// Re-export core types for convenience.
pub use stylecheck_core::{Diagnostic, Rule, Severity};
