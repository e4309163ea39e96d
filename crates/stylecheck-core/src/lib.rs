//! # stylecheck-core
//!
//! Core framework for style and structure analysis over a host-supplied
//! syntax tree and semantic model.
//!
//! This crate provides:
//!
//! - [`SyntaxTree`] and [`SemanticModel`], the inputs a host hands over
//! - [`Rule`] trait for node-triggered checks
//! - [`RuleConfig`] resolution from any [`ConfigLookup`], including [`Config`]
//! - [`ClassificationCache`] for skipping test code
//! - [`Analyzer`] for dispatching nodes to rules, one file or many in parallel
//! - [`Diagnostic`] and [`LintResult`] for findings
//!
//! ## Example
//!
//! ```ignore
//! use stylecheck_core::{Analyzer, Compilation, FileInput};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .options(editorconfig)
//!     .build()?;
//!
//! let result = analyzer.analyze_file(&FileInput::new(&tree, &symbols, &compilation));
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod cancellation;
mod classification;
mod config;
mod context;
mod rule;
mod types;

/// Diagnostic descriptors and builders.
pub mod diagnostics;
/// Symbol model.
pub mod semantic;
/// Syntax model.
pub mod syntax;
/// Syntax tree traversal.
pub mod visit;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, FileInput};
pub use cancellation::CancellationToken;
pub use classification::ClassificationCache;
pub use config::{
    Config, ConfigError, ConfigLookup, OptionsOverride, RuleConfig, RuleSettings,
    DEFAULT_MAX_METHOD_BODY_LINES, DEFAULT_TARGET_PREFIX, EXCLUDE_TESTS_KEY, MAX_LINES_KEY,
    MAX_LINES_NAMESPACED_KEY, TARGET_PREFIXES_KEY,
};
pub use context::{Compilation, RuleContext};
pub use diagnostics::DiagnosticDescriptor;
pub use rule::{Rule, RuleBox, RuleError, TestScope};
pub use semantic::{SemanticModel, SymbolTable};
pub use syntax::{SyntaxKind, SyntaxNode, SyntaxTree};
pub use types::{Diagnostic, DiagnosticReport, LintResult, Location, Severity};
