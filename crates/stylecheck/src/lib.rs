//! # stylecheck
//!
//! Configurable rule engine for style and structure checks over a
//! host-supplied syntax tree and semantic model.
//!
//! This is the facade crate that re-exports the core framework and the
//! built-in rules.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stylecheck::{Compilation, Config, FileInput};
//!
//! let config = Config::from_file(Path::new("stylecheck.toml"))?;
//! let analyzer = stylecheck::default_analyzer(config)?;
//!
//! let compilation = Compilation::new("WorkTrack.Orders");
//! let result = analyzer.analyze_file(&FileInput::new(&tree, &symbols, &compilation));
//! print!("{}", result.format_report());
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! [rules.guard-clause]
//! enabled = false
//!
//! [options]
//! wt_common_method_length_max_lines = 8
//! wt_common_analyzer_target_prefixes = ["WorkTrack.", "Billing."]
//!
//! [[overrides]]
//! files = ["**/Legacy/**"]
//! options = { wt_common_method_length_max_lines = 40 }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export core types and traits
pub use stylecheck_core::*;

/// Built-in rules and rule sets.
pub mod rules {
    pub use stylecheck_rules::*;
}

use stylecheck_rules::RuleSet;

/// Builds an analyzer with every built-in rule and the given configuration.
///
/// # Errors
///
/// Returns an error if the rules cannot be registered together.
pub fn default_analyzer(config: Config) -> Result<Analyzer, AnalyzerError> {
    analyzer_for(RuleSet::All, config)
}

/// Builds an analyzer with one rule set and the given configuration.
///
/// # Errors
///
/// Returns an error if the rules cannot be registered together.
pub fn analyzer_for(set: RuleSet, config: Config) -> Result<Analyzer, AnalyzerError> {
    Analyzer::builder().rules(set.rules()).config(config).build()
}
