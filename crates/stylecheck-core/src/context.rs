//! Context types for rule execution.

use crate::config::RuleConfig;
use crate::semantic::SemanticModel;
use crate::syntax::{Span, SyntaxTree};
use crate::types::Location;
use std::path::Path;

/// Identity of the compilation a file belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    /// Assembly name, if the host knows it.
    pub assembly_name: Option<String>,
}

impl Compilation {
    /// Creates a compilation with the given assembly name.
    #[must_use]
    pub fn new(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: Some(assembly_name.into()),
        }
    }
}

/// Everything a rule can see while evaluating a node of one file.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// Tree being analyzed.
    pub tree: &'a SyntaxTree,
    /// Symbol information for the tree.
    pub semantic: &'a dyn SemanticModel,
    /// Settings resolved for this file.
    pub config: &'a RuleConfig,
    /// Compilation the file belongs to.
    pub compilation: &'a Compilation,
}

impl<'a> RuleContext<'a> {
    /// Creates a new rule context.
    #[must_use]
    pub fn new(
        tree: &'a SyntaxTree,
        semantic: &'a dyn SemanticModel,
        config: &'a RuleConfig,
        compilation: &'a Compilation,
    ) -> Self {
        Self {
            tree,
            semantic,
            config,
            compilation,
        }
    }

    /// Path of the file being analyzed.
    #[must_use]
    pub fn path(&self) -> &'a Path {
        self.tree.path()
    }

    /// Location of `span` in this file.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.tree.path(), span)
    }
}

impl std::fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("path", &self.tree.path())
            .field("config", self.config)
            .field("compilation", self.compilation)
            .finish_non_exhaustive()
    }
}
