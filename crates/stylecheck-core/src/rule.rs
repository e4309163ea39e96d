//! Rule trait for defining checks.

use crate::context::RuleContext;
use crate::diagnostics::DiagnosticDescriptor;
use crate::syntax::{SyntaxKind, SyntaxNode};
use crate::types::Diagnostic;

/// Which classification decides whether a rule skips test code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestScope {
    /// Skip when the compilation's assembly name marks it as a test project.
    Compilation,
    /// Skip when the file path marks it as a test file.
    File,
    /// Run on test code too.
    None,
}

/// A check triggered on specific kinds of syntax nodes.
///
/// The analyzer calls [`evaluate`](Rule::evaluate) once for every node whose
/// kind appears in [`triggers`](Rule::triggers). Rules hold no mutable state
/// and may be called from several threads at once.
///
/// # Example
///
/// ```ignore
/// use stylecheck_core::{Rule, RuleContext, RuleError, SyntaxKind, SyntaxNode};
///
/// pub struct NoEmptyMethods;
///
/// impl Rule for NoEmptyMethods {
///     fn name(&self) -> &'static str { "no-empty-methods" }
///     fn code(&self) -> &'static str { "XMP0001" }
///     fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] { &[DESCRIPTOR] }
///     fn triggers(&self) -> &'static [SyntaxKind] { &[SyntaxKind::MethodDeclaration] }
///
///     fn evaluate(&self, ctx: &RuleContext, node: SyntaxNode) -> Result<Vec<Diagnostic>, RuleError> {
///         let SyntaxNode::Method(method) = node else {
///             return Err(RuleError::unexpected(self.name(), node));
///         };
///         // ...
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "method-length").
    fn name(&self) -> &'static str;

    /// Returns the primary diagnostic id (e.g., "WTI0001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Descriptors of every diagnostic this rule can emit.
    fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor];

    /// Node kinds this rule is evaluated on.
    fn triggers(&self) -> &'static [SyntaxKind];

    /// How test code is recognized for this rule.
    fn test_scope(&self) -> TestScope {
        TestScope::Compilation
    }

    /// Evaluates one triggered node.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnexpectedNode`] if called with a node kind the
    /// rule did not register for.
    fn evaluate(&self, ctx: &RuleContext<'_>, node: SyntaxNode<'_>)
        -> Result<Vec<Diagnostic>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Errors a rule can return from [`Rule::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The rule was dispatched a node kind it does not handle.
    #[error("rule {rule} received unexpected node kind {kind:?}")]
    UnexpectedNode {
        /// Rule name.
        rule: &'static str,
        /// Kind that was received.
        kind: SyntaxKind,
    },
}

impl RuleError {
    /// Builds an [`RuleError::UnexpectedNode`] for `node`.
    #[must_use]
    pub fn unexpected(rule: &'static str, node: SyntaxNode<'_>) -> Self {
        Self::UnexpectedNode {
            rule,
            kind: node.kind(),
        }
    }
}
