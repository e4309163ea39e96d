//! Rule to limit the length of method bodies.
//!
//! # Rationale
//!
//! Short methods keep handlers readable and force decomposition into named
//! steps.
//!
//! # Detected Patterns
//!
//! - Methods and local functions whose block body spans more lines than
//!   allowed between its braces
//!
//! Expression-bodied members are exempt. Only files whose path contains one
//! of the configured target prefixes are checked.
//!
//! # Configuration
//!
//! - `dotnet_analyzer_diagnostic.wt_common_method_length_max_lines` or
//!   `wt_common_method_length_max_lines`: maximum body lines (default: 5)
//! - `wt_common_analyzer_target_prefixes`: targeted path substrings
//!   (default: `WorkTrack.`)

use stylecheck_core::diagnostics::{self, DiagnosticDescriptor};
use stylecheck_core::syntax::{Block, Expr, Token};
use stylecheck_core::{Diagnostic, Rule, RuleContext, RuleError, Severity, SyntaxKind, SyntaxNode};
use tracing::debug;

/// Rule code for method-length.
pub const CODE: &str = "WTI0001";

/// Rule name for method-length.
pub const NAME: &str = "method-length";

/// Descriptor of the diagnostic reported by this rule.
pub const DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: CODE,
    rule: NAME,
    title: "Method is too long",
    message_format: "Method body contains {0} lines. At most {1} lines are allowed.",
    category: "WorkTrack.Common.CodeQuality",
    severity: Severity::Error,
    description: "Methods should stay short to keep code readable. Configure the limit with \
                  dotnet_analyzer_diagnostic.wt_common_method_length_max_lines in .editorconfig.",
};

/// Limits the number of lines inside method and local function bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodLength;

impl MethodLength {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_body(
        ctx: &RuleContext<'_>,
        body: Option<&Block>,
        expression_body: Option<&Expr>,
        identifier: &Token,
    ) -> Vec<Diagnostic> {
        let Some(body) = body else {
            return Vec::new();
        };
        if expression_body.is_some() {
            return Vec::new();
        }

        let max = ctx.config.max_method_body_lines();
        let length = body_lines(body);
        if length <= max {
            return Vec::new();
        }

        debug!(
            "{} spans {} lines (max {}) in {}",
            identifier.text,
            length,
            max,
            ctx.path().display()
        );
        vec![diagnostics::method_too_long(
            &DESCRIPTOR,
            ctx.location(identifier.span),
            length,
            max,
        )]
    }
}

/// Lines strictly between the braces of `body`.
fn body_lines(body: &Block) -> usize {
    body.close_brace
        .end
        .line
        .saturating_sub(body.open_brace.start.line + 1)
}

impl Rule for MethodLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of lines in method bodies"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
        &[DESCRIPTOR]
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::MethodDeclaration,
            SyntaxKind::LocalFunctionStatement,
        ]
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: SyntaxNode<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let (body, expression_body, identifier) = match node {
            SyntaxNode::Method(m) => (m.body.as_ref(), m.expression_body.as_ref(), &m.identifier),
            SyntaxNode::LocalFunction(f) => {
                (f.body.as_ref(), f.expression_body.as_ref(), &f.identifier)
            }
            _ => return Err(RuleError::unexpected(NAME, node)),
        };

        if !ctx.config.targets(ctx.path()) {
            return Ok(Vec::new());
        }

        Ok(Self::check_body(ctx, body, expression_body, identifier))
    }
}
