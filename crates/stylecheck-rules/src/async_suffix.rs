//! Rule to require the `Async` suffix on asynchronous methods.
//!
//! # Rationale
//!
//! Callers should be able to tell from the name alone that a method returns
//! a task and must be awaited.
//!
//! # Detected Patterns
//!
//! - Methods marked `async` whose name does not end in `Async`
//! - Methods returning `Task`, `Task<T>`, `ValueTask` or `ValueTask<T>`
//!   whose name does not end in `Async`
//!
//! Overrides, abstract and extern methods, generic methods, compiler
//! generated methods and interface implementations are skipped: their name
//! is dictated elsewhere.

use stylecheck_core::diagnostics::{self, DiagnosticDescriptor};
use stylecheck_core::semantic::{MethodKind, MethodSymbol, SemanticModel, SymbolLocation};
use stylecheck_core::{
    Diagnostic, Location, Rule, RuleContext, RuleError, Severity, SyntaxKind, SyntaxNode,
};

/// Rule code for async-suffix.
pub const CODE: &str = "WTI0002";

/// Rule name for async-suffix.
pub const NAME: &str = "async-suffix";

/// Required name suffix.
const SUFFIX: &str = "Async";

/// Return types that make a method async-like, by unbound name.
const TASK_TYPES: &[&str] = &[
    "System.Threading.Tasks.Task",
    "System.Threading.Tasks.ValueTask",
];

/// Descriptor of the diagnostic reported by this rule.
pub const DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: CODE,
    rule: NAME,
    title: "Asynchronous method does not end with Async",
    message_format: "Asynchronous method '{0}' must end with the 'Async' suffix. Rename the method.",
    category: "WorkTrack.Common.AsyncNaming",
    severity: Severity::Error,
    description: "All asynchronous methods in production code must end with 'Async' for \
                  consistency and readability.",
};

/// Requires asynchronous methods to be named `...Async`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsyncSuffix;

impl AsyncSuffix {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AsyncSuffix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the Async suffix on asynchronous methods"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
        &[DESCRIPTOR]
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MethodDeclaration]
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: SyntaxNode<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let SyntaxNode::Method(decl) = node else {
            return Err(RuleError::unexpected(NAME, node));
        };

        if !decl.type_parameters.is_empty() {
            return Ok(Vec::new());
        }
        let Some(method) = ctx.semantic.declared_method(decl.id) else {
            return Ok(Vec::new());
        };
        if !should_analyze(ctx.semantic, method)
            || !is_async_like(method)
            || method.name.ends_with(SUFFIX)
        {
            return Ok(Vec::new());
        }

        let Some(SymbolLocation::Source { file, span }) = method.locations.first() else {
            return Ok(Vec::new());
        };
        Ok(vec![diagnostics::missing_async_suffix(
            &DESCRIPTOR,
            Location::from_span(file, *span),
            &method.name,
        )])
    }
}

fn should_analyze(semantic: &dyn SemanticModel, method: &MethodSymbol) -> bool {
    method.kind == MethodKind::Ordinary
        && !method.name.contains('<')
        && !method.is_override
        && !method.is_abstract
        && !method.is_extern
        && !method.is_implicitly_declared
        && !implements_interface_member(semantic, method)
}

fn is_async_like(method: &MethodSymbol) -> bool {
    method.is_async
        || method
            .return_type
            .as_ref()
            .is_some_and(|ty| TASK_TYPES.contains(&ty.unbound_name()))
}

/// Checks explicit implementations, then the containing type's directly
/// declared interfaces.
fn implements_interface_member(semantic: &dyn SemanticModel, method: &MethodSymbol) -> bool {
    if !method.explicit_interface_implementations.is_empty() {
        return true;
    }
    let Some(containing) = method.containing_type.and_then(|id| semantic.type_symbol(id)) else {
        return false;
    };

    containing
        .interfaces
        .iter()
        .filter_map(|id| semantic.type_symbol(*id))
        .flat_map(|iface| iface.members.iter())
        .any(|member| {
            semantic.find_implementation_for_interface_member(containing.id, *member)
                == Some(method.id)
        })
}
