//! Rule to require guard clauses at the start of public entry points.
//!
//! # Rationale
//!
//! Public and internal methods are the boundary where invalid input enters.
//! Starting them with `Guard.Against.*` keeps validation visible and uniform.
//!
//! # Detected Patterns
//!
//! - Public/internal methods and constructors taking a non-nullable
//!   reference parameter whose first statement is not a guard call
//!
//! Matching is textual: the call receiver must be written exactly
//! `Guard.Against` or `GuardAgainst`.

use stylecheck_core::diagnostics::{self, DiagnosticDescriptor};
use stylecheck_core::semantic::{
    MethodSymbol, NullableAnnotation, RefKind, SpecialType, TypeKind,
};
use stylecheck_core::syntax::{Block, Expr, Modifier, Modifiers, NodeId, ParameterList, Stmt};
use stylecheck_core::{Diagnostic, Rule, RuleContext, RuleError, Severity, SyntaxKind, SyntaxNode};

/// Rule code for guard-clause.
pub const CODE: &str = "WTI0005";

/// Rule name for guard-clause.
pub const NAME: &str = "guard-clause";

/// Receiver texts accepted as a guard.
const GUARD_RECEIVERS: &[&str] = &["Guard.Against", "GuardAgainst"];

/// Descriptor of the diagnostic reported by this rule.
pub const DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: CODE,
    rule: NAME,
    title: "Method must start with Guard.Against",
    message_format: "Method '{0}' must start with a Guard.Against call for its input arguments",
    category: "WorkTrack.Common.Guards",
    severity: Severity::Error,
    description: "Public and internal methods and constructors must validate their input \
                  arguments through Guard.Against.",
};

/// Requires public entry points to begin with a guard call.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardClause;

impl GuardClause {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

struct Declaration<'a> {
    id: NodeId,
    modifiers: &'a Modifiers,
    parameters: &'a ParameterList,
    body: Option<&'a Block>,
}

impl Rule for GuardClause {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires Guard.Against at the start of public methods and constructors"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
        &[DESCRIPTOR]
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::MethodDeclaration,
            SyntaxKind::ConstructorDeclaration,
        ]
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: SyntaxNode<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let decl = match node {
            SyntaxNode::Method(m) => Declaration {
                id: m.id,
                modifiers: &m.modifiers,
                parameters: &m.parameter_list,
                body: m.body.as_ref(),
            },
            SyntaxNode::Constructor(c) => Declaration {
                id: c.id,
                modifiers: &c.modifiers,
                parameters: &c.parameter_list,
                body: c.body.as_ref(),
            },
            _ => return Err(RuleError::unexpected(NAME, node)),
        };

        if !should_validate(decl.modifiers) {
            return Ok(Vec::new());
        }
        let Some(symbol) = ctx.semantic.declared_method(decl.id) else {
            return Ok(Vec::new());
        };
        if !requires_guard(symbol) {
            return Ok(Vec::new());
        }

        let Some(first) = decl.body.and_then(|b| b.statements.first()) else {
            return Ok(Vec::new());
        };
        if decl.parameters.parameters.is_empty() {
            return Ok(Vec::new());
        }

        let span = match first {
            Stmt::Expression(stmt) if is_guard_call(&stmt.expr) => return Ok(Vec::new()),
            Stmt::Expression(stmt) => stmt.span,
            _ => decl.parameters.span,
        };
        Ok(vec![diagnostics::missing_guard_clause(
            &DESCRIPTOR,
            ctx.location(span),
            &symbol.name,
        )])
    }
}

/// Public or internal, and neither private nor protected.
fn should_validate(modifiers: &Modifiers) -> bool {
    if modifiers.contains(Modifier::Private) || modifiers.contains(Modifier::Protected) {
        return false;
    }
    modifiers.is_public_or_internal()
}

/// True if some by-value parameter is a non-nullable reference.
fn requires_guard(method: &MethodSymbol) -> bool {
    method.parameters.iter().any(|p| {
        if p.ref_kind != RefKind::None || p.ty.kind == TypeKind::TypeParameter {
            return false;
        }
        let non_nullable = p.nullable != NullableAnnotation::Annotated;
        non_nullable && (p.ty.special == SpecialType::String || p.ty.is_reference_type)
    })
}

/// `[await] <receiver>.<member>(...)` with a guard receiver.
fn is_guard_call(expr: &Expr) -> bool {
    let expr = match expr {
        Expr::Await(awaited) => awaited.expression.as_ref(),
        other => other,
    };
    let Expr::Invocation(call) = expr else {
        return false;
    };
    let Expr::MemberAccess(member) = call.expression.as_ref() else {
        return false;
    };
    let receiver = member.expression.to_string();
    GUARD_RECEIVERS.contains(&receiver.as_str()) && !member.name.text.trim().is_empty()
}
