//! Rule to forbid reading the wall clock directly.
//!
//! # Rationale
//!
//! Code that reads `DateTime.Now` cannot be tested against a fixed time.
//! Time should come from an injected clock abstraction instead.
//!
//! # Detected Patterns
//!
//! - `DateTime.Now`, `DateTime.UtcNow`
//! - `DateTimeOffset.Now`, `DateTimeOffset.UtcNow`
//!
//! Only accesses that resolve to the framework properties are reported, so
//! a user type with its own `Now` property is left alone.

use stylecheck_core::diagnostics::{self, DiagnosticDescriptor};
use stylecheck_core::semantic::Symbol;
use stylecheck_core::{Diagnostic, Rule, RuleContext, RuleError, Severity, SyntaxKind, SyntaxNode};

/// Rule code for forbidden-time-access.
pub const CODE: &str = "WTI0004";

/// Rule name for forbidden-time-access.
pub const NAME: &str = "forbidden-time-access";

const FORBIDDEN_PROPERTIES: &[&str] = &["Now", "UtcNow"];

const WALL_CLOCK_TYPES: &[&str] = &["System.DateTime", "System.DateTimeOffset"];

/// Descriptor of the diagnostic reported by this rule.
pub const DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: CODE,
    rule: NAME,
    title: "DateTime/DateTimeOffset must not be read directly",
    message_format: "Do not use {0}. Use IClock/SystemClock instead.",
    category: "WorkTrack.Common.Time",
    severity: Severity::Error,
    description: "Use IClock/SystemClock instead of DateTime.UtcNow/Now so time can be \
                  controlled in tests.",
};

/// Forbids `DateTime.Now`-style wall clock reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForbiddenTimeAccess;

impl ForbiddenTimeAccess {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ForbiddenTimeAccess {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids direct DateTime.Now/UtcNow access"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
        &[DESCRIPTOR]
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::SimpleMemberAccessExpression]
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: SyntaxNode<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let SyntaxNode::MemberAccess(access) = node else {
            return Err(RuleError::unexpected(NAME, node));
        };
        if access.kind() != SyntaxKind::SimpleMemberAccessExpression {
            return Err(RuleError::unexpected(NAME, node));
        }

        if !FORBIDDEN_PROPERTIES.contains(&access.name.text.as_str()) {
            return Ok(Vec::new());
        }
        let Some(Symbol::Property(property)) = ctx.semantic.referenced_symbol(access.id) else {
            return Ok(Vec::new());
        };
        let Some(declaring) = ctx.semantic.type_symbol(property.containing_type) else {
            return Ok(Vec::new());
        };
        if !WALL_CLOCK_TYPES.contains(&declaring.full_name().as_str()) {
            return Ok(Vec::new());
        }

        let qualified = format!("{}.{}", declaring.fully_qualified_name(), property.name);
        Ok(vec![diagnostics::forbidden_time_property(
            &DESCRIPTOR,
            ctx.location(access.name.span),
            &qualified,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::semantic::{SymbolId, TypeKind, TypeSymbol};
    use stylecheck_core::syntax::{
        AccessOperator, CompilationUnit, Expr, MemberAccessExpr, NodeId, SyntaxTree, Token,
    };
    use stylecheck_core::{Compilation, RuleConfig, SymbolTable};

    const PATH: &str = "src/WorkTrack.Billing/Invoice.cs";

    fn access(receiver: &str, member: &str) -> MemberAccessExpr {
        let Expr::MemberAccess(access) = Expr::member_access(
            NodeId(7),
            Expr::identifier(Token::at(receiver, 12, 20)),
            Token::at(member, 12, 21 + receiver.len()),
        ) else {
            unreachable!()
        };
        access
    }

    fn table_with(namespace: &str, ty: &str, property: &str) -> SymbolTable {
        let mut table = SymbolTable::new();
        let owner = table.add_type(TypeSymbol::new(namespace, ty, TypeKind::Struct));
        let prop = table.add_property(owner, property, true);
        table.reference(NodeId(7), prop);
        table
    }

    fn check(table: &SymbolTable, access: &MemberAccessExpr) -> Vec<Diagnostic> {
        let tree = SyntaxTree::new(PATH, CompilationUnit::default());
        let config = RuleConfig::default();
        let compilation = Compilation::new("WorkTrack.Billing");
        let ctx = RuleContext::new(&tree, table, &config, &compilation);
        ForbiddenTimeAccess::new()
            .evaluate(&ctx, SyntaxNode::MemberAccess(access))
            .unwrap()
    }

    #[test]
    fn test_detects_datetime_now() {
        let table = table_with("System", "DateTime", "Now");
        let diagnostics = check(&table, &access("DateTime", "Now"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id, CODE);
        assert_eq!(diagnostics[0].arguments, ["global::System.DateTime.Now"]);
        assert_eq!((diagnostics[0].location.line, diagnostics[0].location.column), (12, 29));
        insta::assert_snapshot!(
            diagnostics[0].message,
            @"Do not use global::System.DateTime.Now. Use IClock/SystemClock instead."
        );
    }

    #[test]
    fn test_detects_datetimeoffset_utcnow() {
        let table = table_with("System", "DateTimeOffset", "UtcNow");
        let diagnostics = check(&table, &access("DateTimeOffset", "UtcNow"));
        assert_eq!(diagnostics[0].arguments, ["global::System.DateTimeOffset.UtcNow"]);
    }

    #[test]
    fn test_allows_other_properties() {
        let table = table_with("System", "DateTime", "Today");
        assert!(check(&table, &access("DateTime", "Today")).is_empty());
    }

    #[test]
    fn test_allows_user_clock_now() {
        let table = table_with("WorkTrack.Common", "Clock", "Now");
        assert!(check(&table, &access("Clock", "Now")).is_empty());
    }

    #[test]
    fn test_requires_property_symbol() {
        let mut table = SymbolTable::new();
        let owner = table.add_type(TypeSymbol::new("System", "DateTime", TypeKind::Struct));
        let field = table.add_field(owner, "Now");
        table.reference(NodeId(7), field);
        assert!(check(&table, &access("DateTime", "Now")).is_empty());

        let unresolved = SymbolTable::new();
        assert!(check(&unresolved, &access("DateTime", "Now")).is_empty());
    }

    #[test]
    fn test_dangling_declaring_type_is_skipped() {
        let mut table = SymbolTable::new();
        let prop = table.add_property(SymbolId(42), "Now", true);
        table.reference(NodeId(7), prop);
        assert!(check(&table, &access("DateTime", "Now")).is_empty());
    }

    #[test]
    fn test_rejects_pointer_access() {
        let mut pointer = access("clock", "Now");
        pointer.operator = AccessOperator::Arrow;
        let tree = SyntaxTree::new(PATH, CompilationUnit::default());
        let table = SymbolTable::new();
        let config = RuleConfig::default();
        let compilation = Compilation::default();
        let ctx = RuleContext::new(&tree, &table, &config, &compilation);
        assert!(ForbiddenTimeAccess::new()
            .evaluate(&ctx, SyntaxNode::MemberAccess(&pointer))
            .is_err());
    }
}
