//! Rule to enforce file shape: file-scoped namespaces and one public type.
//!
//! # Detected Patterns
//!
//! - `namespace Foo { ... }` anywhere in the file (reported once, at the
//!   first one)
//! - More than one public or internal class, struct, interface or record
//!   declared directly in the file or in a namespace
//!
//! Enums and delegates do not count toward the type limit. Files whose path
//! marks them as tests are skipped.

use stylecheck_core::diagnostics::{self, DiagnosticDescriptor};
use stylecheck_core::syntax::{Member, NamespaceDecl, NamespaceStyle as Style, TypeDecl};
use stylecheck_core::{
    Diagnostic, Rule, RuleContext, RuleError, Severity, SyntaxKind, SyntaxNode, TestScope,
};

/// Rule code for namespace-style.
pub const CODE: &str = "WTI0006";

/// Diagnostic id for the single public type check.
pub const SINGLE_TYPE_CODE: &str = "WTI0007";

/// Rule name for namespace-style.
pub const NAME: &str = "namespace-style";

/// Descriptor for block-style namespaces.
pub const FILE_SCOPED_DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: CODE,
    rule: NAME,
    title: "Use a file-scoped namespace",
    message_format: "Namespace '{0}' must be declared in file-scoped style",
    category: "WorkTrack.Common.Namespaces",
    severity: Severity::Error,
    description: "All files must use a file-scoped namespace (namespace Foo.Bar;).",
};

/// Descriptor for files declaring several public types.
pub const SINGLE_TYPE_DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: SINGLE_TYPE_CODE,
    rule: NAME,
    title: "Only one public type per file",
    message_format: "File contains several public types: {0}",
    category: "WorkTrack.Common.Structure",
    severity: Severity::Error,
    description: "A file must contain at most one public or internal type.",
};

/// Enforces file-scoped namespaces and a single public type per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceStyle;

impl NamespaceStyle {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NamespaceStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires file-scoped namespaces and one public type per file"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
        &[FILE_SCOPED_DESCRIPTOR, SINGLE_TYPE_DESCRIPTOR]
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::CompilationUnit]
    }

    fn test_scope(&self) -> TestScope {
        TestScope::File
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: SyntaxNode<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let SyntaxNode::CompilationUnit(unit) = node else {
            return Err(RuleError::unexpected(NAME, node));
        };

        let mut found = Vec::new();

        if let Some(ns) = first_block_namespace(&unit.members) {
            found.push(diagnostics::invalid_namespace_style(
                &FILE_SCOPED_DESCRIPTOR,
                ctx.location(ns.name.span),
                &ns.name.text,
            ));
        }

        let mut types = Vec::new();
        collect_top_level_types(&unit.members, &mut types);
        let public: Vec<&TypeDecl> = types
            .into_iter()
            .filter(|t| t.modifiers.is_public_or_internal())
            .collect();
        if let Some(second) = public.get(1) {
            let names: Vec<&str> = public.iter().map(|t| t.identifier.text.as_str()).collect();
            found.push(diagnostics::multiple_public_types(
                &SINGLE_TYPE_DESCRIPTOR,
                ctx.location(second.identifier.span),
                &names,
            ));
        }

        Ok(found)
    }
}

/// First braced namespace in document order, including nested ones.
fn first_block_namespace(members: &[Member]) -> Option<&NamespaceDecl> {
    members.iter().find_map(|member| match member {
        Member::Namespace(ns) if ns.style == Style::Block => Some(ns),
        Member::Namespace(ns) => first_block_namespace(&ns.members),
        _ => None,
    })
}

/// Type declarations whose parent is the compilation unit or a namespace.
fn collect_top_level_types<'a>(members: &'a [Member], out: &mut Vec<&'a TypeDecl>) {
    for member in members {
        match member {
            Member::Type(t) if t.kind.has_type_body() => out.push(t),
            Member::Namespace(ns) => collect_top_level_types(&ns.members, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::syntax::{
        CompilationUnit, Modifier, NodeId, SyntaxTree, Token, TypeDeclKind,
    };
    use stylecheck_core::{Compilation, RuleConfig, SymbolTable};

    fn check(unit: CompilationUnit) -> Vec<Diagnostic> {
        let tree = SyntaxTree::new("src/WorkTrack.Orders/Order.cs", unit);
        let table = SymbolTable::new();
        let config = RuleConfig::default();
        let compilation = Compilation::new("WorkTrack.Orders");
        let ctx = RuleContext::new(&tree, &table, &config, &compilation);
        NamespaceStyle::new()
            .evaluate(&ctx, SyntaxNode::CompilationUnit(tree.root()))
            .unwrap()
    }

    fn public(kind: TypeDeclKind, name: &str, line: usize) -> Member {
        Member::Type(
            TypeDecl::new(NodeId(0), kind, Token::at(name, line, 14))
                .with_modifiers([Modifier::Public]),
        )
    }

    fn file_scoped(members: Vec<Member>) -> Member {
        Member::Namespace(NamespaceDecl::file_scoped(
            Token::at("WorkTrack.Orders", 1, 11),
            members,
        ))
    }

    #[test]
    fn test_file_scoped_single_type_is_clean() {
        let unit = CompilationUnit::new(vec![file_scoped(vec![public(
            TypeDeclKind::Class,
            "Order",
            3,
        )])]);
        assert!(check(unit).is_empty());
    }

    #[test]
    fn test_reports_block_namespace_once() {
        let inner = NamespaceDecl::block(Token::at("Inner", 3, 15), vec![]);
        let outer = NamespaceDecl::block(
            Token::at("WorkTrack.Orders", 1, 11),
            vec![Member::Namespace(inner)],
        );
        let second = NamespaceDecl::block(Token::at("WorkTrack.Other", 8, 11), vec![]);
        let unit = CompilationUnit::new(vec![
            Member::Namespace(outer),
            Member::Namespace(second),
        ]);

        let diagnostics = check(unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id, CODE);
        assert_eq!(diagnostics[0].arguments, ["WorkTrack.Orders"]);
        assert_eq!((diagnostics[0].location.line, diagnostics[0].location.column), (1, 11));
    }

    #[test]
    fn test_finds_block_namespace_under_file_scoped() {
        let nested = NamespaceDecl::block(Token::at("Nested", 3, 11), vec![]);
        let unit = CompilationUnit::new(vec![file_scoped(vec![Member::Namespace(nested)])]);
        let diagnostics = check(unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].arguments, ["Nested"]);
    }

    #[test]
    fn test_reports_multiple_public_types_at_second() {
        let unit = CompilationUnit::new(vec![file_scoped(vec![
            public(TypeDeclKind::Class, "Order", 3),
            public(TypeDeclKind::Interface, "IOrder", 8),
            public(TypeDeclKind::Record, "OrderLine", 12),
        ])]);

        let diagnostics = check(unit);
        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.id, SINGLE_TYPE_CODE);
        assert_eq!(d.arguments, ["Order, IOrder, OrderLine"]);
        assert_eq!(d.location.line, 8);
        insta::assert_snapshot!(d.message, @"File contains several public types: Order, IOrder, OrderLine");
    }

    #[test]
    fn test_counts_internal_but_not_private_types() {
        let internal = Member::Type(
            TypeDecl::new(NodeId(0), TypeDeclKind::Struct, Token::at("Money", 5, 17))
                .with_modifiers([Modifier::Internal]),
        );
        let hidden = Member::Type(TypeDecl::new(
            NodeId(0),
            TypeDeclKind::Class,
            Token::at("Helper", 9, 7),
        ));
        let unit = CompilationUnit::new(vec![
            public(TypeDeclKind::Class, "Order", 3),
            internal,
            hidden,
        ]);
        let diagnostics = check(unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].arguments, ["Order, Money"]);
    }

    #[test]
    fn test_enums_delegates_and_nested_types_do_not_count() {
        let nested = public(TypeDeclKind::Class, "Builder", 5);
        let Member::Type(order) = public(TypeDeclKind::Class, "Order", 3) else {
            unreachable!()
        };
        let order = Member::Type(order.with_members(vec![nested]));
        let unit = CompilationUnit::new(vec![file_scoped(vec![
            order,
            public(TypeDeclKind::Enum, "OrderStatus", 10),
            public(TypeDeclKind::Delegate, "OrderHandler", 14),
        ])]);
        assert!(check(unit).is_empty());
    }

    #[test]
    fn test_types_across_namespaces_in_document_order() {
        let first = NamespaceDecl::block(
            Token::at("A", 1, 11),
            vec![public(TypeDeclKind::Class, "First", 3)],
        );
        let unit = CompilationUnit::new(vec![
            public(TypeDeclKind::Class, "Zero", 1),
            Member::Namespace(first),
            public(TypeDeclKind::Class, "Last", 9),
        ]);
        let diagnostics = check(unit);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].arguments, ["Zero, First, Last"]);
    }

    #[test]
    fn test_runs_once_per_file_on_the_root() {
        let rule = NamespaceStyle::new();
        assert_eq!(rule.triggers(), [SyntaxKind::CompilationUnit]);
        assert_eq!(rule.test_scope(), TestScope::File);
        assert_eq!(rule.supported_diagnostics().len(), 2);
    }
}
