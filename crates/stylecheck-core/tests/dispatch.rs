//! Dispatcher behavior seen through the public API with a host-defined rule.

use std::collections::HashMap;
use std::sync::Arc;

use stylecheck_core::diagnostics::DiagnosticDescriptor;
use stylecheck_core::syntax::{
    Block, CompilationUnit, Expr, Member, MethodDecl, NodeId, Position, Span, Stmt, Token,
    TypeDecl, TypeDeclKind,
};
use stylecheck_core::{
    Analyzer, ClassificationCache, Compilation, Diagnostic, DiagnosticReport, FileInput, Rule,
    RuleContext, RuleError, Severity, SymbolTable, SyntaxKind, SyntaxNode, SyntaxTree, TestScope,
};

const CONSOLE: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "HST0001",
    rule: "no-console-write",
    title: "Console output in library code",
    message_format: "Replace {0} with structured logging",
    category: "Host.Logging",
    severity: Severity::Warning,
    description: "Libraries log through ILogger.",
};

/// Flags `Console.WriteLine(...)` calls. Runs on test code as well.
struct NoConsoleWrite;

impl Rule for NoConsoleWrite {
    fn name(&self) -> &'static str {
        "no-console-write"
    }

    fn code(&self) -> &'static str {
        "HST0001"
    }

    fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
        &[CONSOLE]
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::InvocationExpression]
    }

    fn test_scope(&self) -> TestScope {
        TestScope::None
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: SyntaxNode<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let SyntaxNode::Invocation(call) = node else {
            return Err(RuleError::unexpected(self.name(), node));
        };
        let callee = call.expression.to_string();
        if callee != "Console.WriteLine" {
            return Ok(Vec::new());
        }
        Ok(vec![CONSOLE.create(ctx.location(call.span), vec![callee])])
    }
}

/// `Console.WriteLine(order)` on `line`, column 9.
fn console_call(line: usize) -> Stmt {
    let callee = Expr::member_access(
        NodeId(100),
        Expr::identifier(Token::at("Console", line, 9)),
        Token::at("WriteLine", line, 17),
    );
    let call = Expr::invocation(
        callee,
        vec![Expr::identifier(Token::at("order", line, 27))],
        Position::new(line, 33),
    );
    Stmt::expression(call, Span::new(Position::new(line, 9), Position::new(line, 34)))
}

fn tree(path: &str) -> SyntaxTree {
    let method = MethodDecl::new(NodeId(2), Token::at("Print", 3, 17))
        .with_body(Block::between_lines(4, 8).with_statements(vec![console_call(5), console_call(7)]));
    let printer = TypeDecl::new(NodeId(1), TypeDeclKind::Class, Token::at("Printer", 1, 14))
        .with_members(vec![Member::Method(method)]);
    SyntaxTree::new(path, CompilationUnit::new(vec![Member::Type(printer)]))
}

fn analyzer() -> Analyzer {
    Analyzer::builder()
        .rule(NoConsoleWrite)
        .options(HashMap::<String, String>::new())
        .classification(Arc::new(ClassificationCache::new()))
        .build()
        .unwrap()
}

#[test]
fn test_dispatches_in_source_order() {
    let tree = tree("src/Printer.cs");
    let symbols = SymbolTable::new();
    let compilation = Compilation::new("Host");
    let result = analyzer().analyze_file(&FileInput::new(&tree, &symbols, &compilation));

    let lines: Vec<usize> = result.diagnostics.iter().map(|d| d.location.line).collect();
    assert_eq!(lines, [5, 7]);
    assert_eq!(result.count_by_severity(), (0, 2));
    assert!(!result.has_errors());
}

#[test]
fn test_rules_without_test_scope_run_everywhere() {
    let tree = tree("tests/Host.Tests/PrinterTests.cs");
    let symbols = SymbolTable::new();
    let compilation = Compilation::new("Host.Tests");
    let result = analyzer().analyze_file(&FileInput::new(&tree, &symbols, &compilation));
    assert_eq!(result.diagnostics.len(), 2);
}

#[test]
fn test_report_renders_through_miette() {
    let tree = tree("src/Printer.cs");
    let symbols = SymbolTable::new();
    let compilation = Compilation::default();
    let result = analyzer().analyze_file(&FileInput::new(&tree, &symbols, &compilation));

    let report = DiagnosticReport::from_source(
        &result.diagnostics[0],
        "class Printer\n{\n    void Print()\n    {\n        Console.WriteLine(order);\n",
    );
    insta::assert_snapshot!(report.to_string(), @"[HST0001] Replace Console.WriteLine with structured logging");
    let json = result.to_json().unwrap();
    assert!(json.contains("\"severity\": \"warning\""));
}
