//! Read-only traversal of the syntax model.
//!
//! Mirrors the shape of `syn::visit`: every `visit_*` method has a matching
//! free function that walks the node's children, so implementors override
//! the hooks they care about and call the free function to keep descending.

use crate::syntax::{
    Accessor, Block, CompilationUnit, ConstructorDecl, Expr, FieldDecl, InvocationExpr,
    LambdaBody, LocalFunctionDecl, Member, MemberAccessExpr, MethodDecl, NamespaceDecl,
    PropertyDecl, Stmt, TypeDecl,
};

/// Syntax tree visitor. All methods default to a full walk.
#[allow(missing_docs)]
pub trait Visit<'ast> {
    fn visit_compilation_unit(&mut self, node: &'ast CompilationUnit) {
        visit_compilation_unit(self, node);
    }

    fn visit_member(&mut self, node: &'ast Member) {
        visit_member(self, node);
    }

    fn visit_namespace(&mut self, node: &'ast NamespaceDecl) {
        visit_namespace(self, node);
    }

    fn visit_type_decl(&mut self, node: &'ast TypeDecl) {
        visit_type_decl(self, node);
    }

    fn visit_method(&mut self, node: &'ast MethodDecl) {
        visit_method(self, node);
    }

    fn visit_constructor(&mut self, node: &'ast ConstructorDecl) {
        visit_constructor(self, node);
    }

    fn visit_local_function(&mut self, node: &'ast LocalFunctionDecl) {
        visit_local_function(self, node);
    }

    fn visit_field(&mut self, node: &'ast FieldDecl) {
        visit_field(self, node);
    }

    fn visit_property(&mut self, node: &'ast PropertyDecl) {
        visit_property(self, node);
    }

    fn visit_accessor(&mut self, node: &'ast Accessor) {
        visit_accessor(self, node);
    }

    fn visit_block(&mut self, node: &'ast Block) {
        visit_block(self, node);
    }

    fn visit_stmt(&mut self, node: &'ast Stmt) {
        visit_stmt(self, node);
    }

    fn visit_expr(&mut self, node: &'ast Expr) {
        visit_expr(self, node);
    }

    fn visit_member_access(&mut self, node: &'ast MemberAccessExpr) {
        visit_member_access(self, node);
    }

    fn visit_invocation(&mut self, node: &'ast InvocationExpr) {
        visit_invocation(self, node);
    }
}

/// Walks the members of a compilation unit.
pub fn visit_compilation_unit<'ast, V>(v: &mut V, node: &'ast CompilationUnit)
where
    V: Visit<'ast> + ?Sized,
{
    for member in &node.members {
        v.visit_member(member);
    }
}

/// Dispatches a member to its typed hook.
pub fn visit_member<'ast, V>(v: &mut V, node: &'ast Member)
where
    V: Visit<'ast> + ?Sized,
{
    match node {
        Member::Namespace(n) => v.visit_namespace(n),
        Member::Type(t) => v.visit_type_decl(t),
        Member::Method(m) => v.visit_method(m),
        Member::Constructor(c) => v.visit_constructor(c),
        Member::Field(f) => v.visit_field(f),
        Member::Property(p) => v.visit_property(p),
        Member::GlobalStatement(s) => v.visit_stmt(s),
    }
}

/// Walks the members of a namespace.
pub fn visit_namespace<'ast, V>(v: &mut V, node: &'ast NamespaceDecl)
where
    V: Visit<'ast> + ?Sized,
{
    for member in &node.members {
        v.visit_member(member);
    }
}

/// Walks the members of a type declaration.
pub fn visit_type_decl<'ast, V>(v: &mut V, node: &'ast TypeDecl)
where
    V: Visit<'ast> + ?Sized,
{
    for member in &node.members {
        v.visit_member(member);
    }
}

/// Walks a method's bodies.
pub fn visit_method<'ast, V>(v: &mut V, node: &'ast MethodDecl)
where
    V: Visit<'ast> + ?Sized,
{
    walk_bodies(v, node.body.as_ref(), node.expression_body.as_ref());
}

/// Walks a constructor's bodies.
pub fn visit_constructor<'ast, V>(v: &mut V, node: &'ast ConstructorDecl)
where
    V: Visit<'ast> + ?Sized,
{
    walk_bodies(v, node.body.as_ref(), node.expression_body.as_ref());
}

/// Walks a local function's bodies.
pub fn visit_local_function<'ast, V>(v: &mut V, node: &'ast LocalFunctionDecl)
where
    V: Visit<'ast> + ?Sized,
{
    walk_bodies(v, node.body.as_ref(), node.expression_body.as_ref());
}

/// Walks a field initializer.
pub fn visit_field<'ast, V>(v: &mut V, node: &'ast FieldDecl)
where
    V: Visit<'ast> + ?Sized,
{
    if let Some(init) = &node.initializer {
        v.visit_expr(init);
    }
}

/// Walks property accessors, expression body and initializer.
pub fn visit_property<'ast, V>(v: &mut V, node: &'ast PropertyDecl)
where
    V: Visit<'ast> + ?Sized,
{
    for accessor in &node.accessors {
        v.visit_accessor(accessor);
    }
    if let Some(expr) = &node.expression_body {
        v.visit_expr(expr);
    }
    if let Some(init) = &node.initializer {
        v.visit_expr(init);
    }
}

/// Walks an accessor's bodies.
pub fn visit_accessor<'ast, V>(v: &mut V, node: &'ast Accessor)
where
    V: Visit<'ast> + ?Sized,
{
    walk_bodies(v, node.body.as_ref(), node.expression_body.as_ref());
}

/// Walks the statements of a block.
pub fn visit_block<'ast, V>(v: &mut V, node: &'ast Block)
where
    V: Visit<'ast> + ?Sized,
{
    for stmt in &node.statements {
        v.visit_stmt(stmt);
    }
}

/// Walks the children of a statement.
pub fn visit_stmt<'ast, V>(v: &mut V, node: &'ast Stmt)
where
    V: Visit<'ast> + ?Sized,
{
    match node {
        Stmt::Expression(s) => v.visit_expr(&s.expr),
        Stmt::LocalFunction(f) => v.visit_local_function(f),
        Stmt::LocalDeclaration(s) => {
            for init in s.variables.iter().filter_map(|var| var.initializer.as_ref()) {
                v.visit_expr(init);
            }
        }
        Stmt::Return(s) => {
            if let Some(expr) = &s.expr {
                v.visit_expr(expr);
            }
        }
        Stmt::Block(b) => v.visit_block(b),
        Stmt::Other(s) => {
            for expr in &s.expressions {
                v.visit_expr(expr);
            }
            for block in &s.blocks {
                v.visit_block(block);
            }
        }
    }
}

/// Walks the children of an expression.
pub fn visit_expr<'ast, V>(v: &mut V, node: &'ast Expr)
where
    V: Visit<'ast> + ?Sized,
{
    match node {
        Expr::Identifier(_) | Expr::Literal(_) => {}
        Expr::MemberAccess(m) => v.visit_member_access(m),
        Expr::Invocation(i) => v.visit_invocation(i),
        Expr::Await(a) => v.visit_expr(&a.expression),
        Expr::Lambda(l) => match &l.body {
            LambdaBody::Block(b) => v.visit_block(b),
            LambdaBody::Expr(e) => v.visit_expr(e),
        },
        Expr::Other(o) => {
            for child in &o.children {
                v.visit_expr(child);
            }
        }
    }
}

/// Walks the receiver of a member access.
pub fn visit_member_access<'ast, V>(v: &mut V, node: &'ast MemberAccessExpr)
where
    V: Visit<'ast> + ?Sized,
{
    v.visit_expr(&node.expression);
}

/// Walks the callee and arguments of an invocation.
pub fn visit_invocation<'ast, V>(v: &mut V, node: &'ast InvocationExpr)
where
    V: Visit<'ast> + ?Sized,
{
    v.visit_expr(&node.expression);
    for arg in &node.arguments {
        v.visit_expr(arg);
    }
}

fn walk_bodies<'ast, V>(v: &mut V, body: Option<&'ast Block>, expression_body: Option<&'ast Expr>)
where
    V: Visit<'ast> + ?Sized,
{
    if let Some(block) = body {
        v.visit_block(block);
    }
    if let Some(expr) = expression_body {
        v.visit_expr(expr);
    }
}
