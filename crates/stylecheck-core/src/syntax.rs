//! Syntax model consumed by rules.
//!
//! The host builds a [`SyntaxTree`] from its own parser and hands it to the
//! analyzer. Nodes that take part in semantic lookups carry a [`NodeId`]
//! which the host's [`SemanticModel`](crate::SemanticModel) understands.
//! Positions are 1-indexed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of a syntax node, shared with the semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A line/column position (both 1-indexed).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A source range. `end` is exclusive.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Span {
    /// First position covered by the span.
    pub start: Position,
    /// Position just past the span.
    pub end: Position,
}

impl Span {
    /// Creates a span from two positions.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a single-line span of `len` columns.
    #[must_use]
    pub fn on_line(line: usize, column: usize, len: usize) -> Self {
        Self {
            start: Position::new(line, column),
            end: Position::new(line, column + len),
        }
    }

    /// Returns a span covering both `self` and `other`.
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// An identifier, keyword or literal with its location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Source text of the token.
    pub text: String,
    /// Location of the token.
    pub span: Span,
}

impl Token {
    /// Creates a token with an explicit span.
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Creates a single-line token starting at `line:column`.
    #[must_use]
    pub fn at(text: impl Into<String>, line: usize, column: usize) -> Self {
        let text = text.into();
        let span = Span::on_line(line, column, text.chars().count());
        Self { text, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Declaration modifier keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Modifier {
    Public,
    Internal,
    Protected,
    Private,
    Static,
    Async,
    Abstract,
    Virtual,
    Override,
    Sealed,
    Extern,
    Partial,
    Readonly,
    Unsafe,
    New,
}

/// Ordered list of modifiers on a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    /// Creates a modifier list.
    #[must_use]
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        Self(modifiers.into_iter().collect())
    }

    /// Returns true if the list contains `modifier`.
    #[must_use]
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// Returns true if the declaration is visible outside its type
    /// (`public` or `internal`).
    #[must_use]
    pub fn is_public_or_internal(&self) -> bool {
        self.contains(Modifier::Public) || self.contains(Modifier::Internal)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Kinds of syntax nodes a rule can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    CompilationUnit,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    RecordDeclaration,
    RecordStructDeclaration,
    EnumDeclaration,
    DelegateDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    LocalFunctionStatement,
    SimpleMemberAccessExpression,
    PointerMemberAccessExpression,
    InvocationExpression,
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    path: PathBuf,
    root: CompilationUnit,
}

impl SyntaxTree {
    /// Creates a tree for the file at `path`. An empty path means the
    /// tree has no backing file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, root: CompilationUnit) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    /// Path of the file this tree was parsed from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Root node of the tree.
    #[must_use]
    pub fn root(&self) -> &CompilationUnit {
        &self.root
    }
}

/// Root of a syntax tree.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    /// Top-level members in source order.
    pub members: Vec<Member>,
}

impl CompilationUnit {
    /// Creates a compilation unit.
    #[must_use]
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }
}

/// A member of a compilation unit, namespace or type.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum Member {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Field(FieldDecl),
    Property(PropertyDecl),
    /// A top-level statement.
    GlobalStatement(Stmt),
}

/// How a namespace declaration scopes its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceStyle {
    /// `namespace Foo { ... }`
    Block,
    /// `namespace Foo;`
    FileScoped,
}

/// A namespace declaration.
#[derive(Debug, Clone)]
pub struct NamespaceDecl {
    /// Dotted namespace name.
    pub name: Token,
    /// Declaration style.
    pub style: NamespaceStyle,
    /// Members in source order.
    pub members: Vec<Member>,
}

impl NamespaceDecl {
    /// Creates a braced namespace.
    #[must_use]
    pub fn block(name: Token, members: Vec<Member>) -> Self {
        Self {
            name,
            style: NamespaceStyle::Block,
            members,
        }
    }

    /// Creates a file-scoped namespace.
    #[must_use]
    pub fn file_scoped(name: Token, members: Vec<Member>) -> Self {
        Self {
            name,
            style: NamespaceStyle::FileScoped,
            members,
        }
    }

    /// Syntax kind of this declaration.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self.style {
            NamespaceStyle::Block => SyntaxKind::NamespaceDeclaration,
            NamespaceStyle::FileScoped => SyntaxKind::FileScopedNamespaceDeclaration,
        }
    }
}

/// Kinds of type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TypeDeclKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
    Enum,
    Delegate,
}

impl TypeDeclKind {
    /// Returns true for declarations with a member body of their own
    /// (classes, structs, interfaces, records). Enums and delegates are not.
    #[must_use]
    pub fn has_type_body(self) -> bool {
        !matches!(self, Self::Enum | Self::Delegate)
    }
}

/// A type declaration.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Semantic identity.
    pub id: NodeId,
    /// Kind of declaration.
    pub kind: TypeDeclKind,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Type name.
    pub identifier: Token,
    /// Members in source order.
    pub members: Vec<Member>,
}

impl TypeDecl {
    /// Creates an empty declaration with no modifiers.
    #[must_use]
    pub fn new(id: NodeId, kind: TypeDeclKind, identifier: Token) -> Self {
        Self {
            id,
            kind,
            modifiers: Modifiers::default(),
            identifier,
            members: Vec::new(),
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = Modifiers::new(modifiers);
        self
    }

    /// Sets the members.
    #[must_use]
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    /// Syntax kind of this declaration.
    #[must_use]
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self.kind {
            TypeDeclKind::Class => SyntaxKind::ClassDeclaration,
            TypeDeclKind::Struct => SyntaxKind::StructDeclaration,
            TypeDeclKind::Interface => SyntaxKind::InterfaceDeclaration,
            TypeDeclKind::Record => SyntaxKind::RecordDeclaration,
            TypeDeclKind::RecordStruct => SyntaxKind::RecordStructDeclaration,
            TypeDeclKind::Enum => SyntaxKind::EnumDeclaration,
            TypeDeclKind::Delegate => SyntaxKind::DelegateDeclaration,
        }
    }
}

/// A parameter in a parameter list.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Declared type as written.
    pub type_name: String,
    /// Parameter name.
    pub identifier: Token,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(type_name: impl Into<String>, identifier: Token) -> Self {
        Self {
            type_name: type_name.into(),
            identifier,
        }
    }
}

/// A parenthesized parameter list.
#[derive(Debug, Clone, Default)]
pub struct ParameterList {
    /// Parameters in order.
    pub parameters: Vec<Parameter>,
    /// Span from `(` to `)`.
    pub span: Span,
}

impl ParameterList {
    /// Creates a parameter list.
    #[must_use]
    pub fn new(span: Span, parameters: Vec<Parameter>) -> Self {
        Self { parameters, span }
    }
}

/// A braced block.
#[derive(Debug, Clone)]
pub struct Block {
    /// Location of `{`.
    pub open_brace: Span,
    /// Location of `}`.
    pub close_brace: Span,
    /// Statements in order.
    pub statements: Vec<Stmt>,
}

impl Block {
    /// Creates an empty block from its brace locations.
    #[must_use]
    pub fn new(open_brace: Span, close_brace: Span) -> Self {
        Self {
            open_brace,
            close_brace,
            statements: Vec::new(),
        }
    }

    /// Creates an empty block whose braces sit at column 5 of the given lines.
    #[must_use]
    pub fn between_lines(open_line: usize, close_line: usize) -> Self {
        Self::new(Span::on_line(open_line, 5, 1), Span::on_line(close_line, 5, 1))
    }

    /// Sets the statements.
    #[must_use]
    pub fn with_statements(mut self, statements: Vec<Stmt>) -> Self {
        self.statements = statements;
        self
    }

    /// Span from `{` to `}`.
    #[must_use]
    pub fn span(&self) -> Span {
        self.open_brace.to(self.close_brace)
    }
}

/// A method declaration.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    /// Semantic identity.
    pub id: NodeId,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Return type as written.
    pub return_type: String,
    /// Method name.
    pub identifier: Token,
    /// Type parameter names; empty for non-generic methods.
    pub type_parameters: Vec<Token>,
    /// Parameters.
    pub parameter_list: ParameterList,
    /// Block body, if any.
    pub body: Option<Block>,
    /// Expression body (`=> expr`), if any.
    pub expression_body: Option<Expr>,
}

impl MethodDecl {
    /// Creates a `void` method with no parameters and no body.
    #[must_use]
    pub fn new(id: NodeId, identifier: Token) -> Self {
        Self {
            id,
            modifiers: Modifiers::default(),
            return_type: "void".to_string(),
            identifier,
            type_parameters: Vec::new(),
            parameter_list: ParameterList::default(),
            body: None,
            expression_body: None,
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = Modifiers::new(modifiers);
        self
    }

    /// Sets the return type text.
    #[must_use]
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Sets the type parameter list.
    #[must_use]
    pub fn with_type_parameters(mut self, type_parameters: Vec<Token>) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    /// Sets the parameter list.
    #[must_use]
    pub fn with_parameters(mut self, parameter_list: ParameterList) -> Self {
        self.parameter_list = parameter_list;
        self
    }

    /// Sets the block body.
    #[must_use]
    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the expression body.
    #[must_use]
    pub fn with_expression_body(mut self, expr: Expr) -> Self {
        self.expression_body = Some(expr);
        self
    }
}

/// A constructor declaration.
#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    /// Semantic identity.
    pub id: NodeId,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Type name as written after the modifiers.
    pub identifier: Token,
    /// Parameters.
    pub parameter_list: ParameterList,
    /// Block body, if any.
    pub body: Option<Block>,
    /// Expression body, if any.
    pub expression_body: Option<Expr>,
}

impl ConstructorDecl {
    /// Creates a constructor with no parameters and no body.
    #[must_use]
    pub fn new(id: NodeId, identifier: Token) -> Self {
        Self {
            id,
            modifiers: Modifiers::default(),
            identifier,
            parameter_list: ParameterList::default(),
            body: None,
            expression_body: None,
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = Modifiers::new(modifiers);
        self
    }

    /// Sets the parameter list.
    #[must_use]
    pub fn with_parameters(mut self, parameter_list: ParameterList) -> Self {
        self.parameter_list = parameter_list;
        self
    }

    /// Sets the block body.
    #[must_use]
    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }
}

/// A local function declared inside a block.
#[derive(Debug, Clone)]
pub struct LocalFunctionDecl {
    /// Semantic identity.
    pub id: NodeId,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Return type as written.
    pub return_type: String,
    /// Function name.
    pub identifier: Token,
    /// Type parameter names.
    pub type_parameters: Vec<Token>,
    /// Parameters.
    pub parameter_list: ParameterList,
    /// Block body, if any.
    pub body: Option<Block>,
    /// Expression body, if any.
    pub expression_body: Option<Expr>,
}

impl LocalFunctionDecl {
    /// Creates a `void` local function with no body.
    #[must_use]
    pub fn new(id: NodeId, identifier: Token) -> Self {
        Self {
            id,
            modifiers: Modifiers::default(),
            return_type: "void".to_string(),
            identifier,
            type_parameters: Vec::new(),
            parameter_list: ParameterList::default(),
            body: None,
            expression_body: None,
        }
    }

    /// Sets the block body.
    #[must_use]
    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the expression body.
    #[must_use]
    pub fn with_expression_body(mut self, expr: Expr) -> Self {
        self.expression_body = Some(expr);
        self
    }
}

/// A field declaration.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Field name.
    pub identifier: Token,
    /// Initializer expression.
    pub initializer: Option<Expr>,
}

/// A property accessor (`get`, `set`, `init`).
#[derive(Debug, Clone)]
pub struct Accessor {
    /// Accessor keyword.
    pub keyword: Token,
    /// Block body, if any.
    pub body: Option<Block>,
    /// Expression body, if any.
    pub expression_body: Option<Expr>,
}

/// A property declaration.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Property name.
    pub identifier: Token,
    /// Accessors in source order.
    pub accessors: Vec<Accessor>,
    /// Expression body (`=> expr`), if any.
    pub expression_body: Option<Expr>,
    /// Initializer (`= expr;`), if any.
    pub initializer: Option<Expr>,
}

/// A statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `expr;`
    Expression(ExpressionStmt),
    /// A nested function declaration.
    LocalFunction(LocalFunctionDecl),
    /// `var x = expr;`
    LocalDeclaration(LocalDeclarationStmt),
    /// `return expr;`
    Return(ReturnStmt),
    /// A nested block.
    Block(Block),
    /// Any other statement (`if`, loops, `try`, `using`...).
    Other(OtherStmt),
}

impl Stmt {
    /// Creates an expression statement.
    #[must_use]
    pub fn expression(expr: Expr, span: Span) -> Self {
        Self::Expression(ExpressionStmt { expr, span })
    }

    /// Location of the statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression(s) => s.span,
            Self::LocalFunction(f) => f.identifier.span,
            Self::LocalDeclaration(s) => s.span,
            Self::Return(s) => s.span,
            Self::Block(b) => b.span(),
            Self::Other(s) => s.span,
        }
    }
}

/// An expression statement.
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    /// The expression.
    pub expr: Expr,
    /// Span including the trailing `;`.
    pub span: Span,
}

/// A single variable in a local declaration.
#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    /// Variable name.
    pub identifier: Token,
    /// Initializer, if any.
    pub initializer: Option<Expr>,
}

/// A local variable declaration statement.
#[derive(Debug, Clone)]
pub struct LocalDeclarationStmt {
    /// Declared variables.
    pub variables: Vec<VariableDeclarator>,
    /// Statement span.
    pub span: Span,
}

/// A return statement.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    /// Returned expression.
    pub expr: Option<Expr>,
    /// Statement span.
    pub span: Span,
}

/// A statement the rules only need to walk through.
#[derive(Debug, Clone)]
pub struct OtherStmt {
    /// Leading keyword, e.g. `if` or `foreach`.
    pub keyword: String,
    /// Expressions owned by the statement (conditions, collections...).
    pub expressions: Vec<Expr>,
    /// Nested blocks in source order.
    pub blocks: Vec<Block>,
    /// Statement span.
    pub span: Span,
}

/// Member access operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessOperator {
    /// `a.b`
    Dot,
    /// `a->b`
    Arrow,
}

/// An expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A simple name.
    Identifier(Token),
    /// A literal.
    Literal(Token),
    /// `expr.name`
    MemberAccess(MemberAccessExpr),
    /// `expr(args)`
    Invocation(InvocationExpr),
    /// `await expr`
    Await(AwaitExpr),
    /// `(params) => body`
    Lambda(LambdaExpr),
    /// Anything else, kept as source text with its sub-expressions.
    Other(OtherExpr),
}

/// A member access expression.
#[derive(Debug, Clone)]
pub struct MemberAccessExpr {
    /// Semantic identity.
    pub id: NodeId,
    /// Receiver expression.
    pub expression: Box<Expr>,
    /// Access operator.
    pub operator: AccessOperator,
    /// Accessed member name.
    pub name: Token,
}

impl MemberAccessExpr {
    /// Syntax kind of this access.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self.operator {
            AccessOperator::Dot => SyntaxKind::SimpleMemberAccessExpression,
            AccessOperator::Arrow => SyntaxKind::PointerMemberAccessExpression,
        }
    }
}

/// An invocation expression.
#[derive(Debug, Clone)]
pub struct InvocationExpr {
    /// Invoked expression.
    pub expression: Box<Expr>,
    /// Arguments in order.
    pub arguments: Vec<Expr>,
    /// Span including the argument list.
    pub span: Span,
}

/// An await expression.
#[derive(Debug, Clone)]
pub struct AwaitExpr {
    /// Awaited operand.
    pub expression: Box<Expr>,
    /// Span including the `await` keyword.
    pub span: Span,
}

/// Body of a lambda.
#[derive(Debug, Clone)]
pub enum LambdaBody {
    /// `=> { ... }`
    Block(Block),
    /// `=> expr`
    Expr(Box<Expr>),
}

/// A lambda expression.
#[derive(Debug, Clone)]
pub struct LambdaExpr {
    /// Parameter names.
    pub parameters: Vec<Token>,
    /// Lambda body.
    pub body: LambdaBody,
    /// Expression span.
    pub span: Span,
}

/// An expression without dedicated structure.
#[derive(Debug, Clone)]
pub struct OtherExpr {
    /// Source text.
    pub text: String,
    /// Sub-expressions in source order.
    pub children: Vec<Expr>,
    /// Expression span.
    pub span: Span,
}

impl Expr {
    /// Creates a simple name.
    #[must_use]
    pub fn identifier(token: Token) -> Self {
        Self::Identifier(token)
    }

    /// Creates `expression.name`.
    #[must_use]
    pub fn member_access(id: NodeId, expression: Expr, name: Token) -> Self {
        Self::MemberAccess(MemberAccessExpr {
            id,
            expression: Box::new(expression),
            operator: AccessOperator::Dot,
            name,
        })
    }

    /// Creates `expression(arguments)` ending at `end` (exclusive).
    #[must_use]
    pub fn invocation(expression: Expr, arguments: Vec<Expr>, end: Position) -> Self {
        let span = Span::new(expression.span().start, end);
        Self::Invocation(InvocationExpr {
            expression: Box::new(expression),
            arguments,
            span,
        })
    }

    /// Creates `await expression` with the keyword starting at `start`.
    #[must_use]
    pub fn await_expr(expression: Expr, start: Position) -> Self {
        let span = Span::new(start, expression.span().end);
        Self::Await(AwaitExpr {
            expression: Box::new(expression),
            span,
        })
    }

    /// Location of the expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Identifier(t) | Self::Literal(t) => t.span,
            Self::MemberAccess(m) => m.expression.span().to(m.name.span),
            Self::Invocation(i) => i.span,
            Self::Await(a) => a.span,
            Self::Lambda(l) => l.span,
            Self::Other(o) => o.span,
        }
    }
}

/// Renders the expression as compact source text.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(t) | Self::Literal(t) => write!(f, "{t}"),
            Self::MemberAccess(m) => {
                let op = match m.operator {
                    AccessOperator::Dot => ".",
                    AccessOperator::Arrow => "->",
                };
                write!(f, "{}{op}{}", m.expression, m.name)
            }
            Self::Invocation(i) => {
                write!(f, "{}(", i.expression)?;
                for (idx, arg) in i.arguments.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Await(a) => write!(f, "await {}", a.expression),
            Self::Lambda(l) => {
                let params: Vec<&str> = l.parameters.iter().map(|p| p.text.as_str()).collect();
                write!(f, "({}) => ", params.join(", "))?;
                match &l.body {
                    LambdaBody::Block(_) => f.write_str("{ ... }"),
                    LambdaBody::Expr(e) => write!(f, "{e}"),
                }
            }
            Self::Other(o) => f.write_str(&o.text),
        }
    }
}

/// A borrowed view of a node that rules can be triggered on.
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub enum SyntaxNode<'a> {
    CompilationUnit(&'a CompilationUnit),
    Namespace(&'a NamespaceDecl),
    Type(&'a TypeDecl),
    Method(&'a MethodDecl),
    Constructor(&'a ConstructorDecl),
    LocalFunction(&'a LocalFunctionDecl),
    MemberAccess(&'a MemberAccessExpr),
    Invocation(&'a InvocationExpr),
}

impl SyntaxNode<'_> {
    /// Syntax kind of the node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::CompilationUnit(_) => SyntaxKind::CompilationUnit,
            Self::Namespace(n) => n.kind(),
            Self::Type(t) => t.syntax_kind(),
            Self::Method(_) => SyntaxKind::MethodDeclaration,
            Self::Constructor(_) => SyntaxKind::ConstructorDeclaration,
            Self::LocalFunction(_) => SyntaxKind::LocalFunctionStatement,
            Self::MemberAccess(m) => m.kind(),
            Self::Invocation(_) => SyntaxKind::InvocationExpression,
        }
    }
}
