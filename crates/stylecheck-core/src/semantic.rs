//! Semantic model consumed by rules.
//!
//! The host resolves declarations and expressions into [`Symbol`]s and
//! exposes them through [`SemanticModel`]. [`SymbolTable`] is an in-memory
//! implementation suitable for hosts that bind eagerly, and for tests.

use crate::syntax::{NodeId, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Identity of a symbol within a semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// Kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Array,
    TypeParameter,
    Error,
}

/// Types the compiler treats specially.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum SpecialType {
    #[default]
    None,
    Object,
    String,
}

/// A reference to a type as used in a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Fully qualified name of the unbound (generic definition) type,
    /// e.g. `System.Threading.Tasks.Task`.
    pub name: String,
    /// Type arguments, empty for non-generic types.
    pub type_arguments: Vec<TypeRef>,
    /// Kind of type.
    pub kind: TypeKind,
    /// Special type marker.
    pub special: SpecialType,
    /// Whether values of the type are references.
    pub is_reference_type: bool,
}

impl TypeRef {
    fn with_kind(name: impl Into<String>, kind: TypeKind, is_reference_type: bool) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
            kind,
            special: SpecialType::None,
            is_reference_type,
        }
    }

    /// A class type.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Class, true)
    }

    /// An interface type.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Interface, true)
    }

    /// A struct (value) type.
    #[must_use]
    pub fn value_type(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Struct, false)
    }

    /// `System.String`.
    #[must_use]
    pub fn string() -> Self {
        Self {
            special: SpecialType::String,
            ..Self::class("System.String")
        }
    }

    /// An unbound type parameter such as `T`.
    #[must_use]
    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::TypeParameter, false)
    }

    /// Adds type arguments, producing a constructed generic type.
    #[must_use]
    pub fn of(mut self, type_arguments: Vec<TypeRef>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    /// Name of the generic definition this type was constructed from.
    #[must_use]
    pub fn unbound_name(&self) -> &str {
        &self.name
    }
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

/// Nullable reference annotation on a type usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NullableAnnotation {
    /// Nullable context disabled.
    #[default]
    None,
    /// `string`
    NotAnnotated,
    /// `string?`
    Annotated,
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeRef,
    /// Passing mode.
    pub ref_kind: RefKind,
    /// Nullable annotation.
    pub nullable: NullableAnnotation,
}

impl ParameterSymbol {
    /// A by-value, non-annotated parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            ref_kind: RefKind::None,
            nullable: NullableAnnotation::NotAnnotated,
        }
    }

    /// Sets the passing mode.
    #[must_use]
    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    /// Marks the parameter type as nullable (`T?`).
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = NullableAnnotation::Annotated;
        self
    }
}

/// Kind of method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MethodKind {
    #[default]
    Ordinary,
    Constructor,
    StaticConstructor,
    Destructor,
    UserDefinedOperator,
    Conversion,
    PropertyGet,
    PropertySet,
    EventAdd,
    EventRemove,
    ExplicitInterfaceImplementation,
    LocalFunction,
    LambdaMethod,
}

/// Where a symbol is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolLocation {
    /// Declared in source.
    Source {
        /// File containing the declaration.
        file: PathBuf,
        /// Span of the declaration's name.
        span: Span,
    },
    /// Loaded from a referenced assembly.
    Metadata,
}

/// A resolved method, constructor, accessor or local function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    /// Identity, assigned by the owning table.
    pub id: SymbolId,
    /// Metadata name (`.ctor` for constructors).
    pub name: String,
    /// Kind of method.
    pub kind: MethodKind,
    /// Declared `async`.
    pub is_async: bool,
    /// Declared `override`.
    pub is_override: bool,
    /// Declared or implied `abstract`.
    pub is_abstract: bool,
    /// Declared `extern`.
    pub is_extern: bool,
    /// Synthesized by the compiler.
    pub is_implicitly_declared: bool,
    /// Return type; `None` for `void`.
    pub return_type: Option<TypeRef>,
    /// Type parameter names.
    pub type_parameters: Vec<String>,
    /// Parameters in order.
    pub parameters: Vec<ParameterSymbol>,
    /// Type that declares the method.
    pub containing_type: Option<SymbolId>,
    /// Interface members this method implements explicitly.
    pub explicit_interface_implementations: Vec<SymbolId>,
    /// Declaration locations.
    pub locations: Vec<SymbolLocation>,
}

impl MethodSymbol {
    /// An ordinary, non-async `void` method.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SymbolId(u32::MAX),
            name: name.into(),
            kind: MethodKind::Ordinary,
            is_async: false,
            is_override: false,
            is_abstract: false,
            is_extern: false,
            is_implicitly_declared: false,
            return_type: None,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            containing_type: None,
            explicit_interface_implementations: Vec::new(),
            locations: Vec::new(),
        }
    }

    /// A constructor symbol.
    #[must_use]
    pub fn constructor() -> Self {
        Self {
            kind: MethodKind::Constructor,
            ..Self::new(".ctor")
        }
    }

    /// Sets the method kind.
    #[must_use]
    pub fn with_kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the method `async`.
    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Sets the parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterSymbol>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the containing type.
    #[must_use]
    pub fn in_type(mut self, containing_type: SymbolId) -> Self {
        self.containing_type = Some(containing_type);
        self
    }

    /// Adds a source location.
    #[must_use]
    pub fn declared_at(mut self, file: impl Into<PathBuf>, span: Span) -> Self {
        self.locations.push(SymbolLocation::Source {
            file: file.into(),
            span,
        });
        self
    }
}

/// A resolved property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySymbol {
    /// Identity, assigned by the owning table.
    pub id: SymbolId,
    /// Property name.
    pub name: String,
    /// Declaring type.
    pub containing_type: SymbolId,
    /// Declared `static`.
    pub is_static: bool,
}

/// A resolved field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    /// Identity, assigned by the owning table.
    pub id: SymbolId,
    /// Field name.
    pub name: String,
    /// Declaring type.
    pub containing_type: SymbolId,
}

/// A resolved named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    /// Identity, assigned by the owning table.
    pub id: SymbolId,
    /// Containing namespace, empty for the global namespace.
    pub namespace: String,
    /// Simple name.
    pub name: String,
    /// Kind of type.
    pub kind: TypeKind,
    /// Directly declared interfaces.
    pub interfaces: Vec<SymbolId>,
    /// Declared members.
    pub members: Vec<SymbolId>,
}

impl TypeSymbol {
    /// Creates a type with no members.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            id: SymbolId(u32::MAX),
            namespace: namespace.into(),
            name: name.into(),
            kind,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Sets the directly declared interfaces.
    #[must_use]
    pub fn implementing(mut self, interfaces: Vec<SymbolId>) -> Self {
        self.interfaces = interfaces;
        self
    }

    /// Namespace-qualified name, e.g. `System.DateTime`.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Fully qualified name with the global alias, e.g. `global::System.DateTime`.
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        format!("global::{}", self.full_name())
    }
}

/// A resolved symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Symbol {
    Method(MethodSymbol),
    Property(PropertySymbol),
    Field(FieldSymbol),
    Type(TypeSymbol),
}

impl Symbol {
    /// Identity of the symbol.
    #[must_use]
    pub fn id(&self) -> SymbolId {
        match self {
            Self::Method(s) => s.id,
            Self::Property(s) => s.id,
            Self::Field(s) => s.id,
            Self::Type(s) => s.id,
        }
    }

    /// Simple name of the symbol.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Method(s) => &s.name,
            Self::Property(s) => &s.name,
            Self::Field(s) => &s.name,
            Self::Type(s) => &s.name,
        }
    }

    fn set_id(&mut self, id: SymbolId) {
        match self {
            Self::Method(s) => s.id = id,
            Self::Property(s) => s.id = id,
            Self::Field(s) => s.id = id,
            Self::Type(s) => s.id = id,
        }
    }

    fn containing_type(&self) -> Option<SymbolId> {
        match self {
            Self::Method(s) => s.containing_type,
            Self::Property(s) => Some(s.containing_type),
            Self::Field(s) => Some(s.containing_type),
            Self::Type(_) => None,
        }
    }
}

/// Symbol-resolution service supplied by the host.
///
/// Implementations must be safe to query from several threads at once;
/// the analyzer evaluates files in parallel.
pub trait SemanticModel: Send + Sync {
    /// Looks up a symbol by identity.
    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// Symbol declared by a declaration node.
    fn declared_symbol(&self, node: NodeId) -> Option<&Symbol>;

    /// Symbol an expression node refers to, if it resolves.
    fn referenced_symbol(&self, node: NodeId) -> Option<&Symbol>;

    /// Member of `ty` that implements `interface_member`, if any.
    fn find_implementation_for_interface_member(
        &self,
        ty: SymbolId,
        interface_member: SymbolId,
    ) -> Option<SymbolId>;

    /// Method declared by a declaration node.
    fn declared_method(&self, node: NodeId) -> Option<&MethodSymbol> {
        match self.declared_symbol(node)? {
            Symbol::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Looks up a named type by identity.
    fn type_symbol(&self, id: SymbolId) -> Option<&TypeSymbol> {
        match self.symbol(id)? {
            Symbol::Type(ty) => Some(ty),
            _ => None,
        }
    }
}

/// In-memory [`SemanticModel`].
///
/// Symbols are appended with the `add_*` methods, which assign identities
/// and register members with their containing type. Syntax nodes are then
/// bound with [`declare`](Self::declare) and [`reference`](Self::reference).
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    declarations: HashMap<NodeId, SymbolId>,
    references: HashMap<NodeId, SymbolId>,
    implementations: HashMap<(SymbolId, SymbolId), SymbolId>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, mut symbol: Symbol) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        symbol.set_id(id);
        if let Some(container) = symbol.containing_type() {
            if let Some(Symbol::Type(ty)) = self.symbols.get_mut(index(container)) {
                ty.members.push(id);
            }
        }
        self.symbols.push(symbol);
        id
    }

    /// Adds a named type.
    pub fn add_type(&mut self, ty: TypeSymbol) -> SymbolId {
        self.push(Symbol::Type(ty))
    }

    /// Adds a method and registers it with its containing type.
    pub fn add_method(&mut self, method: MethodSymbol) -> SymbolId {
        self.push(Symbol::Method(method))
    }

    /// Adds a property to `containing_type`.
    pub fn add_property(
        &mut self,
        containing_type: SymbolId,
        name: impl Into<String>,
        is_static: bool,
    ) -> SymbolId {
        self.push(Symbol::Property(PropertySymbol {
            id: SymbolId(u32::MAX),
            name: name.into(),
            containing_type,
            is_static,
        }))
    }

    /// Adds a field to `containing_type`.
    pub fn add_field(&mut self, containing_type: SymbolId, name: impl Into<String>) -> SymbolId {
        self.push(Symbol::Field(FieldSymbol {
            id: SymbolId(u32::MAX),
            name: name.into(),
            containing_type,
        }))
    }

    /// Binds a declaration node to the symbol it declares.
    pub fn declare(&mut self, node: NodeId, symbol: SymbolId) -> &mut Self {
        self.declarations.insert(node, symbol);
        self
    }

    /// Binds an expression node to the symbol it refers to.
    pub fn reference(&mut self, node: NodeId, symbol: SymbolId) -> &mut Self {
        self.references.insert(node, symbol);
        self
    }

    /// Records that `implementation` implements `interface_member` on `ty`.
    pub fn map_implementation(
        &mut self,
        ty: SymbolId,
        interface_member: SymbolId,
        implementation: SymbolId,
    ) -> &mut Self {
        self.implementations
            .insert((ty, interface_member), implementation);
        self
    }

    /// Number of symbols in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the table has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Finds an implicit implementation by matching name and arity among
    /// the type's own methods.
    fn match_by_signature(&self, ty: SymbolId, interface_member: SymbolId) -> Option<SymbolId> {
        let Some(Symbol::Method(wanted)) = self.symbol(interface_member) else {
            return None;
        };
        let ty = self.type_symbol(ty)?;
        ty.members.iter().copied().find(|id| {
            matches!(
                self.symbol(*id),
                Some(Symbol::Method(candidate))
                    if candidate.name == wanted.name
                        && candidate.parameters.len() == wanted.parameters.len()
                        && candidate.explicit_interface_implementations.is_empty()
            )
        })
    }
}

fn index(id: SymbolId) -> usize {
    usize::try_from(id.0).unwrap_or(usize::MAX)
}

impl SemanticModel for SymbolTable {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(index(id))
    }

    fn declared_symbol(&self, node: NodeId) -> Option<&Symbol> {
        self.declarations
            .get(&node)
            .and_then(|id| self.symbol(*id))
    }

    fn referenced_symbol(&self, node: NodeId) -> Option<&Symbol> {
        self.references.get(&node).and_then(|id| self.symbol(*id))
    }

    fn find_implementation_for_interface_member(
        &self,
        ty: SymbolId,
        interface_member: SymbolId,
    ) -> Option<SymbolId> {
        if let Some(implementation) = self.implementations.get(&(ty, interface_member)) {
            return Some(*implementation);
        }
        self.match_by_signature(ty, interface_member)
    }
}
