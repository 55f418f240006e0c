use apollo_compiler::ast;
use apollo_compiler::{Name, Node};
use std::fmt;
use std::sync::Arc;

/// Structure of a type definition (names and input signatures only)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDef {
    pub name: Arc<str>,
    pub kind: TypeDefKind,
    /// Input fields in declaration order (input objects only)
    pub fields: Vec<InputFieldSignature>,
    /// Enum value names in declaration order (enums only)
    pub enum_values: Vec<Arc<str>>,
    /// Whether this type was extracted from a type extension (`extend ...`)
    pub is_extension: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TypeDefKind {
    Object,
    Interface,
    Union,
    Enum,
    Scalar,
    InputObject,
}

/// Signature of an input object field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputFieldSignature {
    pub name: Arc<str>,
    pub type_ref: TypeRef,
}

/// Reference to a type at a usage site, with list and non-null wrappers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named { name: Arc<str>, non_null: bool },
    List { item: Box<TypeRef>, non_null: bool },
}

impl TypeRef {
    /// A nullable reference to a named type.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::Named {
            name: Arc::from(name),
            non_null: false,
        }
    }

    /// A nullable list wrapping `item`.
    #[must_use]
    pub fn list(item: Self) -> Self {
        Self::List {
            item: Box::new(item),
            non_null: false,
        }
    }

    /// The same reference with the non-null modifier applied.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::Named { name, .. } => Self::Named {
                name,
                non_null: true,
            },
            Self::List { item, .. } => Self::List {
                item,
                non_null: true,
            },
        }
    }

    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        match self {
            Self::Named { non_null, .. } | Self::List { non_null, .. } => *non_null,
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    /// Name of the innermost named type, e.g. `User` for `[User!]!`.
    #[must_use]
    pub fn inner_named_type(&self) -> &str {
        match self {
            Self::Named { name, .. } => name,
            Self::List { item, .. } => item.inner_named_type(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, .. } => write!(f, "{name}")?,
            Self::List { item, .. } => write!(f, "[{item}]")?,
        }
        if self.is_non_null() {
            write!(f, "!")?;
        }
        Ok(())
    }
}

/// Operation structure (name and variables, no selection set details)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationStructure {
    pub name: Option<Arc<str>>,
    pub operation_type: OperationType,
    pub variables: Vec<VariableSignature>,
    /// Position among the operations of its document
    pub index: usize,
}

impl OperationStructure {
    /// Name for display purposes; unnamed operations read as `(anonymous)`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(anonymous)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// Variable signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSignature {
    pub name: Arc<str>,
    pub type_ref: TypeRef,
}

/// Everything extracted from one parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStructure {
    pub type_defs: Vec<TypeDef>,
    pub operations: Vec<OperationStructure>,
}

/// Extract type definitions and operations from a parsed document.
/// Fragments, directives and schema definitions are skipped.
#[must_use]
pub fn document_structure(document: &ast::Document) -> DocumentStructure {
    let mut structure = DocumentStructure::default();

    for definition in &document.definitions {
        match definition {
            ast::Definition::OperationDefinition(op) => {
                let index = structure.operations.len();
                structure
                    .operations
                    .push(extract_operation_structure(op, index));
            }
            ast::Definition::ObjectTypeDefinition(obj) => {
                structure
                    .type_defs
                    .push(opaque_type(&obj.name, TypeDefKind::Object, false));
            }
            ast::Definition::InterfaceTypeDefinition(iface) => {
                structure
                    .type_defs
                    .push(opaque_type(&iface.name, TypeDefKind::Interface, false));
            }
            ast::Definition::UnionTypeDefinition(union_def) => {
                structure
                    .type_defs
                    .push(opaque_type(&union_def.name, TypeDefKind::Union, false));
            }
            ast::Definition::ScalarTypeDefinition(scalar) => {
                structure
                    .type_defs
                    .push(opaque_type(&scalar.name, TypeDefKind::Scalar, false));
            }
            ast::Definition::EnumTypeDefinition(enum_def) => {
                structure.type_defs.push(extract_enum_type(
                    &enum_def.name,
                    &enum_def.values,
                    false,
                ));
            }
            ast::Definition::InputObjectTypeDefinition(input) => {
                structure.type_defs.push(extract_input_object_type(
                    &input.name,
                    &input.fields,
                    false,
                ));
            }
            // Extensions are merged into their base type by `SchemaTypes`
            ast::Definition::ObjectTypeExtension(ext) => {
                structure
                    .type_defs
                    .push(opaque_type(&ext.name, TypeDefKind::Object, true));
            }
            ast::Definition::InterfaceTypeExtension(ext) => {
                structure
                    .type_defs
                    .push(opaque_type(&ext.name, TypeDefKind::Interface, true));
            }
            ast::Definition::UnionTypeExtension(ext) => {
                structure
                    .type_defs
                    .push(opaque_type(&ext.name, TypeDefKind::Union, true));
            }
            ast::Definition::ScalarTypeExtension(ext) => {
                structure
                    .type_defs
                    .push(opaque_type(&ext.name, TypeDefKind::Scalar, true));
            }
            ast::Definition::EnumTypeExtension(ext) => {
                structure
                    .type_defs
                    .push(extract_enum_type(&ext.name, &ext.values, true));
            }
            ast::Definition::InputObjectTypeExtension(ext) => {
                structure
                    .type_defs
                    .push(extract_input_object_type(&ext.name, &ext.fields, true));
            }
            _ => {}
        }
    }

    structure
}

fn extract_operation_structure(
    op: &Node<ast::OperationDefinition>,
    index: usize,
) -> OperationStructure {
    let name = op.name.as_ref().map(|n| Arc::from(n.as_str()));

    let operation_type = match op.operation_type {
        ast::OperationType::Query => OperationType::Query,
        ast::OperationType::Mutation => OperationType::Mutation,
        ast::OperationType::Subscription => OperationType::Subscription,
    };

    let variables = op
        .variables
        .iter()
        .map(|v| VariableSignature {
            name: Arc::from(v.name.as_str()),
            type_ref: extract_type_ref(&v.ty),
        })
        .collect();

    OperationStructure {
        name,
        operation_type,
        variables,
        index,
    }
}

fn opaque_type(name: &Name, kind: TypeDefKind, is_extension: bool) -> TypeDef {
    TypeDef {
        name: Arc::from(name.as_str()),
        kind,
        fields: Vec::new(),
        enum_values: Vec::new(),
        is_extension,
    }
}

fn extract_enum_type(
    name: &Name,
    values: &[Node<ast::EnumValueDefinition>],
    is_extension: bool,
) -> TypeDef {
    TypeDef {
        enum_values: values.iter().map(|v| Arc::from(v.value.as_str())).collect(),
        ..opaque_type(name, TypeDefKind::Enum, is_extension)
    }
}

fn extract_input_object_type(
    name: &Name,
    fields: &[Node<ast::InputValueDefinition>],
    is_extension: bool,
) -> TypeDef {
    TypeDef {
        fields: fields
            .iter()
            .map(|f| InputFieldSignature {
                name: Arc::from(f.name.as_str()),
                type_ref: extract_type_ref(&f.ty),
            })
            .collect(),
        ..opaque_type(name, TypeDefKind::InputObject, is_extension)
    }
}

/// Convert an AST type into a `TypeRef`, keeping every list and non-null wrapper.
#[must_use]
pub fn extract_type_ref(ty: &ast::Type) -> TypeRef {
    match ty {
        ast::Type::Named(name) => TypeRef::Named {
            name: Arc::from(name.as_str()),
            non_null: false,
        },
        ast::Type::NonNullNamed(name) => TypeRef::Named {
            name: Arc::from(name.as_str()),
            non_null: true,
        },
        ast::Type::List(inner) => TypeRef::List {
            item: Box::new(extract_type_ref(inner)),
            non_null: false,
        },
        ast::Type::NonNullList(inner) => TypeRef::List {
            item: Box::new(extract_type_ref(inner)),
            non_null: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> DocumentStructure {
        let document = ast::Document::parse(source, "test.graphql").unwrap();
        document_structure(&document)
    }

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef::list(TypeRef::named("String").non_null()).non_null();
        assert_eq!(ty.to_string(), "[String!]!");
        assert_eq!(TypeRef::named("ID").to_string(), "ID");
    }

    #[test]
    fn test_type_ref_inner_named_type() {
        let ty = TypeRef::list(TypeRef::list(TypeRef::named("User")));
        assert_eq!(ty.inner_named_type(), "User");
        assert!(ty.is_list());
        assert!(!ty.is_non_null());
    }

    #[test]
    fn test_extract_nested_list_type() {
        let structure = parse("query Q($ids: [[ID!]]!) { node }");
        let var = &structure.operations[0].variables[0];
        assert_eq!(var.name.as_ref(), "ids");
        assert_eq!(
            var.type_ref,
            TypeRef::list(TypeRef::list(TypeRef::named("ID").non_null())).non_null()
        );
    }

    #[test]
    fn test_extract_enum_values_in_order() {
        let structure = parse("enum Color { RED GREEN BLUE }");
        let color = &structure.type_defs[0];
        assert_eq!(color.kind, TypeDefKind::Enum);
        let values: Vec<&str> = color.enum_values.iter().map(AsRef::as_ref).collect();
        assert_eq!(values, ["RED", "GREEN", "BLUE"]);
    }

    #[test]
    fn test_extract_input_object_fields() {
        let structure = parse("input Filter { name: String!, limit: Int }");
        let filter = &structure.type_defs[0];
        assert_eq!(filter.kind, TypeDefKind::InputObject);
        assert_eq!(filter.fields.len(), 2);
        assert_eq!(filter.fields[0].name.as_ref(), "name");
        assert!(filter.fields[0].type_ref.is_non_null());
        assert!(!filter.fields[1].type_ref.is_non_null());
    }

    #[test]
    fn test_extract_operations_keep_declaration_order() {
        let structure = parse(
            "{ a }\nquery GetUser($id: ID!) { user(id: $id) { id } }\nmutation Save { save }",
        );
        assert_eq!(structure.operations.len(), 3);
        assert_eq!(structure.operations[0].name, None);
        assert_eq!(structure.operations[0].operation_type, OperationType::Query);
        assert_eq!(structure.operations[1].display_name(), "GetUser");
        assert_eq!(structure.operations[2].index, 2);
        assert_eq!(
            structure.operations[2].operation_type,
            OperationType::Mutation
        );
    }

    #[test]
    fn test_extensions_are_marked() {
        let structure = parse("extend enum Color { PURPLE }");
        assert!(structure.type_defs[0].is_extension);
    }
}
