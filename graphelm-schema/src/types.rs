//! Schema type definitions.
//!
//! This module contains the data structures representing a GraphQL server
//! schema: scalars, objects, interfaces, unions, enums and input objects.

use graphelm_core::{BuiltinScalar, TypeRef};
use std::collections::HashMap;

/// Complete GraphQL schema definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Name of the query root type.
    pub query_type: String,
    /// Name of the mutation root type, if any.
    pub mutation_type: Option<String>,
    /// Name of the subscription root type, if any.
    pub subscription_type: Option<String>,
    /// Type definitions in declaration order.
    pub types: Vec<TypeDef>,
    /// Type lookup map (built during parsing).
    type_map: HashMap<String, usize>,
}

impl Schema {
    /// Creates a new schema containing only the built-in scalars.
    #[must_use]
    pub fn new(query_type: impl Into<String>) -> Self {
        let mut schema = Self {
            query_type: query_type.into(),
            mutation_type: None,
            subscription_type: None,
            types: Vec::new(),
            type_map: HashMap::new(),
        };
        for scalar in BuiltinScalar::ALL {
            schema.add_type(TypeDef::Scalar(ScalarDef::new(scalar.graphql_name())));
        }
        schema
    }

    /// Adds a type definition to the schema.
    ///
    /// A definition with an existing name replaces the previous one.
    pub fn add_type(&mut self, type_def: TypeDef) {
        let name = type_def.name().to_string();
        if let Some(&index) = self.type_map.get(&name) {
            self.types[index] = type_def;
            return;
        }
        let index = self.types.len();
        self.types.push(type_def);
        self.type_map.insert(name, index);
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Looks up a type by name for in-place modification.
    pub fn get_type_mut(&mut self, name: &str) -> Option<&mut TypeDef> {
        match self.type_map.get(name) {
            Some(&idx) => Some(&mut self.types[idx]),
            None => None,
        }
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }

    /// Looks up an object or interface type by name.
    #[must_use]
    pub fn get_object(&self, name: &str) -> Option<&ObjectDef> {
        match self.get_type(name)? {
            TypeDef::Object(obj) | TypeDef::Interface(obj) => Some(obj),
            _ => None,
        }
    }

    /// Iterates over all union definitions.
    pub fn unions(&self) -> impl Iterator<Item = &UnionDef> {
        self.types.iter().filter_map(|type_def| match type_def {
            TypeDef::Union(union_def) => Some(union_def),
            _ => None,
        })
    }

    /// Builds the type lookup map from the types vector.
    pub fn build_type_map(&mut self) {
        self.type_map.clear();
        for (idx, type_def) in self.types.iter().enumerate() {
            self.type_map.insert(type_def.name().to_string(), idx);
        }
    }
}

/// Type definition variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    /// Scalar type definition.
    Scalar(ScalarDef),
    /// Object type definition.
    Object(ObjectDef),
    /// Interface type definition.
    Interface(ObjectDef),
    /// Union type definition.
    Union(UnionDef),
    /// Enum type definition.
    Enum(EnumDef),
    /// Input object type definition.
    InputObject(InputObjectDef),
}

impl TypeDef {
    /// Returns the name of the type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(s) => &s.name,
            Self::Object(o) | Self::Interface(o) => &o.name,
            Self::Union(u) => &u.name,
            Self::Enum(e) => &e.name,
            Self::InputObject(i) => &i.name,
        }
    }

    /// Returns the kind name, as used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Interface(_) => "interface",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input object",
        }
    }

    /// Returns true if values of this type are leaves (scalar or enum).
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_))
    }

    /// Returns true if this is an object type.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true if this is a union type.
    #[must_use]
    pub const fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }
}

/// Scalar type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarDef {
    /// Type name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

impl ScalarDef {
    /// Creates a new scalar definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Returns the built-in scalar this definition corresponds to, if any.
    #[must_use]
    pub fn builtin(&self) -> Option<BuiltinScalar> {
        BuiltinScalar::from_name(&self.name)
    }
}

/// Object or interface type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDef {
    /// Type name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
    /// Implemented interfaces.
    pub interfaces: Vec<String>,
    /// Description.
    pub description: Option<String>,
}

impl ObjectDef {
    /// Creates a new object definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            interfaces: Vec::new(),
            description: None,
        }
    }

    /// Adds a field to the object.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Output field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field type.
    pub field_type: TypeRef,
    /// Arguments.
    pub arguments: Vec<InputValueDef>,
    /// Description.
    pub description: Option<String>,
    /// Deprecation reason, if deprecated.
    pub deprecation: Option<String>,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            field_type,
            arguments: Vec::new(),
            description: None,
            deprecation: None,
        }
    }
}

/// Argument or input object field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValueDef {
    /// Name.
    pub name: String,
    /// Type.
    pub value_type: TypeRef,
    /// Default value, as GraphQL text.
    pub default_value: Option<String>,
}

impl InputValueDef {
    /// Creates a new input value definition.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            value_type,
            default_value: None,
        }
    }
}

/// Union type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDef {
    /// Type name.
    pub name: String,
    /// Member object type names, in declaration order.
    pub members: Vec<String>,
    /// Description.
    pub description: Option<String>,
}

impl UnionDef {
    /// Creates a new union definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            description: None,
        }
    }

    /// Returns true if the named type is a member of the union.
    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

/// Enum type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// Type name.
    pub name: String,
    /// Valid values.
    pub values: Vec<EnumValue>,
    /// Description.
    pub description: Option<String>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            description: None,
        }
    }

    /// Adds a value to the enum.
    pub fn add_value(&mut self, value: EnumValue) {
        self.values.push(value);
    }

    /// Returns the value names in declaration order.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.name.as_str())
    }
}

/// Enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Deprecation reason, if deprecated.
    pub deprecation: Option<String>,
}

impl EnumValue {
    /// Creates a new enum value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation: None,
        }
    }
}

/// Input object type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectDef {
    /// Type name.
    pub name: String,
    /// Input fields in declaration order.
    pub fields: Vec<InputValueDef>,
    /// Description.
    pub description: Option<String>,
}

impl InputObjectDef {
    /// Creates a new input object definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_schema_has_builtin_scalars() {
        let schema = Schema::new("Query");
        for name in ["Int", "Float", "String", "Boolean", "ID"] {
            assert!(schema.has_type(name), "missing {name}");
        }
        assert!(!schema.has_type("DateTime"));
    }

    #[test]
    fn test_add_type_replaces_existing() {
        let mut schema = Schema::new("Query");
        let mut first = ObjectDef::new("Query");
        first.add_field(FieldDef::new("a", TypeRef::named("Int")));
        schema.add_type(TypeDef::Object(first));
        let count = schema.types.len();

        let mut second = ObjectDef::new("Query");
        second.add_field(FieldDef::new("b", TypeRef::named("Int")));
        schema.add_type(TypeDef::Object(second));

        assert_eq!(schema.types.len(), count);
        let query = schema.get_object("Query").expect("Query");
        assert!(query.field("b").is_some());
        assert!(query.field("a").is_none());
    }

    #[test]
    fn test_type_def_kinds() {
        let union_def = TypeDef::Union(UnionDef::new("SearchResult"));
        assert!(union_def.is_union());
        assert_eq!(union_def.kind(), "union");
        assert!(TypeDef::Enum(EnumDef::new("Episode")).is_leaf());
        assert!(!TypeDef::Object(ObjectDef::new("User")).is_leaf());
        assert_eq!(TypeDef::InputObject(InputObjectDef::new("In")).kind(), "input object");
    }

    #[test]
    fn test_union_membership() {
        let mut union_def = UnionDef::new("SearchResult");
        union_def.members.push("Human".to_string());
        assert!(union_def.has_member("Human"));
        assert!(!union_def.has_member("Droid"));
    }

    #[test]
    fn test_scalar_builtin() {
        assert_eq!(ScalarDef::new("ID").builtin(), Some(BuiltinScalar::Id));
        assert_eq!(ScalarDef::new("DateTime").builtin(), None);
    }

    #[test]
    fn test_build_type_map() {
        let mut schema = Schema::new("Query");
        schema.types.push(TypeDef::Enum(EnumDef::new("Episode")));
        assert!(!schema.has_type("Episode"));
        schema.build_type_map();
        assert!(schema.has_type("Episode"));
    }
}
