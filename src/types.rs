//! Shared type-descriptor format — a tagged union passed through, not
//! interpreted, by the inference core. Extractors produce it from source
//! type annotations; renderers format it.

use serde::Serialize;

/// A type expression attached to a parameter, property, return value or
/// declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TypeExpr {
    /// A reference by name, like `Point` or `number`.
    Name { name: String },
    /// A union of alternatives, like `string | number`.
    Union { elements: Vec<TypeExpr> },
    /// An optional type, like `?number` or a `foo?:` field.
    Optional { expression: Box<TypeExpr> },
    /// A rest/variadic marker, with an optional element type.
    Rest { expression: Option<Box<TypeExpr>> },
    /// A function type with parameter types and an optional result.
    Function {
        params: Vec<TypeExpr>,
        result: Option<Box<TypeExpr>>,
    },
    /// A record/object type with named fields.
    Record { fields: Vec<Field> },
    /// A fixed-element array type, like `[string, number]`.
    Array { elements: Vec<TypeExpr> },
    /// A generic application, like `Generator<A, B, C>`.
    Application { name: String, args: Vec<TypeExpr> },
    StringLiteral { value: String },
    NumberLiteral { value: f64 },
    BooleanLiteral { value: bool },
    Null,
    Void,
    Undefined,
    /// The top type — `any` / `*`.
    Any,
}

impl TypeExpr {
    /// Convenience constructor for the most common case.
    pub fn name(name: &str) -> TypeExpr {
        TypeExpr::Name {
            name: name.to_string(),
        }
    }
}

/// One named field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: TypeExpr,
    /// `foo?: T` style fields; inference wraps these in `Optional`.
    pub optional: bool,
}

impl Field {
    pub fn new(key: &str, value: TypeExpr) -> Field {
        Field {
            key: key.to_string(),
            value,
            optional: false,
        }
    }
}
