//! Syntax-node input surface — the enumerated node kinds the inference
//! pipeline dispatches over.
//!
//! Extractors attach one `Node` to each parsed comment: the declaration
//! (or statement) the comment annotates, with the surrounding facts the
//! pipeline needs (enclosing class name, object-literal key chain,
//! resolved `this` binding) already carried on the variant. The tree is
//! opaque beyond these shapes.

use crate::types::{Field, TypeExpr};

/// Declaration keyword of a variable statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

/// A syntax node, reduced to the shapes the pipeline inspects.
#[derive(Debug, Clone)]
pub enum Node {
    /// `export <declaration>` — may be a bare re-export with no declaration.
    ExportNamed { declaration: Option<Box<Node>> },
    /// `export default <declaration>`.
    ExportDefault { declaration: Box<Node> },
    /// `var|let|const a = ..., b = ...` — declarators are `Node::Declarator`.
    Variable {
        kind: VariableKind,
        declarators: Vec<Node>,
    },
    /// One declarator of a variable statement.
    Declarator {
        name: String,
        ty: Option<TypeExpr>,
        init: Option<Box<Node>>,
    },
    /// Function declaration, expression, arrow, or method body.
    Function(FunctionNode),
    /// Class declaration or expression.
    Class(ClassNode),
    /// One member of a class body, annotated with its class's bound name
    /// (`None` for anonymous default-export classes).
    ClassMember {
        class_name: Option<String>,
        member: ClassMemberNode,
    },
    /// A property of an object literal, annotated with where that literal
    /// sits: enclosing literal keys and the literal's own binding.
    ObjectProperty {
        key: String,
        value: Box<Node>,
        container: ObjectContainer,
    },
    /// An assignment statement, `target = value`.
    Assignment {
        target: AssignTarget,
        value: Box<Node>,
    },
    /// `type Name = T`.
    TypeAlias { name: String, ty: TypeExpr },
    /// `interface Name extends A, B { ... }` — extends entries are kept
    /// verbatim as source text (they may be dotted references).
    Interface {
        name: String,
        extends: Vec<String>,
        fields: Vec<Field>,
    },
    /// `enum Name { ... }`.
    Enum { name: String },
    /// One member of an enum, annotated with the enclosing enum name.
    EnumMember { name: String, parent: String },
    Boolean(bool),
    Number(f64),
    String(String),
    /// Any expression shape the pipeline has no checks for.
    Other,
}

/// A function-like node.
#[derive(Debug, Clone, Default)]
pub struct FunctionNode {
    /// Bound name, if the function declaration/expression has one.
    pub name: Option<String>,
    pub params: Vec<Pattern>,
    pub return_type: Option<TypeExpr>,
    pub is_generator: bool,
    pub is_async: bool,
    /// Getter/setter syntax classifies as `member` regardless of name.
    pub accessor: Option<Accessor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Getter,
    Setter,
}

/// A class declaration or expression.
#[derive(Debug, Clone, Default)]
pub struct ClassNode {
    pub name: Option<String>,
    /// Superclass expression, verbatim source text (`React.Component`).
    pub superclass: Option<String>,
    /// Implemented interfaces, verbatim source text.
    pub implements: Vec<String>,
    pub members: Vec<ClassMemberNode>,
}

impl ClassNode {
    /// The constructor's parameter patterns, if the class declares one.
    pub fn constructor_params(&self) -> Option<&[Pattern]> {
        self.members
            .iter()
            .find(|m| m.kind == ClassMemberKind::Constructor)
            .and_then(|m| m.function.as_ref())
            .map(|f| f.params.as_slice())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMemberKind {
    Constructor,
    Method,
    Getter,
    Setter,
    Property,
}

/// One member of a class body.
#[derive(Debug, Clone)]
pub struct ClassMemberNode {
    pub kind: ClassMemberKind,
    pub key: String,
    pub is_static: bool,
    /// TypeScript accessibility modifier, if written.
    pub accessibility: Option<crate::model::Access>,
    pub readonly: bool,
    /// Declared type of a property member.
    pub ty: Option<TypeExpr>,
    /// The method body for function-shaped members.
    pub function: Option<FunctionNode>,
    /// The initializer of a property member, if present.
    pub init: Option<Box<Node>>,
}

impl ClassMemberNode {
    pub fn property(key: &str, ty: Option<TypeExpr>) -> ClassMemberNode {
        ClassMemberNode {
            kind: ClassMemberKind::Property,
            key: key.to_string(),
            is_static: false,
            accessibility: None,
            readonly: false,
            ty,
            function: None,
            init: None,
        }
    }

    pub fn method(key: &str, function: FunctionNode) -> ClassMemberNode {
        ClassMemberNode {
            kind: ClassMemberKind::Method,
            key: key.to_string(),
            is_static: false,
            accessibility: None,
            readonly: false,
            ty: None,
            function: Some(function),
            init: None,
        }
    }
}

/// Left-hand side of an assignment: an optional resolved `this` receiver
/// followed by the dotted identifier path.
///
/// `Foo.prototype.bar = …` is `{ this_binding: None, path: [Foo, prototype, bar] }`;
/// `this.bar = …` inside `function Foo()` is
/// `{ this_binding: Some(Function("Foo")), path: [bar] }`.
#[derive(Debug, Clone)]
pub struct AssignTarget {
    pub this_binding: Option<ThisBinding>,
    pub path: Vec<String>,
}

impl AssignTarget {
    pub fn path(segments: &[&str]) -> AssignTarget {
        AssignTarget {
            this_binding: None,
            path: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn this(binding: ThisBinding, segments: &[&str]) -> AssignTarget {
        AssignTarget {
            this_binding: Some(binding),
            path: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// What `this` resolves to at an assignment site, as determined by the
/// extractor from enclosing scopes.
#[derive(Debug, Clone)]
pub enum ThisBinding {
    /// Inside a named function declaration or expression.
    Function(String),
    /// Inside an anonymous function bound to a variable declarator.
    Variable(String),
    /// Inside a function assigned to a dotted target.
    AssignmentTarget(Vec<String>),
    /// Inside a method of a class with the given bound name.
    ClassMethod(String),
    /// Inside an unnamed default-export constructor — owner is the module.
    DefaultExport,
}

/// Where an object literal containing a documented property sits.
#[derive(Debug, Clone)]
pub struct ObjectContainer {
    /// Key chain of enclosing literals, outermost first, excluding the
    /// documented property's own key.
    pub keys: Vec<String>,
    pub binding: ObjectBinding,
    /// A redirect (`@lends`) annotation on the literal overrides the
    /// binding-derived prefix outright.
    pub lends: Option<String>,
}

impl ObjectContainer {
    pub fn variable(name: &str) -> ObjectContainer {
        ObjectContainer {
            keys: Vec::new(),
            binding: ObjectBinding::Variable(name.to_string()),
            lends: None,
        }
    }
}

/// How the object literal itself is bound.
#[derive(Debug, Clone)]
pub enum ObjectBinding {
    /// `var Foo = { ... }`.
    Variable(String),
    /// `Foo.bar = { ... }` — the dotted target identifiers.
    AssignmentTarget(Vec<String>),
    /// `export default { ... }` — owner is the module.
    DefaultExport,
    /// The literal is the body of a named type alias or interface.
    TypeName(String),
    /// No binding could be resolved.
    Unbound,
}

/// A formal-parameter pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// A plain named parameter, `(a)` or `(a: T)`.
    Identifier { name: String, ty: Option<TypeExpr> },
    /// An object destructuring pattern, `({ a, b: { c } })`.
    Object {
        properties: Vec<PatternProperty>,
        ty: Option<TypeExpr>,
    },
    /// An array destructuring pattern, `([a, , b])`.
    Array {
        elements: Vec<Option<Pattern>>,
        ty: Option<TypeExpr>,
    },
    /// A defaulted parameter, `(a = expr)` — the default is kept verbatim
    /// as source text.
    Assignment {
        left: Box<Pattern>,
        default_source: String,
    },
    /// A rest parameter, `(...rest)`.
    Rest { name: String, ty: Option<TypeExpr> },
}

impl Pattern {
    pub fn ident(name: &str) -> Pattern {
        Pattern::Identifier {
            name: name.to_string(),
            ty: None,
        }
    }
}

/// One property of an object destructuring pattern.
#[derive(Debug, Clone)]
pub struct PatternProperty {
    pub key: String,
    pub value: Pattern,
}

impl PatternProperty {
    pub fn shorthand(name: &str) -> PatternProperty {
        PatternProperty {
            key: name.to_string(),
            value: Pattern::ident(name),
        }
    }
}

impl Node {
    /// Resolve a node to its function shape, looking through declarators
    /// and class members. Used by parameter and return inference.
    pub fn as_function(&self) -> Option<&FunctionNode> {
        match self {
            Node::Function(f) => Some(f),
            Node::Declarator {
                init: Some(init), ..
            } => init.as_function(),
            Node::ClassMember { member, .. } => member.function.as_ref(),
            _ => None,
        }
    }
}
