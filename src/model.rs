//! Data model for the documentation pipeline — comments, tags, and the
//! assembled member tree.

use crate::ast::Node;
use crate::types::TypeExpr;
use serde::Serialize;

/// Category of a documented entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Function,
    Class,
    Member,
    Constant,
    Module,
    Namespace,
    Typedef,
    Interface,
    Event,
    External,
    File,
    Mixin,
    Enum,
}

impl Kind {
    /// Parse a kind name as written in a tag, `@kind class` or the
    /// shorthand `@class`.
    pub fn parse(s: &str) -> Option<Kind> {
        Some(match s {
            "function" => Kind::Function,
            "class" => Kind::Class,
            "member" => Kind::Member,
            "constant" => Kind::Constant,
            "module" => Kind::Module,
            "namespace" => Kind::Namespace,
            "typedef" => Kind::Typedef,
            "interface" => Kind::Interface,
            "event" => Kind::Event,
            "external" => Kind::External,
            "file" => Kind::File,
            "mixin" => Kind::Mixin,
            "enum" => Kind::Enum,
            _ => return None,
        })
    }
}

/// Relationship of an entity to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Static,
    Instance,
    Inner,
    Global,
}

/// Visibility of an entity. Absent means public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Private,
    Protected,
}

impl Access {
    pub fn parse(s: &str) -> Option<Access> {
        Some(match s {
            "public" => Access::Public,
            "private" => Access::Private,
            "protected" => Access::Protected,
            _ => return None,
        })
    }
}

/// One parsed annotation inside a documentation comment. A dotted `name`
/// encodes nesting; `[]` before a dot marks "element of an array-valued
/// parent" without adding a tree level. `properties` is populated by
/// nesting and parameter inference, turning tags into trees.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tag {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeExpr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Tag>,
    /// Synthetic ordinal name pending possible explicit renaming.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub anonymous: bool,
}

impl Tag {
    pub fn new(title: &str, name: Option<&str>) -> Tag {
        Tag {
            title: title.to_string(),
            name: name.map(|n| n.to_string()),
            ..Tag::default()
        }
    }

    pub fn with_type(title: &str, name: Option<&str>, ty: TypeExpr) -> Tag {
        Tag {
            ty: Some(ty),
            ..Tag::new(title, name)
        }
    }
}

/// A recovered problem, accumulated on the owning comment rather than
/// raised to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_line_number: Option<u32>,
}

impl CommentError {
    pub fn new(message: String) -> CommentError {
        CommentError {
            message,
            comment_line_number: None,
        }
    }

    pub fn at_line(message: String, line: Option<u32>) -> CommentError {
        CommentError {
            message,
            comment_line_number: line,
        }
    }
}

/// Where a comment came from: source file, cross-file sort key, and a
/// back-reference to the annotated declaration. The node reference is
/// discarded once inference finishes.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub file: String,
    /// Monotonic, cross-file stable-sort key. Drives both output ordering
    /// and the module-tracking state in membership inference.
    pub sort_key: String,
    pub node: Option<Node>,
}

impl Context {
    /// Base name of the source file, without directories or extension.
    /// The fallback name for modules and unnamed default exports.
    pub fn file_stem(&self) -> String {
        let base = self.file.rsplit('/').next().unwrap_or(&self.file);
        match base.rfind('.') {
            Some(0) | None => base.to_string(),
            Some(i) => base[..i].to_string(),
        }
    }
}

/// Post-assembly members of a comment, one ordered list per scope.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Members {
    pub global: Vec<Comment>,
    pub inner: Vec<Comment>,
    pub instance: Vec<Comment>,
    pub events: Vec<Comment>,
    #[serde(rename = "static")]
    pub static_: Vec<Comment>,
}

/// One step of a root-to-self ownership chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSegment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

/// One documented declaration. Built by an extractor (directly or via
/// [`Comment::from_tags`]), mutated in place by each inference module —
/// one module owns one aspect, and explicit annotation always beats
/// inference — then nested into an owner tree by hierarchy assembly.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Comment {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memberof: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub readonly: bool,
    #[serde(skip)]
    pub alias: Option<String>,
    #[serde(skip)]
    pub lends: Option<String>,
    #[serde(skip)]
    pub hideconstructor: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub yields: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub augments: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub todos: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sees: Vec<Tag>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeExpr>,
    pub errors: Vec<CommentError>,
    #[serde(skip)]
    pub context: Context,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Members>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Comment {
    /// A comment with no tags, attached to `node`.
    pub fn on_node(node: Node, file: &str, sort_key: &str) -> Comment {
        Comment {
            context: Context {
                file: file.to_string(),
                sort_key: sort_key.to_string(),
                node: Some(node),
            },
            ..Comment::default()
        }
    }

    /// Distribute a tag list into typed fields. Tags are canonicalized
    /// first, so synonyms like `@return` or `@arg` land in the right
    /// place. Unknown titles are kept in `tags` and otherwise ignored.
    pub fn from_tags(tags: Vec<Tag>, context: Context) -> Comment {
        let tags = crate::normalize::normalize_tags(tags);
        let mut comment = Comment {
            context,
            ..Comment::default()
        };

        for tag in &tags {
            let title = tag.title.as_str();
            match title {
                "name" => comment.name = tag.name.clone(),
                "alias" => comment.alias = tag.name.clone(),
                "memberof" => {
                    comment.memberof = tag.name.clone().or_else(|| tag.description.clone())
                }
                "lends" => comment.lends = tag.name.clone().or_else(|| tag.description.clone()),
                "kind" => {
                    comment.kind = tag
                        .name
                        .as_deref()
                        .or(tag.description.as_deref())
                        .and_then(Kind::parse)
                }
                "access" => {
                    comment.access = tag
                        .name
                        .as_deref()
                        .or(tag.description.as_deref())
                        .and_then(Access::parse)
                }
                "public" | "private" | "protected" => comment.access = Access::parse(title),
                "static" => comment.scope = Some(Scope::Static),
                "instance" => comment.scope = Some(Scope::Instance),
                "inner" => comment.scope = Some(Scope::Inner),
                "global" => comment.scope = Some(Scope::Global),
                "readonly" => comment.readonly = true,
                "hideconstructor" => comment.hideconstructor = true,
                "description" => {
                    if comment.description.is_none() {
                        comment.description = tag.description.clone();
                    }
                }
                "param" => comment.params.push(tag.clone()),
                "property" => comment.properties.push(tag.clone()),
                "returns" => comment.returns.push(tag.clone()),
                "yields" => comment.yields.push(tag.clone()),
                "augments" => comment.augments.push(tag.clone()),
                "implements" => comment.implements.push(tag.clone()),
                "example" => comment.examples.push(tag.clone()),
                "throws" => comment.throws.push(tag.clone()),
                "todo" => comment.todos.push(tag.clone()),
                "see" => comment.sees.push(tag.clone()),
                "type" => comment.ty = tag.ty.clone(),
                _ => {
                    // Kind shorthands: @class, @module, @typedef Name, ...
                    if let Some(kind) = Kind::parse(title) {
                        if comment.kind.is_none() {
                            comment.kind = Some(kind);
                        }
                        if comment.name.is_none() && tag.name.is_some() {
                            comment.name = tag.name.clone();
                        }
                    }
                }
            }
        }

        comment.tags = tags;
        comment
    }

    /// Whether an explicit `@name` tag is present. Explicit names ask for
    /// membership inference to be skipped entirely.
    pub fn has_name_tag(&self) -> bool {
        self.tags.iter().any(|t| t.title == "name")
    }

    /// Line number of the `@memberof` tag, for error reporting.
    pub fn memberof_tag_line(&self) -> Option<u32> {
        self.tags
            .iter()
            .find(|t| t.title == "memberof")
            .and_then(|t| t.line_number)
    }
}
