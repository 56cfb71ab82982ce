//! Declared-type inference for members, constants and type aliases.
//! Constants without an annotation fall back to the type of their
//! literal initializer.

use crate::ast::Node;
use crate::finder::find_target;
use crate::model::{Comment, Kind};
use crate::types::TypeExpr;

pub fn infer_type(comment: &mut Comment) {
    if comment.ty.is_some() {
        return;
    }

    let kind = comment.kind;
    let inferred = match find_target(comment.context.node.as_ref()) {
        Some(Node::TypeAlias { ty, .. }) => Some(ty.clone()),
        Some(Node::Declarator { ty, init, .. }) => ty
            .clone()
            .or_else(|| constant_literal(kind, init.as_deref())),
        // Annotated class property with no initializer; the finder only
        // unwraps initialized properties.
        Some(Node::ClassMember { member, .. }) => member.ty.clone(),
        _ => None,
    };

    if inferred.is_some() {
        comment.ty = inferred;
    }
}

/// The type of a constant's literal initializer.
fn constant_literal(kind: Option<Kind>, init: Option<&Node>) -> Option<TypeExpr> {
    if kind != Some(Kind::Constant) {
        return None;
    }
    match init? {
        Node::Number(_) => Some(TypeExpr::name("number")),
        Node::String(_) => Some(TypeExpr::name("string")),
        Node::Boolean(_) => Some(TypeExpr::name("boolean")),
        _ => None,
    }
}
