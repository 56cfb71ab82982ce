//! Kind inference — classify the annotated declaration by syntax shape.

use crate::ast::{ClassMemberKind, Node, VariableKind};
use crate::model::{Comment, Kind};

pub fn infer_kind(comment: &mut Comment) {
    if comment.kind.is_some() {
        return;
    }
    comment.kind = comment.context.node.as_ref().and_then(find_kind);
}

fn find_kind(node: &Node) -> Option<Kind> {
    match node {
        Node::Class(_) => Some(Kind::Class),
        Node::Function(f) => {
            if f.accessor.is_some() {
                Some(Kind::Member)
            } else if starts_uppercase(f.name.as_deref()) {
                Some(Kind::Class)
            } else {
                Some(Kind::Function)
            }
        }
        Node::TypeAlias { .. } => Some(Kind::Typedef),
        Node::Interface { .. } => Some(Kind::Interface),
        Node::Enum { .. } => Some(Kind::Enum),
        Node::EnumMember { .. } => Some(Kind::Member),
        Node::Variable {
            kind: VariableKind::Const,
            ..
        } => Some(Kind::Constant),
        Node::Variable { declarators, .. } => declarators.first().and_then(find_kind),
        Node::Declarator {
            init: Some(init), ..
        } => find_kind(init),
        Node::ExportNamed {
            declaration: Some(d),
        } => find_kind(d),
        Node::ExportDefault { declaration } => find_kind(declaration),
        Node::Assignment { value, .. } => find_kind(value),
        Node::ObjectProperty { value, .. } => find_kind(value),
        Node::ClassMember { member, .. } => match member.kind {
            ClassMemberKind::Property | ClassMemberKind::Getter | ClassMemberKind::Setter => {
                Some(Kind::Member)
            }
            ClassMemberKind::Method | ClassMemberKind::Constructor => Some(Kind::Function),
        },
        _ => None,
    }
}

fn starts_uppercase(name: Option<&str>) -> bool {
    name.and_then(|n| n.chars().next())
        .map_or(false, |c| c.is_ascii_uppercase())
}
