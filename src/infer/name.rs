//! Name inference — depth-first search for the first identifier or
//! string key in the annotated node, preferring an assignment target's
//! final segment over its object.

use crate::ast::Node;
use crate::model::{Comment, Kind};

/// Infer a name from the context when no `@name`/shorthand set one.
pub fn infer_name(comment: &mut Comment) {
    if comment.name.is_some() {
        return;
    }

    if let Some(alias) = comment.alias.clone() {
        comment.name = Some(alias);
        return;
    }

    if comment.kind == Some(Kind::Module) {
        comment.name = Some(comment.context.file_stem());
        return;
    }

    let inferred = match comment.context.node.as_ref() {
        Some(Node::ExportDefault { declaration }) => Some(
            declared_name(declaration).unwrap_or_else(|| comment.context.file_stem()),
        ),
        Some(node) => first_name(node),
        None => None,
    };
    if inferred.is_some() {
        comment.name = inferred;
    }
}

/// The bound name of a default-exported declaration, if it has one.
fn declared_name(node: &Node) -> Option<String> {
    match node {
        Node::Function(f) => f.name.clone(),
        Node::Class(c) => c.name.clone(),
        Node::TypeAlias { name, .. }
        | Node::Interface { name, .. }
        | Node::Enum { name }
        | Node::EnumMember { name, .. } => Some(name.clone()),
        Node::Variable { declarators, .. } => declarators.first().and_then(declared_name),
        Node::Declarator { name, .. } => Some(name.clone()),
        _ => None,
    }
}

/// First nameable thing in the node, depth first.
fn first_name(node: &Node) -> Option<String> {
    match node {
        Node::ExportNamed {
            declaration: Some(d),
        } => first_name(d),
        Node::ExportDefault { declaration } => first_name(declaration),
        Node::Variable { declarators, .. } => declarators.first().and_then(first_name),
        Node::Declarator { name, .. } => Some(name.clone()),
        // `Foo.bar = baz` names after the target's property, not its object.
        Node::Assignment { target, .. } => target.path.last().cloned(),
        Node::Function(f) => f
            .name
            .clone()
            .or_else(|| f.params.iter().find_map(pattern_name)),
        Node::Class(c) => c
            .name
            .clone()
            .or_else(|| c.members.first().map(|m| m.key.clone())),
        Node::ClassMember { member, .. } => Some(member.key.clone()),
        // String keys count: `{ "my key": value }`.
        Node::ObjectProperty { key, .. } => Some(key.clone()),
        Node::TypeAlias { name, .. }
        | Node::Interface { name, .. }
        | Node::Enum { name }
        | Node::EnumMember { name, .. } => Some(name.clone()),
        _ => None,
    }
}

fn pattern_name(pattern: &crate::ast::Pattern) -> Option<String> {
    use crate::ast::Pattern;
    match pattern {
        Pattern::Identifier { name, .. } | Pattern::Rest { name, .. } => Some(name.clone()),
        Pattern::Assignment { left, .. } => pattern_name(left),
        Pattern::Object { properties, .. } => {
            properties.iter().find_map(|p| pattern_name(&p.value))
        }
        Pattern::Array { elements, .. } => elements
            .iter()
            .flatten()
            .find_map(pattern_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AssignTarget, FunctionNode, VariableKind};
    use crate::model::{Context, Tag};

    fn comment_on(node: Node) -> Comment {
        Comment::on_node(node, "src/mod.js", "00001")
    }

    #[test]
    fn explicit_name_wins() {
        let mut comment = comment_on(Node::Function(FunctionNode {
            name: Some("actual".to_string()),
            ..FunctionNode::default()
        }));
        comment.name = Some("explicit".to_string());
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("explicit"));
    }

    #[test]
    fn function_declaration_name() {
        let mut comment = comment_on(Node::Function(FunctionNode {
            name: Some("addThem".to_string()),
            ..FunctionNode::default()
        }));
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("addThem"));
    }

    #[test]
    fn assignment_prefers_property_over_object() {
        let mut comment = comment_on(Node::Assignment {
            target: AssignTarget::path(&["Foo", "bar"]),
            value: Box::new(Node::Function(FunctionNode::default())),
        });
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("bar"));
    }

    #[test]
    fn variable_declaration_names_first_declarator() {
        let mut comment = comment_on(Node::Variable {
            kind: VariableKind::Const,
            declarators: vec![Node::Declarator {
                name: "answer".to_string(),
                ty: None,
                init: Some(Box::new(Node::Number(42.0))),
            }],
        });
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("answer"));
    }

    #[test]
    fn unnamed_default_export_uses_file_stem() {
        let mut comment = comment_on(Node::ExportDefault {
            declaration: Box::new(Node::Function(FunctionNode::default())),
        });
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("mod"));
    }

    #[test]
    fn named_default_export_keeps_its_name() {
        let mut comment = comment_on(Node::ExportDefault {
            declaration: Box::new(Node::Class(crate::ast::ClassNode {
                name: Some("Widget".to_string()),
                ..crate::ast::ClassNode::default()
            })),
        });
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("Widget"));
    }

    #[test]
    fn module_kind_uses_file_stem() {
        let mut comment = Comment::from_tags(
            vec![Tag::new("module", None)],
            Context {
                file: "lib/geo.js".to_string(),
                ..Context::default()
            },
        );
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("geo"));
    }

    #[test]
    fn alias_beats_structural_name() {
        let mut comment = comment_on(Node::Function(FunctionNode {
            name: Some("internalName".to_string()),
            ..FunctionNode::default()
        }));
        comment.alias = Some("publicName".to_string());
        infer_name(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("publicName"));
    }
}
