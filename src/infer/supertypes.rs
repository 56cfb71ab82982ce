//! Supertype inference — superclass and interface lists, captured
//! verbatim as source text since they may be dotted references like
//! `React.Component` rather than bare identifiers.

use crate::ast::Node;
use crate::finder::find_target;
use crate::model::{Comment, Tag};

pub fn infer_supertypes(comment: &mut Comment) {
    let mut augments = Vec::new();
    let mut implements_ = Vec::new();

    match find_target(comment.context.node.as_ref()) {
        Some(Node::Class(class)) => {
            if comment.augments.is_empty() {
                if let Some(superclass) = &class.superclass {
                    augments.push(Tag::new("augments", Some(superclass.as_str())));
                }
            }
            if comment.implements.is_empty() {
                for name in &class.implements {
                    implements_.push(Tag::new("implements", Some(name.as_str())));
                }
            }
        }
        Some(Node::Interface { extends, .. }) => {
            if comment.augments.is_empty() {
                for name in extends {
                    augments.push(Tag::new("augments", Some(name.as_str())));
                }
            }
        }
        _ => {}
    }

    comment.augments.extend(augments);
    comment.implements.extend(implements_);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ClassNode;
    use crate::types::TypeExpr;

    #[test]
    fn captures_dotted_superclass_text() {
        let mut comment = Comment::on_node(
            Node::Class(ClassNode {
                name: Some("Button".to_string()),
                superclass: Some("React.Component".to_string()),
                ..ClassNode::default()
            }),
            "a.js",
            "00001",
        );
        infer_supertypes(&mut comment);
        assert_eq!(comment.augments.len(), 1);
        assert_eq!(comment.augments[0].name.as_deref(), Some("React.Component"));
    }

    #[test]
    fn captures_implements_list() {
        let mut comment = Comment::on_node(
            Node::Class(ClassNode {
                name: Some("List".to_string()),
                implements: vec!["Iterable".to_string(), "ns.Countable".to_string()],
                ..ClassNode::default()
            }),
            "a.js",
            "00001",
        );
        infer_supertypes(&mut comment);
        assert_eq!(comment.implements.len(), 2);
        assert_eq!(comment.implements[1].name.as_deref(), Some("ns.Countable"));
    }

    #[test]
    fn interface_extends_become_augments() {
        let mut comment = Comment::on_node(
            Node::Interface {
                name: "Derived".to_string(),
                extends: vec!["Base".to_string()],
                fields: vec![],
            },
            "a.js",
            "00001",
        );
        infer_supertypes(&mut comment);
        assert_eq!(comment.augments.len(), 1);
        assert_eq!(comment.augments[0].title, "augments");
        assert_eq!(comment.augments[0].name.as_deref(), Some("Base"));
    }

    #[test]
    fn explicit_augments_wins() {
        let mut comment = Comment::on_node(
            Node::Class(ClassNode {
                superclass: Some("Inferred".to_string()),
                ..ClassNode::default()
            }),
            "a.js",
            "00001",
        );
        comment.augments.push(Tag::new("augments", Some("Explicit")));
        infer_supertypes(&mut comment);
        assert_eq!(comment.augments.len(), 1);
        assert_eq!(comment.augments[0].name.as_deref(), Some("Explicit"));
    }

    #[test]
    fn unrelated_nodes_are_ignored() {
        let mut comment = Comment::on_node(
            Node::TypeAlias {
                name: "T".to_string(),
                ty: TypeExpr::name("number"),
            },
            "a.js",
            "00001",
        );
        infer_supertypes(&mut comment);
        assert!(comment.augments.is_empty());
    }
}
