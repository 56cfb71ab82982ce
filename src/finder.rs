//! Locate the node a comment actually documents, unwrapping the syntax
//! that sits between the annotation and the interesting declaration.

use crate::ast::{ClassMemberKind, Node};

/// Unwrap, in order: export wrappers, variable declarations (to their
/// first declarator), assignment statements (to their right-hand side),
/// object properties (to their value), and class fields with an
/// initializer (to that initializer). Pure and idempotent.
pub fn find_target(node: Option<&Node>) -> Option<&Node> {
    let mut node = node?;

    if let Node::ExportDefault { declaration } = node {
        node = declaration;
    } else if let Node::ExportNamed { declaration } = node {
        node = declaration.as_deref()?;
    }

    match node {
        Node::Variable { declarators, .. } => declarators.first(),
        Node::Assignment { value, .. } => Some(value),
        Node::ObjectProperty { value, .. } => Some(value),
        Node::ClassMember { member, .. }
            if member.kind == ClassMemberKind::Property && member.init.is_some() =>
        {
            member.init.as_deref()
        }
        _ => Some(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AssignTarget, ClassMemberNode, FunctionNode, VariableKind};

    #[test]
    fn unwraps_export_around_declaration() {
        let node = Node::ExportNamed {
            declaration: Some(Box::new(Node::Function(FunctionNode {
                name: Some("f".to_string()),
                ..FunctionNode::default()
            }))),
        };
        let target = find_target(Some(&node)).unwrap();
        assert!(matches!(target, Node::Function(_)));
    }

    #[test]
    fn unwraps_variable_to_first_declarator() {
        let node = Node::Variable {
            kind: VariableKind::Const,
            declarators: vec![Node::Declarator {
                name: "x".to_string(),
                ty: None,
                init: Some(Box::new(Node::Number(1.0))),
            }],
        };
        let target = find_target(Some(&node)).unwrap();
        assert!(matches!(target, Node::Declarator { name, .. } if name == "x"));
    }

    #[test]
    fn unwraps_assignment_to_rhs() {
        let node = Node::Assignment {
            target: AssignTarget::path(&["Foo", "bar"]),
            value: Box::new(Node::Function(FunctionNode::default())),
        };
        let target = find_target(Some(&node)).unwrap();
        assert!(matches!(target, Node::Function(_)));
    }

    #[test]
    fn unwraps_class_field_initializer() {
        let mut member = ClassMemberNode::property("count", None);
        member.init = Some(Box::new(Node::Number(0.0)));
        let node = Node::ClassMember {
            class_name: Some("Counter".to_string()),
            member,
        };
        let target = find_target(Some(&node)).unwrap();
        assert!(matches!(target, Node::Number(_)));
    }

    #[test]
    fn bare_reexport_has_no_target() {
        let node = Node::ExportNamed { declaration: None };
        assert!(find_target(Some(&node)).is_none());
    }

    #[test]
    fn idempotent_on_plain_nodes() {
        let node = Node::Function(FunctionNode::default());
        let once = find_target(Some(&node)).unwrap();
        let twice = find_target(Some(once)).unwrap();
        assert!(matches!(twice, Node::Function(_)));
    }
}
