//! Membership inference — derive `memberof` and scope from where the
//! documented declaration sits: assignment chains, class bodies, object
//! literals, enum bodies.
//!
//! Stateful across a file set: the most recent `@module` comment names
//! the owner of `exports` assignments, so comments must be fed in source
//! order.

use crate::ast::{Node, ObjectBinding, ThisBinding};
use crate::model::{Comment, Kind, Scope};

/// Membership inference with the module-tracking state threaded through
/// a sequential pass over the comments.
#[derive(Default)]
pub struct Membership {
    current_module: Option<String>,
}

impl Membership {
    pub fn new() -> Membership {
        Membership::default()
    }

    pub fn infer(&mut self, comment: &mut Comment) {
        // An explicit @name asks for inference to be skipped; @lends
        // comments are reassignment go-betweens, not members themselves.
        if comment.has_name_tag() || comment.lends.is_some() || comment.context.node.is_none() {
            return;
        }

        if comment.memberof.is_some() {
            normalize_memberof(comment);
            return;
        }

        if comment.kind == Some(Kind::Module) {
            self.current_module = comment.name.clone();
        }

        let Some(node) = comment.context.node.take() else {
            return;
        };
        match &node {
            // Foo.bar = ...; Foo.prototype.bar = ...; this.bar = ...
            Node::Assignment { target, .. } => {
                let mut ids = this_identifiers(target.this_binding.as_ref(), comment, self);
                ids.extend(target.path.iter().cloned());
                if ids.len() >= 2 {
                    ids.pop();
                    self.from_identifiers(comment, ids, None);
                }
            }
            // class Foo { bar() {} }
            Node::ClassMember { class_name, member } => {
                let scope = if member.is_static {
                    Scope::Static
                } else {
                    Scope::Instance
                };
                let owner = class_name
                    .clone()
                    .unwrap_or_else(|| self.module_name(comment));
                self.from_identifiers(comment, vec![owner], Some(scope));
            }
            Node::ObjectProperty { container, .. } => {
                let mut ids = match &container.lends {
                    Some(lends) => lends.split('.').map(str::to_string).collect(),
                    None => match &container.binding {
                        ObjectBinding::Variable(name) => vec![name.clone()],
                        ObjectBinding::AssignmentTarget(target) => target.clone(),
                        ObjectBinding::DefaultExport => vec![self.module_name(comment)],
                        ObjectBinding::TypeName(name) => vec![name.clone()],
                        ObjectBinding::Unbound => {
                            comment.context.node = Some(node);
                            return;
                        }
                    },
                };
                ids.extend(container.keys.iter().cloned());
                self.from_identifiers(comment, ids, None);
            }
            Node::EnumMember { parent, .. } => {
                self.from_identifiers(comment, vec![parent.clone()], Some(Scope::Static));
            }
            _ => {}
        }
        comment.context.node = Some(node);
    }

    /// Apply an owner identifier chain: a trailing `prototype` marks an
    /// instance member, a leading `exports`/`module.exports` is replaced
    /// by the current module's name.
    fn from_identifiers(
        &self,
        comment: &mut Comment,
        mut identifiers: Vec<String>,
        explicit_scope: Option<Scope>,
    ) {
        // `module.exports = ...` documents the module itself.
        if identifiers.len() == 1
            && identifiers[0] == "module"
            && comment.name.as_deref() == Some("exports")
        {
            comment.name = Some(self.module_name(comment));
            return;
        }

        let export_prefix = if identifiers.first().map(String::as_str) == Some("exports") {
            1
        } else if identifiers.len() >= 2 && identifiers[0] == "module" && identifiers[1] == "exports"
        {
            2
        } else {
            0
        };
        if export_prefix > 0 {
            identifiers.splice(..export_prefix, [self.module_name(comment)]);
        }

        if identifiers.last().map(String::as_str) == Some("prototype") {
            identifiers.pop();
            comment.memberof = Some(identifiers.join("."));
            comment.scope = Some(Scope::Instance);
        } else {
            comment.memberof = Some(identifiers.join("."));
            comment.scope = Some(explicit_scope.unwrap_or(Scope::Static));
        }
    }

    /// The owning module's name: the last `@module` comment seen, or the
    /// file's base name.
    fn module_name(&self, comment: &Comment) -> String {
        self.current_module
            .clone()
            .unwrap_or_else(|| comment.context.file_stem())
    }
}

/// Owner identifiers contributed by a resolved `this` receiver.
fn this_identifiers(
    binding: Option<&ThisBinding>,
    comment: &Comment,
    membership: &Membership,
) -> Vec<String> {
    match binding {
        None => Vec::new(),
        Some(ThisBinding::Function(name))
        | Some(ThisBinding::Variable(name))
        | Some(ThisBinding::ClassMethod(name)) => {
            vec![name.clone(), "prototype".to_string()]
        }
        Some(ThisBinding::AssignmentTarget(target)) => {
            let mut ids = target.clone();
            ids.push("prototype".to_string());
            ids
        }
        Some(ThisBinding::DefaultExport) => {
            vec![membership.module_name(comment), "prototype".to_string()]
        }
    }
}

/// Rewrite explicit `Foo.prototype` / `Foo#` owners to `Foo` with
/// instance scope.
fn normalize_memberof(comment: &mut Comment) {
    let Some(memberof) = &comment.memberof else {
        return;
    };
    if let Some(stripped) = memberof.strip_suffix(".prototype") {
        comment.memberof = Some(stripped.to_string());
        comment.scope = Some(Scope::Instance);
    } else if let Some(stripped) = memberof.strip_suffix('#') {
        comment.memberof = Some(stripped.to_string());
        comment.scope = Some(Scope::Instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AssignTarget, ClassMemberNode, FunctionNode, ObjectContainer,
    };
    use crate::model::{Context, Tag};

    fn assignment(target: AssignTarget) -> Node {
        Node::Assignment {
            target,
            value: Box::new(Node::Function(FunctionNode::default())),
        }
    }

    fn infer_one(node: Node) -> Comment {
        let mut comment = Comment::on_node(node, "src/mod.js", "00001");
        Membership::new().infer(&mut comment);
        comment
    }

    #[test]
    fn prototype_assignment_is_instance() {
        let comment = infer_one(assignment(AssignTarget::path(&["Foo", "prototype", "bar"])));
        assert_eq!(comment.memberof.as_deref(), Some("Foo"));
        assert_eq!(comment.scope, Some(Scope::Instance));
    }

    #[test]
    fn dotted_assignment_is_static() {
        let comment = infer_one(assignment(AssignTarget::path(&["Foo", "bar", "baz"])));
        assert_eq!(comment.memberof.as_deref(), Some("Foo.bar"));
        assert_eq!(comment.scope, Some(Scope::Static));
    }

    #[test]
    fn bare_assignment_infers_nothing() {
        let comment = infer_one(assignment(AssignTarget::path(&["Foo"])));
        assert_eq!(comment.memberof, None);
    }

    #[test]
    fn this_in_named_function_is_instance_member() {
        let comment = infer_one(assignment(AssignTarget::this(
            ThisBinding::Function("OldClass".to_string()),
            &["foo"],
        )));
        assert_eq!(comment.memberof.as_deref(), Some("OldClass"));
        assert_eq!(comment.scope, Some(Scope::Instance));
    }

    #[test]
    fn this_in_default_export_constructor_is_instance_member() {
        let comment = infer_one(assignment(AssignTarget::this(
            ThisBinding::DefaultExport,
            &["x"],
        )));
        assert_eq!(comment.memberof.as_deref(), Some("mod"));
        assert_eq!(comment.scope, Some(Scope::Instance));
    }

    #[test]
    fn class_members_scope_by_static_keyword() {
        let mut member = ClassMemberNode::method("bar", FunctionNode::default());
        let comment = infer_one(Node::ClassMember {
            class_name: Some("Foo".to_string()),
            member: member.clone(),
        });
        assert_eq!(comment.memberof.as_deref(), Some("Foo"));
        assert_eq!(comment.scope, Some(Scope::Instance));

        member.is_static = true;
        let comment = infer_one(Node::ClassMember {
            class_name: Some("Foo".to_string()),
            member,
        });
        assert_eq!(comment.scope, Some(Scope::Static));
    }

    #[test]
    fn object_property_of_bound_literal() {
        let comment = infer_one(Node::ObjectProperty {
            key: "bar".to_string(),
            value: Box::new(Node::Other),
            container: ObjectContainer::variable("Foo"),
        });
        assert_eq!(comment.memberof.as_deref(), Some("Foo"));
        assert_eq!(comment.scope, Some(Scope::Static));
    }

    #[test]
    fn lends_overrides_object_binding() {
        let mut container = ObjectContainer::variable("ignored");
        container.lends = Some("Meta.methods".to_string());
        let comment = infer_one(Node::ObjectProperty {
            key: "init".to_string(),
            value: Box::new(Node::Other),
            container,
        });
        assert_eq!(comment.memberof.as_deref(), Some("Meta.methods"));
    }

    #[test]
    fn exports_prefix_resolves_to_module() {
        let mut membership = Membership::new();

        let mut module_comment = Comment::from_tags(
            vec![Tag::new("module", Some("geo"))],
            Context {
                file: "src/geo.js".to_string(),
                node: Some(Node::Other),
                ..Context::default()
            },
        );
        membership.infer(&mut module_comment);

        let mut comment = Comment::on_node(
            assignment(AssignTarget::path(&["exports", "distance"])),
            "src/geo.js",
            "00002",
        );
        membership.infer(&mut comment);
        assert_eq!(comment.memberof.as_deref(), Some("geo"));
    }

    #[test]
    fn module_exports_assignment_names_the_module() {
        let mut comment = Comment::on_node(
            assignment(AssignTarget::path(&["module", "exports"])),
            "src/geo.js",
            "00001",
        );
        comment.name = Some("exports".to_string());
        Membership::new().infer(&mut comment);
        assert_eq!(comment.name.as_deref(), Some("geo"));
        assert_eq!(comment.memberof, None);
    }

    #[test]
    fn explicit_memberof_is_normalized_not_replaced() {
        let mut comment = Comment::on_node(
            assignment(AssignTarget::path(&["Wrong", "thing"])),
            "a.js",
            "00001",
        );
        comment.memberof = Some("Foo.prototype".to_string());
        Membership::new().infer(&mut comment);
        assert_eq!(comment.memberof.as_deref(), Some("Foo"));
        assert_eq!(comment.scope, Some(Scope::Instance));

        let mut comment = Comment::default();
        comment.memberof = Some("Foo#".to_string());
        normalize_memberof(&mut comment);
        assert_eq!(comment.memberof.as_deref(), Some("Foo"));
        assert_eq!(comment.scope, Some(Scope::Instance));
    }

    #[test]
    fn name_tag_skips_inference() {
        let mut comment = Comment::from_tags(
            vec![Tag::new("name", Some("picked"))],
            Context {
                file: "a.js".to_string(),
                node: Some(assignment(AssignTarget::path(&["Foo", "prototype", "bar"]))),
                ..Context::default()
            },
        );
        Membership::new().infer(&mut comment);
        assert_eq!(comment.memberof, None);
    }

    #[test]
    fn enum_members_belong_to_their_enum() {
        let comment = infer_one(Node::EnumMember {
            name: "Red".to_string(),
            parent: "Color".to_string(),
        });
        assert_eq!(comment.memberof.as_deref(), Some("Color"));
        assert_eq!(comment.scope, Some(Scope::Static));
    }
}
