//! Property inference — record fields of a documented type alias or
//! interface become `property` tags, nested alongside the explicit ones.

use std::collections::HashSet;

use crate::ast::Node;
use crate::finder::find_target;
use crate::model::{Comment, Tag};
use crate::types::{Field, TypeExpr};

pub fn infer_properties(comment: &mut Comment) {
    let explicit_names: HashSet<String> = comment
        .properties
        .iter()
        .filter_map(|t| t.name.clone())
        .collect();

    let mut inferred = Vec::new();
    match find_target(comment.context.node.as_ref()) {
        Some(Node::TypeAlias {
            ty: TypeExpr::Record { fields },
            ..
        })
        | Some(Node::Interface { fields, .. }) => {
            for field in fields {
                field_to_docs(field, "", &explicit_names, &mut inferred);
            }
        }
        _ => {}
    }

    let mut flat = std::mem::take(&mut comment.properties);
    flat.extend(inferred);
    let mut errors = Vec::new();
    comment.properties = crate::nest::nest_tags(flat, &mut errors);
    comment.errors.append(&mut errors);
}

/// Emit a flat dotted tag for one field, and for each field of a nested
/// record type. A field the author documented explicitly is skipped,
/// subtree included.
fn field_to_docs(field: &Field, prefix: &str, explicit: &HashSet<String>, out: &mut Vec<Tag>) {
    let name = if prefix.is_empty() {
        field.key.clone()
    } else {
        format!("{prefix}.{}", field.key)
    };
    if explicit.contains(&name) {
        return;
    }

    let ty = if field.optional {
        TypeExpr::Optional {
            expression: Box::new(field.value.clone()),
        }
    } else {
        field.value.clone()
    };
    out.push(Tag::with_type("property", Some(name.as_str()), ty));

    if let TypeExpr::Record { fields } = &field.value {
        for nested in fields {
            field_to_docs(nested, &name, explicit, out);
        }
    }
}
