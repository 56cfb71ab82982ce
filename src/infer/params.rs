//! Parameter inference and tree merge.
//!
//! One tree is derived from declaration syntax (destructuring, defaults,
//! rest), one from explicit `@param` tags; the two are reconciled so the
//! machine fills in what the author left out without ever overwriting
//! what the author wrote.

use crate::ast::{Node, Pattern, PatternProperty};
use crate::finder::find_target;
use crate::model::{Comment, CommentError, Tag};
use crate::nest::{nest_tags, tag_depth};
use crate::types::TypeExpr;

pub fn infer_params(comment: &mut Comment) {
    // Explicit tags arrive flat with dotted names; build the explicit
    // tree first so merging sees like shapes.
    let mut errors = Vec::new();
    let explicit = nest_tags(std::mem::take(&mut comment.params), &mut errors);
    comment.errors.append(&mut errors);

    let inferred = {
        let target = find_target(comment.context.node.as_ref());
        match target {
            // A class comment documents its constructor's parameters,
            // unless constructor documentation is suppressed.
            Some(Node::Class(class)) if !comment.hideconstructor => class
                .constructor_params()
                .map(|params| infer_param_tree(params)),
            Some(node) => node
                .as_function()
                .map(|f| infer_param_tree(&f.params)),
            None => None,
        }
    };

    match inferred {
        Some(inferred) => {
            let mut errors = Vec::new();
            comment.params = merge_trees(inferred, explicit, &mut errors);
            comment.errors.append(&mut errors);
        }
        None => comment.params = explicit,
    }
}

/// One top-level node per formal parameter, in declaration order.
fn infer_param_tree(params: &[Pattern]) -> Vec<Tag> {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| param_to_doc(p, i))
        .collect()
}

/// A top-level parameter pattern as a (possibly nested) param tag.
/// Anonymous destructuring patterns get a synthetic ordinal name like
/// `$0`, pending renaming from an explicit tag.
fn param_to_doc(param: &Pattern, index: usize) -> Tag {
    let auto_name = format!("${index}");
    match param {
        Pattern::Identifier { name, ty } => Tag {
            ty: ty.clone(),
            ..Tag::new("param", Some(name.as_str()))
        },
        Pattern::Object { properties, ty } => object_doc(&auto_name, true, properties, ty),
        Pattern::Array { elements, ty } => array_doc(&auto_name, true, elements, ty),
        Pattern::Assignment {
            left,
            default_source,
        } => {
            let mut tag = param_to_doc(left, index);
            tag.default = Some(default_source.clone());
            tag
        }
        Pattern::Rest { name, ty } => rest_doc(name, ty),
    }
}

fn object_doc(name: &str, anonymous: bool, properties: &[PatternProperty], ty: &Option<TypeExpr>) -> Tag {
    Tag {
        title: "param".to_string(),
        name: Some(name.to_string()),
        ty: Some(ty.clone().unwrap_or_else(|| TypeExpr::name("Object"))),
        anonymous,
        properties: properties
            .iter()
            .map(|prop| property_to_doc(prop, name))
            .collect(),
        ..Tag::default()
    }
}

fn array_doc(name: &str, anonymous: bool, elements: &[Option<Pattern>], ty: &Option<TypeExpr>) -> Tag {
    // Destructured element names carry no external meaning; the elements
    // are renamed to their indices instead.
    Tag {
        title: "param".to_string(),
        name: Some(name.to_string()),
        ty: Some(ty.clone().unwrap_or_else(|| TypeExpr::name("Array"))),
        anonymous,
        properties: elements
            .iter()
            .enumerate()
            .filter_map(|(i, el)| el.as_ref().map(|p| element_to_doc(p, name, i)))
            .collect(),
        ..Tag::default()
    }
}

fn rest_doc(name: &str, ty: &Option<TypeExpr>) -> Tag {
    Tag {
        ty: Some(TypeExpr::Rest {
            expression: ty.clone().map(Box::new),
        }),
        ..Tag::new("param", Some(name))
    }
}

/// One field of an object destructuring pattern, named under its parent.
fn property_to_doc(prop: &PatternProperty, prefix: &str) -> Tag {
    let name = format!("{prefix}.{}", prop.key);
    named_pattern_doc(&prop.value, &name)
}

/// One element of an array destructuring pattern, named by its index.
fn element_to_doc(element: &Pattern, prefix: &str, index: usize) -> Tag {
    let name = format!("{prefix}.{index}");
    named_pattern_doc(element, &name)
}

fn named_pattern_doc(pattern: &Pattern, name: &str) -> Tag {
    match pattern {
        Pattern::Identifier { ty, .. } => Tag {
            ty: ty.clone(),
            ..Tag::new("param", Some(name))
        },
        Pattern::Object { properties, ty } => object_doc(name, false, properties, ty),
        Pattern::Array { elements, ty } => array_doc(name, false, elements, ty),
        Pattern::Assignment {
            left,
            default_source,
        } => {
            let mut tag = named_pattern_doc(left, name);
            tag.default = Some(default_source.clone());
            tag
        }
        Pattern::Rest { ty, .. } => rest_doc(name, ty),
    }
}

// -- Merge --------------------------------------------------------------------

/// Merge the inferred tree with the explicit tree. Argument order is
/// ground truth, so the inferred list drives; explicit tags contribute
/// what the author wrote and may rename destructuring placeholders.
pub fn merge_trees(
    mut inferred: Vec<Tag>,
    explicit: Vec<Tag>,
    errors: &mut Vec<CommentError>,
) -> Vec<Tag> {
    // Renaming is only enabled when every parameter is documented, so
    // positions line up unambiguously.
    if inferred.len() == explicit.len() {
        for (inferred_tag, explicit_tag) in inferred.iter_mut().zip(&explicit) {
            if inferred_tag.anonymous {
                if let Some(name) = &explicit_tag.name {
                    rename_tree(inferred_tag, name);
                }
            }
        }
    }

    merge_top_nodes(inferred, explicit, errors)
}

/// Replace the first path segment of a node's name, and of every
/// descendant's, with an explicit name — `$0.x.y` becomes `options.x.y`.
fn rename_tree(node: &mut Tag, explicit_name: &str) {
    if let Some(name) = &node.name {
        node.name = Some(match name.find('.') {
            Some(dot) => format!("{explicit_name}{}", &name[dot..]),
            None => explicit_name.to_string(),
        });
    }
    for child in &mut node.properties {
        rename_tree(child, explicit_name);
    }
}

fn merge_top_nodes(
    inferred: Vec<Tag>,
    explicit: Vec<Tag>,
    errors: &mut Vec<CommentError>,
) -> Vec<Tag> {
    let inferred_names: Vec<String> = inferred
        .iter()
        .filter_map(|t| t.name.clone())
        .collect();

    // An explicit top-level tag with no inferred counterpart is a
    // cardinality mismatch: report it, but keep it visible.
    let (matched, unmatched): (Vec<Tag>, Vec<Tag>) = explicit.into_iter().partition(|tag| {
        tag_depth(tag) != 1
            || tag
                .name
                .as_deref()
                .map_or(true, |n| inferred_names.iter().any(|i| i == n))
    });

    for tag in &unmatched {
        errors.push(CommentError::at_line(
            format!(
                "An explicit parameter named {} was specified but didn't match \
                 inferred information {}",
                tag.name.as_deref().unwrap_or(""),
                inferred_names.join(", ")
            ),
            tag.line_number,
        ));
    }

    let mut merged: Vec<Tag> = inferred
        .into_iter()
        .map(|inferred_tag| {
            let explicit_tag = matched
                .iter()
                .find(|e| e.name == inferred_tag.name);
            match explicit_tag {
                Some(explicit_tag) => combine_tags(&inferred_tag, explicit_tag),
                None => inferred_tag,
            }
        })
        .collect();
    merged.extend(unmatched);
    merged
}

/// Union of non-root property lists, keyed by name: present in both ⇒
/// recurse, present in either ⇒ kept as-is.
fn merge_nodes(inferred: Vec<Tag>, explicit: Vec<Tag>) -> Vec<Tag> {
    let mut merged: Vec<Tag> = inferred
        .iter()
        .filter_map(|i| {
            explicit
                .iter()
                .find(|e| e.name == i.name)
                .map(|e| combine_tags(i, e))
        })
        .collect();
    merged.extend(
        explicit
            .iter()
            .filter(|e| !inferred.iter().any(|i| i.name == e.name))
            .cloned(),
    );
    merged.extend(
        inferred
            .into_iter()
            .filter(|i| !explicit.iter().any(|e| e.name == i.name)),
    );
    merged
}

/// Combine a matched pair: explicit type, default and description win
/// when present, inferred values fill the gaps.
fn combine_tags(inferred: &Tag, explicit: &Tag) -> Tag {
    let mut combined = explicit.clone();
    combined.ty = explicit.ty.clone().or_else(|| inferred.ty.clone());
    combined.default = explicit
        .default
        .clone()
        .or_else(|| inferred.default.clone());
    combined.description = explicit
        .description
        .clone()
        .or_else(|| inferred.description.clone());
    if !inferred.properties.is_empty() || !explicit.properties.is_empty() {
        combined.properties =
            merge_nodes(inferred.properties.clone(), explicit.properties.clone());
    }
    combined
}
