//! Fold a flat list of dotted-path tags into a tree.
//!
//! `foo`, `foo.bar`, `foo.bar.baz`, `foo.bar[].qux` nest as
//!
//! ```text
//! foo -> .bar -> .baz
//!            \-> [].qux
//! ```
//!
//! Reused by parameter merging, property inference, and the lint-only
//! pass over arbitrary dotted tags.

use crate::model::{CommentError, Tag};
use regex::Regex;
use std::sync::LazyLock;

/// Splits a dotted path. `[]` marks "element of an array-valued parent"
/// and adds no tree level, so it is consumed with the dot.
static PATH_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\[\])?\.").unwrap());

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\d+").unwrap());

pub(crate) fn split_path(name: &str) -> Vec<&str> {
    PATH_SPLIT.split(name).collect()
}

/// Nesting depth of a tag: its dot-segment count.
pub(crate) fn tag_depth(tag: &Tag) -> usize {
    match &tag.name {
        Some(name) => split_path(name).len(),
        None => 1,
    }
}

/// Final segment of a dotted name.
pub(crate) fn last_segment(name: &str) -> &str {
    split_path(name).last().copied().unwrap_or(name)
}

/// Nest nestable tags, like param and property, into trees suitable for
/// output. Tags are stable-sorted by path depth so each tree level is
/// added incrementally; a tag whose parent segment is missing records an
/// error and is dropped. Unnamed tags are dropped silently. Single pass
/// over the sorted list, O(n·depth).
pub fn nest_tags(tags: Vec<Tag>, errors: &mut Vec<CommentError>) -> Vec<Tag> {
    let mut sorted: Vec<Tag> = tags.into_iter().filter(|t| t.name.is_some()).collect();
    sorted.sort_by_key(tag_depth);

    let mut root = Tag::default();
    for tag in sorted {
        let name = tag.name.clone().unwrap_or_default();
        let parts: Vec<String> = split_path(&name).iter().map(|s| s.to_string()).collect();
        insert_tag(&mut root, &parts, tag, errors);
    }
    root.properties
}

fn insert_tag(node: &mut Tag, parts: &[String], tag: Tag, errors: &mut Vec<CommentError>) {
    if parts.len() == 1 {
        node.properties.push(tag);
        return;
    }

    let child = node
        .properties
        .iter_mut()
        .find(|p| p.name.as_deref().map(last_segment) == Some(parts[0].as_str()));

    match child {
        Some(child) => insert_tag(child, &parts[1..], tag, errors),
        None => {
            let name = tag.name.as_deref().unwrap_or("");
            let message = if PLACEHOLDER.is_match(name) {
                format!(
                    "Parent of {} not found. To document a destructuring\n\
                     type, add a @param tag in its position to specify the name of the\n\
                     destructured parameter",
                    name
                )
            } else {
                format!("Parent of {} not found", name)
            };
            errors.push(CommentError::at_line(message, tag.line_number));
        }
    }
}
