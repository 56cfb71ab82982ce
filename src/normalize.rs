//! Tag synonym canonicalization — runs before any inference so the rest
//! of the pipeline only ever sees canonical titles.

use crate::model::Tag;

/// Canonical title for a tag, if the given title is a known synonym.
fn canonical(title: &str) -> Option<&'static str> {
    Some(match title {
        "virtual" => "abstract",
        "extends" => "augments",
        "constructor" => "class",
        "const" => "constant",
        "defaultvalue" => "default",
        "desc" => "description",
        "host" => "external",
        "fileoverview" | "overview" => "file",
        "emits" => "fires",
        "func" | "method" => "function",
        "var" => "member",
        "arg" | "argument" => "param",
        "prop" => "property",
        "return" => "returns",
        "exception" => "throws",
        "linkcode" | "linkplain" => "link",
        _ => return None,
    })
}

/// Rewrite synonymous tag titles to their canonical form.
pub fn normalize_tags(tags: Vec<Tag>) -> Vec<Tag> {
    tags.into_iter()
        .map(|mut tag| {
            if let Some(c) = canonical(&tag.title) {
                tag.title = c.to_string();
            }
            tag
        })
        .collect()
}
