//! Hierarchy assembly — fold the flat comment list into an owner→member
//! tree, then flatten it back to a list of root comments each carrying
//! its subtree.
//!
//! Two phases over an arena of nodes. Phase 1 walks or creates one node
//! per (scope, name) path segment and appends each comment to its
//! terminal node; names listed in the table of contents are temporarily
//! aliased at the root so short owner paths can reach them, and the
//! aliases are pruned before flattening. Phase 2 flattens children
//! before parents, regroups event members, computes each comment's
//! root-to-self path and namespace, and reparents members of
//! undocumented owners to the root with an error.

use crate::model::{Comment, CommentError, Kind, Members, PathSegment, Scope};

#[derive(Default)]
struct HNode {
    comments: Vec<Comment>,
    /// Child index in insertion order. Lists stay short; linear lookup.
    members: Vec<(Scope, String, usize)>,
}

/// Assemble a source-ordered comment list into nested root comments.
/// `toc` lists names that outrank their position for ordering purposes.
pub fn assemble(comments: Vec<Comment>, toc: &[String]) -> Vec<Comment> {
    let mut arena: Vec<HNode> = vec![HNode::default()];
    let mut aliases: Vec<usize> = Vec::new();
    let mut placeholders = 0usize;

    // -- Phase 1: insertion ---------------------------------------------------
    for mut comment in comments {
        let path = comment_path(&mut comment, &mut placeholders);

        let mut cur = 0usize;
        for (scope, name) in path {
            let child = find_or_create(&mut arena, cur, scope, &name);
            if cur != 0 && toc.iter().any(|t| *t == name) {
                let at_root = arena[0]
                    .members
                    .iter()
                    .any(|(s, n, _)| *s == Scope::Static && *n == name);
                if !at_root {
                    arena[0].members.push((Scope::Static, name.clone(), child));
                    aliases.push(child);
                }
            }
            cur = child;
        }

        // A comment that already carries members went through assembly
        // before; re-expand its subtree so flattening is idempotent. The
        // guard keeps multi-signature clones from inserting twice.
        if let Some(members) = comment.members.take() {
            if arena[cur].comments.is_empty() {
                reinsert_members(&mut arena, cur, members);
            }
        }
        arena[cur].comments.push(comment);
    }

    arena[0].members.retain(|(_, _, id)| !aliases.contains(id));

    // -- Phase 2: flattening --------------------------------------------------
    let mut result = Vec::new();
    let root_entries: Vec<(Scope, usize)> = arena[0]
        .members
        .iter()
        .map(|(s, _, id)| (*s, *id))
        .collect();
    // Static first; other scopes follow so nothing is silently dropped.
    for scope in [Scope::Static, Scope::Instance, Scope::Inner, Scope::Global] {
        for &(s, id) in &root_entries {
            if s == scope {
                let comments = flatten_node(&mut arena, id, false, &[], &mut result);
                result.extend(comments);
            }
        }
    }
    result
}

/// The (scope, name) path for a comment: an explicit precomputed path,
/// or `memberof` split into static segments plus the comment's own
/// (scope, name). A missing name gets a generated placeholder and an
/// error.
fn comment_path(comment: &mut Comment, placeholders: &mut usize) -> Vec<(Scope, String)> {
    if !comment.path.is_empty() {
        return comment
            .path
            .iter()
            .map(|seg| (seg.scope.unwrap_or(Scope::Static), seg.name.clone()))
            .collect();
    }

    let mut path: Vec<(Scope, String)> = comment
        .memberof
        .iter()
        .flat_map(|m| m.split('.'))
        // Intermediate segments default to static; a known approximation
        // for deep dotted owners.
        .map(|seg| (Scope::Static, seg.to_string()))
        .collect();

    if comment.name.is_none() {
        comment.errors.push(CommentError::new(
            "could not determine @name for hierarchy".to_string(),
        ));
    }
    let name = comment.name.clone().unwrap_or_else(|| {
        let n = format!("unknown_{placeholders}");
        *placeholders += 1;
        n
    });
    path.push((comment.scope.unwrap_or(Scope::Static), name));
    path
}

fn find_or_create(arena: &mut Vec<HNode>, parent: usize, scope: Scope, name: &str) -> usize {
    let found = arena[parent]
        .members
        .iter()
        .find(|(s, n, _)| *s == scope && n == name)
        .map(|(_, _, id)| *id);
    match found {
        Some(id) => id,
        None => {
            arena.push(HNode::default());
            let id = arena.len() - 1;
            arena[parent]
                .members
                .push((scope, name.to_string(), id));
            id
        }
    }
}

/// Re-insert a previously flattened subtree under `parent`.
fn reinsert_members(arena: &mut Vec<HNode>, parent: usize, members: Members) {
    let Members {
        global,
        inner,
        instance,
        events,
        static_,
    } = members;
    let lists = [
        (Some(Scope::Global), global),
        (Some(Scope::Inner), inner),
        (Some(Scope::Instance), instance),
        (Some(Scope::Static), static_),
        // Events return to their recorded scope and regroup on flattening.
        (None, events),
    ];
    for (scope, list) in lists {
        for mut child in list {
            let scope = scope
                .or(child.scope)
                .unwrap_or(Scope::Static);
            let name = child
                .name
                .clone()
                .or_else(|| child.path.last().map(|seg| seg.name.clone()));
            let Some(name) = name else { continue };
            let id = find_or_create(arena, parent, scope, &name);
            if let Some(members) = child.members.take() {
                if arena[id].comments.is_empty() {
                    reinsert_members(arena, id, members);
                }
            }
            arena[id].comments.push(child);
        }
    }
}

/// Flatten one node, children first, and return its comments with their
/// member lists attached. Orphans (members of an undocumented owner) go
/// straight to `root` with an error instead.
fn flatten_node(
    arena: &mut Vec<HNode>,
    id: usize,
    orphaned: bool,
    path: &[PathSegment],
    root: &mut Vec<Comment>,
) -> Vec<Comment> {
    let node = std::mem::take(&mut arena[id]);

    let children_orphaned = node.comments.is_empty();
    let child_path: Vec<PathSegment> = match node.comments.first() {
        Some(first) => {
            let mut p = path.to_vec();
            p.extend(pick(first));
            p
        }
        None => Vec::new(),
    };

    let mut flat = Members::default();
    for scope in [Scope::Global, Scope::Inner, Scope::Instance, Scope::Static] {
        let ids: Vec<usize> = node
            .members
            .iter()
            .filter(|(s, _, _)| *s == scope)
            .map(|(_, _, id)| *id)
            .collect();
        let mut list = Vec::new();
        for child in ids {
            list.extend(flatten_node(arena, child, children_orphaned, &child_path, root));
        }
        match scope {
            Scope::Global => flat.global = list,
            Scope::Inner => flat.inner = list,
            Scope::Instance => flat.instance = list,
            Scope::Static => flat.static_ = list,
        }
    }

    let mut result = Vec::new();
    for mut comment in node.comments {
        let mut members = flat.clone();
        for list in [
            &mut members.instance,
            &mut members.static_,
            &mut members.inner,
            &mut members.global,
        ] {
            let (events, rest): (Vec<Comment>, Vec<Comment>) = list
                .drain(..)
                .partition(|c| c.kind == Some(Kind::Event));
            members.events.extend(events);
            *list = rest;
        }

        let mut comment_path = path.to_vec();
        comment_path.extend(pick(&comment));
        comment.namespace = Some(namespace_of(&comment_path));
        comment.path = comment_path;
        comment.members = Some(members);

        if orphaned {
            comment.errors.push(CommentError::at_line(
                format!(
                    "@memberof reference to {} not found",
                    comment.memberof.as_deref().unwrap_or_default()
                ),
                comment.memberof_tag_line(),
            ));
            root.push(comment);
        } else {
            result.push(comment);
        }
    }
    result
}

/// The identifying slice of a comment for ancestor chains. Unnamed
/// comments contribute nothing.
fn pick(comment: &Comment) -> Option<PathSegment> {
    Some(PathSegment {
        name: comment.name.clone()?,
        kind: comment.kind,
        scope: comment.scope,
    })
}

/// `Person#say`, `Person.say`, `Person~say`, `Person.event:frobbed`.
fn namespace_of(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for part in path {
        if part.kind == Some(Kind::Event) {
            out.push_str(".event:");
        } else if let Some(scope) = part.scope {
            out.push_str(match scope {
                Scope::Instance => "#",
                Scope::Static => ".",
                Scope::Inner => "~",
                Scope::Global => "",
            });
        }
        out.push_str(&part.name);
    }
    out
}
