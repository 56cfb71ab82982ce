//! Access inference — explicit modifiers in the source, then an optional
//! configurable name-pattern test. Runs after name inference because the
//! pattern is matched against the inferred name.

use crate::ast::Node;
use crate::model::{Access, Comment};
use anyhow::{Context as _, Result};
use regex::Regex;

/// Access inference with an optional private-name pattern, like `^_`.
pub struct AccessInference {
    pattern: Option<Regex>,
}

impl AccessInference {
    /// Compile the configured pattern. Invalid patterns are a caller
    /// error, reported once here rather than per comment.
    pub fn new(pattern: Option<&str>) -> Result<AccessInference> {
        let pattern = match pattern {
            Some(p) => Some(
                Regex::new(p).with_context(|| format!("invalid access pattern: {p}"))?,
            ),
            None => None,
        };
        Ok(AccessInference { pattern })
    }

    pub fn infer(&self, comment: &mut Comment) {
        // Accessibility modifiers written on a class member.
        if let Some(Node::ClassMember { member, .. }) = &comment.context.node {
            if comment.access.is_none() {
                comment.access = member.accessibility;
            }
            if member.readonly {
                comment.readonly = true;
            }
        }

        if comment.access.is_none() {
            if let (Some(re), Some(name)) = (&self.pattern, &comment.name) {
                if re.is_match(name) {
                    comment.access = Some(Access::Private);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ClassMemberNode;

    #[test]
    fn pattern_marks_private() {
        let inference = AccessInference::new(Some("^_")).unwrap();
        let mut comment = Comment {
            name: Some("_secret".to_string()),
            ..Comment::default()
        };
        inference.infer(&mut comment);
        assert_eq!(comment.access, Some(Access::Private));
    }

    #[test]
    fn pattern_ignores_public_names() {
        let inference = AccessInference::new(Some("^_")).unwrap();
        let mut comment = Comment {
            name: Some("visible".to_string()),
            ..Comment::default()
        };
        inference.infer(&mut comment);
        assert_eq!(comment.access, None);
    }

    #[test]
    fn explicit_access_wins_over_pattern() {
        let inference = AccessInference::new(Some("^_")).unwrap();
        let mut comment = Comment {
            name: Some("_secret".to_string()),
            access: Some(Access::Protected),
            ..Comment::default()
        };
        inference.infer(&mut comment);
        assert_eq!(comment.access, Some(Access::Protected));
    }

    #[test]
    fn class_member_modifiers_apply() {
        let inference = AccessInference::new(None).unwrap();
        let mut member = ClassMemberNode::property("count", None);
        member.accessibility = Some(Access::Private);
        member.readonly = true;
        let mut comment = Comment::on_node(
            Node::ClassMember {
                class_name: Some("Counter".to_string()),
                member,
            },
            "a.js",
            "00001",
        );
        inference.infer(&mut comment);
        assert_eq!(comment.access, Some(Access::Private));
        assert!(comment.readonly);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(AccessInference::new(Some("[")).is_err());
    }
}
