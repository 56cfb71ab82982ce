//! Documentation-model core: take parsed annotation comments, each tied
//! to the syntax node it documents, infer the aspects the author left
//! implicit, and assemble the flat list into a navigable owner→member
//! tree.
//!
//! The pipeline is a sequential fold over the comments in source order;
//! each inference module owns one aspect and explicit annotation always
//! beats inference. Problems are recovered and accumulated on the owning
//! comment as [`model::CommentError`]s, never raised — callers decide
//! whether accumulated errors constitute failure.

pub mod ast;
pub mod finder;
pub mod hierarchy;
pub mod infer;
pub mod model;
pub mod nest;
pub mod normalize;
pub mod types;

use anyhow::Result;

use infer::access::AccessInference;
use infer::membership::Membership;
use model::Comment;

/// Pipeline configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Names matching this pattern are treated as private, like `^_`.
    pub infer_private: Option<String>,
    /// Names that outrank their tree position in the table of contents.
    /// Listed owners are reachable by short `@memberof` paths during
    /// assembly.
    pub toc: Vec<String>,
}

/// The per-comment inference fold. Holds the compiled access pattern and
/// the module-tracking state, so comments must be run in source order.
pub struct Pipeline {
    access: AccessInference,
    membership: Membership,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Pipeline> {
        Ok(Pipeline {
            access: AccessInference::new(config.infer_private.as_deref())?,
            membership: Membership::new(),
        })
    }

    /// Run every inference module over one comment, then drop its
    /// syntax-node back-reference.
    pub fn run(&mut self, comment: &mut Comment) {
        infer::name::infer_name(comment);
        self.access.infer(comment);
        infer::supertypes::infer_supertypes(comment);
        infer::kind::infer_kind(comment);
        infer::params::infer_params(comment);
        infer::properties::infer_properties(comment);
        infer::returns::infer_returns(comment);
        self.membership.infer(comment);
        infer::type_::infer_type(comment);
        comment.context.node = None;
    }
}

/// Infer and assemble: the whole core in one call. Comments are put in
/// source order first, which both the module-tracking state and the
/// output ordering depend on.
pub fn process(mut comments: Vec<Comment>, config: &Config) -> Result<Vec<Comment>> {
    let mut pipeline = Pipeline::new(config)?;
    sort_by_source(&mut comments);
    for comment in &mut comments {
        pipeline.run(comment);
    }
    Ok(hierarchy::assemble(comments, &config.toc))
}

/// Stable sort by the cross-file source-order key.
pub fn sort_by_source(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.context.sort_key.cmp(&b.context.sort_key));
}
