//! Return and yield inference from declared return types. A generator's
//! `Generator<Y, R, N>` annotation is split into the yield and return
//! halves.

use crate::finder::find_target;
use crate::model::{Comment, Tag};
use crate::types::TypeExpr;

pub fn infer_returns(comment: &mut Comment) {
    // A typed explicit @returns settles the matter.
    if comment
        .returns
        .first()
        .map_or(false, |tag| tag.ty.is_some())
    {
        return;
    }

    let inferred = find_target(comment.context.node.as_ref())
        .and_then(|node| node.as_function())
        .and_then(|f| {
            let ty = f.return_type.clone()?;
            Some(match generator_halves(&ty, f.is_generator) {
                Some((yielded, returned)) => (Some(yielded), returned),
                None => (None, ty),
            })
        });

    let Some((yielded, returned)) = inferred else {
        return;
    };

    if let Some(yielded) = yielded {
        if comment.yields.is_empty() {
            comment
                .yields
                .push(Tag::with_type("yields", None, yielded));
        } else if comment.yields[0].ty.is_none() {
            comment.yields[0].ty = Some(yielded);
        }
    }

    match comment.returns.first_mut() {
        Some(tag) => tag.ty = Some(returned),
        None => comment
            .returns
            .push(Tag::with_type("returns", None, returned)),
    }
}

/// Split `Generator<Y, R, N>` into yield and return types.
fn generator_halves(ty: &TypeExpr, is_generator: bool) -> Option<(TypeExpr, TypeExpr)> {
    if !is_generator {
        return None;
    }
    match ty {
        TypeExpr::Application { name, args } if name == "Generator" && args.len() == 3 => {
            Some((args[0].clone(), args[1].clone()))
        }
        _ => None,
    }
}
