//! Per-aspect inference — each module owns one aspect of a comment and
//! fills it in from structural context when no explicit annotation set it.

pub mod access;
pub mod kind;
pub mod membership;
pub mod name;
pub mod params;
pub mod properties;
pub mod returns;
pub mod supertypes;
pub mod type_;
