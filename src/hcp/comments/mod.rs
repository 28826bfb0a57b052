//! Run comments module

mod api;
mod models;

pub use api::Comments;
pub use models::{Comment, CommentAttributes, CommentCreateOptions, CommentRelationships};
