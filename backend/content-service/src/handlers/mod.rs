pub mod comments;
pub mod internal;
pub mod posts;
