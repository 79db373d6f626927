pub mod comments;
pub mod posts;
pub mod reaction_counts;

pub use comments::CommentService;
pub use posts::PostService;
pub use reaction_counts::ReactionCountClient;
