pub mod friend_request;
pub mod user;

pub use friend_request::{FriendRequest, FriendRequestStatus, FriendRequestView};
pub use user::{Role, User, UserView};
