pub mod friend_requests;
pub mod users;

pub use friend_requests::FriendRequestService;
pub use users::UserService;
