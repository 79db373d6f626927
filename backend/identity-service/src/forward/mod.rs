/// Identity propagation gateway
///
/// The edge decodes a bearer token exactly once (see `middleware`), then
/// these handlers re-issue the caller's identity as trusted internal
/// headers on every forwarded call: `X-User-ID` always, and
/// `X-Original-Authorization` for admin flows, where the downstream
/// service applies its own authorization check against the relayed
/// token.
pub mod admin;
pub mod client;
pub mod comments;
pub mod posts;
pub mod reactions;

pub use client::{ContentForwarder, Forwarder, ReactionForwarder};
