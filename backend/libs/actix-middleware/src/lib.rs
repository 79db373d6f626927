//! # Actix Middleware Library
//!
//! Unified middleware components for Orbit actix services.
//!
//! ## Modules
//! - `trusted_identity`: identity propagation via trusted internal headers

pub mod trusted_identity;

pub use trusted_identity::{
    ForwardedAuth, TrustedIdentityMiddleware, UserId, ORIGINAL_AUTH_HEADER, USER_ID_HEADER,
};
