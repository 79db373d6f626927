//! Shared cryptographic primitives for Orbit services.
//!
//! Currently this is only the JWT module. All three services validate
//! bearer tokens with the same key material; only identity-service
//! generates them.

pub mod jwt;
