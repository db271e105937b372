//! Authentication primitives.
//!
//! Token issuance lives in the identity service; this API only
//! validates HS256 access tokens and extracts the caller's identity.

pub mod jwt;
