//! Shared crypto helpers for MUN portal services.
//!
//! Currently this is the RS256 session token module used by the login
//! endpoint and the authentication middleware.

pub mod jwt;
