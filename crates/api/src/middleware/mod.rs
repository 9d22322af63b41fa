//! Authentication and authorization extractors.
//!
//! - [`auth::CurrentCaller`] -- Resolves the caller from a JWT Bearer token, never rejects.
//! - [`rbac::RequireRead`] -- Requires a role carrying the `read` capability.
//! - [`rbac::RequireEditor`] -- Requires the `editor` or `administrator` role.

pub mod auth;
pub mod rbac;
