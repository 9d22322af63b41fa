//! Authentication primitives.
//!
//! - [`jwt`] -- validation of access tokens issued by the identity host.

pub mod jwt;
