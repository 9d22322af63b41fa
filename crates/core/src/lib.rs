//! Domain layer for the download manager API.
//!
//! Holds the entity types, the access rules, and the repository ports that
//! storage adapters implement. Nothing in here performs I/O.

pub mod access;
pub mod error;
pub mod models;
pub mod ports;
pub mod roles;
pub mod slug;
pub mod types;
