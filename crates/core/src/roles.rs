//! Well-known role names and the capabilities they carry.
//!
//! Role names are issued by the identity host inside access tokens. Only the
//! roles below are recognised; any other role string grants nothing.

pub const ROLE_ADMINISTRATOR: &str = "administrator";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_CONTRIBUTOR: &str = "contributor";
pub const ROLE_SUBSCRIBER: &str = "subscriber";

/// Roles that carry the basic `read` capability.
pub const READ_ROLES: &[&str] = &[
    ROLE_ADMINISTRATOR,
    ROLE_EDITOR,
    ROLE_AUTHOR,
    ROLE_CONTRIBUTOR,
    ROLE_SUBSCRIBER,
];

/// Roles allowed to create downloads and versions.
pub const WRITE_ROLES: &[&str] = &[ROLE_ADMINISTRATOR, ROLE_EDITOR];

/// Whether `role` carries the basic `read` capability.
pub fn grants_read(role: &str) -> bool {
    READ_ROLES.contains(&role)
}

/// Whether `role` may create or edit resources.
pub fn grants_write(role: &str) -> bool {
    WRITE_ROLES.contains(&role)
}
