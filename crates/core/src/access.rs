//! Access guard: who may read and who may write resources.
//!
//! The guard is a pure predicate over the caller identity supplied by the
//! authentication layer. Rejections distinguish an anonymous caller (401)
//! from an authenticated caller lacking the capability (403).

use crate::error::CoreError;
use crate::roles;
use crate::types::DbId;

/// Identity of the caller making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No credentials, or credentials that failed validation.
    Anonymous,
    /// A caller authenticated by the identity host.
    User(AuthenticatedUser),
}

/// An authenticated caller and the role set granted to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: DbId,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl Caller {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::User(_))
    }
}

/// Succeeds if the caller holds any role with the basic `read` capability.
pub fn can_read(caller: &Caller) -> Result<&AuthenticatedUser, CoreError> {
    match caller {
        Caller::User(user) if user.roles.iter().any(|r| roles::grants_read(r)) => Ok(user),
        _ => Err(rejection(caller, "You cannot view the download resource.")),
    }
}

/// Succeeds only if the caller's roles include `editor` or `administrator`.
pub fn can_write(caller: &Caller) -> Result<&AuthenticatedUser, CoreError> {
    match caller {
        Caller::User(user) if user.roles.iter().any(|r| roles::grants_write(r)) => Ok(user),
        _ => Err(rejection(
            caller,
            "You do not have the required authorization to create or edit items.",
        )),
    }
}

fn rejection(caller: &Caller, message: &str) -> CoreError {
    if caller.is_authenticated() {
        CoreError::Forbidden(message.to_string())
    } else {
        CoreError::Unauthorized(message.to_string())
    }
}
