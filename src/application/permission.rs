// src/application/permission.rs
use crate::application::{
    dto::AuthenticatedAdmin,
    error::{ApplicationError, ApplicationResult},
};

/// Gate an action on the actor's resolved role.
///
/// The denial message names the missing `(resource, action)` pair and the
/// actor's actual role so the caller can render an explicit access-denied
/// state instead of a silent redirect.
pub fn ensure_permitted(
    actor: &AuthenticatedAdmin,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.role.permits(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing grant {resource}:{action} (role '{}')",
            actor.role.name()
        )))
    }
}
