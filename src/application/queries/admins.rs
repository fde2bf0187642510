// src/application/queries/admins.rs
use crate::application::{
    dto::{AdminProfileDto, AuthenticatedAdmin},
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::admin::AdminRepository;
use std::sync::Arc;

pub struct AdminQueryService {
    admin_repo: Arc<dyn AdminRepository>,
}

impl AdminQueryService {
    pub fn new(admin_repo: Arc<dyn AdminRepository>) -> Self {
        Self { admin_repo }
    }

    /// The acting admin's own profile with its resolved grants. Available to
    /// every authenticated admin; there is no permission gate on self-lookup.
    pub async fn profile(&self, actor: &AuthenticatedAdmin) -> ApplicationResult<AdminProfileDto> {
        let admin = self
            .admin_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("account no longer exists"))?;

        if !admin.is_active {
            return Err(ApplicationError::forbidden("account is disabled"));
        }

        Ok(AdminProfileDto::from_parts(admin, actor))
    }
}
