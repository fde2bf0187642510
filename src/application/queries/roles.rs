// src/application/queries/roles.rs
use crate::application::{
    dto::{active_filter, AuthenticatedAdmin, ListParams, Page, RoleDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
};
use crate::domain::role::RoleRepository;
use std::sync::Arc;

pub struct RoleQueryService {
    role_repo: Arc<dyn RoleRepository>,
}

impl RoleQueryService {
    pub fn new(role_repo: Arc<dyn RoleRepository>) -> Self {
        Self { role_repo }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedAdmin,
        params: ListParams,
    ) -> ApplicationResult<Page<RoleDto>> {
        ensure_permitted(actor, "roles", "read")?;

        let (page, limit) = params.normalized();
        let search = active_filter(params.search.clone());

        let (records, total) = self
            .role_repo
            .list_page(limit, params.offset(), search.as_deref())
            .await?;

        Ok(Page::new(records, total, page, limit).map(RoleDto::from))
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedAdmin,
        role_id: i64,
    ) -> ApplicationResult<RoleDto> {
        ensure_permitted(actor, "roles", "read")?;

        let record = self
            .role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("role {role_id}")))?;

        Ok(record.into())
    }
}
