// tests/support/mod.rs
//
// In-memory repository fakes and fixtures shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use backoffice_core::application::dto::AuthenticatedAdmin;
use backoffice_core::application::ports::enrichment::UserAgentInspector;
use backoffice_core::application::ports::time::Clock;
use backoffice_core::domain::admin::{Admin, AdminId, AdminRepository, AdminUpdate, Grant, NewAdmin, Role};
use backoffice_core::domain::audit::{
    ActivityLog, ActivityLogFilter, ActivityLogRepository, DeviceInfo, NewActivityLog,
};
use backoffice_core::domain::errors::{DomainError, DomainResult};
use backoffice_core::domain::role::{NewRoleRecord, RoleRecord, RoleRecordUpdate, RoleRepository};
use backoffice_core::domain::user::{
    NewUser, User, UserCleanupStats, UserId, UserListFilter, UserRepository, UserStats, UserUpdate,
};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct NullUserAgentInspector;

impl UserAgentInspector for NullUserAgentInspector {
    fn inspect(&self, _user_agent: &str) -> Option<DeviceInfo> {
        None
    }
}

pub fn super_admin() -> AuthenticatedAdmin {
    AuthenticatedAdmin {
        id: AdminId(1),
        email: "root@example.com".into(),
        display_name: "Root".into(),
        role: Role::SuperAdmin,
        issued_at: fixed_now(),
        expires_at: fixed_now() + chrono::Duration::hours(1),
    }
}

pub fn admin_with_grants(role_name: &str, grants: &[(&str, &str)]) -> AuthenticatedAdmin {
    let grants: HashSet<Grant> = grants
        .iter()
        .map(|(resource, action)| Grant::new(*resource, *action))
        .collect();
    AuthenticatedAdmin {
        id: AdminId(2),
        email: "operator@example.com".into(),
        display_name: "Operator".into(),
        role: Role::named(role_name, grants),
        issued_at: fixed_now(),
        expires_at: fixed_now() + chrono::Duration::hours(1),
    }
}

// ---- users ----

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

fn matches_filter(user: &User, filter: &UserListFilter) -> bool {
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        if !user.full_name.to_lowercase().contains(&needle)
            && !user.email.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if user.status != status {
            return false;
        }
    }
    if let Some(city) = &filter.city {
        if user.city.as_deref() != Some(city.as_str()) {
            return false;
        }
    }
    if let Some(organisation) = &filter.organisation {
        if user.organisation.as_deref() != Some(organisation.as_str()) {
            return false;
        }
    }
    if let Some(institute) = &filter.institute {
        if user.institute.as_deref() != Some(institute.as_str()) {
            return false;
        }
    }
    if let Some(from) = filter.created_from {
        if user.created_at < from {
            return false;
        }
    }
    if let Some(to) = filter.created_to {
        if user.created_at >= to {
            return false;
        }
    }
    true
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id: UserId(id),
            full_name: new_user.full_name,
            email: new_user.email,
            status: new_user.status,
            city: new_user.city,
            organisation: new_user.organisation,
            institute: new_user.institute,
            deleted_at: None,
            purge_after: None,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("user {}", i64::from(update.id))))?;
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        if let Some(city) = update.city {
            user.city = city;
        }
        if let Some(organisation) = update.organisation {
            user.organisation = organisation;
        }
        if let Some(institute) = update.institute {
            user.institute = institute;
        }
        user.updated_at = update.updated_at;
        Ok(user.clone())
    }

    async fn mark_trashed(
        &self,
        id: UserId,
        deleted_at: DateTime<Utc>,
        purge_after: DateTime<Utc>,
    ) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("user {}", i64::from(id))))?;
        if user.deleted_at.is_some() {
            return Err(DomainError::Conflict("user is already in the trash".into()));
        }
        user.deleted_at = Some(deleted_at);
        user.purge_after = Some(purge_after);
        Ok(user.clone())
    }

    async fn clear_trashed(&self, id: UserId) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("user {}", i64::from(id))))?;
        if user.deleted_at.is_none() {
            return Err(DomainError::Conflict("user is not in the trash".into()));
        }
        user.deleted_at = None;
        user.purge_after = None;
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::NotFound(format!("user {}", i64::from(id))));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &UserListFilter,
        sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<User>, u64)> {
        let users = self.users.lock().unwrap();
        let mut matched: Vec<User> = users
            .iter()
            .filter(|u| u.deleted_at.is_none() && matches_filter(u, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let ordering = match sort_column {
                "full_name" => a.full_name.cmp(&b.full_name),
                "email" => a.email.cmp(&b.email),
                "status" => a.status.as_str().cmp(b.status.as_str()),
                "city" => a.city.cmp(&b.city),
                _ => a.created_at.cmp(&b.created_at),
            };
            let ordering = ordering.then(i64::from(a.id).cmp(&i64::from(b.id)));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_trashed_page(&self, limit: u32, offset: u64) -> DomainResult<(Vec<User>, u64)> {
        let users = self.users.lock().unwrap();
        let mut matched: Vec<User> = users
            .iter()
            .filter(|u| u.deleted_at.is_some())
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn stats(&self) -> DomainResult<UserStats> {
        let users = self.users.lock().unwrap();
        let trashed = users.iter().filter(|u| u.deleted_at.is_some()).count() as u64;
        let total = users.len() as u64;
        Ok(UserStats {
            active: total - trashed,
            trashed,
            total,
        })
    }

    async fn cleanup_stats(&self, now: DateTime<Utc>) -> DomainResult<UserCleanupStats> {
        let users = self.users.lock().unwrap();
        let trashed: Vec<&User> = users.iter().filter(|u| u.deleted_at.is_some()).collect();
        let due_for_purge = trashed
            .iter()
            .filter(|u| u.purge_after.is_some_and(|horizon| horizon <= now))
            .count() as u64;
        let next_purge_at = trashed.iter().filter_map(|u| u.purge_after).min();
        Ok(UserCleanupStats {
            trashed: trashed.len() as u64,
            due_for_purge,
            next_purge_at,
        })
    }
}

// ---- activity logs ----

#[derive(Default)]
pub struct InMemoryActivityLogRepo {
    logs: Mutex<Vec<ActivityLog>>,
    next_id: AtomicI64,
}

impl InMemoryActivityLogRepo {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn entries(&self) -> Vec<ActivityLog> {
        self.logs.lock().unwrap().clone()
    }

    /// Poll until the background recorder has flushed `count` entries.
    pub async fn wait_for_entries(&self, count: usize) -> Vec<ActivityLog> {
        for _ in 0..200 {
            let entries = self.entries();
            if entries.len() >= count {
                return entries;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {count} activity log entries, found {}",
            self.entries().len()
        );
    }
}

fn matches_log(log: &ActivityLog, filter: &ActivityLogFilter) -> bool {
    if let Some(actor_id) = filter.actor_id {
        if log.actor_id.map(i64::from) != Some(actor_id) {
            return false;
        }
    }
    if let Some(action) = filter.action {
        if log.action != action {
            return false;
        }
    }
    if let Some(resource_type) = &filter.resource_type {
        if log.resource_type.as_deref() != Some(resource_type.as_str()) {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        if !log
            .description
            .to_lowercase()
            .contains(&search.to_lowercase())
        {
            return false;
        }
    }
    if let Some(from) = filter.created_from {
        if log.created_at < from {
            return false;
        }
    }
    if let Some(to) = filter.created_to {
        if log.created_at >= to {
            return false;
        }
    }
    true
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLogRepo {
    async fn insert(&self, log: NewActivityLog) -> DomainResult<()> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.logs.lock().unwrap().push(ActivityLog {
            id,
            actor_id: log.actor_id,
            action: log.action,
            resource_type: log.resource_type,
            resource_id: log.resource_id,
            description: log.description,
            changes: log.changes,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            device: log.device,
            location: log.location,
            metadata: log.metadata,
            created_at: log.created_at,
        });
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &ActivityLogFilter,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<ActivityLog>, u64)> {
        let logs = self.logs.lock().unwrap();
        let mut matched: Vec<ActivityLog> = logs
            .iter()
            .filter(|log| matches_log(log, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}

// ---- admins ----

#[derive(Default)]
pub struct InMemoryAdminRepo {
    admins: Mutex<Vec<Admin>>,
    next_id: AtomicI64,
}

impl InMemoryAdminRepo {
    pub fn new() -> Self {
        Self {
            admins: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepo {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.admins.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_admin: NewAdmin) -> DomainResult<Admin> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.email == new_admin.email) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let admin = Admin {
            id: AdminId(id),
            email: new_admin.email,
            display_name: new_admin.display_name,
            password_hash: new_admin.password_hash,
            role_name: new_admin.role_name,
            is_active: new_admin.is_active,
            created_at: new_admin.created_at,
        };
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_by_email(
        &self,
        email: &backoffice_core::domain::admin::Email,
    ) -> DomainResult<Option<Admin>> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: AdminId) -> DomainResult<Option<Admin>> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn update(&self, update: AdminUpdate) -> DomainResult<Admin> {
        let mut admins = self.admins.lock().unwrap();
        let admin = admins
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("admin {}", i64::from(update.id))))?;
        if let Some(display_name) = update.display_name {
            admin.display_name = display_name;
        }
        if let Some(role_name) = update.role_name {
            admin.role_name = role_name;
        }
        if let Some(is_active) = update.is_active {
            admin.is_active = is_active;
        }
        if let Some(password_hash) = update.password_hash {
            admin.password_hash = password_hash;
        }
        Ok(admin.clone())
    }
}

// ---- roles ----

#[derive(Default)]
pub struct InMemoryRoleRepo {
    roles: Mutex<Vec<RoleRecord>>,
    next_id: AtomicI64,
}

impl InMemoryRoleRepo {
    pub fn new() -> Self {
        Self {
            roles: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepo {
    async fn insert(&self, new_role: NewRoleRecord) -> DomainResult<RoleRecord> {
        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == new_role.name) {
            return Err(DomainError::Conflict("role name already exists".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = RoleRecord {
            id,
            name: new_role.name,
            grants: new_role.grants,
            created_at: new_role.created_at,
        };
        roles.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<RoleRecord>> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<RoleRecord>> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn update(&self, update: RoleRecordUpdate) -> DomainResult<RoleRecord> {
        let mut roles = self.roles.lock().unwrap();
        let record = roles
            .iter_mut()
            .find(|r| r.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("role {}", update.id)))?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(grants) = update.grants {
            record.grants = grants;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut roles = self.roles.lock().unwrap();
        let before = roles.len();
        roles.retain(|r| r.id != id);
        if roles.len() == before {
            return Err(DomainError::NotFound(format!("role {id}")));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        limit: u32,
        offset: u64,
        search: Option<&str>,
    ) -> DomainResult<(Vec<RoleRecord>, u64)> {
        let roles = self.roles.lock().unwrap();
        let mut matched: Vec<RoleRecord> = roles
            .iter()
            .filter(|r| {
                search.is_none_or(|needle| r.name.to_lowercase().contains(&needle.to_lowercase()))
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}

// ---- posts ----

use backoffice_core::domain::post::{NewPost, Post, PostRepository, PostUpdate};
use backoffice_core::domain::post::repository::PostListFilter;

#[derive(Default)]
pub struct InMemoryPostRepo {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepo {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepo {
    async fn insert(&self, new_post: NewPost) -> DomainResult<Post> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let post = Post {
            id,
            title: new_post.title,
            body: new_post.body,
            category: new_post.category,
            published: new_post.published,
            author_name: new_post.author_name,
            created_at: new_post.created_at,
            updated_at: new_post.created_at,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("post {}", update.id)))?;
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(body) = update.body {
            post.body = body;
        }
        if let Some(category) = update.category {
            post.category = category;
        }
        if let Some(published) = update.published {
            post.published = published;
        }
        post.updated_at = update.updated_at;
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(DomainError::NotFound(format!("post {id}")));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &PostListFilter,
        _sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<Post>, u64)> {
        let posts = self.posts.lock().unwrap();
        let mut matched: Vec<Post> = posts
            .iter()
            .filter(|p| {
                filter.category.is_none_or(|c| p.category == c)
                    && filter.published.is_none_or(|published| p.published == published)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let ordering = a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}

// ---- events ----

use backoffice_core::domain::event::{Event, EventRepository, EventUpdate, NewEvent};
use backoffice_core::domain::event::repository::EventListFilter;

#[derive(Default)]
pub struct InMemoryEventRepo {
    events: Mutex<Vec<Event>>,
    next_id: AtomicI64,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepo {
    async fn insert(&self, new_event: NewEvent) -> DomainResult<Event> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let event = Event {
            id,
            title: new_event.title,
            description: new_event.description,
            venue: new_event.venue,
            category: new_event.category,
            starts_at: new_event.starts_at,
            ends_at: new_event.ends_at,
            created_at: new_event.created_at,
            updated_at: new_event.created_at,
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Event>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn update(&self, update: EventUpdate) -> DomainResult<Event> {
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("event {}", update.id)))?;
        if let Some(title) = update.title {
            event.title = title;
        }
        if let Some(description) = update.description {
            event.description = description;
        }
        if let Some(venue) = update.venue {
            event.venue = venue;
        }
        if let Some(category) = update.category {
            event.category = category;
        }
        if let Some(starts_at) = update.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(ends_at) = update.ends_at {
            event.ends_at = ends_at;
        }
        event.updated_at = update.updated_at;
        Ok(event.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(DomainError::NotFound(format!("event {id}")));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        filter: &EventListFilter,
        _sort_column: &str,
        descending: bool,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<Event>, u64)> {
        let events = self.events.lock().unwrap();
        let mut matched: Vec<Event> = events
            .iter()
            .filter(|e| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| e.category == c)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            let ordering = a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}

// ---- catalogs ----

use backoffice_core::domain::catalog::{
    CatalogEntry, CatalogEntryUpdate, CatalogKind, CatalogRepository, NewCatalogEntry,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryCatalogRepo {
    entries: Mutex<HashMap<CatalogKind, Vec<CatalogEntry>>>,
    next_id: AtomicI64,
}

impl InMemoryCatalogRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepo {
    async fn insert(&self, kind: CatalogKind, entry: NewCatalogEntry) -> DomainResult<CatalogEntry> {
        let mut entries = self.entries.lock().unwrap();
        let bucket = entries.entry(kind).or_default();
        if bucket.iter().any(|e| e.name == entry.name) {
            return Err(DomainError::Conflict("name already exists".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = CatalogEntry {
            id,
            name: entry.name,
            city: entry.city,
            created_at: entry.created_at,
        };
        bucket.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_id(&self, kind: CatalogKind, id: i64) -> DomainResult<Option<CatalogEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&kind)
            .and_then(|bucket| bucket.iter().find(|e| e.id == id).cloned()))
    }

    async fn update(
        &self,
        kind: CatalogKind,
        update: CatalogEntryUpdate,
    ) -> DomainResult<CatalogEntry> {
        let mut entries = self.entries.lock().unwrap();
        let bucket = entries.entry(kind).or_default();
        let entry = bucket
            .iter_mut()
            .find(|e| e.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("{kind} {}", update.id)))?;
        if let Some(name) = update.name {
            entry.name = name;
        }
        if let Some(city) = update.city {
            entry.city = city;
        }
        Ok(entry.clone())
    }

    async fn delete(&self, kind: CatalogKind, id: i64) -> DomainResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let bucket = entries.entry(kind).or_default();
        let before = bucket.len();
        bucket.retain(|e| e.id != id);
        if bucket.len() == before {
            return Err(DomainError::NotFound(format!("{kind} {id}")));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        kind: CatalogKind,
        search: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> DomainResult<(Vec<CatalogEntry>, u64)> {
        let entries = self.entries.lock().unwrap();
        let mut matched: Vec<CatalogEntry> = entries
            .get(&kind)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|e| {
                        search.is_none_or(|needle| {
                            e.name.to_lowercase().contains(&needle.to_lowercase())
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}
