pub mod admins;
pub mod audit;
pub mod auth;
pub mod catalog;
pub mod events;
pub mod pagination;
pub mod posts;
pub mod roles;
pub mod serde_time;
pub mod users;

pub use admins::{AdminDto, AdminProfileDto, GrantView};
pub use audit::{ActivityLogDto, FieldChangeDto};
pub use auth::{AuthTokenDto, AuthenticatedAdmin, TokenSubject};
pub use catalog::CatalogEntryDto;
pub use events::EventDto;
pub use pagination::{active_filter, ListParams, Page, SortOrder};
pub use posts::PostDto;
pub use roles::RoleDto;
pub use users::{DeletedUserDto, UserCleanupStatsDto, UserDto, UserStatsDto};
