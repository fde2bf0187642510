// src/domain/audit/mod.rs
pub mod diff;
mod diff_tests;
pub mod entity;
pub mod filter;
pub mod repository;

pub use diff::{diff_changes, FieldChange};
pub use entity::{Action, ActivityLog, ChangeSet, DeviceInfo, GeoLocation, NewActivityLog};
pub use filter::ActivityLogFilter;
pub use repository::ActivityLogRepository;
