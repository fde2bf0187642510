// src/domain/event/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{Event, EventUpdate, NewEvent};
pub use repository::{EventListFilter, EventRepository};
