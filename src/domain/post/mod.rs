// src/domain/post/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{NewPost, Post, PostCategory, PostUpdate};
pub use repository::{PostListFilter, PostRepository};
