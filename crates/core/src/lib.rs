//! `learnhub-core`: shared building blocks for the dashboard domain.
//!
//! Pure types only: no IO, no logging, no storage.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CourseId, StudentId};
