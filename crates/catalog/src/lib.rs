//! Course and student catalogs.
//!
//! Plain in-memory collections seeded with demo data. Records are added,
//! patched and deleted by id; there are no invariants across entities.

pub mod course;
pub mod seed;
pub mod store;
pub mod student;

pub use course::{Course, CourseCatalog, CourseLevel, CoursePatch, Lesson, NewCourse};
pub use store::InMemoryStore;
pub use student::{NewStudent, Student, StudentFilter, StudentRoster, StudentStatus};
