use serde::{Deserialize, Serialize};

use learnhub_core::{CourseId, DomainError, DomainResult, Entity};

use crate::store::InMemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl core::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CourseLevel::Beginner => f.write_str("beginner"),
            CourseLevel::Intermediate => f.write_str("intermediate"),
            CourseLevel::Advanced => f.write_str("advanced"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    /// Display label, e.g. "15 min".
    pub duration: String,
    pub completed: bool,
}

impl Lesson {
    pub fn new(title: &str, duration: &str, completed: bool) -> Self {
        Self {
            title: title.to_string(),
            duration: duration.to_string(),
            completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: CourseLevel,
    /// Display label, e.g. "4 weeks".
    pub duration: String,
    pub students: u32,
    pub rating: f32,
    /// Reported progress percentage (0-100).
    pub progress: u8,
    pub lessons: Vec<Lesson>,
}

impl Course {
    pub fn completed_lessons(&self) -> usize {
        self.lessons.iter().filter(|l| l.completed).count()
    }

    /// Share of completed lessons, rounded down; 0 for a course without lessons.
    pub fn lesson_completion(&self) -> u8 {
        if self.lessons.is_empty() {
            return 0;
        }
        ((self.completed_lessons() * 100) / self.lessons.len()) as u8
    }
}

impl Entity for Course {
    type Id = CourseId;

    fn id(&self) -> CourseId {
        self.id
    }
}

/// Input for [`CourseCatalog::add`]; the id is assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: CourseLevel,
    pub duration: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub duration: Option<String>,
    pub progress: Option<u8>,
    pub lessons: Option<Vec<Lesson>>,
}

#[derive(Debug, Default)]
pub struct CourseCatalog {
    store: InMemoryStore<Course>,
}

impl CourseCatalog {
    pub fn new(courses: impl IntoIterator<Item = Course>) -> Self {
        Self {
            store: InMemoryStore::from_records(courses),
        }
    }

    pub fn get(&self, id: CourseId) -> Option<Course> {
        self.store.get(id)
    }

    pub fn list(&self) -> Vec<Course> {
        self.store.list()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn add(&self, new: NewCourse) -> DomainResult<Course> {
        if new.title.trim().is_empty() {
            return Err(DomainError::validation("course title cannot be empty"));
        }

        let id = self
            .store
            .max_id()
            .map(|id| id.next())
            .unwrap_or(CourseId::new(1));
        let course = Course {
            id,
            title: new.title.trim().to_string(),
            description: new.description,
            category: new.category,
            level: new.level,
            duration: new.duration,
            students: 0,
            rating: 0.0,
            progress: 0,
            lessons: new.lessons,
        };
        self.store.upsert(course.clone());
        tracing::debug!(course_id = %id, "course added");
        Ok(course)
    }

    pub fn update(&self, id: CourseId, patch: CoursePatch) -> DomainResult<Course> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::validation("course title cannot be empty"));
        }

        self.store.update(id, |course| {
            if let Some(title) = patch.title {
                course.title = title.trim().to_string();
            }
            if let Some(description) = patch.description {
                course.description = description;
            }
            if let Some(category) = patch.category {
                course.category = category;
            }
            if let Some(level) = patch.level {
                course.level = level;
            }
            if let Some(duration) = patch.duration {
                course.duration = duration;
            }
            if let Some(progress) = patch.progress {
                course.progress = progress.min(100);
            }
            if let Some(lessons) = patch.lessons {
                course.lessons = lessons;
            }
        })
    }

    pub fn delete(&self, id: CourseId) -> DomainResult<Course> {
        let removed = self.store.remove(id)?;
        tracing::debug!(course_id = %id, "course deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn new_course(title: &str) -> NewCourse {
        NewCourse {
            title: title.to_string(),
            description: "desc".into(),
            category: "Testing".into(),
            level: CourseLevel::Beginner,
            duration: "1 week".into(),
            lessons: vec![],
        }
    }

    #[test]
    fn seeded_catalog() {
        let catalog = CourseCatalog::new(seed::courses());
        assert_eq!(catalog.len(), 6);
        let first = catalog.get(CourseId::new(1)).unwrap();
        assert_eq!(first.title, "Python Automation Fundamentals");
        assert_eq!(first.completed_lessons(), 3);
        assert_eq!(first.lesson_completion(), 37);
    }

    #[test]
    fn add_assigns_next_id() {
        let catalog = CourseCatalog::new(seed::courses());
        let course = catalog.add(new_course("Rust for Automation")).unwrap();
        assert_eq!(course.id, CourseId::new(7));
        assert_eq!(catalog.len(), 7);

        let empty = CourseCatalog::default();
        assert_eq!(empty.add(new_course("First")).unwrap().id, CourseId::new(1));
    }

    #[test]
    fn add_rejects_blank_title() {
        let catalog = CourseCatalog::default();
        assert!(matches!(
            catalog.add(new_course("   ")),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn update_merges_patch() {
        let catalog = CourseCatalog::new(seed::courses());
        let updated = catalog
            .update(
                CourseId::new(2),
                CoursePatch {
                    title: Some("Web Scraping Mastery II".into()),
                    progress: Some(250),
                    ..CoursePatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Web Scraping Mastery II");
        assert_eq!(updated.progress, 100);
        assert_eq!(updated.category, "Data Collection");
        assert_eq!(catalog.get(CourseId::new(2)).unwrap(), updated);
    }

    #[test]
    fn update_and_delete_unknown_id() {
        let catalog = CourseCatalog::new(seed::courses());
        assert_eq!(
            catalog.update(CourseId::new(99), CoursePatch::default()),
            Err(DomainError::NotFound)
        );
        assert_eq!(catalog.delete(CourseId::new(99)), Err(DomainError::NotFound));
    }

    #[test]
    fn delete_removes_course() {
        let catalog = CourseCatalog::new(seed::courses());
        let removed = catalog.delete(CourseId::new(6)).unwrap();
        assert_eq!(removed.title, "Database Automation");
        assert!(catalog.get(CourseId::new(6)).is_none());
        assert_eq!(catalog.len(), 5);
    }
}
