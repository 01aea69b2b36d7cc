use core::str::FromStr;

use serde::{Deserialize, Serialize};

use learnhub_auth::Role;
use learnhub_core::{DomainError, DomainResult, Entity, StudentId};

use crate::store::InMemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

/// Status filter used by the roster search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentFilter {
    #[default]
    All,
    Only(StudentStatus),
}

impl StudentFilter {
    fn admits(&self, status: StudentStatus) -> bool {
        match self {
            StudentFilter::All => true,
            StudentFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StudentFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StudentFilter::All),
            "active" => Ok(StudentFilter::Only(StudentStatus::Active)),
            "inactive" => Ok(StudentFilter::Only(StudentStatus::Inactive)),
            other => Err(DomainError::validation(format!("unknown status filter '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub enrolled_courses: u32,
    /// Display label, e.g. "2 days ago".
    pub last_active: String,
    pub status: StudentStatus,
}

impl Entity for Student {
    type Id = StudentId;

    fn id(&self) -> StudentId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: StudentStatus,
}

/// Student roster backing the student-management view.
#[derive(Debug, Default)]
pub struct StudentRoster {
    store: InMemoryStore<Student>,
}

impl StudentRoster {
    pub fn new(students: impl IntoIterator<Item = Student>) -> Self {
        Self {
            store: InMemoryStore::from_records(students),
        }
    }

    pub fn get(&self, id: StudentId) -> Option<Student> {
        self.store.get(id)
    }

    pub fn list(&self) -> Vec<Student> {
        self.store.list()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Add a student with id `max + 1` (1 for an empty roster).
    pub fn add(&self, new: NewStudent) -> DomainResult<Student> {
        validate(&new.name, &new.email)?;

        let id = self
            .store
            .max_id()
            .map(|id| id.next())
            .unwrap_or(StudentId::new(1));
        let student = Student {
            id,
            name: new.name.trim().to_string(),
            email: new.email.trim().to_string(),
            role: new.role,
            enrolled_courses: 0,
            last_active: "Never".to_string(),
            status: new.status,
        };
        self.store.upsert(student.clone());
        tracing::debug!(student_id = %id, "student added");
        Ok(student)
    }

    /// Replace the record with the same id.
    pub fn update(&self, student: Student) -> DomainResult<Student> {
        validate(&student.name, &student.email)?;
        self.store.update(student.id, |existing| *existing = student)
    }

    pub fn delete(&self, id: StudentId) -> DomainResult<Student> {
        let removed = self.store.remove(id)?;
        tracing::debug!(student_id = %id, "student deleted");
        Ok(removed)
    }

    /// Case-insensitive match on name or email, combined with a status filter.
    pub fn search(&self, term: &str, filter: StudentFilter) -> Vec<Student> {
        let needle = term.to_lowercase();
        self.store
            .list()
            .into_iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle) || s.email.to_lowercase().contains(&needle)
            })
            .filter(|s| filter.admits(s.status))
            .collect()
    }
}

fn validate(name: &str, email: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("student name cannot be empty"));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn roster() -> StudentRoster {
        StudentRoster::new(seed::students())
    }

    #[test]
    fn add_uses_max_plus_one() {
        let roster = roster();
        roster.delete(StudentId::new(2)).unwrap();

        let added = roster
            .add(NewStudent {
                name: "Frank Moore".into(),
                email: "frank.moore@example.com".into(),
                role: Role::Student,
                status: StudentStatus::Active,
            })
            .unwrap();

        assert_eq!(added.id, StudentId::new(6));
        assert_eq!(added.enrolled_courses, 0);
        assert_eq!(added.last_active, "Never");
    }

    #[test]
    fn first_student_gets_id_one() {
        let roster = StudentRoster::default();
        let added = roster
            .add(NewStudent {
                name: "Solo".into(),
                email: "solo@example.com".into(),
                role: Role::Student,
                status: StudentStatus::Inactive,
            })
            .unwrap();
        assert_eq!(added.id, StudentId::new(1));
    }

    #[test]
    fn search_is_case_insensitive_on_name_and_email() {
        let roster = roster();
        let by_name = roster.search("ALICE", StudentFilter::All);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Alice Johnson");

        let by_email = roster.search("Bob.Smith@", StudentFilter::All);
        assert_eq!(by_email.len(), 1);

        assert_eq!(roster.search("", StudentFilter::All).len(), 5);
    }

    #[test]
    fn search_applies_status_filter() {
        let roster = roster();
        let inactive = roster.search("", "inactive".parse().unwrap());
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].name, "David Wilson");

        let active = roster.search("d", StudentFilter::Only(StudentStatus::Active));
        assert!(active.iter().all(|s| s.status == StudentStatus::Active));
        assert!("archived".parse::<StudentFilter>().is_err());
    }

    #[test]
    fn update_replaces_record() {
        let roster = roster();
        let mut carol = roster.get(StudentId::new(3)).unwrap();
        carol.status = StudentStatus::Inactive;
        carol.enrolled_courses = 6;

        let updated = roster.update(carol.clone()).unwrap();
        assert_eq!(updated, carol);
        assert_eq!(roster.get(StudentId::new(3)).unwrap(), carol);
    }

    #[test]
    fn update_unknown_student_fails() {
        let roster = roster();
        let mut ghost = roster.get(StudentId::new(1)).unwrap();
        ghost.id = StudentId::new(42);
        assert_eq!(roster.update(ghost), Err(DomainError::NotFound));
    }

    #[test]
    fn invalid_email_rejected() {
        let roster = roster();
        let err = roster
            .add(NewStudent {
                name: "No Email".into(),
                email: "nope".into(),
                role: Role::Student,
                status: StudentStatus::Active,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every search hit contains the term, whatever its case.
            #[test]
            fn search_hits_contain_term(term in "[a-zA-Z.@]{0,6}") {
                let roster = roster();
                let needle = term.to_lowercase();
                for s in roster.search(&term, StudentFilter::All) {
                    prop_assert!(
                        s.name.to_lowercase().contains(&needle)
                            || s.email.to_lowercase().contains(&needle)
                    );
                }
            }
        }
    }
}
