//! Static demo user registry.
//!
//! Stands in for an identity provider: a fixed list of users with plain-text
//! demo passwords. It is not a credential store.

use thiserror::Error;
use uuid::Uuid;

use crate::{Principal, PrincipalId, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("User not found")]
    UnknownUser,

    #[error("Invalid password")]
    InvalidPassword,
}

#[derive(Debug, Clone)]
struct DirectoryEntry {
    principal: Principal,
    password: String,
}

/// Email → principal/password registry.
///
/// Lookups return the first entry with a matching email; duplicates are
/// accepted on enrollment.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    entries: Vec<DirectoryEntry>,
}

impl UserDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The three demo accounts shipped with the dashboard.
    pub fn demo() -> Self {
        let mut directory = Self::empty();
        directory.enroll(
            Principal::new(
                PrincipalId::from_uuid(Uuid::from_u128(1)),
                "meistericham@gmail.com",
                "Super Admin",
                Role::SuperAdmin,
            ),
            "Sam1122334455!",
        );
        directory.enroll(
            Principal::new(
                PrincipalId::from_uuid(Uuid::from_u128(2)),
                "john.doe@example.com",
                "John Doe",
                Role::Instructor,
            ),
            "password123",
        );
        directory.enroll(
            Principal::new(
                PrincipalId::from_uuid(Uuid::from_u128(3)),
                "student@example.com",
                "Student User",
                Role::Student,
            ),
            "password123",
        );
        directory
    }

    pub fn enroll(&mut self, principal: Principal, password: impl Into<String>) {
        self.entries.push(DirectoryEntry {
            principal,
            password: password.into(),
        });
    }

    /// Replace the principal enrolled under the same id, keeping its password.
    ///
    /// Returns `false` when no entry has that id.
    pub fn update(&mut self, principal: Principal) -> bool {
        match self.entries.iter_mut().find(|e| e.principal.id == principal.id) {
            Some(entry) => {
                entry.principal = principal;
                true
            }
            None => false,
        }
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Principal> {
        self.entry(email).map(|e| &e.principal)
    }

    /// Check a password for an email and return the matching principal.
    pub fn verify(&self, email: &str, password: &str) -> Result<Principal, AuthenticationError> {
        let entry = self.entry(email).ok_or(AuthenticationError::UnknownUser)?;
        if entry.password != password {
            return Err(AuthenticationError::InvalidPassword);
        }
        Ok(entry.principal.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, email: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.principal.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_accounts_verify() {
        let directory = UserDirectory::demo();
        assert_eq!(directory.len(), 3);

        let owner = directory.verify("meistericham@gmail.com", "Sam1122334455!").unwrap();
        assert_eq!(owner.role, Role::SuperAdmin);

        let instructor = directory.verify("john.doe@example.com", "password123").unwrap();
        assert_eq!(instructor.display_name, "John Doe");
    }

    #[test]
    fn wrong_password_and_unknown_user() {
        let directory = UserDirectory::demo();
        assert_eq!(
            directory.verify("student@example.com", "nope"),
            Err(AuthenticationError::InvalidPassword)
        );
        assert_eq!(
            directory.verify("ghost@example.com", "password123"),
            Err(AuthenticationError::UnknownUser)
        );
    }

    #[test]
    fn update_replaces_entry_by_id_and_keeps_password() {
        let mut directory = UserDirectory::demo();
        let mut student = directory.verify("student@example.com", "password123").unwrap();
        student.email = "moved@example.com".into();
        student.display_name = "Moved".into();

        assert!(directory.update(student.clone()));
        assert_eq!(directory.verify("moved@example.com", "password123"), Ok(student));
        assert_eq!(
            directory.verify("student@example.com", "password123"),
            Err(AuthenticationError::UnknownUser)
        );

        let stranger = Principal::new(PrincipalId::new(), "x@example.com", "X", Role::Student);
        assert!(!directory.update(stranger));
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn first_enrollment_wins_on_duplicate_email() {
        let mut directory = UserDirectory::empty();
        let first = Principal::new(PrincipalId::new(), "dup@example.com", "First", Role::Student);
        let second = Principal::new(PrincipalId::new(), "dup@example.com", "Second", Role::Admin);
        directory.enroll(first.clone(), "a");
        directory.enroll(second, "b");

        assert_eq!(directory.find_by_email("dup@example.com"), Some(&first));
        assert_eq!(
            directory.verify("dup@example.com", "b"),
            Err(AuthenticationError::InvalidPassword)
        );
    }
}
