use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability grant checked by the access gate.
///
/// Each variant serializes to its exact token string (e.g. `"view_courses"`);
/// the tokens are shared with the route table and the sidebar, so they must
/// not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewCourses,
    EnrollCourses,
    ViewOwnProgress,
    CreateCourse,
    EditOwnCourse,
    DeleteOwnCourse,
    ViewOwnStudents,
    EditAnyCourse,
    DeleteAnyCourse,
    ViewAllStudents,
    ManageStudents,
    ViewPayments,
    ManageInstructors,
    ManageAdmins,
    ManageSettings,
    ViewAnalytics,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct UnknownPermission(pub String);

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::ViewCourses,
        Permission::EnrollCourses,
        Permission::ViewOwnProgress,
        Permission::CreateCourse,
        Permission::EditOwnCourse,
        Permission::DeleteOwnCourse,
        Permission::ViewOwnStudents,
        Permission::EditAnyCourse,
        Permission::DeleteAnyCourse,
        Permission::ViewAllStudents,
        Permission::ManageStudents,
        Permission::ViewPayments,
        Permission::ManageInstructors,
        Permission::ManageAdmins,
        Permission::ManageSettings,
        Permission::ViewAnalytics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewCourses => "view_courses",
            Permission::EnrollCourses => "enroll_courses",
            Permission::ViewOwnProgress => "view_own_progress",
            Permission::CreateCourse => "create_course",
            Permission::EditOwnCourse => "edit_own_course",
            Permission::DeleteOwnCourse => "delete_own_course",
            Permission::ViewOwnStudents => "view_own_students",
            Permission::EditAnyCourse => "edit_any_course",
            Permission::DeleteAnyCourse => "delete_any_course",
            Permission::ViewAllStudents => "view_all_students",
            Permission::ManageStudents => "manage_students",
            Permission::ViewPayments => "view_payments",
            Permission::ManageInstructors => "manage_instructors",
            Permission::ManageAdmins => "manage_admins",
            Permission::ManageSettings => "manage_settings",
            Permission::ViewAnalytics => "view_analytics",
        }
    }

    /// Short description for audit output.
    ///
    /// Tokens follow an `action_resource` shape, so the description is derived
    /// from the token itself.
    pub fn description(&self) -> String {
        let token = self.as_str();
        let (action, resource) = token.split_once('_').unwrap_or((token, ""));
        let action = match action {
            "view" => "View",
            "enroll" => "Enroll in",
            "create" => "Create",
            "edit" => "Edit",
            "delete" => "Delete",
            "manage" => "Manage",
            other => other,
        };
        format!("{} {}", action, resource.replace('_', " "))
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_serde_names() {
        for perm in Permission::ALL {
            let json = serde_json::to_string(&perm).unwrap();
            assert_eq!(json, format!("\"{}\"", perm.as_str()));
            assert_eq!(perm.as_str().parse::<Permission>(), Ok(perm));
        }
    }

    #[test]
    fn descriptions_read_naturally() {
        assert_eq!(Permission::ViewOwnProgress.description(), "View own progress");
        assert_eq!(Permission::EnrollCourses.description(), "Enroll in courses");
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert!("view_everything".parse::<Permission>().is_err());
    }
}
