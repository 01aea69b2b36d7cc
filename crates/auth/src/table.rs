//! Static role → rank / permission mapping.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Permission, Role};

/// Rank reported for roles missing from the table; below every real rank.
pub const MIN_RANK: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RoleEntry {
    rank: u8,
    permissions: BTreeSet<Permission>,
}

/// Immutable mapping from role to rank and to granted permissions.
///
/// Loaded once at process start and shared by reference (usually behind an
/// `Arc`). A role that is absent from the table ranks [`MIN_RANK`] and grants
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionTable {
    entries: BTreeMap<Role, RoleEntry>,
}

impl RolePermissionTable {
    pub fn builder() -> RolePermissionTableBuilder {
        RolePermissionTableBuilder::default()
    }

    /// The dashboard's built-in hierarchy.
    pub fn builtin() -> Self {
        use Permission::*;

        Self::builder()
            .role(Role::Student, 1, [ViewCourses, EnrollCourses, ViewOwnProgress])
            .role(
                Role::Instructor,
                2,
                [ViewCourses, CreateCourse, EditOwnCourse, DeleteOwnCourse, ViewOwnStudents],
            )
            .role(
                Role::Admin,
                3,
                [
                    ViewCourses,
                    CreateCourse,
                    EditAnyCourse,
                    DeleteAnyCourse,
                    ViewAllStudents,
                    ManageStudents,
                    ViewPayments,
                ],
            )
            .role(
                Role::SuperAdmin,
                4,
                [
                    ViewCourses,
                    CreateCourse,
                    EditAnyCourse,
                    DeleteAnyCourse,
                    ViewAllStudents,
                    ManageStudents,
                    ManageInstructors,
                    ManageAdmins,
                    ViewPayments,
                    ManageSettings,
                    ViewAnalytics,
                ],
            )
            .build()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.entries.contains_key(&role)
    }

    /// Rank of a role known to the table.
    pub fn rank_of(&self, role: Role) -> Option<u8> {
        self.entries.get(&role).map(|e| e.rank)
    }

    /// Rank of any role; unknown roles rank [`MIN_RANK`].
    pub fn rank(&self, role: Role) -> u8 {
        self.rank_of(role).unwrap_or(MIN_RANK)
    }

    /// Permissions granted to a role (empty for unknown roles).
    pub fn permissions(&self, role: Role) -> impl Iterator<Item = Permission> + '_ {
        self.entries
            .get(&role)
            .into_iter()
            .flat_map(|e| e.permissions.iter().copied())
    }

    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.entries
            .get(&role)
            .is_some_and(|e| e.permissions.contains(&permission))
    }

    /// Known roles, lowest rank first.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<(u8, Role)> = self.entries.iter().map(|(r, e)| (e.rank, *r)).collect();
        roles.sort();
        roles.into_iter().map(|(_, r)| r).collect()
    }
}

impl Default for RolePermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for custom tables (tests, alternative deployments).
#[derive(Debug, Default)]
pub struct RolePermissionTableBuilder {
    entries: BTreeMap<Role, RoleEntry>,
}

impl RolePermissionTableBuilder {
    /// Register a role; registering the same role twice replaces the entry.
    pub fn role(
        mut self,
        role: Role,
        rank: u8,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        self.entries.insert(
            role,
            RoleEntry {
                rank,
                permissions: permissions.into_iter().collect(),
            },
        );
        self
    }

    pub fn build(self) -> RolePermissionTable {
        RolePermissionTable {
            entries: self.entries,
        }
    }
}
