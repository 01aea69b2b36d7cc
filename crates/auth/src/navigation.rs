//! Sidebar menu filtered by what the principal may open.

use crate::{AccessRequirement, Guarded, Permission, Principal, Role, RolePermissionTable, authorize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub requirement: AccessRequirement,
}

impl MenuItem {
    fn new(label: &'static str, path: &'static str, requirement: AccessRequirement) -> Self {
        Self {
            label,
            path,
            requirement,
        }
    }
}

impl Guarded for MenuItem {
    fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub main: Vec<MenuItem>,
    pub admin: Vec<MenuItem>,
}

/// Menu entries a principal is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleMenu<'a> {
    pub main: Vec<&'a MenuItem>,
    pub admin: Vec<&'a MenuItem>,
}

impl Menu {
    pub fn dashboard() -> Self {
        let perm = |p: Permission| AccessRequirement::permissions([p]);
        let instructor = |p: Permission| AccessRequirement::role(Role::Instructor).with_permission(p);

        Self {
            main: vec![
                MenuItem::new("Home", "/", AccessRequirement::none()),
                MenuItem::new("Dashboard", "/dashboard", AccessRequirement::none()),
                MenuItem::new("Courses", "/courses", perm(Permission::ViewCourses)),
                MenuItem::new("Progress", "/progress", perm(Permission::ViewAllStudents)),
                MenuItem::new("Students", "/students", perm(Permission::ManageStudents)),
                MenuItem::new("Settings", "/settings", AccessRequirement::none()),
            ],
            admin: vec![
                MenuItem::new("Upload Course", "/admin/upload", instructor(Permission::CreateCourse)),
                MenuItem::new("Manage Content", "/admin/content", instructor(Permission::EditAnyCourse)),
            ],
        }
    }

    pub fn visible_for<'a>(
        &'a self,
        table: &RolePermissionTable,
        principal: &Principal,
    ) -> VisibleMenu<'a> {
        let allowed = |items: &'a [MenuItem]| -> Vec<&'a MenuItem> {
            items
                .iter()
                .filter(|item| authorize(table, principal, item.requirement()).is_ok())
                .collect()
        };

        VisibleMenu {
            main: allowed(&self.main),
            admin: allowed(&self.admin),
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::dashboard()
    }
}
