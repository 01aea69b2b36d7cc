//! Dashboard route table.

use crate::{AccessRequirement, Guarded, Permission, Role};

/// How a route is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Open to everyone, signed in or not.
    Public,
    /// Requires a session plus whatever the requirement demands.
    Protected(AccessRequirement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Path pattern; `:name` segments match one non-empty segment.
    pub pattern: String,
    pub title: String,
    pub access: Access,
}

static UNRESTRICTED: AccessRequirement = AccessRequirement {
    role: None,
    permissions: Vec::new(),
};

impl Route {
    pub fn public(pattern: &str, title: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            title: title.to_string(),
            access: Access::Public,
        }
    }

    pub fn protected(pattern: &str, title: &str, requirement: AccessRequirement) -> Self {
        Self {
            pattern: pattern.to_string(),
            title: title.to_string(),
            access: Access::Protected(requirement),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self.access, Access::Public)
    }

    /// Match `path` against the pattern, returning captured parameters.
    fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let pattern: Vec<&str> = segments(&self.pattern).collect();
        let actual: Vec<&str> = segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = Vec::new();
        for (p, a) in pattern.iter().zip(actual.iter()) {
            match p.strip_prefix(':') {
                Some(name) => params.push((name.to_string(), a.to_string())),
                None if p == a => {}
                None => return None,
            }
        }
        Some(params)
    }
}

impl Guarded for Route {
    fn requirement(&self) -> &AccessRequirement {
        match &self.access {
            Access::Public => &UNRESTRICTED,
            Access::Protected(req) => req,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A path resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub route: &'a Route,
    /// The path as requested (query string included).
    pub requested: String,
    pub params: Vec<(String, String)>,
    /// `true` when no route matched and the fallback was used.
    pub fallback: bool,
}

impl ResolvedRoute<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Route,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, fallback: Route) -> Self {
        Self { routes, fallback }
    }

    /// The dashboard's routes. Unknown paths render the dashboard.
    pub fn dashboard() -> Self {
        let view_courses = || AccessRequirement::permissions([Permission::ViewCourses]);

        let routes = vec![
            Route::public("/", "Home"),
            Route::public("/login", "Login"),
            Route::protected("/dashboard", "Dashboard", AccessRequirement::none()),
            Route::protected("/courses", "Courses", view_courses()),
            Route::protected("/course/:id", "Course", view_courses()),
            Route::protected(
                "/progress",
                "Student Progress",
                AccessRequirement::permissions([Permission::ViewAllStudents]),
            ),
            Route::protected(
                "/students",
                "Student Management",
                AccessRequirement::permissions([Permission::ManageStudents]),
            ),
            Route::protected("/settings", "Settings", AccessRequirement::none()),
            Route::protected("/profile", "Profile", AccessRequirement::none()),
            Route::protected(
                "/admin/upload",
                "Upload Course",
                AccessRequirement::role(Role::Instructor).with_permission(Permission::CreateCourse),
            ),
            Route::protected(
                "/admin/content",
                "Manage Content",
                AccessRequirement::role(Role::Instructor).with_permission(Permission::EditAnyCourse),
            ),
        ];

        let fallback = Route::protected("/dashboard", "Dashboard", AccessRequirement::none());
        Self::new(routes, fallback)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a path; the first matching route wins.
    pub fn resolve(&self, path: &str) -> ResolvedRoute<'_> {
        let bare = path.split(['?', '#']).next().unwrap_or_default();

        for route in &self.routes {
            if let Some(params) = route.matches(bare) {
                return ResolvedRoute {
                    route,
                    requested: path.to_string(),
                    params,
                    fallback: false,
                };
            }
        }

        ResolvedRoute {
            route: &self.fallback,
            requested: path.to_string(),
            params: Vec::new(),
            fallback: true,
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::dashboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_static_and_parameterised_paths() {
        let table = RouteTable::dashboard();

        let courses = table.resolve("/courses");
        assert_eq!(courses.route.pattern, "/courses");
        assert!(!courses.fallback);

        let detail = table.resolve("/course/3?tab=lessons");
        assert_eq!(detail.route.pattern, "/course/:id");
        assert_eq!(detail.param("id"), Some("3"));
        assert_eq!(detail.requested, "/course/3?tab=lessons");
    }

    #[test]
    fn unknown_paths_fall_back_to_dashboard() {
        let table = RouteTable::dashboard();
        let resolved = table.resolve("/no/such/page");
        assert!(resolved.fallback);
        assert_eq!(resolved.route.pattern, "/dashboard");
        assert!(resolved.route.requirement().is_unrestricted());
        assert!(!resolved.route.is_public());
    }

    #[test]
    fn trailing_slash_and_root() {
        let table = RouteTable::dashboard();
        assert_eq!(table.resolve("/students/").route.pattern, "/students");
        assert!(table.resolve("/").route.is_public());
        assert!(table.resolve("/course/").fallback);
    }

    #[test]
    fn admin_routes_require_instructor_rank() {
        let table = RouteTable::dashboard();
        let upload = table.resolve("/admin/upload");
        assert_eq!(upload.route.requirement().role, Some(Role::Instructor));
        assert_eq!(
            upload.route.requirement().permissions,
            vec![Permission::CreateCourse]
        );
    }
}
