//! Per-navigation access decisions.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    AccessExplanation, AccessRequirement, Guarded, RolePermissionTable, RouteTable, SessionState,
    authorize, explain_access,
};

/// Redirect targets used by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub login_path: String,
    /// Where authenticated principals land when they lack privilege.
    pub default_path: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            default_path: "/dashboard".to_string(),
        }
    }
}

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateDecision {
    /// Session not restored yet; show a neutral placeholder.
    Loading,
    /// Not signed in. `return_to` is the originally requested location.
    RedirectToLogin { login_path: String, return_to: String },
    /// Signed in but not privileged enough. Never points at the login view.
    Redirect { to: String },
    Render,
}

impl GateDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GateDecision::Render)
    }
}

/// Decides whether the current session may open a view.
#[derive(Debug, Clone)]
pub struct AccessGate {
    table: Arc<RolePermissionTable>,
    config: GateConfig,
}

impl AccessGate {
    pub fn new(table: Arc<RolePermissionTable>) -> Self {
        Self::with_config(table, GateConfig::default())
    }

    pub fn with_config(table: Arc<RolePermissionTable>, config: GateConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &RolePermissionTable {
        &self.table
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Decide for a protected view at `requested`.
    pub fn decide(
        &self,
        state: &SessionState,
        requested: &str,
        requirement: &AccessRequirement,
    ) -> GateDecision {
        let decision = match state {
            SessionState::Loading => GateDecision::Loading,
            SessionState::SignedOut => GateDecision::RedirectToLogin {
                login_path: self.config.login_path.clone(),
                return_to: requested.to_string(),
            },
            SessionState::SignedIn(session) => {
                match authorize(&self.table, &session.user, requirement) {
                    Ok(()) => GateDecision::Render,
                    Err(err) => {
                        tracing::debug!(
                            principal_id = %session.user.id,
                            requested,
                            reason = %err,
                            "access denied"
                        );
                        GateDecision::Redirect {
                            to: self.config.default_path.clone(),
                        }
                    }
                }
            }
        };

        tracing::debug!(requested, ?decision, "gate decision");
        decision
    }

    /// Resolve `path` against `routes` and decide. Public routes always render.
    pub fn navigate(&self, state: &SessionState, routes: &RouteTable, path: &str) -> GateDecision {
        let resolved = routes.resolve(path);
        if resolved.route.is_public() {
            return GateDecision::Render;
        }
        self.decide(state, &resolved.requested, resolved.route.requirement())
    }

    /// Audit view of the decision `navigate` would make for a signed-in principal.
    pub fn explain(
        &self,
        state: &SessionState,
        routes: &RouteTable,
        path: &str,
    ) -> Option<AccessExplanation> {
        let principal = state.principal()?;
        let resolved = routes.resolve(path);
        Some(explain_access(
            &self.table,
            principal,
            resolved.route.requirement(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Permission, Principal, PrincipalId, Role, Session};

    fn signed_in(role: Role) -> SessionState {
        SessionState::SignedIn(Session::new(Principal::new(
            PrincipalId::new(),
            "user@example.com",
            "User",
            role,
        )))
    }

    fn gate() -> AccessGate {
        AccessGate::new(Arc::new(RolePermissionTable::builtin()))
    }

    #[test]
    fn loading_makes_no_decision() {
        let decision = gate().decide(&SessionState::Loading, "/courses", &AccessRequirement::none());
        assert_eq!(decision, GateDecision::Loading);
    }

    #[test]
    fn signed_out_redirects_to_login_with_return_location() {
        let decision = gate().navigate(
            &SessionState::SignedOut,
            &RouteTable::dashboard(),
            "/course/2?tab=lessons",
        );
        assert_eq!(
            decision,
            GateDecision::RedirectToLogin {
                login_path: "/login".into(),
                return_to: "/course/2?tab=lessons".into()
            }
        );
    }

    #[test]
    fn instructor_scenario() {
        let gate = gate();
        let state = signed_in(Role::Instructor);

        let upload = AccessRequirement::role(Role::Instructor).with_permission(Permission::CreateCourse);
        assert_eq!(gate.decide(&state, "/admin/upload", &upload), GateDecision::Render);

        let manage = AccessRequirement::permissions([Permission::ManageStudents]);
        assert_eq!(
            gate.decide(&state, "/students", &manage),
            GateDecision::Redirect {
                to: "/dashboard".into()
            }
        );
    }

    #[test]
    fn admin_content_needs_edit_any_course() {
        let gate = gate();
        let routes = RouteTable::dashboard();

        // Instructors meet the rank but only hold edit_own_course.
        assert!(!gate.navigate(&signed_in(Role::Instructor), &routes, "/admin/content").is_render());
        assert!(gate.navigate(&signed_in(Role::Admin), &routes, "/admin/content").is_render());
        assert!(!gate.navigate(&signed_in(Role::Student), &routes, "/admin/upload").is_render());
    }

    #[test]
    fn public_routes_render_for_everyone() {
        let gate = gate();
        let routes = RouteTable::dashboard();
        assert!(gate.navigate(&SessionState::Loading, &routes, "/login").is_render());
        assert!(gate.navigate(&SessionState::SignedOut, &routes, "/").is_render());
    }

    #[test]
    fn unknown_role_fails_every_gate_with_requirement() {
        let table = RolePermissionTable::builder()
            .role(Role::Student, 1, [Permission::ViewCourses])
            .build();
        let gate = AccessGate::new(Arc::new(table));
        let routes = RouteTable::dashboard();
        let state = signed_in(Role::SuperAdmin);

        assert_eq!(
            gate.navigate(&state, &routes, "/courses"),
            GateDecision::Redirect {
                to: "/dashboard".into()
            }
        );
        assert!(gate.navigate(&state, &routes, "/dashboard").is_render());
    }

    #[test]
    fn custom_redirect_targets() {
        let gate = AccessGate::with_config(
            Arc::new(RolePermissionTable::builtin()),
            GateConfig {
                login_path: "/sign-in".into(),
                default_path: "/home".into(),
            },
        );
        let routes = RouteTable::dashboard();

        assert_eq!(
            gate.navigate(&signed_in(Role::Student), &routes, "/students"),
            GateDecision::Redirect { to: "/home".into() }
        );
        assert!(matches!(
            gate.navigate(&SessionState::SignedOut, &routes, "/students"),
            GateDecision::RedirectToLogin { login_path, .. } if login_path == "/sign-in"
        ));
    }

    #[test]
    fn explain_needs_a_principal() {
        let gate = gate();
        let routes = RouteTable::dashboard();
        assert!(gate.explain(&SessionState::SignedOut, &routes, "/students").is_none());

        let explanation = gate
            .explain(&signed_in(Role::Admin), &routes, "/students")
            .unwrap();
        assert!(explanation.granted);
    }
}
