use serde::Serialize;
use thiserror::Error;

use crate::table::MIN_RANK;
use crate::{Permission, Principal, PrincipalId, Role, RolePermissionTable};

/// What a protected view demands of the principal.
///
/// An empty requirement admits any authenticated principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessRequirement {
    pub role: Option<Role>,
    pub permissions: Vec<Permission>,
}

impl AccessRequirement {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            permissions: Vec::new(),
        }
    }

    pub fn permissions(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            role: None,
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.role.is_none() && self.permissions.is_empty()
    }
}

/// Anything guarded by an [`AccessRequirement`] (routes, menu items).
pub trait Guarded {
    fn requirement(&self) -> &AccessRequirement;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("role '{0}' is not in the permission table")]
    UnknownRole(Role),

    #[error("insufficient rank: requires '{required}', principal is '{actual}'")]
    InsufficientRank { required: Role, actual: Role },

    #[error("forbidden: missing permission '{0}'")]
    MissingPermission(Permission),
}

/// `true` iff the principal's rank is at least the rank of `required`.
///
/// Either role being absent from the table yields `false`.
pub fn has_role(table: &RolePermissionTable, principal: &Principal, required: Role) -> bool {
    match (table.rank_of(principal.role), table.rank_of(required)) {
        (Some(have), Some(need)) => have >= need,
        _ => false,
    }
}

pub fn has_permission(
    table: &RolePermissionTable,
    principal: &Principal,
    permission: Permission,
) -> bool {
    table.grants(principal.role, permission)
}

/// Check a principal against a requirement.
///
/// The role is checked before the permissions; the first failure is reported.
/// Pure policy check: no IO, no panics.
pub fn authorize(
    table: &RolePermissionTable,
    principal: &Principal,
    requirement: &AccessRequirement,
) -> Result<(), AuthzError> {
    if requirement.is_unrestricted() {
        return Ok(());
    }

    if !table.contains(principal.role) {
        return Err(AuthzError::UnknownRole(principal.role));
    }

    if let Some(required) = requirement.role {
        if !has_role(table, principal, required) {
            return Err(AuthzError::InsufficientRank {
                required,
                actual: principal.role,
            });
        }
    }

    match requirement
        .permissions
        .iter()
        .find(|p| !has_permission(table, principal, **p))
    {
        Some(missing) => Err(AuthzError::MissingPermission(*missing)),
        None => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub requirement: AccessRequirement,
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    pub principal: PrincipalState,

    /// Present only when access was denied.
    pub denial_reason: Option<DenialReason>,
}

/// The principal as the table sees it.
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalState {
    pub principal_id: PrincipalId,
    pub role: Role,
    pub role_known: bool,
    pub rank: u8,
    pub effective_permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    UnknownRole,
    InsufficientRank,
    MissingPermission,
}

/// Explain why an access decision was (or would be) made.
///
/// Always agrees with [`authorize`]; on denial it lists the roles in the table
/// that would satisfy the requirement.
pub fn explain_access(
    table: &RolePermissionTable,
    principal: &Principal,
    requirement: &AccessRequirement,
) -> AccessExplanation {
    let state = PrincipalState {
        principal_id: principal.id,
        role: principal.role,
        role_known: table.contains(principal.role),
        rank: table.rank(principal.role),
        effective_permissions: table.permissions(principal.role).collect(),
    };

    let outcome = authorize(table, principal, requirement);

    let Err(err) = outcome else {
        let reason = if requirement.is_unrestricted() {
            "View has no role or permission requirement".to_string()
        } else {
            format!(
                "Role '{}' (rank {}) satisfies the requirement",
                principal.role, state.rank
            )
        };
        return AccessExplanation {
            requirement: requirement.clone(),
            granted: true,
            reason,
            principal: state,
            denial_reason: None,
        };
    };

    let satisfying: Vec<String> = table
        .roles()
        .into_iter()
        .filter(|role| {
            let candidate = Principal {
                role: *role,
                ..principal.clone()
            };
            authorize(table, &candidate, requirement).is_ok()
        })
        .map(|r| r.as_str().to_string())
        .collect();

    let mut suggestions = Vec::new();
    if !satisfying.is_empty() {
        suggestions.push(format!(
            "Roles that satisfy this requirement: {:?}",
            satisfying
        ));
    }

    let (kind, message) = match &err {
        AuthzError::UnknownRole(role) => {
            suggestions.push(format!(
                "Add '{}' to the role table or assign a known role",
                role
            ));
            (
                DenialKind::UnknownRole,
                format!("Role '{}' has rank {} and no permissions", role, MIN_RANK),
            )
        }
        AuthzError::InsufficientRank { required, actual } => (
            DenialKind::InsufficientRank,
            format!(
                "Role '{}' (rank {}) is below '{}' (rank {})",
                actual,
                table.rank(*actual),
                required,
                table.rank(*required)
            ),
        ),
        AuthzError::MissingPermission(perm) => (
            DenialKind::MissingPermission,
            format!(
                "Missing required permission: '{}' ({})",
                perm,
                perm.description()
            ),
        ),
    };

    AccessExplanation {
        requirement: requirement.clone(),
        granted: false,
        reason: err.to_string(),
        principal: state,
        denial_reason: Some(DenialReason {
            kind,
            message,
            suggestions,
        }),
    }
}
