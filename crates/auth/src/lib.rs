//! `learnhub-auth`: session lifecycle and role-based access control.
//!
//! This crate is decoupled from rendering and from concrete storage: the
//! session slot and the notification sink are injected through traits.

pub mod authorize;
pub mod directory;
pub mod gate;
pub mod navigation;
pub mod notify;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod routes;
pub mod session;
pub mod slot;
pub mod table;

pub use authorize::{
    AccessExplanation, AccessRequirement, AuthzError, DenialKind, DenialReason, Guarded,
    authorize, explain_access, has_permission, has_role,
};
pub use directory::{AuthenticationError, UserDirectory};
pub use gate::{AccessGate, GateConfig, GateDecision};
pub use navigation::{Menu, MenuItem, VisibleMenu};
pub use notify::{NotificationKind, Notifier, SilentNotifier};
pub use permissions::{Permission, UnknownPermission};
pub use principal::{Principal, PrincipalId};
pub use roles::{Role, UnknownRole};
pub use routes::{Access, ResolvedRoute, Route, RouteTable};
pub use session::{Session, SessionError, SessionState, SessionStore};
pub use slot::{MemorySlot, SessionSlot, SlotError};
pub use table::{RolePermissionTable, RolePermissionTableBuilder};
