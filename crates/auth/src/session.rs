//! Session lifecycle: restore on start, login/register, logout.
//!
//! The store is an explicit value owned by the caller. There is no global
//! "current user"; views receive the store (or its [`SessionState`]) by
//! reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use learnhub_core::DomainError;

use crate::{
    AuthenticationError, NotificationKind, Notifier, Principal, PrincipalId, Role, SessionSlot,
    SlotError, UserDirectory,
};

/// Persisted session value: `{"user": Principal, "created_at": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Principal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user: Principal) -> Self {
        Self {
            user,
            created_at: Some(Utc::now()),
        }
    }
}

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// `restore()` has not run yet.
    Loading,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::SignedIn(session) => Some(&session.user),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("failed to persist session: {0}")]
    Storage(#[from] SlotError),

    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("no principal is signed in")]
    NotSignedIn,

    #[error("invalid profile: {0}")]
    Profile(#[from] DomainError),
}

/// Holds the current principal and mirrors it into a [`SessionSlot`].
#[derive(Debug)]
pub struct SessionStore<S, N> {
    slot: S,
    notifier: N,
    directory: UserDirectory,
    state: SessionState,
}

impl<S, N> SessionStore<S, N>
where
    S: SessionSlot,
    N: Notifier,
{
    /// A store in the `Loading` state; call [`restore`](Self::restore) next.
    pub fn new(slot: S, notifier: N, directory: UserDirectory) -> Self {
        Self {
            slot,
            notifier,
            directory,
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current(&self) -> Option<&Principal> {
        self.state.principal()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Read the persisted session, if any.
    ///
    /// Never fails: an unreadable slot or malformed content counts as "no
    /// session", and malformed content is removed from the slot.
    pub fn restore(&mut self) -> Option<&Principal> {
        self.state = match self.slot.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    tracing::info!(
                        principal_id = %session.user.id,
                        role = %session.user.role,
                        "session restored"
                    );
                    SessionState::SignedIn(session)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "discarding malformed persisted session");
                    if let Err(err) = self.slot.clear() {
                        tracing::warn!(error = %err, "failed to clear malformed session");
                    }
                    SessionState::SignedOut
                }
            },
            Ok(None) => SessionState::SignedOut,
            Err(err) => {
                tracing::warn!(error = %err, "session slot unreadable; starting signed out");
                SessionState::SignedOut
            }
        };
        self.current()
    }

    /// Authenticate against the directory and persist the session.
    ///
    /// On failure the previous state is left untouched.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Principal, SessionError> {
        let result = self
            .directory
            .verify(email, password)
            .map_err(SessionError::from)
            .and_then(|principal| self.persist(principal));

        match result {
            Ok(principal) => {
                tracing::info!(principal_id = %principal.id, role = %principal.role, "login succeeded");
                self.notifier.notify(
                    NotificationKind::Success,
                    &format!("Welcome back, {}!", principal.display_name),
                );
                Ok(principal)
            }
            Err(err) => {
                tracing::info!(email, error = %err, "login failed");
                self.notifier.notify(NotificationKind::Error, &err.to_string());
                Err(err)
            }
        }
    }

    /// Create a principal with a fresh id, enroll it, and sign it in.
    ///
    /// Emails are not checked for uniqueness and passwords are not checked for
    /// strength. Only a failing slot makes this return an error.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Option<Role>,
    ) -> Result<Principal, SessionError> {
        let principal = Principal::new(
            PrincipalId::new(),
            email,
            display_name,
            role.unwrap_or_default(),
        );

        match self.persist(principal) {
            Ok(principal) => {
                self.directory.enroll(principal.clone(), password);
                tracing::info!(principal_id = %principal.id, role = %principal.role, "registered");
                self.notifier
                    .notify(NotificationKind::Success, "Registration successful!");
                Ok(principal)
            }
            Err(err) => {
                tracing::error!(error = %err, "registration failed");
                self.notifier.notify(NotificationKind::Error, &err.to_string());
                Err(err)
            }
        }
    }

    /// Clear the persisted and in-memory session. Idempotent.
    ///
    /// The in-memory principal is dropped even when the slot cannot be cleared.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let previous = self.current().map(|p| p.id);
        self.state = SessionState::SignedOut;

        if let Err(err) = self.slot.clear() {
            tracing::error!(error = %err, "failed to clear persisted session");
            self.notifier.notify(NotificationKind::Error, "Error logging out");
            return Err(err.into());
        }

        match previous {
            Some(id) => tracing::info!(principal_id = %id, "logged out"),
            None => tracing::debug!("logout with no active session"),
        }
        self.notifier.notify(
            NotificationKind::Success,
            "You have been logged out successfully",
        );
        Ok(())
    }

    /// Edit the signed-in principal's profile and re-persist it.
    ///
    /// The role is not editable here.
    pub fn update_profile(
        &mut self,
        display_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Principal, SessionError> {
        let mut principal = self.current().cloned().ok_or(SessionError::NotSignedIn)?;

        if let Some(name) = display_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::validation("display name cannot be empty").into());
            }
            principal.display_name = name.to_string();
        }

        if let Some(email) = email {
            let email = email.trim();
            if email.is_empty() || !email.contains('@') {
                return Err(DomainError::validation("invalid email format").into());
            }
            principal.email = email.to_lowercase();
        }

        let principal = self.persist(principal)?;
        if !self.directory.update(principal.clone()) {
            tracing::debug!(principal_id = %principal.id, "edited principal is not in the directory");
        }
        self.notifier
            .notify(NotificationKind::Success, "Profile updated successfully");
        Ok(principal)
    }

    /// Write the session to the slot, then switch the in-memory state.
    fn persist(&mut self, principal: Principal) -> Result<Principal, SessionError> {
        let session = Session::new(principal);
        let raw = serde_json::to_string(&session)?;
        self.slot.store(&raw)?;
        let principal = session.user.clone();
        self.state = SessionState::SignedIn(session);
        Ok(principal)
    }
}
