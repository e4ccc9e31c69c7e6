//! Session gate: one backend probe per page load decides whether the
//! protected views may render.
//!
//! The backend holds the session (an http-only cookie); the client never
//! sees a token. Any failure of the probe counts as "not authenticated".

use crate::api::{endpoints, ApiRequest, HttpTransport, ResourceClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Pending,
    Authenticated,
    Unauthenticated,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Authenticated => "authenticated",
            SessionStatus::Unauthenticated => "unauthenticated",
        }
    }

    /// What a protected route does with this status.
    pub fn guard(&self) -> GuardDecision {
        match self {
            SessionStatus::Pending => GuardDecision::Wait,
            SessionStatus::Authenticated => GuardDecision::Render,
            SessionStatus::Unauthenticated => GuardDecision::RedirectToLogin,
        }
    }
}

/// Protected-route outcome for a session status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Probe still outstanding: show a placeholder, no redirect, no children
    Wait,
    Render,
    /// Replace the history entry with the login view
    RedirectToLogin,
}

/// Process-wide session state. Starts `Pending`; once it leaves `Pending`
/// it never returns there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionGate {
    status: SessionStatus,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SessionStatus::Pending
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Record the probe result. Ignored unless still pending (for example
    /// after an explicit `login`), and `Pending` is never accepted.
    pub fn settle(&mut self, outcome: SessionStatus) -> bool {
        if !self.is_pending() || outcome == SessionStatus::Pending {
            return false;
        }
        self.status = outcome;
        true
    }

    /// Local transition after a successful login submission.
    pub fn login(&mut self) {
        self.status = SessionStatus::Authenticated;
    }

    /// Local-only sign-out. The server-side session is left alone.
    pub fn logout(&mut self) {
        self.status = SessionStatus::Unauthenticated;
    }
}

/// Ask the backend whether the session cookie is still good.
///
/// Any 2xx is authenticated. Everything else (401, 5xx, network failure)
/// is unauthenticated.
pub async fn probe_session<T: HttpTransport>(client: &ResourceClient<T>) -> SessionStatus {
    match client
        .check(&ApiRequest::get(endpoints::VERIFY_SESSION))
        .await
    {
        Ok(()) => SessionStatus::Authenticated,
        Err(e) => {
            log::info!("Session probe failed, treating as signed out: {}", e);
            SessionStatus::Unauthenticated
        }
    }
}
