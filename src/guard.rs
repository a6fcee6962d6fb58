//! Navigation gating by session state and role.

use tokio::sync::watch;
use tracing::debug;

use crate::routes::{Access, Route};
use crate::session::SessionState;

mod capabilities;
pub use self::capabilities::Capabilities;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore still running; render a placeholder, decide later.
    Placeholder,
    Render,
    Redirect(Route),
}

/// Pure decision for one navigation.
pub fn decide(state: &SessionState, access: Access) -> GuardDecision {
    if access == Access::Public {
        return GuardDecision::Render;
    }
    match state {
        SessionState::Loading => GuardDecision::Placeholder,
        SessionState::Anonymous => GuardDecision::Redirect(Route::Login),
        SessionState::Authenticated(session) => match access {
            Access::Roles(allowed) if !allowed.contains(&session.identity.role) => {
                GuardDecision::Redirect(Route::Home)
            }
            _ => GuardDecision::Render,
        },
    }
}

/// Evaluates navigations against the latest published session.
#[derive(Clone, Debug)]
pub struct AccessGuard {
    session: watch::Receiver<SessionState>,
}

impl AccessGuard {
    pub fn new(session: watch::Receiver<SessionState>) -> Self {
        Self { session }
    }

    pub fn check(&self, route: &Route) -> GuardDecision {
        let state = self.session.borrow();
        let decision = decide(&state, route.access());
        debug!(route = %route.path(), ?decision, "guard decision");
        decision
    }

    /// Resolves a raw path. Unknown paths redirect home.
    pub fn navigate(&self, path: &str) -> (Option<Route>, GuardDecision) {
        match Route::parse(path) {
            Some(route) => {
                let decision = self.check(&route);
                (Some(route), decision)
            }
            None => (None, GuardDecision::Redirect(Route::Home)),
        }
    }
}

#[cfg(test)]
#[path = "tests/guard_tests.rs"]
mod tests;
