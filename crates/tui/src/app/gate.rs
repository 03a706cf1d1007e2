use crate::app::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Token check still pending.
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Session-level state machine deciding which routes may mount.
///
/// `Unauthenticated` is only left through a successful login.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGate {
    state: AuthState,
}

impl AuthGate {
    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    /// Resolves the initial token check. No-op once resolved.
    pub fn resolve(&mut self, has_token: bool) {
        if self.state != AuthState::Unknown {
            return;
        }
        self.state = if has_token {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
    }

    pub fn login_succeeded(&mut self) {
        self.state = AuthState::Authenticated;
    }

    /// A protected request was rejected, or the user logged out.
    pub fn revoke(&mut self) {
        self.state = AuthState::Unauthenticated;
    }
}

/// Redirects a requested route according to the gate.
pub fn guard(requested: Route, state: AuthState) -> Route {
    let authenticated = state == AuthState::Authenticated;
    match requested {
        Route::Root | Route::Auth if authenticated => Route::Dashboard,
        Route::Root => Route::Auth,
        route if route.is_protected() && !authenticated => Route::Auth,
        route => route,
    }
}
