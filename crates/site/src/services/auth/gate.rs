//! Authorization gate.
//!
//! Decides per request whether the current session may see a view. The
//! decision is never cached; every navigation evaluates it again.

use intune_partner_core::Role;

use super::SessionState;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The store has not been initialized yet. Render a loading state.
    Pending,
    /// Render the requested view.
    Allow,
    /// No session. Send the visitor to the login page.
    DenyRedirect,
    /// Signed in without the required role. Show access denied in place.
    DenyInPlace,
}

/// Evaluate access for a session state.
///
/// `Role::User` as a requirement only asks for a session; admins satisfy it.
#[must_use]
pub const fn authorize(state: &SessionState, required_role: Option<Role>) -> AccessDecision {
    match state {
        SessionState::Pending => AccessDecision::Pending,
        SessionState::Anonymous => AccessDecision::DenyRedirect,
        SessionState::Authenticated(record) => match required_role {
            None | Some(Role::User) => AccessDecision::Allow,
            Some(Role::Admin) => {
                if record.role.is_admin() {
                    AccessDecision::Allow
                } else {
                    AccessDecision::DenyInPlace
                }
            }
        },
    }
}
