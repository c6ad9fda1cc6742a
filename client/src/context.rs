//! Dispatch-time session snapshot.

use crate::state::{AppState, User, UserId};

/// Session facts a dispatch helper needs from the caller.
///
/// Helpers never read ambient state mid-flight; the caller snapshots
/// the session with [`Context::from_state`] before dispatching, and
/// the helper uses that snapshot for every decision in its chain.
/// Concretely: a patient fetch that 404s compares the target against
/// the id captured here, even if the session changed while the fetch
/// was in flight.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Logged-in account id at snapshot time.
    pub logged_in_user_id: Option<UserId>,

    /// Logged-in account record at snapshot time.
    pub logged_in_user: Option<User>,
}

impl Context {
    /// Snapshots the session from the current application state.
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        Self {
            logged_in_user_id: state.logged_in_user_id.clone(),
            logged_in_user: state.logged_in_user().cloned(),
        }
    }

    /// Whether `user_id` is the account this snapshot was taken for.
    #[must_use]
    pub fn is_logged_in_user(&self, user_id: &UserId) -> bool {
        self.logged_in_user_id.as_ref() == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::User;

    #[test]
    fn from_state_captures_the_session_account() {
        let mut state = AppState::default();
        let user = User {
            userid: UserId::from("u-1"),
            username: Some("care@giver.org".into()),
            ..User::default()
        };
        state.logged_in = true;
        state.logged_in_user_id = Some(user.userid.clone());
        state.all_users.insert(user.userid.clone(), user);

        let ctx = Context::from_state(&state);
        assert!(ctx.is_logged_in_user(&UserId::from("u-1")));
        assert!(!ctx.is_logged_in_user(&UserId::from("u-2")));
        assert_eq!(
            ctx.logged_in_user.and_then(|u| u.username),
            Some("care@giver.org".to_owned())
        );
    }

    #[test]
    fn empty_state_yields_an_anonymous_snapshot() {
        let ctx = Context::from_state(&AppState::default());
        assert!(ctx.logged_in_user_id.is_none());
        assert!(ctx.logged_in_user.is_none());
        assert!(!ctx.is_logged_in_user(&UserId::from("u-1")));
    }
}
