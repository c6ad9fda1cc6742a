//! The application reducer.
//!
//! A pure synchronous fold over the action stream. Two passes per
//! action: the working-state fold, uniform across every operation,
//! then the domain fold for the handful of actions that carry state.
//!
//! The fold only ever sees actions already dispatched through the
//! store, so ordering invariants (REQUEST before terminal, dependent
//! fetches after their parent SUCCESS) are the dispatch layer's job,
//! not this one's.

use crate::actions::{AppAction, Phase};
use crate::state::{AppState, Notification, PatientData, WorkingState};
use careflow_core::Reducer;

/// Folds [`AppAction`]s into [`AppState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;

    fn reduce(&self, state: &mut AppState, action: &AppAction) {
        fold_working(state, action);
        fold_domain(state, action);
    }
}

/// Uniform (operation × phase) bookkeeping.
fn fold_working(state: &mut AppState, action: &AppAction) {
    let Some((operation, phase)) = action.descriptor() else {
        return;
    };
    let record = match phase {
        Phase::Request => WorkingState::started(),
        Phase::Success => WorkingState::succeeded(),
        Phase::Failure => WorkingState::failed(
            action
                .failure_error()
                .map(|error| Notification::error(error.to_string())),
        ),
    };
    state.working.insert(operation, record);
}

/// Domain state carried by individual actions.
#[allow(clippy::too_many_lines)]
fn fold_domain(state: &mut AppState, action: &AppAction) {
    match action {
        AppAction::SignupSuccess { user }
        | AppAction::LoginSuccess { user }
        | AppAction::FetchUserSuccess { user } => {
            state.logged_in = true;
            state.logged_in_user_id = Some(user.userid.clone());
            state.all_users.insert(user.userid.clone(), user.clone());
        }

        AppAction::LoginFailure {
            payload: Some(payload),
            ..
        } => {
            state.logged_in = payload.is_logged_in;
            state.email_verification_sent = payload.email_verification_sent;
        }

        AppAction::LogoutSuccess => {
            state.logged_in = false;
            state.logged_in_user_id = None;
            state.email_verification_sent = false;
            state.all_users.clear();
            state.patients.clear();
            state.patient_data.clear();
            state.message_thread = None;
            state.pending_sent_invites.clear();
            state.pending_received_invites.clear();
        }

        AppAction::ResendEmailVerificationSuccess => {
            state.email_verification_sent = true;
        }

        AppAction::AcceptTermsSuccess {
            user_id: Some(user_id),
            accepted_date,
        } => {
            if let Some(user) = state.all_users.get_mut(user_id) {
                user.terms_accepted = Some(*accepted_date);
            }
        }

        AppAction::UpdateUserRequest {
            user_id: Some(user_id),
            updating_user: Some(updating_user),
        } => {
            // Optimistic: the merged record lands before the platform
            // confirms it.
            state
                .all_users
                .insert(user_id.clone(), updating_user.clone());
        }

        AppAction::UpdateUserSuccess { user_id, user } => {
            let id = user_id.clone().unwrap_or_else(|| user.userid.clone());
            state.all_users.insert(id, user.clone());
        }

        AppAction::CreatePatientSuccess { user_id, patient } => {
            state
                .patients
                .insert(patient.userid.clone(), patient.clone());
            if let Some(user_id) = user_id {
                if let Some(user) = state.all_users.get_mut(user_id) {
                    user.patient = Some(patient.clone());
                }
            }
        }

        AppAction::UpdatePatientSuccess { patient }
        | AppAction::FetchPatientSuccess { patient } => {
            state
                .patients
                .insert(patient.userid.clone(), patient.clone());
        }

        AppAction::FetchPatientsSuccess { patients } => {
            state.patients = patients
                .iter()
                .map(|patient| (patient.userid.clone(), patient.clone()))
                .collect();
        }

        AppAction::FetchPatientDataSuccess {
            patient_id,
            data,
            notes,
        } => {
            state.patient_data.insert(
                patient_id.clone(),
                PatientData {
                    data: data.clone(),
                    notes: notes.clone(),
                },
            );
        }

        AppAction::FetchMessageThreadSuccess { messages } => {
            state.message_thread = Some(messages.clone());
        }

        AppAction::RemovePatientSuccess { removed_patient_id } => {
            state.patients.remove(removed_patient_id);
            state.patient_data.remove(removed_patient_id);
        }

        AppAction::SendInviteSuccess { invite } => {
            state.pending_sent_invites.push(invite.clone());
        }

        AppAction::CancelSentInviteSuccess { removed_email } => {
            state
                .pending_sent_invites
                .retain(|invite| invite.email.as_deref() != Some(removed_email));
        }

        AppAction::FetchPendingSentInvitesSuccess { invites } => {
            state.pending_sent_invites = invites.clone();
        }

        AppAction::FetchPendingReceivedInvitesSuccess { invites } => {
            state.pending_received_invites = invites.clone();
        }

        AppAction::AcceptReceivedInviteSuccess { invitation }
        | AppAction::RejectReceivedInviteSuccess { invitation } => {
            state
                .pending_received_invites
                .retain(|pending| pending.key != invitation.key);
        }

        // RemoveMember and SetMemberPermissions refetch the patient;
        // the dependent FetchPatientSuccess carries the state.
        // NavigateTo is consumed by the router observer, not folded.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::UnverifiedLogin;
    use crate::error::{ApiError, AppError};
    use crate::state::{Invitation, InviteCreator, Operation, Patient, User, UserId};

    fn reduce(state: &mut AppState, action: AppAction) {
        AppReducer.reduce(state, &action);
    }

    fn patient(id: &str) -> Patient {
        Patient {
            userid: UserId::from(id),
            ..Patient::default()
        }
    }

    fn invitation(key: &str, email: &str) -> Invitation {
        Invitation {
            key: key.to_owned(),
            email: Some(email.to_owned()),
            creator: InviteCreator {
                userid: UserId::from("creator-1"),
                full_name: None,
            },
            permissions: crate::state::Permissions::default(),
        }
    }

    #[test]
    fn every_operation_tracks_its_working_record() {
        let mut state = AppState::default();

        reduce(&mut state, AppAction::LoginRequest);
        let working = state.working(Operation::Login).cloned().unwrap_or_default();
        assert!(working.in_progress);
        assert_eq!(working.completed, None);

        reduce(
            &mut state,
            AppAction::LoginFailure {
                error: Some(AppError::LoginCredentials),
                payload: None,
                api_error: ApiError::status(401),
            },
        );
        let working = state.working(Operation::Login).cloned().unwrap_or_default();
        assert!(!working.in_progress);
        assert_eq!(working.completed, Some(false));
        assert_eq!(
            working.notification.map(|n| n.message),
            Some(AppError::LoginCredentials.to_string())
        );
    }

    #[test]
    fn domain_signaled_failures_complete_without_a_notification() {
        let mut state = AppState::default();
        reduce(&mut state, AppAction::LoginRequest);
        reduce(
            &mut state,
            AppAction::LoginFailure {
                error: None,
                payload: Some(UnverifiedLogin::default()),
                api_error: ApiError::status(403),
            },
        );
        let working = state.working(Operation::Login).cloned().unwrap_or_default();
        assert_eq!(working.completed, Some(false));
        assert!(working.notification.is_none());
        assert!(!state.logged_in);
        assert!(!state.email_verification_sent);
    }

    #[test]
    fn login_success_installs_the_session() {
        let mut state = AppState::default();
        let user = User {
            userid: UserId::from("u-1"),
            username: Some("care@giver.org".into()),
            ..User::default()
        };
        reduce(&mut state, AppAction::LoginSuccess { user: user.clone() });

        assert!(state.logged_in);
        assert_eq!(state.logged_in_user_id, Some(user.userid.clone()));
        assert_eq!(state.logged_in_user(), Some(&user));
    }

    #[test]
    fn logout_success_clears_session_scoped_state() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppAction::LoginSuccess {
                user: User {
                    userid: UserId::from("u-1"),
                    ..User::default()
                },
            },
        );
        reduce(
            &mut state,
            AppAction::FetchPatientsSuccess {
                patients: vec![patient("p-1")],
            },
        );
        reduce(
            &mut state,
            AppAction::FetchPendingSentInvitesSuccess {
                invites: vec![invitation("k-1", "a@b.org")],
            },
        );

        reduce(&mut state, AppAction::LogoutSuccess);
        assert!(!state.logged_in);
        assert!(state.logged_in_user_id.is_none());
        assert!(state.all_users.is_empty());
        assert!(state.patients.is_empty());
        assert!(state.pending_sent_invites.is_empty());
    }

    #[test]
    fn update_user_request_applies_the_record_optimistically() {
        let mut state = AppState::default();
        let optimistic = User {
            userid: UserId::from("u-1"),
            username: Some("new@address.org".into()),
            ..User::default()
        };
        reduce(
            &mut state,
            AppAction::UpdateUserRequest {
                user_id: Some(UserId::from("u-1")),
                updating_user: Some(optimistic.clone()),
            },
        );
        assert_eq!(state.all_users.get(&UserId::from("u-1")), Some(&optimistic));
    }

    #[test]
    fn create_patient_success_folds_the_record_into_the_session_user() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppAction::LoginSuccess {
                user: User {
                    userid: UserId::from("u-1"),
                    ..User::default()
                },
            },
        );
        reduce(
            &mut state,
            AppAction::CreatePatientSuccess {
                user_id: Some(UserId::from("u-1")),
                patient: patient("u-1"),
            },
        );
        assert!(state.patients.contains_key(&UserId::from("u-1")));
        assert_eq!(
            state
                .logged_in_user()
                .and_then(|user| user.patient.as_ref())
                .map(|p| p.userid.clone()),
            Some(UserId::from("u-1"))
        );
    }

    #[test]
    fn answered_invitations_leave_the_received_list() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppAction::FetchPendingReceivedInvitesSuccess {
                invites: vec![invitation("k-1", "a@b.org"), invitation("k-2", "c@d.org")],
            },
        );
        reduce(
            &mut state,
            AppAction::AcceptReceivedInviteSuccess {
                invitation: invitation("k-1", "a@b.org"),
            },
        );
        assert_eq!(state.pending_received_invites.len(), 1);
        assert_eq!(state.pending_received_invites[0].key, "k-2");
    }

    #[test]
    fn cancelling_an_invite_removes_it_by_recipient_email() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppAction::SendInviteSuccess {
                invite: invitation("k-1", "a@b.org"),
            },
        );
        reduce(
            &mut state,
            AppAction::CancelSentInviteSuccess {
                removed_email: "a@b.org".to_owned(),
            },
        );
        assert!(state.pending_sent_invites.is_empty());
    }

    #[test]
    fn removing_a_patient_drops_their_cached_data() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppAction::FetchPatientDataSuccess {
                patient_id: UserId::from("p-1"),
                data: vec![],
                notes: vec![],
            },
        );
        reduce(
            &mut state,
            AppAction::FetchPatientsSuccess {
                patients: vec![patient("p-1")],
            },
        );
        reduce(
            &mut state,
            AppAction::RemovePatientSuccess {
                removed_patient_id: UserId::from("p-1"),
            },
        );
        assert!(state.patients.is_empty());
        assert!(state.patient_data.is_empty());
    }

    #[test]
    fn navigation_actions_do_not_touch_state() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            AppAction::NavigateTo {
                route: crate::actions::Route::Home,
            },
        );
        assert_eq!(state, AppState::default());
    }
}
