//! Account-lifecycle dispatch flows.
//!
//! Each test subscribes to the store's action stream before
//! dispatching, then drains and asserts the exact event sequence the
//! operation produced.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use careflow_client::actions::UnverifiedLogin;
use careflow_client::mocks::MockApi;
use careflow_client::state::{
    AppState, Credentials, Profile, SignupForm, User, UserUpdate,
};
use careflow_client::{
    ApiClient, ApiError, AppAction, AppError, AppReducer, AppStore, Context, Dispatcher,
    Operation, Route, UserId,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;

fn harness(api: MockApi) -> (Dispatcher<MockApi>, broadcast::Receiver<AppAction>) {
    let store = Arc::new(AppStore::new(AppState::default(), AppReducer));
    let actions = store.subscribe();
    (Dispatcher::new(Arc::new(api), store), actions)
}

fn drain(actions: &mut broadcast::Receiver<AppAction>) -> Vec<AppAction> {
    let mut seen = Vec::new();
    while let Ok(action) = actions.try_recv() {
        seen.push(action);
    }
    seen
}

fn verified_user(id: &str) -> User {
    User {
        userid: UserId::from(id),
        username: Some("care@giver.org".to_owned()),
        email_verified: true,
        ..User::default()
    }
}

fn patient_user(id: &str) -> User {
    User {
        profile: Some(Profile {
            full_name: Some("Pat Doe".to_owned()),
            patient: true,
        }),
        ..verified_user(id)
    }
}

fn credentials() -> Credentials {
    Credentials {
        username: "care@giver.org".to_owned(),
        password: "correct horse".to_owned(),
    }
}

#[tokio::test]
async fn signup_success_emits_request_success_then_navigation() {
    let api = MockApi::new();
    let (dispatcher, mut actions) = harness(api.clone());

    dispatcher
        .signup(&SignupForm {
            username: "new@user.org".to_owned(),
            password: "pw".to_owned(),
            emails: vec!["new@user.org".to_owned()],
        })
        .await;

    let seen = drain(&mut actions);
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], AppAction::SignupRequest);
    assert!(matches!(seen[1], AppAction::SignupSuccess { .. }));
    assert_eq!(
        seen[2],
        AppAction::NavigateTo {
            route: Route::EmailVerification
        }
    );
    assert_eq!(api.call_count("user.signup"), 1);

    let logged_in = dispatcher.store().state(|s| s.logged_in).await;
    assert!(logged_in);
}

#[tokio::test]
async fn signup_conflict_classifies_as_account_already_exists() {
    let api = MockApi::new().failing("user.signup", ApiError::status(409));
    let (dispatcher, mut actions) = harness(api);

    dispatcher.signup(&SignupForm::default()).await;

    let seen = drain(&mut actions);
    assert_eq!(
        seen,
        vec![
            AppAction::SignupRequest,
            AppAction::SignupFailure {
                error: AppError::AccountAlreadyExists,
                api_error: ApiError::status(409),
            },
        ]
    );
}

#[tokio::test]
async fn confirm_signup_follows_the_triptych_contract() {
    let (dispatcher, mut actions) = harness(MockApi::new());
    dispatcher.confirm_signup("key-123").await;
    assert_eq!(
        drain(&mut actions),
        vec![AppAction::ConfirmSignupRequest, AppAction::ConfirmSignupSuccess]
    );

    let api = MockApi::new().failing("confirm.signup", ApiError::status(404));
    let (dispatcher, mut actions) = harness(api);
    dispatcher.confirm_signup("key-123").await;
    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::ConfirmSignupRequest,
            AppAction::ConfirmSignupFailure {
                error: AppError::ConfirmingSignup,
                api_error: ApiError::status(404),
            },
        ]
    );
}

#[tokio::test]
async fn resend_email_verification_success_marks_the_flag() {
    let (dispatcher, mut actions) = harness(MockApi::new());
    dispatcher.resend_email_verification("new@user.org").await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::ResendEmailVerificationRequest,
            AppAction::ResendEmailVerificationSuccess,
        ]
    );
    let sent = dispatcher.store().state(|s| s.email_verification_sent).await;
    assert!(sent);
}

#[tokio::test]
async fn accept_terms_success_carries_the_session_id_from_the_snapshot() {
    let api = MockApi::new().with_user(verified_user("u-1"));
    let (dispatcher, mut actions) = harness(api);
    dispatcher.login(&credentials(), false).await;
    drain(&mut actions);

    let ctx = dispatcher.store().state(Context::from_state).await;
    let accepted_date = Utc::now();
    dispatcher.accept_terms(&ctx, accepted_date).await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::AcceptTermsRequest,
            AppAction::AcceptTermsSuccess {
                user_id: Some(UserId::from("u-1")),
                accepted_date,
            },
        ]
    );
    let terms = dispatcher
        .store()
        .state(|s| s.logged_in_user().and_then(|u| u.terms_accepted))
        .await;
    assert_eq!(terms, Some(accepted_date));
}

#[tokio::test]
async fn login_for_a_nonpatient_skips_the_patient_fetch() {
    let api = MockApi::new().with_user(verified_user("u-1"));
    let (dispatcher, mut actions) = harness(api.clone());

    dispatcher.login(&credentials(), false).await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LoginRequest,
            AppAction::LoginSuccess {
                user: verified_user("u-1")
            },
        ]
    );
    assert_eq!(api.calls(), vec!["user.login", "user.get"]);
}

#[tokio::test]
async fn login_for_a_patient_merges_the_patient_record() {
    let patient = careflow_client::state::Patient {
        userid: UserId::from("u-1"),
        full_name: Some("Pat Doe".to_owned()),
        ..careflow_client::state::Patient::default()
    };
    let api = MockApi::new()
        .with_user(patient_user("u-1"))
        .with_patient(patient.clone());
    let (dispatcher, mut actions) = harness(api.clone());

    dispatcher.login(&credentials(), true).await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LoginRequest,
            AppAction::LoginSuccess {
                user: patient_user("u-1").merged_with(patient)
            },
        ]
    );
    assert_eq!(api.calls(), vec!["user.login", "user.get", "patient.get"]);
}

#[tokio::test]
async fn login_401_classifies_as_wrong_credentials() {
    let api = MockApi::new().failing("user.login", ApiError::status(401));
    let (dispatcher, mut actions) = harness(api);

    dispatcher.login(&credentials(), false).await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LoginRequest,
            AppAction::LoginFailure {
                error: Some(AppError::LoginCredentials),
                payload: None,
                api_error: ApiError::status(401),
            },
        ]
    );
}

#[tokio::test]
async fn login_403_is_the_unverified_email_state_not_an_error() {
    let api = MockApi::new().failing("user.login", ApiError::status(403));
    let (dispatcher, mut actions) = harness(api);

    dispatcher.login(&credentials(), false).await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LoginRequest,
            AppAction::LoginFailure {
                error: None,
                payload: Some(UnverifiedLogin::default()),
                api_error: ApiError::status(403),
            },
        ]
    );
    let state = dispatcher
        .store()
        .state(|s| (s.logged_in, s.email_verification_sent))
        .await;
    assert_eq!(state, (false, false));
}

#[tokio::test]
async fn login_aborted_by_the_user_fetch_still_fails_the_login() {
    let api = MockApi::new().failing("user.get", ApiError::status(500));
    let (dispatcher, mut actions) = harness(api);

    dispatcher.login(&credentials(), false).await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LoginRequest,
            AppAction::LoginFailure {
                error: Some(AppError::FetchingUser),
                payload: None,
                api_error: ApiError::status(500),
            },
        ]
    );
}

#[tokio::test]
async fn login_aborted_by_the_patient_fetch_still_fails_the_login() {
    let api = MockApi::new()
        .with_user(patient_user("u-1"))
        .failing("patient.get", ApiError::status(500));
    let (dispatcher, mut actions) = harness(api);

    dispatcher.login(&credentials(), false).await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LoginRequest,
            AppAction::LoginFailure {
                error: Some(AppError::FetchingPatient),
                payload: None,
                api_error: ApiError::status(500),
            },
        ]
    );
}

#[tokio::test]
async fn logout_success_navigates_home_and_clears_the_session() {
    let api = MockApi::new().with_user(verified_user("u-1"));
    let (dispatcher, mut actions) = harness(api);
    dispatcher.login(&credentials(), false).await;
    drain(&mut actions);

    dispatcher.logout().await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LogoutRequest,
            AppAction::LogoutSuccess,
            AppAction::NavigateTo { route: Route::Home },
        ]
    );
    let logged_in = dispatcher.store().state(|s| s.logged_in).await;
    assert!(!logged_in);
}

#[tokio::test]
async fn logout_failure_suppresses_navigation() {
    let api = MockApi::new().failing("user.logout", ApiError::network("connection refused"));
    let (dispatcher, mut actions) = harness(api);

    dispatcher.logout().await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::LogoutRequest,
            AppAction::LogoutFailure {
                error: AppError::Logout,
                api_error: ApiError::network("connection refused"),
            },
        ]
    );
}

#[tokio::test]
async fn fetch_user_expired_session_fails_without_an_error() {
    let (dispatcher, mut actions) = harness(MockApi::new());

    dispatcher.fetch_user().await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::FetchUserRequest,
            AppAction::FetchUserFailure {
                error: None,
                api_error: Some(ApiError::status(401)),
            },
        ]
    );
}

#[tokio::test]
async fn fetch_user_unverified_email_fails_synthetically() {
    let api = MockApi::new().with_user(User {
        email_verified: false,
        ..verified_user("u-1")
    });
    let (dispatcher, mut actions) = harness(api);

    dispatcher.fetch_user().await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::FetchUserRequest,
            AppAction::FetchUserFailure {
                error: Some(AppError::EmailNotVerified),
                api_error: None,
            },
        ]
    );
}

#[tokio::test]
async fn fetch_user_for_a_patient_merges_the_patient_record() {
    let patient = careflow_client::state::Patient {
        userid: UserId::from("u-1"),
        ..careflow_client::state::Patient::default()
    };
    let api = MockApi::new()
        .with_user(patient_user("u-1"))
        .with_patient(patient.clone());
    let (dispatcher, mut actions) = harness(api.clone());

    dispatcher.fetch_user().await;

    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::FetchUserRequest,
            AppAction::FetchUserSuccess {
                user: patient_user("u-1").merged_with(patient)
            },
        ]
    );
    assert_eq!(api.calls(), vec!["user.get", "patient.get"]);
}

#[tokio::test]
async fn update_user_request_is_optimistic_and_strips_the_password() {
    let api = MockApi::new().with_user(verified_user("u-1"));
    let (dispatcher, mut actions) = harness(api);
    dispatcher.login(&credentials(), false).await;
    drain(&mut actions);

    let ctx = dispatcher.store().state(Context::from_state).await;
    let update = UserUpdate {
        username: Some("renamed@giver.org".to_owned()),
        password: Some("hunter2".to_owned()),
        ..UserUpdate::default()
    };
    dispatcher.update_user(&ctx, &update).await;

    let seen = drain(&mut actions);
    assert_eq!(seen.len(), 2);
    let AppAction::UpdateUserRequest {
        user_id,
        updating_user,
    } = &seen[0]
    else {
        panic!("expected the optimistic request, got {:?}", seen[0]);
    };
    assert_eq!(user_id, &Some(UserId::from("u-1")));
    let optimistic = updating_user.as_ref().expect("optimistic record");
    assert_eq!(optimistic.username.as_deref(), Some("renamed@giver.org"));
    assert_eq!(optimistic.password, None);
    assert!(matches!(seen[1], AppAction::UpdateUserSuccess { .. }));
}

#[tokio::test]
async fn password_reset_request_and_confirmation_succeed_independently() {
    let (dispatcher, mut actions) = harness(MockApi::new());
    dispatcher.request_password_reset("care@giver.org").await;
    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::RequestPasswordResetRequest,
            AppAction::RequestPasswordResetSuccess,
        ]
    );

    dispatcher
        .confirm_password_reset(&careflow_client::state::PasswordReset {
            key: "reset-key".to_owned(),
            email: "care@giver.org".to_owned(),
            password: "new-pw".to_owned(),
        })
        .await;
    assert_eq!(
        drain(&mut actions),
        vec![
            AppAction::ConfirmPasswordResetRequest,
            AppAction::ConfirmPasswordResetSuccess,
        ]
    );
}

#[tokio::test]
async fn log_error_reports_to_the_platform() {
    let api = MockApi::new();
    let (dispatcher, mut actions) = harness(api.clone());

    dispatcher.log_error("boom", "stack trace").await;

    assert_eq!(
        drain(&mut actions),
        vec![AppAction::LogErrorRequest, AppAction::LogErrorSuccess]
    );
    assert_eq!(api.call_count("errors.log"), 1);
}

/// Wraps the mock to observe the working record at the moment the
/// remote call is issued.
#[derive(Clone)]
struct ProbeApi {
    inner: MockApi,
    store: Arc<AppStore>,
    in_progress_at_call: Arc<std::sync::Mutex<Vec<(Operation, bool)>>>,
}

impl ProbeApi {
    async fn probe(&self, operation: Operation) {
        let in_progress = self
            .store
            .state(|s| s.working(operation).is_some_and(|w| w.in_progress))
            .await;
        if let Ok(mut seen) = self.in_progress_at_call.lock() {
            seen.push((operation, in_progress));
        }
    }
}

impl ApiClient for ProbeApi {
    async fn signup(
        &self,
        form: &careflow_client::state::SignupForm,
    ) -> Result<User, ApiError> {
        self.probe(Operation::Signup).await;
        self.inner.signup(form).await
    }

    async fn confirm_signup(&self, key: &str) -> Result<(), ApiError> {
        self.inner.confirm_signup(key).await
    }

    async fn resend_email_verification(&self, email: &str) -> Result<(), ApiError> {
        self.inner.resend_email_verification(email).await
    }

    async fn accept_terms(&self, accepted_date: chrono::DateTime<Utc>) -> Result<(), ApiError> {
        self.inner.accept_terms(accepted_date).await
    }

    async fn login(&self, creds: &Credentials, remember: bool) -> Result<(), ApiError> {
        self.probe(Operation::Login).await;
        self.inner.login(creds, remember).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.inner.logout().await
    }

    async fn get_current_user(&self) -> Result<User, ApiError> {
        self.probe(Operation::Login).await;
        self.inner.get_current_user().await
    }

    async fn update_current_user(&self, update: &UserUpdate) -> Result<User, ApiError> {
        self.inner.update_current_user(update).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.inner.request_password_reset(email).await
    }

    async fn confirm_password_reset(
        &self,
        reset: &careflow_client::state::PasswordReset,
    ) -> Result<(), ApiError> {
        self.inner.confirm_password_reset(reset).await
    }

    async fn get_patient(
        &self,
        patient_id: &UserId,
    ) -> Result<careflow_client::state::Patient, ApiError> {
        self.inner.get_patient(patient_id).await
    }

    async fn get_patients(&self) -> Result<Vec<careflow_client::state::Patient>, ApiError> {
        self.inner.get_patients().await
    }

    async fn create_patient(
        &self,
        patient: &careflow_client::state::Patient,
    ) -> Result<careflow_client::state::Patient, ApiError> {
        self.inner.create_patient(patient).await
    }

    async fn update_patient(
        &self,
        patient: &careflow_client::state::Patient,
    ) -> Result<careflow_client::state::Patient, ApiError> {
        self.inner.update_patient(patient).await
    }

    async fn leave_group(&self, patient_id: &UserId) -> Result<(), ApiError> {
        self.inner.leave_group(patient_id).await
    }

    async fn remove_member(&self, member_id: &UserId) -> Result<(), ApiError> {
        self.inner.remove_member(member_id).await
    }

    async fn set_member_permissions(
        &self,
        member_id: &UserId,
        permissions: &careflow_client::state::Permissions,
    ) -> Result<(), ApiError> {
        self.inner.set_member_permissions(member_id, permissions).await
    }

    async fn send_invite(
        &self,
        email: &str,
        permissions: &careflow_client::state::Permissions,
    ) -> Result<careflow_client::state::Invitation, ApiError> {
        self.inner.send_invite(email, permissions).await
    }

    async fn cancel_invite(&self, email: &str) -> Result<(), ApiError> {
        self.inner.cancel_invite(email).await
    }

    async fn accept_invite(&self, key: &str, creator_id: &UserId) -> Result<(), ApiError> {
        self.inner.accept_invite(key, creator_id).await
    }

    async fn dismiss_invite(&self, key: &str, creator_id: &UserId) -> Result<(), ApiError> {
        self.inner.dismiss_invite(key, creator_id).await
    }

    async fn get_sent_invites(
        &self,
    ) -> Result<Vec<careflow_client::state::Invitation>, ApiError> {
        self.inner.get_sent_invites().await
    }

    async fn get_received_invites(
        &self,
    ) -> Result<Vec<careflow_client::state::Invitation>, ApiError> {
        self.inner.get_received_invites().await
    }

    async fn get_patient_data(
        &self,
        patient_id: &UserId,
    ) -> Result<Vec<careflow_client::state::Datum>, ApiError> {
        self.inner.get_patient_data(patient_id).await
    }

    async fn get_notes(
        &self,
        patient_id: &UserId,
    ) -> Result<Vec<careflow_client::state::Message>, ApiError> {
        self.inner.get_notes(patient_id).await
    }

    async fn get_message_thread(
        &self,
        thread_id: &str,
    ) -> Result<Vec<careflow_client::state::Message>, ApiError> {
        self.inner.get_message_thread(thread_id).await
    }

    async fn log_error(&self, message: &str, details: &str) -> Result<(), ApiError> {
        self.inner.log_error(message, details).await
    }
}

#[tokio::test]
async fn the_request_action_lands_before_any_remote_call() {
    let store = Arc::new(AppStore::new(AppState::default(), AppReducer));
    let probe = ProbeApi {
        inner: MockApi::new().with_user(verified_user("u-1")),
        store: Arc::clone(&store),
        in_progress_at_call: Arc::new(std::sync::Mutex::new(Vec::new())),
    };
    let dispatcher = Dispatcher::new(Arc::new(probe.clone()), store);

    dispatcher.login(&credentials(), false).await;

    let seen = probe
        .in_progress_at_call
        .lock()
        .expect("probe observations")
        .clone();
    assert_eq!(
        seen,
        vec![(Operation::Login, true), (Operation::Login, true)]
    );
}
