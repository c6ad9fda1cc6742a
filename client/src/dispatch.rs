//! Async operation dispatch.
//!
//! Each public method here is one domain operation: it dispatches the
//! operation's REQUEST action, awaits the remote call(s) in explicit
//! sequence, and dispatches exactly one terminal action (SUCCESS or
//! FAILURE). Conditional chains (login's dependent user and patient
//! fetches, the refetches after care-team mutations) are sequential
//! awaits in the method body, never callbacks.
//!
//! Session facts an operation needs are passed in as a [`Context`]
//! snapshot taken by the caller before dispatch. Decisions made
//! mid-chain (the 404 ownership check in [`Dispatcher::fetch_patient`])
//! use that snapshot, not re-read state.
//!
//! Every dispatch carries a fresh correlation id through its log
//! events, one `debug` at dispatch, one `warn` per failure.

use crate::actions::{AppAction, Link, Route, UnverifiedLogin};
use crate::api::ApiClient;
use crate::constants::YOUR_ACCOUNT_DATA_SETUP;
use crate::context::Context;
use crate::error::{classify, ApiError, AppError};
use crate::reducer::AppReducer;
use crate::state::{
    AppState, Credentials, Invitation, Operation, PasswordReset, Patient, Permissions,
    SignupForm, UserId, UserUpdate,
};
use careflow_core::Store;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// The application store specialization.
pub type AppStore = Store<AppState, AppAction, AppReducer>;

/// Dispatches domain operations against a store and an API client.
///
/// Collaborators are injected at construction; tests substitute
/// [`crate::mocks::MockApi`] for the API.
pub struct Dispatcher<A: ApiClient> {
    api: Arc<A>,
    store: Arc<AppStore>,
}

impl<A: ApiClient> Dispatcher<A> {
    /// Builds a dispatcher over an API client and a store.
    pub const fn new(api: Arc<A>, store: Arc<AppStore>) -> Self {
        Self { api, store }
    }

    /// The store this dispatcher feeds.
    #[must_use]
    pub const fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    fn begin(operation: Operation) -> Uuid {
        let correlation_id = Uuid::new_v4();
        tracing::debug!(operation = %operation, %correlation_id, "dispatching");
        correlation_id
    }

    /// Classifies a failure, logs it, and dispatches the terminal
    /// action `build` shapes from it.
    async fn fail(
        &self,
        correlation_id: Uuid,
        operation: Operation,
        api_error: ApiError,
        build: impl FnOnce(AppError, ApiError) -> AppAction,
    ) {
        let error = classify(operation, &api_error);
        tracing::warn!(operation = %operation, %correlation_id, %error, "operation failed");
        self.store.dispatch(build(error, api_error)).await;
    }

    // ═══════════════════════════════════════════════════════════════
    // Account lifecycle
    // ═══════════════════════════════════════════════════════════════

    /// Creates an account, then routes to the verification prompt.
    pub async fn signup(&self, form: &SignupForm) {
        let correlation_id = Self::begin(Operation::Signup);
        self.store.dispatch(AppAction::SignupRequest).await;

        match self.api.signup(form).await {
            Ok(user) => {
                self.store.dispatch(AppAction::SignupSuccess { user }).await;
                self.store
                    .dispatch(AppAction::NavigateTo {
                        route: Route::EmailVerification,
                    })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::Signup,
                    api_error,
                    |error, api_error| AppAction::SignupFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Confirms a signup key from a verification e-mail.
    pub async fn confirm_signup(&self, key: &str) {
        let correlation_id = Self::begin(Operation::ConfirmSignup);
        self.store.dispatch(AppAction::ConfirmSignupRequest).await;

        match self.api.confirm_signup(key).await {
            Ok(()) => {
                self.store.dispatch(AppAction::ConfirmSignupSuccess).await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::ConfirmSignup,
                    api_error,
                    |error, api_error| AppAction::ConfirmSignupFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Resends the verification e-mail for an address.
    pub async fn resend_email_verification(&self, email: &str) {
        let correlation_id = Self::begin(Operation::ResendEmailVerification);
        self.store
            .dispatch(AppAction::ResendEmailVerificationRequest)
            .await;

        match self.api.resend_email_verification(email).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::ResendEmailVerificationSuccess)
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::ResendEmailVerification,
                    api_error,
                    |error, api_error| AppAction::ResendEmailVerificationFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    /// Records acceptance of the terms of use for the session account.
    pub async fn accept_terms(&self, ctx: &Context, accepted_date: DateTime<Utc>) {
        let correlation_id = Self::begin(Operation::AcceptTerms);
        self.store.dispatch(AppAction::AcceptTermsRequest).await;

        match self.api.accept_terms(accepted_date).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::AcceptTermsSuccess {
                        user_id: ctx.logged_in_user_id.clone(),
                        accepted_date,
                    })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::AcceptTerms,
                    api_error,
                    |error, api_error| AppAction::AcceptTermsFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Establishes a session, then fetches the account and, for
    /// patient accounts, the patient record, exposing one merged
    /// record. HTTP 403 is the unverified-e-mail state, not an error.
    pub async fn login(&self, credentials: &Credentials, remember: bool) {
        let correlation_id = Self::begin(Operation::Login);
        self.store.dispatch(AppAction::LoginRequest).await;

        if let Err(api_error) = self.api.login(credentials, remember).await {
            let action = if api_error.status == Some(403) {
                AppAction::LoginFailure {
                    error: None,
                    payload: Some(UnverifiedLogin::default()),
                    api_error,
                }
            } else {
                let error = classify(Operation::Login, &api_error);
                tracing::warn!(
                    operation = %Operation::Login, %correlation_id, %error,
                    "operation failed"
                );
                AppAction::LoginFailure {
                    error: Some(error),
                    payload: None,
                    api_error,
                }
            };
            self.store.dispatch(action).await;
            return;
        }

        // The failures below abort the login, so they classify with
        // the sub-operation's catalog entry but terminate the login
        // triptych.
        let user = match self.api.get_current_user().await {
            Ok(user) => user,
            Err(api_error) => {
                let error = classify(Operation::FetchUser, &api_error);
                tracing::warn!(
                    operation = %Operation::Login, %correlation_id, %error,
                    "operation failed"
                );
                self.store
                    .dispatch(AppAction::LoginFailure {
                        error: Some(error),
                        payload: None,
                        api_error,
                    })
                    .await;
                return;
            }
        };

        let user = if user.is_patient() {
            match self.api.get_patient(&user.userid).await {
                Ok(patient) => user.merged_with(patient),
                Err(api_error) => {
                    let error = classify(Operation::FetchPatient, &api_error);
                    tracing::warn!(
                        operation = %Operation::Login, %correlation_id, %error,
                        "operation failed"
                    );
                    self.store
                        .dispatch(AppAction::LoginFailure {
                            error: Some(error),
                            payload: None,
                            api_error,
                        })
                        .await;
                    return;
                }
            }
        } else {
            user
        };

        self.store.dispatch(AppAction::LoginSuccess { user }).await;
    }

    /// Ends the session, then routes home. Navigation is suppressed on
    /// failure.
    pub async fn logout(&self) {
        let correlation_id = Self::begin(Operation::Logout);
        self.store.dispatch(AppAction::LogoutRequest).await;

        match self.api.logout().await {
            Ok(()) => {
                self.store.dispatch(AppAction::LogoutSuccess).await;
                self.store
                    .dispatch(AppAction::NavigateTo { route: Route::Home })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::Logout,
                    api_error,
                    |error, api_error| AppAction::LogoutFailure { error, api_error },
                )
                .await;
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════
    // Account maintenance
    // ═══════════════════════════════════════════════════════════════

    /// Saves an account update. The REQUEST carries the optimistic
    /// merged record (credential stripped); the wire carries only the
    /// diff.
    pub async fn update_user(&self, ctx: &Context, update: &UserUpdate) {
        let correlation_id = Self::begin(Operation::UpdateUser);
        let updating_user = ctx
            .logged_in_user
            .as_ref()
            .map(|user| user.updated_with(update));
        self.store
            .dispatch(AppAction::UpdateUserRequest {
                user_id: ctx.logged_in_user_id.clone(),
                updating_user,
            })
            .await;

        match self.api.update_current_user(update).await {
            Ok(user) => {
                self.store
                    .dispatch(AppAction::UpdateUserSuccess {
                        user_id: ctx.logged_in_user_id.clone(),
                        user,
                    })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::UpdateUser,
                    api_error,
                    |error, api_error| AppAction::UpdateUserFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Sends a password-reset e-mail for an address.
    pub async fn request_password_reset(&self, email: &str) {
        let correlation_id = Self::begin(Operation::RequestPasswordReset);
        self.store
            .dispatch(AppAction::RequestPasswordResetRequest)
            .await;

        match self.api.request_password_reset(email).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::RequestPasswordResetSuccess)
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::RequestPasswordReset,
                    api_error,
                    |error, api_error| AppAction::RequestPasswordResetFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    /// Redeems a password-reset key.
    pub async fn confirm_password_reset(&self, reset: &PasswordReset) {
        let correlation_id = Self::begin(Operation::ConfirmPasswordReset);
        self.store
            .dispatch(AppAction::ConfirmPasswordResetRequest)
            .await;

        match self.api.confirm_password_reset(reset).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::ConfirmPasswordResetSuccess)
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::ConfirmPasswordReset,
                    api_error,
                    |error, api_error| AppAction::ConfirmPasswordResetFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    /// Reports a client-side error to the platform log.
    pub async fn log_error(&self, message: &str, details: &str) {
        let correlation_id = Self::begin(Operation::LogError);
        self.store.dispatch(AppAction::LogErrorRequest).await;

        match self.api.log_error(message, details).await {
            Ok(()) => {
                self.store.dispatch(AppAction::LogErrorSuccess).await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::LogError,
                    api_error,
                    |error, api_error| AppAction::LogErrorFailure { error, api_error },
                )
                .await;
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════
    // Fetches
    // ═══════════════════════════════════════════════════════════════

    /// Fetches the session account and, for patient accounts, the
    /// patient record. An unverified e-mail fails synthetically with
    /// no API metadata; an expired session (401) fails without an
    /// error.
    pub async fn fetch_user(&self) {
        let correlation_id = Self::begin(Operation::FetchUser);
        self.store.dispatch(AppAction::FetchUserRequest).await;

        let user = match self.api.get_current_user().await {
            Ok(user) => user,
            Err(api_error) => {
                let error = if api_error.status == Some(401) {
                    None
                } else {
                    let error = classify(Operation::FetchUser, &api_error);
                    tracing::warn!(
                        operation = %Operation::FetchUser, %correlation_id, %error,
                        "operation failed"
                    );
                    Some(error)
                };
                self.store
                    .dispatch(AppAction::FetchUserFailure {
                        error,
                        api_error: Some(api_error),
                    })
                    .await;
                return;
            }
        };

        if !user.email_verified {
            self.store
                .dispatch(AppAction::FetchUserFailure {
                    error: Some(AppError::EmailNotVerified),
                    api_error: None,
                })
                .await;
            return;
        }

        let user = if user.is_patient() {
            match self.api.get_patient(&user.userid).await {
                Ok(patient) => user.merged_with(patient),
                Err(api_error) => {
                    let error = classify(Operation::FetchPatient, &api_error);
                    tracing::warn!(
                        operation = %Operation::FetchUser, %correlation_id, %error,
                        "operation failed"
                    );
                    self.store
                        .dispatch(AppAction::FetchUserFailure {
                            error: Some(error),
                            api_error: Some(api_error),
                        })
                        .await;
                    return;
                }
            }
        } else {
            user
        };

        self.store
            .dispatch(AppAction::FetchUserSuccess { user })
            .await;
    }

    /// Fetches one patient. A 404 against the session's own account is
    /// the not-yet-set-up state and carries a setup link.
    pub async fn fetch_patient(&self, ctx: &Context, patient_id: &UserId) {
        let correlation_id = Self::begin(Operation::FetchPatient);
        self.store.dispatch(AppAction::FetchPatientRequest).await;

        match self.api.get_patient(patient_id).await {
            Ok(patient) => {
                self.store
                    .dispatch(AppAction::FetchPatientSuccess { patient })
                    .await;
            }
            Err(api_error) => {
                let own_account =
                    api_error.status == Some(404) && ctx.is_logged_in_user(patient_id);
                let (error, link) = if own_account {
                    (
                        AppError::AccountNotConfigured,
                        Some(Link {
                            to: Route::PatientNew,
                            text: YOUR_ACCOUNT_DATA_SETUP.to_owned(),
                        }),
                    )
                } else {
                    (classify(Operation::FetchPatient, &api_error), None)
                };
                tracing::warn!(
                    operation = %Operation::FetchPatient, %correlation_id, %error,
                    "operation failed"
                );
                self.store
                    .dispatch(AppAction::FetchPatientFailure {
                        error,
                        link,
                        api_error,
                    })
                    .await;
            }
        }
    }

    /// Fetches all patients visible to the session.
    pub async fn fetch_patients(&self) {
        let correlation_id = Self::begin(Operation::FetchPatients);
        self.store.dispatch(AppAction::FetchPatientsRequest).await;

        match self.api.get_patients().await {
            Ok(patients) => {
                self.store
                    .dispatch(AppAction::FetchPatientsSuccess { patients })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::FetchPatients,
                    api_error,
                    |error, api_error| AppAction::FetchPatientsFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Fetches a patient's readings and care-team notes concurrently.
    /// Both calls always run; a readings error takes precedence over a
    /// notes error.
    pub async fn fetch_patient_data(&self, patient_id: &UserId) {
        let correlation_id = Self::begin(Operation::FetchPatientData);
        self.store
            .dispatch(AppAction::FetchPatientDataRequest)
            .await;

        let (data, notes) = tokio::join!(
            self.api.get_patient_data(patient_id),
            self.api.get_notes(patient_id),
        );

        let api_error = match (data, notes) {
            (Ok(data), Ok(notes)) => {
                self.store
                    .dispatch(AppAction::FetchPatientDataSuccess {
                        patient_id: patient_id.clone(),
                        data,
                        notes,
                    })
                    .await;
                return;
            }
            (Err(api_error), _) | (Ok(_), Err(api_error)) => api_error,
        };

        self.fail(
            correlation_id,
            Operation::FetchPatientData,
            api_error,
            |error, api_error| AppAction::FetchPatientDataFailure { error, api_error },
        )
        .await;
    }

    /// Fetches all messages in a thread.
    pub async fn fetch_message_thread(&self, thread_id: &str) {
        let correlation_id = Self::begin(Operation::FetchMessageThread);
        self.store
            .dispatch(AppAction::FetchMessageThreadRequest)
            .await;

        match self.api.get_message_thread(thread_id).await {
            Ok(messages) => {
                self.store
                    .dispatch(AppAction::FetchMessageThreadSuccess { messages })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::FetchMessageThread,
                    api_error,
                    |error, api_error| AppAction::FetchMessageThreadFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    /// Fetches invitations the session account has sent.
    pub async fn fetch_pending_sent_invites(&self) {
        let correlation_id = Self::begin(Operation::FetchPendingSentInvites);
        self.store
            .dispatch(AppAction::FetchPendingSentInvitesRequest)
            .await;

        match self.api.get_sent_invites().await {
            Ok(invites) => {
                self.store
                    .dispatch(AppAction::FetchPendingSentInvitesSuccess { invites })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::FetchPendingSentInvites,
                    api_error,
                    |error, api_error| AppAction::FetchPendingSentInvitesFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    /// Fetches invitations awaiting the session account's response.
    pub async fn fetch_pending_received_invites(&self) {
        let correlation_id = Self::begin(Operation::FetchPendingReceivedInvites);
        self.store
            .dispatch(AppAction::FetchPendingReceivedInvitesRequest)
            .await;

        match self.api.get_received_invites().await {
            Ok(invites) => {
                self.store
                    .dispatch(AppAction::FetchPendingReceivedInvitesSuccess { invites })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::FetchPendingReceivedInvites,
                    api_error,
                    |error, api_error| AppAction::FetchPendingReceivedInvitesFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════
    // Patients and care team
    // ═══════════════════════════════════════════════════════════════

    /// Creates the session account's patient record.
    pub async fn create_patient(&self, ctx: &Context, patient: &Patient) {
        let correlation_id = Self::begin(Operation::CreatePatient);
        self.store.dispatch(AppAction::CreatePatientRequest).await;

        match self.api.create_patient(patient).await {
            Ok(patient) => {
                self.store
                    .dispatch(AppAction::CreatePatientSuccess {
                        user_id: ctx.logged_in_user_id.clone(),
                        patient,
                    })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::CreatePatient,
                    api_error,
                    |error, api_error| AppAction::CreatePatientFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Saves a patient profile.
    pub async fn update_patient(&self, patient: &Patient) {
        let correlation_id = Self::begin(Operation::UpdatePatient);
        self.store.dispatch(AppAction::UpdatePatientRequest).await;

        match self.api.update_patient(patient).await {
            Ok(patient) => {
                self.store
                    .dispatch(AppAction::UpdatePatientSuccess { patient })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::UpdatePatient,
                    api_error,
                    |error, api_error| AppAction::UpdatePatientFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Leaves a patient's care team, then refetches the patient list.
    pub async fn remove_patient(&self, patient_id: &UserId) {
        let correlation_id = Self::begin(Operation::RemovePatient);
        self.store.dispatch(AppAction::RemovePatientRequest).await;

        match self.api.leave_group(patient_id).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::RemovePatientSuccess {
                        removed_patient_id: patient_id.clone(),
                    })
                    .await;
                self.fetch_patients().await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::RemovePatient,
                    api_error,
                    |error, api_error| AppAction::RemovePatientFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Removes a care-team member, then refetches the patient.
    pub async fn remove_member(&self, ctx: &Context, patient_id: &UserId, member_id: &UserId) {
        let correlation_id = Self::begin(Operation::RemoveMember);
        self.store.dispatch(AppAction::RemoveMemberRequest).await;

        match self.api.remove_member(member_id).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::RemoveMemberSuccess {
                        removed_member_id: member_id.clone(),
                    })
                    .await;
                self.fetch_patient(ctx, patient_id).await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::RemoveMember,
                    api_error,
                    |error, api_error| AppAction::RemoveMemberFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Replaces a member's permission set, then refetches the patient.
    pub async fn set_member_permissions(
        &self,
        ctx: &Context,
        patient_id: &UserId,
        member_id: &UserId,
        permissions: &Permissions,
    ) {
        let correlation_id = Self::begin(Operation::SetMemberPermissions);
        self.store
            .dispatch(AppAction::SetMemberPermissionsRequest)
            .await;

        match self.api.set_member_permissions(member_id, permissions).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::SetMemberPermissionsSuccess {
                        member_id: member_id.clone(),
                        permissions: permissions.clone(),
                    })
                    .await;
                self.fetch_patient(ctx, patient_id).await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::SetMemberPermissions,
                    api_error,
                    |error, api_error| AppAction::SetMemberPermissionsFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════
    // Invitations
    // ═══════════════════════════════════════════════════════════════

    /// Invites an e-mail address to the care team.
    pub async fn send_invite(&self, email: &str, permissions: &Permissions) {
        let correlation_id = Self::begin(Operation::SendInvite);
        self.store.dispatch(AppAction::SendInviteRequest).await;

        match self.api.send_invite(email, permissions).await {
            Ok(invite) => {
                self.store
                    .dispatch(AppAction::SendInviteSuccess { invite })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::SendInvite,
                    api_error,
                    |error, api_error| AppAction::SendInviteFailure { error, api_error },
                )
                .await;
            }
        }
    }

    /// Cancels a pending sent invitation by recipient e-mail.
    pub async fn cancel_sent_invite(&self, email: &str) {
        let correlation_id = Self::begin(Operation::CancelSentInvite);
        self.store
            .dispatch(AppAction::CancelSentInviteRequest)
            .await;

        match self.api.cancel_invite(email).await {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::CancelSentInviteSuccess {
                        removed_email: email.to_owned(),
                    })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::CancelSentInvite,
                    api_error,
                    |error, api_error| AppAction::CancelSentInviteFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    /// Accepts a received invitation, then fetches the inviting
    /// patient's record.
    pub async fn accept_received_invite(&self, ctx: &Context, invitation: Invitation) {
        let correlation_id = Self::begin(Operation::AcceptReceivedInvite);
        self.store
            .dispatch(AppAction::AcceptReceivedInviteRequest {
                invitation: invitation.clone(),
            })
            .await;

        match self
            .api
            .accept_invite(&invitation.key, &invitation.creator.userid)
            .await
        {
            Ok(()) => {
                let creator_id = invitation.creator.userid.clone();
                self.store
                    .dispatch(AppAction::AcceptReceivedInviteSuccess { invitation })
                    .await;
                self.fetch_patient(ctx, &creator_id).await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::AcceptReceivedInvite,
                    api_error,
                    |error, api_error| AppAction::AcceptReceivedInviteFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }

    /// Declines a received invitation.
    pub async fn reject_received_invite(&self, invitation: Invitation) {
        let correlation_id = Self::begin(Operation::RejectReceivedInvite);
        self.store
            .dispatch(AppAction::RejectReceivedInviteRequest {
                invitation: invitation.clone(),
            })
            .await;

        match self
            .api
            .dismiss_invite(&invitation.key, &invitation.creator.userid)
            .await
        {
            Ok(()) => {
                self.store
                    .dispatch(AppAction::RejectReceivedInviteSuccess { invitation })
                    .await;
            }
            Err(api_error) => {
                self.fail(
                    correlation_id,
                    Operation::RejectReceivedInvite,
                    api_error,
                    |error, api_error| AppAction::RejectReceivedInviteFailure {
                        error,
                        api_error,
                    },
                )
                .await;
            }
        }
    }
}
