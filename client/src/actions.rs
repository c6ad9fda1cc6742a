//! The action vocabulary.
//!
//! Every dispatched operation produces exactly one REQUEST action
//! followed by exactly one terminal action (SUCCESS or FAILURE),
//! never zero and never two terminals. The vocabulary is a closed enum
//! with one variant per (operation × phase), so the store-folding
//! boundary matches exhaustively instead of dispatching on strings.
//!
//! FAILURE variants always preserve the raw [`ApiError`] metadata for
//! diagnostics. Three operations deviate from the uniform failure
//! shape, reflecting domain-signaled non-errors:
//!
//! - [`AppAction::LoginFailure`]: HTTP 403 is an unverified-e-mail
//!   state, not an error; `error` is `None` and the payload carries
//!   the state instead.
//! - [`AppAction::FetchUserFailure`]: HTTP 401 (expired session) also
//!   yields `error: None`; the synthetic unverified-e-mail condition
//!   yields an error with no API metadata.
//! - [`AppAction::FetchPatientFailure`]: a 404 on the logged-in user's
//!   own account carries a setup link.

use crate::error::{ApiError, AppError};
use crate::state::{
    Datum, Invitation, Message, Operation, Patient, Permissions, User, UserId,
};
use chrono::{DateTime, Utc};

/// Phase of an operation's event triptych.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Operation dispatched, remote calls not yet observed.
    Request,
    /// All required remote calls completed successfully.
    Success,
    /// The chain aborted; exactly one of these per failed dispatch.
    Failure,
}

/// Client-side route requested through the navigation side-channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing page, after logout.
    Home,
    /// E-mail verification prompt, after signup.
    EmailVerification,
    /// Patient-profile setup form.
    PatientNew,
}

impl Route {
    /// The route's path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => crate::constants::ROUTE_HOME,
            Self::EmailVerification => crate::constants::ROUTE_EMAIL_VERIFICATION,
            Self::PatientNew => crate::constants::ROUTE_PATIENT_NEW,
        }
    }
}

/// A navigation hint attached to a failure payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Destination route.
    pub to: Route,

    /// Prompt text for the link.
    pub text: String,
}

/// Login-failure payload for the HTTP 403 unverified-e-mail state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnverifiedLogin {
    /// Always `false`: the session was not established.
    pub is_logged_in: bool,

    /// Whether a fresh verification e-mail has been sent this session.
    pub email_verification_sent: bool,
}

/// Application action: one variant per (operation × phase), plus the
/// navigation side-channel.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum AppAction {
    // ═══════════════════════════════════════════════════════════════
    // Account lifecycle
    // ═══════════════════════════════════════════════════════════════
    /// Signup dispatched.
    SignupRequest,
    /// Account created; navigation to e-mail verification follows.
    SignupSuccess {
        /// The created account.
        user: User,
    },
    /// Signup failed.
    SignupFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Signup-confirmation dispatched.
    ConfirmSignupRequest,
    /// Signup key confirmed.
    ConfirmSignupSuccess,
    /// Signup confirmation failed.
    ConfirmSignupFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Verification-resend dispatched.
    ResendEmailVerificationRequest,
    /// Verification e-mail resent.
    ResendEmailVerificationSuccess,
    /// Verification resend failed.
    ResendEmailVerificationFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Terms-acceptance dispatched.
    AcceptTermsRequest,
    /// Terms accepted; `user_id` is the session id read at dispatch.
    AcceptTermsSuccess {
        /// Logged-in account at dispatch time.
        user_id: Option<UserId>,
        /// Acceptance timestamp sent to the API.
        accepted_date: DateTime<Utc>,
    },
    /// Terms acceptance failed.
    AcceptTermsFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Login dispatched.
    LoginRequest,
    /// Session established; `user` is the merged user/patient record.
    LoginSuccess {
        /// The logged-in account, with any patient record folded in.
        user: User,
    },
    /// Login chain aborted.
    ///
    /// HTTP 403 is the unverified-e-mail state: `error` is `None` and
    /// `payload` carries the state instead.
    LoginFailure {
        /// Classified error; `None` for the 403 non-error.
        error: Option<AppError>,
        /// Unverified-e-mail state, present only on 403.
        payload: Option<UnverifiedLogin>,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Logout dispatched.
    LogoutRequest,
    /// Session ended; navigation home follows.
    LogoutSuccess,
    /// Logout failed.
    LogoutFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    // ═══════════════════════════════════════════════════════════════
    // Account maintenance
    // ═══════════════════════════════════════════════════════════════
    /// User update dispatched; carries the optimistic merged record.
    UpdateUserRequest {
        /// Logged-in account at dispatch time.
        user_id: Option<UserId>,
        /// Current record merged with the update, credential stripped.
        updating_user: Option<User>,
    },
    /// User update saved.
    UpdateUserSuccess {
        /// Logged-in account at dispatch time.
        user_id: Option<UserId>,
        /// The record as saved by the platform.
        user: User,
    },
    /// User update failed.
    UpdateUserFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Password-reset request dispatched.
    RequestPasswordResetRequest,
    /// Reset e-mail sent.
    RequestPasswordResetSuccess,
    /// Reset request failed.
    RequestPasswordResetFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Password-reset confirmation dispatched.
    ConfirmPasswordResetRequest,
    /// Password reset.
    ConfirmPasswordResetSuccess,
    /// Reset confirmation failed.
    ConfirmPasswordResetFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Error report dispatched.
    LogErrorRequest,
    /// Error report stored.
    LogErrorSuccess,
    /// Error report failed.
    LogErrorFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    // ═══════════════════════════════════════════════════════════════
    // Fetches
    // ═══════════════════════════════════════════════════════════════
    /// User fetch dispatched.
    FetchUserRequest,
    /// Account fetched; `user` is the merged user/patient record.
    FetchUserSuccess {
        /// The fetched account, with any patient record folded in.
        user: User,
    },
    /// User fetch failed.
    ///
    /// HTTP 401 (expired session) yields `error: None`; the synthetic
    /// unverified-e-mail condition yields an error with no metadata.
    FetchUserFailure {
        /// Classified error; `None` for the 401 non-error.
        error: Option<AppError>,
        /// Raw failure metadata; `None` for the synthetic condition.
        api_error: Option<ApiError>,
    },

    /// Patient fetch dispatched.
    FetchPatientRequest,
    /// Patient fetched.
    FetchPatientSuccess {
        /// The fetched record.
        patient: Patient,
    },
    /// Patient fetch failed.
    FetchPatientFailure {
        /// Classified error.
        error: AppError,
        /// Setup link, only when the 404 target is the logged-in user.
        link: Option<Link>,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Patients fetch dispatched.
    FetchPatientsRequest,
    /// Viewable patients fetched.
    FetchPatientsSuccess {
        /// All patients visible to the session.
        patients: Vec<Patient>,
    },
    /// Patients fetch failed.
    FetchPatientsFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Patient-data fetch dispatched.
    FetchPatientDataRequest,
    /// Data and care-team notes fetched.
    FetchPatientDataSuccess {
        /// Whose data was fetched.
        patient_id: UserId,
        /// Device/data readings.
        data: Vec<Datum>,
        /// Care-team notes.
        notes: Vec<Message>,
    },
    /// Patient-data fetch failed.
    FetchPatientDataFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Message-thread fetch dispatched.
    FetchMessageThreadRequest,
    /// Thread fetched.
    FetchMessageThreadSuccess {
        /// The thread's messages.
        messages: Vec<Message>,
    },
    /// Thread fetch failed.
    FetchMessageThreadFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    // ═══════════════════════════════════════════════════════════════
    // Patients and care team
    // ═══════════════════════════════════════════════════════════════
    /// Patient creation dispatched.
    CreatePatientRequest,
    /// Patient record created; `user_id` is the session id at dispatch.
    CreatePatientSuccess {
        /// Logged-in account at dispatch time.
        user_id: Option<UserId>,
        /// The created record.
        patient: Patient,
    },
    /// Patient creation failed.
    CreatePatientFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Patient save dispatched.
    UpdatePatientRequest,
    /// Patient profile saved.
    UpdatePatientSuccess {
        /// The record as saved by the platform.
        patient: Patient,
    },
    /// Patient save failed.
    UpdatePatientFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Care-team departure dispatched.
    RemovePatientRequest,
    /// Left the patient's care team; a patients refetch follows.
    RemovePatientSuccess {
        /// The patient whose team was left.
        removed_patient_id: UserId,
    },
    /// Care-team departure failed.
    RemovePatientFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Member removal dispatched.
    RemoveMemberRequest,
    /// Member removed; a patient refetch follows.
    RemoveMemberSuccess {
        /// The removed member.
        removed_member_id: UserId,
    },
    /// Member removal failed.
    RemoveMemberFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Permission change dispatched.
    SetMemberPermissionsRequest,
    /// Permissions changed; a patient refetch follows.
    SetMemberPermissionsSuccess {
        /// The member whose permissions changed.
        member_id: UserId,
        /// The new permission set.
        permissions: Permissions,
    },
    /// Permission change failed.
    SetMemberPermissionsFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    // ═══════════════════════════════════════════════════════════════
    // Invitations
    // ═══════════════════════════════════════════════════════════════
    /// Invitation send dispatched.
    SendInviteRequest,
    /// Invitation sent.
    SendInviteSuccess {
        /// The pending invitation as stored by the platform.
        invite: Invitation,
    },
    /// Invitation send failed.
    SendInviteFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Invitation cancel dispatched.
    CancelSentInviteRequest,
    /// Invitation cancelled.
    CancelSentInviteSuccess {
        /// Recipient e-mail of the cancelled invitation.
        removed_email: String,
    },
    /// Invitation cancel failed.
    CancelSentInviteFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Invitation accept dispatched; echoes the invitation for the UI.
    AcceptReceivedInviteRequest {
        /// The invitation being accepted.
        invitation: Invitation,
    },
    /// Invitation accepted; a patient refetch follows.
    AcceptReceivedInviteSuccess {
        /// The accepted invitation.
        invitation: Invitation,
    },
    /// Invitation accept failed.
    AcceptReceivedInviteFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Invitation decline dispatched; echoes the invitation for the UI.
    RejectReceivedInviteRequest {
        /// The invitation being declined.
        invitation: Invitation,
    },
    /// Invitation declined.
    RejectReceivedInviteSuccess {
        /// The declined invitation.
        invitation: Invitation,
    },
    /// Invitation decline failed.
    RejectReceivedInviteFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Sent-invitations fetch dispatched.
    FetchPendingSentInvitesRequest,
    /// Sent invitations fetched.
    FetchPendingSentInvitesSuccess {
        /// Pending sent invitations.
        invites: Vec<Invitation>,
    },
    /// Sent-invitations fetch failed.
    FetchPendingSentInvitesFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    /// Received-invitations fetch dispatched.
    FetchPendingReceivedInvitesRequest,
    /// Received invitations fetched.
    FetchPendingReceivedInvitesSuccess {
        /// Pending received invitations.
        invites: Vec<Invitation>,
    },
    /// Received-invitations fetch failed.
    FetchPendingReceivedInvitesFailure {
        /// Classified error.
        error: AppError,
        /// Raw failure metadata.
        api_error: ApiError,
    },

    // ═══════════════════════════════════════════════════════════════
    // Navigation side-channel
    // ═══════════════════════════════════════════════════════════════
    /// Client-side route transition, enqueued strictly after the
    /// SUCCESS it follows (signup, logout). Consumed by the router
    /// observer, not folded into state.
    NavigateTo {
        /// Destination route.
        route: Route,
    },
}

impl AppAction {
    /// The `(operation, phase)` pair this action belongs to, or `None`
    /// for the navigation side-channel.
    #[must_use]
    pub const fn descriptor(&self) -> Option<(Operation, Phase)> {
        use Operation as Op;

        Some(match self {
            Self::SignupRequest => (Op::Signup, Phase::Request),
            Self::SignupSuccess { .. } => (Op::Signup, Phase::Success),
            Self::SignupFailure { .. } => (Op::Signup, Phase::Failure),
            Self::ConfirmSignupRequest => (Op::ConfirmSignup, Phase::Request),
            Self::ConfirmSignupSuccess => (Op::ConfirmSignup, Phase::Success),
            Self::ConfirmSignupFailure { .. } => (Op::ConfirmSignup, Phase::Failure),
            Self::ResendEmailVerificationRequest => {
                (Op::ResendEmailVerification, Phase::Request)
            }
            Self::ResendEmailVerificationSuccess => {
                (Op::ResendEmailVerification, Phase::Success)
            }
            Self::ResendEmailVerificationFailure { .. } => {
                (Op::ResendEmailVerification, Phase::Failure)
            }
            Self::AcceptTermsRequest => (Op::AcceptTerms, Phase::Request),
            Self::AcceptTermsSuccess { .. } => (Op::AcceptTerms, Phase::Success),
            Self::AcceptTermsFailure { .. } => (Op::AcceptTerms, Phase::Failure),
            Self::LoginRequest => (Op::Login, Phase::Request),
            Self::LoginSuccess { .. } => (Op::Login, Phase::Success),
            Self::LoginFailure { .. } => (Op::Login, Phase::Failure),
            Self::LogoutRequest => (Op::Logout, Phase::Request),
            Self::LogoutSuccess => (Op::Logout, Phase::Success),
            Self::LogoutFailure { .. } => (Op::Logout, Phase::Failure),
            Self::UpdateUserRequest { .. } => (Op::UpdateUser, Phase::Request),
            Self::UpdateUserSuccess { .. } => (Op::UpdateUser, Phase::Success),
            Self::UpdateUserFailure { .. } => (Op::UpdateUser, Phase::Failure),
            Self::RequestPasswordResetRequest => (Op::RequestPasswordReset, Phase::Request),
            Self::RequestPasswordResetSuccess => (Op::RequestPasswordReset, Phase::Success),
            Self::RequestPasswordResetFailure { .. } => {
                (Op::RequestPasswordReset, Phase::Failure)
            }
            Self::ConfirmPasswordResetRequest => (Op::ConfirmPasswordReset, Phase::Request),
            Self::ConfirmPasswordResetSuccess => (Op::ConfirmPasswordReset, Phase::Success),
            Self::ConfirmPasswordResetFailure { .. } => {
                (Op::ConfirmPasswordReset, Phase::Failure)
            }
            Self::LogErrorRequest => (Op::LogError, Phase::Request),
            Self::LogErrorSuccess => (Op::LogError, Phase::Success),
            Self::LogErrorFailure { .. } => (Op::LogError, Phase::Failure),
            Self::FetchUserRequest => (Op::FetchUser, Phase::Request),
            Self::FetchUserSuccess { .. } => (Op::FetchUser, Phase::Success),
            Self::FetchUserFailure { .. } => (Op::FetchUser, Phase::Failure),
            Self::FetchPatientRequest => (Op::FetchPatient, Phase::Request),
            Self::FetchPatientSuccess { .. } => (Op::FetchPatient, Phase::Success),
            Self::FetchPatientFailure { .. } => (Op::FetchPatient, Phase::Failure),
            Self::FetchPatientsRequest => (Op::FetchPatients, Phase::Request),
            Self::FetchPatientsSuccess { .. } => (Op::FetchPatients, Phase::Success),
            Self::FetchPatientsFailure { .. } => (Op::FetchPatients, Phase::Failure),
            Self::FetchPatientDataRequest => (Op::FetchPatientData, Phase::Request),
            Self::FetchPatientDataSuccess { .. } => (Op::FetchPatientData, Phase::Success),
            Self::FetchPatientDataFailure { .. } => (Op::FetchPatientData, Phase::Failure),
            Self::FetchMessageThreadRequest => (Op::FetchMessageThread, Phase::Request),
            Self::FetchMessageThreadSuccess { .. } => (Op::FetchMessageThread, Phase::Success),
            Self::FetchMessageThreadFailure { .. } => (Op::FetchMessageThread, Phase::Failure),
            Self::CreatePatientRequest => (Op::CreatePatient, Phase::Request),
            Self::CreatePatientSuccess { .. } => (Op::CreatePatient, Phase::Success),
            Self::CreatePatientFailure { .. } => (Op::CreatePatient, Phase::Failure),
            Self::UpdatePatientRequest => (Op::UpdatePatient, Phase::Request),
            Self::UpdatePatientSuccess { .. } => (Op::UpdatePatient, Phase::Success),
            Self::UpdatePatientFailure { .. } => (Op::UpdatePatient, Phase::Failure),
            Self::RemovePatientRequest => (Op::RemovePatient, Phase::Request),
            Self::RemovePatientSuccess { .. } => (Op::RemovePatient, Phase::Success),
            Self::RemovePatientFailure { .. } => (Op::RemovePatient, Phase::Failure),
            Self::RemoveMemberRequest => (Op::RemoveMember, Phase::Request),
            Self::RemoveMemberSuccess { .. } => (Op::RemoveMember, Phase::Success),
            Self::RemoveMemberFailure { .. } => (Op::RemoveMember, Phase::Failure),
            Self::SetMemberPermissionsRequest => (Op::SetMemberPermissions, Phase::Request),
            Self::SetMemberPermissionsSuccess { .. } => {
                (Op::SetMemberPermissions, Phase::Success)
            }
            Self::SetMemberPermissionsFailure { .. } => {
                (Op::SetMemberPermissions, Phase::Failure)
            }
            Self::SendInviteRequest => (Op::SendInvite, Phase::Request),
            Self::SendInviteSuccess { .. } => (Op::SendInvite, Phase::Success),
            Self::SendInviteFailure { .. } => (Op::SendInvite, Phase::Failure),
            Self::CancelSentInviteRequest => (Op::CancelSentInvite, Phase::Request),
            Self::CancelSentInviteSuccess { .. } => (Op::CancelSentInvite, Phase::Success),
            Self::CancelSentInviteFailure { .. } => (Op::CancelSentInvite, Phase::Failure),
            Self::AcceptReceivedInviteRequest { .. } => {
                (Op::AcceptReceivedInvite, Phase::Request)
            }
            Self::AcceptReceivedInviteSuccess { .. } => {
                (Op::AcceptReceivedInvite, Phase::Success)
            }
            Self::AcceptReceivedInviteFailure { .. } => {
                (Op::AcceptReceivedInvite, Phase::Failure)
            }
            Self::RejectReceivedInviteRequest { .. } => {
                (Op::RejectReceivedInvite, Phase::Request)
            }
            Self::RejectReceivedInviteSuccess { .. } => {
                (Op::RejectReceivedInvite, Phase::Success)
            }
            Self::RejectReceivedInviteFailure { .. } => {
                (Op::RejectReceivedInvite, Phase::Failure)
            }
            Self::FetchPendingSentInvitesRequest => {
                (Op::FetchPendingSentInvites, Phase::Request)
            }
            Self::FetchPendingSentInvitesSuccess { .. } => {
                (Op::FetchPendingSentInvites, Phase::Success)
            }
            Self::FetchPendingSentInvitesFailure { .. } => {
                (Op::FetchPendingSentInvites, Phase::Failure)
            }
            Self::FetchPendingReceivedInvitesRequest => {
                (Op::FetchPendingReceivedInvites, Phase::Request)
            }
            Self::FetchPendingReceivedInvitesSuccess { .. } => {
                (Op::FetchPendingReceivedInvites, Phase::Success)
            }
            Self::FetchPendingReceivedInvitesFailure { .. } => {
                (Op::FetchPendingReceivedInvites, Phase::Failure)
            }
            Self::NavigateTo { .. } => return None,
        })
    }

    /// The operation this action belongs to.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self.descriptor() {
            Some((operation, _)) => Some(operation),
            None => None,
        }
    }

    /// The phase of this action within its operation.
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        match self.descriptor() {
            Some((_, phase)) => Some(phase),
            None => None,
        }
    }

    /// The classified error on a FAILURE action, if it carries one.
    ///
    /// Domain-signaled non-errors (login 403, fetchUser 401) are
    /// FAILURE actions without an error.
    #[must_use]
    pub const fn failure_error(&self) -> Option<&AppError> {
        match self {
            Self::SignupFailure { error, .. }
            | Self::ConfirmSignupFailure { error, .. }
            | Self::ResendEmailVerificationFailure { error, .. }
            | Self::AcceptTermsFailure { error, .. }
            | Self::LogoutFailure { error, .. }
            | Self::UpdateUserFailure { error, .. }
            | Self::RequestPasswordResetFailure { error, .. }
            | Self::ConfirmPasswordResetFailure { error, .. }
            | Self::LogErrorFailure { error, .. }
            | Self::FetchPatientFailure { error, .. }
            | Self::FetchPatientsFailure { error, .. }
            | Self::FetchPatientDataFailure { error, .. }
            | Self::FetchMessageThreadFailure { error, .. }
            | Self::CreatePatientFailure { error, .. }
            | Self::UpdatePatientFailure { error, .. }
            | Self::RemovePatientFailure { error, .. }
            | Self::RemoveMemberFailure { error, .. }
            | Self::SetMemberPermissionsFailure { error, .. }
            | Self::SendInviteFailure { error, .. }
            | Self::CancelSentInviteFailure { error, .. }
            | Self::AcceptReceivedInviteFailure { error, .. }
            | Self::RejectReceivedInviteFailure { error, .. }
            | Self::FetchPendingSentInvitesFailure { error, .. }
            | Self::FetchPendingReceivedInvitesFailure { error, .. } => Some(error),
            Self::LoginFailure { error, .. } | Self::FetchUserFailure { error, .. } => {
                error.as_ref()
            }
            _ => None,
        }
    }
}
