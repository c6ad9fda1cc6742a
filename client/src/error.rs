//! Error types and the transport-error classifier.
//!
//! Two layers of error live here:
//!
//! - [`ApiError`] is the raw outcome of a remote call: an HTTP status
//!   with an optional body, or a network-level failure with no status.
//!   It rides along on every FAILURE event as diagnostic metadata.
//! - [`AppError`] is the classified, user-facing error. Its `#[error]`
//!   texts are the static message catalog: one generic entry per
//!   operation plus special-cased entries for statuses that carry a
//!   distinct meaning on particular operations.

use crate::state::Operation;
use thiserror::Error;

/// Raw API failure: HTTP status plus body, or a network-level failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code; `None` for network-level failures.
    pub status: Option<u16>,

    /// Response body or transport error description.
    pub body: Option<String>,
}

impl ApiError {
    /// Failure with a status code and no body.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            body: None,
        }
    }

    /// Failure with a status code and response body.
    #[must_use]
    pub fn with_body(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// Network-level failure (no HTTP response).
    #[must_use]
    pub fn network(description: impl Into<String>) -> Self {
        Self {
            status: None,
            body: Some(description.into()),
        }
    }

    /// Whether this failure never reached the server.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        self.status.is_none()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "api error: status {status}"),
            None => write!(f, "api error: network failure"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classified, user-facing errors.
///
/// The display texts form the stable message catalog consumed by the
/// UI layer; classifying the same `(operation, status)` pair twice
/// always yields the same text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    // ═══════════════════════════════════════════════════════════
    // Account and session
    // ═══════════════════════════════════════════════════════════
    /// Generic signup failure.
    #[error("An error occurred while signing up.")]
    Signup,

    /// Signup 409: the account already exists.
    #[error("An account already exists for that e-mail address.")]
    AccountAlreadyExists,

    /// Generic signup-confirmation failure.
    #[error("An error occurred while confirming your sign-up.")]
    ConfirmingSignup,

    /// Generic verification-resend failure.
    #[error("An error occurred while resending the verification e-mail.")]
    ResendingEmailVerification,

    /// Generic terms-acceptance failure.
    #[error("An error occurred while accepting the terms of use.")]
    AcceptingTerms,

    /// Generic login failure.
    #[error("An error occurred while logging in.")]
    Login,

    /// Login 401: wrong credentials.
    #[error("Wrong username or password.")]
    LoginCredentials,

    /// Generic logout failure.
    #[error("An error occurred while logging out.")]
    Logout,

    /// Synthetic: the fetched account's e-mail is not verified.
    #[error("Looks like your e-mail address has not been verified yet.")]
    EmailNotVerified,

    /// Generic account-save failure.
    #[error("An error occurred while saving your account.")]
    UpdatingUser,

    /// Generic password-reset-request failure.
    #[error("An error occurred while requesting the password reset.")]
    RequestingPasswordReset,

    /// Generic password-reset-confirmation failure.
    #[error("An error occurred while resetting your password.")]
    ConfirmingPasswordReset,

    /// Generic account fetch failure.
    #[error("An error occurred while fetching your account.")]
    FetchingUser,

    /// Generic sent-invitations fetch failure.
    #[error("An error occurred while fetching sent invitations.")]
    FetchingPendingSentInvites,

    /// Generic received-invitations fetch failure.
    #[error("An error occurred while fetching received invitations.")]
    FetchingPendingReceivedInvites,

    // ═══════════════════════════════════════════════════════════
    // Patients and data
    // ═══════════════════════════════════════════════════════════
    /// Generic data-storage setup (patient creation) failure.
    #[error("An error occurred while setting up data storage.")]
    SettingUpDataStorage,

    /// Generic patient-save failure.
    #[error("An error occurred while saving the patient profile.")]
    UpdatingPatient,

    /// Generic patient fetch failure.
    #[error("An error occurred while fetching the patient.")]
    FetchingPatient,

    /// fetchPatient 404 on the logged-in user's own account: data
    /// storage has not been set up yet.
    #[error("Your account is not set up to store data yet.")]
    AccountNotConfigured,

    /// Generic patients fetch failure.
    #[error("An error occurred while fetching patients.")]
    FetchingPatients,

    /// Generic patient-data fetch failure.
    #[error("An error occurred while fetching patient data.")]
    FetchingPatientData,

    /// Generic message-thread fetch failure.
    #[error("An error occurred while fetching the message thread.")]
    FetchingMessageThread,

    // ═══════════════════════════════════════════════════════════
    // Care team and invitations
    // ═══════════════════════════════════════════════════════════
    /// Generic care-team-departure failure.
    #[error("An error occurred while leaving the care team.")]
    RemovingMembership,

    /// Generic member-removal failure.
    #[error("An error occurred while removing the care team member.")]
    RemovingMember,

    /// Generic invitation-send failure.
    #[error("An error occurred while sending the invitation.")]
    SendingInvite,

    /// sendInvite 409: an invitation is already pending for the e-mail.
    #[error("An invitation has already been sent to that e-mail address.")]
    AlreadySentToEmail,

    /// Generic invitation-cancel failure.
    #[error("An error occurred while cancelling the invitation.")]
    CancellingInvite,

    /// Generic invitation-accept failure.
    #[error("An error occurred while accepting the invitation.")]
    AcceptingInvite,

    /// Generic invitation-decline failure.
    #[error("An error occurred while declining the invitation.")]
    RejectingInvite,

    /// Generic permission-change failure.
    #[error("An error occurred while changing the member permissions.")]
    ChangingPermissions,

    // ═══════════════════════════════════════════════════════════
    // Diagnostics
    // ═══════════════════════════════════════════════════════════
    /// Generic error-report failure.
    #[error("An error occurred while reporting the problem.")]
    LoggingError,
}

impl AppError {
    /// The generic catalog entry for an operation.
    #[must_use]
    pub const fn generic(operation: Operation) -> Self {
        match operation {
            Operation::Signup => Self::Signup,
            Operation::ConfirmSignup => Self::ConfirmingSignup,
            Operation::ResendEmailVerification => Self::ResendingEmailVerification,
            Operation::AcceptTerms => Self::AcceptingTerms,
            Operation::Login => Self::Login,
            Operation::Logout => Self::Logout,
            Operation::CreatePatient => Self::SettingUpDataStorage,
            Operation::RemovePatient => Self::RemovingMembership,
            Operation::RemoveMember => Self::RemovingMember,
            Operation::SendInvite => Self::SendingInvite,
            Operation::CancelSentInvite => Self::CancellingInvite,
            Operation::AcceptReceivedInvite => Self::AcceptingInvite,
            Operation::RejectReceivedInvite => Self::RejectingInvite,
            Operation::SetMemberPermissions => Self::ChangingPermissions,
            Operation::UpdatePatient => Self::UpdatingPatient,
            Operation::UpdateUser => Self::UpdatingUser,
            Operation::RequestPasswordReset => Self::RequestingPasswordReset,
            Operation::ConfirmPasswordReset => Self::ConfirmingPasswordReset,
            Operation::LogError => Self::LoggingError,
            Operation::FetchUser => Self::FetchingUser,
            Operation::FetchPendingSentInvites => Self::FetchingPendingSentInvites,
            Operation::FetchPendingReceivedInvites => Self::FetchingPendingReceivedInvites,
            Operation::FetchPatient => Self::FetchingPatient,
            Operation::FetchPatients => Self::FetchingPatients,
            Operation::FetchPatientData => Self::FetchingPatientData,
            Operation::FetchMessageThread => Self::FetchingMessageThread,
        }
    }
}

/// Classify a raw API failure for an operation.
///
/// Pure function of `(operation, status)`: statuses with a distinct
/// meaning on an operation map to their special-cased catalog entry,
/// everything else (including absent statuses from network failures)
/// falls back to the operation's generic entry. Never panics.
#[must_use]
pub fn classify(operation: Operation, error: &ApiError) -> AppError {
    match (operation, error.status) {
        (Operation::Login, Some(401)) => AppError::LoginCredentials,
        (Operation::Signup, Some(409)) => AppError::AccountAlreadyExists,
        (Operation::SendInvite, Some(409)) => AppError::AlreadySentToEmail,
        _ => AppError::generic(operation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn login_statuses_map_per_catalog() {
        assert_eq!(
            classify(Operation::Login, &ApiError::status(401)),
            AppError::LoginCredentials
        );
        assert_eq!(
            classify(Operation::Login, &ApiError::status(400)),
            AppError::Login
        );
        assert_eq!(
            classify(Operation::Login, &ApiError::status(500)),
            AppError::Login
        );
    }

    #[test]
    fn conflict_statuses_are_special_cased_per_operation() {
        assert_eq!(
            classify(Operation::Signup, &ApiError::status(409)),
            AppError::AccountAlreadyExists
        );
        assert_eq!(
            classify(Operation::SendInvite, &ApiError::status(409)),
            AppError::AlreadySentToEmail
        );
        // 409 has no special meaning elsewhere.
        assert_eq!(
            classify(Operation::CancelSentInvite, &ApiError::status(409)),
            AppError::CancellingInvite
        );
    }

    #[test]
    fn network_failures_fall_back_to_the_generic_entry() {
        assert_eq!(
            classify(Operation::FetchPatients, &ApiError::network("connection refused")),
            AppError::FetchingPatients
        );
        assert_eq!(
            classify(Operation::Login, &ApiError::network("timed out")),
            AppError::Login
        );
    }

    #[test]
    fn display_preserves_raw_status() {
        assert_eq!(ApiError::status(404).to_string(), "api error: status 404");
        assert_eq!(
            ApiError::network("x").to_string(),
            "api error: network failure"
        );
    }

    proptest! {
        // Classification is a pure function: same (operation, status)
        // pair, same message text, regardless of body.
        #[test]
        fn classification_is_deterministic(
            op_index in 0usize..Operation::ALL.len(),
            status in proptest::option::of(100u16..600),
            body in proptest::option::of(".*"),
        ) {
            let operation = Operation::ALL[op_index];
            let error = ApiError { status, body };

            let first = classify(operation, &error);
            let second = classify(operation, &error);

            prop_assert_eq!(first.to_string(), second.to_string());
        }

        // The classifier is total: every (operation, status) pair
        // yields a constructed error.
        #[test]
        fn classification_is_total(
            op_index in 0usize..Operation::ALL.len(),
            status in proptest::option::of(0u16..=u16::MAX),
        ) {
            let operation = Operation::ALL[op_index];
            let error = ApiError { status, body: None };

            let classified = classify(operation, &error);
            prop_assert!(!classified.to_string().is_empty());
        }
    }
}
