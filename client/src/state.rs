//! Application state types.
//!
//! This module defines the domain records the dispatch layer moves
//! around (users, patients, invitations, permissions) and the
//! application state the reducer folds actions into. All types are
//! `Clone` to support the functional architecture pattern; wire-facing
//! records carry serde derives with the platform's camelCase field
//! names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user (opaque platform id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// View the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self(String::new())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Domain Records
// ═══════════════════════════════════════════════════════════════════════

/// Named-capability permission set for a (patient, member) pair.
///
/// Capability names (e.g. `view`, `read`, `upload`) map to grants.
pub type Permissions = BTreeMap<String, bool>;

/// User profile sub-record (mutable independently of credentials).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Marks the account as owning a patient record. Gates the
    /// dependent patient lookups during login and user fetches.
    #[serde(default)]
    pub patient: bool,
}

/// A platform user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Account id.
    pub userid: UserId,

    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Contact e-mail addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,

    /// Whether the primary e-mail address has been verified.
    pub email_verified: bool,

    /// When the terms of use were accepted, if ever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_accepted: Option<DateTime<Utc>>,

    /// Profile sub-record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    /// Credential field. Never included in optimistic update payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Patient record folded in by composite fetches (login/fetchUser
    /// chains merge the dependent lookup into the user record).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,
}

impl User {
    /// Whether the profile flags this account as a patient.
    #[must_use]
    pub fn is_patient(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.patient)
    }

    /// Fold a patient record into this user record.
    ///
    /// Composite fetch chains expose one merged record, not two
    /// separate results.
    #[must_use]
    pub fn merged_with(mut self, patient: Patient) -> Self {
        self.patient = Some(patient);
        self
    }

    /// Merge a partial update onto this record to build the optimistic
    /// "updating" payload.
    ///
    /// Only fields present in the update are replaced. The credential
    /// field is stripped: the optimistic payload is shown to the UI and
    /// must never carry a password.
    #[must_use]
    pub fn updated_with(&self, update: &UserUpdate) -> Self {
        let mut updated = self.clone();
        if let Some(username) = &update.username {
            updated.username = Some(username.clone());
        }
        if let Some(emails) = &update.emails {
            updated.emails = emails.clone();
        }
        if let Some(profile) = &update.profile {
            updated.profile = Some(profile.clone());
        }
        updated.password = None;
        updated
    }
}

/// A partial user update: exactly the fields the caller wants changed.
///
/// This is what goes over the wire for `updateUser`: the minimal diff,
/// not the merged record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    /// New login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// New contact e-mail addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,

    /// Replacement profile sub-record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A patient record: demographic/profile fields owned independently of
/// the user account, looked up by user id or care-team relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    /// Owning account id.
    pub userid: UserId,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Date of birth (platform date string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,

    /// Diagnosis date (platform date string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_date: Option<String>,

    /// Free-form bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// The account that created an invitation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InviteCreator {
    /// Creator's account id.
    pub userid: UserId,

    /// Creator's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// A pending care-team relationship offer.
///
/// Received invitations are keyed by `(key, creator id)`; sent
/// invitations by recipient e-mail. Lifecycle states are positional:
/// which [`AppState`] list an invitation occupies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invitation {
    /// Opaque invitation key.
    pub key: String,

    /// Recipient e-mail (sent invitations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Creating account.
    pub creator: InviteCreator,

    /// Capabilities offered by the invitation.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub permissions: Permissions,
}

/// One patient data point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Datum {
    /// Data point id.
    pub id: String,

    /// Measured value.
    pub value: f64,

    /// Measurement time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// A care-team note or message-thread entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    /// Message id.
    pub id: String,

    /// Parent message id for thread replies; `None` for top-level notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_message: Option<String>,

    /// Author's account id.
    pub user_id: UserId,

    /// Patient group the message belongs to.
    pub group_id: UserId,

    /// When the message was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Message body.
    pub message_text: String,
}

/// A patient's fetched data set: readings plus care-team notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientData {
    /// Device/data readings.
    pub data: Vec<Datum>,

    /// Care-team notes fetched alongside the readings.
    pub notes: Vec<Message>,
}

// ═══════════════════════════════════════════════════════════════════════
// Credentials and form payloads
// ═══════════════════════════════════════════════════════════════════════

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,

    /// Password.
    pub password: String,
}

/// New-account signup form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    /// Login name.
    pub username: String,

    /// Password.
    pub password: String,

    /// Contact e-mail addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
}

/// Password-reset confirmation payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordReset {
    /// Reset key from the reset e-mail.
    pub key: String,

    /// Account e-mail.
    pub email: String,

    /// New password.
    pub password: String,
}

// ═══════════════════════════════════════════════════════════════════════
// Operations and working state
// ═══════════════════════════════════════════════════════════════════════

/// One named domain operation the dispatcher can perform.
///
/// Used to key working-state records and the error-message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create an account.
    Signup,
    /// Confirm a signup key.
    ConfirmSignup,
    /// Resend the verification e-mail.
    ResendEmailVerification,
    /// Accept the terms of use.
    AcceptTerms,
    /// Log in.
    Login,
    /// Log out.
    Logout,
    /// Create the patient record for the logged-in account.
    CreatePatient,
    /// Leave a patient's care team.
    RemovePatient,
    /// Remove a member from a patient's care team.
    RemoveMember,
    /// Send a care-team invitation.
    SendInvite,
    /// Cancel a sent invitation.
    CancelSentInvite,
    /// Accept a received invitation.
    AcceptReceivedInvite,
    /// Decline a received invitation.
    RejectReceivedInvite,
    /// Change a care-team member's permissions.
    SetMemberPermissions,
    /// Save a patient profile.
    UpdatePatient,
    /// Save the logged-in user's account.
    UpdateUser,
    /// Request a password reset e-mail.
    RequestPasswordReset,
    /// Confirm a password reset.
    ConfirmPasswordReset,
    /// Report a client-side error to the platform.
    LogError,
    /// Fetch the logged-in user (and their patient record).
    FetchUser,
    /// Fetch pending sent invitations.
    FetchPendingSentInvites,
    /// Fetch pending received invitations.
    FetchPendingReceivedInvites,
    /// Fetch one patient.
    FetchPatient,
    /// Fetch all viewable patients.
    FetchPatients,
    /// Fetch a patient's data and care-team notes.
    FetchPatientData,
    /// Fetch a message thread.
    FetchMessageThread,
}

impl Operation {
    /// All operation kinds, for exhaustive table checks.
    pub const ALL: [Self; 26] = [
        Self::Signup,
        Self::ConfirmSignup,
        Self::ResendEmailVerification,
        Self::AcceptTerms,
        Self::Login,
        Self::Logout,
        Self::CreatePatient,
        Self::RemovePatient,
        Self::RemoveMember,
        Self::SendInvite,
        Self::CancelSentInvite,
        Self::AcceptReceivedInvite,
        Self::RejectReceivedInvite,
        Self::SetMemberPermissions,
        Self::UpdatePatient,
        Self::UpdateUser,
        Self::RequestPasswordReset,
        Self::ConfirmPasswordReset,
        Self::LogError,
        Self::FetchUser,
        Self::FetchPendingSentInvites,
        Self::FetchPendingReceivedInvites,
        Self::FetchPatient,
        Self::FetchPatients,
        Self::FetchPatientData,
        Self::FetchMessageThread,
    ];

    /// The operation's name, for log fields.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::ConfirmSignup => "confirmSignup",
            Self::ResendEmailVerification => "resendEmailVerification",
            Self::AcceptTerms => "acceptTerms",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::CreatePatient => "createPatient",
            Self::RemovePatient => "removePatient",
            Self::RemoveMember => "removeMember",
            Self::SendInvite => "sendInvite",
            Self::CancelSentInvite => "cancelSentInvite",
            Self::AcceptReceivedInvite => "acceptReceivedInvite",
            Self::RejectReceivedInvite => "rejectReceivedInvite",
            Self::SetMemberPermissions => "setMemberPermissions",
            Self::UpdatePatient => "updatePatient",
            Self::UpdateUser => "updateUser",
            Self::RequestPasswordReset => "requestPasswordReset",
            Self::ConfirmPasswordReset => "confirmPasswordReset",
            Self::LogError => "logError",
            Self::FetchUser => "fetchUser",
            Self::FetchPendingSentInvites => "fetchPendingSentInvites",
            Self::FetchPendingReceivedInvites => "fetchPendingReceivedInvites",
            Self::FetchPatient => "fetchPatient",
            Self::FetchPatients => "fetchPatients",
            Self::FetchPatientData => "fetchPatientData",
            Self::FetchMessageThread => "fetchMessageThread",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of a working-state notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A failure the UI should render as an error.
    Error,
    /// Informational.
    Info,
}

/// A user-facing notification attached to a finished operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,

    /// Stable, human-readable message from the error catalog.
    pub message: String,
}

impl Notification {
    /// Build an error notification.
    #[must_use]
    pub const fn error(message: String) -> Self {
        Self {
            kind: NotificationKind::Error,
            message,
        }
    }
}

/// Per-operation-kind transient status.
///
/// Reset at the start of each new instance of the operation, finalized
/// at completion. A hung remote call leaves `in_progress: true`
/// indefinitely; there is deliberately no timeout at this layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingState {
    /// An instance of the operation is in flight.
    pub in_progress: bool,

    /// `Some(true)` after SUCCESS, `Some(false)` after FAILURE, `None`
    /// while in flight or never dispatched.
    pub completed: Option<bool>,

    /// Error notification from the last FAILURE, if it carried an
    /// error (domain-signaled non-errors produce none).
    pub notification: Option<Notification>,
}

impl WorkingState {
    /// Fresh record for a newly dispatched operation.
    #[must_use]
    pub const fn started() -> Self {
        Self {
            in_progress: true,
            completed: None,
            notification: None,
        }
    }

    /// Terminal record after SUCCESS.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            in_progress: false,
            completed: Some(true),
            notification: None,
        }
    }

    /// Terminal record after FAILURE.
    #[must_use]
    pub const fn failed(notification: Option<Notification>) -> Self {
        Self {
            in_progress: false,
            completed: Some(false),
            notification,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Application state
// ═══════════════════════════════════════════════════════════════════════

/// Root application state, folded from the action stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Whether a session is active.
    pub logged_in: bool,

    /// The session's account id; set on login/signup, cleared on logout.
    pub logged_in_user_id: Option<UserId>,

    /// Whether a verification e-mail was (re)sent this session.
    pub email_verification_sent: bool,

    /// Known user records by id.
    pub all_users: HashMap<UserId, User>,

    /// Known patient records by owning account id.
    pub patients: HashMap<UserId, Patient>,

    /// Fetched patient data sets by owning account id.
    pub patient_data: HashMap<UserId, PatientData>,

    /// Currently open message thread.
    pub message_thread: Option<Vec<Message>>,

    /// Invitations this account has sent and not yet seen resolved.
    pub pending_sent_invites: Vec<Invitation>,

    /// Invitations this account has received and not yet resolved.
    pub pending_received_invites: Vec<Invitation>,

    /// Per-operation transient status records.
    pub working: HashMap<Operation, WorkingState>,
}

impl AppState {
    /// The working-state record for an operation, if it ever ran.
    #[must_use]
    pub fn working(&self, operation: Operation) -> Option<&WorkingState> {
        self.working.get(&operation)
    }

    /// The logged-in user's record, if fetched.
    #[must_use]
    pub fn logged_in_user(&self) -> Option<&User> {
        self.logged_in_user_id
            .as_ref()
            .and_then(|id| self.all_users.get(id))
    }
}
