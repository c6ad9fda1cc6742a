//! Platform API client trait.
//!
//! This trait abstracts over the platform's REST API. Dispatch helpers
//! hold an `Arc<A: ApiClient>` injected at construction, so tests
//! substitute [`crate::mocks::MockApi`] without touching dispatch
//! code. [`crate::http::HttpApiClient`] is the production
//! implementation.
//!
//! # Implementation Notes
//!
//! - Every method is a single remote call
//! - Failures carry the HTTP status (or a network marker) only;
//!   classification into user-facing errors happens in the dispatch
//!   layer, never here

use crate::error::ApiError;
use crate::state::{
    Credentials, Datum, Invitation, Message, PasswordReset, Patient, Permissions,
    SignupForm, User, UserId, UserUpdate,
};
use chrono::{DateTime, Utc};

/// A client for the platform's REST API.
pub trait ApiClient: Send + Sync {
    /// Create an account.
    ///
    /// # Returns
    ///
    /// The stored account record.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - An account already exists for the address → HTTP 409
    fn signup(
        &self,
        form: &SignupForm,
    ) -> impl std::future::Future<Output = Result<User, ApiError>> + Send;

    /// Confirm a signup key from a verification e-mail.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the key is
    /// unknown or expired.
    fn confirm_signup(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Resend the verification e-mail for an address.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn resend_email_verification(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Record acceptance of the terms of use for the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session is
    /// invalid.
    fn accept_terms(
        &self,
        accepted_date: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Establish a session.
    ///
    /// `remember` extends the session lifetime.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Credentials are wrong → HTTP 401
    /// - E-mail is not verified → HTTP 403
    fn login(
        &self,
        credentials: &Credentials,
        remember: bool,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn logout(&self) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Fetch the logged-in account.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Session has expired → HTTP 401
    fn get_current_user(
        &self,
    ) -> impl std::future::Future<Output = Result<User, ApiError>> + Send;

    /// Apply an account update.
    ///
    /// # Returns
    ///
    /// The record as saved by the platform.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session is
    /// invalid.
    fn update_current_user(
        &self,
        update: &UserUpdate,
    ) -> impl std::future::Future<Output = Result<User, ApiError>> + Send;

    /// Send a password-reset e-mail for an address.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn request_password_reset(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Redeem a password-reset key.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the key is
    /// unknown or expired.
    fn confirm_password_reset(
        &self,
        reset: &PasswordReset,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Fetch a patient record by account id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - No patient record exists for the account → HTTP 404
    fn get_patient(
        &self,
        patient_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Patient, ApiError>> + Send;

    /// Fetch all patients visible to the session.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session is
    /// invalid.
    fn get_patients(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Patient>, ApiError>> + Send;

    /// Create the logged-in user's patient record.
    ///
    /// # Returns
    ///
    /// The stored record.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session is
    /// invalid.
    fn create_patient(
        &self,
        patient: &Patient,
    ) -> impl std::future::Future<Output = Result<Patient, ApiError>> + Send;

    /// Save a patient profile.
    ///
    /// # Returns
    ///
    /// The record as saved by the platform.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session lacks
    /// write access to the record.
    fn update_patient(
        &self,
        patient: &Patient,
    ) -> impl std::future::Future<Output = Result<Patient, ApiError>> + Send;

    /// Remove the logged-in user from a patient's care team.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn leave_group(
        &self,
        patient_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Remove a member from the logged-in patient's care team.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn remove_member(
        &self,
        member_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Replace a care-team member's permission set.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn set_member_permissions(
        &self,
        member_id: &UserId,
        permissions: &Permissions,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Invite an e-mail address to the care team.
    ///
    /// # Returns
    ///
    /// The pending invitation as stored by the platform.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - An invitation to the address is already pending → HTTP 409
    fn send_invite(
        &self,
        email: &str,
        permissions: &Permissions,
    ) -> impl std::future::Future<Output = Result<Invitation, ApiError>> + Send;

    /// Cancel a pending sent invitation by recipient e-mail.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn cancel_invite(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Accept a received invitation from `creator_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the key is
    /// unknown.
    fn accept_invite(
        &self,
        key: &str,
        creator_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Decline a received invitation from `creator_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the key is
    /// unknown.
    fn dismiss_invite(
        &self,
        key: &str,
        creator_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Fetch invitations the logged-in user has sent.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session is
    /// invalid.
    fn get_sent_invites(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Invitation>, ApiError>> + Send;

    /// Fetch invitations awaiting the logged-in user's response.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session is
    /// invalid.
    fn get_received_invites(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Invitation>, ApiError>> + Send;

    /// Fetch a patient's device data.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session lacks
    /// access to the patient.
    fn get_patient_data(
        &self,
        patient_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Datum>, ApiError>> + Send;

    /// Fetch a patient's care-team notes.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session lacks
    /// access to the patient.
    fn get_notes(
        &self,
        patient_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, ApiError>> + Send;

    /// Fetch all messages in a thread, root first.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the thread is
    /// unknown.
    fn get_message_thread(
        &self,
        thread_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, ApiError>> + Send;

    /// Report a client-side error to the platform log.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn log_error(
        &self,
        message: &str,
        details: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
