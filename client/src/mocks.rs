//! In-memory API client for tests.
//!
//! [`MockApi`] records every call it receives under a stable
//! `resource.method` key and answers from canned data configured
//! through its builder methods. Any call can be made to fail with a
//! specific [`ApiError`] via [`MockApi::failing`].
//!
//! Clones share state, so a test can keep a handle for assertions
//! while the dispatcher owns another.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::state::{
    Credentials, Datum, Invitation, Message, PasswordReset, Patient, Permissions,
    SignupForm, User, UserId, UserUpdate,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Canned {
    user: Option<User>,
    patients: HashMap<UserId, Patient>,
    all_patients: Vec<Patient>,
    invitation: Option<Invitation>,
    sent_invites: Vec<Invitation>,
    received_invites: Vec<Invitation>,
    data: Vec<Datum>,
    notes: Vec<Message>,
    thread: Vec<Message>,
    failures: HashMap<String, ApiError>,
}

/// Canned-response API client.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    canned: Arc<Mutex<Canned>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    /// Fresh mock with no canned data; fetches of specific records
    /// fail with 404/401 until configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session account returned by user fetches.
    #[must_use]
    pub fn with_user(self, user: User) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.user = Some(user);
        }
        self
    }

    /// Adds a patient record, keyed by its account id.
    #[must_use]
    pub fn with_patient(self, patient: Patient) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.patients.insert(patient.userid.clone(), patient);
        }
        self
    }

    /// Sets the viewable-patients list.
    #[must_use]
    pub fn with_patients(self, patients: Vec<Patient>) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.all_patients = patients;
        }
        self
    }

    /// Sets the invitation returned by `invitation.send`.
    #[must_use]
    pub fn with_invitation(self, invitation: Invitation) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.invitation = Some(invitation);
        }
        self
    }

    /// Sets the pending sent invitations.
    #[must_use]
    pub fn with_sent_invites(self, invites: Vec<Invitation>) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.sent_invites = invites;
        }
        self
    }

    /// Sets the pending received invitations.
    #[must_use]
    pub fn with_received_invites(self, invites: Vec<Invitation>) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.received_invites = invites;
        }
        self
    }

    /// Sets the readings returned by `patientData.get`.
    #[must_use]
    pub fn with_data(self, data: Vec<Datum>) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.data = data;
        }
        self
    }

    /// Sets the notes returned by `team.getNotes`.
    #[must_use]
    pub fn with_notes(self, notes: Vec<Message>) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.notes = notes;
        }
        self
    }

    /// Sets the messages returned by `team.getMessageThread`.
    #[must_use]
    pub fn with_thread(self, thread: Vec<Message>) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.thread = thread;
        }
        self
    }

    /// Makes one call key fail with the given error.
    #[must_use]
    pub fn failing(self, method: &str, error: ApiError) -> Self {
        if let Ok(mut canned) = self.canned.lock() {
            canned.failures.insert(method.to_owned(), error);
        }
        self
    }

    /// Every call key recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// How many times a call key was recorded.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|call| *call == method).count())
            .unwrap_or(0)
    }

    /// Records the call and returns its configured failure, if any.
    fn observe(&self, method: &str) -> Result<(), ApiError> {
        self.calls
            .lock()
            .map_err(|_| ApiError::network("lock poisoned"))?
            .push(method.to_owned());
        let canned = self.canned.lock().map_err(|_| ApiError::network("lock poisoned"))?;
        match canned.failures.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn canned<T>(&self, read: impl FnOnce(&Canned) -> T) -> Result<T, ApiError> {
        let canned = self.canned.lock().map_err(|_| ApiError::network("lock poisoned"))?;
        Ok(read(&canned))
    }
}

impl ApiClient for MockApi {
    async fn signup(&self, form: &SignupForm) -> Result<User, ApiError> {
        self.observe("user.signup")?;
        self.canned(|canned| {
            canned.user.clone().unwrap_or_else(|| User {
                userid: UserId::from("user-1"),
                username: Some(form.username.clone()),
                emails: form.emails.clone(),
                ..User::default()
            })
        })
    }

    async fn confirm_signup(&self, _key: &str) -> Result<(), ApiError> {
        self.observe("confirm.signup")
    }

    async fn resend_email_verification(&self, _email: &str) -> Result<(), ApiError> {
        self.observe("confirm.resend")
    }

    async fn accept_terms(&self, _accepted_date: DateTime<Utc>) -> Result<(), ApiError> {
        self.observe("user.acceptTerms")
    }

    async fn login(&self, _credentials: &Credentials, _remember: bool) -> Result<(), ApiError> {
        self.observe("user.login")
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.observe("user.logout")
    }

    async fn get_current_user(&self) -> Result<User, ApiError> {
        self.observe("user.get")?;
        self.canned(|canned| canned.user.clone())?
            .ok_or_else(|| ApiError::status(401))
    }

    async fn update_current_user(&self, update: &UserUpdate) -> Result<User, ApiError> {
        self.observe("user.put")?;
        self.canned(|canned| {
            canned
                .user
                .clone()
                .unwrap_or_default()
                .updated_with(update)
        })
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        self.observe("confirm.requestReset")
    }

    async fn confirm_password_reset(&self, _reset: &PasswordReset) -> Result<(), ApiError> {
        self.observe("confirm.applyReset")
    }

    async fn get_patient(&self, patient_id: &UserId) -> Result<Patient, ApiError> {
        self.observe("patient.get")?;
        self.canned(|canned| canned.patients.get(patient_id).cloned())?
            .ok_or_else(|| ApiError::status(404))
    }

    async fn get_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.observe("patient.getAll")?;
        self.canned(|canned| canned.all_patients.clone())
    }

    async fn create_patient(&self, patient: &Patient) -> Result<Patient, ApiError> {
        self.observe("patient.post")?;
        Ok(patient.clone())
    }

    async fn update_patient(&self, patient: &Patient) -> Result<Patient, ApiError> {
        self.observe("patient.put")?;
        Ok(patient.clone())
    }

    async fn leave_group(&self, _patient_id: &UserId) -> Result<(), ApiError> {
        self.observe("access.leaveGroup")
    }

    async fn remove_member(&self, _member_id: &UserId) -> Result<(), ApiError> {
        self.observe("access.removeMember")
    }

    async fn set_member_permissions(
        &self,
        _member_id: &UserId,
        _permissions: &Permissions,
    ) -> Result<(), ApiError> {
        self.observe("access.setMemberPermissions")
    }

    async fn send_invite(
        &self,
        email: &str,
        permissions: &Permissions,
    ) -> Result<Invitation, ApiError> {
        self.observe("invitation.send")?;
        self.canned(|canned| {
            canned.invitation.clone().unwrap_or_else(|| Invitation {
                key: "invite-1".to_owned(),
                email: Some(email.to_owned()),
                permissions: permissions.clone(),
                ..Invitation::default()
            })
        })
    }

    async fn cancel_invite(&self, _email: &str) -> Result<(), ApiError> {
        self.observe("invitation.cancel")
    }

    async fn accept_invite(&self, _key: &str, _creator_id: &UserId) -> Result<(), ApiError> {
        self.observe("invitation.accept")
    }

    async fn dismiss_invite(&self, _key: &str, _creator_id: &UserId) -> Result<(), ApiError> {
        self.observe("invitation.dismiss")
    }

    async fn get_sent_invites(&self) -> Result<Vec<Invitation>, ApiError> {
        self.observe("invitation.getSent")?;
        self.canned(|canned| canned.sent_invites.clone())
    }

    async fn get_received_invites(&self) -> Result<Vec<Invitation>, ApiError> {
        self.observe("invitation.getReceived")?;
        self.canned(|canned| canned.received_invites.clone())
    }

    async fn get_patient_data(&self, _patient_id: &UserId) -> Result<Vec<Datum>, ApiError> {
        self.observe("patientData.get")?;
        self.canned(|canned| canned.data.clone())
    }

    async fn get_notes(&self, _patient_id: &UserId) -> Result<Vec<Message>, ApiError> {
        self.observe("team.getNotes")?;
        self.canned(|canned| canned.notes.clone())
    }

    async fn get_message_thread(&self, _thread_id: &str) -> Result<Vec<Message>, ApiError> {
        self.observe("team.getMessageThread")?;
        self.canned(|canned| canned.thread.clone())
    }

    async fn log_error(&self, _message: &str, _details: &str) -> Result<(), ApiError> {
        self.observe("errors.log")
    }
}
