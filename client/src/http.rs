//! HTTP implementation of the platform API client.
//!
//! Session handling follows the platform convention: a successful
//! login or signup returns the session token in the
//! `x-careflow-session-token` response header, and every subsequent
//! request echoes it back in the same request header. The token lives
//! in a process-wide slot inside the client; logout clears it whether
//! or not the remote call succeeded.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::constants::SESSION_TOKEN_HEADER;
use crate::error::ApiError;
use crate::state::{
    Credentials, Datum, Invitation, Message, PasswordReset, Patient, Permissions,
    SignupForm, User, UserId, UserUpdate,
};
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::RwLock;
use std::time::Duration;

/// Platform API client over HTTP.
#[derive(Debug)]
pub struct HttpApiClient {
    http: reqwest::Client,
    api_url: String,
    timeout: Duration,
    session_token: RwLock<Option<String>>,
}

impl HttpApiClient {
    /// Builds a client from configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            timeout: config.timeout(),
            session_token: RwLock::new(None),
        }
    }

    /// The session token in use, if a session is active.
    ///
    /// # Errors
    ///
    /// Returns a network-shaped error if the token slot is poisoned.
    pub fn session_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self
            .session_token
            .read()
            .map_err(|_| ApiError::network("lock poisoned"))?
            .clone())
    }

    fn set_session_token(&self, token: Option<String>) -> Result<(), ApiError> {
        *self.session_token.write().map_err(|_| ApiError::network("lock poisoned"))? = token;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let mut builder = self
            .http
            .request(method, format!("{}{path}", self.api_url))
            .timeout(self.timeout);
        if let Some(token) = self.session_token()? {
            builder = builder.header(SESSION_TOKEN_HEADER, token);
        }
        Ok(builder)
    }

    /// Sends a request and maps non-2xx statuses and transport errors
    /// into [`ApiError`].
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|error| {
            tracing::debug!(%error, "platform request failed in transport");
            transport_error(&error)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "platform request rejected");
        if body.is_empty() {
            Err(ApiError::status(status.as_u16()))
        } else {
            Err(ApiError::with_body(status.as_u16(), body))
        }
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(builder).await?;
        response.json().await.map_err(|error| {
            tracing::debug!(%error, "platform response body failed to decode");
            transport_error(&error)
        })
    }

    /// Captures the session token from a login or signup response.
    fn adopt_session(&self, response: &Response) -> Result<(), ApiError> {
        let token = response
            .headers()
            .get(SESSION_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        if token.is_some() {
            self.set_session_token(token)?;
        }
        Ok(())
    }
}

fn transport_error(error: &reqwest::Error) -> ApiError {
    match error.status() {
        Some(status) => ApiError::status(status.as_u16()),
        None => ApiError::network(error.to_string()),
    }
}

impl ApiClient for HttpApiClient {
    async fn signup(&self, form: &SignupForm) -> Result<User, ApiError> {
        let builder = self.request(Method::POST, "/v1/users")?.json(form);
        let response = self.execute(builder).await?;
        self.adopt_session(&response)?;
        response.json().await.map_err(|error| transport_error(&error))
    }

    async fn confirm_signup(&self, key: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::PUT, &format!("/v1/confirmations/signup/{key}"))?;
        self.execute(builder).await.map(|_| ())
    }

    async fn resend_email_verification(&self, email: &str) -> Result<(), ApiError> {
        let builder =
            self.request(Method::POST, &format!("/v1/confirmations/resend/{email}"))?;
        self.execute(builder).await.map(|_| ())
    }

    async fn accept_terms(&self, accepted_date: DateTime<Utc>) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/v1/user/terms")?
            .json(&json!({ "acceptedDate": accepted_date }));
        self.execute(builder).await.map(|_| ())
    }

    async fn login(&self, credentials: &Credentials, remember: bool) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/v1/login")?
            .query(&[("remember", remember)])
            .json(credentials);
        let response = self.execute(builder).await?;
        self.adopt_session(&response)?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/v1/logout")?;
        let result = self.execute(builder).await.map(|_| ());
        // The local session ends even if the remote call did not.
        self.set_session_token(None)?;
        result
    }

    async fn get_current_user(&self) -> Result<User, ApiError> {
        let builder = self.request(Method::GET, "/v1/user")?;
        self.execute_json(builder).await
    }

    async fn update_current_user(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let builder = self.request(Method::PUT, "/v1/user")?.json(update);
        self.execute_json(builder).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let builder =
            self.request(Method::POST, &format!("/v1/confirmations/forgot/{email}"))?;
        self.execute(builder).await.map(|_| ())
    }

    async fn confirm_password_reset(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, "/v1/confirmations/forgot")?
            .json(reset);
        self.execute(builder).await.map(|_| ())
    }

    async fn get_patient(&self, patient_id: &UserId) -> Result<Patient, ApiError> {
        let builder = self.request(Method::GET, &format!("/v1/patients/{patient_id}"))?;
        self.execute_json(builder).await
    }

    async fn get_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let builder = self.request(Method::GET, "/v1/patients")?;
        self.execute_json(builder).await
    }

    async fn create_patient(&self, patient: &Patient) -> Result<Patient, ApiError> {
        let builder = self.request(Method::POST, "/v1/patients")?.json(patient);
        self.execute_json(builder).await
    }

    async fn update_patient(&self, patient: &Patient) -> Result<Patient, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/v1/patients/{}", patient.userid))?
            .json(patient);
        self.execute_json(builder).await
    }

    async fn leave_group(&self, patient_id: &UserId) -> Result<(), ApiError> {
        let builder = self.request(
            Method::DELETE,
            &format!("/v1/patients/{patient_id}/membership"),
        )?;
        self.execute(builder).await.map(|_| ())
    }

    async fn remove_member(&self, member_id: &UserId) -> Result<(), ApiError> {
        let builder =
            self.request(Method::DELETE, &format!("/v1/team/members/{member_id}"))?;
        self.execute(builder).await.map(|_| ())
    }

    async fn set_member_permissions(
        &self,
        member_id: &UserId,
        permissions: &Permissions,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(
                Method::PUT,
                &format!("/v1/team/members/{member_id}/permissions"),
            )?
            .json(permissions);
        self.execute(builder).await.map(|_| ())
    }

    async fn send_invite(
        &self,
        email: &str,
        permissions: &Permissions,
    ) -> Result<Invitation, ApiError> {
        let builder = self
            .request(Method::POST, "/v1/invitations")?
            .json(&json!({ "email": email, "permissions": permissions }));
        self.execute_json(builder).await
    }

    async fn cancel_invite(&self, email: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/v1/invitations/{email}"))?;
        self.execute(builder).await.map(|_| ())
    }

    async fn accept_invite(&self, key: &str, creator_id: &UserId) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/v1/invitations/{key}/accept"))?
            .json(&json!({ "creatorId": creator_id }));
        self.execute(builder).await.map(|_| ())
    }

    async fn dismiss_invite(&self, key: &str, creator_id: &UserId) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/v1/invitations/{key}/dismiss"))?
            .json(&json!({ "creatorId": creator_id }));
        self.execute(builder).await.map(|_| ())
    }

    async fn get_sent_invites(&self) -> Result<Vec<Invitation>, ApiError> {
        let builder = self.request(Method::GET, "/v1/invitations/sent")?;
        self.execute_json(builder).await
    }

    async fn get_received_invites(&self) -> Result<Vec<Invitation>, ApiError> {
        let builder = self.request(Method::GET, "/v1/invitations/received")?;
        self.execute_json(builder).await
    }

    async fn get_patient_data(&self, patient_id: &UserId) -> Result<Vec<Datum>, ApiError> {
        let builder = self.request(Method::GET, &format!("/v1/data/{patient_id}"))?;
        self.execute_json(builder).await
    }

    async fn get_notes(&self, patient_id: &UserId) -> Result<Vec<Message>, ApiError> {
        let builder =
            self.request(Method::GET, &format!("/v1/messages/notes/{patient_id}"))?;
        self.execute_json(builder).await
    }

    async fn get_message_thread(&self, thread_id: &str) -> Result<Vec<Message>, ApiError> {
        let builder =
            self.request(Method::GET, &format!("/v1/messages/thread/{thread_id}"))?;
        self.execute_json(builder).await
    }

    async fn log_error(&self, message: &str, details: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/v1/errors")?
            .json(&json!({ "message": message, "details": details }));
        self.execute(builder).await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn config_url_is_normalized_without_a_trailing_slash() {
        let client = HttpApiClient::new(&ClientConfig {
            api_url: "https://api.careflow.example/".to_owned(),
            request_timeout: 5,
        });
        assert_eq!(client.api_url, "https://api.careflow.example");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn session_token_starts_empty_and_can_be_replaced() {
        let client = HttpApiClient::new(&ClientConfig::default());
        assert_eq!(client.session_token().unwrap(), None);

        client.set_session_token(Some("tok-123".to_owned())).unwrap();
        assert_eq!(
            client.session_token().unwrap(),
            Some("tok-123".to_owned())
        );

        client.set_session_token(None).unwrap();
        assert_eq!(client.session_token().unwrap(), None);
    }
}
