//! Thin JSON client for the optional hosted backend.
//!
//! One struct implements both the identity seam (`AuthProvider`) and the
//! document store seam (`SessionRepository`), mirroring how the SQLite
//! repository backs several traits at once. The bearer token issued at
//! sign-in gates every document call.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use mantra_core::model::{BackendSettings, PracticeSession, UserId};
use storage::repository::{SessionRecord, SessionRepository, StorageError};

use crate::auth::{AuthProvider, UserProfile};
use crate::error::AuthError;

#[derive(Debug)]
pub struct RemoteBackend {
    client: Client,
    settings: BackendSettings,
    token: Mutex<Option<String>>,
}

impl RemoteBackend {
    #[must_use]
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
            token: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.settings.base_url())
    }

    // A poisoned lock reads as "no token": the caller sees Unauthorized and
    // signs in again.
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn set_token(&self, value: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = value;
        }
    }
}

#[async_trait]
impl AuthProvider for RemoteBackend {
    async fn sign_in(&self) -> Result<UserProfile, AuthError> {
        let payload = SignInRequest {
            api_key: self.settings.api_key(),
        };
        let response = self
            .client
            .post(self.endpoint("/v1/auth/sessions"))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::HttpStatus(response.status()));
        }

        let body: SignInResponse = response.json().await?;
        let user_id =
            UserId::new(body.user_id).map_err(|e| AuthError::InvalidProfile(e.to_string()))?;
        self.set_token(Some(body.token));

        Ok(UserProfile::new(user_id, body.display_name))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(token) = self.token() else {
            return Ok(());
        };
        // Local state is cleared first so a failed revoke still signs out.
        self.set_token(None);

        let response = self
            .client
            .delete(self.endpoint("/v1/auth/sessions"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for RemoteBackend {
    async fn append_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        let token = self.token().ok_or(StorageError::Unauthorized)?;
        let record = SessionRecord::from_session(session);
        let payload = SessionWrite {
            id: record.id.to_string(),
            count: record.count,
            word: record.word.as_deref(),
            lost_focus_count: record.lost_focus_count,
        };

        let response = self
            .client
            .post(self.endpoint("/v1/practice-sessions"))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthorized),
            StatusCode::CONFLICT => Err(StorageError::Conflict),
            status => Err(StorageError::Connection(format!("write failed: {status}"))),
        }
    }

    async fn list_recent_sessions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PracticeSession>, StorageError> {
        let token = self.token().ok_or(StorageError::Unauthorized)?;

        let response = self
            .client
            .get(self.endpoint("/v1/practice-sessions"))
            .query(&[("limit", limit)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(StorageError::Unauthorized);
            }
            status => {
                return Err(StorageError::Connection(format!("query failed: {status}")));
            }
        }

        let body: SessionList = response.json().await.map_err(transport)?;
        let mut out = Vec::with_capacity(body.sessions.len());
        for doc in body.sessions {
            let session = doc_into_record(doc)?.into_session().map_err(serde_err)?;
            // The token scopes the query server-side; drop anything that
            // still belongs to someone else.
            if session.user_id() == user_id {
                out.push(session);
            }
        }
        Ok(out)
    }
}

fn transport(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn serde_err<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn doc_into_record(doc: SessionDoc) -> Result<SessionRecord, StorageError> {
    Ok(SessionRecord {
        id: doc.id.parse().map_err(serde_err)?,
        user_id: UserId::new(doc.user_id).map_err(serde_err)?,
        count: doc.count,
        word: doc.word,
        lost_focus_count: doc.lost_focus_count,
        created_at: doc.timestamp,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    user_id: String,
    #[serde(default)]
    display_name: Option<String>,
    token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionWrite<'a> {
    id: String,
    count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    word: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lost_focus_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionDoc {
    id: String,
    user_id: String,
    count: u32,
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    lost_focus_count: Option<u32>,
    /// Server-assigned; may be unresolved right after a write.
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct SessionList {
    sessions: Vec<SessionDoc>,
}
