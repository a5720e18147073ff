//! # Authentication
//!
//! Accounts are managed by an external Supabase-compatible auth service. This
//! module wraps its four operations (sign-up, sign-in, sign-out, current user)
//! behind [`AuthService`].
//!
//! None of the operations raise on failure. Each returns an [`AuthOutcome`]
//! with `success == false` and a message, after logging the failure. Callers
//! treat anything but an explicit success as failure.
//!
//! The session returned by sign-in is persisted through [`KeyValueStorage`]
//! under [`SESSION_KEY`], next to the selected deck.

use crate::error::{QuickThinkError, Result};
use crate::storage::KeyValueStorage;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "session";
const MIN_PASSWORD_CHARS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub user: Option<Value>,
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn ok(user: Option<Value>) -> Self {
        Self {
            success: true,
            user,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(error = %message, "auth request failed");
        Self {
            success: false,
            user: None,
            error: Some(message),
        }
    }

    /// The user's email, when the service included one.
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref()?.get("email")?.as_str()
    }
}

pub trait AuthService {
    fn sign_up(&mut self, email: &str, password: &str) -> AuthOutcome;
    fn sign_in(&mut self, email: &str, password: &str) -> AuthOutcome;
    fn sign_out(&mut self) -> AuthOutcome;
    fn current_user(&mut self) -> AuthOutcome;
}

/// Form rules applied before any request: the email needs a non-blank local
/// part and domain around an `@`, the password more than six characters.
pub fn validate_credentials(email: &str, password: &str) -> std::result::Result<(), String> {
    let email_ok = !email.chars().any(char::is_whitespace)
        && email
            .char_indices()
            .any(|(i, c)| c == '@' && i > 0 && i + 1 < email.len());
    if !email_ok {
        return Err("Invalid email".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be longer than 6 characters".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

/// Persisted auth session. Unreadable sessions count as signed out.
pub struct SessionStore {
    storage: Box<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Option<Session> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read stored session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable stored session");
                None
            }
        }
    }

    pub fn save(&mut self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.storage.set(SESSION_KEY, &raw)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(SESSION_KEY)
    }
}

/// Client for the Supabase auth REST API (`/auth/v1/...`).
pub struct SupabaseAuth {
    client: Client,
    base: Url,
    api_key: String,
    sessions: SessionStore,
}

impl SupabaseAuth {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
        sessions: SessionStore,
    ) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| {
            QuickThinkError::Config(format!("Invalid auth URL {}: {}", base_url, e))
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            api_key: api_key.to_string(),
            sessions,
        })
    }

    fn url(&self, path: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| QuickThinkError::Config("Auth URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["auth", "v1"])
            .extend(path);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, path: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.url(path)?)
            .header("apikey", &self.api_key))
    }

    /// Send a request and decode the JSON body, mapping non-success statuses to
    /// the service's error message.
    fn call(&self, request: RequestBuilder) -> std::result::Result<Value, String> {
        let response = request.send().map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response.text().map_err(|e| e.to_string())?;
        debug!(status = status.as_u16(), "auth response");

        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap_or(Value::String(body))
        };

        if status.is_success() {
            Ok(value)
        } else {
            Err(error_message(&value).unwrap_or_else(|| format!("status {}", status.as_u16())))
        }
    }

    fn credentials_call(
        &self,
        path: &[&str],
        query: Option<(&str, &str)>,
        email: &str,
        password: &str,
    ) -> std::result::Result<Value, String> {
        let mut request = self
            .request(reqwest::Method::POST, path)
            .map_err(|e| e.to_string())?
            .json(&json!({ "email": email, "password": password }));
        if let Some(pair) = query {
            request = request.query(&[pair]);
        }
        self.call(request)
    }
}

/// Supabase reports errors under a handful of different keys.
fn error_message(body: &Value) -> Option<String> {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| body.as_str().map(str::to_string))
}

/// Sign-up answers with a session (auto-confirm) or with the bare user.
fn user_from(body: &Value) -> Option<Value> {
    match body.get("user") {
        Some(user) if !user.is_null() => Some(user.clone()),
        _ if body.get("id").is_some() => Some(body.clone()),
        _ => None,
    }
}

fn session_from(body: &Value) -> Option<Session> {
    serde_json::from_value(body.clone()).ok()
}

impl AuthService for SupabaseAuth {
    fn sign_up(&mut self, email: &str, password: &str) -> AuthOutcome {
        if let Err(message) = validate_credentials(email, password) {
            return AuthOutcome::failed(message);
        }
        match self.credentials_call(&["signup"], None, email, password) {
            Ok(body) => {
                if let Some(session) = session_from(&body) {
                    if let Err(e) = self.sessions.save(&session) {
                        warn!(error = %e, "could not persist session");
                    }
                }
                AuthOutcome::ok(user_from(&body))
            }
            Err(message) => AuthOutcome::failed(message),
        }
    }

    fn sign_in(&mut self, email: &str, password: &str) -> AuthOutcome {
        if let Err(message) = validate_credentials(email, password) {
            return AuthOutcome::failed(message);
        }
        let body = match self.credentials_call(
            &["token"],
            Some(("grant_type", "password")),
            email,
            password,
        ) {
            Ok(body) => body,
            Err(message) => return AuthOutcome::failed(message),
        };

        let Some(session) = session_from(&body) else {
            return AuthOutcome::failed("Sign-in response did not contain a session");
        };
        if let Err(e) = self.sessions.save(&session) {
            return AuthOutcome::failed(format!("Could not store session: {}", e));
        }
        AuthOutcome::ok(user_from(&body))
    }

    fn sign_out(&mut self) -> AuthOutcome {
        let session = self.sessions.load();
        if let Err(e) = self.sessions.clear() {
            return AuthOutcome::failed(format!("Could not remove session: {}", e));
        }
        let Some(session) = session else {
            return AuthOutcome::ok(None);
        };

        let request = match self.request(reqwest::Method::POST, &["logout"]) {
            Ok(r) => r.bearer_auth(&session.access_token),
            Err(e) => return AuthOutcome::failed(e.to_string()),
        };
        match self.call(request) {
            Ok(_) => AuthOutcome::ok(None),
            Err(message) => AuthOutcome::failed(message),
        }
    }

    fn current_user(&mut self) -> AuthOutcome {
        let Some(session) = self.sessions.load() else {
            return AuthOutcome::failed("Not signed in");
        };
        let request = match self.request(reqwest::Method::GET, &["user"]) {
            Ok(r) => r.bearer_auth(&session.access_token),
            Err(e) => return AuthOutcome::failed(e.to_string()),
        };
        match self.call(request) {
            Ok(body) => AuthOutcome::ok(user_from(&body).or(session.user)),
            Err(message) => AuthOutcome::failed(message),
        }
    }
}
