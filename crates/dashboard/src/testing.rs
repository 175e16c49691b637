//! In-memory collaborators for unit and router tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use secrecy::SecretString;
use tower_sessions::MemoryStore;
use url::Url;

use saddle_core::{AccountId, AccountMetadata, AccountType, AdAccount, Email, UserMetadata};

use crate::config::{DashboardConfig, SupabaseConfig};
use crate::db::RepositoryError;
use crate::middleware::create_session_layer;
use crate::services::{AccountStore, AuthFailure, AuthResult, AuthService, AuthSession, AuthUser};
use crate::state::AppState;

pub const TEST_USER_ID: &str = "3f2a9c1e-7b4d-4e8a-9c2f-1a2b3c4d5e6f";

pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        database_url: SecretString::from("postgres://localhost/saddle_test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 8501,
        base_url: "http://localhost:8501".to_owned(),
        supabase: SupabaseConfig {
            url: Url::parse("http://localhost:54321").unwrap(),
            anon_key: SecretString::from("anon"),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The full router over in-memory collaborators and an in-memory session store.
pub fn test_app(auth: Arc<FakeAuth>, accounts: Arc<FakeAccounts>) -> Router {
    let config = test_config();
    let session_layer = create_session_layer(MemoryStore::default(), &config);
    let state = AppState::new(config, auth, accounts);
    crate::routes::routes().layer(session_layer).with_state(state)
}

/// A live session for `email`.
pub fn session_for(email: &str) -> AuthSession {
    AuthSession::new(
        format!("access-{email}"),
        "refresh",
        4_102_444_800,
        TEST_USER_ID,
        Some(Email::parse(email).unwrap()),
    )
}

#[derive(Default)]
struct Calls(Mutex<HashMap<&'static str, usize>>);

impl Calls {
    fn record(&self, name: &'static str) {
        *self.0.lock().unwrap().entry(name).or_default() += 1;
    }

    fn count(&self, name: &str) -> usize {
        self.0.lock().unwrap().get(name).copied().unwrap_or(0)
    }
}

struct FakeUser {
    password: String,
    metadata: UserMetadata,
}

/// Auth service that keeps users in memory and counts calls.
#[derive(Default)]
pub struct FakeAuth {
    users: Mutex<HashMap<String, FakeUser>>,
    calls: Calls,
    fail: bool,
}

impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, email: &str, password: &str, metadata: UserMetadata) -> Self {
        self.users.lock().unwrap().insert(
            email.to_owned(),
            FakeUser {
                password: password.to_owned(),
                metadata,
            },
        );
        self
    }

    /// Every mutating call fails without a message.
    pub fn failing_without_message(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls.count(name)
    }

    pub fn metadata_of(&self, email: &str) -> Option<UserMetadata> {
        self.users
            .lock()
            .unwrap()
            .get(email)
            .map(|u| u.metadata.clone())
    }

    pub fn password_of(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .get(email)
            .map(|u| u.password.clone())
    }

    fn check_failing(&self) -> AuthResult {
        if self.fail {
            Err(AuthFailure::unexplained())
        } else {
            Ok(())
        }
    }

    fn signed_in_email(session: Option<&AuthSession>) -> Option<String> {
        session
            .filter(|s| !s.is_expired())
            .and_then(|s| s.email.as_ref())
            .map(|e| e.as_str().to_owned())
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<String>> {
        self.calls.record("sign_up");
        self.check_failing()?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(email) {
            return Err(AuthFailure::new("User already registered"));
        }
        users.insert(
            email.to_owned(),
            FakeUser {
                password: password.to_owned(),
                metadata: UserMetadata::default(),
            },
        );
        Ok(None)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.calls.record("sign_in");
        self.check_failing()?;
        let users = self.users.lock().unwrap();
        match users.get(email) {
            Some(user) if user.password == password => Ok(session_for(email)),
            _ => Err(AuthFailure::new("Invalid login credentials")),
        }
    }

    async fn sign_out(&self, _session: &AuthSession) -> AuthResult {
        self.calls.record("sign_out");
        self.check_failing()
    }

    async fn reset_password(&self, _email: &str) -> AuthResult<Option<String>> {
        self.calls.record("reset_password");
        self.check_failing()?;
        Ok(None)
    }

    async fn is_authenticated(&self, session: Option<&AuthSession>) -> bool {
        session.is_some_and(|s| !s.is_expired())
    }

    async fn get_current_user(&self, session: Option<&AuthSession>) -> Option<AuthUser> {
        self.calls.record("get_current_user");
        let email = Self::signed_in_email(session)?;
        let metadata = self.metadata_of(&email).unwrap_or_default();
        Some(AuthUser {
            id: TEST_USER_ID.to_owned(),
            email: Email::parse(&email).ok(),
            metadata,
        })
    }

    async fn get_user_email(&self, session: Option<&AuthSession>) -> Option<Email> {
        Self::signed_in_email(session).and_then(|e| Email::parse(&e).ok())
    }

    async fn update_user_metadata(
        &self,
        session: Option<&AuthSession>,
        metadata: &UserMetadata,
    ) -> AuthResult {
        self.calls.record("update_user_metadata");
        self.check_failing()?;
        let email = Self::signed_in_email(session).ok_or_else(|| AuthFailure::new("Not signed in"))?;
        if let Some(user) = self.users.lock().unwrap().get_mut(&email) {
            user.metadata = metadata.clone();
        }
        Ok(())
    }

    async fn update_password(
        &self,
        session: Option<&AuthSession>,
        new_password: &str,
    ) -> AuthResult {
        self.calls.record("update_password");
        self.check_failing()?;
        let email = Self::signed_in_email(session).ok_or_else(|| AuthFailure::new("Not signed in"))?;
        if let Some(user) = self.users.lock().unwrap().get_mut(&email) {
            new_password.clone_into(&mut user.password);
        }
        Ok(())
    }
}

/// Account store over a `Vec`, in insertion order.
#[derive(Default)]
pub struct FakeAccounts {
    accounts: Mutex<Vec<AdAccount>>,
    calls: Calls,
    fail: bool,
}

impl FakeAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, name: &str) -> Self {
        self.accounts.lock().unwrap().push(AdAccount {
            id: AccountId::derive(name).unwrap(),
            name: name.to_owned(),
            account_type: AccountType::default(),
            metadata: AccountMetadata::default(),
        });
        self
    }

    /// Every call fails with a database error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls.count(name)
    }

    pub fn accounts(&self) -> Vec<AdAccount> {
        self.accounts.lock().unwrap().clone()
    }

    fn check_failing(&self) -> Result<(), RepositoryError> {
        if self.fail {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AccountStore for FakeAccounts {
    async fn get_all_accounts(&self) -> Result<Vec<AdAccount>, RepositoryError> {
        self.calls.record("get_all_accounts");
        self.check_failing()?;
        Ok(self.accounts())
    }

    async fn create_account(
        &self,
        id: &AccountId,
        name: &str,
        account_type: AccountType,
        metadata: &AccountMetadata,
    ) -> Result<bool, RepositoryError> {
        self.calls.record("create_account");
        self.check_failing()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| &a.id == id) {
            return Ok(false);
        }
        accounts.push(AdAccount {
            id: id.clone(),
            name: name.to_owned(),
            account_type,
            metadata: metadata.clone(),
        });
        Ok(true)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_failing()
    }
}
