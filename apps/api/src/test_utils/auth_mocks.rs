//! In-memory mock implementations of the auth collaborator traits.
//!
//! These back both use-case tests and HTTP-level tests driven through `TestServer`.

use async_trait::async_trait;
use codegate_types::Role;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::user::{CodeDispatch, CodeSender, CodeStore, IdentityRepo},
    domain::entities::identity::Identity,
};

// ============================================================================
// InMemoryIdentityRepo
// ============================================================================

struct StoredIdentity {
    identity: Identity,
    requests_count: i64,
}

/// In-memory implementation of IdentityRepo for testing.
#[derive(Default)]
pub struct InMemoryIdentityRepo {
    identities: Mutex<HashMap<i64, StoredIdentity>>,
    next_id: Mutex<i64>,
}

impl InMemoryIdentityRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity directly, bypassing find-or-create.
    pub fn seed(&self, email: Option<&str>, role: Role) -> Identity {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let identity = Identity {
            id: *next_id,
            email: email.map(str::to_string),
            role,
            created_at: None,
        };
        self.identities.lock().unwrap().insert(
            identity.id,
            StoredIdentity {
                identity: identity.clone(),
                requests_count: 0,
            },
        );
        identity
    }

    pub fn get(&self, id: i64) -> Option<Identity> {
        self.identities
            .lock()
            .unwrap()
            .get(&id)
            .map(|stored| stored.identity.clone())
    }

    pub fn set_role(&self, id: i64, role: Role) {
        if let Some(stored) = self.identities.lock().unwrap().get_mut(&id) {
            stored.identity.role = role;
        }
    }

    pub fn set_requests_count(&self, id: i64, count: i64) {
        if let Some(stored) = self.identities.lock().unwrap().get_mut(&id) {
            stored.requests_count = count;
        }
    }

    pub fn requests_count(&self, id: i64) -> i64 {
        self.identities
            .lock()
            .unwrap()
            .get(&id)
            .map(|stored| stored.requests_count)
            .unwrap_or_default()
    }
}

#[async_trait]
impl IdentityRepo for InMemoryIdentityRepo {
    async fn create_identity(&self, email: Option<&str>, role: Role) -> AppResult<Identity> {
        if let Some(email) = email {
            let existing = self
                .identities
                .lock()
                .unwrap()
                .values()
                .find(|stored| stored.identity.email.as_deref() == Some(email))
                .map(|stored| stored.identity.clone());
            if let Some(identity) = existing {
                return Ok(identity);
            }
        }
        Ok(self.seed(email, role))
    }

    async fn get_identity(&self, id: i64) -> AppResult<Option<Identity>> {
        Ok(self.get(id))
    }

    async fn get_requests_count(&self, id: i64) -> AppResult<i64> {
        self.identities
            .lock()
            .unwrap()
            .get(&id)
            .map(|stored| stored.requests_count)
            .ok_or(AppError::IdentityNotFound)
    }

    async fn increment_requests_count(&self, id: i64) -> AppResult<()> {
        if let Some(stored) = self.identities.lock().unwrap().get_mut(&id) {
            stored.requests_count += 1;
        }
        Ok(())
    }
}

// ============================================================================
// InMemoryCodeStore
// ============================================================================

/// In-memory code store. TTLs are recorded, not enforced.
#[derive(Default)]
pub struct InMemoryCodeStore {
    codes: Mutex<HashMap<String, (String, u64)>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, email: &str, code: &str) {
        self.codes
            .lock()
            .unwrap()
            .insert(email.to_string(), (code.to_string(), 300));
    }

    pub fn peek(&self, email: &str) -> Option<String> {
        self.codes
            .lock()
            .unwrap()
            .get(email)
            .map(|(code, _)| code.clone())
    }

    pub fn ttl_of(&self, email: &str) -> Option<u64> {
        self.codes.lock().unwrap().get(email).map(|(_, ttl)| *ttl)
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn set(&self, email: &str, code: &str, ttl_secs: u64) -> AppResult<()> {
        self.codes
            .lock()
            .unwrap()
            .insert(email.to_string(), (code.to_string(), ttl_secs));
        Ok(())
    }

    async fn get(&self, email: &str) -> AppResult<Option<String>> {
        Ok(self.peek(email))
    }

    async fn delete(&self, email: &str) -> AppResult<()> {
        self.codes.lock().unwrap().remove(email);
        Ok(())
    }
}

// ============================================================================
// Hanging stores
// ============================================================================

/// Code store whose calls never complete, for timeout tests.
pub struct HangingCodeStore;

#[async_trait]
impl CodeStore for HangingCodeStore {
    async fn set(&self, _email: &str, _code: &str, _ttl_secs: u64) -> AppResult<()> {
        std::future::pending().await
    }

    async fn get(&self, _email: &str) -> AppResult<Option<String>> {
        std::future::pending().await
    }

    async fn delete(&self, _email: &str) -> AppResult<()> {
        std::future::pending().await
    }
}

/// Identity store whose calls never complete, for timeout tests.
pub struct HangingIdentityRepo;

#[async_trait]
impl IdentityRepo for HangingIdentityRepo {
    async fn create_identity(&self, _email: Option<&str>, _role: Role) -> AppResult<Identity> {
        std::future::pending().await
    }

    async fn get_identity(&self, _id: i64) -> AppResult<Option<Identity>> {
        std::future::pending().await
    }

    async fn get_requests_count(&self, _id: i64) -> AppResult<i64> {
        std::future::pending().await
    }

    async fn increment_requests_count(&self, _id: i64) -> AppResult<()> {
        std::future::pending().await
    }
}

// ============================================================================
// CapturingCodeSender
// ============================================================================

/// Records delivered codes. Works both as the delivery channel and as an
/// immediate dispatcher, so use-case tests can skip the worker.
#[derive(Default)]
pub struct CapturingCodeSender {
    sent: Mutex<Vec<(String, String)>>,
    attempts: AtomicU32,
    failures_left: AtomicU32,
}

impl CapturingCodeSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `n` send attempts.
    pub fn failing_first(n: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(n),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CodeSender for CapturingCodeSender {
    async fn send(&self, destination: &str, code: &str) -> AppResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::DependencyUnavailable("send failed".into()));
        }

        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), code.to_string()));
        Ok(())
    }
}

impl CodeDispatch for CapturingCodeSender {
    fn dispatch(&self, destination: String, code: String) -> AppResult<()> {
        self.sent.lock().unwrap().push((destination, code));
        Ok(())
    }
}
