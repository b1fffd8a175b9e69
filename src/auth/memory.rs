use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::repo::UserRepository;
use crate::auth::repo_types::{NewUser, User};
use crate::db::RepoError;

/// In-memory credential store for tests. Keyed by email so the uniqueness
/// check and the insert happen under one lock, like a unique index.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    offline: AtomicBool,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    fn check_online(&self) -> Result<(), RepoError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepoError::Unavailable(anyhow::anyhow!(
                "connection refused (os error 111)"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        self.check_online()?;
        Ok(self.users.lock().await.get(email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        self.check_online()?;
        let mut users = self.users.lock().await;
        if users.contains_key(&user.email) {
            return Err(RepoError::Conflict);
        }
        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(record.email.clone(), record.clone());
        Ok(record)
    }
}
