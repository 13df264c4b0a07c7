//! Account repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use smartidea_core::{Error, NewUser, Result, User, UserRepository};

/// Accounts held in memory. Emails are unique (exact match).
#[derive(Default)]
pub struct MemUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn create(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::Conflict(format!("Email exists: {}", user.email)));
        }

        let record = User {
            id: Uuid::now_v7(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        debug!(user_id = %record.id, "Created user");
        users.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }
}
