use crate::adapters::UserStore;
use crate::domain::exercise::Exercise;
use crate::domain::user::{User, UserLog};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local user store. Contents are lost on restart.
///
/// All writes take the same lock, so appends for one user never interleave.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserLog>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, username: &str) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|entry| entry.user.username == username) {
            return Err(AppError::UserExists);
        }

        let user = User { id: Uuid::new_v4(), username: username.to_string() };
        users.push(UserLog { user: user.clone(), exercises: Vec::new() });
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().map(|entry| entry.user.clone()).collect())
    }

    async fn append_exercise(&self, user_id: Uuid, exercise: &Exercise) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        let Some(entry) = users.iter_mut().find(|entry| entry.user.id == user_id) else {
            return Ok(None);
        };

        entry.exercises.push(exercise.clone());
        Ok(Some(entry.user.clone()))
    }

    async fn find_log(&self, user_id: Uuid) -> Result<Option<UserLog>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|entry| entry.user.id == user_id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}
}
