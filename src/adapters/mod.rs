use crate::domain::exercise::Exercise;
use crate::domain::user::{User, UserLog};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod database;
pub mod memory;

pub use database::PgUserStore;
pub use memory::MemoryUserStore;

/// Persistence for users and their embedded exercise logs.
///
/// Implementations must keep usernames unique and preserve the append order
/// of exercises.
#[async_trait]
pub trait UserStore: std::fmt::Debug + Send + Sync + 'static {
    /// Inserts a user with an empty log.
    ///
    /// # Errors
    /// Returns `AppError::UserExists` if the username is taken.
    async fn create_user(&self, username: &str) -> Result<User>;

    /// Every user, oldest first.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Appends one exercise to a user's log as a single atomic operation.
    /// Returns `None` if no such user exists.
    async fn append_exercise(&self, user_id: Uuid, exercise: &Exercise) -> Result<Option<User>>;

    /// Loads a user and their full log. Returns `None` if no such user exists.
    async fn find_log(&self, user_id: Uuid) -> Result<Option<UserLog>>;

    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> Result<()>;

    /// Releases pooled connections during shutdown.
    async fn close(&self);
}
