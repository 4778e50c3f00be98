use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self { username: user.username, id: user.id }
    }
}
