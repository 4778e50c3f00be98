pub mod user;

pub(crate) use user::{UserLogRow, UserRecord};
