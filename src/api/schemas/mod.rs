pub mod exercises;
pub mod health;
pub mod users;

/// Treats a missing or blank form value as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, String> {
    present(value).ok_or_else(|| format!("{field} is required"))
}

pub(crate) fn parse_user_id(raw: &str) -> Result<uuid::Uuid, String> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| format!("Invalid userId '{raw}'"))
}
