use chrono::NaiveDateTime;
use codegate_types::Role;

/// An authenticated principal: a registered user (with email) or a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: Option<NaiveDateTime>,
}
