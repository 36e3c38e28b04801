use serde::Deserialize;
use serde::Serialize;

/// User data returned by the lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub is_verified: bool,
}

/// Principal resolved for a single request.
///
/// Built fresh from the lookup result on every resolution and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub is_verified: bool,
}

impl From<UserRecord> for Identity {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            role: record.role,
            is_active: record.is_active,
            is_verified: record.is_verified,
        }
    }
}
