use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::user::models::Presence;
use crate::domain::user::ports::ActivityTracker;
use crate::user::errors::ActivityError;

/// Process-local activity store.
///
/// An account counts as online while its last activity is within
/// `online_window` of the time asked about. Keyed by user id; tokens are
/// never stored.
pub struct InMemoryActivityTracker {
    online_window: Duration,
    last_activity: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryActivityTracker {
    pub fn new(online_window_seconds: i64) -> Self {
        Self {
            online_window: Duration::seconds(online_window_seconds),
            last_activity: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ActivityTracker for InMemoryActivityTracker {
    async fn record_activity(
        &self,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), ActivityError> {
        let mut last_activity = self
            .last_activity
            .write()
            .map_err(|e| ActivityError::Unavailable(e.to_string()))?;

        let entry = last_activity.entry(user_id.to_string()).or_insert(at);
        // Out-of-order requests never move activity backwards
        if at > *entry {
            *entry = at;
        }

        Ok(())
    }

    async fn presence(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Presence>, ActivityError> {
        let last_activity = self
            .last_activity
            .read()
            .map_err(|e| ActivityError::Unavailable(e.to_string()))?;

        Ok(last_activity.get(user_id).map(|&at| Presence {
            last_activity: at,
            online: now - at <= self.online_window,
        }))
    }
}
