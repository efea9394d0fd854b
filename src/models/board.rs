//! Board model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level board owned by a single user.
///
/// All board operations are scoped to `created_by == requester`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier
    pub id: i64,
    /// Board title
    pub title: String,
    /// Owning user identifier
    pub created_by: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(title: String, created_by: i64) -> Self {
        Self {
            id: 0, // Set by the database
            title,
            created_by,
            created_at: Utc::now(),
        }
    }
}
