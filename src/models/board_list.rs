//! Board list model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named column within a board.
///
/// Only visible and mutable through a board the requester owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    /// Unique identifier
    pub id: i64,
    /// List title
    pub title: String,
    /// Owning board identifier
    pub board_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl BoardList {
    pub fn new(title: String, board_id: i64) -> Self {
        Self {
            id: 0, // Set by the database
            title,
            board_id,
            created_at: Utc::now(),
        }
    }
}
