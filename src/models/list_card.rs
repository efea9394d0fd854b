//! List card model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card within a board list.
///
/// Reachable only via a list, which is reachable only via a board owned
/// by the requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCard {
    /// Unique identifier
    pub id: i64,
    /// Card title
    pub title: String,
    /// Owning list identifier
    pub list_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ListCard {
    pub fn new(title: String, list_id: i64) -> Self {
        Self {
            id: 0, // Set by the database
            title,
            list_id,
            created_at: Utc::now(),
        }
    }
}

/// How an update changes a card.
///
/// Decided once at the API boundary: a request either moves the card to
/// another list or renames it, never both. When both fields are sent the
/// move wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardUpdate {
    /// Move the card to another list
    Move { list_id: i64 },
    /// Change the card title
    Rename { title: String },
}
