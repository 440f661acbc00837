//! Search history domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded search, owned by the User API and mirrored locally.
///
/// The server decides dedupe and ordering; the client stores the confirmed
/// list only, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Server-assigned entry identifier
    pub id: i64,
    /// The query text as submitted
    pub query: String,
    /// Server-side recording time
    pub timestamp: DateTime<Utc>,
}
