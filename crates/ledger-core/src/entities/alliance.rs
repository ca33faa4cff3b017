//! Alliance entity - owned by the external member directory

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Alliance as seen by the ledger
///
/// Alliances reference their members only indirectly: a member points at an
/// alliance, the alliance holds no member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alliance {
    pub id: Snowflake,
    pub name: String,
    pub tag: String,
    pub leader_id: Option<Snowflake>,
    /// Name of the in-game bank account that receives contributions
    pub bank_name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Alliance {
    pub fn new(id: Snowflake, name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tag: tag.into(),
            leader_id: None,
            bank_name: None,
            description: None,
            created_at: Utc::now(),
        }
    }
}
