//! Member entity - a governor belonging to one alliance

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Alliance member, resolved through the external directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Snowflake,
    pub name: String,
    /// Identifier of the member's account in the game itself
    pub governor_id: String,
    pub alliance_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        id: Snowflake,
        name: impl Into<String>,
        governor_id: impl Into<String>,
        alliance_id: Snowflake,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            governor_id: governor_id.into(),
            alliance_id,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn belongs_to(&self, alliance_id: Snowflake) -> bool {
        self.alliance_id == alliance_id
    }
}
