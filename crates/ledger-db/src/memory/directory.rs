//! In-memory MemberDirectory seeded from JSON

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::info;

use ledger_core::entities::{Alliance, Member};
use ledger_core::error::DomainError;
use ledger_core::traits::{MemberDirectory, RepoResult};
use ledger_core::value_objects::Snowflake;

/// Alliance entry in a directory seed file
#[derive(Debug, Clone, Deserialize)]
pub struct AllianceSeed {
    pub id: Snowflake,
    pub name: String,
    pub tag: String,
    #[serde(default)]
    pub leader_id: Option<Snowflake>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Member entry in a directory seed file
#[derive(Debug, Clone, Deserialize)]
pub struct MemberSeed {
    pub id: Snowflake,
    pub name: String,
    pub governor_id: String,
    pub alliance_id: Snowflake,
}

/// Contents of a directory seed file
///
/// ```json
/// {
///   "alliances": [{ "id": "1", "name": "Grey Wolves", "tag": "WOLF" }],
///   "members": [{ "id": "10", "name": "Aster", "governor_id": "G-1001", "alliance_id": "1" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub alliances: Vec<AllianceSeed>,
    #[serde(default)]
    pub members: Vec<MemberSeed>,
}

impl DirectorySeed {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::ValidationError(format!("invalid directory seed: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::InternalError(format!("cannot read directory seed {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}

/// Member directory held in process memory
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    alliances: RwLock<HashMap<Snowflake, Alliance>>,
    members: RwLock<HashMap<Snowflake, Member>>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from seed data
    ///
    /// Every member must reference an alliance present in the seed.
    pub fn from_seed(seed: DirectorySeed) -> Result<Self, DomainError> {
        let directory = Self::new();
        for entry in seed.alliances {
            let mut alliance = Alliance::new(entry.id, entry.name, entry.tag);
            alliance.leader_id = entry.leader_id;
            alliance.bank_name = entry.bank_name;
            alliance.description = entry.description;
            directory.insert_alliance(alliance);
        }
        for entry in seed.members {
            if !directory.alliances.read().contains_key(&entry.alliance_id) {
                return Err(DomainError::AllianceNotFound(entry.alliance_id));
            }
            directory.insert_member(Member::new(entry.id, entry.name, entry.governor_id, entry.alliance_id));
        }

        info!(
            alliances = directory.alliances.read().len(),
            members = directory.members.read().len(),
            "Directory seeded"
        );
        Ok(directory)
    }

    pub fn insert_alliance(&self, alliance: Alliance) {
        self.alliances.write().insert(alliance.id, alliance);
    }

    pub fn insert_member(&self, member: Member) {
        self.members.write().insert(member.id, member);
    }
}

#[async_trait]
impl MemberDirectory for MemoryDirectory {
    async fn find_member(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        Ok(self.members.read().get(&id).cloned())
    }

    async fn find_alliance(&self, id: Snowflake) -> RepoResult<Option<Alliance>> {
        Ok(self.alliances.read().get(&id).cloned())
    }

    async fn find_members(&self, ids: &[Snowflake]) -> RepoResult<Vec<Member>> {
        let members = self.members.read();
        Ok(ids.iter().filter_map(|id| members.get(id).cloned()).collect())
    }
}
