//! Directory entity <-> model mappers

use ledger_core::entities::{Alliance, Member};
use ledger_core::value_objects::Snowflake;

use crate::models::{AllianceModel, MemberModel};

/// Convert AllianceModel to Alliance entity
impl From<AllianceModel> for Alliance {
    fn from(model: AllianceModel) -> Self {
        Alliance {
            id: Snowflake::new(model.id),
            name: model.name,
            tag: model.tag,
            leader_id: model.leader_id.map(Snowflake::new),
            bank_name: model.bank_name,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

/// Convert MemberModel to Member entity
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: Snowflake::new(model.id),
            name: model.name,
            governor_id: model.governor_id,
            alliance_id: Snowflake::new(model.alliance_id),
            joined_at: model.joined_at,
        }
    }
}
