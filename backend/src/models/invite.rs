use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for household invites
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InviteRow {
    pub id: String,
    pub household_id: String,
    pub inviter_id: String,
    pub invitee_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl InviteRow {
    pub fn to_shared(&self) -> shared::HouseholdInvite {
        shared::HouseholdInvite {
            id: Uuid::parse_str(&self.id).unwrap(),
            household_id: Uuid::parse_str(&self.household_id).unwrap(),
            inviter_id: Uuid::parse_str(&self.inviter_id).unwrap(),
            invitee_id: Uuid::parse_str(&self.invitee_id).unwrap(),
            status: self.status.parse().unwrap_or(shared::InviteStatus::Pending),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::InviteStatus;

    #[test]
    fn test_invite_row_to_shared() {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let row = InviteRow {
            id: id.to_string(),
            household_id: Uuid::new_v4().to_string(),
            inviter_id: Uuid::new_v4().to_string(),
            invitee_id: Uuid::new_v4().to_string(),
            status: "declined".to_string(),
            created_at: now,
        };

        let shared = row.to_shared();

        assert_eq!(shared.id, id);
        assert_eq!(shared.status, InviteStatus::Declined);
    }
}
