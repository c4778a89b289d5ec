use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for per-participant shares of a chore entry
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub entry_id: String,
    pub user_id: String,
    pub points_earned: f64,
}

impl ParticipantRow {
    pub fn to_shared(&self) -> shared::ParticipantShare {
        shared::ParticipantShare {
            entry_id: Uuid::parse_str(&self.entry_id).unwrap(),
            user_id: Uuid::parse_str(&self.user_id).unwrap(),
            points_earned: self.points_earned,
        }
    }
}

/// Chore entry joined with its template, as read for the history view
#[derive(Debug, Clone, FromRow)]
pub struct EntryWithTemplateRow {
    pub id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub chore_name: String,
    pub points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_row_to_shared() {
        let entry_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let row = ParticipantRow {
            entry_id: entry_id.to_string(),
            user_id: user_id.to_string(),
            points_earned: 3.33,
        };

        let shared = row.to_shared();

        assert_eq!(shared.entry_id, entry_id);
        assert_eq!(shared.user_id, user_id);
        assert_eq!(shared.points_earned, 3.33);
    }
}
