use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for friend requests
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FriendRequestRow {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl FriendRequestRow {
    pub fn to_shared(&self) -> shared::FriendRequest {
        shared::FriendRequest {
            id: Uuid::parse_str(&self.id).unwrap(),
            sender_id: Uuid::parse_str(&self.sender_id).unwrap(),
            receiver_id: Uuid::parse_str(&self.receiver_id).unwrap(),
            status: self
                .status
                .parse()
                .unwrap_or(shared::FriendRequestStatus::Pending),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FriendRequestStatus;

    #[test]
    fn test_friend_request_row_to_shared() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let sender_id = Uuid::new_v4();
        let receiver_id = Uuid::new_v4();

        let row = FriendRequestRow {
            id: id.to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            status: "accepted".to_string(),
            created_at: now,
        };

        let shared = row.to_shared();

        assert_eq!(shared.id, id);
        assert_eq!(shared.sender_id, sender_id);
        assert_eq!(shared.receiver_id, receiver_id);
        assert_eq!(shared.status, FriendRequestStatus::Accepted);
    }
}
