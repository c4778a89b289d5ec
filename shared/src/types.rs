use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// User Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

// ============================================================================
// Friend Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
        }
    }
}

impl FromStr for FriendRequestStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(FriendRequestStatus::Pending),
            "accepted" => Ok(FriendRequestStatus::Accepted),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A friend request together with the profile of the other party
/// (the sender for incoming requests, the receiver for outgoing ones).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestWithUser {
    pub request: FriendRequest,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendFriendRequestRequest {
    pub username: String,
}

// ============================================================================
// Household Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHouseholdRequest {
    pub name: String,
}

// ============================================================================
// Membership Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Member => "member",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "member" => Ok(Role::Member),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub id: Uuid,
    pub household_id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberWithUser {
    pub membership: HouseholdMember,
    pub user: User,
}

// ============================================================================
// Invite Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Declined => "declined",
        }
    }
}

impl FromStr for InviteStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InviteStatus::Pending),
            "accepted" => Ok(InviteStatus::Accepted),
            "declined" => Ok(InviteStatus::Declined),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdInvite {
    pub id: Uuid,
    pub household_id: Uuid,
    pub inviter_id: Uuid,
    pub invitee_id: Uuid,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInviteRequest {
    pub invitee_id: Uuid,
}

/// A pending invite as shown to the invitee, with enough context to act on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteWithHousehold {
    pub invite: HouseholdInvite,
    pub household_name: String,
    pub inviter_username: String,
}

// ============================================================================
// Chore Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoreTemplate {
    pub id: Uuid,
    pub household_id: Uuid,
    pub name: String,
    pub kind: String,
    pub points: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChoreTemplateRequest {
    pub name: String,
    pub kind: Option<String>,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogChoreRequest {
    pub chore_id: Uuid,
    pub participant_ids: Vec<Uuid>,
}

/// One user's slice of a logged chore entry's points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub entry_id: Uuid,
    pub user_id: Uuid,
    pub points_earned: f64,
}

/// A logged chore entry as shown in the household history, with the
/// template's name and point value and the per-participant shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoreEntryDetail {
    pub id: Uuid,
    pub chore_name: String,
    pub points: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<ParticipantShare>,
}

// ============================================================================
// Leaderboard Types
// ============================================================================

/// Profile fields needed to render a member on the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Derived per-member total, recomputed on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub total_points: f64,
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{error}: {message}")]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("owner".parse(), Ok(Role::Owner));
        assert_eq!("MEMBER".parse(), Ok(Role::Member));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_as_str_round_trip() {
        for role in [Role::Owner, Role::Member] {
            assert_eq!(role.as_str().parse(), Ok(role));
        }
    }

    #[test]
    fn test_friend_request_status_from_str() {
        assert_eq!("pending".parse(), Ok(FriendRequestStatus::Pending));
        assert_eq!("Accepted".parse(), Ok(FriendRequestStatus::Accepted));
        assert!("declined".parse::<FriendRequestStatus>().is_err());
    }

    #[test]
    fn test_invite_status_from_str() {
        assert_eq!("pending".parse(), Ok(InviteStatus::Pending));
        assert_eq!("ACCEPTED".parse(), Ok(InviteStatus::Accepted));
        assert_eq!("Declined".parse(), Ok(InviteStatus::Declined));
        assert!("expired".parse::<InviteStatus>().is_err());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError {
            error: "not_found".to_string(),
            message: "Household not found".to_string(),
        };
        assert_eq!(error.to_string(), "not_found: Household not found");
    }

    #[test]
    fn test_api_success() {
        let success = ApiSuccess::new("test data");
        assert_eq!(success.data, "test data");
    }

    #[test]
    fn test_leaderboard_row_serializes_total_points() {
        let row = LeaderboardRow {
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            avatar_url: None,
            total_points: 3.33,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["total_points"], 3.33);
    }
}
