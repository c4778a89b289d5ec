use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{FriendRequestRow, UserRow};
use crate::services::auth as auth_service;
use shared::{FriendRequest, FriendRequestStatus, FriendRequestWithUser, User};

#[derive(Debug, Error)]
pub enum FriendError {
    #[error("User not found")]
    UserNotFound,
    #[error("Cannot send a friend request to yourself")]
    SelfRequest,
    #[error("Request already sent")]
    AlreadyRequested,
    #[error("Already friends")]
    AlreadyFriends,
    #[error("Friend request not found")]
    NotFound,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("User lookup error: {0}")]
    AuthError(#[from] auth_service::AuthError),
}

/// Send a friend request to a user looked up by (case-insensitive) username.
pub async fn send_friend_request(
    pool: &SqlitePool,
    sender_id: &Uuid,
    username: &str,
) -> Result<FriendRequest, FriendError> {
    let receiver = auth_service::find_user_by_username(pool, username)
        .await?
        .ok_or(FriendError::UserNotFound)?;

    if receiver.id == *sender_id {
        return Err(FriendError::SelfRequest);
    }

    // A pair may only have one request between them, in either direction.
    let existing: Option<FriendRequestRow> = sqlx::query_as(
        r#"
        SELECT * FROM friend_requests
        WHERE (sender_id = ?1 AND receiver_id = ?2) OR (sender_id = ?2 AND receiver_id = ?1)
        "#,
    )
    .bind(sender_id.to_string())
    .bind(receiver.id.to_string())
    .fetch_optional(pool)
    .await?;

    if let Some(row) = existing {
        return Err(match row.to_shared().status {
            FriendRequestStatus::Accepted => FriendError::AlreadyFriends,
            FriendRequestStatus::Pending => FriendError::AlreadyRequested,
        });
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO friend_requests (id, sender_id, receiver_id, status, created_at)
        VALUES (?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(id.to_string())
    .bind(sender_id.to_string())
    .bind(receiver.id.to_string())
    .bind(now)
    .execute(pool)
    .await;

    if let Err(e) = result {
        return Err(match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                FriendError::AlreadyRequested
            }
            other => FriendError::DatabaseError(other),
        });
    }

    Ok(FriendRequest {
        id,
        sender_id: *sender_id,
        receiver_id: receiver.id,
        status: FriendRequestStatus::Pending,
        created_at: now,
    })
}

/// Accept a pending request. Only the receiver may accept.
pub async fn accept_friend_request(
    pool: &SqlitePool,
    request_id: &Uuid,
    receiver_id: &Uuid,
) -> Result<(), FriendError> {
    let result = sqlx::query(
        "UPDATE friend_requests SET status = 'accepted' WHERE id = ? AND receiver_id = ? AND status = 'pending'",
    )
    .bind(request_id.to_string())
    .bind(receiver_id.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(FriendError::NotFound);
    }

    Ok(())
}

/// Decline a pending request by deleting it. Deleting a request that no
/// longer exists is not an error.
pub async fn decline_friend_request(
    pool: &SqlitePool,
    request_id: &Uuid,
    receiver_id: &Uuid,
) -> Result<(), FriendError> {
    sqlx::query("DELETE FROM friend_requests WHERE id = ? AND receiver_id = ?")
        .bind(request_id.to_string())
        .bind(receiver_id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

/// Accepted friends of a user, from requests in either direction.
pub async fn list_friends(pool: &SqlitePool, user_id: &Uuid) -> Result<Vec<User>, FriendError> {
    let users: Vec<UserRow> = sqlx::query_as(
        r#"
        SELECT u.* FROM users u
        JOIN friend_requests fr
            ON (fr.sender_id = u.id AND fr.receiver_id = ?1)
            OR (fr.receiver_id = u.id AND fr.sender_id = ?1)
        WHERE fr.status = 'accepted'
        ORDER BY u.username ASC
        "#,
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await?;

    Ok(users.into_iter().map(|u| u.to_shared()).collect())
}

/// Pending requests addressed to the user, with the sender's profile.
pub async fn list_incoming_requests(
    pool: &SqlitePool,
    user_id: &Uuid,
) -> Result<Vec<FriendRequestWithUser>, FriendError> {
    let requests: Vec<FriendRequestRow> = sqlx::query_as(
        "SELECT * FROM friend_requests WHERE receiver_id = ? AND status = 'pending' ORDER BY created_at DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut result = Vec::new();
    for request in requests {
        let sender: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&request.sender_id)
            .fetch_one(pool)
            .await?;

        result.push(FriendRequestWithUser {
            request: request.to_shared(),
            user: sender.to_shared(),
        });
    }

    Ok(result)
}

/// Pending requests the user has sent, with the receiver's profile.
pub async fn list_outgoing_requests(
    pool: &SqlitePool,
    user_id: &Uuid,
) -> Result<Vec<FriendRequestWithUser>, FriendError> {
    let requests: Vec<FriendRequestRow> = sqlx::query_as(
        "SELECT * FROM friend_requests WHERE sender_id = ? AND status = 'pending' ORDER BY created_at DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut result = Vec::new();
    for request in requests {
        let receiver: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&request.receiver_id)
            .fetch_one(pool)
            .await?;

        result.push(FriendRequestWithUser {
            request: request.to_shared(),
            user: receiver.to_shared(),
        });
    }

    Ok(result)
}
