use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{HouseholdRow, InviteRow, UserRow};
use shared::{HouseholdInvite, HouseholdMember, InviteStatus, InviteWithHousehold, Role};

#[derive(Debug, Error)]
pub enum InviteError {
    #[error("Invite not found")]
    NotFound,
    #[error("Invite already sent")]
    AlreadyInvited,
    #[error("User is already a member of this household")]
    AlreadyMember,
    #[error("Only friends can be invited")]
    NotFriends,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Invite a friend to a household. The inviter must already be friends with
/// the invitee; membership and duplicate invites are rejected up front.
pub async fn create_invite(
    pool: &SqlitePool,
    household_id: &Uuid,
    inviter_id: &Uuid,
    invitee_id: &Uuid,
) -> Result<HouseholdInvite, InviteError> {
    let are_friends = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM friend_requests
        WHERE status = 'accepted'
          AND ((sender_id = ?1 AND receiver_id = ?2) OR (sender_id = ?2 AND receiver_id = ?1))
        "#,
    )
    .bind(inviter_id.to_string())
    .bind(invitee_id.to_string())
    .fetch_one(pool)
    .await?;

    if are_friends == 0 {
        return Err(InviteError::NotFriends);
    }

    let is_member = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM household_members WHERE household_id = ? AND user_id = ?",
    )
    .bind(household_id.to_string())
    .bind(invitee_id.to_string())
    .fetch_one(pool)
    .await?;

    if is_member > 0 {
        return Err(InviteError::AlreadyMember);
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO household_invites (id, household_id, inviter_id, invitee_id, status, created_at)
        VALUES (?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(id.to_string())
    .bind(household_id.to_string())
    .bind(inviter_id.to_string())
    .bind(invitee_id.to_string())
    .bind(now)
    .execute(pool)
    .await;

    if let Err(e) = result {
        return Err(match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                InviteError::AlreadyInvited
            }
            other => InviteError::DatabaseError(other),
        });
    }

    Ok(HouseholdInvite {
        id,
        household_id: *household_id,
        inviter_id: *inviter_id,
        invitee_id: *invitee_id,
        status: InviteStatus::Pending,
        created_at: now,
    })
}

/// Pending invites addressed to the user, with household and inviter context.
pub async fn list_user_invites(
    pool: &SqlitePool,
    user_id: &Uuid,
) -> Result<Vec<InviteWithHousehold>, InviteError> {
    let invites: Vec<InviteRow> = sqlx::query_as(
        "SELECT * FROM household_invites WHERE invitee_id = ? AND status = 'pending' ORDER BY created_at DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut result = Vec::new();
    for invite in invites {
        let household: HouseholdRow = sqlx::query_as("SELECT * FROM households WHERE id = ?")
            .bind(&invite.household_id)
            .fetch_one(pool)
            .await?;

        let inviter: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&invite.inviter_id)
            .fetch_one(pool)
            .await?;

        result.push(InviteWithHousehold {
            invite: invite.to_shared(),
            household_name: household.name,
            inviter_username: inviter.username,
        });
    }

    Ok(result)
}

/// Accept a pending invite: mark it accepted and insert the membership in
/// one transaction.
pub async fn accept_invite(
    pool: &SqlitePool,
    invite_id: &Uuid,
    user_id: &Uuid,
) -> Result<HouseholdMember, InviteError> {
    let invite: InviteRow = sqlx::query_as(
        "SELECT * FROM household_invites WHERE id = ? AND invitee_id = ? AND status = 'pending'",
    )
    .bind(invite_id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(pool)
    .await?
    .ok_or(InviteError::NotFound)?;

    let membership_id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE household_invites SET status = 'accepted' WHERE id = ?")
        .bind(invite_id.to_string())
        .execute(&mut *tx)
        .await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO household_members (id, household_id, user_id, role, joined_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(membership_id.to_string())
    .bind(&invite.household_id)
    .bind(user_id.to_string())
    .bind(Role::Member.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await;

    if let Err(e) = inserted {
        return Err(match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => InviteError::AlreadyMember,
            other => InviteError::DatabaseError(other),
        });
    }

    tx.commit().await?;

    Ok(HouseholdMember {
        id: membership_id,
        household_id: Uuid::parse_str(&invite.household_id).unwrap(),
        user_id: *user_id,
        role: Role::Member,
        joined_at: now,
    })
}

/// Decline a pending invite. Declining an invite that is no longer pending
/// is a no-op.
pub async fn decline_invite(
    pool: &SqlitePool,
    invite_id: &Uuid,
    user_id: &Uuid,
) -> Result<(), InviteError> {
    sqlx::query(
        "UPDATE household_invites SET status = 'declined' WHERE id = ? AND invitee_id = ? AND status = 'pending'",
    )
    .bind(invite_id.to_string())
    .bind(user_id.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::households;
    use crate::services::test_util::{create_user, make_friends, test_pool};
    use shared::CreateHouseholdRequest;

    async fn setup_household(pool: &SqlitePool, owner: &shared::User) -> shared::Household {
        households::create_household(
            pool,
            &owner.id,
            &CreateHouseholdRequest {
                name: "Flat 4B".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[actix_rt::test]
    async fn test_invite_accept_joins_household() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await;
        let bob = create_user(&pool, "bob").await;
        make_friends(&pool, &alice, &bob).await;

        let household = setup_household(&pool, &alice).await;

        let invite = create_invite(&pool, &household.id, &alice.id, &bob.id)
            .await
            .unwrap();
        assert_eq!(invite.status, InviteStatus::Pending);

        let pending = list_user_invites(&pool, &bob.id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].household_name, "Flat 4B");
        assert_eq!(pending[0].inviter_username, "alice");

        let membership = accept_invite(&pool, &invite.id, &bob.id).await.unwrap();
        assert_eq!(membership.household_id, household.id);
        assert_eq!(membership.role, Role::Member);

        assert!(households::is_member(&pool, &household.id, &bob.id)
            .await
            .unwrap());
        assert!(list_user_invites(&pool, &bob.id).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_invite_requires_friendship() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await;
        let bob = create_user(&pool, "bob").await;

        let household = setup_household(&pool, &alice).await;

        let result = create_invite(&pool, &household.id, &alice.id, &bob.id).await;
        assert!(matches!(result, Err(InviteError::NotFriends)));
    }

    #[actix_rt::test]
    async fn test_duplicate_invite_rejected() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await;
        let bob = create_user(&pool, "bob").await;
        make_friends(&pool, &alice, &bob).await;

        let household = setup_household(&pool, &alice).await;

        create_invite(&pool, &household.id, &alice.id, &bob.id)
            .await
            .unwrap();
        let again = create_invite(&pool, &household.id, &alice.id, &bob.id).await;
        assert!(matches!(again, Err(InviteError::AlreadyInvited)));
    }

    #[actix_rt::test]
    async fn test_invite_existing_member_rejected() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await;
        let bob = create_user(&pool, "bob").await;
        make_friends(&pool, &alice, &bob).await;

        let household = setup_household(&pool, &alice).await;

        let invite = create_invite(&pool, &household.id, &alice.id, &bob.id)
            .await
            .unwrap();
        accept_invite(&pool, &invite.id, &bob.id).await.unwrap();

        let again = create_invite(&pool, &household.id, &alice.id, &bob.id).await;
        assert!(matches!(again, Err(InviteError::AlreadyMember)));
    }

    #[actix_rt::test]
    async fn test_accept_requires_invitee() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await;
        let bob = create_user(&pool, "bob").await;
        make_friends(&pool, &alice, &bob).await;

        let household = setup_household(&pool, &alice).await;
        let invite = create_invite(&pool, &household.id, &alice.id, &bob.id)
            .await
            .unwrap();

        let result = accept_invite(&pool, &invite.id, &alice.id).await;
        assert!(matches!(result, Err(InviteError::NotFound)));
    }

    #[actix_rt::test]
    async fn test_decline_leaves_membership_untouched() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await;
        let bob = create_user(&pool, "bob").await;
        make_friends(&pool, &alice, &bob).await;

        let household = setup_household(&pool, &alice).await;
        let invite = create_invite(&pool, &household.id, &alice.id, &bob.id)
            .await
            .unwrap();

        decline_invite(&pool, &invite.id, &bob.id).await.unwrap();

        assert!(!households::is_member(&pool, &household.id, &bob.id)
            .await
            .unwrap());
        assert!(list_user_invites(&pool, &bob.id).await.unwrap().is_empty());

        // A declined invite can no longer be accepted
        let result = accept_invite(&pool, &invite.id, &bob.id).await;
        assert!(matches!(result, Err(InviteError::NotFound)));
    }
}
