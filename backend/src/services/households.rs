use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{HouseholdRow, MemberProfileRow, MembershipRow, UserRow};
use crate::services::{chores, points};
use shared::{
    CreateHouseholdRequest, Household, LeaderboardRow, MemberProfile, MemberWithUser, Role, User,
};

#[derive(Debug, Error)]
pub enum HouseholdError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Chore error: {0}")]
    ChoreError(#[from] chores::ChoreError),
}

/// Create a household and its owner membership as one unit.
pub async fn create_household(
    pool: &SqlitePool,
    creator_id: &Uuid,
    request: &CreateHouseholdRequest,
) -> Result<Household, HouseholdError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO households (id, name, created_by, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&request.name)
    .bind(creator_id.to_string())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let membership_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO household_members (id, household_id, user_id, role, joined_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(membership_id.to_string())
    .bind(id.to_string())
    .bind(creator_id.to_string())
    .bind(Role::Owner.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Household {
        id,
        name: request.name.clone(),
        created_by: *creator_id,
        created_at: now,
    })
}

pub async fn get_household(
    pool: &SqlitePool,
    household_id: &Uuid,
) -> Result<Option<Household>, HouseholdError> {
    let household: Option<HouseholdRow> = sqlx::query_as("SELECT * FROM households WHERE id = ?")
        .bind(household_id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(household.map(|h| h.to_shared()))
}

pub async fn list_user_households(
    pool: &SqlitePool,
    user_id: &Uuid,
) -> Result<Vec<Household>, HouseholdError> {
    let households: Vec<HouseholdRow> = sqlx::query_as(
        r#"
        SELECT h.* FROM households h
        JOIN household_members m ON h.id = m.household_id
        WHERE m.user_id = ?
        ORDER BY h.created_at DESC
        "#,
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await?;

    Ok(households.into_iter().map(|h| h.to_shared()).collect())
}

pub async fn is_member(
    pool: &SqlitePool,
    household_id: &Uuid,
    user_id: &Uuid,
) -> Result<bool, HouseholdError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM household_members WHERE household_id = ? AND user_id = ?",
    )
    .bind(household_id.to_string())
    .bind(user_id.to_string())
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

pub async fn list_members(
    pool: &SqlitePool,
    household_id: &Uuid,
) -> Result<Vec<MemberWithUser>, HouseholdError> {
    let memberships: Vec<MembershipRow> = sqlx::query_as(
        "SELECT * FROM household_members WHERE household_id = ? ORDER BY joined_at ASC",
    )
    .bind(household_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut result = Vec::new();
    for m in memberships {
        let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(&m.user_id)
            .fetch_one(pool)
            .await?;

        result.push(MemberWithUser {
            membership: m.to_shared(),
            user: user.to_shared(),
        });
    }

    Ok(result)
}

/// Member profiles in joined-at order. This order is what leaderboard ties
/// fall back to, so it must be deterministic.
pub async fn member_profiles(
    pool: &SqlitePool,
    household_id: &Uuid,
) -> Result<Vec<MemberProfile>, HouseholdError> {
    let profiles: Vec<MemberProfileRow> = sqlx::query_as(
        r#"
        SELECT m.user_id, u.username, u.avatar_url
        FROM household_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.household_id = ?
        ORDER BY m.joined_at ASC, m.id ASC
        "#,
    )
    .bind(household_id.to_string())
    .fetch_all(pool)
    .await?;

    Ok(profiles.into_iter().map(|p| p.to_shared()).collect())
}

/// Recompute the leaderboard from the bounded entry history. Nothing is
/// cached; the window is small enough to aggregate on every read.
pub async fn get_leaderboard(
    pool: &SqlitePool,
    household_id: &Uuid,
) -> Result<Vec<LeaderboardRow>, HouseholdError> {
    let members = member_profiles(pool, household_id).await?;
    let entries = chores::list_entries(pool, household_id).await?;

    Ok(points::compute_leaderboard(&members, &entries))
}

/// The caller's accepted friends who are not yet members, i.e. who can still
/// be invited to this household.
pub async fn inviteable_friends(
    pool: &SqlitePool,
    household_id: &Uuid,
    user_id: &Uuid,
) -> Result<Vec<User>, HouseholdError> {
    let users: Vec<UserRow> = sqlx::query_as(
        r#"
        SELECT u.* FROM users u
        JOIN friend_requests fr
            ON ((fr.sender_id = u.id AND fr.receiver_id = ?1)
                OR (fr.receiver_id = u.id AND fr.sender_id = ?1))
            AND fr.status = 'accepted'
        WHERE u.id NOT IN (SELECT user_id FROM household_members WHERE household_id = ?2)
        ORDER BY u.username ASC
        "#,
    )
    .bind(user_id.to_string())
    .bind(household_id.to_string())
    .fetch_all(pool)
    .await?;

    Ok(users.into_iter().map(|u| u.to_shared()).collect())
}
