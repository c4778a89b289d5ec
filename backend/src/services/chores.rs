use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ChoreTemplateRow, EntryWithTemplateRow, ParticipantRow};
use crate::services::points::{self, PointsError};
use shared::{
    ChoreEntryDetail, ChoreTemplate, CreateChoreTemplateRequest, LogChoreRequest, ParticipantShare,
};

/// How far back the history and leaderboard look. Matches the page size of
/// the household detail view; older entries are not aggregated.
pub const ENTRY_HISTORY_LIMIT: i64 = 50;

const DEFAULT_KIND: &str = "general";

#[derive(Debug, Error)]
pub enum ChoreError {
    #[error("Chore template not found")]
    TemplateNotFound,
    #[error("All participants must be household members")]
    NotAMember,
    #[error("{0}")]
    PointsError(#[from] PointsError),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub async fn create_template(
    pool: &SqlitePool,
    household_id: &Uuid,
    created_by: &Uuid,
    request: &CreateChoreTemplateRequest,
) -> Result<ChoreTemplate, ChoreError> {
    let name = request.name.trim().to_string();
    let kind = match request.kind.as_deref().map(str::trim) {
        Some(kind) if !kind.is_empty() => kind.to_string(),
        _ => DEFAULT_KIND.to_string(),
    };

    if name.is_empty() {
        return Err(PointsError::InvalidInput("chore name is required").into());
    }
    if request.points < 1 {
        return Err(PointsError::InvalidInput("points must be at least 1").into());
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO chore_templates (id, household_id, name, kind, points, created_by, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(household_id.to_string())
    .bind(&name)
    .bind(&kind)
    .bind(request.points)
    .bind(created_by.to_string())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ChoreTemplate {
        id,
        household_id: *household_id,
        name,
        kind,
        points: request.points,
        created_by: *created_by,
        created_at: now,
    })
}

pub async fn list_templates(
    pool: &SqlitePool,
    household_id: &Uuid,
) -> Result<Vec<ChoreTemplate>, ChoreError> {
    let templates: Vec<ChoreTemplateRow> = sqlx::query_as(
        "SELECT * FROM chore_templates WHERE household_id = ? ORDER BY name ASC",
    )
    .bind(household_id.to_string())
    .fetch_all(pool)
    .await?;

    Ok(templates.into_iter().map(|t| t.to_shared()).collect())
}

/// Template lookup scoped to the household so one household cannot log
/// against another's templates.
pub async fn get_template(
    pool: &SqlitePool,
    household_id: &Uuid,
    chore_id: &Uuid,
) -> Result<Option<ChoreTemplate>, ChoreError> {
    let template: Option<ChoreTemplateRow> = sqlx::query_as(
        "SELECT * FROM chore_templates WHERE id = ? AND household_id = ?",
    )
    .bind(chore_id.to_string())
    .bind(household_id.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(template.map(|t| t.to_shared()))
}

/// Log a completed chore: split the template's points among the participants
/// and write the entry and its shares as one unit.
pub async fn log_entry(
    pool: &SqlitePool,
    household_id: &Uuid,
    created_by: &Uuid,
    request: &LogChoreRequest,
) -> Result<ChoreEntryDetail, ChoreError> {
    let template = get_template(pool, household_id, &request.chore_id)
        .await?
        .ok_or(ChoreError::TemplateNotFound)?;

    // Selecting the same person twice in the UI should not double their
    // credit, so duplicates collapse before the split.
    let mut participants: Vec<Uuid> = Vec::with_capacity(request.participant_ids.len());
    for &id in &request.participant_ids {
        if !participants.contains(&id) {
            participants.push(id);
        }
    }

    for participant in &participants {
        let is_member = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM household_members WHERE household_id = ? AND user_id = ?",
        )
        .bind(household_id.to_string())
        .bind(participant.to_string())
        .fetch_one(pool)
        .await?;

        if is_member == 0 {
            return Err(ChoreError::NotAMember);
        }
    }

    let shares = points::compute_shares(template.points, &participants)?;

    let entry_id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO chore_entries (id, household_id, chore_id, created_by, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry_id.to_string())
    .bind(household_id.to_string())
    .bind(request.chore_id.to_string())
    .bind(created_by.to_string())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for share in &shares {
        sqlx::query(
            r#"
            INSERT INTO chore_entry_participants (entry_id, user_id, points_earned)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(entry_id.to_string())
        .bind(share.user_id.to_string())
        .bind(share.points_earned)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(ChoreEntryDetail {
        id: entry_id,
        chore_name: template.name,
        points: template.points,
        created_by: *created_by,
        created_at: now,
        participants: shares
            .into_iter()
            .map(|s| ParticipantShare {
                entry_id,
                user_id: s.user_id,
                points_earned: s.points_earned,
            })
            .collect(),
    })
}

/// The household's most recent entries, newest first, with template context
/// and participant shares.
pub async fn list_entries(
    pool: &SqlitePool,
    household_id: &Uuid,
) -> Result<Vec<ChoreEntryDetail>, ChoreError> {
    let entries: Vec<EntryWithTemplateRow> = sqlx::query_as(
        r#"
        SELECT e.id, e.created_by, e.created_at, t.name AS chore_name, t.points
        FROM chore_entries e
        JOIN chore_templates t ON t.id = e.chore_id
        WHERE e.household_id = ?
        ORDER BY e.created_at DESC
        LIMIT ?
        "#,
    )
    .bind(household_id.to_string())
    .bind(ENTRY_HISTORY_LIMIT)
    .fetch_all(pool)
    .await?;

    let mut result = Vec::new();
    for entry in entries {
        let participants: Vec<ParticipantRow> = sqlx::query_as(
            "SELECT * FROM chore_entry_participants WHERE entry_id = ?",
        )
        .bind(&entry.id)
        .fetch_all(pool)
        .await?;

        result.push(ChoreEntryDetail {
            id: Uuid::parse_str(&entry.id).unwrap(),
            chore_name: entry.chore_name,
            points: entry.points,
            created_by: Uuid::parse_str(&entry.created_by).unwrap(),
            created_at: entry.created_at,
            participants: participants.into_iter().map(|p| p.to_shared()).collect(),
        });
    }

    Ok(result)
}
