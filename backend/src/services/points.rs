use std::collections::{HashMap, HashSet};

use thiserror::Error;
use uuid::Uuid;

use shared::{ChoreEntryDetail, LeaderboardRow, MemberProfile};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointsError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

/// One participant's portion of a chore's points, before it is tied to an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub user_id: Uuid,
    pub points_earned: f64,
}

/// Split a chore's point value evenly among the given participants.
///
/// Each share is truncated to two decimal places; when the division does not
/// terminate in two decimals the remainder is dropped, so the shares may sum
/// to slightly less than `total_points`. Duplicate participant ids are
/// rejected rather than over-crediting a participant twice.
pub fn compute_shares(
    total_points: i64,
    participant_ids: &[Uuid],
) -> Result<Vec<Share>, PointsError> {
    if total_points < 1 {
        return Err(PointsError::InvalidInput("points must be at least 1"));
    }
    if participant_ids.is_empty() {
        return Err(PointsError::InvalidInput(
            "at least one participant is required",
        ));
    }

    let mut seen = HashSet::with_capacity(participant_ids.len());
    for id in participant_ids {
        if !seen.insert(id) {
            return Err(PointsError::InvalidInput("participant ids must be unique"));
        }
    }

    let count = participant_ids.len() as i64;
    let scaled = total_points
        .checked_mul(100)
        .ok_or(PointsError::InvalidInput("points value is too large"))?;
    let each = (scaled / count) as f64 / 100.0;

    Ok(participant_ids
        .iter()
        .map(|&user_id| Share {
            user_id,
            points_earned: each,
        })
        .collect())
}

/// Aggregate a household's entry history into a ranked per-member view.
///
/// Every supplied member appears in the result, at zero when they have no
/// shares. Shares belonging to users outside `members` are ignored. The sort
/// is stable, so members tied on points keep their input order.
pub fn compute_leaderboard(
    members: &[MemberProfile],
    entries: &[ChoreEntryDetail],
) -> Vec<LeaderboardRow> {
    let mut totals: HashMap<Uuid, f64> =
        members.iter().map(|m| (m.user_id, 0.0)).collect();

    for entry in entries {
        for share in &entry.participants {
            if let Some(total) = totals.get_mut(&share.user_id) {
                *total += share.points_earned;
            }
        }
    }

    let mut rows: Vec<LeaderboardRow> = members
        .iter()
        .map(|m| LeaderboardRow {
            user_id: m.user_id,
            username: m.username.clone(),
            avatar_url: m.avatar_url.clone(),
            total_points: totals.get(&m.user_id).copied().unwrap_or(0.0),
        })
        .collect();

    rows.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));

    rows
}
