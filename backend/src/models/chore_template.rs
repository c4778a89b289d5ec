use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for chore templates
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChoreTemplateRow {
    pub id: String,
    pub household_id: String,
    pub name: String,
    pub kind: String,
    pub points: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl ChoreTemplateRow {
    pub fn to_shared(&self) -> shared::ChoreTemplate {
        shared::ChoreTemplate {
            id: Uuid::parse_str(&self.id).unwrap(),
            household_id: Uuid::parse_str(&self.household_id).unwrap(),
            name: self.name.clone(),
            kind: self.kind.clone(),
            points: self.points,
            created_by: Uuid::parse_str(&self.created_by).unwrap(),
            created_at: self.created_at,
        }
    }
}
