use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for households
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HouseholdRow {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl HouseholdRow {
    pub fn to_shared(&self) -> shared::Household {
        shared::Household {
            id: Uuid::parse_str(&self.id).unwrap(),
            name: self.name.clone(),
            created_by: Uuid::parse_str(&self.created_by).unwrap(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_household_row_to_shared() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let created_by = Uuid::new_v4();

        let row = HouseholdRow {
            id: id.to_string(),
            name: "Flat 4B".to_string(),
            created_by: created_by.to_string(),
            created_at: now,
        };

        let shared = row.to_shared();

        assert_eq!(shared.id, id);
        assert_eq!(shared.name, "Flat 4B");
        assert_eq!(shared.created_by, created_by);
    }
}
