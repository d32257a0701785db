use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::UserId;

/// A perfume in a user's collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Perfume {
    pub id: i64,
    pub user_id: i64,
    pub brand: String,
    pub name: String,
    /// Comma-separated descriptors, e.g. "amber, musk"
    pub notes: Option<String>,
    /// Dominant character, e.g. "woody"
    pub scent_type: Option<String>,
}

impl Perfume {
    pub fn owned_by(&self, user: UserId) -> bool {
        self.user_id == user.0
    }
}

/// Collection entry submitted by a user
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewPerfume {
    pub brand: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "scent")]
    pub scent_type: Option<String>,
}

impl NewPerfume {
    /// Trims every field and rejects entries without a brand or name
    ///
    /// Blank optional fields are stored as missing.
    pub fn validated(self) -> AppResult<Self> {
        let brand = self.brand.trim().to_string();
        let name = self.name.trim().to_string();

        if brand.is_empty() {
            return Err(AppError::InvalidInput("Brand must not be empty".to_string()));
        }
        if name.is_empty() {
            return Err(AppError::InvalidInput("Name must not be empty".to_string()));
        }

        Ok(Self {
            brand,
            name,
            notes: non_blank(self.notes),
            scent_type: non_blank(self.scent_type),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
