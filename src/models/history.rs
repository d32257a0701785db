use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Perfume, Situation};

/// One stored recommendation, append-only
#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct RecommendationHistory {
    pub id: i64,
    pub user_id: i64,
    pub perfume_id: i64,
    pub mood: String,
    pub occasion: String,
    pub time_of_day: String,
    pub weather: String,
    pub confidence: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// History record about to be written; id and timestamp come from the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistory {
    pub perfume_id: i64,
    pub situation: Situation,
    pub confidence: f64,
    pub reason: String,
}

/// A recommendation together with the perfume it picked
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationView {
    #[serde(flatten)]
    pub record: RecommendationHistory,
    pub perfume: Perfume,
}
