use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod history;
pub mod perfume;
pub mod situation;

pub use history::{NewHistory, RecommendationHistory, RecommendationView};
pub use perfume::{NewPerfume, Perfume};
pub use situation::Situation;

/// Identifier of an authenticated user
///
/// Users are created by the upstream registration layer; this service only
/// ever receives the id and scopes every read and write by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dashboard payload: the whole collection plus recommendation history
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub perfumes: Vec<Perfume>,
    /// Newest first
    pub history: Vec<RecommendationHistory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        assert_eq!(format!("{}", UserId(42)), "42");
    }

    #[test]
    fn test_user_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&UserId(7)).unwrap(), "7");
    }
}
