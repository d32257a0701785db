use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{NewHistory, NewPerfume, Perfume, RecommendationHistory, UserId},
};

use super::PerfumeStore;

/// Process-local store
///
/// Holds everything in vectors behind one lock. Any user id is accepted,
/// since there is no users table to check against.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    perfumes: Vec<Perfume>,
    history: Vec<RecommendationHistory>,
    next_perfume_id: i64,
    next_history_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PerfumeStore for MemoryStore {
    async fn list_perfumes(&self, user: UserId) -> AppResult<Vec<Perfume>> {
        let inner = self.inner.read().await;
        Ok(inner
            .perfumes
            .iter()
            .filter(|p| p.owned_by(user))
            .cloned()
            .collect())
    }

    async fn get_perfume(&self, user: UserId, id: i64) -> AppResult<Option<Perfume>> {
        let inner = self.inner.read().await;
        Ok(inner
            .perfumes
            .iter()
            .find(|p| p.id == id && p.owned_by(user))
            .cloned())
    }

    async fn add_perfume(&self, user: UserId, perfume: NewPerfume) -> AppResult<Perfume> {
        let mut inner = self.inner.write().await;
        inner.next_perfume_id += 1;

        let perfume = Perfume {
            id: inner.next_perfume_id,
            user_id: user.0,
            brand: perfume.brand,
            name: perfume.name,
            notes: perfume.notes,
            scent_type: perfume.scent_type,
        };
        inner.perfumes.push(perfume.clone());

        Ok(perfume)
    }

    async fn record_history(
        &self,
        user: UserId,
        record: NewHistory,
    ) -> AppResult<RecommendationHistory> {
        let mut inner = self.inner.write().await;

        if !inner
            .perfumes
            .iter()
            .any(|p| p.id == record.perfume_id && p.owned_by(user))
        {
            return Err(AppError::NotFound(format!(
                "Perfume {} not found in collection",
                record.perfume_id
            )));
        }

        inner.next_history_id += 1;
        let history = RecommendationHistory {
            id: inner.next_history_id,
            user_id: user.0,
            perfume_id: record.perfume_id,
            mood: record.situation.mood,
            occasion: record.situation.occasion,
            time_of_day: record.situation.time_of_day,
            weather: record.situation.weather,
            confidence: record.confidence,
            reason: record.reason,
            created_at: Utc::now(),
        };
        inner.history.push(history.clone());

        Ok(history)
    }

    async fn list_history(&self, user: UserId) -> AppResult<Vec<RecommendationHistory>> {
        let inner = self.inner.read().await;
        // Appended in creation order, so reversing gives newest first
        Ok(inner
            .history
            .iter()
            .rev()
            .filter(|h| h.user_id == user.0)
            .cloned()
            .collect())
    }

    async fn get_history(&self, user: UserId, id: i64) -> AppResult<Option<RecommendationHistory>> {
        let inner = self.inner.read().await;
        Ok(inner
            .history
            .iter()
            .find(|h| h.id == id && h.user_id == user.0)
            .cloned())
    }
}
