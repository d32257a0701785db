use std::sync::Arc;

use crate::{
    db::PerfumeStore,
    error::{AppError, AppResult},
    models::{
        Dashboard, NewHistory, NewPerfume, Perfume, RecommendationHistory, RecommendationView,
        Situation, UserId,
    },
    services::scorer,
};

/// Collection and recommendation workflows for one authenticated user at a time
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn PerfumeStore>,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn PerfumeStore>) -> Self {
        Self { store }
    }

    /// Picks a perfume from the user's collection and records the pick
    ///
    /// Fails with [`AppError::EmptyCollection`] before scoring when the user
    /// owns nothing; no history is written in that case.
    pub async fn recommend(
        &self,
        user: UserId,
        situation: Situation,
    ) -> AppResult<RecommendationView> {
        // Candidates in insertion order, which decides ties
        let perfumes = self.store.list_perfumes(user).await?;

        // Nothing to score, and nothing gets recorded
        if perfumes.is_empty() {
            tracing::info!(user_id = %user, "Recommendation requested for empty collection");
            return Err(AppError::EmptyCollection);
        }

        let selection = scorer::select(&perfumes, &situation)?;

        // Persist the pick along with the situation it was made for
        let perfume = selection.perfume.clone();
        let record = self
            .store
            .record_history(
                user,
                NewHistory {
                    perfume_id: perfume.id,
                    situation,
                    confidence: selection.confidence,
                    reason: selection.reason,
                },
            )
            .await?;

        tracing::info!(
            user_id = %user,
            candidates = perfumes.len(),
            recommendation_id = record.id,
            perfume_id = perfume.id,
            confidence = record.confidence,
            "Recommendation stored"
        );

        Ok(RecommendationView { record, perfume })
    }

    /// One past recommendation with the perfume it picked
    pub async fn recommendation(&self, user: UserId, id: i64) -> AppResult<RecommendationView> {
        let record = self
            .store
            .get_history(user, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recommendation {} not found", id)))?;

        let perfume = self
            .store
            .get_perfume(user, record.perfume_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Recommendation {} references missing perfume {}",
                    id, record.perfume_id
                ))
            })?;

        Ok(RecommendationView { record, perfume })
    }

    /// Past recommendations, newest first
    pub async fn history(&self, user: UserId) -> AppResult<Vec<RecommendationHistory>> {
        self.store.list_history(user).await
    }

    pub async fn collection(&self, user: UserId) -> AppResult<Vec<Perfume>> {
        self.store.list_perfumes(user).await
    }

    /// Validates and stores one collection entry
    pub async fn add_perfume(&self, user: UserId, perfume: NewPerfume) -> AppResult<Perfume> {
        let perfume = perfume.validated()?;
        let perfume = self.store.add_perfume(user, perfume).await?;

        tracing::info!(
            user_id = %user,
            perfume_id = perfume.id,
            brand = %perfume.brand,
            name = %perfume.name,
            "Perfume added to collection"
        );

        Ok(perfume)
    }

    pub async fn dashboard(&self, user: UserId) -> AppResult<Dashboard> {
        let perfumes = self.store.list_perfumes(user).await?;
        let history = self.store.list_history(user).await?;
        Ok(Dashboard { perfumes, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, MockPerfumeStore};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn perfume(id: i64, scent_type: &str, notes: &str) -> Perfume {
        Perfume {
            id,
            user_id: 1,
            brand: "Creed".to_string(),
            name: format!("Perfume {}", id),
            notes: Some(notes.to_string()),
            scent_type: Some(scent_type.to_string()),
        }
    }

    fn new_perfume(brand: &str, name: &str, scent_type: &str, notes: &str) -> NewPerfume {
        NewPerfume {
            brand: brand.to_string(),
            name: name.to_string(),
            notes: Some(notes.to_string()),
            scent_type: Some(scent_type.to_string()),
        }
    }

    #[tokio::test]
    async fn test_empty_collection_writes_no_history() {
        let mut store = MockPerfumeStore::new();
        store
            .expect_list_perfumes()
            .with(eq(UserId(1)))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        store.expect_record_history().never();

        let service = RecommendationService::new(Arc::new(store));
        let err = service
            .recommend(UserId(1), Situation::new("confident", "office", "morning", "cool"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmptyCollection));
    }

    #[tokio::test]
    async fn test_recommend_records_selected_perfume() {
        let mut store = MockPerfumeStore::new();
        store.expect_list_perfumes().returning(|_| {
            Ok(vec![
                perfume(10, "citrus", "sweet vanilla"),
                perfume(11, "woody, fresh", "amber, musk"),
            ])
        });
        store
            .expect_record_history()
            .withf(|user, record| {
                *user == UserId(1)
                    && record.perfume_id == 11
                    && record.confidence == 0.7
                    && record.situation.time_of_day == "morning"
            })
            .times(1)
            .returning(|user, record| {
                Ok(RecommendationHistory {
                    id: 99,
                    user_id: user.0,
                    perfume_id: record.perfume_id,
                    mood: record.situation.mood,
                    occasion: record.situation.occasion,
                    time_of_day: record.situation.time_of_day,
                    weather: record.situation.weather,
                    confidence: record.confidence,
                    reason: record.reason,
                    created_at: Utc::now(),
                })
            });

        let service = RecommendationService::new(Arc::new(store));
        let view = service
            .recommend(UserId(1), Situation::new("confident", "office", "morning", "cool"))
            .await
            .unwrap();

        assert_eq!(view.record.id, 99);
        assert_eq!(view.perfume.id, 11);
        assert_eq!(
            view.record.reason,
            "woody scents boost confidence, fresh scents suit office wear, amber notes perform well in cool weather"
        );
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut store = MockPerfumeStore::new();
        store
            .expect_list_perfumes()
            .returning(|_| Err(AppError::Internal("connection reset".to_string())));

        let service = RecommendationService::new(Arc::new(store));
        let err = service
            .recommend(UserId(1), Situation::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_invalid_perfume_never_reaches_store() {
        let mut store = MockPerfumeStore::new();
        store.expect_add_perfume().never();

        let service = RecommendationService::new(Arc::new(store));
        let err = service
            .add_perfume(UserId(1), new_perfume("", "Aventus", "fruity", "pineapple"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_recommendation_round_trip_with_memory_store() {
        let service = RecommendationService::new(Arc::new(MemoryStore::new()));
        let user = UserId(5);

        service
            .add_perfume(user, new_perfume("Creed", "Aventus", "fruity", "pineapple"))
            .await
            .unwrap();
        let spicy = service
            .add_perfume(user, new_perfume("YSL", "La Nuit", "oriental", "cardamom, spicy"))
            .await
            .unwrap();

        let view = service
            .recommend(user, Situation::new("calm", "dinner", "evening", "warm"))
            .await
            .unwrap();
        assert_eq!(view.perfume, spicy);
        assert_eq!(view.record.confidence, 0.2);

        let fetched = service.recommendation(user, view.record.id).await.unwrap();
        assert_eq!(fetched, view);

        let dashboard = service.dashboard(user).await.unwrap();
        assert_eq!(dashboard.perfumes.len(), 2);
        assert_eq!(dashboard.history.len(), 1);
    }

    #[tokio::test]
    async fn test_recommendation_of_other_user_not_found() {
        let service = RecommendationService::new(Arc::new(MemoryStore::new()));
        service
            .add_perfume(UserId(1), new_perfume("Creed", "Aventus", "fruity", "pineapple"))
            .await
            .unwrap();
        let view = service
            .recommend(UserId(1), Situation::default())
            .await
            .unwrap();

        let err = service
            .recommendation(UserId(2), view.record.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
