use crate::{
    error::AppResult,
    models::{NewHistory, NewPerfume, Perfume, RecommendationHistory, UserId},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{create_pool, run_migrations, PgStore};

/// Storage for perfume collections and recommendation history
///
/// Every operation is scoped to one user: a record owned by someone else is
/// reported as absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PerfumeStore: Send + Sync {
    /// The user's perfumes in the order they were added
    async fn list_perfumes(&self, user: UserId) -> AppResult<Vec<Perfume>>;

    async fn get_perfume(&self, user: UserId, id: i64) -> AppResult<Option<Perfume>>;

    /// Inserts an already validated entry
    async fn add_perfume(&self, user: UserId, perfume: NewPerfume) -> AppResult<Perfume>;

    /// Appends a history record, stamping its id and creation time
    async fn record_history(
        &self,
        user: UserId,
        record: NewHistory,
    ) -> AppResult<RecommendationHistory>;

    /// The user's history, newest first
    async fn list_history(&self, user: UserId) -> AppResult<Vec<RecommendationHistory>>;

    async fn get_history(&self, user: UserId, id: i64) -> AppResult<Option<RecommendationHistory>>;
}
