use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    error::{AppError, AppResult},
    models::{NewHistory, NewPerfume, Perfume, RecommendationHistory, UserId},
};

use super::PerfumeStore;

const PERFUME_COLUMNS: &str = "id, user_id, brand, name, notes, scent_type";
const HISTORY_COLUMNS: &str =
    "id, user_id, perfume_id, mood, occasion, time_of_day, weather, confidence, reason, created_at";

/// Creates a PostgreSQL connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a foreign key violation on `user_id` to a missing user
fn unknown_user(user: UserId, err: sqlx::Error) -> AppError {
    let is_fk = err
        .as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false);

    if is_fk {
        AppError::NotFound(format!("User {} not found", user))
    } else {
        AppError::Database(err)
    }
}

#[async_trait::async_trait]
impl PerfumeStore for PgStore {
    async fn list_perfumes(&self, user: UserId) -> AppResult<Vec<Perfume>> {
        let perfumes = sqlx::query_as::<_, Perfume>(&format!(
            "SELECT {PERFUME_COLUMNS} FROM perfumes WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(perfumes)
    }

    async fn get_perfume(&self, user: UserId, id: i64) -> AppResult<Option<Perfume>> {
        let perfume = sqlx::query_as::<_, Perfume>(&format!(
            "SELECT {PERFUME_COLUMNS} FROM perfumes WHERE user_id = $1 AND id = $2"
        ))
        .bind(user.0)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(perfume)
    }

    async fn add_perfume(&self, user: UserId, perfume: NewPerfume) -> AppResult<Perfume> {
        let perfume = sqlx::query_as::<_, Perfume>(&format!(
            "INSERT INTO perfumes (user_id, brand, name, notes, scent_type) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PERFUME_COLUMNS}"
        ))
        .bind(user.0)
        .bind(&perfume.brand)
        .bind(&perfume.name)
        .bind(&perfume.notes)
        .bind(&perfume.scent_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unknown_user(user, e))?;

        tracing::debug!(user_id = %user, perfume_id = perfume.id, "Perfume stored");

        Ok(perfume)
    }

    async fn record_history(
        &self,
        user: UserId,
        record: NewHistory,
    ) -> AppResult<RecommendationHistory> {
        // The perfume must still belong to the user when the record is written
        let history = sqlx::query_as::<_, RecommendationHistory>(&format!(
            "INSERT INTO recommendation_history \
             (user_id, perfume_id, mood, occasion, time_of_day, weather, confidence, reason) \
             SELECT $1, p.id, $3, $4, $5, $6, $7, $8 FROM perfumes p \
             WHERE p.id = $2 AND p.user_id = $1 \
             RETURNING {HISTORY_COLUMNS}"
        ))
        .bind(user.0)
        .bind(record.perfume_id)
        .bind(&record.situation.mood)
        .bind(&record.situation.occasion)
        .bind(&record.situation.time_of_day)
        .bind(&record.situation.weather)
        .bind(record.confidence)
        .bind(&record.reason)
        .fetch_optional(&self.pool)
        .await?;

        // No row means the perfume is not in this user's collection
        history.ok_or_else(|| {
            AppError::NotFound(format!("Perfume {} not found in collection", record.perfume_id))
        })
    }

    async fn list_history(&self, user: UserId) -> AppResult<Vec<RecommendationHistory>> {
        let history = sqlx::query_as::<_, RecommendationHistory>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM recommendation_history \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }

    async fn get_history(&self, user: UserId, id: i64) -> AppResult<Option<RecommendationHistory>> {
        let history = sqlx::query_as::<_, RecommendationHistory>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM recommendation_history WHERE user_id = $1 AND id = $2"
        ))
        .bind(user.0)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Situation;

    #[tokio::test]
    async fn test_round_trip_against_database() {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            // Needs a live PostgreSQL
            return;
        };

        let pool = create_pool(&database_url, 1).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let (user_id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind("Test User")
        .bind(format!("{}@example.com", uuid::Uuid::new_v4()))
        .bind("not-a-real-hash")
        .fetch_one(&pool)
        .await
        .unwrap();
        let user = UserId(user_id);

        let store = PgStore::new(pool);
        let perfume = store
            .add_perfume(
                user,
                NewPerfume {
                    brand: "Maison Margiela".to_string(),
                    name: "By the Fireplace".to_string(),
                    notes: Some("vanilla, chestnut".to_string()),
                    scent_type: Some("woody".to_string()),
                },
            )
            .await
            .unwrap();

        let listed = store.list_perfumes(user).await.unwrap();
        assert_eq!(listed, vec![perfume.clone()]);

        let record = store
            .record_history(
                user,
                NewHistory {
                    perfume_id: perfume.id,
                    situation: Situation::new("confident", "office", "morning", "cool"),
                    confidence: 0.3,
                    reason: "woody scents boost confidence".to_string(),
                },
            )
            .await
            .unwrap();

        let fetched = store.get_history(user, record.id).await.unwrap();
        assert_eq!(fetched.as_ref().map(|h| h.perfume_id), Some(perfume.id));
        let stranger = UserId(user_id + 1_000_000);
        let hidden = store.get_history(stranger, record.id).await.unwrap();
        assert!(hidden.is_none());
    }
}
