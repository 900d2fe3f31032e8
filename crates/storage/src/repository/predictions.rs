use sqlx::PgPool;
use tracing::warn;

use crate::error::Result;
use crate::models::{Prediction, PredictionKind};
use crate::models::prediction::PredictionRow;

pub struct PredictionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PredictionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Returns every stored prediction, oldest first. Rows whose
    /// `prediction_type` is not one of the known kinds are skipped with a
    /// warning rather than failing the whole read.
    pub async fn list_all(&self) -> Result<Vec<Prediction>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT user_name, event_category, prediction_type, predicted_value, submission_timestamp
            FROM predictions
            ORDER BY submission_timestamp, id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(decode_rows(rows))
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Prediction>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT user_name, event_category, prediction_type, predicted_value, submission_timestamp
            FROM predictions
            WHERE user_name = $1
            ORDER BY submission_timestamp, id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(decode_rows(rows))
    }

    /// Replaces a user's predictions for one event category with the given
    /// entries, inside a single transaction. Passing an empty slice clears
    /// the category. Delete-then-insert keeps at most one live row per
    /// (user, category, kind) without relying on a unique constraint.
    pub async fn replace_for_category(
        &self,
        user_id: &str,
        event_category: &str,
        entries: &[(PredictionKind, String)],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM predictions
            WHERE user_name = $1 AND event_category = $2
            "#,
        )
        .bind(user_id)
        .bind(event_category)
        .execute(&mut *tx)
        .await?;

        for (kind, value) in entries {
            sqlx::query(
                r#"
                INSERT INTO predictions
                    (user_name, event_category, prediction_type, predicted_value, submission_timestamp)
                VALUES ($1, $2, $3, $4, NOW())
                "#,
            )
            .bind(user_id)
            .bind(event_category)
            .bind(kind.as_str())
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete_for_category(&self, user_id: &str, event_category: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM predictions
            WHERE user_name = $1 AND event_category = $2
            "#,
        )
        .bind(user_id)
        .bind(event_category)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

fn decode_rows(rows: Vec<PredictionRow>) -> Vec<Prediction> {
    rows.into_iter()
        .filter_map(|row| match row.into_prediction() {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                warn!("Skipping prediction row: {}", e);
                None
            }
        })
        .collect()
}
