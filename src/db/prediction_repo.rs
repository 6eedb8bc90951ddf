use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Prediction, PredictionStatus};

/// All predictions still waiting for a result, oldest first.
pub async fn get_pending_predictions(pool: &PgPool) -> anyhow::Result<Vec<Prediction>> {
    let rows = sqlx::query_as::<_, Prediction>(
        "SELECT * FROM predictions WHERE status = 'pending' ORDER BY created_at ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List predictions, optionally filtered by status, newest first.
pub async fn get_predictions(
    pool: &PgPool,
    status: Option<PredictionStatus>,
) -> anyhow::Result<Vec<Prediction>> {
    let rows = sqlx::query_as::<_, Prediction>(
        r#"
        SELECT * FROM predictions
        WHERE ($1::TEXT IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Get a single prediction by id.
pub async fn get_prediction(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Prediction>> {
    let row = sqlx::query_as::<_, Prediction>("SELECT * FROM predictions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Move a pending prediction to a terminal status.
///
/// Only rows still `pending` are touched, so a settled prediction never
/// changes again. Returns whether a row was updated.
pub async fn settle_prediction(
    pool: &PgPool,
    id: Uuid,
    status: PredictionStatus,
) -> anyhow::Result<bool> {
    anyhow::ensure!(status.is_terminal(), "cannot settle prediction {id} as {status}");

    let result = sqlx::query(
        r#"
        UPDATE predictions
        SET status = $2, settled_at = NOW(), updated_at = NOW()
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Remember which API fixture a prediction resolved to.
pub async fn link_fixture(pool: &PgPool, id: Uuid, fixture_id: i64) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE predictions
        SET fixture_id = $2, updated_at = NOW()
        WHERE id = $1 AND fixture_id IS NULL
        "#,
    )
    .bind(id)
    .bind(fixture_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Count predictions with the given status.
pub async fn count_by_status(pool: &PgPool, status: PredictionStatus) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM predictions WHERE status = $1")
        .bind(status.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
