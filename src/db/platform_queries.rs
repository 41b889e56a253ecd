use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Platform;

pub async fn fetch_all(pool: &PgPool, user_id: Uuid) -> Result<Vec<Platform>, sqlx::Error> {
    sqlx::query_as::<_, Platform>(
        "SELECT id, user_id, name, created_at
         FROM platforms
         WHERE user_id = $1
         ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<Platform>, sqlx::Error> {
    sqlx::query_as::<_, Platform>(
        "SELECT id, user_id, name, created_at
         FROM platforms
         WHERE user_id = $1 AND id = $2",
    )
    .bind(user_id)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn upsert(pool: &PgPool, user_id: Uuid, name: &str) -> Result<Platform, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query_as::<_, Platform>(
        "INSERT INTO platforms (id, user_id, name)
         VALUES ($1, $2, $3)
         ON CONFLICT (user_id, name)
         DO UPDATE SET name = EXCLUDED.name
         RETURNING id, user_id, name, created_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await
}
