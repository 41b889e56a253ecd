use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Category;

pub async fn fetch_all(pool: &PgPool, user_id: Uuid) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT id, user_id, name, created_at
         FROM categories
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
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT id, user_id, name, created_at
         FROM categories
         WHERE user_id = $1 AND id = $2",
    )
    .bind(user_id)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn upsert(pool: &PgPool, user_id: Uuid, name: &str) -> Result<Category, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, user_id, name)
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
