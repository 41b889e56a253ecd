use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// User-scoped lookup table, unique on (user_id, name). Created ad hoc
// while registering a purchase.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
