use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Sale channel (Vinted, OLX, ...), unique on (user_id, name). Created ad
// hoc while marking an item sold.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Platform {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlatform {
    pub name: String,
}
