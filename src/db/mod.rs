pub mod category_queries;
pub mod item_queries;
pub mod platform_queries;
pub mod user_queries;
