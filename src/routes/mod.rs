pub mod auth;
pub mod categories;
pub mod health;
pub mod items;
pub mod platforms;
pub mod reports;
