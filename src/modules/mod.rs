pub mod admin_apps;
pub mod apps;
pub mod auth;
pub mod health;
pub mod preferences;
