pub mod accounts;
pub mod analytics;
pub mod health;
pub mod insights;
pub mod trades;
