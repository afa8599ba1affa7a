pub mod health;
pub mod news;
pub mod sources;
