pub mod entries;
pub mod health;
