//! API request handlers

pub mod categories;
pub mod health;
pub mod players;
pub mod sports;
