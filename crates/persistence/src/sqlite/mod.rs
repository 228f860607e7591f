//! SQLite storage: connection handling and per-table query modules

mod connection;

pub mod checkins;
pub mod habits;
pub mod milestones;
pub mod sessions;
pub mod users;

pub use connection::Database;
