//! Data models for Constrix entities

mod checkin;
mod habit;
mod milestone;
mod streak;
mod user;

pub use checkin::*;
pub use habit::*;
pub use milestone::*;
pub use streak::*;
pub use user::*;
