pub mod error;
pub mod provision;
pub mod roster;
pub mod schedule;
