pub mod budget;
pub mod config;
pub mod debt;
pub mod error;
pub mod schedule;
#[cfg(feature = "serde")]
pub mod store;
