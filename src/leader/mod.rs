pub mod error;
pub mod group_leaders;
pub mod resolve;
