pub mod error;
pub mod retrieve_members;
pub mod update_member;
