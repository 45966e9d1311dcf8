pub mod group_leader;
pub mod member;
pub mod member_update;
