use crate::configuration::Configuration;
use crate::leader::group_leaders::GroupLeaders;
use crate::web::server::build_server;
use rocket::{Build, Rocket};

pub mod error;
mod frontend;
mod server;

pub fn start_server(configuration: Configuration, group_leaders: GroupLeaders) -> Rocket<Build> {
    build_server(configuration, group_leaders)
}
