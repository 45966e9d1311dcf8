use crate::configuration::Configuration;
use crate::leader::group_leaders::GroupLeaders;
use crate::session::session_storage::SessionStorage;
use crate::tools::env_args::retrieve_arg_value;
use crate::web::frontend::server::FrontendServer;
use log::info;
use rocket::{Build, Rocket};
use std::sync::Mutex;

const PORT_ENV_ARG: &str = "--port";
const DEFAULT_PORT: i32 = 8000;

pub fn build_server(configuration: Configuration, group_leaders: GroupLeaders) -> Rocket<Build> {
    let port = get_port();
    info!(
        "Building server [port: {port}, backend: {}, group leaders: {}]",
        configuration.backend_api(),
        group_leaders.len()
    );
    let rocket_build = rocket::build()
        .configure(rocket::Config::figment().merge(("port", port)))
        .manage(configuration)
        .manage(group_leaders)
        .manage(Mutex::new(SessionStorage::default()));

    FrontendServer::new().configure(rocket_build)
}

fn get_port() -> i32 {
    retrieve_arg_value(PORT_ENV_ARG)
        .and_then(|port| port.parse::<i32>().ok())
        .unwrap_or(DEFAULT_PORT)
}
