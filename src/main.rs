mod backend;
mod completion;
mod configuration;
#[cfg(feature = "demo")]
mod demo_mock_server;
mod error;
mod leader;
mod member;
mod session;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::configuration::Configuration;
use crate::leader::group_leaders::GroupLeaders;
use crate::web::start_server;
use log::error;

#[launch]
async fn rocket() -> _ {
    env_logger::init();

    #[cfg(feature = "demo")]
    demo_mock_server::init_demo().await;

    let configuration = Configuration::from_env();
    let group_leaders = match GroupLeaders::load(configuration.group_leaders_file()) {
        Ok(group_leaders) => group_leaders,
        Err(error) => {
            error!("Initialization failed, aborting.\n{error:#?}");
            panic!("Initialization failed, aborting.");
        }
    };

    start_server(configuration, group_leaders)
}
