use crate::web::frontend::wizard_controller;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

pub struct FrontendServer {}

impl FrontendServer {
    pub fn new() -> Self {
        Self {}
    }

    pub fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .mount(
                "/",
                routes![
                    wizard_controller::name_input,
                    wizard_controller::submit_name,
                    wizard_controller::member_input,
                    wizard_controller::submit_members,
                    wizard_controller::back_to_name_input,
                    wizard_controller::complete,
                ],
            )
            .mount("/", FileServer::from("./public/static"))
            .register("/", catchers![wizard_controller::not_found])
            .attach(Template::fairing())
    }
}
