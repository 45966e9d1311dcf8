pub mod server;
mod wizard_controller;
