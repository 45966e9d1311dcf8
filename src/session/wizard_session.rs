use crate::session::session_storage::{SessionSlot, SessionStorage};
use log::debug;
use rocket::http::{Cookie, SameSite};
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};
use std::sync::Mutex;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "Member-Completion-Session";

/// The wizard session of the caller.
///
/// The session id travels through a `Member-Completion-Session` private cookie.
/// When the caller has none yet, a new id is generated and the cookie is set on the response.
#[derive(Debug)]
pub struct WizardSession {
    id: String,
}

impl WizardSession {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn slot<'a>(&'a self, storage: &'a Mutex<SessionStorage>) -> SessionSlot<'a> {
        SessionSlot::new(storage, &self.id)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for WizardSession {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let cookies = req.cookies();
        let id = match cookies.get_private(SESSION_COOKIE) {
            Some(cookie) => cookie.value().to_owned(),
            None => {
                let id = Uuid::new_v4().to_string();
                debug!("New wizard session [session: {id}]");
                let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
                    .same_site(SameSite::Lax)
                    .http_only(true)
                    .build();
                cookies.add_private(cookie);
                id
            }
        };

        Outcome::Success(WizardSession { id })
    }
}
