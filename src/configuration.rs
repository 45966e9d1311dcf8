use crate::tools::env_args::retrieve_setting;
use derive_getters::Getters;
use std::path::PathBuf;

const BACKEND_API_ARG: &str = "--backend-api";
const BACKEND_API_ENV_VAR: &str = "BACKEND_API";
#[cfg(not(feature = "demo"))]
const DEFAULT_BACKEND_API: &str = "https://attendance-dev.icoramdeo.com/api";
const GROUP_LEADERS_ARG: &str = "--group-leaders";
const GROUP_LEADERS_ENV_VAR: &str = "GROUP_LEADERS";
#[cfg(not(feature = "demo"))]
const DEFAULT_GROUP_LEADERS_FILE: &str = "data/group_leaders.json";
#[cfg(feature = "demo")]
const DEFAULT_GROUP_LEADERS_FILE: &str = "demo_data/group_leaders.json";

#[derive(Debug, Getters)]
pub struct Configuration {
    backend_api: String,
    group_leaders_file: PathBuf,
}

impl Configuration {
    /// Trailing slashes of `backend_api` are dropped, so that paths can be appended as is.
    pub fn new(backend_api: String, group_leaders_file: PathBuf) -> Self {
        Self {
            backend_api: backend_api.trim_end_matches('/').to_owned(),
            group_leaders_file,
        }
    }

    pub fn from_env() -> Self {
        let backend_api = retrieve_setting(BACKEND_API_ARG, BACKEND_API_ENV_VAR)
            .unwrap_or_else(get_default_backend_api);
        let group_leaders_file = retrieve_setting(GROUP_LEADERS_ARG, GROUP_LEADERS_ENV_VAR)
            .unwrap_or_else(|| DEFAULT_GROUP_LEADERS_FILE.to_owned());

        Self::new(backend_api, PathBuf::from(group_leaders_file))
    }
}

#[cfg(not(feature = "demo"))]
fn get_default_backend_api() -> String {
    DEFAULT_BACKEND_API.to_owned()
}

#[cfg(feature = "demo")]
fn get_default_backend_api() -> String {
    crate::demo_mock_server::backend_mock_server_uri()
}
