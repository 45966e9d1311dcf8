use log::{error, info, warn};
use serde_json::json;
use std::sync::OnceLock;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Kept for the whole run: a dropped mock server loses its mocks.
static BACKEND_MOCK_SERVER: OnceLock<MockServer> = OnceLock::new();

pub async fn init_demo() {
    let mock_server = MockServer::start().await;
    mock_rosters(&mock_server).await;
    mock_member_update(&mock_server).await;
    info!("Demo backend started [uri: {}]", mock_server.uri());

    if BACKEND_MOCK_SERVER.set(mock_server).is_err() {
        warn!("Demo backend already started");
    }
}

pub fn backend_mock_server_uri() -> String {
    BACKEND_MOCK_SERVER
        .get()
        .map(MockServer::uri)
        .unwrap_or_else(|| {
            error!("Demo backend not started");
            String::new()
        })
}

async fn mock_rosters(mock_server: &MockServer) {
    mock_roster(
        mock_server,
        "demo-1",
        json!([
            {"userId": 1, "name": "박민수", "birthYear": "", "phoneNumber": "01011112222"},
            {"userId": 2, "name": "최지우", "birthYear": "98", "birthDate": "1998-01-01", "phoneNumber": "01033334444"},
            {"userId": 3, "name": "정하늘", "birthYear": "03", "birthDate": "2003-01-01", "phoneNumber": null}
        ]),
    )
    .await;
    mock_roster(
        mock_server,
        "demo-2",
        json!([
            {"userId": 4, "name": "강바다", "role": "member"},
            {"userId": 3, "name": "정하늘", "birthYear": "03", "birthDate": "2003-01-01", "phoneNumber": null}
        ]),
    )
    .await;
    mock_roster(mock_server, "demo-3", json!(null)).await;
}

async fn mock_roster(mock_server: &MockServer, group_id: &str, roster: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/organizations/{group_id}/members/roles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster))
        .mount(mock_server)
        .await;
}

async fn mock_member_update(mock_server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path_regex("^/users/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(mock_server)
        .await;
}
