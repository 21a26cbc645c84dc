//! End-to-end GET-and-decode against a mock Keybase server

use httpmock::prelude::*;
use serde_json::json;

use keybase::{
    Client, Config, KeyFetchParams, ServiceMatches, UserAutocompleteParams, UserDiscoverParams,
    UserLookupParams,
};

const API_ROOT: &str = "/_/api/1.0";

fn client_for(server: &MockServer) -> Client {
    let config = Config::with_base_url(&server.url(API_ROOT)).unwrap();
    Client::new(&config).unwrap()
}

#[tokio::test]
async fn user_lookup_sends_usernames_and_decodes_them() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/_/api/1.0/user/lookup.json")
                .query_param("usernames", "max")
                .query_param_missing("domain")
                .query_param_missing("fields");
            then.status(200).json_body(json!({
                "status": {"code": 0, "name": "OK"},
                "them": [{"id": "u1", "basics": {"username": "max"}}]
            }));
        })
        .await;

    let resp = client_for(&server)
        .user_lookup(&UserLookupParams::usernames("max"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.status.name, "OK");
    let first = resp.them[0].as_ref().unwrap();
    assert_eq!(first.id, "u1");
    assert_eq!(first.basics.username, "max");
}

#[tokio::test]
async fn key_fetch_sends_both_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/_/api/1.0/key/fetch.json")
                .query_param("pgp_key_ids", "ABCD1234")
                .query_param("ops", "3");
            then.status(200).json_body(json!({
                "status": {"code": 0, "name": "OK"},
                "keys": [{"kid": "0101d9d9", "secret": 0, "subkeys": {"abcd1234": {"flags": 3, "is_primary": 1}}}]
            }));
        })
        .await;

    let params = KeyFetchParams {
        pgp_key_ids: "ABCD1234".to_string(),
        ops: 3,
    };
    let resp = client_for(&server).key_fetch(&params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.keys.len(), 1);
    assert_eq!(resp.keys[0].kid, "0101d9d9");
    assert!(resp.keys[0].subkeys["abcd1234"].is_primary());
}

#[tokio::test]
async fn autocomplete_sends_q() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/_/api/1.0/user/autocomplete.json")
                .query_param("q", "chris c");
            then.status(200).json_body(json!({
                "status": {"code": 0, "name": "OK"},
                "completions": [{
                    "total_score": 0.9,
                    "components": {"username": {"val": "chris", "score": 0.5}}
                }]
            }));
        })
        .await;

    let resp = client_for(&server)
        .user_autocomplete(&UserAutocompleteParams::new("chris c"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.completions[0].components.username(), "chris");
}

#[tokio::test]
async fn discover_sends_only_filled_services() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/_/api/1.0/user/discover.json")
                .query_param("github", "malgorithms")
                .query_param("flatten", "1")
                .query_param_missing("twitter")
                .query_param_missing("web");
            then.status(200).json_body(json!({
                "status": {"code": 0, "name": "OK"},
                "matches": {"github": [{"username": "chris", "remote_proofs": {"github": "malgorithms"}}]}
            }));
        })
        .await;

    let params = UserDiscoverParams {
        github: "malgorithms".to_string(),
        flatten: true,
        ..UserDiscoverParams::default()
    };
    let resp = client_for(&server).user_discover(&params).await.unwrap();

    mock.assert_async().await;
    assert!(matches!(resp.matches.github, ServiceMatches::Flat(_)));
    let chris = resp.matches.github.candidates().next().unwrap();
    assert_eq!(chris.remote_proofs.github, "malgorithms");
}

#[tokio::test]
async fn api_failure_is_returned_in_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_/api/1.0/user/lookup.json");
            then.status(200).json_body(json!({
                "status": {"code": 205, "name": "NOT_FOUND", "desc": "user not found"},
                "them": [null]
            }));
        })
        .await;

    let resp = client_for(&server)
        .user_lookup(&UserLookupParams::usernames("nobody-here"))
        .await
        .unwrap();

    assert_eq!(resp.status.code, 205);
    assert_eq!(resp.status.name, "NOT_FOUND");
    assert!(resp.them[0].is_none());
    assert_eq!(resp.users().count(), 0);
}

#[tokio::test]
async fn error_status_with_envelope_still_decodes() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_/api/1.0/user/autocomplete.json");
            then.status(400).json_body(json!({
                "status": {"code": 100, "name": "INPUT_ERROR", "fields": {"q": "missing"}}
            }));
        })
        .await;

    let resp = client_for(&server)
        .user_autocomplete(&UserAutocompleteParams::default())
        .await
        .unwrap();

    assert_eq!(resp.status.code, 100);
    assert_eq!(resp.status.fields["q"], "missing");
    assert!(resp.completions.is_empty());
}

#[tokio::test]
async fn gateway_error_page_surfaces_as_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_/api/1.0/key/fetch.json");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let err = client_for(&server)
        .key_fetch(&KeyFetchParams::default())
        .await
        .unwrap_err();

    assert!(err.is_http());
    assert!(!err.is_decode());
    assert!(!err.is_transport());
    match err {
        keybase::Error::Http { endpoint, status, body } => {
            assert_eq!(endpoint, "key/fetch");
            assert_eq!(status.as_u16(), 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_/api/1.0/user/lookup.json");
            then.status(200).body(r#"{"status":{"code":0},"them":[{"id":"#);
        })
        .await;

    let err = client_for(&server)
        .user_lookup(&UserLookupParams::usernames("max"))
        .await
        .unwrap_err();

    assert!(err.is_decode());
    assert!(!err.is_http());
    assert!(matches!(err, keybase::Error::Decode { endpoint: "user/lookup", .. }));
}

#[tokio::test]
async fn type_mismatch_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_/api/1.0/user/discover.json");
            then.status(200).json_body(json!({"status": {"code": "zero"}}));
        })
        .await;

    let err = client_for(&server)
        .user_discover(&UserDiscoverParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, keybase::Error::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on the discard port.
    let config = Config::with_base_url("http://127.0.0.1:9/_/api/1.0").unwrap();
    let err = Client::new(&config)
        .unwrap()
        .user_lookup(&UserLookupParams::usernames("max"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn configured_timeout_applies_to_requests() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_/api/1.0/user/lookup.json");
            then.status(200)
                .delay(std::time::Duration::from_secs(2))
                .json_body(json!({"status": {"code": 0}}));
        })
        .await;

    let mut config = Config::with_base_url(&server.url(API_ROOT)).unwrap();
    config.timeout = Some(std::time::Duration::from_millis(100));
    let err = Client::new(&config)
        .unwrap()
        .user_lookup(&UserLookupParams::usernames("max"))
        .await
        .unwrap_err();

    match err {
        keybase::Error::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn user_agent_is_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/_/api/1.0/user/lookup.json")
                .header("user-agent", "keybase-tests/1");
            then.status(200).json_body(json!({"status": {"code": 0}}));
        })
        .await;

    let mut config = Config::with_base_url(&server.url(API_ROOT)).unwrap();
    config.user_agent = "keybase-tests/1".to_string();
    Client::new(&config)
        .unwrap()
        .user_lookup(&UserLookupParams::usernames("max"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn null_status_and_fields_decode_as_zero_values() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/_/api/1.0/user/lookup.json");
            then.status(200).json_body(json!({
                "status": null,
                "them": [{"id": "u1", "profile": {"full_name": "Max", "mtime": null}}]
            }));
        })
        .await;

    let resp = client_for(&server)
        .user_lookup(&UserLookupParams::usernames("max"))
        .await
        .unwrap();

    assert_eq!(resp.status, keybase::Status::default());
    let user = resp.them[0].as_ref().unwrap();
    assert_eq!(user.profile.full_name, "Max");
    assert_eq!(user.profile.mtime, 0);
}
