mod common;

use crate::common::*;
use chat_simple::api::models::{NewUser, TwoConversation};
use chat_simple::{ApiClient, ClientError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn every_request_carries_the_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.json"))
        .and(auth())
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"phoneNumber": "555", "password": "123456", "name": "Ana Diaz", "id": 1},
            {"phoneNumber": null, "name": "Ghost"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/users"))
        .and(auth())
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let users = client.users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].phone_number.as_deref(), Some("555"));
    assert_eq!(users[1].phone_number, None);

    client
        .create_user(&NewUser {
            phone_number: "555".into(),
            name: "Ana Diaz".into(),
            password: "123456".into(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/conversations/create_two_conversation"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_two_conversation(&TwoConversation {
            first: "555".into(),
            second: ME.into(),
            title: "Ana Diaz".into(),
        })
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "bad token");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    assert!(matches!(client(&server).users().await, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn query_values_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/get_conversations"))
        .and(query_param("phone_number", "+56 9 1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "group": false},
            {"id": "x", "group": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let convs = client(&server).user_conversations("+56 9 1234").await.unwrap();
    let ids: Vec<_> = convs.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "x"]);
    assert!(convs[1].group);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = ApiClient::new("http://127.0.0.1:9", TOKEN).unwrap();
    assert!(matches!(client.messages("1").await, Err(ClientError::Transport(_))));
}
