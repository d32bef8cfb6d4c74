// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end requester behaviour against a mock server

use std::time::Duration;

use futures::StreamExt;
use reqwest::multipart::Form;
use serde_json::{json, Value};
use service_requester::{
    CallOptions, Error, Reply, ReqwestRequester, Requester, ResponseBody, ServiceConfig, Verb,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> ServiceConfig {
    ServiceConfig::new(format!("{}/api/v4/", server.uri())).header("private-token", "t0k")
}

#[tokio::test]
async fn get_normalizes_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1"))
        .and(header("private-token", "t0k"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1, "name": "demo" }))
                .insert_header("X-Total-Pages", "3"),
        )
        .mount(&server)
        .await;

    let requester = ReqwestRequester::new().unwrap();
    let response = requester
        .get(&service(&server), "projects/1", CallOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, ResponseBody::Json(json!({ "id": 1, "name": "demo" })));
    assert_eq!(response.headers["x-total-pages"], "3");
    assert!(response.headers["content-type"].contains("json"));
}

#[tokio::test]
async fn text_body_is_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/version.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&server)
        .await;

    let response = ReqwestRequester::new()
        .unwrap()
        .get(&service(&server), "version.txt", CallOptions::new())
        .await
        .unwrap();

    assert_eq!(response.body.as_text(), Some("hello"));
}

#[tokio::test]
async fn malformed_json_becomes_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{invalid", "application/json"))
        .mount(&server)
        .await;

    let response = ReqwestRequester::new()
        .unwrap()
        .get(&service(&server), "broken", CallOptions::new())
        .await
        .unwrap();

    assert_eq!(response.body, ResponseBody::Json(json!({})));
}

#[tokio::test]
async fn post_sends_decamelized_json_with_sudo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/merge_requests"))
        .and(header("sudo", "alice"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "source_branch": "feature",
            "target_branch": "main",
            "SHA": "abc123"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "iid": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    let options = CallOptions::new()
        .json(json!({
            "sourceBranch": "feature",
            "targetBranch": "main",
            "SHA": "abc123"
        }))
        .sudo("alice");
    let response = ReqwestRequester::new()
        .unwrap()
        .post(&service(&server), "projects/1/merge_requests", options)
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body.as_json(), Some(&json!({ "iid": 5 })));
}

#[tokio::test]
async fn multipart_body_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/uploads"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let form = Form::new().text("fileName", "notes.txt");
    ReqwestRequester::new()
        .unwrap()
        .post(
            &service(&server),
            "projects/1/uploads",
            CallOptions::new().multipart(form),
        )
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(!content_type.contains("application/json"));
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"fileName\""));
    assert!(body.contains("notes.txt"));
}

#[tokio::test]
async fn query_uses_brackets_and_snake_case() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let options = CallOptions::new()
        .query("perPage", "50")
        .query("labels", vec!["bug", "needs review"]);
    ReqwestRequester::new()
        .unwrap()
        .get(&service(&server), "issues", options)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = received[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("labels[]".to_string(), "bug".to_string()),
            ("labels[]".to_string(), "needs review".to_string()),
            ("per_page".to_string(), "50".to_string()),
        ]
    );
}

#[tokio::test]
async fn error_response_carries_description() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;

    let err = ReqwestRequester::new()
        .unwrap()
        .delete(&service(&server), "projects/404", CallOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.description(), Some("not found"));
    assert_eq!(err.status_code(), Some(404));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn error_response_without_json_keeps_original_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = ReqwestRequester::new()
        .unwrap()
        .put(
            &service(&server),
            "projects/1",
            CallOptions::new().json(json!({ "name": "x" })),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 500, .. }));
    assert_eq!(err.description(), None);
    assert_eq!(err.response_body(), Some("upstream exploded"));
}

#[tokio::test]
async fn connection_failure_is_propagated() {
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let err = ReqwestRequester::new()
        .unwrap()
        .get(&ServiceConfig::new(uri), "user", CallOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.description(), None);
}

#[tokio::test]
async fn service_timeout_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let slow = service(&server).timeout(Duration::from_millis(100));
    let err = ReqwestRequester::new()
        .unwrap()
        .get(&slow, "slow", CallOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn stream_returns_before_response_arrives() {
    let server = MockServer::start().await;
    let payload: Vec<u8> = (0..256 * 1024).map(|i| (i % 251) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/repository/archive"))
        .and(header("sudo", "bob"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(payload.clone(), "application/octet-stream")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let requester = ReqwestRequester::new().unwrap();
    let mut stream = requester
        .stream(
            &service(&server),
            "projects/1/repository/archive",
            CallOptions::new().sudo("bob"),
        )
        .unwrap();

    let early = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
    assert!(early.is_err(), "no chunk may arrive before the response");

    let body = stream.collect_bytes().await.unwrap();
    assert_eq!(body.as_ref(), payload.as_slice());
}

#[tokio::test]
async fn stream_error_is_not_enriched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;

    let mut stream = ReqwestRequester::new()
        .unwrap()
        .stream(&service(&server), "missing", CallOptions::new())
        .unwrap();

    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.description(), None);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn call_dispatches_on_verb() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/export/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tarball".to_vec()))
        .mount(&server)
        .await;

    let requester: Box<dyn Requester> = Box::new(ReqwestRequester::new().unwrap());
    let svc = service(&server);

    let reply = requester
        .call("put".parse().unwrap(), &svc, "projects/1", CallOptions::new())
        .await
        .unwrap();
    let response = reply.into_response().unwrap();
    let parsed: Value = response.json().unwrap();
    assert_eq!(parsed, json!({ "ok": true }));

    let reply = requester
        .call(Verb::Stream, &svc, "projects/1/export/download", CallOptions::new())
        .await
        .unwrap();
    assert!(matches!(reply, Reply::Stream(_)));
    let bytes = reply.into_stream().unwrap().collect_bytes().await.unwrap();
    assert_eq!(bytes.as_ref(), b"tarball");
}
