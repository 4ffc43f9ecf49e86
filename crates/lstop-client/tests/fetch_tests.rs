//! Integration tests for fetching from a mocked monitoring API.
//!
//! These tests verify that the client:
//! 1. Decodes both endpoints, ignoring unknown fields and defaulting missing ones
//! 2. Turns status, decode, connection and timeout failures into `ClientError`s
//! 3. Can be called repeatedly against the same server

use std::time::Duration;

use lstop_client::{ClientError, NODE_PATH, PIPELINE_STATS_PATH, StatsClient, StatsSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn pipelines_body() -> serde_json::Value {
    serde_json::json!({
        "host": "logstash-1",
        "version": "8.13.0",
        "http_address": "127.0.0.1:9600",
        "id": "0b7c",
        "name": "logstash-1",
        "status": "green",
        "snapshot": false,
        "pipeline": {"workers": 8, "batch_size": 125, "batch_delay": 50},
        "pipelines": {
            "main": {
                "events": {"in": 10, "filtered": 8, "out": 8, "duration_in_millis": 120, "queue_push_duration_in_millis": 3},
                "flow": {
                    "queue_backpressure": {"current": 0.25, "last_1_minute": 0.2, "lifetime": 0.1},
                    "worker_concurrency": {"current": 1.5, "last_1_minute": 1.2, "last_5_minutes": 1.1,
                                           "last_15_minutes": 1.0, "last_1_hour": 0.9, "lifetime": 0.8},
                    "brand_new_flow": {"current": 9.0}
                },
                "plugins": {
                    "inputs": [{"id": "beats-1", "name": "beats", "events": {"out": 10},
                                "flow": {"throughput": {"current": 3.5, "lifetime": 2.0}}}],
                    "codecs": [{"id": "plain-1", "name": "plain", "decode": {"writes_in": 10, "out": 10}}],
                    "filters": [{"id": "grok-1", "name": "grok", "events": {"in": 10, "out": 8},
                                 "flow": {"worker_utilization": {"current": 12.5},
                                          "worker_millis_per_event": {"current": 0.04}}}],
                    "outputs": [{"id": "es-1", "name": "elasticsearch", "events": {"in": 8, "out": 8}}]
                },
                "reloads": {"failures": 0, "successes": 2, "last_error": null,
                            "last_success_timestamp": "2024-01-01T00:00:00Z", "last_failure_timestamp": null},
                "queue": {"type": "memory", "events_count": 0},
                "hash": "abc123",
                "ephemeral_id": "eph-1"
            },
            "audit": {}
        }
    })
}

fn node_body() -> serde_json::Value {
    serde_json::json!({
        "host": "logstash-1",
        "version": "8.13.0",
        "pipelines": {
            "main": {"workers": 4, "batch_size": 250, "batch_delay": 50,
                     "config_reload_automatic": true, "config_reload_interval": 3000000000i64,
                     "dead_letter_queue_enabled": false, "hash": "abc123", "ephemeral_id": "eph-1"}
        },
        "os": {"name": "Linux", "arch": "amd64", "version": "6.1", "available_processors": 8},
        "jvm": {"pid": 1, "version": "17.0.9", "mem": {"heap_max_in_bytes": 1073741824u64},
                "gc_collectors": ["G1 Young Generation", "G1 Old Generation"]}
    })
}

fn client_for(server: &MockServer, timeout: Duration) -> StatsClient {
    StatsClient::new(server.uri(), timeout).unwrap()
}

#[tokio::test]
async fn test_pipeline_stats_decodes_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PIPELINE_STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(pipelines_body()))
        .mount(&server)
        .await;

    let answer = client_for(&server, Duration::from_secs(2))
        .pipeline_stats()
        .await
        .unwrap();

    assert_eq!(answer.host, "logstash-1");
    assert_eq!(answer.pipelines.len(), 2);

    let main = answer.pipeline("main").unwrap();
    assert_eq!(main.events.r#in, 10);
    assert_eq!(main.flow.worker_concurrency.last_1_hour, 0.9);
    assert_eq!(main.plugins.inputs[0].flow.throughput.current, 3.5);
    assert_eq!(main.plugins.codecs[0].decode.out, 10);
    assert_eq!(main.plugins.filters[0].flow.worker_millis_per_event.current, 0.04);
    assert_eq!(main.plugins.outputs[0].flow.worker_utilization.current, 0.0);
    assert_eq!(main.queue.queue_type, "memory");
    assert_eq!(main.reloads.successes, 2);

    // A pipeline with no data at all decodes to zero values
    let audit = answer.pipeline("audit").unwrap();
    assert_eq!(audit.events.r#in, 0);
    assert!(audit.plugins.inputs.is_empty());
}

#[tokio::test]
async fn test_node_overview_decodes_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_body()))
        .mount(&server)
        .await;

    let node = client_for(&server, Duration::from_secs(2))
        .node_overview()
        .await
        .unwrap();

    assert_eq!(node.version, "8.13.0");
    let main = node.pipeline_config("main").unwrap();
    assert_eq!(main.workers, 4);
    assert_eq!(main.batch_size, 250);
    assert!(main.config_reload_automatic);
    assert_eq!(node.os.available_processors, 8);
    assert_eq!(node.jvm.gc_collectors.len(), 2);
}

#[tokio::test]
async fn test_repeated_fetches_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PIPELINE_STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(pipelines_body()))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(2));
    let first = client.pipeline_stats().await.unwrap();
    let second = client.pipeline_stats().await.unwrap();
    let third = client.pipeline_stats().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PIPELINE_STATS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("node shutting down"))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(2))
        .pipeline_stats()
        .await
        .unwrap_err();

    match &err {
        ClientError::HttpStatus { status, body, .. } => {
            assert_eq!(*status, 503);
            assert_eq!(body, "node shutting down");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(err.is_retryable());
    assert!(err.friendly_message().contains("503"));
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PIPELINE_STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"pipelines\": [not json"))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(2))
        .pipeline_stats()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }), "got {err:?}");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_wrong_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PIPELINE_STATS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"pipelines": "none"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(2))
        .pipeline_stats()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NODE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(node_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_millis(200))
        .node_overview()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout(..)), "got {err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_refused_is_reported() {
    // Grab a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = StatsClient::new(format!("http://127.0.0.1:{port}"), Duration::from_secs(2)).unwrap();
    let err = client.pipeline_stats().await.unwrap_err();

    assert!(matches!(err, ClientError::ConnectionFailed(_)), "got {err:?}");
    assert!(err.is_network_error());
    assert!(err.friendly_message().contains("Is Logstash running?"));
}
