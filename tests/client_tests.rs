//! End-to-end tests of the generic operations against a stub server.

use integrations_chartmogul::services::{
    CancelSubscriptionParams, Cursor, CsvUploadRequest, Customer, ListPlansParams, Plan,
};
use integrations_chartmogul::{
    AuthMethod, ChartMogulClient, ChartMogulError, RetryConfig, TransportError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quick_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(20),
        max_elapsed: Duration::from_secs(5),
        multiplier: 2.0,
        jitter: 0.0,
        ..Default::default()
    }
}

fn test_client(server_uri: &str) -> ChartMogulClient {
    ChartMogulClient::builder()
        .base_url(format!("{}/v1", server_uri))
        .auth(AuthMethod::basic("token", "key"))
        .retry(quick_retry())
        .build()
        .expect("client must build")
}

#[tokio::test]
async fn delete_retries_through_rate_limit_transparently() {
    let server = MockServer::start().await;

    // First attempt is rate limited, second succeeds; the caller sees only
    // the success.
    Mock::given(method("DELETE"))
        .and(path("/v1/data_sources/ds_1"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string(r#"{"errors":"nooo"}"#),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/data_sources/ds_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .data_sources()
        .delete("ds_1")
        .await
        .expect("retry must be invisible to the caller");
}

#[tokio::test]
async fn client_error_surfaces_verbatim_body_after_one_attempt() {
    let server = MockServer::start().await;
    let body = r#"{"external_id":["is invalid"]}"#;

    Mock::given(method("GET"))
        .and(path("/v1/plans/plan_404"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let error = client
        .plans()
        .retrieve("plan_404")
        .await
        .expect_err("404 must fail");

    match error {
        ChartMogulError::Http {
            status_code,
            raw_body,
            ..
        } => {
            assert_eq!(status_code, 404);
            assert_eq!(raw_body, body);
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn server_error_exhausts_attempt_budget_then_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let error = client.account().retrieve().await.expect_err("must fail");
    assert_eq!(error.status_code(), Some(503));
    assert_eq!(error.raw_body(), Some("try later"));
}

#[tokio::test]
async fn connection_failure_retries_within_bounded_time() {
    // Nothing listens on the discard port; every attempt fails to connect.
    let client = ChartMogulClient::builder()
        .base_url("http://127.0.0.1:9/v1")
        .auth(AuthMethod::basic("token", "key"))
        .timeout(Duration::from_millis(500))
        .retry(quick_retry())
        .build()
        .expect("client must build");

    let started = Instant::now();
    let error = client
        .plans()
        .retrieve("plan_1")
        .await
        .expect_err("must fail");
    assert!(started.elapsed() < Duration::from_secs(10));

    match error {
        ChartMogulError::Request { errors } => {
            assert!(errors.iter().any(TransportError::is_network));
        }
        other => panic!("expected Request error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_round_trips_payload_fields() {
    let server = MockServer::start().await;

    let customer = Customer {
        data_source_uuid: "ds_1".to_string(),
        external_id: "cus-ext-1".to_string(),
        name: "Acme Corp".to_string(),
        email: Some("billing@acme.example".to_string()),
        country: Some("US".to_string()),
        ..Default::default()
    };

    // The stub echoes the payload back with a server-assigned UUID.
    let sent = serde_json::to_value(&customer).expect("serializes");
    let mut echoed = sent.clone();
    echoed["uuid"] = json!("cus_123");

    Mock::given(method("POST"))
        .and(path("/v1/import/customers"))
        .and(header("content-type", "application/json"))
        .and(body_json(&sent))
        .respond_with(ResponseTemplate::new(200).set_body_json(&echoed))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let created = client
        .customers()
        .create(&customer)
        .await
        .expect("create must succeed");

    assert_eq!(created.uuid, "cus_123");
    assert_eq!(created.data_source_uuid, customer.data_source_uuid);
    assert_eq!(created.external_id, customer.external_id);
    assert_eq!(created.name, customer.name);
    assert_eq!(created.email, customer.email);
    assert_eq!(created.country, customer.country);
}

#[tokio::test]
async fn list_flattens_query_objects_in_call_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/plans"))
        .and(query_param("data_source_uuid", "ds_1"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plans": [{"uuid": "plan_1", "name": "Gold", "data_source_uuid": "ds_1",
                       "interval_count": 1, "interval_unit": "month"}],
            "total_pages": 3,
            "current_page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let params = ListPlansParams {
        data_source_uuid: Some("ds_1".to_string()),
        ..Default::default()
    };
    let plans = client
        .plans()
        .list(&params, &Cursor::new(2, 25))
        .await
        .expect("list must succeed");

    assert_eq!(plans.current_page, 2);
    assert_eq!(plans.plans.len(), 1);
    assert_eq!(plans.plans[0].name, "Gold");

    // Objects are appended in call order: filter first, cursor second.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("data_source_uuid=ds_1&page=2&per_page=25")
    );
}

#[tokio::test]
async fn update_family_dispatches_configured_verb() {
    let server = MockServer::start().await;

    let plan_body = json!({"uuid": "plan_1", "name": "Gold v2",
                           "data_source_uuid": "ds_1",
                           "interval_count": 1, "interval_unit": "month"});
    Mock::given(method("PATCH"))
        .and(path("/v1/plans/plan_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&plan_body))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/customers/cus_1/attributes/tags"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"tags": ["vip", "beta"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let plan = Plan {
        name: "Gold v2".to_string(),
        ..Default::default()
    };
    let updated = client
        .plans()
        .update("plan_1", &plan)
        .await
        .expect("update must succeed");
    assert_eq!(updated.name, "Gold v2");

    let tags = client
        .tags()
        .add_to_customer("cus_1", &["vip".to_string(), "beta".to_string()])
        .await
        .expect("add must succeed");
    assert_eq!(tags.tags, vec!["vip", "beta"]);
}

#[tokio::test]
async fn put_to_uses_put_verb() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/plan_groups/pg_1/plans"))
        .and(body_json(json!({"plans": ["plan_1", "plan_2"]})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"plans": ["plan_1", "plan_2"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let replaced: serde_json::Value = client
        .put_to(
            "plan_groups/:uuid/plans",
            "pg_1",
            &json!({"plans": ["plan_1", "plan_2"]}),
        )
        .await
        .expect("put must succeed");
    assert_eq!(replaced["plans"][1], json!("plan_2"));
}

#[tokio::test]
async fn cancel_subscription_sends_patch() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/import/subscriptions/sub_1"))
        .and(body_json(json!({"cancelled_at": "2024-03-01T00:00:00Z"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "sub_1",
            "external_id": "sub-ext-1",
            "plan_uuid": "plan_1",
            "data_source_uuid": "ds_1",
            "cancellation_dates": ["2024-03-01T00:00:00Z"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let subscription = client
        .subscriptions()
        .cancel(
            "sub_1",
            &CancelSubscriptionParams {
                cancelled_at: Some("2024-03-01T00:00:00Z".to_string()),
                cancellation_dates: None,
            },
        )
        .await
        .expect("cancel must succeed");
    assert_eq!(subscription.cancellation_dates.len(), 1);
}

#[tokio::test]
async fn delete_with_body_decodes_response() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/customers/cus_1/attributes/tags"))
        .and(body_json(json!({"tags": ["beta"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["vip"]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let remaining = client
        .tags()
        .remove_from_customer("cus_1", &["beta".to_string()])
        .await
        .expect("remove must succeed");
    assert_eq!(remaining.tags, vec!["vip"]);
}

#[tokio::test]
async fn retrieve_singleton_substitutes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Example Inc.",
            "currency": "EUR",
            "time_zone": "Europe/Berlin",
            "week_start_on": "monday"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let account = client.account().retrieve().await.expect("must succeed");
    assert_eq!(account.currency, "EUR");
}

#[tokio::test]
async fn retrieve_is_repeatable_with_identical_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/plans/plan_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "plan_1", "name": "Gold", "data_source_uuid": "ds_1",
            "interval_count": 1, "interval_unit": "month"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let first = client.plans().retrieve("plan_1").await.expect("first");
    let second = client.plans().retrieve("plan_1").await.expect("second");
    assert_eq!(first, second);
}

#[tokio::test]
async fn upload_sends_multipart_form_without_path_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/data_sources/ds_1/uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "upload_1",
            "original_name": "ledger.csv",
            "data_type": "invoices",
            "batch_name": "march",
            "percent_complete": 0.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("ledger.csv");
    let mut file = std::fs::File::create(&file_path).expect("create file");
    writeln!(file, "external_id,amount,currency").expect("write");
    writeln!(file, "inv-1,4200,USD").expect("write");
    drop(file);

    let client = test_client(&server.uri());
    let response = client
        .csv_uploads()
        .upload(
            &file_path,
            &CsvUploadRequest {
                data_source_uuid: "ds_1".to_string(),
                data_type: "invoices".to_string(),
                batch_name: "march".to_string(),
            },
        )
        .await
        .expect("upload must succeed");
    assert_eq!(response.id, "upload_1");

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("inv-1,4200,USD"));
    assert!(body.contains("name=\"data_type\""));
    assert!(body.contains("name=\"batch_name\""));
    // The data source is in the path, not duplicated in the form.
    assert!(!body.contains("name=\"data_source_uuid\""));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/plans/plan_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let error = client
        .plans()
        .retrieve("plan_1")
        .await
        .expect_err("garbage body must fail");

    match error {
        ChartMogulError::Decode { body, .. } => assert_eq!(body, "not json at all"),
        other => panic!("expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn requests_carry_basic_credentials() {
    let server = MockServer::start().await;

    // token:key base64-encoded.
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .and(header("authorization", "Basic dG9rZW46a2V5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "pong!"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.ping().ping().await.expect("ping must succeed"));
}
