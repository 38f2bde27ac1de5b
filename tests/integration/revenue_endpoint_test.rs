//! Integration tests for the revenue HTTP surface
//!
//! Runs the real routes, middleware and pipeline over an in-memory source.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use helpers::*;
use revenue_report::stripe::TransactionStatus;
use serde_json::{json, Value};

#[actix_web::test]
async fn test_post_revenue_three_payments() {
    let source = Arc::new(InMemorySource::new(vec![
        TestDataFactory::succeeded("pi_3", 500, 7_200),
        TestDataFactory::succeeded("pi_2", 2550, 3_600),
        TestDataFactory::succeeded("pi_1", 1000, 0),
    ]));
    let app = test::init_service(test_app(source.clone())).await;

    let req = test::TestRequest::post()
        .uri("/revenue")
        .set_json(json!({"startDate": "2024-01-01", "endDate": "2024-01-01"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["transactionCount"], 3);
    assert_eq!(body["grossRevenue"].as_f64(), Some(40.5));
    assert_eq!(body["fees"].as_f64(), Some(2.07));
    assert_eq!(body["netPrimary"].as_f64(), Some(38.43));
    assert_eq!(body["netSecondary"].as_f64(), Some(267.44));
    assert_eq!(body["dateRange"]["start"], "2024-01-01");
    assert_eq!(body["dateRange"]["end"], "2024-01-01");
    assert_eq!(body["dateRange"]["startInstant"], 1_704_081_600);
    assert_eq!(body["dateRange"]["endInstant"], 1_704_167_999);
    assert_eq!(source.request_count(), 1);
}

#[actix_web::test]
async fn test_get_revenue_with_query_string() {
    let source = Arc::new(InMemorySource::new(vec![
        TestDataFactory::with_status("pi_2", TransactionStatus::Canceled, 9_900),
        TestDataFactory::succeeded("pi_1", 1000, 0),
    ]));
    let app = test::init_service(test_app(source)).await;

    let req = test::TestRequest::get()
        .uri("/revenue?startDate=2024-01-01&endDate=2024-01-31")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["transactionCount"], 1);
    assert_eq!(body["grossRevenue"].as_f64(), Some(10.0));
    assert_eq!(body["fees"].as_f64(), Some(0.59));
}

#[actix_web::test]
async fn test_empty_range_returns_zeros() {
    let source = Arc::new(InMemorySource::new(Vec::new()));
    let app = test::init_service(test_app(source)).await;

    let req = test::TestRequest::post()
        .uri("/revenue")
        .set_json(json!({"startDate": "2024-06-01", "endDate": "2024-06-30"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["transactionCount"], 0);
    for field in ["grossRevenue", "fees", "netPrimary", "netSecondary"] {
        assert_eq!(body[field].as_f64(), Some(0.0), "{}", field);
    }
}

#[actix_web::test]
async fn test_inverted_range_is_not_an_error() {
    let source = Arc::new(InMemorySource::new(TestDataFactory::january_payments(5, 1000)));
    let app = test::init_service(test_app(source.clone())).await;

    let req = test::TestRequest::post()
        .uri("/revenue")
        .set_json(json!({"startDate": "2024-01-31", "endDate": "2024-01-01"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["transactionCount"], 0);
    assert!(
        body["dateRange"]["startInstant"].as_i64().unwrap()
            > body["dateRange"]["endInstant"].as_i64().unwrap()
    );
    assert_eq!(source.request_count(), 0);
}

#[actix_web::test]
async fn test_missing_date_is_bad_request() {
    let source = Arc::new(InMemorySource::new(Vec::new()));
    let app = test::init_service(test_app(source.clone())).await;

    let req = test::TestRequest::post()
        .uri("/revenue")
        .set_json(json!({"startDate": "2024-01-01"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "validation_error");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Missing startDate or endDate"));
    assert_eq!(source.request_count(), 0);
}

#[actix_web::test]
async fn test_malformed_date_is_bad_request() {
    let source = Arc::new(InMemorySource::new(Vec::new()));
    let app = test::init_service(test_app(source)).await;

    let req = test::TestRequest::post()
        .uri("/revenue")
        .set_json(json!({"startDate": "January 1st", "endDate": "2024-01-31"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let source = Arc::new(InMemorySource::new(Vec::new()));
    let app = test::init_service(test_app(source)).await;

    let req = test::TestRequest::post()
        .uri("/revenue")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"startDate\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "validation_error");
}

#[actix_web::test]
async fn test_upstream_failure_is_bad_gateway_without_partial_totals() {
    let source = Arc::new(InMemorySource::new(TestDataFactory::january_payments(250, 1000)).failing_on(3));
    let app = test::init_service(test_app(source.clone())).await;

    let req = test::TestRequest::post()
        .uri("/revenue")
        .set_json(json!({"startDate": "2024-01-01", "endDate": "2024-01-31"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["kind"], "upstream_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("simulated outage"));
    assert!(body.get("transactionCount").is_none());
    assert_eq!(source.request_count(), 3);
}

#[actix_web::test]
async fn test_unsupported_method_gets_error_envelope() {
    let source = Arc::new(InMemorySource::new(Vec::new()));
    let app = test::init_service(test_app(source.clone())).await;

    for req in [
        test::TestRequest::put().uri("/revenue").to_request(),
        test::TestRequest::delete().uri("/revenue").to_request(),
    ] {
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            resp.headers().get(header::ALLOW).unwrap(),
            "GET, POST, OPTIONS"
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["kind"], "method_not_allowed");
        assert_eq!(body["error"]["code"], 405);
    }
    assert_eq!(source.request_count(), 0);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let source = Arc::new(InMemorySource::new(Vec::new()));
    let app = test::init_service(test_app(source)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
