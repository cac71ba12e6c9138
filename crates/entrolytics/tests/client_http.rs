// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the tracking client's HTTP exchange.
//!
//! Tests cover:
//! - Request headers (bearer auth, content type, user agent, forwarding)
//! - Envelope and flat wire bodies as they appear on the wire
//! - Timestamp defaulting and page-view title folding
//! - The status-code decision table (200/201, 400, 401, 429, other)
//! - Validation failures issuing no request
//! - Timeout surfacing as a network error
//! - The dedicated vitals/forms/deployments endpoints
//! - The legacy collect schema and array batching

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use entrolytics::{
	ApiErrorCode, Client, Deployment, Error, Event, FormEvent, FormEventType, Identify,
	NetworkError, PageView, Properties, VitalMetric, VitalRating, WebVital, WireSchema,
	PAGE_VIEW_EVENT,
};
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server with default settings.
fn client_for(server: &MockServer) -> Client {
	Client::builder()
		.api_key("ent_key_123")
		.host(server.uri())
		.build()
		.unwrap()
}

/// Parses the JSON body of the only request the server received.
async fn only_request_body(server: &MockServer) -> Value {
	let requests = server.received_requests().await.unwrap();
	assert_eq!(requests.len(), 1);
	serde_json::from_slice(&requests[0].body).unwrap()
}

// ============================================================================
// Request Headers
// ============================================================================

#[tokio::test]
async fn test_requests_carry_auth_content_type_and_user_agent() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/send"))
		.and(header("Authorization", "Bearer ent_key_123"))
		.and(header("Content-Type", "application/json"))
		.and(header("User-Agent", "acme-backend/9.1"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = Client::builder()
		.api_key("ent_key_123")
		.host(server.uri())
		.user_agent("acme-backend/9.1")
		.build()
		.unwrap();

	client.track(Event::new("site_1", "signup")).await.unwrap();
}

#[tokio::test]
async fn test_default_user_agent_identifies_the_sdk() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;

	let client = client_for(&server);
	client.track(Event::new("site_1", "signup")).await.unwrap();

	let requests = server.received_requests().await.unwrap();
	let user_agent = requests[0]
		.headers
		.get("User-Agent")
		.unwrap()
		.to_str()
		.unwrap();
	assert!(user_agent.starts_with("entrolytics-rust/"));
}

#[tokio::test]
async fn test_end_user_context_travels_as_headers_not_body() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/send"))
		.and(header("X-Forwarded-User-Agent", "Mozilla/5.0 (Macintosh)"))
		.and(header("X-Forwarded-For", "203.0.113.7"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let event = Event {
		user_agent: Some("Mozilla/5.0 (Macintosh)".to_string()),
		ip_address: Some("203.0.113.7".to_string()),
		..Event::new("site_1", "signup")
	};
	client.track(event).await.unwrap();

	let requests = server.received_requests().await.unwrap();
	let body = String::from_utf8(requests[0].body.clone()).unwrap();
	assert!(!body.contains("Mozilla"));
	assert!(!body.contains("203.0.113.7"));
}

#[tokio::test]
async fn test_forwarding_headers_absent_when_context_unset() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;

	let client = client_for(&server);
	client.track(Event::new("site_1", "signup")).await.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert!(requests[0].headers.get("X-Forwarded-User-Agent").is_none());
	assert!(requests[0].headers.get("X-Forwarded-For").is_none());
}

// ============================================================================
// Event Flow Bodies
// ============================================================================

#[tokio::test]
async fn test_track_posts_envelope_to_send_path() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/send"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let event = Event {
		data: Properties::new().insert("plan", "growth"),
		url: Some("https://example.com/upgrade".to_string()),
		user_id: Some("user_42".to_string()),
		timestamp: Some(Utc.with_ymd_and_hms(2025, 8, 14, 10, 30, 0).unwrap()),
		..Event::new("site_1", "upgrade")
	};
	client.track(event).await.unwrap();

	let body = only_request_body(&server).await;
	assert_eq!(body["type"], "event");
	assert_eq!(body["payload"]["website"], "site_1");
	assert_eq!(body["payload"]["name"], "upgrade");
	assert_eq!(body["payload"]["data"]["plan"], "growth");
	assert_eq!(body["payload"]["url"], "https://example.com/upgrade");
	assert_eq!(body["payload"]["userId"], "user_42");
	assert_eq!(body["payload"]["timestamp"], "2025-08-14T10:30:00Z");
}

#[tokio::test]
async fn test_track_defaults_timestamp_to_invocation_time() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let before = Utc::now();
	client.track(Event::new("site_1", "signup")).await.unwrap();

	let body = only_request_body(&server).await;
	let raw = body["payload"]["timestamp"].as_str().unwrap();
	let parsed = DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc);

	assert!(parsed >= before - chrono::Duration::seconds(1));
	assert!(parsed <= Utc::now() + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn test_page_view_posts_sentinel_event_with_title_data() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/send"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let pv = PageView {
		title: Some("Pricing".to_string()),
		..PageView::new("site_1", "https://example.com/pricing")
	};
	client.page_view(pv).await.unwrap();

	let body = only_request_body(&server).await;
	assert_eq!(body["type"], "event");
	assert_eq!(body["payload"]["name"], PAGE_VIEW_EVENT);
	assert_eq!(body["payload"]["url"], "https://example.com/pricing");
	assert_eq!(body["payload"]["data"]["title"], "Pricing");
}

#[tokio::test]
async fn test_page_view_empty_title_sends_no_data() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let pv = PageView {
		title: Some(String::new()),
		..PageView::new("site_1", "https://example.com")
	};
	client.page_view(pv).await.unwrap();

	let body = only_request_body(&server).await;
	assert!(!body["payload"].as_object().unwrap().contains_key("data"));
}

#[tokio::test]
async fn test_identify_posts_identify_envelope_without_forwarding() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/send"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let identify = Identify {
		traits: Properties::new().insert("plan", "pro"),
		..Identify::new("site_1", "user_42")
	};
	client.identify(identify).await.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert!(requests[0].headers.get("X-Forwarded-User-Agent").is_none());
	assert!(requests[0].headers.get("X-Forwarded-For").is_none());

	let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
	assert_eq!(body["type"], "identify");
	assert_eq!(body["payload"]["website"], "site_1");
	assert_eq!(body["payload"]["userId"], "user_42");
	assert_eq!(body["payload"]["traits"]["plan"], "pro");
	assert!(body["payload"]["timestamp"].is_string());
}

// ============================================================================
// Response Classification
// ============================================================================

#[tokio::test]
async fn test_created_status_is_success() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(201))
		.mount(&server)
		.await;

	let client = client_for(&server);
	assert!(client.track(Event::new("site_1", "signup")).await.is_ok());
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(401))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client
		.track(Event::new("site_1", "signup"))
		.await
		.unwrap_err();

	assert!(matches!(err, Error::Authentication));
}

#[tokio::test]
async fn test_rate_limit_surfaces_retry_after_hint() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client
		.track(Event::new("site_1", "signup"))
		.await
		.unwrap_err();

	assert!(matches!(err, Error::RateLimited { retry_after_secs: 30 }));
}

#[tokio::test]
async fn test_rate_limit_without_header_hints_zero() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(429))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client
		.track(Event::new("site_1", "signup"))
		.await
		.unwrap_err();

	assert!(matches!(err, Error::RateLimited { retry_after_secs: 0 }));
}

#[tokio::test]
async fn test_bad_request_surfaces_server_error_message() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(
			ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "bad website"})),
		)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client
		.track(Event::new("site_1", "signup"))
		.await
		.unwrap_err();

	match err {
		Error::Api {
			code,
			message,
			status,
		} => {
			assert_eq!(code, ApiErrorCode::ValidationError);
			assert_eq!(message, "bad website");
			assert_eq!(status, 400);
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn test_bad_request_with_unparsable_body_falls_back() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(400).set_body_string("<html>oops</html>"))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client
		.track(Event::new("site_1", "signup"))
		.await
		.unwrap_err();

	match err {
		Error::Api {
			code,
			message,
			status,
		} => {
			assert_eq!(code, ApiErrorCode::BadRequest);
			assert_eq!(message, "invalid request");
			assert_eq!(status, 400);
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn test_unexpected_status_maps_to_request_failed() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(503))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client
		.track(Event::new("site_1", "signup"))
		.await
		.unwrap_err();

	match err {
		Error::Api {
			code,
			message,
			status,
		} => {
			assert_eq!(code, ApiErrorCode::RequestFailed);
			assert_eq!(message, "request failed with status 503");
			assert_eq!(status, 503);
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

// ============================================================================
// Validation and Timeouts
// ============================================================================

#[tokio::test]
async fn test_validation_failure_issues_no_request() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let result = client.track(Event::new("", "signup")).await;

	assert!(matches!(
		result,
		Err(Error::Validation { field: "website_id" })
	));
	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_response_times_out_as_network_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
		.mount(&server)
		.await;

	let client = Client::builder()
		.api_key("ent_key_123")
		.host(server.uri())
		.timeout(Duration::from_millis(50))
		.build()
		.unwrap();

	let err = client
		.track(Event::new("site_1", "signup"))
		.await
		.unwrap_err();

	match err {
		Error::Network(NetworkError::Transport(cause)) => assert!(cause.is_timeout()),
		other => panic!("unexpected error: {other:?}"),
	}
}

// ============================================================================
// Dedicated Endpoints
// ============================================================================

#[tokio::test]
async fn test_track_vital_posts_flat_body_to_vitals_path() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/collect/vitals"))
		.and(header("Authorization", "Bearer ent_key_123"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let vital = WebVital {
		delta: Some(120.5),
		path: Some("/pricing".to_string()),
		..WebVital::new("site_1", VitalMetric::Lcp, 2480.0, VitalRating::Good)
	};
	client.track_vital(vital).await.unwrap();

	let body = only_request_body(&server).await;
	assert!(body.get("type").is_none());
	assert_eq!(body["website"], "site_1");
	assert_eq!(body["metric"], "LCP");
	assert_eq!(body["value"], 2480.0);
	assert_eq!(body["rating"], "good");
	assert_eq!(body["delta"], 120.5);
	assert_eq!(body["path"], "/pricing");
}

#[tokio::test]
async fn test_track_form_event_posts_flat_body_to_forms_path() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/collect/forms"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let event = FormEvent {
		success: Some(true),
		..FormEvent::new("site_1", "signup-form", FormEventType::Submit, "/signup")
	};
	client.track_form_event(event).await.unwrap();

	let body = only_request_body(&server).await;
	assert_eq!(body["website"], "site_1");
	assert_eq!(body["eventType"], "submit");
	assert_eq!(body["formId"], "signup-form");
	assert_eq!(body["urlPath"], "/signup");
	assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_set_deployment_posts_to_website_scoped_path() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/websites/site_1/deployments"))
		.respond_with(ResponseTemplate::new(201))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let deployment = Deployment {
		git_sha: Some("4f2a91c".to_string()),
		..Deployment::new("site_1", "deploy_01")
	};
	client.set_deployment(deployment).await.unwrap();

	let body = only_request_body(&server).await;
	assert_eq!(body["website"], "site_1");
	assert_eq!(body["deployId"], "deploy_01");
	assert_eq!(body["gitSha"], "4f2a91c");
}

#[tokio::test]
async fn test_classifier_applies_to_dedicated_endpoints() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/collect/vitals"))
		.respond_with(ResponseTemplate::new(401))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let vital = WebVital::new("site_1", VitalMetric::Cls, 0.02, VitalRating::Good);
	let err = client.track_vital(vital).await.unwrap_err();

	assert!(matches!(err, Error::Authentication));
}

// ============================================================================
// Legacy Collect Schema and Batching
// ============================================================================

fn collect_client(server: &MockServer) -> Client {
	Client::builder()
		.api_key("ent_key_123")
		.host(server.uri())
		.schema(WireSchema::collect())
		.build()
		.unwrap()
}

#[tokio::test]
async fn test_collect_schema_posts_flat_records_to_collect() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/collect"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = collect_client(&server);
	let event = Event {
		data: Properties::new().insert("plan", "growth"),
		user_id: Some("user_42".to_string()),
		session_id: Some("anon_7".to_string()),
		..Event::new("site_1", "upgrade")
	};
	client.track(event).await.unwrap();

	let body = only_request_body(&server).await;
	assert!(body.get("type").is_none());
	assert!(body.get("payload").is_none());
	assert_eq!(body["website_id"], "site_1");
	assert_eq!(body["event"], "upgrade");
	assert_eq!(body["properties"]["plan"], "growth");
	assert_eq!(body["userId"], "user_42");
	assert_eq!(body["anonymousId"], "anon_7");
	assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_collect_schema_batches_as_array() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/collect/batch"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = collect_client(&server);
	client
		.track_batch(vec![
			Event::new("site_1", "signup"),
			Event::new("site_1", "upgrade"),
		])
		.await
		.unwrap();

	let body = only_request_body(&server).await;
	let items = body.as_array().unwrap();
	assert_eq!(items.len(), 2);
	assert_eq!(items[0]["event"], "signup");
	assert_eq!(items[1]["event"], "upgrade");
	assert!(items[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_envelope_schema_batch_is_rejected_without_io() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let result = client.track_batch(vec![Event::new("site_1", "signup")]).await;

	assert!(matches!(result, Err(Error::BatchUnsupported)));
	assert!(server.received_requests().await.unwrap().is_empty());
}
