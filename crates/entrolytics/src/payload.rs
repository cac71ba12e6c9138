// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound body construction for the collection API.
//!
//! The event flow builds its bodies dynamically because the field names vary
//! with the configured [`WireSchema`]; vitals, form events, and deployments
//! have fixed shapes and use plain serde structs. All timestamps are
//! rendered as RFC3339 strings, defaulting to the invocation time, and are
//! always present on event bodies. Optional fields and empty maps are
//! omitted from the JSON entirely.

use chrono::{DateTime, SecondsFormat, Utc};
use entrolytics_core::{
	Deployment, DeploymentSource, Event, FormEvent, FormEventType, Identify, NavigationType,
	Properties, VitalMetric, VitalRating, WebVital,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::schema::WireSchema;

/// Renders a timestamp the way the collection API expects it.
pub(crate) fn rfc3339(ts: DateTime<Utc>) -> String {
	ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn put_opt(map: &mut Map<String, Value>, key: &str, value: Option<String>) {
	if let Some(v) = value {
		if !v.is_empty() {
			map.insert(key.to_string(), Value::String(v));
		}
	}
}

fn wrap(schema: &WireSchema, kind: &str, payload: Map<String, Value>) -> Value {
	if schema.envelope {
		let mut envelope = Map::new();
		envelope.insert("type".to_string(), Value::String(kind.to_string()));
		envelope.insert("payload".to_string(), Value::Object(payload));
		Value::Object(envelope)
	} else {
		Value::Object(payload)
	}
}

/// Builds the wire body for one event under the given schema.
///
/// `user_agent` and `ip_address` are deliberately not read here; they
/// travel as request headers.
pub(crate) fn event_body(schema: &WireSchema, event: Event) -> Value {
	let mut payload = Map::new();
	payload.insert(
		schema.website_field.to_string(),
		Value::String(event.website_id),
	);
	payload.insert(schema.name_field.to_string(), Value::String(event.name));
	if !event.data.is_empty() {
		payload.insert(schema.data_field.to_string(), event.data.into_value());
	}
	put_opt(&mut payload, "url", event.url);
	put_opt(&mut payload, "referrer", event.referrer);
	put_opt(&mut payload, schema.user_id_field, event.user_id);
	put_opt(&mut payload, schema.session_id_field, event.session_id);
	payload.insert(
		"timestamp".to_string(),
		Value::String(rfc3339(event.timestamp.unwrap_or_else(Utc::now))),
	);

	wrap(schema, "event", payload)
}

/// Builds the wire body for an identify submission under the given schema.
///
/// The legacy flat schema has no submission type on the wire, so identify
/// travels there as an event named `identify` with the traits in the data
/// field.
pub(crate) fn identify_body(schema: &WireSchema, identify: Identify) -> Value {
	let mut payload = Map::new();
	payload.insert(
		schema.website_field.to_string(),
		Value::String(identify.website_id),
	);
	if !schema.envelope {
		payload.insert(
			schema.name_field.to_string(),
			Value::String("identify".to_string()),
		);
	}
	payload.insert(
		schema.user_id_field.to_string(),
		Value::String(identify.user_id),
	);
	if !identify.traits.is_empty() {
		let key = if schema.envelope {
			"traits"
		} else {
			schema.data_field
		};
		payload.insert(key.to_string(), identify.traits.into_value());
	}
	payload.insert(
		"timestamp".to_string(),
		Value::String(rfc3339(identify.timestamp.unwrap_or_else(Utc::now))),
	);

	wrap(schema, "identify", payload)
}

/// Wire body for a web-vital submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VitalBody {
	website: String,
	metric: VitalMetric,
	value: f64,
	rating: VitalRating,
	#[serde(skip_serializing_if = "Option::is_none")]
	delta: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	navigation_type: Option<NavigationType>,
	#[serde(skip_serializing_if = "Properties::is_empty")]
	attribution: Properties,
	#[serde(skip_serializing_if = "Option::is_none")]
	url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	session_id: Option<String>,
}

impl From<WebVital> for VitalBody {
	fn from(vital: WebVital) -> Self {
		Self {
			website: vital.website_id,
			metric: vital.metric,
			value: vital.value,
			rating: vital.rating,
			delta: vital.delta,
			id: vital.id,
			navigation_type: vital.navigation_type,
			attribution: vital.attribution,
			url: vital.url,
			path: vital.path,
			session_id: vital.session_id,
		}
	}
}

/// Wire body for a form-interaction submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FormEventBody {
	website: String,
	event_type: FormEventType,
	form_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	form_name: Option<String>,
	url_path: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	field_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	field_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	field_index: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	time_on_field: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	time_since_start: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error_message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	success: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	session_id: Option<String>,
}

impl From<FormEvent> for FormEventBody {
	fn from(event: FormEvent) -> Self {
		Self {
			website: event.website_id,
			event_type: event.event_type,
			form_id: event.form_id,
			form_name: event.form_name,
			url_path: event.url_path,
			field_name: event.field_name,
			field_type: event.field_type,
			field_index: event.field_index,
			time_on_field: event.time_on_field_ms,
			time_since_start: event.time_since_start_ms,
			error_message: event.error_message,
			success: event.success,
			session_id: event.session_id,
		}
	}
}

/// Wire body for a deployment marker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeploymentBody {
	website: String,
	deploy_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	git_sha: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	git_branch: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	deploy_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	source: Option<DeploymentSource>,
}

impl From<Deployment> for DeploymentBody {
	fn from(deployment: Deployment) -> Self {
		Self {
			website: deployment.website_id,
			deploy_id: deployment.deploy_id,
			git_sha: deployment.git_sha,
			git_branch: deployment.git_branch,
			deploy_url: deployment.deploy_url,
			source: deployment.source,
		}
	}
}
