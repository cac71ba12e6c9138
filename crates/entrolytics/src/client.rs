// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entrolytics tracking client.

use std::sync::Arc;
use std::time::Duration;

use entrolytics_core::{Deployment, Event, FormEvent, Identify, PageView, WebVital};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::payload::{self, DeploymentBody, FormEventBody, VitalBody};
use crate::response;
use crate::schema::WireSchema;

/// Default Entrolytics API host.
pub const DEFAULT_HOST: &str = "https://entrolytics.click";
/// Default timeout applied to each request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// SDK name for identification.
const SDK_NAME: &str = "entrolytics-rust";
/// SDK version for identification.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const VITALS_PATH: &str = "/api/collect/vitals";
const FORMS_PATH: &str = "/api/collect/forms";

fn require(field: &'static str, value: &str) -> Result<()> {
	if value.is_empty() {
		return Err(Error::Validation { field });
	}
	Ok(())
}

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
	api_key: Option<String>,
	host: Option<String>,
	timeout: Duration,
	user_agent: Option<String>,
	schema: WireSchema,
}

impl ClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			api_key: None,
			host: None,
			timeout: DEFAULT_TIMEOUT,
			user_agent: None,
			schema: WireSchema::envelope(),
		}
	}

	/// Sets the API key used for bearer authentication. Required.
	pub fn api_key(mut self, key: impl Into<String>) -> Self {
		self.api_key = Some(key.into());
		self
	}

	/// Sets the API host.
	///
	/// Defaults to the production host; a trailing `/` is stripped.
	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());
		self
	}

	/// Sets the per-request timeout. Defaults to 10 seconds.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Overrides the `User-Agent` header sent with each request.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	/// Selects the wire schema for the event flow.
	pub fn schema(mut self, schema: WireSchema) -> Self {
		self.schema = schema;
		self
	}

	/// Overrides the path events are posted to, keeping the schema's
	/// field naming.
	pub fn send_path(mut self, path: impl Into<String>) -> Self {
		self.schema = self.schema.with_send_path(path);
		self
	}

	/// Builds the client.
	pub fn build(self) -> Result<Client> {
		let api_key = self
			.api_key
			.filter(|key| !key.is_empty())
			.ok_or(Error::Validation { field: "api_key" })?;

		let host = self
			.host
			.unwrap_or_else(|| DEFAULT_HOST.to_string())
			.trim_end_matches('/')
			.to_string();

		let user_agent = self
			.user_agent
			.filter(|ua| !ua.is_empty())
			.unwrap_or_else(|| format!("{SDK_NAME}/{SDK_VERSION}"));

		let http = reqwest::Client::builder()
			.user_agent(user_agent)
			.timeout(self.timeout)
			.build()?;

		info!(host = %host, sdk_name = SDK_NAME, sdk_version = SDK_VERSION, "Entrolytics client initialized");

		Ok(Client {
			inner: Arc::new(ClientInner {
				api_key,
				host,
				schema: self.schema,
				http,
			}),
		})
	}
}

impl Default for ClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Internal client state, shared across clones.
struct ClientInner {
	api_key: String,
	host: String,
	schema: WireSchema,
	http: reqwest::Client,
}

/// Client for reporting analytics events to the Entrolytics collection API.
///
/// The client holds read-only configuration and a pooled HTTP transport, so
/// cloning is cheap and calls may be issued concurrently from any number of
/// tasks. Nothing is queued or retried: each call performs exactly one POST
/// and maps the response to a typed result. Dropping an in-flight call's
/// future aborts the request; the configured timeout surfaces as
/// [`Error::Network`].
///
/// # Example
///
/// ```ignore
/// use entrolytics::{Client, Event, Properties};
///
/// let client = Client::new("api_key_from_dashboard")?;
///
/// client
///     .track(Event {
///         data: Properties::new().insert("plan", "growth"),
///         ..Event::new("site_1", "upgrade")
///     })
///     .await?;
/// ```
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}

impl Client {
	/// Creates a client for the production host with default settings.
	pub fn new(api_key: impl Into<String>) -> Result<Self> {
		Self::builder().api_key(api_key).build()
	}

	/// Creates a new builder for constructing a client.
	pub fn builder() -> ClientBuilder {
		ClientBuilder::new()
	}

	/// Reports a custom event.
	///
	/// `user_agent` and `ip_address` on the record travel as the
	/// `X-Forwarded-User-Agent` / `X-Forwarded-For` headers, never in the
	/// JSON body.
	pub async fn track(&self, event: Event) -> Result<()> {
		require("website_id", &event.website_id)?;
		require("name", &event.name)?;

		self.send_event(event).await
	}

	/// Reports a page view.
	///
	/// The submitted event name is the reserved `$pageview` marker; a
	/// non-empty `title` is folded into the event data.
	pub async fn page_view(&self, page_view: PageView) -> Result<()> {
		require("website_id", &page_view.website_id)?;
		require("url", &page_view.url)?;

		self.send_event(page_view.into_event()).await
	}

	/// Associates traits with a user.
	pub async fn identify(&self, identify: Identify) -> Result<()> {
		require("website_id", &identify.website_id)?;
		require("user_id", &identify.user_id)?;

		let body = payload::identify_body(&self.inner.schema, identify);
		self.send_to_endpoint(&self.inner.schema.send_path, &body, None, None)
			.await
	}

	/// Reports a Core Web Vital measurement.
	pub async fn track_vital(&self, vital: WebVital) -> Result<()> {
		require("website_id", &vital.website_id)?;

		let body = VitalBody::from(vital);
		self.send_to_endpoint(VITALS_PATH, &body, None, None).await
	}

	/// Reports a form-interaction event.
	pub async fn track_form_event(&self, event: FormEvent) -> Result<()> {
		require("website_id", &event.website_id)?;
		require("form_id", &event.form_id)?;
		require("url_path", &event.url_path)?;

		let body = FormEventBody::from(event);
		self.send_to_endpoint(FORMS_PATH, &body, None, None).await
	}

	/// Registers a deployment marker for a website.
	pub async fn set_deployment(&self, deployment: Deployment) -> Result<()> {
		require("website_id", &deployment.website_id)?;
		require("deploy_id", &deployment.deploy_id)?;

		let path = format!("/api/websites/{}/deployments", deployment.website_id);
		let body = DeploymentBody::from(deployment);
		self.send_to_endpoint(&path, &body, None, None).await
	}

	/// Submits multiple events in one request.
	///
	/// Requires a schema with a batch endpoint, such as
	/// [`WireSchema::collect`]; otherwise [`Error::BatchUnsupported`] is
	/// returned before any I/O. An empty slice succeeds without issuing a
	/// request. Per-event forwarding context is not sent for batches.
	pub async fn track_batch(&self, events: Vec<Event>) -> Result<()> {
		if events.is_empty() {
			return Ok(());
		}

		let batch_path = match self.inner.schema.batch_path {
			Some(path) => path,
			None => return Err(Error::BatchUnsupported),
		};

		let mut bodies = Vec::with_capacity(events.len());
		for mut event in events {
			require("website_id", &event.website_id)?;
			require("name", &event.name)?;
			event.user_agent.take();
			event.ip_address.take();
			bodies.push(payload::event_body(&self.inner.schema, event));
		}

		self.send_to_endpoint(batch_path, &Value::Array(bodies), None, None)
			.await
	}

	/// Builds the event body and forwards the end-user context as headers.
	async fn send_event(&self, mut event: Event) -> Result<()> {
		let user_agent = event.user_agent.take();
		let ip_address = event.ip_address.take();

		let body = payload::event_body(&self.inner.schema, event);
		self.send_to_endpoint(
			&self.inner.schema.send_path,
			&body,
			user_agent.as_deref(),
			ip_address.as_deref(),
		)
		.await
	}

	/// Serializes `body`, posts it to `host + path`, and classifies the
	/// response. The single exchange path shared by every operation.
	async fn send_to_endpoint<T>(
		&self,
		path: &str,
		body: &T,
		user_agent: Option<&str>,
		ip_address: Option<&str>,
	) -> Result<()>
	where
		T: Serialize + ?Sized,
	{
		let bytes = serde_json::to_vec(body)?;
		let url = format!("{}{}", self.inner.host, path);

		debug!(url = %url, "Posting analytics payload");

		let mut request = self
			.inner
			.http
			.post(&url)
			.header("Authorization", format!("Bearer {}", self.inner.api_key))
			.header("Content-Type", "application/json")
			.body(bytes);

		if let Some(ua) = user_agent.filter(|ua| !ua.is_empty()) {
			request = request.header("X-Forwarded-User-Agent", ua);
		}
		if let Some(ip) = ip_address.filter(|ip| !ip.is_empty()) {
			request = request.header("X-Forwarded-For", ip);
		}

		let response = request.send().await?;
		response::classify(response).await
	}
}
