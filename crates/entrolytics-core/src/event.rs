// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Records for the primary event flow: custom events, page views, and
//! user identification.

use chrono::{DateTime, Utc};

use crate::properties::Properties;

/// Reserved event name used for page-view submissions.
///
/// The collection API treats this marker specially; custom event names must
/// not collide with it.
pub const PAGE_VIEW_EVENT: &str = "$pageview";

/// A custom analytics event.
///
/// `website_id` and `name` are required; everything else is optional
/// context. `user_agent` and `ip_address` are forwarded to the collection
/// API as request headers, never inside the JSON body, so the service can
/// attribute geo/device data without trusting the raw TCP peer.
///
/// # Example
///
/// ```
/// use entrolytics_core::{Event, Properties};
///
/// let event = Event {
///     data: Properties::new().insert("plan", "growth"),
///     user_id: Some("user_42".to_string()),
///     ..Event::new("site_1", "upgrade")
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct Event {
	/// Tenant/site identifier for the customer property. Required.
	pub website_id: String,
	/// Event name. Required.
	pub name: String,
	/// Free-form event data.
	pub data: Properties,
	/// Page URL the event occurred on.
	pub url: Option<String>,
	/// Referrer URL.
	pub referrer: Option<String>,
	/// Identifier of the user who triggered the event.
	pub user_id: Option<String>,
	/// Session identifier.
	pub session_id: Option<String>,
	/// End-user agent string, forwarded as `X-Forwarded-User-Agent`.
	pub user_agent: Option<String>,
	/// End-user IP address, forwarded as `X-Forwarded-For`.
	pub ip_address: Option<String>,
	/// Event time; the current UTC instant is used when unset.
	pub timestamp: Option<DateTime<Utc>>,
}

impl Event {
	/// Creates an event with the required fields set.
	pub fn new(website_id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			website_id: website_id.into(),
			name: name.into(),
			..Self::default()
		}
	}
}

/// A page-view submission.
///
/// Page views are ordinary events whose name is fixed to
/// [`PAGE_VIEW_EVENT`]; `website_id` and `url` are required.
#[derive(Debug, Clone, Default)]
pub struct PageView {
	/// Tenant/site identifier for the customer property. Required.
	pub website_id: String,
	/// URL of the viewed page. Required.
	pub url: String,
	/// Page title; folded into the event data only when non-empty.
	pub title: Option<String>,
	/// Referrer URL.
	pub referrer: Option<String>,
	/// Identifier of the viewing user.
	pub user_id: Option<String>,
	/// Session identifier.
	pub session_id: Option<String>,
	/// End-user agent string, forwarded as `X-Forwarded-User-Agent`.
	pub user_agent: Option<String>,
	/// End-user IP address, forwarded as `X-Forwarded-For`.
	pub ip_address: Option<String>,
	/// View time; the current UTC instant is used when unset.
	pub timestamp: Option<DateTime<Utc>>,
}

impl PageView {
	/// Creates a page view with the required fields set.
	pub fn new(website_id: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			website_id: website_id.into(),
			url: url.into(),
			..Self::default()
		}
	}

	/// Converts the page view into the event submitted on the wire.
	///
	/// The event name becomes [`PAGE_VIEW_EVENT`] and a non-empty `title`
	/// lands in the data map under the key `"title"`.
	pub fn into_event(self) -> Event {
		let mut data = Properties::new();
		if let Some(title) = self.title.filter(|t| !t.is_empty()) {
			data = data.insert("title", title);
		}

		Event {
			website_id: self.website_id,
			name: PAGE_VIEW_EVENT.to_string(),
			data,
			url: Some(self.url),
			referrer: self.referrer,
			user_id: self.user_id,
			session_id: self.session_id,
			user_agent: self.user_agent,
			ip_address: self.ip_address,
			timestamp: self.timestamp,
		}
	}
}

/// Associates traits with a user.
///
/// `website_id` and `user_id` are required.
#[derive(Debug, Clone, Default)]
pub struct Identify {
	/// Tenant/site identifier for the customer property. Required.
	pub website_id: String,
	/// Identifier of the user being described. Required.
	pub user_id: String,
	/// Traits to associate with the user.
	pub traits: Properties,
	/// Submission time; the current UTC instant is used when unset.
	pub timestamp: Option<DateTime<Utc>>,
}

impl Identify {
	/// Creates an identify submission with the required fields set.
	pub fn new(website_id: impl Into<String>, user_id: impl Into<String>) -> Self {
		Self {
			website_id: website_id.into(),
			user_id: user_id.into(),
			..Self::default()
		}
	}
}
