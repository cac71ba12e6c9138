// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire-schema parameterization for the primary event flow.
//!
//! The collection API accepts two generations of the event schema: the
//! current one, which wraps each submission in a `{type, payload}` envelope
//! on `/api/send`, and the legacy flat one on `/collect`, which uses
//! different field names and supports array batches on `/collect/batch`.
//! Both travel through the same transport; only the field naming and the
//! paths differ, so the difference is expressed as data rather than as a
//! second client.

/// Field naming and routing for event submissions.
///
/// Select one with [`ClientBuilder::schema`](crate::ClientBuilder::schema);
/// the default is [`WireSchema::envelope`]. Vitals, form events, and
/// deployments have fixed endpoints and are unaffected by the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireSchema {
	pub(crate) send_path: String,
	pub(crate) batch_path: Option<&'static str>,
	pub(crate) envelope: bool,
	pub(crate) website_field: &'static str,
	pub(crate) name_field: &'static str,
	pub(crate) data_field: &'static str,
	pub(crate) user_id_field: &'static str,
	pub(crate) session_id_field: &'static str,
}

impl WireSchema {
	/// The current ingestion schema: `{type, payload}` envelopes on
	/// `/api/send`. Batch submission is not available.
	pub fn envelope() -> Self {
		Self {
			send_path: "/api/send".to_string(),
			batch_path: None,
			envelope: true,
			website_field: "website",
			name_field: "name",
			data_field: "data",
			user_id_field: "userId",
			session_id_field: "sessionId",
		}
	}

	/// The legacy flat collection schema: bare records on `/collect`,
	/// array batches on `/collect/batch`.
	pub fn collect() -> Self {
		Self {
			send_path: "/collect".to_string(),
			batch_path: Some("/collect/batch"),
			envelope: false,
			website_field: "website_id",
			name_field: "event",
			data_field: "properties",
			user_id_field: "userId",
			session_id_field: "anonymousId",
		}
	}

	/// Overrides the path single submissions are posted to, keeping the
	/// schema's field naming.
	pub fn with_send_path(mut self, path: impl Into<String>) -> Self {
		self.send_path = path.into();
		self
	}

	/// Path single submissions are posted to.
	pub fn send_path(&self) -> &str {
		&self.send_path
	}

	/// Path batches are posted to, if the schema defines one.
	pub fn batch_path(&self) -> Option<&str> {
		self.batch_path
	}

	/// Whether submissions are wrapped in a `{type, payload}` envelope.
	pub fn is_envelope(&self) -> bool {
		self.envelope
	}
}

impl Default for WireSchema {
	fn default() -> Self {
		Self::envelope()
	}
}
