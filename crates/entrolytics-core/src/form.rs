// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Form-interaction records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known form event type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form event type: {0}")]
pub struct UnknownFormEventType(pub String);

/// Stage of a form interaction being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormEventType {
	/// The user began interacting with the form.
	Start,
	/// A field gained focus.
	FieldFocus,
	/// A field lost focus.
	FieldBlur,
	/// A field failed validation.
	FieldError,
	/// The form was submitted.
	Submit,
	/// The user left without submitting.
	Abandon,
}

impl FormEventType {
	/// Returns the wire representation of the event type.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Start => "start",
			Self::FieldFocus => "field_focus",
			Self::FieldBlur => "field_blur",
			Self::FieldError => "field_error",
			Self::Submit => "submit",
			Self::Abandon => "abandon",
		}
	}
}

impl fmt::Display for FormEventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FormEventType {
	type Err = UnknownFormEventType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"start" => Ok(Self::Start),
			"field_focus" => Ok(Self::FieldFocus),
			"field_blur" => Ok(Self::FieldBlur),
			"field_error" => Ok(Self::FieldError),
			"submit" => Ok(Self::Submit),
			"abandon" => Ok(Self::Abandon),
			other => Err(UnknownFormEventType(other.to_string())),
		}
	}
}

/// A form-interaction event.
///
/// `website_id`, `form_id`, `event_type`, and `url_path` are required; the
/// field-level and timing detail is optional.
#[derive(Debug, Clone)]
pub struct FormEvent {
	/// Tenant/site identifier for the customer property. Required.
	pub website_id: String,
	/// Identifier of the form. Required.
	pub form_id: String,
	/// Interaction stage being reported.
	pub event_type: FormEventType,
	/// Path of the page hosting the form. Required.
	pub url_path: String,
	/// Human-readable form name.
	pub form_name: Option<String>,
	/// Name of the field involved, for field-level events.
	pub field_name: Option<String>,
	/// Input type of the field involved.
	pub field_type: Option<String>,
	/// Zero-based position of the field in the form.
	pub field_index: Option<u32>,
	/// Milliseconds spent on the field.
	pub time_on_field_ms: Option<u64>,
	/// Milliseconds since the form interaction started.
	pub time_since_start_ms: Option<u64>,
	/// Validation message, for `field_error` events.
	pub error_message: Option<String>,
	/// Whether a `submit` succeeded.
	pub success: Option<bool>,
	/// Session identifier.
	pub session_id: Option<String>,
}

impl FormEvent {
	/// Creates a form event with the required fields set.
	pub fn new(
		website_id: impl Into<String>,
		form_id: impl Into<String>,
		event_type: FormEventType,
		url_path: impl Into<String>,
	) -> Self {
		Self {
			website_id: website_id.into(),
			form_id: form_id.into(),
			event_type,
			url_path: url_path.into(),
			form_name: None,
			field_name: None,
			field_type: None,
			field_index: None,
			time_on_field_ms: None,
			time_since_start_ms: None,
			error_message: None,
			success: None,
			session_id: None,
		}
	}
}
