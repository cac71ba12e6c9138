// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Entrolytics SDK.

use std::fmt;

use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Machine-readable code carried by [`Error::Api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
	/// The server rejected the submission content.
	ValidationError,
	/// The server could not interpret the request at all.
	BadRequest,
	/// Catch-all for unexpected response statuses.
	RequestFailed,
}

impl ApiErrorCode {
	/// Returns the wire representation of the code.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::ValidationError => "validation_error",
			Self::BadRequest => "bad_request",
			Self::RequestFailed => "request_failed",
		}
	}
}

impl fmt::Display for ApiErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors returned by the tracking client.
///
/// Every call either succeeds or returns exactly one of these; there is no
/// partial success. `Validation` and `BatchUnsupported` are produced before
/// any network I/O.
#[derive(Debug, Error)]
pub enum Error {
	/// A required field was missing or empty.
	#[error("{field} is required")]
	Validation {
		/// Name of the missing field.
		field: &'static str,
	},

	/// The server rejected the API key (HTTP 401).
	#[error("invalid or missing API key")]
	Authentication,

	/// The server rate limited the request (HTTP 429).
	#[error("rate limited, retry after {retry_after_secs} seconds")]
	RateLimited {
		/// Seconds to wait before retrying; 0 when the server gave no
		/// usable hint.
		retry_after_secs: u64,
	},

	/// The server returned a failure response.
	#[error("{code}: {message} (status {status})")]
	Api {
		/// Machine-readable error code.
		code: ApiErrorCode,
		/// Message from the server, or a fixed fallback.
		message: String,
		/// HTTP status of the response.
		status: u16,
	},

	/// The exchange never completed.
	#[error("network error: {0}")]
	Network(#[from] NetworkError),

	/// The configured wire schema defines no batch endpoint.
	#[error("the configured wire schema does not support batch submission")]
	BatchUnsupported,
}

/// Cause of a [`Error::Network`]: the transport or the payload
/// serialization, never the server's verdict on a delivered request.
#[derive(Debug, Error)]
pub enum NetworkError {
	/// DNS, connect, TLS, timeout, or cancellation failure.
	#[error(transparent)]
	Transport(#[from] reqwest::Error),

	/// The payload could not be serialized to JSON.
	#[error("failed to serialize payload: {0}")]
	Serialize(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		Error::Network(NetworkError::Transport(err))
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Network(NetworkError::Serialize(err))
	}
}
