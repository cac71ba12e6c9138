// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Maps collection API responses onto the SDK error taxonomy.

use reqwest::header::HeaderMap;
use reqwest::Response;
use serde::Deserialize;
use tracing::{error, warn};

use crate::error::{ApiErrorCode, Error, Result};

/// Error body the API attaches to rejected submissions.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
	#[serde(default)]
	error: String,
}

/// Seconds the server asked us to back off; 0 when the header is absent or
/// not a plain number.
fn parse_retry_after(headers: &HeaderMap) -> u64 {
	headers
		.get("Retry-After")
		.and_then(|v| v.to_str().ok())
		.and_then(|s| s.parse().ok())
		.unwrap_or(0)
}

/// Applies the status-code decision table to a completed exchange.
///
/// The body is read on every path so the pooled connection stays reusable;
/// on the 400 path its content is parsed best-effort and a malformed body
/// falls back to the generic bad-request error.
pub(crate) async fn classify(response: Response) -> Result<()> {
	let status = response.status().as_u16();
	match status {
		200 | 201 => {
			let _ = response.bytes().await;
			Ok(())
		}
		401 => {
			let _ = response.bytes().await;
			Err(Error::Authentication)
		}
		400 => {
			let bytes = response.bytes().await.unwrap_or_default();
			match serde_json::from_slice::<ApiErrorBody>(&bytes) {
				Ok(body) if !body.error.is_empty() => Err(Error::Api {
					code: ApiErrorCode::ValidationError,
					message: body.error,
					status,
				}),
				_ => {
					warn!("400 response carried no usable error message");
					Err(Error::Api {
						code: ApiErrorCode::BadRequest,
						message: "invalid request".to_string(),
						status,
					})
				}
			}
		}
		429 => {
			let retry_after_secs = parse_retry_after(response.headers());
			let _ = response.bytes().await;
			Err(Error::RateLimited { retry_after_secs })
		}
		_ => {
			let _ = response.bytes().await;
			error!(status, "collection request failed");
			Err(Error::Api {
				code: ApiErrorCode::RequestFailed,
				message: format!("request failed with status {status}"),
				status,
			})
		}
	}
}
