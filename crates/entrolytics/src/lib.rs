// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for the Entrolytics web analytics platform.
//!
//! This crate provides a client for reporting analytics data to the
//! Entrolytics collection API from server-side Rust applications: custom
//! events, page views, user identification, Core Web Vitals, form
//! interactions, and deployment markers. Each call performs a single POST
//! and returns a typed result; nothing is queued, buffered, or retried.
//!
//! # Quick Start
//!
//! ```ignore
//! use entrolytics::{Client, Event, PageView, Properties};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize the client
//!     let client = Client::new("ent_xxx")?;
//!
//!     // Track a custom event
//!     client
//!         .track(Event {
//!             data: Properties::new()
//!                 .insert("revenue", 99.99)
//!                 .insert("currency", "USD"),
//!             ..Event::new("abc123", "purchase")
//!         })
//!         .await?;
//!
//!     // Track a page view
//!     client
//!         .page_view(PageView {
//!             title: Some("Pricing".to_string()),
//!             ..PageView::new("abc123", "https://example.com/pricing")
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # End-User Context
//!
//! `user_agent` and `ip_address` on [`Event`] and [`PageView`] are forwarded
//! to the collection API as the `X-Forwarded-User-Agent` and
//! `X-Forwarded-For` request headers rather than in the JSON body, so the
//! service attributes geo and device data to the end user instead of the
//! reporting server.
//!
//! # Error Handling
//!
//! Every call returns success or exactly one [`Error`]. Validation failures
//! are caught before any network I/O; rate limiting surfaces the server's
//! `Retry-After` hint. The SDK never retries on its own, so the caller
//! decides whether to wait, resend, or drop the event.
//!
//! ```ignore
//! use entrolytics::Error;
//!
//! match client.track(event).await {
//!     Ok(()) => {}
//!     Err(Error::RateLimited { retry_after_secs }) => {
//!         tokio::time::sleep(std::time::Duration::from_secs(retry_after_secs)).await;
//!     }
//!     Err(e) => eprintln!("tracking failed: {e}"),
//! }
//! ```
//!
//! # Wire Schemas
//!
//! The collection API accepts two generations of the event schema. The
//! default wraps each submission in a `{type, payload}` envelope on
//! `/api/send`; the legacy [`WireSchema::collect`] schema posts flat records
//! to `/collect` and supports array batches. Both travel through the same
//! client; select one at construction time with
//! [`ClientBuilder::schema`].

mod client;
mod error;
mod payload;
mod response;
mod schema;

pub use client::{Client, ClientBuilder, DEFAULT_HOST, DEFAULT_TIMEOUT};
pub use error::{ApiErrorCode, Error, NetworkError, Result};
pub use schema::WireSchema;

// Re-export core types so callers only need this crate
pub use entrolytics_core::{
	Deployment, DeploymentSource, Event, FormEvent, FormEventType, Identify, NavigationType,
	PageView, Properties, UnknownDeploymentSource, UnknownFormEventType, UnknownVitalValue,
	VitalMetric, VitalRating, WebVital, PAGE_VIEW_EVENT,
};
