// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core record and wire types for the Entrolytics analytics SDK.
//!
//! This crate holds the data the client crate puts on the wire: the records a
//! caller fills in (`Event`, `PageView`, `Identify`, `WebVital`, `FormEvent`,
//! `Deployment`), the enumerations whose string values are fixed by the
//! collection API, and the [`Properties`] map used for free-form JSON data.
//! It performs no I/O.

mod deployment;
mod event;
mod form;
mod properties;
mod vital;

pub use deployment::{Deployment, DeploymentSource, UnknownDeploymentSource};
pub use event::{Event, Identify, PageView, PAGE_VIEW_EVENT};
pub use form::{FormEvent, FormEventType, UnknownFormEventType};
pub use properties::Properties;
pub use vital::{NavigationType, UnknownVitalValue, VitalMetric, VitalRating, WebVital};
