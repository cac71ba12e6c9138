// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core Web Vital records and their wire enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::properties::Properties;

/// Error returned when a string does not name a known vital wire value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vital wire value: {0}")]
pub struct UnknownVitalValue(pub String);

/// Browser performance metric being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VitalMetric {
	/// Largest Contentful Paint.
	Lcp,
	/// Interaction to Next Paint.
	Inp,
	/// Cumulative Layout Shift.
	Cls,
	/// Time to First Byte.
	Ttfb,
	/// First Contentful Paint.
	Fcp,
}

impl VitalMetric {
	/// Returns the wire representation of the metric.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Lcp => "LCP",
			Self::Inp => "INP",
			Self::Cls => "CLS",
			Self::Ttfb => "TTFB",
			Self::Fcp => "FCP",
		}
	}
}

impl fmt::Display for VitalMetric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for VitalMetric {
	type Err = UnknownVitalValue;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"LCP" => Ok(Self::Lcp),
			"INP" => Ok(Self::Inp),
			"CLS" => Ok(Self::Cls),
			"TTFB" => Ok(Self::Ttfb),
			"FCP" => Ok(Self::Fcp),
			other => Err(UnknownVitalValue(other.to_string())),
		}
	}
}

/// Threshold bucket assigned to a measurement by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalRating {
	/// Within the good threshold.
	Good,
	/// Between the good and poor thresholds.
	NeedsImprovement,
	/// Beyond the poor threshold.
	Poor,
}

impl VitalRating {
	/// Returns the wire representation of the rating.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Good => "good",
			Self::NeedsImprovement => "needs-improvement",
			Self::Poor => "poor",
		}
	}
}

impl fmt::Display for VitalRating {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for VitalRating {
	type Err = UnknownVitalValue;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"good" => Ok(Self::Good),
			"needs-improvement" => Ok(Self::NeedsImprovement),
			"poor" => Ok(Self::Poor),
			other => Err(UnknownVitalValue(other.to_string())),
		}
	}
}

/// How the browser arrived at the page that produced the measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationType {
	/// Ordinary navigation.
	Navigate,
	/// Page reload.
	Reload,
	/// History traversal.
	BackForward,
	/// Restored from the back/forward cache.
	BackForwardCache,
	/// Prerendered page activation.
	Prerender,
	/// Session restore.
	Restore,
}

impl NavigationType {
	/// Returns the wire representation of the navigation type.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Navigate => "navigate",
			Self::Reload => "reload",
			Self::BackForward => "back-forward",
			Self::BackForwardCache => "back-forward-cache",
			Self::Prerender => "prerender",
			Self::Restore => "restore",
		}
	}
}

impl fmt::Display for NavigationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NavigationType {
	type Err = UnknownVitalValue;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"navigate" => Ok(Self::Navigate),
			"reload" => Ok(Self::Reload),
			"back-forward" => Ok(Self::BackForward),
			"back-forward-cache" => Ok(Self::BackForwardCache),
			"prerender" => Ok(Self::Prerender),
			"restore" => Ok(Self::Restore),
			other => Err(UnknownVitalValue(other.to_string())),
		}
	}
}

/// A Core Web Vital measurement reported for a page.
///
/// `website_id`, `metric`, `value`, and `rating` are required; the rest is
/// optional attribution context.
#[derive(Debug, Clone)]
pub struct WebVital {
	/// Tenant/site identifier for the customer property. Required.
	pub website_id: String,
	/// Metric being reported.
	pub metric: VitalMetric,
	/// Measured value, in the metric's native unit.
	pub value: f64,
	/// Threshold bucket for the value.
	pub rating: VitalRating,
	/// Change since the last report of this metric.
	pub delta: Option<f64>,
	/// Browser-generated measurement identifier.
	pub id: Option<String>,
	/// Navigation type of the page load.
	pub navigation_type: Option<NavigationType>,
	/// Attribution detail (element selectors, timings) from the browser.
	pub attribution: Properties,
	/// URL of the measured page.
	pub url: Option<String>,
	/// Path of the measured page.
	pub path: Option<String>,
	/// Session identifier.
	pub session_id: Option<String>,
}

impl WebVital {
	/// Creates a measurement with the required fields set.
	pub fn new(
		website_id: impl Into<String>,
		metric: VitalMetric,
		value: f64,
		rating: VitalRating,
	) -> Self {
		Self {
			website_id: website_id.into(),
			metric,
			value,
			rating,
			delta: None,
			id: None,
			navigation_type: None,
			attribution: Properties::new(),
			url: None,
			path: None,
			session_id: None,
		}
	}
}
