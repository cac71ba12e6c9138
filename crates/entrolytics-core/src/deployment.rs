// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deployment marker records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known deployment source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown deployment source: {0}")]
pub struct UnknownDeploymentSource(pub String);

/// Platform a deployment originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentSource {
	Vercel,
	Netlify,
	Cloudflare,
	Railway,
	Render,
	Fly,
	Heroku,
	Aws,
	Gcp,
	Azure,
	/// Self-managed or unlisted platform.
	Custom,
}

impl DeploymentSource {
	/// Returns the wire representation of the source.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Vercel => "vercel",
			Self::Netlify => "netlify",
			Self::Cloudflare => "cloudflare",
			Self::Railway => "railway",
			Self::Render => "render",
			Self::Fly => "fly",
			Self::Heroku => "heroku",
			Self::Aws => "aws",
			Self::Gcp => "gcp",
			Self::Azure => "azure",
			Self::Custom => "custom",
		}
	}
}

impl fmt::Display for DeploymentSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for DeploymentSource {
	type Err = UnknownDeploymentSource;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"vercel" => Ok(Self::Vercel),
			"netlify" => Ok(Self::Netlify),
			"cloudflare" => Ok(Self::Cloudflare),
			"railway" => Ok(Self::Railway),
			"render" => Ok(Self::Render),
			"fly" => Ok(Self::Fly),
			"heroku" => Ok(Self::Heroku),
			"aws" => Ok(Self::Aws),
			"gcp" => Ok(Self::Gcp),
			"azure" => Ok(Self::Azure),
			"custom" => Ok(Self::Custom),
			other => Err(UnknownDeploymentSource(other.to_string())),
		}
	}
}

/// A deployment marker for a website.
///
/// Deployments annotate analytics timelines so traffic changes can be
/// correlated with releases. `website_id` and `deploy_id` are required.
#[derive(Debug, Clone, Default)]
pub struct Deployment {
	/// Tenant/site identifier for the customer property. Required.
	pub website_id: String,
	/// Unique identifier of the deployment. Required.
	pub deploy_id: String,
	/// Git commit SHA that was deployed.
	pub git_sha: Option<String>,
	/// Git branch that was deployed.
	pub git_branch: Option<String>,
	/// URL the deployment is reachable at.
	pub deploy_url: Option<String>,
	/// Platform the deployment came from.
	pub source: Option<DeploymentSource>,
}

impl Deployment {
	/// Creates a deployment marker with the required fields set.
	pub fn new(website_id: impl Into<String>, deploy_id: impl Into<String>) -> Self {
		Self {
			website_id: website_id.into(),
			deploy_id: deploy_id.into(),
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_source_wire_values() {
		assert_eq!(DeploymentSource::Vercel.as_str(), "vercel");
		assert_eq!(DeploymentSource::Aws.as_str(), "aws");
		assert_eq!(DeploymentSource::Custom.as_str(), "custom");

		let json = serde_json::to_string(&DeploymentSource::Cloudflare).unwrap();
		assert_eq!(json, "\"cloudflare\"");
	}

	#[test]
	fn test_source_parse_roundtrip() {
		for source in [
			DeploymentSource::Vercel,
			DeploymentSource::Netlify,
			DeploymentSource::Cloudflare,
			DeploymentSource::Railway,
			DeploymentSource::Render,
			DeploymentSource::Fly,
			DeploymentSource::Heroku,
			DeploymentSource::Aws,
			DeploymentSource::Gcp,
			DeploymentSource::Azure,
			DeploymentSource::Custom,
		] {
			assert_eq!(source.to_string().parse(), Ok(source));
		}

		assert_eq!(
			"digitalocean".parse::<DeploymentSource>(),
			Err(UnknownDeploymentSource("digitalocean".to_string()))
		);
	}

	#[test]
	fn test_new_leaves_detail_unset() {
		let deployment = Deployment::new("site_1", "deploy_20250814_01");

		assert_eq!(deployment.deploy_id, "deploy_20250814_01");
		assert!(deployment.git_sha.is_none());
		assert!(deployment.source.is_none());
	}
}
