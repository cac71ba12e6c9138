// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helper for building free-form JSON maps.
//!
//! Event `data`, identify `traits`, and vital `attribution` are all maps from
//! string keys to arbitrary JSON values. [`Properties`] wraps that shape with
//! a chainable builder so callers do not have to assemble `serde_json` maps
//! by hand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A builder for free-form event data, user traits, or vital attribution.
///
/// Serializes transparently as a plain JSON object.
///
/// # Example
///
/// ```
/// use entrolytics_core::Properties;
///
/// let data = Properties::new()
///     .insert("plan", "enterprise")
///     .insert("seats", 250)
///     .insert("trial", false);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair, replacing any existing value for the key.
	///
	/// Accepts anything convertible into a `serde_json::Value`: strings,
	/// numbers, booleans, arrays, and nested objects.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Merges `other` into this map; on key collision `other` wins.
	pub fn merge(mut self, other: Properties) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	/// Gets a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns true if no entries have been added.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Consumes the builder, producing a JSON object value.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		props.into_value()
	}
}

impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl<K, V> FromIterator<(K, V)> for Properties
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
