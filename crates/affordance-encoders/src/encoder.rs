//! The encoder trait and helpers shared by the JSON formats

use crate::error::EncodeResult;
use affordance_core::{ResourceEnvelope, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Encodes a resource envelope into a hypermedia wire format
///
/// Encoders are stateless apart from their configuration; encoding the same
/// envelope twice yields identical bytes.
pub trait RepresentationEncoder: Send + Sync {
	/// The media type of the produced payload
	fn media_type(&self) -> &'static str;

	/// Short format name, e.g. for `?format=` overrides
	fn format(&self) -> &'static str;

	fn encode(&self, envelope: &ResourceEnvelope) -> EncodeResult<Vec<u8>>;
}

/// Check the defaults of every action in the envelope and its embedded
/// resources
pub fn validate_envelope(envelope: &ResourceEnvelope) -> Result<()> {
	for (_, action) in envelope.affordances() {
		action.validate()?;
	}
	envelope
		.embedded()
		.iter()
		.try_for_each(|embedded| validate_envelope(&embedded.resource))
}

/// Number of affordances in the envelope tree
pub(crate) fn count_affordances(envelope: &ResourceEnvelope) -> usize {
	envelope.affordances().count()
		+ envelope
			.embedded()
			.iter()
			.map(|embedded| count_affordances(&embedded.resource))
			.sum::<usize>()
}

pub(crate) fn to_bytes<T: Serialize>(value: &T, pretty: bool) -> EncodeResult<Vec<u8>> {
	let bytes = if pretty {
		serde_json::to_vec_pretty(value)?
	} else {
		serde_json::to_vec(value)?
	};
	Ok(bytes)
}

/// Group values by relation: one value per relation, an array when a
/// relation repeats, relations in order of first appearance
pub(crate) fn group_by_rel(entries: impl IntoIterator<Item = (String, Value)>) -> Map<String, Value> {
	let mut groups: IndexMap<String, Vec<Value>> = IndexMap::new();
	for (rel, value) in entries {
		groups.entry(rel).or_default().push(value);
	}
	groups
		.into_iter()
		.map(|(rel, mut values)| {
			let value = if values.len() == 1 {
				values.remove(0)
			} else {
				Value::Array(values)
			};
			(rel, value)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use affordance_core::{
		ActionDescriptor, AffordanceError, Link, Method, Parameter, ValueType,
	};
	use serde_json::json;

	#[test]
	fn test_group_by_rel() {
		let grouped = group_by_rel(vec![
			("self".to_string(), json!({"href": "/a"})),
			("item".to_string(), json!({"href": "/1"})),
			("item".to_string(), json!({"href": "/2"})),
			("item".to_string(), json!({"href": "/3"})),
		]);
		assert_eq!(
			Value::Object(grouped),
			json!({
				"self": {"href": "/a"},
				"item": [{"href": "/1"}, {"href": "/2"}, {"href": "/3"}]
			})
		);
	}

	#[test]
	fn test_group_by_rel_keeps_single_array_value() {
		let grouped = group_by_rel(vec![("tags".to_string(), json!(["a"]))]);
		assert_eq!(grouped["tags"], json!(["a"]));
	}

	#[test]
	fn test_validate_envelope_checks_embedded_actions() {
		let action = ActionDescriptor::builder("rate", Method::Post, "/reviews")
			.parameter(
				Parameter::builder("ratingValue", ValueType::Number)
					.allowed_values(vec![json!(1), json!(2), json!(3)])
					.default_value(4)
					.build(),
			)
			.build()
			.unwrap();
		let review = ResourceEnvelope::builder()
			.link(Link::actionable("rate", action))
			.build();
		let event = ResourceEnvelope::builder().embed("review", review).build();

		assert!(matches!(
			validate_envelope(&event),
			Err(AffordanceError::InvalidDefault { .. })
		));
		assert_eq!(count_affordances(&event), 1);
	}
}
