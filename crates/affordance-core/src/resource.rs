//! Resource envelopes handed to encoders and the form renderer

use crate::action::ActionDescriptor;
use crate::link::{Link, SELF_REL};
use crate::value::value_to_text;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// A child envelope embedded under a relation name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedded {
	pub rel: String,
	pub resource: ResourceEnvelope,
}

/// An outgoing resource: properties, links and embedded resources
///
/// Immutable once built; encoders only borrow it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceEnvelope {
	#[serde(skip_serializing_if = "Option::is_none")]
	self_link: Option<Link>,
	#[serde(skip_serializing_if = "Option::is_none")]
	semantic_type: Option<String>,
	properties: IndexMap<String, Value>,
	links: Vec<Link>,
	embedded: Vec<Embedded>,
}

impl ResourceEnvelope {
	/// Start building an envelope
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{Link, ResourceEnvelope};
	///
	/// let event = ResourceEnvelope::builder()
	///     .self_link(Link::self_link("/events/1").unwrap())
	///     .semantic_type("Event")
	///     .property("name", "Walk off the Earth")
	///     .build();
	/// assert_eq!(event.self_href(), Some("/events/1"));
	/// assert_eq!(event.properties().len(), 1);
	/// ```
	pub fn builder() -> ResourceEnvelopeBuilder {
		ResourceEnvelopeBuilder::default()
	}

	pub fn self_link(&self) -> Option<&Link> {
		self.self_link.as_ref()
	}

	pub fn self_href(&self) -> Option<&str> {
		self.self_link.as_ref().map(|link| link.href.as_str())
	}

	pub fn semantic_type(&self) -> Option<&str> {
		self.semantic_type.as_deref()
	}

	pub fn properties(&self) -> &IndexMap<String, Value> {
		&self.properties
	}

	pub fn property(&self, name: &str) -> Option<&Value> {
		self.properties.get(name)
	}

	/// A property rendered as text, absent when null
	pub fn property_text(&self, name: &str) -> Option<String> {
		self.properties.get(name).and_then(value_to_text)
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn embedded(&self) -> &[Embedded] {
		&self.embedded
	}

	/// Links that afford an action, paired with that action
	pub fn affordances(&self) -> impl Iterator<Item = (&Link, Cow<'_, ActionDescriptor>)> {
		self.links
			.iter()
			.filter_map(|link| link.affordance().map(|action| (link, action)))
	}

	/// Links a client follows as they are: no action, or a safe action
	/// without parameters
	pub fn navigation_links(&self) -> impl Iterator<Item = &Link> {
		self.links.iter().filter(|link| link.is_navigation())
	}
}

/// Builder for [`ResourceEnvelope`]
#[derive(Debug, Clone, Default)]
pub struct ResourceEnvelopeBuilder {
	envelope: ResourceEnvelope,
}

impl ResourceEnvelopeBuilder {
	/// Set the self link; its relation is normalized to `self`
	pub fn self_link(mut self, mut link: Link) -> Self {
		link.rel = SELF_REL.to_string();
		self.envelope.self_link = Some(link);
		self
	}

	pub fn semantic_type(mut self, semantic_type: impl Into<String>) -> Self {
		self.envelope.semantic_type = Some(semantic_type.into());
		self
	}

	/// Add a property; null values are treated as absent
	pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		let value: Value = value.into();
		if !value.is_null() {
			self.envelope.properties.insert(name.into(), value);
		}
		self
	}

	/// Add every member of a JSON object as a property
	pub fn properties(mut self, object: serde_json::Map<String, Value>) -> Self {
		for (name, value) in object {
			self = self.property(name, value);
		}
		self
	}

	pub fn link(mut self, link: Link) -> Self {
		self.envelope.links.push(link);
		self
	}

	pub fn embed(mut self, rel: impl Into<String>, resource: ResourceEnvelope) -> Self {
		self.envelope.embedded.push(Embedded {
			rel: rel.into(),
			resource,
		});
		self
	}

	pub fn build(self) -> ResourceEnvelope {
		self.envelope
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::action::Method;
	use serde_json::json;

	#[test]
	fn test_null_properties_are_absent() {
		let envelope = ResourceEnvelope::builder()
			.property("name", "Walk off the Earth")
			.property("location", Value::Null)
			.build();
		assert!(envelope.property("location").is_none());
		assert_eq!(envelope.property_text("name").as_deref(), Some("Walk off the Earth"));
	}

	#[test]
	fn test_properties_keep_insertion_order() {
		let envelope = ResourceEnvelope::builder()
			.property("performer", "Walk off the Earth")
			.property("location", "Wiesbaden")
			.property("eventStatus", "EVENT_SCHEDULED")
			.build();
		let names: Vec<_> = envelope.properties().keys().map(String::as_str).collect();
		assert_eq!(names, vec!["performer", "location", "eventStatus"]);
	}

	#[test]
	fn test_self_link_rel_is_normalized() {
		let envelope = ResourceEnvelope::builder()
			.self_link(Link::new("canonical", "/events/1").unwrap())
			.build();
		assert_eq!(envelope.self_link().unwrap().rel, "self");
	}

	#[test]
	fn test_affordances_and_navigation_links() {
		let update = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
			.build()
			.unwrap();
		let envelope = ResourceEnvelope::builder()
			.link(Link::new("reviews", "/events/1/reviews").unwrap())
			.link(Link::actionable("updateEvent", update))
			.link(Link::new("search", "/events{?eventName}").unwrap())
			.link(Link::new("event", "/events/{id}").unwrap())
			.build();

		let affordances: Vec<_> = envelope.affordances().map(|(_, a)| a.name.clone()).collect();
		assert_eq!(affordances, vec!["updateEvent", "search", "event"]);
		let navigation: Vec<_> = envelope.navigation_links().map(|l| l.rel.as_str()).collect();
		assert_eq!(navigation, vec!["reviews", "event"]);
	}

	#[test]
	fn test_embedded_resources() {
		let review = ResourceEnvelope::builder()
			.property("reviewBody", "Great show")
			.build();
		let event = ResourceEnvelope::builder()
			.embed("reviews", review.clone())
			.build();
		assert_eq!(event.embedded().len(), 1);
		assert_eq!(event.embedded()[0].rel, "reviews");
		assert_eq!(event.embedded()[0].resource, review);
		assert_eq!(json!(event.embedded()[0].resource.properties()), json!({"reviewBody": "Great show"}));
	}
}
