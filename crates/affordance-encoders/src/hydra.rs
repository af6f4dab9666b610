//! JSON-LD encoding with the Hydra core vocabulary

use crate::encoder::{RepresentationEncoder, count_affordances, group_by_rel, to_bytes, validate_envelope};
use crate::error::{EncodeError, EncodeResult};
use affordance_core::{
	ActionDescriptor, Link, Parameter, ResourceEnvelope, TemplateSupport, UriTemplate,
	resolve_href,
};
use serde_json::{Map, Value, json};

pub const JSON_LD_MEDIA_TYPE: &str = "application/ld+json";

pub const HYDRA_NS: &str = "http://www.w3.org/ns/hydra/core#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";

/// Encodes envelopes as JSON-LD documents annotated with Hydra operations
///
/// Unprefixed terms resolve against the configured vocabulary, schema.org by
/// default.
///
/// # Examples
///
/// ```
/// use affordance_core::{Link, ResourceEnvelope};
/// use affordance_encoders::{HydraEncoder, RepresentationEncoder};
/// use serde_json::json;
///
/// let store = ResourceEnvelope::builder()
///     .self_link(Link::self_link("/stores/s1").unwrap())
///     .semantic_type("CafeOrCoffeeShop")
///     .build();
///
/// let bytes = HydraEncoder::new().encode(&store).unwrap();
/// let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
/// assert_eq!(doc["@type"], json!("CafeOrCoffeeShop"));
/// assert_eq!(doc["@context"]["@vocab"], json!("http://schema.org/"));
/// ```
#[derive(Debug, Clone)]
pub struct HydraEncoder {
	pub vocab: String,
	/// Prefix for relative hrefs
	pub base_url: Option<String>,
	pub pretty: bool,
}

impl Default for HydraEncoder {
	fn default() -> Self {
		Self {
			vocab: "http://schema.org/".to_string(),
			base_url: None,
			pretty: false,
		}
	}
}

impl HydraEncoder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn vocab(mut self, vocab: impl Into<String>) -> Self {
		self.vocab = vocab.into();
		self
	}

	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}

	pub fn pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}

	/// Build the JSON-LD document without serializing it
	pub fn to_value(&self, envelope: &ResourceEnvelope) -> EncodeResult<Value> {
		validate_envelope(envelope)?;
		let mut doc = Map::new();
		doc.insert("@context".to_string(), self.context());
		if let Value::Object(node) = self.node(envelope)? {
			doc.extend(node);
		}
		Ok(Value::Object(doc))
	}

	fn context(&self) -> Value {
		json!({
			"@vocab": self.vocab,
			"hydra": HYDRA_NS,
			"xsd": XSD_NS,
			"owl": OWL_NS,
		})
	}

	fn href(&self, href: &str) -> String {
		resolve_href(self.base_url.as_deref(), href)
	}

	fn node(&self, envelope: &ResourceEnvelope) -> EncodeResult<Value> {
		let mut node = Map::new();
		if let Some(self_link) = envelope.self_link() {
			let expansion = self_link.expand(envelope.properties(), TemplateSupport::Preserve)?;
			node.insert("@id".to_string(), json!(self.href(&expansion.href)));
		}
		if let Some(semantic_type) = envelope.semantic_type() {
			node.insert("@type".to_string(), json!(semantic_type));
		}
		for (name, value) in envelope.properties() {
			merge_term(&mut node, name, value.clone())?;
		}

		let links = envelope
			.links()
			.iter()
			.map(|link| Ok((link.rel.clone(), self.link(link, envelope)?)))
			.collect::<EncodeResult<Vec<_>>>()?;
		for (rel, value) in group_by_rel(links) {
			merge_term(&mut node, &rel, value)?;
		}

		let embedded = envelope
			.embedded()
			.iter()
			.map(|embedded| Ok((embedded.rel.clone(), self.node(&embedded.resource)?)))
			.collect::<EncodeResult<Vec<_>>>()?;
		for (rel, value) in group_by_rel(embedded) {
			merge_term(&mut node, &rel, value)?;
		}

		Ok(Value::Object(node))
	}

	fn link(&self, link: &Link, envelope: &ResourceEnvelope) -> EncodeResult<Value> {
		let expansion = link.expand(envelope.properties(), TemplateSupport::Preserve)?;
		let href = self.href(&expansion.href);

		let mut object = Map::new();
		if expansion.templated {
			let template = UriTemplate::parse(href.clone())?;
			object.insert("@type".to_string(), json!("hydra:IriTemplate"));
			object.insert("hydra:template".to_string(), json!(href));
			object.insert(
				"hydra:variableRepresentation".to_string(),
				json!("hydra:BasicRepresentation"),
			);
			let required = |name: &str| {
				link.action
					.as_ref()
					.and_then(|action| action.parameter(name))
					.is_some_and(|param| param.required)
			};
			let mapping: Vec<Value> = template
				.variables()
				.map(|variable| {
					json!({
						"@type": "hydra:IriTemplateMapping",
						"hydra:variable": variable,
						"hydra:property": variable,
						"hydra:required": required(variable),
					})
				})
				.collect();
			object.insert("hydra:mapping".to_string(), Value::Array(mapping));
		} else {
			object.insert("@id".to_string(), json!(href));
		}
		if let Some(title) = &link.title {
			object.insert("hydra:title".to_string(), json!(title));
		}
		if let Some(action) = &link.action {
			object.insert("hydra:operation".to_string(), json!([operation(action)]));
		}
		Ok(Value::Object(object))
	}
}

/// Add a property, relation or embedded node to a node object
///
/// Keywords are rejected. A term that is already present collects every value
/// in an array, which JSON-LD reads as a set of values for that term.
fn merge_term(node: &mut Map<String, Value>, term: &str, value: Value) -> EncodeResult<()> {
	if term.starts_with('@') {
		return Err(EncodeError::ReservedTerm {
			format: "JSON-LD",
			term: term.to_string(),
		});
	}
	match node.get_mut(term) {
		None => {
			node.insert(term.to_string(), value);
		}
		Some(existing) => {
			let mut values = match existing.take() {
				Value::Array(values) => values,
				other => vec![other],
			};
			match value {
				Value::Array(more) => values.extend(more),
				other => values.push(other),
			}
			*existing = Value::Array(values);
		}
	}
	Ok(())
}

fn operation(action: &ActionDescriptor) -> Value {
	let mut object = Map::new();
	object.insert(
		"@type".to_string(),
		json!(action.semantic_type.as_deref().unwrap_or("hydra:Operation")),
	);
	object.insert("hydra:title".to_string(), json!(action.name));
	object.insert("hydra:method".to_string(), json!(action.method.as_str()));
	if let Some(title) = &action.title {
		object.insert("hydra:description".to_string(), json!(title));
	}
	let properties: Vec<Value> = action.parameters().iter().map(supported_property).collect();
	object.insert(
		"hydra:expects".to_string(),
		json!({
			"@type": "hydra:Class",
			"hydra:supportedProperty": properties,
		}),
	);
	Value::Object(object)
}

fn supported_property(param: &Parameter) -> Value {
	let mut spec = Map::new();
	spec.insert("@type".to_string(), json!("PropertyValueSpecification"));
	spec.insert("valueName".to_string(), json!(param.name));
	spec.insert("valueRequired".to_string(), json!(param.required));
	spec.insert("multipleValues".to_string(), json!(param.is_repeatable()));
	spec.insert("readonlyValue".to_string(), json!(param.identifier));
	if let Some(value) = param.effective_value() {
		spec.insert("defaultValue".to_string(), value.clone());
	}
	if let Some(min) = param.min {
		spec.insert("minValue".to_string(), json!(min));
	}
	if let Some(max) = param.max {
		spec.insert("maxValue".to_string(), json!(max));
	}
	if let Some(min_length) = param.min_length {
		spec.insert("valueMinLength".to_string(), json!(min_length));
	}
	if let Some(max_length) = param.max_length {
		spec.insert("valueMaxLength".to_string(), json!(max_length));
	}

	let mut property = Map::new();
	property.insert("@type".to_string(), json!("hydra:SupportedProperty"));
	property.insert("hydra:property".to_string(), json!(param.name));
	property.insert("hydra:required".to_string(), json!(param.required));
	property.insert("hydra:writeable".to_string(), json!(!param.identifier));
	property.insert("hydra:range".to_string(), json!(param.value_type.xsd_type()));
	if let Some(label) = &param.label {
		property.insert("hydra:title".to_string(), json!(label));
	}
	if let Some(help_text) = &param.help_text {
		property.insert("hydra:description".to_string(), json!(help_text));
	}
	if let Some(allowed) = &param.allowed_values {
		property.insert("owl:oneOf".to_string(), json!(allowed));
	}
	property.insert("valueSpecification".to_string(), Value::Object(spec));
	Value::Object(property)
}

impl RepresentationEncoder for HydraEncoder {
	fn media_type(&self) -> &'static str {
		JSON_LD_MEDIA_TYPE
	}

	fn format(&self) -> &'static str {
		"jsonld"
	}

	fn encode(&self, envelope: &ResourceEnvelope) -> EncodeResult<Vec<u8>> {
		let doc = self.to_value(envelope)?;
		tracing::debug!(
			media_type = JSON_LD_MEDIA_TYPE,
			links = envelope.links().len(),
			embedded = envelope.embedded().len(),
			affordances = count_affordances(envelope),
			"encoded resource"
		);
		to_bytes(&doc, self.pretty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use affordance_core::{Method, ValueType};
	use rstest::rstest;

	#[test]
	fn test_plain_link_is_node_reference() {
		let envelope = ResourceEnvelope::builder()
			.self_link(Link::self_link("/events/1").unwrap())
			.link(Link::new("reviews", "/events/1/reviews").unwrap())
			.build();
		let doc = HydraEncoder::new()
			.base_url("http://localhost")
			.to_value(&envelope)
			.unwrap();
		assert_eq!(doc["@id"], json!("http://localhost/events/1"));
		assert_eq!(doc["reviews"], json!({"@id": "http://localhost/events/1/reviews"}));
	}

	#[test]
	fn test_templated_link_becomes_iri_template() {
		let envelope = ResourceEnvelope::builder()
			.link(Link::new("search", "/events{?eventName}").unwrap())
			.build();
		let doc = HydraEncoder::new().to_value(&envelope).unwrap();
		assert_eq!(
			doc["search"],
			json!({
				"@type": "hydra:IriTemplate",
				"hydra:template": "/events{?eventName}",
				"hydra:variableRepresentation": "hydra:BasicRepresentation",
				"hydra:mapping": [{
					"@type": "hydra:IriTemplateMapping",
					"hydra:variable": "eventName",
					"hydra:property": "eventName",
					"hydra:required": false
				}]
			})
		);
	}

	#[test]
	fn test_clashing_terms_collect_all_values() {
		let review = ResourceEnvelope::builder()
			.property("reviewBody", "great")
			.build();
		let envelope = ResourceEnvelope::builder()
			.property("reviews", 5)
			.link(Link::new("reviews", "/events/1/reviews").unwrap())
			.embed("reviews", review)
			.build();
		let doc = HydraEncoder::new().to_value(&envelope).unwrap();
		assert_eq!(
			doc["reviews"],
			json!([5, {"@id": "/events/1/reviews"}, {"reviewBody": "great"}])
		);
	}

	#[test]
	fn test_repeated_links_merge_with_property_array() {
		let envelope = ResourceEnvelope::builder()
			.property("sameAs", json!(["https://a.example"]))
			.link(Link::new("sameAs", "https://b.example").unwrap())
			.link(Link::new("sameAs", "https://c.example").unwrap())
			.build();
		let doc = HydraEncoder::new().to_value(&envelope).unwrap();
		assert_eq!(
			doc["sameAs"],
			json!([
				"https://a.example",
				{"@id": "https://b.example"},
				{"@id": "https://c.example"}
			])
		);
	}

	#[rstest]
	#[case::property(ResourceEnvelope::builder().property("@id", "/other").build())]
	#[case::link(ResourceEnvelope::builder().link(Link::new("@context", "/ctx").unwrap()).build())]
	#[case::embedded(ResourceEnvelope::builder().embed("@type", ResourceEnvelope::default()).build())]
	fn test_keyword_terms_rejected(#[case] envelope: ResourceEnvelope) {
		let err = HydraEncoder::new().to_value(&envelope).unwrap_err();
		assert!(matches!(err, EncodeError::ReservedTerm { ref term, .. } if term.starts_with('@')));
	}

	#[test]
	fn test_custom_vocab() {
		let envelope = ResourceEnvelope::builder().build();
		let doc = HydraEncoder::new()
			.vocab("http://example.com/vocab#")
			.to_value(&envelope)
			.unwrap();
		assert_eq!(doc["@context"]["@vocab"], json!("http://example.com/vocab#"));
		assert_eq!(doc["@context"]["hydra"], json!(HYDRA_NS));
	}

	#[test]
	fn test_enumeration_lists_one_of() {
		let action = ActionDescriptor::builder("updateEvent", Method::Put, "/events/1")
			.semantic_type("UpdateAction")
			.parameter(
				Parameter::builder(
					"eventStatus",
					ValueType::Enumeration(vec!["EVENT_SCHEDULED".to_string(), "EVENT_CANCELLED".to_string()]),
				)
				.default_value("EVENT_SCHEDULED")
				.build(),
			)
			.build()
			.unwrap();
		let envelope = ResourceEnvelope::builder()
			.link(Link::actionable("updateEvent", action))
			.build();
		let doc = HydraEncoder::new().to_value(&envelope).unwrap();
		let op = &doc["updateEvent"]["hydra:operation"][0];
		assert_eq!(op["@type"], json!("UpdateAction"));
		assert_eq!(op["hydra:method"], json!("PUT"));
		let property = &op["hydra:expects"]["hydra:supportedProperty"][0];
		assert_eq!(property["hydra:range"], json!("xsd:string"));
		assert_eq!(
			property["owl:oneOf"],
			json!(["EVENT_SCHEDULED", "EVENT_CANCELLED"])
		);
		assert_eq!(
			property["valueSpecification"]["defaultValue"],
			json!("EVENT_SCHEDULED")
		);
	}
}
