//! HAL+JSON encoding

use crate::encoder::{RepresentationEncoder, count_affordances, group_by_rel, to_bytes, validate_envelope};
use crate::error::{EncodeError, EncodeResult};
use affordance_core::{
	ActionDescriptor, Link, Parameter, ResourceEnvelope, TemplateSupport, ValueType, resolve_href,
};
use serde_json::{Map, Value, json};

pub const HAL_MEDIA_TYPE: &str = "application/hal+json";

/// Encodes envelopes as HAL documents
///
/// Properties sit at the top level next to `_links` and `_embedded`. Links
/// that afford an action carry an `operation` object naming the method and
/// the expected parameters.
///
/// # Examples
///
/// ```
/// use affordance_core::{Link, ResourceEnvelope};
/// use affordance_encoders::{HalEncoder, RepresentationEncoder};
/// use serde_json::json;
///
/// let event = ResourceEnvelope::builder()
///     .self_link(Link::self_link("/events/1").unwrap())
///     .semantic_type("Event")
///     .property("name", "Walk off the Earth")
///     .build();
///
/// let bytes = HalEncoder::new().encode(&event).unwrap();
/// let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
/// assert_eq!(doc["@type"], json!("Event"));
/// assert_eq!(doc["_links"]["self"]["href"], json!("/events/1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HalEncoder {
	/// Prefix for relative hrefs
	pub base_url: Option<String>,
	pub pretty: bool,
}

impl HalEncoder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}

	pub fn pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}

	/// Build the HAL document without serializing it
	pub fn to_value(&self, envelope: &ResourceEnvelope) -> EncodeResult<Value> {
		validate_envelope(envelope)?;
		self.resource(envelope)
	}

	fn resource(&self, envelope: &ResourceEnvelope) -> EncodeResult<Value> {
		let mut doc = Map::new();
		if let Some(semantic_type) = envelope.semantic_type() {
			doc.insert("@type".to_string(), json!(semantic_type));
		}
		for (name, value) in envelope.properties() {
			if matches!(name.as_str(), "_links" | "_embedded" | "@type") {
				return Err(EncodeError::ReservedTerm {
					format: "HAL",
					term: name.clone(),
				});
			}
			doc.insert(name.clone(), value.clone());
		}

		let mut links = Vec::new();
		if let Some(self_link) = envelope.self_link() {
			links.push((self_link.rel.clone(), self.link(self_link, envelope)?));
		}
		for link in envelope.links() {
			links.push((link.rel.clone(), self.link(link, envelope)?));
		}
		if !links.is_empty() {
			doc.insert("_links".to_string(), Value::Object(group_by_rel(links)));
		}

		let embedded = envelope
			.embedded()
			.iter()
			.map(|embedded| Ok((embedded.rel.clone(), self.resource(&embedded.resource)?)))
			.collect::<EncodeResult<Vec<_>>>()?;
		if !embedded.is_empty() {
			doc.insert("_embedded".to_string(), Value::Object(group_by_rel(embedded)));
		}

		Ok(Value::Object(doc))
	}

	fn link(&self, link: &Link, envelope: &ResourceEnvelope) -> EncodeResult<Value> {
		let expansion = link.expand(envelope.properties(), TemplateSupport::Preserve)?;
		let mut object = Map::new();
		object.insert(
			"href".to_string(),
			json!(resolve_href(self.base_url.as_deref(), &expansion.href)),
		);
		if expansion.templated {
			object.insert("templated".to_string(), json!(true));
		}
		if let Some(title) = &link.title {
			object.insert("title".to_string(), json!(title));
		}
		if let Some(action) = &link.action {
			object.insert("operation".to_string(), operation(action));
		}
		Ok(Value::Object(object))
	}
}

fn operation(action: &ActionDescriptor) -> Value {
	let mut object = Map::new();
	object.insert("name".to_string(), json!(action.name));
	object.insert("method".to_string(), json!(action.method.as_str()));
	if let Some(semantic_type) = &action.semantic_type {
		object.insert("@type".to_string(), json!(semantic_type));
	}
	if let Some(media_type) = &action.media_type {
		object.insert("type".to_string(), json!(media_type));
	}
	let expects: Vec<Value> = action.parameters().iter().map(expected_parameter).collect();
	object.insert("expects".to_string(), Value::Array(expects));
	Value::Object(object)
}

fn type_name(value_type: &ValueType) -> &'static str {
	match value_type.element_type() {
		ValueType::Number => "number",
		ValueType::Boolean => "boolean",
		_ => "text",
	}
}

fn expected_parameter(param: &Parameter) -> Value {
	let mut object = Map::new();
	object.insert("name".to_string(), json!(param.name));
	object.insert("type".to_string(), json!(type_name(&param.value_type)));
	object.insert("required".to_string(), json!(param.required));
	if param.is_repeatable() {
		object.insert("multiple".to_string(), json!(true));
	}
	if param.identifier {
		object.insert("readOnly".to_string(), json!(true));
	}
	if let Some(value) = param.effective_value() {
		object.insert("value".to_string(), value.clone());
	}
	if let Some(allowed) = &param.allowed_values {
		object.insert("options".to_string(), json!(allowed));
	}
	if let Some(min) = param.min {
		object.insert("min".to_string(), json!(min));
	}
	if let Some(max) = param.max {
		object.insert("max".to_string(), json!(max));
	}
	if let Some(min_length) = param.min_length {
		object.insert("minLength".to_string(), json!(min_length));
	}
	if let Some(max_length) = param.max_length {
		object.insert("maxLength".to_string(), json!(max_length));
	}
	if let Some(label) = &param.label {
		object.insert("title".to_string(), json!(label));
	}
	Value::Object(object)
}

impl RepresentationEncoder for HalEncoder {
	fn media_type(&self) -> &'static str {
		HAL_MEDIA_TYPE
	}

	fn format(&self) -> &'static str {
		"hal"
	}

	fn encode(&self, envelope: &ResourceEnvelope) -> EncodeResult<Vec<u8>> {
		let doc = self.to_value(envelope)?;
		tracing::debug!(
			media_type = HAL_MEDIA_TYPE,
			links = envelope.links().len(),
			embedded = envelope.embedded().len(),
			affordances = count_affordances(envelope),
			"encoded resource"
		);
		to_bytes(&doc, self.pretty)
	}
}
