//! Siren encoding and the Siren document model

use crate::encoder::{RepresentationEncoder, count_affordances, to_bytes, validate_envelope};
use crate::error::EncodeResult;
use affordance_core::{
	ActionDescriptor, Link, Parameter, ResourceEnvelope, TemplateSupport, resolve_href,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SIREN_MEDIA_TYPE: &str = "application/vnd.siren+json";

/// A Siren entity, either the root document or an embedded sub-entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SirenEntity {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub class: Vec<String>,
	/// Relations of a sub-entity to its parent
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub rel: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub properties: Map<String, Value>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub entities: Vec<SirenEntity>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub actions: Vec<SirenAction>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub links: Vec<SirenLink>,
}

impl SirenEntity {
	pub fn action(&self, name: &str) -> Option<&SirenAction> {
		self.actions.iter().find(|action| action.name == name)
	}

	pub fn link(&self, rel: &str) -> Option<&SirenLink> {
		self.links
			.iter()
			.find(|link| link.rel.iter().any(|r| r == rel))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirenLink {
	pub rel: Vec<String>,
	pub href: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirenAction {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub class: Vec<String>,
	pub method: String,
	pub href: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Media type of the request body
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub media_type: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub fields: Vec<SirenField>,
}

impl SirenAction {
	pub fn field(&self, name: &str) -> Option<&SirenField> {
		self.fields.iter().find(|field| field.name == name)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirenField {
	pub name: String,
	#[serde(rename = "type")]
	pub field_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}

/// Siren field type for a parameter
///
/// | parameter                  | type     |
/// |----------------------------|----------|
/// | identifier                 | `hidden` |
/// | numeric, single-valued     | `number` |
/// | anything else              | `text`   |
///
/// # Examples
///
/// ```
/// use affordance_core::{Parameter, ValueType};
/// use affordance_encoders::siren_field_type;
///
/// let id = Parameter::builder("personId", ValueType::Number).identifier().build();
/// assert_eq!(siren_field_type(&id), "hidden");
///
/// let rating = Parameter::builder("ratingValue", ValueType::Number).build();
/// assert_eq!(siren_field_type(&rating), "number");
///
/// let ratings = Parameter::builder("ratings", ValueType::List(Box::new(ValueType::Number))).build();
/// assert_eq!(siren_field_type(&ratings), "text");
/// ```
pub fn siren_field_type(param: &Parameter) -> &'static str {
	if param.identifier {
		"hidden"
	} else if param.value_type.is_numeric() && !param.is_repeatable() {
		"number"
	} else {
		"text"
	}
}

/// Encodes envelopes as Siren entities
///
/// Siren has no URI templates, so action hrefs are fully expanded and
/// unresolved query variables are dropped. A GET affordance without
/// parameters is a plain link.
#[derive(Debug, Clone, Default)]
pub struct SirenEncoder {
	/// Prefix for relative hrefs
	pub base_url: Option<String>,
	pub pretty: bool,
}

impl SirenEncoder {
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

	/// Build the Siren entity without serializing it
	pub fn to_entity(&self, envelope: &ResourceEnvelope) -> EncodeResult<SirenEntity> {
		validate_envelope(envelope)?;
		self.entity(envelope, Vec::new())
	}

	fn href(&self, link: &Link, envelope: &ResourceEnvelope) -> EncodeResult<String> {
		let expansion = link.expand(envelope.properties(), TemplateSupport::Omit)?;
		Ok(resolve_href(self.base_url.as_deref(), &expansion.href))
	}

	fn entity(&self, envelope: &ResourceEnvelope, rel: Vec<String>) -> EncodeResult<SirenEntity> {
		let mut entity = SirenEntity {
			class: envelope.semantic_type().map(str::to_string).into_iter().collect(),
			rel,
			properties: envelope
				.properties()
				.iter()
				.map(|(k, v)| (k.clone(), v.clone()))
				.collect(),
			..Default::default()
		};

		if let Some(self_link) = envelope.self_link() {
			entity.links.push(SirenLink {
				rel: vec![self_link.rel.clone()],
				href: self.href(self_link, envelope)?,
				title: self_link.title.clone(),
			});
		}

		for link in envelope.links() {
			match link.affordance() {
				Some(action) if !action.is_navigation() => {
					entity.actions.push(self.action(link, &action, envelope)?);
				}
				_ => entity.links.push(SirenLink {
					rel: vec![link.rel.clone()],
					href: self.href(link, envelope)?,
					title: link.title.clone(),
				}),
			}
		}

		for embedded in envelope.embedded() {
			let sub = self.entity(&embedded.resource, vec![embedded.rel.clone()])?;
			entity.entities.push(sub);
		}

		Ok(entity)
	}

	fn action(
		&self,
		link: &Link,
		action: &ActionDescriptor,
		envelope: &ResourceEnvelope,
	) -> EncodeResult<SirenAction> {
		let fields = action
			.parameters()
			.iter()
			.map(|param| SirenField {
				name: param.name.clone(),
				field_type: siren_field_type(param).to_string(),
				value: param.effective_value().cloned(),
				title: param.label.clone(),
			})
			.collect();

		Ok(SirenAction {
			name: action.name.clone(),
			class: action.semantic_type.iter().cloned().collect(),
			method: action.method.as_str().to_string(),
			href: self.href(link, envelope)?,
			title: action.title.clone().or_else(|| link.title.clone()),
			media_type: action.media_type.clone(),
			fields,
		})
	}
}

impl RepresentationEncoder for SirenEncoder {
	fn media_type(&self) -> &'static str {
		SIREN_MEDIA_TYPE
	}

	fn format(&self) -> &'static str {
		"siren"
	}

	fn encode(&self, envelope: &ResourceEnvelope) -> EncodeResult<Vec<u8>> {
		let entity = self.to_entity(envelope)?;
		tracing::debug!(
			media_type = SIREN_MEDIA_TYPE,
			links = entity.links.len(),
			actions = entity.actions.len(),
			entities = entity.entities.len(),
			affordances = count_affordances(envelope),
			"encoded resource"
		);
		to_bytes(&entity, self.pretty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use affordance_core::{AffordanceError, Method, ValueType};
	use crate::error::EncodeError;
	use serde_json::json;

	#[test]
	fn test_get_without_parameters_stays_link() {
		let action = ActionDescriptor::builder("customer", Method::Get, "/customers/{customerId}")
			.build()
			.unwrap();
		let envelope = ResourceEnvelope::builder()
			.property("customerId", "pj123")
			.link(Link::actionable("customer", action))
			.build();
		let entity = SirenEncoder::new().to_entity(&envelope).unwrap();
		assert!(entity.actions.is_empty());
		assert_eq!(entity.link("customer").unwrap().href, "/customers/pj123");
	}

	#[test]
	fn test_templated_search_link_becomes_action() {
		let envelope = ResourceEnvelope::builder()
			.link(Link::new("findEvents", "/events{?eventName}").unwrap())
			.build();
		let entity = SirenEncoder::new()
			.base_url("http://localhost")
			.to_entity(&envelope)
			.unwrap();
		let action = entity.action("findEvents").unwrap();
		assert_eq!(action.method, "GET");
		assert_eq!(action.href, "http://localhost/events");
		assert_eq!(action.field("eventName").unwrap().field_type, "text");
	}

	#[test]
	fn test_unbound_path_variable_fails() {
		let action = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
			.parameter(Parameter::builder("ratingValue", ValueType::Number).build())
			.build()
			.unwrap();
		let envelope = ResourceEnvelope::builder()
			.link(Link::actionable("updateEvent", action))
			.build();
		let err = SirenEncoder::new().to_entity(&envelope).unwrap_err();
		assert!(matches!(
			err,
			EncodeError::Affordance(AffordanceError::UnboundPathVariable { .. })
		));
	}

	#[test]
	fn test_empty_collections_are_omitted() {
		let envelope = ResourceEnvelope::builder().property("name", "x").build();
		let bytes = SirenEncoder::new().encode(&envelope).unwrap();
		let doc: Value = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(doc, json!({"properties": {"name": "x"}}));
	}
}
