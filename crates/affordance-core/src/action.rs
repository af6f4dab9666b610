//! Action descriptors: the normalized form of an invocable operation

use crate::error::{AffordanceError, Result};
use crate::parameter::Parameter;
use crate::template::{Expansion, TemplateSupport, UriTemplate};
use crate::value::value_to_text;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// HTTP methods an action may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	Post,
	Put,
	Patch,
	Delete,
}

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}

	/// Whether the method is safe to follow without side effects
	pub fn is_safe(&self) -> bool {
		matches!(self, Method::Get)
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Method {
	type Err = AffordanceError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(Method::Get),
			"POST" => Ok(Method::Post),
			"PUT" => Ok(Method::Put),
			"PATCH" => Ok(Method::Patch),
			"DELETE" => Ok(Method::Delete),
			_ => Err(AffordanceError::UnsupportedMethod(s.to_string())),
		}
	}
}

/// An invocable operation: method, target and ordered parameters
///
/// Parameter names are unique within a descriptor; the builder enforces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDescriptor {
	pub name: String,
	pub method: Method,
	pub target: UriTemplate,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub semantic_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Request body media type, if the action expects a body
	#[serde(skip_serializing_if = "Option::is_none")]
	pub media_type: Option<String>,
	parameters: Vec<Parameter>,
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	bindings: BTreeMap<String, Value>,
}

impl ActionDescriptor {
	/// Start building an action
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{ActionDescriptor, Method, Parameter, ValueType};
	///
	/// let action = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
	///     .bind("id", 1)
	///     .parameter(Parameter::builder("ratingValue", ValueType::Number).default_value(3).build())
	///     .build()
	///     .unwrap();
	/// assert_eq!(action.parameters().len(), 1);
	/// assert_eq!(action.target.as_str(), "/events/{id}");
	/// ```
	pub fn builder(
		name: impl Into<String>,
		method: Method,
		target: impl Into<String>,
	) -> ActionDescriptorBuilder {
		ActionDescriptorBuilder::new(name, method, target)
	}

	/// GET affordance of a templated link that declares no action
	pub(crate) fn link_query(
		name: String,
		target: UriTemplate,
		parameters: Vec<Parameter>,
		title: Option<String>,
	) -> Self {
		ActionDescriptor {
			name,
			method: Method::Get,
			target,
			semantic_type: None,
			title,
			media_type: None,
			parameters,
			bindings: BTreeMap::new(),
		}
	}

	pub fn parameters(&self) -> &[Parameter] {
		&self.parameters
	}

	/// Whether following the target is enough: a safe method with nothing to
	/// fill in
	pub fn is_navigation(&self) -> bool {
		self.method.is_safe() && self.parameters.is_empty()
	}

	pub fn parameter(&self, name: &str) -> Option<&Parameter> {
		self.parameters.iter().find(|p| p.name == name)
	}

	/// Values bound to template variables or parameters at construction
	pub fn bindings(&self) -> &BTreeMap<String, Value> {
		&self.bindings
	}

	pub fn binding(&self, name: &str) -> Option<&Value> {
		self.bindings.get(name)
	}

	/// Check every parameter's default against its allowed values
	pub fn validate(&self) -> Result<()> {
		self.parameters.iter().try_for_each(Parameter::validate)
	}

	/// Expand the target, resolving variables from the bindings first and the
	/// owning resource's properties second
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{ActionDescriptor, Method, TemplateSupport};
	/// use indexmap::IndexMap;
	///
	/// let action = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
	///     .build()
	///     .unwrap();
	/// let mut properties = IndexMap::new();
	/// properties.insert("id".to_string(), serde_json::json!(1));
	///
	/// let expansion = action.expand_target(&properties, TemplateSupport::Omit).unwrap();
	/// assert_eq!(expansion.href, "/events/1");
	/// ```
	pub fn expand_target(
		&self,
		properties: &IndexMap<String, Value>,
		support: TemplateSupport,
	) -> Result<Expansion> {
		self.target.expand(
			|name| {
				self.bindings
					.get(name)
					.or_else(|| properties.get(name))
					.and_then(value_to_text)
			},
			support,
		)
	}
}

/// Builder for [`ActionDescriptor`]
#[derive(Debug, Clone)]
pub struct ActionDescriptorBuilder {
	name: String,
	method: Method,
	target: String,
	semantic_type: Option<String>,
	title: Option<String>,
	media_type: Option<String>,
	parameters: Vec<Parameter>,
	bindings: BTreeMap<String, Value>,
}

impl ActionDescriptorBuilder {
	pub fn new(name: impl Into<String>, method: Method, target: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			method,
			target: target.into(),
			semantic_type: None,
			title: None,
			media_type: None,
			parameters: Vec::new(),
			bindings: BTreeMap::new(),
		}
	}

	pub fn semantic_type(mut self, semantic_type: impl Into<String>) -> Self {
		self.semantic_type = Some(semantic_type.into());
		self
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
		self.media_type = Some(media_type.into());
		self
	}

	/// Bind a value to a template variable or parameter; null is ignored
	pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		let value: Value = value.into();
		if !value.is_null() {
			self.bindings.insert(name.into(), value);
		}
		self
	}

	pub fn parameter(mut self, parameter: Parameter) -> Self {
		self.parameters.push(parameter);
		self
	}

	pub fn parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
		self.parameters.extend(parameters);
		self
	}

	/// Finish the descriptor
	///
	/// Bound values become the current value of a parameter with the same
	/// name unless the parameter already carries one.
	pub fn build(self) -> Result<ActionDescriptor> {
		let target = UriTemplate::parse(self.target)?;

		let mut seen = HashSet::new();
		for param in &self.parameters {
			if !seen.insert(param.name.as_str()) {
				return Err(AffordanceError::DuplicateParameter {
					action: self.name,
					parameter: param.name.clone(),
				});
			}
		}

		let parameters = self
			.parameters
			.into_iter()
			.map(|mut param| {
				if param.current_value.is_none() {
					param.current_value = self.bindings.get(&param.name).cloned();
				}
				param
			})
			.collect();

		Ok(ActionDescriptor {
			name: self.name,
			method: self.method,
			target,
			semantic_type: self.semantic_type,
			title: self.title,
			media_type: self.media_type,
			parameters,
			bindings: self.bindings,
		})
	}
}
