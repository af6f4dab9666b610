//! Declarative operation descriptions turned into action descriptors

use crate::action::{ActionDescriptor, Method};
use crate::error::{AffordanceError, Result};
use crate::inferencer::TypeInferencer;
use crate::parameter::Parameter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A declared operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
	pub name: String,
	/// Declared type name, e.g. `i32` or `Option<Vec<EventStatus>>`
	#[serde(rename = "type")]
	pub type_name: String,
	/// Defaults to required unless the type is `Option<T>`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub required: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,
	/// Overrides the variants of an enumerated type
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub allowed: Option<Vec<Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_length: Option<usize>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	#[serde(default)]
	pub identifier: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub help_text: Option<String>,
}

/// A declared operation: the ahead-of-time description of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSpec {
	pub name: String,
	pub method: Method,
	pub target: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub semantic_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub media_type: Option<String>,
	#[serde(default)]
	pub params: Vec<ParameterSpec>,
}

impl ParameterSpec {
	fn to_parameter(&self, inferencer: &TypeInferencer) -> Result<Parameter> {
		let inferred = inferencer.infer(&self.name, &self.type_name)?;
		let mut builder = Parameter::builder(&self.name, inferred.value_type)
			.required(self.required.unwrap_or(!inferred.optional));

		if let Some(allowed) = &self.allowed {
			builder = builder.allowed_values(allowed.clone());
		}
		if let Some(default) = &self.default {
			builder = builder.default_value(default.clone());
		}
		if let Some(min) = self.min {
			builder = builder.min(min);
		}
		if let Some(max) = self.max {
			builder = builder.max(max);
		}
		if let Some(min_length) = self.min_length {
			builder = builder.min_length(min_length);
		}
		if let Some(max_length) = self.max_length {
			builder = builder.max_length(max_length);
		}
		if self.identifier {
			builder = builder.identifier();
		}
		if let Some(label) = &self.label {
			builder = builder.label(label);
		}
		if let Some(help_text) = &self.help_text {
			builder = builder.help_text(help_text);
		}
		Ok(builder.build())
	}
}

impl ActionDescriptor {
	/// Build a descriptor from a declared operation and bound values
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{ActionDescriptor, Method, OperationSpec, TypeInferencer};
	/// use serde_json::json;
	/// use std::collections::BTreeMap;
	///
	/// let spec: OperationSpec = serde_json::from_value(json!({
	///     "name": "updateEvent",
	///     "method": "PUT",
	///     "target": "/events/{id}",
	///     "params": [{"name": "ratingValue", "type": "i32", "default": 3}]
	/// })).unwrap();
	///
	/// let bindings = BTreeMap::from([("id".to_string(), json!(1))]);
	/// let action = ActionDescriptor::from_operation(&spec, &TypeInferencer::new(), &bindings).unwrap();
	/// assert_eq!(action.method, Method::Put);
	/// assert_eq!(action.parameter("ratingValue").unwrap().default_value, Some(json!(3)));
	/// ```
	pub fn from_operation(
		spec: &OperationSpec,
		inferencer: &TypeInferencer,
		bindings: &BTreeMap<String, Value>,
	) -> Result<Self> {
		let parameters = spec
			.params
			.iter()
			.map(|param| param.to_parameter(inferencer))
			.collect::<Result<Vec<_>>>()?;

		let mut builder = ActionDescriptor::builder(&spec.name, spec.method, &spec.target)
			.parameters(parameters);
		if let Some(semantic_type) = &spec.semantic_type {
			builder = builder.semantic_type(semantic_type);
		}
		if let Some(title) = &spec.title {
			builder = builder.title(title);
		}
		if let Some(media_type) = &spec.media_type {
			builder = builder.media_type(media_type);
		}
		for (name, value) in bindings {
			builder = builder.bind(name, value.clone());
		}
		builder.build()
	}
}

/// Look up an operation by name
pub fn find_operation<'a>(operations: &'a [OperationSpec], name: &str) -> Result<&'a OperationSpec> {
	operations
		.iter()
		.find(|op| op.name == name)
		.ok_or_else(|| AffordanceError::UnknownOperation(name.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::ValueType;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn inferencer() -> TypeInferencer {
		let mut inferencer = TypeInferencer::new();
		inferencer.register_enum(
			"EventStatus",
			["EVENT_CANCELLED", "EVENT_POSTPONED", "EVENT_SCHEDULED", "EVENT_RESCHEDULED"],
		);
		inferencer
	}

	fn param(name: &str, type_name: &str) -> ParameterSpec {
		ParameterSpec {
			name: name.to_string(),
			type_name: type_name.to_string(),
			required: None,
			default: None,
			allowed: None,
			min: None,
			max: None,
			min_length: None,
			max_length: None,
			identifier: false,
			label: None,
			help_text: None,
		}
	}

	fn operation(params: Vec<ParameterSpec>) -> OperationSpec {
		OperationSpec {
			name: "updateEvent".to_string(),
			method: Method::Put,
			target: "/events/{id}".to_string(),
			semantic_type: Some("ReviewAction".to_string()),
			title: None,
			media_type: None,
			params,
		}
	}

	#[rstest]
	fn test_required_follows_option(inferencer: TypeInferencer) {
		let spec = operation(vec![param("performer", "String"), param("location", "Option<String>")]);
		let action = ActionDescriptor::from_operation(&spec, &inferencer, &BTreeMap::new()).unwrap();
		assert!(action.parameter("performer").unwrap().required);
		assert!(!action.parameter("location").unwrap().required);
	}

	#[rstest]
	fn test_enum_keeps_declared_order_and_default(inferencer: TypeInferencer) {
		let mut status = param("eventStatus", "EventStatus");
		status.default = Some(json!("EVENT_SCHEDULED"));
		let action =
			ActionDescriptor::from_operation(&operation(vec![status]), &inferencer, &BTreeMap::new())
				.unwrap();
		let param = action.parameter("eventStatus").unwrap();
		assert_eq!(param.allowed_values.as_ref().unwrap()[0], json!("EVENT_CANCELLED"));
		assert_eq!(param.default_value, Some(json!("EVENT_SCHEDULED")));
		assert!(action.validate().is_ok());
		assert_eq!(action.semantic_type.as_deref(), Some("ReviewAction"));
	}

	#[rstest]
	fn test_bounds_and_lengths_are_kept(inferencer: TypeInferencer) {
		let mut rating = param("ratingValue", "i32");
		rating.min = Some(1.0);
		rating.max = Some(5.0);
		let mut body = param("reviewBody", "String");
		body.max_length = Some(512);
		let action = ActionDescriptor::from_operation(
			&operation(vec![rating, body]),
			&inferencer,
			&BTreeMap::new(),
		)
		.unwrap();
		let rating = action.parameter("ratingValue").unwrap();
		assert_eq!((rating.min, rating.max), (Some(1.0), Some(5.0)));
		assert_eq!(action.parameter("reviewBody").unwrap().max_length, Some(512));
	}

	#[rstest]
	fn test_unsupported_type_propagates(inferencer: TypeInferencer) {
		let spec = operation(vec![param("startDate", "NaiveDate")]);
		let err = ActionDescriptor::from_operation(&spec, &inferencer, &BTreeMap::new()).unwrap_err();
		assert!(matches!(err, AffordanceError::UnsupportedParameterType { .. }));
	}

	#[rstest]
	fn test_list_of_enum_is_repeatable(inferencer: TypeInferencer) {
		let spec = operation(vec![param("statuses", "Vec<EventStatus>")]);
		let action = ActionDescriptor::from_operation(&spec, &inferencer, &BTreeMap::new()).unwrap();
		let param = action.parameter("statuses").unwrap();
		assert!(param.is_repeatable());
		assert!(matches!(&param.value_type, ValueType::List(_)));
	}

	#[test]
	fn test_find_unknown_operation() {
		let operations = vec![operation(Vec::new())];
		assert!(find_operation(&operations, "updateEvent").is_ok());
		assert_eq!(
			find_operation(&operations, "deleteEvent").unwrap_err(),
			AffordanceError::UnknownOperation("deleteEvent".to_string())
		);
	}
}
