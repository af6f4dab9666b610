//! Action parameters and their builder

use crate::error::{AffordanceError, Result};
use crate::value::{ValueType, value_members, values_match};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, typed input of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
	pub name: String,
	#[serde(rename = "type")]
	pub value_type: ValueType,
	pub required: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_value: Option<Value>,
	/// Value bound by the caller, e.g. the current state of the resource
	#[serde(skip_serializing_if = "Option::is_none")]
	pub current_value: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub allowed_values: Option<Vec<Value>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	/// Non-editable identifier, rendered hidden
	#[serde(default)]
	pub identifier: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub help_text: Option<String>,
}

impl Parameter {
	/// Start building a parameter
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{Parameter, ValueType};
	///
	/// let param = Parameter::builder("ratingValue", ValueType::Number)
	///     .default_value(3)
	///     .build();
	/// assert_eq!(param.name, "ratingValue");
	/// assert_eq!(param.default_value, Some(serde_json::json!(3)));
	/// assert!(!param.required);
	/// ```
	pub fn builder(name: impl Into<String>, value_type: ValueType) -> ParameterBuilder {
		ParameterBuilder::new(name, value_type)
	}

	pub fn is_repeatable(&self) -> bool {
		self.value_type.is_repeatable()
	}

	pub fn has_bounds(&self) -> bool {
		self.min.is_some() || self.max.is_some()
	}

	/// The current value if bound, the declared default otherwise
	pub fn effective_value(&self) -> Option<&Value> {
		self.current_value
			.as_ref()
			.filter(|v| !v.is_null())
			.or(self.default_value.as_ref().filter(|v| !v.is_null()))
	}

	/// The text shown next to the control
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}

	/// Check the default against the allowed-value set
	///
	/// A repeatable default must have every member in the set.
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{AffordanceError, Parameter, ValueType};
	/// use serde_json::json;
	///
	/// let param = Parameter::builder("mood", ValueType::Text)
	///     .allowed_values(vec![json!("happy"), json!("angry")])
	///     .default_value("bored")
	///     .build();
	/// assert!(matches!(param.validate(), Err(AffordanceError::InvalidDefault { .. })));
	/// ```
	pub fn validate(&self) -> Result<()> {
		let (Some(allowed), Some(default)) = (&self.allowed_values, &self.default_value) else {
			return Ok(());
		};
		for member in value_members(default) {
			if !allowed.iter().any(|a| values_match(a, member)) {
				return Err(AffordanceError::InvalidDefault {
					parameter: self.name.clone(),
					value: member.clone(),
				});
			}
		}
		Ok(())
	}
}

/// Builder for [`Parameter`]
#[derive(Debug, Clone)]
pub struct ParameterBuilder {
	param: Parameter,
}

impl ParameterBuilder {
	/// Creates a builder; enumeration variants become the allowed values
	pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
		let allowed_values = value_type
			.variants()
			.map(|variants| variants.iter().cloned().map(Value::String).collect());
		Self {
			param: Parameter {
				name: name.into(),
				value_type,
				required: false,
				default_value: None,
				current_value: None,
				allowed_values,
				min: None,
				max: None,
				min_length: None,
				max_length: None,
				identifier: false,
				label: None,
				help_text: None,
			},
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.param.required = required;
		self
	}

	pub fn default_value(mut self, value: impl Into<Value>) -> Self {
		let value: Value = value.into();
		self.param.default_value = Some(value).filter(|v| !v.is_null());
		self
	}

	pub fn current_value(mut self, value: impl Into<Value>) -> Self {
		let value: Value = value.into();
		self.param.current_value = Some(value).filter(|v| !v.is_null());
		self
	}

	/// Restrict the parameter to an ordered set of values
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{Parameter, ValueType};
	/// use serde_json::json;
	///
	/// let param = Parameter::builder("attr", ValueType::List(Box::new(ValueType::Text)))
	///     .allowed_values(vec![json!("hungry"), json!("thirsty"), json!("sleepy")])
	///     .build();
	/// assert_eq!(param.allowed_values.as_ref().unwrap().len(), 3);
	/// assert!(param.is_repeatable());
	/// ```
	pub fn allowed_values(mut self, values: Vec<Value>) -> Self {
		self.param.allowed_values = Some(values);
		self
	}

	pub fn min(mut self, min: f64) -> Self {
		self.param.min = Some(min);
		self
	}

	pub fn max(mut self, max: f64) -> Self {
		self.param.max = Some(max);
		self
	}

	pub fn min_length(mut self, min_length: usize) -> Self {
		self.param.min_length = Some(min_length);
		self
	}

	pub fn max_length(mut self, max_length: usize) -> Self {
		self.param.max_length = Some(max_length);
		self
	}

	/// Mark the parameter as a non-editable identifier
	pub fn identifier(mut self) -> Self {
		self.param.identifier = true;
		self
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.param.label = Some(label.into());
		self
	}

	pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
		self.param.help_text = Some(help_text.into());
		self
	}

	pub fn build(self) -> Parameter {
		self.param
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn event_status() -> ValueType {
		ValueType::Enumeration(vec![
			"EVENT_CANCELLED".to_string(),
			"EVENT_POSTPONED".to_string(),
			"EVENT_SCHEDULED".to_string(),
			"EVENT_RESCHEDULED".to_string(),
		])
	}

	#[test]
	fn test_enumeration_variants_become_allowed_values_in_order() {
		let param = Parameter::builder("eventStatus", event_status()).build();
		let allowed = param.allowed_values.unwrap();
		assert_eq!(allowed.len(), 4);
		assert_eq!(allowed[0], json!("EVENT_CANCELLED"));
		assert_eq!(allowed[3], json!("EVENT_RESCHEDULED"));
	}

	#[test]
	fn test_default_within_allowed_values_is_valid() {
		let param = Parameter::builder("eventStatus", event_status())
			.default_value("EVENT_SCHEDULED")
			.build();
		assert!(param.validate().is_ok());
	}

	#[test]
	fn test_default_outside_allowed_values_is_rejected() {
		let param = Parameter::builder("eventStatus", event_status())
			.default_value("EVENT_UNKNOWN")
			.build();
		assert_eq!(
			param.validate(),
			Err(AffordanceError::InvalidDefault {
				parameter: "eventStatus".to_string(),
				value: json!("EVENT_UNKNOWN"),
			})
		);
	}

	#[test]
	fn test_repeatable_default_checks_every_member() {
		let param = Parameter::builder("sports", ValueType::List(Box::new(event_status())))
			.default_value(json!(["EVENT_CANCELLED", "SOCCER"]))
			.build();
		assert!(matches!(
			param.validate(),
			Err(AffordanceError::InvalidDefault { value, .. }) if value == json!("SOCCER")
		));
	}

	#[test]
	fn test_default_without_allowed_values_is_unchecked() {
		let param = Parameter::builder("eventName", ValueType::Text)
			.default_value("anything")
			.build();
		assert!(param.validate().is_ok());
	}

	#[test]
	fn test_null_values_are_absent() {
		let param = Parameter::builder("eventName", ValueType::Text)
			.default_value(Value::Null)
			.current_value(Value::Null)
			.build();
		assert!(param.default_value.is_none());
		assert!(param.current_value.is_none());
		assert!(param.effective_value().is_none());
	}

	#[test]
	fn test_effective_value_prefers_current() {
		let param = Parameter::builder("personId", ValueType::Number)
			.default_value(1)
			.current_value(1234)
			.build();
		assert_eq!(param.effective_value(), Some(&json!(1234)));
	}

	#[test]
	fn test_display_label_falls_back_to_name() {
		let plain = Parameter::builder("firstname", ValueType::Text).build();
		assert_eq!(plain.display_label(), "firstname");

		let labelled = Parameter::builder("firstname", ValueType::Text)
			.label("First name")
			.build();
		assert_eq!(labelled.display_label(), "First name");
	}
}
