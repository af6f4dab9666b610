//! Value types recognized by action parameters

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The type of value a parameter accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ValueType {
	Text,
	Number,
	Boolean,
	/// One of a finite, ordered set of symbolic values
	Enumeration(Vec<String>),
	/// Zero or more values of the inner type
	List(Box<ValueType>),
}

impl ValueType {
	/// Whether the parameter may carry several values
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::ValueType;
	///
	/// assert!(ValueType::List(Box::new(ValueType::Text)).is_repeatable());
	/// assert!(!ValueType::Number.is_repeatable());
	/// ```
	pub fn is_repeatable(&self) -> bool {
		matches!(self, ValueType::List(_))
	}

	/// The type of a single value, looking through lists
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::ValueType;
	///
	/// let list = ValueType::List(Box::new(ValueType::Number));
	/// assert_eq!(list.element_type(), &ValueType::Number);
	/// assert_eq!(ValueType::Boolean.element_type(), &ValueType::Boolean);
	/// ```
	pub fn element_type(&self) -> &ValueType {
		match self {
			ValueType::List(inner) => inner.element_type(),
			other => other,
		}
	}

	pub fn is_numeric(&self) -> bool {
		matches!(self.element_type(), ValueType::Number)
	}

	pub fn is_boolean(&self) -> bool {
		matches!(self.element_type(), ValueType::Boolean)
	}

	/// Variants of an enumeration, looking through lists
	pub fn variants(&self) -> Option<&[String]> {
		match self.element_type() {
			ValueType::Enumeration(variants) => Some(variants),
			_ => None,
		}
	}

	/// XML schema datatype used by linked-data encoders
	pub fn xsd_type(&self) -> &'static str {
		match self.element_type() {
			ValueType::Number => "xsd:decimal",
			ValueType::Boolean => "xsd:boolean",
			_ => "xsd:string",
		}
	}
}

/// Render a JSON value the way it appears in a URL or an HTML attribute
///
/// Null renders as nothing; arrays are joined with commas.
///
/// # Examples
///
/// ```
/// use affordance_core::value_to_text;
/// use serde_json::json;
///
/// assert_eq!(value_to_text(&json!("pj123")), Some("pj123".to_string()));
/// assert_eq!(value_to_text(&json!(42)), Some("42".to_string()));
/// assert_eq!(value_to_text(&json!(["a", "b"])), Some("a,b".to_string()));
/// assert_eq!(value_to_text(&json!(null)), None);
/// ```
pub fn value_to_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		Value::Array(items) => {
			let parts: Vec<String> = items.iter().filter_map(value_to_text).collect();
			Some(parts.join(","))
		}
		Value::Object(_) => Some(value.to_string()),
	}
}

/// Flatten a value into its individual members
///
/// Scalars become a single-element list, arrays their members, null nothing.
pub fn value_members(value: &Value) -> Vec<&Value> {
	match value {
		Value::Null => Vec::new(),
		Value::Array(items) => items.iter().filter(|v| !v.is_null()).collect(),
		other => vec![other],
	}
}

/// Compare two values for membership checks
///
/// Numbers compare by numeric value so that `3` and `3.0` match, and a string
/// matches a number with the same textual form (enum variants declared as
/// strings against bound numeric values).
pub fn values_match(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
		(Value::String(_), Value::Number(_)) | (Value::Number(_), Value::String(_)) => {
			value_to_text(a) == value_to_text(b)
		}
		_ => a == b,
	}
}
