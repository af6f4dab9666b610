//! Mapping from declared type names to parameter value types

use crate::error::{AffordanceError, Result};
use crate::value::ValueType;
use std::collections::HashMap;

/// A value type plus whether the declaration made it optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredType {
	pub value_type: ValueType,
	pub optional: bool,
}

/// Resolves declared type names such as `Option<Vec<EventStatus>>`
///
/// # Examples
///
/// ```
/// use affordance_core::{TypeInferencer, ValueType};
///
/// let inferencer = TypeInferencer::new();
/// let inferred = inferencer.infer("param", "Option<i32>").unwrap();
/// assert_eq!(inferred.value_type, ValueType::Number);
/// assert!(inferred.optional);
/// ```
#[derive(Debug, Clone)]
pub struct TypeInferencer {
	type_mappings: HashMap<String, ValueType>,
}

impl Default for TypeInferencer {
	fn default() -> Self {
		Self::new()
	}
}

impl TypeInferencer {
	/// Creates an inferencer that knows the primitive types
	pub fn new() -> Self {
		let mut type_mappings = HashMap::new();

		type_mappings.insert("bool".to_string(), ValueType::Boolean);

		for text in ["String", "str", "&str", "char"] {
			type_mappings.insert(text.to_string(), ValueType::Text);
		}

		for number in [
			"i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
			"usize", "f32", "f64", "Decimal",
		] {
			type_mappings.insert(number.to_string(), ValueType::Number);
		}

		Self { type_mappings }
	}

	/// Register an enumeration; its variants become the allowed values in
	/// declaration order
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{TypeInferencer, ValueType};
	///
	/// let mut inferencer = TypeInferencer::new();
	/// inferencer.register_enum("EventStatus", ["EVENT_SCHEDULED", "EVENT_CANCELLED"]);
	///
	/// let inferred = inferencer.infer("eventStatus", "EventStatus").unwrap();
	/// assert_eq!(inferred.value_type.variants().unwrap(), ["EVENT_SCHEDULED", "EVENT_CANCELLED"]);
	/// ```
	pub fn register_enum<I, S>(&mut self, type_name: impl Into<String>, variants: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let variants = variants.into_iter().map(Into::into).collect();
		self.type_mappings
			.insert(type_name.into(), ValueType::Enumeration(variants));
	}

	/// Register any other custom type mapping
	pub fn register_type(&mut self, type_name: impl Into<String>, value_type: ValueType) {
		self.type_mappings.insert(type_name.into(), value_type);
	}

	/// Infer the value type of `parameter` from its declared type name
	pub fn infer(&self, parameter: &str, type_name: &str) -> Result<InferredType> {
		let type_name = type_name.trim();

		if let Some(inner) = extract_generic(type_name, "Option") {
			let mut inferred = self.infer(parameter, inner)?;
			inferred.optional = true;
			return Ok(inferred);
		}

		let element = extract_generic(type_name, "Vec")
			.or_else(|| extract_generic(type_name, "HashSet"))
			.or_else(|| extract_generic(type_name, "BTreeSet"))
			.or_else(|| extract_slice(type_name));
		if let Some(inner) = element {
			let inner = self.infer(parameter, inner)?;
			tracing::trace!(parameter, type_name, "inferred repeatable parameter");
			return Ok(InferredType {
				value_type: ValueType::List(Box::new(inner.value_type)),
				optional: inner.optional,
			});
		}

		match self.type_mappings.get(type_name) {
			Some(value_type) => {
				tracing::trace!(parameter, type_name, ?value_type, "inferred parameter type");
				Ok(InferredType {
					value_type: value_type.clone(),
					optional: false,
				})
			}
			None => Err(AffordanceError::UnsupportedParameterType {
				parameter: parameter.to_string(),
				type_name: type_name.to_string(),
			}),
		}
	}
}

fn extract_generic<'a>(type_name: &'a str, wrapper: &str) -> Option<&'a str> {
	type_name
		.strip_prefix(wrapper)?
		.trim_start()
		.strip_prefix('<')?
		.strip_suffix('>')
		.map(str::trim)
}

fn extract_slice(type_name: &str) -> Option<&str> {
	type_name
		.trim_start_matches('&')
		.strip_prefix('[')?
		.strip_suffix(']')
		.map(str::trim)
}
