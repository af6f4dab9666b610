//! Error types shared by every affordance crate

use serde_json::Value;

/// Errors raised while building or validating affordances
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AffordanceError {
	#[error("Parameter `{parameter}` has unsupported type `{type_name}`")]
	UnsupportedParameterType { parameter: String, type_name: String },

	#[error("Default value {value} of parameter `{parameter}` is not one of its allowed values")]
	InvalidDefault { parameter: String, value: Value },

	#[error("Parameter `{parameter}` is declared more than once in action `{action}`")]
	DuplicateParameter { action: String, parameter: String },

	#[error("Invalid URI template `{template}`: {reason}")]
	InvalidTemplate { template: String, reason: String },

	#[error("Path variable `{variable}` of `{template}` has no value")]
	UnboundPathVariable { variable: String, template: String },

	#[error("Unsupported HTTP method `{0}`")]
	UnsupportedMethod(String),

	#[error("Unknown operation `{0}`")]
	UnknownOperation(String),
}

pub type Result<T> = std::result::Result<T, AffordanceError>;
