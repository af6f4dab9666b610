//! Named operations resolved into action descriptors

use crate::settings::AffordanceSettings;
use affordance_core::{
	ActionDescriptor, Link, OperationSpec, Result, TypeInferencer, find_operation,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Declared operations plus the inferencer that resolves their types
///
/// # Examples
///
/// ```
/// use affordance_conf::{AffordanceSettings, OperationCatalog};
/// use serde_json::json;
///
/// let settings = AffordanceSettings::from_toml_str(r#"
/// [[operations]]
/// name = "updateEvent"
/// method = "PUT"
/// target = "/events/{id}"
/// [[operations.params]]
/// name = "ratingValue"
/// type = "i32"
/// default = 3
/// "#).unwrap();
///
/// let catalog = OperationCatalog::from_settings(&settings);
/// let action = catalog.action("updateEvent", [("id", json!(1))]).unwrap();
/// assert_eq!(action.binding("id"), Some(&json!(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OperationCatalog {
	inferencer: TypeInferencer,
	operations: Vec<OperationSpec>,
}

impl OperationCatalog {
	pub fn new(inferencer: TypeInferencer) -> Self {
		Self {
			inferencer,
			operations: Vec::new(),
		}
	}

	/// Catalog of the configured operations with the configured enums registered
	pub fn from_settings(settings: &AffordanceSettings) -> Self {
		let mut inferencer = TypeInferencer::new();
		for (name, variants) in &settings.enums {
			inferencer.register_enum(name, variants.iter().cloned());
		}
		let mut catalog = Self::new(inferencer);
		for operation in &settings.operations {
			catalog.register(operation.clone());
		}
		catalog
	}

	/// Add an operation, replacing any with the same name
	pub fn register(&mut self, operation: OperationSpec) {
		match self.operations.iter_mut().find(|op| op.name == operation.name) {
			Some(existing) => *existing = operation,
			None => self.operations.push(operation),
		}
	}

	pub fn inferencer(&self) -> &TypeInferencer {
		&self.inferencer
	}

	pub fn inferencer_mut(&mut self) -> &mut TypeInferencer {
		&mut self.inferencer
	}

	pub fn operations(&self) -> &[OperationSpec] {
		&self.operations
	}

	/// Build the named action with the given bound values
	pub fn action<I, K, V>(&self, name: &str, bindings: I) -> Result<ActionDescriptor>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		let operation = find_operation(&self.operations, name)?;
		let bindings: BTreeMap<String, Value> = bindings
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		ActionDescriptor::from_operation(operation, &self.inferencer, &bindings)
	}

	/// An actionable link whose relation is the operation name
	pub fn link<I, K, V>(&self, name: &str, bindings: I) -> Result<Link>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		let action = self.action(name, bindings)?;
		Ok(Link::actionable(name, action))
	}

	/// Build every operation without bindings and check its defaults
	pub fn validate(&self) -> Result<()> {
		for operation in &self.operations {
			ActionDescriptor::from_operation(operation, &self.inferencer, &BTreeMap::new())?
				.validate()?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use affordance_core::{AffordanceError, Method};
	use serde_json::json;

	fn spec(name: &str, target: &str) -> OperationSpec {
		OperationSpec {
			name: name.to_string(),
			method: Method::Get,
			target: target.to_string(),
			semantic_type: None,
			title: None,
			media_type: None,
			params: Vec::new(),
		}
	}

	#[test]
	fn test_register_replaces_same_name() {
		let mut catalog = OperationCatalog::default();
		catalog.register(spec("findEvents", "/events"));
		catalog.register(spec("findEvents", "/events{?eventName}"));
		assert_eq!(catalog.operations().len(), 1);
		assert_eq!(catalog.operations()[0].target, "/events{?eventName}");
	}

	#[test]
	fn test_unknown_operation() {
		let catalog = OperationCatalog::default();
		let err = catalog
			.action("deleteEvent", Vec::<(String, Value)>::new())
			.unwrap_err();
		assert_eq!(err, AffordanceError::UnknownOperation("deleteEvent".to_string()));
	}

	#[test]
	fn test_link_uses_operation_name_as_rel() {
		let mut catalog = OperationCatalog::default();
		catalog.register(spec("event", "/events/{id}"));
		let link = catalog.link("event", [("id", json!(4))]).unwrap();
		assert_eq!(link.rel, "event");
		assert_eq!(link.action.unwrap().binding("id"), Some(&json!(4)));
	}

	#[test]
	fn test_validate_reports_broken_template() {
		let mut catalog = OperationCatalog::default();
		catalog.register(spec("broken", "/events/{id"));
		assert!(matches!(
			catalog.validate(),
			Err(AffordanceError::InvalidTemplate { .. })
		));
	}
}
