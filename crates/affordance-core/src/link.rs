//! Links and the affordances they expose

use crate::action::ActionDescriptor;
use crate::error::{AffordanceError, Result};
use crate::parameter::Parameter;
use crate::template::{Expansion, TemplateSupport, UriTemplate};
use crate::value::{ValueType, value_to_text};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;

pub const SELF_REL: &str = "self";

/// A relation from a resource to a target, optionally actionable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
	pub rel: String,
	pub href: UriTemplate,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action: Option<ActionDescriptor>,
}

impl Link {
	/// A plain link; `href` may be a URI template
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::Link;
	///
	/// let link = Link::new("search", "/events{?eventName}").unwrap();
	/// assert!(link.is_templated());
	/// assert!(link.affordance().is_some());
	///
	/// let plain = Link::new("next", "/events?page=2").unwrap();
	/// assert!(plain.affordance().is_none());
	///
	/// // each query variable becomes a parameter, so names must be unique
	/// assert!(Link::new("search", "/events{?q}{&q}").is_err());
	/// ```
	pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Result<Self> {
		let rel = rel.into();
		let href = UriTemplate::parse(href)?;
		let mut seen = HashSet::new();
		for name in href.query_variables() {
			if !seen.insert(name) {
				return Err(AffordanceError::DuplicateParameter {
					action: rel,
					parameter: name.to_string(),
				});
			}
		}
		Ok(Self {
			rel,
			href,
			title: None,
			action: None,
		})
	}

	/// A link exposing an action; its href is the action's target
	pub fn actionable(rel: impl Into<String>, action: ActionDescriptor) -> Self {
		Self {
			rel: rel.into(),
			href: action.target.clone(),
			title: action.title.clone(),
			action: Some(action),
		}
	}

	pub fn self_link(href: impl Into<String>) -> Result<Self> {
		Self::new(SELF_REL, href)
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn is_templated(&self) -> bool {
		self.href.is_templated()
	}

	/// The action a client may perform at this link
	///
	/// A templated link without a declared action still affords a GET with
	/// one optional text parameter per query variable.
	pub fn affordance(&self) -> Option<Cow<'_, ActionDescriptor>> {
		if let Some(action) = &self.action {
			return Some(Cow::Borrowed(action));
		}
		if !self.is_templated() {
			return None;
		}
		let mut seen = HashSet::new();
		let parameters = self
			.href
			.query_variables()
			.filter(|name| seen.insert(*name))
			.map(|name| Parameter::builder(name, ValueType::Text).build())
			.collect();
		Some(Cow::Owned(ActionDescriptor::link_query(
			self.rel.clone(),
			self.href.clone(),
			parameters,
			self.title.clone(),
		)))
	}

	/// Whether the link is followed rather than filled in as a form
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::Link;
	///
	/// assert!(Link::new("event", "/events/{id}").unwrap().is_navigation());
	/// assert!(!Link::new("search", "/events{?q}").unwrap().is_navigation());
	/// ```
	pub fn is_navigation(&self) -> bool {
		self.affordance().is_none_or(|action| action.is_navigation())
	}

	/// Expand the href against the owning resource's properties
	///
	/// Bindings of the link's action, if any, take precedence.
	pub fn expand(
		&self,
		properties: &IndexMap<String, Value>,
		support: TemplateSupport,
	) -> Result<Expansion> {
		match &self.action {
			Some(action) => action.expand_target(properties, support),
			None => self.href.expand(
				|name| properties.get(name).and_then(value_to_text),
				support,
			),
		}
	}
}

/// Prefix a relative href with the configured base URL
///
/// Absolute hrefs are returned unchanged. Plain string joining keeps template
/// braces intact.
///
/// # Examples
///
/// ```
/// use affordance_core::resolve_href;
///
/// assert_eq!(resolve_href(Some("http://localhost/"), "/events/1"), "http://localhost/events/1");
/// assert_eq!(resolve_href(Some("http://localhost"), "events{?q}"), "http://localhost/events{?q}");
/// assert_eq!(resolve_href(None, "/events/1"), "/events/1");
/// assert_eq!(resolve_href(Some("http://localhost"), "https://example.com/x"), "https://example.com/x");
/// ```
pub fn resolve_href(base_url: Option<&str>, href: &str) -> String {
	match base_url {
		Some(base) if !href.contains("://") => {
			let base = base.trim_end_matches('/');
			if href.is_empty() {
				base.to_string()
			} else if href.starts_with('/') {
				format!("{}{}", base, href)
			} else {
				format!("{}/{}", base, href)
			}
		}
		_ => href.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::action::Method;
	use serde_json::json;

	#[test]
	fn test_actionable_link_borrows_its_action() {
		let action = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
			.title("Update event")
			.build()
			.unwrap();
		let link = Link::actionable("updateEvent", action.clone());
		assert_eq!(link.href.as_str(), "/events/{id}");
		assert_eq!(link.title.as_deref(), Some("Update event"));
		assert!(matches!(link.affordance(), Some(Cow::Borrowed(a)) if *a == action));
	}

	#[test]
	fn test_templated_link_affords_get_with_query_parameters() {
		let link = Link::new("findEvents", "/events{?eventName,city}").unwrap();
		let action = link.affordance().unwrap();
		assert_eq!(action.name, "findEvents");
		assert_eq!(action.method, Method::Get);
		let names: Vec<_> = action.parameters().iter().map(|p| p.name.as_str()).collect();
		assert_eq!(names, vec!["eventName", "city"]);
		assert!(action.parameters().iter().all(|p| !p.required));
	}

	#[test]
	fn test_path_templated_link_affords_get_without_parameters() {
		let link = Link::new("event", "/events/{id}").unwrap();
		let action = link.affordance().unwrap();
		assert!(action.parameters().is_empty());
	}

	#[test]
	fn test_repeated_query_variable_rejected() {
		let err = Link::new("search", "/events{?q}{&q}").unwrap_err();
		assert_eq!(
			err,
			AffordanceError::DuplicateParameter {
				action: "search".to_string(),
				parameter: "q".to_string(),
			}
		);
	}

	#[test]
	fn test_repeated_query_variable_keeps_affordance() {
		let mut link = Link::new("search", "/events{?q}").unwrap();
		link.href = UriTemplate::parse("/events{?q}{&q,page}").unwrap();
		let action = link.affordance().unwrap();
		let names: Vec<_> = action.parameters().iter().map(|p| p.name.as_str()).collect();
		assert_eq!(names, vec!["q", "page"]);
	}

	#[test]
	fn test_navigation_links() {
		let get = ActionDescriptor::builder("event", Method::Get, "/events/{id}")
			.build()
			.unwrap();
		let delete = ActionDescriptor::builder("cancel", Method::Delete, "/events/{id}")
			.build()
			.unwrap();
		assert!(Link::actionable("event", get).is_navigation());
		assert!(!Link::actionable("cancel", delete).is_navigation());
		assert!(Link::new("next", "/events?page=2").unwrap().is_navigation());
	}

	#[test]
	fn test_expand_from_properties() {
		let link = Link::new("reviews", "/events/{id}/reviews").unwrap();
		let properties = IndexMap::from([("id".to_string(), json!(1))]);
		let expansion = link.expand(&properties, TemplateSupport::Omit).unwrap();
		assert_eq!(expansion.href, "/events/1/reviews");
	}
}
