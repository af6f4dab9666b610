//! Forms for affordances and the HTML document around them

use crate::controls::FormControl;
use crate::widgets::html_escape;
use affordance_core::{
	ActionDescriptor, AffordanceError, Link, ResourceEnvelope, TemplateSupport, resolve_href,
	value_to_text,
};
use affordance_encoders::{EncodeError, EncodeResult, RepresentationEncoder, validate_envelope};
use serde::Serialize;

pub const HTML_MEDIA_TYPE: &str = "text/html";

/// Form rendering error
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
	#[error(transparent)]
	Affordance(#[from] AffordanceError),
}

pub type FormResult<T> = Result<T, FormError>;

impl From<FormError> for EncodeError {
	fn from(err: FormError) -> Self {
		match err {
			FormError::Affordance(inner) => EncodeError::Affordance(inner),
		}
	}
}

/// Everything needed to render one `<form>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormContext {
	pub name: String,
	pub method: String,
	pub action: String,
	pub title: Option<String>,
	pub controls: Vec<FormControl>,
}

impl FormContext {
	/// Render the form; visible controls are wrapped in their label
	pub fn render(&self, submit_label: &str) -> String {
		let mut html = format!(
			r#"<form name="{}" method="{}" action="{}">"#,
			html_escape(&self.name),
			html_escape(&self.method),
			html_escape(&self.action)
		);
		if let Some(title) = &self.title {
			html.push_str(&format!("<h3>{}</h3>", html_escape(title)));
		}
		for control in &self.controls {
			if control.is_visible() {
				html.push_str(&format!(
					"<label>{}{}</label>",
					html_escape(&control.label),
					control.render()
				));
			} else {
				html.push_str(&control.render());
			}
		}
		html.push_str(&format!(
			r#"<button type="submit">{}</button></form>"#,
			html_escape(submit_label)
		));
		html
	}
}

/// Renders envelopes as XHTML documents with one form per affordance
///
/// # Examples
///
/// ```
/// use affordance_core::{ActionDescriptor, Link, Method, Parameter, ResourceEnvelope, ValueType};
/// use affordance_forms::FormRenderer;
///
/// let update = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
///     .parameter(Parameter::builder("ratingValue", ValueType::Number).default_value(3).build())
///     .build()
///     .unwrap();
/// let event = ResourceEnvelope::builder()
///     .property("id", 1)
///     .link(Link::actionable("updateEvent", update))
///     .build();
///
/// let html = FormRenderer::new().render_document(&event).unwrap();
/// assert!(html.contains(r#"<form name="updateEvent" method="PUT" action="/events/1">"#));
/// assert!(html.contains(r#"<input type="text" name="ratingValue" value="3" />"#));
/// ```
#[derive(Debug, Clone)]
pub struct FormRenderer {
	/// Prefix for relative hrefs
	pub base_url: Option<String>,
	/// Document title when the resource has no semantic type
	pub title: String,
	pub submit_label: String,
}

impl Default for FormRenderer {
	fn default() -> Self {
		Self {
			base_url: None,
			title: "Resource".to_string(),
			submit_label: "Submit".to_string(),
		}
	}
}

impl FormRenderer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	pub fn submit_label(mut self, submit_label: impl Into<String>) -> Self {
		self.submit_label = submit_label.into();
		self
	}

	/// One control per parameter, in parameter order
	pub fn controls(&self, action: &ActionDescriptor, envelope: &ResourceEnvelope) -> Vec<FormControl> {
		action
			.parameters()
			.iter()
			.map(|param| FormControl::from_parameter(param, envelope))
			.collect()
	}

	/// Build the form context for an affordance of `envelope`
	///
	/// The action URL has its path variables substituted; unresolved query
	/// variables are left out since HTML forms cannot carry templates.
	pub fn form_context(
		&self,
		link: &Link,
		action: &ActionDescriptor,
		envelope: &ResourceEnvelope,
	) -> FormResult<FormContext> {
		action.validate()?;
		let expansion = action.expand_target(envelope.properties(), TemplateSupport::Omit)?;
		Ok(FormContext {
			name: action.name.clone(),
			method: action.method.as_str().to_string(),
			action: resolve_href(self.base_url.as_deref(), &expansion.href),
			title: action.title.clone().or_else(|| link.title.clone()),
			controls: self.controls(action, envelope),
		})
	}

	/// Render a single form
	pub fn render_form(
		&self,
		link: &Link,
		action: &ActionDescriptor,
		envelope: &ResourceEnvelope,
	) -> FormResult<String> {
		Ok(self
			.form_context(link, action, envelope)?
			.render(&self.submit_label))
	}

	/// Render the whole document: properties, links, forms and embedded
	/// resources
	pub fn render_document(&self, envelope: &ResourceEnvelope) -> FormResult<String> {
		validate_envelope(envelope)?;
		let title = envelope.semantic_type().unwrap_or(&self.title);

		let mut html = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
		html.push_str("<!DOCTYPE html>");
		html.push_str(r#"<html xmlns="http://www.w3.org/1999/xhtml">"#);
		html.push_str(&format!(
			"<head><title>{}</title></head><body>",
			html_escape(title)
		));
		html.push_str(&format!("<h1>{}</h1>", html_escape(title)));
		self.render_resource(envelope, &mut html)?;
		html.push_str("</body></html>");
		Ok(html)
	}

	fn render_resource(&self, envelope: &ResourceEnvelope, html: &mut String) -> FormResult<()> {
		if !envelope.properties().is_empty() {
			html.push_str("<dl>");
			for (name, value) in envelope.properties() {
				html.push_str(&format!(
					"<dt>{}</dt><dd>{}</dd>",
					html_escape(name),
					html_escape(&value_to_text(value).unwrap_or_default())
				));
			}
			html.push_str("</dl>");
		}

		let self_link = envelope.self_link().into_iter();
		let links: Vec<&Link> = self_link
			.chain(envelope.navigation_links())
			.collect();
		if !links.is_empty() {
			html.push_str("<nav>");
			for link in links {
				let expansion = link.expand(envelope.properties(), TemplateSupport::Omit)?;
				html.push_str(&format!(
					r#"<a rel="{}" href="{}">{}</a>"#,
					html_escape(&link.rel),
					html_escape(&resolve_href(self.base_url.as_deref(), &expansion.href)),
					html_escape(link.title.as_deref().unwrap_or(&link.rel))
				));
			}
			html.push_str("</nav>");
		}

		// A safe action with nothing to fill in is a link, not a form
		for (link, action) in envelope.affordances() {
			if !action.is_navigation() {
				html.push_str(&self.render_form(link, &action, envelope)?);
			}
		}

		if !envelope.embedded().is_empty() {
			html.push_str("<ul>");
			for embedded in envelope.embedded() {
				html.push_str(&format!(
					r#"<li title="{}">"#,
					html_escape(&embedded.rel)
				));
				self.render_resource(&embedded.resource, html)?;
				html.push_str("</li>");
			}
			html.push_str("</ul>");
		}
		Ok(())
	}
}

impl RepresentationEncoder for FormRenderer {
	fn media_type(&self) -> &'static str {
		HTML_MEDIA_TYPE
	}

	fn format(&self) -> &'static str {
		"html"
	}

	fn encode(&self, envelope: &ResourceEnvelope) -> EncodeResult<Vec<u8>> {
		let html = self.render_document(envelope)?;
		tracing::debug!(
			media_type = HTML_MEDIA_TYPE,
			forms = html.matches("<form ").count(),
			embedded = envelope.embedded().len(),
			"rendered resource"
		);
		Ok(html.into_bytes())
	}
}
