//! HTML widgets
//!
//! Widgets render a single form control as XHTML. Attributes are kept in
//! insertion order so that rendering is deterministic.

/// Ordered attribute list
pub type Attrs = [(String, String)];

/// Base widget trait
pub trait Widget: Send + Sync {
	/// Render the widget as HTML
	fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> String;

	/// Render the widget with `(value, label)` choices, marking `selected`
	fn render_with_choices(
		&self,
		name: &str,
		selected: &[String],
		attrs: &Attrs,
		_choices: &[(String, String)],
	) -> String {
		self.render(name, selected.first().map(String::as_str), attrs)
	}
}

fn push_attrs(html: &mut String, attrs: &Attrs) {
	for (key, val) in attrs {
		html.push_str(&format!(r#" {}="{}""#, key, html_escape(val)));
	}
}

/// `<input>` of a textual type: text, number or hidden
#[derive(Debug, Clone)]
pub struct TextInput {
	input_type: &'static str,
}

impl TextInput {
	pub fn new() -> Self {
		Self { input_type: "text" }
	}

	pub fn number() -> Self {
		Self {
			input_type: "number",
		}
	}

	pub fn hidden() -> Self {
		Self {
			input_type: "hidden",
		}
	}
}

impl Default for TextInput {
	fn default() -> Self {
		Self::new()
	}
}

impl Widget for TextInput {
	fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> String {
		let mut html = format!(
			r#"<input type="{}" name="{}""#,
			self.input_type,
			html_escape(name)
		);

		if let Some(v) = value {
			html.push_str(&format!(r#" value="{}""#, html_escape(v)));
		}

		push_attrs(&mut html, attrs);
		html.push_str(" />");
		html
	}
}

/// Checkbox input widget
#[derive(Debug, Clone, Default)]
pub struct CheckboxInput;

impl CheckboxInput {
	pub fn new() -> Self {
		Self
	}
}

impl Widget for CheckboxInput {
	fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> String {
		let mut html = format!(
			r#"<input type="checkbox" name="{}" value="true""#,
			html_escape(name)
		);

		if matches!(value, Some("true" | "1" | "on")) {
			html.push_str(r#" checked="checked""#);
		}

		push_attrs(&mut html, attrs);
		html.push_str(" />");
		html
	}
}

/// Select widget, single or multiple
#[derive(Debug, Clone, Default)]
pub struct Select {
	multiple: bool,
}

impl Select {
	pub fn new() -> Self {
		Self { multiple: false }
	}

	pub fn multiple() -> Self {
		Self { multiple: true }
	}
}

impl Widget for Select {
	fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> String {
		let selected: Vec<String> = value.map(str::to_string).into_iter().collect();
		self.render_with_choices(name, &selected, attrs, &[])
	}

	fn render_with_choices(
		&self,
		name: &str,
		selected: &[String],
		attrs: &Attrs,
		choices: &[(String, String)],
	) -> String {
		let mut html = format!(r#"<select name="{}""#, html_escape(name));
		if self.multiple {
			html.push_str(r#" multiple="multiple""#);
		}
		push_attrs(&mut html, attrs);
		html.push('>');

		for (choice_value, choice_label) in choices {
			html.push_str("<option");
			html.push_str(&format!(r#" value="{}""#, html_escape(choice_value)));

			if selected.contains(choice_value) {
				html.push_str(r#" selected="selected""#);
			}

			html.push('>');
			html.push_str(&html_escape(choice_label));
			html.push_str("</option>");
		}

		html.push_str("</select>");
		html
	}
}

/// Escape text for use in HTML content and attribute values
///
/// # Examples
///
/// ```
/// use affordance_forms::html_escape;
///
/// assert_eq!(html_escape(r#"<a href="x">Tom & Jerry</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;");
/// ```
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Widget attribute builder
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
	attrs: Vec<(String, String)>,
}

impl WidgetAttrs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set an attribute, replacing an earlier value for the same key
	pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		let key = key.into();
		let value = value.into();
		match self.attrs.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => *existing = value,
			None => self.attrs.push((key, value)),
		}
		self
	}

	pub fn required(self) -> Self {
		self.attr("required", "required")
	}

	pub fn build(self) -> Vec<(String, String)> {
		self.attrs
	}
}
