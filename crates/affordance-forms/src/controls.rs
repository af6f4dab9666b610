//! Selection of one form control per action parameter

use crate::widgets::{CheckboxInput, Select, TextInput, Widget, WidgetAttrs};
use affordance_core::{Parameter, ResourceEnvelope, value_members, value_to_text, values_match};
use serde::Serialize;
use serde_json::Value;

/// The kind of control rendered for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
	Hidden,
	Checkbox,
	Select,
	SelectMultiple,
	Number,
	Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
	pub value: String,
	pub label: String,
	pub selected: bool,
}

/// One form control, named after its parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormControl {
	pub name: String,
	pub label: String,
	pub kind: ControlKind,
	pub required: bool,
	pub value: Option<String>,
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub options: Vec<SelectOption>,
	pub help_text: Option<String>,
}

impl FormControl {
	/// Pick the control for a parameter
	///
	/// Identifiers are hidden. Otherwise the first matching rule wins:
	/// boolean gives a checkbox, allowed values give a multi-select when
	/// repeatable and a select otherwise, numeric with bounds gives a number
	/// input, and anything else a text input.
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{Parameter, ResourceEnvelope, ValueType};
	/// use affordance_forms::{ControlKind, FormControl};
	///
	/// let param = Parameter::builder("personId", ValueType::Number)
	///     .min(0.0)
	///     .max(9999.0)
	///     .current_value(1234)
	///     .build();
	/// let control = FormControl::from_parameter(&param, &ResourceEnvelope::default());
	/// assert_eq!(control.kind, ControlKind::Number);
	/// assert_eq!(control.value.as_deref(), Some("1234"));
	/// ```
	pub fn from_parameter(param: &Parameter, envelope: &ResourceEnvelope) -> Self {
		let mut control = FormControl {
			name: param.name.clone(),
			label: param.display_label().to_string(),
			kind: ControlKind::Text,
			required: param.required,
			value: None,
			min: None,
			max: None,
			options: Vec::new(),
			help_text: param.help_text.clone(),
		};

		if param.identifier {
			control.kind = ControlKind::Hidden;
			control.value = param
				.current_value
				.as_ref()
				.or_else(|| envelope.property(&param.name))
				.or(param.default_value.as_ref())
				.and_then(value_to_text);
		} else if param.value_type.is_boolean() && !param.is_repeatable() {
			control.kind = ControlKind::Checkbox;
			control.value = param.effective_value().and_then(value_to_text);
		} else if let Some(allowed) = &param.allowed_values {
			control.kind = if param.is_repeatable() {
				ControlKind::SelectMultiple
			} else {
				ControlKind::Select
			};
			let chosen: Vec<&Value> = param.effective_value().map(value_members).unwrap_or_default();
			control.options = allowed
				.iter()
				.filter_map(|value| {
					let text = value_to_text(value)?;
					Some(SelectOption {
						label: text.clone(),
						value: text,
						selected: chosen.iter().any(|c| values_match(c, value)),
					})
				})
				.collect();
		} else if param.value_type.is_numeric() && !param.is_repeatable() && param.has_bounds() {
			control.kind = ControlKind::Number;
			control.min = param.min;
			control.max = param.max;
			control.value = param.effective_value().and_then(value_to_text);
		} else {
			control.value = param.effective_value().and_then(value_to_text);
		}

		control
	}

	/// Whether the control is shown to the user
	pub fn is_visible(&self) -> bool {
		self.kind != ControlKind::Hidden
	}

	pub fn selected_values(&self) -> Vec<&str> {
		self.options
			.iter()
			.filter(|option| option.selected)
			.map(|option| option.value.as_str())
			.collect()
	}

	fn widget(&self) -> Box<dyn Widget> {
		match self.kind {
			ControlKind::Hidden => Box::new(TextInput::hidden()),
			ControlKind::Checkbox => Box::new(CheckboxInput::new()),
			ControlKind::Select => Box::new(Select::new()),
			ControlKind::SelectMultiple => Box::new(Select::multiple()),
			ControlKind::Number => Box::new(TextInput::number()),
			ControlKind::Text => Box::new(TextInput::new()),
		}
	}

	/// Render the bare control without its label
	pub fn render(&self) -> String {
		let mut attrs = WidgetAttrs::new();
		if let Some(min) = self.min {
			attrs = attrs.attr("min", min.to_string());
		}
		if let Some(max) = self.max {
			attrs = attrs.attr("max", max.to_string());
		}
		if self.required && !matches!(self.kind, ControlKind::Hidden | ControlKind::Checkbox) {
			attrs = attrs.required();
		}
		let attrs = attrs.build();

		let widget = self.widget();
		match self.kind {
			ControlKind::Select | ControlKind::SelectMultiple => {
				let choices: Vec<(String, String)> = self
					.options
					.iter()
					.map(|option| (option.value.clone(), option.label.clone()))
					.collect();
				let selected: Vec<String> =
					self.selected_values().into_iter().map(str::to_string).collect();
				widget.render_with_choices(&self.name, &selected, &attrs, &choices)
			}
			_ => widget.render(&self.name, self.value.as_deref(), &attrs),
		}
	}
}
