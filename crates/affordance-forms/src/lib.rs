//! HTML forms for hypermedia affordances
//!
//! Every parameter of an action maps to exactly one control. The mapping is
//! decided by [`FormControl::from_parameter`]; [`FormRenderer`] puts the
//! controls into `<form>` elements whose `method` and `action` mirror the
//! action descriptor, and renders whole resource envelopes as XHTML.

pub mod controls;
pub mod form;
pub mod widgets;

pub use controls::{ControlKind, FormControl, SelectOption};
pub use form::{FormContext, FormError, FormRenderer, FormResult, HTML_MEDIA_TYPE};
pub use widgets::{
	Attrs, CheckboxInput, Select, TextInput, Widget, WidgetAttrs, html_escape,
};
