//! # Affordance
//!
//! Hypermedia representations and HTML forms for REST actions.
//!
//! A handler describes what a client may do next with a resource as
//! [`ActionDescriptor`]s attached to links of a [`ResourceEnvelope`]. The
//! envelope is then rendered into whichever representation the client asked
//! for:
//!
//! - HAL (`application/hal+json`)
//! - JSON-LD with Hydra operations (`application/ld+json`)
//! - Siren (`application/vnd.siren+json`)
//! - XHTML with one form per action (`text/html`)
//!
//! ## Crates
//!
//! - [`core`]: descriptors, parameters, links, envelopes and URI templates
//! - [`conf`]: TOML settings and the operation catalog
//! - [`encoders`]: the JSON encoders
//! - [`forms`]: widgets and the form renderer
//!
//! ## Example
//!
//! ```
//! use affordance::{
//!     ActionDescriptor, Hypermedia, Link, Method, Parameter, ResourceEnvelope, ValueType,
//! };
//! use serde_json::Value;
//!
//! let update = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
//!     .parameter(Parameter::builder("ratingValue", ValueType::Number).default_value(3).build())
//!     .build()
//!     .unwrap();
//! let event = ResourceEnvelope::builder()
//!     .self_link(Link::self_link("/events/{id}").unwrap())
//!     .property("id", 1)
//!     .link(Link::actionable("updateEvent", update))
//!     .build();
//!
//! let hypermedia = Hypermedia::new();
//! let siren = hypermedia.render_media_type(&event, "application/vnd.siren+json").unwrap();
//! let siren: Value = serde_json::from_slice(&siren).unwrap();
//! assert_eq!(siren["actions"][0]["href"], "/events/1");
//! assert_eq!(siren["actions"][0]["fields"][0]["value"], 3);
//! ```

pub mod error;
pub mod hypermedia;
pub mod representation;

pub use affordance_conf as conf;
pub use affordance_core as core;
pub use affordance_encoders as encoders;
pub use affordance_forms as forms;

pub use affordance_conf::{AffordanceSettings, OperationCatalog, SettingsError};
pub use affordance_core::{
	ActionDescriptor, AffordanceError, Link, Method, OperationSpec, Parameter, ParameterSpec,
	ResourceEnvelope, TemplateSupport, TypeInferencer, UriTemplate, ValueType,
};
pub use affordance_encoders::{
	EncodeError, HalEncoder, HydraEncoder, RepresentationEncoder, SirenEncoder,
};
pub use affordance_forms::FormRenderer;

pub use error::{Error, Result};
pub use hypermedia::Hypermedia;
pub use representation::Representation;
