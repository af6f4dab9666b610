//! Core types for hypermedia affordances
//!
//! An [`ActionDescriptor`] describes an invocable operation: its HTTP method,
//! a target [`UriTemplate`] and an ordered list of typed [`Parameter`]s. Links
//! expose actions, and a [`ResourceEnvelope`] carries the properties, links
//! and embedded resources of one outgoing response.
//!
//! Descriptors are built either with the typed builders or declaratively from
//! an [`OperationSpec`], whose parameter type names are resolved by a
//! [`TypeInferencer`].
//!
//! ```
//! use affordance_core::{ActionDescriptor, Link, Method, Parameter, ResourceEnvelope, ValueType};
//!
//! let update = ActionDescriptor::builder("updateEvent", Method::Put, "/events/{id}")
//!     .parameter(Parameter::builder("ratingValue", ValueType::Number).default_value(3).build())
//!     .build()
//!     .unwrap();
//!
//! let event = ResourceEnvelope::builder()
//!     .self_link(Link::self_link("/events/1").unwrap())
//!     .property("id", 1)
//!     .link(Link::actionable("updateEvent", update))
//!     .build();
//! assert_eq!(event.affordances().count(), 1);
//! ```

pub mod action;
pub mod error;
pub mod inferencer;
pub mod link;
pub mod operation;
pub mod parameter;
pub mod resource;
pub mod template;
pub mod value;

pub use action::{ActionDescriptor, ActionDescriptorBuilder, Method};
pub use error::{AffordanceError, Result};
pub use inferencer::{InferredType, TypeInferencer};
pub use link::{Link, SELF_REL, resolve_href};
pub use operation::{OperationSpec, ParameterSpec, find_operation};
pub use parameter::{Parameter, ParameterBuilder};
pub use resource::{Embedded, ResourceEnvelope, ResourceEnvelopeBuilder};
pub use template::{Expansion, TemplateSupport, UriTemplate};
pub use value::{ValueType, value_members, value_to_text, values_match};
