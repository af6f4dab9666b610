//! Hypermedia encoders for resource envelopes
//!
//! Each encoder implements [`RepresentationEncoder`] and turns a
//! [`ResourceEnvelope`](affordance_core::ResourceEnvelope) into the bytes of
//! one wire format:
//!
//! - [`HalEncoder`]: `application/hal+json`
//! - [`HydraEncoder`]: `application/ld+json` with Hydra operations
//! - [`SirenEncoder`]: `application/vnd.siren+json`
//!
//! Every encoder rejects an action whose default is outside its allowed
//! values before producing any output.

pub mod encoder;
pub mod error;
pub mod hal;
pub mod hydra;
pub mod siren;

pub use encoder::{RepresentationEncoder, validate_envelope};
pub use error::{EncodeError, EncodeResult};
pub use hal::{HAL_MEDIA_TYPE, HalEncoder};
pub use hydra::{HYDRA_NS, HydraEncoder, JSON_LD_MEDIA_TYPE, OWL_NS, XSD_NS};
pub use siren::{
	SIREN_MEDIA_TYPE, SirenAction, SirenEncoder, SirenEntity, SirenField, SirenLink,
	siren_field_type,
};
