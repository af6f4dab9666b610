//! Facade error type

use affordance_conf::SettingsError;
use affordance_core::AffordanceError;
use affordance_encoders::EncodeError;

/// Error returned by [`Hypermedia`](crate::Hypermedia)
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unsupported media type: {0}")]
	UnsupportedMediaType(String),

	#[error(transparent)]
	Encode(#[from] EncodeError),

	#[error(transparent)]
	Settings(#[from] SettingsError),

	#[error(transparent)]
	Affordance(#[from] AffordanceError),
}

pub type Result<T> = std::result::Result<T, Error>;
