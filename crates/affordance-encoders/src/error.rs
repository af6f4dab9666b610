use affordance_core::AffordanceError;

/// Errors raised while encoding a resource envelope
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
	#[error(transparent)]
	Affordance(#[from] AffordanceError),

	#[error("`{term}` is reserved in {format} and cannot name a property or relation")]
	ReservedTerm { format: &'static str, term: String },

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type EncodeResult<T> = Result<T, EncodeError>;
