//! Supported representations and their media types

use crate::error::{Error, Result};
use affordance_encoders::{HAL_MEDIA_TYPE, JSON_LD_MEDIA_TYPE, SIREN_MEDIA_TYPE};
use affordance_forms::HTML_MEDIA_TYPE;
use std::fmt;
use std::str::FromStr;

/// A wire format an envelope can be rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
	Hal,
	Hydra,
	Siren,
	Html,
}

impl Representation {
	pub fn all() -> [Representation; 4] {
		[
			Representation::Hal,
			Representation::Hydra,
			Representation::Siren,
			Representation::Html,
		]
	}

	pub fn media_type(&self) -> &'static str {
		match self {
			Representation::Hal => HAL_MEDIA_TYPE,
			Representation::Hydra => JSON_LD_MEDIA_TYPE,
			Representation::Siren => SIREN_MEDIA_TYPE,
			Representation::Html => HTML_MEDIA_TYPE,
		}
	}

	/// Short format name, as used in `?format=` style negotiation
	pub fn format(&self) -> &'static str {
		match self {
			Representation::Hal => "hal",
			Representation::Hydra => "jsonld",
			Representation::Siren => "siren",
			Representation::Html => "html",
		}
	}

	/// Look up the representation for a media type
	///
	/// Media type parameters such as `charset` are ignored and the comparison
	/// is case-insensitive. `application/xhtml+xml` is served as HTML.
	///
	/// # Examples
	///
	/// ```
	/// use affordance::Representation;
	///
	/// assert_eq!(
	///     Representation::from_media_type("application/vnd.siren+json").unwrap(),
	///     Representation::Siren
	/// );
	/// assert_eq!(
	///     Representation::from_media_type("text/html; charset=UTF-8").unwrap(),
	///     Representation::Html
	/// );
	/// assert!(Representation::from_media_type("application/xml").is_err());
	/// ```
	pub fn from_media_type(media_type: &str) -> Result<Self> {
		let essence = media_type
			.split(';')
			.next()
			.unwrap_or_default()
			.trim()
			.to_ascii_lowercase();
		if essence == "application/xhtml+xml" {
			return Ok(Representation::Html);
		}
		Self::all()
			.into_iter()
			.find(|repr| repr.media_type() == essence)
			.ok_or_else(|| Error::UnsupportedMediaType(media_type.to_string()))
	}
}

impl fmt::Display for Representation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.media_type())
	}
}

impl FromStr for Representation {
	type Err = Error;

	/// Parse a format name (`hal`, `jsonld`, `siren`, `html`) or a media type
	fn from_str(s: &str) -> Result<Self> {
		Self::all()
			.into_iter()
			.find(|repr| repr.format().eq_ignore_ascii_case(s.trim()))
			.map_or_else(|| Self::from_media_type(s), Ok)
	}
}
