//! Settings loaded from TOML

use affordance_core::{AffordanceError, OperationSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Error type for loading and validating settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid base URL `{url}`: {reason}")]
	InvalidBaseUrl { url: String, reason: String },

	#[error(transparent)]
	Affordance(#[from] AffordanceError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// JSON-LD settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraSettings {
	/// Default vocabulary for unprefixed terms
	pub vocab: String,
}

impl Default for HydraSettings {
	fn default() -> Self {
		Self {
			vocab: "http://schema.org/".to_string(),
		}
	}
}

/// HTML form settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Document title used when a resource has no semantic type
	pub title: String,
	pub submit_label: String,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			title: "Resource".to_string(),
			submit_label: "Submit".to_string(),
		}
	}
}

/// Top-level settings
///
/// # Examples
///
/// ```
/// use affordance_conf::AffordanceSettings;
///
/// let settings = AffordanceSettings::from_toml_str(r#"
/// base_url = "http://localhost"
///
/// [enums]
/// EventStatus = ["EVENT_SCHEDULED", "EVENT_CANCELLED"]
///
/// [[operations]]
/// name = "updateEvent"
/// method = "PUT"
/// target = "/events/{id}"
/// "#).unwrap();
///
/// assert_eq!(settings.base_url.as_deref(), Some("http://localhost"));
/// assert_eq!(settings.hydra.vocab, "http://schema.org/");
/// assert_eq!(settings.operations.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordanceSettings {
	/// Prefix for relative hrefs
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base_url: Option<String>,
	/// Pretty-print JSON payloads
	pub pretty: bool,
	pub hydra: HydraSettings,
	pub forms: FormSettings,
	/// Enumerations by type name, variants in declaration order
	pub enums: BTreeMap<String, Vec<String>>,
	pub operations: Vec<OperationSpec>,
}

impl AffordanceSettings {
	/// Parse settings from a TOML document
	pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
		let settings: AffordanceSettings = toml::from_str(content)?;
		tracing::debug!(
			enums = settings.enums.len(),
			operations = settings.operations.len(),
			"loaded affordance settings"
		);
		Ok(settings)
	}

	/// Load settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let content = fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Check the base URL and every declared operation
	///
	/// # Examples
	///
	/// ```
	/// use affordance_conf::{AffordanceSettings, SettingsError};
	///
	/// let settings = AffordanceSettings::from_toml_str(r#"base_url = "/relative""#).unwrap();
	/// assert!(matches!(settings.validate(), Err(SettingsError::InvalidBaseUrl { .. })));
	/// ```
	pub fn validate(&self) -> SettingsResult<()> {
		if let Some(base_url) = &self.base_url {
			let parsed = url::Url::parse(base_url).map_err(|e| SettingsError::InvalidBaseUrl {
				url: base_url.clone(),
				reason: e.to_string(),
			})?;
			if !parsed.has_host() {
				return Err(SettingsError::InvalidBaseUrl {
					url: base_url.clone(),
					reason: "URL has no host".to_string(),
				});
			}
		}

		crate::catalog::OperationCatalog::from_settings(self).validate()?;
		Ok(())
	}
}
