//! Configured encoders behind one entry point

use crate::error::Result;
use crate::representation::Representation;
use affordance_conf::{AffordanceSettings, OperationCatalog};
use affordance_core::ResourceEnvelope;
use affordance_encoders::{HalEncoder, HydraEncoder, RepresentationEncoder, SirenEncoder};
use affordance_forms::FormRenderer;

/// Renders resource envelopes into any supported representation
///
/// # Examples
///
/// ```
/// use affordance::{AffordanceSettings, Hypermedia, Representation};
///
/// let settings = AffordanceSettings::from_toml_str(r#"
/// base_url = "http://localhost"
///
/// [[operations]]
/// name = "updateEvent"
/// method = "PUT"
/// target = "/events/{id}"
///
/// [[operations.params]]
/// name = "ratingValue"
/// type = "i32"
/// default = 3
/// "#).unwrap();
/// let hypermedia = Hypermedia::from_settings(&settings).unwrap();
///
/// let event = affordance::ResourceEnvelope::builder()
///     .property("id", 1)
///     .link(hypermedia.catalog().link("updateEvent", [("id", 1)]).unwrap())
///     .build();
///
/// let html = hypermedia.render(&event, Representation::Html).unwrap();
/// let html = String::from_utf8(html).unwrap();
/// assert!(html.contains(r#"action="http://localhost/events/1""#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Hypermedia {
	hal: HalEncoder,
	hydra: HydraEncoder,
	siren: SirenEncoder,
	forms: FormRenderer,
	catalog: OperationCatalog,
}

impl Hypermedia {
	pub fn new() -> Self {
		Self::default()
	}

	/// Configure every encoder from validated settings
	pub fn from_settings(settings: &AffordanceSettings) -> Result<Self> {
		settings.validate()?;

		let mut hal = HalEncoder::new().pretty(settings.pretty);
		let mut hydra = HydraEncoder::new()
			.vocab(settings.hydra.vocab.clone())
			.pretty(settings.pretty);
		let mut siren = SirenEncoder::new().pretty(settings.pretty);
		let mut forms = FormRenderer::new()
			.title(settings.forms.title.clone())
			.submit_label(settings.forms.submit_label.clone());
		if let Some(base_url) = &settings.base_url {
			hal = hal.base_url(base_url.clone());
			hydra = hydra.base_url(base_url.clone());
			siren = siren.base_url(base_url.clone());
			forms = forms.base_url(base_url.clone());
		}

		tracing::debug!(
			base_url = settings.base_url.as_deref().unwrap_or(""),
			operations = settings.operations.len(),
			"configured hypermedia encoders"
		);

		Ok(Self {
			hal,
			hydra,
			siren,
			forms,
			catalog: OperationCatalog::from_settings(settings),
		})
	}

	/// Operations declared in the settings
	pub fn catalog(&self) -> &OperationCatalog {
		&self.catalog
	}

	pub fn catalog_mut(&mut self) -> &mut OperationCatalog {
		&mut self.catalog
	}

	pub fn encoder(&self, representation: Representation) -> &dyn RepresentationEncoder {
		match representation {
			Representation::Hal => &self.hal,
			Representation::Hydra => &self.hydra,
			Representation::Siren => &self.siren,
			Representation::Html => &self.forms,
		}
	}

	pub fn forms(&self) -> &FormRenderer {
		&self.forms
	}

	pub fn render(&self, envelope: &ResourceEnvelope, representation: Representation) -> Result<Vec<u8>> {
		Ok(self.encoder(representation).encode(envelope)?)
	}

	/// Render for a media type, failing with
	/// [`Error::UnsupportedMediaType`](crate::Error::UnsupportedMediaType)
	/// when no encoder produces it
	pub fn render_media_type(&self, envelope: &ResourceEnvelope, media_type: &str) -> Result<Vec<u8>> {
		let representation = Representation::from_media_type(media_type)?;
		self.render(envelope, representation)
	}
}
