//! Configuration for hypermedia affordances
//!
//! [`AffordanceSettings`] is read from TOML and declares the base URL, encoder
//! options, enumerations and operations. An [`OperationCatalog`] turns the
//! declared operations into action descriptors on demand.

pub mod catalog;
pub mod settings;

pub use catalog::OperationCatalog;
pub use settings::{AffordanceSettings, FormSettings, HydraSettings, SettingsError, SettingsResult};
