//! Configuration module for zen-export
//!
//! - Path resolution for the settings file and default export directory
//! - Persisted branding settings (app name, logo, currency)

pub mod paths;
pub mod settings;

pub use paths::ZenPaths;
pub use settings::{BrandingContext, Settings};
