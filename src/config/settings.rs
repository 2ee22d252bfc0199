//! Persisted branding settings
//!
//! The settings file is owned by whoever edits the branding (the `brand`
//! command here, the settings page in the dashboard). Exports only ever read
//! it, through a [`BrandingContext`] snapshot taken at the start of each
//! export.

use serde::{Deserialize, Serialize};

use super::paths::ZenPaths;
use crate::error::ExportError;
use crate::storage::file_io;

/// Default application display name
pub const DEFAULT_APP_NAME: &str = "Zen Commerce";

/// Default ISO currency code
pub const DEFAULT_CURRENCY: &str = "XOF";

/// User settings, stored as camelCase JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Application display name used as the brand
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Logo image data (data URL or bare base64)
    #[serde(default)]
    pub logo: Option<String>,

    /// ISO currency code
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            app_name: default_app_name(),
            logo: None,
            currency: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    ///
    /// Nothing is written; the caller decides when to persist.
    pub fn load_or_create(paths: &ZenPaths) -> Result<Self, ExportError> {
        file_io::read_json(paths.settings_file()).map_err(|e| match e {
            ExportError::Json(msg) => {
                ExportError::Config(format!("Failed to parse settings file: {}", msg))
            }
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ZenPaths) -> Result<(), ExportError> {
        paths.ensure_directories()?;
        file_io::write_json_atomic(paths.settings_file(), self)
    }

    /// Snapshot the branding used by the formatters
    pub fn branding(&self) -> BrandingContext {
        BrandingContext {
            app_name: self.app_name.clone(),
            logo: self.logo.clone().filter(|l| !l.trim().is_empty()),
            currency: self.currency.clone(),
        }
    }
}

/// Read-only brand information handed to every formatter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingContext {
    /// Brand name shown in the document header and footer
    pub app_name: String,
    /// Optional logo image data
    pub logo: Option<String>,
    /// ISO currency code
    pub currency: String,
}

impl Default for BrandingContext {
    fn default() -> Self {
        Settings::default().branding()
    }
}

impl BrandingContext {
    /// Create a branding context without a logo
    pub fn new(app_name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            logo: None,
            currency: currency.into(),
        }
    }

    /// Attach logo image data
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// The symbol appended to currency amounts in documents
    pub fn currency_symbol(&self) -> &str {
        match self.currency.trim().to_ascii_uppercase().as_str() {
            "XOF" | "XAF" => "CFA",
            "EUR" => "€",
            "USD" => "$",
            "GBP" => "£",
            _ => self.currency.trim(),
        }
    }

    /// Single uppercase letter used when no logo can be drawn
    pub fn monogram(&self) -> char {
        self.app_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('Z')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "Zen Commerce");
        assert_eq!(settings.logo, None);
        assert_eq!(settings.currency, "XOF");
        assert_eq!(settings.branding().currency_symbol(), "CFA");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            app_name: "Boutique Awa".into(),
            currency: "EUR".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_camel_case_file_with_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"appName": "Shop"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.app_name, "Shop");
        assert_eq!(loaded.currency, "XOF");
        assert!(loaded.logo.is_none());
    }

    #[test]
    fn test_invalid_settings_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_blank_logo_is_ignored() {
        let settings = Settings {
            logo: Some("   ".into()),
            ..Settings::default()
        };
        assert!(settings.branding().logo.is_none());
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(BrandingContext::new("A", "eur").currency_symbol(), "€");
        assert_eq!(BrandingContext::new("A", "USD").currency_symbol(), "$");
        assert_eq!(BrandingContext::new("A", "MAD").currency_symbol(), "MAD");
    }

    #[test]
    fn test_monogram() {
        assert_eq!(BrandingContext::new("zen shop", "XOF").monogram(), 'Z');
        assert_eq!(BrandingContext::new("élan", "XOF").monogram(), 'É');
        assert_eq!(BrandingContext::new("  ", "XOF").monogram(), 'Z');
    }
}
