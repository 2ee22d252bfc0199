//! CLI commands for the persisted branding settings

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine};
use clap::Subcommand;

use crate::config::{Settings, ZenPaths};
use crate::error::{ExportError, ExportResult};
use crate::export::document::logo::{LogoEncoding, LogoImage};

/// Branding subcommands
#[derive(Subcommand, Debug)]
pub enum BrandCommands {
    /// Show the brand used by exports
    Show,

    /// Update the brand used by exports
    Set {
        /// Application display name
        #[arg(long)]
        app_name: Option<String>,

        /// ISO currency code (XOF, EUR, USD...)
        #[arg(long)]
        currency: Option<String>,

        /// PNG or JPEG logo file
        #[arg(long, conflicts_with = "clear_logo")]
        logo: Option<PathBuf>,

        /// Remove the logo and fall back to the monogram
        #[arg(long)]
        clear_logo: bool,
    },
}

/// Handle branding commands
pub fn handle_brand_command(paths: &ZenPaths, cmd: BrandCommands) -> ExportResult<()> {
    match cmd {
        BrandCommands::Show => {
            let settings = Settings::load_or_create(paths)?;
            print!("{}", format_brand(&settings));
            Ok(())
        }
        BrandCommands::Set {
            app_name,
            currency,
            logo,
            clear_logo,
        } => {
            let mut settings = Settings::load_or_create(paths)?;

            if let Some(name) = app_name {
                if name.trim().is_empty() {
                    return Err(ExportError::Config("app name cannot be empty".into()));
                }
                settings.app_name = name.trim().to_string();
            }
            if let Some(code) = currency {
                if code.trim().is_empty() {
                    return Err(ExportError::Config("currency cannot be empty".into()));
                }
                settings.currency = code.trim().to_ascii_uppercase();
            }
            if clear_logo {
                settings.logo = None;
            }
            if let Some(path) = logo {
                settings.logo = Some(logo_data_url(std::fs::read(&path).map_err(|e| {
                    ExportError::Io(format!("Failed to read logo {}: {}", path.display(), e))
                })?)?);
            }

            settings.save(paths)?;
            println!("Branding updated.");
            print!("{}", format_brand(&settings));
            Ok(())
        }
    }
}

/// Check a logo file and turn it into the data URL stored in settings
fn logo_data_url(bytes: Vec<u8>) -> ExportResult<String> {
    let logo = LogoImage::from_bytes(bytes.clone())
        .map_err(|e| ExportError::malformed(format!("logo cannot be used: {}", e)))?;
    let mime = match logo.encoding {
        LogoEncoding::Jpeg { .. } => "image/jpeg",
        LogoEncoding::Png { .. } => "image/png",
    };
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn format_brand(settings: &Settings) -> String {
    let branding = settings.branding();
    let logo = match branding.logo.as_deref().map(LogoImage::decode) {
        None => format!("none (monogram \"{}\")", branding.monogram()),
        Some(Ok(logo)) => {
            let kind = match logo.encoding {
                LogoEncoding::Jpeg { .. } => "JPEG",
                LogoEncoding::Png { .. } => "PNG",
            };
            format!("{} {}x{}", kind, logo.width, logo.height)
        }
        Some(Err(e)) => format!("unusable, monogram \"{}\" is drawn ({})", branding.monogram(), e),
    };

    format!(
        "App name: {}\nCurrency: {} ({})\nLogo:     {}\n",
        branding.app_name,
        branding.currency,
        branding.currency_symbol(),
        logo
    )
}
