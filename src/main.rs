use anyhow::Result;
use clap::{Parser, Subcommand};

use zen_export::cli::{
    handle_brand_command, handle_export_command, handle_preview_command, handle_qr_command,
    BrandCommands, ExportArgs, PreviewArgs, QrCommands,
};
use zen_export::config::{paths::DATA_DIR_ENV, Settings, ZenPaths};
use zen_export::logging::init_cli_logger;

#[derive(Parser)]
#[command(
    name = "zen-export",
    author = "Zen Commerce",
    version,
    about = "Export dashboard records to CSV, JSON or branded PDF reports",
    long_about = "zen-export turns the records behind the Zen Commerce dashboard \
                  (orders, products, clients, invoices) into spreadsheet-ready CSV, \
                  raw JSON or paginated PDF documents carrying the shop's branding."
)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a JSON payload to a file
    Export(ExportArgs),

    /// Print the tables a document export would contain
    Preview(PreviewArgs),

    /// Branding used by exports
    #[command(subcommand)]
    Brand(BrandCommands),

    /// Print QR code payload strings
    #[command(subcommand)]
    Qr(QrCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let paths = ZenPaths::new()?;

    match cli.command {
        Some(Commands::Export(args)) => handle_export_command(&paths, args)?,
        Some(Commands::Preview(args)) => handle_preview_command(&paths, args)?,
        Some(Commands::Brand(cmd)) => handle_brand_command(&paths, cmd)?,
        Some(Commands::Qr(cmd)) => handle_qr_command(cmd)?,
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            let branding = settings.branding();
            println!("zen-export Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("(override with {})", DATA_DIR_ENV);
            println!();
            println!("Settings:");
            println!("  App name: {}", branding.app_name);
            println!("  Currency: {} ({})", branding.currency, branding.currency_symbol());
            println!("  Logo:     {}", if branding.logo.is_some() { "set" } else { "none" });
        }
        None => {
            println!("zen-export - CSV, JSON and PDF exports for Zen Commerce");
            println!();
            println!("Run 'zen-export --help' for usage information.");
        }
    }

    Ok(())
}
