//! CLI command for previewing a payload as terminal tables

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;

use super::export::read_metadata;
use crate::config::{Settings, ZenPaths};
use crate::display::format_preview;
use crate::error::ExportResult;
use crate::models::ExportInput;
use crate::storage::read_json_required;

/// Arguments of `zen-export preview`
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// JSON payload to preview
    pub input: PathBuf,

    /// JSON object whose entries are listed above the tables
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,
}

/// Handle `zen-export preview`
pub fn handle_preview_command(paths: &ZenPaths, args: PreviewArgs) -> ExportResult<()> {
    let data: Value = read_json_required(&args.input)?;
    let input = ExportInput::from_value(&data)?;
    let metadata = args.metadata.as_deref().map(read_metadata).transpose()?;
    let branding = Settings::load_or_create(paths)?.branding();

    print!("{}", format_preview(&input, metadata.as_ref(), &branding));
    Ok(())
}
