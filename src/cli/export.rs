//! CLI command for exporting a payload
//!
//! Reads a JSON payload from disk, snapshots the branding settings and runs
//! it through the export pipeline into a directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use crate::config::{Settings, ZenPaths};
use crate::error::{ExportError, ExportResult};
use crate::export::{export_data, DirectorySink, ExportFormat, ExportRequest};
use crate::models::ExportMetadata;
use crate::storage::read_json_required;

/// Arguments of `zen-export export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON payload: a records array, `{records, metadata}`, named groups or an order with items
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file name without extension (defaults to the input file stem)
    #[arg(short, long)]
    pub name: Option<String>,

    /// JSON object whose entries are shown above the data
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Directory to write into (defaults to the exports directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Export date printed on documents (YYYY-MM-DD), today by default
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Handle `zen-export export`
pub fn handle_export_command(paths: &ZenPaths, args: ExportArgs) -> ExportResult<()> {
    let data: Value = read_json_required(&args.input)?;
    let metadata = args.metadata.as_deref().map(read_metadata).transpose()?;
    let base_name = match args.name {
        Some(name) => name,
        None => file_stem(&args.input)?,
    };

    // Branding is read fresh for every export
    let branding = Settings::load_or_create(paths)?.branding();

    let sink = DirectorySink::new(args.output_dir.unwrap_or_else(|| paths.export_dir()));

    let mut request = ExportRequest::new(data, args.format.tag(), base_name.as_str());
    request.metadata = metadata;
    request.exported_on = args.date;

    export_data(&request, &branding, &sink)?;

    let path = sink.path_for(&format!("{}.{}", base_name, args.format.extension()));
    println!("Exported {} to: {}", args.format, path.display());

    Ok(())
}

/// Read a metadata file, which must hold a JSON object
pub(crate) fn read_metadata(path: &Path) -> ExportResult<ExportMetadata> {
    match read_json_required::<Value, _>(path)? {
        Value::Object(metadata) => Ok(metadata),
        _ => Err(ExportError::malformed(format!(
            "metadata file {} must contain a JSON object",
            path.display()
        ))),
    }
}

fn file_stem(path: &Path) -> ExportResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ExportError::malformed(format!(
                "cannot derive an output name from {}; pass --name",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("/tmp/orders-2026.json")).unwrap(), "orders-2026");
        assert!(file_stem(Path::new("/")).is_err());
    }

    #[test]
    fn test_read_metadata_requires_object() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("meta.json");
        let bad = temp_dir.path().join("list.json");
        std::fs::write(&good, r#"{"title": "Stock"}"#).unwrap();
        std::fs::write(&bad, "[1, 2]").unwrap();

        assert_eq!(read_metadata(&good).unwrap()["title"], "Stock");
        assert!(read_metadata(&bad).unwrap_err().is_malformed_input());
    }

    #[test]
    fn test_export_writes_into_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenPaths::with_base_dir(temp_dir.path().join("config"));
        let input = temp_dir.path().join("orders.json");
        std::fs::write(&input, r#"[{"id": "A1", "status": "pending"}]"#).unwrap();

        handle_export_command(
            &paths,
            ExportArgs {
                input,
                format: ExportFormat::Csv,
                name: None,
                metadata: None,
                output_dir: None,
                date: None,
            },
        )
        .unwrap();

        let written = std::fs::read_to_string(paths.export_dir().join("orders.csv")).unwrap();
        assert!(written.starts_with("\"id\",\"status\"\n"));
    }
}
