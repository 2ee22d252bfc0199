//! Export pipeline
//!
//! Turns a JSON payload into a downloadable artifact:
//! - CSV: quote-always spreadsheet text with a `#` metadata banner
//! - JSON: the payload itself, pretty-printed
//! - Document: a paginated, branded PDF report
//!
//! [`export_data`] is the single entry point. It renders, then hands the
//! artifact to an [`ArtifactSink`] as its very last step, so a failed export
//! delivers nothing.

pub mod csv;
pub mod document;
pub mod json;
pub mod sink;

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde_json::Value;

use crate::config::BrandingContext;
use crate::error::{ExportError, ExportResult};
use crate::models::{ExportInput, ExportMetadata};

pub use document::{render_document, RenderedDocument};
pub use sink::{Artifact, ArtifactSink, DirectorySink, MemorySink};

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    /// Quote-always CSV with a metadata banner
    Csv,
    /// The payload as pretty-printed JSON
    Json,
    /// Paginated PDF report
    #[value(alias = "pdf")]
    Document,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Csv, Self::Json, Self::Document];

    /// File extension of the artifact
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Document => "pdf",
        }
    }

    /// Canonical format tag
    pub fn tag(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "document" | "pdf" => Ok(Self::Document),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// One export call
///
/// The format is kept as the raw tag so that an unknown tag is reported by
/// [`export_data`] like any other failure.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub data: Value,
    pub format: String,
    /// Output file name without extension
    pub base_name: String,
    pub metadata: Option<ExportMetadata>,
    /// Date printed under the document title; today when unset
    pub exported_on: Option<NaiveDate>,
}

impl ExportRequest {
    pub fn new(data: Value, format: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            data,
            format: format.into(),
            base_name: base_name.into(),
            metadata: None,
            exported_on: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ExportMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn exported_on(mut self, date: NaiveDate) -> Self {
        self.exported_on = Some(date);
        self
    }
}

fn validate_base_name(base_name: &str) -> ExportResult<()> {
    if base_name.trim().is_empty() {
        return Err(ExportError::malformed("output file name is empty"));
    }
    if base_name.contains(|c: char| c == '/' || c == '\\') {
        return Err(ExportError::malformed(format!(
            "output file name \"{}\" must not contain a path separator",
            base_name
        )));
    }
    Ok(())
}

/// Render the artifact for a request without delivering it
pub fn render(request: &ExportRequest, branding: &BrandingContext) -> ExportResult<Artifact> {
    validate_base_name(&request.base_name)?;
    let format: ExportFormat = request.format.parse()?;

    let bytes = match format {
        ExportFormat::Json => json::render_json(&request.data)?,
        ExportFormat::Csv => {
            let input = ExportInput::from_value(&request.data)?;
            csv::render_csv(&input, request.metadata.as_ref())?
        }
        ExportFormat::Document => {
            let input = ExportInput::from_value(&request.data)?;
            let exported_on = request
                .exported_on
                .unwrap_or_else(|| Local::now().date_naive());
            render_document(
                &input,
                &request.base_name,
                request.metadata.as_ref(),
                branding,
                exported_on,
            )?
            .to_pdf(branding)?
        }
    };

    Ok(Artifact::new(&request.base_name, format, bytes))
}

/// Render a request and deliver the artifact to `sink`
///
/// Branding is read by the caller for each call. Failures are logged and
/// returned; the sink is only touched once rendering has succeeded.
pub fn export_data(
    request: &ExportRequest,
    branding: &BrandingContext,
    sink: &dyn ArtifactSink,
) -> ExportResult {
    let result = render(request, branding).and_then(|artifact| {
        sink.deliver(&artifact)?;
        Ok(artifact)
    });

    match result {
        Ok(artifact) => {
            tracing::info!(
                file = %artifact.file_name,
                format = %artifact.format,
                bytes = artifact.bytes.len(),
                "export complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                base_name = %request.base_name,
                format = %request.format,
                error = %e,
                "export failed"
            );
            Err(e)
        }
    }
}

/// [`export_data`] reduced to a success flag
pub fn try_export(request: &ExportRequest, branding: &BrandingContext, sink: &dyn ArtifactSink) -> bool {
    export_data(request, branding, sink).is_ok()
}

/// Export records as CSV
pub fn to_csv(
    data: Value,
    base_name: &str,
    metadata: Option<ExportMetadata>,
    sink: &dyn ArtifactSink,
) -> ExportResult {
    let mut request = ExportRequest::new(data, ExportFormat::Csv.tag(), base_name);
    request.metadata = metadata;
    export_data(&request, &BrandingContext::default(), sink)
}

/// Export any payload as JSON
pub fn to_json(data: Value, base_name: &str, sink: &dyn ArtifactSink) -> ExportResult {
    let request = ExportRequest::new(data, ExportFormat::Json.tag(), base_name);
    export_data(&request, &BrandingContext::default(), sink)
}

/// Export records as a branded PDF report
pub fn to_document(
    data: Value,
    base_name: &str,
    metadata: Option<ExportMetadata>,
    branding: &BrandingContext,
    sink: &dyn ArtifactSink,
) -> ExportResult {
    let mut request = ExportRequest::new(data, ExportFormat::Document.tag(), base_name);
    request.metadata = metadata;
    export_data(&request, branding, sink)
}
