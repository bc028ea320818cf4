//! One conversion from a drawing to a LAOS job.

use crate::cli::JobOptions;
use anyhow::{Context, Result};
use laoskit_camtools::{DocumentInfo, LaosDocument};
use laoskit_core::{DrawnPath, OperationMode};
use laoskit_settings::{default_config_path, FeatureTable, HeaderScan, LaserConfig};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// A drawing as handed over by the path iterator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    pub paths: Vec<DrawnPath>,
}

impl Drawing {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read drawing {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse drawing {}", path.display()))
    }
}

/// Paths per operation of a finished job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub cut: usize,
    pub mark: usize,
    pub stroke_engrave: usize,
    pub fill_engrave: usize,
}

impl JobSummary {
    fn record(&mut self, mode: OperationMode) {
        match mode {
            OperationMode::Cut => self.cut += 1,
            OperationMode::Mark => self.mark += 1,
            OperationMode::StrokeEngrave => self.stroke_engrave += 1,
            OperationMode::FillEngrave => self.fill_engrave += 1,
            OperationMode::Undefined => {}
        }
    }

    pub fn total(&self) -> usize {
        self.cut + self.mark + self.stroke_engrave + self.fill_engrave
    }
}

/// Collect features from the defaults, the machine configuration and the
/// document's own header, in that order
pub fn load_features(options: &JobOptions) -> Result<(FeatureTable, HeaderScan)> {
    let mut features = FeatureTable::new();
    let mut scan = HeaderScan::default();

    let config_file = match &options.config {
        Some(path) => Some(path.clone()),
        None => default_config_path().filter(|path| path.is_file()),
    };
    match config_file {
        Some(path) => {
            let found = features
                .apply_file(&path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            info!(
                "Read {} feature(s) from {}",
                found.features_read,
                path.display()
            );
            scan.extend(found);
        }
        None => debug!("No machine configuration file, using defaults"),
    }

    if let Some(path) = &options.features {
        let found = features
            .apply_file(path)
            .with_context(|| format!("Failed to read features from {}", path.display()))?;
        info!(
            "Read {} feature(s) from {}",
            found.features_read,
            path.display()
        );
        scan.extend(found);
    }

    Ok((features, scan))
}

/// Convert the drawing named in `options` into a LAOS job
pub fn run(options: &JobOptions) -> Result<JobSummary> {
    let (features, scan) = load_features(options)?;
    let config = LaserConfig::from_features(&features);
    config.validate().context("Invalid laser configuration")?;
    info!(
        "Page {}x{} pt, raster at {} ppi ({} px/pt)",
        config.page_length,
        config.page_width,
        config.engraving_ppi,
        config.image_factor()
    );

    let drawing = Drawing::from_file(&options.drawing)?;

    let sink: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let filename = options.drawing.display().to_string();
    let mut doc = LaosDocument::new(sink, config, DocumentInfo::now(filename));

    let include = scan.include_text();
    if !include.is_empty() {
        doc.include(&include)?;
    }
    doc.open()?;

    let mut summary = JobSummary::default();
    for path in &drawing.paths {
        let mode = doc.draw_path(path)?;
        summary.record(mode);
    }

    if let Some(raster) = &options.raster {
        doc.attach_raster_file(raster);
    }
    doc.close()?;

    info!(
        "Converted {} path(s): {} cut, {} mark, {} engrave, {} fill",
        summary.total(),
        summary.cut,
        summary.mark,
        summary.stroke_engrave,
        summary.fill_engrave
    );
    Ok(summary)
}
