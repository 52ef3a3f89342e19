use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::info;

use crate::core::model::{Fragment, RecognitionArtifact, RequestOutput};
use crate::export::{Exporter, InkmlExporter, JsonExporter};
use crate::ink::{extract, fragment, segment};
use crate::merge::renumber::IdCounters;
use crate::merge::{self, artifact};
use crate::normalize;
use crate::recognizer::{Recognizer, SeshatBridge};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub work_dir: PathBuf,
    pub threshold: f64,
    pub recognizer: PathBuf,
    pub config: PathBuf,
}

impl PipelineConfig {
    pub fn new(input: PathBuf, work_dir: PathBuf) -> Self {
        Self {
            input,
            work_dir,
            threshold: segment::DEFAULT_THRESHOLD,
            recognizer: PathBuf::from("./seshat"),
            config: PathBuf::from("Config/CONFIG"),
        }
    }
}

/// Runs one full request against the seshat bridge configured in `config`.
pub fn run_request(config: &PipelineConfig) -> Result<RequestOutput> {
    let ink = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read ink document: {}", config.input.display()))?;

    let bridge = SeshatBridge::new(config.work_dir.clone())
        .with_binary(config.recognizer.clone())
        .with_config(config.config.clone());

    process_request(&ink, &bridge, config)
}

/// Core of one request: extract, segment, stage, recognize, normalize,
/// merge and export.
///
/// Recognition fans out across fragments in parallel and fans back in over
/// the collected results; one failing fragment fails the whole request and
/// nothing is persisted past the failure. All working state, including the
/// identifier counters, lives inside this call.
pub fn process_request<R: Recognizer + Sync>(
    ink: &str,
    recognizer: &R,
    config: &PipelineConfig,
) -> Result<RequestOutput> {
    let fragments = stage_fragments(ink, config.threshold, &recognizer.staging_dir())?;
    info!(fragments = fragments.len(), "staged fragments");

    let reports: Vec<(usize, String)> = fragments
        .par_iter()
        .map(|fragment| {
            recognizer
                .recognize(fragment)
                .map(|report| (fragment.line_number, report))
        })
        .collect::<std::result::Result<_, _>>()?;

    let results = normalize::normalize_reports(&reports)?;

    let artifacts = fragments
        .iter()
        .map(|fragment| -> Result<RecognitionArtifact> {
            let path = recognizer.artifact_path(fragment.line_number);
            let xml = fs::read_to_string(&path)
                .with_context(|| format!("failed to read artifact: {}", path.display()))?;
            Ok(artifact::parse_artifact(fragment.line_number, &xml)?)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut counters = IdCounters::new();
    let document = merge::merge_artifacts(&artifacts, &mut counters)?;
    info!(
        strokes = document.strokes.len(),
        groups = document.symbol_groups.len(),
        "assembled unified document"
    );

    let output = RequestOutput { results, document };
    export_output(&output, &config.work_dir)?;
    Ok(output)
}

/// Writes the request's terminal artifacts under `<work_dir>/out`.
pub fn export_output(output: &RequestOutput, work_dir: &Path) -> Result<()> {
    let out_dir = work_dir.join("out");

    let inkml_exporter = InkmlExporter::new(out_dir.clone());
    inkml_exporter.export(output)?;

    let json_exporter = JsonExporter::new(out_dir);
    json_exporter.export(output)?;

    Ok(())
}

/// Segments the input and stages per-line fragments without running
/// recognition; returns the line numbers used as fragment identifiers.
pub fn segment_only(config: &PipelineConfig) -> Result<Vec<usize>> {
    let ink = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read ink document: {}", config.input.display()))?;
    let fragments = stage_fragments(&ink, config.threshold, &config.work_dir.join("temp"))?;
    Ok(fragments.iter().map(|f| f.line_number).collect())
}

#[derive(Debug, Clone, Copy)]
pub struct InkSummary {
    pub strokes: usize,
    pub lines: usize,
}

/// Stroke and line statistics for one ink document.
pub fn inspect(input: &Path, threshold: f64) -> Result<InkSummary> {
    let ink = fs::read_to_string(input)
        .with_context(|| format!("failed to read ink document: {}", input.display()))?;
    let records = extract::extract_traces(&ink)?;
    let segmented = segment::assign_line_numbers(records, threshold)?;
    Ok(InkSummary {
        strokes: segmented.len(),
        lines: segment::line_count(&segmented),
    })
}

fn stage_fragments(ink: &str, threshold: f64, staging_dir: &Path) -> Result<Vec<Fragment>> {
    let records = extract::extract_traces(ink)?;
    let segmented = segment::assign_line_numbers(records, threshold)?;
    let fragments = fragment::build_fragments(segmented);
    fragment::write_fragments(&fragments, staging_dir)?;
    Ok(fragments)
}
