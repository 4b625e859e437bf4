use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::PathBuf;

use crate::analyzers;
use crate::cli::OutputFormat;
use crate::config::{self, DocdriftConfig};
use crate::core::{CheckResults, DiagnosticCode, FileReport};
use crate::errors::DocdriftError;
use crate::io::output::{create_file_writer, create_writer};
use crate::io::walker::find_python_files;

pub struct CheckConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub disable: Vec<String>,
    pub no_parallel: bool,
    pub jobs: Option<usize>,
}

/// Resolve the worker count; zero means every available core.
fn worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        num_cpus::get()
    } else {
        jobs
    }
}

/// Run the checker over a tree and write the report. Returns whether the
/// tree came back clean; the caller turns that into the exit status.
pub fn run_check(config: CheckConfig) -> Result<bool> {
    if let Some(jobs) = config.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count(jobs))
            .build_global()
            .ok(); // Ignore if already configured
    }

    let file_config = DocdriftConfig::load(&config.path)?;
    let disabled: HashSet<DiagnosticCode> = file_config
        .disabled_codes()
        .into_iter()
        .chain(config::parse_codes(&config.disable))
        .collect();

    let files = find_python_files(&config.path, file_config.ignore.patterns.clone())
        .with_context(|| format!("failed to scan {}", config.path.display()))?;
    log::info!(
        "checking {} python files under {}",
        files.len(),
        config.path.display()
    );

    let outcomes: Vec<Result<FileReport, DocdriftError>> = if config.no_parallel {
        files.iter().map(|path| analyzers::check_file(path)).collect()
    } else {
        files.par_iter().map(|path| analyzers::check_file(path)).collect()
    };

    let mut reports = Vec::new();
    let mut skipped = 0;
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(filter_disabled(report, &disabled)),
            Err(err) => {
                log::warn!("skipping {}: {err}", err.path().display());
                skipped += 1;
            }
        }
    }

    let results = CheckResults::new(config.path.clone(), reports, skipped);
    write_results(&results, &config)?;
    Ok(results.is_clean())
}

fn filter_disabled(mut report: FileReport, disabled: &HashSet<DiagnosticCode>) -> FileReport {
    if !disabled.is_empty() {
        report.diagnostics.retain(|d| !disabled.contains(&d.code));
    }
    report
}

fn write_results(results: &CheckResults, config: &CheckConfig) -> Result<()> {
    let format = config.format.into();
    let mut writer = match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            create_file_writer(format, file)
        }
        None => create_writer(format),
    };
    writer.write_results(results)
}
