use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tonumber_model::ConversionConfig;
use tonumber_transform::{ConversionProgress, ConversionReport, convert_file};
use tonumber_validate::{
    AnalysisOptions, AnalysisReport, ValidationReport, Validator, analyze_file, validate_file,
};
use tracing::info_span;

use crate::cli::{AnalyzeArgs, ConvertArgs, ValidateArgs, WorkbookArgs};
use tonumber_cli::settings::{ConfigOverrides, load_config};

const PROGRESS_TEMPLATE: &str = "{spinner} [{bar:40}] {pos}/{len} cells ({percent}%) {eta}";

pub fn run_convert(args: &ConvertArgs) -> Result<ConversionReport> {
    let mut overrides = overrides_from(&args.workbook);
    overrides.progress_interval = args.progress_interval;
    let config = resolve_config(&args.workbook, &overrides)?;
    let span = info_span!("command", name = "convert");
    let _guard = span.enter();

    let show_progress = !args.no_progress && !args.workbook.json && io::stderr().is_terminal();
    let bar = progress_bar(show_progress)?;
    let result = convert_file(&config, |progress: ConversionProgress| {
        if bar.length() != Some(progress.total) {
            bar.set_length(progress.total);
        }
        bar.set_position(progress.processed);
    });
    bar.finish_and_clear();
    result.with_context(|| format!("convert {}", config.workbook_path.display()))
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let config = resolve_config(&args.workbook, &overrides_from(&args.workbook))?;
    let span = info_span!("command", name = "validate");
    let _guard = span.enter();

    let validator = Validator::new().with_max_issue_details(args.max_issues);
    validate_file(&config, &validator)
        .with_context(|| format!("validate {}", config.workbook_path.display()))
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisReport> {
    let config = resolve_config(&args.workbook, &overrides_from(&args.workbook))?;
    let span = info_span!("command", name = "analyze");
    let _guard = span.enter();

    let options = AnalysisOptions {
        sample_rows: args.rows,
    };
    analyze_file(&config, &options)
        .with_context(|| format!("analyze {}", config.workbook_path.display()))
}

fn overrides_from(args: &WorkbookArgs) -> ConfigOverrides {
    ConfigOverrides {
        workbook: args.workbook.clone(),
        source_sheet: args.source_sheet.clone(),
        target_sheet: args.target_sheet.clone(),
        progress_interval: None,
    }
}

fn resolve_config(args: &WorkbookArgs, overrides: &ConfigOverrides) -> Result<ConversionConfig> {
    load_config(args.config.as_deref(), overrides)
}

fn progress_bar(visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .context("build progress style")?
        .progress_chars("=> ");
    let bar = ProgressBar::new(0).with_style(style);
    bar.enable_steady_tick(Duration::from_millis(120));
    Ok(bar)
}
