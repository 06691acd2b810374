use anyhow::{Context, Result};
use tracing::{info, info_span};

use tabula_cli::options::load_options;
use tabula_cli::preview::{dataset_table, score_table};
use tabula_cli::report::{report_counts, report_table, report_to_csv, report_to_json};
use tabula_ingest::{
    DataSource, FileSource, InferenceOptions, infer_delimiter, read_dataset, sample_lines,
    score_delimiters, to_dataframe,
};
use tabula_model::{Delimiter, ValidationOptions, ValidationReport};
use tabula_validate::Validator;

use crate::cli::{LoadArgs, ReaderArgs, ReportFormatArg, SniffArgs, ValidateArgs};

fn resolve_options(args: &ReaderArgs, source: &dyn DataSource) -> Result<ValidationOptions> {
    let mut options = load_options(args.config.as_deref())?;
    args.overrides().apply(&mut options, source)?;
    Ok(options)
}

pub fn run_load(args: &LoadArgs) -> Result<()> {
    let source = FileSource::new(&args.reader.file);
    let options = resolve_options(&args.reader, &source)?;
    let span = info_span!("load", file = source.name(), kind = %options.kind);
    let _guard = span.enter();

    let outcome = read_dataset(&source, options.kind, &options.reader)
        .with_context(|| format!("read {}", args.reader.file.display()))?;
    let dataset = &outcome.dataset;
    info!(
        rows = dataset.num_rows(),
        columns = dataset.num_columns(),
        rejected = outcome.rejected_rows,
        "dataset loaded"
    );

    println!("File: {}", source.path().display());
    println!(
        "Kind: {}  Rows: {}  Columns: {}  Delimiter: {}",
        dataset.kind(),
        dataset.num_rows(),
        dataset.num_columns(),
        options.reader.delimiter
    );
    if args.dataframe {
        let frame = to_dataframe(dataset).context("convert dataset to DataFrame")?;
        println!("{frame}");
    } else {
        println!("{}", dataset_table(dataset, args.rows));
    }

    if !outcome.issues.is_empty() {
        let report: ValidationReport = outcome.issues.iter().cloned().collect();
        println!("Rejected rows: {}", outcome.rejected_rows);
        println!("{}", report_table(&report));
    }
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let source = FileSource::new(&args.reader.file);
    let mut options = resolve_options(&args.reader, &source)?;
    if let Some(max_messages) = args.max_messages {
        options.max_messages = max_messages;
    }

    let mut validator = Validator::new(options);
    let report = validator.validate(&source).clone();
    match args.report_format {
        ReportFormatArg::Table => {
            println!("File: {}", source.path().display());
            if !report.is_empty() {
                println!("{}", report_table(&report));
            }
            println!("{}", report_counts(&report));
        }
        ReportFormatArg::Json => println!("{}", report_to_json(&report)?),
        ReportFormatArg::Csv => print!("{}", report_to_csv(&report)?),
    }
    Ok(report)
}

/// Prints the candidate scores; `None` when no delimiter qualifies.
pub fn run_sniff(args: &SniffArgs) -> Result<Option<Delimiter>> {
    let source = FileSource::new(&args.file);
    let mut options = InferenceOptions::default();
    if let Some(max_lines) = args.max_lines {
        options = options.with_max_lines(max_lines);
    }
    if args.comment.is_some() {
        options.comment_marker.clone_from(&args.comment);
    }

    let lines = sample_lines(&source, &options)
        .with_context(|| format!("sample {}", args.file.display()))?;
    let scores = score_delimiters(&lines, &options);
    let chosen = infer_delimiter(&source, &options).ok();

    println!("File: {} ({} lines sampled)", source.path().display(), lines.len());
    println!("{}", score_table(&scores, chosen));
    match chosen {
        Some(delimiter) => println!("Delimiter: {delimiter}"),
        None => println!("Delimiter: not detected"),
    }
    Ok(chosen)
}
