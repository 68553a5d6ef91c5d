use clap::Parser;
use rowset::cli::{self, Cli, Command};
use rowset::error::RowsetError;
use rowset::format_detect::{self, OutputFormat};
use rowset::verbose::{self, Timer};
use rowset::{BaseResult, config, format_arrow, format_csv, output};
use std::path::Path;
use std::process;
use tracing::info;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Show(ref args) => show(args, cli.verbose, cli.config.as_deref()),
        Command::Column(ref args) => column(args, cli.verbose, cli.config.as_deref()),
        Command::Convert(ref args) => convert(args, cli.verbose, cli.config.as_deref()),
    };

    if let Err(err) = result {
        output::print_error(&err);
        process::exit(1);
    }
}

fn show(
    args: &cli::ShowArgs,
    verbose: bool,
    config_path: Option<&Path>,
) -> Result<(), RowsetError> {
    let mut result = load(&args.source, verbose, config_path)?;

    for filter in &args.filters {
        let (name, expected) = parse_filter(filter)?;
        // Unknown column fails here rather than matching nothing.
        result.column(name)?;
        let before = result.len();
        result.filter_in_place(|row| row.value(name).is_ok_and(|v| v.to_string() == expected));
        info!("filter {name}={expected} kept {} of {before} rows", result.len());
    }

    if let Some(limit) = args.limit {
        let stop = isize::try_from(limit).unwrap_or(isize::MAX);
        result = result.slice(..stop)?;
    }

    info!("formatting {:?} output...", args.format);
    let text = output::render_result(&result, args.format)?;
    output::print_result(&text);
    Ok(())
}

fn column(
    args: &cli::ColumnArgs,
    verbose: bool,
    config_path: Option<&Path>,
) -> Result<(), RowsetError> {
    let result = load(&args.source, verbose, config_path)?;
    let column = result.column(&args.name)?;
    let text = output::render_column(&column, args.literal)?;
    output::print_result(&text);
    Ok(())
}

fn convert(
    args: &cli::ConvertArgs,
    verbose: bool,
    config_path: Option<&Path>,
) -> Result<(), RowsetError> {
    // Detect output format before reading (fail-fast on bad extension)
    let format = format_detect::detect_output_format(&args.output)?;

    let result = load(&args.source, verbose, config_path)?;

    info!("writing output to {}...", args.output.display());
    let timer = Timer::start();
    match format {
        OutputFormat::Json => output::write_file(&result.as_json_string()?, &args.output)?,
        OutputFormat::Csv => format_csv::write_csv(&result, &args.output)?,
        OutputFormat::Arrow => format_arrow::write_arrow(&result, &args.output)?,
    }
    info!("output written ({}ms)", timer.elapsed_ms());

    output::print_summary(result.len(), &args.output)
}

// --- Helpers ---

fn load(
    source: &cli::SourceArgs,
    verbose: bool,
    config_path: Option<&Path>,
) -> Result<BaseResult, RowsetError> {
    let app_config = config::load_from_source_args(source, verbose, config_path)?;
    verbose::init(app_config.verbose);

    info!("reading {}...", app_config.source.path.display());
    let timer = Timer::start();
    let result = app_config.source.open()?;
    info!(
        "read complete ({}ms, {} rows, {} columns)",
        timer.elapsed_ms(),
        result.len(),
        result.columns().len()
    );
    Ok(result.into_inner())
}

fn parse_filter(raw: &str) -> Result<(&str, &str), RowsetError> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| RowsetError::InvalidArgument {
            message: format!("filter must look like column=value, got \"{raw}\""),
        })
}
