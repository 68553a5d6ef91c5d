use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowset", about = "Inspect and convert tabular files as keyed result sets")]
pub struct Cli {
    /// Path to config file
    #[arg(short = 'c', long, global = true, env = "ROWSET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit diagnostics to stderr
    #[arg(short = 'v', long, global = true, env = "ROWSET_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the rows of a file
    Show(ShowArgs),

    /// Print one column, optionally as an SQL literal list
    Column(ColumnArgs),

    /// Convert a file to JSON, CSV or Arrow IPC
    Convert(ConvertArgs),
}

/// Where rows are read from: a path, a config profile, or both.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Input file (.csv, .tsv, .tab, .json)
    pub path: Option<PathBuf>,

    /// Config file source profile name
    #[arg(short = 'P', long, env = "ROWSET_PROFILE")]
    pub profile: Option<String>,

    /// Input type, overriding extension detection: csv, tsv or json
    #[arg(short = 't', long = "type")]
    pub file_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show at most this many rows
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Keep rows whose column renders as the given text (col=val, repeatable)
    #[arg(short = 'w', long = "where")]
    pub filters: Vec<String>,

    /// Output layout
    #[arg(short = 'f', long, value_enum, default_value_t = ShowFormat::Json)]
    pub format: ShowFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// Array of row objects
    Json,
    /// Object of column arrays
    Dict,
    /// One tuple per line
    Rows,
}

#[derive(Args, Debug)]
pub struct ColumnArgs {
    /// Column name
    pub name: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Render as a parenthesized SQL literal list for IN (...)
    #[arg(long)]
    pub literal: bool,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file; format follows the extension (.json, .csv, .arrow)
    #[arg(short = 'o', long)]
    pub output: PathBuf,
}
