use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "AlphaFragment CLI - Split protein sequences into overlapping fragments without cutting through structured domains.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fragment every protein of an input table and write the fragments to a new table.
    Fragment(FragmentArgs),
    /// Print the domains identified in a predicted aligned error (PAE) file.
    Domains(DomainsArgs),
}

/// Arguments for the `fragment` subcommand.
#[derive(Args, Debug)]
pub struct FragmentArgs {
    // --- Core Arguments ---
    /// Path to the input protein table (CSV with `name`, `accession_id` and `sequence` columns).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output fragment table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Domain Overrides ---
    /// Thresholds used to find domains in PAE matrices: 'cautious', 'definite' or 'custom'.
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<String>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Ignore PAE files listed in the input table.
    #[arg(long)]
    pub no_pae: bool,

    /// Ignore manually specified domains listed in the input table.
    #[arg(long)]
    pub no_manual: bool,

    // --- Fragmentation Overrides ---
    /// Override the minimum fragment length.
    #[arg(long, value_name = "INT")]
    pub min_length: Option<usize>,

    /// Override the ideal fragment length.
    #[arg(long, value_name = "INT")]
    pub ideal_length: Option<usize>,

    /// Override the maximum fragment length.
    #[arg(long, value_name = "INT")]
    pub max_length: Option<usize>,

    /// Override the time budget, in seconds, of a single subsection search.
    #[arg(short, long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S fragment.overlap.max=20
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `domains` subcommand.
#[derive(Args, Debug)]
pub struct DomainsArgs {
    /// Path to a PAE file in JSON format.
    #[arg(long, required = true, value_name = "PATH")]
    pub pae: PathBuf,

    /// Thresholds used to find domains: 'cautious', 'definite' or 'custom'.
    #[arg(short, long, value_name = "METHOD", default_value = "definite")]
    pub method: String,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Threshold values for the 'custom' domain identification method.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ThresholdArgs {
    /// Residue distance up to which the close threshold applies.
    #[arg(long, value_name = "INT")]
    pub distance_cutoff: Option<usize>,

    /// PAE threshold for residue pairs within the distance cutoff.
    #[arg(long, value_name = "FLOAT")]
    pub close_threshold: Option<f64>,

    /// PAE threshold for residue pairs beyond the distance cutoff.
    #[arg(long, value_name = "FLOAT")]
    pub far_threshold: Option<f64>,
}
