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
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "isodesmic CLI - Estimate high-level enthalpies of formation with error-canceling reactions.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the constraint set of a target against a pool of reference species.
    Constraints(ConstraintsArgs),
    /// Evaluate error-canceling reactions and print the estimated enthalpies.
    Estimate(EstimateArgs),
    /// List the levels of theory available in the reference sets.
    Levels(LevelsArgs),
}

/// Reference set and configuration options shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Reference set to load (a TOML file or a directory of TOML files).
    /// Can be used multiple times; overrides `references.paths` from the config file.
    #[arg(short, long = "references", value_name = "PATH")]
    pub references: Vec<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S constraints.conserve-bonds=false
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `constraints` subcommand.
#[derive(Args, Debug)]
pub struct ConstraintsArgs {
    /// Path to the target species file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub target: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Level of theory to draw references at. Defaults to the target's.
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Conserve atoms only, not bond types.
    #[arg(long)]
    pub no_bonds: bool,

    /// Do not conserve ring sizes.
    #[arg(long)]
    pub no_rings: bool,

    /// Write the constraint set as CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Arguments for the `estimate` subcommand.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Reaction file to evaluate. Can be used multiple times.
    #[arg(short = 'x', long = "reaction", required = true, value_name = "PATH")]
    pub reactions: Vec<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Conserve atoms only, not bond types, when checking reaction balance.
    #[arg(long)]
    pub no_bonds: bool,

    /// Do not conserve ring sizes when checking reaction balance.
    #[arg(long)]
    pub no_rings: bool,

    /// Energy unit for the printed results (e.g. 'kJ/mol', 'kcal/mol').
    #[arg(short, long, value_name = "UNIT")]
    pub unit: Option<String>,
}

/// Arguments for the `levels` subcommand.
#[derive(Args, Debug)]
pub struct LevelsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
