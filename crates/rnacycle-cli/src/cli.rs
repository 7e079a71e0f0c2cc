use clap::{Args, Parser, Subcommand, ValueEnum};
use rnacycle::engine::config::BasisMode;
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
    about = "RNACYCLE CLI - Minimum and fundamental cycle bases of nucleic-acid residue interaction graphs.",
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

    /// Set the number of threads used to process structures in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a cycle basis for each interaction table and write it as CSV.
    Basis(BasisArgs),
    /// Print graph statistics (residues, interactions, components, cycle-space dimension).
    Inspect(InspectArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// One cycle per non-tree edge of a breadth-first spanning forest.
    Fundamental,
    /// A basis of minimum total weight.
    Minimum,
}

impl From<ModeArg> for BasisMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fundamental => BasisMode::Fundamental,
            ModeArg::Minimum => BasisMode::Minimum,
        }
    }
}

/// Options shared by every command that reads interaction tables.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Interaction tables (`*.csv`) or directories containing them.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub input: Vec<PathBuf>,

    /// Override `input.add-backbone` from the config file.
    #[command(flatten)]
    pub backbone: Backbone,

    /// Weight used for interactions whose `weight` column is empty.
    #[arg(long, value_name = "FLOAT")]
    pub default_weight: Option<f64>,
}

/// A group to handle mutually exclusive flags for backbone synthesis.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct Backbone {
    /// Add phosphodiester bonds between sequence neighbours missing from the table.
    #[arg(long)]
    pub add_backbone: bool,
    /// Use only the bonds listed in the table.
    #[arg(long)]
    pub no_backbone: bool,
}

/// Arguments for the `basis` subcommand.
#[derive(Args, Debug)]
pub struct BasisArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for `<name>.cycles.csv` files. Defaults to each input's directory.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Basis to compute, overriding the config file.
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Skip the post-computation check of the basis.
    #[arg(long)]
    pub no_verify: bool,

    /// Override `basis.allow-two-cycles` from the config file.
    #[command(flatten)]
    pub two_cycles: TwoCycles,

    /// Longest candidate cycle considered in minimum mode (0 = unbounded).
    #[arg(long, value_name = "INT")]
    pub max_candidate_depth: Option<usize>,

    /// Abort a structure after this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S basis.mode=fundamental
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive flags for two-interaction cycles.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct TwoCycles {
    /// Permit cycles made of two parallel interactions.
    #[arg(long)]
    pub allow_two_cycles: bool,
    /// Reject cycles made of two parallel interactions.
    #[arg(long)]
    pub forbid_two_cycles: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn basis_arguments_parse() {
        let cli = Cli::parse_from([
            "rnacycle",
            "-vv",
            "basis",
            "-i",
            "a.csv",
            "dir",
            "--mode",
            "fundamental",
            "--forbid-two-cycles",
            "--timeout-ms",
            "500",
            "-S",
            "basis.verify=false",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Basis(args) = cli.command else {
            panic!("expected basis command");
        };
        assert_eq!(args.input.input.len(), 2);
        assert_eq!(args.mode, Some(ModeArg::Fundamental));
        assert!(args.two_cycles.forbid_two_cycles);
        assert_eq!(args.timeout_ms, Some(500));
        assert_eq!(args.set_values, vec!["basis.verify=false".to_string()]);
    }

    #[test]
    fn two_cycle_flags_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "rnacycle",
            "basis",
            "-i",
            "a.csv",
            "--allow-two-cycles",
            "--forbid-two-cycles",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn backbone_flags_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "rnacycle",
            "inspect",
            "-i",
            "a.csv",
            "--add-backbone",
            "--no-backbone",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn mode_arg_converts_to_core_mode() {
        assert_eq!(BasisMode::from(ModeArg::Minimum), BasisMode::Minimum);
        assert_eq!(BasisMode::from(ModeArg::Fundamental), BasisMode::Fundamental);
    }
}
