use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
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
    about = "PharmPoint CLI - Derive pharmacophore models from clustered ligand geometry and a binding-site structure.",
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

    /// Set the number of threads used by `batch`.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive a pharmacophore session from one set of cluster files and a site structure.
    Derive(DeriveArgs),
    /// Derive pharmacophores for every target listed in a TOML manifest, in parallel.
    Batch(BatchArgs),
}

/// Selection policy names accepted on the command line and in config files.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyName {
    /// Merge, then keep the first N points.
    Simple,
    /// Merge, keep the first N points, and clamp their radii.
    Adjusted,
}

/// Pipeline parameters shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ParameterArgs {
    /// Path to a TOML configuration file with `[merge]` and `[selection]` sections.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S selection.num-points=8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `derive` subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    // --- Inputs ---
    /// Hydrophobic (ring) cluster file in SDF format.
    #[arg(long, required = true, value_name = "PATH")]
    pub rings: PathBuf,

    /// Hydrogen-bond donor cluster file in SDF format.
    #[arg(long, required = true, value_name = "PATH")]
    pub donors: PathBuf,

    /// Hydrogen-bond acceptor cluster file in SDF format.
    #[arg(long, required = true, value_name = "PATH")]
    pub acceptors: PathBuf,

    /// Binding-site structure in PDB format.
    #[arg(long, required = true, value_name = "PATH")]
    pub site: PathBuf,

    /// Path for the output session file (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub parameters: ParameterArgs,

    // --- Merge Overrides ---
    /// Override the merge distance threshold in Angstroms.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    // --- Selection Overrides ---
    /// Reduce the ligand features with a selection strategy.
    #[arg(long, value_enum, value_name = "NAME")]
    pub strategy: Option<StrategyName>,

    /// Override the number of ligand points a strategy keeps.
    #[arg(short = 'n', long, value_name = "INT")]
    pub num_points: Option<usize>,

    /// Override the lower radius bound of the adjusted strategy.
    #[arg(long, value_name = "FLOAT")]
    pub min_radius: Option<f64>,

    /// Override the upper radius bound of the adjusted strategy.
    #[arg(long, value_name = "FLOAT")]
    pub max_radius: Option<f64>,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// TOML manifest listing `[[target]]` tables.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub parameters: ParameterArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_parses_inputs_and_overrides() {
        let cli = Cli::parse_from([
            "pharmpoint",
            "-vv",
            "derive",
            "--rings",
            "r.sdf",
            "--donors",
            "d.sdf",
            "--acceptors",
            "a.sdf",
            "--site",
            "s.pdb",
            "-o",
            "out.json",
            "-t",
            "1.5",
            "--strategy",
            "adjusted",
            "-n",
            "3",
            "-S",
            "selection.max-radius=2.0",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Derive(args) = cli.command else {
            panic!("Expected 'derive' subcommand");
        };
        assert_eq!(args.rings, PathBuf::from("r.sdf"));
        assert_eq!(args.threshold, Some(1.5));
        assert_eq!(args.strategy, Some(StrategyName::Adjusted));
        assert_eq!(args.num_points, Some(3));
        assert_eq!(args.parameters.set_values, vec!["selection.max-radius=2.0"]);
        assert!(args.parameters.config.is_none());
    }

    #[test]
    fn batch_requires_manifest() {
        assert!(Cli::try_parse_from(["pharmpoint", "batch"]).is_err());
        let cli = Cli::parse_from(["pharmpoint", "-j", "4", "batch", "-m", "targets.toml"]);
        assert_eq!(cli.threads, Some(4));
        assert!(matches!(cli.command, Commands::Batch(_)));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["pharmpoint", "-q", "-v", "batch", "-m", "m.toml"]);
        assert!(result.is_err());
    }
}
