mod defaults;

use self::defaults::DefaultsConfig;
use crate::cli::{DeriveArgs, ParameterArgs, StrategyName};
use crate::error::{CliError, Result};
use crate::utils::parser;
use clap::ValueEnum;
use pharmpoint::engine::config as core_config;
use pharmpoint::engine::strategy::{SelectionConfig, StrategyKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialMergeConfig {
    threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSelectionConfig {
    strategy: Option<StrategyName>,
    #[serde(rename = "num-points")]
    num_points: Option<usize>,
    #[serde(rename = "min-radius")]
    min_radius: Option<f64>,
    #[serde(rename = "max-radius")]
    max_radius: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialPipelineConfig {
    merge: Option<PartialMergeConfig>,
    selection: Option<PartialSelectionConfig>,
}

/// Parameter flags given directly on the command line; they win over file and `--set` values.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub threshold: Option<f64>,
    pub strategy: Option<StrategyName>,
    pub num_points: Option<usize>,
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
}

impl From<&DeriveArgs> for CliOverrides {
    fn from(args: &DeriveArgs) -> Self {
        Self {
            threshold: args.threshold,
            strategy: args.strategy,
            num_points: args.num_points,
            min_radius: args.min_radius,
            max_radius: args.max_radius,
        }
    }
}

impl CliOverrides {
    fn touches_selection(&self) -> bool {
        self.strategy.is_some()
            || self.num_points.is_some()
            || self.min_radius.is_some()
            || self.max_radius.is_some()
    }
}

/// Input and output locations of a single derivation.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub rings: PathBuf,
    pub donors: PathBuf,
    pub acceptors: PathBuf,
    pub site: PathBuf,
    pub output: PathBuf,
}

/// Fully resolved pipeline parameters, shared by every target of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParameters {
    pub merge_threshold: f64,
    pub selection: Option<SelectionConfig>,
}

impl PipelineParameters {
    pub fn to_config(&self, paths: InputPaths) -> Result<core_config::PipelineConfig> {
        core_config::PipelineConfigBuilder::new()
            .rings_path(paths.rings)
            .donors_path(paths.donors)
            .acceptors_path(paths.acceptors)
            .site_path(paths.site)
            .output_path(paths.output)
            .merge_threshold(self.merge_threshold)
            .selection(self.selection.clone())
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

impl PartialPipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the config file when one is given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final parameters. Precedence, highest first: CLI flags, `--set` values,
    /// the config file, built-in defaults.
    pub fn merge_with_cli(
        mut self,
        params: &ParameterArgs,
        overrides: &CliOverrides,
    ) -> Result<PipelineParameters> {
        self.apply_set_values(&params.set_values)?;
        let defaults = DefaultsConfig::default();

        let merge_config = self.merge.take().unwrap_or_default();
        let merge_threshold = overrides
            .threshold
            .or(merge_config.threshold)
            .unwrap_or(defaults.merge_threshold);

        let selection = Self::merge_selection(self.selection.take(), overrides, &defaults);

        Ok(PipelineParameters {
            merge_threshold,
            selection,
        })
    }

    fn merge_selection(
        partial: Option<PartialSelectionConfig>,
        overrides: &CliOverrides,
        defaults: &DefaultsConfig,
    ) -> Option<SelectionConfig> {
        if partial.is_none() && !overrides.touches_selection() {
            return None;
        }
        let partial = partial.unwrap_or_default();

        let name = overrides
            .strategy
            .or(partial.strategy)
            .unwrap_or(defaults.strategy);
        let num_points = overrides
            .num_points
            .or(partial.num_points)
            .unwrap_or(defaults.num_points);
        let min_radius = overrides.min_radius.or(partial.min_radius);
        let max_radius = overrides.max_radius.or(partial.max_radius);

        let strategy = match name {
            StrategyName::Simple => {
                if min_radius.is_some() || max_radius.is_some() {
                    warn!("Radius bounds are ignored by the simple strategy.");
                }
                StrategyKind::Simple
            }
            StrategyName::Adjusted => StrategyKind::Adjusted {
                min_radius: min_radius.unwrap_or(defaults.min_radius),
                max_radius: max_radius.unwrap_or(defaults.max_radius),
            },
        };

        Some(SelectionConfig {
            strategy,
            num_points,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "merge.threshold" => {
                    self.merge.get_or_insert_with(Default::default).threshold =
                        Some(parse_value(key, value_str, "float")?);
                }
                "selection.strategy" => {
                    let strategy = <StrategyName as ValueEnum>::from_str(value_str, true)
                        .map_err(|_| {
                            CliError::Config(format!(
                                "Invalid strategy for {}: {} (expected 'simple' or 'adjusted')",
                                key, value_str
                            ))
                        })?;
                    self.selection.get_or_insert_with(Default::default).strategy = Some(strategy);
                }
                "selection.num-points" => {
                    self.selection.get_or_insert_with(Default::default).num_points =
                        Some(parse_value(key, value_str, "integer")?);
                }
                "selection.min-radius" => {
                    self.selection.get_or_insert_with(Default::default).min_radius =
                        Some(parse_value(key, value_str, "float")?);
                }
                "selection.max-radius" => {
                    self.selection.get_or_insert_with(Default::default).max_radius =
                        Some(parse_value(key, value_str, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn derive_args(extra: &[&str]) -> DeriveArgs {
        let mut args = vec![
            "pharmpoint",
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
        ];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Derive(args) => args,
            _ => panic!("Expected 'derive' subcommand"),
        }
    }

    fn resolve(args: &DeriveArgs) -> Result<PipelineParameters> {
        PartialPipelineConfig::load(args.parameters.config.as_deref())?
            .merge_with_cli(&args.parameters, &CliOverrides::from(args))
    }

    #[test]
    fn no_config_yields_defaults_without_selection() {
        let params = resolve(&derive_args(&[])).unwrap();
        assert_eq!(params.merge_threshold, 2.0);
        assert!(params.selection.is_none());
    }

    #[test]
    fn file_values_fill_in_selection_defaults() {
        let config_path = write_config_file(
            "config_file.toml",
            r#"
            [merge]
            threshold = 1.5

            [selection]
            strategy = "adjusted"
            num-points = 3
            "#,
        );
        let args = derive_args(&["-c", config_path.to_str().unwrap()]);

        let params = resolve(&args).unwrap();

        assert_eq!(params.merge_threshold, 1.5);
        assert_eq!(
            params.selection,
            Some(SelectionConfig {
                strategy: StrategyKind::Adjusted {
                    min_radius: 0.0,
                    max_radius: 1.0
                },
                num_points: 3,
            })
        );
    }

    #[test]
    fn empty_selection_section_enables_simple_strategy() {
        let config_path = write_config_file("config_empty_selection.toml", "[selection]\n");
        let args = derive_args(&["-c", config_path.to_str().unwrap()]);

        let selection = resolve(&args).unwrap().selection.unwrap();

        assert_eq!(selection.strategy, StrategyKind::Simple);
        assert_eq!(selection.num_points, 5);
    }

    #[test]
    fn cli_args_override_file_values() {
        let config_path = write_config_file(
            "config_override.toml",
            r#"
            [merge]
            threshold = 1.5 # Will be overridden

            [selection]
            strategy = "simple" # Will be overridden
            num-points = 3
            "#,
        );
        let args = derive_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "-t",
            "3.0",
            "--strategy",
            "adjusted",
            "--max-radius",
            "1.5",
        ]);

        let params = resolve(&args).unwrap();

        assert_eq!(params.merge_threshold, 3.0);
        let selection = params.selection.unwrap();
        assert_eq!(selection.num_points, 3);
        assert_eq!(
            selection.strategy,
            StrategyKind::Adjusted {
                min_radius: 0.0,
                max_radius: 1.5
            }
        );
    }

    #[test]
    fn set_values_override_file_but_not_cli_flags() {
        let config_path = write_config_file(
            "config_set.toml",
            r#"
            [merge]
            threshold = 1.5

            [selection]
            num-points = 3
            "#,
        );
        let args = derive_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "-n",
            "9",
            "-S",
            "merge.threshold=2.5",
            "-S",
            "selection.num-points=4",
            "-S",
            "selection.strategy=Adjusted",
        ]);

        let params = resolve(&args).unwrap();

        assert_eq!(params.merge_threshold, 2.5);
        let selection = params.selection.unwrap();
        assert_eq!(selection.num_points, 9);
        assert!(matches!(selection.strategy, StrategyKind::Adjusted { .. }));
    }

    #[test]
    fn cli_selection_flag_alone_enables_selection() {
        let params = resolve(&derive_args(&["-n", "2"])).unwrap();
        assert_eq!(
            params.selection,
            Some(SelectionConfig {
                strategy: StrategyKind::Simple,
                num_points: 2,
            })
        );
    }

    #[test]
    fn unsupported_or_malformed_set_values_are_rejected() {
        for pair in [
            "merge.distance=2.0",
            "merge.threshold=abc",
            "selection.strategy=greedy",
            "selection.num-points",
        ] {
            let args = derive_args(&["-S", pair]);
            assert!(
                matches!(resolve(&args), Err(CliError::Config(_))),
                "'{}' should be rejected",
                pair
            );
        }
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let config_path = write_config_file(
            "config_unknown.toml",
            r#"
            [merge]
            distance = 2.0
            "#,
        );
        let args = derive_args(&["-c", config_path.to_str().unwrap()]);
        assert!(matches!(
            resolve(&args),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn to_config_validates_resolved_parameters() {
        let paths = InputPaths {
            rings: "r.sdf".into(),
            donors: "d.sdf".into(),
            acceptors: "a.sdf".into(),
            site: "s.pdb".into(),
            output: "out.json".into(),
        };

        let valid = PipelineParameters {
            merge_threshold: 2.0,
            selection: None,
        };
        let config = valid.to_config(paths.clone()).unwrap();
        assert_eq!(config.site_path, PathBuf::from("s.pdb"));

        let invalid = PipelineParameters {
            merge_threshold: 0.0,
            selection: None,
        };
        assert!(matches!(
            invalid.to_config(paths),
            Err(CliError::Config(_))
        ));
    }
}
