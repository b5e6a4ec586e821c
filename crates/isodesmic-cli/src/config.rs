pub mod defaults;

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use isodesmic::core::features::label::ConservationRules;
use isodesmic::core::thermo::units::EnergyUnit;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialReferencesConfig {
    paths: Option<Vec<PathBuf>>,
    sets: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialConstraintsConfig {
    #[serde(rename = "conserve-bonds")]
    conserve_bonds: Option<bool>,
    #[serde(rename = "conserve-ring-size")]
    conserve_ring_size: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    unit: Option<String>,
}

/// Configuration as read from a TOML file, before CLI overrides and defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    references: Option<PartialReferencesConfig>,
    constraints: Option<PartialConstraintsConfig>,
    output: Option<PartialOutputConfig>,
    /// Directory relative reference paths in the file are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// The fully merged configuration used by the subcommands.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub reference_paths: Vec<PathBuf>,
    pub reference_sets: Option<Vec<String>>,
    pub rules: ConservationRules,
    pub unit: EnergyUnit,
}

/// CLI switches that override file values.
#[derive(Debug, Default, Clone)]
pub struct Overrides<'a> {
    pub no_bonds: bool,
    pub no_rings: bool,
    pub unit: Option<&'a str>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Loads the config file named in `source`, or starts from an empty one.
    pub fn load(source: &SourceArgs) -> Result<Self> {
        match &source.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(mut self, source: &SourceArgs, overrides: Overrides) -> Result<AppConfig> {
        self.apply_set_values(&source.set_values)?;
        let defaults = DefaultsConfig::default();

        let references = self.references.take().unwrap_or_default();
        let constraints = self.constraints.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let reference_paths = if source.references.is_empty() {
            let base = self.base_dir.as_deref();
            references
                .paths
                .unwrap_or_default()
                .into_iter()
                .map(|p| match base {
                    Some(dir) if p.is_relative() => dir.join(p),
                    _ => p,
                })
                .collect()
        } else {
            source.references.clone()
        };

        let rules = ConservationRules {
            bonds: !overrides.no_bonds
                && constraints.conserve_bonds.unwrap_or(defaults.conserve_bonds),
            ring_sizes: !overrides.no_rings
                && constraints
                    .conserve_ring_size
                    .unwrap_or(defaults.conserve_ring_size),
        };

        let unit_str = overrides
            .unit
            .map(str::to_string)
            .or(output.unit)
            .unwrap_or(defaults.unit);
        let unit = unit_str
            .parse::<EnergyUnit>()
            .map_err(|e| CliError::Config(format!("Invalid output unit '{}': {}", unit_str, e)))?;

        Ok(AppConfig {
            reference_paths,
            reference_sets: references.sets,
            rules,
            unit,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let parse_bool = |value: &str| -> Result<bool> {
                value.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value))
                })
            };

            match key {
                "constraints.conserve-bonds" => {
                    self.constraints
                        .get_or_insert_with(Default::default)
                        .conserve_bonds = Some(parse_bool(value_str)?);
                }
                "constraints.conserve-ring-size" => {
                    self.constraints
                        .get_or_insert_with(Default::default)
                        .conserve_ring_size = Some(parse_bool(value_str)?);
                }
                "output.unit" => {
                    self.output.get_or_insert_with(Default::default).unit =
                        Some(value_str.to_string());
                }
                "references.sets" => {
                    self.references.get_or_insert_with(Default::default).sets = Some(
                        value_str
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect(),
                    );
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
