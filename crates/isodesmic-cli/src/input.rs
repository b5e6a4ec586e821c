use crate::error::{CliError, Result};
use isodesmic::core::models::record::MoleculeRecord;
use isodesmic::core::reaction::Reaction;
use isodesmic::core::species::Species;
use isodesmic::reference::database::ReferenceDatabase;
use isodesmic::reference::records::EnthalpyRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A species whose high-level enthalpy is to be estimated.
///
/// ```toml
/// label = "propane"
/// level-of-theory = "wb97m-v/def2-tzvpd"
/// h298 = { value = -80.1, unit = "kJ/mol" }
///
/// [molecule]
/// atoms = [
///     { serial = 1, element = "C", hydrogens = 3 },
///     { serial = 2, element = "C", hydrogens = 2 },
///     { serial = 3, element = "C", hydrogens = 3 },
/// ]
/// bonds = [{ atoms = [1, 2] }, { atoms = [2, 3] }]
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TargetFile {
    pub label: String,
    pub level_of_theory: String,
    pub h298: EnthalpyRecord,
    pub molecule: MoleculeRecord,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CompanionEntry {
    /// Label of the companion in the loaded reference sets.
    pub label: String,
    pub coefficient: f64,
    /// Reference source to take the high-level value from.
    #[serde(default)]
    pub source: Option<String>,
}

/// A reaction to evaluate.
///
/// `target` is a target file path, relative to the reaction file. Companions are
/// looked up in the reference sets by label; positive coefficients are products.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ReactionFile {
    pub target: PathBuf,
    #[serde(default)]
    pub companions: Vec<CompanionEntry>,
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

impl TargetFile {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading target species from {:?}", path);
        read_toml(path)
    }

    pub fn to_species(&self, path: &Path) -> Result<Species> {
        let parse_error = |e: anyhow::Error| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        };
        let molecule = self
            .molecule
            .to_molecule(&self.label)
            .map_err(|e| parse_error(e.into()))?;
        let enthalpy = self.h298.to_enthalpy().map_err(|e| parse_error(e.into()))?;
        Species::new(molecule, &self.level_of_theory, enthalpy).map_err(|e| parse_error(e.into()))
    }
}

/// Loads a target file straight into a species.
pub fn load_target(path: &Path) -> Result<Arc<Species>> {
    let file = TargetFile::load(path)?;
    Ok(Arc::new(file.to_species(path)?))
}

impl ReactionFile {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading reaction from {:?}", path);
        read_toml(path)
    }

    fn target_path(&self, reaction_path: &Path) -> PathBuf {
        match reaction_path.parent() {
            Some(dir) if self.target.is_relative() => dir.join(&self.target),
            _ => self.target.clone(),
        }
    }

    /// Resolves the target and companions into a reaction.
    ///
    /// Companions are built at the target's level of theory and looked up only in
    /// `sets` when it is given.
    pub fn to_reaction(
        &self,
        reaction_path: &Path,
        database: &ReferenceDatabase,
        sets: Option<&[String]>,
    ) -> Result<Reaction> {
        let target = load_target(&self.target_path(reaction_path))?;
        let level = target.level_of_theory().to_string();

        let mut seen = HashSet::new();
        let mut companions = Vec::with_capacity(self.companions.len());
        for entry in &self.companions {
            if !seen.insert(entry.label.as_str()) {
                return Err(CliError::Argument(format!(
                    "Companion '{}' is listed more than once in {:?}",
                    entry.label, reaction_path
                )));
            }
            let reference = database.species_by_label_in(&entry.label, sets)?.ok_or_else(|| {
                CliError::Argument(format!(
                    "Companion '{}' from {:?} is not in the loaded reference sets",
                    entry.label, reaction_path
                ))
            })?;
            let species = reference.to_species(&level, entry.source.as_deref())?;
            companions.push((Arc::new(species), entry.coefficient));
        }

        Ok(Reaction::new(target, companions)?)
    }
}
