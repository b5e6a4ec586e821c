use crate::core::models::molecule::Molecule;
use crate::core::thermo::quantity::{Enthalpy, QuantityError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeciesError {
    #[error("The level of theory used for the low-level enthalpy must not be empty")]
    EmptyLevelOfTheory,

    #[error("Species '{label}' has no atoms")]
    EmptyMolecule { label: String },

    #[error("Invalid enthalpy for species: {0}")]
    Quantity(#[from] QuantityError),
}

/// A participant in an error-canceling reaction.
///
/// A species pairs a molecular structure with its low-level enthalpy of formation
/// computed at a named level of theory and, for reference species, a high-level
/// enthalpy taken from a trusted source. Species are immutable once built; the
/// only way to attach high-level data is [`Species::with_high_level`], which
/// returns a new value.
///
/// Species are shared as `Arc<Species>` throughout the crate and compared by
/// identity (`Arc::ptr_eq`), never structurally.
#[derive(Debug, Clone)]
pub struct Species {
    molecule: Arc<Molecule>,
    level_of_theory: String,
    low_level_enthalpy: Enthalpy,
    high_level_enthalpy: Option<Enthalpy>,
    source: Option<String>,
}

impl Species {
    /// Creates a species carrying only low-level data.
    ///
    /// # Errors
    ///
    /// Returns `SpeciesError::EmptyLevelOfTheory` if `level_of_theory` is blank
    /// and `SpeciesError::EmptyMolecule` if the molecule has no atoms.
    pub fn new(
        molecule: impl Into<Arc<Molecule>>,
        level_of_theory: &str,
        low_level_enthalpy: Enthalpy,
    ) -> Result<Self, SpeciesError> {
        let molecule = molecule.into();
        let level_of_theory = level_of_theory.trim();
        if level_of_theory.is_empty() {
            return Err(SpeciesError::EmptyLevelOfTheory);
        }
        if molecule.is_empty() {
            return Err(SpeciesError::EmptyMolecule {
                label: molecule.to_string(),
            });
        }

        Ok(Self {
            molecule,
            level_of_theory: level_of_theory.to_string(),
            low_level_enthalpy,
            high_level_enthalpy: None,
            source: None,
        })
    }

    /// Creates a species from a raw value and unit string.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Species::new`], returns
    /// `SpeciesError::Quantity` when the unit is missing or unknown or the value
    /// is not finite.
    pub fn from_value(
        molecule: impl Into<Arc<Molecule>>,
        level_of_theory: &str,
        value: f64,
        unit: &str,
    ) -> Result<Self, SpeciesError> {
        let low_level_enthalpy = Enthalpy::new(value, unit)?;
        Self::new(molecule, level_of_theory, low_level_enthalpy)
    }

    /// Returns a copy of this species carrying reference-quality data.
    ///
    /// The original species is left untouched, so a low-level-only target can be
    /// reused as a template.
    pub fn with_high_level(&self, high_level_enthalpy: Enthalpy, source: Option<&str>) -> Self {
        Self {
            molecule: Arc::clone(&self.molecule),
            level_of_theory: self.level_of_theory.clone(),
            low_level_enthalpy: self.low_level_enthalpy,
            high_level_enthalpy: Some(high_level_enthalpy),
            source: source.map(str::to_string),
        }
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn level_of_theory(&self) -> &str {
        &self.level_of_theory
    }

    pub fn low_level_enthalpy(&self) -> Enthalpy {
        self.low_level_enthalpy
    }

    pub fn high_level_enthalpy(&self) -> Option<Enthalpy> {
        self.high_level_enthalpy
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns true if the species carries high-level data and can serve as a reference.
    pub fn is_reference(&self) -> bool {
        self.high_level_enthalpy.is_some()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.molecule)
    }
}
