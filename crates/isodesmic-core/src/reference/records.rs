use super::entry::{CalculatedDataEntry, ReferenceDataEntry};
use super::species::ReferenceSpecies;
use crate::core::models::record::{MoleculeRecord, MoleculeRecordError};
use crate::core::thermo::quantity::{Enthalpy, QuantityError};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// An enthalpy as written in a file: a value, its unit and an optional uncertainty
/// in the same unit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnthalpyRecord {
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub uncertainty: f64,
}

impl EnthalpyRecord {
    pub fn to_enthalpy(&self) -> Result<Enthalpy, QuantityError> {
        Enthalpy::with_uncertainty(self.value, &self.unit, self.uncertainty)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ReferenceDataRecord {
    pub source: String,
    pub h298: EnthalpyRecord,
    #[serde(default)]
    pub atct_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CalculatedDataRecord {
    pub level_of_theory: String,
    pub h298: EnthalpyRecord,
    #[serde(default)]
    pub t1_diagnostic: Option<f64>,
    #[serde(default)]
    pub fod: Option<f64>,
}

/// One reference species as stored in a reference set file.
///
/// Reference and calculated data are arrays of tables so that their order in the
/// file is kept; the preferred-source rules depend on it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ReferenceSpeciesRecord {
    pub label: String,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub cas_number: Option<String>,
    #[serde(default)]
    pub preferred_reference: Option<String>,
    pub molecule: MoleculeRecord,
    #[serde(default)]
    pub reference_data: Vec<ReferenceDataRecord>,
    #[serde(default)]
    pub calculated_data: Vec<CalculatedDataRecord>,
}

/// The top level of a reference set file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSetFile {
    /// Set name; defaults to the file stem when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Vec<ReferenceSpeciesRecord>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Invalid molecule: {0}")]
    Molecule(#[from] MoleculeRecordError),

    #[error("Invalid enthalpy: {0}")]
    Quantity(#[from] QuantityError),

    #[error("Duplicate {kind} '{key}'")]
    DuplicateKey { kind: &'static str, key: String },
}

impl ReferenceSpeciesRecord {
    /// True if the record has at least one reference entry and one calculated entry.
    pub fn is_usable(&self) -> bool {
        !self.reference_data.is_empty() && !self.calculated_data.is_empty()
    }

    pub fn to_reference_species(&self) -> Result<ReferenceSpecies, RecordError> {
        let molecule = Arc::new(self.molecule.to_molecule(&self.label)?);

        let mut seen = HashSet::new();
        let mut reference_data = Vec::with_capacity(self.reference_data.len());
        for record in &self.reference_data {
            if !seen.insert(record.source.as_str()) {
                return Err(RecordError::DuplicateKey {
                    kind: "reference source",
                    key: record.source.clone(),
                });
            }
            reference_data.push((
                record.source.clone(),
                ReferenceDataEntry {
                    h298: record.h298.to_enthalpy()?,
                    atct_id: record.atct_id.clone(),
                },
            ));
        }

        let mut seen = HashSet::new();
        let mut calculated_data = Vec::with_capacity(self.calculated_data.len());
        for record in &self.calculated_data {
            if !seen.insert(record.level_of_theory.as_str()) {
                return Err(RecordError::DuplicateKey {
                    kind: "level of theory",
                    key: record.level_of_theory.clone(),
                });
            }
            calculated_data.push((
                record.level_of_theory.clone(),
                CalculatedDataEntry {
                    h298: record.h298.to_enthalpy()?,
                    t1_diagnostic: record.t1_diagnostic,
                    fod: record.fod,
                },
            ));
        }

        Ok(ReferenceSpecies {
            label: self.label.clone(),
            index: self.index,
            cas_number: self.cas_number.clone(),
            molecule,
            reference_data,
            calculated_data,
            preferred_reference: self.preferred_reference.clone(),
        })
    }
}
