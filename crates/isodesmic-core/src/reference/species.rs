use super::entry::{CalculatedDataEntry, ReferenceDataEntry};
use super::error::ReferenceError;
use super::preferred::select_preferred_source;
use crate::core::models::molecule::Molecule;
use crate::core::species::Species;
use std::fmt;
use std::sync::Arc;

/// A species of a reference set with all of its stored data.
///
/// Reference data maps a source name to a high-level value; calculated data maps
/// a level of theory to a low-level value. Both keep the order of the file they
/// were read from.
#[derive(Debug, Clone)]
pub struct ReferenceSpecies {
    pub label: String,
    /// Position of the species in its reference set, when the set numbers them.
    pub index: Option<usize>,
    pub cas_number: Option<String>,
    pub molecule: Arc<Molecule>,
    pub reference_data: Vec<(String, ReferenceDataEntry)>,
    pub calculated_data: Vec<(String, CalculatedDataEntry)>,
    /// Source to use for high-level data when none is requested explicitly.
    pub preferred_reference: Option<String>,
}

impl ReferenceSpecies {
    pub fn reference_entry(&self, source: &str) -> Option<&ReferenceDataEntry> {
        self.reference_data
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, entry)| entry)
    }

    pub fn calculated_entry(&self, level_of_theory: &str) -> Option<&CalculatedDataEntry> {
        self.calculated_data
            .iter()
            .find(|(level, _)| level == level_of_theory)
            .map(|(_, entry)| entry)
    }

    pub fn has_level_of_theory(&self, level_of_theory: &str) -> bool {
        self.calculated_entry(level_of_theory).is_some()
    }

    pub fn levels_of_theory(&self) -> impl Iterator<Item = &str> {
        self.calculated_data.iter().map(|(level, _)| level.as_str())
    }

    /// Resolves which source the high-level data should come from.
    ///
    /// `source` takes precedence, then the species' own preferred reference, then
    /// the entry with the smallest positive uncertainty.
    pub fn preferred_source<'a>(&'a self, source: Option<&'a str>) -> Option<&'a str> {
        let preferred = source.or(self.preferred_reference.as_deref());
        select_preferred_source(
            self.reference_data.iter().map(|(s, e)| (s.as_str(), &e.h298)),
            preferred,
        )
    }

    /// Builds a reaction participant from the data at `level_of_theory`.
    ///
    /// The molecule is shared with the returned species, not copied.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::LevelOfTheoryUnavailable` if there is no
    /// calculated data at that level, `ReferenceError::NoReferenceData` if the
    /// species has no high-level data at all and `ReferenceError::UnknownSource`
    /// if the resolved source has no entry.
    pub fn to_species(
        &self,
        level_of_theory: &str,
        source: Option<&str>,
    ) -> Result<Species, ReferenceError> {
        let calculated = self.calculated_entry(level_of_theory).ok_or_else(|| {
            ReferenceError::LevelOfTheoryUnavailable {
                species: self.label.clone(),
                level: level_of_theory.to_string(),
            }
        })?;

        let no_reference_data = || ReferenceError::NoReferenceData {
            species: self.label.clone(),
        };
        if self.reference_data.is_empty() {
            return Err(no_reference_data());
        }
        let source = self.preferred_source(source).ok_or_else(no_reference_data)?;
        let reference = self
            .reference_entry(source)
            .ok_or_else(|| ReferenceError::UnknownSource {
                species: self.label.clone(),
                source_name: source.to_string(),
            })?;

        let species = Species::new(Arc::clone(&self.molecule), level_of_theory, calculated.h298)?;
        Ok(species.with_high_level(reference.h298, Some(source)))
    }
}

impl fmt::Display for ReferenceSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{} ({})", self.label, index),
            None => f.write_str(&self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::thermo::quantity::Enthalpy;

    const LEVEL: &str = "ccsd(t)-f12/cc-pvtz-f12";

    fn reference_species(uncertainties: &[(&str, f64, f64)], preferred: Option<&str>) -> ReferenceSpecies {
        let mut molecule = Molecule::new("argon");
        molecule.add_atom(Atom::new(Element::from_symbol("Ar").unwrap()));
        ReferenceSpecies {
            label: "argon".to_string(),
            index: Some(7),
            cas_number: None,
            molecule: Arc::new(molecule),
            reference_data: uncertainties
                .iter()
                .map(|&(source, value, u)| {
                    (
                        source.to_string(),
                        ReferenceDataEntry {
                            h298: Enthalpy::with_uncertainty(value, "J/mol", u).unwrap(),
                            atct_id: None,
                        },
                    )
                })
                .collect(),
            calculated_data: vec![(
                LEVEL.to_string(),
                CalculatedDataEntry {
                    h298: Enthalpy::new(3.0, "J/mol").unwrap(),
                    t1_diagnostic: None,
                    fod: None,
                },
            )],
            preferred_reference: preferred.map(str::to_string),
        }
    }

    #[test]
    fn to_species_uses_lowest_uncertainty_source() {
        let reference = reference_species(&[("A", 10.0, 2.0), ("B", 20.0, 1.0)], None);
        let species = reference.to_species(LEVEL, None).unwrap();

        assert_eq!(species.level_of_theory(), LEVEL);
        assert_eq!(species.low_level_enthalpy().value_si(), 3.0);
        assert_eq!(species.high_level_enthalpy().unwrap().value_si(), 20.0);
        assert_eq!(species.source(), Some("B"));
        assert!(std::ptr::eq(species.molecule(), reference.molecule.as_ref()));
    }

    #[test]
    fn explicit_source_beats_preferred_reference() {
        let reference = reference_species(&[("A", 10.0, 2.0), ("B", 20.0, 1.0)], Some("A"));
        assert_eq!(reference.to_species(LEVEL, None).unwrap().source(), Some("A"));
        assert_eq!(reference.to_species(LEVEL, Some("B")).unwrap().source(), Some("B"));
    }

    #[test]
    fn missing_level_of_theory_is_an_error() {
        let reference = reference_species(&[("A", 10.0, 2.0)], None);
        assert_eq!(
            reference.to_species("hf/sto-3g", None).unwrap_err(),
            ReferenceError::LevelOfTheoryUnavailable {
                species: "argon".to_string(),
                level: "hf/sto-3g".to_string(),
            }
        );
    }

    #[test]
    fn missing_reference_data_is_an_error() {
        let reference = reference_species(&[], None);
        assert_eq!(
            reference.to_species(LEVEL, None).unwrap_err(),
            ReferenceError::NoReferenceData {
                species: "argon".to_string()
            }
        );
        assert!(matches!(
            reference.to_species(LEVEL, Some("A")),
            Err(ReferenceError::NoReferenceData { .. })
        ));
    }

    #[test]
    fn unknown_source_is_an_error() {
        let reference = reference_species(&[("A", 10.0, 2.0)], Some("C"));
        assert_eq!(
            reference.to_species(LEVEL, None).unwrap_err(),
            ReferenceError::UnknownSource {
                species: "argon".to_string(),
                source_name: "C".to_string(),
            }
        );
    }

    #[test]
    fn display_includes_index() {
        let reference = reference_species(&[], None);
        assert_eq!(reference.to_string(), "argon (7)");
        assert!(reference.has_level_of_theory(LEVEL));
        assert_eq!(reference.levels_of_theory().collect::<Vec<_>>(), vec![LEVEL]);
    }
}
