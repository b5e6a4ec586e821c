use crate::core::features::counts::FeatureCounts;
use crate::core::features::label::{ConservationRules, FeatureLabel};
use crate::core::species::Species;
use crate::core::thermo::quantity::Enthalpy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReactionError {
    #[error(
        "Species '{species}' was computed at '{species_level}' but the reaction uses '{reaction_level}'"
    )]
    LevelOfTheoryMismatch {
        species: String,
        species_level: String,
        reaction_level: String,
    },

    #[error("Companion '{species}' has a zero stoichiometric coefficient")]
    ZeroCoefficient { species: String },

    #[error("Companion '{species}' has a non-finite stoichiometric coefficient ({coefficient})")]
    NonFiniteCoefficient { species: String, coefficient: f64 },

    #[error("The target '{species}' cannot also be listed as a companion")]
    TargetAsCompanion { species: String },

    #[error("Companion '{species}' is listed more than once")]
    DuplicateCompanion { species: String },

    #[error("Companion '{species}' has no high-level enthalpy")]
    MissingReferenceData { species: String },
}

/// An error-canceling reaction.
///
/// The target is consumed with an implicit coefficient of -1. Companions carry
/// signed, nonzero coefficients: positive companions are products, negative
/// companions are additional reactants. Construction validates the whole reaction
/// once; afterwards every computation is a pure function of the stored species.
#[derive(Debug, Clone)]
pub struct Reaction {
    target: Arc<Species>,
    companions: Vec<(Arc<Species>, f64)>,
}

impl Reaction {
    /// Builds a reaction from a target and its companions.
    ///
    /// # Errors
    ///
    /// Every companion's level of theory is checked against the target's before
    /// anything else, so a mismatch is reported as
    /// `ReactionError::LevelOfTheoryMismatch` whatever the coefficients are. After
    /// that, zero or non-finite coefficients, the target listed as a companion and
    /// duplicated companions are rejected.
    pub fn new<I>(target: Arc<Species>, companions: I) -> Result<Self, ReactionError>
    where
        I: IntoIterator<Item = (Arc<Species>, f64)>,
    {
        let companions: Vec<(Arc<Species>, f64)> = companions.into_iter().collect();

        if let Some((species, _)) = companions
            .iter()
            .find(|(s, _)| s.level_of_theory() != target.level_of_theory())
        {
            return Err(ReactionError::LevelOfTheoryMismatch {
                species: species.to_string(),
                species_level: species.level_of_theory().to_string(),
                reaction_level: target.level_of_theory().to_string(),
            });
        }

        for (i, (species, coefficient)) in companions.iter().enumerate() {
            if !coefficient.is_finite() {
                return Err(ReactionError::NonFiniteCoefficient {
                    species: species.to_string(),
                    coefficient: *coefficient,
                });
            }
            if *coefficient == 0.0 {
                return Err(ReactionError::ZeroCoefficient {
                    species: species.to_string(),
                });
            }
            if Arc::ptr_eq(species, &target) {
                return Err(ReactionError::TargetAsCompanion {
                    species: species.to_string(),
                });
            }
            if companions[..i].iter().any(|(seen, _)| Arc::ptr_eq(seen, species)) {
                return Err(ReactionError::DuplicateCompanion {
                    species: species.to_string(),
                });
            }
        }

        Ok(Self { target, companions })
    }

    pub fn target(&self) -> &Arc<Species> {
        &self.target
    }

    pub fn companions(&self) -> &[(Arc<Species>, f64)] {
        &self.companions
    }

    pub fn level_of_theory(&self) -> &str {
        self.target.level_of_theory()
    }

    /// The enthalpy change of the reaction at the low level of theory.
    ///
    /// This is `sum(c * companion.low) - target.low`, the residual error the
    /// low-level method makes on this reaction.
    pub fn low_level_reaction_enthalpy(&self) -> Enthalpy {
        let products: f64 = self
            .companions
            .iter()
            .map(|(s, c)| c * s.low_level_enthalpy().value_si())
            .sum();
        Enthalpy::from_si(products - self.target.low_level_enthalpy().value_si())
    }

    /// The coefficient-weighted sum of the companions' high-level enthalpies.
    ///
    /// # Errors
    ///
    /// Returns `ReactionError::MissingReferenceData` naming the first companion
    /// without high-level data. All companions are checked before summing.
    pub fn high_level_companion_sum(&self) -> Result<Enthalpy, ReactionError> {
        let high_levels = self
            .companions
            .iter()
            .map(|(s, c)| {
                s.high_level_enthalpy()
                    .map(|h| (h, *c))
                    .ok_or_else(|| ReactionError::MissingReferenceData {
                        species: s.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Enthalpy::from_si(
            high_levels.iter().map(|(h, c)| c * h.value_si()).sum(),
        ))
    }

    /// Estimates the target's high-level enthalpy of formation.
    ///
    /// The result is the high-level companion sum minus the low-level reaction
    /// enthalpy.
    pub fn estimated_high_level_enthalpy(&self) -> Result<Enthalpy, ReactionError> {
        let high = self.high_level_companion_sum()?;
        let low_rxn = self.low_level_reaction_enthalpy();
        Ok(Enthalpy::from_si(high.value_si() - low_rxn.value_si()))
    }

    /// Returns the features that do not balance across the reaction.
    ///
    /// Each entry is `sum(c * companion count) - target count` for a label with a
    /// nonzero net count. An empty result means the reaction conserves every
    /// feature enabled by `rules`.
    pub fn balance_residual(&self, rules: ConservationRules) -> Vec<(FeatureLabel, f64)> {
        let mut order: Vec<FeatureLabel> = Vec::new();
        let mut net: HashMap<FeatureLabel, f64> = HashMap::new();
        let mut accumulate = |counts: FeatureCounts, coefficient: f64| {
            for (label, count) in counts.iter() {
                let entry = net.entry(label).or_insert_with(|| {
                    order.push(label);
                    0.0
                });
                *entry += coefficient * f64::from(count);
            }
        };

        accumulate(FeatureCounts::extract(self.target.molecule(), rules), -1.0);
        for (species, coefficient) in &self.companions {
            accumulate(FeatureCounts::extract(species.molecule(), rules), *coefficient);
        }

        order
            .into_iter()
            .filter_map(|label| {
                let value = net[&label];
                (value.abs() > BALANCE_TOLERANCE).then_some((label, value))
            })
            .collect()
    }
}

const BALANCE_TOLERANCE: f64 = 1e-9;

impl fmt::Display for Reaction {
    /// Formats the reaction as `reactants == products`, e.g. `1*T + 2*B == 1*A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reactants = vec![format!("1*{}", self.target)];
        let mut products = Vec::new();
        for (species, coefficient) in &self.companions {
            if *coefficient < 0.0 {
                reactants.push(format!("{}*{}", -coefficient, species));
            } else {
                products.push(format!("{}*{}", coefficient, species));
            }
        }
        write!(f, "{} == {}", reactants.join(" + "), products.join(" + "))
    }
}
