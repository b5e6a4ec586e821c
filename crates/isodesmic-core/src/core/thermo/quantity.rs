use super::units::{EnergyUnit, ParseUnitError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    #[error("An enthalpy value requires an explicit unit")]
    MissingUnit,

    #[error("Unknown energy unit: '{0}'")]
    UnknownUnit(String),

    #[error("Enthalpy value must be finite, got {0}")]
    NonFiniteValue(f64),

    #[error("Uncertainty must be finite and non-negative, got {0}")]
    InvalidUncertainty(f64),
}

impl From<ParseUnitError> for QuantityError {
    fn from(e: ParseUnitError) -> Self {
        match e {
            ParseUnitError::Missing => Self::MissingUnit,
            ParseUnitError::Unknown(unit) => Self::UnknownUnit(unit),
        }
    }
}

/// A molar enthalpy stored in J/mol, with an optional uncertainty.
///
/// Values are converted to J/mol once at construction; every computation in the
/// crate works on the canonical value, and conversion back to another unit only
/// happens for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Enthalpy {
    value_si: f64,
    uncertainty_si: f64,
}

impl Enthalpy {
    /// Creates an enthalpy from a value and a unit string such as `"kJ/mol"`.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::MissingUnit` for an empty unit,
    /// `QuantityError::UnknownUnit` for an unrecognized one and
    /// `QuantityError::NonFiniteValue` for NaN or infinite values.
    pub fn new(value: f64, unit: &str) -> Result<Self, QuantityError> {
        Self::with_uncertainty(value, unit, 0.0)
    }

    /// Creates an enthalpy with an uncertainty expressed in the same unit as the value.
    pub fn with_uncertainty(value: f64, unit: &str, uncertainty: f64) -> Result<Self, QuantityError> {
        let unit: EnergyUnit = unit.parse()?;
        if !value.is_finite() {
            return Err(QuantityError::NonFiniteValue(value));
        }
        if !uncertainty.is_finite() || uncertainty < 0.0 {
            return Err(QuantityError::InvalidUncertainty(uncertainty));
        }
        let factor = unit.to_si_factor();
        Ok(Self {
            value_si: value * factor,
            uncertainty_si: uncertainty * factor,
        })
    }

    /// Wraps a value already expressed in J/mol.
    pub fn from_si(value_si: f64) -> Self {
        Self {
            value_si,
            uncertainty_si: 0.0,
        }
    }

    pub fn value_si(&self) -> f64 {
        self.value_si
    }

    pub fn uncertainty_si(&self) -> f64 {
        self.uncertainty_si
    }

    pub fn value_in(&self, unit: EnergyUnit) -> f64 {
        self.value_si / unit.to_si_factor()
    }

    pub fn uncertainty_in(&self, unit: EnergyUnit) -> f64 {
        self.uncertainty_si / unit.to_si_factor()
    }

    /// Formats the value (and uncertainty, when non-zero) in the given unit.
    pub fn display_in(&self, unit: EnergyUnit) -> String {
        if self.uncertainty_si > 0.0 {
            format!(
                "{:.4} ± {:.4} {}",
                self.value_in(unit),
                self.uncertainty_in(unit),
                unit
            )
        } else {
            format!("{:.4} {}", self.value_in(unit), unit)
        }
    }
}

impl fmt::Display for Enthalpy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_in(EnergyUnit::JoulePerMole))
    }
}
