use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const JOULES_PER_CALORIE: f64 = 4.184;
const JOULES_PER_MOLE_PER_HARTREE: f64 = 2_625_499.639_479_9;
const JOULES_PER_MOLE_PER_EV: f64 = 96_485.332_12;
const JOULES_PER_MOLE_PER_WAVENUMBER: f64 = 11.962_656_58;

/// Molar energy units accepted for enthalpy values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnergyUnit {
    #[default]
    JoulePerMole,
    KilojoulePerMole,
    CaloriePerMole,
    KilocaloriePerMole,
    Hartree,
    ElectronVolt,
    Wavenumber,
}

static UNIT_ALIASES: Map<&'static str, EnergyUnit> = phf_map! {
    "j/mol" => EnergyUnit::JoulePerMole,
    "kj/mol" => EnergyUnit::KilojoulePerMole,
    "cal/mol" => EnergyUnit::CaloriePerMole,
    "kcal/mol" => EnergyUnit::KilocaloriePerMole,
    "hartree" => EnergyUnit::Hartree,
    "hartrees" => EnergyUnit::Hartree,
    "eh" => EnergyUnit::Hartree,
    "ev" => EnergyUnit::ElectronVolt,
    "ev/molecule" => EnergyUnit::ElectronVolt,
    "cm^-1" => EnergyUnit::Wavenumber,
    "cm-1" => EnergyUnit::Wavenumber,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUnitError {
    #[error("Missing energy unit")]
    Missing,
    #[error("Unknown energy unit: '{0}'")]
    Unknown(String),
}

impl EnergyUnit {
    /// The factor converting a value in this unit to J/mol.
    pub fn to_si_factor(&self) -> f64 {
        match self {
            Self::JoulePerMole => 1.0,
            Self::KilojoulePerMole => 1000.0,
            Self::CaloriePerMole => JOULES_PER_CALORIE,
            Self::KilocaloriePerMole => 1000.0 * JOULES_PER_CALORIE,
            Self::Hartree => JOULES_PER_MOLE_PER_HARTREE,
            Self::ElectronVolt => JOULES_PER_MOLE_PER_EV,
            Self::Wavenumber => JOULES_PER_MOLE_PER_WAVENUMBER,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::JoulePerMole => "J/mol",
            Self::KilojoulePerMole => "kJ/mol",
            Self::CaloriePerMole => "cal/mol",
            Self::KilocaloriePerMole => "kcal/mol",
            Self::Hartree => "hartree",
            Self::ElectronVolt => "eV",
            Self::Wavenumber => "cm^-1",
        }
    }
}

impl FromStr for EnergyUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if key.is_empty() {
            return Err(ParseUnitError::Missing);
        }
        UNIT_ALIASES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ParseUnitError::Unknown(s.to_string()))
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
