use crate::core::thermo::quantity::Enthalpy;

/// High-level data for one species from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataEntry {
    /// Standard enthalpy of formation at 298 K.
    pub h298: Enthalpy,
    /// Identifier of the species in the Active Thermochemical Tables, if it has one.
    pub atct_id: Option<String>,
}

/// Data computed for one species at one level of theory.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedDataEntry {
    /// Standard enthalpy of formation at 298 K at this level of theory.
    pub h298: Enthalpy,
    /// T1 diagnostic of the coupled-cluster wavefunction, when available.
    pub t1_diagnostic: Option<f64>,
    /// Fractional occupation number weighted electron density, when available.
    pub fod: Option<f64>,
}
