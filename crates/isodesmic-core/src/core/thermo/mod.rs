//! # Thermo Module
//!
//! Unit-tagged molar enthalpies. Values enter the crate with an explicit unit and
//! are canonicalized to J/mol, so species computed with different unit conventions
//! can be combined in one reaction without implicit coercion.
//!
//! - [`units`] - Supported molar energy units and their parsing
//! - [`quantity`] - The [`quantity::Enthalpy`] value type

pub mod quantity;
pub mod units;
