//! # Core Module
//!
//! This module provides the data models and pure algorithms behind error-canceling
//! reaction thermochemistry.
//!
//! ## Overview
//!
//! Everything in this layer is immutable once built and free of I/O. A
//! [`species::Species`] pairs a molecular graph with enthalpies computed at a named
//! level of theory; the [`features`] module reduces molecules to count vectors and
//! filters a candidate pool down to species structurally compatible with a target;
//! a [`reaction::Reaction`] turns a balanced selection of those candidates into an
//! estimated high-level enthalpy of formation.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Elements, atoms, bonds, rings and molecules
//! - **Quantities** ([`thermo`]) - Unit-tagged molar enthalpies
//! - **Structural Constraints** ([`features`]) - Feature labels, vectorization and candidate filtering
//! - **Participants** ([`species`]) - Species with low-level and optional high-level data
//! - **Reactions** ([`reaction`]) - Error-canceling reactions and the enthalpy estimate
//!
//! ## Scientific Foundation
//!
//! Low-level quantum chemistry methods make systematic errors that depend mostly on
//! local bonding. A reaction that conserves atoms, bond types and ring sizes lets
//! those errors cancel, so the low-level reaction enthalpy measures the residual
//! error, which is then removed from the reference species' high-level values.

pub mod features;
pub mod models;
pub mod reaction;
pub mod species;
pub mod thermo;
