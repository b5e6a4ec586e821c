//! # Core Models Module
//!
//! This module contains the molecular structure types that the constraint and
//! reaction machinery operates on.
//!
//! ## Overview
//!
//! The models are deliberately minimal: a molecule is a labelled graph of atoms and
//! bonds together with a ring decomposition supplied by the caller. Structure
//! perception (SMILES parsing, ring perception, isomorphism) belongs to upstream
//! tooling; these types only hold and validate its results.
//!
//! ## Key Components
//!
//! - [`element`] - Element symbols backed by a static table
//! - [`atom`] - Individual atom representation
//! - [`topology`] - Bonds and bond orders
//! - [`molecule`] - The molecular graph with its ring decomposition
//! - [`graph`] - The [`graph::MolecularGraph`] trait consumed by feature extraction
//! - [`record`] - Serialized molecule records used by input and reference files
//! - [`ids`] - Stable atom identifiers
//!
//! ## Usage
//!
//! ```ignore
//! use isodesmic::core::models::{atom::Atom, element::Element, molecule::Molecule};
//! use isodesmic::core::models::topology::BondOrder;
//!
//! let mut molecule = Molecule::new("C=O");
//! let c = molecule.add_atom(Atom::new(Element::from_symbol("C")?));
//! let o = molecule.add_atom(Atom::new(Element::from_symbol("O")?));
//! molecule.add_bond(c, o, BondOrder::Double)?;
//! ```

pub mod atom;
pub mod element;
pub mod graph;
pub mod ids;
pub mod molecule;
pub mod record;
pub mod topology;
