//! # Reference Module
//!
//! Reference species and the sets they are distributed in.
//!
//! ## Overview
//!
//! A reference species carries high-level enthalpies from one or more trusted
//! sources together with low-level enthalpies computed at one or more levels of
//! theory. Selecting a level of theory turns a reference species into a
//! [`crate::core::species::Species`] usable as a reaction companion; the
//! high-level value is taken from the preferred source.
//!
//! ## Key Components
//!
//! - [`entry`] - Per-source and per-level data entries
//! - [`preferred`] - Resolution of the preferred high-level source
//! - [`species`] - The [`species::ReferenceSpecies`] record
//! - [`records`] - The TOML file format of reference sets
//! - [`database`] - Reference sets and the database that holds them
//! - [`error`] - Error types for conversion and loading
//!
//! ## File Format
//!
//! ```toml
//! name = "main"
//!
//! [[species]]
//! label = "methane"
//! index = 0
//!
//! [species.molecule]
//! atoms = [{ serial = 1, element = "C", hydrogens = 4 }]
//!
//! [[species.reference-data]]
//! source = "ATcT"
//! h298 = { value = -74.52, unit = "kJ/mol", uncertainty = 0.06 }
//!
//! [[species.calculated-data]]
//! level-of-theory = "wb97m-v/def2-tzvpd"
//! h298 = { value = -71.9, unit = "kJ/mol" }
//! ```

pub mod database;
pub mod entry;
pub mod error;
pub mod preferred;
pub mod records;
pub mod species;
