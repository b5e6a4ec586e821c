//! # Isodesmic Core Library
//!
//! Estimation of high-level enthalpies of formation through error-canceling
//! (isodesmic) reactions.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Species`),
//!   feature extraction over molecular graphs, the constraint space that filters a
//!   reference pool against a target, and the `Reaction` that produces the
//!   enthalpy estimate.
//!
//! - **[`reference`]: The Data Layer.** Reference species records, the
//!   preferred-source rules for picking high-level data, and a database of
//!   reference sets loaded from TOML files.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that tie the other two
//!   layers together: building the constraint set for a target, delegating
//!   reaction selection to a pluggable solver and evaluating the resulting
//!   reaction, one target at a time or in parallel batches.

pub mod core;
pub mod reference;
pub mod workflows;
