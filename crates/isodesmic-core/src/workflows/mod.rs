//! # Workflows Module
//!
//! End-to-end estimation procedures built on the [`crate::core`] and
//! [`crate::reference`] layers.
//!
//! ## Overview
//!
//! A workflow takes a target species and a pool of reference species, builds the
//! target's constraint set, hands it to a [`solver::ReactionSolver`] that selects a
//! balanced reaction, and evaluates that reaction into an enthalpy estimate.
//! Selecting the reaction is delegated: any linear or integer programming backend
//! can be plugged in through the solver trait.
//!
//! ## Architecture
//!
//! - **Estimation** ([`estimate`]) - Single-target and batch estimation
//! - **Configuration** ([`config`]) - Level of theory, conservation rules and reference selection
//! - **Solver Seam** ([`solver`]) - The contract between the constraint set and a reaction solver
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front-ends

pub mod config;
pub mod estimate;
pub mod progress;
pub mod solver;
