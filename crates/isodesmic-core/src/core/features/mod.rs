//! # Features Module
//!
//! Structural feature extraction and the constraint space built on top of it.
//!
//! A molecule is summarized by counts over a set of [`label::FeatureLabel`]s: one
//! per element, optionally one per (element pair, bond order) descriptor and one
//! per ring size. The target species of an estimate fixes the label space; every
//! candidate reference is then either projected onto that space or rejected because
//! it carries a feature the target does not have.
//!
//! ## Key Components
//!
//! - [`label`] - Feature labels and the [`label::ConservationRules`] switches
//! - [`counts`] - Ordered feature counts of a single molecule
//! - [`space`] - The frozen, ordered label space
//! - [`vectorizer`] - Projection of a molecule onto a label space
//! - [`constraints`] - The target's constraint space and candidate filtering

pub mod constraints;
pub mod counts;
pub mod label;
pub mod space;
pub mod vectorizer;
