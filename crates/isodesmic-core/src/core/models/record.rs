use super::atom::Atom;
use super::element::{Element, ParseElementError};
use super::ids::AtomId;
use super::molecule::{Molecule, MoleculeError};
use super::topology::{BondOrder, ParseBondOrderError};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

const HYDROGEN_SYMBOL: &str = "H";

/// A single atom as written in a molecule record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AtomRecord {
    /// Serial number used by bonds and rings to refer to this atom.
    pub serial: usize,
    /// Element symbol (e.g. "C", "Cl").
    pub element: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Number of hydrogens attached to this atom that are not listed explicitly.
    #[serde(default)]
    pub hydrogens: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondRecord {
    pub atoms: [usize; 2],
    #[serde(default = "default_bond_order")]
    pub order: String,
}

fn default_bond_order() -> String {
    "single".to_string()
}

/// The serialized form of a molecule used in reference and input files.
///
/// Rings are listed by atom serials in cyclic order and should form the smallest
/// set of smallest rings of the molecule; they are validated as closed cycles but
/// not perceived.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoleculeRecord {
    #[serde(default)]
    pub label: Option<String>,
    pub atoms: Vec<AtomRecord>,
    #[serde(default)]
    pub bonds: Vec<BondRecord>,
    #[serde(default)]
    pub rings: Vec<Vec<usize>>,
}

#[derive(Debug, Error)]
pub enum MoleculeRecordError {
    #[error("Duplicate atom serial '{0}' in molecule record")]
    DuplicateAtomSerial(usize),

    #[error("Molecule record references non-existent atom serial '{0}'")]
    UnknownAtomSerial(usize),

    #[error(transparent)]
    Element(#[from] ParseElementError),

    #[error(transparent)]
    BondOrder(#[from] ParseBondOrderError),

    #[error("Invalid molecular structure: {0}")]
    Structure(#[from] MoleculeError),
}

impl MoleculeRecord {
    /// Builds a `Molecule` from this record.
    ///
    /// Explicit atoms are added first in record order. Implicit hydrogens are
    /// appended afterwards, each bonded to its parent atom, so they never change
    /// the serial-to-atom mapping used by bonds and rings.
    ///
    /// `fallback_label` is used when the record carries no label of its own.
    ///
    /// # Errors
    ///
    /// Returns `MoleculeRecordError` for duplicate or dangling serials, unknown
    /// element symbols, unparseable bond orders and invalid rings.
    pub fn to_molecule(&self, fallback_label: &str) -> Result<Molecule, MoleculeRecordError> {
        let label = self.label.as_deref().unwrap_or(fallback_label);
        let mut molecule = Molecule::new(label);
        let mut serial_map: HashMap<usize, AtomId> = HashMap::with_capacity(self.atoms.len());

        for record in &self.atoms {
            let element = Element::from_symbol(&record.element)?;
            let atom = match &record.name {
                Some(name) => Atom::named(element, name),
                None => Atom::new(element),
            };
            let atom_id = molecule.add_atom(atom);
            if serial_map.insert(record.serial, atom_id).is_some() {
                return Err(MoleculeRecordError::DuplicateAtomSerial(record.serial));
            }
        }

        let resolve = |serial: usize| {
            serial_map
                .get(&serial)
                .copied()
                .ok_or(MoleculeRecordError::UnknownAtomSerial(serial))
        };

        for bond in &self.bonds {
            let order: BondOrder = bond.order.parse()?;
            molecule.add_bond(resolve(bond.atoms[0])?, resolve(bond.atoms[1])?, order)?;
        }

        let hydrogen = Element::from_symbol(HYDROGEN_SYMBOL)?;
        for record in self.atoms.iter().filter(|r| r.hydrogens > 0) {
            let parent = resolve(record.serial)?;
            for _ in 0..record.hydrogens {
                let h = molecule.add_atom(Atom::new(hydrogen));
                molecule.add_bond(parent, h, BondOrder::Single)?;
            }
        }

        for ring in &self.rings {
            let ids = ring
                .iter()
                .map(|&serial| resolve(serial))
                .collect::<Result<Vec<_>, _>>()?;
            molecule.add_ring(&ids)?;
        }

        Ok(molecule)
    }
}
