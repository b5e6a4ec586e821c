use super::atom::Atom;
use super::element::Element;
use super::graph::MolecularGraph;
use super::ids::AtomId;
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

const MIN_RING_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoleculeError {
    #[error("Atom {0:?} does not belong to this molecule")]
    UnknownAtom(AtomId),

    #[error("An atom cannot be bonded to itself")]
    SelfBond,

    #[error("Bond already exists as {existing}, cannot add it again as {requested}")]
    ConflictingBondOrder {
        existing: BondOrder,
        requested: BondOrder,
    },

    #[error("Invalid ring of {size} atom(s): {reason}")]
    InvalidRing { size: usize, reason: &'static str },
}

/// A labelled molecular graph: atoms, bonds and a ring decomposition.
///
/// Atoms are never removed, so iteration over the atom storage follows
/// insertion order. The ring decomposition is supplied by the caller (for
/// example from a reference file); every ring is checked to be a closed cycle
/// of bonded atoms when it is added.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    label: String,
    atoms: SlotMap<AtomId, Atom>,
    bonds: Vec<Bond>,
    rings: Vec<Vec<AtomId>>,
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl Molecule {
    /// Creates an empty molecule with a display label (a name, SMILES string or
    /// any other identifier meaningful to the caller).
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in insertion order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn rings(&self) -> &[Vec<AtomId>] {
        &self.rings
    }

    /// Returns the atoms directly bonded to `atom_id`.
    pub fn neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }

    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());
        atom_id
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding a bond that already exists with the same order succeeds without
    /// creating a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `MoleculeError::UnknownAtom` if either atom is not part of this
    /// molecule, `MoleculeError::SelfBond` if both ends are the same atom, or
    /// `MoleculeError::ConflictingBondOrder` if the bond exists with another order.
    pub fn add_bond(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        order: BondOrder,
    ) -> Result<(), MoleculeError> {
        for id in [atom1_id, atom2_id] {
            if !self.atoms.contains_key(id) {
                return Err(MoleculeError::UnknownAtom(id));
            }
        }
        if atom1_id == atom2_id {
            return Err(MoleculeError::SelfBond);
        }
        if let Some(existing) = self.bonds.iter().find(|b| b.connects(atom1_id, atom2_id)) {
            if existing.order != order {
                return Err(MoleculeError::ConflictingBondOrder {
                    existing: existing.order,
                    requested: order,
                });
            }
            return Ok(());
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.bond_adjacency[atom1_id].push(atom2_id);
        self.bond_adjacency[atom2_id].push(atom1_id);
        Ok(())
    }

    /// Records a ring given as its atoms in cyclic order.
    ///
    /// # Errors
    ///
    /// Returns `MoleculeError::InvalidRing` if the ring has fewer than three
    /// atoms, repeats an atom, or any two consecutive atoms (including the last
    /// and the first) are not bonded, or it covers the same atoms as a ring
    /// already recorded. Returns `MoleculeError::UnknownAtom` for
    /// atoms outside this molecule.
    pub fn add_ring(&mut self, ring: &[AtomId]) -> Result<(), MoleculeError> {
        let size = ring.len();
        if size < MIN_RING_SIZE {
            return Err(MoleculeError::InvalidRing {
                size,
                reason: "a ring needs at least three atoms",
            });
        }
        if let Some(&missing) = ring.iter().find(|&&id| !self.atoms.contains_key(id)) {
            return Err(MoleculeError::UnknownAtom(missing));
        }
        let distinct: HashSet<AtomId> = ring.iter().copied().collect();
        if distinct.len() != size {
            return Err(MoleculeError::InvalidRing {
                size,
                reason: "an atom appears more than once",
            });
        }
        let closed = (0..size).all(|i| self.are_bonded(ring[i], ring[(i + 1) % size]));
        if !closed {
            return Err(MoleculeError::InvalidRing {
                size,
                reason: "consecutive ring atoms must be bonded",
            });
        }

        let duplicate = self.rings.iter().any(|existing| {
            existing.len() == size && existing.iter().all(|id| distinct.contains(id))
        });
        if duplicate {
            return Err(MoleculeError::InvalidRing {
                size,
                reason: "duplicate ring",
            });
        }

        self.rings.push(ring.to_vec());
        Ok(())
    }

    pub fn are_bonded(&self, a: AtomId, b: AtomId) -> bool {
        self.bond_adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(&b))
    }

    /// Returns the molecular formula in Hill order.
    ///
    /// Carbon comes first and hydrogen second when carbon is present; every other
    /// element (and all elements when there is no carbon) follows alphabetically.
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for atom in self.atoms.values() {
            *counts.entry(atom.element.symbol()).or_default() += 1;
        }

        let mut formula = String::new();
        let mut push = |symbol: &str, count: usize| {
            formula.push_str(symbol);
            if count > 1 {
                formula.push_str(&count.to_string());
            }
        };

        if let Some(carbon) = counts.remove("C") {
            push("C", carbon);
            if let Some(hydrogen) = counts.remove("H") {
                push("H", hydrogen);
            }
        }
        for (symbol, count) in counts {
            push(symbol, count);
        }
        formula
    }
}

impl MolecularGraph for Molecule {
    fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.atoms.values().map(|atom| atom.element)
    }

    fn bond_descriptors(&self) -> impl Iterator<Item = (Element, Element, BondOrder)> + '_ {
        self.bonds.iter().filter_map(|bond| {
            let first = self.atoms.get(bond.atom1_id)?;
            let second = self.atoms.get(bond.atom2_id)?;
            Some((first.element, second.element, bond.order))
        })
    }

    fn ring_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.rings.iter().map(Vec::len)
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            f.write_str(&self.formula())
        } else {
            f.write_str(&self.label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(symbol: &str) -> Element {
        Element::from_symbol(symbol).unwrap()
    }

    fn ethane() -> Molecule {
        let mut mol = Molecule::new("CC");
        let c1 = mol.add_atom(Atom::new(element("C")));
        let c2 = mol.add_atom(Atom::new(element("C")));
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        for carbon in [c1, c1, c1, c2, c2, c2] {
            let h = mol.add_atom(Atom::new(element("H")));
            mol.add_bond(carbon, h, BondOrder::Single).unwrap();
        }
        mol
    }

    fn cyclopropane_skeleton() -> (Molecule, [AtomId; 3]) {
        let mut mol = Molecule::new("C1CC1");
        let a = mol.add_atom(Atom::new(element("C")));
        let b = mol.add_atom(Atom::new(element("C")));
        let c = mol.add_atom(Atom::new(element("C")));
        mol.add_bond(a, b, BondOrder::Single).unwrap();
        mol.add_bond(b, c, BondOrder::Single).unwrap();
        mol.add_bond(c, a, BondOrder::Single).unwrap();
        (mol, [a, b, c])
    }

    #[test]
    fn add_atom_preserves_insertion_order() {
        let mol = ethane();
        let symbols: Vec<_> = mol.elements().map(|e| e.symbol()).collect();
        assert_eq!(symbols, vec!["C", "C", "H", "H", "H", "H", "H", "H"]);
        assert_eq!(mol.atom_count(), 8);
    }

    #[test]
    fn add_bond_is_idempotent() {
        let mut mol = Molecule::new("O2");
        let o1 = mol.add_atom(Atom::new(element("O")));
        let o2 = mol.add_atom(Atom::new(element("O")));
        mol.add_bond(o1, o2, BondOrder::Double).unwrap();
        mol.add_bond(o2, o1, BondOrder::Double).unwrap();
        assert_eq!(mol.bonds().len(), 1);
        assert_eq!(mol.bonds()[0].order, BondOrder::Double);
        assert_eq!(mol.neighbors(o1), Some(&[o2][..]));
    }

    #[test]
    fn add_bond_rejects_conflicting_order() {
        let mut mol = Molecule::new("C=C");
        let c1 = mol.add_atom(Atom::new(element("C")));
        let c2 = mol.add_atom(Atom::new(element("C")));
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        assert_eq!(
            mol.add_bond(c2, c1, BondOrder::Double),
            Err(MoleculeError::ConflictingBondOrder {
                existing: BondOrder::Single,
                requested: BondOrder::Double,
            })
        );
        assert_eq!(mol.bonds().len(), 1);
        assert_eq!(mol.bonds()[0].order, BondOrder::Single);
    }

    #[test]
    fn add_bond_rejects_self_bonds_and_foreign_atoms() {
        let mut mol = Molecule::new("C");
        let c = mol.add_atom(Atom::new(element("C")));
        assert_eq!(
            mol.add_bond(c, c, BondOrder::Single),
            Err(MoleculeError::SelfBond)
        );

        let mut other = Molecule::new("N");
        other.add_atom(Atom::new(element("N")));
        let foreign = other.add_atom(Atom::new(element("N")));
        assert_eq!(
            mol.add_bond(c, foreign, BondOrder::Single),
            Err(MoleculeError::UnknownAtom(foreign))
        );
    }

    #[test]
    fn add_ring_accepts_closed_cycles() {
        let (mut mol, [a, b, c]) = cyclopropane_skeleton();
        mol.add_ring(&[a, b, c]).unwrap();
        assert_eq!(mol.rings().len(), 1);
        assert_eq!(mol.ring_sizes().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn add_ring_rejects_short_repeated_or_open_rings() {
        let (mut mol, [a, b, c]) = cyclopropane_skeleton();
        assert!(matches!(
            mol.add_ring(&[a, b]),
            Err(MoleculeError::InvalidRing { size: 2, .. })
        ));
        assert!(matches!(
            mol.add_ring(&[a, b, a]),
            Err(MoleculeError::InvalidRing { size: 3, .. })
        ));

        let mut open = Molecule::new("CCC");
        let x = open.add_atom(Atom::new(element("C")));
        let y = open.add_atom(Atom::new(element("C")));
        let z = open.add_atom(Atom::new(element("C")));
        open.add_bond(x, y, BondOrder::Single).unwrap();
        open.add_bond(y, z, BondOrder::Single).unwrap();
        assert!(matches!(
            open.add_ring(&[x, y, z]),
            Err(MoleculeError::InvalidRing { size: 3, .. })
        ));
        assert!(mol.add_ring(&[a, b, c]).is_ok());
    }

    #[test]
    fn add_ring_rejects_the_same_ring_twice() {
        let (mut mol, [a, b, c]) = cyclopropane_skeleton();
        mol.add_ring(&[a, b, c]).unwrap();
        assert_eq!(
            mol.add_ring(&[b, c, a]),
            Err(MoleculeError::InvalidRing {
                size: 3,
                reason: "duplicate ring",
            })
        );
        assert_eq!(mol.ring_sizes().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn bond_descriptors_report_elements_and_orders() {
        let mut mol = Molecule::new("C=O");
        let c = mol.add_atom(Atom::new(element("C")));
        let o = mol.add_atom(Atom::new(element("O")));
        mol.add_bond(c, o, BondOrder::Double).unwrap();
        let descriptors: Vec<_> = mol.bond_descriptors().collect();
        assert_eq!(
            descriptors,
            vec![(element("C"), element("O"), BondOrder::Double)]
        );
    }

    #[test]
    fn formula_uses_hill_order() {
        assert_eq!(ethane().formula(), "C2H6");

        let mut water = Molecule::new("");
        let o = water.add_atom(Atom::new(element("O")));
        for _ in 0..2 {
            let h = water.add_atom(Atom::new(element("H")));
            water.add_bond(o, h, BondOrder::Single).unwrap();
        }
        assert_eq!(water.formula(), "H2O");
        assert_eq!(water.to_string(), "H2O");
    }

    #[test]
    fn display_prefers_label() {
        assert_eq!(ethane().to_string(), "CC");
    }
}
