use super::label::{ConservationRules, FeatureLabel};
use crate::core::models::graph::MolecularGraph;
use std::collections::HashMap;

/// An ordered multiset of feature labels.
///
/// Labels keep the order in which they were first seen: atom labels first, then
/// bond labels, then ring labels, each in the iteration order of the molecule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureCounts {
    entries: Vec<(FeatureLabel, u32)>,
    index: HashMap<FeatureLabel, usize>,
}

impl FeatureCounts {
    /// Counts the features of `graph` enabled by `rules`.
    ///
    /// Atom counts are always included. A molecule without rings contributes no
    /// ring labels even when ring sizes are conserved.
    pub fn extract<G: MolecularGraph>(graph: &G, rules: ConservationRules) -> Self {
        let mut counts = Self::default();

        for element in graph.elements() {
            counts.add(FeatureLabel::Element(element));
        }
        if rules.bonds {
            for (a, b, order) in graph.bond_descriptors() {
                counts.add(FeatureLabel::bond(a, b, order));
            }
        }
        if rules.ring_sizes {
            for size in graph.ring_sizes() {
                counts.add(FeatureLabel::Ring(size));
            }
        }

        counts
    }

    fn add(&mut self, label: FeatureLabel) {
        match self.index.get(&label) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(label, self.entries.len());
                self.entries.push((label, 1));
            }
        }
    }

    /// Returns the count of `label`, zero when absent.
    pub fn get(&self, label: &FeatureLabel) -> u32 {
        self.index.get(label).map_or(0, |&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureLabel, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = FeatureLabel> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::Molecule;
    use crate::core::models::topology::BondOrder;

    fn element(symbol: &str) -> Element {
        Element::from_symbol(symbol).unwrap()
    }

    /// Cyclopropanol-like skeleton: a three-membered carbon ring with an OH group.
    fn ring_with_hydroxyl() -> Molecule {
        let mut mol = Molecule::new("OC1CC1");
        let o = mol.add_atom(Atom::new(element("O")));
        let c1 = mol.add_atom(Atom::new(element("C")));
        let c2 = mol.add_atom(Atom::new(element("C")));
        let c3 = mol.add_atom(Atom::new(element("C")));
        let h = mol.add_atom(Atom::new(element("H")));
        mol.add_bond(o, c1, BondOrder::Single).unwrap();
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        mol.add_bond(c2, c3, BondOrder::Single).unwrap();
        mol.add_bond(c3, c1, BondOrder::Single).unwrap();
        mol.add_bond(o, h, BondOrder::Single).unwrap();
        mol.add_ring(&[c1, c2, c3]).unwrap();
        mol
    }

    #[test]
    fn extract_orders_atoms_then_bonds_then_rings() {
        let counts = FeatureCounts::extract(&ring_with_hydroxyl(), ConservationRules::default());
        let labels: Vec<String> = counts.labels().map(|l| l.to_string()).collect();
        assert_eq!(labels, vec!["O", "C", "H", "C-O", "C-C", "H-O", "3_ring"]);
        assert_eq!(counts.get(&FeatureLabel::Element(element("C"))), 3);
        assert_eq!(
            counts.get(&FeatureLabel::bond(element("C"), element("C"), BondOrder::Single)),
            3
        );
        assert_eq!(counts.get(&FeatureLabel::Ring(3)), 1);
    }

    #[test]
    fn extract_respects_disabled_rules() {
        let counts = FeatureCounts::extract(&ring_with_hydroxyl(), ConservationRules::ATOMS_ONLY);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<u32>(), 5);

        let no_rings = ConservationRules {
            bonds: true,
            ring_sizes: false,
        };
        let counts = FeatureCounts::extract(&ring_with_hydroxyl(), no_rings);
        assert_eq!(counts.get(&FeatureLabel::Ring(3)), 0);
        assert_eq!(counts.len(), 6);
    }

    #[test]
    fn missing_labels_count_as_zero() {
        let counts = FeatureCounts::extract(&ring_with_hydroxyl(), ConservationRules::default());
        assert_eq!(counts.get(&FeatureLabel::Element(element("N"))), 0);
        assert!(!counts.is_empty());
        assert!(FeatureCounts::default().is_empty());
    }
}
