use super::counts::FeatureCounts;
use super::label::{ConservationRules, FeatureLabel};
use super::space::LabelSpace;
use crate::core::models::graph::MolecularGraph;
use nalgebra::DVector;

/// The outcome of vectorizing a molecule against a fixed label space.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Vectorized {
    /// Every feature of the molecule has an index; the vector is aligned to the space.
    Compatible(DVector<u32>),
    /// The molecule has at least one feature outside the label space. `label` is
    /// the first such feature encountered.
    Incompatible { label: FeatureLabel },
}

impl Vectorized {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible(_))
    }

    pub fn into_vector(self) -> Option<DVector<u32>> {
        match self {
            Self::Compatible(vector) => Some(vector),
            Self::Incompatible { .. } => None,
        }
    }
}

/// Turns molecules into dense count vectors over a fixed label space.
#[derive(Debug, Clone, Copy)]
pub struct FeatureVectorizer<'a> {
    space: &'a LabelSpace,
    rules: ConservationRules,
}

impl<'a> FeatureVectorizer<'a> {
    pub fn new(space: &'a LabelSpace, rules: ConservationRules) -> Self {
        Self { space, rules }
    }

    pub fn vectorize<G: MolecularGraph>(&self, graph: &G) -> Vectorized {
        self.vectorize_counts(&FeatureCounts::extract(graph, self.rules))
    }

    /// Aligns pre-computed counts to the label space.
    ///
    /// Labels of the space that the counts do not mention stay zero; any label in
    /// the counts that the space lacks makes the result incompatible.
    pub fn vectorize_counts(&self, counts: &FeatureCounts) -> Vectorized {
        let mut vector = DVector::<u32>::zeros(self.space.len());
        for (label, count) in counts.iter() {
            match self.space.index_of(&label) {
                Some(i) => vector[i] += count,
                None => return Vectorized::Incompatible { label },
            }
        }
        Vectorized::Compatible(vector)
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

    fn chain(label: &str, symbols: &[&str]) -> Molecule {
        let mut mol = Molecule::new(label);
        let ids: Vec<_> = symbols
            .iter()
            .map(|s| mol.add_atom(Atom::new(element(s))))
            .collect();
        for pair in ids.windows(2) {
            mol.add_bond(pair[0], pair[1], BondOrder::Single).unwrap();
        }
        mol
    }

    fn space_for(mol: &Molecule, rules: ConservationRules) -> LabelSpace {
        LabelSpace::from_counts(&FeatureCounts::extract(mol, rules))
    }

    #[test]
    fn vectorize_subset_molecule_leaves_unused_labels_zero() {
        let target = chain("HCOH", &["H", "C", "O", "H"]);
        let space = space_for(&target, ConservationRules::ATOMS_ONLY);
        let vectorizer = FeatureVectorizer::new(&space, ConservationRules::ATOMS_ONLY);

        let hydrogen = chain("HH", &["H", "H"]);
        let vector = vectorizer.vectorize(&hydrogen).into_vector().unwrap();
        assert_eq!(vector.as_slice(), &[2, 0, 0]);
    }

    #[test]
    fn vectorize_flags_unknown_atoms_as_incompatible() {
        let target = chain("CH", &["C", "H"]);
        let space = space_for(&target, ConservationRules::ATOMS_ONLY);
        let vectorizer = FeatureVectorizer::new(&space, ConservationRules::ATOMS_ONLY);

        let result = vectorizer.vectorize(&chain("CO", &["C", "O"]));
        assert_eq!(
            result,
            Vectorized::Incompatible {
                label: FeatureLabel::Element(element("O"))
            }
        );
        assert!(!result.is_compatible());
    }

    #[test]
    fn vectorize_flags_unknown_bond_types_only_when_conserved() {
        let target = chain("COC", &["C", "O", "C"]);
        let candidate = chain("CCO", &["C", "C", "O"]);

        let rules = ConservationRules::default();
        let space = space_for(&target, rules);
        let result = FeatureVectorizer::new(&space, rules).vectorize(&candidate);
        assert!(matches!(
            result,
            Vectorized::Incompatible {
                label: FeatureLabel::Bond { .. }
            }
        ));

        let rules = ConservationRules::ATOMS_ONLY;
        let space = space_for(&target, rules);
        let result = FeatureVectorizer::new(&space, rules).vectorize(&candidate);
        assert!(result.is_compatible());
    }

    #[test]
    fn vectorize_target_against_own_space_reproduces_counts() {
        let target = chain("CCCO", &["C", "C", "C", "O"]);
        let rules = ConservationRules::default();
        let space = space_for(&target, rules);
        let vector = FeatureVectorizer::new(&space, rules)
            .vectorize(&target)
            .into_vector()
            .unwrap();
        assert_eq!(vector.as_slice(), &[3, 1, 2, 1]);
    }
}
