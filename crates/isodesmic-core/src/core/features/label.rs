use crate::core::models::element::Element;
use crate::core::models::topology::BondOrder;
use std::fmt;

/// Which structural features, beyond atom counts, must balance across a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConservationRules {
    /// Conserve the number of each (element pair, bond order) descriptor.
    pub bonds: bool,
    /// Conserve the number of rings of each size.
    pub ring_sizes: bool,
}

impl ConservationRules {
    /// Conserve atoms only.
    pub const ATOMS_ONLY: Self = Self {
        bonds: false,
        ring_sizes: false,
    };
}

impl Default for ConservationRules {
    fn default() -> Self {
        Self {
            bonds: true,
            ring_sizes: true,
        }
    }
}

/// One dimension of the constraint vector space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureLabel {
    /// Number of atoms of an element.
    Element(Element),
    /// Number of bonds of a given order between two elements, with the pair in
    /// alphabetical order of symbols.
    Bond {
        first: Element,
        second: Element,
        order: BondOrder,
    },
    /// Number of rings with the given number of atoms.
    Ring(usize),
}

impl FeatureLabel {
    /// Builds a bond label, normalizing the element pair so that `C-H` and `H-C`
    /// map to the same label.
    pub fn bond(a: Element, b: Element, order: BondOrder) -> Self {
        let (first, second) = if a.symbol() <= b.symbol() { (a, b) } else { (b, a) };
        Self::Bond {
            first,
            second,
            order,
        }
    }
}

impl fmt::Display for FeatureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => write!(f, "{}", element),
            Self::Bond {
                first,
                second,
                order,
            } => write!(f, "{}{}{}", first, order.symbol(), second),
            Self::Ring(size) => write!(f, "{}_ring", size),
        }
    }
}
