use super::element::Element;
use super::topology::BondOrder;

/// The structural view of a molecule that feature extraction depends on.
///
/// Implementors expose their atoms, bonds and ring decomposition as iterators in
/// a stable order. Feature labels are assigned in first-seen order, so the order
/// of these iterators determines the layout of every constraint vector built
/// from the molecule.
pub trait MolecularGraph {
    /// Yields the element of every atom, in atom order.
    fn elements(&self) -> impl Iterator<Item = Element> + '_;

    /// Yields `(element, element, order)` for every bond, in bond order.
    fn bond_descriptors(&self) -> impl Iterator<Item = (Element, Element, BondOrder)> + '_;

    /// Yields the size of every ring in the smallest set of smallest rings.
    fn ring_sizes(&self) -> impl Iterator<Item = usize> + '_;
}
