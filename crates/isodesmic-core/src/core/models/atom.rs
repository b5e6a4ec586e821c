use super::element::Element;

/// An atom in a molecular graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// The chemical element of the atom.
    pub element: Element,
    /// An optional human-readable name (e.g. "C1"); empty when unnamed.
    pub name: String,
}

impl Atom {
    /// Creates an unnamed atom of the given element.
    pub fn new(element: Element) -> Self {
        Self {
            element,
            name: String::new(),
        }
    }

    /// Creates an atom carrying a display name.
    pub fn named(element: Element, name: &str) -> Self {
        Self {
            element,
            name: name.to_string(),
        }
    }
}
